//! Element-template model and synthesis.

mod generate;
mod model;

pub use generate::generate_template;
pub use model::{
    Binding, BindingType, Group, Property, Template, APPLIES_TO_SERVICE_TASK, TEMPLATE_SCHEMA,
};
