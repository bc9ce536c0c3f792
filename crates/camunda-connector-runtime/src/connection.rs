//! Connection configuration for the engine channel.
//!
//! These values describe how to reach a Zeebe instance; the actual channel
//! construction (gRPC, TLS material) is owned by the external worker
//! library. Configuration is loaded from environment variables:
//! `CAMUNDA_CONNECTION_TYPE` selects the variant, the remaining variables
//! depend on it.

use crate::error::{RuntimeError, RuntimeResult};

pub const CONNECTION_TYPE_VAR: &str = "CAMUNDA_CONNECTION_TYPE";
pub const CLIENT_ID_VAR: &str = "CAMUNDA_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "CAMUNDA_CLIENT_SECRET";
pub const CLUSTER_ID_VAR: &str = "CAMUNDA_CLUSTER_ID";
pub const HOSTNAME_VAR: &str = "ZEEBE_HOSTNAME";
pub const PORT_VAR: &str = "ZEEBE_PORT";
pub const ROOT_CA_VAR: &str = "SSL_ROOT_CA";
pub const PRIVATE_KEY_VAR: &str = "SSL_PRIVATE_KEY";
pub const CERTIFICATE_CHAIN_VAR: &str = "SSL_CERTIFICATE_CHAIN";

/// How to connect to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionConfig {
    /// Camunda SaaS.
    Cloud { client_id: String, client_secret: String, cluster_id: String },
    /// Self-hosted instance without transport security.
    Insecure { hostname: String, port: u16 },
    /// Self-hosted instance over TLS.
    Secure {
        hostname: String,
        port: u16,
        root_certificates: String,
        private_key: String,
        certificate_chain: Option<String>,
    },
}

impl ConnectionConfig {
    /// Load the configuration from process environment variables.
    pub fn from_env() -> RuntimeResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load the configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> RuntimeResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let connection_type = require(&lookup, CONNECTION_TYPE_VAR)?;

        match connection_type.as_str() {
            "CAMUNDA_CLOUD" => Ok(Self::Cloud {
                client_id: require(&lookup, CLIENT_ID_VAR)?,
                client_secret: require(&lookup, CLIENT_SECRET_VAR)?,
                cluster_id: require(&lookup, CLUSTER_ID_VAR)?,
            }),
            "INSECURE" => Ok(Self::Insecure {
                hostname: require(&lookup, HOSTNAME_VAR)?,
                port: port(&lookup)?,
            }),
            "SECURE" => Ok(Self::Secure {
                hostname: require(&lookup, HOSTNAME_VAR)?,
                port: port(&lookup)?,
                root_certificates: require(&lookup, ROOT_CA_VAR)?,
                private_key: require(&lookup, PRIVATE_KEY_VAR)?,
                certificate_chain: lookup(CERTIFICATE_CHAIN_VAR),
            }),
            other => Err(RuntimeError::UnknownConnectionType { value: other.to_string() }),
        }
    }
}

fn require<F>(lookup: &F, name: &str) -> RuntimeResult<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name).ok_or_else(|| RuntimeError::missing_env_var(name))
}

fn port<F>(lookup: &F) -> RuntimeResult<u16>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = require(lookup, PORT_VAR)?;
    raw.parse::<u16>().map_err(|e| RuntimeError::invalid_env_var(PORT_VAR, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn cloud_config_from_variables() {
        let config = ConnectionConfig::from_lookup(lookup(&[
            (CONNECTION_TYPE_VAR, "CAMUNDA_CLOUD"),
            (CLIENT_ID_VAR, "client_id"),
            (CLIENT_SECRET_VAR, "client_secret"),
            (CLUSTER_ID_VAR, "cluster_id"),
        ]))
        .unwrap();

        assert_eq!(
            config,
            ConnectionConfig::Cloud {
                client_id: "client_id".to_string(),
                client_secret: "client_secret".to_string(),
                cluster_id: "cluster_id".to_string(),
            }
        );
    }

    #[test]
    fn insecure_config_from_variables() {
        let config = ConnectionConfig::from_lookup(lookup(&[
            (CONNECTION_TYPE_VAR, "INSECURE"),
            (HOSTNAME_VAR, "127.0.0.1"),
            (PORT_VAR, "26500"),
        ]))
        .unwrap();

        assert_eq!(
            config,
            ConnectionConfig::Insecure { hostname: "127.0.0.1".to_string(), port: 26500 }
        );
    }

    #[test]
    fn secure_config_allows_missing_chain() {
        let config = ConnectionConfig::from_lookup(lookup(&[
            (CONNECTION_TYPE_VAR, "SECURE"),
            (HOSTNAME_VAR, "zeebe.local"),
            (PORT_VAR, "26500"),
            (ROOT_CA_VAR, "root"),
            (PRIVATE_KEY_VAR, "key"),
        ]))
        .unwrap();

        match config {
            ConnectionConfig::Secure { certificate_chain, .. } => {
                assert_eq!(certificate_chain, None);
            }
            other => panic!("unexpected config: {other:?}"),
        }
    }

    #[test]
    fn missing_connection_type_fails() {
        let err = ConnectionConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, RuntimeError::MissingEnvVar { .. }));
    }

    #[test]
    fn unknown_connection_type_fails() {
        let err = ConnectionConfig::from_lookup(lookup(&[(CONNECTION_TYPE_VAR, "INVALID")]))
            .unwrap_err();
        match err {
            RuntimeError::UnknownConnectionType { value } => assert_eq!(value, "INVALID"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn bad_port_names_the_variable() {
        let err = ConnectionConfig::from_lookup(lookup(&[
            (CONNECTION_TYPE_VAR, "INSECURE"),
            (HOSTNAME_VAR, "127.0.0.1"),
            (PORT_VAR, "not-a-port"),
        ]))
        .unwrap_err();
        match err {
            RuntimeError::InvalidEnvVar { name, .. } => assert_eq!(name, PORT_VAR),
            other => panic!("unexpected error: {other}"),
        }
    }
}
