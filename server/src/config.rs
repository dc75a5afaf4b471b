use std::num::NonZeroUsize;

use axum_server::tls_rustls::RustlsConfig;
use serde::{Deserialize, Serialize};

use crate::error::CliError;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendsCliConfig {
    pub address: Option<String>,
    /// Records stay in memory when unset.
    pub database_url: Option<String>,
    /// Zero is rejected when the config is read.
    pub channel_buffer_size: Option<NonZeroUsize>,
    pub tls: Option<TlsConfig>,
}

impl FriendsCliConfig {
    pub fn new(
        address: Option<String>,
        database_url: Option<String>,
        channel_buffer_size: Option<NonZeroUsize>,
        tls: Option<TlsConfig>,
    ) -> Self {
        Self {
            address,
            database_url,
            channel_buffer_size,
            tls,
        }
    }

    pub fn load<R: std::io::Read>(reader: R) -> Result<Self, serde_json::Error> {
        serde_json::from_reader(reader)
    }
}

pub fn parse_channel_buffer_size(value: &str) -> Result<NonZeroUsize, CliError> {
    value.parse().map_err(|_| {
        CliError::ArgumentError(format!(
            "Expected a positive integer for buffer size, got '{value}'"
        ))
    })
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TlsConfig {
    pub cert_path: String,
    pub key_path: String,
}

impl TlsConfig {
    pub async fn create(self) -> Result<RustlsConfig, std::io::Error> {
        RustlsConfig::from_pem_file(self.cert_path, self.key_path).await
    }
}
