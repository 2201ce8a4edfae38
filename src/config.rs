//! Configuration management for the grid filesystem
//!
//! Store settings shape the records written by the hierarchy layer; server
//! settings only matter to the line-protocol front end.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::metadata::ByteOrder;

/// Chunk size stamped on new records when none is configured.
pub const DEFAULT_CHUNK_SIZE: i32 = 4000;

/// Complete configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct GridConfig {
    pub store: StoreConfig,
    pub server: ServerConfig,
}

/// Settings for the metadata store and the records written into it
#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    /// Storage granularity recorded in every new entry.
    /// Environment: GRIDFS_STORE__CHUNK_SIZE
    pub chunk_size: i32,

    /// Byte order of the encoded metadata record (`big` or `little`).
    /// Environment: GRIDFS_STORE__BYTE_ORDER
    pub byte_order: ByteOrder,
}

/// Settings for the line-protocol front end
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Environment: GRIDFS_SERVER__BIND_ADDRESS
    pub bind_address: String,

    /// Environment: GRIDFS_SERVER__PORT
    pub port: u16,

    /// Longest accepted command line, in bytes.
    pub max_command_length: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            byte_order: ByteOrder::Big,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 2121,
            max_command_length: 512,
        }
    }
}

impl GridConfig {
    /// Load configuration from gridfs.toml with environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("gridfs")
    }

    /// Load configuration from `path` (extension optional) with environment overrides.
    ///
    /// A missing file is not an error; defaults apply.
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("store.chunk_size", DEFAULT_CHUNK_SIZE as i64)?
            .set_default("store.byte_order", "big")?
            .set_default("server.bind_address", "127.0.0.1")?
            .set_default("server.port", 2121_i64)?
            .set_default("server.max_command_length", 512_i64)?
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("GRIDFS")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let config: GridConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.chunk_size <= 0 {
            return Err(ConfigError::Message(
                "chunk_size must be greater than 0".into(),
            ));
        }

        if self.server.port == 0 {
            return Err(ConfigError::Message("port cannot be 0".into()));
        }

        if self.server.max_command_length == 0 {
            return Err(ConfigError::Message(
                "max_command_length must be greater than 0".into(),
            ));
        }

        Ok(())
    }
}

impl ServerConfig {
    /// Get bind address and port as socket address
    pub fn control_socket(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GridConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.store.chunk_size, DEFAULT_CHUNK_SIZE);
        assert_eq!(config.store.byte_order, ByteOrder::Big);
        assert_eq!(config.server.control_socket(), "127.0.0.1:2121");
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = GridConfig::load_from("does-not-exist/gridfs").unwrap();
        assert!(config.store.chunk_size > 0);
        assert!(config.server.port > 0);
    }

    #[test]
    fn test_rejects_non_positive_chunk_size() {
        let mut config = GridConfig::default();
        config.store.chunk_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_port() {
        let mut config = GridConfig::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }
}
