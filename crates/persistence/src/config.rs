//! Persistence configuration
//!
//! Selects the database the local serializer encodes keys for and whether
//! record checksums are verified on read.

use tessera_core::{DatabaseId, ModelError};

/// Project used when none is configured
pub const DEFAULT_PROJECT_ID: &str = "local";

/// Local persistence configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistenceConfig {
    /// Database whose keys the serializer encodes
    pub database_id: DatabaseId,
    /// Compare stored CRC32 values when reading framed records
    pub verify_checksums: bool,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        PersistenceConfig {
            database_id: DatabaseId::for_project(DEFAULT_PROJECT_ID),
            verify_checksums: true,
        }
    }
}

impl PersistenceConfig {
    /// Config for `database_id` with checksums verified
    pub fn for_database(database_id: DatabaseId) -> Self {
        PersistenceConfig {
            database_id,
            ..Default::default()
        }
    }

    /// Set the database
    pub fn with_database_id(mut self, database_id: DatabaseId) -> Self {
        self.database_id = database_id;
        self
    }

    /// Enable or disable checksum verification on read
    pub fn with_verify_checksums(mut self, verify: bool) -> Self {
        self.verify_checksums = verify;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.database_id.validate()?;
        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Project or database id unusable in a resource name
    #[error("Invalid persistence config: {0}")]
    InvalidDatabaseId(#[from] ModelError),
}
