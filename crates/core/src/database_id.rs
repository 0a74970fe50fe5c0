//! Database identity
//!
//! Keys are encoded as fully qualified resource names, so every codec is
//! bound to the project and database it serves.

use crate::error::{ModelError, Result};
use serde::{Deserialize, Serialize};

/// Name of the default database within a project
pub const DEFAULT_DATABASE_ID: &str = "(default)";

/// Project and database a client is attached to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatabaseId {
    /// Project identifier
    pub project_id: String,
    /// Database identifier within the project
    pub database_id: String,
}

impl DatabaseId {
    /// Create a database id
    pub fn new(project_id: impl Into<String>, database_id: impl Into<String>) -> Self {
        DatabaseId {
            project_id: project_id.into(),
            database_id: database_id.into(),
        }
    }

    /// The default database of `project_id`
    pub fn for_project(project_id: impl Into<String>) -> Self {
        DatabaseId::new(project_id, DEFAULT_DATABASE_ID)
    }

    /// Check that both ids are usable inside a resource name
    pub fn validate(&self) -> Result<()> {
        for (what, id) in [("project", &self.project_id), ("database", &self.database_id)] {
            if id.is_empty() {
                return Err(ModelError::InvalidDatabaseId(format!("empty {} id", what)));
            }
            if id.contains('/') {
                return Err(ModelError::InvalidDatabaseId(format!(
                    "{} id {:?} contains '/'",
                    what, id
                )));
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for DatabaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "projects/{}/databases/{}",
            self.project_id, self.database_id
        )
    }
}
