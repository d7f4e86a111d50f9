//! Framework-wide error types
//!
//! The configuration provider itself never fails. Errors surface from the
//! pieces around it: loading `.env` files, the typed config repository, and
//! handing the resolved config to the database client.

use std::path::PathBuf;
use thiserror::Error;

/// Framework-wide error type
///
/// # Example
///
/// ```rust,ignore
/// use backend_config::{DbConnection, FrameworkError};
///
/// pub async fn connect() -> Result<DbConnection, FrameworkError> {
///     let config = backend_config::Config::database();
///     let conn = DbConnection::connect(&config).await?;
///     Ok(conn)
/// }
/// ```
#[derive(Debug, Clone, Error)]
pub enum FrameworkError {
    /// Config type was never registered in the repository
    #[error("Config '{type_name}' not registered")]
    NotRegistered {
        /// The type name of the config that was not found
        type_name: &'static str,
    },

    /// Config type was registered twice
    ///
    /// Registered configs are read-only for the rest of the process.
    #[error("Config '{type_name}' is already registered")]
    AlreadyRegistered {
        /// The type name of the config that was registered again
        type_name: &'static str,
    },

    /// A `.env` file exists but could not be parsed
    #[error("Failed to load {}: {message}", path.display())]
    Dotenv {
        /// Path of the offending file
        path: PathBuf,
        /// Parser error message
        message: String,
    },

    /// A consumer needed a value the configuration left empty
    #[error("Required configuration value {key} is not set")]
    MissingConfig {
        /// The environment key that should have provided the value
        key: &'static str,
    },

    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// JSON rendering error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl FrameworkError {
    /// Create a NotRegistered error for a given type
    pub fn not_registered<T: ?Sized>() -> Self {
        Self::NotRegistered {
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Create an AlreadyRegistered error for a given type
    pub fn already_registered<T: ?Sized>() -> Self {
        Self::AlreadyRegistered {
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Create a Dotenv error
    pub fn dotenv(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Dotenv {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a MissingConfig error
    pub fn missing_config(key: &'static str) -> Self {
        Self::MissingConfig { key }
    }

    /// Create a Database error
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database(message.into())
    }
}

impl From<sea_orm::DbErr> for FrameworkError {
    fn from(e: sea_orm::DbErr) -> Self {
        Self::Database(e.to_string())
    }
}

impl From<serde_json::Error> for FrameworkError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_names_the_key() {
        let err = FrameworkError::missing_config("DATABASE_URL");
        assert_eq!(
            err.to_string(),
            "Required configuration value DATABASE_URL is not set"
        );
    }

    #[test]
    fn not_registered_uses_type_name() {
        let err = FrameworkError::not_registered::<String>();
        assert!(err.to_string().contains("alloc::string::String"));
    }

    #[test]
    fn dotenv_error_shows_path() {
        let err = FrameworkError::dotenv("/srv/app/.env", "line 3: unexpected character");
        assert_eq!(
            err.to_string(),
            "Failed to load /srv/app/.env: line 3: unexpected character"
        );
    }
}
