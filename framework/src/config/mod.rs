//! Configuration module
//!
//! - Layered `.env` loading with environment-based precedence
//! - Explicit environment sources so configs can be derived without touching
//!   the process environment
//! - A write-once repository of typed config structs
//!
//! # Example
//!
//! ```rust,no_run
//! use backend_config::Config;
//!
//! fn main() -> Result<(), backend_config::FrameworkError> {
//!     let env = Config::init(std::path::Path::new("."))?;
//!     let database = Config::database();
//!     println!("{} synchronize={}", env, database.synchronize());
//!     Ok(())
//! }
//! ```

pub mod env;
pub mod repository;

pub use env::{
    env, env_optional, EnvSnapshot, EnvSource, Environment, ProcessEnv, RUNTIME_ENV_KEY,
};

use std::path::Path;
use std::sync::Arc;

use crate::database::config::{database_config, DatabaseConfig};
use crate::error::FrameworkError;

/// Main Config facade for accessing configuration
pub struct Config;

impl Config {
    /// Initialize the configuration system
    ///
    /// Layers the `.env` files under `project_root` beneath the process
    /// environment and registers the configs derived from the result.
    /// Call once at startup.
    ///
    /// # Returns
    ///
    /// The detected environment (Local, Development, Production, etc.)
    pub fn init(project_root: &Path) -> Result<Environment, FrameworkError> {
        let source = EnvSnapshot::layered(project_root, EnvSnapshot::from_process())?;
        Self::init_from(&source)
    }

    /// Initialize from an explicit environment source
    ///
    /// The environment and the database config are registered together; if
    /// either is already present, neither is registered.
    pub fn init_from(source: &impl EnvSource) -> Result<Environment, FrameworkError> {
        let env = Environment::from_source(source);
        let database = DatabaseConfig::from_source(source);

        repository::register_pair(env.clone(), database)?;
        Ok(env)
    }

    /// Get a typed config struct from the repository
    pub fn get<T: std::any::Any + Send + Sync + 'static>() -> Option<Arc<T>> {
        repository::get::<T>()
    }

    /// Register a custom config struct
    ///
    /// Each type can be registered once.
    pub fn register<T: std::any::Any + Send + Sync + 'static>(
        config: T,
    ) -> Result<(), FrameworkError> {
        repository::register(config)
    }

    /// Check if a config type is registered
    pub fn has<T: std::any::Any + 'static>() -> bool {
        repository::has::<T>()
    }

    /// The database config
    ///
    /// Returns the registered instance if `Config::init` ran, otherwise the
    /// one lazily derived from the process environment.
    pub fn database() -> Arc<DatabaseConfig> {
        Self::get::<DatabaseConfig>().unwrap_or_else(|| Arc::new(database_config().clone()))
    }

    /// Get the current environment
    ///
    /// Returns the registered environment if initialized,
    /// otherwise detects from `NODE_ENV`.
    pub fn environment() -> Environment {
        Self::get::<Environment>()
            .map(|env| (*env).clone())
            .unwrap_or_else(Environment::detect)
    }

    /// Check if running in production environment
    pub fn is_production() -> bool {
        Self::environment().is_production()
    }
}
