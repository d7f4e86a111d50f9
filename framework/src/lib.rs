//! Environment-driven database connection configuration
//!
//! Resolves which database to talk to and how from `DATABASE_URL` and
//! `NODE_ENV`, and hands the result to SeaORM.

pub mod config;
pub mod database;
pub mod error;

pub use config::{Config, EnvSnapshot, EnvSource, Environment, ProcessEnv};
pub use database::{
    database_config, DatabaseConfig, DatabaseConfigBuilder, DatabaseType, DbConnection, DB,
};
pub use error::FrameworkError;
