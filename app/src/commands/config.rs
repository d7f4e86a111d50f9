use backend_config::{Config, DatabaseConfig, FrameworkError};
use console::style;
use std::path::Path;

use crate::bootstrap;

pub fn run(root: &Path, compact: bool) {
    let env = bootstrap::init_config(root);
    let database = Config::database();

    let json = match render(&database, compact) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            std::process::exit(1);
        }
    };

    tracing::info!(environment = %env, "resolved database config");
    if database.synchronize() {
        eprintln!(
            "{} schema synchronization is enabled ({} environment)",
            style("Warning:").yellow().bold(),
            env
        );
    }
    println!("{}", json);
}

/// Render the options object, on one line when `compact`
pub fn render(database: &DatabaseConfig, compact: bool) -> Result<String, FrameworkError> {
    let value = database.to_json()?;
    let rendered = if compact {
        serde_json::to_string(&value)?
    } else {
        serde_json::to_string_pretty(&value)?
    };
    Ok(rendered)
}
