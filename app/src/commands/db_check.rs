use backend_config::{Config, DatabaseType, DB};
use console::style;
use std::path::Path;

use crate::bootstrap;

pub async fn run(root: &Path) {
    let env = bootstrap::init_config(root);
    let database = Config::database();

    if let Some(scheme) = database.url().and_then(DatabaseType::from_url) {
        if scheme != database.driver() {
            eprintln!(
                "{} DATABASE_URL looks like {} but the driver is {}",
                style("Warning:").yellow().bold(),
                scheme,
                database.driver()
            );
        }
    }

    println!(
        "{} Connecting to {} ({} environment)...",
        style("->").cyan(),
        database.driver(),
        env
    );

    let result = match DB::init().await {
        Ok(()) => match DB::connection() {
            Ok(conn) => conn.ping().await,
            Err(e) => Err(e),
        },
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => println!("{} Database is reachable", style("OK").green().bold()),
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            std::process::exit(1);
        }
    }
}
