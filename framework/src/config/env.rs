use std::collections::BTreeMap;
use std::env::VarError;
use std::path::Path;

use crate::error::FrameworkError;

/// Variable that selects the runtime mode
pub const RUNTIME_ENV_KEY: &str = "NODE_ENV";

/// Anything environment variables can be read from
///
/// The live process environment is one source; an owned [`EnvSnapshot`] is
/// another. Config providers take a source instead of calling `std::env`
/// directly, so they can be derived from a fixed snapshot in tests.
pub trait EnvSource {
    /// Look up a variable, `None` when unset
    fn var(&self, key: &str) -> Option<String>;
}

/// The live process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        unicode_value(key, std::env::var(key))
    }
}

fn unicode_value(key: &str, value: Result<String, VarError>) -> Option<String> {
    match value {
        Ok(value) => Some(value),
        Err(VarError::NotPresent) => None,
        Err(VarError::NotUnicode(_)) => {
            tracing::warn!(key, "environment variable is not valid unicode, treating as unset");
            None
        }
    }
}

/// An owned, immutable set of environment variables
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: BTreeMap<String, String>,
}

impl EnvSnapshot {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the current process environment
    ///
    /// Variables whose key or value is not valid unicode are skipped with a
    /// warning.
    pub fn from_process() -> Self {
        std::env::vars_os()
            .filter_map(|(k, v)| {
                let key = k.into_string().ok()?;
                let value = unicode_value(&key, v.into_string().map_err(VarError::NotUnicode))?;
                Some((key, value))
            })
            .collect()
    }

    /// Layer `.env` files under `project_root` beneath `base`
    ///
    /// Precedence (later entries override earlier):
    /// 1. .env (base defaults)
    /// 2. .env.local (local overrides, not committed)
    /// 3. .env.{environment} (environment-specific)
    /// 4. .env.{environment}.local (environment-specific local overrides)
    /// 5. `base`, usually the process environment (highest priority)
    ///
    /// The environment used to pick files is detected from `base` only: a
    /// `NODE_ENV` set inside `.env` changes the resolved mode but does not
    /// pull in `.env.{environment}`. Missing files are skipped. The process
    /// environment is never modified.
    pub fn layered(project_root: &Path, base: EnvSnapshot) -> Result<Self, FrameworkError> {
        let env = Environment::from_source(&base);

        let mut files = vec![
            project_root.join(".env"),
            project_root.join(".env.local"),
        ];
        if let Some(suffix) = env.env_file_suffix() {
            files.push(project_root.join(format!(".env.{}", suffix)));
            files.push(project_root.join(format!(".env.{}.local", suffix)));
        }

        let mut vars = BTreeMap::new();
        for path in &files {
            for (key, value) in read_env_file(path)? {
                vars.insert(key, value);
            }
        }
        vars.extend(base.vars);

        tracing::debug!(environment = %env, files = files.len(), "layered environment files");
        Ok(Self { vars })
    }

    /// Set a variable, returning the updated snapshot
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    /// Number of variables in the snapshot
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Whether the snapshot holds no variables
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl EnvSource for EnvSnapshot {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvSnapshot {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

fn read_env_file(path: &Path) -> Result<Vec<(String, String)>, FrameworkError> {
    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(e) if e.not_found() => return Ok(Vec::new()),
        Err(e) => return Err(FrameworkError::dotenv(path, e.to_string())),
    };

    iter.map(|item| item.map_err(|e| FrameworkError::dotenv(path, e.to_string())))
        .collect()
}

/// Runtime mode of the process, taken from `NODE_ENV`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Local,
    Development,
    Staging,
    Production,
    Testing,
    Custom(String),
}

impl Environment {
    /// Detect the environment from the live process environment
    pub fn detect() -> Self {
        Self::from_source(&ProcessEnv)
    }

    /// Detect the environment from `NODE_ENV`, defaulting to Local
    ///
    /// Matching is exact: `"Production"` is a custom environment, not
    /// production.
    pub fn from_source(source: &impl EnvSource) -> Self {
        match source.var(RUNTIME_ENV_KEY).as_deref() {
            Some("production") => Self::Production,
            Some("staging") => Self::Staging,
            Some("development") => Self::Development,
            Some("test") | Some("testing") => Self::Testing,
            Some("local") | None => Self::Local,
            Some(other) => Self::Custom(other.to_string()),
        }
    }

    /// Get the .env file suffix for this environment
    pub fn env_file_suffix(&self) -> Option<&str> {
        match self {
            Self::Local => Some("local"),
            Self::Production => Some("production"),
            Self::Staging => Some("staging"),
            Self::Development => Some("development"),
            Self::Testing => Some("test"),
            Self::Custom(name) if name.is_empty() => None,
            Self::Custom(name) => Some(name.as_str()),
        }
    }

    /// Check if this is a production environment
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Check if this is a development environment (local or development)
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Local | Self::Development)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Development => write!(f, "development"),
            Self::Staging => write!(f, "staging"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "test"),
            Self::Custom(name) => write!(f, "{}", name),
        }
    }
}

/// Get an environment variable with a default value
///
/// # Example
/// ```
/// use backend_config::config::{env, EnvSnapshot};
///
/// let source = EnvSnapshot::new().with("DB_PORT", "6543");
/// let port: u16 = env(&source, "DB_PORT", 5432);
/// assert_eq!(port, 6543);
/// ```
pub fn env<T: std::str::FromStr>(source: &impl EnvSource, key: &str, default: T) -> T {
    env_optional(source, key).unwrap_or(default)
}

/// Get an optional environment variable
///
/// # Example
/// ```
/// use backend_config::config::{env_optional, EnvSnapshot};
///
/// let debug: Option<bool> = env_optional(&EnvSnapshot::new(), "APP_DEBUG");
/// assert_eq!(debug, None);
/// ```
pub fn env_optional<T: std::str::FromStr>(source: &impl EnvSource, key: &str) -> Option<T> {
    source.var(key).and_then(|v| v.parse().ok())
}
