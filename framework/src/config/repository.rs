use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

use crate::error::FrameworkError;

/// Global config repository - stores config instances by type
static CONFIG_REPOSITORY: OnceLock<RwLock<ConfigRepository>> = OnceLock::new();

/// Repository for storing typed configuration structs
///
/// Each type can be registered once. After that the instance is shared
/// read-only through `Arc`.
pub struct ConfigRepository {
    configs: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl ConfigRepository {
    /// Create a new empty config repository
    pub fn new() -> Self {
        Self {
            configs: HashMap::new(),
        }
    }

    /// Register a config struct in the repository
    pub fn register<T: Any + Send + Sync + 'static>(
        &mut self,
        config: T,
    ) -> Result<(), FrameworkError> {
        let type_id = TypeId::of::<T>();
        if self.configs.contains_key(&type_id) {
            return Err(FrameworkError::already_registered::<T>());
        }
        self.configs.insert(type_id, Arc::new(config));
        Ok(())
    }

    /// Register two config structs, or neither
    ///
    /// Both types are checked before either is inserted, so a conflict on the
    /// second leaves the repository untouched.
    pub fn register_pair<A, B>(&mut self, first: A, second: B) -> Result<(), FrameworkError>
    where
        A: Any + Send + Sync + 'static,
        B: Any + Send + Sync + 'static,
    {
        if self.has::<A>() {
            return Err(FrameworkError::already_registered::<A>());
        }
        if self.has::<B>() {
            return Err(FrameworkError::already_registered::<B>());
        }
        self.configs.insert(TypeId::of::<A>(), Arc::new(first));
        self.configs.insert(TypeId::of::<B>(), Arc::new(second));
        Ok(())
    }

    /// Get a config struct by type
    pub fn get<T: Any + Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.configs
            .get(&TypeId::of::<T>())
            .cloned()
            .and_then(|shared| shared.downcast::<T>().ok())
    }

    /// Check if a config type is registered
    pub fn has<T: Any + 'static>(&self) -> bool {
        self.configs.contains_key(&TypeId::of::<T>())
    }
}

impl Default for ConfigRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn repository() -> &'static RwLock<ConfigRepository> {
    CONFIG_REPOSITORY.get_or_init(|| RwLock::new(ConfigRepository::new()))
}

/// Register a config in the global repository
pub fn register<T: Any + Send + Sync + 'static>(config: T) -> Result<(), FrameworkError> {
    match repository().write() {
        Ok(mut repo) => repo.register(config),
        Err(poisoned) => poisoned.into_inner().register(config),
    }
}

/// Register two configs in the global repository under a single write lock
pub fn register_pair<A, B>(first: A, second: B) -> Result<(), FrameworkError>
where
    A: Any + Send + Sync + 'static,
    B: Any + Send + Sync + 'static,
{
    match repository().write() {
        Ok(mut repo) => repo.register_pair(first, second),
        Err(poisoned) => poisoned.into_inner().register_pair(first, second),
    }
}

/// Get a config from the global repository
pub fn get<T: Any + Send + Sync + 'static>() -> Option<Arc<T>> {
    let repo = CONFIG_REPOSITORY.get()?;
    repo.read().ok()?.get::<T>()
}

/// Check if a config type is registered in the global repository
pub fn has<T: Any + 'static>() -> bool {
    CONFIG_REPOSITORY
        .get()
        .and_then(|repo| repo.read().ok())
        .map(|repo| repo.has::<T>())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct MailConfig {
        host: String,
    }

    #[test]
    fn stores_and_returns_shared_instance() {
        let mut repo = ConfigRepository::new();
        repo.register(MailConfig {
            host: "smtp.local".into(),
        })
        .unwrap();

        let first = repo.get::<MailConfig>().unwrap();
        let second = repo.get::<MailConfig>().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.host, "smtp.local");
    }

    #[test]
    fn second_registration_is_rejected() {
        let mut repo = ConfigRepository::new();
        repo.register(MailConfig { host: "a".into() }).unwrap();

        let err = repo.register(MailConfig { host: "b".into() }).unwrap_err();
        assert!(matches!(err, FrameworkError::AlreadyRegistered { .. }));
        assert_eq!(repo.get::<MailConfig>().unwrap().host, "a");
    }

    #[test]
    fn pair_conflict_inserts_neither() {
        let mut repo = ConfigRepository::new();
        repo.register(MailConfig { host: "a".into() }).unwrap();

        let err = repo
            .register_pair(42u16, MailConfig { host: "b".into() })
            .unwrap_err();
        assert!(matches!(err, FrameworkError::AlreadyRegistered { .. }));
        assert!(!repo.has::<u16>());
        assert_eq!(repo.get::<MailConfig>().unwrap().host, "a");
    }

    #[test]
    fn pair_registers_both() {
        let mut repo = ConfigRepository::new();
        repo.register_pair(42u16, MailConfig { host: "a".into() })
            .unwrap();
        assert_eq!(*repo.get::<u16>().unwrap(), 42);
        assert!(repo.has::<MailConfig>());
    }

    #[test]
    fn unknown_type_is_absent() {
        let repo = ConfigRepository::new();
        assert!(!repo.has::<MailConfig>());
        assert!(repo.get::<MailConfig>().is_none());
    }
}
