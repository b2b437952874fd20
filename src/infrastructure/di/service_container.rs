//! Service container for dependency injection
//!
//! Wires up the snapshot store with its filesystem and settings.

use std::sync::Arc;

use crate::application::services::TreeStore;
use crate::config::Settings;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Snapshot persistence
    pub store: TreeStore,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        let store = TreeStore::new(Arc::clone(&fs)).with_create_dirs(settings.create_dirs);
        let settings = Arc::new(settings);

        Self { settings, fs, store }
    }
}
