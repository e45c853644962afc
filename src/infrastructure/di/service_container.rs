//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::path::Path;
use std::sync::Arc;

use crate::application::services::GlossaryService;
use crate::config::Settings;
use crate::infrastructure::traits::{FileSystem, JsonFileTermSource, RealFileSystem, TermSource};

/// Container holding application settings and I/O dependencies.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        let settings = Arc::new(settings);

        Self { settings, fs }
    }

    /// Term source reading the given JSON export.
    pub fn term_source(&self, data_file: &Path) -> Arc<dyn TermSource> {
        Arc::new(JsonFileTermSource::new(Arc::clone(&self.fs), data_file))
    }

    /// Glossary service over the given JSON export.
    pub fn glossary_service(&self, data_file: &Path) -> GlossaryService {
        GlossaryService::new(self.term_source(data_file), Arc::clone(&self.settings))
    }

    /// Glossary service over an arbitrary term source.
    pub fn glossary_service_with(&self, source: Arc<dyn TermSource>) -> GlossaryService {
        GlossaryService::new(source, Arc::clone(&self.settings))
    }
}
