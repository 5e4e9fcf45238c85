//! Application state with repository-based storage.
//!
//! This module defines the shared application state that is passed to all
//! request handlers. It holds one repository trait object per entity; the
//! backend behind them is chosen at compile time via the `sqlite` feature.

use std::sync::Arc;

use registrar_core::storage::{CourseRepository, StudentRepository, TeacherRepository};

use crate::storage::InMemoryRepository;

/// Shared application state.
///
/// Cloned for each request handler. All three repositories usually point at
/// the same backend instance.
#[derive(Clone)]
pub struct AppState {
    pub student_repo: Arc<dyn StudentRepository>,
    pub teacher_repo: Arc<dyn TeacherRepository>,
    pub course_repo: Arc<dyn CourseRepository>,
}

impl AppState {
    /// Builds state where every repository is served by `repo`.
    pub fn from_repository<R>(repo: Arc<R>) -> Self
    where
        R: StudentRepository + TeacherRepository + CourseRepository + 'static,
    {
        Self {
            student_repo: repo.clone(),
            teacher_repo: repo.clone(),
            course_repo: repo,
        }
    }
}

/// Empty in-memory state, used by tests.
impl Default for AppState {
    fn default() -> Self {
        Self::from_repository(Arc::new(InMemoryRepository::new()))
    }
}

// ============================================================================
// Factory functions for the storage backends
// ============================================================================

#[cfg(feature = "sqlite")]
mod sqlite_backend {
    use super::*;
    use crate::config::Config;
    use crate::storage::SqliteRepository;

    impl AppState {
        /// Creates AppState backed by the SQLite file at `config.sqlite_path`.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let repo = SqliteRepository::new(&config.sqlite_path).await?;
            tracing::info!(path = %config.sqlite_path, "Opened SQLite database");
            Ok(Self::from_repository(Arc::new(repo)))
        }
    }
}

#[cfg(not(feature = "sqlite"))]
mod inmemory_backend {
    use super::*;
    use crate::config::Config;

    impl AppState {
        /// Creates AppState with in-memory storage. Data is lost on exit.
        pub async fn new(_config: &Config) -> Result<Self, anyhow::Error> {
            tracing::warn!("Built without the sqlite feature, data will not be persisted");
            Ok(Self::default())
        }
    }
}
