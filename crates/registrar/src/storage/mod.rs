//! Storage backend implementations.
//!
//! This module provides concrete implementations of the repository traits
//! defined in `registrar_core::storage`.
//!
//! # Feature Flags
//!
//! - `sqlite` (default): SQLite storage backend using `rusqlite` and `tokio-rusqlite`
//!
//! The in-memory backend is always compiled. It backs the tests and is used
//! by the binary when built without `sqlite`.
//!
//! # Examples
//!
//! Build with SQLite (default):
//! ```bash
//! cargo build -p registrar
//! ```
//!
//! Build with only the in-memory store:
//! ```bash
//! cargo build -p registrar --no-default-features
//! ```

pub mod inmemory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use inmemory::InMemoryRepository;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteRepository;
