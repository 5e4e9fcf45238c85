//! In-memory storage backend.
//!
//! Keeps every table in a `BTreeMap` behind one `Arc<RwLock<_>>`, so list
//! queries come back ordered by ID just like the SQLite backend. Data is lost
//! when the repository is dropped.
//!
//! # Example
//!
//! ```rust,ignore
//! use registrar::storage::inmemory::InMemoryRepository;
//!
//! let repo = InMemoryRepository::new();
//! let id = repo.create_student(&input).await?;
//! ```

mod repository;

pub use repository::InMemoryRepository;
