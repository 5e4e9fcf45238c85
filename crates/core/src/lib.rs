//! Core domain for registrar.
//!
//! Entity types, request payloads, validation rules and storage traits for
//! students, teachers and courses. Nothing in this crate performs I/O; the
//! `registrar` binary supplies the storage backends and HTTP surface.

pub mod school;
pub mod storage;
