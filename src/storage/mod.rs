//!
//! edumanage storage module
//! ------------------------
//! Durable string key-value storage used to persist the operator session.
//! `FileKv` keeps a single JSON object file under the data directory;
//! `MemoryKv` is the non-durable variant used by tests and when persistence
//! is disabled in configuration.

pub mod kv;

pub use kv::{FileKv, KvBackend, MemoryKv};
