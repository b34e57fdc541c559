//! Background Tasks Module
//!
//! Contains background tasks that run periodically alongside the store.
//!
//! # Tasks
//! - Expiry sweep: removes expired keys from an in-memory store at a fixed interval

mod cleanup;

pub use cleanup::spawn_expiry_sweeper;
