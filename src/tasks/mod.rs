//! Background Tasks Module
//!
//! Contains background tasks owned by cache backends.
//!
//! # Tasks
//! - TTL Prune: Removes expired in-process cache entries at configured intervals

mod prune;

pub use prune::spawn_prune_task;
