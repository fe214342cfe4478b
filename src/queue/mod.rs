//! Remote Job/Result Queue
//!
//! Redis-backed FIFO lists shared by job producers, analysis workers, and
//! result consumers. Entries are opaque UTF-8 strings; connection settings
//! come from the environment in one place.

pub mod client;
pub mod config;
pub mod error;

pub use client::RedisQueue;
pub use config::QueueConfig;
pub use error::{QueueError, QueueResult};
