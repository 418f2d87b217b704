//! Queue-driven worker that provisions and tears down tenant buckets

#![deny(clippy::all, clippy::pedantic, clippy::nursery, dead_code)]

pub mod jobs;
pub mod queue;
pub mod tenant_store;
pub mod types;
pub mod worker;
