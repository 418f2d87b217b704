//! Shared worker types

pub mod environment;
