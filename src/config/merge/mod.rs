//! Merge policy and the service that applies it

pub mod merge_policy;
pub mod service;
