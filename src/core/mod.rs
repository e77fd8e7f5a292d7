// Domain types: errors, request view, cache keys

pub mod cache_key;
pub mod errors;
pub mod models;
