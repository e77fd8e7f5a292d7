// Library root for the sw_admin token invalidation endpoint

pub mod api;
pub mod auth;
pub mod config;
pub mod core;
pub mod engine;
pub mod state;
