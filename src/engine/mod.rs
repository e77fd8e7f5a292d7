// Invalidation engine

pub mod invalidator;

pub use invalidator::TokenInvalidator;
