//! Client side of the density data service

pub mod loader;
pub mod source;

// Re-exports for convenience
pub use loader::DensityFetcher;
pub use source::DensityEndpoint;
