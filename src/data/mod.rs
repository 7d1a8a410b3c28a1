//! Density data model and its wire encoding

pub mod density;
pub mod proto;

pub use density::{DensityResult, DensitySample};
pub use proto::decode;
