//! Protobuf wire format of the density listing
//!
//! The service answers `GET /v1/ipv6` with an `ipv6.ListResult` message:
//!
//! ```text
//! message Address {
//!   string network   = 1;
//!   double latitude  = 2;
//!   double longitude = 3;
//!   uint64 count     = 4;
//! }
//! message ListResult {
//!   repeated Address results   = 1;
//!   uint64           max_count = 2;
//! }
//! ```

use crate::data::density::{DensityResult, DensitySample};
use crate::DecodeError;
use prost::Message;

#[derive(Clone, PartialEq, prost::Message)]
pub struct Address {
    #[prost(string, tag = "1")]
    pub network: String,
    #[prost(double, tag = "2")]
    pub latitude: f64,
    #[prost(double, tag = "3")]
    pub longitude: f64,
    #[prost(uint64, tag = "4")]
    pub count: u64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ListResult {
    #[prost(message, repeated, tag = "1")]
    pub results: Vec<Address>,
    #[prost(uint64, tag = "2")]
    pub max_count: u64,
}

impl From<Address> for DensitySample {
    fn from(address: Address) -> Self {
        Self {
            network: address.network,
            latitude: address.latitude,
            longitude: address.longitude,
            count: address.count,
        }
    }
}

impl From<&DensitySample> for Address {
    fn from(sample: &DensitySample) -> Self {
        Self {
            network: sample.network.clone(),
            latitude: sample.latitude,
            longitude: sample.longitude,
            count: sample.count,
        }
    }
}

impl From<ListResult> for DensityResult {
    fn from(list: ListResult) -> Self {
        Self {
            max_count: list.max_count,
            samples: list.results.into_iter().map(DensitySample::from).collect(),
        }
    }
}

impl From<&DensityResult> for ListResult {
    fn from(result: &DensityResult) -> Self {
        Self {
            results: result.samples.iter().map(Address::from).collect(),
            max_count: result.max_count,
        }
    }
}

/// Decodes a `ListResult` body, keeping samples in wire order
pub fn decode(bytes: &[u8]) -> Result<DensityResult, DecodeError> {
    let list = ListResult::decode(bytes)?;
    Ok(list.into())
}

/// Encodes a result in the same wire format the service produces
pub fn encode(result: &DensityResult) -> Vec<u8> {
    ListResult::from(result).encode_to_vec()
}
