//! Convenience interfaces for common decoding and encoding patterns.
//!
//! The decoders in this module read whole uploads from slices and readers,
//! publishing to the [`FromUpload`] trait. With the `std` feature, uploads can
//! be collected into an owned [`UploadRequest`], and responses built into a
//! freshly allocated buffer.
//!
//! # Example
//!
//! ```
//! let response = match aria_protocol::avec::parse_upload_request(&body) {
//!     Ok(decoded) => {
//!         for warning in &decoded.warnings {
//!             log::warn!("{warning}");
//!         }
//!         store(&decoded.request);
//!         build_upload_response(WeightUnit::Kilograms, 0, &users, false, "")
//!     }
//!     // Keeps the scale from retrying an upload that will never parse.
//!     Err(_) => build_simple_response(),
//! };
//! ```

use thiserror::Error;

use crate::sans::{
    header::{DeviceInfo, Identity},
    measurement::ScaleMeasurement,
};

pub mod encode;
#[cfg(feature = "std")]
pub mod reader;
#[cfg(feature = "std")]
pub mod request;
pub mod slice;

#[cfg(feature = "std")]
pub use encode::{build_simple_response, build_upload_response};
#[cfg(feature = "std")]
pub use reader::decode as decode_reader;
#[cfg(feature = "std")]
pub use request::{Decoded, UploadRequest, parse_upload_request};
pub use slice::decode as decode_slice;

/// A recoverable problem found while decoding an upload.
///
/// Decoding continues past warnings, publishing everything that could be
/// read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Warning {
    /// Calculated and found CRC values do not match. Some firmware revisions
    /// compute the checksum differently, so this is not fatal.
    #[error("Calculated ({calculated:#06X}) and found ({found:#06X}) CRC values do not match.")]
    ChecksumMismatch { found: u16, calculated: u16 },
    /// Fewer measurement records fit in the upload than were declared.
    #[error("Declared {declared} measurements, but only {decoded} fit in the upload.")]
    TruncatedMeasurements { declared: u32, decoded: u32 },
}

/// Receive the contents of an upload.
///
/// Methods are called in wire order: warnings about the checksum first, then
/// the identity, the device information, each measurement, and finally any
/// truncation warning.
///
/// The default implementation of each method ignores received values.
#[allow(unused_variables)]
pub trait FromUpload {
    /// Add the scale's identity.
    fn add_identity(&mut self, identity: Identity) {}
    /// Add the scale's firmware and clock information.
    fn add_device_info(&mut self, info: DeviceInfo) {}
    /// Add a measurement record.
    fn add_measurement(&mut self, measurement: ScaleMeasurement) {}
    /// Add a recoverable problem found while decoding.
    fn add_warning(&mut self, warning: Warning) {}
}
