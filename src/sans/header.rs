//! States processing the upload header and metadata blocks.

use thiserror::Error;
use zerocopy::{FromBytes, byteorder::little_endian::U32};

use super::{mac::MacAddress, measurement::MeasurementRecord};

/// The only protocol version this crate understands.
pub const PROTOCOL_VERSION: u32 = 3;

/// Size of the header block.
pub const HEADER_SIZE: usize = 30;
/// Size of the metadata block.
pub const METADATA_SIZE: usize = 16;

/// An error advancing over an upload header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeaderError {
    /// The scale speaks a protocol version other than 3.
    #[error("Unsupported protocol version ({0}).")]
    UnsupportedProtocolVersion(u32),
}

/// Identity fields from the upload header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    /// Always [`PROTOCOL_VERSION`] once decoded.
    pub protocol_version: u32,
    pub battery_percent: u32,
    pub mac_address: MacAddress,
    /// Opaque per-device authorisation code.
    pub auth_code: [u8; 16],
}

/// State token to decode an upload header.
#[derive(Debug)]
pub struct UploadHeader;

impl UploadHeader {
    /// Transition to another state by decoding an upload header.
    ///
    /// Returns the scale's identity, and a successor state token.
    pub fn advance(r: [u8; HEADER_SIZE]) -> Result<(Identity, Metadata), HeaderError> {
        #[repr(C)]
        #[derive(FromBytes)]
        struct WireHeader {
            protocol_version: U32,
            battery_percent: U32,
            mac_address: [u8; 6],
            auth_code: [u8; 16],
        }

        let WireHeader {
            protocol_version,
            battery_percent,
            mac_address,
            auth_code,
        } = zerocopy::transmute!(r);

        let protocol_version = protocol_version.get();
        if protocol_version != PROTOCOL_VERSION {
            Err(HeaderError::UnsupportedProtocolVersion(protocol_version))?;
        }

        let identity = Identity {
            protocol_version,
            battery_percent: battery_percent.get(),
            mac_address: MacAddress(mac_address),
            auth_code,
        };

        Ok((identity, Metadata(())))
    }
}

/// Firmware and clock fields from the metadata block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceInfo {
    pub firmware_version: u32,
    /// Observed but unexplained; kept as an opaque value.
    pub reserved: u32,
    /// Device clock, in seconds since the Unix epoch.
    pub scale_timestamp: u32,
    /// Number of measurement records the scale claims to have sent.
    pub measurement_count: u32,
}

/// State token to decode the metadata block.
#[derive(Debug)]
pub struct Metadata(pub(super) ());

impl Metadata {
    /// Transition to another state by decoding the metadata block.
    ///
    /// Returns the device information, and a successor state token if any
    /// measurement records were declared.
    pub fn advance(self, r: [u8; METADATA_SIZE]) -> (DeviceInfo, Option<MeasurementRecord>) {
        #[repr(C)]
        #[derive(FromBytes)]
        struct WireMetadata {
            firmware_version: U32,
            reserved: U32,
            scale_timestamp: U32,
            measurement_count: U32,
        }

        let WireMetadata {
            firmware_version,
            reserved,
            scale_timestamp,
            measurement_count,
        } = zerocopy::transmute!(r);

        let info = DeviceInfo {
            firmware_version: firmware_version.get(),
            reserved: reserved.get(),
            scale_timestamp: scale_timestamp.get(),
            measurement_count: measurement_count.get(),
        };

        let successor = MeasurementRecord::first(info.measurement_count);

        (info, successor)
    }
}
