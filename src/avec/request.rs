//! Owned upload requests.
//!
//! _Requires Cargo feature `std`._

use std::vec::Vec;

use crate::sans::{
    header::{DeviceInfo, Identity},
    mac::{MacAddress, Serial},
    measurement::ScaleMeasurement,
};

use super::{FromUpload, Warning, slice};

/// A decoded upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub protocol_version: u32,
    pub battery_percent: u32,
    pub mac_address: MacAddress,
    /// Opaque per-device authorisation code.
    pub auth_code: [u8; 16],
    pub firmware_version: u32,
    /// Observed but unexplained metadata field.
    pub reserved: u32,
    /// Device clock at upload time, in seconds since the Unix epoch.
    pub scale_timestamp: u32,
    /// Number of measurement records the scale declared.
    pub declared_measurements: u32,
    /// Measurements in wire order.
    pub measurements: Vec<ScaleMeasurement>,
    /// The bytes this request was decoded from.
    pub raw: Vec<u8>,
}

impl UploadRequest {
    /// The scale's serial number (its MAC address without separators).
    pub fn serial_number(&self) -> Serial<'_> {
        self.mac_address.serial()
    }

    /// Measurements not matched to a user profile.
    pub fn guest_measurements(&self) -> impl Iterator<Item = &ScaleMeasurement> {
        self.measurements.iter().filter(|m| m.is_guest())
    }
}

/// An upload request, with any recoverable problems found while decoding it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub request: UploadRequest,
    pub warnings: Vec<Warning>,
}

/// Decode an upload from a slice into an owned request.
///
/// This method is also re-exported as
/// `aria_protocol::avec::parse_upload_request`.
///
/// _Requires Cargo feature `std`._
pub fn parse_upload_request(r: &[u8]) -> Result<Decoded, slice::Error> {
    let mut collector = Collector::default();
    slice::decode(r, &mut collector)?;

    let Collector {
        identity,
        info,
        measurements,
        warnings,
    } = collector;

    // A successful decode always publishes both blocks.
    let (Some(identity), Some(info)) = (identity, info) else {
        return Err(slice::Error::MalformedPayload(r.len()));
    };

    let request = UploadRequest {
        protocol_version: identity.protocol_version,
        battery_percent: identity.battery_percent,
        mac_address: identity.mac_address,
        auth_code: identity.auth_code,
        firmware_version: info.firmware_version,
        reserved: info.reserved,
        scale_timestamp: info.scale_timestamp,
        declared_measurements: info.measurement_count,
        measurements,
        raw: r.to_vec(),
    };

    Ok(Decoded { request, warnings })
}

#[derive(Default)]
struct Collector {
    identity: Option<Identity>,
    info: Option<DeviceInfo>,
    measurements: Vec<ScaleMeasurement>,
    warnings: Vec<Warning>,
}

impl FromUpload for Collector {
    fn add_identity(&mut self, identity: Identity) {
        self.identity = Some(identity);
    }

    fn add_device_info(&mut self, info: DeviceInfo) {
        self.measurements.reserve(info.measurement_count.min(64) as usize);
        self.info = Some(info);
    }

    fn add_measurement(&mut self, measurement: ScaleMeasurement) {
        self.measurements.push(measurement);
    }

    fn add_warning(&mut self, warning: Warning) {
        self.warnings.push(warning);
    }
}
