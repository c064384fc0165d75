//! Slice-based decoder implementation.

use thiserror::Error;

use crate::sans::{
    Decoder,
    check::{crc16_xmodem, split_crc},
    header::{HEADER_SIZE, HeaderError, METADATA_SIZE},
    measurement::MEASUREMENT_SIZE,
};

use super::{FromUpload, Warning};

/// Smallest upload that can hold a header, metadata, and checksum.
pub const MIN_UPLOAD_SIZE: usize = HEADER_SIZE + METADATA_SIZE + 2;

/// Errors occurring while decoding from a slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The upload is too short to hold a header, metadata, and checksum.
    #[error("Upload too short ({0} bytes, expected at least {MIN_UPLOAD_SIZE}).")]
    MalformedPayload(usize),
    /// The scale speaks a protocol version other than 3.
    #[error("Unsupported protocol version ({0}).")]
    UnsupportedProtocolVersion(u32),
}

impl From<HeaderError> for Error {
    fn from(err: HeaderError) -> Self {
        match err {
            HeaderError::UnsupportedProtocolVersion(v) => Self::UnsupportedProtocolVersion(v),
        }
    }
}

/// Decode an upload from a slice, publishing to a receiver.
///
/// This method is also re-exported as `aria_protocol::avec::decode_slice`.
pub fn decode(r: &[u8], o: &mut impl FromUpload) -> Result<(), Error> {
    if r.len() < MIN_UPLOAD_SIZE {
        Err(Error::MalformedPayload(r.len()))?;
    }

    // Length was checked above, so the trailer is present.
    let (body, found) = split_crc(r).ok_or(Error::MalformedPayload(r.len()))?;

    // Apply the cyclic redundancy check before continuing, but only report it.
    let calculated = crc16_xmodem(body);
    if found != calculated {
        let warning = Warning::ChecksumMismatch { found, calculated };
        log::warn!("{warning} Continuing with {} byte upload.", r.len());
        o.add_warning(warning);
    }

    let i = &mut 0; // Counter of bytes read, used to read bytes from the tip.

    let (identity, metadata) = Decoder::advance(take(body, i)?)?;
    o.add_identity(identity);

    let (info, mut successor) = metadata.advance(take(body, i)?);
    o.add_device_info(info);

    log::debug!(
        "Upload from {}: firmware {}, battery {}%, {} measurements declared.",
        identity.mac_address,
        info.firmware_version,
        identity.battery_percent,
        info.measurement_count,
    );

    let mut decoded = 0;

    while let Some(state) = successor {
        // Records never overlap the trailing checksum.
        let Ok(bytes) = take::<MEASUREMENT_SIZE>(body, i) else {
            let warning = Warning::TruncatedMeasurements {
                declared: info.measurement_count,
                decoded,
            };
            log::warn!("{warning}");
            o.add_warning(warning);
            break;
        };

        let (measurement, next) = state.advance(bytes);
        log::trace!("Measurement: {measurement:?}");
        o.add_measurement(measurement);

        decoded += 1;
        successor = next;
    }

    Ok(())
}

/// Take an exact number of bytes from an offset in a slice, advancing the
/// offset only on success.
fn take<const N: usize>(r: &[u8], i: &mut usize) -> Result<[u8; N], Error> {
    let s = *i;
    let bytes = r
        .get(s..s + N)
        .and_then(|b| b.try_into().ok())
        .ok_or(Error::MalformedPayload(r.len()))?;

    *i += N;
    Ok(bytes)
}
