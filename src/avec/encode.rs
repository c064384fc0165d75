//! Response encoder implementation.

use thiserror::Error;
use zerocopy::{IntoBytes, byteorder::little_endian::U32};

use crate::sans::{
    check::crc_trailer,
    response::{
        FIRMWARE_FLAG_SIZE, RESPONSE_HEADER_SIZE, ResponseHeader, TRAILER_OK, USER_BLOCK_SIZE,
        UserBlock, UserProfile, WeightUnit,
    },
};

/// Errors occurring while encoding into a slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The output slice cannot hold the whole response.
    #[error("Response needs {needed} bytes, but only {available} are available.")]
    BufferTooSmall { needed: usize, available: usize },
}

/// The contents of a response to an upload.
#[derive(Debug, Default, Clone, Copy)]
pub struct Response<'a> {
    /// Current time, in seconds since the Unix epoch. The scale sets its clock
    /// from this value.
    pub timestamp: u32,
    pub unit: WeightUnit,
    /// Configuration status; zero when all is well.
    pub status: u32,
    /// Profiles the scale should recognise.
    pub users: &'a [UserProfile],
    pub firmware_update: bool,
    /// Where to fetch the update from. Only sent when an update is flagged.
    pub firmware_url: &'a str,
}

impl Response<'_> {
    /// The update URL, if one is to be sent.
    fn firmware_url(&self) -> Option<&str> {
        (self.firmware_update && !self.firmware_url.is_empty()).then_some(self.firmware_url)
    }
}

/// Exact size of an encoded response, in bytes.
pub fn encoded_len(response: &Response) -> usize {
    let url = response.firmware_url().map_or(0, |url| url.len() + 1);

    RESPONSE_HEADER_SIZE
        + USER_BLOCK_SIZE * response.users.len()
        + FIRMWARE_FLAG_SIZE
        + url
        + TRAILER_OK.len()
        + 2
}

/// Encode a response into a slice, returning the number of bytes written.
pub fn encode_slice(response: &Response, out: &mut [u8]) -> Result<usize, Error> {
    let needed = encoded_len(response);
    let available = out.len();

    let out = out
        .get_mut(..needed)
        .ok_or(Error::BufferTooSmall { needed, available })?;

    write(response, out);
    Ok(needed)
}

/// Encode a response into a new buffer.
///
/// _Requires Cargo feature `std`._
#[cfg(feature = "std")]
pub fn encode_vec(response: &Response) -> std::vec::Vec<u8> {
    let mut out = std::vec![0; encoded_len(response)];
    write(response, &mut out);
    out
}

/// Build a response stamped with the current time.
///
/// This method is also re-exported as
/// `aria_protocol::avec::build_upload_response`.
///
/// _Requires Cargo feature `std`._
#[cfg(feature = "std")]
pub fn build_upload_response(
    unit: WeightUnit,
    status: u32,
    users: &[UserProfile],
    firmware_update_available: bool,
    firmware_url: &str,
) -> std::vec::Vec<u8> {
    encode_vec(&Response {
        timestamp: now(),
        unit,
        status,
        users,
        firmware_update: firmware_update_available,
        firmware_url,
    })
}

/// Build the minimal response: kilograms, no users, no firmware update.
///
/// Sent when an upload cannot be decoded, so the scale does not retry it
/// forever.
///
/// This method is also re-exported as
/// `aria_protocol::avec::build_simple_response`.
///
/// _Requires Cargo feature `std`._
#[cfg(feature = "std")]
pub fn build_simple_response() -> std::vec::Vec<u8> {
    build_upload_response(WeightUnit::Kilograms, 0, &[], false, "")
}

#[cfg(feature = "std")]
fn now() -> u32 {
    epoch_seconds(std::time::SystemTime::now())
}

/// Seconds since the Unix epoch, as carried in the response header.
///
/// Times before the epoch encode as zero; times past the 32-bit range
/// (after 2106) saturate.
///
/// _Requires Cargo feature `std`._
#[cfg(feature = "std")]
pub fn epoch_seconds(time: std::time::SystemTime) -> u32 {
    time.duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |d| u32::try_from(d.as_secs()).unwrap_or(u32::MAX))
}

/// Write a response into a slice of exactly [`encoded_len`] bytes.
fn write(response: &Response, out: &mut [u8]) {
    let i = &mut 0; // Counter of bytes written, used to write at the tip.

    let header = ResponseHeader::new(
        response.timestamp,
        response.unit,
        response.status,
        response.users.len() as u32,
    );
    put(out, i, header.as_bytes());

    for user in response.users {
        put(out, i, UserBlock::from(user).as_bytes());
    }

    put(out, i, U32::new(response.firmware_update.into()).as_bytes());

    if let Some(url) = response.firmware_url() {
        put(out, i, url.as_bytes());
        put(out, i, &[0]);
    }

    put(out, i, &TRAILER_OK);

    let (body, trailer) = out.split_at_mut(*i);
    trailer.copy_from_slice(&crc_trailer(body));
}

/// Copy bytes to an offset in a slice, advancing the offset.
fn put(out: &mut [u8], i: &mut usize, r: &[u8]) {
    let s = *i;
    *i += r.len();

    out[s..*i].copy_from_slice(r);
}
