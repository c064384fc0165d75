//! Reader-based decoder implementation.
//!
//! _Requires Cargo feature `std`._

use std::{io::Read, vec::Vec};

use thiserror::Error;

use crate::MAX_UPLOAD_SIZE;

use super::{FromUpload, slice};

/// Errors occurring while decoding from a reader.
#[derive(Debug, Error)]
pub enum Error {
    /// An error from the supplied reader.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The upload is larger than [`MAX_UPLOAD_SIZE`].
    #[error("Upload too large (more than {MAX_UPLOAD_SIZE} bytes, read {0}).")]
    Oversized(usize),
    /// The upload could not be decoded.
    #[error(transparent)]
    Slice(#[from] slice::Error),
}

/// Decode an upload from a reader, publishing to a receiver.
///
/// Reads until the end of the reader, refusing uploads larger than
/// [`MAX_UPLOAD_SIZE`].
///
/// This method is also re-exported as `aria_protocol::avec::decode_reader`.
///
/// _Requires Cargo feature `std`._
pub fn decode(r: &mut impl Read, o: &mut impl FromUpload) -> Result<(), Error> {
    let buf = read_bounded(r)?;
    slice::decode(&buf, o)?;
    Ok(())
}

/// Read a whole upload, stopping one byte past the size limit.
fn read_bounded(r: &mut impl Read) -> Result<Vec<u8>, Error> {
    let mut buf = Vec::new();
    r.take(MAX_UPLOAD_SIZE as u64 + 1).read_to_end(&mut buf)?;

    if buf.len() > MAX_UPLOAD_SIZE {
        log::warn!("Refusing upload larger than {MAX_UPLOAD_SIZE} bytes.");
        Err(Error::Oversized(buf.len()))?;
    }

    Ok(buf)
}
