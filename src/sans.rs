//! Allocation-free building blocks for implementing decoders and encoders.
//!
//! This module is intended for applications that need fine control over how
//! bytes are read and written. See [`crate::avec`] for implementations covering
//! common patterns.
//!
//! # Architecture
//!
//! An upload is a sequence of fixed-width blocks:
//!
//! | Block       | Bytes | Token                                   |
//! |-------------|-------|-----------------------------------------|
//! | Header      | 30    | [`header::UploadHeader`]                |
//! | Metadata    | 16    | [`header::Metadata`]                    |
//! | Measurement | 32    | [`measurement::MeasurementRecord`] (×N) |
//! | Checksum    | 2     | see [`check`]                           |
//!
//! All states are represented by a non-copy token. Once enough bytes are
//! ready, transition to another state by calling the token's `advance` method.
//! This will return a successor state token (if any), along with the extracted
//! data.
//!
//! Only the initial state, re-exported for convenience as [`Decoder`], can be
//! constructed.
//!
//! Some areas of the decoding process are not represented in the tokens and
//! must be carefully written:
//!
//! - Stopping before a measurement record that would overlap the trailing
//! checksum. The metadata block declares a record count, but some firmware
//! sends fewer records than it declares.
//!
//! - Applying cyclic redundancy checks. Helper functions are provided in the
//! [`check`] module.
//!
//! Responses are written from the `zerocopy` blocks in [`response`], which
//! carry the exact byte layout the scale firmware expects.

pub mod check;
pub mod header;
pub mod mac;
pub mod measurement;
pub mod response;

/// Entrypoint to the upload decoding tokens.
pub type Decoder = header::UploadHeader;
