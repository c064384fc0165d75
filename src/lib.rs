#![no_std]

//! A codec for the binary upload protocol (version 3) spoken by Wi-Fi
//! body-composition scales.
//!
//! The scale posts a checksummed, fixed-layout upload carrying its identity,
//! firmware and battery metadata, and any stored weight measurements. The
//! server replies with a checksummed acknowledgement holding the current time,
//! the display unit, and the user profiles the scale should recognise.
//!
//! Most users should begin with the functions in the [`avec`] module. If these
//! prove insufficient (for example on targets without an allocator), the
//! building blocks in the [`sans`] module decode and encode one fixed-width
//! block at a time.
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `std`: enable reader-based decoding, owned requests, and allocating
//!   response builders (default).

#[cfg(feature = "std")]
extern crate std;

pub mod avec;
pub mod sans;

/// Largest upload body accepted by the reader-based decoder (1 MiB).
pub const MAX_UPLOAD_SIZE: usize = 1024 * 1024;
