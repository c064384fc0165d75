//! Blocks making up the acknowledgement sent back to the scale.
//!
//! Every block is a `zerocopy` struct whose layout matches the firmware's
//! expectations byte for byte. Integers are little-endian; reserved regions
//! are always zero.

use core::str::FromStr;

use thiserror::Error;
use zerocopy::{Immutable, IntoBytes, KnownLayout, Unaligned, byteorder::little_endian::U32};

/// Size of the response header block.
pub const RESPONSE_HEADER_SIZE: usize = 16;
/// Size of a user profile block.
pub const USER_BLOCK_SIZE: usize = 80;
/// Size of the firmware update flag.
pub const FIRMWARE_FLAG_SIZE: usize = 4;
/// Maximum length of a profile name, in bytes.
pub const NAME_SIZE: usize = 20;

/// Trailer signalling a successful upload.
pub const TRAILER_OK: [u8; 2] = [0x66, 0x00];
/// Alternate trailer observed in the wild. Its meaning is unknown, and it is
/// never written by this crate.
pub const TRAILER_ALT: [u8; 2] = [0xAC, 0x00];

/// Weight display unit preference.
#[repr(u32)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeightUnit {
    Pounds = 0,
    Stones = 1,
    #[default]
    Kilograms = 2,
}

/// An error parsing a weight unit preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Unknown weight unit (expected `kg`, `lbs` or `stones`).")]
pub struct UnknownUnit;

impl WeightUnit {
    /// Parse a unit preference, falling back to kilograms.
    pub fn from_preference(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl FromStr for WeightUnit {
    type Err = UnknownUnit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if s.eq_ignore_ascii_case("kg") {
            Ok(Self::Kilograms)
        } else if s.eq_ignore_ascii_case("lbs") {
            Ok(Self::Pounds)
        } else if s.eq_ignore_ascii_case("stones") {
            Ok(Self::Stones)
        } else {
            Err(UnknownUnit)
        }
    }
}

/// Gender used by the scale's body-fat estimate.
#[repr(u8)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    #[default]
    Male = 0,
    Female = 1,
}

/// A profile name, truncated and zero-padded to [`NAME_SIZE`] bytes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProfileName([u8; NAME_SIZE]);

impl ProfileName {
    /// The padded bytes, as written to the wire.
    pub fn as_bytes(&self) -> &[u8; NAME_SIZE] {
        &self.0
    }

    /// The name, up to the first zero byte.
    ///
    /// Truncation may split a multi-byte character; any incomplete trailing
    /// character is dropped.
    pub fn as_str(&self) -> &str {
        let end = self.0.iter().position(|b| *b == 0).unwrap_or(NAME_SIZE);
        let bytes = &self.0[..end];

        match core::str::from_utf8(bytes) {
            Ok(s) => s,
            Err(err) => core::str::from_utf8(&bytes[..err.valid_up_to()]).unwrap_or_default(),
        }
    }
}

impl From<&str> for ProfileName {
    fn from(name: &str) -> Self {
        let mut padded = [0; NAME_SIZE];
        let len = name.len().min(NAME_SIZE);
        padded[..len].copy_from_slice(&name.as_bytes()[..len]);
        Self(padded)
    }
}

/// An error validating a user profile.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ProfileError {
    /// Names must be between 1 and 20 characters.
    #[error("Name must be 1 to 20 characters ({0}).")]
    NameLength(usize),
    /// Heights must be between 50 and 250 centimetres.
    #[error("Height must be 50 to 250 cm ({0}).")]
    Height(u32),
    /// Ages must be between 1 and 150 years.
    #[error("Age must be 1 to 150 ({0}).")]
    Age(u32),
    /// Weight bounds out of range, or not strictly increasing.
    #[error("Invalid weight range ({min} to {max} kg).")]
    WeightRange { min: f64, max: f64 },
}

/// A registered user the scale should recognise.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct UserProfile {
    pub user_id: u32,
    pub name: ProfileName,
    pub min_weight_grams: u32,
    pub max_weight_grams: u32,
    pub age: u32,
    pub gender: Gender,
    pub height_mm: u32,
    /// Last known weight, or zero if none.
    pub last_weight_grams: u32,
    /// Last known body fat, or zero if none.
    pub last_fat_percent: u32,
    /// Time of the last known measurement, or zero if none.
    pub last_timestamp: u32,
}

impl UserProfile {
    /// Construct a profile without a last known measurement.
    pub fn new(
        user_id: u32,
        name: &str,
        min_weight_grams: u32,
        max_weight_grams: u32,
        age: u32,
        gender: Gender,
        height_mm: u32,
    ) -> Self {
        Self {
            user_id,
            name: name.into(),
            min_weight_grams,
            max_weight_grams,
            age,
            gender,
            height_mm,
            ..Default::default()
        }
    }

    /// Construct a profile from metric inputs, checking they are plausible.
    ///
    /// Names are limited to 20 characters here; the wire field still keeps
    /// only the first 20 bytes.
    pub fn from_metric(
        user_id: u32,
        name: &str,
        height_cm: u32,
        age: u32,
        gender: Gender,
        min_weight_kg: f64,
        max_weight_kg: f64,
    ) -> Result<Self, ProfileError> {
        let chars = name.chars().count();
        if !(1..=NAME_SIZE).contains(&chars) {
            Err(ProfileError::NameLength(chars))?;
        }
        if !(50..=250).contains(&height_cm) {
            Err(ProfileError::Height(height_cm))?;
        }
        if !(1..=150).contains(&age) {
            Err(ProfileError::Age(age))?;
        }

        let weights_valid = (10.0..=300.0).contains(&min_weight_kg)
            && (10.0..=500.0).contains(&max_weight_kg)
            && min_weight_kg < max_weight_kg;

        if !weights_valid {
            Err(ProfileError::WeightRange {
                min: min_weight_kg,
                max: max_weight_kg,
            })?;
        }

        Ok(Self::new(
            user_id,
            name,
            (min_weight_kg * 1000.0) as u32,
            (max_weight_kg * 1000.0) as u32,
            age,
            gender,
            height_cm * 10,
        ))
    }

    /// Attach the last known measurement for this user.
    pub fn with_last_measurement(
        mut self,
        weight_grams: u32,
        fat_percent: u32,
        timestamp: u32,
    ) -> Self {
        self.last_weight_grams = weight_grams;
        self.last_fat_percent = fat_percent;
        self.last_timestamp = timestamp;
        self
    }
}

/// The fixed header opening every response.
#[repr(C)]
#[derive(Debug, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct ResponseHeader {
    timestamp: U32,
    unit: U32,
    status: U32,
    user_count: U32,
}

impl ResponseHeader {
    pub fn new(timestamp: u32, unit: WeightUnit, status: u32, user_count: u32) -> Self {
        Self {
            timestamp: timestamp.into(),
            unit: (unit as u32).into(),
            status: status.into(),
            user_count: user_count.into(),
        }
    }
}

/// A user profile slot.
#[repr(C)]
#[derive(Debug, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct UserBlock {
    user_id: U32,
    _reserved_0: [u8; 16],
    name: [u8; NAME_SIZE],
    min_weight_grams: U32,
    max_weight_grams: U32,
    age: U32,
    gender: u8,
    _reserved_1: [u8; 3],
    height_mm: U32,
    last_weight_grams: U32,
    last_fat_percent: U32,
    last_timestamp: U32,
    _reserved_2: [U32; 2],
}

impl From<&UserProfile> for UserBlock {
    fn from(user: &UserProfile) -> Self {
        Self {
            user_id: user.user_id.into(),
            _reserved_0: [0; 16],
            name: *user.name.as_bytes(),
            min_weight_grams: user.min_weight_grams.into(),
            max_weight_grams: user.max_weight_grams.into(),
            age: user.age.into(),
            gender: user.gender as u8,
            _reserved_1: [0; 3],
            height_mm: user.height_mm.into(),
            last_weight_grams: user.last_weight_grams.into(),
            last_fat_percent: user.last_fat_percent.into(),
            last_timestamp: user.last_timestamp.into(),
            _reserved_2: [U32::ZERO; 2],
        }
    }
}

const _: () = assert!(size_of::<ResponseHeader>() == RESPONSE_HEADER_SIZE);
const _: () = assert!(size_of::<UserBlock>() == USER_BLOCK_SIZE);
