//! States processing measurement records, and the values derived from them.

use zerocopy::{FromBytes, byteorder::little_endian::U32};

/// Size of a single measurement record.
pub const MEASUREMENT_SIZE: usize = 32;

/// Grams in an avoirdupois pound.
const GRAMS_PER_POUND: f64 = 453.592;

/// Earliest plausible device timestamp (2000-01-01T00:00:00Z).
const EARLIEST_TIMESTAMP: u32 = 946_684_800;
/// Latest plausible device timestamp (2100-01-01T00:00:00Z).
const LATEST_TIMESTAMP: u32 = 4_102_444_800;

/// A single weight and body-fat reading.
///
/// Fields hold the values found on the wire. Derived values are computed on
/// request by the accessor methods.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScaleMeasurement {
    pub measurement_id: u32,
    /// Bio-impedance, used by the scale to estimate body fat.
    pub impedance: u32,
    pub weight_grams: u32,
    /// Device clock, in seconds since the Unix epoch.
    pub timestamp: u32,
    /// Profile the scale matched the reading to, or zero for a guest.
    pub user_id: u32,
    /// First body-fat reading, scaled by 10.
    pub fat_percent_1: u32,
    /// Second body-fat reading, scaled by 10.
    pub fat_percent_2: u32,
    pub covariance: u32,
}

impl ScaleMeasurement {
    /// Weight in kilograms.
    pub fn weight_kg(&self) -> f64 {
        weight_kg(self.weight_grams)
    }

    /// Weight in pounds.
    pub fn weight_lbs(&self) -> f64 {
        weight_lbs(self.weight_grams)
    }

    /// Average body-fat percentage, if the scale measured one.
    pub fn body_fat_percent(&self) -> Option<f64> {
        body_fat_percent(self.fat_percent_1, self.fat_percent_2)
    }

    /// Whether the reading was not matched to a user profile.
    pub fn is_guest(&self) -> bool {
        self.user_id == 0
    }

    /// The device timestamp, if it falls between the years 2000 and 2100.
    ///
    /// Scales with a reset clock report timestamps near zero.
    pub fn checked_timestamp(&self) -> Option<u32> {
        (EARLIEST_TIMESTAMP..=LATEST_TIMESTAMP)
            .contains(&self.timestamp)
            .then_some(self.timestamp)
    }
}

/// Convert grams to kilograms.
pub fn weight_kg(grams: u32) -> f64 {
    grams as f64 / 1000.0
}

/// Convert grams to pounds.
pub fn weight_lbs(grams: u32) -> f64 {
    grams as f64 / GRAMS_PER_POUND
}

/// Average two body-fat readings scaled by 10.
///
/// Two zero readings mean the scale could not measure body fat (for example,
/// when weighed with shoes on).
pub fn body_fat_percent(fat_percent_1: u32, fat_percent_2: u32) -> Option<f64> {
    if fat_percent_1 == 0 && fat_percent_2 == 0 {
        return None;
    }

    Some((fat_percent_1 as f64 + fat_percent_2 as f64) / 20.0)
}

/// State token to decode a measurement record.
#[derive(Debug)]
pub struct MeasurementRecord {
    pub(super) remaining: u32,
}

impl MeasurementRecord {
    /// Token for the first of `declared` records, if any.
    pub(super) fn first(declared: u32) -> Option<Self> {
        (declared != 0).then_some(Self {
            remaining: declared,
        })
    }

    /// Number of declared records not yet decoded, including this one.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Transition to another state by decoding a measurement record.
    ///
    /// Returns the measurement, and a successor state token if more records
    /// were declared.
    pub fn advance(self, r: [u8; MEASUREMENT_SIZE]) -> (ScaleMeasurement, Option<Self>) {
        #[repr(C)]
        #[derive(FromBytes)]
        struct WireMeasurement {
            measurement_id: U32,
            impedance: U32,
            weight_grams: U32,
            timestamp: U32,
            user_id: U32,
            fat_percent_1: U32,
            fat_percent_2: U32,
            covariance: U32,
        }

        let WireMeasurement {
            measurement_id,
            impedance,
            weight_grams,
            timestamp,
            user_id,
            fat_percent_1,
            fat_percent_2,
            covariance,
        } = zerocopy::transmute!(r);

        let measurement = ScaleMeasurement {
            measurement_id: measurement_id.get(),
            impedance: impedance.get(),
            weight_grams: weight_grams.get(),
            timestamp: timestamp.get(),
            user_id: user_id.get(),
            fat_percent_1: fat_percent_1.get(),
            fat_percent_2: fat_percent_2.get(),
            covariance: covariance.get(),
        };

        let successor = Self::first(self.remaining - 1);

        (measurement, successor)
    }
}
