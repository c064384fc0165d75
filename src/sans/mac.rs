//! Scale hardware identity.

use core::{fmt, str::FromStr};

use thiserror::Error;

/// The six-byte hardware address a scale reports in every upload.
///
/// Formats as colon-separated uppercase hex (`AA:BB:CC:DD:EE:FF`). The scale's
/// serial number is the same bytes without separators; see
/// [`MacAddress::serial`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddress(pub [u8; 6]);

impl MacAddress {
    /// The raw address bytes, in wire order.
    pub fn octets(&self) -> [u8; 6] {
        self.0
    }

    /// Display adapter rendering the serial number (`AABBCCDDEEFF`).
    pub fn serial(&self) -> Serial<'_> {
        Serial(self)
    }
}

impl From<[u8; 6]> for MacAddress {
    fn from(octets: [u8; 6]) -> Self {
        Self(octets)
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02X}:{b:02X}:{c:02X}:{d:02X}:{e:02X}:{g:02X}")
    }
}

/// Serial number rendering of a [`MacAddress`].
#[derive(Debug, Clone, Copy)]
pub struct Serial<'a>(&'a MacAddress);

impl fmt::Display for Serial<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.0.iter().try_for_each(|b| write!(f, "{b:02X}"))
    }
}

/// An error parsing a serial number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SerialError {
    /// Serial numbers are exactly twelve hex digits.
    #[error("Expected 12 hex digits, found {0} characters.")]
    Length(usize),
    /// Found a character that is not a hex digit.
    #[error("Invalid hex digit ({0:?}).")]
    Digit(char),
}

impl FromStr for MacAddress {
    type Err = SerialError;

    /// Parse a serial number (twelve hex digits of either case, surrounding
    /// whitespace ignored).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        let length = s.chars().count();
        if length != 12 {
            Err(SerialError::Length(length))?;
        }

        let mut octets = [0; 6];
        let mut digits = s.chars();

        for octet in &mut octets {
            for _ in 0..2 {
                // Length was checked above.
                let c = digits.next().ok_or(SerialError::Length(length))?;
                let nibble = c.to_digit(16).ok_or(SerialError::Digit(c))?;
                *octet = (*octet << 4) | nibble as u8;
            }
        }

        Ok(Self(octets))
    }
}
