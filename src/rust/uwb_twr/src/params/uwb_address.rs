// Copyright 2022, The Android Open Source Project
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! This module defines the 2-byte UWB short address used to identify both ends of a session.
//!
//! The address is exchanged out-of-band: the operator reads the `XX:XX` text shown by one device
//! and types it into the other, so the text form is the primary interface.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// The length of the text form, i.e. `XX:XX`.
const ADDRESS_TEXT_LEN: usize = 5;
const ADDRESS_SEPARATOR: u8 = b':';

/// The short (2 bytes) MAC address of a UWB device.
///
/// The bytes are kept in the order they are displayed. No byte-order conversion is applied
/// between the text form and the value handed to the ranging service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct UwbShortAddress([u8; 2]);

impl UwbShortAddress {
    /// Create the address from the raw bytes.
    pub const fn new(bytes: [u8; 2]) -> Self {
        Self(bytes)
    }

    /// Parse the `XX:XX` text form. Lowercase hex digits are accepted and normalized.
    pub fn parse(text: &str) -> Result<Self> {
        let normalized = text.to_ascii_uppercase();
        let bytes = normalized.as_bytes();
        if bytes.len() != ADDRESS_TEXT_LEN || bytes[2] != ADDRESS_SEPARATOR {
            return Err(Error::InvalidAddress(text.to_owned()));
        }

        match (parse_octet(bytes[0], bytes[1]), parse_octet(bytes[3], bytes[4])) {
            (Some(high), Some(low)) => Ok(Self([high, low])),
            _ => Err(Error::InvalidAddress(text.to_owned())),
        }
    }

    /// The raw bytes of the address.
    pub fn as_bytes(&self) -> &[u8; 2] {
        &self.0
    }
}

// Only uppercase digits are accepted here, the input is uppercased beforehand.
fn parse_octet(high: u8, low: u8) -> Option<u8> {
    Some(hex_digit(high)? << 4 | hex_digit(low)?)
}

fn hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl fmt::Display for UwbShortAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}:{:02X}", self.0[0], self.0[1])
    }
}

impl FromStr for UwbShortAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<[u8; 2]> for UwbShortAddress {
    fn from(item: [u8; 2]) -> Self {
        Self(item)
    }
}

impl From<UwbShortAddress> for [u8; 2] {
    fn from(item: UwbShortAddress) -> [u8; 2] {
        item.0
    }
}

impl From<UwbShortAddress> for Vec<u8> {
    fn from(item: UwbShortAddress) -> Self {
        item.0.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ok() {
        assert_eq!(UwbShortAddress::parse("0A:1B"), Ok(UwbShortAddress::new([0x0A, 0x1B])));
        assert_eq!(UwbShortAddress::parse("ff:00"), Ok(UwbShortAddress::new([0xFF, 0x00])));
        assert_eq!("02:0f".parse::<UwbShortAddress>(), Ok(UwbShortAddress::new([0x02, 0x0F])));
    }

    #[test]
    fn test_parse_rejects_malformed_text() {
        for text in ["1:2", "GG:00", "00-00", "", "000:00", "00:000", " 0A:1B", "0A:1B ", "+F:00"] {
            assert_eq!(
                UwbShortAddress::parse(text),
                Err(Error::InvalidAddress(text.to_owned())),
                "{text:?} should be rejected"
            );
        }
        // Non-ASCII input must not be sliced in the middle of a character.
        assert!(UwbShortAddress::parse("é:00").is_err());
        assert!(UwbShortAddress::parse("0Ａ:1B").is_err());
    }

    #[test]
    fn test_format() {
        assert_eq!(UwbShortAddress::new([0x0A, 0x1B]).to_string(), "0A:1B");
        assert_eq!(UwbShortAddress::new([0x00, 0x01]).to_string(), "00:01");
        assert_eq!(UwbShortAddress::default().to_string(), "00:00");
    }

    #[test]
    fn test_format_normalizes_parsed_text() {
        for text in ["0a:1b", "Ab:cD", "00:00", "FF:FF"] {
            let address = UwbShortAddress::parse(text).unwrap();
            assert_eq!(address.to_string(), text.to_ascii_uppercase());
        }
    }

    #[test]
    fn test_bytes_are_not_reversed() {
        let address = UwbShortAddress::parse("01:00").unwrap();
        assert_eq!(address.as_bytes(), &[0x01, 0x00]);
        assert_eq!(Vec::<u8>::from(address), vec![0x01, 0x00]);
    }
}
