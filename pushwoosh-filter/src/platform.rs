//! Device platform codes.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::{FilterError, Result};

/// Device platform.
///
/// Serialized as its numeric code in request payloads and rendered by
/// name inside filter expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// Apple iOS.
    Ios,
    /// BlackBerry.
    BlackBerry,
    /// Android.
    Android,
    /// Windows Phone.
    WindowsPhone,
    /// Mac OS X.
    Mac,
    /// Windows 8 (WNS).
    Windows8,
    /// Amazon (ADM).
    Amazon,
    /// Safari web push.
    Safari,
    /// Chrome web push.
    Chrome,
    /// Firefox web push.
    Firefox,
}

impl Platform {
    /// All known platforms.
    pub const ALL: [Platform; 10] = [
        Platform::Ios,
        Platform::BlackBerry,
        Platform::Android,
        Platform::WindowsPhone,
        Platform::Mac,
        Platform::Windows8,
        Platform::Amazon,
        Platform::Safari,
        Platform::Chrome,
        Platform::Firefox,
    ];

    /// Numeric platform code.
    pub fn code(&self) -> u8 {
        match self {
            Platform::Ios => 1,
            Platform::BlackBerry => 2,
            Platform::Android => 3,
            Platform::WindowsPhone => 5,
            Platform::Mac => 7,
            Platform::Windows8 => 8,
            Platform::Amazon => 9,
            Platform::Safari => 10,
            Platform::Chrome => 11,
            Platform::Firefox => 12,
        }
    }

    /// Name used inside filter expressions.
    pub fn name(&self) -> &'static str {
        match self {
            Platform::Ios => "iOS",
            Platform::BlackBerry => "BlackBerry",
            Platform::Android => "Android",
            Platform::WindowsPhone => "Windows_Phone",
            Platform::Mac => "OS_X",
            Platform::Windows8 => "Windows_8",
            Platform::Amazon => "Amazon",
            Platform::Safari => "Safari",
            Platform::Chrome => "Chrome",
            Platform::Firefox => "Firefox",
        }
    }

    /// Look up a platform by code.
    pub fn from_code(code: u8) -> Result<Self> {
        Platform::ALL
            .into_iter()
            .find(|p| p.code() == code)
            .ok_or(FilterError::InvalidPlatform(code))
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for Platform {
    type Error = FilterError;

    fn try_from(code: u8) -> Result<Self> {
        Platform::from_code(code)
    }
}

impl Serialize for Platform {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

/// Check whether a numeric code names a known platform.
pub fn valid_platform(code: u8) -> bool {
    Platform::from_code(code).is_ok()
}

/// Map platforms to their filter-expression names.
pub fn platform_names(platforms: &[Platform]) -> Vec<&'static str> {
    platforms.iter().map(Platform::name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_unique_and_round_trip() {
        for platform in Platform::ALL {
            assert_eq!(Platform::from_code(platform.code()).unwrap(), platform);
        }
    }

    #[test]
    fn test_valid_platform() {
        assert!(valid_platform(1));
        assert!(valid_platform(12));
        assert!(!valid_platform(0));
        assert!(!valid_platform(4));
        assert_eq!(Platform::try_from(6), Err(FilterError::InvalidPlatform(6)));
    }

    #[test]
    fn test_platform_names() {
        assert_eq!(
            platform_names(&[Platform::Ios, Platform::Android]),
            vec!["iOS", "Android"]
        );
    }

    #[test]
    fn test_serializes_as_code() {
        let json = serde_json::to_string(&vec![Platform::Android, Platform::Amazon]).unwrap();
        assert_eq!(json, "[3,9]");
    }
}
