//! Platform-native localization file formats.
//!
//! One codec module per platform, plus the [`Platform`] enum for generic
//! dispatch. Every codec is a pure pair of functions between file text and
//! an ordered list of `(key, value)` entries.

pub mod android_strings;
pub mod apple_strings;
pub mod arb;

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

pub use android_strings::Format as AndroidStringsFormat;
pub use apple_strings::Format as AppleStringsFormat;
pub use arb::Format as ArbFormat;

use crate::Error;

/// The three supported target platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// Android `strings.xml` resource files.
    Android,
    /// iOS / macOS `.strings` files.
    Ios,
    /// Flutter ARB files (JSON with `@`-prefixed metadata keys).
    Flutter,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Android, Platform::Ios, Platform::Flutter];

    /// Returns the typical file extension for this platform's format.
    pub fn extension(&self) -> &'static str {
        match self {
            Platform::Android => "xml",
            Platform::Ios => "strings",
            Platform::Flutter => "arb",
        }
    }

    /// Returns the conventional resource file name for this platform.
    pub fn default_file_name(&self) -> &'static str {
        match self {
            Platform::Android => "strings.xml",
            Platform::Ios => "Localizable.strings",
            Platform::Flutter => "app.arb",
        }
    }
}

impl Display for Platform {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Android => write!(f, "android"),
            Platform::Ios => write!(f, "ios"),
            Platform::Flutter => write!(f, "flutter"),
        }
    }
}

/// Accepts case-insensitive platform names and common format aliases:
/// `"android"`/`"xml"`, `"ios"`/`"strings"`, `"flutter"`/`"arb"`.
impl FromStr for Platform {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        match s.as_str() {
            "android" | "xml" => Ok(Platform::Android),
            "ios" | "apple" | "strings" => Ok(Platform::Ios),
            "flutter" | "arb" | "json" => Ok(Platform::Flutter),
            other => Err(Error::UnknownPlatform(other.to_string())),
        }
    }
}

/// Decodes source file text into ordered `(key, value)` entries using the
/// platform's codec. All three codecs propagate decode failures.
pub fn decode(platform: Platform, text: &str) -> Result<Vec<(String, String)>, Error> {
    match platform {
        Platform::Android => android_strings::decode(text),
        Platform::Ios => apple_strings::decode(text),
        Platform::Flutter => arb::decode(text),
    }
}

/// Encodes entries into platform-native file text. Entries with empty
/// values are omitted by every codec. `language` is only embedded by the
/// ARB codec (`@@locale`).
pub fn encode(platform: Platform, language: &str, entries: &[(String, String)]) -> String {
    match platform {
        Platform::Android => android_strings::encode(entries),
        Platform::Ios => apple_strings::encode(entries),
        Platform::Flutter => arb::encode(language, entries),
    }
}
