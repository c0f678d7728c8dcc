//! Platform codes for packaged payloads
//!
//! Each payload file name ends with a suffix naming the storefront build it
//! targets (`-Windows`, `-WinGDK`, `-EGS`).
//!
//! # Examples
//!
//! ```
//! use mmpack::PlatformCode;
//!
//! let code: PlatformCode = "egs".parse().unwrap();
//! assert_eq!(code, PlatformCode::Egs);
//! assert_eq!(code.to_string(), "EGS");
//!
//! assert_eq!(PlatformCode::from_launcher("Microsoft Store"), PlatformCode::WinGdk);
//! ```

use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target storefront/runtime of a package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlatformCode {
    /// Steam build
    #[default]
    Windows,
    /// Microsoft Store / Game Pass build
    #[serde(rename = "WinGDK")]
    WinGdk,
    /// Epic Games Store build
    #[serde(rename = "EGS")]
    Egs,
}

impl PlatformCode {
    pub const ALL: [PlatformCode; 3] = [PlatformCode::Windows, PlatformCode::WinGdk, PlatformCode::Egs];

    /// Suffix token as it appears in payload file names
    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformCode::Windows => "Windows",
            PlatformCode::WinGdk => "WinGDK",
            PlatformCode::Egs => "EGS",
        }
    }

    /// Infer a platform code from the launcher string stored by the host mod manager
    ///
    /// Matching is a case-insensitive substring test: "epic" wins over
    /// "microsoft", which wins over "steam". Anything else is `Windows`.
    pub fn from_launcher(launcher: &str) -> Self {
        let launcher = launcher.to_lowercase();
        if launcher.contains("epic") {
            PlatformCode::Egs
        } else if launcher.contains("microsoft") {
            PlatformCode::WinGdk
        } else {
            PlatformCode::Windows
        }
    }
}

impl fmt::Display for PlatformCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlatformCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlatformCode::ALL
            .into_iter()
            .find(|code| code.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidPlatform(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_platform_codes() {
        assert_eq!("Windows".parse::<PlatformCode>().unwrap(), PlatformCode::Windows);
        assert_eq!("wingdk".parse::<PlatformCode>().unwrap(), PlatformCode::WinGdk);
        assert_eq!(" EGS ".parse::<PlatformCode>().unwrap(), PlatformCode::Egs);
        assert!("PS5".parse::<PlatformCode>().is_err());
    }

    #[test]
    fn test_from_launcher() {
        assert_eq!(PlatformCode::from_launcher("Epic Games"), PlatformCode::Egs);
        assert_eq!(PlatformCode::from_launcher("MICROSOFT"), PlatformCode::WinGdk);
        assert_eq!(PlatformCode::from_launcher("steam"), PlatformCode::Windows);
        assert_eq!(PlatformCode::from_launcher("gog"), PlatformCode::Windows);
    }

    #[test]
    fn test_serde_uses_suffix_tokens() {
        let json = serde_json::to_string(&PlatformCode::WinGdk).unwrap();
        assert_eq!(json, "\"WinGDK\"");
        let code: PlatformCode = serde_json::from_str("\"EGS\"").unwrap();
        assert_eq!(code, PlatformCode::Egs);
    }
}
