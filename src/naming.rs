//! Naming policy for package members and package files
//!
//! Payload files follow the `<Name>_pakchunk<N>-<Platform>.<ext>` convention.
//! When building a package, each member is renamed so its chunk index and
//! platform suffix match the requested policy.
//!
//! # Examples
//!
//! ```
//! use mmpack::{NamingPolicy, PlatformCode};
//!
//! let policy = NamingPolicy::new(PlatformCode::Egs).with_chunk(7);
//! assert_eq!(policy.rewrite_base("Mod_pakchunk5-Windows"), "Mod_pakchunk7-EGS");
//! assert_eq!(policy.member_name("Mod_pakchunk5-Windows.PAK"), "Mod_pakchunk7-EGS.pak");
//! assert_eq!(policy.output_file_name(), "mod_7.mmpackage");
//! ```

use crate::PlatformCode;
use regex::{Captures, NoExpand, Regex};
use std::sync::LazyLock;

/// File extension of package archives
pub const PACKAGE_EXTENSION: &str = "mmpackage";

/// Payload extensions every package must carry
pub const REQUIRED_EXTENSIONS: [&str; 4] = ["pak", "sig", "ucas", "utoc"];

static CHUNK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(pakchunk)(\d+)(-)").expect("valid chunk pattern"));

static PLATFORM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-(Windows|WinGDK|EGS)?$").expect("valid platform pattern"));

/// How members and the output package get named
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamingPolicy {
    pub platform: PlatformCode,
    /// Replaces the digits after `pakchunk`, and suffixes the default output name
    pub chunk_override: Option<u32>,
    /// Output file name without the `.mmpackage` suffix
    pub explicit_name: Option<String>,
}

impl NamingPolicy {
    pub fn new(platform: PlatformCode) -> Self {
        Self {
            platform,
            chunk_override: None,
            explicit_name: None,
        }
    }

    pub fn with_chunk(mut self, chunk: u32) -> Self {
        self.chunk_override = Some(chunk);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.explicit_name = Some(name.into());
        self
    }

    /// File name of the package produced under this policy
    ///
    /// A non-blank explicit name wins; otherwise `mod[_<chunk>].mmpackage`.
    pub fn output_file_name(&self) -> String {
        if let Some(name) = self.explicit_name.as_deref().map(str::trim) {
            if !name.is_empty() {
                return format!("{}.{}", name, PACKAGE_EXTENSION);
            }
        }

        match self.chunk_override {
            Some(chunk) => format!("mod_{}.{}", chunk, PACKAGE_EXTENSION),
            None => format!("mod.{}", PACKAGE_EXTENSION),
        }
    }

    /// Rewrite a member base name (no extension)
    ///
    /// The first `pakchunk<digits>-` gets its digits replaced by the chunk
    /// override, if any. A trailing `-`, `-Windows`, `-WinGDK` or `-EGS` is
    /// replaced by `-<platform>`. Names without a trailing hyphen token keep
    /// their ending.
    pub fn rewrite_base(&self, base: &str) -> String {
        let base = match self.chunk_override {
            Some(chunk) => CHUNK_RE
                .replace(base, |caps: &Captures<'_>| {
                    format!("{}{}{}", &caps[1], chunk, &caps[3])
                })
                .into_owned(),
            None => base.to_string(),
        };

        let suffix = format!("-{}", self.platform);
        PLATFORM_RE
            .replace(&base, NoExpand(&suffix))
            .into_owned()
    }

    /// Archive member name for an input file name: rewritten base plus lower-cased extension
    pub fn member_name(&self, file_name: &str) -> String {
        let base = strip_extension(file_name);
        let ext = file_extension(file_name);
        format!("{}.{}", self.rewrite_base(base), ext)
    }
}

/// Lower-cased text after the final `.`; the whole name when there is no dot
pub fn file_extension(file_name: &str) -> String {
    file_name
        .rsplit_once('.')
        .map_or(file_name, |(_, ext)| ext)
        .to_lowercase()
}

/// Name with its final extension removed
pub fn strip_extension(file_name: &str) -> &str {
    match file_name.rsplit_once('.') {
        Some((base, ext)) if !ext.is_empty() => base,
        _ => file_name,
    }
}

/// Required extensions not present in `extensions`, in canonical order
pub fn missing_extensions<S: AsRef<str>>(extensions: &[S]) -> Vec<String> {
    REQUIRED_EXTENSIONS
        .iter()
        .filter(|required| !extensions.iter().any(|ext| ext.as_ref() == **required))
        .map(|required| required.to_string())
        .collect()
}
