//! Windows volume names and the wide strings the volume API returns.
//!
//! Nothing here calls the OS, so it's built on every platform.

use {
    crate::error::*,
    lazy_regex::regex_is_match,
    std::fmt,
};

pub(crate) trait WideStringExt {
    fn wcslen(&self) -> usize;
}

impl WideStringExt for [u16] {
    fn wcslen(&self) -> usize {
        self.iter().position(|&c| c == 0).unwrap_or(self.len())
    }
}

/// the string before the first NUL of a wide buffer
pub fn from_wide_null_terminated(buffer: &[u16]) -> String {
    String::from_utf16_lossy(&buffer[..buffer.wcslen()])
}

/// Parse a list of NUL terminated strings, itself ended by an
/// empty string, as returned by `GetVolumePathNamesForVolumeNameW`
/// or `QueryDosDeviceW`.
///
/// Parsing stops at the first empty string or at the end of the buffer.
pub fn parse_multi_string(buffer: &[u16]) -> Vec<String> {
    buffer
        .split(|&c| c == 0)
        .take_while(|s| !s.is_empty())
        .map(String::from_utf16_lossy)
        .collect()
}

/// A volume GUID path, like `\\?\Volume{26a21bda-a627-11d7-9931-806e6f6e6963}\`
#[derive(Clone, PartialEq, Eq)]
pub struct VolumeName {
    path: String,
}

impl fmt::Debug for VolumeName {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_tuple("VolumeName").field(&self.path).finish()
    }
}

impl fmt::Display for VolumeName {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        f.write_str(&self.path)
    }
}

impl VolumeName {
    const PREFIX: &'static str = r"\\?\";

    pub fn parse(path: &str) -> Result<Self> {
        if !regex_is_match!(r#"^\\\\\?\\Volume\{[^{}\\]+\}\\$"#, path) {
            return MalformedVolumeNameSnafu { name: path }.fail();
        }
        Ok(Self {
            path: path.to_string(),
        })
    }

    pub fn from_null_terminated(buffer: &[u16]) -> Result<Self> {
        Self::parse(&from_wide_null_terminated(buffer))
    }

    /// the full path, with its trailing backslash
    pub fn as_str(&self) -> &str {
        &self.path
    }

    /// the name expected by `QueryDosDeviceW`, i.e. without the `\\?\`
    /// prefix nor the trailing backslash: `Volume{...}`
    pub fn dos_device(&self) -> &str {
        &self.path[Self::PREFIX.len()..self.path.len() - 1]
    }

    /// the path as a NUL terminated wide string
    pub fn to_wide(&self) -> Vec<u16> {
        to_wide(&self.path)
    }

    /// the DOS device name as a NUL terminated wide string
    pub fn dos_device_to_wide(&self) -> Vec<u16> {
        to_wide(self.dos_device())
    }
}

/// Size of the next buffer to try when the OS answered that the
/// `current` one is too small, or `None` when it would exceed `limit`.
///
/// The size is doubled, or set to the size reported by the OS if bigger.
pub fn next_buffer_len(
    current: usize,
    reported: usize,
    limit: usize,
) -> Option<usize> {
    let len = current.saturating_mul(2).max(reported);
    (len <= limit).then_some(len)
}

/// encode as a NUL terminated wide string
pub fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}
