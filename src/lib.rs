//! List the file systems currently mounted on the host.
//!
//! ```no_run
//! for fs in mounted::file_systems().unwrap() {
//!     println!("{fs}");
//! }
//! ```
//!
//! Each platform has its own way to get the mount table:
//! - linux reads `/proc/mounts`
//! - macOS and the BSDs call `getmntinfo`
//! - windows walks the volumes and queries their paths and information

mod error;
mod file_system;
mod flags;
mod read_options;
mod sys;
#[cfg_attr(not(target_os = "windows"), allow(dead_code))]
mod volume;

#[cfg(any(target_os = "linux", target_os = "android"))]
mod linux;
#[cfg(any(
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd",
    target_os = "dragonfly",
))]
mod bsd;
#[cfg(target_os = "windows")]
mod windows;

#[cfg(any(target_os = "linux", target_os = "android"))]
pub use linux::{
    read_file_systems_from,
    MountEntries,
    MountEntry,
    MOUNT_TABLE,
};

pub use {
    error::{
        Error,
        Result,
        Stage,
    },
    file_system::FileSystem,
    flags::{
        decode_flags,
        FlagTable,
        DRAGONFLY_MOUNT_FLAGS,
        FREEBSD_MOUNT_FLAGS,
        MACOS_MOUNT_FLAGS,
        WINDOWS_VOLUME_FLAGS,
    },
    read_options::{
        ReadOptions,
        DEFAULT_PATH_NAMES_LIMIT,
    },
    sys::last_os_error,
    volume::{
        parse_multi_string,
        VolumeName,
    },
};

/// Read all the mounted file systems, with default options
pub fn file_systems() -> Result<Vec<FileSystem>> {
    read_file_systems(&ReadOptions::default())
}

/// Read all the mounted file systems.
///
/// The list is built anew at each call, nothing is cached. Either
/// all file systems are returned or the whole call fails.
pub fn read_file_systems(options: &ReadOptions) -> Result<Vec<FileSystem>> {
    platform::read_file_systems(options)
}

#[cfg(any(target_os = "linux", target_os = "android"))]
use self::linux as platform;
#[cfg(any(
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd",
    target_os = "dragonfly",
))]
use self::bsd as platform;
#[cfg(target_os = "windows")]
use self::windows as platform;

#[cfg(not(any(
    target_os = "linux",
    target_os = "android",
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd",
    target_os = "dragonfly",
    target_os = "windows",
)))]
mod platform {
    use crate::{
        error::*,
        FileSystem,
        ReadOptions,
    };

    pub fn read_file_systems(_options: &ReadOptions) -> Result<Vec<FileSystem>> {
        UnsupportedSnafu {
            os: std::env::consts::OS,
        }
        .fail()
    }
}
