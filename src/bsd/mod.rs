use {
    crate::{
        error::*,
        flags::*,
        sys,
        FileSystem,
        ReadOptions,
    },
    snafu::prelude::*,
    std::{
        ffi::OsStr,
        os::{
            raw::c_char,
            unix::ffi::OsStrExt,
        },
        path::PathBuf,
        ptr,
        slice,
        sync::{
            Mutex,
            PoisonError,
        },
    },
};

#[cfg(any(target_os = "macos", target_os = "ios"))]
static MOUNT_FLAGS: &FlagTable = &MACOS_MOUNT_FLAGS;
#[cfg(target_os = "freebsd")]
static MOUNT_FLAGS: &FlagTable = &FREEBSD_MOUNT_FLAGS;
#[cfg(target_os = "dragonfly")]
static MOUNT_FLAGS: &FlagTable = &DRAGONFLY_MOUNT_FLAGS;

// getmntinfo returns a buffer that the next call reuses
static GETMNTINFO_LOCK: Mutex<()> = Mutex::new(());

/// Read all the mounted file systems, from the kernel's cached
/// statfs list (the call doesn't wait for file systems to respond)
pub fn read_file_systems(_options: &ReadOptions) -> Result<Vec<FileSystem>> {
    let _guard = GETMNTINFO_LOCK
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    let mut entries: *mut libc::statfs = ptr::null_mut();
    let count = unsafe { libc::getmntinfo(&mut entries, libc::MNT_NOWAIT) };
    if count <= 0 || entries.is_null() {
        return Err(sys::last_os_error()).context(AcquisitionFailedSnafu { api: "getmntinfo" });
    }
    // SAFETY: on success, entries points to count statfs structures
    // owned by libc, which stay valid until the next call (hence the lock)
    let entries = unsafe { slice::from_raw_parts(entries, count as usize) };
    let file_systems: Vec<FileSystem> = entries.iter().map(to_file_system).collect();
    log::debug!("getmntinfo returned {} file systems", file_systems.len());
    Ok(file_systems)
}

fn to_file_system(stat: &libc::statfs) -> FileSystem {
    #[allow(clippy::unnecessary_cast)] // u32 on macOS, u64 on FreeBSD
    let flags = stat.f_flags as u64;
    FileSystem {
        name: String::from_utf8_lossy(&c_chars_to_bytes(&stat.f_mntfromname)).into_owned(),
        path: PathBuf::from(OsStr::from_bytes(&c_chars_to_bytes(&stat.f_mntonname))),
        fs_type: String::from_utf8_lossy(&c_chars_to_bytes(&stat.f_fstypename)).into_owned(),
        options: MOUNT_FLAGS.decode(flags),
    }
}

/// the bytes of a fixed size char array, up to the first NUL
fn c_chars_to_bytes(chars: &[c_char]) -> Vec<u8> {
    chars
        .iter()
        .take_while(|&&c| c != 0)
        .map(|&c| c as u8)
        .collect()
}

#[test]
fn test_c_chars_to_bytes() {
    let mut chars = [0 as c_char; 16];
    for (i, b) in b"apfs".iter().enumerate() {
        chars[i] = *b as c_char;
    }
    assert_eq!(c_chars_to_bytes(&chars), b"apfs");
    assert!(c_chars_to_bytes(&[0; 4]).is_empty());
    // no NUL at all
    assert_eq!(c_chars_to_bytes(&[b'a' as c_char; 3]), b"aaa");
}
