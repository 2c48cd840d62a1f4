mod mount_entries;

pub use mount_entries::{
    MountEntries,
    MountEntry,
};

use {
    crate::{
        error::*,
        FileSystem,
        ReadOptions,
    },
    std::path::Path,
};

/// the live mount table of the kernel
pub const MOUNT_TABLE: &str = "/proc/mounts";

/// Read all the file systems listed in the mount table at `path`
pub fn read_file_systems_from(path: &Path) -> Result<Vec<FileSystem>> {
    let mut file_systems = Vec::new();
    for entry in MountEntries::open(path)? {
        let entry = entry?;
        let options = entry.options();
        let MountEntry {
            fsname,
            dir,
            fs_type,
            ..
        } = entry;
        file_systems.push(FileSystem {
            name: fsname,
            path: dir,
            fs_type,
            options,
        });
    }
    log::debug!(
        "read {} mounted file systems from {}",
        file_systems.len(),
        path.display()
    );
    Ok(file_systems)
}

/// Read all the mounted file systems
pub fn read_file_systems(options: &ReadOptions) -> Result<Vec<FileSystem>> {
    let path = options
        .mount_table
        .as_deref()
        .unwrap_or_else(|| Path::new(MOUNT_TABLE));
    read_file_systems_from(path)
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        std::{
            io::Write,
            path::PathBuf,
        },
    };

    #[test]
    fn test_read_file_systems_from() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "/dev/sda1 / ext4 rw,relatime,errors=remount-ro 0 0").unwrap();
        writeln!(file, "server:/export /mnt/nfs nfs4 ro,vers=4.2,addr=10.0.0.2 0 0").unwrap();
        let file_systems = read_file_systems_from(file.path()).unwrap();
        assert_eq!(
            file_systems,
            vec![
                FileSystem {
                    name: "/dev/sda1".to_string(),
                    path: PathBuf::from("/"),
                    fs_type: "ext4".to_string(),
                    options: vec![
                        "rw".to_string(),
                        "relatime".to_string(),
                        "errors=remount-ro".to_string(),
                    ],
                },
                FileSystem {
                    name: "server:/export".to_string(),
                    path: PathBuf::from("/mnt/nfs"),
                    fs_type: "nfs4".to_string(),
                    options: vec![
                        "ro".to_string(),
                        "vers=4.2".to_string(),
                        "addr=10.0.0.2".to_string(),
                    ],
                },
            ],
        );
        assert!(file_systems[1].is_read_only());
    }

    #[test]
    fn test_escaped_option_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r"overlay /merged\040dir overlay rw,lowerdir=/lower\040dir,upperdir=/up 0 0"
        )
        .unwrap();
        let file_systems = read_file_systems_from(file.path()).unwrap();
        assert_eq!(file_systems.len(), 1);
        assert_eq!(file_systems[0].path, PathBuf::from("/merged dir"));
        assert_eq!(file_systems[0].option_value("lowerdir"), Some("/lower dir"));
        assert_eq!(file_systems[0].option_value("upperdir"), Some("/up"));
    }

    #[test]
    fn test_malformed_table_fails_whole_read() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "/dev/sda1 / ext4 rw 0 0").unwrap();
        writeln!(file, "garbage").unwrap();
        assert!(matches!(
            read_file_systems_from(file.path()),
            Err(Error::MalformedMountEntry { .. }),
        ));
    }

    #[test]
    fn test_empty_table() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(read_file_systems_from(file.path()).unwrap().is_empty());
    }

    #[test]
    fn test_read_options_mount_table() {
        let dir = tempfile::tempdir().unwrap();
        let options = ReadOptions::default().mount_table(dir.path().join("nope"));
        match read_file_systems(&options) {
            Err(Error::AcquisitionFailed { source, .. }) => {
                assert_eq!(source.raw_os_error(), Some(libc::ENOENT));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
