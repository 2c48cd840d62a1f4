use {
    crate::{
        error::*,
        sys,
    },
    snafu::prelude::*,
    std::{
        ffi::OsString,
        fs::File,
        io::{
            BufRead,
            BufReader,
        },
        os::unix::ffi::OsStringExt,
        path::{
            Path,
            PathBuf,
        },
    },
};

/// An entry of a mount table, with the fields of `struct mntent`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountEntry {
    pub fsname: String,
    pub dir: PathBuf,
    pub fs_type: String,
    pub opts: String,
}

impl MountEntry {
    /// Parse a line of a mount table (`man 5 fstab`).
    ///
    /// Return `None` for lines which aren't entries (blank or comment).
    /// Escapes are decoded in all fields, and the mount point keeps
    /// its bytes even when they're not valid UTF-8.
    pub fn parse<L: AsRef<[u8]>>(line: L) -> Result<Option<Self>> {
        let line = line.as_ref();
        let is_blank = |b: &u8| *b == b' ' || *b == b'\t';
        let start = line.iter().position(|b| !is_blank(b)).unwrap_or(line.len());
        let line = &line[start..];
        if line.is_empty() || line[0] == b'#' {
            return Ok(None);
        }
        let mut tokens = line.split(is_blank).filter(|t| !t.is_empty());
        let (Some(fsname), Some(dir), Some(fs_type)) = (tokens.next(), tokens.next(), tokens.next())
        else {
            return MalformedMountEntrySnafu {
                line: String::from_utf8_lossy(line),
            }
            .fail();
        };
        let opts = tokens.next().unwrap_or(&[]);
        Ok(Some(Self {
            fsname: decode_text(fsname),
            dir: PathBuf::from(OsString::from_vec(sys::decode_escapes(dir))),
            fs_type: decode_text(fs_type),
            opts: decode_text(opts),
        }))
    }

    /// the comma separated options, as given
    pub fn options(&self) -> Vec<String> {
        self.opts.split(',').map(str::to_string).collect()
    }
}

fn decode_text(field: &[u8]) -> String {
    String::from_utf8_lossy(&sys::decode_escapes(field)).into_owned()
}

/// A reader of mount entries, releasing the underlying file when dropped
pub struct MountEntries {
    reader: BufReader<File>,
    buf: Vec<u8>,
}

impl MountEntries {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).context(AcquisitionFailedSnafu { api: "open" })?;
        Ok(Self {
            reader: BufReader::new(file),
            buf: Vec::new(),
        })
    }
}

impl Iterator for MountEntries {
    type Item = Result<MountEntry>;
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(source) => {
                    return Some(Err(Error::AcquisitionFailed { source, api: "read" }));
                }
            }
            let mut line = &self.buf[..];
            while let [rest @ .., b'\n' | b'\r'] = line {
                line = rest;
            }
            match MountEntry::parse(line) {
                Ok(Some(entry)) => return Some(Ok(entry)),
                Ok(None) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        std::{
            io::Write,
            os::unix::ffi::OsStrExt,
        },
    };

    #[test]
    fn test_parse_entry() {
        let entry = MountEntry::parse("/dev/sda1 / ext4 rw,relatime,errors=remount-ro 0 0")
            .unwrap()
            .unwrap();
        assert_eq!(entry.fsname, "/dev/sda1");
        assert_eq!(entry.dir, PathBuf::from("/"));
        assert_eq!(entry.fs_type, "ext4");
        assert_eq!(entry.options(), vec!["rw", "relatime", "errors=remount-ro"]);
    }

    #[test]
    fn test_parse_escaped_entry() {
        let entry = MountEntry::parse("/dev/sdb1\t/media/dys/USB\\040DISK vfat rw,nosuid 0 0")
            .unwrap()
            .unwrap();
        assert_eq!(entry.dir, PathBuf::from("/media/dys/USB DISK"));
        assert_eq!(entry.fs_type, "vfat");
    }

    #[test]
    fn test_escaped_type_and_options() {
        let entry = MountEntry::parse(
            "overlay /merged overlay rw,lowerdir=/lower\\040dir,upperdir=/up 0 0",
        )
        .unwrap()
        .unwrap();
        assert_eq!(
            entry.options(),
            vec!["rw", "lowerdir=/lower dir", "upperdir=/up"],
        );
        let entry = MountEntry::parse("src /mnt fuse\\134x rw 0 0").unwrap().unwrap();
        assert_eq!(entry.fs_type, "fuse\\x");
    }

    #[test]
    fn test_non_utf8_mount_point() {
        let entry = MountEntry::parse(b"/dev/sdb1 /media/caf\xe9 vfat rw 0 0")
            .unwrap()
            .unwrap();
        assert_eq!(entry.dir.as_os_str().as_bytes(), b"/media/caf\xe9");
        let entry = MountEntry::parse(b"/dev/sdb1 /media/caf\xe9\\040x vfat rw 0 0")
            .unwrap()
            .unwrap();
        assert_eq!(entry.dir.as_os_str().as_bytes(), b"/media/caf\xe9 x");
    }

    #[test]
    fn test_empty_options() {
        let entry = MountEntry::parse("none /sys sysfs").unwrap().unwrap();
        assert_eq!(entry.opts, "");
        assert_eq!(entry.options(), vec![""]);
    }

    #[test]
    fn test_skipped_lines() {
        assert_eq!(MountEntry::parse("").unwrap(), None);
        assert_eq!(MountEntry::parse("   ").unwrap(), None);
        assert_eq!(MountEntry::parse("  # /dev/sda1 / ext4").unwrap(), None);
    }

    #[test]
    fn test_truncated_entry() {
        assert!(matches!(
            MountEntry::parse("/dev/sda1 /"),
            Err(Error::MalformedMountEntry { .. }),
        ));
    }

    #[test]
    fn test_read_entries() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "proc /proc proc rw,nosuid,nodev,noexec,relatime 0 0").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "tmpfs /run tmpfs rw,nosuid,nodev,size=1617412k,mode=755 0 0").unwrap();
        let entries: Vec<MountEntry> = MountEntries::open(file.path())
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].fsname, "proc");
        assert_eq!(entries[1].dir, PathBuf::from("/run"));
        assert_eq!(entries[1].opts, "rw,nosuid,nodev,size=1617412k,mode=755");
    }

    #[test]
    fn test_read_non_utf8_entries() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"/dev/sdb1 /media/caf\xe9 vfat rw 0 0\r\n").unwrap();
        let entries: Vec<MountEntry> = MountEntries::open(file.path())
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].dir.as_os_str().as_bytes(), b"/media/caf\xe9");
        assert_eq!(entries[0].options(), vec!["rw"]);
    }

    #[test]
    fn test_open_missing_table() {
        let dir = tempfile::tempdir().unwrap();
        let Err(err) = MountEntries::open(&dir.path().join("mounts")) else {
            panic!("a missing table can't be opened");
        };
        assert!(matches!(err, Error::AcquisitionFailed { api: "open", .. }));
        assert_eq!(
            err.os_error().and_then(std::io::Error::raw_os_error),
            Some(libc::ENOENT),
        );
    }
}
