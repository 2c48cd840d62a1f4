use std::{
    fmt,
    path::PathBuf,
};

/// A mounted file system, as reported by the OS
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileSystem {
    /// the mounted device or source, eg "/dev/sda1", "tmpfs",
    /// or `\Device\HarddiskVolume3`
    pub name: String,
    /// where it's mounted
    pub path: PathBuf,
    /// type of the file system, eg "ext4", "apfs", "NTFS"
    pub fs_type: String,
    /// the mount options, in the order given by the OS
    /// or by the flag table of the platform
    pub options: Vec<String>,
}

impl FileSystem {
    /// tell whether the option is present, either as a
    /// simple flag or as `name=value`
    pub fn has_option(
        &self,
        name: &str,
    ) -> bool {
        self.options.iter().any(|o| option_name(o) == name)
    }
    /// return the value of the `name=value` option, if any
    pub fn option_value(
        &self,
        name: &str,
    ) -> Option<&str> {
        self.options.iter().find_map(|o| {
            o.split_once('=')
                .filter(|(n, _)| *n == name)
                .map(|(_, v)| v)
        })
    }
    /// the options, separated by commas
    pub fn options_string(&self) -> String {
        self.options.join(",")
    }
    pub fn is_read_only(&self) -> bool {
        self.has_option("ro")
    }
}

fn option_name(option: &str) -> &str {
    option.split_once('=').map_or(option, |(name, _)| name)
}

/// Format: `<name> on <path> type <type> (<options>)`
impl fmt::Display for FileSystem {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        write!(
            f,
            "{} on {} type {} ({})",
            self.name,
            self.path.display(),
            self.fs_type,
            self.options_string(),
        )
    }
}

#[cfg(test)]
fn sample() -> FileSystem {
    FileSystem {
        name: "/dev/sda1".to_string(),
        path: PathBuf::from("/"),
        fs_type: "ext4".to_string(),
        options: vec![
            "rw".to_string(),
            "relatime".to_string(),
            "errors=remount-ro".to_string(),
        ],
    }
}

#[test]
fn test_display() {
    assert_eq!(
        sample().to_string(),
        "/dev/sda1 on / type ext4 (rw,relatime,errors=remount-ro)",
    );
    let fs = FileSystem {
        options: Vec::new(),
        ..sample()
    };
    assert_eq!(fs.to_string(), "/dev/sda1 on / type ext4 ()");
}

#[allow(clippy::bool_assert_comparison)]
#[test]
fn test_options() {
    let fs = sample();
    assert_eq!(fs.has_option("rw"), true);
    assert_eq!(fs.has_option("errors"), true);
    assert_eq!(fs.has_option("noatime"), false);
    assert_eq!(fs.option_value("errors"), Some("remount-ro"));
    assert_eq!(fs.option_value("rw"), None);
    assert_eq!(fs.is_read_only(), false);
}
