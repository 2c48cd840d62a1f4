use std::path::PathBuf;

/// Default limit, in UTF-16 chars, of the buffer receiving the
/// path names of a Windows volume (the max length of an extended path)
pub const DEFAULT_PATH_NAMES_LIMIT: usize = 32 * 1024;

#[derive(Debug, Clone)]
pub struct ReadOptions {
    /// On linux, the mount table to read, `/proc/mounts` when not set
    pub mount_table: Option<PathBuf>,
    /// On windows, the maximal size of the buffer receiving the
    /// path names of a volume
    pub path_names_limit: usize,
}
impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            mount_table: None,
            path_names_limit: DEFAULT_PATH_NAMES_LIMIT,
        }
    }
}
impl ReadOptions {
    pub fn mount_table<P: Into<PathBuf>>(
        mut self,
        v: P,
    ) -> Self {
        self.mount_table = Some(v.into());
        self
    }
    pub fn path_names_limit(
        mut self,
        v: usize,
    ) -> Self {
        self.path_names_limit = v;
        self
    }
}

#[test]
fn test_builder() {
    let options = ReadOptions::default();
    assert_eq!(options.mount_table, None);
    assert_eq!(options.path_names_limit, DEFAULT_PATH_NAMES_LIMIT);
    let options = options.mount_table("/proc/self/mounts").path_names_limit(1024);
    assert_eq!(options.mount_table, Some(PathBuf::from("/proc/self/mounts")));
    assert_eq!(options.path_names_limit, 1024);
}
