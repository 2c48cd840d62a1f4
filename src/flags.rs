/// An ordered list of (bit, option name) pairs used to turn the flag
/// word of a mounted file system into option names.
///
/// Table order is output order. A bit mapped to an empty name is
/// recognized but doesn't produce any option.
#[derive(Debug, Clone, Copy)]
pub struct FlagTable(pub &'static [(u64, &'static str)]);

impl FlagTable {
    pub fn decode(
        &self,
        flags: u64,
    ) -> Vec<String> {
        decode_flags(flags, self.0)
    }
}

/// return the names of the table entries whose bits are all set in `flags`
pub fn decode_flags(
    flags: u64,
    table: &[(u64, &str)],
) -> Vec<String> {
    table
        .iter()
        .filter(|(bit, _)| flags & bit == *bit)
        .filter(|(_, name)| !name.is_empty())
        .map(|(_, name)| name.to_string())
        .collect()
}

/// Mount flags of `statfs.f_flags` on macOS and iOS.
///
/// Values come from `bsd/sys/mount.h` in darwin-xnu.
pub static MACOS_MOUNT_FLAGS: FlagTable = FlagTable(&[
    (0x0000_0001, "ro"),          // MNT_RDONLY
    (0x0000_0002, "sync"),        // MNT_SYNCHRONOUS
    (0x0000_0004, "noexec"),      // MNT_NOEXEC
    (0x0000_0008, "nosuid"),      // MNT_NOSUID
    (0x0000_0010, "nodev"),       // MNT_NODEV
    (0x0000_0020, "union"),       // MNT_UNION
    (0x0000_0040, "async"),       // MNT_ASYNC
    (0x0000_0080, "cprotect"),    // MNT_CPROTECT
    (0x0000_0100, "exported"),    // MNT_EXPORTED
    (0x0000_0400, "quarantined"), // MNT_QUARANTINE
    (0x0000_1000, "local"),       // MNT_LOCAL
    (0x0000_2000, "quota"),       // MNT_QUOTA
    (0x0000_4000, "rootfs"),      // MNT_ROOTFS
    (0x0000_8000, "volfs"),       // MNT_DOVOLFS
    (0x0010_0000, "nobrowse"),    // MNT_DONTBROWSE
    (0x0020_0000, ""),            // MNT_IGNORE_OWNERSHIP
    (0x0040_0000, "automounted"), // MNT_AUTOMOUNTED
    (0x0080_0000, "journaled"),   // MNT_JOURNALED
    (0x0100_0000, "nouserxattr"), // MNT_NOUSERXATTR
    (0x0200_0000, "deferwrite"),  // MNT_DEFWRITE
    (0x0400_0000, "multilabel"),  // MNT_MULTILABEL
    (0x1000_0000, "noatime"),     // MNT_NOATIME
]);

/// Mount flags of `statfs.f_flags` on FreeBSD
pub static FREEBSD_MOUNT_FLAGS: FlagTable = FlagTable(&[
    (0x0000_0001, "ro"),          // MNT_RDONLY
    (0x0000_0002, "sync"),        // MNT_SYNCHRONOUS
    (0x0000_0004, "noexec"),      // MNT_NOEXEC
    (0x0000_0008, "nosuid"),      // MNT_NOSUID
    (0x0000_0020, "union"),       // MNT_UNION
    (0x0000_0040, "async"),       // MNT_ASYNC
    (0x0000_0100, "exported"),    // MNT_EXPORTED
    (0x0000_1000, "local"),       // MNT_LOCAL
    (0x0000_2000, "quota"),       // MNT_QUOTA
    (0x0000_4000, "rootfs"),      // MNT_ROOTFS
    (0x0000_8000, "user"),        // MNT_USER
    (0x0010_0000, "suiddir"),     // MNT_SUIDDIR
    (0x0020_0000, "softdep"),     // MNT_SOFTDEP
    (0x0040_0000, "nosymfollow"), // MNT_NOSYMFOLLOW
    (0x0200_0000, "gjournal"),    // MNT_GJOURNAL
    (0x0400_0000, "multilabel"),  // MNT_MULTILABEL
    (0x0800_0000, "acls"),        // MNT_ACLS
    (0x1000_0000, "noatime"),     // MNT_NOATIME
    (0x4000_0000, "noclusterr"),  // MNT_NOCLUSTERR
    (0x8000_0000, "noclusterw"),  // MNT_NOCLUSTERW
]);

/// Mount flags of `statfs.f_flags` on DragonFly, where 0x10 and 0x20
/// don't mean the same as on FreeBSD
pub static DRAGONFLY_MOUNT_FLAGS: FlagTable = FlagTable(&[
    (0x0000_0001, "ro"),          // MNT_RDONLY
    (0x0000_0002, "sync"),        // MNT_SYNCHRONOUS
    (0x0000_0004, "noexec"),      // MNT_NOEXEC
    (0x0000_0008, "nosuid"),      // MNT_NOSUID
    (0x0000_0010, "nodev"),       // MNT_NODEV
    (0x0000_0020, "automounted"), // MNT_AUTOMOUNTED
    (0x0000_0040, "async"),       // MNT_ASYNC
    (0x0000_0100, "exported"),    // MNT_EXPORTED
    (0x0000_1000, "local"),       // MNT_LOCAL
    (0x0000_2000, "quota"),       // MNT_QUOTA
    (0x0000_4000, "rootfs"),      // MNT_ROOTFS
    (0x0000_8000, "user"),        // MNT_USER
    (0x0010_0000, "suiddir"),     // MNT_SUIDDIR
    (0x0020_0000, "softdep"),     // MNT_SOFTDEP
    (0x0040_0000, "nosymfollow"), // MNT_NOSYMFOLLOW
    (0x0100_0000, "trim"),        // MNT_TRIM
    (0x1000_0000, "noatime"),     // MNT_NOATIME
    (0x4000_0000, "noclusterr"),  // MNT_NOCLUSTERR
    (0x8000_0000, "noclusterw"),  // MNT_NOCLUSTERW
]);

/// File system flags returned by `GetVolumeInformationW`.
///
/// Values come from `winnt.h`.
pub static WINDOWS_VOLUME_FLAGS: FlagTable = FlagTable(&[
    (0x0000_0002, "preserved-case"),   // FILE_CASE_PRESERVED_NAMES
    (0x0000_0001, "case-sensitive"),   // FILE_CASE_SENSITIVE_SEARCH
    (0x0000_0010, "file-compression"), // FILE_FILE_COMPRESSION
    (0x0004_0000, "named-streams"),    // FILE_NAMED_STREAMS
    (0x0000_0008, "acl"),              // FILE_PERSISTENT_ACLS
    (0x0008_0000, "ro"),               // FILE_READ_ONLY_VOLUME
    (0x0010_0000, "seq-write"),        // FILE_SEQUENTIAL_WRITE_ONCE
    (0x0002_0000, "encryption"),       // FILE_SUPPORTS_ENCRYPTION
    (0x0080_0000, "ext-attrs"),        // FILE_SUPPORTS_EXTENDED_ATTRIBUTES
    (0x0040_0000, "hard-links"),       // FILE_SUPPORTS_HARD_LINKS
    (0x0001_0000, "obj-ids"),          // FILE_SUPPORTS_OBJECT_IDS
    (0x0100_0000, "open-by-file-id"),  // FILE_SUPPORTS_OPEN_BY_FILE_ID
    (0x0000_0080, "reparse-points"),   // FILE_SUPPORTS_REPARSE_POINTS
    (0x0000_0040, "sparse"),           // FILE_SUPPORTS_SPARSE_FILES
    (0x0020_0000, "trans"),            // FILE_SUPPORTS_TRANSACTIONS
    (0x0200_0000, "usn"),              // FILE_SUPPORTS_USN_JOURNAL
    (0x0000_0004, "unicode"),          // FILE_UNICODE_ON_DISK
    (0x0000_8000, "compressed"),       // FILE_VOLUME_IS_COMPRESSED
    (0x0000_0020, "quota"),            // FILE_VOLUME_QUOTAS
]);

#[cfg(test)]
mod tests {
    use {
        super::*,
        proptest::prelude::*,
    };

    static TABLES: [&FlagTable; 4] = [
        &MACOS_MOUNT_FLAGS,
        &FREEBSD_MOUNT_FLAGS,
        &DRAGONFLY_MOUNT_FLAGS,
        &WINDOWS_VOLUME_FLAGS,
    ];

    #[test]
    fn zero_decodes_to_nothing() {
        for table in TABLES {
            assert!(table.decode(0).is_empty());
        }
    }

    #[test]
    fn options_follow_table_order() {
        // MNT_NOATIME | MNT_LOCAL | MNT_RDONLY
        assert_eq!(
            MACOS_MOUNT_FLAGS.decode(0x1000_1001),
            vec!["ro", "local", "noatime"],
        );
        // FILE_READ_ONLY_VOLUME | FILE_CASE_SENSITIVE_SEARCH | FILE_CASE_PRESERVED_NAMES
        assert_eq!(
            WINDOWS_VOLUME_FLAGS.decode(0x0008_0003),
            vec!["preserved-case", "case-sensitive", "ro"],
        );
    }

    #[test]
    fn bsd_tables_differ_on_low_bits() {
        // MNT_NODEV | MNT_AUTOMOUNTED on DragonFly, MNT_NFS4ACLS | MNT_UNION on FreeBSD
        assert_eq!(DRAGONFLY_MOUNT_FLAGS.decode(0x30), vec!["nodev", "automounted"]);
        assert_eq!(FREEBSD_MOUNT_FLAGS.decode(0x30), vec!["union"]);
    }

    #[test]
    fn empty_names_are_skipped() {
        // MNT_IGNORE_OWNERSHIP alone
        assert!(MACOS_MOUNT_FLAGS.decode(0x0020_0000).is_empty());
        // MNT_IGNORE_OWNERSHIP | MNT_JOURNALED
        assert_eq!(MACOS_MOUNT_FLAGS.decode(0x00A0_0000), vec!["journaled"]);
    }

    #[test]
    fn unknown_bits_are_ignored() {
        // MNT_REMOVABLE isn't in the table
        assert_eq!(MACOS_MOUNT_FLAGS.decode(0x0000_0201), vec!["ro"]);
    }

    #[test]
    fn multi_bit_entries_need_all_bits() {
        let table = [(0b11, "both"), (0b01, "low")];
        assert_eq!(decode_flags(0b01, &table), vec!["low"]);
        assert_eq!(decode_flags(0b11, &table), vec!["both", "low"]);
    }

    proptest! {
        #[test]
        fn decoding_is_deterministic(flags in any::<u64>()) {
            for table in TABLES {
                prop_assert_eq!(table.decode(flags), table.decode(flags));
            }
        }

        #[test]
        fn each_set_named_bit_appears_once_in_table_order(flags in any::<u64>()) {
            for table in TABLES {
                let expected: Vec<&str> = table
                    .0
                    .iter()
                    .filter(|(bit, name)| flags & bit == *bit && !name.is_empty())
                    .map(|(_, name)| *name)
                    .collect();
                let options = table.decode(flags);
                prop_assert_eq!(&options, &expected);
                for option in &options {
                    prop_assert!(!option.is_empty());
                    prop_assert_eq!(options.iter().filter(|o| *o == option).count(), 1);
                }
            }
        }
    }
}
