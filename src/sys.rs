use std::io;

/// the most recent error reported by the OS for the current thread
/// (errno on unix, GetLastError on windows).
///
/// Must be called right after the failing call, before anything
/// else has a chance to overwrite it.
pub fn last_os_error() -> io::Error {
    let err = io::Error::last_os_error();
    log::trace!("last os error: {:?}", err.raw_os_error());
    err
}

/// decode the escapes of a mount table field, working on bytes as
/// paths don't have to be valid UTF-8.
///
/// As getmntent(3), only `\040` (space), `\011` (tab), `\012` (newline),
/// `\134` and `\\` (backslash) are decoded, anything else is kept as is.
/// For example `/media/dys/USB DISK` is present as `/media/dys/USB\040DISK`.
#[cfg(any(target_os = "linux", target_os = "android"))]
pub fn decode_escapes(field: &[u8]) -> Vec<u8> {
    let mut decoded = Vec::with_capacity(field.len());
    let mut i = 0;
    while i < field.len() {
        if field[i] == b'\\' {
            let (byte, len) = match &field[i + 1..] {
                [b'0', b'4', b'0', ..] => (Some(b' '), 4),
                [b'0', b'1', b'1', ..] => (Some(b'\t'), 4),
                [b'0', b'1', b'2', ..] => (Some(b'\n'), 4),
                [b'1', b'3', b'4', ..] => (Some(b'\\'), 4),
                [b'\\', ..] => (Some(b'\\'), 2),
                _ => (None, 1),
            };
            if let Some(byte) = byte {
                decoded.push(byte);
                i += len;
                continue;
            }
        }
        decoded.push(field[i]);
        i += 1;
    }
    decoded
}

#[cfg(any(target_os = "linux", target_os = "android"))]
#[test]
fn test_decode_escapes() {
    assert_eq!(decode_escapes(br"/media/dys/USB\040DISK"), b"/media/dys/USB DISK");
    assert_eq!(decode_escapes(br"a\011b\134c\012"), b"a\tb\\c\n");
    assert_eq!(decode_escapes(br"a\\b"), br"a\b");
    assert_eq!(decode_escapes(b"/home"), b"/home");
    // unknown or truncated escapes are kept
    assert_eq!(decode_escapes(br"x\377"), br"x\377");
    assert_eq!(decode_escapes(br"x\04"), br"x\04");
    assert_eq!(decode_escapes(br"x\"), br"x\");
    // not UTF-8, kept as is
    assert_eq!(decode_escapes(b"caf\xe9\\040"), b"caf\xe9 ");
}

#[test]
fn test_last_os_error_is_os_error() {
    // whatever the value, it must come from the OS
    assert!(last_os_error().raw_os_error().is_some());
}
