use std::{
    fmt,
    io,
};

/// mounted error type
#[derive(Debug, snafu::Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Could not read the mount table with {api}: {source}"))]
    AcquisitionFailed {
        source: io::Error,
        api: &'static str,
    },

    #[snafu(display("Bad volume name: {name:?}"))]
    MalformedVolumeName { name: String },

    #[snafu(display("Failed to get the {stage} of {target}: {source}"))]
    StageFailed {
        source: io::Error,
        stage: Stage,
        target: String,
    },

    #[snafu(display("Path names of {target} don't fit in {limit} chars"))]
    BufferLimitExceeded { target: String, limit: usize },

    #[snafu(display("Unexpected mount entry: {line:?}"))]
    MalformedMountEntry { line: String },

    #[snafu(display("Listing mounted file systems isn't supported on {os}"))]
    Unsupported { os: &'static str },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// the error reported by the OS, when there's one
    pub fn os_error(&self) -> Option<&io::Error> {
        match self {
            Self::AcquisitionFailed { source, .. } | Self::StageFailed { source, .. } => {
                Some(source)
            }
            _ => None,
        }
    }
}

/// A step of the per-volume resolution done on Windows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    DeviceName,
    PathNames,
    VolumeInformation,
}

impl fmt::Display for Stage {
    fn fmt(
        &self,
        f: &mut fmt::Formatter,
    ) -> fmt::Result {
        let s = match self {
            Self::DeviceName => "device name",
            Self::PathNames => "volume path names",
            Self::VolumeInformation => "volume information",
        };
        f.write_str(s)
    }
}

#[test]
fn test_os_error() {
    let err = Error::AcquisitionFailed {
        source: io::Error::from_raw_os_error(13),
        api: "open",
    };
    assert_eq!(err.os_error().and_then(io::Error::raw_os_error), Some(13));
    let err = Error::MalformedVolumeName {
        name: r"C:\".to_string(),
    };
    assert!(err.os_error().is_none());
}

#[test]
fn test_stage_failed_display() {
    let err = Error::StageFailed {
        source: io::Error::from_raw_os_error(5),
        stage: Stage::DeviceName,
        target: r"\\?\Volume{abc}\".to_string(),
    };
    let message = err.to_string();
    assert!(message.starts_with(r"Failed to get the device name of \\?\Volume{abc}\: "));
}
