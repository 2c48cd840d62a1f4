use {
    crate::{
        error::*,
        sys,
        volume::*,
    },
    snafu::prelude::*,
    std::io,
    windows::{
        Win32::{
            Foundation::{
                ERROR_MORE_DATA,
                ERROR_NO_MORE_FILES,
                HANDLE,
                MAX_PATH,
            },
            Storage::FileSystem::{
                FindFirstVolumeW,
                FindNextVolumeW,
                FindVolumeClose,
                GetVolumeInformationW,
                GetVolumePathNamesForVolumeNameW,
                QueryDosDeviceW,
            },
        },
        core::PCWSTR,
    },
};

/// convert an error of the windows crate into the io::Error
/// holding the win32 code, when there's one
pub fn to_io_error(error: windows::core::Error) -> io::Error {
    // HRESULT_FROM_WIN32 gives 0x8007XXXX
    let hresult = error.code().0 as u32;
    if hresult & 0xFFFF_0000 == 0x8007_0000 {
        io::Error::from_raw_os_error((hresult & 0xFFFF) as i32)
    } else {
        io::Error::other(error.to_string())
    }
}

/// A volume search handle, closed on drop
struct VolumeSearch(HANDLE);

impl Drop for VolumeSearch {
    fn drop(&mut self) {
        if let Err(e) = unsafe { FindVolumeClose(self.0) } {
            log::warn!("FindVolumeClose failed: {e}");
        }
    }
}

/// List the names of all the volumes of the system
pub fn find_volumes() -> Result<Vec<VolumeName>> {
    let mut buffer = [0u16; MAX_PATH as usize + 1];
    let search = unsafe { FindFirstVolumeW(&mut buffer) }
        .map(VolumeSearch)
        .map_err(to_io_error)
        .context(AcquisitionFailedSnafu {
            api: "FindFirstVolumeW",
        })?;
    let mut names = Vec::new();
    loop {
        // an early return here still closes the search
        names.push(VolumeName::from_null_terminated(&buffer)?);
        match unsafe { FindNextVolumeW(search.0, &mut buffer) } {
            Ok(()) => {}
            Err(error) if error.code() == ERROR_NO_MORE_FILES.to_hresult() => break,
            Err(error) => {
                return Err(to_io_error(error)).context(AcquisitionFailedSnafu {
                    api: "FindNextVolumeW",
                });
            }
        }
    }
    Ok(names)
}

#[derive(Debug)]
pub struct VolumeInformation {
    pub label: String,
    pub serial_number: u32,
    pub max_component_length: u32,
    pub flags: u32,
    pub file_system_name: String,
}

#[derive(Debug)]
pub struct Volume {
    pub name: VolumeName,
}

impl Volume {
    pub fn new(name: VolumeName) -> Self {
        Self { name }
    }

    /// The NT device the volume is mapped to, eg `\Device\HarddiskVolume3`.
    ///
    /// May be empty when the volume has no DOS device mapping
    pub fn device_name(&self) -> Result<String> {
        let dos_device = self.name.dos_device_to_wide();
        let mut buffer = vec![0u16; MAX_PATH as usize + 1];
        let len = unsafe { QueryDosDeviceW(PCWSTR(dos_device.as_ptr()), Some(&mut buffer)) };
        if len == 0 {
            let error = sys::last_os_error();
            if error.raw_os_error() != Some(ERROR_NO_MORE_FILES.0 as i32) {
                return Err(error).context(StageFailedSnafu {
                    stage: Stage::DeviceName,
                    target: self.name.as_str(),
                });
            }
            log::debug!("no DOS device for {}", self.name);
        }
        Ok(parse_multi_string(&buffer)
            .into_iter()
            .next()
            .unwrap_or_default())
    }

    /// The paths the volume is mounted on (drive letters and folders)
    pub fn path_names(
        &self,
        limit: usize,
    ) -> Result<Vec<String>> {
        let name = self.name.to_wide();
        let mut char_count = MAX_PATH as usize + 1;
        loop {
            let mut buffer = vec![0u16; char_count];
            let mut returned: u32 = 0;
            match unsafe {
                GetVolumePathNamesForVolumeNameW(
                    PCWSTR(name.as_ptr()),
                    Some(&mut buffer),
                    &mut returned,
                )
            } {
                Ok(()) => {
                    let end = (returned as usize).min(buffer.len());
                    return Ok(parse_multi_string(&buffer[..end]));
                }
                Err(error) if error.code() == ERROR_MORE_DATA.to_hresult() => {
                    char_count = next_buffer_len(char_count, returned as usize, limit)
                        .context(BufferLimitExceededSnafu {
                            target: self.name.as_str(),
                            limit,
                        })?;
                    log::trace!("retrying path names of {} with {char_count} chars", self.name);
                }
                Err(error) => {
                    return Err(to_io_error(error)).context(StageFailedSnafu {
                        stage: Stage::PathNames,
                        target: self.name.as_str(),
                    });
                }
            }
        }
    }
}

/// Query the information of the volume mounted at `path`
pub fn volume_information(path: &str) -> Result<VolumeInformation> {
    // the max supported buffer size for GetVolumeInformationW
    const BUFFER_SIZE: usize = (MAX_PATH + 1) as usize;

    let root = to_wide(path);
    let mut serial_number: u32 = 0;
    let mut max_component_length: u32 = 0;
    let mut flags: u32 = 0;
    let mut label_buffer = [0u16; BUFFER_SIZE];
    let mut file_system_name_buffer = [0u16; BUFFER_SIZE];

    unsafe {
        GetVolumeInformationW(
            PCWSTR(root.as_ptr()),
            Some(&mut label_buffer),
            Some(&mut serial_number),
            Some(&mut max_component_length),
            Some(&mut flags),
            Some(&mut file_system_name_buffer),
        )
    }
    .map_err(to_io_error)
    .context(StageFailedSnafu {
        stage: Stage::VolumeInformation,
        target: path,
    })?;

    Ok(VolumeInformation {
        label: from_wide_null_terminated(&label_buffer),
        serial_number,
        max_component_length,
        flags,
        file_system_name: from_wide_null_terminated(&file_system_name_buffer),
    })
}
