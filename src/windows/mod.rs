mod volume;

pub use volume::{
    find_volumes,
    volume_information,
    Volume,
    VolumeInformation,
};

use {
    crate::{
        error::*,
        flags::WINDOWS_VOLUME_FLAGS,
        FileSystem,
        ReadOptions,
    },
    std::path::PathBuf,
};

/// Read all the mounted volumes.
///
/// A volume which isn't mounted on any path is skipped. When a volume
/// is mounted on several paths, only the first one is reported.
pub fn read_file_systems(options: &ReadOptions) -> Result<Vec<FileSystem>> {
    let volumes = find_volumes()?;
    log::debug!("found {} volumes", volumes.len());
    let mut file_systems = Vec::new();
    for volume in volumes.into_iter().map(Volume::new) {
        let device_name = volume.device_name()?;
        let path_names = volume.path_names(options.path_names_limit)?;
        let Some(path) = path_names.into_iter().next() else {
            log::debug!("volume {} isn't mounted", volume.name);
            continue;
        };
        let info = volume_information(&path)?;
        log::debug!(
            "volume {} label={:?} serial={:08X} max_component_length={}",
            volume.name,
            info.label,
            info.serial_number,
            info.max_component_length,
        );
        file_systems.push(FileSystem {
            name: device_name,
            path: PathBuf::from(path),
            fs_type: info.file_system_name,
            options: WINDOWS_VOLUME_FLAGS.decode(u64::from(info.flags)),
        });
    }
    Ok(file_systems)
}
