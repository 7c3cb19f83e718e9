use tracing::debug;

use crate::error::CollectError;
use crate::hardware::sources::VolumeSource;
use crate::hardware::types::{DiskEntry, Section, SectionKind, VolumeCapacity};

const GB: u64 = 1024 * 1024 * 1024;

/// File systems that are remote or not backed by a local disk.
const NON_LOCAL_FILE_SYSTEMS: &[&str] = &[
    "nfs", "nfs4", "cifs", "smb", "smb3", "smbfs", "sshfs", "9p", "afs", "ceph", "glusterfs",
    "davfs", "tmpfs", "devtmpfs", "ramfs", "overlay", "squashfs", "proc", "sysfs", "autofs",
];

/// Entry point: one line per local fixed volume.
pub fn collect_disks(source: &dyn VolumeSource) -> Result<Section, CollectError> {
    let mut section = Section::new(SectionKind::Disk);

    for disk in source.volumes()?.iter().filter(|d| is_local_fixed(d)) {
        section.push(render_volume(disk));
    }

    Ok(section)
}

pub fn is_local_fixed(disk: &DiskEntry) -> bool {
    if disk.removable {
        return false;
    }
    let fs = disk.file_system.to_lowercase();
    !(NON_LOCAL_FILE_SYSTEMS.contains(&fs.as_str()) || fs.starts_with("fuse"))
}

fn render_volume(disk: &DiskEntry) -> String {
    match &disk.capacity {
        VolumeCapacity::Bytes { total, free } if free <= total => format!(
            "{} ({}) - Total: {} GB, Free: {} GB",
            disk.device,
            disk.mount_point,
            total / GB,
            free / GB
        ),
        VolumeCapacity::Bytes { total, free } => {
            debug!(device = %disk.device, total, free, "inconsistent capacity");
            format!(
                "Error reading {}: free space {} exceeds capacity {}",
                disk.device, free, total
            )
        }
        VolumeCapacity::Unreadable(reason) => {
            format!("Error reading {}: {}", disk.device, reason)
        }
    }
}
