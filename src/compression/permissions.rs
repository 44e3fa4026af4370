use std::fs::{File, Metadata};

/// Mode stored for input that has no file behind it (standard input).
pub const DEFAULT_PERMISSIONS: u16 = 0o600;

/// The low 16 bits of the file mode, as stored in the header.
#[cfg(unix)]
pub fn file_permissions(meta: &Metadata) -> u16 {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode() as u16
}

#[cfg(not(unix))]
pub fn file_permissions(_meta: &Metadata) -> u16 {
    DEFAULT_PERMISSIONS
}

/// Give an output file the permission bits recorded in a header. Only the rwx bits are applied:
/// file type, setuid, setgid and sticky bits from the header are dropped.
#[cfg(unix)]
pub fn apply_permissions(file: &File, mode: u16) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(std::fs::Permissions::from_mode(u32::from(mode) & 0o777))
}

#[cfg(not(unix))]
pub fn apply_permissions(_file: &File, _mode: u16) -> std::io::Result<()> {
    Ok(())
}
