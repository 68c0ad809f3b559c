use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Append a suffix to the last path component, keeping any extension in place
pub fn append_to_path<P: AsRef<Path>>(base: P, suffix: &str) -> PathBuf {
    let mut name: OsString = base.as_ref().as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}
