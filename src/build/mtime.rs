//! Modification times, the only staleness signal.

use crate::error::{Result, RunError};
use std::fs::{self, File};
use std::path::Path;
use std::time::SystemTime;

pub fn get_time(path: &Path) -> Result<SystemTime> {
    fs::metadata(path)
        .and_then(|meta| meta.modified())
        .map_err(|e| RunError::io("access", path, e))
}

/// Only ownership is needed, not write permission.
pub fn set_time(path: &Path, mtime: SystemTime) -> Result<()> {
    File::open(path)
        .and_then(|file| file.set_modified(mtime))
        .map_err(|e| RunError::io("set time of", path, e))
}
