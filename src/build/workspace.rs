//! Where the compiler and linker run, and what gets cleaned up afterwards.
//!
//! - In place: the script's own interpreter line is commented out for the
//!   duration of the compile and the tools run in the script's directory.
//! - Scratch: a commented copy is compiled inside a temporary directory and
//!   the script itself is never written.

use super::marker;
use super::mtime;
use super::script::{Artifact, Script};
use crate::config::BuildMode;
use crate::error::{Result, RunError};
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tempfile::TempDir;

pub struct Workspace {
    dir: PathBuf,
    source_name: OsString,
    object_name: String,
    kind: Kind,
}

enum Kind {
    InPlace {
        script: PathBuf,
        /// Set while the script's `#!` is commented out
        toggled: bool,
    },
    Scratch(TempDir),
}

impl Workspace {
    pub fn prepare(script: &Script, mode: BuildMode, object_name: String) -> Result<Self> {
        match mode {
            BuildMode::InPlace => {
                let toggled = marker::has_interpreter_line(script.path())?;
                if toggled {
                    marker::comment(script.path(), true)?;
                }
                Ok(Self {
                    dir: script.dir().to_path_buf(),
                    source_name: script.file_name().to_os_string(),
                    object_name,
                    kind: Kind::InPlace {
                        script: script.path().to_path_buf(),
                        toggled,
                    },
                })
            }
            BuildMode::Scratch => {
                let tmp = tempfile::Builder::new()
                    .prefix("goscript-")
                    .tempdir()
                    .map_err(|e| RunError::io("create", std::env::temp_dir(), e))?;
                marker::copy_commented(script.path(), &tmp.path().join(script.file_name()))?;
                Ok(Self {
                    dir: tmp.path().to_path_buf(),
                    source_name: script.file_name().to_os_string(),
                    object_name,
                    kind: Kind::Scratch(tmp),
                })
            }
        }
    }

    /// Working directory for the compiler and linker. Empty for a bare
    /// script name; see [`Invocation::current_dir`](crate::process::Invocation::current_dir).
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn source_name(&self) -> &OsStr {
        &self.source_name
    }

    pub fn object_name(&self) -> &str {
        &self.object_name
    }

    pub fn object_path(&self) -> PathBuf {
        self.dir.join(&self.object_name)
    }

    /// Linker output argument, valid from inside [`Workspace::dir`].
    pub fn artifact_arg(&self, artifact: &Artifact) -> Result<OsString> {
        match &self.kind {
            Kind::InPlace { .. } => Ok(artifact.file_name().to_os_string()),
            Kind::Scratch(_) => std::path::absolute(artifact.path())
                .map(PathBuf::into_os_string)
                .map_err(|e| RunError::io("resolve", artifact.path(), e)),
        }
    }

    /// Put the interpreter line back and undo the time change that caused.
    pub fn restore(&mut self, source_mtime: SystemTime) -> Result<()> {
        if let Kind::InPlace { script, toggled } = &mut self.kind {
            if *toggled {
                marker::comment(script, false)?;
                *toggled = false;
                mtime::set_time(script, source_mtime)?;
            }
        }
        Ok(())
    }

    /// Remove the intermediate object and any scratch files. A missing
    /// object is fine; the compiler may have failed before writing it.
    pub fn cleanup(self) -> Result<()> {
        let object = self.object_path();
        match fs::remove_file(&object) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(RunError::io("remove", object, e)),
        }

        if let Kind::Scratch(tmp) = self.kind {
            let path = tmp.path().to_path_buf();
            tmp.close().map_err(|e| RunError::io("remove", path, e))?;
        }
        Ok(())
    }
}
