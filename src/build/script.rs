use crate::error::{Result, RunError};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Extension a script must carry to be compiled.
pub const SCRIPT_EXTENSION: &str = "go";

/// Extension of the cached executable.
pub const ARTIFACT_EXTENSION: &str = "gosc";

/// A source file handed to us on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    path: PathBuf,
    file_name: OsString,
}

impl Script {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file_name = path
            .file_name()
            .ok_or_else(|| {
                RunError::Configuration(format!("Not a script file: {}", path.display()))
            })?
            .to_os_string();
        Ok(Self { path, file_name })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the script; empty for a bare file name.
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }

    pub fn file_name(&self) -> &OsStr {
        &self.file_name
    }

    pub fn validate_extension(&self) -> Result<()> {
        if self.path.extension() == Some(OsStr::new(SCRIPT_EXTENSION)) {
            Ok(())
        } else {
            Err(RunError::Configuration(format!(
                "Wrong extension! It has to be \".{}\"",
                SCRIPT_EXTENSION
            )))
        }
    }

    /// The hidden executable cached next to this script.
    pub fn artifact(&self) -> Artifact {
        let stem = Path::new(&self.file_name)
            .file_stem()
            .unwrap_or(self.file_name.as_os_str());
        let mut file_name = OsString::from(".");
        file_name.push(stem);
        file_name.push(".");
        file_name.push(ARTIFACT_EXTENSION);

        let dir = match self.dir() {
            d if d.as_os_str().is_empty() => Path::new("."),
            d => d,
        };

        Artifact {
            path: dir.join(&file_name),
            file_name,
        }
    }
}

/// The compiled executable paired with a [`Script`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    path: PathBuf,
    file_name: OsString,
}

impl Artifact {
    /// Always has a directory component, so it is never looked up on `PATH`.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> &OsStr {
        &self.file_name
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }
}
