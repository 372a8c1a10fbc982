//! External process execution.
//!
//! Every external step (compiler, linker, the cached binary itself) goes
//! through [`CommandRunner`]. The environment handed to children is an
//! explicit snapshot owned by [`ProcessRunner`], not read ambiently at
//! spawn time.

use crate::error::{Result, RunError};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

/// One command to spawn and wait for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    /// Name the child sees as its own argv[0]
    pub arg0: OsString,
    pub args: Vec<OsString>,
    /// Working directory; `None` inherits ours
    pub dir: Option<PathBuf>,
    pub stdin: StdinMode,
}

impl Invocation {
    /// argv[0] defaults to the program's file name.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        let program = program.into();
        let arg0 = program
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| program.clone().into_os_string());
        Self {
            program,
            arg0,
            args: Vec::new(),
            dir: None,
            stdin: StdinMode::Inherit,
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn current_dir(mut self, dir: Option<&Path>) -> Self {
        self.dir = dir
            .filter(|d| !d.as_os_str().is_empty())
            .map(Path::to_path_buf);
        self
    }

    pub fn stdin(mut self, stdin: StdinMode) -> Self {
        self.stdin = stdin;
        self
    }

    /// Space-joined argv for messages.
    pub fn display(&self) -> String {
        std::iter::once(&self.arg0)
            .chain(&self.args)
            .map(|a| a.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Spawns an invocation, waits for it and yields its exit status.
///
/// `Err` means the process could not be started or awaited. A process that
/// ran and returned non-zero is `Ok(code)`.
pub trait CommandRunner {
    fn run(&mut self, invocation: &Invocation) -> Result<i32>;
}

/// Where a child's standard input comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StdinMode {
    #[default]
    Inherit,
    Null,
}

/// Runs commands with the real OS. Stdout and stderr are always inherited.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    env: Vec<(OsString, OsString)>,
}

impl ProcessRunner {
    pub fn new(env: Vec<(OsString, OsString)>) -> Self {
        Self { env }
    }

    /// Snapshot of the current process environment.
    pub fn inherit() -> Self {
        Self::new(std::env::vars_os().collect())
    }

    fn command(&self, invocation: &Invocation) -> Command {
        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args);
        cmd.env_clear().envs(self.env.iter().map(|(k, v)| (k, v)));

        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            cmd.arg0(&invocation.arg0);
        }

        if let Some(dir) = &invocation.dir {
            cmd.current_dir(dir);
        }

        match invocation.stdin {
            StdinMode::Inherit => cmd.stdin(Stdio::inherit()),
            StdinMode::Null => cmd.stdin(Stdio::null()),
        };
        cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        cmd
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&mut self, invocation: &Invocation) -> Result<i32> {
        let mut child = self
            .command(invocation)
            .spawn()
            .map_err(|source| RunError::Launch {
                command: invocation.display(),
                source,
            })?;

        let status = child.wait().map_err(|source| RunError::Launch {
            command: invocation.display(),
            source,
        })?;

        Ok(exit_code(status))
    }
}

/// Exit code of a finished child. Signal deaths map to `128 + signal`.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invocation_defaults_arg0_to_file_name() {
        let inv = Invocation::new("/usr/lib/go/bin/6g")
            .arg("-o")
            .arg("_go_.6")
            .arg("hello.go");
        assert_eq!(inv.arg0, OsString::from("6g"));
        assert_eq!(inv.display(), "6g -o _go_.6 hello.go");
        assert_eq!(inv.dir, None);
    }

    #[test]
    fn test_empty_dir_means_inherit() {
        let inv = Invocation::new("6g").current_dir(Some(Path::new("")));
        assert_eq!(inv.dir, None);
        let inv = Invocation::new("6g").current_dir(Some(Path::new("scripts")));
        assert_eq!(inv.dir, Some(PathBuf::from("scripts")));
    }

    #[test]
    fn test_missing_program_is_launch_failure() {
        let mut runner = ProcessRunner::inherit();
        let inv = Invocation::new("/definitely/not/here/6g");
        let err = runner.run(&inv).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Launch);
        assert!(err.to_string().contains("6g"));
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_status_is_returned_verbatim() {
        let mut runner = ProcessRunner::inherit();
        let inv = Invocation::new("/bin/sh")
            .arg("-c")
            .arg("exit 42")
            .stdin(StdinMode::Null);
        assert_eq!(runner.run(&inv).unwrap(), 42);
    }

    #[cfg(unix)]
    #[test]
    fn test_runs_with_explicit_environment_and_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut runner = ProcessRunner::new(vec![("MARK".into(), "seen".into())]);
        let inv = Invocation::new("/bin/sh")
            .arg("-c")
            .arg("test \"$MARK\" = seen && test -z \"$HOME\" && : > here")
            .current_dir(Some(dir.path()));
        assert_eq!(runner.run(&inv).unwrap(), 0);
        assert!(dir.path().join("here").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_null_stdin_reads_eof() {
        let mut runner = ProcessRunner::inherit();
        let inv = Invocation::new("/bin/sh")
            .arg("-c")
            .arg("if read line; then exit 1; else exit 0; fi")
            .stdin(StdinMode::Null);
        assert_eq!(runner.run(&inv).unwrap(), 0);
    }
}
