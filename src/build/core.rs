use super::mtime;
use super::script::{Artifact, Script};
use super::workspace::Workspace;
use crate::config::{BuildMode, Settings, ToolchainEnv};
use crate::error::{Result, RunError, Stage};
use crate::process::{CommandRunner, Invocation, StdinMode};
use crate::toolchain::{self, Toolchain};
use crate::ui::Reporter;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Why the cached binary can or cannot be reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    Fresh,
    Missing,
    Modified,
    Forced,
}

/// Per-run knobs on top of [`Settings`].
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub settings: Settings,
    /// Skip the cache check and always rebuild.
    pub force: bool,
}

/// Decides between reusing and rebuilding the cached binary, then runs it.
pub struct Orchestrator<R: CommandRunner> {
    runner: R,
    env: ToolchainEnv,
    options: RunOptions,
    report: Reporter,
}

impl<R: CommandRunner> Orchestrator<R> {
    pub fn new(runner: R, env: ToolchainEnv, options: RunOptions) -> Self {
        let report = Reporter::new(options.settings.verbose);
        Self {
            runner,
            env,
            options,
            report,
        }
    }

    /// Run `script`, rebuilding first if needed. `Ok` carries the script's
    /// own exit code.
    pub fn run(&mut self, script: &Path) -> Result<i32> {
        let script = Script::new(script)?;
        let artifact = script.artifact();

        match self.check_cache(&script, &artifact)? {
            Freshness::Fresh => self
                .report
                .cached(format!("Up to date: {}", artifact.path().display())),
            reason => {
                self.report.step(format!("Rebuilding ({:?})", reason));
                self.rebuild(&script, &artifact)?;
            }
        }

        self.execute(&artifact)
    }

    pub fn check_cache(&self, script: &Script, artifact: &Artifact) -> Result<Freshness> {
        if self.options.force {
            return Ok(Freshness::Forced);
        }
        if !artifact.exists() {
            return Ok(Freshness::Missing);
        }
        if mtime::get_time(script.path())? == mtime::get_time(artifact.path())? {
            Ok(Freshness::Fresh)
        } else {
            Ok(Freshness::Modified)
        }
    }

    /// Compile and link `script` into `artifact`, then pair their mtimes.
    pub fn rebuild(&mut self, script: &Script, artifact: &Artifact) -> Result<()> {
        script.validate_extension()?;
        let source_mtime = mtime::get_time(script.path())?;
        let toolchain = self.resolve_toolchain()?;

        let mut workspace =
            Workspace::prepare(script, self.options.settings.mode, toolchain.object_name())?;
        let built = self.compile_and_link(script, artifact, &toolchain, &mut workspace, source_mtime);
        let cleaned = workspace.cleanup();
        built?;
        cleaned
    }

    fn resolve_toolchain(&self) -> Result<Toolchain> {
        let mut toolchain = toolchain::resolve(&self.env)?;
        // The tools run in another directory, so relative GOBIN paths must be pinned.
        toolchain.compiler = absolute(&toolchain.compiler)?;
        toolchain.linker = absolute(&toolchain.linker)?;
        self.report.step(format!(
            "Toolchain: {} / {} ({})",
            toolchain.compiler.display(),
            toolchain.linker.display(),
            toolchain.arch.as_str()
        ));
        Ok(toolchain)
    }

    fn compile_and_link(
        &mut self,
        script: &Script,
        artifact: &Artifact,
        toolchain: &Toolchain,
        workspace: &mut Workspace,
        source_mtime: SystemTime,
    ) -> Result<()> {
        let compile = Invocation::new(&toolchain.compiler)
            .arg("-o")
            .arg(workspace.object_name())
            .arg(workspace.source_name())
            .current_dir(Some(workspace.dir()))
            .stdin(self.tool_stdin());
        self.report.step(compile.display());

        let compiled = self.runner.run(&compile);
        // The interpreter line goes back before anything else can fail.
        let restored = workspace.restore(source_mtime);
        let code = compiled?;
        restored?;
        if code != 0 {
            return Err(RunError::ToolFailure {
                stage: Stage::Compile,
                code,
            });
        }

        let link = Invocation::new(&toolchain.linker)
            .arg("-o")
            .arg(workspace.artifact_arg(artifact)?)
            .arg(workspace.object_name())
            .current_dir(Some(workspace.dir()))
            .stdin(self.tool_stdin());
        self.report.step(link.display());

        let code = self.runner.run(&link)?;
        if code != 0 {
            return Err(RunError::ToolFailure {
                stage: Stage::Link,
                code,
            });
        }

        // A scratch build only ever reads the script.
        if self.options.settings.mode == BuildMode::InPlace {
            mtime::set_time(script.path(), source_mtime)?;
        }
        mtime::set_time(artifact.path(), source_mtime)?;
        self.report
            .success(format!("Built {}", artifact.path().display()));
        Ok(())
    }

    fn execute(&mut self, artifact: &Artifact) -> Result<i32> {
        let invocation = Invocation::new(artifact.path());
        self.report.step(format!("Running {}", artifact.path().display()));
        self.runner.run(&invocation)
    }

    fn tool_stdin(&self) -> StdinMode {
        if self.options.settings.null_stdin {
            StdinMode::Null
        } else {
            StdinMode::Inherit
        }
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|e| RunError::io("resolve", path, e))
}
