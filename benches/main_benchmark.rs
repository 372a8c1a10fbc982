use criterion::{Criterion, criterion_group, criterion_main};
use goscript::build::{Orchestrator, RunOptions, Script};
use goscript::config::ToolchainEnv;
use goscript::error::Result;
use goscript::process::{CommandRunner, Invocation};
use goscript::toolchain;
use std::hint::black_box;

/// The cache check never spawns anything.
struct NoopRunner;

impl CommandRunner for NoopRunner {
    fn run(&mut self, _invocation: &Invocation) -> Result<i32> {
        Ok(0)
    }
}

fn bench_artifact_path(c: &mut Criterion) {
    c.bench_function("derive_artifact_path", |b| {
        b.iter(|| {
            let script = Script::new(black_box("scripts/tools/hello.go")).unwrap();
            script.artifact()
        })
    });
}

fn bench_toolchain_resolve(c: &mut Criterion) {
    let env = ToolchainEnv {
        goroot: Some("/usr/lib/go".to_string()),
        goarch: Some("amd64".to_string()),
        ..Default::default()
    };
    c.bench_function("resolve_toolchain", |b| {
        b.iter(|| toolchain::resolve(black_box(&env)).unwrap())
    });
}

fn bench_cache_check(c: &mut Criterion) {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("hello.go");
    std::fs::write(&path, "#!/usr/bin/env goscript\npackage main\n").unwrap();
    let script = Script::new(&path).unwrap();
    let artifact = script.artifact();
    std::fs::write(artifact.path(), "binary").unwrap();
    let mtime = goscript::build::mtime::get_time(&path).unwrap();
    goscript::build::mtime::set_time(artifact.path(), mtime).unwrap();

    let orchestrator = Orchestrator::new(NoopRunner, ToolchainEnv::default(), RunOptions::default());
    c.bench_function("check_cache_fresh", |b| {
        b.iter(|| orchestrator.check_cache(black_box(&script), black_box(&artifact)).unwrap())
    });
}

criterion_group!(
    benches,
    bench_artifact_path,
    bench_toolchain_resolve,
    bench_cache_check
);
criterion_main!(benches);
