//! Toolchain resolution
//!
//! The Go toolchain is located purely from environment configuration:
//! `GOROOT` (or `GOROOT_FINAL`), `GOBIN` and `GOARCH`. Nothing is searched
//! on `PATH` and nothing is cached between runs.

pub mod types;

pub use types::{Arch, Toolchain};

use crate::config::ToolchainEnv;
use crate::error::{Result, RunError};
use std::path::PathBuf;

/// Resolve compiler, linker and architecture suffix from `env`.
pub fn resolve(env: &ToolchainEnv) -> Result<Toolchain> {
    let goroot = env
        .goroot
        .as_deref()
        .or(env.goroot_final.as_deref())
        .ok_or_else(|| {
            RunError::Configuration(
                "Environment variable GOROOT neither GOROOT_FINAL has been set".to_string(),
            )
        })?;

    let bin_dir = match &env.gobin {
        Some(gobin) => PathBuf::from(gobin),
        None => PathBuf::from(goroot).join("bin"),
    };

    let goarch = env.goarch.as_deref().unwrap_or(Arch::host_goarch());
    let arch = Arch::from_goarch(goarch)
        .ok_or_else(|| RunError::Configuration(format!("Unknown GOARCH: {}", goarch)))?;

    Ok(Toolchain::new(arch, bin_dir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn env(goroot: Option<&str>, final_root: Option<&str>) -> ToolchainEnv {
        ToolchainEnv {
            goroot: goroot.map(String::from),
            goroot_final: final_root.map(String::from),
            gobin: None,
            goarch: Some("amd64".to_string()),
        }
    }

    #[test]
    fn test_resolve_from_goroot() {
        let tc = resolve(&env(Some("/usr/lib/go"), None)).unwrap();
        assert_eq!(tc.compiler, PathBuf::from("/usr/lib/go/bin/6g"));
        assert_eq!(tc.linker, PathBuf::from("/usr/lib/go/bin/6l"));
        assert_eq!(tc.suffix(), "6");
    }

    #[test]
    fn test_goroot_wins_over_final() {
        let tc = resolve(&env(Some("/a"), Some("/b"))).unwrap();
        assert_eq!(tc.compiler, PathBuf::from("/a/bin/6g"));
    }

    #[test]
    fn test_falls_back_to_goroot_final() {
        let tc = resolve(&env(None, Some("/final"))).unwrap();
        assert_eq!(tc.compiler, PathBuf::from("/final/bin/6g"));
    }

    #[test]
    fn test_missing_root_is_configuration_error() {
        let err = resolve(&env(None, None)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().contains("GOROOT"));
    }

    #[test]
    fn test_gobin_override() {
        let mut e = env(Some("/usr/lib/go"), None);
        e.gobin = Some("/home/me/bin".to_string());
        e.goarch = Some("arm".to_string());
        let tc = resolve(&e).unwrap();
        assert_eq!(tc.compiler, PathBuf::from("/home/me/bin/5g"));
        assert_eq!(tc.linker, PathBuf::from("/home/me/bin/5l"));
        assert_eq!(tc.object_name(), "_go_.5");
    }

    #[test]
    fn test_unknown_arch() {
        let mut e = env(Some("/usr/lib/go"), None);
        e.goarch = Some("sparc".to_string());
        let err = resolve(&e).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert_eq!(err.to_string(), "Unknown GOARCH: sparc");
    }

    #[test]
    fn test_default_arch_is_host() {
        let mut e = env(Some("/usr/lib/go"), None);
        e.goarch = None;
        let result = resolve(&e);
        match Arch::from_goarch(Arch::host_goarch()) {
            Some(arch) => assert_eq!(result.unwrap().arch, arch),
            None => assert!(result.is_err()),
        }
    }
}
