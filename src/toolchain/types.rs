use std::path::PathBuf;

/// Architectures the Go toolchain ships a compiler/linker pair for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    Amd64,
    I386,
    Arm,
}

impl Arch {
    /// Parse a `GOARCH` value.
    pub fn from_goarch(name: &str) -> Option<Self> {
        match name {
            "amd64" => Some(Arch::Amd64),
            "386" => Some(Arch::I386),
            "arm" => Some(Arch::Arm),
            _ => None,
        }
    }

    /// The architecture this binary was built for, in `GOARCH` naming.
    ///
    /// Unknown hosts are passed through unchanged so the resolver can
    /// report them.
    pub fn host_goarch() -> &'static str {
        match std::env::consts::ARCH {
            "x86_64" => "amd64",
            "x86" => "386",
            "arm" => "arm",
            other => other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Arch::Amd64 => "amd64",
            Arch::I386 => "386",
            Arch::Arm => "arm",
        }
    }

    /// Single-character tool prefix (`6g`, `8l`, ...), also used as the
    /// object file suffix.
    pub fn suffix(&self) -> &'static str {
        match self {
            Arch::Amd64 => "6",
            Arch::I386 => "8",
            Arch::Arm => "5",
        }
    }
}

/// Compiler and linker for one invocation. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    pub arch: Arch,

    /// Absolute or GOBIN-relative path to `<c>g`
    pub compiler: PathBuf,

    /// Absolute or GOBIN-relative path to `<c>l`
    pub linker: PathBuf,
}

impl Toolchain {
    pub fn new(arch: Arch, bin_dir: PathBuf) -> Self {
        let suffix = arch.suffix();
        Self {
            arch,
            compiler: bin_dir.join(format!("{suffix}g")),
            linker: bin_dir.join(format!("{suffix}l")),
        }
    }

    pub fn suffix(&self) -> &'static str {
        self.arch.suffix()
    }

    /// Name of the intermediate object the compiler writes.
    pub fn object_name(&self) -> String {
        format!("_go_.{}", self.suffix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_architectures() {
        assert_eq!(Arch::from_goarch("amd64"), Some(Arch::Amd64));
        assert_eq!(Arch::from_goarch("386"), Some(Arch::I386));
        assert_eq!(Arch::from_goarch("arm"), Some(Arch::Arm));
        assert_eq!(Arch::from_goarch("mips"), None);
        assert_eq!(Arch::from_goarch("AMD64"), None);
    }

    #[test]
    fn test_toolchain_naming() {
        let tc = Toolchain::new(Arch::I386, PathBuf::from("/opt/go/bin"));
        assert_eq!(tc.compiler, PathBuf::from("/opt/go/bin/8g"));
        assert_eq!(tc.linker, PathBuf::from("/opt/go/bin/8l"));
        assert_eq!(tc.object_name(), "_go_.8");
    }
}
