//! # goscript - Run Go Source Files as Scripts
//!
//! goscript lets a `.go` file with a `#!/usr/bin/env goscript` line be
//! executed directly. The first run compiles and links it into a hidden
//! binary next to the source (`.hello.gosc` for `hello.go`); later runs
//! reuse that binary until the source's modification time changes.
//!
//! ## Quick Start
//!
//! ```bash
//! export GOROOT=/usr/lib/go
//! chmod +x hello.go
//! ./hello.go
//! ```
//!
//! ## Module Organization
//!
//! - [`build`] - Cache check, compile/link, mtime pairing, execution
//! - [`toolchain`] - Compiler and linker resolution from `GOROOT`/`GOBIN`/`GOARCH`
//! - [`process`] - Spawning external commands
//! - [`config`] - Environment snapshot and user settings

/// Build cache orchestration.
pub mod build;

/// Environment and settings file.
pub mod config;

/// Error taxonomy and exit codes.
pub mod error;

/// External process execution.
pub mod process;

/// Toolchain resolution.
pub mod toolchain;

/// Terminal output helpers.
pub mod ui;
