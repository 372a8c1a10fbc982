//! Interpreter line toggling.
//!
//! The Go compiler rejects a leading `#!` line, so while compiling the
//! first two bytes of the script are swapped for `//`, which turns
//! `#!/usr/bin/env goscript` into an ordinary line comment. Both markers
//! are two bytes wide, so the swap happens in place.

use crate::error::{Result, RunError};
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

pub const INTERPRETER_MARKER: &[u8; 2] = b"#!";
pub const COMMENT_MARKER: &[u8; 2] = b"//";

/// Whether `path` begins with `#!`.
pub fn has_interpreter_line(path: &Path) -> Result<bool> {
    let mut head = [0u8; 2];
    let mut file = File::open(path).map_err(|e| RunError::io("open", path, e))?;
    let mut filled = 0;
    while filled < head.len() {
        match file.read(&mut head[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(RunError::io("read", path, e)),
        }
    }
    Ok(filled == head.len() && &head == INTERPRETER_MARKER)
}

/// Overwrite the first two bytes with `//` (`commented`) or `#!`.
pub fn comment(path: &Path, commented: bool) -> Result<()> {
    let marker = if commented {
        COMMENT_MARKER
    } else {
        INTERPRETER_MARKER
    };

    let mut file = File::options()
        .write(true)
        .open(path)
        .map_err(|e| RunError::io("write", path, e))?;
    file.write_all(marker)
        .map_err(|e| RunError::io("write", path, e))
}

/// Copy `source` to `dest`, commenting out a leading `#!` in the copy.
pub fn copy_commented(source: &Path, dest: &Path) -> Result<()> {
    let mut content = fs::read(source).map_err(|e| RunError::io("read", source, e))?;
    if content.starts_with(INTERPRETER_MARKER) {
        content[..2].copy_from_slice(COMMENT_MARKER);
    }
    fs::write(dest, content).map_err(|e| RunError::io("write", dest, e))
}
