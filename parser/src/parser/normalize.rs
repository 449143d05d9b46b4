//! Captured-output normalization.

use regex::Regex;
use std::sync::LazyLock;

/// Strips terminal escape sequences and unifies line endings.
///
/// Column positions and leading/trailing whitespace are preserved: table
/// slicing depends on them.
pub fn normalize_capture(raw: &str) -> String {
    // SAFETY: This regex is a compile-time constant and is validated by tests.
    static ANSI_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]").expect("static regex must compile")
    });

    let stripped = ANSI_RE.replace_all(raw, "");
    stripped.replace("\r\n", "\n").replace('\r', "\n")
}
