//! Absolute base directory for test scratch space
//!
//! Builds run with `TMPDIR=tmp` would otherwise drop scratch directories into
//! the working tree, next to the descriptors under test.

use std::env;
use std::path::PathBuf;

#[cfg(windows)]
const FALLBACK: &str = "C:\\Windows\\Temp";
#[cfg(not(windows))]
const FALLBACK: &str = "/tmp";

/// The system temp directory, or a platform fallback when it is relative
pub fn temp_dir_base() -> PathBuf {
    let dir = env::temp_dir();
    if dir.is_absolute() {
        return dir;
    }
    ["TEMP", "TMP"]
        .into_iter()
        .filter_map(env::var_os)
        .map(PathBuf::from)
        .find(|candidate| candidate.is_absolute())
        .unwrap_or_else(|| PathBuf::from(FALLBACK))
}
