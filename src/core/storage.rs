// src/core/storage.rs
use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;

// Write JSON to a sibling temp file, then rename over the target so a crash
// never leaves a half-written file behind
pub(crate) fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let data = serde_json::to_vec_pretty(value).map_err(io::Error::from)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, data)?;
    fs::rename(&tmp, path)
}
