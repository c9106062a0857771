//! `<stem>.provenance.json` sidecars next to every written artifact.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::ffi::OsString;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// What produced an artifact.
pub struct Payload {
    pub command: &'static str,
    pub params: Value,
    pub inputs: Vec<PathBuf>,
}

impl Payload {
    pub fn new(command: &'static str, params: Value) -> Self {
        Self {
            command,
            params,
            inputs: Vec::new(),
        }
    }

    pub fn with_input(mut self, path: impl Into<PathBuf>) -> Self {
        self.inputs.push(path.into());
        self
    }
}

#[derive(Serialize)]
struct Callsite {
    file: &'static str,
    line: u32,
}

#[derive(Serialize)]
pub struct Doc {
    pub crate_version: &'static str,
    pub code_rev: String,
    pub command: &'static str,
    callsite: Callsite,
    pub params: Value,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
}

impl Doc {
    #[track_caller]
    pub fn new(payload: Payload, outputs: &[&Path]) -> Self {
        let loc = Location::caller();
        let lossy = |p: &Path| p.to_string_lossy().into_owned();
        Self {
            crate_version: raycaster::VERSION,
            code_rev: current_git_rev(),
            command: payload.command,
            callsite: Callsite {
                file: loc.file(),
                line: loc.line(),
            },
            params: payload.params,
            inputs: payload.inputs.iter().map(|p| lossy(p)).collect(),
            outputs: outputs.iter().map(|p| lossy(p)).collect(),
        }
    }
}

/// Write the sidecar for `artifact` and return its path.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, payload: Payload) -> Result<PathBuf> {
    let artifact = artifact.as_ref();
    let path = provenance_path(artifact);
    let doc = Doc::new(payload, &[artifact]);
    fs::write(&path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", path.display()))?;
    tracing::debug!(path = %path.display(), "wrote provenance");
    Ok(path)
}

pub fn provenance_path(artifact: &Path) -> PathBuf {
    let mut name = artifact
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("artifact"));
    name.push(".provenance.json");
    artifact.with_file_name(name)
}

/// Commit hash from `GIT_COMMIT` (build or run time), else `git rev-parse`.
pub fn current_git_rev() -> String {
    let from_env = option_env!("GIT_COMMIT")
        .map(str::to_string)
        .or_else(|| std::env::var("GIT_COMMIT").ok())
        .filter(|s| !s.is_empty());
    if let Some(rev) = from_env {
        return rev;
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn sidecar_name_replaces_extension() {
        let p = provenance_path(Path::new("/tmp/out/lit.json"));
        assert_eq!(p, Path::new("/tmp/out/lit.provenance.json"));
        let bare = provenance_path(Path::new("/tmp/out/lit"));
        assert_eq!(bare, Path::new("/tmp/out/lit.provenance.json"));
    }

    #[test]
    fn sidecar_records_inputs_and_outputs() {
        let dir = tempdir().unwrap();
        let artifact = dir.path().join("lit.json");
        fs::write(&artifact, "{}").unwrap();
        let payload = Payload::new("cast", json!({"sight": true})).with_input("scene.json");
        let path = write_sidecar(&artifact, payload).unwrap();
        let doc: Value = serde_json::from_slice(&fs::read(path).unwrap()).unwrap();
        assert_eq!(doc["command"], "cast");
        assert_eq!(doc["params"]["sight"], true);
        assert_eq!(doc["inputs"][0], "scene.json");
        assert_eq!(doc["outputs"][0], artifact.to_string_lossy().as_ref());
        assert_eq!(doc["crate_version"], raycaster::VERSION);
        assert!(doc["callsite"]["line"].as_u64().is_some());
    }
}
