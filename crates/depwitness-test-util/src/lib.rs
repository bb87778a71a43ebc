//! Shared test utilities for the depwitness workspace.
//!
//! This crate exists because `xtask` needs `normalize_nondeterministic` at
//! runtime (not behind `#[cfg(test)]`), and because the app and CLI tests both
//! build throwaway dependency caches on disk.

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::Value;
use tempfile::TempDir;

/// Checksum directory segment used for every fixture artifact.
pub const FIXTURE_CHECKSUM_DIR: &str = "f1e2d3c4";

/// Normalize non-deterministic JSON fields for golden-file comparison.
///
/// `tool.version` is replaced with `"__VERSION__"` only when the root object
/// looks like a verification receipt (`schema`, `tool`, `verdict`, `data`).
/// `started_at` and `finished_at` are replaced at any depth.
pub fn normalize_nondeterministic(mut value: Value) -> Value {
    if let Some(obj) = value.as_object_mut() {
        let is_receipt = obj.contains_key("schema")
            && obj.contains_key("tool")
            && obj.contains_key("verdict")
            && obj.contains_key("data");
        if is_receipt
            && let Some(tool) = obj.get_mut("tool")
            && let Some(tool_obj) = tool.as_object_mut()
            && tool_obj.contains_key("name")
            && tool_obj.contains_key("version")
        {
            tool_obj.insert(
                "version".to_string(),
                Value::String("__VERSION__".to_string()),
            );
        }
    }
    normalize_timestamps_recursive(&mut value);
    value
}

fn normalize_timestamps_recursive(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for key in ["started_at", "finished_at"] {
                if map.contains_key(key) {
                    map.insert(key.to_string(), Value::String("__TIMESTAMP__".to_string()));
                }
            }
            for val in map.values_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        Value::Array(arr) => {
            for val in arr.iter_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        _ => {}
    }
}

/// A temporary directory laid out like a dependency cache, plus the snapshot and config
/// files that describe it.
///
/// Panics on IO failure; only meant for tests.
pub struct CacheFixture {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl CacheFixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf8 temp dir");
        Self { _dir: dir, root }
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Write `group:name:version` into the cache and return its path relative to the root.
    pub fn add_artifact(&self, group: &str, name: &str, version: &str, content: &[u8]) -> String {
        let relative = format!(
            "cache/{group}/{name}/{version}/{FIXTURE_CHECKSUM_DIR}/{name}-{version}.jar"
        );
        self.write(&relative, content);
        relative
    }

    /// Write `contents` to `relative`, creating parent directories.
    pub fn write(&self, relative: &str, contents: impl AsRef<[u8]>) -> Utf8PathBuf {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dirs");
        }
        std::fs::write(&path, contents).expect("write fixture file");
        path
    }

    pub fn write_snapshot(&self, json: &str) -> Utf8PathBuf {
        self.write("snapshot.json", json)
    }

    pub fn write_config(&self, toml: &str) -> Utf8PathBuf {
        self.write("depwitness.toml", toml)
    }
}

impl Default for CacheFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A snapshot with one project configuration `compile` declaring `com.example:lib:1.0`,
/// which transitively resolves `com.example:util:2.0`, and a `testCompile` extending it.
pub fn sample_snapshot(lib_path: &str, util_path: &str) -> String {
    format!(
        r#"{{
  "project": "app",
  "configurations": [
    {{
      "name": "compile",
      "dependencies": [
        {{ "module": {{ "group": "com.example", "name": "lib", "version": "1.0" }} }}
      ],
      "artifacts": [
        {{ "module": {{ "group": "com.example", "name": "lib", "version": "1.0" }}, "path": "{lib_path}" }},
        {{ "module": {{ "group": "com.example", "name": "util", "version": "2.0" }}, "path": "{util_path}" }}
      ]
    }},
    {{ "name": "testCompile", "extends_from": ["compile"] }}
  ]
}}"#
    )
}
