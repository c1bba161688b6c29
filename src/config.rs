use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde_json::{Map, Value, json};
use tracing::debug;

use crate::error::PatchError;

/// The bundler config document: an arbitrary JSON object, opaque to us
/// except for `bundle.resources`. Everything else passes through unchanged.
pub type Config = Map<String, Value>;

/// Load the bundler config from disk.
///
/// Fails if the file is missing, is not valid JSON, or has a non-object root.
/// Nothing is written in any failure mode, so a broken file stays on disk
/// exactly as it was.
pub fn load_config(path: &Path) -> Result<Config, PatchError> {
    if !path.exists() {
        return Err(PatchError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| PatchError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;

    let value: Value = serde_json::from_str(&content).map_err(|e| PatchError::Parse {
        path: path.to_path_buf(),
        source: Some(e),
    })?;

    match value {
        Value::Object(map) => {
            debug!(path = %path.display(), keys = map.len(), "loaded config");
            Ok(map)
        }
        _ => Err(PatchError::Parse {
            path: path.to_path_buf(),
            source: None,
        }),
    }
}

/// Set `bundle.resources` to the given list, creating the `bundle` object if
/// it is absent. All sibling fields of `bundle` and all other top-level keys
/// keep their values and relative order.
///
/// A `bundle` key holding anything other than an object is a hard error:
/// replacing it wholesale could silently drop config the user wrote by hand.
pub fn apply_resources(config: &mut Config, resources: &[String]) -> Result<(), PatchError> {
    match config.entry("bundle").or_insert_with(|| json!({})) {
        Value::Object(bundle) => {
            bundle.insert("resources".to_string(), json!(resources));
            debug!(count = resources.len(), "set bundle.resources");
            Ok(())
        }
        other => Err(PatchError::BundleNotObject {
            found: json_type_name(other),
        }),
    }
}

/// Write the config back with deterministic formatting: 2-space indentation,
/// key order as encountered, trailing newline. The write goes through a temp
/// file in the same directory and a rename, so a failure partway through
/// never leaves a truncated config behind.
pub fn save_config(path: &Path, config: &Config) -> Result<(), PatchError> {
    let mut content = serde_json::to_string_pretty(config).map_err(|e| PatchError::Write {
        path: path.to_path_buf(),
        source: std::io::Error::other(e),
    })?;
    content.push('\n');

    atomic_write(path, content.as_bytes()).map_err(|e| PatchError::Write {
        path: path.to_path_buf(),
        source: e,
    })?;

    debug!(path = %path.display(), bytes = content.len(), "wrote config");
    Ok(())
}

/// Write to a temp file in the target's directory, sync, then rename over
/// the target. Atomic on Unix and NTFS filesystems.
fn atomic_write(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let temp_path = path.with_extension("tmp");

    {
        let mut file = File::create(&temp_path)?;
        file.write_all(content)?;
        file.sync_all()?;
    }

    std::fs::rename(&temp_path, path)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
