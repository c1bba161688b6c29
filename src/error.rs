use std::fmt;
use std::path::PathBuf;

use crate::platform::Platform;

/// Errors the patcher can hit. Every one of these is terminal for the run:
/// the binary prints the chain and exits non-zero, there is no retry.
#[derive(Debug)]
pub enum PatchError {
    /// The requested platform is not one we ship binaries for.
    UnsupportedPlatform { given: String },
    /// The config file does not exist.
    NotFound { path: PathBuf },
    /// The config file exists but could not be read.
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The config file is not valid JSON, or its root is not an object.
    Parse {
        path: PathBuf,
        source: Option<serde_json::Error>,
    },
    /// `bundle` exists in the config but is not an object; overwriting it
    /// would silently destroy whatever the user put there, so fail instead.
    BundleNotObject { found: &'static str },
    /// Writing the patched config back failed.
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl fmt::Display for PatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchError::UnsupportedPlatform { given } => {
                let valid: Vec<&str> = Platform::ALL.iter().map(|p| p.as_str()).collect();
                write!(
                    f,
                    "unknown platform '{}' (valid platforms: {})",
                    given,
                    valid.join(", ")
                )
            }
            PatchError::NotFound { path } => {
                write!(f, "config file '{}' not found", path.display())
            }
            PatchError::Read { path, source } => {
                write!(
                    f,
                    "failed to read config file '{}': {}",
                    path.display(),
                    source
                )
            }
            PatchError::Parse { path, source } => match source {
                Some(e) => write!(f, "config file '{}' is not valid JSON: {}", path.display(), e),
                None => write!(
                    f,
                    "config file '{}' must contain a JSON object at the top level",
                    path.display()
                ),
            },
            PatchError::BundleNotObject { found } => {
                write!(
                    f,
                    "'bundle' key exists but is {} rather than an object; refusing to overwrite it",
                    found
                )
            }
            PatchError::Write { path, source } => {
                write!(
                    f,
                    "failed to write config file '{}': {}",
                    path.display(),
                    source
                )
            }
        }
    }
}

impl std::error::Error for PatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PatchError::Parse {
                source: Some(e), ..
            } => Some(e),
            PatchError::Read { source, .. } => Some(source),
            PatchError::Write { source, .. } => Some(source),
            _ => None,
        }
    }
}
