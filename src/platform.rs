use std::fmt;
use std::str::FromStr;

use crate::error::PatchError;

/// Platforms we ship prebuilt FFmpeg binaries for.
///
/// The identifiers match the directory names under `binaries/` that the CI
/// download step populates before the bundler runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacosAarch64,
    MacosX86_64,
    LinuxX86_64,
    WindowsX86_64,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::MacosAarch64,
        Platform::MacosX86_64,
        Platform::LinuxX86_64,
        Platform::WindowsX86_64,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Platform::MacosAarch64 => "macos-aarch64",
            Platform::MacosX86_64 => "macos-x86_64",
            Platform::LinuxX86_64 => "linux-x86_64",
            Platform::WindowsX86_64 => "windows-x86_64",
        }
    }

    /// Executable suffix used by this platform's binaries.
    fn exe_suffix(self) -> &'static str {
        match self {
            Platform::WindowsX86_64 => ".exe",
            _ => "",
        }
    }

    /// The bundler resource paths for this platform: the ffmpeg executable
    /// and its companion ffprobe, in that order, relative to the config file.
    pub fn resources(self) -> Vec<String> {
        let suffix = self.exe_suffix();
        vec![
            format!("binaries/{}/ffmpeg{}", self.as_str(), suffix),
            format!("binaries/{}/ffprobe{}", self.as_str(), suffix),
        ]
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = PatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| PatchError::UnsupportedPlatform {
                given: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_platform_resolves_to_two_prefixed_paths() {
        for platform in Platform::ALL {
            let resources = platform.resources();
            assert_eq!(resources.len(), 2);
            let prefix = format!("binaries/{}/", platform);
            for path in &resources {
                assert!(
                    path.starts_with(&prefix),
                    "'{}' should start with '{}'",
                    path,
                    prefix
                );
            }
        }
    }

    #[test]
    fn windows_binaries_carry_exe_suffix() {
        let resources = Platform::WindowsX86_64.resources();
        assert_eq!(
            resources,
            vec![
                "binaries/windows-x86_64/ffmpeg.exe",
                "binaries/windows-x86_64/ffprobe.exe",
            ]
        );
    }

    #[test]
    fn posix_binaries_have_no_extension() {
        for platform in [
            Platform::MacosAarch64,
            Platform::MacosX86_64,
            Platform::LinuxX86_64,
        ] {
            for path in platform.resources() {
                assert!(!path.contains('.'), "'{}' should have no extension", path);
            }
        }
    }

    #[test]
    fn ffmpeg_comes_before_ffprobe() {
        let resources = Platform::LinuxX86_64.resources();
        assert_eq!(resources[0], "binaries/linux-x86_64/ffmpeg");
        assert_eq!(resources[1], "binaries/linux-x86_64/ffprobe");
    }

    #[test]
    fn known_identifiers_parse() {
        for platform in Platform::ALL {
            assert_eq!(platform.as_str().parse::<Platform>().unwrap(), platform);
        }
    }

    #[test]
    fn unknown_identifier_is_rejected_with_valid_choices() {
        let err = "linux-arm64".parse::<Platform>().unwrap_err();
        assert!(matches!(
            err,
            PatchError::UnsupportedPlatform { ref given } if given == "linux-arm64"
        ));
        let msg = err.to_string();
        for platform in Platform::ALL {
            assert!(msg.contains(platform.as_str()));
        }
    }
}
