//! Discovery of the Java executables (`javac`, `java`).
//!
//! A configured installation root is authoritative: when it is set, only its
//! `bin` directory is searched, and a miss there is reported as such rather
//! than silently falling back to `PATH`.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::ValidatorConfig;
use crate::error::{Result, ValidatorError};

pub const COMPILER: &str = "javac";
pub const RUNNER: &str = "java";

#[derive(Debug, Clone)]
pub struct RuntimeLocator {
    java_home: Option<PathBuf>,
    search_path: Option<OsString>,
    debug: bool,
}

impl RuntimeLocator {
    pub fn new(java_home: Option<PathBuf>, search_path: Option<OsString>, debug: bool) -> Self {
        Self {
            java_home,
            search_path,
            debug,
        }
    }

    pub fn from_config(config: &ValidatorConfig) -> Self {
        Self::new(
            config.java_home.clone(),
            config.search_path.clone().map(OsString::from),
            config.debug,
        )
    }

    /// Resolve `executable` to an absolute path
    pub fn locate(&self, executable: &str) -> Result<PathBuf> {
        if self.debug {
            debug!(
                executable,
                java_home = ?self.java_home,
                "locating Java executable"
            );
        }

        let file_name = format!("{}{}", executable, std::env::consts::EXE_SUFFIX);

        if let Some(java_home) = &self.java_home {
            let bin_dir = java_home.join("bin");
            let candidate = bin_dir.join(&file_name);

            return if is_executable(&candidate) {
                Ok(candidate)
            } else {
                Err(ValidatorError::RuntimeNotFound {
                    executable: executable.to_string(),
                    location: bin_dir.display().to_string(),
                })
            };
        }

        self.search_path
            .as_ref()
            .and_then(|path| {
                std::env::split_paths(path)
                    .filter(|dir| !dir.as_os_str().is_empty())
                    .map(|dir| dir.join(&file_name))
                    .find(|candidate| is_executable(candidate))
            })
            .ok_or_else(|| ValidatorError::RuntimeNotFound {
                executable: executable.to_string(),
                location: "PATH".to_string(),
            })
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
