//! Compilation of the Java validation helper.
//!
//! The helper is compiled once into `<base_dir>/support/XMLValidator.class`
//! and reused from then on. Presence of that file is the only readiness
//! check; a stale class is never rebuilt unless [`HelperProvisioner::rebuild`]
//! is called.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::error::{Result, ValidatorError};
use crate::runtime::{COMPILER, RuntimeLocator};

/// Fully qualified entry point of the compiled helper
pub const HELPER_ENTRY_POINT: &str = "support.XMLValidator";

/// Helper source relative to the package root, as handed to the compiler
pub const HELPER_SOURCE: &str = "support/XMLValidator.java";

/// Compiled helper relative to the package root
pub const HELPER_ARTIFACT: &str = "support/XMLValidator.class";

const HELPER_SOURCE_TEXT: &str = include_str!("../support/XMLValidator.java");

/// Serializes compiler invocations within this process; readiness is still
/// decided by artifact presence alone.
static COMPILE_LOCK: Mutex<()> = Mutex::const_new(());

#[derive(Debug, Clone)]
pub struct HelperProvisioner {
    base_dir: PathBuf,
    locator: RuntimeLocator,
    debug: bool,
}

impl HelperProvisioner {
    pub fn new(base_dir: impl Into<PathBuf>, locator: RuntimeLocator, debug: bool) -> Self {
        Self {
            base_dir: base_dir.into(),
            locator,
            debug,
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn artifact_path(&self) -> PathBuf {
        self.base_dir.join(HELPER_ARTIFACT)
    }

    pub fn is_ready(&self) -> bool {
        self.artifact_path().is_file()
    }

    /// Make sure the compiled helper exists, compiling it if necessary
    pub async fn ensure(&self) -> Result<()> {
        if self.is_ready() {
            if self.debug {
                debug!(artifact = %self.artifact_path().display(), "using existing helper");
            }
            return Ok(());
        }

        let _guard = COMPILE_LOCK.lock().await;

        // Another session may have compiled while we waited.
        if self.is_ready() {
            return Ok(());
        }

        self.compile().await
    }

    /// Remove any existing helper artifact and compile it again
    pub async fn rebuild(&self) -> Result<()> {
        let _guard = COMPILE_LOCK.lock().await;

        match tokio::fs::remove_file(self.artifact_path()).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        self.compile().await
    }

    async fn compile(&self) -> Result<()> {
        if self.debug {
            debug!(base_dir = %self.base_dir.display(), "compiling helper");
        }

        let javac = self
            .locator
            .locate(COMPILER)
            .map_err(|e| ValidatorError::CompileToolMissing {
                source: Box::new(e),
            })?;

        if self.debug {
            debug!(javac = %javac.display(), "found javac");
        }

        self.write_source().await?;

        let output = Command::new(&javac)
            .arg(HELPER_SOURCE)
            .current_dir(&self.base_dir)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| ValidatorError::ProcessSpawn {
                program: javac.clone(),
                source,
            })?;

        if !output.status.success() {
            warn!(
                stderr = %String::from_utf8_lossy(&output.stderr).trim_end(),
                "helper compilation failed"
            );
            return Err(ValidatorError::CompilationFailed {
                exit_code: output.status.code().unwrap_or(-1),
            });
        }

        if self.debug {
            debug!("helper compiled");
        }

        Ok(())
    }

    /// Materialize the embedded helper source under the package root if absent
    async fn write_source(&self) -> Result<()> {
        let source = self.base_dir.join(HELPER_SOURCE);
        if source.is_file() {
            return Ok(());
        }

        if let Some(parent) = source.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&source, HELPER_SOURCE_TEXT).await?;
        Ok(())
    }
}
