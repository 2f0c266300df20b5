//! Public validation API
//!
//! A [`Validator`] ties the pieces together for each call:
//! provision the helper, locate `java`, then run one [`ValidationSession`].
//! Nothing is retried; every failure is returned to the caller as-is.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::ValidatorConfig;
use crate::error::Result;
use crate::input::XmlInput;
use crate::outcome::ValidationOutcome;
use crate::provision::HelperProvisioner;
use crate::runtime::{RUNNER, RuntimeLocator};
use crate::session::{ValidationRequest, ValidationSession};

/// Per-call validation options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Let the helper resolve remote and external schema/entity references
    pub insecure: bool,
}

impl ValidationOptions {
    pub fn insecure() -> Self {
        Self { insecure: true }
    }
}

#[derive(Debug, Clone)]
pub struct Validator {
    config: ValidatorConfig,
    locator: RuntimeLocator,
    provisioner: HelperProvisioner,
}

impl Validator {
    pub fn new(config: ValidatorConfig) -> Self {
        let locator = RuntimeLocator::from_config(&config);
        let provisioner = HelperProvisioner::new(&config.base_dir, locator.clone(), config.debug);

        Self {
            config,
            locator,
            provisioner,
        }
    }

    /// Validator configured from the process environment
    pub fn from_env() -> Self {
        Self::new(ValidatorConfig::from_env())
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Compile the helper ahead of the first validation
    pub async fn setup(&self) -> Result<()> {
        self.provisioner.ensure().await
    }

    /// Recompile the helper even if a compiled copy exists
    pub async fn rebuild(&self) -> Result<()> {
        self.provisioner.rebuild().await
    }

    /// Validate `input` against the schema at `schema`.
    ///
    /// Resolves to the outcome when the document is valid; an invalid
    /// document is reported as [`ValidatorError::ValidationFailed`] carrying
    /// the same outcome.
    ///
    /// [`ValidatorError::ValidationFailed`]: crate::error::ValidatorError::ValidationFailed
    pub async fn validate_xml(
        &self,
        input: impl Into<XmlInput>,
        schema: impl AsRef<Path>,
        options: ValidationOptions,
    ) -> Result<ValidationOutcome> {
        let input = input.into();

        self.provisioner.ensure().await?;

        let java = self.locator.locate(RUNNER)?;
        if self.config.debug {
            debug!(java = %java.display(), "found java");
        }

        let request = ValidationRequest {
            input,
            schema_path: schema.as_ref().to_path_buf(),
            insecure: options.insecure || self.config.insecure,
            working_dir: absolute(&self.config.working_dir)?,
            debug: self.config.debug,
        };

        let base_dir = absolute(&self.config.base_dir)?;
        ValidationSession::new(java, base_dir, request).run().await
    }
}

// Classpath entries must be absolute: the helper's cwd is `working_dir`.
fn absolute(path: &Path) -> Result<PathBuf> {
    Ok(std::path::absolute(path)?)
}

/// Validate with a [`Validator`] configured from the process environment
pub async fn validate_xml(
    input: impl Into<XmlInput>,
    schema: impl AsRef<Path>,
    options: ValidationOptions,
) -> Result<ValidationOutcome> {
    Validator::from_env()
        .validate_xml(input, schema, options)
        .await
}

/// Compile the helper using the process environment's configuration
pub async fn setup() -> Result<()> {
    Validator::from_env().setup().await
}
