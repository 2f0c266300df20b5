//! # xsd-schema-validator
//!
//! Validate XML documents against XSD schemas by driving a small Java helper.
//! The helper is compiled once on first use, then spawned per validation;
//! its line protocol is parsed into a [`ValidationOutcome`].
//!
//! ```no_run
//! use xsd_schema_validator::{ValidationOptions, validate_xml};
//!
//! # async fn demo() -> xsd_schema_validator::Result<()> {
//! let xml = "<?xml version=\"1.0\"?><b/>";
//! let outcome = validate_xml(xml, "schema.xsd", ValidationOptions::default()).await?;
//! assert!(outcome.valid);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod outcome;
pub mod output;
pub mod protocol;
pub mod provision;
pub mod runtime;
pub mod session;
pub mod validator;

pub use config::{EnvProvider, SystemEnvProvider, ValidatorConfig};
pub use error::{ConfigError, Result, ValidatorError};
pub use input::{XmlInput, XmlStream};
pub use outcome::ValidationOutcome;
pub use output::{Output, OutputFormat};
pub use protocol::ProtocolLine;
pub use provision::HelperProvisioner;
pub use runtime::RuntimeLocator;
pub use session::{ValidationRequest, ValidationSession};
pub use validator::{ValidationOptions, Validator, setup, validate_xml};
