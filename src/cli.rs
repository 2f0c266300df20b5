use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::config::{SystemEnvProvider, ValidatorConfig};
use crate::error::ConfigResult;
use crate::input::XmlInput;
use crate::output::OutputFormat;

/// Validate XML documents against XSD schemas
#[derive(Parser, Debug, Clone)]
#[command(name = "xsd-validate")]
#[command(about = "Validate XML documents against an XSD schema using a Java helper")]
#[command(version)]
pub struct Cli {
    /// Log tool discovery and unrecognized helper output
    #[arg(long, global = true)]
    pub debug: bool,

    /// Configuration file (TOML or JSON)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Java installation root (overrides JAVA_HOME)
    #[arg(long = "java-home", global = true)]
    pub java_home: Option<PathBuf>,

    /// Directory schemas and includes are resolved against
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Validate one document
    Validate {
        /// Path to the XSD schema
        #[arg(short, long)]
        schema: PathBuf,

        /// Allow remote and external schema/entity references
        #[arg(long)]
        insecure: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Human)]
        format: OutputFormat,

        /// Document to validate; `-` or absent reads stdin
        input: Option<PathBuf>,
    },

    /// Compile the validation helper ahead of first use
    Setup {
        /// Recompile even if a compiled helper exists
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Build the configuration with precedence: file -> environment -> CLI
    pub async fn load_config(&self) -> ConfigResult<ValidatorConfig> {
        let config = match &self.config {
            Some(path) => ValidatorConfig::load_from_file(path).await?,
            None => ValidatorConfig::default(),
        };

        Ok(self.apply_overrides(config.with_env(&SystemEnvProvider)))
    }

    pub fn apply_overrides(&self, mut config: ValidatorConfig) -> ValidatorConfig {
        if let Some(java_home) = &self.java_home {
            config.java_home = Some(java_home.clone());
        }
        if let Some(cwd) = &self.cwd {
            config.working_dir = cwd.clone();
        }
        if self.debug {
            config.debug = true;
        }
        config
    }
}

/// Document input for a command line path argument
pub fn input_for(path: Option<&Path>) -> XmlInput {
    match path {
        Some(path) if path != Path::new("-") => XmlInput::file(path),
        _ => XmlInput::stream(tokio::io::stdin()),
    }
}
