use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use xsd_schema_validator::cli::{Cli, Command, input_for};
use xsd_schema_validator::output::{Output, OutputFormat};
use xsd_schema_validator::{ValidationOptions, Validator, ValidatorError};

const EXIT_INVALID: u8 = 1;
const EXIT_FAILURE: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_tracing(cli.debug);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn init_tracing(debug: bool) {
    let default_directive = if debug {
        "warn,xsd_schema_validator=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = cli
        .load_config()
        .await
        .context("failed to load configuration")?;
    let validator = Validator::new(config);

    match cli.command {
        Command::Setup { force } => {
            if force {
                validator.rebuild().await?;
            } else {
                validator.setup().await?;
            }
            println!(
                "Helper ready in {}",
                validator.config().base_dir.display()
            );
            Ok(ExitCode::SUCCESS)
        }
        Command::Validate {
            schema,
            insecure,
            format,
            input,
        } => {
            let output = Output::new(format);
            let input = input_for(input.as_deref());

            match validator
                .validate_xml(input, &schema, ValidationOptions { insecure })
                .await
            {
                Ok(outcome) => {
                    println!("{}", output.format_outcome(&outcome));
                    Ok(ExitCode::SUCCESS)
                }
                Err(ValidatorError::ValidationFailed(outcome)) => {
                    println!("{}", output.format_outcome(&outcome));
                    Ok(ExitCode::from(EXIT_INVALID))
                }
                Err(e) => {
                    if format == OutputFormat::Json {
                        println!("{}", output.format_failure(&e));
                    } else {
                        eprintln!("{}", output.format_failure(&e));
                    }
                    Ok(ExitCode::from(EXIT_FAILURE))
                }
            }
        }
    }
}
