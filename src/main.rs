//! FieldGuard - Named validation patterns for form input
//!
//! Command-line front end for listing, testing and applying the registry.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use fieldguard::{
    config::{FieldGuardConfig, BLANK},
    FieldValidator, PatternRegistry,
};
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "fieldguard")]
#[command(author = "A3S Lab Team")]
#[command(version)]
#[command(about = "Named validation patterns for form input")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "FIELDGUARD_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered patterns
    List,

    /// Test a value against a pattern (exit code 1 if invalid)
    Check {
        /// Pattern name
        name: String,

        /// Value to test
        input: String,
    },

    /// Remove every run matched by a pattern
    Strip {
        /// Pattern used for stripping
        #[arg(short, long, default_value = BLANK)]
        pattern: String,

        /// Value to strip
        input: String,
    },

    /// Validate fields given as FIELD=PATTERN:VALUE and print a JSON report
    Validate {
        /// Field specifications
        #[arg(required = true)]
        fields: Vec<String>,

        /// Strip whitespace before testing
        #[arg(long)]
        strip_blank: bool,
    },

    /// Show configuration
    Config {
        /// Show default configuration
        #[arg(long)]
        default: bool,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("fieldguard={}", log_level).into());
    if cli.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    // Load configuration
    let config = match &cli.config {
        Some(path) => FieldGuardConfig::load(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => FieldGuardConfig::default(),
    };

    let registry = PatternRegistry::from_config(&config.registry)
        .context("Failed to build pattern registry")?;
    fieldguard::install(registry)?;
    let registry = fieldguard::global()?;

    match cli.command {
        Commands::List => list_patterns(registry),
        Commands::Check { name, input } => check(registry, &name, &input),
        Commands::Strip { pattern, input } => {
            println!("{}", registry.strip(&pattern, &input)?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Validate {
            fields,
            strip_blank,
        } => validate(registry, &fields, strip_blank),
        Commands::Config { default } => {
            let shown = if default {
                FieldGuardConfig::default()
            } else {
                config
            };
            println!("{}", shown.to_toml()?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn list_patterns(registry: &PatternRegistry) -> Result<ExitCode> {
    let width = registry.names().iter().map(|n| n.len()).max().unwrap_or(0);
    for pattern in registry.iter() {
        println!("{:width$}  {}", pattern.name(), pattern.description(), width = width);
    }
    Ok(ExitCode::SUCCESS)
}

fn check(registry: &PatternRegistry, name: &str, input: &str) -> Result<ExitCode> {
    if registry.test(name, input)? {
        println!("valid");
        Ok(ExitCode::SUCCESS)
    } else {
        println!("invalid");
        Ok(ExitCode::FAILURE)
    }
}

fn validate(registry: &PatternRegistry, specs: &[String], strip_blank: bool) -> Result<ExitCode> {
    let mut validator = FieldValidator::new(registry).strip_blank(strip_blank);
    let mut values = HashMap::new();

    for spec in specs {
        let (field, pattern, value) = parse_field_spec(spec)?;
        if values.insert(field.to_string(), value.to_string()).is_some() {
            bail!("Duplicate field '{}'", field);
        }
        validator = validator.field(field, pattern);
    }

    let report = validator.validate(&values)?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(if report.is_valid() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Split a `FIELD=PATTERN:VALUE` argument
fn parse_field_spec(spec: &str) -> Result<(&str, &str, &str)> {
    let (field, rest) = spec
        .split_once('=')
        .with_context(|| format!("Expected FIELD=PATTERN:VALUE, got '{}'", spec))?;
    let (pattern, value) = rest
        .split_once(':')
        .with_context(|| format!("Expected FIELD=PATTERN:VALUE, got '{}'", spec))?;
    if field.is_empty() {
        bail!("Empty field name in '{}'", spec);
    }
    Ok((field, pattern, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_registry() -> PatternRegistry {
        PatternRegistry::new(FieldGuardConfig::default().registry.rules).unwrap()
    }

    fn args(specs: &[&str]) -> Vec<String> {
        specs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_field_spec() {
        assert_eq!(
            parse_field_spec("phone=phone:01012345678").unwrap(),
            ("phone", "phone", "01012345678")
        );
        // Only the first ':' separates pattern from value
        assert_eq!(
            parse_field_spec("note=blank:a:b").unwrap(),
            ("note", "blank", "a:b")
        );
        assert_eq!(parse_field_spec("f=blank:").unwrap(), ("f", "blank", ""));
    }

    #[test]
    fn test_parse_field_spec_rejects_malformed() {
        assert!(parse_field_spec("phone:01012345678").is_err());
        assert!(parse_field_spec("phone=01012345678").is_err());
        assert!(parse_field_spec("=phone:01012345678").is_err());
    }

    #[test]
    fn test_validate_rejects_duplicate_field() {
        let registry = create_test_registry();
        let err = validate(
            &registry,
            &args(&["f=phone:01012345678", "f=email:user@example.com"]),
            false,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Duplicate field 'f'"));
    }

    #[test]
    fn test_validate_distinct_fields() {
        let registry = create_test_registry();
        let code = validate(
            &registry,
            &args(&["phone=phone:01012345678", "email=email:user@example.com"]),
            false,
        )
        .unwrap();
        assert_eq!(code, ExitCode::SUCCESS);

        let code = validate(&registry, &args(&["phone=phone:02012345678"]), false).unwrap();
        assert_eq!(code, ExitCode::FAILURE);
    }
}
