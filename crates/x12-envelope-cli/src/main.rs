//! x12env CLI
//!
//! Command-line tools for enveloping X12 claim segments.
//!
//! # Commands
//!
//! - `wrap` - Envelope segment lines in a functional group and interchange
//! - `unwrap` - Decode an interchange and print its transaction sets
//! - `version` - Show version information

mod commands;

use clap::{Parser, Subcommand};
use commands::unwrap::OutputFormat;
use tracing_subscriber::EnvFilter;

/// X12 interchange envelope tools.
#[derive(Parser)]
#[command(name = "x12env")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Wrap segment lines in GS/GE and ISA/IEA envelopes
    Wrap(commands::wrap::WrapArgs),

    /// Decode an interchange and print its transaction sets
    Unwrap {
        /// Input file, or - for stdin
        #[arg(short, long, default_value = "-")]
        input: String,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Check ST/SE pairs and functional id codes
        #[arg(long)]
        validate: bool,
    },

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries envelope output.
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Wrap(args) => {
            commands::wrap::run(&args)?;
        }
        Commands::Unwrap {
            input,
            output,
            format,
            validate,
        } => {
            commands::unwrap::run(&input, output.as_deref(), format, validate)?;
        }
        Commands::Version => {
            println!("x12env CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("x12-envelope v{}", x12_envelope::VERSION);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwrap_format() {
        let cli = Cli::try_parse_from(["x12env", "unwrap", "--format", "json"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Unwrap {
                format: OutputFormat::Json,
                ..
            }
        ));

        let cli = Cli::try_parse_from(["x12env", "unwrap"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Unwrap {
                format: OutputFormat::Text,
                ..
            }
        ));

        assert!(Cli::try_parse_from(["x12env", "unwrap", "--format", "xml"]).is_err());
    }

    #[test]
    fn test_wrap_args() {
        let cli = Cli::try_parse_from([
            "x12env",
            "wrap",
            "--sender-id",
            "ABC",
            "--receiver-id",
            "XYZ",
            "--control-number",
            "42",
            "--usage",
            "production",
            "--utc",
        ])
        .unwrap();
        let Commands::Wrap(args) = cli.command else {
            panic!("expected wrap");
        };
        assert_eq!(args.control_number.value(), 42);
        assert_eq!(args.usage, commands::wrap::Usage::Production);
        assert!(args.utc);
        assert!(!args.wire);
    }
}
