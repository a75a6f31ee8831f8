//! Wrap command implementation.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use tracing::info;
use x12_envelope::{
    wrap_segments, Clock, ControlNumber, EncodeOptions, EnvelopeBuilder, SystemClock,
    UsageIndicator, UtcClock,
};

/// Envelope parameters. Each one can also come from an `X12_*` variable.
#[derive(Debug, Args)]
pub struct WrapArgs {
    /// Segment file, one or more segments per line, or - for stdin
    #[arg(short, long, default_value = "-")]
    pub input: String,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// ISA06/GS02 sender id
    #[arg(long, env = "X12_SENDER_ID")]
    pub sender_id: String,

    /// ISA08/GS03 receiver id
    #[arg(long, env = "X12_RECEIVER_ID")]
    pub receiver_id: String,

    /// ISA05 sender id qualifier
    #[arg(long, env = "X12_SENDER_QUALIFIER", default_value = "ZZ")]
    pub sender_qualifier: String,

    /// ISA07 receiver id qualifier
    #[arg(long, env = "X12_RECEIVER_QUALIFIER", default_value = "ZZ")]
    pub receiver_qualifier: String,

    /// ISA13 interchange control number (also GS06 unless overridden)
    #[arg(long, env = "X12_CONTROL_NUMBER")]
    pub control_number: ControlNumber,

    /// GS06 group control number
    #[arg(long, env = "X12_GROUP_CONTROL_NUMBER")]
    pub group_control_number: Option<ControlNumber>,

    /// GS01 functional identifier code
    #[arg(long, env = "X12_FUNCTIONAL_ID_CODE", default_value = "HC")]
    pub functional_id_code: String,

    /// GS08 version part
    #[arg(long, env = "X12_VERSION", default_value = "005010X")]
    pub version: String,

    /// GS08 release part
    #[arg(long, env = "X12_RELEASE", default_value = "222")]
    pub release: String,

    /// GS08 addenda part
    #[arg(long, env = "X12_ADDENDA", default_value = "A1")]
    pub addenda: String,

    /// ISA15 usage indicator
    #[arg(long, env = "X12_USAGE", value_enum, default_value_t = Usage::Test)]
    pub usage: Usage,

    /// Request a TA1 acknowledgment (ISA14)
    #[arg(long)]
    pub ack: bool,

    /// Write segments back to back without newlines
    #[arg(long)]
    pub wire: bool,

    /// Stamp headers with UTC instead of local time
    #[arg(long, env = "X12_UTC")]
    pub utc: bool,
}

/// ISA15 values accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Usage {
    Test,
    Production,
    Information,
}

impl From<Usage> for UsageIndicator {
    fn from(usage: Usage) -> Self {
        match usage {
            Usage::Test => UsageIndicator::Test,
            Usage::Production => UsageIndicator::Production,
            Usage::Information => UsageIndicator::Information,
        }
    }
}

/// Runs the wrap command.
pub fn run(args: &WrapArgs) -> Result<(), Box<dyn std::error::Error>> {
    info!("Wrapping segments from {}", args.input);
    let text = super::read_input(&args.input)?;

    let config = EnvelopeBuilder::new(&args.sender_id, &args.receiver_id)
        .qualifiers(&args.sender_qualifier, &args.receiver_qualifier)
        .interchange_control_number(args.control_number)
        .group_control_number(args.group_control_number.unwrap_or(args.control_number))
        .functional_id_code(&args.functional_id_code)
        .version(&args.version, &args.release, &args.addenda)
        .usage(args.usage.into())
        .acknowledgment_requested(args.ack)
        .build()?;

    let options = if args.wire {
        EncodeOptions::wire()
    } else {
        EncodeOptions::new()
    };
    let clock: &dyn Clock = if args.utc { &UtcClock } else { &SystemClock };
    let envelope = wrap_segments(text.lines(), &config, clock, options)?;
    super::write_output(args.output.as_deref(), &envelope)?;

    info!(
        "Wrapped interchange {} from {} to {}",
        config.interchange.control_number, args.sender_id, args.receiver_id
    );
    Ok(())
}
