//! Unwrap command implementation.

use std::path::Path;

use clap::ValueEnum;
use tracing::info;
use x12_envelope::{decode_interchange, validate_interchange};

/// Output formats for decoded interchanges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Transaction sets, one segment per line
    Text,
    /// The full interchange as JSON
    Json,
}

/// Runs the unwrap command.
pub fn run(
    input: &str,
    output: Option<&Path>,
    format: OutputFormat,
    validate: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    info!("Unwrapping interchange from {}", input);
    let text = super::read_input(input)?;
    let interchange = decode_interchange(&text)?;

    if validate {
        validate_interchange(&interchange)?;
        info!("All transaction sets passed ST/SE checks");
    }

    info!(
        "Interchange {} from {} to {}: group {} ({}) with {} transaction set(s)",
        interchange.header.control_number,
        interchange.header.sender_id,
        interchange.header.receiver_id,
        interchange.group.header.control_number,
        interchange.group.header.functional_id_code,
        interchange.transaction_sets().len()
    );

    // Output
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&interchange)? + "\n",
        OutputFormat::Text => interchange
            .transaction_sets()
            .iter()
            .map(|set| set.to_text(&interchange.delimiters))
            .collect(),
    };
    super::write_output(output, &rendered)?;

    Ok(())
}
