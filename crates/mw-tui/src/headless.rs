//! Non-interactive output of a finished map

use mw_core::Generated;
use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Default)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    /// The grid as text, highest row first
    #[default]
    Ascii,
    /// The whole [`Generated`] record, pretty-printed
    Json,
}

/// Render a finished map for stdout
pub fn render(generated: &Generated, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Ascii => Ok(generated.grid.to_ascii()),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(generated)?;
            json.push('\n');
            Ok(json)
        }
    }
}
