//! LOT-OUT: traceability record export
//!
//! Renders a validated [`TraceabilityRecord`] into one of the supported
//! export targets. Formatting is pure and deterministic; no business rules
//! are applied here.
//!
//! # Example
//!
//! ```ignore
//! use lot_out::{format, ExportTarget};
//!
//! let xml = format(&record, ExportTarget::XmlAuthorities)?;
//! let csv = format(&record, "csv".parse()?)?;
//! ```

pub mod csv;
pub mod renderer;
pub mod templates;
pub mod view;

pub use csv::{format_batch_csv, format_csv, CSV_HEADER};
pub use renderer::{xml_escape, TemplateRenderer};
pub use templates::TemplatesFile;
pub use view::RecordView;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use lot_core::{LotError, LotResult, TraceabilityRecord};

/// Supported export targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportTarget {
    Csv,
    Xml,
    XmlAuthorities,
    HumanReadable,
    /// Text payload for the label QR code
    QrContent,
    Json,
}

impl ExportTarget {
    pub const ALL: [ExportTarget; 6] = [
        ExportTarget::Csv,
        ExportTarget::Xml,
        ExportTarget::XmlAuthorities,
        ExportTarget::HumanReadable,
        ExportTarget::QrContent,
        ExportTarget::Json,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportTarget::Csv => "csv",
            ExportTarget::Xml => "xml",
            ExportTarget::XmlAuthorities => "xml_authorities",
            ExportTarget::HumanReadable => "human_readable",
            ExportTarget::QrContent => "qr_content",
            ExportTarget::Json => "json",
        }
    }

    /// MIME type for the HTTP surface
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportTarget::Csv => "text/csv; charset=utf-8",
            ExportTarget::Xml | ExportTarget::XmlAuthorities => "application/xml; charset=utf-8",
            ExportTarget::HumanReadable | ExportTarget::QrContent => "text/plain; charset=utf-8",
            ExportTarget::Json => "application/json",
        }
    }
}

impl fmt::Display for ExportTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportTarget {
    type Err = LotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExportTarget::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| LotError::Format(s.to_string()))
    }
}

lazy_static! {
    static ref EMBEDDED: Result<TemplateRenderer, String> =
        TemplateRenderer::embedded().map_err(|e| e.to_string());
}

fn embedded_renderer() -> LotResult<&'static TemplateRenderer> {
    EMBEDDED
        .as_ref()
        .map_err(|e| LotError::Config(e.clone()))
}

/// Format a record with the embedded templates
pub fn format(record: &TraceabilityRecord, target: ExportTarget) -> LotResult<String> {
    format_with(embedded_renderer()?, record, target)
}

/// Format a record for a target given by name (e.g. `"xml_authorities"`)
pub fn format_named(record: &TraceabilityRecord, target: &str) -> LotResult<String> {
    format(record, target.parse()?)
}

/// Format a record with a caller-supplied renderer
pub fn format_with(
    renderer: &TemplateRenderer,
    record: &TraceabilityRecord,
    target: ExportTarget,
) -> LotResult<String> {
    let output = match target {
        ExportTarget::Csv => csv::format_csv(record),
        ExportTarget::Json => serde_json::to_string_pretty(record)
            .map_err(|e| LotError::Serialize(e.to_string()))?,
        ExportTarget::Xml
        | ExportTarget::XmlAuthorities
        | ExportTarget::HumanReadable
        | ExportTarget::QrContent => {
            renderer.render(target.as_str(), &RecordView::from(record))?
        }
    };
    tracing::debug!(
        lot_id = %record.lot_id,
        target = %target,
        bytes = output.len(),
        "record exported"
    );
    Ok(output)
}
