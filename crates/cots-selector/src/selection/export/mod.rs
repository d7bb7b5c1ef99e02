//! Downloadable documents: spec sheet CSV, text datasheet and bill of materials.
//!
//! Every renderer takes the generation time explicitly so output is reproducible.

mod bom;
mod datasheet;
mod specs;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use bom::render_bom_csv;
pub use datasheet::render_datasheet;
pub use specs::render_specs_csv;

use super::domain::{
    leading_float, ComponentCategory, CriterionResult, PerformanceMetric, Recommendation,
};

pub const PLACEHOLDER: &str = "N/A";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("csv encoding failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("export buffer failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Payload for the spec sheet and datasheet exports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecSheetRequest {
    #[serde(default)]
    pub component_name: Option<String>,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub component_type: Option<String>,
    #[serde(default)]
    pub specifications: Vec<String>,
    #[serde(default)]
    pub criteria_matches: Vec<CriterionResult>,
    #[serde(default)]
    pub performance_metrics: Vec<PerformanceMetric>,
}

impl SpecSheetRequest {
    pub fn from_recommendation(recommendation: &Recommendation, category: ComponentCategory) -> Self {
        Self {
            component_name: Some(recommendation.name.clone()),
            manufacturer: Some(recommendation.manufacturer.clone()),
            component_type: Some(category.label().to_string()),
            specifications: recommendation.specifications.clone(),
            criteria_matches: recommendation.criteria_matches.clone(),
            performance_metrics: recommendation.performance_metrics.clone(),
        }
    }

    pub(crate) fn name(&self) -> &str {
        or_placeholder(&self.component_name)
    }

    pub(crate) fn manufacturer(&self) -> &str {
        or_placeholder(&self.manufacturer)
    }

    pub(crate) fn component_type(&self) -> &str {
        or_placeholder(&self.component_type)
    }
}

/// One bill-of-materials row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BomLine {
    pub name: String,
    #[serde(default)]
    pub manufacturer: String,
    #[serde(default)]
    pub part_number: Option<String>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub availability: Option<String>,
    #[serde(default)]
    pub lead_time: Option<String>,
    #[serde(default)]
    pub vendor_url: Option<String>,
}

fn default_quantity() -> u32 {
    1
}

impl BomLine {
    pub fn from_recommendation(recommendation: &Recommendation, quantity: u32) -> Self {
        Self {
            name: recommendation.name.clone(),
            manufacturer: recommendation.manufacturer.clone(),
            part_number: recommendation.part_number.clone(),
            quantity: quantity.max(1),
            price: Some(recommendation.price.clone()),
            availability: Some(recommendation.availability.clone()),
            lead_time: recommendation.lead_time.clone(),
            vendor_url: Some(recommendation.vendor_url.clone()),
        }
    }

    /// Unit price lower bound times quantity, when the price carries a number.
    pub fn line_total(&self) -> Option<f64> {
        self.price
            .as_deref()
            .and_then(unit_price)
            .map(|unit| unit * f64::from(self.quantity.max(1)))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BomRequest {
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub components: Vec<BomLine>,
}

impl BomRequest {
    pub fn project_name_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.project_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(default)
    }
}

/// A rendered export ready to be served as an attachment.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportDocument {
    pub filename: String,
    pub content_type: mime::Mime,
    pub body: String,
}

impl ExportDocument {
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.filename)
    }
}

pub fn specs_document(
    request: &SpecSheetRequest,
    generated_at: DateTime<Utc>,
) -> Result<ExportDocument, ExportError> {
    let stem = request.component_name.as_deref().unwrap_or("specs");
    Ok(ExportDocument {
        filename: attachment_name(&format!("{}-specs", stem), generated_at, "csv"),
        content_type: mime::TEXT_CSV,
        body: render_specs_csv(request, generated_at)?,
    })
}

pub fn datasheet_document(request: &SpecSheetRequest, generated_at: DateTime<Utc>) -> ExportDocument {
    let stem = request.component_name.as_deref().unwrap_or("component");
    ExportDocument {
        filename: attachment_name(&format!("{}-datasheet", stem), generated_at, "txt"),
        content_type: mime::TEXT_PLAIN_UTF_8,
        body: render_datasheet(request, generated_at),
    }
}

pub fn bom_document(
    request: &BomRequest,
    default_project: &str,
    generated_at: DateTime<Utc>,
) -> Result<ExportDocument, ExportError> {
    let project = request.project_name_or(default_project);
    Ok(ExportDocument {
        filename: attachment_name(&format!("BOM-{}", project), generated_at, "csv"),
        content_type: mime::TEXT_CSV,
        body: render_bom_csv(request, project, generated_at)?,
    })
}

/// Lower bound of a price string: `"$25-35"` reads as `25`, `"Call"` as `None`.
pub fn unit_price(price: &str) -> Option<f64> {
    let digits: String = price
        .chars()
        .filter(|ch| ch.is_ascii_digit() || *ch == '.' || *ch == '-')
        .collect();
    leading_float(&digits)
}

/// `<stem>-<epoch millis>.<ext>` with header-unsafe characters replaced.
fn attachment_name(stem: &str, generated_at: DateTime<Utc>, extension: &str) -> String {
    let safe: String = stem
        .chars()
        .map(|ch| {
            if (ch.is_ascii_graphic() && ch != '"' && ch != '\\') || ch == ' ' {
                ch
            } else {
                '_'
            }
        })
        .collect();
    format!("{}-{}.{}", safe, generated_at.timestamp_millis(), extension)
}

fn or_placeholder(value: &Option<String>) -> &str {
    value
        .as_deref()
        .filter(|text| !text.is_empty())
        .unwrap_or(PLACEHOLDER)
}

fn iso_timestamp(generated_at: DateTime<Utc>) -> String {
    generated_at.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Shared CSV writer: ragged rows, `\n` line endings.
fn csv_writer() -> csv::Writer<Vec<u8>> {
    csv::WriterBuilder::new()
        .flexible(true)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new())
}

/// CSV text assembled section by section, with a blank line between sections.
#[derive(Debug, Default)]
struct SectionedCsv {
    text: String,
}

impl SectionedCsv {
    fn new() -> Self {
        Self::default()
    }

    /// Renders one block of records through a fresh writer and appends it.
    fn section<F>(&mut self, write: F) -> Result<&mut Self, ExportError>
    where
        F: FnOnce(&mut csv::Writer<Vec<u8>>) -> Result<(), csv::Error>,
    {
        let mut writer = csv_writer();
        write(&mut writer)?;
        self.text.push_str(&finish(writer)?);
        Ok(self)
    }

    fn blank_line(&mut self) -> &mut Self {
        self.text.push('\n');
        self
    }

    fn into_string(self) -> String {
        self.text
    }
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String, ExportError> {
    let bytes = writer
        .into_inner()
        .map_err(|error| {
            ExportError::Io(std::io::Error::new(error.error().kind(), error.to_string()))
        })?;
    String::from_utf8(bytes)
        .map_err(|error| ExportError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, error)))
}
