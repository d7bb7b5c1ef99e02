use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Closed set of component families the selector knows how to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentCategory {
    Bearing,
    Motor,
    Gear,
    Seal,
    Fastener,
}

impl ComponentCategory {
    pub const ALL: [ComponentCategory; 5] = [
        ComponentCategory::Bearing,
        ComponentCategory::Motor,
        ComponentCategory::Gear,
        ComponentCategory::Seal,
        ComponentCategory::Fastener,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            ComponentCategory::Bearing => "bearing",
            ComponentCategory::Motor => "motor",
            ComponentCategory::Gear => "gear",
            ComponentCategory::Seal => "seal",
            ComponentCategory::Fastener => "fastener",
        }
    }

    /// Parses an optional, caller-supplied tag. Absent and blank tags are both `Missing`.
    pub fn parse_optional(raw: Option<&str>) -> Result<Self, ParseCategoryError> {
        match raw.map(str::trim) {
            None | Some("") => Err(ParseCategoryError::Missing),
            Some(value) => value.parse(),
        }
    }
}

impl fmt::Display for ComponentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ComponentCategory {
    type Err = ParseCategoryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            return Err(ParseCategoryError::Missing);
        }
        ComponentCategory::ALL
            .into_iter()
            .find(|category| category.label() == normalized)
            .ok_or_else(|| ParseCategoryError::Unknown(value.trim().to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseCategoryError {
    #[error("Component type is required")]
    Missing,
    #[error("Unknown component type: {0}")]
    Unknown(String),
}

/// User-entered requirements keyed by form field name.
///
/// Values are kept as text; numeric interpretation happens per rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, Value>",
    into = "BTreeMap<String, String>"
)]
pub struct RequirementSet {
    fields: BTreeMap<String, String>,
}

impl RequirementSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Returns the raw value unless it is absent or empty.
    pub fn present(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|value| !value.is_empty())
    }

    /// Leading-prefix float parse; absent or unparsable input reads as `0`.
    pub fn number(&self, key: &str) -> f64 {
        self.present(key)
            .and_then(leading_float)
            .map(normalize_zero)
            .unwrap_or(0.0)
    }

    /// Leading-prefix integer parse; absent or unparsable input reads as `0`.
    pub fn integer(&self, key: &str) -> f64 {
        self.present(key)
            .and_then(leading_integer)
            .map(normalize_zero)
            .unwrap_or(0.0)
    }

    pub fn text_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.present(key).unwrap_or(default)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl From<BTreeMap<String, Value>> for RequirementSet {
    fn from(raw: BTreeMap<String, Value>) -> Self {
        let fields = raw
            .into_iter()
            .filter_map(|(key, value)| {
                let text = match value {
                    Value::Null => return None,
                    Value::String(text) => text,
                    Value::Bool(flag) => flag.to_string(),
                    Value::Number(number) => number.to_string(),
                    other => other.to_string(),
                };
                Some((key, text))
            })
            .collect();
        Self { fields }
    }
}

impl From<RequirementSet> for BTreeMap<String, String> {
    fn from(value: RequirementSet) -> Self {
        value.fields
    }
}

impl<K, V> FromIterator<(K, V)> for RequirementSet
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut set = RequirementSet::new();
        for (key, value) in iter {
            set.insert(key, value);
        }
        set
    }
}

fn normalize_zero(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}

/// Parses the longest numeric prefix of `raw` (`"28.9 kN"` reads as `28.9`).
pub(crate) fn leading_float(raw: &str) -> Option<f64> {
    let trimmed = raw.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }

    if mantissa_digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > digits_start {
            end = exp_end;
        }
    }

    trimmed[..end].parse::<f64>().ok()
}

/// Parses the longest integer prefix of `raw` (`"40.7"` reads as `40`).
pub(crate) fn leading_integer(raw: &str) -> Option<f64> {
    let trimmed = raw.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }
    trimmed[..end].parse::<f64>().ok()
}

/// Named substitute offered alongside a recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alternative {
    pub name: String,
    pub manufacturer: String,
}

/// Reference catalog entry. Immutable once handed out by a catalog provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentRecord {
    pub id: String,
    pub name: String,
    pub manufacturer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_number: Option<String>,
    pub rating: f32,
    pub price: String,
    pub availability: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead_time: Option<String>,
    pub ratings: ComponentRatings,
    #[serde(default)]
    pub pros: Vec<String>,
    #[serde(default)]
    pub cons: Vec<String>,
    #[serde(default)]
    pub alternatives: Vec<Alternative>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_url: Option<String>,
}

impl ComponentRecord {
    pub fn category(&self) -> ComponentCategory {
        self.ratings.category()
    }

    /// Display lines, derived from the typed ratings so the two never drift.
    pub fn specifications(&self) -> Vec<String> {
        self.ratings.specification_lines()
    }
}

/// Typed reference values for a catalog record; the variant fixes the category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "lowercase")]
pub enum ComponentRatings {
    Bearing(BearingRatings),
    Motor(MotorRatings),
    Gear(GearRatings),
    Seal(SealRatings),
    Fastener(FastenerRatings),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BearingRatings {
    pub bore_mm: f64,
    pub outer_diameter_mm: f64,
    pub width_mm: f64,
    pub dynamic_load_kn: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_load_kn: Option<f64>,
    pub speed_rpm: f64,
    pub l10_life_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MotorRatings {
    pub power_kw: f64,
    pub speed_rpm: f64,
    pub voltage: String,
    pub frame_size: String,
    pub efficiency_pct: f64,
    pub efficiency_class: String,
    pub insulation_class: String,
    pub duty_classes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GearRatings {
    pub module_mm: f64,
    pub material: String,
    pub pressure_angle_deg: f64,
    pub bore_mm: f64,
    pub face_width_mm: f64,
    pub power_transmission_kw: f64,
    pub precision_grade: String,
    pub noise_db: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SealRatings {
    pub diameter_mm: f64,
    pub pressure_bar: f64,
    pub elastomer: String,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
    pub leakage_rate: String,
    pub service_life_years: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FastenerRatings {
    pub thread: String,
    pub grade: String,
    pub clamp_load_n: f64,
    pub tensile_strength_mpa: f64,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
    pub finish: String,
}

impl ComponentRatings {
    pub fn category(&self) -> ComponentCategory {
        match self {
            ComponentRatings::Bearing(_) => ComponentCategory::Bearing,
            ComponentRatings::Motor(_) => ComponentCategory::Motor,
            ComponentRatings::Gear(_) => ComponentCategory::Gear,
            ComponentRatings::Seal(_) => ComponentCategory::Seal,
            ComponentRatings::Fastener(_) => ComponentCategory::Fastener,
        }
    }

    pub fn specification_lines(&self) -> Vec<String> {
        match self {
            ComponentRatings::Bearing(r) => {
                let mut lines = vec![
                    format!("Bore diameter: {}mm", r.bore_mm),
                    format!("Outer diameter: {}mm", r.outer_diameter_mm),
                    format!("Width: {}mm", r.width_mm),
                    format!("Dynamic load rating: {} kN", r.dynamic_load_kn),
                ];
                if let Some(static_load) = r.static_load_kn {
                    lines.push(format!("Static load rating: {} kN", static_load));
                }
                lines.push(format!("Speed rating: {} RPM", grouped(r.speed_rpm)));
                lines
            }
            ComponentRatings::Motor(r) => vec![
                format!("Power: {} kW", r.power_kw),
                format!("Speed: {} RPM", r.speed_rpm),
                format!("Voltage: {}", r.voltage),
                format!("Frame size: {}", r.frame_size),
                format!("Efficiency: {}% ({})", r.efficiency_pct, r.efficiency_class),
            ],
            ComponentRatings::Gear(r) => vec![
                format!("Module: {}mm", with_decimal(r.module_mm)),
                format!("Material: {}", r.material),
                format!("Pressure angle: {}°", r.pressure_angle_deg),
                format!("Bore: {}mm", r.bore_mm),
                format!("Face width: {}mm", r.face_width_mm),
            ],
            ComponentRatings::Seal(r) => vec![
                format!("Diameter: {}mm", r.diameter_mm),
                format!("Pressure rating: {} bar", r.pressure_bar),
                format!("Material: {}", r.elastomer),
                format!(
                    "Temperature range: {}°C",
                    temperature_span(r.temp_min_c, r.temp_max_c)
                ),
            ],
            ComponentRatings::Fastener(r) => vec![
                format!("Diameter: {}", r.thread),
                format!("Material: Steel {}", r.grade),
                format!("Clamp load capacity: {} N", r.clamp_load_n),
                format!(
                    "Temperature tolerance: {}°C",
                    temperature_span(r.temp_min_c, r.temp_max_c)
                ),
            ],
        }
    }
}

/// Formats a whole-number reading with thousands separators (`10000` -> `10,000`).
pub(crate) fn grouped(value: f64) -> String {
    if value.fract() != 0.0 || !value.is_finite() {
        return value.to_string();
    }
    let digits = format!("{}", value.abs() as u64);
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if value < 0.0 {
        out.insert(0, '-');
    }
    out
}

/// Keeps at least one decimal place so `2` renders as `2.0`.
fn with_decimal(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

/// `-30, 100` -> `-30 to +100`.
pub(crate) fn temperature_span(min: f64, max: f64) -> String {
    format!("{} to {}", signed(min), signed(max))
}

fn signed(value: f64) -> String {
    if value > 0.0 {
        format!("+{}", value)
    } else {
        value.to_string()
    }
}

/// Display/priority tag on a criterion. Never feeds the numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CriterionWeight {
    Critical,
    High,
    Medium,
    Low,
}

impl CriterionWeight {
    pub const fn label(self) -> &'static str {
        match self {
            CriterionWeight::Critical => "critical",
            CriterionWeight::High => "high",
            CriterionWeight::Medium => "medium",
            CriterionWeight::Low => "low",
        }
    }
}

/// Outcome of one evaluation rule for one candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionResult {
    pub name: String,
    #[serde(rename = "value")]
    pub actual_value: String,
    pub requirement: String,
    pub met: bool,
    pub weight: CriterionWeight,
}

/// Advisory actual-vs-target comparison shown next to the criteria.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceMetric {
    pub label: String,
    #[serde(rename = "value")]
    pub actual_value: String,
    #[serde(rename = "target")]
    pub target_value: String,
    pub met: bool,
}

/// A catalog record enriched with its evaluation against one requirement set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub id: String,
    pub name: String,
    pub manufacturer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_number: Option<String>,
    pub rating: f32,
    pub price: String,
    pub availability: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead_time: Option<String>,
    pub specifications: Vec<String>,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub alternatives: Vec<Alternative>,
    pub vendor_url: String,
    pub match_score: u8,
    pub matched_count: usize,
    pub criteria_matches: Vec<CriterionResult>,
    pub performance_metrics: Vec<PerformanceMetric>,
}

/// Ordered recommendations for one request, in catalog order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationSet {
    pub category: ComponentCategory,
    pub recommendations: Vec<Recommendation>,
    pub total_results: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RecommendationSet {
    pub fn is_empty(&self) -> bool {
        self.recommendations.is_empty()
    }
}
