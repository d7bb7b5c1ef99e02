use chrono::{DateTime, Utc};

use super::SpecSheetRequest;

const RULE_WIDTH: usize = 51;

/// Fixed-width, human-readable datasheet.
pub fn render_datasheet(request: &SpecSheetRequest, generated_at: DateTime<Utc>) -> String {
    let heavy = "═".repeat(RULE_WIDTH);
    let light = "─".repeat(RULE_WIDTH);
    let mut lines: Vec<String> = Vec::new();

    lines.push(heavy.clone());
    lines.push("           COMPONENT TECHNICAL DATASHEET".to_string());
    lines.push(heavy.clone());
    lines.push(String::new());
    lines.push(field("Component:", request.name()));
    lines.push(field("Manufacturer:", request.manufacturer()));
    lines.push(field("Type:", request.component_type()));
    lines.push(field(
        "Generated:",
        &generated_at.format("%Y-%m-%d").to_string(),
    ));
    lines.push(String::new());

    section(&mut lines, &light, "TECHNICAL SPECIFICATIONS");
    lines.extend(request.specifications.iter().map(|line| format!("• {}", line)));
    lines.push(String::new());

    section(&mut lines, &light, "REQUIREMENTS COMPLIANCE");
    for criterion in &request.criteria_matches {
        let mark = if criterion.met { "✓" } else { "✗" };
        lines.push(format!(
            "{} {} ({})",
            mark,
            criterion.name,
            criterion.weight.label().to_ascii_uppercase()
        ));
        lines.push(format!("    Requirement: {}", criterion.requirement));
        lines.push(format!("    Your Input:  {}", criterion.actual_value));
        lines.push(String::new());
    }

    section(&mut lines, &light, "PERFORMANCE ANALYSIS");
    for metric in &request.performance_metrics {
        let verdict = if metric.met { "PASS" } else { "MARGINAL" };
        lines.push(format!(
            "• {}: {} (Target: {}) - {}",
            metric.label, metric.actual_value, metric.target_value, verdict
        ));
    }
    lines.push(String::new());
    lines.push(heavy);

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

fn field(label: &str, value: &str) -> String {
    format!("{:<18}{}", label, value)
}

fn section(lines: &mut Vec<String>, rule: &str, title: &str) {
    lines.push(rule.to_string());
    lines.push(title.to_string());
    lines.push(rule.to_string());
}
