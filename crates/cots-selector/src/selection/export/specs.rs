use chrono::{DateTime, Utc};

use super::{iso_timestamp, ExportError, SectionedCsv, SpecSheetRequest};

/// Spec sheet: information block, specification lines, criteria table, metrics table.
pub fn render_specs_csv(
    request: &SpecSheetRequest,
    generated_at: DateTime<Utc>,
) -> Result<String, ExportError> {
    let mut csv = SectionedCsv::new();

    csv.section(|writer| {
        writer.write_record(["COMPONENT SPECIFICATION SHEET"])?;
        writer.write_record(["Date Generated", iso_timestamp(generated_at).as_str()])
    })?
    .blank_line();

    csv.section(|writer| {
        writer.write_record(["COMPONENT INFORMATION"])?;
        writer.write_record(["Component Name", request.name()])?;
        writer.write_record(["Manufacturer", request.manufacturer()])?;
        writer.write_record(["Component Type", request.component_type()])
    })?
    .blank_line();

    csv.section(|writer| {
        writer.write_record(["SPECIFICATIONS"])?;
        for line in &request.specifications {
            writer.write_record([line.as_str()])?;
        }
        Ok(())
    })?
    .blank_line();

    csv.section(|writer| {
        writer.write_record(["CRITERIA MATCHING RESULTS"])?;
        writer.write_record(["Criteria Name", "Status", "Your Value", "Requirement", "Weight"])?;
        for criterion in &request.criteria_matches {
            let status = if criterion.met { "MET" } else { "NOT MET" };
            writer.write_record([
                criterion.name.as_str(),
                status,
                criterion.actual_value.as_str(),
                criterion.requirement.as_str(),
                criterion.weight.label(),
            ])?;
        }
        Ok(())
    })?
    .blank_line();

    csv.section(|writer| {
        writer.write_record(["PERFORMANCE METRICS"])?;
        writer.write_record(["Metric", "Actual Value", "Target Value", "Status"])?;
        for metric in &request.performance_metrics {
            let status = if metric.met { "MET" } else { "CLOSE" };
            writer.write_record([
                metric.label.as_str(),
                metric.actual_value.as_str(),
                metric.target_value.as_str(),
                status,
            ])?;
        }
        Ok(())
    })?;

    Ok(csv.into_string())
}
