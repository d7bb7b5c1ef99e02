use chrono::{DateTime, Utc};

use super::{
    iso_timestamp, or_placeholder, BomRequest, ExportError, SectionedCsv, PLACEHOLDER,
};

const HEADER: [&str; 10] = [
    "Item #",
    "Component Name",
    "Manufacturer",
    "Part Number",
    "Qty",
    "Unit Price",
    "Total Price",
    "Availability",
    "Lead Time",
    "Vendor URL",
];

/// Bill of materials with per-line totals and a trailing estimated-cost row.
pub fn render_bom_csv(
    request: &BomRequest,
    project_name: &str,
    generated_at: DateTime<Utc>,
) -> Result<String, ExportError> {
    let mut csv = SectionedCsv::new();

    csv.section(|writer| {
        writer.write_record(["BILL OF MATERIALS (BOM)"])?;
        writer.write_record(["Project", project_name])?;
        writer.write_record(["Date Generated", iso_timestamp(generated_at).as_str()])?;
        writer.write_record([
            "Total Components".to_string(),
            request.components.len().to_string(),
        ])
    })?
    .blank_line();

    let mut estimated_total = 0.0_f64;
    csv.section(|writer| {
        writer.write_record(HEADER)?;
        for (index, line) in request.components.iter().enumerate() {
            let line_total = line.line_total();
            estimated_total += line_total.unwrap_or(0.0);

            let availability = line
                .availability
                .as_deref()
                .filter(|value| !value.is_empty())
                .unwrap_or("Check Vendor");

            writer.write_record([
                (index + 1).to_string(),
                line.name.clone(),
                line.manufacturer.clone(),
                or_placeholder(&line.part_number).to_string(),
                line.quantity.max(1).to_string(),
                or_placeholder(&line.price).to_string(),
                line_total
                    .map(|total| format!("{:.2}", total))
                    .unwrap_or_else(|| PLACEHOLDER.to_string()),
                availability.to_string(),
                or_placeholder(&line.lead_time).to_string(),
                or_placeholder(&line.vendor_url).to_string(),
            ])?;
        }
        Ok(())
    })?
    .blank_line();

    let total = format!("{:.2}", estimated_total);
    csv.section(|writer| {
        writer.write_record(["Total Estimated Cost", "", "", "", "", "", total.as_str()])
    })?;

    Ok(csv.into_string())
}
