use crate::infra::{load_catalog, parse_field};
use chrono::Utc;
use clap::Args;
use cots_selector::config::AppConfig;
use cots_selector::error::AppError;
use cots_selector::selection::export::{self, render_datasheet};
use cots_selector::selection::{
    CatalogQuery, ComponentCategory, ComponentRecord, RecommendationService, RecommendationSet,
    RequirementSet, SelectionError, SelectorState, SpecSheetRequest,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct RecommendArgs {
    /// Component category (bearing, motor, gear, seal, fastener)
    #[arg(long)]
    pub(crate) category: String,
    /// Requirement field as key=value; repeat for each field
    #[arg(long = "field", value_parser = parse_field)]
    pub(crate) fields: Vec<(String, String)>,
    /// Write the BOM CSV for the result set to this path
    #[arg(long)]
    pub(crate) bom: Option<PathBuf>,
    /// Project name used in the BOM header and filename
    #[arg(long)]
    pub(crate) project: Option<String>,
    /// Print the datasheet of the top recommendation
    #[arg(long)]
    pub(crate) datasheet: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct CatalogArgs {
    /// Restrict to one component category
    #[arg(long)]
    pub(crate) category: Option<String>,
    /// Case-insensitive manufacturer filter
    #[arg(long)]
    pub(crate) manufacturer: Option<String>,
    /// Substring search over name, part number and manufacturer
    #[arg(long)]
    pub(crate) search: Option<String>,
}

pub(crate) fn run_recommend(args: RecommendArgs) -> Result<(), AppError> {
    let RecommendArgs {
        category,
        fields,
        bom,
        project,
        datasheet,
    } = args;

    let config = AppConfig::load()?;
    let catalog = Arc::new(load_catalog(&config.selector)?);
    let service = RecommendationService::new(catalog, &config.selector);

    let requirements: RequirementSet = fields.into_iter().collect();
    let results = service.recommend(Some(&category), &requirements)?;
    print!("{}", render_recommendations(&results));

    let state = SelectorState::new().with_results(results);

    if let Some(path) = bom {
        let request = state.bom_request(project);
        let document = export::bom_document(&request, service.default_project_name(), Utc::now())?;
        std::fs::write(&path, document.body)?;
        println!("\nBOM written to {} ({})", path.display(), document.filename);
    }

    if datasheet {
        match top_spec_sheet(&state) {
            Some(sheet) => print!("\n{}", render_datasheet(&sheet, Utc::now())),
            None => println!("\nNo recommendation available for a datasheet"),
        }
    }

    Ok(())
}

pub(crate) fn run_catalog(args: CatalogArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let catalog = Arc::new(load_catalog(&config.selector)?);
    let service = RecommendationService::new(catalog, &config.selector);

    let query = catalog_query(args)?;
    let records = service.catalog(&query)?;
    print!("{}", render_catalog(&records));
    Ok(())
}

fn catalog_query(args: CatalogArgs) -> Result<CatalogQuery, AppError> {
    let category = match args.category.as_deref() {
        Some(tag) => {
            Some(ComponentCategory::parse_optional(Some(tag)).map_err(SelectionError::from)?)
        }
        None => None,
    };
    Ok(CatalogQuery {
        category,
        manufacturer: args.manufacturer,
        search: args.search,
    })
}

fn top_spec_sheet(state: &SelectorState) -> Option<SpecSheetRequest> {
    let top = state.recommendations().first()?;
    state.spec_sheet_request(&top.id)
}

pub(crate) fn render_recommendations(set: &RecommendationSet) -> String {
    let mut lines = vec![format!(
        "{} recommendations for {}",
        set.total_results, set.category
    )];
    if let Some(message) = &set.message {
        lines.push(format!("  {message}"));
    }

    for (index, recommendation) in set.recommendations.iter().enumerate() {
        lines.push(String::new());
        lines.push(format!(
            "{}. {} ({}) - {}% match, {}/{} criteria met",
            index + 1,
            recommendation.name,
            recommendation.manufacturer,
            recommendation.match_score,
            recommendation.matched_count,
            recommendation.criteria_matches.len()
        ));
        lines.push(format!(
            "   Price {} | {} | {}",
            recommendation.price, recommendation.availability, recommendation.vendor_url
        ));
        for criterion in &recommendation.criteria_matches {
            let mark = if criterion.met { "+" } else { "-" };
            lines.push(format!(
                "   {} {} [{}]: {} vs {}",
                mark,
                criterion.name,
                criterion.weight.label(),
                criterion.actual_value,
                criterion.requirement
            ));
        }
        for metric in &recommendation.performance_metrics {
            lines.push(format!(
                "   * {}: {} (target {})",
                metric.label, metric.actual_value, metric.target_value
            ));
        }
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

pub(crate) fn render_catalog(records: &[ComponentRecord]) -> String {
    let mut lines = vec![format!("{} catalog records", records.len())];
    for record in records {
        lines.push(format!(
            "- {} | {} | {} | {} | {}",
            record.id,
            record.category(),
            record.name,
            record.manufacturer,
            record.price
        ));
    }
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use cots_selector::config::SelectorConfig;
    use cots_selector::selection::StaticCatalog;

    fn service() -> RecommendationService<StaticCatalog> {
        RecommendationService::new(
            Arc::new(StaticCatalog::reference()),
            &SelectorConfig::default(),
        )
    }

    #[test]
    fn recommendation_listing_shows_scores_and_criteria() {
        let requirements: RequirementSet = [("power", "1.5"), ("speed", "1500")]
            .into_iter()
            .collect();
        let set = service()
            .recommend(Some("motor"), &requirements)
            .expect("motor recommendations");

        let text = render_recommendations(&set);

        assert!(text.starts_with("1 recommendations for motor\n"));
        assert!(text.contains("1. AC Induction Motor IE3 1.5kW (Siemens) - 100% match, 6/6 criteria met"));
        assert!(text.contains("   + Power Output [critical]: "));
        assert!(text.contains("   * Speed Match: 1500 RPM (target 1500 RPM)"));
    }

    #[test]
    fn empty_results_print_the_message() {
        let service = RecommendationService::new(
            Arc::new(StaticCatalog::empty()),
            &SelectorConfig::default(),
        );
        let set = service
            .recommend(Some("gear"), &RequirementSet::new())
            .expect("empty set");

        let text = render_recommendations(&set);

        assert_eq!(
            text,
            "0 recommendations for gear\n  No components found for the selected type\n"
        );
    }

    #[test]
    fn top_spec_sheet_uses_the_first_result() {
        let set = service()
            .recommend(Some("bearing"), &RequirementSet::new())
            .expect("bearing recommendations");
        let state = SelectorState::new().with_results(set);

        let sheet = top_spec_sheet(&state).expect("sheet available");
        assert_eq!(
            sheet.component_name.as_deref(),
            Some("Deep Groove Ball Bearing 6008")
        );
        assert!(top_spec_sheet(&SelectorState::new()).is_none());
    }

    #[test]
    fn catalog_listing_and_filters() {
        let query = catalog_query(CatalogArgs {
            category: Some("Seal".to_string()),
            ..CatalogArgs::default()
        })
        .expect("valid query");
        let records = service().catalog(&query).expect("listing");

        assert_eq!(
            render_catalog(&records),
            "1 catalog records\n- seal-001 | seal | O-ring Seal | Misumi | $5-10\n"
        );

        let unknown = catalog_query(CatalogArgs {
            category: Some("widget".to_string()),
            ..CatalogArgs::default()
        });
        assert!(unknown.is_err());
    }
}
