use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use super::domain::{
    Alternative, BearingRatings, ComponentCategory, ComponentRatings, ComponentRecord,
    FastenerRatings, GearRatings, MotorRatings, SealRatings,
};

/// Read-only source of candidate records, injected into the recommendation service.
pub trait CatalogProvider: Send + Sync {
    /// Candidates for `category`, in the catalog's curated order.
    fn candidates(&self, category: ComponentCategory)
        -> Result<Vec<ComponentRecord>, CatalogError>;

    /// Every record across categories, in category then curated order.
    fn all(&self) -> Result<Vec<ComponentRecord>, CatalogError> {
        let mut records = Vec::new();
        for category in ComponentCategory::ALL {
            records.extend(self.candidates(category)?);
        }
        Ok(records)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid catalog data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

/// Filters applied when browsing the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub category: Option<ComponentCategory>,
    pub manufacturer: Option<String>,
    pub search: Option<String>,
}

impl CatalogQuery {
    pub fn matches(&self, record: &ComponentRecord) -> bool {
        if let Some(category) = self.category {
            if record.category() != category {
                return false;
            }
        }

        if let Some(manufacturer) = self.manufacturer.as_deref() {
            if !record.manufacturer.eq_ignore_ascii_case(manufacturer.trim()) {
                return false;
            }
        }

        if let Some(search) = self.search.as_deref() {
            let needle = search.trim().to_lowercase();
            if needle.is_empty() {
                return true;
            }
            let haystacks = [
                Some(record.name.as_str()),
                record.part_number.as_deref(),
                Some(record.manufacturer.as_str()),
            ];
            return haystacks
                .into_iter()
                .flatten()
                .any(|value| value.to_lowercase().contains(&needle));
        }

        true
    }
}

/// In-memory catalog keyed by category. Records keep their insertion order.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    entries: BTreeMap<ComponentCategory, Vec<ComponentRecord>>,
}

impl StaticCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = ComponentRecord>,
    {
        let mut entries: BTreeMap<ComponentCategory, Vec<ComponentRecord>> = BTreeMap::new();
        for record in records {
            entries.entry(record.category()).or_default().push(record);
        }
        Self { entries }
    }

    /// Loads a JSON array of records.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let records: Vec<ComponentRecord> = serde_json::from_reader(reader)?;
        Ok(Self::from_records(records))
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The curated sample catalog the selector ships with.
    pub fn reference() -> Self {
        Self::from_records([
            deep_groove_6008(),
            tapered_roller_30208(),
            induction_motor_ie3(),
            spur_gear_module_2(),
            o_ring_seal(),
            hex_bolt_m10(),
        ])
    }
}

impl CatalogProvider for StaticCatalog {
    fn candidates(
        &self,
        category: ComponentCategory,
    ) -> Result<Vec<ComponentRecord>, CatalogError> {
        Ok(self.entries.get(&category).cloned().unwrap_or_default())
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn alternative(name: &str, manufacturer: &str) -> Alternative {
    Alternative {
        name: name.to_string(),
        manufacturer: manufacturer.to_string(),
    }
}

fn deep_groove_6008() -> ComponentRecord {
    ComponentRecord {
        id: "bearing-001".to_string(),
        name: "Deep Groove Ball Bearing 6008".to_string(),
        manufacturer: "SKF".to_string(),
        part_number: Some("6008-2RS1".to_string()),
        rating: 4.8,
        price: "$25-35".to_string(),
        availability: "In Stock".to_string(),
        lead_time: Some("1-2 weeks".to_string()),
        ratings: ComponentRatings::Bearing(BearingRatings {
            bore_mm: 40.0,
            outer_diameter_mm: 68.0,
            width_mm: 15.0,
            dynamic_load_kn: 28.9,
            static_load_kn: None,
            speed_rpm: 10000.0,
            l10_life_hours: 25000.0,
        }),
        pros: strings(&[
            "High-speed capability",
            "Low friction and noise",
            "Good corrosion resistance with stainless steel option",
            "Readily available",
            "Excellent reliability record",
        ]),
        cons: strings(&[
            "Not suitable for extreme vibration",
            "Limited temperature range",
            "Standard sealed bearings may limit speed",
        ]),
        alternatives: vec![
            alternative("Angular Contact Bearing 7008", "NSK"),
            alternative("Cylindrical Roller Bearing NJ208", "FAG"),
        ],
        vendor_url: Some(
            "https://www.skf.com/en/products/bearings/deep-groove-ball-bearing-6008".to_string(),
        ),
    }
}

fn tapered_roller_30208() -> ComponentRecord {
    ComponentRecord {
        id: "bearing-002".to_string(),
        name: "Tapered Roller Bearing 30208".to_string(),
        manufacturer: "Timken".to_string(),
        part_number: Some("30208".to_string()),
        rating: 4.6,
        price: "$40-50".to_string(),
        availability: "In Stock".to_string(),
        lead_time: Some("2-3 weeks".to_string()),
        ratings: ComponentRatings::Bearing(BearingRatings {
            bore_mm: 40.0,
            outer_diameter_mm: 80.0,
            width_mm: 18.0,
            dynamic_load_kn: 47.5,
            static_load_kn: Some(50.0),
            speed_rpm: 10000.0,
            l10_life_hours: 25000.0,
        }),
        pros: strings(&[
            "High load capacity",
            "Excellent radial and axial load handling",
            "Suitable for automotive and industrial applications",
            "Good thermal stability",
        ]),
        cons: strings(&[
            "Requires proper preload setup",
            "Higher friction than ball bearings",
            "Regular maintenance needed",
        ]),
        alternatives: vec![
            alternative("Spherical Roller Bearing 22208", "SKF"),
            alternative("Cylindrical Roller Bearing NU208", "Schaeffler"),
        ],
        vendor_url: Some(
            "https://www.timken.com/en-us/products/industrial-bearings/tapered-roller-bearing-30208"
                .to_string(),
        ),
    }
}

fn induction_motor_ie3() -> ComponentRecord {
    ComponentRecord {
        id: "motor-001".to_string(),
        name: "AC Induction Motor IE3 1.5kW".to_string(),
        manufacturer: "Siemens".to_string(),
        part_number: Some("1LE1003-0EB42".to_string()),
        rating: 4.9,
        price: "$150-200".to_string(),
        availability: "In Stock".to_string(),
        lead_time: Some("2-3 weeks".to_string()),
        ratings: ComponentRatings::Motor(MotorRatings {
            power_kw: 1.5,
            speed_rpm: 1500.0,
            voltage: "3-phase 400V".to_string(),
            frame_size: "90L".to_string(),
            efficiency_pct: 85.3,
            efficiency_class: "IE3".to_string(),
            insulation_class: "F".to_string(),
            duty_classes: strings(&["S3", "S4", "S5"]),
        }),
        pros: strings(&[
            "High efficiency - lower energy costs",
            "Compact and lightweight",
            "Excellent thermal performance",
            "Wide availability",
            "Long operational life",
        ]),
        cons: strings(&[
            "Three-phase power required",
            "Not suitable for variable speed without VFD",
            "Requires proper cooling for continuous operation",
        ]),
        alternatives: vec![
            alternative("AC Motor IE2 1.5kW", "ABB"),
            alternative("NEMA Premium Motor 1.5HP", "Baldor"),
        ],
        vendor_url: Some(
            "https://www.siemens.com/en-us/products/electromechanical-systems/motors.html"
                .to_string(),
        ),
    }
}

fn spur_gear_module_2() -> ComponentRecord {
    ComponentRecord {
        id: "gear-001".to_string(),
        name: "Spur Gear Module 2.0 Steel".to_string(),
        manufacturer: "Neugart".to_string(),
        part_number: None,
        rating: 4.7,
        price: "$15-25".to_string(),
        availability: "In Stock".to_string(),
        lead_time: None,
        ratings: ComponentRatings::Gear(GearRatings {
            module_mm: 2.0,
            material: "16CrNiMo4 Steel".to_string(),
            pressure_angle_deg: 20.0,
            bore_mm: 15.0,
            face_width_mm: 25.0,
            power_transmission_kw: 15.0,
            precision_grade: "ISO 7".to_string(),
            noise_db: 82.0,
        }),
        pros: strings(&[
            "High torque transmission",
            "Precise machining",
            "Excellent for industrial applications",
            "Multiple mounting options",
        ]),
        cons: strings(&[
            "Noise at high speeds",
            "Lubrication required",
            "Higher cost than plastic alternatives",
        ]),
        alternatives: vec![
            alternative("Helical Gear Module 2.0", "KHK"),
            alternative("Bevel Gear 2.0", "Ondrives"),
        ],
        vendor_url: Some("https://www.neugart.com/en/products/spur-gears".to_string()),
    }
}

fn o_ring_seal() -> ComponentRecord {
    ComponentRecord {
        id: "seal-001".to_string(),
        name: "O-ring Seal".to_string(),
        manufacturer: "Misumi".to_string(),
        part_number: None,
        rating: 4.5,
        price: "$5-10".to_string(),
        availability: "In Stock".to_string(),
        lead_time: None,
        ratings: ComponentRatings::Seal(SealRatings {
            diameter_mm: 30.0,
            pressure_bar: 50.0,
            elastomer: "NBR".to_string(),
            temp_min_c: -30.0,
            temp_max_c: 100.0,
            leakage_rate: "<0.1 cc/hour".to_string(),
            service_life_years: 5,
        }),
        pros: strings(&[
            "High pressure resistance",
            "Low cost",
            "Easy to install",
            "Good chemical resistance",
        ]),
        cons: strings(&[
            "Not suitable for high temperatures",
            "Limited lifespan in aggressive environments",
            "Requires regular inspection",
        ]),
        alternatives: vec![
            alternative("V-ring Seal", "Misumi"),
            alternative("Metallic Seal", "Misumi"),
        ],
        vendor_url: None,
    }
}

fn hex_bolt_m10() -> ComponentRecord {
    ComponentRecord {
        id: "fastener-001".to_string(),
        name: "Hex Bolt M10".to_string(),
        manufacturer: "Misumi".to_string(),
        part_number: None,
        rating: 4.7,
        price: "$2-3".to_string(),
        availability: "In Stock".to_string(),
        lead_time: None,
        ratings: ComponentRatings::Fastener(FastenerRatings {
            thread: "M10".to_string(),
            grade: "Grade 8.8".to_string(),
            clamp_load_n: 12000.0,
            tensile_strength_mpa: 800.0,
            temp_min_c: -20.0,
            temp_max_c: 150.0,
            finish: "Zinc-plated".to_string(),
        }),
        pros: strings(&[
            "High strength",
            "Cost-effective",
            "Wide availability",
            "Good corrosion resistance",
        ]),
        cons: strings(&[
            "Limited temperature range",
            "May require special tools for installation",
            "Not suitable for high-vibration applications",
        ]),
        alternatives: vec![
            alternative("Hex Nut M10", "Misumi"),
            alternative("Washer M10", "Misumi"),
        ],
        vendor_url: None,
    }
}
