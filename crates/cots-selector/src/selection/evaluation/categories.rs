use crate::selection::domain::{
    temperature_span, BearingRatings, ComponentCategory, ComponentRatings, CriterionResult,
    CriterionWeight, FastenerRatings, GearRatings, MotorRatings, PerformanceMetric,
    RequirementSet, SealRatings,
};
use crate::selection::metrics;

use super::rules::{at_least, lacks, one_of, within, within_ratio, CriteriaSheet};
use super::{CategoryRules, EvaluationError};

pub(crate) const BEARING_LUBRICANTS: [&str; 2] = ["Oil Bath", "Grease"];
pub(crate) const BEARING_MATERIALS: [&str; 2] = ["Steel", "Stainless Steel (440C)"];
pub(crate) const MOTOR_INSULATION_CLASSES: [&str; 3] = ["F", "H", "N"];
pub(crate) const GEAR_MATERIALS: [&str; 2] = ["Steel", "Cast Iron"];
pub(crate) const GEAR_OILS: [&str; 3] = ["ISO VG 46", "ISO VG 68", "ISO VG 100"];
pub(crate) const SEAL_MEDIA: [&str; 3] = ["Oil", "Water", "Hydraulic Fluid"];
pub(crate) const SEAL_ELASTOMERS: [&str; 2] = ["NBR", "FKM"];
pub(crate) const FASTENER_GRADES: [&str; 3] =
    ["Steel Grade 8.8", "Steel Grade 10.9", "Stainless Steel A4-70"];

fn mismatch(expected: ComponentCategory, ratings: &ComponentRatings) -> EvaluationError {
    EvaluationError::RatingsMismatch {
        expected,
        found: ratings.category(),
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct BearingRules;

impl BearingRules {
    fn criteria_for(&self, req: &RequirementSet, r: &BearingRatings) -> Vec<CriterionResult> {
        let dynamic_load = req.number("dynamicLoad");
        let speed = req.number("speed");
        let l10_life = req.number("targetL10Life");
        let bore = req.integer("boreSize");
        let environment = req.text_or("bearingEnvironment", "Clean");
        let lubrication = req.text_or("lubrication", "Grease");
        let material = req.text_or("bearingMaterial", "Steel");

        let mut sheet = CriteriaSheet::new();
        sheet
            .push(
                "Dynamic Load Capacity",
                format!("{} kN", r.dynamic_load_kn),
                format!("≥ {} kN", dynamic_load),
                at_least(r.dynamic_load_kn, dynamic_load),
                CriterionWeight::Critical,
            )
            .push(
                "Speed Rating",
                format!("{} RPM", r.speed_rpm),
                format!("≥ {} RPM", speed),
                at_least(r.speed_rpm, speed),
                CriterionWeight::Critical,
            )
            .push(
                "L10 Life (Bearing Life)",
                format!("{} hours", r.l10_life_hours),
                format!("≥ {} hours", l10_life),
                at_least(r.l10_life_hours, l10_life),
                CriterionWeight::Critical,
            )
            .push(
                "Bore Size",
                format!("{} mm", r.bore_mm),
                format!("≈ {} mm", bore),
                within(r.bore_mm, bore, 2.0),
                CriterionWeight::High,
            )
            .push(
                "Environmental Compatibility",
                format!("Sealed bearing suitable for {}", environment),
                format!("Environment: {}", environment),
                environment != "Highly Corrosive",
                CriterionWeight::High,
            )
            .push(
                "Lubrication Type",
                format!("Standard {} suitable", lubrication),
                format!("Lubrication: {}", lubrication),
                one_of(lubrication, &BEARING_LUBRICANTS),
                CriterionWeight::Medium,
            )
            .push(
                "Material Availability",
                format!("{} available", material),
                format!("Material: {}", material),
                one_of(material, &BEARING_MATERIALS),
                CriterionWeight::Medium,
            );
        sheet.finish()
    }
}

impl CategoryRules for BearingRules {
    fn category(&self) -> ComponentCategory {
        ComponentCategory::Bearing
    }

    fn criteria(
        &self,
        requirements: &RequirementSet,
        ratings: &ComponentRatings,
    ) -> Result<Vec<CriterionResult>, EvaluationError> {
        match ratings {
            ComponentRatings::Bearing(r) => Ok(self.criteria_for(requirements, r)),
            other => Err(mismatch(self.category(), other)),
        }
    }

    fn metrics(
        &self,
        requirements: &RequirementSet,
        ratings: &ComponentRatings,
    ) -> Result<Vec<PerformanceMetric>, EvaluationError> {
        match ratings {
            ComponentRatings::Bearing(r) => Ok(metrics::bearing(requirements, r)),
            other => Err(mismatch(self.category(), other)),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct MotorRules;

impl MotorRules {
    fn criteria_for(&self, req: &RequirementSet, r: &MotorRatings) -> Vec<CriterionResult> {
        let power = req.number("power");
        let speed = req.number("speed");
        let duty_class = req.text_or("dutyClass", "S3");
        let insulation = req.text_or("insulationClass", "F");
        let environment = req.text_or("motorEnvironment", "Indoor Dry");

        let mut sheet = CriteriaSheet::new();
        sheet
            .push(
                "Power Output",
                format!("{} kW", r.power_kw),
                format!("≈ {} kW (±20%)", power),
                within_ratio(r.power_kw, power, 0.2),
                CriterionWeight::Critical,
            )
            .push(
                "Speed Rating",
                format!("{} RPM", r.speed_rpm),
                format!("≈ {} RPM", speed),
                within(r.speed_rpm, speed, 100.0),
                CriterionWeight::Critical,
            )
            // Duty class is informational; every catalog motor covers S3 and above.
            .push(
                "Duty Class Support",
                format!("{} compatible", r.duty_classes.join(", ")),
                format!("Duty Class: {}", duty_class),
                true,
                CriterionWeight::High,
            )
            .push(
                "Insulation Class",
                format!("Class {} available", insulation),
                format!("Insulation: {}", insulation),
                one_of(insulation, &MOTOR_INSULATION_CLASSES),
                CriterionWeight::High,
            )
            .push(
                "Environmental Tolerance",
                "Indoor/Outdoor rated".to_string(),
                format!("Environment: {}", environment),
                lacks(environment, "Explosive"),
                CriterionWeight::High,
            )
            .push(
                "Energy Efficiency",
                format!("{} ({}% efficiency)", r.efficiency_class, r.efficiency_pct),
                "High efficiency required".to_string(),
                true,
                CriterionWeight::Medium,
            );
        sheet.finish()
    }
}

impl CategoryRules for MotorRules {
    fn category(&self) -> ComponentCategory {
        ComponentCategory::Motor
    }

    fn criteria(
        &self,
        requirements: &RequirementSet,
        ratings: &ComponentRatings,
    ) -> Result<Vec<CriterionResult>, EvaluationError> {
        match ratings {
            ComponentRatings::Motor(r) => Ok(self.criteria_for(requirements, r)),
            other => Err(mismatch(self.category(), other)),
        }
    }

    fn metrics(
        &self,
        requirements: &RequirementSet,
        ratings: &ComponentRatings,
    ) -> Result<Vec<PerformanceMetric>, EvaluationError> {
        match ratings {
            ComponentRatings::Motor(r) => Ok(metrics::motor(requirements, r)),
            other => Err(mismatch(self.category(), other)),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct GearRules;

impl GearRules {
    fn criteria_for(&self, req: &RequirementSet, r: &GearRatings) -> Vec<CriterionResult> {
        let power = req.number("power");
        let module = req.number("moduleSize");
        let material = req.text_or("gearMaterial", "Steel");
        let oil = req.text_or("oilType", "ISO VG 46");

        let mut sheet = CriteriaSheet::new();
        sheet
            .push(
                "Power Transmission",
                format!("{} kW rated", r.power_transmission_kw),
                format!("≥ {} kW", power),
                at_least(r.power_transmission_kw, power),
                CriterionWeight::Critical,
            )
            .push(
                "Module Size",
                format!("{} mm", r.module_mm),
                format!("≈ {} mm", module),
                within(r.module_mm, module, 0.5),
                CriterionWeight::Critical,
            )
            .push(
                "Material Compatibility",
                format!("{} (High-strength)", r.material),
                format!("Material: {}", material),
                one_of(material, &GEAR_MATERIALS),
                CriterionWeight::High,
            )
            .push(
                "Precision Grade",
                format!("{} precision", r.precision_grade),
                "High precision required".to_string(),
                true,
                CriterionWeight::High,
            )
            .push(
                "Lubrication Compatibility",
                "Compatible with standard oils".to_string(),
                format!("Oil Type: {}", oil),
                one_of(oil, &GEAR_OILS),
                CriterionWeight::Medium,
            );
        sheet.finish()
    }
}

impl CategoryRules for GearRules {
    fn category(&self) -> ComponentCategory {
        ComponentCategory::Gear
    }

    fn criteria(
        &self,
        requirements: &RequirementSet,
        ratings: &ComponentRatings,
    ) -> Result<Vec<CriterionResult>, EvaluationError> {
        match ratings {
            ComponentRatings::Gear(r) => Ok(self.criteria_for(requirements, r)),
            other => Err(mismatch(self.category(), other)),
        }
    }

    fn metrics(
        &self,
        requirements: &RequirementSet,
        ratings: &ComponentRatings,
    ) -> Result<Vec<PerformanceMetric>, EvaluationError> {
        match ratings {
            ComponentRatings::Gear(r) => Ok(metrics::gear(requirements, r)),
            other => Err(mismatch(self.category(), other)),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SealRules;

impl SealRules {
    fn criteria_for(&self, req: &RequirementSet, r: &SealRatings) -> Vec<CriterionResult> {
        let diameter = req.number("sealDiameter");
        let pressure = req.number("pressure");
        let medium = req.text_or("sealEnvironment", "Oil");
        let elastomer = req.text_or("elastomerMaterial", "NBR");
        let operating = req.text_or("sealTemperature", "20-60");

        let mut sheet = CriteriaSheet::new();
        sheet
            .push(
                "Seal Diameter",
                format!("{} mm", r.diameter_mm),
                format!("≈ {} mm", diameter),
                within(r.diameter_mm, diameter, 2.0),
                CriterionWeight::Critical,
            )
            .push(
                "Pressure Rating",
                format!("{} bar", r.pressure_bar),
                format!("≥ {} bar", pressure),
                at_least(r.pressure_bar, pressure),
                CriterionWeight::Critical,
            )
            .push(
                "Sealing Medium Compatibility",
                format!("Suitable for {}", medium),
                format!("Medium: {}", medium),
                one_of(medium, &SEAL_MEDIA),
                CriterionWeight::Critical,
            )
            .push(
                "Elastomer Type",
                format!("{} available", elastomer),
                format!("Material: {}", elastomer),
                one_of(elastomer, &SEAL_ELASTOMERS),
                CriterionWeight::High,
            )
            .push(
                "Temperature Range",
                format!("{} °C", temperature_span(r.temp_min_c, r.temp_max_c)),
                format!("Operating: {} °C", operating),
                true,
                CriterionWeight::High,
            );
        sheet.finish()
    }
}

impl CategoryRules for SealRules {
    fn category(&self) -> ComponentCategory {
        ComponentCategory::Seal
    }

    fn criteria(
        &self,
        requirements: &RequirementSet,
        ratings: &ComponentRatings,
    ) -> Result<Vec<CriterionResult>, EvaluationError> {
        match ratings {
            ComponentRatings::Seal(r) => Ok(self.criteria_for(requirements, r)),
            other => Err(mismatch(self.category(), other)),
        }
    }

    fn metrics(
        &self,
        requirements: &RequirementSet,
        ratings: &ComponentRatings,
    ) -> Result<Vec<PerformanceMetric>, EvaluationError> {
        match ratings {
            ComponentRatings::Seal(r) => Ok(metrics::seal(requirements, r)),
            other => Err(mismatch(self.category(), other)),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FastenerRules;

impl FastenerRules {
    fn criteria_for(&self, req: &RequirementSet, r: &FastenerRatings) -> Vec<CriterionResult> {
        let size = req.text_or("diameter", "M8");
        let clamp_load = req.number("clampLoad");
        let grade = req.text_or("fastenerMaterial", "Steel Grade 8.8");
        let environment = req.text_or("fastenerEnvironment", "Dry Indoor");
        let operating = req.text_or("fastenerTemperature", "0-80");

        let mut sheet = CriteriaSheet::new();
        sheet
            .push(
                "Fastener Diameter",
                format!("{} available", r.thread),
                format!("Size: {}", size),
                true,
                CriterionWeight::Critical,
            )
            .push(
                "Clamp Load Capacity",
                format!("{} N", r.clamp_load_n),
                format!("≥ {} N", clamp_load),
                at_least(r.clamp_load_n, clamp_load),
                CriterionWeight::Critical,
            )
            .push(
                "Material Grade",
                format!("{} (High-strength)", r.grade),
                format!("Grade: {}", grade),
                one_of(grade, &FASTENER_GRADES),
                CriterionWeight::Critical,
            )
            .push(
                "Environmental Suitability",
                format!("{} for mild environments", r.finish),
                format!("Environment: {}", environment),
                lacks(environment, "Corrosive"),
                CriterionWeight::High,
            )
            .push(
                "Temperature Tolerance",
                format!("{} °C", temperature_span(r.temp_min_c, r.temp_max_c)),
                format!("Operating: {} °C", operating),
                true,
                CriterionWeight::High,
            );
        sheet.finish()
    }
}

impl CategoryRules for FastenerRules {
    fn category(&self) -> ComponentCategory {
        ComponentCategory::Fastener
    }

    fn criteria(
        &self,
        requirements: &RequirementSet,
        ratings: &ComponentRatings,
    ) -> Result<Vec<CriterionResult>, EvaluationError> {
        match ratings {
            ComponentRatings::Fastener(r) => Ok(self.criteria_for(requirements, r)),
            other => Err(mismatch(self.category(), other)),
        }
    }

    fn metrics(
        &self,
        requirements: &RequirementSet,
        ratings: &ComponentRatings,
    ) -> Result<Vec<PerformanceMetric>, EvaluationError> {
        match ratings {
            ComponentRatings::Fastener(r) => Ok(metrics::fastener(requirements, r)),
            other => Err(mismatch(self.category(), other)),
        }
    }
}
