//! Advisory actual-vs-target comparisons, three per category.

use super::domain::{
    grouped, BearingRatings, FastenerRatings, GearRatings, MotorRatings, PerformanceMetric,
    RequirementSet, SealRatings,
};
use super::evaluation::rules::{at_least, lacks, one_of, within};

const MIN_MOTOR_EFFICIENCY_PCT: f64 = 80.0;
const DEFAULT_MOTOR_SPEED_RPM: f64 = 1500.0;
const MOTOR_THERMAL_CLASSES: [&str; 3] = ["F", "H", "N"];

fn metric(label: &str, actual_value: String, target_value: String, met: bool) -> PerformanceMetric {
    PerformanceMetric {
        label: label.to_string(),
        actual_value,
        target_value,
        met,
    }
}

/// Hot-spot winding limit for an insulation class, in °C.
pub fn winding_temperature(insulation_class: &str) -> Option<u16> {
    match insulation_class.trim().to_ascii_uppercase().as_str() {
        "A" => Some(105),
        "E" => Some(120),
        "B" => Some(130),
        "F" => Some(155),
        "H" => Some(180),
        "N" => Some(200),
        _ => None,
    }
}

pub(crate) fn bearing(req: &RequirementSet, r: &BearingRatings) -> Vec<PerformanceMetric> {
    vec![
        metric(
            "Dynamic Load Capacity vs Requirement",
            format!("{} kN", r.dynamic_load_kn),
            format!("{} kN", req.text_or("dynamicLoad", "0")),
            at_least(r.dynamic_load_kn, req.number("dynamicLoad")),
        ),
        metric(
            "Speed Rating",
            format!("{} RPM", grouped(r.speed_rpm)),
            format!("{} RPM", req.text_or("speed", "0")),
            at_least(r.speed_rpm, req.number("speed")),
        ),
        metric(
            "L10 Life",
            format!("{} hours", grouped(r.l10_life_hours)),
            format!("{} hours", req.text_or("targetL10Life", "0")),
            at_least(r.l10_life_hours, req.number("targetL10Life")),
        ),
    ]
}

pub(crate) fn motor(req: &RequirementSet, r: &MotorRatings) -> Vec<PerformanceMetric> {
    let target_speed = req
        .present("speed")
        .map(|_| req.number("speed"))
        .unwrap_or(DEFAULT_MOTOR_SPEED_RPM);
    let insulation = req.text_or("insulationClass", "F");

    let thermal_value = match winding_temperature(&r.insulation_class) {
        Some(limit) => format!("{}°C winding", limit),
        None => format!("Class {} insulation", r.insulation_class),
    };

    vec![
        metric(
            "Power Output Efficiency",
            format!("{}%", r.efficiency_pct),
            format!("≥{}%", MIN_MOTOR_EFFICIENCY_PCT),
            at_least(r.efficiency_pct, MIN_MOTOR_EFFICIENCY_PCT),
        ),
        metric(
            "Speed Match",
            format!("{} RPM", r.speed_rpm),
            format!("{} RPM", req.text_or("speed", "1500")),
            within(r.speed_rpm, target_speed, 100.0),
        ),
        metric(
            "Thermal Capability",
            thermal_value,
            format!("Class {} insulation", insulation),
            one_of(insulation, &MOTOR_THERMAL_CLASSES),
        ),
    ]
}

pub(crate) fn gear(req: &RequirementSet, r: &GearRatings) -> Vec<PerformanceMetric> {
    let (noise_target, noise_met) = match req.present("noiseLevel") {
        Some(raw) => (
            format!("≤ {} dB", raw),
            at_least(req.number("noiseLevel"), r.noise_db),
        ),
        None => ("Not specified".to_string(), true),
    };

    vec![
        metric(
            "Power Transmission",
            format!("{} kW continuous", r.power_transmission_kw),
            format!("{} kW", req.text_or("power", "0")),
            at_least(r.power_transmission_kw, req.number("power")),
        ),
        metric(
            "Module Precision",
            format!("{} grade", r.precision_grade),
            "High precision".to_string(),
            true,
        ),
        metric(
            "Noise Level",
            format!("~{} dB", r.noise_db),
            noise_target,
            noise_met,
        ),
    ]
}

pub(crate) fn seal(req: &RequirementSet, r: &SealRatings) -> Vec<PerformanceMetric> {
    vec![
        metric(
            "Pressure Rating",
            format!("{} bar", r.pressure_bar),
            format!("{} bar", req.text_or("pressure", "0")),
            at_least(r.pressure_bar, req.number("pressure")),
        ),
        metric(
            "Leakage Rate",
            r.leakage_rate.clone(),
            "Zero leak".to_string(),
            true,
        ),
        metric(
            "Elastomer Durability",
            format!("{} years min", r.service_life_years),
            "Long-term reliability".to_string(),
            true,
        ),
    ]
}

pub(crate) fn fastener(req: &RequirementSet, r: &FastenerRatings) -> Vec<PerformanceMetric> {
    let environment = req.text_or("fastenerEnvironment", "Dry Indoor");

    vec![
        metric(
            "Tensile Strength",
            format!("{} MPa ({})", r.tensile_strength_mpa, r.grade),
            "High-strength required".to_string(),
            true,
        ),
        metric(
            "Clamp Load Capacity",
            format!("{} N", r.clamp_load_n),
            format!("{} N", req.text_or("clampLoad", "0")),
            at_least(r.clamp_load_n, req.number("clampLoad")),
        ),
        metric(
            "Corrosion Resistance",
            r.finish.clone(),
            environment.to_string(),
            lacks(environment, "Corrosive"),
        ),
    ]
}
