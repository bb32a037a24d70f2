use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum_macros::{Display, IntoStaticStr};
use utoipa::ToSchema;

use super::error::FieldError;

/// Orbital and physical parameters of a single asteroid, as sent to the
/// prediction service. Field names are part of the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AsteroidParameters {
    pub magnitude: f64,
    pub diameter: f64,
    pub albedo: f64,
    pub semi_major_axis: f64,
    pub perihelion_distance: f64,
    pub inclination: f64,
    pub aphelion_distance: f64,
    pub mean_motion: f64,
    pub time_of_perihelion: f64,
    pub orbital_period: f64,
}

impl Default for AsteroidParameters {
    fn default() -> Self {
        AsteroidParameters {
            magnitude: 19.5,
            diameter: 0.5,
            albedo: 0.15,
            semi_major_axis: 2.5,
            perihelion_distance: 1.8,
            inclination: 10.5,
            aphelion_distance: 3.2,
            mean_motion: 0.2,
            time_of_perihelion: 2459000.5,
            orbital_period: 1500.0,
        }
    }
}

impl AsteroidParameters {
    pub fn get(&self, field: Field) -> f64 {
        *self.slot(field)
    }

    pub fn set(&mut self, field: Field, value: f64) {
        *self.slot_mut(field) = value;
    }

    fn slot(&self, field: Field) -> &f64 {
        match field {
            Field::Magnitude => &self.magnitude,
            Field::Diameter => &self.diameter,
            Field::Albedo => &self.albedo,
            Field::SemiMajorAxis => &self.semi_major_axis,
            Field::PerihelionDistance => &self.perihelion_distance,
            Field::Inclination => &self.inclination,
            Field::AphelionDistance => &self.aphelion_distance,
            Field::MeanMotion => &self.mean_motion,
            Field::TimeOfPerihelion => &self.time_of_perihelion,
            Field::OrbitalPeriod => &self.orbital_period,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut f64 {
        match field {
            Field::Magnitude => &mut self.magnitude,
            Field::Diameter => &mut self.diameter,
            Field::Albedo => &mut self.albedo,
            Field::SemiMajorAxis => &mut self.semi_major_axis,
            Field::PerihelionDistance => &mut self.perihelion_distance,
            Field::Inclination => &mut self.inclination,
            Field::AphelionDistance => &mut self.aphelion_distance,
            Field::MeanMotion => &mut self.mean_motion,
            Field::TimeOfPerihelion => &mut self.time_of_perihelion,
            Field::OrbitalPeriod => &mut self.orbital_period,
        }
    }
}

/// Identifier of one of the ten form fields. Renders as its wire name.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    IntoStaticStr,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Magnitude,
    Diameter,
    Albedo,
    SemiMajorAxis,
    PerihelionDistance,
    Inclination,
    AphelionDistance,
    MeanMotion,
    TimeOfPerihelion,
    OrbitalPeriod,
}

impl Field {
    /// Form order.
    pub const ALL: [Field; 10] = [
        Field::Magnitude,
        Field::Diameter,
        Field::Albedo,
        Field::SemiMajorAxis,
        Field::PerihelionDistance,
        Field::Inclination,
        Field::AphelionDistance,
        Field::MeanMotion,
        Field::TimeOfPerihelion,
        Field::OrbitalPeriod,
    ];

    /// Wire and form name, e.g. `semi_major_axis`.
    pub fn name(self) -> &'static str {
        self.into()
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Magnitude => "Absolute Magnitude (H)",
            Field::Diameter => "Diameter (km)",
            Field::Albedo => "Albedo",
            Field::SemiMajorAxis => "Semi-major Axis (AU)",
            Field::PerihelionDistance => "Perihelion Distance (AU)",
            Field::Inclination => "Inclination (deg)",
            Field::AphelionDistance => "Aphelion Distance (AU)",
            Field::MeanMotion => "Mean Motion (deg/day)",
            Field::TimeOfPerihelion => "Time of Perihelion (JD)",
            Field::OrbitalPeriod => "Orbital Period (days)",
        }
    }
}

impl FromStr for Field {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.name() == s)
            .ok_or_else(|| FieldError::Unknown(s.to_string()))
    }
}
