use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const HAZARDOUS: &str = "Hazardous";

/// Risk assessment returned by the prediction service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PredictionResult {
    /// Minimum orbit intersection distance, in AU
    #[serde(rename = "Predicted_MOID_AU")]
    pub predicted_moid_au: f64,
    #[serde(rename = "Risk_Label")]
    pub risk_label: i64,
    #[serde(rename = "Risk")]
    pub risk: String,
    #[serde(
        rename = "Risk_Probability",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub risk_probability: Option<f64>,
}

impl PredictionResult {
    pub fn is_hazardous(&self) -> bool {
        self.risk == HAZARDOUS
    }

    pub fn moid_display(&self) -> String {
        format!("{} AU", self.predicted_moid_au)
    }

    pub fn probability_display(&self) -> Option<String> {
        self.risk_probability.map(|p| format!("{:.1}%", p * 100.0))
    }
}
