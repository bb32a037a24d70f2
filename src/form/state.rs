use super::error::FieldError;
use super::types::{AsteroidParameters, Field};

/// Holds the form values between submissions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    params: AsteroidParameters,
}

impl FormState {
    pub fn snapshot(&self) -> AsteroidParameters {
        self.params
    }

    /// Applies raw user text to one field.
    ///
    /// Text that does not parse as a number leaves the form untouched and
    /// returns [`FieldError::Parse`]. Infinities are accepted, NaN is not.
    pub fn set_field(&mut self, field: Field, raw: &str) -> Result<f64, FieldError> {
        let value = parse_number(raw).ok_or_else(|| FieldError::Parse {
            field,
            raw: raw.to_string(),
        })?;
        self.params.set(field, value);
        Ok(value)
    }

    pub fn reset(&mut self) {
        self.params = AsteroidParameters::default();
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}
