use validator::ValidationError;

/// Performance rating on a 0–5 scale. Fractional values are allowed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rating(f64);

impl Rating {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 5.0;

    pub fn new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() || !(Self::MIN..=Self::MAX).contains(&value) {
            let mut error = ValidationError::new("rating_out_of_range");
            error.message = Some("Rating must be a number between 0 and 5.".into());
            return Err(error);
        }
        Ok(Self(value))
    }

    /// Parse form input such as `"3.5"`.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let value = input.trim().parse::<f64>().map_err(|_| {
            let mut error = ValidationError::new("rating_not_a_number");
            error.message = Some("Rating must be a number between 0 and 5.".into());
            error
        })?;
        Self::new(value)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

/// Mean of a set of ratings, `None` when there are none.
pub fn average(ratings: &[f64]) -> Option<f64> {
    if ratings.is_empty() {
        return None;
    }
    Some(ratings.iter().sum::<f64>() / ratings.len() as f64)
}
