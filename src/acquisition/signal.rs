use crate::error::InvalidNumericInputError;

/// Parameters of the generated wave `amplitude * sin(frequency * t) + offset`.
///
/// `frequency` is angular (rad/s); `t` is seconds since the producer started.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalParams {
    pub amplitude: f64,
    pub offset: f64,
    pub frequency: f64,
}

impl SignalParams {
    /// Parse the three input fields, in the order they appear in the UI.
    pub fn parse(
        amplitude: &str,
        offset: &str,
        frequency: &str,
    ) -> Result<Self, InvalidNumericInputError> {
        Ok(Self {
            amplitude: parse_field("amplitude", amplitude)?,
            offset: parse_field("offset", offset)?,
            frequency: parse_field("frequency", frequency)?,
        })
    }

    pub fn sample(&self, t: f64) -> f64 {
        self.amplitude * (self.frequency * t).sin() + self.offset
    }
}

fn parse_field(field: &'static str, input: &str) -> Result<f64, InvalidNumericInputError> {
    match input.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(InvalidNumericInputError {
            field,
            input: input.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_trimmed_numbers() {
        let p = SignalParams::parse(" 2 ", "-0.5", "2.5").unwrap();
        assert_eq!(p.amplitude, 2.0);
        assert_eq!(p.offset, -0.5);
        assert_eq!(p.frequency, 2.5);
    }

    #[test]
    fn first_bad_field_is_reported() {
        let err = SignalParams::parse("1", "abc", "").unwrap_err();
        assert_eq!(err.field, "offset");
        assert_eq!(err.input, "abc");
    }

    #[test]
    fn non_finite_values_are_rejected() {
        assert!(SignalParams::parse("inf", "0", "1").is_err());
        assert!(SignalParams::parse("1", "0", "NaN").is_err());
    }

    #[test]
    fn sample_follows_the_wave() {
        let p = SignalParams {
            amplitude: 2.0,
            offset: 1.0,
            frequency: std::f64::consts::FRAC_PI_2,
        };
        assert!((p.sample(0.0) - 1.0).abs() < 1e-12);
        assert!((p.sample(1.0) - 3.0).abs() < 1e-12);
    }
}
