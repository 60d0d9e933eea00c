/// Invalid construction-time parameters.
///
/// These are programmer errors: the per-frame paths never produce them.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },
    #[error("invalid mesh: {0}")]
    InvalidMesh(String),
}

/// Reject NaN and infinities.
pub fn ensure_finite(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NonFinite { name, value })
    }
}

/// Reject non-finite values and anything `<= 0`.
pub fn ensure_positive(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    ensure_finite(name, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finite_values_pass_through() {
        assert_eq!(ensure_finite("x", -3.5), Ok(-3.5));
        assert_eq!(ensure_positive("x", 0.25), Ok(0.25));
    }

    #[test]
    fn nan_and_infinity_rejected() {
        assert!(matches!(
            ensure_finite("amplitude", f64::NAN),
            Err(ConfigError::NonFinite { name: "amplitude", .. })
        ));
        assert!(ensure_finite("amplitude", f64::INFINITY).is_err());
        assert!(ensure_positive("radius", f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn zero_is_not_positive() {
        assert_eq!(
            ensure_positive("radius", 0.0),
            Err(ConfigError::NonPositive {
                name: "radius",
                value: 0.0
            })
        );
    }

    #[test]
    fn error_messages_name_the_parameter() {
        let err = ensure_finite("base_frequency", f64::NAN).unwrap_err();
        assert!(err.to_string().contains("base_frequency"));
    }
}
