use serde::ser::{self, Serializer};

/// Serializes a float, refusing NaN and infinities, which JSON can only
/// write as `null`.
pub(crate) fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where S: Serializer {
    if !value.is_finite() {
        return Err(ser::Error::custom(format!("{} is not a number", value)));
    }

    serializer.serialize_f64(*value)
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    #[derive(Serialize)]
    struct Seconds {
        #[serde(serialize_with = "super::serialize")]
        value: f64,
    }

    #[test]
    fn finite_values_are_written() {
        assert_eq!(
            serde_json::to_string(&Seconds { value: -15.0 }).unwrap(),
            r#"{"value":-15.0}"#
        );
    }

    #[test]
    fn non_finite_values_are_refused() {
        for &value in &[f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(serde_json::to_string(&Seconds { value }).is_err(), "{} must be refused", value);
            assert!(serde_json::to_value(&Seconds { value }).is_err(), "{} must be refused", value);
        }
    }
}
