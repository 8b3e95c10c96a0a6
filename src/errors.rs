use thiserror::Error;

/// Enumerates errors returned by the recording codec.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Represents input that is not well-formed JSON.
    #[error("Syntax error")]
    Syntax { source: serde_json::Error },

    /// Represents a timestamp matching neither of the service's formats.
    #[error("Malformed timestamp {0:?}")]
    MalformedTimestamp(String),

    /// Represents an encode requested for a discriminant outside the known set.
    #[error("Unknown variant {0:?}")]
    UnknownVariant(String),

    /// Represents a field the active variant needs but the envelope lacks.
    #[error("Missing field {field} required by {variant}")]
    MissingRequiredField {
        variant: &'static str,
        field: &'static str,
    },

    /// Represents well-formed JSON that doesn't have the expected shape.
    #[error("Unexpected shape")]
    Shape { source: serde_json::Error },

    /// Represents a failure to turn an encoded tree into output.
    #[error("Serialization error")]
    Serialization { source: serde_json::Error },
}

impl CodecError {
    /// Sorts a serde_json failure into malformed text versus a
    /// well-formed document of the wrong shape.
    pub(crate) fn from_json(source: serde_json::Error) -> Self {
        if source.is_data() {
            CodecError::Shape { source }
        } else {
            CodecError::Syntax { source }
        }
    }

    pub(crate) fn missing(variant: &'static str, field: &'static str) -> Self {
        CodecError::MissingRequiredField { variant, field }
    }
}

/// Returned when text matches neither timestamp format.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("{text:?} matches neither timestamp format")]
pub struct TimestampError {
    pub(crate) text: String,
}

impl From<TimestampError> for CodecError {
    fn from(e: TimestampError) -> Self {
        CodecError::MalformedTimestamp(e.text)
    }
}

/// Enumerates errors returned while reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Represents a variable whose value isn't one of the accepted ones.
    #[error("Invalid value {value:?} for {name}")]
    InvalidValue { name: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::CodecError;

    #[test]
    fn messages_name_the_offending_value() {
        assert_eq!(
            CodecError::UnknownVariant("recSeason".to_owned()).to_string(),
            "Unknown variant \"recSeason\""
        );
        assert_eq!(
            CodecError::missing("recMovie", "objectID").to_string(),
            "Missing field objectID required by recMovie"
        );
    }
}
