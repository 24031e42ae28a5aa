use std::fmt;

/// Structural problem found while turning a raw table into a [`Dataset`].
///
/// [`Dataset`]: crate::model::Dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// The raw table has no header row.
    EmptyInput,
    /// The key field does not appear in the header row.
    MissingKeyField { field: String },
    /// A data row is shorter than the highest column index it must supply.
    /// `row` is 1-based and counts the header as row 1.
    ShortRow { row: usize, expected: usize, found: usize },
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Convert Csv to Dict failed, error: ")?;
        match self {
            Self::EmptyInput => write!(f, "input has no header row"),
            Self::MissingKeyField { field } => {
                write!(f, "key field '{field}' not found in header")
            }
            Self::ShortRow { row, expected, found } => {
                write!(f, "row {row} has {found} cell(s), expected at least {expected}")
            }
        }
    }
}

impl std::error::Error for ConversionError {}

#[derive(Debug)]
pub enum MergeError {
    /// Malformed tabular input handed to the dataset builder.
    Conversion(ConversionError),
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config or session validation error (empty key, duplicate field, key mismatch).
    ConfigValidation(String),
    /// Delimited-text read/write error.
    Csv(String),
    /// IO error (file read, unsupported file type, etc.).
    Io(String),
    /// JSON serialization of a report document failed.
    Json(String),
}

impl fmt::Display for MergeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Conversion(err) => write!(f, "{err}"),
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::Csv(msg) => write!(f, "CSV error: {msg}"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
            Self::Json(msg) => write!(f, "JSON error: {msg}"),
        }
    }
}

impl std::error::Error for MergeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Conversion(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConversionError> for MergeError {
    fn from(err: ConversionError) -> Self {
        Self::Conversion(err)
    }
}

impl From<csv::Error> for MergeError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

impl From<std::io::Error> for MergeError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for MergeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_failures_get_their_own_category() {
        let err: MergeError = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert!(matches!(err, MergeError::Json(_)));
        assert!(err.to_string().starts_with("JSON error: "));
    }

    #[test]
    fn conversion_error_is_the_source() {
        let err = MergeError::from(ConversionError::EmptyInput);
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().starts_with("Convert Csv to Dict failed, error: "));
    }
}
