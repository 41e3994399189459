use std::fmt;

#[derive(Debug)]
pub enum GeocodeError {
    /// The reference dataset contained no records.
    EmptyDataset,
    /// The reference dataset could not be parsed.
    Dataset(csv::Error),
    Io(std::io::Error),
    Config(String),
    /// A query produced no candidates.
    NoMatchFound,
    /// One or both sides of a comparison did not resolve to a coordinate.
    AmbiguousOrMissingCoordinates {
        first_resolved: bool,
        second_resolved: bool,
    },
}

impl fmt::Display for GeocodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeocodeError::EmptyDataset => write!(f, "Reference dataset is empty"),
            GeocodeError::Dataset(e) => write!(f, "Dataset error: {}", e),
            GeocodeError::Io(e) => write!(f, "I/O error: {}", e),
            GeocodeError::Config(msg) => write!(f, "Invalid configuration: {}", msg),
            GeocodeError::NoMatchFound => write!(f, "No matching address found"),
            GeocodeError::AmbiguousOrMissingCoordinates {
                first_resolved,
                second_resolved,
            } => write!(
                f,
                "Cannot compare addresses: coordinates missing (first resolved: {}, second resolved: {})",
                first_resolved, second_resolved
            ),
        }
    }
}

impl std::error::Error for GeocodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GeocodeError::Dataset(e) => Some(e),
            GeocodeError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<csv::Error> for GeocodeError {
    fn from(e: csv::Error) -> Self {
        GeocodeError::Dataset(e)
    }
}

impl From<std::io::Error> for GeocodeError {
    fn from(e: std::io::Error) -> Self {
        GeocodeError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_unresolved_sides() {
        let err = GeocodeError::AmbiguousOrMissingCoordinates {
            first_resolved: true,
            second_resolved: false,
        };
        let msg = err.to_string();
        assert!(msg.contains("first resolved: true"));
        assert!(msg.contains("second resolved: false"));
    }

    #[test]
    fn test_io_error_has_source() {
        let err: GeocodeError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing.csv").into();
        assert!(std::error::Error::source(&err).is_some());
    }
}
