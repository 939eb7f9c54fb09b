//! Station name validation

use super::validation::ValidationError;

/// Maximum length for station names
const MAX_STATION_NAME_LEN: usize = 255;

/// Validated station name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StationName(String);

impl StationName {
    /// Create a new station name.
    ///
    /// # Rules
    /// - Non-empty after trimming
    /// - Max 255 characters
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "station name" });
        }

        if trimmed.chars().count() > MAX_STATION_NAME_LEN {
            return Err(ValidationError::TooLong {
                field: "station name",
                max: MAX_STATION_NAME_LEN,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Get the station name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for StationName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_names() {
        assert!(StationName::new("Gangnam").is_ok());
        assert!(StationName::new("City Hall").is_ok());
    }

    #[test]
    fn trims_whitespace() {
        let name = StationName::new("  Gangnam  ").unwrap();
        assert_eq!(name.as_str(), "Gangnam");
    }

    #[test]
    fn rejects_empty() {
        let err = StationName::new("   ").unwrap_err();
        assert!(matches!(err, ValidationError::Empty { .. }));
    }

    #[test]
    fn rejects_too_long() {
        let long = "a".repeat(256);
        let err = StationName::new(&long).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 255, .. }));
    }
}
