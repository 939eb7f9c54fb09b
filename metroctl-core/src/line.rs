//! Line name and color validation
//!
//! Color format: tailwind-style slug such as `bg-red-600`.

use once_cell::sync::Lazy;
use regex::Regex;

use super::validation::ValidationError;

/// Maximum length for line names
const MAX_LINE_NAME_LEN: usize = 255;

/// Maximum length for line colors
const MAX_LINE_COLOR_LEN: usize = 32;

/// Color slug pattern, e.g. `bg-red-600`
static COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^bg-[a-z]+-[0-9]{2,3}$").expect("invalid color regex"));

/// Validated line name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineName(String);

impl LineName {
    /// Create a new line name (non-empty after trimming, max 255 chars).
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "line name" });
        }

        if trimmed.chars().count() > MAX_LINE_NAME_LEN {
            return Err(ValidationError::TooLong {
                field: "line name",
                max: MAX_LINE_NAME_LEN,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for LineName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Validated line color (slug format)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineColor(String);

impl LineColor {
    /// Create a new line color, validating slug format.
    ///
    /// # Example
    /// ```
    /// use metroctl_core::LineColor;
    ///
    /// assert!(LineColor::new("bg-red-600").is_ok());
    /// assert!(LineColor::new("red").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "line color" });
        }

        if s.len() > MAX_LINE_COLOR_LEN {
            return Err(ValidationError::TooLong {
                field: "line color",
                max: MAX_LINE_COLOR_LEN,
            });
        }

        if !COLOR_RE.is_match(s) {
            return Err(ValidationError::InvalidFormat {
                field: "line color",
                reason: "must be a slug like 'bg-red-600'",
            });
        }

        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for LineColor {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_colors() {
        assert!(LineColor::new("bg-red-600").is_ok());
        assert!(LineColor::new("bg-green-50").is_ok());
        assert!(LineColor::new("bg-lime-400").is_ok());
    }

    #[test]
    fn rejects_bare_color_words() {
        let err = LineColor::new("red").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));
    }

    #[test]
    fn rejects_uppercase() {
        let err = LineColor::new("bg-Red-600").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { .. }));
    }

    #[test]
    fn rejects_empty_color() {
        let err = LineColor::new("").unwrap_err();
        assert!(matches!(err, ValidationError::Empty { .. }));
    }

    #[test]
    fn line_name_rules() {
        assert!(LineName::new("Line 2").is_ok());
        assert!(LineName::new("").is_err());
        assert!(LineName::new(&"a".repeat(256)).is_err());
    }
}
