//! Section value type and its numeric field validation

use super::validation::ValidationError;

/// Validated section distance (strictly positive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Distance(i64);

impl Distance {
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if value <= 0 {
            return Err(ValidationError::NotPositive {
                field: "distance",
                value,
            });
        }
        Ok(Self(value))
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

/// Validated section travel duration in minutes (strictly positive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Duration(i64);

impl Duration {
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if value <= 0 {
            return Err(ValidationError::NotPositive {
                field: "duration",
                value,
            });
        }
        Ok(Self(value))
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

/// One directed edge of a line: up station → down station.
///
/// Stations are referenced by identity; resolving ids to records is the
/// storage layer's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub up_station: i64,
    pub down_station: i64,
    pub distance: Distance,
    pub duration: Option<Duration>,
}

impl Section {
    pub fn new(
        up_station: i64,
        down_station: i64,
        distance: Distance,
        duration: Option<Duration>,
    ) -> Self {
        Self {
            up_station,
            down_station,
            distance,
            duration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_must_be_positive() {
        assert!(Distance::new(1).is_ok());
        assert!(Distance::new(10).is_ok());

        let err = Distance::new(0).unwrap_err();
        assert!(matches!(err, ValidationError::NotPositive { value: 0, .. }));

        let err = Distance::new(-5).unwrap_err();
        assert!(matches!(err, ValidationError::NotPositive { value: -5, .. }));
    }

    #[test]
    fn duration_must_be_positive() {
        assert!(Duration::new(3).is_ok());
        assert!(Duration::new(0).is_err());
    }
}
