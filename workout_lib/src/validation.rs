use std::fmt;

use chrono::{DateTime, Local};

use crate::workout::{ActivityKind, Coordinate, Workout};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Distance,
    Duration,
    Cadence,
    Elevation,
}

impl Field {
    /// The input holding the activity specific metric for `kind`.
    pub fn metric_for(kind: ActivityKind) -> Self {
        match kind {
            ActivityKind::Running => Self::Cadence,
            ActivityKind::Cycling => Self::Elevation,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Distance => "Distance",
            Self::Duration => "Duration",
            Self::Cadence => "Cadence",
            Self::Elevation => "Elevation",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("{field} has to be a number, got {value:?}")]
    Format { field: Field, value: String },
    #[error("{field} has to be a positive number, got {value}")]
    Range { field: Field, value: f64 },
}

/// Raw form contents, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkoutForm {
    pub kind: ActivityKind,
    pub distance: String,
    pub duration: String,
    pub cadence: String,
    pub elevation: String,
}

impl WorkoutForm {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Distance => &self.distance,
            Field::Duration => &self.duration,
            Field::Cadence => &self.cadence,
            Field::Elevation => &self.elevation,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Distance => self.distance = value,
            Field::Duration => self.duration = value,
            Field::Cadence => self.cadence = value,
            Field::Elevation => self.elevation = value,
        }
    }

    pub fn clear(&mut self, field: Field) {
        self.set(field, String::new());
    }

    /// Parses all three relevant inputs, then checks their range.
    /// Every field must be well formed before any range check runs.
    pub fn parse(&self) -> Result<WorkoutInput, InputError> {
        let fields = [Field::Distance, Field::Duration, Field::metric_for(self.kind)];

        let mut values = [0.; 3];
        for (slot, field) in values.iter_mut().zip(fields) {
            *slot = parse_number(field, self.value(field))?;
        }

        for (value, field) in values.iter().zip(fields) {
            if *value < 0. {
                return Err(InputError::Range { field, value: *value });
            }
        }

        let [distance, duration, metric] = values;
        Ok(WorkoutInput {
            kind: self.kind,
            distance,
            duration,
            metric,
        })
    }

    /// Validates the form and builds the workout at `location`. Nothing is
    /// constructed when validation fails.
    pub fn create_workout(&self, location: Coordinate, created: DateTime<Local>) -> Result<Workout, InputError> {
        Ok(self.parse()?.into_workout(location, created))
    }
}

/// Validated numbers taken from a [`WorkoutForm`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkoutInput {
    pub kind: ActivityKind,
    pub distance: f64,
    pub duration: f64,
    pub metric: f64,
}

impl WorkoutInput {
    pub fn into_workout(self, location: Coordinate, created: DateTime<Local>) -> Workout {
        Workout::new(location, self.distance, self.duration, self.kind, self.metric, created)
    }
}

fn parse_number(field: Field, raw: &str) -> Result<f64, InputError> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(InputError::Format {
            field,
            value: raw.to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn form(kind: ActivityKind, distance: &str, duration: &str, metric: &str) -> WorkoutForm {
        let mut form = WorkoutForm {
            kind,
            distance: distance.into(),
            duration: duration.into(),
            ..Default::default()
        };
        form.set(Field::metric_for(kind), metric.into());
        form
    }

    #[test]
    fn accepts_valid_running_input() {
        let input = form(ActivityKind::Running, "5", " 25 ", "180").parse().unwrap();

        assert_eq!(input.distance, 5.);
        assert_eq!(input.duration, 25.);
        assert_eq!(input.metric, 180.);
    }

    #[test]
    fn metric_follows_selected_kind() {
        let mut f = form(ActivityKind::Cycling, "20", "60", "400");
        f.cadence = "not used".into();

        assert_eq!(f.parse().unwrap().metric, 400.);
    }

    #[test]
    fn zero_is_allowed() {
        assert!(form(ActivityKind::Running, "0", "0", "0").parse().is_ok());
    }

    #[test]
    fn rejects_non_numbers() {
        for bad in ["", "abc", "NaN", "inf", "-inf", "1e999", "5km"] {
            let err = form(ActivityKind::Running, bad, "25", "180").parse().unwrap_err();
            assert_eq!(
                err,
                InputError::Format {
                    field: Field::Distance,
                    value: bad.into()
                },
                "{bad:?}"
            );
        }
    }

    #[test]
    fn rejects_negative_values() {
        let err = form(ActivityKind::Running, "-1", "25", "180").parse().unwrap_err();
        assert_eq!(err, InputError::Range { field: Field::Distance, value: -1. });

        let err = form(ActivityKind::Cycling, "1", "25", "-400").parse().unwrap_err();
        assert_eq!(err, InputError::Range { field: Field::Elevation, value: -400. });
    }

    #[test]
    fn format_errors_win_over_range_errors() {
        let err = form(ActivityKind::Running, "-1", "x", "180").parse().unwrap_err();
        assert!(matches!(err, InputError::Format { field: Field::Duration, .. }));
    }

    #[test]
    fn creates_workout_at_location() {
        let created = Local.with_ymd_and_hms(2026, 1, 2, 8, 0, 0).unwrap();
        let workout = form(ActivityKind::Running, "5", "25", "180")
            .create_workout(Coordinate(55., 12.), created)
            .unwrap();

        assert_eq!(workout.location, Coordinate(55., 12.));
        assert_eq!(workout.rate(), 0.2);
        assert_eq!(workout.title(), "Running on January 2");
    }
}
