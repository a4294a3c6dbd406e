use chrono::{DateTime, Datelike, Local, Utc};
use serde::{Deserialize, Serialize};

pub const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September", "October", "November", "December",
];

/// A `[latitude, longitude]` pair, stored as a two element JSON array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate(pub f64, pub f64);

impl Coordinate {
    pub fn lat(&self) -> f64 {
        self.0
    }

    pub fn lng(&self) -> f64 {
        self.1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivityKind {
    #[default]
    Running,
    Cycling,
}

impl ActivityKind {
    pub fn toggled(self) -> Self {
        match self {
            Self::Running => Self::Cycling,
            Self::Cycling => Self::Running,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Running => "Running",
            Self::Cycling => "Cycling",
        }
    }

    /// Lowercase name, used for the `type` tag and CSS classes.
    pub fn slug(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Cycling => "cycling",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Running => "🏃‍♂️",
            Self::Cycling => "🚴‍♀️",
        }
    }

    /// Unit of the derived rate (pace or speed).
    pub fn rate_unit(self) -> &'static str {
        match self {
            Self::Running => "min/m",
            Self::Cycling => "km/h",
        }
    }

    /// Unit of the activity specific metric (cadence or elevation).
    pub fn metric_unit(self) -> &'static str {
        match self {
            Self::Running => "spm",
            Self::Cycling => "m",
        }
    }
}

/// Variant specific payload. The derived rate is never read back from storage,
/// it is recomputed from distance and duration on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Activity {
    Running {
        #[serde(rename = "cad")]
        cadence: f64,
        #[serde(skip_deserializing)]
        pace: f64,
    },
    Cycling {
        #[serde(rename = "elev")]
        elevation: f64,
        #[serde(skip_deserializing)]
        speed: f64,
    },
}

impl Activity {
    pub fn new(kind: ActivityKind, metric: f64, distance: f64, time: f64) -> Self {
        let rate = distance / time;
        match kind {
            ActivityKind::Running => Self::Running { cadence: metric, pace: rate },
            ActivityKind::Cycling => Self::Cycling { elevation: metric, speed: rate },
        }
    }

    pub fn kind(&self) -> ActivityKind {
        match self {
            Self::Running { .. } => ActivityKind::Running,
            Self::Cycling { .. } => ActivityKind::Cycling,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub location: Coordinate,
    /// Kilometres
    pub distance: f64,
    /// Minutes
    pub time: f64,
    /// Creation time in milliseconds. Two workouts created within the same
    /// millisecond share an id.
    pub id: i64,
    pub date: DateTime<Utc>,
    pub day: u32,
    /// Zero based month index, as displayed through [`MONTHS`].
    pub months: u32,
    #[serde(flatten)]
    pub activity: Activity,
}

impl Workout {
    /// Builds a workout from already validated values.
    /// Use [`crate::validation::WorkoutForm`] for raw user input.
    pub fn new(location: Coordinate, distance: f64, time: f64, kind: ActivityKind, metric: f64, created: DateTime<Local>) -> Self {
        Self {
            location,
            distance,
            time,
            id: created.timestamp_millis(),
            date: created.with_timezone(&Utc),
            day: created.day(),
            months: created.month0(),
            activity: Activity::new(kind, metric, distance, time),
        }
    }

    pub fn kind(&self) -> ActivityKind {
        self.activity.kind()
    }

    /// Pace for runs, speed for rides.
    pub fn rate(&self) -> f64 {
        match self.activity {
            Activity::Running { pace, .. } => pace,
            Activity::Cycling { speed, .. } => speed,
        }
    }

    /// Cadence for runs, elevation gain for rides.
    pub fn metric(&self) -> f64 {
        match self.activity {
            Activity::Running { cadence, .. } => cadence,
            Activity::Cycling { elevation, .. } => elevation,
        }
    }

    /// Rate rounded to two decimals for display.
    pub fn rounded_rate(&self) -> f64 {
        (self.rate() * 100.).round() / 100.
    }

    pub fn month_name(&self) -> &'static str {
        MONTHS.get(self.months as usize).copied().unwrap_or("???")
    }

    /// "Running on April 14"
    pub fn title(&self) -> String {
        format!("{} on {} {}", self.kind().name(), self.month_name(), self.day)
    }

    pub fn popup_content(&self) -> String {
        format!("{} {}", self.kind().icon(), self.title())
    }

    /// Recomputes the derived rate after deserialization.
    pub fn rehydrate(&mut self) {
        let rate = self.distance / self.time;
        match &mut self.activity {
            Activity::Running { pace, .. } => *pace = rate,
            Activity::Cycling { speed, .. } => *speed = rate,
        }
    }
}
