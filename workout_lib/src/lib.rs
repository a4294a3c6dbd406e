pub mod config;
pub mod store;
pub mod tracker;
pub mod validation;
pub mod workout;

pub use config::MapConfig;
pub use store::{MemoryStorage, StoreError, WorkoutStorage, WorkoutStore};
pub use tracker::{MapMove, SubmitError, Tracker, TrackerState};
pub use validation::{Field, InputError, WorkoutForm};
pub use workout::{Activity, ActivityKind, Coordinate, Workout};
