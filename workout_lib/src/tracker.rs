use chrono::{DateTime, Local};

use crate::{
    config::MapConfig,
    store::{StoreError, WorkoutStorage, WorkoutStore},
    validation::{Field, InputError, WorkoutForm},
    workout::{ActivityKind, Coordinate, Workout},
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackerState {
    /// The map has not finished loading
    NoMap,
    Idle,
    /// The form is visible and a map location has been picked
    FormOpen { location: Coordinate },
    /// Only observed while a submission is being processed
    Submitting,
}

/// A map movement the view should perform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapMove {
    SetView { center: Coordinate, zoom: f64 },
    FlyTo { center: Coordinate, zoom: f64 },
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("no location picked on the map")]
    NoLocation,
}

/// Owns the workout list, the form contents and the UI state, and keeps the
/// list mirrored to storage.
pub struct Tracker<S> {
    config: MapConfig,
    store: WorkoutStore<S>,
    workouts: Vec<Workout>,
    state: TrackerState,
    form: WorkoutForm,
    position: Option<Coordinate>,
    load_error: Option<StoreError>,
}

impl<S: WorkoutStorage> Tracker<S> {
    /// Loads previously stored workouts. Unreadable storage is treated as
    /// empty and stays untouched until the next workout is saved; the error
    /// is kept for [`Tracker::take_load_error`].
    pub fn new(storage: S, config: MapConfig) -> Self {
        let store = WorkoutStore::new(storage, config.storage_key.clone());
        let (workouts, load_error) = match store.load() {
            Ok(workouts) => (workouts, None),
            Err(e) => {
                tracing::error!(error = %e, "Could not load stored workouts");
                (Vec::new(), Some(e))
            }
        };

        Self {
            config,
            store,
            workouts,
            state: TrackerState::NoMap,
            form: WorkoutForm::default(),
            position: None,
            load_error,
        }
    }

    /// The error that made startup fall back to an empty list, if any.
    pub fn take_load_error(&mut self) -> Option<StoreError> {
        self.load_error.take()
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn store(&self) -> &WorkoutStore<S> {
        &self.store
    }

    /// In insertion order, oldest first.
    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn newest_first(&self) -> impl Iterator<Item = &Workout> {
        self.workouts.iter().rev()
    }

    pub fn state(&self) -> TrackerState {
        self.state
    }

    pub fn is_form_open(&self) -> bool {
        matches!(self.state, TrackerState::FormOpen { .. })
    }

    pub fn picked_location(&self) -> Option<Coordinate> {
        match self.state {
            TrackerState::FormOpen { location } => Some(location),
            _ => None,
        }
    }

    pub fn form(&self) -> &WorkoutForm {
        &self.form
    }

    pub fn kind(&self) -> ActivityKind {
        self.form.kind
    }

    pub fn position(&self) -> Option<Coordinate> {
        self.position
    }

    pub fn set_field(&mut self, field: Field, value: String) {
        self.form.set(field, value);
    }

    pub fn map_ready(&mut self) {
        if self.state == TrackerState::NoMap {
            self.state = TrackerState::Idle;
        }
    }

    /// Opens the form at `location`. Returns false while the map is not ready.
    pub fn map_clicked(&mut self, location: Coordinate) -> bool {
        match self.state {
            TrackerState::NoMap | TrackerState::Submitting => false,
            TrackerState::Idle | TrackerState::FormOpen { .. } => {
                self.state = TrackerState::FormOpen { location };
                self.form.clear(Field::Distance);
                self.form.clear(Field::Duration);
                true
            }
        }
    }

    /// Switches between running and cycling and clears both metric inputs.
    pub fn toggle_kind(&mut self) {
        self.form.kind = self.form.kind.toggled();
        self.form.clear(Field::Cadence);
        self.form.clear(Field::Elevation);
    }

    /// Validates the form, appends the workout and persists the list.
    /// On error the list, the storage and the form stay as they were.
    pub fn submit(&mut self, now: DateTime<Local>) -> Result<&Workout, SubmitError> {
        let TrackerState::FormOpen { location } = self.state else {
            return Err(SubmitError::NoLocation);
        };

        self.state = TrackerState::Submitting;
        match self.append(location, now) {
            Ok(index) => {
                self.hide_form();
                let workout = &self.workouts[index];
                tracing::info!(id = workout.id, kind = workout.kind().name(), "Added workout");
                Ok(workout)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Rejected workout");
                self.state = TrackerState::FormOpen { location };
                Err(e)
            }
        }
    }

    /// Returns the index of the new workout.
    fn append(&mut self, location: Coordinate, now: DateTime<Local>) -> Result<usize, SubmitError> {
        let workout = self.form.create_workout(location, now)?;
        self.workouts.push(workout);

        if let Err(e) = self.store.save(&self.workouts) {
            self.workouts.pop();
            return Err(e.into());
        }
        Ok(self.workouts.len() - 1)
    }

    fn hide_form(&mut self) {
        let kind = self.form.kind;
        self.form = WorkoutForm { kind, ..Default::default() };
        self.state = TrackerState::Idle;
    }

    pub fn find(&self, id: i64) -> Option<&Workout> {
        self.workouts.iter().find(|workout| workout.id == id)
    }

    /// Where the map should fly when a list entry is clicked.
    pub fn locate(&self, id: i64) -> Option<MapMove> {
        self.find(id).map(|workout| MapMove::FlyTo {
            center: workout.location,
            zoom: self.config.workout_zoom,
        })
    }

    pub fn position_found(&mut self, position: Coordinate) -> MapMove {
        self.position = Some(position);
        MapMove::SetView {
            center: position,
            zoom: self.config.locate_zoom,
        }
    }

    pub fn position_failed(&mut self, reason: &str) {
        tracing::warn!(reason, "Cannot get position, using fallback");
        self.position = Some(self.config.fallback_position);
    }

    /// Deletes every workout, in storage and in memory.
    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.store.reset()?;
        self.workouts.clear();
        Ok(())
    }
}
