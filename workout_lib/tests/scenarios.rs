use chrono::{DateTime, Local, TimeZone};
use workout_lib::{
    ActivityKind, Coordinate, Field, InputError, MapConfig, MemoryStorage, StoreError, SubmitError, Tracker, TrackerState,
    WorkoutStorage,
};

fn at(minute: u32) -> DateTime<Local> {
    Local.with_ymd_and_hms(2026, 4, 14, 9, minute, 0).unwrap()
}

fn open_tracker(storage: MemoryStorage) -> Tracker<MemoryStorage> {
    let mut tracker = Tracker::new(storage, MapConfig::default());
    tracker.map_ready();
    tracker
}

fn fill(tracker: &mut Tracker<MemoryStorage>, kind: ActivityKind, distance: &str, duration: &str, metric: &str) {
    if tracker.kind() != kind {
        tracker.toggle_kind();
    }
    tracker.set_field(Field::Distance, distance.into());
    tracker.set_field(Field::Duration, duration.into());
    tracker.set_field(Field::metric_for(kind), metric.into());
}

fn stored(tracker: &Tracker<MemoryStorage>) -> Option<String> {
    tracker.store().storage().get_item("workouts").unwrap()
}

#[test]
fn running_scenario() {
    let mut tracker = open_tracker(MemoryStorage::new());
    tracker.map_clicked(Coordinate(55.67, 12.56));
    fill(&mut tracker, ActivityKind::Running, "5", "25", "180");

    let workout = tracker.submit(at(0)).unwrap();
    assert_eq!(workout.rate(), 0.2);
    assert_eq!(workout.kind().rate_unit(), "min/m");

    let json: serde_json::Value = serde_json::from_str(&stored(&tracker).unwrap()).unwrap();
    assert_eq!(json[0]["type"], "running");
    assert_eq!(json[0]["pace"], 0.2);
    assert_eq!(json[0]["cad"], 180.0);
}

#[test]
fn cycling_scenario() {
    let mut tracker = open_tracker(MemoryStorage::new());
    tracker.map_clicked(Coordinate(55.67, 12.56));
    fill(&mut tracker, ActivityKind::Cycling, "20", "60", "400");

    let workout = tracker.submit(at(0)).unwrap();
    assert!((workout.rate() - 0.333).abs() < 1e-3);
    assert_eq!(workout.kind().rate_unit(), "km/h");

    let json: serde_json::Value = serde_json::from_str(&stored(&tracker).unwrap()).unwrap();
    assert_eq!(json[0]["type"], "cycling");
    assert_eq!(json[0]["elev"], 400.0);
}

#[test]
fn negative_distance_is_rejected() {
    let mut tracker = open_tracker(MemoryStorage::new());
    tracker.map_clicked(Coordinate(1., 1.));
    fill(&mut tracker, ActivityKind::Running, "5", "25", "180");
    tracker.submit(at(0)).unwrap();
    let before = stored(&tracker);

    tracker.map_clicked(Coordinate(2., 2.));
    fill(&mut tracker, ActivityKind::Running, "-1", "25", "180");
    let err = tracker.submit(at(1)).unwrap_err();

    assert!(matches!(err, SubmitError::Input(InputError::Range { field: Field::Distance, .. })));
    assert_eq!(tracker.workouts().len(), 1);
    assert_eq!(stored(&tracker), before);
    assert!(tracker.is_form_open());
}

#[test]
fn invalid_triples_never_touch_storage() {
    let cases = [
        ("abc", "25", "180"),
        ("5", "", "180"),
        ("5", "25", "NaN"),
        ("inf", "25", "180"),
        ("5", "-25", "180"),
        ("5", "25", "-0.5"),
    ];

    for (distance, duration, metric) in cases {
        let mut tracker = open_tracker(MemoryStorage::new());
        tracker.map_clicked(Coordinate(1., 1.));
        fill(&mut tracker, ActivityKind::Running, distance, duration, metric);

        assert!(tracker.submit(at(0)).is_err(), "{distance} {duration} {metric}");
        assert!(tracker.workouts().is_empty());
        assert_eq!(stored(&tracker), None);
    }
}

#[test]
fn reload_restores_workouts_in_order() {
    let mut tracker = open_tracker(MemoryStorage::new());
    let entries = [
        (ActivityKind::Running, "5", "25", "180"),
        (ActivityKind::Cycling, "20", "60", "400"),
        (ActivityKind::Running, "10", "48", "172"),
    ];
    for (minute, (kind, distance, duration, metric)) in entries.into_iter().enumerate() {
        tracker.map_clicked(Coordinate(minute as f64, 0.));
        fill(&mut tracker, kind, distance, duration, metric);
        tracker.submit(at(minute as u32)).unwrap();
    }

    let storage = MemoryStorage::with_item("workouts", &stored(&tracker).unwrap());
    let reloaded = Tracker::new(storage, MapConfig::default());

    assert_eq!(reloaded.state(), TrackerState::NoMap);
    assert_eq!(reloaded.workouts(), tracker.workouts());
    let kinds: Vec<_> = reloaded.workouts().iter().map(|w| w.kind()).collect();
    assert_eq!(kinds, [ActivityKind::Running, ActivityKind::Cycling, ActivityKind::Running]);

    let titles: Vec<_> = reloaded.newest_first().map(|w| w.title()).collect();
    assert_eq!(titles, ["Running on April 14", "Cycling on April 14", "Running on April 14"]);
}

#[test]
fn reload_with_single_running_record() {
    let json = r#"[{"type":"running","location":[43.0,21.0],"distance":5.0,"time":25.0,"id":1776151800000,
        "date":"2026-04-14T07:30:00Z","day":14,"months":3,"cad":180.0,"pace":0.2}]"#;
    let mut tracker = open_tracker(MemoryStorage::with_item("workouts", json));

    assert_eq!(tracker.workouts().len(), 1);
    let workout = &tracker.workouts()[0];
    assert_eq!(workout.rate(), 5. / 25.);
    assert_eq!(workout.title(), "Running on April 14");

    let id = workout.id;
    assert!(tracker.locate(id).is_some());
    tracker.map_clicked(Coordinate(0., 0.));
    assert!(tracker.is_form_open());
}

#[test]
fn store_errors_are_reported() {
    struct ReadOnly;

    impl WorkoutStorage for ReadOnly {
        fn get_item(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Ok(None)
        }

        fn set_item(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Backend("QuotaExceededError".into()))
        }

        fn remove_item(&mut self, _key: &str) -> Result<(), StoreError> {
            Ok(())
        }
    }

    let mut tracker = Tracker::new(ReadOnly, MapConfig::default());
    tracker.map_ready();
    tracker.map_clicked(Coordinate(1., 1.));
    tracker.set_field(Field::Distance, "1".into());
    tracker.set_field(Field::Duration, "1".into());
    tracker.set_field(Field::Cadence, "1".into());

    assert!(matches!(tracker.submit(at(0)), Err(SubmitError::Store(StoreError::Backend(_)))));
    assert!(tracker.workouts().is_empty());
    assert!(tracker.is_form_open());
}
