use chrono::Local;
use components::{map_component::MapComponent, workout_form::WorkoutFormView, workout_list::WorkoutList};
use gloo_console::{error, info};
use storage::BrowserStorage;
use workout_lib::{Coordinate, Field, MapConfig, MapMove, SubmitError, Tracker, Workout};
use yew::prelude::*;

mod components;
mod geolocation;
mod storage;

enum MainMsg {
    MapReady,
    MapClicked(Coordinate),
    PositionFound(Coordinate),
    PositionFailed(String),
    Input(Field, String),
    ToggleKind,
    Submit,
    SelectWorkout(i64),
    Reset,
}

struct Model {
    tracker: Tracker<BrowserStorage>,
    map_move: Option<(u32, MapMove)>,
}

impl Model {
    fn move_map(&mut self, map_move: MapMove) {
        let seq = self.map_move.map_or(0, |(seq, _)| seq.wrapping_add(1));
        self.map_move = Some((seq, map_move));
    }
}

fn alert(message: &str) {
    if let Err(e) = gloo_utils::window().alert_with_message(message) {
        error!("Failed to show alert:", e);
    }
}

impl Component for Model {
    type Message = MainMsg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link().clone();

        let mut tracker = Tracker::new(BrowserStorage::open(), MapConfig::from_build_env());
        if let Some(e) = tracker.take_load_error() {
            error!(format!("Stored workouts are unreadable, starting empty: {e}"));
        }
        info!(format!("Loaded {} workouts", tracker.workouts().len()));

        geolocation::request_position(link.callback(MainMsg::PositionFound), link.callback(MainMsg::PositionFailed));

        Self { tracker, map_move: None }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            MainMsg::MapReady => {
                self.tracker.map_ready();
                true
            }
            MainMsg::MapClicked(location) => self.tracker.map_clicked(location),
            MainMsg::PositionFound(position) => {
                let map_move = self.tracker.position_found(position);
                self.move_map(map_move);
                true
            }
            MainMsg::PositionFailed(reason) => {
                error!(format!("Cannot get position: {reason}"));
                self.tracker.position_failed(&reason);
                false
            }
            MainMsg::Input(field, value) => {
                self.tracker.set_field(field, value);
                true
            }
            MainMsg::ToggleKind => {
                self.tracker.toggle_kind();
                true
            }
            MainMsg::Submit => {
                match self.tracker.submit(Local::now()) {
                    Ok(workout) => info!(format!("Added {}", workout.title())),
                    Err(SubmitError::Input(e)) => alert(&e.to_string()),
                    Err(e) => {
                        error!(format!("Failed to add workout: {e}"));
                        alert(&e.to_string());
                    }
                }
                true
            }
            MainMsg::SelectWorkout(id) => match self.tracker.locate(id) {
                Some(map_move) => {
                    self.move_map(map_move);
                    true
                }
                None => false,
            },
            MainMsg::Reset => {
                if let Err(e) = self.tracker.reset() {
                    error!(format!("Failed to reset workouts: {e}"));
                }
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let tracker = &self.tracker;

        let newest_first: Vec<Workout> = tracker.newest_first().cloned().collect();
        let in_order: Vec<Workout> = tracker.workouts().to_vec();

        html! { <>
            <div class="sidebar">
                <WorkoutFormView
                    form={tracker.form().clone()}
                    open={tracker.is_form_open()}
                    location={tracker.picked_location()}
                    on_input={link.callback(|(field, value): (Field, String)| MainMsg::Input(field, value))}
                    on_toggle={link.callback(|_: ()| MainMsg::ToggleKind)}
                    on_submit={link.callback(|_: ()| MainMsg::Submit)}
                />
                <WorkoutList workouts={newest_first} select_workout={link.callback(MainMsg::SelectWorkout)} />
                <button class="reset-btn" onclick={link.callback(|_: MouseEvent| MainMsg::Reset)}>{"Reset"}</button>
            </div>
            <MapComponent
                config={tracker.config().clone()}
                workouts={in_order}
                map_move={self.map_move}
                on_ready={link.callback(|_: ()| MainMsg::MapReady)}
                on_click={link.callback(MainMsg::MapClicked)}
            />
        </> }
    }
}

fn main() {
    yew::Renderer::<Model>::new().render();
}
