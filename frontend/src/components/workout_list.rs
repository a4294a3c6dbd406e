use workout_lib::Workout;
use yew::prelude::*;

pub enum Msg {
    Select(i64),
}

pub struct WorkoutList;

#[derive(PartialEq, Properties, Clone)]
pub struct Props {
    /// Newest first
    pub workouts: Vec<Workout>,
    pub select_workout: Callback<i64>,
}

impl WorkoutList {
    fn entry(&self, ctx: &Context<Self>, workout: &Workout) -> Html {
        let id = workout.id;
        let kind = workout.kind();
        let onclick = ctx.link().callback(move |_| Msg::Select(id));

        html! {
            <li class={classes!("workout", format!("workout--{}", kind.slug()))} data-id={id.to_string()} {onclick}>
                <h2 class="workout__title">{workout.title()}</h2>
                {detail(kind.icon(), workout.distance, "km")}
                {detail("⏱", workout.time, "min")}
                {detail("⚡️", workout.rounded_rate(), kind.rate_unit())}
                {detail(kind.icon(), workout.metric(), kind.metric_unit())}
            </li>
        }
    }
}

fn detail(icon: &str, value: f64, unit: &str) -> Html {
    html! {
        <div class="workout__details">
            <span class="workout__icon">{icon.to_owned()}</span>
            <span class="workout__value">{value.to_string()}</span>
            <span class="workout__unit">{unit.to_owned()}</span>
        </div>
    }
}

impl Component for WorkoutList {
    type Message = Msg;
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        WorkoutList
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Select(id) => ctx.props().select_workout.emit(id),
        }
        false
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let workouts = &ctx.props().workouts;

        html! {
            <ul class="workouts workouts__list">
                { for workouts.iter().map(|workout| self.entry(ctx, workout)) }
            </ul>
        }
    }
}
