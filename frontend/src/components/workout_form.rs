use web_sys::HtmlInputElement;
use workout_lib::{ActivityKind, Coordinate, Field, WorkoutForm};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct FormProps {
    pub form: WorkoutForm,
    pub open: bool,
    /// Map location the form was opened for
    pub location: Option<Coordinate>,
    pub on_input: Callback<(Field, String)>,
    pub on_toggle: Callback<()>,
    pub on_submit: Callback<()>,
}

#[function_component]
pub fn WorkoutFormView(props: &FormProps) -> Html {
    let distance_ref = use_node_ref();

    {
        let distance_ref = distance_ref.clone();
        use_effect_with((props.open, props.location), move |(open, _)| {
            if *open {
                if let Some(input) = distance_ref.cast::<HtmlInputElement>() {
                    let _ = input.focus();
                }
            }
        });
    }

    let on_input = |field: Field| {
        let on_input = props.on_input.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_input.emit((field, input.value()));
        })
    };

    let on_toggle = {
        let on_toggle = props.on_toggle.clone();
        Callback::from(move |_: Event| on_toggle.emit(()))
    };

    let on_submit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(());
        })
    };

    let kind = props.form.kind;
    let row = |field: Field| {
        let hidden = field == Field::metric_for(kind.toggled());
        classes!("form__row", hidden.then_some("form__row--hidden"))
    };

    html! {
        <form
            class={classes!("form", (!props.open).then_some("hidden"))}
            style={if props.open { "display: grid" } else { "display: none" }}
            onsubmit={on_submit}
        >
            <div class="form__row">
                <label class="form__label">{"Type"}</label>
                <select class="form__input form__input--type" onchange={on_toggle}>
                    <option value="running" selected={kind == ActivityKind::Running}>{"Running"}</option>
                    <option value="cycling" selected={kind == ActivityKind::Cycling}>{"Cycling"}</option>
                </select>
            </div>
            <div class="form__row">
                <label class="form__label">{"Distance"}</label>
                <input
                    ref={distance_ref}
                    class="form__input form__input--distance"
                    placeholder="km"
                    value={props.form.distance.clone()}
                    oninput={on_input(Field::Distance)}
                />
            </div>
            <div class="form__row">
                <label class="form__label">{"Duration"}</label>
                <input
                    class="form__input form__input--duration"
                    placeholder="min"
                    value={props.form.duration.clone()}
                    oninput={on_input(Field::Duration)}
                />
            </div>
            <div class={row(Field::Cadence)}>
                <label class="form__label">{"Cadence"}</label>
                <input
                    class="form__input form__input--cadence"
                    placeholder="step/min"
                    value={props.form.cadence.clone()}
                    oninput={on_input(Field::Cadence)}
                />
            </div>
            <div class={row(Field::Elevation)}>
                <label class="form__label">{"Elev Gain"}</label>
                <input
                    class="form__input form__input--elevation"
                    placeholder="meters"
                    value={props.form.elevation.clone()}
                    oninput={on_input(Field::Elevation)}
                />
            </div>
            <button class="form__btn">{"OK"}</button>
        </form>
    }
}
