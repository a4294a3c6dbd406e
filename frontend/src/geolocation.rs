use wasm_bindgen::{JsCast, closure::Closure};
use web_sys::{Position, PositionError};
use workout_lib::Coordinate;
use yew::Callback;

/// Asks the browser for the current position. Exactly one of the callbacks fires.
pub fn request_position(on_found: Callback<Coordinate>, on_failed: Callback<String>) {
    let geolocation = match gloo_utils::window().navigator().geolocation() {
        Ok(geolocation) => geolocation,
        Err(e) => {
            on_failed.emit(format!("geolocation unavailable: {e:?}"));
            return;
        }
    };

    let success = Closure::once_into_js(move |position: Position| {
        let coords = position.coords();
        on_found.emit(Coordinate(coords.latitude(), coords.longitude()));
    });

    let on_error = on_failed.clone();
    let failure = Closure::once_into_js(move |e: PositionError| {
        on_error.emit(e.message());
    });

    if let Err(e) = geolocation.get_current_position_with_error_callback(success.unchecked_ref(), Some(failure.unchecked_ref())) {
        on_failed.emit(format!("{e:?}"));
    }
}
