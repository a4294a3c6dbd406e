use gloo_console::{error, info};
use gloo_utils::document;
use js_sys::{Function, Reflect};
use leaflet::{LatLng, Map, MapOptions, Marker, Popup, PopupOptions, TileLayer, TileLayerOptions};
use wasm_bindgen::{JsCast, JsValue, closure::Closure};
use web_sys::{Element, HtmlElement, Node};
use workout_lib::{Coordinate, MapConfig, MapMove, Workout};
use yew::prelude::*;

pub struct MapComponent {
    map: Option<(Map, HtmlElement)>,
    markers: Vec<Marker>,
    applied_move: Option<u32>,
    _on_click: Option<Closure<dyn FnMut(JsValue)>>,
}

#[derive(PartialEq, Properties, Clone)]
pub struct Props {
    pub config: MapConfig,
    pub workouts: Vec<Workout>,
    /// Sequence number and movement. A new number replays the movement.
    pub map_move: Option<(u32, MapMove)>,
    pub on_ready: Callback<()>,
    pub on_click: Callback<Coordinate>,
}

impl MapComponent {
    fn render_map(&self) -> Html {
        match &self.map {
            Some((_, container)) => {
                let node: &Node = container.as_ref();
                Html::VRef(node.clone())
            }
            None => html! { <p class="map-error">{"The map could not be created"}</p> },
        }
    }

    /// Adds markers for workouts that do not have one yet. A shorter list
    /// means storage was reset, so every marker is rebuilt.
    fn sync_markers(&mut self, workouts: &[Workout]) {
        let Some((map, _)) = &self.map else {
            return;
        };

        if workouts.len() < self.markers.len() {
            for marker in self.markers.drain(..) {
                marker.remove();
            }
        }

        for workout in &workouts[self.markers.len()..] {
            self.markers.push(place_marker(map, workout));
        }
    }

    fn apply_move(&mut self, map_move: Option<(u32, MapMove)>) {
        let (Some((map, _)), Some((seq, map_move))) = (&self.map, map_move) else {
            return;
        };
        if self.applied_move == Some(seq) {
            return;
        }
        self.applied_move = Some(seq);

        match map_move {
            MapMove::SetView { center, zoom } => {
                map.set_view(&lat_lng(center), zoom);
            }
            MapMove::FlyTo { center, zoom } => {
                map.fly_to(&lat_lng(center), zoom);
            }
        }
    }
}

impl Component for MapComponent {
    type Message = ();
    type Properties = Props;

    fn create(_ctx: &Context<Self>) -> Self {
        let container = document()
            .create_element("div")
            .ok()
            .and_then(|element: Element| element.dyn_into::<HtmlElement>().ok());

        let map = container.map(|container| {
            container.set_class_name("map");
            let map = Map::new_with_element(&container, &MapOptions::default());
            (map, container)
        });

        if map.is_none() {
            error!("Failed to create map container");
        }

        Self {
            map,
            markers: Vec::new(),
            applied_move: None,
            _on_click: None,
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if !first_render {
            return;
        }
        let props = ctx.props();
        let Some((map, _)) = &self.map else {
            return;
        };

        map.set_max_zoom(props.config.max_zoom);
        map.set_view(&lat_lng(props.config.default_view), props.config.default_zoom);
        add_tile_layer(map, &props.config);

        let on_click = props.on_click.clone();
        let handler = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| match event_location(&event) {
            Ok(location) => on_click.emit(location),
            Err(e) => error!("Map click without location:", e),
        });
        if let Err(e) = call_method(map.as_ref(), "on", &[JsValue::from_str("click"), handler.as_ref().clone()]) {
            error!("Failed to subscribe to map clicks:", e);
        }
        self._on_click = Some(handler);

        self.sync_markers(&props.workouts);
        self.apply_move(props.map_move);
        info!("Map ready");
        props.on_ready.emit(());
    }

    fn changed(&mut self, ctx: &Context<Self>, _old_props: &Self::Properties) -> bool {
        let props = ctx.props();
        if let Some((map, _)) = &self.map {
            map.invalidate_size(false);
        }

        self.sync_markers(&props.workouts);
        self.apply_move(props.map_move);

        false
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        html! {
            <div id="map" class="map">
                {self.render_map()}
            </div>
        }
    }
}

fn lat_lng(coordinate: Coordinate) -> LatLng {
    LatLng::new(coordinate.lat(), coordinate.lng())
}

fn event_location(event: &JsValue) -> Result<Coordinate, JsValue> {
    let latlng: LatLng = Reflect::get(event, &JsValue::from_str("latlng"))?.dyn_into()?;
    Ok(Coordinate(latlng.lat(), latlng.lng()))
}

/// Calls a leaflet method the bindings do not expose.
fn call_method(target: &JsValue, name: &str, args: &[JsValue]) -> Result<JsValue, JsValue> {
    let method: Function = Reflect::get(target, &JsValue::from_str(name))?.dyn_into()?;
    method.apply(target, &args.iter().collect())
}

fn place_marker(map: &Map, workout: &Workout) -> Marker {
    let kind = workout.kind();

    let opts = PopupOptions::default();
    opts.set_class_name(format!("{}-popup", kind.slug()));
    opts.set_min_width(250.);
    opts.set_max_width(100.);
    opts.set_auto_close(false);
    opts.set_close_on_click(false);

    let popup = Popup::new(&opts, None);
    popup.set_content(&workout.popup_content().into());

    let marker = Marker::new(&lat_lng(workout.location));
    marker.add_to(map);
    marker.bind_popup(&popup);
    if let Err(e) = call_method(marker.as_ref(), "openPopup", &[]) {
        error!("Failed to open popup:", e);
    }

    marker
}

fn add_tile_layer(map: &Map, config: &MapConfig) {
    let opts = TileLayerOptions::new();
    opts.set_update_when_idle(true);
    TileLayer::new_options(&config.tile_url, &opts).add_to(map);
}
