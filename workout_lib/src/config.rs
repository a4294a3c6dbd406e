use crate::workout::Coordinate;

pub const STORAGE_KEY: &str = "workouts";
pub const DEFAULT_TILE_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";

/// Map and storage settings shared by the controller and the frontend.
#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    pub storage_key: String,
    pub tile_url: String,
    pub max_zoom: f64,
    /// Zoom used when centring on the user's position
    pub locate_zoom: f64,
    /// Zoom used when flying to a workout from the list
    pub workout_zoom: f64,
    /// Initial view before geolocation answers
    pub default_view: Coordinate,
    pub default_zoom: f64,
    /// Position assumed when geolocation is unavailable or denied
    pub fallback_position: Coordinate,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            storage_key: STORAGE_KEY.to_owned(),
            tile_url: DEFAULT_TILE_URL.to_owned(),
            max_zoom: 20.,
            locate_zoom: 13.,
            workout_zoom: 14.,
            default_view: Coordinate(43., 21.),
            default_zoom: 5.,
            fallback_position: Coordinate(43., 21.),
        }
    }
}

impl MapConfig {
    /// Defaults, with the tile URL taken from `WORKOUT_TILE_URL` at build time if set.
    pub fn from_build_env() -> Self {
        Self::with_tile_url(option_env!("WORKOUT_TILE_URL"))
    }

    fn with_tile_url(tile_url: Option<&str>) -> Self {
        let mut config = Self::default();
        if let Some(url) = tile_url.map(str::trim).filter(|url| !url.is_empty()) {
            config.tile_url = url.to_owned();
        }
        config
    }
}
