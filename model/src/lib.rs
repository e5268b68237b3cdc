#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod distance;
mod playback;
mod route;

use anyhow::Result;
use geom::{Bounds, GPSBounds};

pub use self::distance::{great_circle_km, speed_kmh};
pub use self::playback::{Playback, PlaybackStatus, Step, Toggle};
pub use self::route::{PositionSample, Route};

pub struct Model {
    pub bounds: Bounds,
    pub gps_bounds: GPSBounds,
    pub route: Route,
}

impl Model {
    /// Parses a JSON array of recorded position samples. Array order is playback order.
    pub fn load(bytes: &[u8]) -> Result<Self> {
        let (gps_bounds, route) = route::load(bytes)?;
        Ok(Self {
            bounds: gps_bounds.to_bounds(),
            gps_bounds,
            route,
        })
    }

    /// Only used as a fallback when the initial load fails; nothing can play in an empty model.
    pub fn empty() -> Self {
        let gps_bounds = GPSBounds::new();
        Self {
            bounds: gps_bounds.to_bounds(),
            gps_bounds,
            route: Route::empty(),
        }
    }
}
