use anyhow::Result;
use chrono::{DateTime, Timelike};
use geom::{Distance, Duration, GPSBounds, LonLat, PolyLine, Pt2D, Time};
use serde::Deserialize;

/// One recorded (position, timestamp) reading. `gps` keeps the raw degrees from the input file,
/// `pos` is the same point projected into map space, and `time` is the time-of-day written in the
/// timestamp. The date is ignored.
#[derive(Clone, Copy)]
pub struct PositionSample {
    pub gps: LonLat,
    pub pos: Pt2D,
    pub time: Time,
}

/// The full ordered sequence of samples for one playback session. Non-empty once loaded, never
/// mutated.
pub struct Route {
    samples: Vec<PositionSample>,
}

impl Route {
    pub(crate) fn empty() -> Self {
        Self {
            samples: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn sample(&self, idx: usize) -> &PositionSample {
        &self.samples[idx]
    }

    /// The sample before `idx`, if there is one. Feeds the speed readout.
    pub fn previous(&self, idx: usize) -> Option<&PositionSample> {
        if idx == 0 {
            None
        } else {
            Some(&self.samples[idx - 1])
        }
    }

    /// The whole route as one polyline. None if the samples collapse to a single point.
    pub fn as_polyline(&self) -> Option<PolyLine> {
        self.polyline_between(0, self.samples.len().saturating_sub(1))
    }

    /// The traveled path: every sample from the start through `end_idx`.
    pub fn traveled_polyline(&self, end_idx: usize) -> Option<PolyLine> {
        self.polyline_between(0, end_idx)
    }

    fn polyline_between(&self, start_idx: usize, end_idx: usize) -> Option<PolyLine> {
        if self.samples.is_empty() {
            return None;
        }
        let pts: Vec<Pt2D> = self.samples[start_idx..=end_idx]
            .iter()
            .map(|s| s.pos)
            .collect();
        // The vehicle often idles in place; collapse those runs before building the line.
        let pts = Pt2D::approx_dedupe(pts, Distance::meters(1.0));
        if pts.len() < 2 {
            return None;
        }
        Some(PolyLine::unchecked_new(pts))
    }
}

pub fn load(bytes: &[u8]) -> Result<(GPSBounds, Route)> {
    let raw: Vec<RawSample> = serde_json::from_slice(bytes)?;
    if raw.is_empty() {
        bail!("the route file doesn't contain any samples");
    }

    let mut gps_bounds = GPSBounds::new();
    for rec in &raw {
        gps_bounds.update(LonLat::new(rec.longitude, rec.latitude));
    }

    let mut samples = Vec::new();
    for rec in raw {
        let datetime = DateTime::parse_from_rfc3339(&rec.timestamp)
            .map_err(|err| anyhow!("bad timestamp {}: {}", rec.timestamp, err))?;
        // Ignore the date
        let time = datetime.time();
        let time = Time::START_OF_DAY
            + Duration::hours(time.hour() as usize)
            + Duration::minutes(time.minute() as usize)
            + Duration::seconds(time.second() as f64);

        let gps = LonLat::new(rec.longitude, rec.latitude);
        samples.push(PositionSample {
            gps,
            pos: gps.to_pt(&gps_bounds),
            time,
        });
    }

    info!("Loaded a route with {} samples", samples.len());
    if samples.len() == 1 {
        warn!("The route only has one sample; playback will finish on the first tick");
    }
    dump_bounding_box(&gps_bounds);

    Ok((gps_bounds, Route { samples }))
}

#[derive(Deserialize)]
struct RawSample {
    latitude: f64,
    longitude: f64,
    timestamp: String,
}

fn dump_bounding_box(gps_bounds: &GPSBounds) {
    use geojson::{Feature, FeatureCollection, GeoJson};

    let feature = Feature {
        bbox: None,
        geometry: Some(
            gps_bounds
                .to_bounds()
                .get_rectangle()
                .to_geojson(Some(gps_bounds)),
        ),
        id: None,
        properties: None,
        foreign_members: None,
    };
    let gj = GeoJson::FeatureCollection(FeatureCollection {
        features: vec![feature],
        bbox: None,
        foreign_members: None,
    });
    info!(
        "GeoJSON covering the bounding box: {}",
        serde_json::to_string(&gj).unwrap()
    );
}
