use model::{speed_kmh, PositionSample};

pub fn coordinates(sample: &PositionSample) -> String {
    format!("{:.5}, {:.5}", sample.gps.y(), sample.gps.x())
}

pub fn clock(sample: &PositionSample) -> String {
    sample.time.ampm_tostring()
}

/// The speed readout needs the previous sample; the first sample of a route has none.
pub fn speed(prev: Option<&PositionSample>, current: &PositionSample) -> String {
    match prev {
        Some(prev) => format!("{:.2} km/h", speed_kmh(prev, current)),
        None => "Start".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use geom::{Duration, LonLat, Pt2D, Time};

    use super::*;

    fn sample(lon: f64, lat: f64, time: Time) -> PositionSample {
        PositionSample {
            gps: LonLat::new(lon, lat),
            pos: Pt2D::new(0.0, 0.0),
            time,
        }
    }

    #[test]
    fn test_coordinates_five_decimals() {
        let s = sample(-122.3331, 47.6097, Time::START_OF_DAY);
        assert_eq!(coordinates(&s), "47.60970, -122.33310");
    }

    #[test]
    fn test_speed_sentinel_at_start() {
        let s = sample(0.0, 0.0, Time::START_OF_DAY);
        assert_eq!(speed(None, &s), "Start");
    }

    #[test]
    fn test_speed_zero_for_equal_timestamps() {
        let prev = sample(0.0, 0.0, Time::START_OF_DAY);
        let current = sample(0.009, 0.0, Time::START_OF_DAY);
        assert_eq!(speed(Some(&prev), &current), "0.00 km/h");
    }

    #[test]
    fn test_speed_two_decimals() {
        // Roughly 1 km east in one minute
        let prev = sample(0.0, 0.0, Time::START_OF_DAY);
        let current = sample(0.009, 0.0, Time::START_OF_DAY + Duration::minutes(1));
        let s = speed(Some(&prev), &current);
        let kmh: f64 = s.strip_suffix(" km/h").unwrap().parse().unwrap();
        assert!((kmh - 60.0).abs() < 0.5, "expected ~60 km/h, got {}", s);
    }
}
