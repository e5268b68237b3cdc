use geom::LonLat;

use crate::PositionSample;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points, in kilometers.
pub fn great_circle_km(from: LonLat, to: LonLat) -> f64 {
    let lat1 = from.y().to_radians();
    let lat2 = to.y().to_radians();
    let delta_lat = (to.y() - from.y()).to_radians();
    let delta_lon = (to.x() - from.x()).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    // Rounding can push `a` past 1 for antipodal points; clamp before the sqrt.
    let c = 2.0 * a.sqrt().atan2((1.0 - a).max(0.0).sqrt());

    EARTH_RADIUS_KM * c
}

/// Instantaneous speed between two consecutive samples, in km/h. 0 if no time elapsed between
/// them, or if the clock ran backwards (out-of-order input, midnight wrap).
pub fn speed_kmh(prev: &PositionSample, current: &PositionSample) -> f64 {
    if current.time <= prev.time {
        return 0.0;
    }
    let hours = (current.time - prev.time).inner_seconds() / 3600.0;
    great_circle_km(prev.gps, current.gps) / hours
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
    fn test_same_point_is_zero() {
        let pt = LonLat::new(-115.1, 36.1);
        assert!(great_circle_km(pt, pt) < 0.001);
    }

    #[test]
    fn test_symmetric() {
        let a = LonLat::new(-115.14, 36.17);
        let b = LonLat::new(-118.24, 34.05);
        let d1 = great_circle_km(a, b);
        let d2 = great_circle_km(b, a);
        assert!((d1 - d2).abs() < 1e-9);
    }

    #[test]
    fn test_known_distance() {
        // Las Vegas to Los Angeles, roughly 370 km
        let d = great_circle_km(LonLat::new(-115.14, 36.17), LonLat::new(-118.24, 34.05));
        assert!(d > 350.0 && d < 400.0, "LV to LA should be ~370km, got {}", d);
    }

    #[test]
    fn test_antipodal_stays_finite() {
        let d = great_circle_km(LonLat::new(0.0, 0.0), LonLat::new(180.0, 0.0));
        assert!(d.is_finite());
        // Never more than half the Earth's circumference
        assert!(d <= std::f64::consts::PI * 6371.0 + 0.001);
        assert!(d > 20_000.0);
    }

    #[test]
    fn test_speed_one_km_per_minute() {
        // 0.009 degrees of longitude at the equator is just over 1 km
        let prev = sample(0.0, 0.0, Time::START_OF_DAY);
        let current = sample(0.009, 0.0, Time::START_OF_DAY + Duration::minutes(1));
        let kmh = speed_kmh(&prev, &current);
        assert!((kmh - 60.0).abs() < 0.5, "expected ~60 km/h, got {}", kmh);
    }

    #[test]
    fn test_speed_zero_elapsed_time() {
        let prev = sample(0.0, 0.0, Time::START_OF_DAY);
        let current = sample(0.009, 0.0, Time::START_OF_DAY);
        assert_eq!(speed_kmh(&prev, &current), 0.0);
    }

    #[test]
    fn test_speed_backwards_clock() {
        let prev = sample(0.0, 0.0, Time::START_OF_DAY + Duration::minutes(5));
        let current = sample(0.009, 0.0, Time::START_OF_DAY);
        assert_eq!(speed_kmh(&prev, &current), 0.0);
    }
}
