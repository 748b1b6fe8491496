//! Spherical-Mercator coordinate conversion.
//!
//! Viewport ranges are configured in Web-Mercator meters (EPSG:3857) while
//! the rendered map addresses positions in longitude and latitude, so the
//! writer needs the inverse projection to translate the configured extents.

use std::f64::consts::PI;

/// Earth radius of the spherical Mercator projection, in meters.
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Converts a Web-Mercator position in meters to `(longitude, latitude)`
/// in degrees.
pub fn to_lon_lat(x: f64, y: f64) -> (f64, f64) {
    let lon = (x / EARTH_RADIUS_M).to_degrees();
    let lat = (2.0 * (y / EARTH_RADIUS_M).exp().atan() - PI / 2.0).to_degrees();
    (lon, lat)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() < tolerance,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_origin_maps_to_null_island() {
        let (lon, lat) = to_lon_lat(0.0, 0.0);
        assert_close(lon, 0.0, 1e-9);
        assert_close(lat, 0.0, 1e-9);
    }

    #[test]
    fn test_longitude_scales_linearly() {
        let quarter_turn = EARTH_RADIUS_M * PI / 2.0;
        let (lon, _) = to_lon_lat(quarter_turn, 0.0);
        assert_close(lon, 90.0, 1e-9);
        let (lon, _) = to_lon_lat(-quarter_turn, 0.0);
        assert_close(lon, -90.0, 1e-9);
    }

    #[test]
    fn test_latitude_is_symmetric() {
        let (_, north) = to_lon_lat(0.0, 4_600_000.0);
        let (_, south) = to_lon_lat(0.0, -4_600_000.0);
        assert_close(north, -south, 1e-9);
        assert!(north > 0.0);
    }

    #[test]
    fn test_inverts_forward_projection() {
        // Forward formula: x = R * lon_rad, y = R * ln(tan(pi/4 + lat_rad/2)).
        let lon: f64 = -6.26;
        let lat: f64 = 53.35;
        let x = EARTH_RADIUS_M * lon.to_radians();
        let y = EARTH_RADIUS_M * (PI / 4.0 + lat.to_radians() / 2.0).tan().ln();
        let (lon_back, lat_back) = to_lon_lat(x, y);
        assert_close(lon_back, lon, 1e-9);
        assert_close(lat_back, lat, 1e-9);
    }
}
