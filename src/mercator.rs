/// Spherical Web Mercator (EPSG:900913) conversions.
///
/// The tile service takes bounding boxes and reports incident positions in
/// the spherical Web Mercator plane; the warehouse stores WGS84 geographic
/// coordinates. These four functions are the only place the two coordinate
/// spaces meet: forward when building the request URL, inverse just before
/// each row is written.
///
/// All functions are pure. Inverses recover the input to within 1e-6
/// degrees for latitude in (-85, 85) and longitude in (-180, 180).

use std::f64::consts::PI;

/// Sphere radius used by the projection, in meters.
const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// WGS84 longitude (degrees) to projected x (meters).
pub fn lon_to_x(lon: f64) -> f64 {
    EARTH_RADIUS_M * lon.to_radians()
}

/// WGS84 latitude (degrees) to projected y (meters).
pub fn lat_to_y(lat: f64) -> f64 {
    EARTH_RADIUS_M * (PI / 4.0 + lat.to_radians() / 2.0).tan().ln()
}

/// Projected x (meters) back to WGS84 longitude (degrees).
pub fn x_to_lon(x: f64) -> f64 {
    (x / EARTH_RADIUS_M).to_degrees()
}

/// Projected y (meters) back to WGS84 latitude (degrees).
pub fn y_to_lat(y: f64) -> f64 {
    (2.0 * (y / EARTH_RADIUS_M).exp().atan() - PI / 2.0).to_degrees()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE_DEG: f64 = 1e-6;

    #[test]
    fn test_equator_and_meridian_project_to_origin() {
        assert_eq!(lon_to_x(0.0), 0.0);
        assert!(lat_to_y(0.0).abs() < 1e-9, "equator should project to y = 0");
    }

    #[test]
    fn test_known_projected_values() {
        // Corner of the polled region: 43°N 80°W.
        assert!(
            (lon_to_x(-80.0) - -8_905_559.263_461_87).abs() < 0.01,
            "x for 80°W, got {}",
            lon_to_x(-80.0)
        );
        assert!(
            (lat_to_y(43.0) - 5_311_971.85).abs() < 1.0,
            "y for 43°N, got {}",
            lat_to_y(43.0)
        );
    }

    #[test]
    fn test_longitude_round_trip_across_domain() {
        let mut lon = -179.5;
        while lon < 180.0 {
            let recovered = x_to_lon(lon_to_x(lon));
            assert!(
                (recovered - lon).abs() < TOLERANCE_DEG,
                "lon {} round-tripped to {}",
                lon,
                recovered
            );
            lon += 7.3;
        }
    }

    #[test]
    fn test_latitude_round_trip_across_domain() {
        let mut lat = -84.5;
        while lat < 85.0 {
            let recovered = y_to_lat(lat_to_y(lat));
            assert!(
                (recovered - lat).abs() < TOLERANCE_DEG,
                "lat {} round-tripped to {}",
                lat,
                recovered
            );
            lat += 4.7;
        }
    }

    #[test]
    fn test_inverse_round_trip_from_projected_plane() {
        // Start from projected coordinates (the direction the persister uses).
        for y in [-15_000_000.0, -5_000_000.0, 0.0, 5_311_971.85, 15_000_000.0] {
            let recovered = lat_to_y(y_to_lat(y));
            assert!(
                (recovered - y).abs() < 0.01,
                "y {} round-tripped to {}",
                y,
                recovered
            );
        }
    }

    #[test]
    fn test_northern_latitudes_project_positive() {
        assert!(lat_to_y(45.0) > 0.0);
        assert!(lat_to_y(-45.0) < 0.0);
        assert!(
            (lat_to_y(45.0) + lat_to_y(-45.0)).abs() < 1e-6,
            "projection should be symmetric about the equator"
        );
    }
}
