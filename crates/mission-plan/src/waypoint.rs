use mission_csv::Row;

use crate::column::parse;
use crate::Result;

/// One waypoint row: `index,lat,lon,alt_m,yaw_deg,gimbal_pitch_deg,damping_m`.
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    pub index: u8,
    pub lat: f64,
    pub lon: f64,
    /// Relative to takeoff.
    pub alt_m: f32,
    pub yaw_deg: i16,
    pub gimbal_pitch_deg: i16,
    /// Turn radius when passing through the point.
    pub damping_m: f32,
}

impl Waypoint {
    pub fn from_row(row: &Row, line: usize) -> Result<Self> {
        Ok(Self {
            index: parse(row, line, 1, "index")?,
            lat: parse(row, line, 2, "lat")?,
            lon: parse(row, line, 3, "lon")?,
            alt_m: parse(row, line, 4, "alt_m")?,
            yaw_deg: parse(row, line, 5, "yaw_deg")?,
            gimbal_pitch_deg: parse(row, line, 6, "gimbal_pitch_deg")?,
            damping_m: parse(row, line, 7, "damping_m")?,
        })
    }
}

/// Great-circle length of the path through `waypoints`, in order.
pub fn route_length_m(waypoints: &[Waypoint]) -> f64 {
    waypoints
        .windows(2)
        .map(|seg| haversine_m(seg[0].lat, seg[0].lon, seg[1].lat, seg[1].lon))
        .sum()
}

pub(crate) fn haversine_m(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let r = 6_371_000.0_f64;
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();
    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    r * c
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PlanError;
    use std::io::Cursor;

    fn row(line: &str) -> Row {
        let mut row = Row::new();
        row.read_next_row(&mut Cursor::new(line)).unwrap();
        row
    }

    fn wp(lat: f64, lon: f64) -> Waypoint {
        Waypoint { index: 0, lat, lon, alt_m: 10.0, yaw_deg: 0, gimbal_pitch_deg: 0, damping_m: 0.0 }
    }

    #[test]
    fn test_from_row() {
        let w = Waypoint::from_row(&row("3, 47.3977, 8.5456, 30.5, -90, -45, 0.2\n"), 4).unwrap();
        assert_eq!(w.index, 3);
        assert_eq!(w.lat, 47.3977);
        assert_eq!(w.lon, 8.5456);
        assert_eq!(w.alt_m, 30.5);
        assert_eq!(w.yaw_deg, -90);
        assert_eq!(w.gimbal_pitch_deg, -45);
        assert_eq!(w.damping_m, 0.2);
    }

    #[test]
    fn test_missing_column() {
        let err = Waypoint::from_row(&row("1,47.0,8.0,30\n"), 2).unwrap_err();
        assert!(matches!(err, PlanError::MissingColumn { line: 2, column: 5, name: "yaw_deg" }));
    }

    #[test]
    fn test_invalid_value() {
        let err = Waypoint::from_row(&row("1,north,8.0,30,0,0,0\n"), 7).unwrap_err();
        assert_eq!(err.to_string(), "line 7: column 2 (lat) has invalid value \"north\"");
    }

    #[test]
    fn test_route_length() {
        assert_eq!(route_length_m(&[]), 0.0);
        assert_eq!(route_length_m(&[wp(47.0, 8.0)]), 0.0);

        // One degree of latitude is ~111.2 km.
        let len = route_length_m(&[wp(47.0, 8.0), wp(48.0, 8.0), wp(47.0, 8.0)]);
        assert!((len - 2.0 * 111_195.0).abs() < 100.0, "{}", len);
    }
}
