use anyhow::Result;

use crate::waypoint::haversine_m;
use crate::{Limits, MissionInit, Waypoint};

pub fn check_limits(limits: &Limits) -> Result<()> {
    anyhow::ensure!(limits.max_velocity_mps > 0.0, "limits.max_velocity_mps must be > 0");
    anyhow::ensure!(limits.max_alt_m > 0.0, "limits.max_alt_m must be > 0");
    anyhow::ensure!(limits.max_radius_m >= 50.0, "limits.max_radius_m too small");
    Ok(())
}

pub fn check_mission(init: &MissionInit, waypoints: &[Waypoint], limits: &Limits) -> Result<()> {
    anyhow::ensure!(waypoints.len() >= 2, "mission must have >= 2 waypoints, got {}", waypoints.len());
    anyhow::ensure!(init.idle_velocity_mps > 0.0, "idle_velocity_mps must be > 0");
    anyhow::ensure!(
        init.idle_velocity_mps <= init.max_velocity_mps,
        "idle_velocity_mps ({}) exceeds max_velocity_mps ({})",
        init.idle_velocity_mps, init.max_velocity_mps
    );
    anyhow::ensure!(
        init.max_velocity_mps <= limits.max_velocity_mps,
        "max_velocity_mps ({}) exceeds limit ({})",
        init.max_velocity_mps, limits.max_velocity_mps
    );

    let first = &waypoints[0];
    let mut prev_index: Option<u8> = None;
    for wp in waypoints {
        anyhow::ensure!(wp.lat.abs() <= 90.0 && wp.lon.abs() <= 180.0, "waypoint {} coordinates invalid", wp.index);
        anyhow::ensure!(
            wp.alt_m >= 0.0 && wp.alt_m <= limits.max_alt_m,
            "waypoint {} altitude {}m outside 0..{}m", wp.index, wp.alt_m, limits.max_alt_m
        );
        let d = haversine_m(first.lat, first.lon, wp.lat, wp.lon);
        anyhow::ensure!(
            d <= limits.max_radius_m,
            "waypoint {} is {}m from the first waypoint (max {}m)", wp.index, d as i64, limits.max_radius_m
        );
        if let Some(p) = prev_index {
            anyhow::ensure!(wp.index > p, "waypoint indices must increase ({} after {})", wp.index, p);
        }
        prev_index = Some(wp.index);
    }
    Ok(())
}
