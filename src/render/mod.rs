//! Schematic map of the highway drawn with Bevy gizmos.
//!
//! Draws the route line, each camera with its alert radius, and the vehicle
//! marker at the position from the latest snapshot.

use bevy::math::Isometry2d;
use bevy::prelude::*;

use crate::simulation::engine::SimulationEngine;
use crate::simulation::route::RouteConfig;
use crate::simulation::vehicles::LatestSnapshot;

pub mod projection;

use projection::MapProjection;

pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MapViewConfig>()
            .add_systems(Startup, setup_projection)
            .add_systems(Update, (render_route, render_cameras, render_vehicle));
    }
}

/// Configuration for the map view.
#[derive(Resource)]
pub struct MapViewConfig {
    /// World units spanned by the route on its longest axis.
    pub route_extent: f64,
    /// Radius of the vehicle and camera markers.
    pub marker_size: f32,
    /// Whether to draw each camera's alert radius.
    pub show_alert_radius: bool,
}

impl Default for MapViewConfig {
    fn default() -> Self {
        Self {
            route_extent: 560.0,
            marker_size: 6.0,
            show_alert_radius: true,
        }
    }
}

// Colors
const ROUTE_COLOR: Color = Color::srgb(1.0, 0.8, 0.0);
const CITY_COLOR: Color = Color::srgb(0.6, 0.7, 0.65);
const CAMERA_COLOR: Color = Color::srgb(0.3, 0.6, 1.0);
const RADIUS_COLOR: Color = Color::srgba(0.3, 0.6, 1.0, 0.4);
const VEHICLE_COLOR: Color = Color::srgb(0.4, 0.95, 0.6);
const VEHICLE_ALERT_COLOR: Color = Color::srgb(1.0, 0.25, 0.2);

fn setup_projection(
    mut commands: Commands,
    route_config: Res<RouteConfig>,
    config: Res<MapViewConfig>,
) {
    let route = route_config.route;
    commands.insert_resource(MapProjection::fit(
        route.start,
        route.end,
        config.route_extent,
    ));
}

/// Render the route as a gizmo line with city markers at both ends.
fn render_route(
    engine: Res<SimulationEngine>,
    projection: Option<Res<MapProjection>>,
    config: Res<MapViewConfig>,
    mut gizmos: Gizmos,
) {
    let Some(projection) = projection else {
        return;
    };

    let route = engine.route();
    let start = projection.project(route.start);
    let end = projection.project(route.end);
    gizmos.line_2d(start, end, ROUTE_COLOR);

    let size = config.marker_size * 1.5;
    for city in [start, end] {
        gizmos.rect_2d(
            Isometry2d::from_translation(city),
            Vec2::splat(size * 2.0),
            CITY_COLOR,
        );
    }
}

/// Render cameras as cross markers with their alert radius.
fn render_cameras(
    engine: Res<SimulationEngine>,
    projection: Option<Res<MapProjection>>,
    latest: Res<LatestSnapshot>,
    config: Res<MapViewConfig>,
    mut gizmos: Gizmos,
) {
    let Some(projection) = projection else {
        return;
    };

    let nearest = latest.0.and_then(|s| s.nearest_camera);
    let radius = projection.km_to_units(engine.alert_threshold_km());
    let size = config.marker_size;

    for (index, camera) in engine.waypoints().iter().enumerate() {
        let pos = projection.project(*camera);
        let color = if Some(index) == nearest {
            Color::WHITE
        } else {
            CAMERA_COLOR
        };

        // Draw cross marker
        gizmos.line_2d(pos + Vec2::X * size, pos - Vec2::X * size, color);
        gizmos.line_2d(pos + Vec2::Y * size, pos - Vec2::Y * size, color);

        if config.show_alert_radius {
            gizmos.circle_2d(Isometry2d::from_translation(pos), radius, RADIUS_COLOR);
        }
    }
}

/// Render the vehicle marker, red while a camera alert is active.
fn render_vehicle(
    engine: Res<SimulationEngine>,
    projection: Option<Res<MapProjection>>,
    latest: Res<LatestSnapshot>,
    config: Res<MapViewConfig>,
    mut gizmos: Gizmos,
) {
    let Some(projection) = projection else {
        return;
    };

    let (position, alerting) = match latest.0 {
        Some(snapshot) => (snapshot.position, snapshot.alert.is_active()),
        None => (engine.position(), false),
    };

    let color = if alerting {
        VEHICLE_ALERT_COLOR
    } else {
        VEHICLE_COLOR
    };
    let pos = projection.project(position);
    gizmos.circle_2d(Isometry2d::from_translation(pos), config.marker_size, color);
    gizmos.circle_2d(
        Isometry2d::from_translation(pos),
        config.marker_size * 0.4,
        color,
    );
}
