//! Orthographic 2D map camera with zoom and pan controls.

use bevy::{
    input::mouse::{MouseMotion, MouseWheel},
    prelude::*,
};

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MapCameraConfig>()
            .add_systems(Startup, setup_camera)
            .add_systems(Update, (camera_zoom, camera_pan, camera_recenter));
    }
}

/// Configuration for camera controls.
#[derive(Resource)]
pub struct MapCameraConfig {
    /// Keyboard pan speed in world units per second at zoom 1.0.
    pub pan_speed: f32,
    /// Zoom change per scroll line.
    pub zoom_step: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
}

impl Default for MapCameraConfig {
    fn default() -> Self {
        Self {
            pan_speed: 300.0,
            zoom_step: 0.1,
            min_zoom: 0.1,
            max_zoom: 4.0,
        }
    }
}

/// Marker component for the map camera.
#[derive(Component)]
pub struct MapCamera {
    pub zoom: f32,
}

impl Default for MapCamera {
    fn default() -> Self {
        Self { zoom: 1.0 }
    }
}

fn setup_camera(mut commands: Commands) {
    commands.spawn((Camera2d, MapCamera::default()));
}

fn camera_zoom(
    mut query: Query<(&mut OrthographicProjection, &mut MapCamera)>,
    mut scroll_events: EventReader<MouseWheel>,
    config: Res<MapCameraConfig>,
) {
    let scroll: f32 = scroll_events.read().map(|e| e.y).sum();
    if scroll == 0.0 {
        return;
    }

    for (mut projection, mut map_cam) in &mut query {
        map_cam.zoom =
            (map_cam.zoom - scroll * config.zoom_step).clamp(config.min_zoom, config.max_zoom);
        projection.scale = map_cam.zoom;
    }
}

fn camera_pan(
    mut query: Query<(&mut Transform, &MapCamera)>,
    keys: Res<ButtonInput<KeyCode>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    config: Res<MapCameraConfig>,
    time: Res<Time>,
) {
    let mut direction = Vec2::ZERO;

    // Keyboard panning
    if keys.pressed(KeyCode::KeyW) || keys.pressed(KeyCode::ArrowUp) {
        direction.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyS) || keys.pressed(KeyCode::ArrowDown) {
        direction.y -= 1.0;
    }
    if keys.pressed(KeyCode::KeyA) || keys.pressed(KeyCode::ArrowLeft) {
        direction.x -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) || keys.pressed(KeyCode::ArrowRight) {
        direction.x += 1.0;
    }

    if direction != Vec2::ZERO {
        for (mut transform, map_cam) in &mut query {
            let delta =
                direction.normalize() * config.pan_speed * map_cam.zoom * time.delta_secs();
            transform.translation += delta.extend(0.0);
        }
    }

    // Mouse panning (middle button or right button drag)
    if mouse_buttons.pressed(MouseButton::Middle) || mouse_buttons.pressed(MouseButton::Right) {
        let mouse_delta: Vec2 = mouse_motion.read().map(|e| e.delta).sum();

        if mouse_delta != Vec2::ZERO {
            for (mut transform, map_cam) in &mut query {
                // Screen Y grows downward, world Y grows upward
                let world_delta = Vec3::new(-mouse_delta.x, mouse_delta.y, 0.0) * map_cam.zoom;
                transform.translation += world_delta;
            }
        }
    } else {
        // Clear any pending mouse motion events when not panning
        mouse_motion.clear();
    }
}

/// Home recenters the map and restores the default zoom.
fn camera_recenter(
    mut query: Query<(&mut Transform, &mut OrthographicProjection, &mut MapCamera)>,
    keys: Res<ButtonInput<KeyCode>>,
) {
    if !keys.just_pressed(KeyCode::Home) {
        return;
    }

    for (mut transform, mut projection, mut map_cam) in &mut query {
        transform.translation = Vec3::new(0.0, 0.0, transform.translation.z);
        map_cam.zoom = 1.0;
        projection.scale = 1.0;
    }
}
