use bevy::log::LogPlugin;
use bevy::prelude::*;

use highway_watch::{audio, camera, render, simulation, ui};

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "AI Camera in Bangalore-Mysore Highway".into(),
                        resolution: (1280., 720.).into(),
                        ..default()
                    }),
                    ..default()
                })
                .set(LogPlugin {
                    filter: "wgpu=error,naga=warn,highway_watch=info".into(),
                    ..default()
                }),
        )
        .insert_resource(ClearColor(Color::srgb(0.05, 0.06, 0.08)))
        // Simulation
        .add_plugins(simulation::SimulationPlugin)
        // Map view
        .add_plugins(camera::CameraPlugin)
        .add_plugins(render::RenderPlugin)
        // HUD
        .add_plugins(ui::UiPlugin)
        // Alert chime
        .add_plugins(audio::AudioPlugin)
        .run();
}
