//! Highway Watch - AI traffic camera proximity simulator.
//!
//! A vehicle drives the Bangalore-Mysore highway on a fixed tick. Each tick
//! moves it along the route, samples a speed, and checks the distance to the
//! AI cameras placed along the way. The engine lives in [`simulation`]; the
//! remaining modules are Bevy presentation layers that consume its snapshots.

pub mod audio;
pub mod camera;
pub mod geo;
pub mod render;
pub mod simulation;
pub mod ui;
