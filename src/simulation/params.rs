//! Runtime parameters for the animation
//!
//! `Settings` holds the fixed parameter set:
//! - heart outline sampling (`heart_angle_step`, `heart_ratio`),
//! - heartbeat schedule (start delay, phase durations),
//! - steering limits (braking distance, repulsion radius, force and speed caps),
//! - drawing colors and sizes, and the initial repulsor list

use std::time::Duration;

use crate::simulation::states::NVec2;
use crate::visualization::canvas::Rgba;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub heart_angle_step: f64, // radians between two outline samples
    pub heart_ratio: f64, // outline scale factor
    pub heartbeat_start_delay: Duration, // time before the first flip
    pub attraction_duration: Duration, // length of an attracting phase
    pub repulsion_duration: Duration, // length of a repelling phase
    pub braking_distance: f64, // radius where desired speed ramps down
    pub repulsion_distance: f64, // hard cutoff radius of a repulsor
    pub max_attraction_force: f64,
    pub max_repulsion_force: f64,
    pub max_speed: f64,
    pub background_color: Rgba,
    pub particle_color: Rgba,
    pub particle_size: f64, // stroke weight of a particle point
    pub repulsors: Vec<NVec2>, // relative to scene center
    pub show_repulsors: bool, // draw the repulsion radius overlay
    pub repulsor_color: Rgba,
    pub seed: Option<u64>, // fixed seed for start positions
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            heart_angle_step: 0.075,
            heart_ratio: 13.0,
            heartbeat_start_delay: Duration::from_millis(1300),
            attraction_duration: Duration::from_millis(250),
            repulsion_duration: Duration::from_millis(700),
            braking_distance: 100.0,
            repulsion_distance: 500.0,
            max_attraction_force: 10.0,
            max_repulsion_force: 9.0,
            max_speed: 40.0,
            background_color: Rgba::gray(30),
            particle_color: Rgba::new(0xe7, 0x4c, 0x3c, 255),
            particle_size: 17.0,
            repulsors: vec![NVec2::zeros()],
            show_repulsors: false,
            repulsor_color: Rgba::new(255, 255, 255, 50),
            seed: None,
        }
    }
}
