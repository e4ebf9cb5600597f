//! The heartbeat scene
//!
//! `Scene` owns everything the animation mutates: the particle swarm, the
//! repulsor points, the screen size and the heartbeat clock. Hosts pass it
//! explicitly to their frame, resize and timer callbacks.

use std::time::Duration;

use bevy::prelude::Resource;
use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::simulation::forces::{repulsion_set, Attraction, SteeringSet};
use crate::simulation::heart::heart_points;
use crate::simulation::heartbeat::HeartbeatClock;
use crate::simulation::integrator::steering_integrator;
use crate::simulation::params::Settings;
use crate::simulation::states::{NVec2, Particle};
use crate::visualization::canvas::{CanvasTransform, RenderSink};

/// Viewport size with its derived center, always replaced as a whole
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenSize {
    pub width: f64,
    pub height: f64,
    pub center: NVec2,
}

impl ScreenSize {
    /// Non-finite or negative dimensions are treated as zero
    pub fn new(width: f64, height: f64) -> Self {
        let width = sanitize_dimension("width", width);
        let height = sanitize_dimension("height", height);
        Self {
            width,
            height,
            center: NVec2::new(width / 2.0, height / 2.0),
        }
    }
}

fn sanitize_dimension(name: &str, value: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        warn!("viewport {name} {value} is not usable, treating it as 0");
        0.0
    }
}

/// Bevy resource holding the complete animation state
#[derive(Resource)]
pub struct Scene {
    settings: Settings,
    screen: ScreenSize,
    particles: Vec<Particle>,
    repulsors: Vec<NVec2>,
    attraction: SteeringSet,
    repulsion: SteeringSet,
    heartbeat: HeartbeatClock,
}

impl Scene {
    /// Build the scene for a `width` x `height` viewport.
    /// Start positions come from `settings.seed`, or from entropy if unset
    pub fn new(settings: Settings, width: f64, height: f64) -> Self {
        let mut rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(settings, width, height, &mut rng)
    }

    pub fn with_rng<R: Rng>(settings: Settings, width: f64, height: f64, rng: &mut R) -> Self {
        let screen = ScreenSize::new(width, height);
        let particles = generate_particles(&settings, &screen, rng);
        let repulsors = settings.repulsors.clone();

        let attraction = SteeringSet::new().with(Attraction::from_settings(&settings));
        let repulsion = repulsion_set(&repulsors, &settings);
        let heartbeat = HeartbeatClock::from_settings(&settings);

        info!(
            "scene: {} particles, {} repulsors, {}x{} viewport",
            particles.len(),
            repulsors.len(),
            screen.width,
            screen.height
        );

        Self {
            settings,
            screen,
            particles,
            repulsors,
            attraction,
            repulsion,
            heartbeat,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn screen(&self) -> ScreenSize {
        self.screen
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable access to the swarm; its size is fixed after setup
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn repulsors(&self) -> &[NVec2] {
        &self.repulsors
    }

    pub fn heartbeat(&self) -> &HeartbeatClock {
        &self.heartbeat
    }

    pub fn repulsion_active(&self) -> bool {
        self.heartbeat.repulsion_active()
    }

    /// Let `elapsed` pass on the heartbeat clock.
    /// Returns whether the repulsion flag flipped
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        self.heartbeat.advance(elapsed)
    }

    /// One simulation step for the whole swarm
    pub fn update(&mut self) {
        let repulsion_active = self.heartbeat.repulsion_active();
        steering_integrator(
            &mut self.particles,
            &self.attraction,
            &self.repulsion,
            repulsion_active,
            self.settings.max_speed,
        );
    }

    /// Render the current frame into `sink`, then step the simulation
    pub fn draw<S: RenderSink + ?Sized>(&mut self, sink: &mut S) {
        sink.clear(self.settings.background_color);

        let transform = CanvasTransform::centered_at(self.screen.center);

        if self.settings.show_repulsors {
            sink.stroke(self.settings.repulsion_distance, self.settings.repulsor_color);
            for &repulsor in &self.repulsors {
                sink.point(transform.to_canvas(repulsor));
            }
        }

        sink.stroke(self.settings.particle_size, self.settings.particle_color);
        for particle in &self.particles {
            particle.draw(sink, &transform);
        }

        self.update();
    }

    /// Track a new viewport size. Particles and repulsors stay where they are
    pub fn handle_resize(&mut self, width: f64, height: f64) {
        self.screen = ScreenSize::new(width, height);
        info!("resized to {}x{}", self.screen.width, self.screen.height);
    }
}

/// One particle per outline sample, starting anywhere on screen
fn generate_particles<R: Rng>(settings: &Settings, screen: &ScreenSize, rng: &mut R) -> Vec<Particle> {
    heart_points(settings.heart_angle_step, settings.heart_ratio)
        .map(|target| {
            let start = NVec2::new(
                rng.gen::<f64>() * screen.width - screen.width / 2.0,
                rng.gen::<f64>() * screen.height - screen.height / 2.0,
            );
            Particle::new(start, target)
        })
        .collect()
}
