//! Steering forces for the heart particles
//!
//! Defines the [`Steering`] trait and its two contributors:
//! - [`Attraction`]: seek toward the particle's target with linear braking
//! - [`Repulsion`]: flee from a point, only inside a hard cutoff radius
//!
//! Both follow the same shape: compute a desired velocity, subtract the
//! current velocity, clamp the difference to a maximum force.

use crate::simulation::params::Settings;
use crate::simulation::states::{NVec2, Particle};
use crate::simulation::vector::Magnitude;

/// Collection of steering terms.
/// Contributions of all terms are summed into one force per particle
pub struct SteeringSet {
    terms: Vec<Box<dyn Steering + Send + Sync>>,
}

impl SteeringSet {
    /// Create an empty steering set
    pub fn new() -> Self {
        Self {
            terms: Vec::new(),
        }
    }

    /// Add a steering term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Steering + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Sum of every term's force on `particle`. Zero for an empty set,
    /// the sum is not normalized
    pub fn net_force(&self, particle: &Particle) -> NVec2 {
        self.terms
            .iter()
            .fold(NVec2::zeros(), |acc, term| acc + term.steer(particle))
    }
}

impl Default for SteeringSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Source of a steering force on a single particle
pub trait Steering {
    fn steer(&self, particle: &Particle) -> NVec2;
}

/// Seek toward a target, slowing down linearly inside `braking_distance`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attraction {
    pub braking_distance: f64,
    pub max_speed: f64,
    pub max_force: f64,
}

impl Attraction {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            braking_distance: settings.braking_distance,
            max_speed: settings.max_speed,
            max_force: settings.max_attraction_force,
        }
    }

    /// Speed the particle would like to have at `distance` from its goal.
    /// Ramps 0 -> `max_speed` over `[0, braking_distance]`, flat beyond
    pub fn desired_speed(&self, distance: f64) -> f64 {
        if distance < self.braking_distance {
            distance / self.braking_distance * self.max_speed
        } else {
            self.max_speed
        }
    }

    /// Force pulling `particle` toward `target`
    pub fn toward(&self, particle: &Particle, target: NVec2) -> NVec2 {
        let to_target = target - particle.position;
        let speed = self.desired_speed(to_target.norm());
        let desired = to_target.with_magnitude(speed);

        (desired - particle.velocity).limited(self.max_force)
    }
}

impl Steering for Attraction {
    fn steer(&self, particle: &Particle) -> NVec2 {
        self.toward(particle, particle.target)
    }
}

/// Flee from `point` at full speed while closer than `radius`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Repulsion {
    pub point: NVec2,
    pub radius: f64,
    pub max_speed: f64,
    pub max_force: f64,
}

impl Repulsion {
    pub fn from_settings(point: NVec2, settings: &Settings) -> Self {
        Self {
            point,
            radius: settings.repulsion_distance,
            max_speed: settings.max_speed,
            max_force: settings.max_repulsion_force,
        }
    }
}

impl Steering for Repulsion {
    fn steer(&self, particle: &Particle) -> NVec2 {
        let to_repulsor = self.point - particle.position;
        if to_repulsor.norm() >= self.radius {
            return NVec2::zeros();
        }

        // full speed, pointing away from the repulsor
        let desired = -to_repulsor.with_magnitude(self.max_speed);

        (desired - particle.velocity).limited(self.max_force)
    }
}

/// One [`Repulsion`] term per repulsor point
pub fn repulsion_set(repulsors: &[NVec2], settings: &Settings) -> SteeringSet {
    repulsors
        .iter()
        .fold(SteeringSet::new(), |set, &point| {
            set.with(Repulsion::from_settings(point, settings))
        })
}
