//! Core state types for the heartbeat animation.
//!
//! Defines the vector alias used throughout the crate and the `Particle`
//! entity. A particle owns its position, the fixed point on the heart
//! outline it steers toward, and its velocity.

use nalgebra::Vector2;

use crate::visualization::canvas::{CanvasTransform, RenderSink};

pub type NVec2 = Vector2<f64>;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: NVec2, // current location, origin at scene center
    pub target: NVec2, // point on the heart outline, fixed after creation
    pub velocity: NVec2, // accumulated forces, clamped by the scene
}

impl Particle {
    /// Create a particle at rest at `position`, heading for `target`
    pub fn new(position: NVec2, target: NVec2) -> Self {
        Self {
            position,
            target,
            velocity: NVec2::zeros(),
        }
    }

    /// Add `force` to the velocity. No clamping happens here
    pub fn apply_force(&mut self, force: NVec2) {
        self.velocity += force;
    }

    /// Advance the position by the current velocity.
    /// Call once per tick, after every force of that tick has been applied
    pub fn integrate(&mut self) {
        self.position += self.velocity;
    }

    /// Emit the current position, mapped to canvas coordinates by `transform`
    pub fn draw<S: RenderSink + ?Sized>(&self, sink: &mut S, transform: &CanvasTransform) {
        sink.point(transform.to_canvas(self.position));
    }
}
