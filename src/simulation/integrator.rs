//! Per-tick particle integrator
//!
//! One step is: attraction, optional repulsion, speed clamp, position
//! update. The four stages run in that order for one particle before the
//! next particle is touched.

use crate::simulation::forces::SteeringSet;
use crate::simulation::states::Particle;
use crate::simulation::vector::Magnitude;

/// Advance every particle by one tick.
/// `repulsion_active` is read once by the caller, so the whole tick uses
/// one decision
pub fn steering_integrator(
    particles: &mut [Particle],
    attraction: &SteeringSet,
    repulsion: &SteeringSet,
    repulsion_active: bool,
    max_speed: f64,
) {
    for particle in particles.iter_mut() {
        let pull = attraction.net_force(particle);
        particle.apply_force(pull);

        if repulsion_active {
            let push = repulsion.net_force(particle);
            particle.apply_force(push);
        }

        particle.velocity = particle.velocity.limited(max_speed);
        particle.integrate();
    }
}
