pub mod simulation;
pub mod configuration;
pub mod visualization;

pub use simulation::states::{NVec2, Particle};
pub use simulation::vector::Magnitude;
pub use simulation::params::Settings;
pub use simulation::heart::{heart_point, heart_points, HeartPoints};
pub use simulation::forces::{repulsion_set, Attraction, Repulsion, Steering, SteeringSet};
pub use simulation::integrator::steering_integrator;
pub use simulation::heartbeat::{HeartbeatClock, Phase};
pub use simulation::scene::{Scene, ScreenSize};

pub use configuration::config::{ConfigError, SettingsConfig};

pub use visualization::canvas::{CanvasTransform, CommandBuffer, DrawCommand, RenderSink, Rgba};
pub use visualization::heart_vis2d::run_2d;
