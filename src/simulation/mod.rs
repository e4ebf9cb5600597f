pub mod states;
pub mod vector;
pub mod params;
pub mod heart;
pub mod forces;
pub mod integrator;
pub mod heartbeat;
pub mod scene;
