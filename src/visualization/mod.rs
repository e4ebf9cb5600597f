pub mod canvas;
pub mod heart_vis2d;
