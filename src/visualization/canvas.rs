//! Render sink abstraction
//!
//! The scene draws through three primitives (clear, stroke, point) in canvas
//! coordinates: origin at the top-left corner, `y` growing downward. The
//! scene-to-canvas mapping is an explicit [`CanvasTransform`] value rather
//! than state kept by the sink.

use nalgebra::{Point2, Translation2};

use crate::simulation::states::NVec2;

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque gray level
    pub const fn gray(level: u8) -> Self {
        Self::new(level, level, level, 255)
    }
}

impl From<[u8; 4]> for Rgba {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}

/// Scene -> canvas mapping. The scene keeps its origin at the screen center
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasTransform {
    translation: Translation2<f64>,
}

impl CanvasTransform {
    /// Place the scene origin at `center` (canvas coordinates)
    pub fn centered_at(center: NVec2) -> Self {
        Self {
            translation: Translation2::from(center),
        }
    }

    pub fn to_canvas(&self, scene_point: NVec2) -> NVec2 {
        self.translation
            .transform_point(&Point2::from(scene_point))
            .coords
    }
}

/// Receiver of drawing primitives. The scene never reads back from it
pub trait RenderSink {
    /// Fill the whole canvas with `color`
    fn clear(&mut self, color: Rgba);

    /// Style used by the following points
    fn stroke(&mut self, weight: f64, color: Rgba);

    /// Dot of the current stroke weight at `at` (canvas coordinates)
    fn point(&mut self, at: NVec2);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Clear(Rgba),
    Stroke { weight: f64, color: Rgba },
    Point(NVec2),
}

/// Sink that records every primitive for later replay
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandBuffer {
    commands: Vec<DrawCommand>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Forget the previous frame, keeping the allocation
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    /// Recorded points, in drawing order
    pub fn points(&self) -> impl Iterator<Item = NVec2> + '_ {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Point(at) => Some(*at),
            _ => None,
        })
    }
}

impl RenderSink for CommandBuffer {
    fn clear(&mut self, color: Rgba) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn stroke(&mut self, weight: f64, color: Rgba) {
        self.commands.push(DrawCommand::Stroke { weight, color });
    }

    fn point(&mut self, at: NVec2) {
        self.commands.push(DrawCommand::Point(at));
    }
}
