//! Vector shapes drawn with simple primitives.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec2;

use super::{Node, NodeBase};
use crate::graphics::{Canvas, Rect};

/// Vertices of a star or, without an inner radius, a regular polygon.
///
/// Vertices go clockwise on screen, the last outer vertex points straight up.
///
/// # Arguments
///
/// * `center` - Middle of the shape.
/// * `points` - Amount of outer vertices, less than 3 results in no vertices.
/// * `outer_radius` - Distance of the outer vertices to the center.
/// * `inner_radius` - Distance of the vertices between the outer vertices, `None` for a regular polygon.
#[must_use]
pub fn star_points(
    center: Vec2,
    points: u32,
    outer_radius: f32,
    inner_radius: Option<f32>,
) -> Vec<Vec2> {
    if points < 3 {
        return Vec::new();
    }

    let step = TAU / points as f32;
    let half_step = step / 2.0;

    let mut vertices = Vec::with_capacity(points as usize * 2);
    for point in 1..=points {
        let angle = (step * point as f32) - FRAC_PI_2;

        if let Some(inner_radius) = inner_radius {
            vertices.push(center + Vec2::from_angle(angle - half_step) * inner_radius);
        }

        vertices.push(center + Vec2::from_angle(angle) * outer_radius);
    }

    vertices
}

/// Single drawing instruction.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ShapeCommand {
    /// Straight line.
    Line {
        /// Start point.
        start: Vec2,
        /// End point.
        end: Vec2,
        /// Width in pixels.
        thickness: f32,
        /// Color in `0xAARRGGBB`.
        color: u32,
    },
    /// Axis-aligned rectangle.
    Rect {
        /// Area.
        rect: Rect,
        /// Outline width growing inwards, `None` for filled.
        outline: Option<f32>,
        /// Color in `0xAARRGGBB`.
        color: u32,
    },
    /// Circle.
    Circle {
        /// Middle.
        center: Vec2,
        /// Distance of the edge to the middle.
        radius: f32,
        /// Outline width growing inwards, `None` for filled.
        outline: Option<f32>,
        /// Color in `0xAARRGGBB`.
        color: u32,
    },
    /// Closed polygon.
    Polygon {
        /// Vertices in order.
        points: Vec<Vec2>,
        /// Outline width, `None` for filled.
        outline: Option<f32>,
        /// Color in `0xAARRGGBB`.
        color: u32,
    },
}

/// Node drawing a list of shapes, in the order they were added.
///
/// All coordinates are relative to the position of the node.
#[derive(Default)]
pub struct Shape {
    /// Shared node state.
    base: NodeBase,
    /// Everything to draw.
    commands: Vec<ShapeCommand>,
}

impl Shape {
    /// Create a shape that draws nothing.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            base: NodeBase::new(),
            commands: Vec::new(),
        }
    }

    /// Straight line.
    pub fn line(&mut self, start: Vec2, end: Vec2, thickness: f32, color: u32) -> &mut Self {
        self.push(ShapeCommand::Line {
            start,
            end,
            thickness,
            color,
        })
    }

    /// Filled rectangle.
    pub fn rect_fill(&mut self, rect: Rect, color: u32) -> &mut Self {
        self.push(ShapeCommand::Rect {
            rect,
            outline: None,
            color,
        })
    }

    /// Rectangle outline.
    pub fn rect(&mut self, rect: Rect, thickness: f32, color: u32) -> &mut Self {
        self.push(ShapeCommand::Rect {
            rect,
            outline: Some(thickness),
            color,
        })
    }

    /// Filled circle.
    pub fn circle_fill(&mut self, center: Vec2, radius: f32, color: u32) -> &mut Self {
        self.push(ShapeCommand::Circle {
            center,
            radius,
            outline: None,
            color,
        })
    }

    /// Circle outline.
    pub fn circle(&mut self, center: Vec2, radius: f32, thickness: f32, color: u32) -> &mut Self {
        self.push(ShapeCommand::Circle {
            center,
            radius,
            outline: Some(thickness),
            color,
        })
    }

    /// Filled star, see [`star_points`].
    pub fn star_fill(
        &mut self,
        center: Vec2,
        points: u32,
        outer_radius: f32,
        inner_radius: f32,
        color: u32,
    ) -> &mut Self {
        self.polygon(
            star_points(center, points, outer_radius, Some(inner_radius)),
            None,
            color,
        )
    }

    /// Star outline, see [`star_points`].
    pub fn star(
        &mut self,
        center: Vec2,
        points: u32,
        outer_radius: f32,
        inner_radius: f32,
        thickness: f32,
        color: u32,
    ) -> &mut Self {
        self.polygon(
            star_points(center, points, outer_radius, Some(inner_radius)),
            Some(thickness),
            color,
        )
    }

    /// Filled regular polygon, see [`star_points`].
    pub fn regular_polygon_fill(
        &mut self,
        center: Vec2,
        points: u32,
        radius: f32,
        color: u32,
    ) -> &mut Self {
        self.polygon(star_points(center, points, radius, None), None, color)
    }

    /// Regular polygon outline, see [`star_points`].
    pub fn regular_polygon(
        &mut self,
        center: Vec2,
        points: u32,
        radius: f32,
        thickness: f32,
        color: u32,
    ) -> &mut Self {
        self.polygon(
            star_points(center, points, radius, None),
            Some(thickness),
            color,
        )
    }

    /// Remove everything.
    #[inline]
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// All drawing instructions.
    #[inline]
    #[must_use]
    pub fn commands(&self) -> &[ShapeCommand] {
        &self.commands
    }

    /// Add a polygon, ignoring polygons without enough vertices.
    fn polygon(&mut self, points: Vec<Vec2>, outline: Option<f32>, color: u32) -> &mut Self {
        if points.len() < 3 {
            return self;
        }

        self.push(ShapeCommand::Polygon {
            points,
            outline,
            color,
        })
    }

    /// Add a drawing instruction.
    fn push(&mut self, command: ShapeCommand) -> &mut Self {
        self.commands.push(command);

        self
    }
}

impl Node for Shape {
    #[inline]
    fn base(&self) -> &NodeBase {
        &self.base
    }

    #[inline]
    fn base_mut(&mut self) -> &mut NodeBase {
        &mut self.base
    }

    #[profiling::function]
    fn draw(&self, origin: Vec2, alpha: f32, canvas: &mut Canvas) {
        for command in &self.commands {
            match command {
                ShapeCommand::Line {
                    start,
                    end,
                    thickness,
                    color,
                } => canvas.draw_line(origin + *start, origin + *end, *thickness, *color, alpha),
                ShapeCommand::Rect {
                    rect,
                    outline: None,
                    color,
                } => canvas.fill_rect(rect.translated(origin), *color, alpha),
                ShapeCommand::Rect {
                    rect,
                    outline: Some(thickness),
                    color,
                } => canvas.draw_rect_outline(rect.translated(origin), *thickness, *color, alpha),
                ShapeCommand::Circle {
                    center,
                    radius,
                    outline: None,
                    color,
                } => canvas.fill_circle(origin + *center, *radius, *color, alpha),
                ShapeCommand::Circle {
                    center,
                    radius,
                    outline: Some(thickness),
                    color,
                } => canvas.draw_circle_outline(origin + *center, *radius, *thickness, *color, alpha),
                ShapeCommand::Polygon {
                    points,
                    outline,
                    color,
                } => {
                    let points = points
                        .iter()
                        .map(|point| origin + *point)
                        .collect::<Vec<_>>();

                    match outline {
                        Some(thickness) => {
                            canvas.draw_polygon_outline(&points, *thickness, *color, alpha);
                        }
                        None => canvas.fill_polygon(&points, *color, alpha),
                    }
                }
            }
        }
    }

    fn bounds(&self) -> Option<Rect> {
        // Union of all shapes
        let (min, max) = self.commands.iter().fold(
            (Vec2::splat(f32::MAX), Vec2::splat(f32::MIN)),
            |(min, max), command| {
                let (command_min, command_max) = match command {
                    ShapeCommand::Line { start, end, .. } => (start.min(*end), start.max(*end)),
                    ShapeCommand::Rect { rect, .. } => (rect.min(), rect.max()),
                    ShapeCommand::Circle { center, radius, .. } => {
                        (*center - *radius, *center + *radius)
                    }
                    ShapeCommand::Polygon { points, .. } => points.iter().fold(
                        (Vec2::splat(f32::MAX), Vec2::splat(f32::MIN)),
                        |(min, max), point| (min.min(*point), max.max(*point)),
                    ),
                };

                (min.min(command_min), max.max(command_max))
            },
        );

        (min.x <= max.x && min.y <= max.y)
            .then(|| Rect::new(min.x, min.y, max.x - min.x, max.y - min.y))
    }
}
