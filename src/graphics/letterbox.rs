//! Fit the stage inside the window while keeping its aspect ratio.

use glam::Vec2;

/// Where the stage is presented inside the window.
///
/// The backing resolution of the stage never changes, only how big it's shown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Letterbox {
    /// Horizontal offset of the presented stage inside the window.
    pub x: f32,
    /// Vertical offset of the presented stage inside the window.
    pub y: f32,
    /// Presented width.
    pub width: f32,
    /// Presented height.
    pub height: f32,
    /// Stage size the letterbox was fitted for.
    stage: Vec2,
}

impl Letterbox {
    /// Fit the stage in the window.
    ///
    /// When the window is relatively taller than the stage the width is filled, otherwise the height is filled.
    /// The result is centered in the window.
    ///
    /// # Arguments
    ///
    /// * `stage_width` - Backing horizontal resolution.
    /// * `stage_height` - Backing vertical resolution.
    /// * `window_width` - Horizontal size of the window.
    /// * `window_height` - Vertical size of the window.
    #[must_use]
    pub fn fit(stage_width: f32, stage_height: f32, window_width: f32, window_height: f32) -> Self {
        let stage = Vec2::new(stage_width, stage_height);

        // Minimized windows or empty stages have nothing to present
        if stage_width <= 0.0 || stage_height <= 0.0 || window_width <= 0.0 || window_height <= 0.0
        {
            return Self {
                x: 0.0,
                y: 0.0,
                width: 0.0,
                height: 0.0,
                stage,
            };
        }

        let stage_height_ratio = stage_height / stage_width;
        let window_height_ratio = window_height / window_width;

        let (width, height) = if window_height_ratio > stage_height_ratio {
            // Window is taller, fill horizontally
            (window_width, window_width * stage_height_ratio)
        } else {
            // Window is wider, fill vertically
            (window_height * (stage_width / stage_height), window_height)
        };

        Self {
            x: (window_width - width) / 2.0,
            y: (window_height - height) / 2.0,
            width,
            height,
            stage,
        }
    }

    /// How many window pixels a single stage pixel covers.
    #[inline]
    #[must_use]
    pub fn scale(&self) -> f32 {
        if self.stage.x <= 0.0 {
            0.0
        } else {
            self.width / self.stage.x
        }
    }

    /// Whether there's anything to present.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Map a window coordinate to a stage coordinate.
    ///
    /// Returns `None` when the coordinate falls on the bars outside of the stage.
    #[must_use]
    pub fn window_to_stage(&self, position: Vec2) -> Option<Vec2> {
        if self.is_empty() {
            return None;
        }

        let local = (position - Vec2::new(self.x, self.y)) / self.scale();

        (local.x >= 0.0 && local.y >= 0.0 && local.x < self.stage.x && local.y < self.stage.y)
            .then_some(local)
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::Letterbox;

    #[test]
    fn tall_window_fills_width() {
        let letterbox = Letterbox::fit(640.0, 960.0, 640.0, 1920.0);

        assert!((letterbox.width - 640.0).abs() < 1e-3);
        assert!((letterbox.height - 960.0).abs() < 1e-3);
        assert!(letterbox.x.abs() < 1e-3);
        assert!((letterbox.y - 480.0).abs() < 1e-3);
    }

    #[test]
    fn wide_window_fills_height() {
        let letterbox = Letterbox::fit(640.0, 960.0, 1920.0, 480.0);

        assert!((letterbox.width - 320.0).abs() < 1e-3);
        assert!((letterbox.height - 480.0).abs() < 1e-3);
        assert!((letterbox.x - 800.0).abs() < 1e-3);
        assert!((letterbox.scale() - 0.5).abs() < 1e-3);
    }

    #[test]
    fn aspect_ratio_is_preserved() {
        for (window_width, window_height) in [(100.0, 100.0), (1280.0, 720.0), (333.0, 999.0)] {
            let letterbox = Letterbox::fit(640.0, 960.0, window_width, window_height);

            assert!((letterbox.height / letterbox.width - 1.5).abs() < 1e-4);
            assert!(letterbox.width <= window_width + 1e-3);
            assert!(letterbox.height <= window_height + 1e-3);
        }
    }

    #[test]
    fn maps_window_to_stage() {
        let letterbox = Letterbox::fit(640.0, 960.0, 1920.0, 480.0);

        assert_eq!(
            letterbox.window_to_stage(Vec2::new(800.0, 0.0)),
            Some(Vec2::ZERO)
        );
        assert_eq!(
            letterbox.window_to_stage(Vec2::new(960.0, 240.0)),
            Some(Vec2::new(320.0, 480.0))
        );
        // On the bars
        assert_eq!(letterbox.window_to_stage(Vec2::new(10.0, 240.0)), None);
    }

    #[test]
    fn minimized_window() {
        let letterbox = Letterbox::fit(640.0, 960.0, 0.0, 0.0);

        assert!(letterbox.is_empty());
        assert_eq!(letterbox.window_to_stage(Vec2::ZERO), None);
    }
}
