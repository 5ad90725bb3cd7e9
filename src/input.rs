//! Turn mouse and touch input into pointer events on the stage.

use glam::Vec2;

use crate::graphics::Letterbox;

/// What happened to the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum PointerPhase {
    /// Mouse button or finger went down.
    Down,
    /// Pointer moved, also while not pressed.
    Move,
    /// Mouse button or finger went up.
    Up,
}

/// Single pointer event in stage coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// What happened.
    pub phase: PointerPhase,
    /// Where it happened on the stage.
    pub position: Vec2,
}

impl PointerEvent {
    /// Construct a new event.
    #[inline]
    #[must_use]
    pub const fn new(phase: PointerPhase, position: Vec2) -> Self {
        Self { phase, position }
    }
}

/// Phase of a single finger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum TouchPhase {
    /// Finger touched the screen.
    Started,
    /// Finger moved.
    Moved,
    /// Finger was lifted or the touch was cancelled.
    Ended,
}

/// State of the single pointer, a mouse or the first finger.
#[derive(Debug, Default)]
pub(crate) struct Pointer {
    /// Last position on the stage.
    ///
    /// `None` if never on the stage.
    position: Option<Vec2>,
    /// Whether the mouse button or finger is being held down.
    is_down: bool,
    /// Finger that's being tracked, other fingers are ignored.
    touch: Option<u64>,
}

impl Pointer {
    /// Handle the cursor moving in the window.
    ///
    /// Moving over the bars outside of the stage emits nothing.
    pub(crate) fn moved(
        &mut self,
        window_position: Vec2,
        letterbox: &Letterbox,
    ) -> Option<PointerEvent> {
        let position = letterbox.window_to_stage(window_position)?;
        self.position = Some(position);

        Some(PointerEvent::new(PointerPhase::Move, position))
    }

    /// Handle the primary mouse button.
    pub(crate) fn button(&mut self, pressed: bool) -> Option<PointerEvent> {
        match (pressed, self.is_down) {
            (true, false) => {
                // Can't press outside of the stage
                let position = self.position?;
                self.is_down = true;

                Some(PointerEvent::new(PointerPhase::Down, position))
            }
            (false, true) => {
                self.is_down = false;

                self.position
                    .map(|position| PointerEvent::new(PointerPhase::Up, position))
            }
            _ => None,
        }
    }

    /// Handle a finger.
    ///
    /// Only the first finger on the screen is tracked.
    pub(crate) fn touch(
        &mut self,
        id: u64,
        phase: TouchPhase,
        window_position: Vec2,
        letterbox: &Letterbox,
    ) -> Option<PointerEvent> {
        match phase {
            TouchPhase::Started if self.touch.is_none() => {
                self.position = Some(letterbox.window_to_stage(window_position)?);
                self.touch = Some(id);

                self.button(true)
            }
            TouchPhase::Moved if self.touch == Some(id) => self.moved(window_position, letterbox),
            TouchPhase::Ended if self.touch == Some(id) => {
                self.touch = None;

                self.button(false)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::{Pointer, PointerEvent, PointerPhase, TouchPhase};
    use crate::graphics::Letterbox;

    /// Stage of 100x100 shown twice as big with 50 pixel bars on the left and right.
    fn letterbox() -> Letterbox {
        Letterbox::fit(100.0, 100.0, 300.0, 200.0)
    }

    #[test]
    fn mouse_drag() {
        let mut pointer = Pointer::default();

        // Can't press before the cursor is known
        assert_eq!(pointer.button(true), None);

        assert_eq!(
            pointer.moved(Vec2::new(50.0, 0.0), &letterbox()),
            Some(PointerEvent::new(PointerPhase::Move, Vec2::ZERO))
        );
        assert_eq!(
            pointer.button(true),
            Some(PointerEvent::new(PointerPhase::Down, Vec2::ZERO))
        );
        // Already down
        assert_eq!(pointer.button(true), None);

        pointer.moved(Vec2::new(70.0, 20.0), &letterbox());
        assert_eq!(
            pointer.button(false),
            Some(PointerEvent::new(PointerPhase::Up, Vec2::new(10.0, 10.0)))
        );
    }

    #[test]
    fn bars_are_ignored() {
        let mut pointer = Pointer::default();

        assert_eq!(pointer.moved(Vec2::new(10.0, 10.0), &letterbox()), None);
        assert_eq!(pointer.button(true), None);
    }

    #[test]
    fn release_outside_of_stage_ends_drag() {
        let mut pointer = Pointer::default();
        pointer.moved(Vec2::new(100.0, 100.0), &letterbox());
        pointer.button(true);

        // Leaving the stage keeps the last position
        assert_eq!(pointer.moved(Vec2::new(0.0, 100.0), &letterbox()), None);
        assert_eq!(
            pointer.button(false),
            Some(PointerEvent::new(PointerPhase::Up, Vec2::new(25.0, 50.0)))
        );
    }

    #[test]
    fn only_first_finger() {
        let mut pointer = Pointer::default();
        let letterbox = letterbox();

        assert_eq!(
            pointer
                .touch(1, TouchPhase::Started, Vec2::new(150.0, 100.0), &letterbox)
                .map(|event| event.phase),
            Some(PointerPhase::Down)
        );
        assert_eq!(
            pointer.touch(2, TouchPhase::Started, Vec2::new(60.0, 10.0), &letterbox),
            None
        );
        assert_eq!(
            pointer.touch(2, TouchPhase::Moved, Vec2::new(60.0, 10.0), &letterbox),
            None
        );
        assert_eq!(
            pointer.touch(1, TouchPhase::Moved, Vec2::new(160.0, 100.0), &letterbox),
            Some(PointerEvent::new(PointerPhase::Move, Vec2::new(55.0, 50.0)))
        );
        assert_eq!(
            pointer
                .touch(1, TouchPhase::Ended, Vec2::new(160.0, 100.0), &letterbox)
                .map(|event| event.phase),
            Some(PointerPhase::Up)
        );
    }
}
