//! Input events delivered to the label.
//!
//! Hosts either call the label's `handle_*` methods directly or wrap input
//! in a [`LabelEvent`] and dispatch it through `ActiveLabel::event`, which
//! marks the event accepted when the label consumed it.

use active_label_render::Point;

/// Phase of a touch sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    /// A finger went down.
    Started,
    /// The finger moved while down.
    Moved,
    /// The finger was lifted.
    Ended,
    /// The system took the touch away, e.g. for a scroll gesture.
    Cancelled,
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MouseButton {
    /// Primary button (usually left).
    Left = 0,
    /// Secondary button (usually right).
    Right = 1,
    /// Middle button (scroll wheel click).
    Middle = 2,
}

/// Common data for all label events.
#[derive(Debug, Clone, Copy)]
pub struct EventBase {
    accepted: bool,
}

impl Default for EventBase {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBase {
    /// Create an unaccepted base.
    pub fn new() -> Self {
        Self { accepted: false }
    }

    /// Check if the event has been accepted.
    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    /// Accept the event, preventing further propagation.
    pub fn accept(&mut self) {
        self.accepted = true;
    }

    /// Ignore the event, allowing further propagation.
    pub fn ignore(&mut self) {
        self.accepted = false;
    }

    fn set_accepted(&mut self, accepted: bool) {
        self.accepted = accepted;
    }
}

/// A touch at one point of the label.
#[derive(Debug, Clone, Copy)]
pub struct TouchEvent {
    pub base: EventBase,
    pub phase: TouchPhase,
    /// Position in label-local coordinates.
    pub local_pos: Point,
}

impl TouchEvent {
    /// Create a touch event.
    pub fn new(phase: TouchPhase, local_pos: Point) -> Self {
        Self {
            base: EventBase::new(),
            phase,
            local_pos,
        }
    }
}

/// Mouse press, move or release.
#[derive(Debug, Clone, Copy)]
pub struct MouseEvent {
    pub base: EventBase,
    /// The button that changed state. Ignored for moves.
    pub button: MouseButton,
    /// Position in label-local coordinates.
    pub local_pos: Point,
}

impl MouseEvent {
    /// Create a mouse event.
    pub fn new(button: MouseButton, local_pos: Point) -> Self {
        Self {
            base: EventBase::new(),
            button,
            local_pos,
        }
    }
}

/// Every event the label reacts to.
#[derive(Debug, Clone, Copy)]
pub enum LabelEvent {
    Touch(TouchEvent),
    MousePress(MouseEvent),
    MouseMove(MouseEvent),
    MouseRelease(MouseEvent),
}

impl LabelEvent {
    /// The shared event data.
    pub fn base(&self) -> &EventBase {
        match self {
            Self::Touch(e) => &e.base,
            Self::MousePress(e) | Self::MouseMove(e) | Self::MouseRelease(e) => &e.base,
        }
    }

    /// Get the shared event state mutably.
    pub fn base_mut(&mut self) -> &mut EventBase {
        match self {
            Self::Touch(e) => &mut e.base,
            Self::MousePress(e) | Self::MouseMove(e) | Self::MouseRelease(e) => &mut e.base,
        }
    }

    /// Check whether the label accepted the event.
    pub fn is_accepted(&self) -> bool {
        self.base().is_accepted()
    }

    pub(crate) fn set_accepted(&mut self, accepted: bool) {
        self.base_mut().set_accepted(accepted);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_and_ignore() {
        let mut event = LabelEvent::Touch(TouchEvent::new(TouchPhase::Started, Point::ZERO));
        assert!(!event.is_accepted());
        event.base_mut().accept();
        assert!(event.is_accepted());
        event.base_mut().ignore();
        assert!(!event.is_accepted());
    }

    #[test]
    fn test_mouse_variants_share_base() {
        let mouse = MouseEvent::new(MouseButton::Left, Point::new(1.0, 2.0));
        let mut event = LabelEvent::MouseRelease(mouse);
        event.set_accepted(true);
        let LabelEvent::MouseRelease(inner) = event else {
            panic!("expected mouse release");
        };
        assert!(inner.base.is_accepted());
        assert_eq!(inner.local_pos, Point::new(1.0, 2.0));
    }
}
