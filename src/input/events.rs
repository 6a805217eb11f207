use crate::core::geo::Point;
use serde::{Deserialize, Serialize};

/// Unit of a wheel delta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WheelDeltaMode {
    #[default]
    Pixel,
    Line,
    Page,
}

/// Input events that drive the view transform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Pointer pressed on the map
    DragStart { position: Point },
    /// Pointer moved while pressed
    Drag { position: Point },
    /// Pointer released
    DragEnd,
    /// Scroll wheel; positive `delta_y` scrolls down (zooms out)
    Wheel {
        delta_y: f64,
        delta_mode: WheelDeltaMode,
        position: Point,
    },
    /// Double click/tap; `shift` zooms out instead of in
    DoubleClick { position: Point, shift: bool },
    /// Two fingers touched down
    PinchStart { touches: [Point; 2] },
    /// Two fingers moved
    PinchMove { touches: [Point; 2] },
    /// Fingers lifted
    PinchEnd,
    /// Pointer moved without a button pressed
    PointerMove { position: Point },
    /// Window resized
    Resize { width: f64, height: f64 },
}

/// Whether an event was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventHandled {
    Handled,
    NotHandled,
}

impl InputEvent {
    /// Checks if this is a two-finger touch event
    pub fn is_touch_event(&self) -> bool {
        matches!(
            self,
            InputEvent::PinchStart { .. } | InputEvent::PinchMove { .. } | InputEvent::PinchEnd
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touch_events() {
        let pinch = InputEvent::PinchMove {
            touches: [Point::new(0.0, 0.0), Point::new(10.0, 20.0)],
        };
        assert!(pinch.is_touch_event());
        assert!(InputEvent::PinchEnd.is_touch_event());

        let wheel = InputEvent::Wheel {
            delta_y: -120.0,
            delta_mode: WheelDeltaMode::Pixel,
            position: Point::new(100.0, 200.0),
        };
        assert!(!wheel.is_touch_event());
        assert!(!InputEvent::DragEnd.is_touch_event());
    }
}
