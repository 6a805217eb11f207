//! Pan/zoom controller
//!
//! [`TransformController`] is the only writer of the [`ViewTransform`]. Each
//! gesture produces a candidate transform, the scale is clamped into the
//! allowed extent, and if anything changed the new transform is committed and
//! handed to the render target before the call returns.

use crate::{
    core::{
        constants::{MAX_SCALE, MIN_SCALE, WHEEL_DELTA_DIVISOR, WHEEL_LINE_HEIGHT},
        geo::{LatLng, Point},
        projection::Projection,
        transform::ViewTransform,
        viewport::Viewport,
    },
    input::events::{EventHandled, InputEvent, WheelDeltaMode},
};

/// Receives every committed transform
pub trait RenderTarget {
    fn render(&mut self, transform: &ViewTransform);
}

impl<F> RenderTarget for F
where
    F: FnMut(&ViewTransform),
{
    fn render(&mut self, transform: &ViewTransform) {
        self(transform)
    }
}

/// Gesture in progress. Anchors are world points pinned under the pointer(s).
#[derive(Debug, Clone, Copy, PartialEq)]
enum Gesture {
    Idle,
    Dragging { anchor: Point },
    Pinching { anchors: [Point; 2] },
}

#[derive(Debug, Clone)]
pub struct TransformController {
    transform: ViewTransform,
    min_scale: f64,
    max_scale: f64,
    gesture: Gesture,
}

impl TransformController {
    /// Creates a controller; the initial scale is clamped into `[min_scale, max_scale]`
    pub fn new(initial: ViewTransform, min_scale: f64, max_scale: f64) -> Self {
        Self {
            transform: initial.clamp_scale(min_scale, max_scale, &initial.origin()),
            min_scale,
            max_scale,
            gesture: Gesture::Idle,
        }
    }

    /// Controller with the default `[2^11, 2^24]` extent
    pub fn with_default_extent(initial: ViewTransform) -> Self {
        Self::new(initial, MIN_SCALE, MAX_SCALE)
    }

    /// Transform at scale `k` that puts `center` in the middle of `viewport`
    pub fn centered_transform(viewport: &Viewport, center: &LatLng, k: f64) -> ViewTransform {
        let world = Projection::unit().project(center);
        let screen = viewport.center();
        ViewTransform::identity()
            .translate(screen.x, screen.y)
            .scale(k)
            .translate(-world.x, -world.y)
    }

    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    pub fn scale_extent(&self) -> (f64, f64) {
        (self.min_scale, self.max_scale)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.gesture, Gesture::Dragging { .. })
    }

    pub fn is_pinching(&self) -> bool {
        matches!(self.gesture, Gesture::Pinching { .. })
    }

    /// Replaces the transform outright (scale still clamped around the screen origin)
    pub fn set_transform(
        &mut self,
        transform: ViewTransform,
        target: &mut dyn RenderTarget,
    ) -> bool {
        self.commit(transform, &Point::new(0.0, 0.0), target)
    }

    /// Multiplies the scale by `factor` keeping `focus` fixed on screen
    pub fn scale_by(&mut self, factor: f64, focus: &Point, target: &mut dyn RenderTarget) -> bool {
        self.scale_to(self.transform.k * factor, focus, target)
    }

    /// Sets the scale to `k` keeping `focus` fixed on screen
    pub fn scale_to(&mut self, k: f64, focus: &Point, target: &mut dyn RenderTarget) -> bool {
        let candidate = self.transform.zoom_around(k, focus);
        self.commit(candidate, focus, target)
    }

    /// Moves the map by a screen-space delta
    pub fn translate_by(&mut self, delta: &Point, target: &mut dyn RenderTarget) -> bool {
        let candidate = self.transform.pan_by(delta);
        self.commit(candidate, &Point::new(0.0, 0.0), target)
    }

    /// Applies one input event
    pub fn handle(&mut self, event: &InputEvent, target: &mut dyn RenderTarget) -> EventHandled {
        match event {
            InputEvent::DragStart { position } => {
                self.gesture = Gesture::Dragging {
                    anchor: self.transform.invert(position),
                };
            }
            InputEvent::Drag { position } => {
                let Gesture::Dragging { anchor } = self.gesture else {
                    return EventHandled::NotHandled;
                };
                let candidate = ViewTransform::anchored(self.transform.k, &anchor, position);
                self.commit(candidate, position, target);
            }
            InputEvent::DragEnd => {
                if !self.is_dragging() {
                    return EventHandled::NotHandled;
                }
                self.gesture = Gesture::Idle;
            }
            InputEvent::Wheel {
                delta_y,
                delta_mode,
                position,
            } => {
                self.scale_by(wheel_factor(*delta_y, *delta_mode), position, target);
            }
            InputEvent::DoubleClick { position, shift } => {
                let factor = if *shift { 0.5 } else { 2.0 };
                self.scale_by(factor, position, target);
            }
            InputEvent::PinchStart { touches } => {
                self.gesture = Gesture::Pinching {
                    anchors: [
                        self.transform.invert(&touches[0]),
                        self.transform.invert(&touches[1]),
                    ],
                };
            }
            InputEvent::PinchMove { touches } => {
                let Gesture::Pinching { anchors } = self.gesture else {
                    return EventHandled::NotHandled;
                };
                let world_distance = anchors[0].distance_to(&anchors[1]);
                let k = if world_distance > 0.0 {
                    touches[0].distance_to(&touches[1]) / world_distance
                } else {
                    self.transform.k
                };
                let focus = touches[0].midpoint(&touches[1]);
                let candidate =
                    ViewTransform::anchored(k, &anchors[0].midpoint(&anchors[1]), &focus);
                self.commit(candidate, &focus, target);
            }
            InputEvent::PinchEnd => {
                if !self.is_pinching() {
                    return EventHandled::NotHandled;
                }
                self.gesture = Gesture::Idle;
            }
            InputEvent::PointerMove { .. } | InputEvent::Resize { .. } => {
                return EventHandled::NotHandled;
            }
        }
        EventHandled::Handled
    }

    /// Clamps, stores and renders `candidate`; returns whether the transform changed.
    ///
    /// A candidate with a non-finite component is dropped and the current
    /// transform stays in place.
    fn commit(
        &mut self,
        candidate: ViewTransform,
        focus: &Point,
        target: &mut dyn RenderTarget,
    ) -> bool {
        if !candidate.is_finite() {
            log::debug!("ignoring non-finite transform {:?}", candidate);
            return false;
        }
        let next = candidate.clamp_scale(self.min_scale, self.max_scale, focus);
        if next == self.transform {
            return false;
        }
        self.transform = next;
        target.render(&next);
        true
    }
}

/// Scale factor for one wheel step: one doubling per 500 px of scroll
fn wheel_factor(delta_y: f64, mode: WheelDeltaMode) -> f64 {
    let pixels = match mode {
        WheelDeltaMode::Pixel => delta_y,
        WheelDeltaMode::Line | WheelDeltaMode::Page => delta_y * WHEEL_LINE_HEIGHT,
    };
    2f64.powf(-pixels / WHEEL_DELTA_DIVISOR)
}
