pub mod controller;
pub mod events;

// Re-export the essential types
pub use controller::{RenderTarget, TransformController};
pub use events::{EventHandled, InputEvent, WheelDeltaMode};
