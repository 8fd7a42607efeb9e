//! Application shell for the tellus globe viewer.
//!
//! Provides window creation, event handling, and the frame loop.

pub mod frame_clock;
pub mod input;
pub mod window;

pub use window::run;
