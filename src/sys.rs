//! Narrow interfaces to the host window system.

pub mod window;

pub use window::WindowFrames;
