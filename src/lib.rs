pub mod backends;
pub mod config;
mod color;
mod display;
mod error;
mod framebuffer;
mod input;
mod traits;

pub use color::Color;
pub use config::{ConfigError, DisplayConfig, PresentMode};
pub use display::Display;
pub use error::DisplayError;
pub use framebuffer::FrameBuffer;
pub use input::{InputEvent, KeyboardState};
pub use traits::DisplayBackend;
