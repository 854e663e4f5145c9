pub mod headless;

pub use headless::HeadlessBackend;

#[cfg(feature = "pixels-backend")]
pub mod pixels;

#[cfg(feature = "pixels-backend")]
pub use pixels::PixelsBackend;
