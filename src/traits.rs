use crate::{DisplayError, InputEvent};

/// A window plus renderer pair that can show RGBA8 frames and report input.
pub trait DisplayBackend {
    fn init(
        &mut self,
        width: u32,
        height: u32,
        title: &str,
        vsync: bool,
    ) -> Result<(), DisplayError>;

    /// Shows a full RGBA8 frame of `width * height * 4` bytes.
    fn present(&mut self, frame: &[u8]) -> Result<(), DisplayError>;

    /// Drains pending window events without blocking.
    fn poll_events(&mut self) -> Result<Vec<InputEvent>, DisplayError>;

    /// Whether any key is held down as of the last poll.
    fn any_key_down(&self) -> bool;
}
