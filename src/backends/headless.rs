use crate::{DisplayBackend, DisplayError, FrameBuffer, InputEvent, KeyboardState};
use std::collections::VecDeque;

/// Display backend without a window.
///
/// Presented frames are kept in memory and input comes from a scripted queue.
/// Each call to `poll_events` drains one scripted batch; once the script is
/// exhausted the backend reports `Quit`, as if the window had been closed.
pub struct HeadlessBackend {
    size: Option<(u32, u32)>,
    title: String,
    last_frame: Vec<u8>,
    present_count: usize,
    script: VecDeque<Vec<ScriptedInput>>,
    keyboard: KeyboardState<u32>,
    poll_count: usize,
}

#[derive(Clone, Copy, Debug)]
enum ScriptedInput {
    Press(u32),
    Release(u32),
    Event(InputEvent),
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self {
            size: None,
            title: String::new(),
            last_frame: Vec::new(),
            present_count: 0,
            script: VecDeque::new(),
            keyboard: KeyboardState::new(),
            poll_count: 0,
        }
    }

    /// Queues a poll that returns no events.
    pub fn idle(&mut self) -> &mut Self {
        self.script.push_back(Vec::new());
        self
    }

    /// Queues a poll in which `key` goes down.
    pub fn press_key(&mut self, key: u32) -> &mut Self {
        self.script.push_back(vec![ScriptedInput::Press(key)]);
        self
    }

    /// Queues a poll in which `key` is released.
    pub fn release_key(&mut self, key: u32) -> &mut Self {
        self.script.push_back(vec![ScriptedInput::Release(key)]);
        self
    }

    /// Queues a poll that delivers `events` together.
    pub fn events(&mut self, events: &[InputEvent]) -> &mut Self {
        self.script
            .push_back(events.iter().copied().map(ScriptedInput::Event).collect());
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn size(&self) -> Option<(u32, u32)> {
        self.size
    }

    pub fn present_count(&self) -> usize {
        self.present_count
    }

    pub fn poll_count(&self) -> usize {
        self.poll_count
    }

    pub fn last_frame(&self) -> &[u8] {
        &self.last_frame
    }

    /// RGBA of one pixel in the last presented frame.
    pub fn presented_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let (width, height) = self.size?;
        if x >= width || y >= height || self.last_frame.is_empty() {
            return None;
        }
        let idx = (y as usize * width as usize + x as usize) * 4;
        let mut rgba = [0u8; 4];
        rgba.copy_from_slice(&self.last_frame[idx..idx + 4]);
        Some(rgba)
    }
}

impl DisplayBackend for HeadlessBackend {
    fn init(
        &mut self,
        width: u32,
        height: u32,
        title: &str,
        _vsync: bool,
    ) -> Result<(), DisplayError> {
        if width == 0 || height == 0 {
            return Err(DisplayError::InitFailed(format!(
                "invalid display size {}x{}",
                width, height
            )));
        }
        self.size = Some((width, height));
        self.title = title.to_string();
        Ok(())
    }

    fn present(&mut self, frame: &[u8]) -> Result<(), DisplayError> {
        let (width, height) = self.size.ok_or(DisplayError::NotInitialized)?;

        let expected = FrameBuffer::buffer_size(width, height);
        if frame.len() != expected {
            return Err(DisplayError::InvalidFrame {
                expected,
                actual: frame.len(),
            });
        }

        self.last_frame.clear();
        self.last_frame.extend_from_slice(frame);
        self.present_count += 1;
        Ok(())
    }

    fn poll_events(&mut self) -> Result<Vec<InputEvent>, DisplayError> {
        if self.size.is_none() {
            return Err(DisplayError::NotInitialized);
        }
        self.poll_count += 1;

        let Some(batch) = self.script.pop_front() else {
            return Ok(vec![InputEvent::Quit]);
        };

        let mut events = Vec::with_capacity(batch.len());
        for input in batch {
            match input {
                ScriptedInput::Press(key) => {
                    self.keyboard.press(key);
                    events.push(InputEvent::KeyDown);
                }
                ScriptedInput::Release(key) => {
                    self.keyboard.release(&key);
                    events.push(InputEvent::KeyUp);
                }
                ScriptedInput::Event(event) => {
                    if event == InputEvent::FocusLost {
                        self.keyboard.clear();
                    }
                    events.push(event);
                }
            }
        }
        Ok(events)
    }

    fn any_key_down(&self) -> bool {
        self.keyboard.any_pressed()
    }
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self::new()
    }
}
