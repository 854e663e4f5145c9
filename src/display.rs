use crate::{
    Color, DisplayBackend, DisplayConfig, DisplayError, FrameBuffer, InputEvent, PresentMode,
};
use std::collections::VecDeque;

/// Events kept between `kbhit` calls when nobody drains them.
const MAX_PENDING_EVENTS: usize = 64;

/// An open window with its renderer and the frame being drawn.
///
/// Dropping the display releases the window; [`Display::close`] does the same
/// after optionally waiting for the user.
pub struct Display<B: DisplayBackend> {
    frame: FrameBuffer,
    backend: B,
    config: DisplayConfig,
    pending: VecDeque<InputEvent>,
}

impl<B: DisplayBackend> Display<B> {
    /// Opens the window, clears it to `background` and shows it.
    pub fn open(
        mut backend: B,
        config: &DisplayConfig,
        background: Color,
    ) -> Result<Self, DisplayError> {
        if config.width == 0 || config.height == 0 {
            return Err(DisplayError::InitFailed(format!(
                "invalid display size {}x{}",
                config.width, config.height
            )));
        }

        backend.init(config.width, config.height, &config.title, config.vsync)?;

        let mut frame = FrameBuffer::new(config.width, config.height);
        frame.clear(background);
        backend.present(frame.as_bytes())?;

        log::info!(
            "Opened {}x{} display \"{}\" (depth {}, {:?} present)",
            config.width,
            config.height,
            config.title,
            config.depth,
            config.present_mode
        );

        Ok(Self {
            frame,
            backend,
            config: config.clone(),
            pending: VecDeque::new(),
        })
    }

    /// Clears the whole display to black and shows it.
    pub fn clear(&mut self) -> Result<(), DisplayError> {
        self.frame.clear(Color::BLACK);
        self.present()
    }

    /// Sets one pixel, ignoring points outside the display, and shows it in immediate mode.
    pub fn plot(&mut self, x: i32, y: i32, color: Color) -> Result<(), DisplayError> {
        if !self.frame.plot(x, y, color) {
            log::trace!("Point ({}, {}) is outside the display", x, y);
        }
        self.present_if_immediate()
    }

    /// Draws a line clipped to the display, endpoints included, and shows it in immediate mode.
    pub fn line(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        color: Color,
    ) -> Result<(), DisplayError> {
        self.frame.line(x0, y0, x1, y1, color);
        self.present_if_immediate()
    }

    /// Shows the current frame regardless of the present mode.
    pub fn present(&mut self) -> Result<(), DisplayError> {
        self.backend.present(self.frame.as_bytes())
    }

    /// Pumps window events and reports whether any key is currently held.
    ///
    /// Pumped events stay queued, so a key seen here also ends a later
    /// `close(true)` wait unless the caller drains it with [`Display::take_events`].
    /// The queue is bounded; when full, the oldest event that would not end a
    /// wait is dropped first.
    pub fn kbhit(&mut self) -> Result<bool, DisplayError> {
        let events = self.backend.poll_events()?;
        self.queue_events(events);
        Ok(self.backend.any_key_down())
    }

    /// Removes and returns every event queued by [`Display::kbhit`].
    pub fn take_events(&mut self) -> Vec<InputEvent> {
        self.pending.drain(..).collect()
    }

    /// Releases the window. With `wait`, first blocks until the user closes the
    /// window, presses a key or clicks a mouse button.
    pub fn close(mut self, wait: bool) -> Result<(), DisplayError> {
        if wait {
            if self.config.present_mode == PresentMode::Deferred {
                self.present()?;
            }
            self.wait_for_exit()?;
        }

        log::info!("Closing display \"{}\"", self.config.title);
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.frame.width()
    }

    pub fn height(&self) -> u32 {
        self.frame.height()
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    fn present_if_immediate(&mut self) -> Result<(), DisplayError> {
        match self.config.present_mode {
            PresentMode::Immediate => self.present(),
            PresentMode::Deferred => Ok(()),
        }
    }

    fn wait_for_exit(&mut self) -> Result<(), DisplayError> {
        let interval = self.config.poll_interval();

        loop {
            if let Some(event) = self.pending.drain(..).find(|e| e.ends_wait()) {
                log::debug!("Wait ended by {:?}", event);
                return Ok(());
            }

            let events = self.backend.poll_events()?;
            if events.is_empty() && !interval.is_zero() {
                std::thread::sleep(interval);
            }
            self.queue_events(events);
        }
    }

    fn queue_events(&mut self, events: Vec<InputEvent>) {
        for event in events {
            if self.pending.len() >= MAX_PENDING_EVENTS {
                let victim = self
                    .pending
                    .iter()
                    .position(|e| !e.ends_wait())
                    .unwrap_or(0);
                self.pending.remove(victim);
            }
            self.pending.push_back(event);
        }
    }
}
