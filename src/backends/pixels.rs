use crate::{DisplayBackend, DisplayError, FrameBuffer, InputEvent, KeyboardState};
use pixels::{Pixels, PixelsBuilder, SurfaceTexture};
use std::sync::Arc;
use std::time::Duration;
use winit::application::ApplicationHandler;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowAttributes, WindowId};

/// Pumps before giving up on the platform delivering `resumed`.
const MAX_INIT_PUMPS: usize = 100;

/// Windowed backend: a winit window presented through a `pixels` surface.
///
/// The event loop is never run to completion. Each `poll_events` call pumps it
/// once without blocking, so the driver keeps its straight-line call style.
pub struct PixelsBackend {
    pixels: Option<Pixels<'static>>,
    event_loop: Option<EventLoop<()>>,
    state: WindowState,
    size: (u32, u32),
}

/// Event-loop side of the backend, handed to winit on every pump.
#[derive(Default)]
struct WindowState {
    attributes: Option<WindowAttributes>,
    requested_size: PhysicalSize<u32>,
    window: Option<Arc<Window>>,
    create_error: Option<String>,
    keyboard: KeyboardState<PhysicalKey>,
    events: Vec<InputEvent>,
    redraw_requested: bool,
    resized: Option<PhysicalSize<u32>>,
}

impl ApplicationHandler for WindowState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let Some(mut attributes) = self.attributes.clone() else {
            return;
        };
        if let Some(monitor) = event_loop.primary_monitor() {
            attributes = attributes.with_position(centered_position(
                monitor.position(),
                monitor.size(),
                self.requested_size,
            ));
        }

        match event_loop.create_window(attributes) {
            Ok(window) => self.window = Some(Arc::new(window)),
            Err(e) => self.create_error = Some(format!("Failed to create window: {}", e)),
        }
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => self.events.push(InputEvent::Quit),
            WindowEvent::KeyboardInput { event, .. } => match event.state {
                ElementState::Pressed => {
                    self.keyboard.press(event.physical_key);
                    self.events.push(InputEvent::KeyDown);
                }
                ElementState::Released => {
                    self.keyboard.release(&event.physical_key);
                    self.events.push(InputEvent::KeyUp);
                }
            },
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                ..
            } => self.events.push(InputEvent::MouseButtonDown),
            WindowEvent::Focused(false) => {
                self.keyboard.clear();
                self.events.push(InputEvent::FocusLost);
            }
            WindowEvent::Resized(size) => self.resized = Some(size),
            WindowEvent::RedrawRequested => self.redraw_requested = true,
            _ => {}
        }
    }
}

/// Top-left corner that centers a window of `window_size` on a monitor.
fn centered_position(
    monitor_position: PhysicalPosition<i32>,
    monitor_size: PhysicalSize<u32>,
    window_size: PhysicalSize<u32>,
) -> PhysicalPosition<i32> {
    let offset = |monitor: u32, window: u32| ((i64::from(monitor) - i64::from(window)) / 2) as i32;
    PhysicalPosition::new(
        monitor_position.x + offset(monitor_size.width, window_size.width),
        monitor_position.y + offset(monitor_size.height, window_size.height),
    )
}

impl PixelsBackend {
    pub fn new() -> Self {
        Self {
            pixels: None,
            event_loop: None,
            state: WindowState::default(),
            size: (0, 0),
        }
    }

    pub fn window(&self) -> Option<&Window> {
        self.state.window.as_deref()
    }

    fn create_window(
        &mut self,
        event_loop: &mut EventLoop<()>,
    ) -> Result<Arc<Window>, DisplayError> {
        for _ in 0..MAX_INIT_PUMPS {
            if let PumpStatus::Exit(code) =
                event_loop.pump_app_events(Some(Duration::ZERO), &mut self.state)
            {
                return Err(DisplayError::InitFailed(format!(
                    "Event loop exited during startup with code {}",
                    code
                )));
            }
            if let Some(err) = self.state.create_error.take() {
                return Err(DisplayError::InitFailed(err));
            }
            if let Some(window) = &self.state.window {
                return Ok(Arc::clone(window));
            }
        }

        Err(DisplayError::InitFailed(
            "Window was not created: event loop never resumed".to_string(),
        ))
    }
}

impl DisplayBackend for PixelsBackend {
    fn init(
        &mut self,
        width: u32,
        height: u32,
        title: &str,
        vsync: bool,
    ) -> Result<(), DisplayError> {
        // Init is idempotent: a second call keeps the existing window
        if self.pixels.is_some() {
            return Ok(());
        }

        let mut event_loop = EventLoop::new().map_err(|e| {
            DisplayError::InitFailed(format!("Failed to create event loop: {}", e))
        })?;

        self.state.requested_size = PhysicalSize::new(width, height);
        self.state.attributes = Some(
            Window::default_attributes()
                .with_title(title)
                .with_inner_size(PhysicalSize::new(width, height))
                .with_resizable(false),
        );
        let window = self.create_window(&mut event_loop)?;

        let window_size = window.inner_size();
        let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, window);

        let pixels = PixelsBuilder::new(width, height, surface_texture)
            .enable_vsync(vsync)
            .build()
            .map_err(|e| DisplayError::InitFailed(format!("Failed to create Pixels: {}", e)))?;

        log::debug!(
            "Pixels surface {}x{} on window {}x{} (vsync: {})",
            width,
            height,
            window_size.width,
            window_size.height,
            vsync
        );

        self.pixels = Some(pixels);
        self.event_loop = Some(event_loop);
        self.size = (width, height);
        Ok(())
    }

    fn present(&mut self, frame: &[u8]) -> Result<(), DisplayError> {
        let pixels = self
            .pixels
            .as_mut()
            .ok_or(DisplayError::NotInitialized)?;

        let expected = FrameBuffer::buffer_size(self.size.0, self.size.1);
        if frame.len() != expected {
            return Err(DisplayError::InvalidFrame {
                expected,
                actual: frame.len(),
            });
        }

        pixels.frame_mut().copy_from_slice(frame);
        pixels
            .render()
            .map_err(|e| DisplayError::PresentFailed(format!("Render failed: {}", e)))?;

        Ok(())
    }

    fn poll_events(&mut self) -> Result<Vec<InputEvent>, DisplayError> {
        let event_loop = self
            .event_loop
            .as_mut()
            .ok_or(DisplayError::NotInitialized)?;
        let pixels = self
            .pixels
            .as_mut()
            .ok_or(DisplayError::NotInitialized)?;

        let status = event_loop.pump_app_events(Some(Duration::ZERO), &mut self.state);
        let mut events = std::mem::take(&mut self.state.events);

        if let PumpStatus::Exit(code) = status {
            log::debug!("Event loop exited with code {}", code);
            events.push(InputEvent::Quit);
        }

        if let Some(size) = self.state.resized.take() {
            pixels
                .resize_surface(size.width, size.height)
                .map_err(|e| DisplayError::PresentFailed(format!("Resize failed: {}", e)))?;
            self.state.redraw_requested = true;
        }

        // The surface texture still holds the last frame, so exposure only needs a re-render
        if std::mem::take(&mut self.state.redraw_requested) {
            pixels
                .render()
                .map_err(|e| DisplayError::PresentFailed(format!("Redraw failed: {}", e)))?;
        }

        Ok(events)
    }

    fn any_key_down(&self) -> bool {
        self.state.keyboard.any_pressed()
    }
}

impl Default for PixelsBackend {
    fn default() -> Self {
        Self::new()
    }
}
