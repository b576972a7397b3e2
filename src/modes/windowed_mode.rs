use softbuffer::{Context, Surface};

use winit::{
    application::ApplicationHandler,
    dpi::{PhysicalPosition, PhysicalSize},
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Icon, Window, WindowId},
};

use log::{debug, warn};

use std::{
    num::NonZeroU32,
    sync::{
        mpsc::{self, SyncSender},
        Arc,
    },
    thread,
    time::{Duration, Instant},
};

use crate::{
    data::{Command, Program},
    error::{Error, Result},
};

const ICON_SIZE: usize = 64;

type WindowSurface = Surface<Arc<Window>, Arc<Window>>;

struct WindowState {
    prog: Program,
    window: Option<Arc<Window>>,
    surface: Option<WindowSurface>,
    exit_sender: Option<SyncSender<()>>,
    cursor: Option<PhysicalPosition<f64>>,
    error: Option<Error>,
}

impl ApplicationHandler for WindowState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.init_window(event_loop) {
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),

            WindowEvent::Resized(PhysicalSize { width, height }) => {
                let Some(surface) = self.surface.as_mut() else {
                    return;
                };

                // Minimized windows report a zero size.
                if width == 0 || height == 0 {
                    return;
                }

                if let Err(e) = Self::resize_surface(surface, width, height) {
                    warn!("Unable to resize the window buffer: {e}");
                    return;
                }

                self.prog
                    .eval_command(&Command::Resize(width as usize, height as usize));
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Some(position);
            }

            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
            }

            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                if let Some(p) = self.cursor {
                    self.prog
                        .eval_command(&Command::Click(p.x as i32, p.y as i32));
                }
            }

            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed && !event.repeat =>
            {
                match event.logical_key.as_ref() {
                    Key::Named(NamedKey::Escape) => self.shutdown(event_loop),

                    Key::Named(NamedKey::Space) | Key::Character("r" | "R") => {
                        self.prog.eval_command(&Command::Regenerate);
                    }

                    _ => {}
                }
            }

            WindowEvent::RedrawRequested => self.redraw(),

            _ => {}
        }
    }
}

impl WindowState {
    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let (w, h) = self.prog.viewport();
        let size = PhysicalSize::new(w as u32, h as u32);

        let (rgba, iw, ih) = self.prog.icon_rgba(ICON_SIZE);
        let icon = Icon::from_rgba(rgba, iw, ih)
            .inspect_err(|e| warn!("Failed to create window icon: {e}"))
            .ok();

        let window_attributes = Window::default_attributes()
            .with_title("mondrian")
            .with_inner_size(size)
            .with_resizable(true)
            .with_window_icon(icon);

        let window = Arc::new(event_loop.create_window(window_attributes)?);

        let context = Context::new(window.clone())?;
        let mut surface = Surface::new(&context, window.clone())?;

        let inner = window.inner_size();
        if inner.width > 0 && inner.height > 0 {
            Self::resize_surface(&mut surface, inner.width, inner.height)?;

            if (inner.width as usize, inner.height as usize) != (w, h) {
                self.prog.eval_command(&Command::Resize(
                    inner.width as usize,
                    inner.height as usize,
                ));
            }
        }

        let (exit_send, exit_recv) = mpsc::sync_channel(1);
        let interval = Duration::from_secs_f64(1.0 / self.prog.fps() as f64);

        // Frame clock: asks for a redraw every interval until told to stop.
        let clock_window = window.clone();
        thread::Builder::new()
            .name("frame-clock".into())
            .spawn(move || loop {
                if exit_recv.recv_timeout(interval).is_ok() {
                    break;
                }

                clock_window.request_redraw();
            })?;

        self.exit_sender = Some(exit_send);
        self.surface = Some(surface);
        self.window = Some(window);

        Ok(())
    }

    fn resize_surface(surface: &mut WindowSurface, w: u32, h: u32) -> Result<()> {
        let (Some(w), Some(h)) = (NonZeroU32::new(w), NonZeroU32::new(h)) else {
            return Ok(());
        };

        surface.resize(w, h)?;
        Ok(())
    }

    fn redraw(&mut self) {
        let Some(window) = self.window.as_ref() else {
            return;
        };

        if self.prog.update(Instant::now()) {
            window.set_title(self.prog.title());
        }

        self.prog.render();

        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        match surface.buffer_mut() {
            Ok(mut buffer) => {
                self.prog.pix.copy_to(&mut buffer);

                window.pre_present_notify();
                if let Err(e) = buffer.present() {
                    warn!("Failed to present the frame: {e}");
                }
            }

            Err(e) => warn!("Failed to get the window buffer: {e}"),
        }
    }

    /// Disposes the program and stops the frame clock before leaving.
    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        self.prog.eval_command(&Command::Close);

        if let Some(sender) = self.exit_sender.take() {
            let _ = sender.send(());
        }

        debug!("Frame clock stopped.");
        event_loop.exit();
    }
}

pub fn winit_main(prog: Program) -> Result<()> {
    let event_loop = EventLoop::new()?;

    let mut state = WindowState {
        prog,
        window: None,
        surface: None,
        exit_sender: None,
        cursor: None,
        error: None,
    };

    event_loop.set_control_flow(ControlFlow::Wait);
    event_loop.run_app(&mut state)?;

    // The loop can also end without a CloseRequested.
    if let Some(sender) = state.exit_sender.take() {
        let _ = sender.send(());
    }
    state.prog.dispose();

    match state.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
