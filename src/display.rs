//! Real window + host event pump, gated behind the `display` feature.
//!
//! This is the only part of the crate that talks to `winit`/`pixels`; the
//! rest of the crate (including `Machine::run_frame`) has no idea a window
//! exists, per spec §5 ("no component may suspend except the pacing
//! sleep") and Design Notes ("host window/renderer... thin, peripheral").

use std::time::{Duration, Instant};

use pixels::{Pixels, SurfaceTexture};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowId};

use crate::keyboard::position_for_char;
use crate::machine::Machine;
use crate::video::{FRAME_HEIGHT, FRAME_WIDTH};

const FRAME_PERIOD: Duration = Duration::from_micros(20_000);

fn named_key_position(key: &NamedKey) -> Option<u8> {
    use crate::keyboard::position::*;
    match key {
        NamedKey::Escape => Some(ESCAPE),
        NamedKey::Control => Some(LEFT_CTRL),
        NamedKey::Space => Some(SPACE),
        NamedKey::ArrowUp => Some(UP),
        NamedKey::Shift => Some(LEFT_SHIFT),
        NamedKey::ArrowLeft => Some(LEFT),
        NamedKey::ArrowDown => Some(DOWN),
        NamedKey::ArrowRight => Some(RIGHT),
        NamedKey::Alt => Some(LEFT_ALT),
        NamedKey::Backspace => Some(BACKSPACE),
        NamedKey::Enter => Some(RETURN),
        _ => None,
    }
}

fn key_to_matrix_position(key: &Key) -> Option<u8> {
    match key {
        Key::Character(s) => s.chars().next().and_then(position_for_char),
        Key::Named(named) => named_key_position(named),
        _ => None,
    }
}

struct App {
    machine: Machine,
    window: Option<Window>,
    pixels: Option<Pixels<'static>>,
    last_frame: Instant,
}

impl App {
    fn new(machine: Machine) -> Self {
        Self {
            machine,
            window: None,
            pixels: None,
            last_frame: Instant::now(),
        }
    }

    fn blit(&mut self) {
        let Some(pixels) = self.pixels.as_mut() else { return };
        let rgb = self.machine.frame();
        let buf = pixels.frame_mut();
        for (i, chunk) in rgb.chunks_exact(3).enumerate() {
            let o = i * 4;
            buf[o] = chunk[0];
            buf[o + 1] = chunk[1];
            buf[o + 2] = chunk[2];
            buf[o + 3] = 0xFF;
        }
        let _ = pixels.render();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let attrs = Window::default_attributes()
            .with_title("Oricust")
            .with_inner_size(winit::dpi::LogicalSize::new(
                (FRAME_WIDTH * 2) as f64,
                (FRAME_HEIGHT * 2) as f64,
            ));
        let window = event_loop.create_window(attrs).expect("failed to create window");
        let size = window.inner_size();
        let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
        let pixels = Pixels::new(FRAME_WIDTH as u32, FRAME_HEIGHT as u32, surface_texture)
            .expect("failed to create pixel surface");
        self.window = Some(window);
        self.pixels = Some(pixels);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(pixels) = self.pixels.as_mut() {
                    let _ = pixels.resize_surface(size.width, size.height);
                }
            }
            WindowEvent::KeyboardInput {
                event: KeyEvent { logical_key, state, .. },
                ..
            } => {
                if let Some(position) = key_to_matrix_position(&logical_key) {
                    match state {
                        ElementState::Pressed => self.machine.key_down(position),
                        ElementState::Released => self.machine.key_up(position),
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                let brk = self.machine.run_frame().unwrap_or(false);
                if brk {
                    log::warn!("BRK executed; continuing (monitor REPL is not reachable with a window open)");
                }
                self.blit();

                let elapsed = self.last_frame.elapsed();
                if elapsed < FRAME_PERIOD {
                    std::thread::sleep(FRAME_PERIOD - elapsed);
                }
                self.last_frame = Instant::now();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

/// Run the machine behind a real window until the user closes it.
pub fn run(machine: Machine) {
    let event_loop = EventLoop::new().expect("failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);
    let mut app = App::new(machine);
    event_loop.run_app(&mut app).expect("event loop failed");
}
