// Declare modules directly in the binary crate root
pub mod state;
pub mod render;
pub mod input;
pub mod ui;

use crate::state::State;
use anyhow::Context as _;
use life_view::Config;

use winit::{
    dpi::PhysicalSize,
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

fn run() -> anyhow::Result<()> {
    let config = Config::default();
    let event_loop = EventLoop::new().context("failed to create event loop")?;

    let (width, height) = config.window_size();
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(config.title.as_str())
            .with_inner_size(PhysicalSize::new(width, height))
            .with_resizable(false)
            .build(&event_loop)
            .context("failed to open window")?,
    );

    let frame_interval = config.frame_interval();
    let mut state = pollster::block_on(State::new(window, config))?;
    let mut next_frame = Instant::now();
    let mut fatal: Option<anyhow::Error> = None;

    event_loop.run(|event, window_target| {
        match event {
            Event::WindowEvent { window_id, ref event } if window_id == state.window.id() => {
                // Pass window-specific events to egui_winit FIRST
                let response = state.egui_winit_state.on_window_event(&state.window, event);

                // Header clicks stay in the header
                let consumed_by_egui = response.consumed
                    && !matches!(event, WindowEvent::Resized(_) | WindowEvent::CloseRequested | WindowEvent::RedrawRequested);
                if consumed_by_egui {
                    return;
                }

                match event {
                    WindowEvent::CloseRequested => {
                        window_target.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        state.resize(*new_size);
                    }
                    WindowEvent::MouseInput { state: element_state, button, .. } => {
                        input::handle_mouse_input(&mut state, *button, *element_state);
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        input::handle_cursor_move(&mut state, *position);
                    }
                    WindowEvent::CursorLeft { .. } => {
                        input::handle_cursor_left(&mut state);
                    }
                    WindowEvent::KeyboardInput { event: key_event, .. } => {
                        if input::handle_key(&mut state, key_event) {
                            window_target.exit();
                        }
                    }
                    WindowEvent::RedrawRequested => {
                        state.update();
                        match state.render() {
                            Ok(()) => {}
                            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                                log::warn!("Surface lost, reconfiguring and skipping frame.");
                                state.resize(state.size);
                            }
                            Err(wgpu::SurfaceError::Timeout) => {
                                log::warn!("Skipping frame due to surface timeout.");
                            }
                            Err(wgpu::SurfaceError::OutOfMemory) => {
                                fatal = Some(anyhow::anyhow!("GPU out of memory"));
                                window_target.exit();
                            }
                        }
                    }
                    _ => (),
                }
            }
            Event::AboutToWait => {
                let now = Instant::now();
                if now >= next_frame {
                    state.window.request_redraw();
                    next_frame = now + frame_interval;
                }
                window_target.set_control_flow(ControlFlow::WaitUntil(next_frame));
            }
            _ => (),
        }
    })
    .context("event loop failed")?;

    match fatal {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => {
            log::info!("Exiting.");
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
