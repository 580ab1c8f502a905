use anyhow::{Context, Result};
use glam::Mat4;
use ouroboros::self_referencing;
use std::time::Duration;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App as CoreApp, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::winit::translate_window_event;
use crate::input::{InputFrame, InputState};
use crate::time::SceneClock;

/// Scene window settings.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Upper clamp on per-frame delta time. `None` reports raw deltas.
    pub max_frame_delta: Option<Duration>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "diorama".to_string(),
            initial_size: LogicalSize::new(500.0, 500.0),
            max_frame_delta: Some(Duration::from_millis(250)),
        }
    }
}

impl RuntimeConfig {
    fn scene_clock(&self) -> SceneClock {
        match self.max_frame_delta {
            Some(max) => SceneClock::with_max_delta(max),
            None => SceneClock::unclamped(),
        }
    }
}

/// Requests an app can make from inside a frame.
///
/// They take effect once `on_frame` has returned.
#[derive(Default)]
pub struct RuntimeCtx {
    commands: Vec<Command>,
}

impl RuntimeCtx {
    pub fn close_window(&mut self, id: WindowId) {
        self.commands.push(Command::CloseWindow(id));
    }

    pub fn exit(&mut self) {
        self.commands.push(Command::Exit);
    }

    /// True when any buffered command ends the scene window `id`.
    fn ends(&self, id: WindowId) -> bool {
        self.commands.iter().any(|cmd| match cmd {
            Command::CloseWindow(closed) => *closed == id,
            Command::Exit => true,
        })
    }
}

enum Command {
    CloseWindow(WindowId),
    Exit,
}

/// Runs one scene window until it is closed or the app asks to exit.
pub struct Runtime;

impl Runtime {
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = SceneHost::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        state.startup_error.map_or(Ok(()), Err)
    }
}

/// The window together with everything that lives as long as it does.
#[self_referencing]
struct WindowEntry {
    input_state: InputState,
    input_frame: InputFrame,
    clock: SceneClock,
    projection: Mat4,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

impl WindowEntry {
    fn open(event_loop: &ActiveEventLoop, config: &RuntimeConfig, gpu_init: GpuInit) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(config.initial_size);
        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let entry = WindowEntryTryBuilder {
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            clock: config.scene_clock(),
            projection: Mat4::IDENTITY,
            window,
            gpu_builder: |w| {
                pollster::block_on(Gpu::new(w, gpu_init)).context("GPU initialization failed")
            },
        }
        .try_build()?;

        entry.with_gpu(|gpu| {
            let info = gpu.adapter_info();
            log::info!(
                "adapter {} ({:?}), surface {:?}",
                info.name,
                info.backend,
                gpu.surface_format()
            );
        });

        Ok(entry)
    }

    fn id(&self) -> WindowId {
        self.with_window(|w| w.id())
    }

    fn request_redraw(&self) {
        self.with_window(|w| w.request_redraw());
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        log::debug!("resized to {}x{}", size.width, size.height);
        self.with_gpu_mut(|gpu| gpu.resize(size));
        self.request_redraw();
    }
}

struct SceneHost<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    entry: Option<WindowEntry>,
    startup_error: Option<anyhow::Error>,
}

impl<A> SceneHost<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            entry: None,
            startup_error: None,
        }
    }

    fn shut_down(&mut self, event_loop: &ActiveEventLoop) {
        self.entry = None;
        event_loop.exit();
    }

    /// Ticks the clock, runs one app frame and reports whether the window should close.
    fn redraw(&mut self, id: WindowId) -> bool {
        let Some(entry) = self.entry.as_mut() else {
            return false;
        };
        let app = &mut self.app;
        let mut runtime = RuntimeCtx::default();

        let control = entry.with_mut(|fields| {
            let mut ctx = FrameCtx {
                window: WindowCtx {
                    id,
                    window: fields.window,
                },
                gpu: fields.gpu,
                input: fields.input_state,
                input_frame: fields.input_frame,
                time: fields.clock.tick(),
                runtime: &mut runtime,
                last_projection: fields.projection,
            };
            let control = app.on_frame(&mut ctx);

            fields.input_frame.clear();
            control
        });

        control == AppControl::Exit || runtime.ends(id)
    }
}

impl<A> ApplicationHandler for SceneHost<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        match WindowEntry::open(event_loop, &self.config, self.gpu_init.clone()) {
            Ok(entry) => {
                entry.request_redraw();
                self.entry = Some(entry);
            }
            Err(e) => {
                log::error!("failed to open scene window: {e:#}");
                self.startup_error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw drives the animation.
        if let Some(entry) = &self.entry {
            entry.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        let Some(entry) = self.entry.as_mut() else {
            return;
        };
        if entry.id() != id {
            return;
        }

        entry.with_mut(|fields| {
            if let Some(ev) = translate_window_event(fields.window, &event) {
                fields.input_state.apply_event(fields.input_frame, ev);
            }
        });

        if self.app.on_window_event(id, &event) == AppControl::Exit {
            self.shut_down(event_loop);
            return;
        }

        match event {
            WindowEvent::CloseRequested => self.shut_down(event_loop),
            WindowEvent::Resized(size) => entry.resize(size),
            WindowEvent::ScaleFactorChanged { .. } => {
                let size = entry.with_window(|w| w.inner_size());
                entry.resize(size);
            }
            WindowEvent::RedrawRequested => {
                if self.redraw(id) {
                    self.shut_down(event_loop);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_clamps_frame_delta() {
        let mut clock = RuntimeConfig::default().scene_clock();
        let st = clock.on_sample(10_000);
        assert!((st.delta - 0.25).abs() < 1e-6);
    }

    #[test]
    fn unclamped_config_reports_raw_delta() {
        let config = RuntimeConfig {
            max_frame_delta: None,
            ..RuntimeConfig::default()
        };
        let mut clock = config.scene_clock();
        let st = clock.on_sample(10_000);
        assert!((st.delta - 10.0).abs() < 1e-4);
    }

    #[test]
    fn runtime_ctx_buffers_commands() {
        let mut ctx = RuntimeCtx::default();
        assert!(ctx.commands.is_empty());
        ctx.exit();
        assert_eq!(ctx.commands.len(), 1);
        assert!(matches!(ctx.commands[0], Command::Exit));
    }

    #[test]
    fn exit_command_ends_any_window() {
        let id = WindowId::from(1u64);
        let mut ctx = RuntimeCtx::default();
        assert!(!ctx.ends(id));
        ctx.exit();
        assert!(ctx.ends(id));
    }

    #[test]
    fn close_command_ends_its_window() {
        let id = WindowId::from(1u64);
        let mut ctx = RuntimeCtx::default();
        ctx.close_window(WindowId::from(2u64));
        assert!(!ctx.ends(id));
        ctx.close_window(id);
        assert!(ctx.ends(id));
    }
}
