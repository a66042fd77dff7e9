use std::rc::Rc;

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx};
use crate::device::{GlInit, Gpu};
use crate::gl::GlContext;
use crate::time::FrameClock;

/// Window configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub resizable: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "Hello World".to_string(),
            initial_size: LogicalSize::new(640.0, 640.0),
            resizable: true,
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window, creates the GL context and runs the frame loop until
    /// the window closes or the app asks to exit.
    ///
    /// `build` runs once, with the context current, to create the app and all of
    /// its GL resources. The app is dropped before the context is destroyed.
    /// Errors from window/context creation or from `build` are returned.
    pub fn run<A, F>(config: RuntimeConfig, gl_init: GlInit, build: F) -> Result<()>
    where
        A: App,
        F: FnOnce(&Rc<GlContext>) -> Result<A>,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gl_init, build);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        state.finish()
    }
}

/// GL-side state of the open window.
///
/// Field order is drop order: the app and its GL objects go first, the window
/// last.
struct WindowEntry<A> {
    app: A,
    gl: Rc<GlContext>,
    gpu: Gpu,
    window: Window,
    clock: FrameClock,
}

struct AppState<A, F> {
    config: RuntimeConfig,
    gl_init: GlInit,
    build: Option<F>,
    entry: Option<WindowEntry<A>>,
    failure: Option<anyhow::Error>,
}

impl<A, F> AppState<A, F>
where
    A: App,
    F: FnOnce(&Rc<GlContext>) -> Result<A>,
{
    fn new(config: RuntimeConfig, gl_init: GlInit, build: F) -> Self {
        Self { config, gl_init, build: Some(build), entry: None, failure: None }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop, build: F) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size)
            .with_resizable(self.config.resizable);

        let (window, gpu) = Gpu::new(event_loop, attrs, &self.gl_init)?;
        let gl = GlContext::new(gpu.load_gl());
        log::info!("OpenGL {}", gl.driver().version_string());

        let size = gpu.size();
        gl.set_viewport(size.width, size.height);

        let app = build(&gl).context("failed to initialize application")?;

        window.request_redraw();
        self.entry = Some(WindowEntry { app, gl, gpu, window, clock: FrameClock::new() });
        Ok(())
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        // Releases GL objects while the context is still current.
        self.entry = None;
        event_loop.exit();
    }

    fn finish(self) -> Result<()> {
        match self.failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn redraw(entry: &mut WindowEntry<A>) -> AppControl {
        let time = entry.clock.tick();
        if let Some(fps) = time.fps {
            log::debug!("{fps:.1} fps");
        }
        log::trace!("frame {} ({:.3} ms)", time.frame_index, time.dt * 1000.0);

        let control = {
            let mut ctx = FrameCtx {
                gl: &entry.gl,
                window: &entry.window,
                size: entry.gpu.size(),
                time,
            };
            entry.app.on_frame(&mut ctx)
        };

        entry.window.pre_present_notify();
        if let Err(err) = entry.gpu.swap_buffers() {
            log::error!("{err:#}");
        }

        control
    }
}

impl<A, F> ApplicationHandler for AppState<A, F>
where
    A: App,
    F: FnOnce(&Rc<GlContext>) -> Result<A>,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(build) = self.build.take() else {
            return;
        };

        if let Err(err) = self.init(event_loop, build) {
            log::error!("initialization failed: {err:#}");
            self.failure = Some(err);
            self.shutdown(event_loop);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw.
        if let Some(entry) = &self.entry {
            entry.window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(entry) = self.entry.as_mut() else {
            return;
        };
        if entry.window.id() != window_id {
            return;
        }

        let mut control = entry.app.on_window_event(&event);

        match event {
            WindowEvent::CloseRequested => control = AppControl::Exit,

            WindowEvent::Resized(new_size) => {
                entry.gpu.resize(new_size);
                entry.gl.set_viewport(new_size.width, new_size.height);
                entry.window.request_redraw();
            }

            WindowEvent::RedrawRequested => {
                if Self::redraw(entry) == AppControl::Exit {
                    control = AppControl::Exit;
                }
            }

            _ => {}
        }

        if control == AppControl::Exit {
            self.shutdown(event_loop);
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.entry = None;
        log::debug!("event loop exiting");
    }
}
