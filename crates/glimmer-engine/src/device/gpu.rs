use std::ffi::CStr;
use std::num::NonZeroU32;

use anyhow::{anyhow, Context, Result};
use glutin::config::{Config, ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContext, PossiblyCurrentContext,
    Version,
};
use glutin::display::{Display, GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::HasWindowHandle;
use winit::dpi::PhysicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes};

use super::GlInit;
use crate::driver::GlowDriver;

/// Owns the GL display, the current context and the window surface.
///
/// The window the surface was created for must outlive this value, and every GL
/// object must be released before it is dropped.
pub struct Gpu {
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    display: Display,
    size: PhysicalSize<u32>,
}

impl Gpu {
    /// Creates the window together with a current GL context for it.
    pub fn new(
        event_loop: &ActiveEventLoop,
        attrs: WindowAttributes,
        init: &GlInit,
    ) -> Result<(Window, Self)> {
        let template = ConfigTemplateBuilder::new().with_alpha_size(8);

        let (window, config) = DisplayBuilder::new()
            .with_window_attributes(Some(attrs))
            .build(event_loop, template, pick_config)
            .map_err(|e| anyhow!("failed to create GL display: {e}"))?;
        let window = window.context("GL display was created without a window")?;

        let raw_handle = window.window_handle().ok().map(|h| h.as_raw());
        let display = config.display();

        let (major, minor) = init.version;
        let preferred = ContextAttributesBuilder::new()
            .with_profile(GlProfile::Core)
            .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
            .build(raw_handle);
        let fallback = ContextAttributesBuilder::new().build(raw_handle);

        // SAFETY: `raw_handle` refers to `window`, which outlives the context.
        let not_current = match unsafe { display.create_context(&config, &preferred) } {
            Ok(ctx) => ctx,
            Err(err) => {
                log::warn!("GL {major}.{minor} core context unavailable ({err}); using default context");
                unsafe { display.create_context(&config, &fallback) }
                    .context("failed to create GL context")?
            }
        };

        let surface_attrs = window
            .build_surface_attributes(SurfaceAttributesBuilder::<WindowSurface>::new())
            .map_err(|e| anyhow!("failed to describe window surface: {e}"))?;
        // SAFETY: the surface is created for `window`, which outlives it.
        let surface = unsafe { display.create_window_surface(&config, &surface_attrs) }
            .context("failed to create window surface")?;

        let context = not_current
            .make_current(&surface)
            .context("failed to make GL context current")?;

        let interval = if init.vsync {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };
        if let Err(err) = surface.set_swap_interval(&context, interval) {
            log::warn!("failed to set swap interval: {err}");
        }

        let size = window.inner_size();
        log::info!(
            "GL context created ({} samples, {}x{})",
            config.num_samples(),
            size.width,
            size.height
        );

        Ok((window, Self { surface, context, display, size }))
    }

    /// Loads GL entry points for the current context.
    pub fn load_gl(&self) -> GlowDriver {
        // SAFETY: the context is current on this thread for the lifetime of
        // `self`, and the loader resolves symbols from the same display.
        unsafe { GlowDriver::load(|symbol: &CStr| self.display.get_proc_address(symbol)) }
    }

    /// Current drawable size in physical pixels.
    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    /// Resizes the surface. Zero-sized requests (minimized windows) only update
    /// the recorded size.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.size = new_size;
        if let (Some(w), Some(h)) = (NonZeroU32::new(new_size.width), NonZeroU32::new(new_size.height)) {
            self.surface.resize(&self.context, w, h);
        }
    }

    /// Presents the back buffer.
    pub fn swap_buffers(&self) -> Result<()> {
        self.surface
            .swap_buffers(&self.context)
            .context("failed to swap buffers")
    }
}

/// Prefers the config with the most multisample samples.
fn pick_config(configs: Box<dyn Iterator<Item = Config> + '_>) -> Config {
    configs
        .reduce(|best, c| if c.num_samples() > best.num_samples() { c } else { best })
        .expect("glutin offers at least one config matching the template")
}
