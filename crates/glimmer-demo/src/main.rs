use std::path::PathBuf;

use anyhow::Result;
use glimmer_engine::core::{App, AppControl, FrameCtx};
use glimmer_engine::device::GlInit;
use glimmer_engine::logging::{init_logging, LoggingConfig};
use glimmer_engine::scene::QuadScene;
use glimmer_engine::window::{Runtime, RuntimeConfig};
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

const DEFAULT_SHADER: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/res/shaders/Basic.shader");

struct Demo {
    scene: QuadScene,
}

impl App for Demo {
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        match event {
            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed
                    && event.physical_key == PhysicalKey::Code(KeyCode::Escape) =>
            {
                log::info!("escape pressed, closing");
                AppControl::Exit
            }
            _ => AppControl::Continue,
        }
    }

    fn on_frame(&mut self, _ctx: &mut FrameCtx<'_>) -> AppControl {
        self.scene.draw();
        AppControl::Continue
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    // Optional override: `glimmer-demo path/to/file.shader`.
    let shader_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SHADER));
    log::debug!("shader path: {}", shader_path.display());

    Runtime::run(RuntimeConfig::default(), GlInit::default(), move |gl| {
        let scene = QuadScene::new(gl, &shader_path)?;
        Ok(Demo { scene })
    })
}
