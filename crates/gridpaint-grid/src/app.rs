use winit::dpi::LogicalSize;

use gridpaint_engine::core::{App as EngineApp, AppControl, FrameCtx};
use gridpaint_engine::device::GpuInit;
use gridpaint_engine::window::{CursorIcon, Runtime, RuntimeConfig};

use crate::config::GridConfig;
use crate::context::GridContext;
use crate::gpu::WgpuBackend;

// ── GridApplication ───────────────────────────────────────────────────────

/// Top-level builder: configure, then [`run`](GridApplication::run) the event loop.
///
/// ```rust,ignore
/// GridApplication::new(GridConfig::default())
///     .title("gridpaint")
///     .run()?;
/// ```
pub struct GridApplication {
    config:   GridConfig,
    title:    String,
    gpu_init: GpuInit,
}

impl GridApplication {
    pub fn new(config: GridConfig) -> Self {
        Self {
            config,
            title:    "gridpaint".to_string(),
            gpu_init: GpuInit::default(),
        }
    }

    /// Set the window title.
    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.title = t.into();
        self
    }

    /// Override GPU setup options (present mode, limits).
    pub fn gpu_init(mut self, init: GpuInit) -> Self {
        self.gpu_init = init;
        self
    }

    /// Builds the grid and runs until the window closes or the quit key is pressed.
    ///
    /// Configuration and device setup errors are returned.
    pub fn run(self) -> anyhow::Result<()> {
        let runtime = RuntimeConfig {
            title:        self.title,
            initial_size: LogicalSize::new(
                self.config.viewport_width as f64,
                self.config.viewport_height as f64,
            ),
        };

        let app = GridApp::new(self.config)?;
        Runtime::run(runtime, self.gpu_init, app)
    }
}

// ── GridApp ───────────────────────────────────────────────────────────────

/// Engine-facing application: one input poll, one draw per frame.
pub struct GridApp {
    context:  GridContext,
    backend:  WgpuBackend,
    grabbing: bool,
}

impl GridApp {
    pub fn new(config: GridConfig) -> anyhow::Result<Self> {
        let mut backend = WgpuBackend::new();
        let context = GridContext::new(config, &mut backend)?;
        Ok(Self {
            context,
            backend,
            grabbing: false,
        })
    }

    pub fn context(&self) -> &GridContext {
        &self.context
    }
}

impl EngineApp for GridApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        self.context.resize(ctx.window.viewport(), &mut self.backend);

        let outcome = self
            .context
            .process_input(ctx.input, ctx.input_frame, &mut self.backend);
        if outcome.quit {
            return AppControl::Exit;
        }

        if outcome.panning != self.grabbing {
            self.grabbing = outcome.panning;
            ctx.window.set_cursor(if self.grabbing {
                CursorIcon::Grabbing
            } else {
                CursorIcon::Default
            });
        }

        self.backend.begin_frame();
        self.context.draw(&mut self.backend);

        let background = self.context.config().background;
        let backend = &mut self.backend;
        ctx.render(background, |rctx, target| backend.flush(rctx, target))
    }
}
