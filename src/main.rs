//! Direct-to-framebuffer color sweep demo
//!
//! Brings up an EGL/OpenGL ES 2 context on the fbdev platform (no windowing
//! system) and draws a full-screen quad forever. The quad's white/red boundary
//! sweeps left-to-right once every 120 frames.

mod context;
mod error;
mod renderer;
mod shader;
mod sweep;

use anyhow::Result;

use context::EglContext;
use renderer::SweepRenderer;
use sweep::FrameClock;

fn run() -> Result<()> {
    let egl = EglContext::new()?;
    let (width, height) = egl.surface_size()?;
    tracing::info!("EGL surface up: {}x{}", width, height);

    let gl = egl.load_gl();
    let renderer = SweepRenderer::new(&gl)?;
    tracing::debug!("renderer initialized, entering draw loop");

    let mut clock = FrameClock::new();
    loop {
        renderer.draw(&gl, clock.next_phase())?;
        egl.swap_buffers()?;
    }
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // run() only returns on a GPU failure; any failure is fatal.
    if let Err(e) = run() {
        tracing::error!("fatal: {e:#}");
        std::process::exit(1);
    }
}
