//! Clear-colour demo
//!
//! Shows the documented startup sequence: init, set up GL state, prime one
//! frame while the window is still hidden, show it, then loop until the
//! window is closed or GL reports an error. An optional argument names a
//! `.toml` or `.ron` bootstrap configuration file.

use std::time::{Duration, Instant};

use gl_bootstrap::{BootstrapConfig, Context, ContextResult, GlfwPlatform, StopReason};

/// Frame budget when the driver ignores the swap interval
const FRAME_TIME: Duration = Duration::from_micros(16_667);

struct ClearDemo {
    start_time: Instant,
}

impl ClearDemo {
    fn new() -> Self {
        Self { start_time: Instant::now() }
    }

    #[allow(unsafe_code)]
    fn resize(width: u32, height: u32) {
        let width = i32::try_from(width).unwrap_or(i32::MAX);
        let height = i32::try_from(height).unwrap_or(i32::MAX);
        // SAFETY: called between init and terminate on the context thread.
        unsafe { gl::Viewport(0, 0, width, height) };
    }

    #[allow(unsafe_code)]
    fn render(&self) {
        let t = self.start_time.elapsed().as_secs_f32();
        let pulse = t.sin().mul_add(0.5, 0.5);
        // SAFETY: called between init and terminate on the context thread.
        unsafe {
            gl::ClearColor(0.1, 0.2 * pulse, 0.4 * pulse, 1.0);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }
    }
}

fn create_context() -> ContextResult<Context<GlfwPlatform>> {
    match std::env::args().nth(1) {
        Some(path) => Context::glfw_from_file(path),
        None => Ok(Context::glfw(BootstrapConfig::new().with_title("GL Bootstrap - Clear Demo"))),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    gl_bootstrap::logging::init();
    log::info!("Starting clear demo");

    let mut context = create_context()?;
    context.init()?;

    let demo = ClearDemo::new();
    if let Some(window) = context.window() {
        let (width, height) = window.get_framebuffer_size();
        ClearDemo::resize(width, height);
    }

    // Prime one frame so the window never shows garbage.
    demo.render();
    context.tick();
    if let Some(window) = context.window_mut() {
        window.show();
    }

    let mut frames = 0u64;
    let mut last_frame = Instant::now();
    while context.tick() {
        if let Some(window) = context.window() {
            let (width, height) = window.get_framebuffer_size();
            ClearDemo::resize(width, height);
        }
        demo.render();
        frames += 1;

        let elapsed = last_frame.elapsed();
        if elapsed < FRAME_TIME {
            std::thread::sleep(FRAME_TIME - elapsed);
        }
        last_frame = Instant::now();
    }

    let result = match (context.stop_reason(), context.get_error()) {
        (_, Some(err)) => Err(err.into()),
        (Some(StopReason::WindowClosed), None) => {
            log::info!("Window closed after {frames} frames");
            Ok(())
        }
        (reason, None) => {
            log::info!("Loop ended ({reason:?}) after {frames} frames");
            Ok(())
        }
    };

    context.terminate();
    result
}
