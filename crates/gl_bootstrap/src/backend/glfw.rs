//! Window management using GLFW
//!
//! Provides the GLFW windowing subsystem and the `gl` function loader behind
//! the [`Platform`] and [`WindowBackend`] traits.

use std::cell::RefCell;
use std::sync::atomic::{AtomicBool, Ordering};

use glfw::Context as _;

use super::{Platform, WindowBackend};
use crate::config::{ContextRequest, GlProfile, WindowConfig};
use crate::error::{ContextError, ContextResult};

/// GLFW is process global; only one platform may hold it at a time.
static GLFW_CLAIMED: AtomicBool = AtomicBool::new(false);

thread_local! {
    // GLFW reports errors through a callback on the thread that made the call.
    static LAST_GLFW_ERROR: RefCell<Option<String>> = const { RefCell::new(None) };
}

#[allow(clippy::needless_pass_by_value)]
fn record_glfw_error(error: glfw::Error, description: String) {
    log::error!("GLFW error {error:?}: {description}");
    LAST_GLFW_ERROR.with(|last| *last.borrow_mut() = Some(description));
}

fn take_last_glfw_error() -> Option<String> {
    LAST_GLFW_ERROR.with(|last| last.borrow_mut().take())
}

fn creation_failure_reason() -> String {
    take_last_glfw_error().unwrap_or_else(|| "GLFW returned no window".to_string())
}

const fn profile_hint(profile: GlProfile) -> glfw::OpenGlProfileHint {
    match profile {
        GlProfile::Core => glfw::OpenGlProfileHint::Core,
        GlProfile::Compatibility => glfw::OpenGlProfileHint::Compat,
        GlProfile::Any => glfw::OpenGlProfileHint::Any,
    }
}

fn to_u32(value: i32) -> u32 {
    u32::try_from(value).unwrap_or(0)
}

fn to_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// GLFW windowing subsystem plus the `gl` loader
#[derive(Default)]
pub struct GlfwPlatform {
    glfw: Option<glfw::Glfw>,
    claimed: bool,
}

impl GlfwPlatform {
    /// Create an uninitialized platform
    pub fn new() -> Self {
        Self::default()
    }

    fn glfw_mut(&mut self) -> ContextResult<&mut glfw::Glfw> {
        self.glfw.as_mut().ok_or(ContextError::NotInitialized)
    }

    fn release(&mut self) {
        if self.claimed {
            GLFW_CLAIMED.store(false, Ordering::Release);
            self.claimed = false;
        }
    }
}

impl Platform for GlfwPlatform {
    type Window = GlfwWindow;

    fn init(&mut self) -> ContextResult<()> {
        if self.claimed || GLFW_CLAIMED.swap(true, Ordering::AcqRel) {
            return Err(ContextError::AlreadyInitialized);
        }
        self.claimed = true;

        match glfw::init(record_glfw_error) {
            Ok(glfw) => {
                log::info!("GLFW {} initialized", glfw::get_version_string());
                self.glfw = Some(glfw);
                Ok(())
            }
            Err(e) => {
                self.release();
                let detail = take_last_glfw_error().unwrap_or_else(|| format!("{e:?}"));
                Err(ContextError::WindowingInit(detail))
            }
        }
    }

    fn apply_context_request(&mut self, request: &ContextRequest) {
        let Some(glfw) = self.glfw.as_mut() else {
            return;
        };
        glfw.window_hint(glfw::WindowHint::ContextVersion(request.major, request.minor));
        glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(request.forward_compatible));
        glfw.window_hint(glfw::WindowHint::OpenGlProfile(profile_hint(request.profile)));
    }

    fn create_window(&mut self, config: &WindowConfig) -> ContextResult<GlfwWindow> {
        // Only errors raised by this creation attempt may explain its failure.
        take_last_glfw_error();
        let glfw = self.glfw_mut()?;
        glfw.window_hint(glfw::WindowHint::Visible(config.visible));
        glfw.window_hint(glfw::WindowHint::Resizable(config.resizable));

        let (window, events) = glfw
            .create_window(config.width, config.height, &config.title, glfw::WindowMode::Windowed)
            .ok_or_else(|| ContextError::WindowCreation(creation_failure_reason()))?;

        Ok(GlfwWindow { window, events })
    }

    fn set_swap_interval(&mut self, interval: u32) {
        if let Some(glfw) = self.glfw.as_mut() {
            let interval = if interval == 0 {
                glfw::SwapInterval::None
            } else {
                glfw::SwapInterval::Sync(interval)
            };
            glfw.set_swap_interval(interval);
        }
    }

    fn load_gl(&mut self, window: &mut GlfwWindow) -> ContextResult<()> {
        gl::load_with(|symbol| window.window.get_proc_address(symbol) as *const _);

        if gl::GetError::is_loaded() && gl::GetString::is_loaded() && gl::Viewport::is_loaded() {
            Ok(())
        } else {
            Err(ContextError::LoaderInit)
        }
    }

    #[allow(unsafe_code)]
    fn poll_gl_error(&mut self) -> u32 {
        if !gl::GetError::is_loaded() {
            return gl::NO_ERROR;
        }
        // SAFETY: the entry point is loaded and the context is current on this thread.
        unsafe { gl::GetError() }
    }

    fn poll_events(&mut self) {
        if let Some(glfw) = self.glfw.as_mut() {
            glfw.poll_events();
        }
    }

    fn terminate(&mut self) {
        // glfwTerminate runs once the last Glfw handle is dropped.
        self.glfw = None;
        self.release();
        log::info!("GLFW terminated");
    }
}

impl Drop for GlfwPlatform {
    fn drop(&mut self) {
        self.release();
    }
}

/// GLFW window wrapper with proper resource management
pub struct GlfwWindow {
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
}

impl GlfwWindow {
    /// Drain events queued for this window by the last `poll_events`
    ///
    /// Nothing is queued unless polling was enabled on the native window.
    pub fn flush_events(&self) -> glfw::FlushedMessages<'_, (f64, glfw::WindowEvent)> {
        glfw::flush_messages(&self.events)
    }

    /// Borrow the native GLFW window
    pub fn native(&self) -> &glfw::PWindow {
        &self.window
    }

    /// Mutably borrow the native GLFW window
    pub fn native_mut(&mut self) -> &mut glfw::PWindow {
        &mut self.window
    }
}

impl WindowBackend for GlfwWindow {
    fn make_current(&mut self) {
        self.window.make_current();
    }

    fn swap_buffers(&mut self) {
        self.window.swap_buffers();
    }

    fn show(&mut self) {
        self.window.show();
    }

    fn hide(&mut self) {
        self.window.hide();
    }

    fn is_visible(&self) -> bool {
        self.window.is_visible()
    }

    fn should_close(&self) -> bool {
        self.window.should_close()
    }

    fn set_should_close(&mut self, should_close: bool) {
        self.window.set_should_close(should_close);
    }

    fn get_size(&self) -> (u32, u32) {
        let (width, height) = self.window.get_size();
        (to_u32(width), to_u32(height))
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.window.set_size(to_i32(width), to_i32(height));
    }

    fn get_framebuffer_size(&self) -> (u32, u32) {
        let (width, height) = self.window.get_framebuffer_size();
        (to_u32(width), to_u32(height))
    }

    fn set_title(&mut self, title: &str) {
        self.window.set_title(title);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_hint_mapping() {
        assert!(matches!(profile_hint(GlProfile::Core), glfw::OpenGlProfileHint::Core));
        assert!(matches!(profile_hint(GlProfile::Compatibility), glfw::OpenGlProfileHint::Compat));
        assert!(matches!(profile_hint(GlProfile::Any), glfw::OpenGlProfileHint::Any));
    }

    #[test]
    fn test_size_conversions_saturate() {
        assert_eq!(to_u32(-4), 0);
        assert_eq!(to_u32(600), 600);
        assert_eq!(to_i32(u32::MAX), i32::MAX);
    }

    #[test]
    fn test_creation_reason_uses_latest_glfw_error() {
        record_glfw_error(glfw::Error::VersionUnavailable, "requested 3.2 core".to_string());
        assert_eq!(creation_failure_reason(), "requested 3.2 core");
        assert_eq!(creation_failure_reason(), "GLFW returned no window");
    }

    #[test]
    fn test_stale_glfw_error_is_cleared_before_creation() {
        let mut platform = GlfwPlatform::new();
        record_glfw_error(glfw::Error::PlatformError, "stale".to_string());

        let result = platform.create_window(&WindowConfig::default());

        assert!(result.is_err());
        assert_eq!(take_last_glfw_error(), None);
    }

    #[test]
    fn test_uninitialized_platform_is_inert() {
        let mut platform = GlfwPlatform::new();
        platform.apply_context_request(&ContextRequest::default());
        platform.poll_events();
        assert!(matches!(
            platform.create_window(&WindowConfig::default()),
            Err(ContextError::NotInitialized)
        ));
    }
}
