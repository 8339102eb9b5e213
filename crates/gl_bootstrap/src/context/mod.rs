//! Bootstrap lifecycle: init, per-frame tick, error retrieval and teardown
//!
//! [`Context`] bundles the process-wide state of a GL application: the one
//! window, the close-request flag and the deferred-error slot. It is driven
//! from a single thread:
//!
//! ```text
//! init ──► tick ──► tick ──► ... ──► tick == false ──► get_error ──► terminate
//! ```
//!
//! The thread that calls `init` is pinned; every later call is checked
//! against it and rejected with [`ContextError::WrongThread`] when it comes
//! from anywhere else.


use std::path::Path;
use std::thread::{self, ThreadId};

use crate::backend::glfw::GlfwPlatform;
use crate::backend::{Platform, WindowBackend};
use crate::config::{BootstrapConfig, Config};
use crate::error::{ContextError, ContextResult, GlError};
use crate::window::WindowHandle;

/// Drain the `GL_INVALID_ENUM` codes some loader and driver combinations
/// queue right after the entry points are loaded
///
/// Polls until a code other than `GL_INVALID_ENUM` comes back and returns it;
/// zero means the error queue is clean. Stops as soon as any other code
/// appears, so a genuine error behind the spurious ones is never swallowed.
pub fn drain_spurious_invalid_enum(mut poll: impl FnMut() -> u32) -> u32 {
    let mut code = poll();
    let mut drained = 0usize;
    while code == gl::INVALID_ENUM {
        drained += 1;
        code = poll();
    }
    if drained > 0 {
        log::debug!("Ignored {drained} spurious GL_INVALID_ENUM report(s) after loading GL");
    }
    code
}

/// Why the most recent [`Context::tick`] returned `false`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// An error was pending; it is held for [`Context::get_error`]
    Error,
    /// The close-request flag was set
    CloseRequested,
    /// The window's own close signal was set
    WindowClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Uninitialized,
    Running,
    Terminated,
}

/// The application's window, context and frame-loop state
pub struct Context<P: Platform> {
    platform: P,
    config: BootstrapConfig,
    window: Option<WindowHandle<P::Window>>,
    close_requested: bool,
    deferred_error: Option<ContextError>,
    pinned_thread: Option<ThreadId>,
    lifecycle: Lifecycle,
    stop_reason: Option<StopReason>,
}

impl Context<GlfwPlatform> {
    /// Create a GLFW-backed context; nothing is initialized until [`Context::init`]
    pub fn glfw(config: BootstrapConfig) -> Self {
        Self::new(GlfwPlatform::new(), config)
    }

    /// Create a GLFW-backed context from a `.toml` or `.ron` configuration file
    ///
    /// # Errors
    /// Returns [`ContextError::Config`] if the file cannot be read or parsed.
    pub fn glfw_from_file(path: impl AsRef<Path>) -> ContextResult<Self> {
        Self::from_config_file(GlfwPlatform::new(), path)
    }
}

impl<P: Platform> Context<P> {
    /// Create a context over the given platform
    pub fn new(platform: P, config: BootstrapConfig) -> Self {
        Self {
            platform,
            config,
            window: None,
            close_requested: false,
            deferred_error: None,
            pinned_thread: None,
            lifecycle: Lifecycle::Uninitialized,
            stop_reason: None,
        }
    }

    /// Create a context over the given platform, configured from a file
    ///
    /// # Errors
    /// Returns [`ContextError::Config`] if the file cannot be read or parsed.
    pub fn from_config_file(platform: P, path: impl AsRef<Path>) -> ContextResult<Self> {
        let path = path.as_ref();
        log::info!("Loading bootstrap configuration from {}", path.display());
        let config = BootstrapConfig::load_from_file(path)?;
        Ok(Self::new(platform, config))
    }

    /// Initialize the windowing subsystem, create the window and load GL
    ///
    /// Pins the calling thread, brings up the windowing subsystem, requests
    /// the configured context, creates the (hidden by default) window, makes
    /// its context current, sets the swap interval and loads the GL entry
    /// points. On success the window becomes the active window and no error
    /// is pending. On failure nothing is left behind: the window is released,
    /// the windowing subsystem is shut down and the window handle stays unset.
    ///
    /// # Errors
    /// - [`ContextError::WrongThread`] when called off the pinned thread
    /// - [`ContextError::AlreadyInitialized`] on a live or terminated context
    /// - [`ContextError::WindowingInit`], [`ContextError::WindowCreation`],
    ///   [`ContextError::LoaderInit`] from the respective step
    /// - [`ContextError::Gl`] if a genuine GL error is queued after loading
    pub fn init(&mut self) -> ContextResult<()> {
        let current = thread::current().id();
        match self.pinned_thread {
            Some(pinned) if pinned != current => {
                return Err(ContextError::WrongThread { pinned, current });
            }
            _ => self.pinned_thread = Some(current),
        }
        if self.lifecycle != Lifecycle::Uninitialized {
            return Err(ContextError::AlreadyInitialized);
        }

        log::info!("Initializing windowing subsystem...");
        self.platform.init()?;

        match self.open_window() {
            Ok(window) => {
                self.window = Some(window);
                self.deferred_error = None;
                self.stop_reason = None;
                self.lifecycle = Lifecycle::Running;
                log::info!("GL context ready");
                Ok(())
            }
            Err(e) => {
                log::error!("Initialization failed: {e}");
                self.platform.terminate();
                Err(e)
            }
        }
    }

    fn open_window(&mut self) -> ContextResult<WindowHandle<P::Window>> {
        let request = self.config.context;
        log::debug!(
            "Requesting OpenGL {}.{} {:?} context (forward compatible: {})",
            request.major,
            request.minor,
            request.profile,
            request.forward_compatible
        );
        self.platform.apply_context_request(&request);

        let window_config = &self.config.window;
        log::info!(
            "Creating {}x{} window \"{}\"",
            window_config.width,
            window_config.height,
            window_config.title
        );
        let mut window = self.platform.create_window(window_config)?;
        window.make_current();
        self.platform.set_swap_interval(self.config.swap_interval);
        self.platform.load_gl(&mut window)?;

        let platform = &mut self.platform;
        match drain_spurious_invalid_enum(|| platform.poll_gl_error()) {
            gl::NO_ERROR => Ok(WindowHandle::new(window)),
            code => Err(GlError::new(code).into()),
        }
    }

    /// Advance one frame; returns whether the caller should keep looping
    ///
    /// A pending GL error is moved to the deferred-error slot and stops the
    /// loop before anything is presented. Otherwise the loop stops when the
    /// close-request flag or the window's close signal is set, and in every
    /// other case the back buffer is presented and pending events are
    /// dispatched.
    ///
    /// Call it once before showing the window to present a primed first frame.
    pub fn tick(&mut self) -> bool {
        if let Err(e) = self.check_thread() {
            self.defer(e);
            return false;
        }
        match self.lifecycle {
            Lifecycle::Running => {}
            Lifecycle::Uninitialized => {
                self.defer(ContextError::NotInitialized);
                return false;
            }
            // An unread error from the last frames outranks the teardown.
            Lifecycle::Terminated if self.deferred_error.is_some() => {
                self.stop_reason = Some(StopReason::Error);
                return false;
            }
            Lifecycle::Terminated => {
                self.defer(ContextError::Terminated);
                return false;
            }
        }

        if let Some(err) = self.get_error() {
            self.defer(err);
            return false;
        }

        let Some(window) = self.window.as_mut() else {
            self.defer(ContextError::NotInitialized);
            return false;
        };
        if self.close_requested {
            self.stop_reason = Some(StopReason::CloseRequested);
            return false;
        }
        if window.should_close() {
            self.stop_reason = Some(StopReason::WindowClosed);
            return false;
        }

        window.swap_buffers();
        self.platform.poll_events();
        self.stop_reason = None;
        true
    }

    fn defer(&mut self, err: ContextError) {
        log::warn!("Frame loop stopped: {err}");
        // Single slot: a newer error replaces one that was never read.
        self.deferred_error = Some(err);
        self.stop_reason = Some(StopReason::Error);
    }

    /// Take the error that stopped the loop, or poll GL for a new one
    ///
    /// The deferred error is returned at most once. Without one, the GL error
    /// flag is read (and thereby cleared); zero yields `None`. Before `init`
    /// and after `terminate` there is no context to poll.
    pub fn get_error(&mut self) -> Option<ContextError> {
        if let Err(e) = self.check_thread() {
            return Some(e);
        }
        if let Some(err) = self.deferred_error.take() {
            return Some(err);
        }
        if self.lifecycle != Lifecycle::Running {
            return None;
        }
        match self.platform.poll_gl_error() {
            gl::NO_ERROR => None,
            code => Some(GlError::new(code).into()),
        }
    }

    /// Destroy the window and shut the windowing subsystem down
    ///
    /// Runs once; later calls do nothing. Best effort: errors are not checked.
    /// Dropping a context that was not terminated runs this automatically.
    pub fn terminate(&mut self) {
        if let Err(e) = self.check_thread() {
            log::error!("Terminate rejected: {e}");
            return;
        }
        if self.lifecycle != Lifecycle::Running {
            return;
        }

        log::info!("Destroying window and terminating windowing subsystem");
        self.window = None;
        self.platform.terminate();
        self.lifecycle = Lifecycle::Terminated;
    }

    /// Set the close-request flag; the next [`Context::tick`] returns `false` while it is set
    pub fn set_should_close(&mut self, should_close: bool) {
        self.close_requested = should_close;
    }

    /// Whether the close-request flag is set
    pub const fn should_close(&self) -> bool {
        self.close_requested
    }

    /// Why the last tick stopped the loop, if it did
    pub const fn stop_reason(&self) -> Option<StopReason> {
        self.stop_reason
    }

    /// Whether `init` succeeded and `terminate` has not run yet
    pub fn is_initialized(&self) -> bool {
        self.lifecycle == Lifecycle::Running
    }

    /// The active window, once initialized
    pub const fn window(&self) -> Option<&WindowHandle<P::Window>> {
        self.window.as_ref()
    }

    /// Mutable access to the active window, once initialized
    pub fn window_mut(&mut self) -> Option<&mut WindowHandle<P::Window>> {
        self.window.as_mut()
    }

    /// The configuration this context was created with
    pub const fn config(&self) -> &BootstrapConfig {
        &self.config
    }

    fn check_thread(&self) -> ContextResult<()> {
        let current = thread::current().id();
        match self.pinned_thread {
            Some(pinned) if pinned != current => Err(ContextError::WrongThread { pinned, current }),
            _ => Ok(()),
        }
    }
}

impl<P: Platform> Drop for Context<P> {
    fn drop(&mut self) {
        if self.lifecycle == Lifecycle::Running {
            self.terminate();
        }
    }
}
