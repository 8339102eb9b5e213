//! Collaborator seams for the windowing subsystem and GL loader
//!
//! The bootstrap core only sequences calls into these traits and interprets
//! their results. [`glfw`] holds the real implementation; tests drive the
//! core through a scripted double instead.
//!
//! ```text
//! ┌─────────────────────────────────┐
//! │     Context (init/tick/...)     │
//! └───────┬─────────────────┬───────┘
//!         │ owns            │ owns
//!   ┌─────▼──────┐   ┌──────▼────────┐
//!   │ Platform   │   │ WindowHandle  │
//!   │ trait      │   │ ─ WindowBackend│
//!   └─────┬──────┘   └──────┬────────┘
//!         │ implemented by  │
//!   ┌─────▼─────────────────▼───────┐
//!   │ GlfwPlatform / GlfwWindow     │
//!   └───────────────────────────────┘
//! ```

pub mod glfw;

#[cfg(test)]
pub(crate) mod mock;

use crate::config::{ContextRequest, WindowConfig};
use crate::error::ContextResult;

/// The single OS window and its GL context
///
/// Window operations must happen on the thread that created the window.
pub trait WindowBackend {
    /// Bind this window's GL context to the calling thread
    fn make_current(&mut self);

    /// Present the back buffer
    fn swap_buffers(&mut self);

    /// Make the window visible
    fn show(&mut self);

    /// Hide the window
    fn hide(&mut self);

    /// Whether the window is currently visible
    fn is_visible(&self) -> bool;

    /// Check if the window should close
    ///
    /// Returns true if the user has requested the window to close (clicked X button,
    /// pressed Alt+F4, etc.) or if the application has explicitly requested closure.
    fn should_close(&self) -> bool;

    /// Set whether the window should close
    fn set_should_close(&mut self, should_close: bool);

    /// Get the current window size in screen coordinates
    fn get_size(&self) -> (u32, u32);

    /// Set the window size in screen coordinates
    fn set_size(&mut self, width: u32, height: u32);

    /// Get the framebuffer size in pixels
    fn get_framebuffer_size(&self) -> (u32, u32);

    /// Set the window title text
    fn set_title(&mut self, title: &str);
}

/// The windowing subsystem together with the GL function loader
pub trait Platform {
    /// Window type created by this platform
    type Window: WindowBackend;

    /// Initialize the windowing subsystem
    ///
    /// # Errors
    /// Returns [`ContextError::WindowingInit`](crate::ContextError::WindowingInit)
    /// if the subsystem cannot start.
    fn init(&mut self) -> ContextResult<()>;

    /// Set the context creation hints used by the next `create_window`
    fn apply_context_request(&mut self, request: &ContextRequest);

    /// Create the window and its context
    ///
    /// # Errors
    /// Returns [`ContextError::WindowCreation`](crate::ContextError::WindowCreation)
    /// carrying the backend's own description when it reported one.
    fn create_window(&mut self, config: &WindowConfig) -> ContextResult<Self::Window>;

    /// Set the swap interval for the current context
    fn set_swap_interval(&mut self, interval: u32);

    /// Resolve the GL entry points through the window's current context
    ///
    /// # Errors
    /// Returns [`ContextError::LoaderInit`](crate::ContextError::LoaderInit)
    /// if the entry points could not be resolved.
    fn load_gl(&mut self, window: &mut Self::Window) -> ContextResult<()>;

    /// Read and clear the GL error flag; zero means no error
    fn poll_gl_error(&mut self) -> u32;

    /// Process pending window system events and return
    fn poll_events(&mut self);

    /// Shut the windowing subsystem down
    fn terminate(&mut self);
}
