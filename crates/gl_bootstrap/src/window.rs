//! High-level window handle for applications
//!
//! The context owns the one window; applications borrow it through
//! [`Context::window`](crate::Context::window) to show it once the first
//! frame is ready, to query or raise its close signal, and to read its size
//! for the viewport.

use crate::backend::WindowBackend;

/// The active window of the process
pub struct WindowHandle<W: WindowBackend> {
    backend: W,
}

impl<W: WindowBackend> WindowHandle<W> {
    pub(crate) const fn new(backend: W) -> Self {
        Self { backend }
    }

    /// Make the window visible
    pub fn show(&mut self) {
        self.backend.show();
    }

    /// Hide the window
    pub fn hide(&mut self) {
        self.backend.hide();
    }

    /// Whether the window is visible
    pub fn is_visible(&self) -> bool {
        self.backend.is_visible()
    }

    /// Check if the window should close
    pub fn should_close(&self) -> bool {
        self.backend.should_close()
    }

    /// Set whether the window should close
    pub fn set_should_close(&mut self, should_close: bool) {
        self.backend.set_should_close(should_close);
    }

    /// Get the current window size in screen coordinates
    pub fn get_size(&self) -> (u32, u32) {
        self.backend.get_size()
    }

    /// Set the window size in screen coordinates
    pub fn set_size(&mut self, width: u32, height: u32) {
        self.backend.set_size(width, height);
    }

    /// Get the framebuffer size in pixels, for `glViewport`
    pub fn get_framebuffer_size(&self) -> (u32, u32) {
        self.backend.get_framebuffer_size()
    }

    /// Set the window title
    pub fn set_title(&mut self, title: &str) {
        self.backend.set_title(title);
    }

    /// Borrow the backend window
    pub const fn backend(&self) -> &W {
        &self.backend
    }

    /// Mutably borrow the backend window
    pub fn backend_mut(&mut self) -> &mut W {
        &mut self.backend
    }

    pub(crate) fn swap_buffers(&mut self) {
        self.backend.swap_buffers();
    }
}
