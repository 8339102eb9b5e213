//! Scripted platform double for lifecycle tests

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use super::{Platform, WindowBackend};
use crate::config::{ContextRequest, WindowConfig};
use crate::error::{ContextError, ContextResult};

/// Shared record of every call the core made, plus scripted failures
#[derive(Debug, Default)]
pub(crate) struct MockState {
    pub fail_init: bool,
    pub fail_create: Option<String>,
    pub fail_loader: bool,
    /// Codes returned by successive `poll_gl_error` calls; zero once empty
    pub gl_errors: VecDeque<u32>,

    pub init_calls: usize,
    pub requested: Option<ContextRequest>,
    pub created: Option<WindowConfig>,
    pub make_current_calls: usize,
    pub swap_interval: Option<u32>,
    pub loader_calls: usize,
    pub gl_error_polls: usize,
    pub swaps: usize,
    pub polls: usize,
    pub windows_destroyed: usize,
    pub terminate_calls: usize,

    pub visible: bool,
    pub window_should_close: bool,
}

pub(crate) type SharedState = Arc<Mutex<MockState>>;

pub(crate) fn lock(state: &SharedState) -> MutexGuard<'_, MockState> {
    state.lock().unwrap()
}

pub(crate) struct MockPlatform {
    state: SharedState,
}

impl MockPlatform {
    pub fn scripted() -> (Self, SharedState) {
        let state = SharedState::default();
        (Self { state: Arc::clone(&state) }, state)
    }
}

impl Platform for MockPlatform {
    type Window = MockWindow;

    fn init(&mut self) -> ContextResult<()> {
        let mut state = lock(&self.state);
        state.init_calls += 1;
        if state.fail_init {
            return Err(ContextError::WindowingInit("no display".to_string()));
        }
        Ok(())
    }

    fn apply_context_request(&mut self, request: &ContextRequest) {
        lock(&self.state).requested = Some(*request);
    }

    fn create_window(&mut self, config: &WindowConfig) -> ContextResult<MockWindow> {
        let mut state = lock(&self.state);
        if let Some(reason) = state.fail_create.clone() {
            return Err(ContextError::WindowCreation(reason));
        }
        state.created = Some(config.clone());
        state.visible = config.visible;
        Ok(MockWindow {
            state: Arc::clone(&self.state),
            size: (config.width, config.height),
        })
    }

    fn set_swap_interval(&mut self, interval: u32) {
        lock(&self.state).swap_interval = Some(interval);
    }

    fn load_gl(&mut self, _window: &mut MockWindow) -> ContextResult<()> {
        let mut state = lock(&self.state);
        state.loader_calls += 1;
        if state.fail_loader {
            return Err(ContextError::LoaderInit);
        }
        Ok(())
    }

    fn poll_gl_error(&mut self) -> u32 {
        let mut state = lock(&self.state);
        state.gl_error_polls += 1;
        state.gl_errors.pop_front().unwrap_or(gl::NO_ERROR)
    }

    fn poll_events(&mut self) {
        lock(&self.state).polls += 1;
    }

    fn terminate(&mut self) {
        lock(&self.state).terminate_calls += 1;
    }
}

pub(crate) struct MockWindow {
    state: SharedState,
    size: (u32, u32),
}

impl WindowBackend for MockWindow {
    fn make_current(&mut self) {
        lock(&self.state).make_current_calls += 1;
    }

    fn swap_buffers(&mut self) {
        lock(&self.state).swaps += 1;
    }

    fn show(&mut self) {
        lock(&self.state).visible = true;
    }

    fn hide(&mut self) {
        lock(&self.state).visible = false;
    }

    fn is_visible(&self) -> bool {
        lock(&self.state).visible
    }

    fn should_close(&self) -> bool {
        lock(&self.state).window_should_close
    }

    fn set_should_close(&mut self, should_close: bool) {
        lock(&self.state).window_should_close = should_close;
    }

    fn get_size(&self) -> (u32, u32) {
        self.size
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    fn get_framebuffer_size(&self) -> (u32, u32) {
        self.size
    }

    fn set_title(&mut self, _title: &str) {}
}

impl Drop for MockWindow {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.lock() {
            state.windows_destroyed += 1;
        }
    }
}
