//! # GL Bootstrap
//!
//! A minimal bootstrap library for OpenGL applications built on GLFW.
//!
//! It initializes GLFW and the GL function loader, owns exactly one hidden
//! window with a current OpenGL 3.2 core context, and drives the per-frame
//! loop. It is glue, not a renderer: everything drawn in between ticks is
//! plain `gl::*` calls made by the application.
//!
//! All calls must happen on the thread that ran [`Context::init`]; that thread
//! is pinned for the lifetime of the context and off-thread calls are rejected
//! with [`ContextError::WrongThread`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gl_bootstrap::{BootstrapConfig, Context};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut context = Context::glfw(BootstrapConfig::default());
//!     context.init()?;
//!
//!     // Set up GL state and render the first frame before showing the window.
//!     context.tick();
//!     if let Some(window) = context.window_mut() {
//!         window.show();
//!     }
//!
//!     while context.tick() {
//!         // update and render
//!     }
//!     if let Some(err) = context.get_error() {
//!         return Err(err.into());
//!     }
//!     context.terminate();
//!     Ok(())
//! }
//! ```

#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

pub mod backend;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod window;

pub use backend::glfw::{GlfwPlatform, GlfwWindow};
pub use backend::{Platform, WindowBackend};
pub use config::{
    BootstrapConfig, Config, ConfigError, ConfigFormat, ContextRequest, GlProfile, WindowConfig,
};
pub use context::{drain_spurious_invalid_enum, Context, StopReason};
pub use error::{ContextError, ContextResult, GlError};
pub use window::WindowHandle;
