//! Error types for the bootstrap lifecycle
//!
//! Every failure is returned to the immediate caller. The frame loop keeps the
//! error that stopped it in a one-slot holding area so it can be read back with
//! [`Context::get_error`](crate::Context::get_error) after the loop exits.

use std::fmt;
use std::thread::ThreadId;
use thiserror::Error;

use crate::config::ConfigError;

/// `GL_TABLE_TOO_LARGE` from `ARB_imaging`; not part of the core loader bindings.
const GL_TABLE_TOO_LARGE: u32 = 0x8031;

/// Human readable names for the error codes `glGetError` can return.
const GL_ERROR_STRINGS: &[(u32, &str)] = &[
    (gl::INVALID_ENUM, "invalid enumerant"),
    (gl::INVALID_VALUE, "invalid value"),
    (gl::INVALID_OPERATION, "invalid operation"),
    (gl::STACK_OVERFLOW, "stack overflow"),
    (gl::STACK_UNDERFLOW, "stack underflow"),
    (gl::OUT_OF_MEMORY, "out of memory"),
    (gl::INVALID_FRAMEBUFFER_OPERATION, "invalid framebuffer operation"),
    (gl::CONTEXT_LOST, "context lost"),
    (GL_TABLE_TOO_LARGE, "table too large"),
];

/// Look up the description of a GL error code
pub fn gl_error_string(code: u32) -> Option<&'static str> {
    GL_ERROR_STRINGS
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, message)| *message)
}

/// A nonzero code reported by `glGetError`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GlError {
    /// Raw `GLenum` error code
    pub code: u32,
}

impl GlError {
    /// Wrap a raw error code
    pub const fn new(code: u32) -> Self {
        Self { code }
    }

    /// Whether this is the `GL_INVALID_ENUM` code some loaders emit right after loading
    pub const fn is_invalid_enum(self) -> bool {
        self.code == gl::INVALID_ENUM
    }
}

impl fmt::Display for GlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match gl_error_string(self.code) {
            Some(message) => f.write_str(message),
            None => write!(f, "unknown OpenGL error 0x{:04X}", self.code),
        }
    }
}

impl std::error::Error for GlError {}

/// Errors produced by the bootstrap context
#[derive(Error, Debug)]
pub enum ContextError {
    /// The windowing subsystem could not be initialized
    #[error("could not initialise the windowing subsystem: {0}")]
    WindowingInit(String),

    /// The backend failed to create the window
    #[error("window creation failed: {0}")]
    WindowCreation(String),

    /// The GL function loader could not resolve the GL entry points
    #[error("could not initialise the OpenGL function loader")]
    LoaderInit,

    /// OpenGL reported an error
    #[error("OpenGL error: {0}")]
    Gl(#[from] GlError),

    /// A core call was made from a thread other than the one that ran `init`
    #[error("graphics call on thread {current:?}, but the context is pinned to {pinned:?}")]
    WrongThread {
        /// Thread that ran `init`
        pinned: ThreadId,
        /// Thread that made the offending call
        current: ThreadId,
    },

    /// `init` was called on a live context, or another context already owns the windowing subsystem
    #[error("context already initialized")]
    AlreadyInitialized,

    /// A frame was requested before a successful `init`
    #[error("context not initialized")]
    NotInitialized,

    /// A frame was requested after `terminate`
    #[error("context already terminated")]
    Terminated,

    /// Loading or saving configuration failed
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for bootstrap operations
pub type ContextResult<T> = Result<T, ContextError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes_are_translated() {
        assert_eq!(GlError::new(gl::INVALID_ENUM).to_string(), "invalid enumerant");
        assert_eq!(GlError::new(gl::OUT_OF_MEMORY).to_string(), "out of memory");
        assert_eq!(
            GlError::new(gl::INVALID_FRAMEBUFFER_OPERATION).to_string(),
            "invalid framebuffer operation"
        );
    }

    #[test]
    fn test_unknown_code_falls_back_to_number() {
        assert_eq!(GlError::new(0x1234).to_string(), "unknown OpenGL error 0x1234");
        assert!(gl_error_string(0).is_none());
    }

    #[test]
    fn test_invalid_enum_detection() {
        assert!(GlError::new(0x0500).is_invalid_enum());
        assert!(!GlError::new(0x0502).is_invalid_enum());
    }

    #[test]
    fn test_context_error_wraps_gl_message() {
        let err = ContextError::from(GlError::new(gl::INVALID_VALUE));
        assert_eq!(err.to_string(), "OpenGL error: invalid value");
    }
}
