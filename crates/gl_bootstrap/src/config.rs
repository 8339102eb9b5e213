//! Configuration system
//!
//! The bootstrap configuration is a plain value consumed once by
//! [`Context::init`](crate::Context::init). Defaults match the documented
//! startup contract: a hidden 800x600 window with an OpenGL 3.2 forward
//! compatible core context and vsync enabled.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// On-disk formats a configuration can be stored in, picked by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.toml`
    Toml,
    /// `.ron`
    Ron,
}

impl ConfigFormat {
    /// Determine the format from the path's extension
    ///
    /// # Errors
    /// Returns [`ConfigError::UnsupportedFormat`] for any other extension.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Settings that can be read from and written to a `.toml` or `.ron` file
pub trait Config: Serialize + for<'de> Deserialize<'de> {
    /// Load configuration from file
    ///
    /// # Errors
    /// Fails if the extension is unknown, the file cannot be read, or its contents do not parse.
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let contents = std::fs::read_to_string(path)?;

        match format {
            ConfigFormat::Toml => toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            ConfigFormat::Ron => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
        }
    }

    /// Save configuration to file
    ///
    /// # Errors
    /// Fails if the extension is unknown, serialization fails, or the file cannot be written.
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match ConfigFormat::from_path(path)? {
            ConfigFormat::Toml => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
            }
            ConfigFormat::Ron => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
        };

        std::fs::write(path, contents)?;
        Ok(())
    }
}

/// Failures reading or writing a configuration file
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// The file could not be read or written
    #[error("config file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The contents did not parse as the expected settings
    #[error("invalid config: {0}")]
    Parse(String),

    /// The settings could not be serialized
    #[error("could not serialize config: {0}")]
    Serialize(String),

    /// The file extension is neither `.toml` nor `.ron`
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),
}

/// OpenGL profile requested for the context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GlProfile {
    /// Core profile, deprecated functionality removed
    Core,
    /// Compatibility profile
    Compatibility,
    /// Let the driver decide
    Any,
}

/// Requested context attributes
///
/// These are hints: the driver may hand back a different but compatible
/// context. The request is consumed by `init` and not kept afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextRequest {
    /// Requested major version
    pub major: u32,
    /// Requested minor version
    pub minor: u32,
    /// Request a forward compatible context
    pub forward_compatible: bool,
    /// Requested profile
    pub profile: GlProfile,
}

impl Default for ContextRequest {
    fn default() -> Self {
        Self {
            major: 3,
            minor: 2,
            forward_compatible: true,
            profile: GlProfile::Core,
        }
    }
}

/// Window configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window title
    pub title: String,

    /// Window width
    pub width: u32,

    /// Window height
    pub height: u32,

    /// Whether the window is shown on creation
    pub visible: bool,

    /// Whether window is resizable
    pub resizable: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "GL Bootstrap".to_string(),
            width: 800,
            height: 600,
            visible: false,
            resizable: true,
        }
    }
}

/// Everything `init` needs to bring up the window and context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Window configuration
    pub window: WindowConfig,

    /// Context attributes requested from the driver
    pub context: ContextRequest,

    /// Vertical sync intervals between buffer swaps
    pub swap_interval: u32,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            context: ContextRequest::default(),
            swap_interval: 1,
        }
    }
}

impl BootstrapConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the window title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.window.title = title.into();
        self
    }

    /// Set the window size in screen coordinates
    #[must_use]
    pub const fn with_size(mut self, width: u32, height: u32) -> Self {
        self.window.width = width;
        self.window.height = height;
        self
    }

    /// Set the requested context attributes
    #[must_use]
    pub const fn with_context(mut self, context: ContextRequest) -> Self {
        self.context = context;
        self
    }

    /// Set the swap interval (0 disables vsync)
    #[must_use]
    pub const fn with_swap_interval(mut self, interval: u32) -> Self {
        self.swap_interval = interval;
        self
    }
}

impl Config for BootstrapConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_context_request() {
        let request = ContextRequest::default();
        assert_eq!((request.major, request.minor), (3, 2));
        assert!(request.forward_compatible);
        assert_eq!(request.profile, GlProfile::Core);
    }

    #[test]
    fn test_default_window_is_hidden_800x600() {
        let config = BootstrapConfig::new();
        assert_eq!((config.window.width, config.window.height), (800, 600));
        assert!(!config.window.visible);
        assert_eq!(config.swap_interval, 1);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: BootstrapConfig = toml::from_str(
            r#"
            swap_interval = 0

            [window]
            title = "Custom"
            width = 1024
            height = 768
            visible = true
            resizable = false
            "#,
        )
        .unwrap();

        assert_eq!(config.window.title, "Custom");
        assert_eq!(config.swap_interval, 0);
        assert_eq!(config.context, ContextRequest::default());
    }

    #[test]
    fn test_load_ron_file() {
        let path = std::env::temp_dir().join(format!("gl_bootstrap_{}.ron", std::process::id()));
        let config = BootstrapConfig::new().with_title("From file").with_size(640, 480);

        config.save_to_file(&path).unwrap();
        let loaded = BootstrapConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_unsupported_extension() {
        let err = BootstrapConfig::new().save_to_file("settings.json").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ConfigFormat::from_path(Path::new("a/b.toml")).unwrap(), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path(Path::new("b.ron")).unwrap(), ConfigFormat::Ron);
        assert!(ConfigFormat::from_path(Path::new("toml")).is_err());
    }

    #[test]
    fn test_bad_contents_is_parse_error() {
        let path = std::env::temp_dir().join(format!("gl_bootstrap_bad_{}.toml", std::process::id()));
        std::fs::write(&path, "swap_interval = \"fast\"").unwrap();

        let err = BootstrapConfig::load_from_file(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
