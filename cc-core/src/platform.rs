//! Platform detection and OS-specific directories.

use std::path::PathBuf;
use crate::error::{CcError, CcResult};

/// Detected operating system platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
}

impl Platform {
    /// Detect the current platform at compile time.
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Linux
        }
    }

    /// Get the platform-specific application data directory.
    ///
    /// - Windows: `%APPDATA%/CandyChipaws`
    /// - macOS: `~/Library/Application Support/CandyChipaws`
    /// - Linux: `~/.local/share/CandyChipaws`
    pub fn data_dir() -> CcResult<PathBuf> {
        let base = dirs::data_dir()
            .ok_or_else(|| CcError::Config("could not determine data directory".into()))?;
        Ok(base.join("CandyChipaws"))
    }

    /// Get the platform-specific configuration directory.
    pub fn config_dir() -> CcResult<PathBuf> {
        let base = dirs::config_dir()
            .ok_or_else(|| CcError::Config("could not determine config directory".into()))?;
        Ok(base.join("CandyChipaws"))
    }

    /// Get a human-readable platform name.
    pub fn name(&self) -> &'static str {
        match self {
            Platform::Windows => "Windows",
            Platform::MacOs => "macOS",
            Platform::Linux => "Linux",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
