//! Target platform definitions and per-platform toolchain selection

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Host platforms the bootstrapper knows how to drive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Linux and other Unix-like hosts
    Linux,
    /// macOS
    #[serde(rename = "macos")]
    MacOs,
    /// Windows (MSVC environment)
    Windows,
}

/// Compiler and linker identifiers handed to the CMake generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toolchain {
    /// Value for CMAKE_C_COMPILER
    pub c_compiler: &'static str,
    /// Value for CMAKE_CXX_COMPILER
    pub cxx_compiler: &'static str,
    /// Value for CMAKE_LINKER_TYPE
    pub linker_type: &'static str,
}

impl Platform {
    /// Returns the platform this binary was compiled for
    pub fn host() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Linux
        }
    }

    /// Returns true for Windows
    pub fn is_windows(&self) -> bool {
        matches!(self, Platform::Windows)
    }

    /// Returns the compiler/linker pair used when configuring
    pub fn toolchain(&self) -> Toolchain {
        match self {
            Platform::Windows => Toolchain {
                c_compiler: "clang-cl",
                cxx_compiler: "clang-cl",
                linker_type: "LLD",
            },
            Platform::Linux | Platform::MacOs => Toolchain {
                c_compiler: "clang",
                cxx_compiler: "clang++",
                linker_type: "LLD",
            },
        }
    }

    /// Returns the display name for this platform
    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Linux => "Linux",
            Platform::MacOs => "macOS",
            Platform::Windows => "Windows",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Platform {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linux" | "unix" => Ok(Platform::Linux),
            "macos" | "darwin" | "osx" => Ok(Platform::MacOs),
            "windows" | "win" | "win32" => Ok(Platform::Windows),
            _ => Err(ConfigError::InvalidPlatform {
                value: s.to_string(),
            }),
        }
    }
}
