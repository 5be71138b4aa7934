//! Bootstrap configuration
//!
//! Reads configuration from (in priority order):
//! - the file passed with --config
//! - bootstrap.toml in the project root
//! - built-in defaults
//!
//! Every key is optional; missing keys fall back to the defaults below.

use crate::domain::{DependencySpec, Platform};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

/// Name of the configuration file looked up in the project root
pub const CONFIG_FILENAME: &str = "bootstrap.toml";

/// Complete bootstrap configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Directory (relative to the project root) holding everything generated
    pub build_root: String,
    /// Sub-directory of build_root receiving the cloned dependencies
    pub vendor_subdir: String,
    /// CMAKE_BUILD_TYPE, also the name of the build directory
    pub build_type: String,
    /// CMake generator
    pub generator: String,
    /// Dependencies, in clone order
    #[serde(rename = "dependency")]
    pub dependencies: Vec<DependencySpec>,
    /// Native pre-build of one dependency
    pub native_build: NativeBuild,
}

/// Native build of a vendored dependency before CMake runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeBuild {
    /// Set to false to skip the native build entirely
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Name of the dependency to build
    #[serde(default = "default_native_dependency")]
    pub dependency: String,
    /// Command used on Linux and macOS
    #[serde(default = "NativeCommand::unix_default")]
    pub unix: NativeCommand,
    /// Command used on Windows
    #[serde(default = "NativeCommand::windows_default")]
    pub windows: NativeCommand,
}

/// Platform-specific native build command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCommand {
    /// Working directory, relative to the dependency directory
    #[serde(default)]
    pub subdir: String,
    /// Program to run
    pub program: String,
    /// Arguments
    #[serde(default)]
    pub args: Vec<String>,
    /// Expected static library, relative to the dependency directory
    pub artifact: String,
}

fn default_true() -> bool {
    true
}

fn default_native_dependency() -> String {
    "luajit".to_string()
}

impl NativeCommand {
    /// `make -j` producing src/libluajit.a
    pub fn unix_default() -> Self {
        Self {
            subdir: String::new(),
            program: "make".to_string(),
            args: vec!["-j".to_string()],
            artifact: "src/libluajit.a".to_string(),
        }
    }

    /// `msvcbuild.bat static` producing src/lua51.lib
    pub fn windows_default() -> Self {
        Self {
            subdir: "src".to_string(),
            program: "cmd".to_string(),
            args: vec![
                "/C".to_string(),
                "msvcbuild.bat".to_string(),
                "static".to_string(),
            ],
            artifact: "src/lua51.lib".to_string(),
        }
    }
}

impl Default for NativeBuild {
    fn default() -> Self {
        Self {
            enabled: true,
            dependency: default_native_dependency(),
            unix: NativeCommand::unix_default(),
            windows: NativeCommand::windows_default(),
        }
    }
}

impl NativeBuild {
    /// Returns the command for the given platform
    pub fn command_for(&self, platform: Platform) -> &NativeCommand {
        if platform.is_windows() {
            &self.windows
        } else {
            &self.unix
        }
    }
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            build_root: ".build".to_string(),
            vendor_subdir: "3rdparty".to_string(),
            build_type: "Debug".to_string(),
            generator: "Ninja".to_string(),
            dependencies: default_dependencies(),
            native_build: NativeBuild::default(),
        }
    }
}

/// The dependency set of the project this tool was written for
pub fn default_dependencies() -> Vec<DependencySpec> {
    vec![
        DependencySpec::new("SDL", "https://github.com/libsdl-org/SDL.git", "main"),
        DependencySpec::new("glad", "https://github.com/Dav1dde/glad.git", "glad2"),
        DependencySpec::new("imgui", "https://github.com/ocornut/imgui.git", "docking"),
        DependencySpec::new("glm", "https://github.com/g-truc/glm.git", "master"),
        DependencySpec::new("sol2", "https://github.com/ThePhD/sol2.git", "develop"),
        // luajit derives its version from git history
        DependencySpec::new("luajit", "https://luajit.org/git/luajit.git", "v2.1")
            .with_full_clone(true),
    ]
}

impl BootstrapConfig {
    /// Load the configuration for a project
    ///
    /// An explicit path must exist. Without one, `bootstrap.toml` in `root`
    /// is used when present, otherwise the defaults.
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::not_found(path));
                }
                path.to_path_buf()
            }
            None => {
                let candidate = root.join(CONFIG_FILENAME);
                if !candidate.exists() {
                    tracing::debug!("no {} found, using defaults", CONFIG_FILENAME);
                    return Ok(Self::default());
                }
                candidate
            }
        };

        let content =
            std::fs::read_to_string(&path).map_err(|e| ConfigError::read_error(&path, e))?;
        tracing::debug!(path = %path.display(), "loading configuration");
        Self::from_toml_str(&content, &path)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: BootstrapConfig =
            toml::from_str(content).map_err(|e| ConfigError::toml_parse_error(path, e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the bootstrapper relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.build_type.trim().is_empty() {
            return Err(ConfigError::EmptyBuildType);
        }
        if !is_directory_name(&self.build_type) {
            return Err(ConfigError::not_a_directory_name("build type", &self.build_type));
        }
        if self.dependencies.is_empty() {
            return Err(ConfigError::NoDependencies);
        }

        let mut seen = HashSet::new();
        for dep in &self.dependencies {
            if dep.name.trim().is_empty() {
                return Err(ConfigError::empty_field("<unnamed>", "name"));
            }
            if !is_directory_name(&dep.name) {
                return Err(ConfigError::not_a_directory_name("dependency name", &dep.name));
            }
            if dep.url.trim().is_empty() {
                return Err(ConfigError::empty_field(&dep.name, "url"));
            }
            if dep.branch.trim().is_empty() {
                return Err(ConfigError::empty_field(&dep.name, "branch"));
            }
            if !seen.insert(dep.name.as_str()) {
                return Err(ConfigError::DuplicateDependency {
                    name: dep.name.clone(),
                });
            }
        }

        if self.native_build.enabled && !seen.contains(self.native_build.dependency.as_str()) {
            return Err(ConfigError::UnknownNativeDependency {
                name: self.native_build.dependency.clone(),
            });
        }

        Ok(())
    }

    /// Vendor directory relative to the project root
    pub fn vendor_dir(&self) -> PathBuf {
        Path::new(&self.build_root).join(&self.vendor_subdir)
    }

    /// Build output directory relative to the project root
    pub fn build_dir(&self) -> PathBuf {
        Path::new(&self.build_root).join(&self.build_type)
    }

    /// Returns the dependency the native build targets, if enabled
    pub fn native_dependency(&self) -> Option<&DependencySpec> {
        if !self.native_build.enabled {
            return None;
        }
        self.dependencies
            .iter()
            .find(|d| d.name == self.native_build.dependency)
    }
}

/// True if `name` is exactly one normal path component (no separators, `.` or `..`)
fn is_directory_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(first)), None) if first == name
    )
}
