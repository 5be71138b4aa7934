//! Construction of the git, native build and CMake invocations

use crate::config::{BootstrapConfig, NativeCommand};
use crate::domain::{DependencySpec, Platform};
use crate::runner::Invocation;
use std::ffi::OsString;
use std::path::Path;

/// `git clone -b <branch> [--depth 1] --recursive <url> <target>`
pub fn git_clone(dep: &DependencySpec, target: &Path, cwd: &Path) -> Invocation {
    let mut inv = Invocation::new("git", cwd).args(["clone", "-b", dep.branch.as_str()]);
    if !dep.full_clone {
        inv = inv.args(["--depth", "1"]);
    }
    inv.arg("--recursive").arg(dep.url.as_str()).path_arg(target)
}

/// `git pull` inside the dependency directory
pub fn git_pull(dep_dir: &Path) -> Invocation {
    Invocation::new("git", dep_dir).arg("pull")
}

/// `git submodule update --depth 1 --recursive` inside the dependency directory
pub fn git_submodule_update(dep_dir: &Path) -> Invocation {
    Invocation::new("git", dep_dir).args(["submodule", "update", "--depth", "1", "--recursive"])
}

/// The dependency's own build command
pub fn native_build(command: &NativeCommand, dep_dir: &Path) -> Invocation {
    let cwd = if command.subdir.is_empty() {
        dep_dir.to_path_buf()
    } else {
        dep_dir.join(&command.subdir)
    };
    Invocation::new(command.program.as_str(), cwd).args(command.args.iter().map(String::as_str))
}

/// CMake generator invocation, run from the project root
pub fn cmake_configure(config: &BootstrapConfig, platform: Platform, root: &Path) -> Invocation {
    let toolchain = platform.toolchain();
    let mut vendor_dir = OsString::from("-DVENDOR_DIR=");
    vendor_dir.push(config.vendor_dir());
    Invocation::new("cmake", root)
        .arg("-B")
        .path_arg(&config.build_dir())
        .args(["-G", config.generator.as_str()])
        .arg(vendor_dir)
        .arg(format!("-DCMAKE_BUILD_TYPE={}", config.build_type))
        .arg("-DCMAKE_EXPORT_COMPILE_COMMANDS=ON")
        .arg(format!("-DCMAKE_C_COMPILER={}", toolchain.c_compiler))
        .arg(format!("-DCMAKE_CXX_COMPILER={}", toolchain.cxx_compiler))
        .arg(format!("-DCMAKE_LINKER_TYPE={}", toolchain.linker_type))
}

/// `cmake --build <build dir>`, run from the project root
pub fn cmake_build(config: &BootstrapConfig, root: &Path) -> Invocation {
    Invocation::new("cmake", root)
        .arg("--build")
        .path_arg(&config.build_dir())
}
