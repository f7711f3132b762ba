//! Build script for detecting system dependencies and providing installation guidance.
//!
//! This script checks that OpenCV is installed and recent enough to ship
//! `FaceDetectorYN`, and that pkg-config is available.

use std::env;
use std::process::Command;

/// First OpenCV release with `cv::FaceDetectorYN`
const MIN_OPENCV_VERSION: (u32, u32, u32) = (4, 5, 4);

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Check for OpenCV
    check_opencv();

    // Check for pkg-config
    check_pkg_config();

    // Print detected environment
    println!(
        "cargo:rustc-env=BUILD_TARGET={}",
        env::var("TARGET").unwrap_or_default()
    );
    println!("cargo:rustc-env=BUILD_HOST={}", env::var("HOST").unwrap_or_default());
}

fn check_opencv() {
    println!("cargo:rerun-if-env-changed=PKG_CONFIG_PATH");
    println!("cargo:rerun-if-env-changed=OPENCV_LINK_PATHS");
    println!("cargo:rerun-if-env-changed=OPENCV_INCLUDE_PATHS");

    let version = ["opencv4", "opencv"].iter().find_map(|name| {
        let output = Command::new("pkg-config").args(["--modversion", name]).output().ok()?;
        if output.status.success() {
            Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
        } else {
            None
        }
    });

    match version {
        Some(version) => {
            println!("cargo:warning=Found OpenCV version: {}", version);
            match parse_version(&version) {
                Some(found) if found < MIN_OPENCV_VERSION => {
                    println!(
                        "cargo:warning=OpenCV {} lacks FaceDetectorYN; version {}.{}.{} or newer is required",
                        version, MIN_OPENCV_VERSION.0, MIN_OPENCV_VERSION.1, MIN_OPENCV_VERSION.2
                    );
                }
                Some(_) => {}
                None => println!("cargo:warning=Could not parse OpenCV version '{}'", version),
            }
        }
        None => {
            println!("cargo:warning=OpenCV not found via pkg-config. Make sure OpenCV is installed.");
            println!("cargo:warning=On Ubuntu: sudo apt-get install libopencv-dev");
            println!("cargo:warning=On macOS: brew install opencv");
        }
    }
}

fn parse_version(version: &str) -> Option<(u32, u32, u32)> {
    let mut parts = version.split('.').map(|p| p.parse::<u32>().ok());
    let major = parts.next()??;
    let minor = parts.next().flatten().unwrap_or(0);
    let patch = parts.next().flatten().unwrap_or(0);
    Some((major, minor, patch))
}

fn check_pkg_config() {
    let output = Command::new("pkg-config").arg("--version").output();

    match output {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout);
            println!("cargo:warning=Found pkg-config version: {}", version.trim());
        }
        _ => {
            println!("cargo:warning=pkg-config not found. This is required to find system libraries.");
            println!("cargo:warning=On Ubuntu: sudo apt-get install pkg-config");
            println!("cargo:warning=On macOS: brew install pkg-config");
        }
    }
}
