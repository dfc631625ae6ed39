use std::env;
use std::path::PathBuf;

// ffmpeg-next links against system FFmpeg. On Windows that usually comes
// from vcpkg, and discovery is fragile unless FFMPEG_DIR points at it.
fn main() {
    for var in ["FFMPEG_DIR", "VCPKG_ROOT", "VCPKGRS_TRIPLET"] {
        println!("cargo:rerun-if-env-changed={var}");
    }

    if env::var("CARGO_CFG_TARGET_OS").unwrap_or_default() != "windows"
        || env::var_os("FFMPEG_DIR").is_some()
    {
        return;
    }

    let Ok(vcpkg_root) = env::var("VCPKG_ROOT") else {
        println!("cargo:warning=framepick: set FFMPEG_DIR to an FFmpeg install (e.g. from vcpkg)");
        return;
    };

    let triplet = env::var("VCPKGRS_TRIPLET").unwrap_or_else(|_| "x64-windows".to_string());
    let candidate = PathBuf::from(vcpkg_root).join("installed").join(triplet);
    if candidate.exists() {
        println!(
            "cargo:warning=framepick: found FFmpeg at {}; set FFMPEG_DIR to it",
            candidate.display()
        );
    } else {
        println!(
            "cargo:warning=framepick: no FFmpeg under {}",
            candidate.display()
        );
    }
}
