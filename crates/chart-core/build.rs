// File: crates/chart-core/build.rs
// Summary: Build script linking the Windows system libraries Skia needs.

fn main() {
    #[cfg(target_os = "windows")]
    {
        // Skia's font manager reads the registry (RegOpenKeyExW and friends).
        println!("cargo:rustc-link-lib=advapi32");
    }
}
