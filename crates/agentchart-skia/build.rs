// File: crates/agentchart-skia/build.rs
// Summary: Links advapi32 on Windows targets; Skia's font manager reads the registry.

fn main() {
    // cfg!(target_os) would describe the build host here, not the target
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("windows") {
        println!("cargo:rustc-link-lib=advapi32");
    }
}
