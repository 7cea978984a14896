/// edgeframe build script.
///
/// The window and WebView2 host only exist on Windows. Other targets still
/// build the portable shell (geometry, message policy, browser wrapper) so the
/// unit tests run anywhere; say so once instead of failing.
fn main() {
    let target_os = std::env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    if target_os != "windows" {
        println!(
            "cargo:warning=edgeframe: building portable core only \
             (CARGO_CFG_TARGET_OS = {target_os:?}); no native window is available"
        );
    }

    // Only re-run the build script when it changes.
    println!("cargo:rerun-if-changed=build.rs");
}
