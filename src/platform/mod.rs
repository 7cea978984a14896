// ── Platform layer ────────────────────────────────────────────────────────────
//
// The native implementation of `shell::dispatch::NativeWindow`.  All Win32 FFI
// is confined to the `win32` sub-module and never leaks outward beyond the
// `Window` handle type.

#[cfg(windows)]
pub mod win32;
