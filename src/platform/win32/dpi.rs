#![allow(unsafe_code)]

use std::sync::Once;

use windows::Win32::{
    Graphics::Gdi::HMONITOR,
    UI::HiDpi::{
        GetDpiForMonitor, GetDpiForSystem, SetProcessDpiAwarenessContext,
        DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2, MDT_EFFECTIVE_DPI,
    },
};

use crate::shell::geometry::BASE_DPI;

static INIT: Once = Once::new();

/// Opt into Per-Monitor v2 DPI awareness, so WM_DPICHANGED is delivered.
/// MUST run before the first window is created; later calls are no-ops.
pub(crate) fn init() {
    INIT.call_once(|| {
        // SAFETY: Runs once, before any window creation in this process.
        // Fails harmlessly if a manifest already set the awareness.
        unsafe {
            let _ = SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2);
        }
    });
}

/// Effective (x, y) DPI of `monitor`. Falls back to BASE_DPI (96) on failure.
pub(crate) fn get_for_monitor(monitor: HMONITOR) -> (u32, u32) {
    let (mut x, mut y) = (0u32, 0u32);
    // SAFETY: monitor is a valid HMONITOR returned by MonitorFromRect/Window;
    // x and y are valid out-pointers for the duration of the call.
    match unsafe { GetDpiForMonitor(monitor, MDT_EFFECTIVE_DPI, &mut x, &mut y) } {
        Ok(()) if x != 0 && y != 0 => (x, y),
        _ => (BASE_DPI, BASE_DPI),
    }
}

/// Return the primary-monitor system DPI. Used before window creation.
pub(crate) fn get_system_dpi() -> u32 {
    // SAFETY: GetDpiForSystem takes no parameters and always succeeds on Win10+.
    let v = unsafe { GetDpiForSystem() };
    if v == 0 {
        BASE_DPI
    } else {
        v
    }
}
