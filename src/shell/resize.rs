// ── Drag-resize from custom edges ─────────────────────────────────────────────
//
// A frameless window has no OS-drawn border to grab.  Pages draw their own
// edge regions and call `start_resize` on mouse-down; posting
// WM_NCLBUTTONDOWN with the matching hit-test code hands the drag to the OS
// resize loop.

use super::{
    dispatch::NativeWindow,
    messages::{
        HTBOTTOM, HTBOTTOMLEFT, HTBOTTOMRIGHT, HTLEFT, HTNOWHERE, HTRIGHT, HTTOP, HTTOPLEFT,
        HTTOPRIGHT,
    },
};
use crate::error::{EdgeFrameError, Result};

/// Logical edge name → non-client hit-test code.
pub const EDGES: [(&str, u32); 8] = [
    ("top", HTTOP),
    ("top-right", HTTOPRIGHT),
    ("right", HTRIGHT),
    ("bottom-right", HTBOTTOMRIGHT),
    ("bottom", HTBOTTOM),
    ("bottom-left", HTBOTTOMLEFT),
    ("left", HTLEFT),
    ("top-left", HTTOPLEFT),
];

/// Hit-test code for `edge`; `HTNOWHERE` (0) for names not in the table.
pub fn hit_test_code(edge: &str) -> u32 {
    EDGES
        .iter()
        .find(|(name, _)| *name == edge)
        .map_or(HTNOWHERE, |&(_, code)| code)
}

/// Begin an OS drag-resize from `edge`.  An unknown edge is not an error: the
/// posted message carries `HTNOWHERE` and nothing resizes.
pub fn start_resize(window: &impl NativeWindow, edge: &str) -> Result<()> {
    let code = hit_test_code(edge);
    if !window.release_capture() {
        return Err(EdgeFrameError::CaptureRelease);
    }
    window.post_nc_left_button_down(code);
    Ok(())
}
