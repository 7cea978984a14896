// ── Win32 platform implementation ─────────────────────────────────────────────
//
// This is one of exactly two modules in the codebase where `unsafe` code is
// permitted (the other is `browser::edge`).  Every `unsafe` block MUST carry a
// `// SAFETY:` comment that states:
//   • which invariant makes the operation sound, and
//   • what the caller is responsible for maintaining.
//
// Nothing in this module is `pub` beyond what callers genuinely need; keep the
// unsafe surface as small as possible.

#![allow(unsafe_code)]

// ── Sub-modules ───────────────────────────────────────────────────────────────

pub mod window; // top-level window, WndProc, message loop

pub(crate) mod dpi; // per-monitor DPI v2 helpers

// ── Constant cross-check ──────────────────────────────────────────────────────
//
// The portable shell carries its own copies of the message numbers so it can
// be tested off Windows.  Keep them honest against the SDK bindings.

use windows::Win32::UI::WindowsAndMessaging as wam;

use crate::shell::messages as m;

const _: () = {
    assert!(m::WM_DESTROY == wam::WM_DESTROY);
    assert!(m::WM_MOVE == wam::WM_MOVE);
    assert!(m::WM_SIZE == wam::WM_SIZE);
    assert!(m::WM_ACTIVATE == wam::WM_ACTIVATE);
    assert!(m::WM_CLOSE == wam::WM_CLOSE);
    assert!(m::WM_SETTINGCHANGE == wam::WM_SETTINGCHANGE);
    assert!(m::WM_NCCALCSIZE == wam::WM_NCCALCSIZE);
    assert!(m::WM_NCLBUTTONDOWN == wam::WM_NCLBUTTONDOWN);
    assert!(m::WM_MOVING == wam::WM_MOVING);
    assert!(m::WM_POWERBROADCAST == wam::WM_POWERBROADCAST);
    assert!(m::WM_DPICHANGED == wam::WM_DPICHANGED);
    assert!(m::WM_APP == wam::WM_APP);

    assert!(m::SIZE_RESTORED == wam::SIZE_RESTORED as usize);
    assert!(m::SIZE_MINIMIZED == wam::SIZE_MINIMIZED as usize);
    assert!(m::SIZE_MAXIMIZED == wam::SIZE_MAXIMIZED as usize);

    assert!(m::SWP_NOZORDER == wam::SWP_NOZORDER.0);
    assert!(m::SWP_NOACTIVATE == wam::SWP_NOACTIVATE.0);

    assert!(m::HTLEFT == wam::HTLEFT);
    assert!(m::HTRIGHT == wam::HTRIGHT);
    assert!(m::HTTOP == wam::HTTOP);
    assert!(m::HTTOPLEFT == wam::HTTOPLEFT);
    assert!(m::HTTOPRIGHT == wam::HTTOPRIGHT);
    assert!(m::HTBOTTOM == wam::HTBOTTOM);
    assert!(m::HTBOTTOMLEFT == wam::HTBOTTOMLEFT);
    assert!(m::HTBOTTOMRIGHT == wam::HTBOTTOMRIGHT);
};
