// ── Window message constants and decoding ─────────────────────────────────────
//
// Source of truth: WinUser.h / pbt.h.  Only the subset the dispatcher reacts to
// is listed here.  The platform layer checks these against the `windows` crate
// at compile time, so the portable shell can be tested on any host.

use super::geometry::Rect;

// ── Messages ──────────────────────────────────────────────────────────────────

pub const WM_DESTROY: u32 = 0x0002;
pub const WM_MOVE: u32 = 0x0003;
/// WPARAM = `SIZE_*` kind; LPARAM = packed client width/height.
pub const WM_SIZE: u32 = 0x0005;
pub const WM_ACTIVATE: u32 = 0x0006;
pub const WM_CLOSE: u32 = 0x0010;
pub const WM_SETTINGCHANGE: u32 = 0x001A;
/// WPARAM != 0: LPARAM = `NCCALCSIZE_PARAMS*`, whose first member is the
/// proposed window rectangle.  WPARAM == 0: LPARAM = `RECT*`.
pub const WM_NCCALCSIZE: u32 = 0x0083;
/// WPARAM = hit-test code.
pub const WM_NCLBUTTONDOWN: u32 = 0x00A1;
pub const WM_MOVING: u32 = 0x0216;
/// WPARAM = `PBT_*` event.
pub const WM_POWERBROADCAST: u32 = 0x0218;
/// LPARAM = `RECT*` with the suggested new window rectangle.
pub const WM_DPICHANGED: u32 = 0x02E0;
pub const WM_APP: u32 = 0x8000;

/// Private message posted by `Window::quit`; safe to post from any thread.
pub const WM_APP_QUIT: u32 = WM_APP + 1;
/// Private message that retries handing a parked browser controller over.
pub const WM_APP_ATTACH: u32 = WM_APP + 2;

// ── Power events ──────────────────────────────────────────────────────────────

pub const PBT_APMSUSPEND: usize = 0x0004;
pub const PBT_APMRESUMEAUTOMATIC: usize = 0x0012;

// ── WM_SIZE kinds ─────────────────────────────────────────────────────────────

pub const SIZE_RESTORED: usize = 0;
pub const SIZE_MINIMIZED: usize = 1;
pub const SIZE_MAXIMIZED: usize = 2;

// ── SetWindowPos flags ────────────────────────────────────────────────────────

pub const SWP_NOZORDER: u32 = 0x0004;
pub const SWP_NOACTIVATE: u32 = 0x0010;

// ── Non-client hit-test codes ─────────────────────────────────────────────────

pub const HTNOWHERE: u32 = 0;
pub const HTLEFT: u32 = 10;
pub const HTRIGHT: u32 = 11;
pub const HTTOP: u32 = 12;
pub const HTTOPLEFT: u32 = 13;
pub const HTTOPRIGHT: u32 = 14;
pub const HTBOTTOM: u32 = 15;
pub const HTBOTTOMLEFT: u32 = 16;
pub const HTBOTTOMRIGHT: u32 = 17;

// ── Decoded messages ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerEvent {
    Suspend,
    Resume,
    Other(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeKind {
    Restored,
    Minimized,
    Maximized,
    Other(usize),
}

/// A window message with its parameters already interpreted.
#[derive(Debug, PartialEq, Eq)]
pub enum WindowMessage<'a> {
    PowerBroadcast(PowerEvent),
    SettingChange,
    NcLeftButtonDown,
    Move,
    Moving,
    /// Suggested window rectangle for the new DPI.
    DpiChanged(Rect),
    Size(SizeKind),
    Activate,
    /// `proposed` is written back in place; the OS reads it after we return.
    NcCalcSize {
        calc_valid_rects: bool,
        proposed: &'a mut Rect,
    },
    Close,
    Destroy,
    QuitRequested,
    Other,
}

/// True when LPARAM of `msg` points at a rectangle the dispatcher needs.
pub fn lparam_is_rect(msg: u32) -> bool {
    matches!(msg, WM_DPICHANGED | WM_NCCALCSIZE)
}

impl<'a> WindowMessage<'a> {
    /// Interpret a raw message.  `rect` is the rectangle LPARAM points at,
    /// supplied by the caller whenever [`lparam_is_rect`] holds.  A rect
    /// message that arrives without one decodes as `Other`.
    pub fn decode(msg: u32, wparam: usize, rect: Option<&'a mut Rect>) -> Self {
        match msg {
            WM_POWERBROADCAST => Self::PowerBroadcast(match wparam {
                PBT_APMSUSPEND => PowerEvent::Suspend,
                PBT_APMRESUMEAUTOMATIC => PowerEvent::Resume,
                other => PowerEvent::Other(other),
            }),
            WM_SETTINGCHANGE => Self::SettingChange,
            WM_NCLBUTTONDOWN => Self::NcLeftButtonDown,
            WM_MOVE => Self::Move,
            WM_MOVING => Self::Moving,
            WM_DPICHANGED => match rect {
                Some(r) => Self::DpiChanged(*r),
                None => Self::Other,
            },
            WM_SIZE => Self::Size(match wparam {
                SIZE_RESTORED => SizeKind::Restored,
                SIZE_MINIMIZED => SizeKind::Minimized,
                SIZE_MAXIMIZED => SizeKind::Maximized,
                other => SizeKind::Other(other),
            }),
            WM_ACTIVATE => Self::Activate,
            WM_NCCALCSIZE => match rect {
                Some(proposed) => Self::NcCalcSize {
                    calc_valid_rects: wparam != 0,
                    proposed,
                },
                None => Self::Other,
            },
            WM_CLOSE => Self::Close,
            WM_DESTROY => Self::Destroy,
            WM_APP_QUIT => Self::QuitRequested,
            _ => Self::Other,
        }
    }
}
