// ── Geometry ──────────────────────────────────────────────────────────────────
//
// Device-pixel rectangles and DPI scaling shared by the message policy and the
// browser wrapper.  `Rect` has the same layout as Win32 `RECT` so the platform
// layer can reinterpret a `*mut RECT` from a message parameter in place.

pub const BASE_DPI: u32 = 96;

/// Scale a pixel value defined at 96 DPI to `dpi`.  Saturates at the `i32`
/// range; configured sizes are not bounded.
pub fn scale(px: i32, dpi: u32) -> i32 {
    let scaled = i64::from(px) * i64::from(dpi) / i64::from(BASE_DPI);
    scaled.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Edge coordinates in device pixels.  Also used for paddings, where each
/// field is an inset from the matching edge.
#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Shrink by `padding` on every edge.
    pub fn inset(&self, padding: &Rect) -> Rect {
        Rect {
            left: self.left + padding.left,
            top: self.top + padding.top,
            right: self.right - padding.right,
            bottom: self.bottom - padding.bottom,
        }
    }

    /// Limit width and height independently; a non-positive bound leaves that
    /// axis alone.  The top-left corner never moves.
    pub fn clamp_size(&mut self, max_width: i32, max_height: i32) {
        if max_width > 0 && self.width() > max_width {
            self.right = self.left + max_width;
        }
        if max_height > 0 && self.height() > max_height {
            self.bottom = self.top + max_height;
        }
    }
}

#[cfg(windows)]
impl From<windows::Win32::Foundation::RECT> for Rect {
    fn from(r: windows::Win32::Foundation::RECT) -> Self {
        Self::new(r.left, r.top, r.right, r.bottom)
    }
}

#[cfg(windows)]
impl From<Rect> for windows::Win32::Foundation::RECT {
    fn from(r: Rect) -> Self {
        Self {
            left: r.left,
            top: r.top,
            right: r.right,
            bottom: r.bottom,
        }
    }
}
