// ── Portable window shell ─────────────────────────────────────────────────────
//
// Everything the window decides, with no FFI: geometry, message decoding and
// policy, the resize-edge table and the host callback types.  No `unsafe`
// lives here; `platform::win32` supplies the real `NativeWindow`.

pub mod dispatch;
pub mod events;
pub mod geometry;
pub mod messages;
pub mod resize;
