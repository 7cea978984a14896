// ── Safety policy ────────────────────────────────────────────────────────────
// Unsafe code is forbidden everywhere except:
//   • `platform::win32` – Win32 / WinAPI FFI
//   • `browser::edge`   – WebView2 COM hosting
// Each unsafe block in those modules MUST carry a `// SAFETY:` comment.
#![deny(unsafe_code)]

//! A native Windows window that hosts a WebView2 browser control.
//!
//! The window keeps the browser sized to its client area through resize, move,
//! maximize and DPI changes, supports a frameless mode with custom drag-resize
//! edges, and reports web messages, navigations and resource requests to the
//! host through [`Callbacks`].
//!
//! Policy lives in the portable [`shell`] module and is testable on any host;
//! [`Window`] itself is Windows only.

pub mod browser;
pub mod config;
pub mod error;
pub mod platform;
pub mod shell;

pub use config::WindowOptions;
pub use error::{EdgeFrameError, Result};
pub use shell::events::{
    Callbacks, NavigationCompleted, ResourceRequest, ResourceResponse, WebMessage,
};

#[cfg(windows)]
pub use platform::win32::window::Window;
