// ── Central error type ────────────────────────────────────────────────────────
//
// All fallible operations in edgeframe return `error::Result<T>`.  Failures
// inside the window procedure are logged and swallowed; only construction,
// `start_resize` and explicit forwarders surface them to the host.

use thiserror::Error;

/// Every error that edgeframe can produce.
#[derive(Debug, Error)]
pub enum EdgeFrameError {
    /// A Win32 or COM call returned a failure code.
    #[error("{function} failed (error {code:#010x})")]
    Win32 {
        /// The name of the failing function, for display purposes.
        function: &'static str,
        /// The raw Win32 error code (`GetLastError()` value) or HRESULT.
        code: u32,
    },

    /// The OS refused to release mouse capture before a drag-resize.
    #[error("unable to release mouse capture")]
    CaptureRelease,

    /// A host call reached the browser while an outer call still held it,
    /// e.g. from inside a callback raised by that same call.
    #[error("browser control is busy")]
    Busy,

    /// A standard I/O error (reading a configuration file, …).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration file could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

// Convert a windows-crate error (HRESULT) directly into an EdgeFrameError so
// that `?` can be used on `windows::core::Result<T>` throughout the platform
// and browser modules.
#[cfg(windows)]
impl From<windows::core::Error> for EdgeFrameError {
    fn from(e: windows::core::Error) -> Self {
        // HRESULT.0 is i32; reinterpret bits as u32 for display purposes.
        Self::Win32 {
            function: "windows",
            code: e.code().0 as u32,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EdgeFrameError>;
