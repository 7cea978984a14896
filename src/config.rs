// ── Window options ────────────────────────────────────────────────────────────
//
// Construction-time configuration for a `Window`.  Options are immutable once
// the window exists.  They can be built in code or read from a JSON file.
// No `unsafe`: pure safe Rust + serde_json.

use std::{fs, path::Path};

use serde::Deserialize;

use crate::error::Result;

/// Initial outer width used when `initial_width` is 0.
pub const DEFAULT_WIDTH: i32 = 800;

/// Initial outer height used when `initial_height` is 0.
pub const DEFAULT_HEIGHT: i32 = 600;

/// Always passed to the engine first; lets pages mark `app-region: drag`
/// areas that move the window.
pub const DRAGGABLE_REGIONS_ARG: &str = "--enable-features=msWebView2EnableDraggableRegions";

/// Options recognised by [`Window::new`](crate::Window).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowOptions {
    /// Remove the OS title bar and border.  The DWM shadow is kept.
    pub frameless: bool,
    /// Closing the window hides it instead of ending the message loop.
    pub minimize_on_quit: bool,

    /// Caption text, also shown on the taskbar.
    pub title: String,
    /// Loaded once the engine is ready.  `None` leaves `about:blank`.
    pub initial_url: Option<String>,

    // Outer size in 96-DPI pixels.  0 selects the default.
    pub initial_width: i32,
    pub initial_height: i32,

    // Upper bound on the client area while maximized, in 96-DPI pixels.
    // 0 leaves that axis unbounded; huge values saturate when scaled.
    pub max_width: i32,
    pub max_height: i32,

    /// WebView2 user-data folder.
    pub data_path: Option<String>,
    /// Fixed-version runtime folder.  `None` uses the installed runtime.
    pub browser_path: Option<String>,
    /// Extra engine switches, appended after [`DRAGGABLE_REGIONS_ARG`].
    pub additional_browser_args: Vec<String>,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            frameless: false,
            minimize_on_quit: false,
            title: "edgeframe".to_owned(),
            initial_url: None,
            initial_width: DEFAULT_WIDTH,
            initial_height: DEFAULT_HEIGHT,
            max_width: 0,
            max_height: 0,
            data_path: None,
            browser_path: None,
            additional_browser_args: Vec::new(),
        }
    }
}

impl WindowOptions {
    /// Read options from a JSON file.  Missing keys take their defaults;
    /// unknown keys are rejected.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Initial outer size, substituting the defaults for zero.
    pub fn initial_size(&self) -> (i32, i32) {
        let width = if self.initial_width == 0 { DEFAULT_WIDTH } else { self.initial_width };
        let height = if self.initial_height == 0 { DEFAULT_HEIGHT } else { self.initial_height };
        (width, height)
    }

    /// Space-separated command line handed to the engine.
    pub fn browser_arguments(&self) -> String {
        std::iter::once(DRAGGABLE_REGIONS_ARG)
            .chain(self.additional_browser_args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
