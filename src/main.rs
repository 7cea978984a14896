// Release builds run as a GUI application (no console window).
// Debug builds keep the console so that tracing output is visible.
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
#![deny(unsafe_code)]

use std::path::PathBuf;

use clap::Parser;
use edgeframe::{Result, WindowOptions};

/// Open a native window hosting a WebView2 browser.
#[derive(Debug, Parser)]
#[command(name = "edgeframe", version)]
struct Args {
    /// JSON file with window options; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// URL to load once the browser is ready.
    #[arg(long)]
    url: Option<String>,

    /// Hide the OS title bar and border.
    #[arg(long)]
    frameless: bool,

    /// Hide the window on close instead of exiting.
    #[arg(long)]
    minimize_on_quit: bool,

    #[arg(long)]
    width: Option<i32>,

    #[arg(long)]
    height: Option<i32>,
}

impl Args {
    fn window_options(&self) -> Result<WindowOptions> {
        let mut options = match &self.config {
            Some(path) => WindowOptions::from_json_file(path)?,
            None => WindowOptions::default(),
        };
        if let Some(url) = &self.url {
            options.initial_url = Some(url.clone());
        }
        options.frameless |= self.frameless;
        options.minimize_on_quit |= self.minimize_on_quit;
        if let Some(width) = self.width {
            options.initial_width = width;
        }
        if let Some(height) = self.height {
            options.initial_height = height;
        }
        Ok(options)
    }
}

fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "edgeframe=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[cfg(windows)]
fn run(args: &Args) -> Result<()> {
    use edgeframe::{Callbacks, Window};

    let callbacks = Callbacks::new()
        .on_message(|m| tracing::info!(source = %m.source, body = %m.body, "web message"))
        .on_navigation_completed(|n| {
            tracing::info!(success = n.success, uri = %n.uri, "navigation completed");
        });

    let window = Window::new(args.window_options()?, callbacks)?;
    window.run()
}

#[cfg(windows)]
fn main() {
    init_tracing();
    let args = Args::parse();

    if let Err(e) = run(&args) {
        tracing::error!(error = %e, "edgeframe failed");
        // Startup failed before or during the message loop.
        // Show a modal error dialog — the only safe output path in a GUI app.
        edgeframe::platform::win32::window::show_error_dialog(&e.to_string());
        std::process::exit(1);
    }
}

#[cfg(not(windows))]
fn main() {
    init_tracing();
    let args = Args::parse();

    // Still validate the configuration so the binary is useful for checking
    // option files on a build host.
    match args.window_options() {
        Ok(options) => tracing::info!(?options, "options parsed"),
        Err(e) => tracing::error!(error = %e, "invalid options"),
    }
    tracing::error!("edgeframe windows require Windows");
    std::process::exit(1);
}
