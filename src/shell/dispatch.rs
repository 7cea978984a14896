// ── Window message policy ─────────────────────────────────────────────────────
//
// What the window does in response to each message, independent of how the
// message arrived.  The platform window procedure decodes the raw message,
// calls `Dispatcher::dispatch`, and either returns the handled result or
// falls through to `DefWindowProcW`.
//
// Handlers never keep a borrow alive across a `NativeWindow` call: several of
// those (SetWindowPos, DestroyWindow) re-enter the window procedure.

use super::{
    geometry::{scale, Rect},
    messages::{PowerEvent, SizeKind, WindowMessage, SWP_NOACTIVATE, SWP_NOZORDER},
};
use crate::config::WindowOptions;

/// Outcome of dispatching one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handling {
    /// Consumed; return this value from the window procedure.
    Handled(isize),
    /// Let the default window procedure process it.
    Default,
}

/// Work area and effective DPI of one monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Monitor {
    pub work_area: Rect,
    pub dpi_x: u32,
    pub dpi_y: u32,
}

/// The native window operations the policy needs.
pub trait NativeWindow {
    fn focus(&self);
    /// Move and size the window; `flags` are `SWP_*` bits.
    fn set_window_pos(&self, rect: Rect, flags: u32);
    /// Extend the DWM frame one pixel into the client area so a frameless
    /// window keeps its shadow and rounded corners.
    fn extend_frame_into_client_area(&self);
    fn is_fullscreen(&self) -> bool;
    fn is_maximized(&self) -> bool;
    /// The monitor a rectangle lies on, or `None` if it lies on none.
    fn monitor_from_rect(&self, rect: &Rect) -> Option<Monitor>;
    fn client_rect(&self) -> Rect;
    fn hide(&self);
    fn destroy(&self);
    fn post_quit(&self);
    /// False if the OS refused.
    fn release_capture(&self) -> bool;
    fn post_nc_left_button_down(&self, hit_test: u32);
}

/// The browser-control operations the policy needs.
pub trait BrowserSurface {
    fn resize(&self, client: Rect);
    fn set_padding(&self, padding: Rect);
    fn notify_parent_window_position_changed(&self);
}

/// Per-window message policy, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatcher {
    frameless: bool,
    minimize_on_quit: bool,
    max_width: i32,
    max_height: i32,
}

/// Padding kept while restored: the bottom edge grows by one pixel in
/// WM_NCCALCSIZE and the browser gives it back, which stops frameless
/// restored windows from flickering on redraw.
const RESTORED_PADDING: Rect = Rect::new(0, 0, 0, 1);

impl Dispatcher {
    pub fn new(options: &WindowOptions) -> Self {
        Self {
            frameless: options.frameless,
            minimize_on_quit: options.minimize_on_quit,
            max_width: options.max_width,
            max_height: options.max_height,
        }
    }

    pub fn dispatch(
        &self,
        message: WindowMessage<'_>,
        window: &impl NativeWindow,
        browser: &impl BrowserSurface,
    ) -> Handling {
        match message {
            WindowMessage::PowerBroadcast(PowerEvent::Suspend) => {
                tracing::info!("system suspending");
            }
            WindowMessage::PowerBroadcast(PowerEvent::Resume) => {
                tracing::info!("system resumed");
            }
            WindowMessage::SettingChange => return Handling::Handled(0),
            WindowMessage::NcLeftButtonDown => window.focus(),
            WindowMessage::Move | WindowMessage::Moving => {
                browser.notify_parent_window_position_changed();
            }
            WindowMessage::DpiChanged(suggested) => {
                window.set_window_pos(suggested, SWP_NOZORDER | SWP_NOACTIVATE);
            }
            WindowMessage::Size(kind) => {
                if !(self.frameless && kind == SizeKind::Minimized) {
                    browser.resize(window.client_rect());
                }
            }
            WindowMessage::Close => {
                if self.minimize_on_quit {
                    window.hide();
                } else {
                    window.destroy();
                }
                return Handling::Handled(0);
            }
            WindowMessage::QuitRequested => {
                window.destroy();
                return Handling::Handled(0);
            }
            WindowMessage::Destroy => {
                window.post_quit();
                return Handling::Handled(0);
            }
            WindowMessage::Activate if self.frameless => {
                window.extend_frame_into_client_area();
            }
            WindowMessage::NcCalcSize {
                calc_valid_rects: true,
                proposed,
            } if self.frameless => {
                self.calc_frameless_client(proposed, window, browser);
                return Handling::Handled(0);
            }
            _ => {}
        }
        Handling::Default
    }

    /// Client area of a frameless window.  Returning 0 from WM_NCCALCSIZE
    /// with `wparam != 0` tells the OS to draw no frame of its own.
    fn calc_frameless_client(
        &self,
        proposed: &mut Rect,
        window: &impl NativeWindow,
        browser: &impl BrowserSurface,
    ) {
        if window.is_fullscreen() {
            browser.set_padding(Rect::default());
        } else if window.is_maximized() {
            // Resolve from the proposed rect, not the window: mid-transition
            // on a multi-monitor desktop the window may still report the old one.
            if let Some(monitor) = window.monitor_from_rect(proposed) {
                *proposed = monitor.work_area;
                if self.max_width > 0 || self.max_height > 0 {
                    proposed.clamp_size(
                        scale(self.max_width, monitor.dpi_x),
                        scale(self.max_height, monitor.dpi_y),
                    );
                }
            }
            browser.set_padding(Rect::default());
        } else {
            proposed.bottom += 1;
            browser.set_padding(RESTORED_PADDING);
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;
    use crate::shell::messages::*;

    #[derive(Default)]
    pub(crate) struct FakeWindow {
        pub(crate) fullscreen: Cell<bool>,
        pub(crate) maximized: Cell<bool>,
        pub(crate) monitor: Cell<Option<Monitor>>,
        pub(crate) client: Cell<Rect>,
        pub(crate) capture_refused: Cell<bool>,
        pub(crate) calls: RefCell<Vec<String>>,
        pub(crate) monitor_queries: RefCell<Vec<Rect>>,
    }

    impl FakeWindow {
        fn push(&self, s: impl Into<String>) {
            self.calls.borrow_mut().push(s.into());
        }

        pub(crate) fn log(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl NativeWindow for FakeWindow {
        fn focus(&self) {
            self.push("focus");
        }
        fn set_window_pos(&self, r: Rect, flags: u32) {
            self.push(format!(
                "pos {} {} {} {} flags={flags:#x}",
                r.left,
                r.top,
                r.width(),
                r.height()
            ));
        }
        fn extend_frame_into_client_area(&self) {
            self.push("extend-frame");
        }
        fn is_fullscreen(&self) -> bool {
            self.fullscreen.get()
        }
        fn is_maximized(&self) -> bool {
            self.maximized.get()
        }
        fn monitor_from_rect(&self, rect: &Rect) -> Option<Monitor> {
            self.monitor_queries.borrow_mut().push(*rect);
            self.monitor.get()
        }
        fn client_rect(&self) -> Rect {
            self.client.get()
        }
        fn hide(&self) {
            self.push("hide");
        }
        fn destroy(&self) {
            self.push("destroy");
        }
        fn post_quit(&self) {
            self.push("quit");
        }
        fn release_capture(&self) -> bool {
            self.push("release-capture");
            !self.capture_refused.get()
        }
        fn post_nc_left_button_down(&self, hit_test: u32) {
            self.push(format!("nclbuttondown {hit_test}"));
        }
    }

    #[derive(Default)]
    struct FakeBrowser {
        padding: Cell<Option<Rect>>,
        resized: RefCell<Vec<Rect>>,
        moved: Cell<u32>,
    }

    impl BrowserSurface for FakeBrowser {
        fn resize(&self, client: Rect) {
            self.resized.borrow_mut().push(client);
        }
        fn set_padding(&self, padding: Rect) {
            self.padding.set(Some(padding));
        }
        fn notify_parent_window_position_changed(&self) {
            self.moved.set(self.moved.get() + 1);
        }
    }

    fn dispatcher(frameless: bool) -> Dispatcher {
        Dispatcher::new(&WindowOptions {
            frameless,
            ..Default::default()
        })
    }

    fn calc_size(
        d: &Dispatcher,
        rect: &mut Rect,
        window: &FakeWindow,
        browser: &FakeBrowser,
    ) -> Handling {
        d.dispatch(WindowMessage::decode(WM_NCCALCSIZE, 1, Some(rect)), window, browser)
    }

    #[test]
    fn restored_frameless_adds_exactly_one_pixel() {
        let (window, browser) = (FakeWindow::default(), FakeBrowser::default());
        let d = dispatcher(true);

        for _ in 0..3 {
            let mut r = Rect::new(10, 20, 810, 620);
            assert_eq!(calc_size(&d, &mut r, &window, &browser), Handling::Handled(0));
            assert_eq!(r, Rect::new(10, 20, 810, 621));
            assert_eq!(browser.padding.get(), Some(Rect::new(0, 0, 0, 1)));
        }
    }

    #[test]
    fn maximized_clamps_each_axis_to_scaled_maximum() {
        let window = FakeWindow::default();
        window.maximized.set(true);
        window.monitor.set(Some(Monitor {
            work_area: Rect::new(0, 0, 3840, 2100),
            dpi_x: 144,
            dpi_y: 192,
        }));
        let browser = FakeBrowser::default();
        let d = Dispatcher::new(&WindowOptions {
            frameless: true,
            max_width: 1600,
            max_height: 900,
            ..Default::default()
        });

        let proposed = Rect::new(-8, -8, 3848, 2108);
        let mut r = proposed;
        assert_eq!(calc_size(&d, &mut r, &window, &browser), Handling::Handled(0));

        assert_eq!(window.monitor_queries.borrow().as_slice(), [proposed]);
        assert_eq!(r, Rect::new(0, 0, 2400, 1800));
        assert_eq!(browser.padding.get(), Some(Rect::default()));
    }

    #[test]
    fn maximized_clamp_applies_only_to_configured_axis() {
        let window = FakeWindow::default();
        window.maximized.set(true);
        window.monitor.set(Some(Monitor {
            work_area: Rect::new(1920, 0, 3840, 1040),
            dpi_x: 96,
            dpi_y: 96,
        }));
        let browser = FakeBrowser::default();
        let d = Dispatcher::new(&WindowOptions {
            frameless: true,
            max_height: 700,
            ..Default::default()
        });

        let mut r = Rect::default();
        calc_size(&d, &mut r, &window, &browser);
        assert_eq!(r, Rect::new(1920, 0, 3840, 700));
    }

    #[test]
    fn oversized_maximum_on_high_dpi_leaves_work_area_unclamped() {
        let window = FakeWindow::default();
        window.maximized.set(true);
        window.monitor.set(Some(Monitor {
            work_area: Rect::new(0, 0, 3840, 2100),
            dpi_x: 192,
            dpi_y: 192,
        }));
        let d = Dispatcher::new(&WindowOptions {
            frameless: true,
            max_width: 20_000_000,
            max_height: i32::MAX,
            ..Default::default()
        });

        let mut r = Rect::default();
        calc_size(&d, &mut r, &window, &FakeBrowser::default());
        assert_eq!(r, Rect::new(0, 0, 3840, 2100));
    }

    #[test]
    fn maximized_without_monitor_keeps_proposed_rect() {
        let window = FakeWindow::default();
        window.maximized.set(true);
        let browser = FakeBrowser::default();
        browser.padding.set(Some(Rect::new(0, 0, 0, 1)));

        let mut r = Rect::new(0, 0, 500, 500);
        calc_size(&dispatcher(true), &mut r, &window, &browser);
        assert_eq!(r, Rect::new(0, 0, 500, 500));
        assert_eq!(browser.padding.get(), Some(Rect::default()));
    }

    #[test]
    fn fullscreen_resets_padding_and_keeps_rect() {
        let window = FakeWindow::default();
        window.fullscreen.set(true);
        window.maximized.set(true);
        let browser = FakeBrowser::default();
        browser.padding.set(Some(Rect::new(3, 3, 3, 3)));

        let mut r = Rect::new(0, 0, 1920, 1080);
        assert_eq!(
            calc_size(&dispatcher(true), &mut r, &window, &browser),
            Handling::Handled(0)
        );
        assert_eq!(r, Rect::new(0, 0, 1920, 1080));
        assert_eq!(browser.padding.get(), Some(Rect::default()));
        assert!(window.monitor_queries.borrow().is_empty());
    }

    #[test]
    fn nccalcsize_is_left_alone_when_framed_or_wparam_zero() {
        let (window, browser) = (FakeWindow::default(), FakeBrowser::default());

        let mut r = Rect::new(0, 0, 100, 100);
        assert_eq!(calc_size(&dispatcher(false), &mut r, &window, &browser), Handling::Default);
        assert_eq!(r, Rect::new(0, 0, 100, 100));

        let msg = WindowMessage::decode(WM_NCCALCSIZE, 0, Some(&mut r));
        assert_eq!(dispatcher(true).dispatch(msg, &window, &browser), Handling::Default);
        assert_eq!(browser.padding.get(), None);
    }

    #[test]
    fn dpi_change_moves_to_exact_suggested_rect() {
        let (window, browser) = (FakeWindow::default(), FakeBrowser::default());
        let mut suggested = Rect::new(100, 200, 1300, 1100);

        let msg = WindowMessage::decode(WM_DPICHANGED, 0x0090_0090, Some(&mut suggested));
        assert_eq!(dispatcher(false).dispatch(msg, &window, &browser), Handling::Default);
        assert_eq!(window.log(), ["pos 100 200 1200 900 flags=0x14"]);
    }

    #[test]
    fn move_and_moving_notify_the_browser() {
        let (window, browser) = (FakeWindow::default(), FakeBrowser::default());
        let d = dispatcher(false);
        d.dispatch(WindowMessage::Move, &window, &browser);
        d.dispatch(WindowMessage::Moving, &window, &browser);
        assert_eq!(browser.moved.get(), 2);
    }

    #[test]
    fn setting_change_is_consumed_and_nc_click_focuses() {
        let (window, browser) = (FakeWindow::default(), FakeBrowser::default());
        let d = dispatcher(false);
        assert_eq!(
            d.dispatch(WindowMessage::SettingChange, &window, &browser),
            Handling::Handled(0)
        );
        assert_eq!(
            d.dispatch(WindowMessage::NcLeftButtonDown, &window, &browser),
            Handling::Default
        );
        assert_eq!(window.log(), ["focus"]);
    }

    #[test]
    fn power_events_only_log() {
        let (window, browser) = (FakeWindow::default(), FakeBrowser::default());
        let msg = WindowMessage::PowerBroadcast(PowerEvent::Suspend);
        assert_eq!(dispatcher(true).dispatch(msg, &window, &browser), Handling::Default);
        assert!(window.log().is_empty());
    }

    #[test]
    fn activate_reextends_frame_only_when_frameless() {
        let (window, browser) = (FakeWindow::default(), FakeBrowser::default());
        dispatcher(false).dispatch(WindowMessage::Activate, &window, &browser);
        assert!(window.log().is_empty());
        dispatcher(true).dispatch(WindowMessage::Activate, &window, &browser);
        assert_eq!(window.log(), ["extend-frame"]);
    }

    #[test]
    fn minimized_frameless_window_keeps_browser_bounds() {
        let (window, browser) = (FakeWindow::default(), FakeBrowser::default());
        window.client.set(Rect::new(0, 0, 640, 480));

        dispatcher(true).dispatch(WindowMessage::Size(SizeKind::Minimized), &window, &browser);
        assert!(browser.resized.borrow().is_empty());

        dispatcher(false).dispatch(WindowMessage::Size(SizeKind::Minimized), &window, &browser);
        dispatcher(true).dispatch(WindowMessage::Size(SizeKind::Restored), &window, &browser);
        assert_eq!(browser.resized.borrow().len(), 2);
    }

    #[test]
    fn close_hides_or_destroys() {
        let (window, browser) = (FakeWindow::default(), FakeBrowser::default());
        dispatcher(false).dispatch(WindowMessage::Close, &window, &browser);

        let d = Dispatcher::new(&WindowOptions {
            minimize_on_quit: true,
            ..Default::default()
        });
        assert_eq!(d.dispatch(WindowMessage::Close, &window, &browser), Handling::Handled(0));
        assert_eq!(window.log(), ["destroy", "hide"]);

        // An explicit quit ignores minimize_on_quit.
        d.dispatch(WindowMessage::QuitRequested, &window, &browser);
        d.dispatch(WindowMessage::Destroy, &window, &browser);
        assert_eq!(window.log(), ["destroy", "hide", "destroy", "quit"]);
    }

    #[test]
    fn unknown_messages_fall_through() {
        let (window, browser) = (FakeWindow::default(), FakeBrowser::default());
        assert_eq!(
            dispatcher(true).dispatch(WindowMessage::decode(0x0400, 0, None), &window, &browser),
            Handling::Default
        );
    }
}
