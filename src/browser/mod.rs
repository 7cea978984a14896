// ── Browser control abstraction ───────────────────────────────────────────────
//
// `BrowserControl` is the safe, portable half of the embedded browser: it
// keeps the padding and last client rectangle, and forwards geometry and
// navigation to a `Controller` once one exists.  The WebView2 implementation
// of `Controller` lives in `edge` (Windows only).
//
// The controller arrives asynchronously, after the engine environment has
// been created.  Until then geometry calls are silent no-ops and navigation
// style calls are queued, then replayed in order on `attach`.

#[cfg(windows)]
pub mod edge;

use std::cell::RefCell;

use crate::{error::Result, shell::dispatch::BrowserSurface, shell::geometry::Rect};

// ── Engine enums ──────────────────────────────────────────────────────────────

/// Answer given to every permission request the page makes.
/// Discriminants match `COREWEBVIEW2_PERMISSION_STATE`.
#[repr(i32)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PermissionState {
    Default = 0,
    #[default]
    Allow = 1,
    Deny = 2,
}

/// Resource class a request filter applies to.
/// Discriminants match `COREWEBVIEW2_WEB_RESOURCE_CONTEXT`.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceContext {
    All = 0,
    Document = 1,
    Stylesheet = 2,
    Image = 3,
    Media = 4,
    Font = 5,
    Script = 6,
    XmlHttpRequest = 7,
    Fetch = 8,
    Other = 16,
}

// ── Controller seam ───────────────────────────────────────────────────────────

/// Operations of a live browser-engine controller.  Every method is a thin
/// forwarder; failures are whatever the engine reported.
pub trait Controller {
    fn put_bounds(&self, bounds: Rect) -> Result<()>;
    fn notify_parent_window_position_changed(&self) -> Result<()>;
    fn navigate(&self, url: &str) -> Result<()>;
    fn eval(&self, script: &str) -> Result<()>;
    fn post_web_message(&self, json: &str) -> Result<()>;
    fn add_init_script(&self, script: &str) -> Result<()>;
    fn add_web_resource_requested_filter(&self, filter: &str, context: ResourceContext)
        -> Result<()>;
    fn set_global_permission(&self, state: PermissionState) -> Result<()>;
}

/// A forwarder call made before the controller existed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingCall {
    Navigate(String),
    Eval(String),
    PostWebMessage(String),
    InitScript(String),
    ResourceFilter(String, ResourceContext),
    GlobalPermission(PermissionState),
}

impl PendingCall {
    fn apply<C: Controller>(&self, controller: &C) -> Result<()> {
        match self {
            Self::Navigate(url) => controller.navigate(url),
            Self::Eval(script) => controller.eval(script),
            Self::PostWebMessage(json) => controller.post_web_message(json),
            Self::InitScript(script) => controller.add_init_script(script),
            Self::ResourceFilter(filter, context) => {
                controller.add_web_resource_requested_filter(filter, *context)
            }
            Self::GlobalPermission(state) => controller.set_global_permission(*state),
        }
    }
}

// ── BrowserControl ────────────────────────────────────────────────────────────

/// The window's single embedded browser.
pub struct BrowserControl<C> {
    controller: Option<C>,
    padding: Rect,
    /// Client rectangle last applied through `resize`.
    client: Option<Rect>,
    pending: Vec<PendingCall>,
}

impl<C> Default for BrowserControl<C> {
    fn default() -> Self {
        Self {
            controller: None,
            padding: Rect::default(),
            client: None,
            pending: Vec::new(),
        }
    }
}

impl<C: Controller> BrowserControl<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_attached(&self) -> bool {
        self.controller.is_some()
    }

    pub fn controller(&self) -> Option<&C> {
        self.controller.as_ref()
    }

    pub fn padding(&self) -> Rect {
        self.padding
    }

    /// Bounds currently applied to the controller, if any.
    pub fn bounds(&self) -> Option<Rect> {
        self.client.map(|c| c.inset(&self.padding))
    }

    pub fn pending(&self) -> &[PendingCall] {
        &self.pending
    }

    /// Take ownership of the freshly created controller and replay every
    /// call queued while it was absent.  A failing replay is logged and the
    /// rest still run.
    pub fn attach(&mut self, controller: C) {
        for call in self.pending.drain(..) {
            if let Err(e) = call.apply(&controller) {
                tracing::warn!(?call, error = %e, "replaying queued browser call failed");
            }
        }
        self.controller = Some(controller);
        tracing::debug!("browser controller attached");
    }

    /// Apply `bounds` verbatim.  No-op until the controller exists.
    pub fn set_size(&self, bounds: Rect) {
        let Some(controller) = &self.controller else {
            return;
        };
        if let Err(e) = controller.put_bounds(bounds) {
            tracing::warn!(?bounds, error = %e, "SetBounds failed");
        }
    }

    /// Re-apply bounds from the window's client rectangle minus padding.
    /// No-op until the controller exists.
    pub fn resize(&mut self, client: Rect) {
        if self.controller.is_none() {
            return;
        }
        self.client = Some(client);
        self.set_size(client.inset(&self.padding));
    }

    /// Record edge insets; bounds are re-applied when they change.
    pub fn set_padding(&mut self, padding: Rect) {
        if padding == self.padding {
            return;
        }
        self.padding = padding;
        if let Some(client) = self.client {
            self.set_size(client.inset(&padding));
        }
    }

    pub fn notify_parent_window_position_changed(&self) {
        let Some(controller) = &self.controller else {
            return;
        };
        if let Err(e) = controller.notify_parent_window_position_changed() {
            tracing::debug!(error = %e, "NotifyParentWindowPositionChanged failed");
        }
    }

    pub fn navigate(&mut self, url: &str) -> Result<()> {
        self.forward(PendingCall::Navigate(url.to_owned()))
    }

    pub fn eval(&mut self, script: &str) -> Result<()> {
        self.forward(PendingCall::Eval(script.to_owned()))
    }

    pub fn post_web_message(&mut self, json: &str) -> Result<()> {
        self.forward(PendingCall::PostWebMessage(json.to_owned()))
    }

    pub fn add_init_script(&mut self, script: &str) -> Result<()> {
        self.forward(PendingCall::InitScript(script.to_owned()))
    }

    pub fn add_web_resource_requested_filter(
        &mut self,
        filter: &str,
        context: ResourceContext,
    ) -> Result<()> {
        self.forward(PendingCall::ResourceFilter(filter.to_owned(), context))
    }

    pub fn set_global_permission(&mut self, state: PermissionState) -> Result<()> {
        self.forward(PendingCall::GlobalPermission(state))
    }

    fn forward(&mut self, call: PendingCall) -> Result<()> {
        match &self.controller {
            Some(controller) => call.apply(controller),
            None => {
                self.pending.push(call);
                Ok(())
            }
        }
    }
}

/// Attach `controller` and size it to `client`, or hand it back untouched if
/// the cell is borrowed further up the stack so the caller can retry later.
pub fn try_attach<C: Controller>(
    cell: &RefCell<BrowserControl<C>>,
    controller: C,
    client: Rect,
) -> std::result::Result<(), C> {
    match cell.try_borrow_mut() {
        Ok(mut browser) => {
            browser.attach(controller);
            browser.resize(client);
            Ok(())
        }
        Err(_) => Err(controller),
    }
}

// The window procedure can re-enter itself (SetWindowPos inside a handler
// sends WM_NCCALCSIZE synchronously), so a busy cell is skipped, not a panic.
impl<C: Controller> BrowserSurface for RefCell<BrowserControl<C>> {
    fn resize(&self, client: Rect) {
        match self.try_borrow_mut() {
            Ok(mut browser) => browser.resize(client),
            Err(_) => tracing::warn!(?client, "browser busy; resize skipped"),
        }
    }

    fn set_padding(&self, padding: Rect) {
        match self.try_borrow_mut() {
            Ok(mut browser) => browser.set_padding(padding),
            Err(_) => tracing::warn!(?padding, "browser busy; padding skipped"),
        }
    }

    fn notify_parent_window_position_changed(&self) {
        if let Ok(browser) = self.try_borrow() {
            browser.notify_parent_window_position_changed();
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::EdgeFrameError;

    /// Records every call it receives.  Clones share the log.
    #[derive(Clone, Default)]
    pub(crate) struct RecordingController {
        pub(crate) calls: Rc<RefCell<Vec<String>>>,
        pub(crate) fail_navigation: bool,
    }

    impl RecordingController {
        pub(crate) fn log(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }

        fn push(&self, call: String) {
            self.calls.borrow_mut().push(call);
        }
    }

    impl Controller for RecordingController {
        fn put_bounds(&self, b: Rect) -> Result<()> {
            self.push(format!("bounds {} {} {} {}", b.left, b.top, b.right, b.bottom));
            Ok(())
        }
        fn notify_parent_window_position_changed(&self) -> Result<()> {
            self.push("parent-moved".into());
            Ok(())
        }
        fn navigate(&self, url: &str) -> Result<()> {
            if self.fail_navigation {
                return Err(EdgeFrameError::Win32 { function: "Navigate", code: 0x8007_0057 });
            }
            self.push(format!("navigate {url}"));
            Ok(())
        }
        fn eval(&self, script: &str) -> Result<()> {
            self.push(format!("eval {script}"));
            Ok(())
        }
        fn post_web_message(&self, json: &str) -> Result<()> {
            self.push(format!("post {json}"));
            Ok(())
        }
        fn add_init_script(&self, script: &str) -> Result<()> {
            self.push(format!("init {script}"));
            Ok(())
        }
        fn add_web_resource_requested_filter(
            &self,
            filter: &str,
            context: ResourceContext,
        ) -> Result<()> {
            self.push(format!("filter {filter} {context:?}"));
            Ok(())
        }
        fn set_global_permission(&self, state: PermissionState) -> Result<()> {
            self.push(format!("permission {state:?}"));
            Ok(())
        }
    }

    #[test]
    fn geometry_without_controller_is_a_silent_noop() {
        let mut browser = BrowserControl::<RecordingController>::new();
        browser.set_size(Rect::new(0, 0, 10, 10));
        browser.resize(Rect::new(0, 0, 800, 600));
        browser.notify_parent_window_position_changed();

        assert!(!browser.is_attached());
        assert_eq!(browser.bounds(), None);
        assert!(browser.pending().is_empty());
    }

    #[test]
    fn resize_subtracts_padding() {
        let ctrl = RecordingController::default();
        let mut browser = BrowserControl::new();
        browser.attach(ctrl.clone());

        browser.resize(Rect::new(0, 0, 800, 600));
        browser.set_padding(Rect::new(0, 0, 0, 1));

        assert_eq!(ctrl.log(), ["bounds 0 0 800 600", "bounds 0 0 800 599"]);
        assert_eq!(browser.bounds(), Some(Rect::new(0, 0, 800, 599)));
    }

    #[test]
    fn unchanged_padding_does_not_reapply_bounds() {
        let ctrl = RecordingController::default();
        let mut browser = BrowserControl::new();
        browser.attach(ctrl.clone());
        browser.resize(Rect::new(0, 0, 800, 600));

        browser.set_padding(Rect::default());
        assert_eq!(ctrl.log().len(), 1);
    }

    #[test]
    fn calls_before_attach_are_replayed_in_order() {
        let mut browser = BrowserControl::new();
        browser.set_global_permission(PermissionState::Allow).unwrap();
        browser
            .add_web_resource_requested_filter("*", ResourceContext::All)
            .unwrap();
        browser.navigate("https://example.com").unwrap();
        assert_eq!(browser.pending().len(), 3);

        let ctrl = RecordingController::default();
        browser.attach(ctrl.clone());

        assert!(browser.pending().is_empty());
        assert_eq!(
            ctrl.log(),
            ["permission Allow", "filter * All", "navigate https://example.com"]
        );
    }

    #[test]
    fn failed_replay_does_not_stop_the_rest() {
        let ctrl = RecordingController {
            fail_navigation: true,
            ..Default::default()
        };
        let mut browser = BrowserControl::new();
        browser.navigate("https://example.com").unwrap();
        browser.eval("1 + 1").unwrap();
        browser.attach(ctrl.clone());

        assert_eq!(ctrl.log(), ["eval 1 + 1"]);
    }

    #[test]
    fn attached_forwarders_surface_engine_errors() {
        let ctrl = RecordingController {
            fail_navigation: true,
            ..Default::default()
        };
        let mut browser = BrowserControl::new();
        browser.attach(ctrl);
        assert!(browser.navigate("https://example.com").is_err());
    }

    #[test]
    fn busy_cell_skips_instead_of_panicking() {
        let cell = RefCell::new(BrowserControl::new());
        cell.borrow_mut().attach(RecordingController::default());

        let guard = cell.borrow_mut();
        BrowserSurface::resize(&cell, Rect::new(0, 0, 1, 1));
        BrowserSurface::set_padding(&cell, Rect::new(0, 0, 0, 1));
        drop(guard);

        let browser = cell.borrow();
        assert_eq!(browser.padding(), Rect::default());
        assert_eq!(browser.bounds(), None);
    }

    #[test]
    fn attach_into_busy_cell_hands_the_controller_back() {
        let cell = RefCell::new(BrowserControl::<RecordingController>::new());
        cell.borrow_mut().navigate("https://example.com").unwrap();
        let ctrl = RecordingController::default();

        let guard = cell.borrow_mut();
        let returned = try_attach(&cell, ctrl.clone(), Rect::new(0, 0, 800, 600))
            .expect_err("busy cell must not take the controller");
        drop(guard);
        assert!(ctrl.log().is_empty());
        assert_eq!(cell.borrow().pending().len(), 1);

        assert!(try_attach(&cell, returned, Rect::new(0, 0, 800, 600)).is_ok());
        assert_eq!(ctrl.log(), ["navigate https://example.com", "bounds 0 0 800 600"]);
        assert!(cell.borrow().pending().is_empty());
    }

    #[test]
    fn bounds_track_client_minus_padding_through_window_messages() {
        use crate::{
            config::WindowOptions,
            shell::{
                dispatch::{tests::FakeWindow, Dispatcher, Monitor},
                messages::{WindowMessage, SIZE_MAXIMIZED, SIZE_RESTORED, WM_NCCALCSIZE, WM_SIZE},
            },
        };

        let dispatcher = Dispatcher::new(&WindowOptions {
            frameless: true,
            ..Default::default()
        });
        let window = FakeWindow::default();
        window.client.set(Rect::new(0, 0, 800, 600));
        window.monitor.set(Some(Monitor {
            work_area: Rect::new(0, 0, 1920, 1040),
            dpi_x: 96,
            dpi_y: 96,
        }));
        let cell = RefCell::new(BrowserControl::<RecordingController>::new());
        let ctrl = RecordingController::default();

        let calc_size = |proposed: Rect| {
            let mut r = proposed;
            let msg = WindowMessage::decode(WM_NCCALCSIZE, 1, Some(&mut r));
            dispatcher.dispatch(msg, &window, &cell);
            r
        };
        let size = |kind: usize| {
            dispatcher.dispatch(WindowMessage::decode(WM_SIZE, kind, None), &window, &cell);
        };

        // Restored, before the controller exists: padding recorded, nothing applied.
        assert_eq!(calc_size(Rect::new(0, 0, 800, 600)), Rect::new(0, 0, 800, 601));
        assert_eq!(cell.borrow().padding(), Rect::new(0, 0, 0, 1));
        assert_eq!(cell.borrow().bounds(), None);

        cell.borrow_mut().attach(ctrl.clone());
        assert_eq!(cell.borrow().bounds(), None);

        size(SIZE_RESTORED);
        assert_eq!(cell.borrow().bounds(), Some(Rect::new(0, 0, 800, 599)));

        window.maximized.set(true);
        assert_eq!(calc_size(Rect::new(-8, -8, 1928, 1048)), Rect::new(0, 0, 1920, 1040));
        assert_eq!(cell.borrow().bounds(), Some(Rect::new(0, 0, 800, 600)));

        window.client.set(Rect::new(0, 0, 1920, 1040));
        size(SIZE_MAXIMIZED);
        assert_eq!(cell.borrow().bounds(), Some(Rect::new(0, 0, 1920, 1040)));

        window.fullscreen.set(true);
        window.client.set(Rect::new(0, 0, 1920, 1080));
        assert_eq!(calc_size(Rect::new(0, 0, 1920, 1080)), Rect::new(0, 0, 1920, 1080));
        assert_eq!(cell.borrow().bounds(), Some(Rect::new(0, 0, 1920, 1040)));
        size(SIZE_RESTORED);
        assert_eq!(cell.borrow().bounds(), Some(Rect::new(0, 0, 1920, 1080)));

        assert_eq!(
            ctrl.log(),
            [
                "bounds 0 0 800 599",
                "bounds 0 0 800 600",
                "bounds 0 0 1920 1040",
                "bounds 0 0 1920 1080",
            ]
        );
    }
}
