// ── Top-level window ──────────────────────────────────────────────────────────
//
// Responsibilities in this file (unsafe confined here):
//   • Register the window class and create the top-level window.
//   • Start embedding WebView2 and hand the controller to `BrowserControl`.
//   • Run the Win32 message loop.
//   • Route every message through the portable `Dispatcher`.
//   • Implement `NativeWindow` on top of the real Win32 calls.
//
// ── State ownership ───────────────────────────────────────────────────────────
//
// `Shared` is reference counted.  `Window` holds one strong reference and
// GWLP_USERDATA holds another, taken with `Rc::into_raw` after creation and
// released on WM_NCDESTROY.  The window procedure holds a third for the length
// of each call, because handlers may destroy the window re-entrantly.

#![allow(unsafe_code)]

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use windows::{
    core::{w, HSTRING, PCWSTR},
    Win32::{
        Foundation::{
            GetLastError, ERROR_CLASS_ALREADY_EXISTS, HINSTANCE, HWND, LPARAM, LRESULT, RECT,
            WPARAM,
        },
        Graphics::{
            Dwm::DwmExtendFrameIntoClientArea,
            Gdi::{
                GetMonitorInfoW, MonitorFromRect, MonitorFromWindow, UpdateWindow, HBRUSH,
                MONITORINFO, MONITOR_DEFAULTTONEAREST, MONITOR_DEFAULTTONULL,
            },
        },
        System::{
            Com::{CoInitializeEx, COINIT_APARTMENTTHREADED},
            LibraryLoader::GetModuleHandleW,
        },
        UI::{
            Controls::MARGINS,
            Input::KeyboardAndMouse::{ReleaseCapture, SetFocus},
            WindowsAndMessaging::{
                CreateWindowExW, DefWindowProcW, DestroyWindow, DispatchMessageW, GetClientRect,
                GetMessageW, GetWindowPlacement, IsZoomed, LoadCursorW, LoadIconW, MessageBoxW,
                PostMessageW, PostQuitMessage, RegisterClassExW, SetForegroundWindow,
                SetWindowPlacement, SetWindowPos, ShowWindow, TranslateMessage, CS_HREDRAW,
                CS_VREDRAW, CW_USEDEFAULT, GWLP_USERDATA, GWL_STYLE, HWND_TOP, IDC_ARROW,
                IDI_APPLICATION, MB_ICONERROR, MB_OK, MSG, SET_WINDOW_POS_FLAGS, SWP_FRAMECHANGED,
                SWP_NOMOVE, SWP_NOOWNERZORDER, SWP_NOSIZE, SWP_NOZORDER, SW_HIDE, SW_SHOW,
                WINDOWPLACEMENT, WINDOW_LONG_PTR_INDEX, WM_NCDESTROY, WNDCLASSEXW,
                WS_EX_APPWINDOW, WS_EX_CONTROLPARENT, WS_OVERLAPPEDWINDOW,
            },
        },
    },
};

use super::dpi;
use crate::{
    browser::{edge, try_attach, BrowserControl, PermissionState, ResourceContext},
    config::WindowOptions,
    error::{EdgeFrameError, Result},
    shell::{
        dispatch::{Dispatcher, Handling, Monitor, NativeWindow},
        events::Callbacks,
        geometry::{scale, Rect},
        messages::{lparam_is_rect, WindowMessage, WM_APP_ATTACH, WM_APP_QUIT, WM_NCLBUTTONDOWN},
        resize,
    },
};

// ── Window identity ───────────────────────────────────────────────────────────

/// Atom name used to register (and later find) the window class.
const CLASS_NAME: PCWSTR = w!("EdgeFrameWindow");

// ── Pointer-sized window longs ────────────────────────────────────────────────
//
// GetWindowLongPtrW only exists on 64-bit targets; on 32-bit the plain
// variant is already pointer sized.

#[cfg(target_pointer_width = "64")]
unsafe fn get_window_long(hwnd: HWND, index: WINDOW_LONG_PTR_INDEX) -> isize {
    windows::Win32::UI::WindowsAndMessaging::GetWindowLongPtrW(hwnd, index)
}

#[cfg(target_pointer_width = "64")]
unsafe fn set_window_long(hwnd: HWND, index: WINDOW_LONG_PTR_INDEX, value: isize) -> isize {
    windows::Win32::UI::WindowsAndMessaging::SetWindowLongPtrW(hwnd, index, value)
}

#[cfg(target_pointer_width = "32")]
unsafe fn get_window_long(hwnd: HWND, index: WINDOW_LONG_PTR_INDEX) -> isize {
    windows::Win32::UI::WindowsAndMessaging::GetWindowLongW(hwnd, index) as isize
}

#[cfg(target_pointer_width = "32")]
unsafe fn set_window_long(hwnd: HWND, index: WINDOW_LONG_PTR_INDEX, value: isize) -> isize {
    windows::Win32::UI::WindowsAndMessaging::SetWindowLongW(hwnd, index, value as i32) as isize
}

// ── Shared window state ───────────────────────────────────────────────────────

/// Style and placement saved on entering full-screen.
#[derive(Clone, Copy)]
struct SavedFrame {
    style: isize,
    placement: WINDOWPLACEMENT,
}

struct Shared {
    hwnd: HWND,
    options: WindowOptions,
    dispatcher: Dispatcher,
    browser: RefCell<BrowserControl<edge::EdgeController>>,
    /// Controller that arrived while `browser` was borrowed; WM_APP_ATTACH
    /// hands it over from the top of the message loop.
    parked: Cell<Option<edge::EdgeController>>,
    fullscreen: Cell<Option<SavedFrame>>,
}

impl Shared {
    fn attach_controller(&self, controller: edge::EdgeController) {
        let Err(controller) = try_attach(&self.browser, controller, self.client_rect()) else {
            return;
        };
        tracing::debug!("browser busy; controller attach deferred");
        self.parked.set(Some(controller));
        // SAFETY: hwnd is live; the message carries no pointers.
        if let Err(e) = unsafe { PostMessageW(self.hwnd, WM_APP_ATTACH, WPARAM(0), LPARAM(0)) } {
            tracing::error!(error = %e, "could not defer browser controller attach");
        }
    }
}

impl NativeWindow for Shared {
    fn focus(&self) {
        // SAFETY: hwnd is live for as long as Shared is reachable from it.
        // The previous focus owner is not needed.
        unsafe {
            let _ = SetFocus(self.hwnd);
        }
    }

    fn set_window_pos(&self, r: Rect, flags: u32) {
        // SAFETY: hwnd is live; HWND_TOP is ignored under SWP_NOZORDER.
        let result = unsafe {
            SetWindowPos(
                self.hwnd,
                HWND_TOP,
                r.left,
                r.top,
                r.width(),
                r.height(),
                SET_WINDOW_POS_FLAGS(flags),
            )
        };
        if let Err(e) = result {
            tracing::warn!(error = %e, rect = ?r, "SetWindowPos failed");
        }
    }

    fn extend_frame_into_client_area(&self) {
        // One pixel on every side keeps the DWM shadow and Win11 rounded
        // corners without showing caption buttons.
        let margins = MARGINS {
            cxLeftWidth: 1,
            cxRightWidth: 1,
            cyTopHeight: 1,
            cyBottomHeight: 1,
        };
        // SAFETY: hwnd is live; margins outlives the call.
        if let Err(e) = unsafe { DwmExtendFrameIntoClientArea(self.hwnd, &margins) } {
            tracing::debug!(error = %e, "DwmExtendFrameIntoClientArea failed");
        }
    }

    fn is_fullscreen(&self) -> bool {
        self.fullscreen.get().is_some()
    }

    fn is_maximized(&self) -> bool {
        // SAFETY: hwnd is live; IsZoomed is a read-only query.
        unsafe { IsZoomed(self.hwnd) }.as_bool()
    }

    fn monitor_from_rect(&self, rect: &Rect) -> Option<Monitor> {
        let rect = RECT::from(*rect);
        // SAFETY: rect is a valid RECT for the duration of the call.
        let monitor = unsafe { MonitorFromRect(&rect, MONITOR_DEFAULTTONULL) };
        if monitor.is_invalid() {
            return None;
        }

        let mut info = MONITORINFO {
            cbSize: std::mem::size_of::<MONITORINFO>() as u32,
            ..Default::default()
        };
        // SAFETY: monitor is valid; info.cbSize is set as the API requires.
        if !unsafe { GetMonitorInfoW(monitor, &mut info) }.as_bool() {
            return None;
        }

        let (dpi_x, dpi_y) = dpi::get_for_monitor(monitor);
        Some(Monitor {
            work_area: info.rcWork.into(),
            dpi_x,
            dpi_y,
        })
    }

    fn client_rect(&self) -> Rect {
        let mut rect = RECT::default();
        // SAFETY: hwnd is live; rect is a valid out-pointer.
        if let Err(e) = unsafe { GetClientRect(self.hwnd, &mut rect) } {
            tracing::warn!(error = %e, "GetClientRect failed");
        }
        rect.into()
    }

    fn hide(&self) {
        // SAFETY: hwnd is live.  Return value is the previous visibility.
        unsafe {
            let _ = ShowWindow(self.hwnd, SW_HIDE);
        }
    }

    fn destroy(&self) {
        // SAFETY: hwnd is live; DestroyWindow sends WM_DESTROY and
        // WM_NCDESTROY re-entrantly, which the window procedure tolerates.
        if let Err(e) = unsafe { DestroyWindow(self.hwnd) } {
            tracing::warn!(error = %e, "DestroyWindow failed");
        }
    }

    fn post_quit(&self) {
        // SAFETY: Posts WM_QUIT to this thread's queue; always safe.
        unsafe { PostQuitMessage(0) };
    }

    fn release_capture(&self) -> bool {
        // SAFETY: ReleaseCapture has no preconditions.
        unsafe { ReleaseCapture() }.is_ok()
    }

    fn post_nc_left_button_down(&self, hit_test: u32) {
        // SAFETY: hwnd is live; the message carries no pointers.
        let result = unsafe {
            PostMessageW(
                self.hwnd,
                WM_NCLBUTTONDOWN,
                WPARAM(hit_test as usize),
                LPARAM(0),
            )
        };
        if let Err(e) = result {
            tracing::warn!(error = %e, "PostMessageW(WM_NCLBUTTONDOWN) failed");
        }
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// A native top-level window with an embedded WebView2 browser.
///
/// Must be created, driven and dropped on one thread, the one that calls
/// [`run`](Self::run).
pub struct Window {
    shared: Rc<Shared>,
}

impl Window {
    /// Create and show the window, then start creating the browser engine.
    ///
    /// Returns before the engine is ready; navigation and the other browser
    /// calls made meanwhile are queued and replayed once it is.
    pub fn new(options: WindowOptions, callbacks: Callbacks) -> Result<Self> {
        dpi::init();

        // SAFETY: Initialises COM for this thread as WebView2 requires.  A
        // repeat call on the same thread returns S_FALSE, which `ok()` accepts.
        unsafe { CoInitializeEx(None, COINIT_APARTMENTTHREADED) }
            .ok()
            .map_err(win32("CoInitializeEx"))?;

        // SAFETY: GetModuleHandleW(None) returns the .exe's own HMODULE, which
        // is valid for the process lifetime.
        let hmodule = unsafe { GetModuleHandleW(None) }.map_err(win32("GetModuleHandleW"))?;
        let hinstance = HINSTANCE(hmodule.0);

        register_class(hinstance)?;
        let hwnd = create_window(hinstance, &options)?;

        let shared = Rc::new(Shared {
            hwnd,
            dispatcher: Dispatcher::new(&options),
            browser: RefCell::new(BrowserControl::new()),
            parked: Cell::new(None),
            fullscreen: Cell::new(None),
            options,
        });

        // SAFETY: hwnd is live and owned by this thread.  The pointer is
        // reclaimed exactly once, on WM_NCDESTROY.
        unsafe {
            set_window_long(hwnd, GWLP_USERDATA, Rc::into_raw(shared.clone()) as isize);
        }

        if shared.options.frameless {
            shared.extend_frame_into_client_area();
            // Re-run WM_NCCALCSIZE now that the frameless policy is reachable.
            shared.set_window_pos(
                Rect::default(),
                (SWP_NOMOVE | SWP_NOSIZE | SWP_NOZORDER | SWP_FRAMECHANGED).0,
            );
        }

        // SAFETY: hwnd is live.  Return values (previous visibility, previous
        // focus, foreground success) are intentionally ignored.
        unsafe {
            let _ = ShowWindow(hwnd, SW_SHOW);
            let _ = UpdateWindow(hwnd);
            let _ = SetForegroundWindow(hwnd);
            let _ = SetFocus(hwnd);
        }

        let weak = Rc::downgrade(&shared);
        edge::embed(
            hwnd,
            &shared.options,
            Rc::new(RefCell::new(callbacks)),
            move |controller| {
                if let Some(shared) = weak.upgrade() {
                    shared.attach_controller(controller);
                }
            },
        )
        .inspect_err(|_| shared.destroy())?;

        let window = Self { shared };
        window.with_browser(|b| {
            b.set_global_permission(PermissionState::Allow)?;
            b.add_web_resource_requested_filter("*", ResourceContext::All)?;
            if let Some(url) = window.shared.options.initial_url.clone() {
                b.navigate(&url)?;
            }
            Ok(())
        })?;

        tracing::info!(frameless = window.shared.options.frameless, "window created");
        Ok(window)
    }

    /// Drive the message loop until the window is destroyed or [`quit`]
    /// is called.
    ///
    /// [`quit`]: Self::quit
    pub fn run(&self) -> Result<()> {
        message_loop()
    }

    /// Destroy the window and end [`run`](Self::run), regardless of
    /// `minimize_on_quit`.  Posted, so it also works from inside callbacks.
    pub fn quit(&self) {
        // SAFETY: hwnd may already be destroyed; PostMessageW then fails,
        // which is the desired no-op.
        if let Err(e) = unsafe { PostMessageW(self.shared.hwnd, WM_APP_QUIT, WPARAM(0), LPARAM(0)) }
        {
            tracing::debug!(error = %e, "quit after window was destroyed");
        }
    }

    /// Begin an OS drag-resize from a named edge such as `"bottom-right"`.
    pub fn start_resize(&self, edge: &str) -> Result<()> {
        resize::start_resize(&*self.shared, edge)
    }

    pub fn is_maximized(&self) -> bool {
        self.shared.is_maximized()
    }

    pub fn is_fullscreen(&self) -> bool {
        self.shared.is_fullscreen()
    }

    /// Cover the whole monitor without a frame, or restore the previous
    /// style and placement.
    pub fn set_fullscreen(&self, enable: bool) -> Result<()> {
        if self.is_fullscreen() == enable {
            return Ok(());
        }
        let hwnd = self.shared.hwnd;

        if enable {
            let mut placement = WINDOWPLACEMENT {
                length: std::mem::size_of::<WINDOWPLACEMENT>() as u32,
                ..Default::default()
            };
            // SAFETY: hwnd is live; placement.length is set as required.
            unsafe { GetWindowPlacement(hwnd, &mut placement) }
                .map_err(win32("GetWindowPlacement"))?;

            // SAFETY: hwnd is live; MONITOR_DEFAULTTONEAREST never yields null.
            let monitor = unsafe { MonitorFromWindow(hwnd, MONITOR_DEFAULTTONEAREST) };
            let mut info = MONITORINFO {
                cbSize: std::mem::size_of::<MONITORINFO>() as u32,
                ..Default::default()
            };
            // SAFETY: monitor is valid; info.cbSize is set.
            if !unsafe { GetMonitorInfoW(monitor, &mut info) }.as_bool() {
                return Err(last_error("GetMonitorInfoW"));
            }

            // SAFETY: hwnd is live; GWL_STYLE is a valid index.
            let style = unsafe { get_window_long(hwnd, GWL_STYLE) };
            // State first: the SetWindowPos below sends WM_NCCALCSIZE.
            self.shared.fullscreen.set(Some(SavedFrame { style, placement }));

            let r = Rect::from(info.rcMonitor);
            // SAFETY: hwnd is live; the new style only clears frame bits.
            unsafe {
                set_window_long(hwnd, GWL_STYLE, style & !(WS_OVERLAPPEDWINDOW.0 as isize));
                SetWindowPos(
                    hwnd,
                    HWND_TOP,
                    r.left,
                    r.top,
                    r.width(),
                    r.height(),
                    SWP_NOOWNERZORDER | SWP_FRAMECHANGED,
                )
            }
            .map_err(win32("SetWindowPos"))?;
        } else if let Some(saved) = self.shared.fullscreen.take() {
            // SAFETY: hwnd is live; saved holds the style and placement read
            // from this same window.
            unsafe {
                set_window_long(hwnd, GWL_STYLE, saved.style);
                SetWindowPlacement(hwnd, &saved.placement).map_err(win32("SetWindowPlacement"))?;
                SetWindowPos(
                    hwnd,
                    HWND_TOP,
                    0,
                    0,
                    0,
                    0,
                    SWP_NOMOVE | SWP_NOSIZE | SWP_NOZORDER | SWP_NOOWNERZORDER | SWP_FRAMECHANGED,
                )
                .map_err(win32("SetWindowPos"))?;
            }
        }
        tracing::debug!(enable, "full-screen toggled");
        Ok(())
    }

    pub fn navigate(&self, url: &str) -> Result<()> {
        self.with_browser(|b| b.navigate(url))
    }

    pub fn eval(&self, script: &str) -> Result<()> {
        self.with_browser(|b| b.eval(script))
    }

    /// Deliver `json` to the page's `window.chrome.webview` message listeners.
    pub fn post_web_message(&self, json: &str) -> Result<()> {
        self.with_browser(|b| b.post_web_message(json))
    }

    /// Run `script` at the start of every document loaded from now on.
    pub fn add_init_script(&self, script: &str) -> Result<()> {
        self.with_browser(|b| b.add_init_script(script))
    }

    pub fn hwnd(&self) -> HWND {
        self.shared.hwnd
    }

    fn with_browser<R>(
        &self,
        f: impl FnOnce(&mut BrowserControl<edge::EdgeController>) -> Result<R>,
    ) -> Result<R> {
        let mut browser = self
            .shared
            .browser
            .try_borrow_mut()
            .map_err(|_| EdgeFrameError::Busy)?;
        f(&mut browser)
    }
}

/// Show a modal error dialog with the given message.
///
/// Safe to call from any context; performs the UTF-16 conversion internally.
pub fn show_error_dialog(message: &str) {
    let text = HSTRING::from(message);

    // SAFETY: text is a valid null-terminated UTF-16 string that remains
    // allocated for the duration of the MessageBoxW call.
    // A null owner means the dialog has no owner window.
    unsafe {
        let _ = MessageBoxW(None, &text, w!("edgeframe — Fatal Error"), MB_OK | MB_ICONERROR);
    }
}

// ── Window class registration ─────────────────────────────────────────────────

fn register_class(hinstance: HINSTANCE) -> Result<()> {
    // SAFETY: IDI_APPLICATION and IDC_ARROW are built-in resources that exist
    // on every Windows version.
    let icon = unsafe { LoadIconW(None, IDI_APPLICATION) }.map_err(win32("LoadIconW"))?;
    let cursor = unsafe { LoadCursorW(None, IDC_ARROW) }.map_err(win32("LoadCursorW"))?;

    let wndclass = WNDCLASSEXW {
        cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
        style: CS_HREDRAW | CS_VREDRAW,
        lpfnWndProc: Some(wnd_proc),
        cbClsExtra: 0,
        cbWndExtra: 0,
        hInstance: hinstance,
        hIcon: icon,
        hCursor: cursor,
        // The browser covers the client area; no background erase.
        hbrBackground: HBRUSH::default(),
        lpszMenuName: PCWSTR::null(),
        lpszClassName: CLASS_NAME,
        hIconSm: icon,
    };

    // SAFETY: wndclass is fully initialised with valid handles;
    // CLASS_NAME is a valid null-terminated UTF-16 string literal.
    let atom = unsafe { RegisterClassExW(&wndclass) };
    if atom == 0 {
        // SAFETY: reads the error set by the RegisterClassExW call above.
        let code = unsafe { GetLastError() };
        // A second Window in the same process reuses the class.
        if code != ERROR_CLASS_ALREADY_EXISTS {
            return Err(EdgeFrameError::Win32 {
                function: "RegisterClassExW",
                code: code.0,
            });
        }
    }

    Ok(())
}

// ── Window creation ───────────────────────────────────────────────────────────

fn create_window(hinstance: HINSTANCE, options: &WindowOptions) -> Result<HWND> {
    let (width, height) = options.initial_size();
    let dpi = dpi::get_system_dpi();
    let title = HSTRING::from(options.title.as_str());

    // SAFETY: CLASS_NAME is registered; hinstance is the exe's module; title
    // outlives the call.  No parent, no menu, no creation data.
    unsafe {
        CreateWindowExW(
            WS_EX_CONTROLPARENT | WS_EX_APPWINDOW,
            CLASS_NAME,
            &title,
            WS_OVERLAPPEDWINDOW,
            CW_USEDEFAULT,
            CW_USEDEFAULT,
            scale(width, dpi),
            scale(height, dpi),
            None,
            None,
            hinstance,
            None,
        )
    }
    .map_err(win32("CreateWindowExW"))
}

// ── Message loop ──────────────────────────────────────────────────────────────

fn message_loop() -> Result<()> {
    let mut msg = MSG::default();

    loop {
        // SAFETY: &mut msg is a valid MSG pointer; a null HWND retrieves
        // messages for all windows on this thread; 0,0 filter accepts all.
        let ret = unsafe { GetMessageW(&mut msg, None, 0, 0) };

        match ret.0 {
            // GetMessage returns -1 on error.
            -1 => return Err(last_error("GetMessageW")),
            // Returns 0 when WM_QUIT is retrieved — exit the loop cleanly.
            0 => break,
            _ => unsafe {
                // SAFETY: msg was populated by a successful GetMessage call.
                let _ = TranslateMessage(&msg);
                let _ = DispatchMessageW(&msg);
            },
        }
    }

    tracing::debug!("message loop finished");
    Ok(())
}

// ── Window procedure ──────────────────────────────────────────────────────────

// SAFETY: wnd_proc is registered as lpfnWndProc in WNDCLASSEXW.
// Windows guarantees that hwnd, msg, wparam, and lparam are valid for the
// lifetime of this call; we must not store hwnd beyond the message handler.
unsafe extern "system" fn wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    let ptr = get_window_long(hwnd, GWLP_USERDATA) as *const Shared;

    // Messages sent from inside CreateWindowExW arrive before the state is
    // attached.
    if ptr.is_null() {
        return DefWindowProcW(hwnd, msg, wparam, lparam);
    }

    if msg == WM_NCDESTROY {
        set_window_long(hwnd, GWLP_USERDATA, 0);
        // SAFETY: balances the Rc::into_raw in Window::new; the slot is
        // cleared first so no later message can observe the pointer.
        drop(Rc::from_raw(ptr));
        return DefWindowProcW(hwnd, msg, wparam, lparam);
    }

    // SAFETY: ptr is the live Rc stored in Window::new.  Taking our own strong
    // reference keeps it alive across a re-entrant WM_NCDESTROY.
    Rc::increment_strong_count(ptr);
    let shared = Rc::from_raw(ptr);

    if msg == WM_APP_ATTACH {
        if let Some(controller) = shared.parked.take() {
            shared.attach_controller(controller);
        }
        return LRESULT(0);
    }

    // SAFETY: for the messages `lparam_is_rect` names, LPARAM points at a RECT
    // (WM_NCCALCSIZE: the first member of NCCALCSIZE_PARAMS) that is writable
    // for this call.  `Rect` is `#[repr(C)]` with RECT's layout.
    let rect = if lparam_is_rect(msg) && lparam.0 != 0 {
        Some(&mut *(lparam.0 as *mut Rect))
    } else {
        None
    };

    let message = WindowMessage::decode(msg, wparam.0, rect);
    match shared.dispatcher.dispatch(message, &*shared, &shared.browser) {
        Handling::Handled(result) => LRESULT(result),
        Handling::Default => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}

// ── Error helpers ─────────────────────────────────────────────────────────────

/// Map a windows-crate error to `EdgeFrameError::Win32` tagged with the
/// failing function.
fn win32(function: &'static str) -> impl FnOnce(windows::core::Error) -> EdgeFrameError {
    move |e| EdgeFrameError::Win32 {
        function,
        code: e.code().0 as u32,
    }
}

/// Capture the current Win32 last-error code and wrap it in an `EdgeFrameError`.
///
/// Call immediately after a Win32 function that signals failure — `GetLastError`
/// reads thread-local state that can be overwritten by any subsequent API call.
fn last_error(function: &'static str) -> EdgeFrameError {
    // SAFETY: GetLastError reads thread-local state set by the last Win32 call.
    let code = unsafe { GetLastError() };
    EdgeFrameError::Win32 {
        function,
        code: code.0,
    }
}
