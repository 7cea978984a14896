// ── WebView2 hosting ──────────────────────────────────────────────────────────
//
// This is one of exactly two modules where `unsafe` is permitted (the other is
// `platform::win32`).  Every `unsafe` block MUST carry a `// SAFETY:` comment.
//
// ── Creation model ────────────────────────────────────────────────────────────
//
// `embed` starts environment creation and returns immediately.  The engine
// calls back on the message-loop thread, we then create the controller, and
// its completion hands a ready `EdgeController` to the window.  Between
// `embed` and that hand-off `BrowserControl` has no controller.
//
// Event handlers stay registered for the life of the webview, so their
// registration tokens are discarded.

#![allow(unsafe_code)]

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use webview2_com::{
    take_pwstr, AddScriptToExecuteOnDocumentCreatedCompletedHandler,
    CoreWebView2EnvironmentOptions, CreateCoreWebView2ControllerCompletedHandler,
    CreateCoreWebView2EnvironmentCompletedHandler, ExecuteScriptCompletedHandler,
    Microsoft::Web::WebView2::Win32::{
        CreateCoreWebView2EnvironmentWithOptions, ICoreWebView2, ICoreWebView2Controller,
        ICoreWebView2Environment, ICoreWebView2EnvironmentOptions,
        ICoreWebView2WebResourceRequestedEventArgs, COREWEBVIEW2_PERMISSION_STATE,
        COREWEBVIEW2_WEB_RESOURCE_CONTEXT,
    },
    NavigationCompletedEventHandler, PermissionRequestedEventHandler,
    WebMessageReceivedEventHandler, WebResourceRequestedEventHandler,
};
use windows::{
    core::{HSTRING, PCWSTR, PWSTR},
    Win32::{
        Foundation::{BOOL, HWND},
        System::WinRT::EventRegistrationToken,
        UI::Shell::SHCreateMemStream,
    },
};

use super::{Controller, PermissionState, ResourceContext};
use crate::{
    config::WindowOptions,
    error::Result,
    shell::{
        events::{Callbacks, NavigationCompleted, ResourceRequest, WebMessage},
        geometry::Rect,
    },
};

// ── EdgeController ────────────────────────────────────────────────────────────

/// A live WebView2 controller and its webview.
pub(crate) struct EdgeController {
    controller: ICoreWebView2Controller,
    webview: ICoreWebView2,
    /// Read by the PermissionRequested handler.
    permission: Rc<Cell<PermissionState>>,
}

impl EdgeController {
    fn new(
        controller: ICoreWebView2Controller,
        environment: &ICoreWebView2Environment,
        callbacks: &Rc<RefCell<Callbacks>>,
    ) -> Result<Self> {
        // SAFETY: controller was just handed to us by a successful
        // CreateCoreWebView2Controller completion; CoreWebView2 is a getter.
        let webview = unsafe { controller.CoreWebView2()? };
        let permission = Rc::new(Cell::new(PermissionState::default()));

        attach_permission_handler(&webview, permission.clone())?;
        attach_message_handler(&webview, callbacks.clone())?;
        attach_navigation_handler(&webview, callbacks.clone())?;
        attach_resource_handler(&webview, environment.clone(), callbacks.clone())?;

        Ok(Self {
            controller,
            webview,
            permission,
        })
    }
}

impl Controller for EdgeController {
    fn put_bounds(&self, bounds: Rect) -> Result<()> {
        // SAFETY: controller is live until Drop.  The `windows` ABI passes RECT
        // by value correctly on every target, including the 32-bit split.
        unsafe { self.controller.SetBounds(bounds.into())? };
        Ok(())
    }

    fn notify_parent_window_position_changed(&self) -> Result<()> {
        // SAFETY: controller is live until Drop.
        unsafe { self.controller.NotifyParentWindowPositionChanged()? };
        Ok(())
    }

    fn navigate(&self, url: &str) -> Result<()> {
        let url = HSTRING::from(url);
        // SAFETY: url is a valid null-terminated string for the call.
        unsafe { self.webview.Navigate(&url)? };
        Ok(())
    }

    fn eval(&self, script: &str) -> Result<()> {
        let script = HSTRING::from(script);
        let done = ExecuteScriptCompletedHandler::create(Box::new(|_, _| Ok(())));
        // SAFETY: script outlives the call; the engine copies it.
        unsafe { self.webview.ExecuteScript(&script, &done)? };
        Ok(())
    }

    fn post_web_message(&self, json: &str) -> Result<()> {
        let json = HSTRING::from(json);
        // SAFETY: json outlives the call; the engine copies it.
        unsafe { self.webview.PostWebMessageAsJson(&json)? };
        Ok(())
    }

    fn add_init_script(&self, script: &str) -> Result<()> {
        let script = HSTRING::from(script);
        let done =
            AddScriptToExecuteOnDocumentCreatedCompletedHandler::create(Box::new(|_, _| Ok(())));
        // SAFETY: script outlives the call; the engine copies it.
        unsafe { self.webview.AddScriptToExecuteOnDocumentCreated(&script, &done)? };
        Ok(())
    }

    fn add_web_resource_requested_filter(
        &self,
        filter: &str,
        context: ResourceContext,
    ) -> Result<()> {
        let filter = HSTRING::from(filter);
        // SAFETY: filter outlives the call; context discriminants match the
        // COREWEBVIEW2_WEB_RESOURCE_CONTEXT values.
        unsafe {
            self.webview.AddWebResourceRequestedFilter(
                &filter,
                COREWEBVIEW2_WEB_RESOURCE_CONTEXT(context as i32),
            )?
        };
        Ok(())
    }

    fn set_global_permission(&self, state: PermissionState) -> Result<()> {
        self.permission.set(state);
        Ok(())
    }
}

impl Drop for EdgeController {
    fn drop(&mut self) {
        // SAFETY: controller is live; Close releases the browser process side.
        // Any error here is unrecoverable and unobservable.
        unsafe {
            let _ = self.controller.Close();
        }
    }
}

// ── Creation ──────────────────────────────────────────────────────────────────

/// Start creating the engine for `hwnd`.  `on_ready` runs on the message-loop
/// thread once the controller exists; on failure it never runs and the
/// browser stays empty.
pub(crate) fn embed(
    hwnd: HWND,
    options: &WindowOptions,
    callbacks: Rc<RefCell<Callbacks>>,
    on_ready: impl FnOnce(EdgeController) + 'static,
) -> Result<()> {
    let arguments = HSTRING::from(options.browser_arguments());
    let data_path = options.data_path.as_deref().map(HSTRING::from);
    let browser_path = options.browser_path.as_deref().map(HSTRING::from);

    let env_options: ICoreWebView2EnvironmentOptions =
        CoreWebView2EnvironmentOptions::default().into();
    // SAFETY: arguments outlives the call; the options object copies it.
    unsafe { env_options.SetAdditionalBrowserArguments(&arguments)? };

    let handler = CreateCoreWebView2EnvironmentCompletedHandler::create(Box::new(
        move |result, environment| {
            match (result, environment) {
                (Ok(()), Some(environment)) => {
                    create_controller(hwnd, environment, callbacks, on_ready);
                }
                (Ok(()), None) => tracing::error!("WebView2 returned no environment"),
                (Err(e), _) => tracing::error!(error = %e, "WebView2 environment creation failed"),
            }
            Ok(())
        },
    ));

    tracing::debug!(arguments = %options.browser_arguments(), "creating WebView2 environment");

    // SAFETY: both folder strings (when present) live until this call returns,
    // which is all the API requires; a null PCWSTR selects the default.
    unsafe {
        CreateCoreWebView2EnvironmentWithOptions(
            optional_pcwstr(&browser_path),
            optional_pcwstr(&data_path),
            &env_options,
            &handler,
        )?;
    }
    Ok(())
}

fn create_controller(
    hwnd: HWND,
    environment: ICoreWebView2Environment,
    callbacks: Rc<RefCell<Callbacks>>,
    on_ready: impl FnOnce(EdgeController) + 'static,
) {
    let env = environment.clone();
    let handler = CreateCoreWebView2ControllerCompletedHandler::create(Box::new(
        move |result, controller| {
            match (result, controller) {
                (Ok(()), Some(controller)) => {
                    match EdgeController::new(controller, &env, &callbacks) {
                        Ok(edge) => on_ready(edge),
                        Err(e) => tracing::error!(error = %e, "WebView2 setup failed"),
                    }
                }
                (Ok(()), None) => tracing::error!("WebView2 returned no controller"),
                (Err(e), _) => tracing::error!(error = %e, "WebView2 controller creation failed"),
            }
            Ok(())
        },
    ));

    // SAFETY: hwnd is the live parent window that owns this environment.
    if let Err(e) = unsafe { environment.CreateCoreWebView2Controller(hwnd, &handler) } {
        tracing::error!(error = %e, "CreateCoreWebView2Controller failed");
    }
}

fn optional_pcwstr(s: &Option<HSTRING>) -> PCWSTR {
    s.as_ref().map_or(PCWSTR::null(), |h| PCWSTR(h.as_ptr()))
}

/// Run `f` on the host callbacks unless they are already running further up
/// the stack.
fn with_callbacks<R>(
    callbacks: &Rc<RefCell<Callbacks>>,
    f: impl FnOnce(&mut Callbacks) -> R,
) -> Option<R> {
    match callbacks.try_borrow_mut() {
        Ok(mut cb) => Some(f(&mut cb)),
        Err(_) => {
            tracing::warn!("engine event raised from inside a host callback; dropped");
            None
        }
    }
}

// ── Event handlers ────────────────────────────────────────────────────────────
//
// Each handler is a COM object created by webview2-com that owns its closure.
// The engine invokes it on the message-loop thread with `args` valid for the
// duration of the call only, so nothing borrowed from `args` is kept.

fn attach_permission_handler(
    webview: &ICoreWebView2,
    state: Rc<Cell<PermissionState>>,
) -> Result<()> {
    let handler = PermissionRequestedEventHandler::create(Box::new(move |_, args| {
        let Some(args) = args else {
            return Ok(());
        };
        // SAFETY: args is live for this call; PermissionState discriminants
        // match COREWEBVIEW2_PERMISSION_STATE.
        unsafe { args.SetState(COREWEBVIEW2_PERMISSION_STATE(state.get() as i32)) }
    }));
    let mut token = EventRegistrationToken::default();
    // SAFETY: webview is live; token is a valid out-pointer.
    unsafe { webview.add_PermissionRequested(&handler, &mut token)? };
    Ok(())
}

fn attach_message_handler(
    webview: &ICoreWebView2,
    callbacks: Rc<RefCell<Callbacks>>,
) -> Result<()> {
    let handler = WebMessageReceivedEventHandler::create(Box::new(move |_, args| {
        let Some(args) = args else {
            return Ok(());
        };

        // SAFETY: args is live for this call.  Each getter fills a
        // CoTaskMem string that take_pwstr copies and frees.
        let (source, body) = unsafe {
            let mut source = PWSTR::null();
            args.Source(&mut source)?;
            let source = take_pwstr(source);

            // Non-string payloads fail TryGetWebMessageAsString; fall back to
            // their JSON text.
            let mut body = PWSTR::null();
            let body = if args.TryGetWebMessageAsString(&mut body).is_ok() {
                take_pwstr(body)
            } else {
                let mut json = PWSTR::null();
                args.WebMessageAsJson(&mut json)?;
                take_pwstr(json)
            };
            (source, body)
        };

        with_callbacks(&callbacks, |cb| cb.message(WebMessage { source, body }));
        Ok(())
    }));
    let mut token = EventRegistrationToken::default();
    // SAFETY: webview is live; token is a valid out-pointer.
    unsafe { webview.add_WebMessageReceived(&handler, &mut token)? };
    Ok(())
}

fn attach_navigation_handler(
    webview: &ICoreWebView2,
    callbacks: Rc<RefCell<Callbacks>>,
) -> Result<()> {
    let handler = NavigationCompletedEventHandler::create(Box::new(move |sender, args| {
        let Some(args) = args else {
            return Ok(());
        };

        let mut success = BOOL::default();
        // SAFETY: args is live for this call; success is a valid out-pointer.
        unsafe { args.IsSuccess(&mut success)? };

        let uri = match sender {
            Some(webview) => {
                let mut uri = PWSTR::null();
                // SAFETY: sender is the live webview raising the event; the
                // returned CoTaskMem string is freed by take_pwstr.
                unsafe {
                    webview.Source(&mut uri)?;
                    take_pwstr(uri)
                }
            }
            None => String::new(),
        };

        let event = NavigationCompleted {
            success: success.as_bool(),
            uri,
        };
        tracing::debug!(?event, "navigation completed");
        with_callbacks(&callbacks, |cb| cb.navigation_completed(event));
        Ok(())
    }));
    let mut token = EventRegistrationToken::default();
    // SAFETY: webview is live; token is a valid out-pointer.
    unsafe { webview.add_NavigationCompleted(&handler, &mut token)? };
    Ok(())
}

fn attach_resource_handler(
    webview: &ICoreWebView2,
    environment: ICoreWebView2Environment,
    callbacks: Rc<RefCell<Callbacks>>,
) -> Result<()> {
    let handler = WebResourceRequestedEventHandler::create(Box::new(move |_, args| {
        let Some(args) = args else {
            return Ok(());
        };
        serve_resource(&environment, &args, &callbacks)
    }));
    let mut token = EventRegistrationToken::default();
    // SAFETY: webview is live; token is a valid out-pointer.
    unsafe { webview.add_WebResourceRequested(&handler, &mut token)? };
    Ok(())
}

/// Ask the host about one request and install its response, if any.
fn serve_resource(
    environment: &ICoreWebView2Environment,
    args: &ICoreWebView2WebResourceRequestedEventArgs,
    callbacks: &Rc<RefCell<Callbacks>>,
) -> windows::core::Result<()> {
    // SAFETY: args is live for this handler call.  Uri and Method fill
    // CoTaskMem strings that take_pwstr copies and frees.
    let request = unsafe {
        let request = args.Request()?;
        let mut uri = PWSTR::null();
        request.Uri(&mut uri)?;
        let mut method = PWSTR::null();
        request.Method(&mut method)?;
        ResourceRequest {
            uri: take_pwstr(uri),
            method: take_pwstr(method),
        }
    };

    let Some(response) = with_callbacks(callbacks, |cb| cb.resource_requested(&request)).flatten()
    else {
        return Ok(());
    };
    tracing::debug!(uri = %request.uri, status = response.status, "serving intercepted request");

    let reason = HSTRING::from(response.reason.as_str());
    let headers = HSTRING::from(response.header_block());
    // SAFETY: SHCreateMemStream copies the body, so the stream does not
    // borrow `response`.  environment and args are live; the strings outlive
    // the calls.
    unsafe {
        let stream = if response.body.is_empty() {
            None
        } else {
            SHCreateMemStream(Some(response.body.as_slice()))
        };
        let response = environment.CreateWebResourceResponse(
            stream.as_ref(),
            i32::from(response.status),
            &reason,
            &headers,
        )?;
        args.SetResponse(&response)
    }
}
