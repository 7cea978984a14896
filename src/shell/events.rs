// ── Host callbacks ────────────────────────────────────────────────────────────
//
// Engine events surfaced to the host.  All callbacks run synchronously on the
// message-loop thread, from inside the engine's event handler.

/// A message the page posted with `window.chrome.webview.postMessage`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebMessage {
    /// URL of the document that sent it.
    pub source: String,
    /// The string payload, or the JSON text for non-string payloads.
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRequest {
    pub uri: String,
    pub method: String,
}

/// A response served in place of the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceResponse {
    pub status: u16,
    pub reason: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl ResourceResponse {
    pub fn ok(content_type: &str, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            reason: "OK".to_owned(),
            headers: vec![("Content-Type".to_owned(), content_type.to_owned())],
            body: body.into(),
        }
    }

    pub fn not_found() -> Self {
        Self {
            status: 404,
            reason: "Not Found".to_owned(),
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Headers in the CRLF-separated form the engine expects.
    pub fn header_block(&self) -> String {
        self.headers
            .iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect::<Vec<_>>()
            .join("\r\n")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationCompleted {
    pub success: bool,
    /// Document URL after the navigation.
    pub uri: String,
}

type MessageFn = Box<dyn FnMut(WebMessage)>;
type ResourceFn = Box<dyn FnMut(&ResourceRequest) -> Option<ResourceResponse>>;
type NavigationFn = Box<dyn FnMut(NavigationCompleted)>;

/// Optional handlers for engine events.
#[derive(Default)]
pub struct Callbacks {
    on_message: Option<MessageFn>,
    on_resource_requested: Option<ResourceFn>,
    on_navigation_completed: Option<NavigationFn>,
}

impl Callbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_message(mut self, f: impl FnMut(WebMessage) + 'static) -> Self {
        self.on_message = Some(Box::new(f));
        self
    }

    /// Returning `Some` answers the request; `None` lets it go to the network.
    pub fn on_resource_requested(
        mut self,
        f: impl FnMut(&ResourceRequest) -> Option<ResourceResponse> + 'static,
    ) -> Self {
        self.on_resource_requested = Some(Box::new(f));
        self
    }

    pub fn on_navigation_completed(mut self, f: impl FnMut(NavigationCompleted) + 'static) -> Self {
        self.on_navigation_completed = Some(Box::new(f));
        self
    }

    pub fn message(&mut self, message: WebMessage) {
        if let Some(f) = &mut self.on_message {
            f(message);
        }
    }

    pub fn resource_requested(&mut self, request: &ResourceRequest) -> Option<ResourceResponse> {
        self.on_resource_requested.as_mut().and_then(|f| f(request))
    }

    pub fn navigation_completed(&mut self, event: NavigationCompleted) {
        if let Some(f) = &mut self.on_navigation_completed {
            f(event);
        }
    }
}

impl std::fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_message", &self.on_message.is_some())
            .field("on_resource_requested", &self.on_resource_requested.is_some())
            .field("on_navigation_completed", &self.on_navigation_completed.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;

    #[test]
    fn missing_callbacks_are_ignored() {
        let mut cb = Callbacks::new();
        cb.message(WebMessage { source: "a".into(), body: "b".into() });
        cb.navigation_completed(NavigationCompleted { success: true, uri: "a".into() });
        let req = ResourceRequest { uri: "https://x/".into(), method: "GET".into() };
        assert_eq!(cb.resource_requested(&req), None);
    }

    #[test]
    fn callbacks_receive_events() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let (s1, s2) = (seen.clone(), seen.clone());
        let mut cb = Callbacks::new()
            .on_message(move |m| s1.borrow_mut().push(m.body))
            .on_navigation_completed(move |n| s2.borrow_mut().push(format!("{} {}", n.success, n.uri)))
            .on_resource_requested(|req| {
                req.uri
                    .ends_with("/app.js")
                    .then(|| ResourceResponse::ok("text/javascript", "1"))
            });

        cb.message(WebMessage { source: "app://".into(), body: "{\"ping\":1}".into() });
        cb.navigation_completed(NavigationCompleted { success: false, uri: "https://x/".into() });
        assert_eq!(*seen.borrow(), ["{\"ping\":1}", "false https://x/"]);

        let hit = ResourceRequest { uri: "https://x/app.js".into(), method: "GET".into() };
        let miss = ResourceRequest { uri: "https://x/a.css".into(), method: "GET".into() };
        assert_eq!(cb.resource_requested(&hit).map(|r| r.status), Some(200));
        assert_eq!(cb.resource_requested(&miss), None);
    }

    #[test]
    fn header_block_is_crlf_joined() {
        let mut resp = ResourceResponse::ok("text/html", "<p>");
        resp.headers.push(("Cache-Control".into(), "no-store".into()));
        assert_eq!(resp.header_block(), "Content-Type: text/html\r\nCache-Control: no-store");
        assert_eq!(ResourceResponse::not_found().header_block(), "");
    }
}
