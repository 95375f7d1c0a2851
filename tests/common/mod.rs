//! Shared test doubles: a recording surface and a scripted HTTP client
//! factory that lets tests control response content and completion order.

#![allow(dead_code)]

use adstream::classify::ResponseDirectives;
use adstream::config::FetchConfig;
use adstream::error::{AdapterError, ErrorReason, FetchError};
use adstream::http::{AdHttpClient, AdResponse, ClientFactory, ResponseHeaders};
use adstream::registry::CustomEventRegistry;
use adstream::surface::AdSurface;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// What the surface observed, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    CustomEvent(HashMap<String, String>),
    LegacyCustomEvent(String),
    NativeContent(HashMap<String, String>),
    HtmlContent(String),
    Succeeded,
    Failed(ErrorReason),
}

/// Recording mock surface with a registry-backed legacy bridge.
pub struct MockSurface {
    events: Mutex<Vec<SurfaceEvent>>,
    pub torn_down: AtomicBool,
    refresh_ms: AtomicU64,
    pub registry: CustomEventRegistry<()>,
    settings: Mutex<Vec<ResponseDirectives>>,
}

impl MockSurface {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            torn_down: AtomicBool::new(false),
            refresh_ms: AtomicU64::new(60_000),
            registry: CustomEventRegistry::new(),
            settings: Mutex::new(Vec::new()),
        }
    }

    pub fn events(&self) -> Vec<SurfaceEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn applied_settings(&self) -> Vec<ResponseDirectives> {
        self.settings.lock().unwrap().clone()
    }

    fn record(&self, event: SurfaceEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl AdSurface for MockSurface {
    fn is_torn_down(&self) -> bool {
        self.torn_down.load(Ordering::SeqCst)
    }

    fn load_custom_event(&self, params: HashMap<String, String>) -> Result<(), AdapterError> {
        self.record(SurfaceEvent::CustomEvent(params));
        Ok(())
    }

    fn load_legacy_custom_event(&self, method_name: &str) -> Result<(), AdapterError> {
        self.registry.dispatch(method_name, &())?;
        self.record(SurfaceEvent::LegacyCustomEvent(method_name.to_string()));
        Ok(())
    }

    fn load_native_content(&self, params: HashMap<String, String>) {
        self.record(SurfaceEvent::NativeContent(params));
    }

    fn load_html_content(&self, markup: String) {
        self.record(SurfaceEvent::HtmlContent(markup));
    }

    fn on_fetch_succeeded(&self) {
        self.record(SurfaceEvent::Succeeded);
    }

    fn on_fetch_failed(&self, reason: ErrorReason) {
        self.record(SurfaceEvent::Failed(reason));
    }

    fn refresh_interval_ms(&self) -> u64 {
        self.refresh_ms.load(Ordering::SeqCst)
    }

    fn set_refresh_interval_ms(&self, interval_ms: u64) {
        self.refresh_ms.store(interval_ms, Ordering::SeqCst);
    }

    fn apply_settings(&self, directives: &ResponseDirectives) {
        self.settings.lock().unwrap().push(directives.clone());
    }
}

/// One scripted fetch: an optional gate the response waits behind, then the
/// canned result.
pub struct Script {
    pub gate: Option<Arc<Notify>>,
    pub result: Result<AdResponse, FetchError>,
}

/// Client handed out by [`ScriptedClientFactory`]; serves exactly one
/// request.
pub struct ScriptedClient {
    script: Mutex<Option<Script>>,
}

impl AdHttpClient for ScriptedClient {
    async fn get(&self, _url: &str, _user_agent: &str) -> Result<AdResponse, FetchError> {
        let script = self
            .script
            .lock()
            .unwrap()
            .take()
            .expect("scripted client serves one request");
        if let Some(gate) = script.gate {
            gate.notified().await;
        }
        script.result
    }
}

/// Factory producing one scripted client per fetch, in enqueue order.
#[derive(Clone, Default)]
pub struct ScriptedClientFactory {
    scripts: Arc<Mutex<VecDeque<Script>>>,
}

impl ScriptedClientFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&self, script: Script) {
        self.scripts.lock().unwrap().push_back(script);
    }

    /// Enqueues an immediate response.
    pub fn enqueue_response(&self, response: AdResponse) {
        self.enqueue(Script {
            gate: None,
            result: Ok(response),
        });
    }

    /// Enqueues a response that is held back until the returned gate is
    /// notified.
    pub fn enqueue_gated(&self, response: AdResponse) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.enqueue(Script {
            gate: Some(Arc::clone(&gate)),
            result: Ok(response),
        });
        gate
    }

    /// Enqueues a transport-level failure.
    pub fn enqueue_error(&self, error: FetchError) {
        self.enqueue(Script {
            gate: None,
            result: Err(error),
        });
    }
}

impl ClientFactory for ScriptedClientFactory {
    type Client = ScriptedClient;

    fn create(&self, _config: &FetchConfig) -> Result<ScriptedClient, FetchError> {
        let script = self
            .scripts
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| FetchError::Client("no scripted response enqueued".to_string()))?;
        Ok(ScriptedClient {
            script: Mutex::new(Some(script)),
        })
    }
}

/// Builds an [`AdResponse`] from parts.
pub fn response(status: u16, headers: &[(&str, &str)], body: Option<&str>) -> AdResponse {
    let parsed: ResponseHeaders = headers.iter().copied().collect();
    AdResponse {
        status,
        headers: parsed,
        body: body.map(str::to_string),
    }
}

/// A 200 HTML ad response with extra headers.
pub fn html_ok(body: &str, extra_headers: &[(&str, &str)]) -> AdResponse {
    let mut headers = vec![("X-Adtype", "html")];
    headers.extend_from_slice(extra_headers);
    response(200, &headers, Some(body))
}
