//! Webview host: a `tao` window with a `wry` webview showing the page.
//!
//! ```text
//! page: window.ipc.postMessage(text) ──► ipc handler ──► HostEndpoint
//!                                                            │ ScriptSink
//!                                                            ▼
//! page: sendResponse(json) ◄── evaluate_script ◄── UserEvent::EvalScript
//! ```
//!
//! The webview may only be touched on the UI thread, so replies are posted to
//! the event loop as [`UserEvent`]s and evaluated there.

use std::sync::{Arc, Mutex, PoisonError};

use anyhow::Context;
use tao::dpi::LogicalSize;
use tao::event::{Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoopBuilder, EventLoopProxy};
use tao::window::WindowBuilder;
use tracing::{info, warn};
use wry::WebViewBuilder;

use kanban_bridge::HostChannel;

use crate::application::RequestHandler;
use crate::infrastructure::storage::config::AppConfig;
use crate::infrastructure::ui_bridge::{inbound_call_script, HostEndpoint, ResponseSink};

/// Events posted to the UI thread.
#[derive(Debug, Clone)]
pub enum UserEvent {
    /// Evaluate this script in the page.
    EvalScript(String),
    /// Close the window and leave the event loop.
    Shutdown,
}

/// Delivers replies by calling the page's inbound function.
pub struct ScriptSink {
    proxy: Mutex<EventLoopProxy<UserEvent>>,
    function: String,
}

impl ScriptSink {
    pub fn new(proxy: EventLoopProxy<UserEvent>, function: impl Into<String>) -> Self {
        Self {
            proxy: Mutex::new(proxy),
            function: function.into(),
        }
    }
}

impl ResponseSink for ScriptSink {
    fn deliver(&self, text: String) {
        let script = inbound_call_script(&self.function, &text);
        let proxy = self.proxy.lock().unwrap_or_else(PoisonError::into_inner);
        if proxy.send_event(UserEvent::EvalScript(script)).is_err() {
            warn!("event loop closed; reply dropped");
        }
    }
}

/// Opens the window and runs the UI event loop until it is closed.
///
/// Must be called on the main thread.  Ctrl+C closes the window.
///
/// # Errors
///
/// Returns an error if the window or the webview cannot be created.  Once the
/// event loop is running this function does not return.
pub fn run_webview(
    config: &AppConfig,
    page: String,
    handler: Box<dyn RequestHandler>,
) -> anyhow::Result<()> {
    let event_loop = EventLoopBuilder::<UserEvent>::with_user_event().build();

    let sink = ScriptSink::new(event_loop.create_proxy(), config.bridge.inbound_function.clone());
    let endpoint = Arc::new(HostEndpoint::new(handler, Box::new(sink)));

    let shutdown_proxy = event_loop.create_proxy();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("received Ctrl+C, closing window");
            let _ = shutdown_proxy.send_event(UserEvent::Shutdown);
        }
    });

    let window = WindowBuilder::new()
        .with_title(&config.window.title)
        .with_inner_size(LogicalSize::new(config.window.width, config.window.height))
        .with_resizable(config.window.resizable)
        .build(&event_loop)
        .context("failed to create window")?;

    let ipc_endpoint = Arc::clone(&endpoint);
    let builder = WebViewBuilder::new()
        .with_html(page)
        .with_devtools(config.window.debug)
        .with_ipc_handler(move |request: wry::http::Request<String>| {
            ipc_endpoint.invoke(request.body());
        });

    #[cfg(not(target_os = "linux"))]
    let webview = builder.build(&window).context("failed to build webview")?;

    #[cfg(target_os = "linux")]
    let webview = {
        use tao::platform::unix::WindowExtUnix;
        use wry::WebViewBuilderExtUnix;
        let vbox = window
            .default_vbox()
            .context("window has no GTK container for the webview")?;
        builder.build_gtk(vbox).context("failed to build webview")?
    };

    info!(title = %config.window.title, "window opened");

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;
        // Keep the window alive for as long as the loop runs.
        let _ = &window;

        match event {
            Event::UserEvent(UserEvent::EvalScript(script)) => {
                if let Err(e) = webview.evaluate_script(&script) {
                    warn!("failed to deliver reply to the page: {e}");
                }
            }
            Event::UserEvent(UserEvent::Shutdown)
            | Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("window closed");
                *control_flow = ControlFlow::Exit;
            }
            _ => {}
        }
    })
}
