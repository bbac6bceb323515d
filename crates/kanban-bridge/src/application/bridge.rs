//! The bridge: two stateless forwarding wires between a front-end instance
//! and its host.
//!
//! ```text
//! outbound port ──► serde_json::to_string ──► HostChannel::invoke(text)
//! InboundRelay::call(text) ──────────────────► inbound port (verbatim)
//! ```
//!
//! Both wires run synchronously in the caller's context.  Nothing is buffered,
//! deduplicated, or retried, and the two directions are not ordered relative
//! to each other.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, trace};

use crate::application::ports::{Document, FrontEnd, HostChannel, InboundRegistry, Program};
use crate::domain::{BridgeConfig, BridgeError, InboundMessage, OutboundMessage};

/// Callable handed to the host for pushing text into the front-end.
///
/// Cheap to clone; every clone forwards to the same front-end instance.
#[derive(Clone)]
pub struct InboundRelay {
    app: Arc<dyn FrontEnd>,
    port: Arc<str>,
}

impl InboundRelay {
    /// Forwards `text` unchanged into the front-end's inbound port.
    pub fn call(&self, text: impl Into<InboundMessage>) {
        let text = text.into();
        trace!(port = %self.port, bytes = text.len(), "relaying inbound message");
        self.app.send(&self.port, text);
    }

    pub fn port(&self) -> &str {
        &self.port
    }
}

impl fmt::Debug for InboundRelay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InboundRelay")
            .field("port", &self.port)
            .finish_non_exhaustive()
    }
}

/// Owns an initialised front-end instance and relays for it.
pub struct Bridge<F: FrontEnd + 'static> {
    config: BridgeConfig,
    app: Arc<F>,
    host: Arc<dyn HostChannel>,
}

impl<F: FrontEnd + 'static> Bridge<F> {
    /// Mounts the front-end and wires the outbound port to `host`.
    ///
    /// 1. Validates `config`.
    /// 2. Looks up the mount element in `document`.
    /// 3. Starts `program` on that element.
    /// 4. Subscribes the outbound relay on the configured outbound port.
    ///
    /// # Errors
    ///
    /// - [`BridgeError::InvalidName`] if `config` fails validation.
    /// - [`BridgeError::MountPointMissing`] if the document has no element
    ///   with the configured mount id.  The program is not started.
    pub fn init<D, P>(
        config: BridgeConfig,
        document: &D,
        program: &P,
        host: Arc<dyn HostChannel>,
    ) -> Result<Self, BridgeError>
    where
        D: Document,
        P: Program<D::Node, App = F>,
    {
        config.validate()?;

        let node = document
            .element_by_id(&config.mount_id)
            .ok_or_else(|| BridgeError::MountPointMissing(config.mount_id.clone()))?;
        let app = Arc::new(program.init(node));

        let outbound_host = Arc::clone(&host);
        app.subscribe(
            &config.outbound_port,
            Arc::new(move |message: &OutboundMessage| forward_outbound(outbound_host.as_ref(), message)),
        );

        debug!(
            mount_id = %config.mount_id,
            outbound = %config.outbound_port,
            inbound = %config.inbound_port,
            "bridge initialised"
        );

        Ok(Self { config, app, host })
    }

    /// Serializes `message` and hands the text to the host.
    ///
    /// This is the body of the outbound subscription; it is public so hosts
    /// can relay values that do not originate on the outbound port.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Serialize`] if `message` cannot be encoded.  The
    /// host is not invoked in that case.
    pub fn relay_outbound<T>(&self, message: &T) -> Result<(), BridgeError>
    where
        T: Serialize + ?Sized,
    {
        forward_outbound(self.host.as_ref(), message)
    }

    /// Forwards `text` unchanged into the front-end's inbound port.
    pub fn relay_inbound(&self, text: impl Into<InboundMessage>) {
        self.inbound_relay().call(text);
    }

    /// Returns a callable bound to this bridge's front-end and inbound port.
    pub fn inbound_relay(&self) -> InboundRelay {
        let app: Arc<dyn FrontEnd> = self.app.clone();
        InboundRelay {
            app,
            port: Arc::from(self.config.inbound_port.as_str()),
        }
    }

    /// Registers the inbound relay under the configured function name.
    pub fn expose(&self, registry: &dyn InboundRegistry) {
        debug!(function = %self.config.inbound_function, "exposing inbound relay");
        registry.register(&self.config.inbound_function, self.inbound_relay());
    }

    pub fn app(&self) -> &Arc<F> {
        &self.app
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }
}

fn forward_outbound<T>(host: &dyn HostChannel, message: &T) -> Result<(), BridgeError>
where
    T: Serialize + ?Sized,
{
    let text = serde_json::to_string(message).map_err(BridgeError::Serialize)?;
    trace!(bytes = text.len(), "relaying outbound message");
    host.invoke(&text);
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use serde_json::json;

    use super::*;
    use crate::application::ports::{MockHostChannel, OutboundHandler};

    // ── Doubles ───────────────────────────────────────────────────────────────

    #[derive(Default)]
    struct FakeApp {
        handlers: Mutex<HashMap<String, Vec<OutboundHandler>>>,
        sent: Mutex<Vec<(String, String)>>,
    }

    impl FakeApp {
        fn emit(&self, port: &str, message: &OutboundMessage) -> Result<(), BridgeError> {
            let handlers = self.handlers.lock().unwrap().get(port).cloned().unwrap_or_default();
            for handler in handlers {
                handler(message)?;
            }
            Ok(())
        }

        fn sent(&self) -> Vec<(String, String)> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl FrontEnd for FakeApp {
        fn subscribe(&self, port: &str, handler: OutboundHandler) {
            self.handlers
                .lock()
                .unwrap()
                .entry(port.to_string())
                .or_default()
                .push(handler);
        }

        fn send(&self, port: &str, message: InboundMessage) {
            self.sent.lock().unwrap().push((port.to_string(), message));
        }
    }

    struct FakeDocument {
        ids: Vec<&'static str>,
    }

    impl Document for FakeDocument {
        type Node = String;

        fn element_by_id(&self, id: &str) -> Option<String> {
            self.ids.iter().find(|i| **i == id).map(|i| i.to_string())
        }
    }

    #[derive(Default)]
    struct FakeProgram {
        started: AtomicUsize,
    }

    impl Program<String> for FakeProgram {
        type App = FakeApp;

        fn init(&self, _node: String) -> FakeApp {
            self.started.fetch_add(1, Ordering::SeqCst);
            FakeApp::default()
        }
    }

    fn page() -> FakeDocument {
        FakeDocument { ids: vec!["app"] }
    }

    fn bridge_with(host: MockHostChannel) -> Bridge<FakeApp> {
        Bridge::init(
            BridgeConfig::default(),
            &page(),
            &FakeProgram::default(),
            Arc::new(host),
        )
        .expect("bridge must initialise")
    }

    // ── Outbound ──────────────────────────────────────────────────────────────

    #[test]
    fn test_ping_on_outbound_port_reaches_host_as_json_text() {
        // Arrange
        let mut host = MockHostChannel::new();
        host.expect_invoke()
            .withf(|payload: &str| payload == r#"{"type":"ping"}"#)
            .times(1)
            .return_const(());
        let bridge = bridge_with(host);

        // Act
        let result = bridge.app().emit("sendRequest", &json!({"type": "ping"}));

        // Assert: expectations are verified when the mock is dropped
        assert!(result.is_ok());
    }

    #[test]
    fn test_each_emission_invokes_host_once() {
        let mut host = MockHostChannel::new();
        host.expect_invoke().times(3).return_const(());
        let bridge = bridge_with(host);

        for n in 0..3 {
            bridge.app().emit("sendRequest", &json!({"n": n})).unwrap();
        }
    }

    #[test]
    fn test_outbound_text_is_exactly_the_serialized_message() {
        // Arrange
        let message = json!({
            "cmd": "StoreTasks",
            "tasks": [
                {"subject": "Say \"hi\" to Zoë", "wait_until": null, "tags": [[1, 2], []]},
                {"subject": "Plan Q3 ✓\nthen rest", "priority": -1}
            ]
        });
        let expected = serde_json::to_string(&message).unwrap();
        let mut host = MockHostChannel::new();
        host.expect_invoke()
            .withf(move |payload: &str| payload == expected)
            .times(1)
            .return_const(());
        let bridge = bridge_with(host);

        // Act
        let result = bridge.app().emit("sendRequest", &message);

        // Assert
        assert!(result.is_ok());
    }

    #[test]
    fn test_repeated_emissions_each_carry_their_own_payload() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let record = Arc::clone(&seen);
        let mut host = MockHostChannel::new();
        host.expect_invoke()
            .times(2)
            .returning(move |payload: &str| record.lock().unwrap().push(payload.to_string()));
        let bridge = bridge_with(host);

        bridge.app().emit("sendRequest", &json!({"n": 1})).unwrap();
        bridge.app().emit("sendRequest", &json!({"n": 1})).unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![r#"{"n":1}"#, r#"{"n":1}"#]);
    }

    #[test]
    fn test_emission_on_other_port_does_not_reach_host() {
        let mut host = MockHostChannel::new();
        host.expect_invoke().times(0);
        let bridge = bridge_with(host);

        bridge.app().emit("somethingElse", &json!(1)).unwrap();
    }

    #[test]
    fn test_relay_outbound_accepts_any_serializable_value() {
        #[derive(Serialize)]
        struct Request<'a> {
            cmd: &'a str,
        }

        let mut host = MockHostChannel::new();
        host.expect_invoke()
            .withf(|payload: &str| payload == r#"{"cmd":"Init"}"#)
            .times(1)
            .return_const(());
        let bridge = bridge_with(host);

        bridge.relay_outbound(&Request { cmd: "Init" }).unwrap();
    }

    #[test]
    fn test_unserializable_message_fails_without_invoking_host() {
        // Arrange: JSON object keys must be strings, tuples are not
        let mut host = MockHostChannel::new();
        host.expect_invoke().times(0);
        let bridge = bridge_with(host);
        let mut bad = HashMap::new();
        bad.insert((1, 2), "value");

        // Act
        let result = bridge.relay_outbound(&bad);

        // Assert
        assert!(matches!(result, Err(BridgeError::Serialize(_))));
    }

    // ── Inbound ───────────────────────────────────────────────────────────────

    #[test]
    fn test_inbound_relay_forwards_text_verbatim() {
        let mut host = MockHostChannel::new();
        host.expect_invoke().times(0);
        let bridge = bridge_with(host);

        bridge.relay_inbound(r#"{"type":"pong"}"#);

        assert_eq!(
            bridge.app().sent(),
            vec![("receiveResponse".to_string(), r#"{"type":"pong"}"#.to_string())]
        );
    }

    #[test]
    fn test_inbound_relay_does_not_deduplicate() {
        let bridge = bridge_with(MockHostChannel::new());
        let relay = bridge.inbound_relay();

        relay.call("same");
        relay.clone().call("same");

        let sent = bridge.app().sent();
        assert_eq!(sent.len(), 2);
        assert!(sent.iter().all(|(_, text)| text == "same"));
    }

    #[test]
    fn test_inbound_relay_passes_malformed_text_through() {
        let bridge = bridge_with(MockHostChannel::new());
        bridge.relay_inbound("{not json");
        assert_eq!(bridge.app().sent()[0].1, "{not json");
    }

    #[test]
    fn test_inbound_relay_reports_its_port() {
        let bridge = bridge_with(MockHostChannel::new());
        assert_eq!(bridge.inbound_relay().port(), "receiveResponse");
    }

    // ── Initialisation ────────────────────────────────────────────────────────

    #[test]
    fn test_missing_mount_point_fails_and_does_not_start_program() {
        // Arrange
        let program = FakeProgram::default();
        let document = FakeDocument { ids: vec!["other"] };

        // Act
        let result = Bridge::init(
            BridgeConfig::default(),
            &document,
            &program,
            Arc::new(MockHostChannel::new()),
        );

        // Assert
        assert!(matches!(result, Err(BridgeError::MountPointMissing(id)) if id == "app"));
        assert_eq!(program.started.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_invalid_config_is_rejected_before_mounting() {
        let program = FakeProgram::default();
        let config = BridgeConfig {
            inbound_port: "bad port".to_string(),
            ..BridgeConfig::default()
        };

        let result = Bridge::init(config, &page(), &program, Arc::new(MockHostChannel::new()));

        assert!(matches!(result, Err(BridgeError::InvalidName { .. })));
        assert_eq!(program.started.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_custom_mount_id_is_used() {
        let config = BridgeConfig {
            mount_id: "board".to_string(),
            ..BridgeConfig::default()
        };
        let document = FakeDocument { ids: vec!["board"] };

        let result = Bridge::init(
            config,
            &document,
            &FakeProgram::default(),
            Arc::new(MockHostChannel::new()),
        );

        assert!(result.is_ok());
    }
}
