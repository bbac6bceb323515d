//! Console host: the terminal plays the front-end.
//!
//! Every line read from the input is a JSON value the "front-end" emits on
//! its outbound port; everything the bridge pushes into the inbound port is
//! written to the output, one message per line.  This runs the real
//! [`Bridge`] end to end without a window, which makes the shell usable in
//! scripts and on machines without a webview.
//!
//! ```text
//! $ echo '{"cmd":"Init"}' | kanban-desktop --headless
//! {"data":"Tasks","tasks":[]}
//! ```

use std::collections::HashMap;
use std::future::Future;
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::runtime::{Handle, RuntimeFlavor};
use tokio::task::block_in_place;
use tracing::{debug, error, info, warn};

use kanban_bridge::{
    Bridge, BridgeConfig, BridgeError, Document, FrontEnd, FunctionTable, InboundMessage,
    OutboundHandler, OutboundMessage, Program,
};

use crate::application::RequestHandler;
use crate::infrastructure::ui_bridge::{HostEndpoint, RegisteredFunctionSink};

/// Output the console front-end writes inbound messages to.
pub type ConsoleOutput = Box<dyn Write + Send>;

/// A front-end instance whose ports are the terminal.
pub struct ConsoleFrontEnd {
    handlers: Mutex<HashMap<String, Vec<OutboundHandler>>>,
    output: Mutex<ConsoleOutput>,
}

impl ConsoleFrontEnd {
    pub fn new(output: ConsoleOutput) -> Self {
        Self {
            handlers: Mutex::new(HashMap::new()),
            output: Mutex::new(output),
        }
    }

    /// Emits `message` on `port`, running every subscribed handler in order.
    ///
    /// # Errors
    ///
    /// Returns the first handler error; later handlers are not run.
    pub fn emit(&self, port: &str, message: &OutboundMessage) -> Result<(), BridgeError> {
        let handlers = self.handlers().get(port).cloned().unwrap_or_default();
        if handlers.is_empty() {
            debug!(port, "no subscriber for outbound port");
        }
        for handler in handlers {
            handler(message)?;
        }
        Ok(())
    }

    fn handlers(&self) -> MutexGuard<'_, HashMap<String, Vec<OutboundHandler>>> {
        self.handlers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl FrontEnd for ConsoleFrontEnd {
    fn subscribe(&self, port: &str, handler: OutboundHandler) {
        self.handlers()
            .entry(port.to_string())
            .or_default()
            .push(handler);
    }

    fn send(&self, port: &str, message: InboundMessage) {
        let mut output = self.output.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = writeln!(output, "{message}").and_then(|()| output.flush()) {
            warn!(port, "failed to write inbound message: {e}");
        }
    }
}

/// The terminal always provides the configured mount point.
pub struct ConsoleDocument {
    mount_id: String,
}

impl ConsoleDocument {
    pub fn new(mount_id: impl Into<String>) -> Self {
        Self {
            mount_id: mount_id.into(),
        }
    }
}

impl Document for ConsoleDocument {
    type Node = ();

    fn element_by_id(&self, id: &str) -> Option<()> {
        (id == self.mount_id).then_some(())
    }
}

/// Starts a [`ConsoleFrontEnd`] on a fresh output.
pub struct ConsoleProgram {
    make_output: Box<dyn Fn() -> ConsoleOutput + Send + Sync>,
}

impl ConsoleProgram {
    pub fn new(make_output: impl Fn() -> ConsoleOutput + Send + Sync + 'static) -> Self {
        Self {
            make_output: Box::new(make_output),
        }
    }

    pub fn stdout() -> Self {
        Self::new(|| -> ConsoleOutput { Box::new(std::io::stdout()) })
    }
}

impl Program<()> for ConsoleProgram {
    type App = ConsoleFrontEnd;

    fn init(&self, _node: ()) -> ConsoleFrontEnd {
        ConsoleFrontEnd::new((self.make_output)())
    }
}

/// Wires a console front-end, the bridge, and the host endpoint together.
///
/// The returned table holds the exposed inbound function.  The pieces refer
/// to each other in a cycle and live until the process exits.
///
/// # Errors
///
/// Returns [`BridgeError`] if `config` fails validation.
pub fn build_console_bridge(
    config: &BridgeConfig,
    handler: Box<dyn RequestHandler>,
    program: &ConsoleProgram,
) -> Result<(Bridge<ConsoleFrontEnd>, Arc<FunctionTable>), BridgeError> {
    let table = Arc::new(FunctionTable::new());
    let sink = RegisteredFunctionSink::new(Arc::clone(&table), config.inbound_function.clone());
    let endpoint = Arc::new(HostEndpoint::new(handler, Box::new(sink)));

    let bridge = Bridge::init(
        config.clone(),
        &ConsoleDocument::new(config.mount_id.clone()),
        program,
        endpoint,
    )?;
    bridge.expose(table.as_ref());
    Ok((bridge, table))
}

/// Feeds every input line to the console front-end until the input ends or
/// `shutdown` completes.
///
/// # Errors
///
/// Returns an I/O error if reading the input fails.
pub async fn run_console<I, S>(
    bridge: &Bridge<ConsoleFrontEnd>,
    input: I,
    shutdown: S,
) -> std::io::Result<()>
where
    I: AsyncBufRead + Unpin,
    S: Future<Output = ()>,
{
    let mut lines = input.lines();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => emit_line_off_runtime(bridge, &line),
                None => {
                    info!("console input closed");
                    break;
                }
            },
            () = &mut shutdown => {
                info!("shutdown requested");
                break;
            }
        }
    }
    Ok(())
}

/// Runs [`emit_line`], which saves the board and flushes the output
/// synchronously, without stalling other tasks on a multi-threaded runtime.
fn emit_line_off_runtime(bridge: &Bridge<ConsoleFrontEnd>, line: &str) {
    match Handle::try_current().map(|handle| handle.runtime_flavor()) {
        Ok(RuntimeFlavor::MultiThread) => block_in_place(|| emit_line(bridge, line)),
        // `block_in_place` is not allowed on a current-thread runtime.
        _ => emit_line(bridge, line),
    }
}

fn emit_line(bridge: &Bridge<ConsoleFrontEnd>, line: &str) {
    let line = line.trim();
    if line.is_empty() {
        return;
    }
    let message: OutboundMessage = match serde_json::from_str(line) {
        Ok(message) => message,
        Err(e) => {
            warn!("ignoring console line that is not JSON: {e}");
            return;
        }
    };
    if let Err(e) = bridge.app().emit(&bridge.config().outbound_port, &message) {
        error!("outbound relay failed: {e}");
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
