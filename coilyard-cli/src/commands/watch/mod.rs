//! `coilyard watch` - interactive yard session.
//!
//! Polls the yard backend in the background while the operator works a
//! menu: add a coil, place one at a slot, search by id, pick one up, or
//! wait for the next arrival. Announced coils are confirmed before the
//! next menu is shown. Placement events are printed as they are broadcast.

mod menu;

use std::future::Future;
use std::sync::Arc;

use console::style;
use tokio::sync::{broadcast, mpsc};

use coilyard::placement::{PlacementError, YardEvent};
use coilyard::poller::CoilPoller;
use coilyard::reconciler::{PresentationError, PromptSurface};
use coilyard::session::{SearchOutcome, SharedSession, YardSession};
use coilyard::source::{HttpCoilFeed, PendingCoil, RemoteCoilSource};

use crate::error::CliError;
use crate::runner::CliRunner;
use menu::{Action, DialoguerConsole, OperatorConsole};

/// Hands prompts to the operator loop.
///
/// `present` only queues the coil; the blocking confirm runs on the
/// operator loop so the poll task is never held up.
struct TerminalSurface {
    prompts: mpsc::UnboundedSender<PendingCoil>,
}

impl PromptSurface for TerminalSurface {
    fn present(&mut self, coil: &PendingCoil) -> Result<(), PresentationError> {
        self.prompts
            .send(*coil)
            .map_err(|_| PresentationError::Unavailable("terminal prompt closed".to_string()))
    }
}

/// Menu action with its operator input collected.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Request {
    PlaceNext,
    PlaceAt {
        row: String,
        column: String,
        layer: String,
    },
    Search(String),
    PickUp(String),
}

pub fn run(debug: bool, api_url: Option<String>) -> Result<(), CliError> {
    let runner = CliRunner::with_debug(debug)?;
    runner.log_startup("watch");

    let mut source_config = runner.config().source_config();
    if let Some(url) = api_url {
        source_config.api_url = url;
    }

    if !source_config.enabled {
        println!("Polling is disabled in the configuration ([polling] enabled = false).");
        return Ok(());
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;

    let feed = HttpCoilFeed::new(&source_config)?;
    println!(
        "Watching {} every {}s. Press Ctrl-C to stop.",
        style(feed.url()).cyan(),
        source_config.poll_interval.as_secs()
    );

    let logger = runner.logger();
    let (prompt_tx, prompt_rx) = mpsc::unbounded_channel();
    let mut session = YardSession::new(
        runner.config().layout,
        Box::new(TerminalSurface { prompts: prompt_tx }),
        Arc::clone(&logger),
    )?;
    // No model template to wait for in a terminal.
    session.mark_model_loaded();
    let session = session.shared();

    let poller = CoilPoller::new(
        RemoteCoilSource::new(feed, logger),
        source_config.poll_interval,
    );

    let result = runtime.block_on(async {
        tokio::spawn(print_events(session.lock().subscribe()));
        poller.start(session.clone());

        let shutdown = async {
            if tokio::signal::ctrl_c().await.is_err() {
                tracing::warn!("Ctrl-C handler unavailable, use Quit to stop");
                std::future::pending::<()>().await;
            }
        };
        let result =
            operator_loop(&session, Arc::new(DialoguerConsole), prompt_rx, shutdown).await;
        poller.stop();
        result
    });

    // A prompt may still be blocking a worker thread.
    runtime.shutdown_background();

    let session = session.lock();
    println!(
        "Session ended with {} coil(s) placed.",
        session.registry().len()
    );
    result
}

/// Runs the menu until Quit, `shutdown`, or a menu failure.
///
/// Queued arrivals are confirmed before each menu. A failed arrival
/// confirm rejects that coil and the session carries on.
async fn operator_loop<C, F>(
    session: &SharedSession,
    console: Arc<C>,
    mut prompts: mpsc::UnboundedReceiver<PendingCoil>,
    shutdown: F,
) -> Result<(), CliError>
where
    C: OperatorConsole,
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    let mut waiting: Option<PendingCoil> = None;

    loop {
        if let Some(pending) = waiting.take().or_else(|| prompts.try_recv().ok()) {
            let answer = tokio::select! {
                _ = &mut shutdown => break,
                answer = blocking(&console, move |c| c.confirm_arrival(&pending)) => answer,
            };
            settle_arrival(session, answer);
            continue;
        }

        let action = tokio::select! {
            _ = &mut shutdown => break,
            action = blocking(&console, |c| c.choose()) => action?,
        };

        let request = match action {
            Action::Quit => break,
            Action::WaitForArrival => {
                println!("Waiting for the next arrival...");
                tokio::select! {
                    _ = &mut shutdown => break,
                    pending = prompts.recv() => match pending {
                        Some(pending) => waiting = Some(pending),
                        None => break,
                    },
                }
                continue;
            }
            Action::PlaceNext => Request::PlaceNext,
            action => tokio::select! {
                _ = &mut shutdown => break,
                request = blocking(&console, move |c| gather_input(c, action)) => request?,
            },
        };

        match apply(session, request) {
            Ok(Some(report)) => println!("{}", report),
            Ok(None) => {}
            Err(e) => println!("{} {}", style("Rejected:").red(), e),
        }
    }

    println!();
    Ok(())
}

/// Runs a console call on the blocking pool.
async fn blocking<C, T, F>(console: &Arc<C>, call: F) -> Result<T, CliError>
where
    C: OperatorConsole,
    T: Send + 'static,
    F: FnOnce(&C) -> Result<T, CliError> + Send + 'static,
{
    let console = Arc::clone(console);
    tokio::task::spawn_blocking(move || call(&console))
        .await
        .map_err(|e| CliError::Prompt(e.to_string()))?
}

/// Asks for the text fields `action` needs.
fn gather_input<C>(console: &C, action: Action) -> Result<Request, CliError>
where
    C: OperatorConsole + ?Sized,
{
    match action {
        Action::PlaceAt => Ok(Request::PlaceAt {
            row: console.input("Row")?,
            column: console.input("Column")?,
            layer: console.input("Layer")?,
        }),
        Action::Search => Ok(Request::Search(console.input("Coil ID")?)),
        Action::PickUp => Ok(Request::PickUp(console.input("Coil ID to pick up")?)),
        Action::PlaceNext => Ok(Request::PlaceNext),
        Action::WaitForArrival | Action::Quit => Err(CliError::Usage(format!(
            "'{}' takes no input",
            action.label()
        ))),
    }
}

/// Applies one menu request. `Some` carries a line for the operator;
/// placements and pick-ups are reported by the event printer.
fn apply(session: &SharedSession, request: Request) -> Result<Option<String>, PlacementError> {
    let mut session = session.lock();

    match request {
        Request::PlaceNext => session.place_next().map(|_| None),
        Request::PlaceAt { row, column, layer } => {
            session.place_at(&row, &column, &layer).map(|_| None)
        }
        Request::Search(input) => {
            let report = match session.search(&input)? {
                SearchOutcome::Found { coil, position } => {
                    format!("Coil #{} is at {}", coil.id, position)
                }
                SearchOutcome::NotFound(id) => format!("Coil with ID {} not found", id),
            };
            Ok(Some(report))
        }
        Request::PickUp(input) => session.pick_up_coil(&input).map(|_| None),
    }
}

/// Resolves the open arrival prompt with the operator's answer.
fn settle_arrival(session: &SharedSession, answer: Result<bool, CliError>) {
    match answer {
        Ok(true) => {
            let committed = session.lock().accept();
            if let Err(e) = committed {
                println!("{} {}", style("Could not place coil:").red(), e);
            }
        }
        Ok(false) => {
            session.lock().reject();
            println!("{}", style("Coil rejected").yellow());
        }
        Err(e) => {
            tracing::error!(error = %e, "Arrival prompt failed, rejecting the coil");
            session.lock().reject();
            println!("{} {}", style("Arrival prompt failed, coil rejected:").red(), e);
        }
    }
}

async fn print_events(mut events: broadcast::Receiver<YardEvent>) {
    loop {
        match events.recv().await {
            Ok(YardEvent::Placed(event)) => println!(
                "{} coil #{} at {}",
                style("Placed").green(),
                event.id,
                event.position
            ),
            Ok(YardEvent::PickedUp(event)) => println!(
                "{} coil #{} from {}",
                style("Picked up").cyan(),
                event.id,
                event.position
            ),
            Err(broadcast::error::RecvError::Lagged(missed)) => {
                tracing::warn!(missed, "Event printer lagged");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}
