use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Events delivered to the render loop
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    Tick,
    Error(String),
}

/// Reads terminal input on a blocking task
pub struct EventSource {
    #[allow(dead_code)]
    reader: JoinHandle<()>,
}

impl EventSource {
    /// Start reading input. The reader stops once the receiver is dropped.
    pub fn spawn(tick_rate: Duration) -> (Self, mpsc::UnboundedReceiver<AppEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let reader = tokio::task::spawn_blocking(move || read_loop(tx, tick_rate));
        (Self { reader }, rx)
    }
}

fn read_loop(tx: mpsc::UnboundedSender<AppEvent>, tick_rate: Duration) {
    loop {
        let msg = match event::poll(tick_rate) {
            Ok(true) => match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => AppEvent::Key(key),
                Ok(Event::Resize(_, _)) => AppEvent::Resize,
                Ok(_) => continue,
                Err(e) => AppEvent::Error(format!("Failed to read input: {}", e)),
            },
            Ok(false) => AppEvent::Tick,
            Err(e) => AppEvent::Error(format!("Failed to poll input: {}", e)),
        };

        let fatal = matches!(msg, AppEvent::Error(_));
        if fatal {
            warn!(?msg, "input reader stopping");
        }
        if tx.send(msg).is_err() {
            debug!("event receiver closed");
            break;
        }
        if fatal {
            break;
        }
    }
}
