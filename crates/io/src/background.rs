//! Off-thread script loading for interactive callers.
//!
//! Each [`BackgroundLoader::spawn`] starts one worker thread doing one
//! load; results come back over an mpsc channel that the UI loop drains
//! with [`BackgroundLoader::poll`]. Loads are not cancelled or ordered:
//! when two overlap, whichever finishes last is delivered last.

use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread;
use std::time::Duration;

use scriptview_core::Script;

use crate::{LoadError, ScriptLoader, ScriptSource};

/// Result of one finished load.
#[derive(Debug)]
pub struct LoadOutcome {
    pub source: ScriptSource,
    pub result: Result<Script, LoadError>,
}

pub struct BackgroundLoader {
    loader: ScriptLoader,
    tx: Sender<LoadOutcome>,
    rx: Receiver<LoadOutcome>,
    in_flight: usize,
}

impl BackgroundLoader {
    pub fn new(loader: ScriptLoader) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            loader,
            tx,
            rx,
            in_flight: 0,
        }
    }

    /// Start a load on a worker thread.
    pub fn spawn(&mut self, source: ScriptSource) {
        let loader = self.loader.clone();
        self.spawn_with(source, move |source| loader.load(source));
    }

    /// Every call delivers exactly one outcome, even if `load` panics.
    fn spawn_with<F>(&mut self, source: ScriptSource, load: F)
    where
        F: FnOnce(&ScriptSource) -> Result<Script, LoadError> + Send + 'static,
    {
        let tx = self.tx.clone();
        self.in_flight += 1;
        log::info!("load started: {}", source);

        let spawned = thread::Builder::new()
            .name("script-load".into())
            .spawn({
                let source = source.clone();
                move || {
                    let result = panic::catch_unwind(AssertUnwindSafe(|| load(&source)))
                        .unwrap_or_else(|payload| {
                            let reason = panic_message(payload.as_ref());
                            log::error!("loader thread panicked for {}: {}", source, reason);
                            Err(LoadError::Io(format!("loader thread panicked: {}", reason)))
                        });
                    // Receiver gone means the viewer exited; nothing to report to
                    let _ = tx.send(LoadOutcome { source, result });
                }
            });

        if let Err(e) = spawned {
            // Deliver the failure through the channel so callers see one path
            let _ = self.tx.send(LoadOutcome {
                source,
                result: Err(LoadError::Io(format!("failed to start loader thread: {}", e))),
            });
        }
    }

    /// Next finished load, if any. Never blocks.
    pub fn poll(&mut self) -> Option<LoadOutcome> {
        match self.rx.try_recv() {
            Ok(outcome) => {
                self.in_flight = self.in_flight.saturating_sub(1);
                Some(outcome)
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Block up to `timeout` for the next finished load.
    pub fn wait(&mut self, timeout: Duration) -> Option<LoadOutcome> {
        match self.rx.recv_timeout(timeout) {
            Ok(outcome) => {
                self.in_flight = self.in_flight.saturating_sub(1);
                Some(outcome)
            }
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// True while at least one spawned load has not been polled yet.
    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
