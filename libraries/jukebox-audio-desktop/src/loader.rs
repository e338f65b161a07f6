//! Background track opening
//!
//! Opening and probing a file can take a while on slow disks, so each load
//! runs on its own short-lived thread and reports back over a channel that
//! the owning audio channel drains when polled.

use crate::error::{AudioError, Result};
use crossbeam_channel::{unbounded, Receiver, Sender};
use jukebox_playback::Generation;
use std::thread;

type Outcome<T> = (Generation, Result<T>);

/// Runs open jobs off the driver thread and keeps only the latest result
pub(crate) struct Loader<T> {
    tx: Sender<Outcome<T>>,
    rx: Receiver<Outcome<T>>,
    expected: Option<Generation>,
}

impl<T: Send + 'static> Loader<T> {
    pub(crate) fn new() -> Self {
        let (tx, rx) = unbounded();
        Self {
            tx,
            rx,
            expected: None,
        }
    }

    /// Start `open` on a worker thread, superseding any running job
    pub(crate) fn start<F>(&mut self, generation: Generation, open: F) -> Result<()>
    where
        F: FnOnce() -> Result<T> + Send + 'static,
    {
        self.expected = None;

        let tx = self.tx.clone();
        thread::Builder::new()
            .name("jukebox-loader".to_string())
            .spawn(move || {
                // Receiver is gone only when the channel was dropped
                let _ = tx.send((generation, open()));
            })
            .map_err(AudioError::Thread)?;

        self.expected = Some(generation);
        Ok(())
    }

    /// Forget the running job; its result will be discarded
    pub(crate) fn cancel(&mut self) {
        self.expected = None;
    }

    pub(crate) fn is_loading(&self) -> bool {
        self.expected.is_some()
    }

    /// Result of the current job, if it has finished
    pub(crate) fn poll(&mut self) -> Option<Outcome<T>> {
        while let Ok((generation, result)) = self.rx.try_recv() {
            if self.expected == Some(generation) {
                self.expected = None;
                return Some((generation, result));
            }
            tracing::debug!("Dropping superseded load (generation {})", generation);
        }
        None
    }
}
