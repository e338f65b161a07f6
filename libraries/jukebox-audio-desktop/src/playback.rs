//! Desktop playback integration
//!
//! Runs a [`JukeboxEngine`] over two [`RodioChannel`]s on a dedicated driver
//! thread. Other threads talk to it through a command channel and receive
//! [`JukeboxEvent`]s through an event channel.

use crate::channel::RodioChannel;
use crate::error::{AudioError, Result};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TrySendError};
use jukebox_core::{Catalog, Track, TrackId};
use jukebox_playback::{
    AudioChannel, EngineConfig, JukeboxEngine, JukeboxEvent, PlaybackState, ProgressSnapshot,
};
use rodio::OutputStreamBuilder;
use std::ops::ControlFlow;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// How long the driver waits for a command before servicing timers
pub const POLL_INTERVAL: Duration = Duration::from_millis(10);

const COMMAND_CAPACITY: usize = 32;
const EVENT_CAPACITY: usize = 256;

/// Commands sent to the driver thread
#[derive(Debug, Clone)]
pub enum JukeboxCommand {
    /// Start or resume playback
    Play,

    /// Pause playback
    Pause,

    /// Stop playback
    Stop,

    /// Skip to next track
    Next,

    /// Go to previous track
    Previous,

    /// Start a seek gesture
    SeekBegin,

    /// Move the progress display during a seek gesture
    SeekPreview(f64),

    /// Finish a seek gesture at a fraction of the track
    SeekCommit(f64),

    /// Request a track
    Enqueue(TrackId),

    /// Remove a request by queue position
    Decline(usize),

    /// Install a new catalog
    ReplaceCatalog(Catalog),

    /// Stop the driver thread
    Shutdown,
}

/// Snapshot of the engine, refreshed by the driver on every loop
#[derive(Debug, Clone)]
pub struct JukeboxStatus {
    /// Current state
    pub state: PlaybackState,

    /// Track being played
    pub current: Option<Track>,

    /// Latest progress sample
    pub progress: ProgressSnapshot,

    /// Pending requests in play order
    pub queue: Vec<Track>,

    /// Number of tracks "previous" can go back through
    pub history_len: usize,

    /// Number of tracks in the catalog
    pub catalog_len: usize,
}

impl Default for JukeboxStatus {
    fn default() -> Self {
        Self {
            state: PlaybackState::Idle,
            current: None,
            progress: ProgressSnapshot::zero(),
            queue: Vec::new(),
            history_len: 0,
            catalog_len: 0,
        }
    }
}

impl JukeboxStatus {
    /// Capture the engine's current status
    pub fn capture<C: AudioChannel>(engine: &JukeboxEngine<C>) -> Self {
        Self {
            state: engine.state(),
            current: engine.current_track().cloned(),
            progress: engine.progress().clone(),
            queue: engine.queue_tracks().into_iter().cloned().collect(),
            history_len: engine.history_len(),
            catalog_len: engine.catalog().len(),
        }
    }
}

/// Apply one command to the engine
///
/// Returns `Break` on shutdown. Rejected requests surface as notices.
pub fn apply_command<C: AudioChannel>(
    engine: &mut JukeboxEngine<C>,
    command: JukeboxCommand,
) -> ControlFlow<(), Option<JukeboxEvent>> {
    match command {
        JukeboxCommand::Play => engine.play(),
        JukeboxCommand::Pause => engine.pause(),
        JukeboxCommand::Stop => engine.stop(),
        JukeboxCommand::Next => engine.next(),
        JukeboxCommand::Previous => engine.previous(),
        JukeboxCommand::SeekBegin => engine.seek_begin(),
        JukeboxCommand::SeekPreview(fraction) => engine.seek_preview(fraction),
        JukeboxCommand::SeekCommit(fraction) => engine.seek_commit(fraction),
        JukeboxCommand::Enqueue(id) => match engine.enqueue(id) {
            Ok(true) => {}
            Ok(false) => {
                return ControlFlow::Continue(Some(JukeboxEvent::Notice {
                    message: format!("Track {} is already requested", id),
                }));
            }
            Err(e) => {
                return ControlFlow::Continue(Some(JukeboxEvent::Notice {
                    message: e.to_string(),
                }));
            }
        },
        JukeboxCommand::Decline(index) => {
            if engine.decline_at(index).is_none() {
                return ControlFlow::Continue(Some(JukeboxEvent::Notice {
                    message: format!("No request at position {}", index),
                }));
            }
        }
        JukeboxCommand::ReplaceCatalog(catalog) => engine.replace_catalog(catalog),
        JukeboxCommand::Shutdown => return ControlFlow::Break(()),
    }

    ControlFlow::Continue(None)
}

/// Desktop jukebox
///
/// Owns the driver thread; dropping it shuts the thread down.
pub struct DesktopJukebox {
    /// Command sender
    command_tx: Sender<JukeboxCommand>,

    /// Event receiver
    event_rx: Receiver<JukeboxEvent>,

    /// Status written by the driver
    status: Arc<Mutex<JukeboxStatus>>,

    driver: Option<JoinHandle<()>>,
}

impl DesktopJukebox {
    /// Open the default output device and start the driver
    ///
    /// # Returns
    /// * `Ok(jukebox)` - Driver running with `catalog` installed
    /// * `Err(_)` - No output device, or the thread could not start
    pub fn start(catalog: Catalog, config: EngineConfig) -> Result<Self> {
        let (command_tx, command_rx) = bounded(COMMAND_CAPACITY);
        let (event_tx, event_rx) = bounded(EVENT_CAPACITY);
        let (startup_tx, startup_rx) = bounded(1);
        let status = Arc::new(Mutex::new(JukeboxStatus::default()));

        let driver_status = Arc::clone(&status);
        let driver = thread::Builder::new()
            .name("jukebox-driver".to_string())
            .spawn(move || {
                run_driver(
                    catalog,
                    config,
                    &command_rx,
                    &event_tx,
                    &driver_status,
                    &startup_tx,
                );
            })
            .map_err(AudioError::Thread)?;

        match startup_rx.recv() {
            Ok(Ok(())) => Ok(Self {
                command_tx,
                event_rx,
                status,
                driver: Some(driver),
            }),
            Ok(Err(e)) => {
                let _ = driver.join();
                Err(e)
            }
            Err(_) => {
                let _ = driver.join();
                Err(AudioError::DriverStopped)
            }
        }
    }

    /// Send command to the driver thread
    pub fn send(&self, command: JukeboxCommand) -> Result<()> {
        self.command_tx
            .send(command)
            .map_err(|_| AudioError::DriverStopped)
    }

    /// Event stream from the driver
    pub fn events(&self) -> &Receiver<JukeboxEvent> {
        &self.event_rx
    }

    /// Latest status snapshot
    pub fn status(&self) -> JukeboxStatus {
        self.status
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Stop the driver and wait for it to exit
    pub fn shutdown(mut self) {
        self.stop_driver();
    }

    fn stop_driver(&mut self) {
        if let Some(driver) = self.driver.take() {
            let _ = self.command_tx.send(JukeboxCommand::Shutdown);
            if driver.join().is_err() {
                tracing::error!("Jukebox driver panicked");
            }
        }
    }
}

impl Drop for DesktopJukebox {
    fn drop(&mut self) {
        self.stop_driver();
    }
}

fn run_driver(
    catalog: Catalog,
    config: EngineConfig,
    commands: &Receiver<JukeboxCommand>,
    events: &Sender<JukeboxEvent>,
    status: &Mutex<JukeboxStatus>,
    startup: &Sender<Result<()>>,
) {
    let mut stream = match OutputStreamBuilder::open_default_stream() {
        Ok(stream) => stream,
        Err(e) => {
            let _ = startup.send(Err(e.into()));
            return;
        }
    };
    stream.log_on_drop(false);

    let channels = [
        RodioChannel::new(stream.mixer()),
        RodioChannel::new(stream.mixer()),
    ];
    let mut engine = JukeboxEngine::new(channels, config);
    engine.replace_catalog(catalog);

    if startup.send(Ok(())).is_err() {
        return;
    }
    tracing::info!("Jukebox driver started");

    let mut last_tick = Instant::now();
    'driver: loop {
        let first = match commands.recv_timeout(POLL_INTERVAL) {
            Ok(command) => Some(command),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => break,
        };

        for command in first.into_iter().chain(commands.try_iter()) {
            match apply_command(&mut engine, command) {
                ControlFlow::Continue(Some(event)) => forward(events, event),
                ControlFlow::Continue(None) => {}
                ControlFlow::Break(()) => break 'driver,
            }
        }

        engine.process_signals();

        let now = Instant::now();
        engine.advance(now.duration_since(last_tick));
        last_tick = now;

        for event in engine.drain_events() {
            forward(events, event);
        }

        *status.lock().unwrap_or_else(PoisonError::into_inner) = JukeboxStatus::capture(&engine);
    }

    engine.stop();
    tracing::info!("Jukebox driver stopped");
}

fn forward(events: &Sender<JukeboxEvent>, event: JukeboxEvent) {
    match events.try_send(event) {
        Ok(()) | Err(TrySendError::Disconnected(_)) => {}
        Err(TrySendError::Full(event)) => {
            tracing::trace!("Event channel full, dropping {:?}", event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jukebox_playback::{ChannelSignal, Generation, PlaybackError};
    use std::collections::VecDeque;
    use std::path::PathBuf;

    /// Channel that becomes ready immediately
    #[derive(Default)]
    struct ReadyChannel {
        loaded: Option<Generation>,
        paused: bool,
        volume: f32,
        signals: VecDeque<ChannelSignal>,
    }

    impl AudioChannel for ReadyChannel {
        fn load(
            &mut self,
            _track: &Track,
            generation: Generation,
        ) -> jukebox_playback::Result<()> {
            self.loaded = Some(generation);
            self.paused = true;
            self.signals.push_back(ChannelSignal::Ready { generation });
            Ok(())
        }

        fn unload(&mut self) {
            self.loaded = None;
            self.paused = true;
            self.signals.clear();
        }

        fn play(&mut self) -> jukebox_playback::Result<()> {
            if self.loaded.is_none() {
                return Err(PlaybackError::ChannelTransport("empty".to_string()));
            }
            self.paused = false;
            Ok(())
        }

        fn pause(&mut self) {
            self.paused = true;
        }

        fn is_paused(&self) -> bool {
            self.loaded.is_none() || self.paused
        }

        fn position(&self) -> Duration {
            Duration::ZERO
        }

        fn duration(&self) -> Option<Duration> {
            self.loaded.map(|_| Duration::from_secs(60))
        }

        fn set_position(&mut self, _position: Duration) -> jukebox_playback::Result<()> {
            Ok(())
        }

        fn set_volume(&mut self, volume: f32) {
            self.volume = volume;
        }

        fn volume(&self) -> f32 {
            self.volume
        }

        fn poll_signal(&mut self) -> Option<ChannelSignal> {
            self.signals.pop_front()
        }
    }

    fn catalog(count: u32) -> Catalog {
        Catalog::new(
            (0..count)
                .map(|i| {
                    Track::new(
                        TrackId::new(i),
                        format!("Song {}", i),
                        "Band",
                        "Record",
                        PathBuf::from(format!("/music/{}.ogg", i)),
                    )
                })
                .collect(),
        )
    }

    fn engine(count: u32) -> JukeboxEngine<ReadyChannel> {
        let channels = [ReadyChannel::default(), ReadyChannel::default()];
        let mut engine = JukeboxEngine::new(channels, EngineConfig::default());
        engine.replace_catalog(catalog(count));
        engine.drain_events();
        engine
    }

    fn notice(flow: ControlFlow<(), Option<JukeboxEvent>>) -> Option<String> {
        match flow {
            ControlFlow::Continue(Some(JukeboxEvent::Notice { message })) => Some(message),
            _ => None,
        }
    }

    #[test]
    fn shutdown_breaks_the_loop() {
        let mut engine = engine(2);
        assert!(apply_command(&mut engine, JukeboxCommand::Shutdown).is_break());
    }

    #[test]
    fn play_starts_loading() {
        let mut engine = engine(3);

        let flow = apply_command(&mut engine, JukeboxCommand::Play);

        assert!(matches!(flow, ControlFlow::Continue(None)));
        assert_eq!(engine.state(), PlaybackState::Loading);

        engine.process_signals();
        assert_eq!(engine.state(), PlaybackState::Playing);
    }

    #[test]
    fn duplicate_request_is_reported() {
        let mut engine = engine(3);

        let request = JukeboxCommand::Enqueue(TrackId::new(1));

        assert!(notice(apply_command(&mut engine, request.clone())).is_none());
        let message = notice(apply_command(&mut engine, request));

        assert!(message.unwrap().contains("already requested"));
        assert_eq!(engine.queue_tracks().len(), 1);
    }

    #[test]
    fn unknown_request_is_reported() {
        let mut engine = engine(3);

        let request = JukeboxCommand::Enqueue(TrackId::new(42));
        let message = notice(apply_command(&mut engine, request));

        assert!(message.unwrap().contains("42"));
        assert!(engine.queue_tracks().is_empty());
    }

    #[test]
    fn decline_out_of_range_is_reported() {
        let mut engine = engine(3);
        apply_command(&mut engine, JukeboxCommand::Enqueue(TrackId::new(2)));

        assert!(notice(apply_command(&mut engine, JukeboxCommand::Decline(5))).is_some());
        assert!(notice(apply_command(&mut engine, JukeboxCommand::Decline(0))).is_none());
        assert!(engine.queue_tracks().is_empty());
    }

    #[test]
    fn catalog_replacement_goes_through_the_engine() {
        let mut engine = engine(3);

        apply_command(&mut engine, JukeboxCommand::ReplaceCatalog(catalog(7)));

        assert_eq!(engine.catalog().len(), 7);
    }

    #[test]
    fn status_reflects_the_engine() {
        let mut engine = engine(4);
        apply_command(&mut engine, JukeboxCommand::Enqueue(TrackId::new(3)));
        apply_command(&mut engine, JukeboxCommand::Play);
        engine.process_signals();

        let status = JukeboxStatus::capture(&engine);

        assert_eq!(status.state, PlaybackState::Playing);
        assert_eq!(status.current.map(|t| t.id), Some(TrackId::new(3)));
        assert!(status.queue.is_empty());
        assert_eq!(status.catalog_len, 4);
    }

    #[test]
    fn default_status_is_idle() {
        let status = JukeboxStatus::default();

        assert_eq!(status.state, PlaybackState::Idle);
        assert!(status.current.is_none());
        assert_eq!(status.catalog_len, 0);
    }

    #[test]
    fn start_without_a_device_fails_cleanly() {
        // May succeed when an output device is present
        match DesktopJukebox::start(catalog(1), EngineConfig::default()) {
            Ok(jukebox) => {
                jukebox.send(JukeboxCommand::Stop).unwrap();
                jukebox.shutdown();
            }
            Err(e) => {
                eprintln!("Note: Audio device not available in test environment: {}", e);
            }
        }
    }
}
