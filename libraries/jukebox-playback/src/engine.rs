//! Jukebox engine - core orchestration
//!
//! Owns the catalog, request queue, history, rotation and the two audio
//! channels. Drives track transitions, crossfades and the progress clock
//! from a virtual time base that the owner advances explicitly.

use crate::{
    channel::{AudioChannel, ChannelSignal, Generation},
    crossfade::Crossfade,
    error::{PlaybackError, Result},
    events::JukeboxEvent,
    history::History,
    progress::ProgressSnapshot,
    queue::RequestQueue,
    rotation::Rotation,
    timer::Timer,
    types::{EngineConfig, PlaybackState},
};
use jukebox_core::{Catalog, Track, TrackId};
use std::time::Duration;

/// Number of channels in the pool
pub const CHANNEL_COUNT: usize = 2;

/// Load waiting for its `Ready` signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingLoad {
    track: TrackId,
    slot: usize,
    generation: Generation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerKind {
    Fade,
    Progress,
}

/// Dual-channel crossfading jukebox
///
/// The engine never blocks and never reads a wall clock. Call
/// [`process_signals`](Self::process_signals) to consume channel
/// notifications, [`advance`](Self::advance) to move time forward, and
/// [`drain_events`](Self::drain_events) to collect what happened.
pub struct JukeboxEngine<C: AudioChannel> {
    config: EngineConfig,

    // Track sources
    catalog: Catalog,
    queue: RequestQueue,
    history: History,
    rotation: Rotation,

    // Channel pool
    channels: [C; CHANNEL_COUNT],
    active: Option<usize>,
    slot_generation: [Option<Generation>; CHANNEL_COUNT],
    generation: Generation,
    pending: Option<PendingLoad>,

    // Now playing (bound to the active channel)
    current: Option<TrackId>,
    current_recorded: bool,
    playing: bool,

    // Seek gesture
    seeking: bool,
    resume_after_seek: bool,

    // Timers
    clock: Duration,
    fade: Option<Crossfade>,
    fade_timer: Timer,
    progress_timer: Timer,
    progress_slot: Option<usize>,
    progress: ProgressSnapshot,

    consecutive_failures: usize,

    // Event queue for UI synchronization
    reported_state: PlaybackState,
    pending_events: Vec<JukeboxEvent>,
}

impl<C: AudioChannel> JukeboxEngine<C> {
    /// Create an engine over two channels with an empty catalog
    pub fn new(channels: [C; CHANNEL_COUNT], config: EngineConfig) -> Self {
        Self {
            config,
            catalog: Catalog::empty(),
            queue: RequestQueue::new(),
            history: History::new(),
            rotation: Rotation::new(),
            channels,
            active: None,
            slot_generation: [None; CHANNEL_COUNT],
            generation: 0,
            pending: None,
            current: None,
            current_recorded: false,
            playing: false,
            seeking: false,
            resume_after_seek: false,
            clock: Duration::ZERO,
            fade: None,
            fade_timer: Timer::new(config.fade_tick),
            progress_timer: Timer::new(config.progress_tick),
            progress_slot: None,
            progress: ProgressSnapshot::zero(),
            consecutive_failures: 0,
            reported_state: PlaybackState::Idle,
            pending_events: Vec::new(),
        }
    }

    /// Replace the rotation selector (e.g. with a seeded one)
    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    // ===== Playback Control =====

    /// Start playback, or resume if paused
    pub fn play(&mut self) {
        self.consecutive_failures = 0;

        if self.current.is_none() {
            if self.pending.is_none() {
                self.advance_track(true);
            }
        } else if !self.playing {
            self.resume();
        }

        self.sync_state();
    }

    /// Pause the active channel
    ///
    /// An in-flight crossfade keeps running on the outgoing channel.
    pub fn pause(&mut self) {
        self.pause_active();
        self.sync_state();
    }

    /// Stop playback
    ///
    /// Cancels timers, any crossfade and any pending load, rewinds the
    /// active channel and clears the current track. Queue and history are
    /// kept.
    pub fn stop(&mut self) {
        self.halt();
        self.sync_state();
    }

    /// Skip to the next track (queue first, then rotation)
    pub fn next(&mut self) {
        self.consecutive_failures = 0;
        self.advance_track(true);
        self.sync_state();
    }

    /// Go back to the most recent history entry
    ///
    /// The track being left is not pushed to history. With empty history the
    /// current track is replayed from the start.
    pub fn previous(&mut self) {
        self.consecutive_failures = 0;

        if let Some(target) = self.history.pop().or(self.current) {
            if let Err(e) = self.start_load(target) {
                self.skip_failed(target, &e.to_string());
            }
        }

        self.sync_state();
    }

    // ===== Seeking =====

    /// Start a seek gesture: pause if playing and suspend the progress clock
    pub fn seek_begin(&mut self) {
        if self.seeking {
            return;
        }

        self.resume_after_seek = self.playing;
        self.pause_active();
        self.seeking = true;
        self.sync_state();
    }

    /// Preview a slider position without moving playback
    pub fn seek_preview(&mut self, fraction: f64) {
        if !fraction.is_finite() {
            return;
        }

        if let Some(duration) = self.active_duration() {
            self.set_progress(ProgressSnapshot::from_fraction(fraction, duration));
        }
    }

    /// Finish a seek gesture at `fraction` of the track
    ///
    /// A non-finite fraction leaves the position untouched. Playback resumes
    /// if it was running when the gesture began.
    pub fn seek_commit(&mut self, fraction: f64) {
        self.seeking = false;
        let resume = std::mem::take(&mut self.resume_after_seek);

        if fraction.is_finite() {
            if let (Some(slot), Some(duration)) = (self.active, self.active_duration()) {
                let target = duration.mul_f64(fraction.clamp(0.0, 1.0));
                match self.channels[slot].set_position(target) {
                    Ok(()) => self.set_progress(ProgressSnapshot::from_position(target, duration)),
                    Err(e) => {
                        tracing::warn!("Seek failed: {}", e);
                        self.emit_notice(format!("Could not seek: {}", e));
                    }
                }
            }
        }

        if resume {
            self.resume();
        }

        self.sync_state();
    }

    // ===== Queue Management =====

    /// Request a track
    ///
    /// Returns `Ok(false)` if the track was already queued.
    pub fn enqueue(&mut self, id: TrackId) -> Result<bool> {
        if !self.catalog.contains(id) {
            return Err(PlaybackError::UnknownTrack(id));
        }

        let added = self.queue.enqueue(id);
        if added {
            self.emit_queue_changed();
        }
        Ok(added)
    }

    /// Remove a request by its position in the queue
    pub fn decline_at(&mut self, index: usize) -> Option<TrackId> {
        let removed = self.queue.remove_at(index);
        if removed.is_some() {
            self.emit_queue_changed();
        }
        removed
    }

    /// Install a freshly scanned catalog
    ///
    /// Stops playback, releases both channels and forgets queue, history
    /// and rotation state from the old catalog.
    pub fn replace_catalog(&mut self, catalog: Catalog) {
        self.halt();

        for channel in &mut self.channels {
            channel.unload();
        }
        self.slot_generation = [None; CHANNEL_COUNT];
        self.active = None;
        self.generation += 1;

        self.queue.clear();
        self.history.clear();
        self.rotation.reset();

        let track_count = catalog.len();
        self.catalog = catalog;
        tracing::info!("Catalog loaded with {} tracks", track_count);

        self.emit_queue_changed();
        self.pending_events
            .push(JukeboxEvent::CatalogReplaced { track_count });
        self.sync_state();
    }

    // ===== Driving =====

    /// Consume pending channel signals
    ///
    /// Returns the number of signals handled. Signals raised while handling
    /// are left for the next call.
    pub fn process_signals(&mut self) -> usize {
        let mut signals = Vec::new();
        for (slot, channel) in self.channels.iter_mut().enumerate() {
            while let Some(signal) = channel.poll_signal() {
                signals.push((slot, signal));
            }
        }

        let handled = signals.len();
        for (slot, signal) in signals {
            match signal {
                ChannelSignal::Ready { generation } => self.on_ready(slot, generation),
                ChannelSignal::Failed { generation, reason } => {
                    self.on_failed(slot, generation, &reason);
                }
                ChannelSignal::Ended { generation } => self.on_ended(slot, generation),
            }
        }

        self.sync_state();
        handled
    }

    /// Move the virtual clock forward, firing due timers in deadline order
    ///
    /// When both timers are due at the same instant the fade tick runs
    /// first.
    pub fn advance(&mut self, elapsed: Duration) {
        let target = self.clock + elapsed;

        while let Some((kind, due)) = self.next_due_timer(target) {
            self.clock = due;
            match kind {
                TimerKind::Fade => {
                    if self.fade_timer.fire_if_due(due) {
                        self.on_fade_tick();
                    }
                }
                TimerKind::Progress => {
                    if self.progress_timer.fire_if_due(due) {
                        self.on_progress_tick();
                    }
                }
            }
        }

        self.clock = target;
        self.sync_state();
    }

    /// Drain all pending events
    pub fn drain_events(&mut self) -> Vec<JukeboxEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== State Queries =====

    /// Current playback state
    pub fn state(&self) -> PlaybackState {
        if self.pending.is_some() {
            PlaybackState::Loading
        } else if self.current.is_none() {
            PlaybackState::Idle
        } else if !self.playing {
            PlaybackState::Paused
        } else if self.fade.is_some() {
            PlaybackState::Transitioning
        } else {
            PlaybackState::Playing
        }
    }

    /// Now-playing track
    pub fn current_track(&self) -> Option<&Track> {
        self.current.and_then(|id| self.catalog.get(id))
    }

    /// Now-playing track id
    pub fn current_track_id(&self) -> Option<TrackId> {
        self.current
    }

    /// Track waiting for its channel to become ready
    pub fn pending_track_id(&self) -> Option<TrackId> {
        self.pending.map(|p| p.track)
    }

    /// Check if the active channel is playing
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Check if a seek gesture is in progress
    pub fn is_seeking(&self) -> bool {
        self.seeking
    }

    /// Check if a crossfade is in flight
    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    /// Latest progress snapshot
    pub fn progress(&self) -> &ProgressSnapshot {
        &self.progress
    }

    /// Requested tracks in play order
    pub fn queue_tracks(&self) -> Vec<&Track> {
        self.queue
            .iter()
            .filter_map(|id| self.catalog.get(id))
            .collect()
    }

    /// Number of history entries
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// History entries, oldest first
    pub fn history_ids(&self) -> Vec<TrackId> {
        self.history.iter().collect()
    }

    /// Current catalog
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Virtual clock
    pub fn now(&self) -> Duration {
        self.clock
    }

    /// Index of the channel receiving transport commands
    pub fn active_slot(&self) -> Option<usize> {
        self.active
    }

    /// Borrow a channel
    pub fn channel(&self, slot: usize) -> Option<&C> {
        self.channels.get(slot)
    }

    /// Mutably borrow a channel
    pub fn channel_mut(&mut self, slot: usize) -> Option<&mut C> {
        self.channels.get_mut(slot)
    }

    // ===== Transitions =====

    /// Leave the current track and start the next one
    ///
    /// Synchronous load failures are skipped in a loop (bounded by the
    /// failure limit) rather than by recursion.
    fn advance_track(&mut self, record_current: bool) {
        if record_current {
            self.record_current();
        }

        loop {
            let Some(next) = self.select_next() else {
                tracing::info!("Nothing left to play");
                self.halt();
                self.pending_events.push(JukeboxEvent::EndOfPlayback);
                return;
            };

            match self.start_load(next) {
                Ok(()) => return,
                Err(e) => {
                    if !self.register_failure(next, &e.to_string()) {
                        return;
                    }
                }
            }
        }
    }

    fn select_next(&mut self) -> Option<TrackId> {
        if let Some(id) = self.queue.dequeue_front() {
            self.emit_queue_changed();
            return Some(id);
        }
        self.rotation.next(&self.catalog)
    }

    fn record_current(&mut self) {
        if let Some(id) = self.current {
            if !self.current_recorded {
                self.history.push(id);
                self.current_recorded = true;
            }
        }
    }

    /// Load a track into the inactive channel at volume 0
    fn start_load(&mut self, id: TrackId) -> Result<()> {
        let track = self
            .catalog
            .get(id)
            .cloned()
            .ok_or(PlaybackError::UnknownTrack(id))?;

        // The inactive slot may still be fading out
        self.complete_fade();

        if let Some(superseded) = self.pending.take() {
            tracing::debug!("Load of track {} superseded", superseded.track);
        }

        self.generation += 1;
        let generation = self.generation;
        let slot = self.inactive_slot();

        self.channels[slot].set_volume(0.0);
        self.slot_generation[slot] = Some(generation);
        self.pending = Some(PendingLoad {
            track: id,
            slot,
            generation,
        });

        tracing::debug!(
            "Loading {} into channel {} (generation {})",
            track.title,
            slot,
            generation
        );

        if let Err(e) = self.channels[slot].load(&track, generation) {
            self.pending = None;
            self.slot_generation[slot] = None;
            return Err(e);
        }

        Ok(())
    }

    fn inactive_slot(&self) -> usize {
        self.active.map_or(0, |slot| (slot + 1) % CHANNEL_COUNT)
    }

    fn on_ready(&mut self, slot: usize, generation: Generation) {
        let Some(pending) = self
            .pending
            .filter(|p| p.slot == slot && p.generation == generation)
        else {
            tracing::debug!(
                "Ignoring stale ready signal (channel {}, generation {})",
                slot,
                generation
            );
            return;
        };
        self.pending = None;

        if let Err(e) = self.channels[slot].play() {
            self.skip_failed(pending.track, &e.to_string());
            return;
        }

        let outgoing = self.active.filter(|&active| active != slot);
        let outgoing_audible = outgoing.is_some_and(|o| !self.channels[o].is_paused());
        let previous_track_id = self.current;

        self.active = Some(slot);
        self.current = Some(pending.track);
        self.current_recorded = false;
        self.playing = true;
        self.seeking = false;
        self.resume_after_seek = false;
        self.consecutive_failures = 0;

        self.progress = ProgressSnapshot::zero();
        self.progress_timer.start(self.clock);
        self.progress_slot = Some(slot);

        if let Some(track) = self.catalog.get(pending.track).cloned() {
            tracing::info!("Now playing: {}", track.display_line());
            self.pending_events.push(JukeboxEvent::TrackChanged {
                track,
                previous_track_id,
            });
        }

        match outgoing {
            Some(old) if outgoing_audible => {
                let start_volume = self.channels[old].volume();
                self.fade = Some(Crossfade::new(
                    old,
                    slot,
                    start_volume,
                    self.config.fade_steps(),
                ));
                self.fade_timer.start(self.clock);
                self.pending_events.push(JukeboxEvent::CrossfadeStarted {
                    from_track_id: previous_track_id,
                    to_track_id: pending.track,
                    duration_ms: u64::try_from(self.config.fade_duration.as_millis())
                        .unwrap_or(u64::MAX),
                });
            }
            _ => {
                self.channels[slot].set_volume(1.0);
                if let Some(old) = outgoing {
                    self.rewind_slot(old);
                }
            }
        }
    }

    fn on_failed(&mut self, slot: usize, generation: Generation, reason: &str) {
        if let Some(pending) = self
            .pending
            .filter(|p| p.slot == slot && p.generation == generation)
        {
            self.skip_failed(pending.track, reason);
            return;
        }

        let is_current = self.pending.is_none()
            && self.active == Some(slot)
            && self.slot_generation[slot] == Some(generation);

        match self.current {
            Some(track) if is_current => self.skip_failed(track, reason),
            _ => tracing::debug!(
                "Ignoring stale failure (channel {}, generation {}): {}",
                slot,
                generation,
                reason
            ),
        }
    }

    fn on_ended(&mut self, slot: usize, generation: Generation) {
        if self.active != Some(slot) || self.slot_generation[slot] != Some(generation) {
            tracing::debug!(
                "Ignoring stale end signal (channel {}, generation {})",
                slot,
                generation
            );
            return;
        }

        // A drained channel is silent; it must not be faded out
        self.channels[slot].pause();

        if self.pending.is_some() {
            tracing::debug!("Track ended while the next one is loading");
            return;
        }

        self.advance_track(true);
    }

    fn skip_failed(&mut self, track: TrackId, reason: &str) {
        if self.register_failure(track, reason) {
            self.advance_track(true);
        }
    }

    /// Count a failed track; returns `false` once playback was stopped
    fn register_failure(&mut self, track: TrackId, reason: &str) -> bool {
        self.pending = None;
        self.consecutive_failures += 1;

        let title = self
            .catalog
            .get(track)
            .map_or_else(|| track.to_string(), |t| t.title.clone());
        tracing::warn!("Skipping {}: {}", title, reason);
        self.emit_notice(format!("Could not play {}: {}", title, reason));

        let limit = self.catalog.len().max(1);
        if self.consecutive_failures >= limit {
            tracing::warn!(
                "{} tracks failed in a row, stopping playback",
                self.consecutive_failures
            );
            self.halt();
            self.pending_events.push(JukeboxEvent::EndOfPlayback);
            return false;
        }

        true
    }

    fn resume(&mut self) {
        let Some(slot) = self.active else {
            return;
        };

        match self.channels[slot].play() {
            Ok(()) => {
                self.playing = true;
                self.progress_timer.start(self.clock);
                self.progress_slot = Some(slot);
            }
            Err(e) => {
                tracing::warn!("Resume failed: {}", e);
                self.emit_notice(format!("Could not resume playback: {}", e));
            }
        }
    }

    fn pause_active(&mut self) {
        if !self.playing {
            return;
        }

        if let Some(slot) = self.active {
            self.channels[slot].pause();
        }
        self.playing = false;
        self.progress_timer.stop();
    }

    fn halt(&mut self) {
        self.fade_timer.stop();
        self.progress_timer.stop();
        self.progress_slot = None;

        if let Some(fade) = self.fade.take() {
            self.rewind_slot(fade.outgoing());
            self.channels[fade.outgoing()].set_volume(0.0);
        }

        if self.pending.take().is_some() {
            self.generation += 1;
        }

        if let Some(slot) = self.active {
            self.rewind_slot(slot);
        }

        self.current = None;
        self.current_recorded = false;
        self.playing = false;
        self.seeking = false;
        self.resume_after_seek = false;
        self.consecutive_failures = 0;

        self.set_progress(ProgressSnapshot::zero());
    }

    fn rewind_slot(&mut self, slot: usize) {
        if let Err(e) = self.channels[slot].pause_and_rewind() {
            tracing::debug!("Could not rewind channel {}: {}", slot, e);
        }
    }

    // ===== Timers =====

    fn next_due_timer(&self, limit: Duration) -> Option<(TimerKind, Duration)> {
        let fade = self.fade_timer.next_due().filter(|due| *due <= limit);
        let progress = self.progress_timer.next_due().filter(|due| *due <= limit);

        match (fade, progress) {
            (Some(f), Some(p)) if p < f => Some((TimerKind::Progress, p)),
            (Some(f), _) => Some((TimerKind::Fade, f)),
            (None, Some(p)) => Some((TimerKind::Progress, p)),
            (None, None) => None,
        }
    }

    fn on_fade_tick(&mut self) {
        let Some(fade) = self.fade.as_mut() else {
            self.fade_timer.stop();
            return;
        };

        let levels = fade.tick();
        let (outgoing, incoming) = (fade.outgoing(), fade.incoming());
        let complete = fade.is_complete();

        self.channels[outgoing].set_volume(levels.outgoing);
        self.channels[incoming].set_volume(levels.incoming);

        if complete {
            self.complete_fade();
        }
    }

    /// Finish the in-flight crossfade immediately
    fn complete_fade(&mut self) {
        let Some(fade) = self.fade.take() else {
            return;
        };
        self.fade_timer.stop();

        let levels = Crossfade::final_levels();
        self.rewind_slot(fade.outgoing());
        self.channels[fade.outgoing()].set_volume(levels.outgoing);
        self.channels[fade.incoming()].set_volume(levels.incoming);

        self.pending_events.push(JukeboxEvent::CrossfadeCompleted);
    }

    fn on_progress_tick(&mut self) {
        if !self.playing || self.seeking {
            return;
        }

        let Some(slot) = self.active.filter(|slot| self.progress_slot == Some(*slot)) else {
            return;
        };

        let channel = &self.channels[slot];
        let Some(duration) = channel.duration().filter(|d| !d.is_zero()) else {
            return;
        };

        let snapshot = ProgressSnapshot::from_position(channel.position(), duration);
        self.set_progress(snapshot);
    }

    fn active_duration(&self) -> Option<Duration> {
        self.current?;
        let slot = self.active?;
        self.channels[slot].duration().filter(|d| !d.is_zero())
    }

    // ===== Events =====

    fn set_progress(&mut self, snapshot: ProgressSnapshot) {
        self.progress = snapshot.clone();
        self.pending_events.push(JukeboxEvent::Progress(snapshot));
    }

    fn sync_state(&mut self) {
        let state = self.state();
        if state != self.reported_state {
            self.reported_state = state;
            self.pending_events
                .push(JukeboxEvent::StateChanged { state });
        }
    }

    fn emit_queue_changed(&mut self) {
        let length = self.queue.len();
        self.pending_events.push(JukeboxEvent::QueueChanged { length });
    }

    fn emit_notice(&mut self, message: String) {
        self.pending_events.push(JukeboxEvent::Notice { message });
    }
}
