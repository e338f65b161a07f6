//! Shared helpers for engine tests
//!
//! `MockChannel` records every volume write and lets tests script readiness,
//! failures and end-of-track explicitly.

#![allow(dead_code)]

use jukebox_core::{Catalog, Track, TrackId};
use jukebox_playback::{
    AudioChannel, ChannelSignal, EngineConfig, Generation, JukeboxEngine, JukeboxEvent,
    PlaybackError, Result, Rotation,
};
use std::collections::{HashSet, VecDeque};
use std::path::PathBuf;
use std::time::Duration;

/// How mock channels react to loads
#[derive(Debug, Clone)]
pub struct MockBehavior {
    /// Tracks whose load is reported through a `Failed` signal
    pub fail_on_signal: HashSet<TrackId>,

    /// Tracks whose load returns an error immediately
    pub fail_on_load: HashSet<TrackId>,

    /// Require `send_ready` instead of queueing `Ready` on load
    pub manual_ready: bool,

    /// Duration reported for every loaded track
    pub duration: Option<Duration>,
}

impl Default for MockBehavior {
    fn default() -> Self {
        Self {
            fail_on_signal: HashSet::new(),
            fail_on_load: HashSet::new(),
            manual_ready: false,
            duration: Some(Duration::from_secs(180)),
        }
    }
}

/// Scriptable in-memory channel
#[derive(Debug)]
pub struct MockChannel {
    behavior: MockBehavior,
    loaded: Option<(TrackId, Generation)>,
    signals: VecDeque<ChannelSignal>,
    paused: bool,
    volume: f32,
    position: Duration,
    play_fails: bool,
    pub volume_writes: Vec<f32>,
    pub loads: usize,
    pub unloads: usize,
}

impl MockChannel {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            loaded: None,
            signals: VecDeque::new(),
            paused: true,
            volume: 1.0,
            position: Duration::ZERO,
            play_fails: false,
            volume_writes: Vec::new(),
            loads: 0,
            unloads: 0,
        }
    }

    pub fn pair(behavior: MockBehavior) -> [Self; 2] {
        [Self::new(behavior.clone()), Self::new(behavior)]
    }

    pub fn loaded_track(&self) -> Option<TrackId> {
        self.loaded.map(|(id, _)| id)
    }

    pub fn loaded_generation(&self) -> Option<Generation> {
        self.loaded.map(|(_, generation)| generation)
    }

    /// Report the current load as ready
    pub fn send_ready(&mut self) {
        if let Some(generation) = self.loaded_generation() {
            self.signals.push_back(ChannelSignal::Ready { generation });
        }
    }

    /// Report the current track as finished
    ///
    /// Like a drained sink, the channel does not pause itself.
    pub fn finish(&mut self) {
        if let Some(generation) = self.loaded_generation() {
            if let Some(duration) = self.behavior.duration {
                self.position = duration;
            }
            self.signals.push_back(ChannelSignal::Ended { generation });
        }
    }

    pub fn send_signal(&mut self, signal: ChannelSignal) {
        self.signals.push_back(signal);
    }

    pub fn set_play_fails(&mut self, fails: bool) {
        self.play_fails = fails;
    }
}

impl AudioChannel for MockChannel {
    fn load(&mut self, track: &Track, generation: Generation) -> Result<()> {
        self.loads += 1;
        self.paused = true;
        self.position = Duration::ZERO;

        if self.behavior.fail_on_load.contains(&track.id) {
            self.loaded = None;
            return Err(PlaybackError::ChannelLoad(format!(
                "cannot open {}",
                track.path.display()
            )));
        }

        self.loaded = Some((track.id, generation));
        if self.behavior.fail_on_signal.contains(&track.id) {
            self.signals.push_back(ChannelSignal::Failed {
                generation,
                reason: "unsupported format".to_string(),
            });
        } else if !self.behavior.manual_ready {
            self.signals.push_back(ChannelSignal::Ready { generation });
        }

        Ok(())
    }

    fn unload(&mut self) {
        self.unloads += 1;
        self.loaded = None;
        self.signals.clear();
        self.paused = true;
        self.position = Duration::ZERO;
    }

    fn play(&mut self) -> Result<()> {
        if self.play_fails {
            return Err(PlaybackError::ChannelTransport("device lost".to_string()));
        }
        if self.loaded.is_none() {
            return Err(PlaybackError::ChannelTransport("nothing loaded".to_string()));
        }
        self.paused = false;
        Ok(())
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn position(&self) -> Duration {
        self.position
    }

    fn duration(&self) -> Option<Duration> {
        self.loaded.and(self.behavior.duration)
    }

    fn set_position(&mut self, position: Duration) -> Result<()> {
        if self.loaded.is_none() {
            return Err(PlaybackError::Seek("nothing loaded".to_string()));
        }
        self.position = position;
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        self.volume_writes.push(volume);
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn poll_signal(&mut self) -> Option<ChannelSignal> {
        self.signals.pop_front()
    }
}

pub fn create_test_catalog(count: u32) -> Catalog {
    Catalog::new(
        (0..count)
            .map(|i| {
                Track::new(
                    TrackId::new(i),
                    format!("Track {}", i),
                    format!("Artist {}", i % 2),
                    "Album",
                    PathBuf::from(format!("/music/track_{:02}.mp3", i)),
                )
            })
            .collect(),
    )
}

pub fn create_engine(count: u32) -> JukeboxEngine<MockChannel> {
    create_engine_with(count, MockBehavior::default())
}

pub fn create_engine_with(count: u32, behavior: MockBehavior) -> JukeboxEngine<MockChannel> {
    let mut engine = JukeboxEngine::new(MockChannel::pair(behavior), EngineConfig::default())
        .with_rotation(Rotation::with_seed(0x5eed));
    engine.replace_catalog(create_test_catalog(count));
    engine.drain_events();
    engine
}

/// Process signals until the channels go quiet
pub fn settle(engine: &mut JukeboxEngine<MockChannel>) {
    for _ in 0..64 {
        if engine.process_signals() == 0 {
            return;
        }
    }
    panic!("channels never went quiet");
}

pub fn active_channel(engine: &JukeboxEngine<MockChannel>) -> &MockChannel {
    let slot = engine.active_slot().expect("no active channel");
    engine.channel(slot).expect("slot out of range")
}

pub fn id(raw: u32) -> TrackId {
    TrackId::new(raw)
}

pub fn tick(engine: &mut JukeboxEngine<MockChannel>, ticks: u32) {
    for _ in 0..ticks {
        engine.advance(Duration::from_millis(50));
    }
}

pub fn notices(events: &[JukeboxEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, JukeboxEvent::Notice { .. }))
        .count()
}

pub fn changed_tracks(events: &[JukeboxEvent]) -> Vec<(TrackId, Option<TrackId>)> {
    events
        .iter()
        .filter_map(|e| match e {
            JukeboxEvent::TrackChanged {
                track,
                previous_track_id,
            } => Some((track.id, *previous_track_id)),
            _ => None,
        })
        .collect()
}
