//! rodio-backed audio channel
//!
//! Files are opened on a loader thread. When the decoder is ready the channel
//! builds a fresh paused [`Sink`] on the shared mixer; dropping the old sink
//! stops whatever it was playing.

use crate::error::{AudioError, Result};
use crate::loader::Loader;
use jukebox_core::Track;
use jukebox_playback::{AudioChannel, ChannelSignal, Generation, PlaybackError};
use lofty::AudioFile;
use rodio::mixer::Mixer;
use rodio::{Decoder, Sink, Source};
use std::collections::VecDeque;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

/// Decoded track ready to be appended to a sink
pub(crate) struct OpenedTrack {
    pub(crate) source: Decoder<BufReader<File>>,
    pub(crate) duration: Option<Duration>,
}

/// Open and decode a file
///
/// Duration comes from the decoder, falling back to the container
/// properties read by lofty.
pub(crate) fn open_track(path: &Path) -> Result<OpenedTrack> {
    let file = File::open(path).map_err(|source| AudioError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let source = Decoder::new(BufReader::new(file)).map_err(|e| AudioError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let duration = source.total_duration().or_else(|| probe_duration(path));
    Ok(OpenedTrack { source, duration })
}

fn probe_duration(path: &Path) -> Option<Duration> {
    match lofty::read_from_path(path) {
        Ok(tagged) => Some(tagged.properties().duration()).filter(|d| !d.is_zero()),
        Err(e) => {
            tracing::debug!("No duration for {}: {}", path.display(), e);
            None
        }
    }
}

struct Loaded {
    sink: Sink,
    generation: Generation,
    duration: Option<Duration>,
    ended: bool,
}

/// Audio channel playing through the system output device
pub struct RodioChannel {
    mixer: Mixer,
    loader: Loader<OpenedTrack>,
    loaded: Option<Loaded>,
    signals: VecDeque<ChannelSignal>,
    volume: f32,
}

impl RodioChannel {
    /// Create a channel on the given mixer
    pub fn new(mixer: &Mixer) -> Self {
        Self {
            mixer: mixer.clone(),
            loader: Loader::new(),
            loaded: None,
            signals: VecDeque::new(),
            volume: 1.0,
        }
    }

    /// Install the decoder once the loader thread has opened the file
    fn check_loaded(&mut self) {
        let Some((generation, result)) = self.loader.poll() else {
            return;
        };

        match result {
            Ok(opened) => {
                let sink = Sink::connect_new(&self.mixer);
                sink.pause();
                sink.set_volume(self.volume);
                sink.append(opened.source);

                self.loaded = Some(Loaded {
                    sink,
                    generation,
                    duration: opened.duration,
                    ended: false,
                });
                self.signals.push_back(ChannelSignal::Ready { generation });
            }
            Err(e) => {
                self.signals.push_back(ChannelSignal::Failed {
                    generation,
                    reason: e.to_string(),
                });
            }
        }
    }

    fn check_ended(&mut self) {
        if let Some(loaded) = &mut self.loaded {
            if !loaded.ended && !loaded.sink.is_paused() && loaded.sink.empty() {
                loaded.ended = true;
                loaded.sink.pause();
                self.signals.push_back(ChannelSignal::Ended {
                    generation: loaded.generation,
                });
            }
        }
    }
}

impl AudioChannel for RodioChannel {
    fn load(&mut self, track: &Track, generation: Generation) -> jukebox_playback::Result<()> {
        self.unload();

        let path = track.path.clone();
        self.loader
            .start(generation, move || open_track(&path))
            .map_err(PlaybackError::from)
    }

    fn unload(&mut self) {
        if let Some(loaded) = self.loaded.take() {
            loaded.sink.stop();
        }
        self.loader.cancel();
        self.signals.clear();
    }

    fn play(&mut self) -> jukebox_playback::Result<()> {
        match &self.loaded {
            Some(loaded) => {
                loaded.sink.play();
                Ok(())
            }
            None if self.loader.is_loading() => Err(PlaybackError::ChannelTransport(
                "track is still loading".to_string(),
            )),
            None => Err(PlaybackError::ChannelTransport(
                "no track loaded".to_string(),
            )),
        }
    }

    fn pause(&mut self) {
        if let Some(loaded) = &self.loaded {
            loaded.sink.pause();
        }
    }

    fn is_paused(&self) -> bool {
        self.loaded
            .as_ref()
            .map_or(true, |loaded| loaded.sink.is_paused())
    }

    fn position(&self) -> Duration {
        self.loaded
            .as_ref()
            .map_or(Duration::ZERO, |loaded| loaded.sink.get_pos())
    }

    fn duration(&self) -> Option<Duration> {
        self.loaded.as_ref().and_then(|loaded| loaded.duration)
    }

    fn set_position(&mut self, position: Duration) -> jukebox_playback::Result<()> {
        let loaded = self
            .loaded
            .as_mut()
            .ok_or_else(|| PlaybackError::Seek("no track loaded".to_string()))?;

        loaded
            .sink
            .try_seek(position)
            .map_err(|e| PlaybackError::Seek(e.to_string()))?;
        loaded.ended = false;
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        if let Some(loaded) = &self.loaded {
            loaded.sink.set_volume(self.volume);
        }
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn poll_signal(&mut self) -> Option<ChannelSignal> {
        self.check_loaded();
        self.check_ended();
        self.signals.pop_front()
    }
}
