//! Audio cues played off the UI thread.
//!
//! The UI hands a [`Cue`] to [`CuePlayer::play`], which never blocks. A
//! dedicated worker thread owns the output device and plays cues in order.

use std::io::Write;
use std::thread::JoinHandle;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::{debug, info, instrument, warn};

/// A short sound tied to a game event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum Cue {
    /// A mark was placed.
    Move,
    /// A player completed a line.
    Win,
    /// The board filled with no line.
    Draw,
    /// The board was cleared.
    Reset,
}

impl Cue {
    /// Tone frequency in hertz and length in milliseconds.
    pub fn tone(self) -> (f32, u64) {
        match self {
            Cue::Move => (660.0, 70),
            Cue::Win => (880.0, 320),
            Cue::Draw => (330.0, 320),
            Cue::Reset => (520.0, 120),
        }
    }
}

/// Where cues are sent.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum AudioBackend {
    /// Terminal bell on game end.
    #[default]
    Bell,
    /// Synthesized sine tones on the default output device.
    Tone,
    /// No sound at all.
    Silent,
}

impl AudioBackend {
    /// Returns the display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Bell => "bell",
            Self::Tone => "tone",
            Self::Silent => "silent",
        }
    }
}

/// Something that can render a cue. Lives on the worker thread.
pub trait CueSink {
    /// Plays `cue`, returning once it has been handed to the device.
    fn play(&mut self, cue: Cue);
}

/// Rings the terminal bell for game endings; moves and resets stay quiet.
#[derive(Debug, Default)]
pub struct BellSink;

impl CueSink for BellSink {
    fn play(&mut self, cue: Cue) {
        if !matches!(cue, Cue::Win | Cue::Draw) {
            return;
        }
        let mut stdout = std::io::stdout();
        if let Err(e) = crossterm::execute!(stdout, crossterm::style::Print('\x07')) {
            debug!(error = %e, "Bell write failed");
        }
        let _ = stdout.flush();
    }
}

/// Sine-wave cues through rodio.
#[cfg(feature = "audio")]
pub struct ToneSink {
    _stream: rodio::OutputStream,
    handle: rodio::OutputStreamHandle,
}

#[cfg(feature = "audio")]
impl std::fmt::Debug for ToneSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToneSink").finish_non_exhaustive()
    }
}

#[cfg(feature = "audio")]
impl ToneSink {
    /// Opens the default output device.
    pub fn open() -> Option<Self> {
        match rodio::OutputStream::try_default() {
            Ok((stream, handle)) => Some(Self {
                _stream: stream,
                handle,
            }),
            Err(e) => {
                warn!(error = %e, "No audio output device");
                None
            }
        }
    }
}

#[cfg(feature = "audio")]
impl CueSink for ToneSink {
    fn play(&mut self, cue: Cue) {
        use rodio::Source;

        let (freq, millis) = cue.tone();
        match rodio::Sink::try_new(&self.handle) {
            Ok(sink) => {
                let source = rodio::source::SineWave::new(freq)
                    .take_duration(std::time::Duration::from_millis(millis))
                    .amplify(0.20);
                sink.append(source);
                sink.detach();
            }
            Err(e) => warn!(error = %e, "Failed to create audio sink"),
        }
    }
}

/// Builds the sink for `backend` on the calling thread.
fn open_sink(backend: AudioBackend) -> Option<Box<dyn CueSink>> {
    match backend {
        AudioBackend::Silent => None,
        AudioBackend::Bell => Some(Box::new(BellSink)),
        #[cfg(feature = "audio")]
        AudioBackend::Tone => {
            let sink: Box<dyn CueSink> = match ToneSink::open() {
                Some(tone) => Box::new(tone),
                None => Box::new(BellSink),
            };
            Some(sink)
        }
        #[cfg(not(feature = "audio"))]
        AudioBackend::Tone => {
            warn!("Built without the audio feature, using the terminal bell");
            Some(Box::new(BellSink))
        }
    }
}

/// Handle to the cue worker.
///
/// Dropping the handle closes the channel; the worker drains what is queued
/// and exits.
#[derive(Debug)]
pub struct CuePlayer {
    tx: Option<UnboundedSender<Cue>>,
    worker: Option<JoinHandle<()>>,
}

impl CuePlayer {
    /// Starts a worker for `backend`.
    #[instrument]
    pub fn spawn(backend: AudioBackend) -> Self {
        info!(backend = backend.label(), "Starting cue player");
        Self::with_sink(move || open_sink(backend))
    }

    /// Starts a worker whose sink is built by `make_sink` on the worker thread.
    ///
    /// Audio devices are often not `Send`, so the sink is created where it is
    /// used. A `None` sink discards every cue.
    pub fn with_sink<F>(make_sink: F) -> Self
    where
        F: FnOnce() -> Option<Box<dyn CueSink>> + Send + 'static,
    {
        let (tx, rx) = unbounded_channel();
        let worker = std::thread::Builder::new()
            .name("starmoon-audio".to_string())
            .spawn(move || run_worker(make_sink(), rx));

        match worker {
            Ok(handle) => Self {
                tx: Some(tx),
                worker: Some(handle),
            },
            Err(e) => {
                warn!(error = %e, "Failed to start audio worker, cues disabled");
                Self::silent()
            }
        }
    }

    /// A player that discards every cue without a worker.
    pub fn silent() -> Self {
        Self {
            tx: None,
            worker: None,
        }
    }

    /// Queues `cue`. Never blocks; failures are logged and dropped.
    #[instrument(skip(self))]
    pub fn play(&self, cue: Cue) {
        if let Some(tx) = &self.tx
            && tx.send(cue).is_err()
        {
            debug!(?cue, "Audio worker gone, cue dropped");
        }
    }

    /// Closes the queue and waits for the worker to finish what is queued.
    #[instrument(skip(self))]
    pub fn shutdown(mut self) {
        self.close();
    }

    fn close(&mut self) {
        self.tx.take();
        if let Some(worker) = self.worker.take()
            && worker.join().is_err()
        {
            warn!("Audio worker panicked");
        }
    }
}

impl Drop for CuePlayer {
    fn drop(&mut self) {
        self.close();
    }
}

fn run_worker(mut sink: Option<Box<dyn CueSink>>, mut rx: UnboundedReceiver<Cue>) {
    debug!(active = sink.is_some(), "Audio worker running");
    while let Some(cue) = rx.blocking_recv() {
        if let Some(sink) = sink.as_mut() {
            sink.play(cue);
        }
    }
    debug!("Audio worker stopped");
}
