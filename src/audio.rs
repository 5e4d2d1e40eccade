use std::cell::RefCell;
use std::io::{self, Write};

/// Named feedback sounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Clip {
    Correct,
    Wrong,
    Timeout,
    Reset,
}

/// Fire-and-forget playback of a feedback clip.
///
/// Implementations must not block and must not report failures back to the
/// caller; a clip that cannot be played is simply dropped.
pub trait SoundPlayer {
    fn play(&self, clip: Clip);
}

/// Plays nothing. Used for `--mute`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentPlayer;

impl SoundPlayer for SilentPlayer {
    fn play(&self, _clip: Clip) {}
}

/// Rings the terminal bell for every clip
#[derive(Debug)]
pub struct BellPlayer<W: Write = io::Stdout> {
    out: RefCell<W>,
}

impl BellPlayer {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for BellPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> BellPlayer<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out: RefCell::new(out),
        }
    }
}

impl<W: Write> SoundPlayer for BellPlayer<W> {
    fn play(&self, clip: Clip) {
        let mut out = self.out.borrow_mut();
        if let Err(e) = out.write_all(b"\x07").and_then(|_| out.flush()) {
            tracing::debug!(%clip, error = %e, "terminal bell failed");
        }
    }
}

/// Keeps every played clip in order, for headless runs and tests
#[derive(Debug, Default)]
pub struct RecordingPlayer {
    played: RefCell<Vec<Clip>>,
}

impl RecordingPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played(&self) -> Vec<Clip> {
        self.played.borrow().clone()
    }

    pub fn last(&self) -> Option<Clip> {
        self.played.borrow().last().copied()
    }
}

impl SoundPlayer for RecordingPlayer {
    fn play(&self, clip: Clip) {
        self.played.borrow_mut().push(clip);
    }
}

#[cfg(feature = "audio")]
pub use tones::RodioPlayer;

#[cfg(feature = "audio")]
mod tones {
    use super::{Clip, SoundPlayer};
    use rodio::{source::SineWave, OutputStream, OutputStreamHandle, Sink, Source};
    use std::time::Duration;

    /// Synthesized tones on the default output device
    pub struct RodioPlayer {
        _stream: OutputStream,
        handle: OutputStreamHandle,
    }

    impl RodioPlayer {
        pub fn new() -> Result<Self, rodio::StreamError> {
            let (stream, handle) = OutputStream::try_default()?;
            Ok(Self {
                _stream: stream,
                handle,
            })
        }
    }

    // (frequency in Hz, length in ms)
    fn notes(clip: Clip) -> &'static [(f32, u64)] {
        match clip {
            Clip::Correct => &[(523.0, 110), (659.0, 110), (784.0, 220)],
            Clip::Wrong => &[(196.0, 160)],
            Clip::Timeout => &[(392.0, 140), (311.0, 140), (262.0, 320)],
            Clip::Reset => &[(440.0, 70), (660.0, 70)],
        }
    }

    impl SoundPlayer for RodioPlayer {
        fn play(&self, clip: Clip) {
            match Sink::try_new(&self.handle) {
                Ok(sink) => {
                    for &(freq, ms) in notes(clip) {
                        sink.append(
                            SineWave::new(freq)
                                .take_duration(Duration::from_millis(ms))
                                .amplify(0.15),
                        );
                    }
                    sink.detach();
                }
                Err(e) => tracing::debug!(%clip, error = %e, "audio sink unavailable"),
            }
        }
    }
}
