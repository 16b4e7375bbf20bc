use std::cell::OnceCell;
use std::time::Duration;

use engine::audio::{DEFAULT_SAMPLE_RATE, Oscillator, ToneSpec};
use rodio::{OutputStream, OutputStreamHandle, Sink};
use tracing::{debug, warn};

use crate::color::TileColor;
use crate::error::Result;

/// Gain stage applied to every tone before the user's volume settings.
pub const TONE_GAIN: f32 = 0.5;
pub const TONE_DURATION: Duration = Duration::from_millis(500);

/// Anything that can sound a tile's tone.
pub trait TonePlayer {
    fn play_tone(&mut self, color: TileColor);
}

pub fn tone_spec(color: TileColor) -> ToneSpec {
    ToneSpec::sine(color.frequency_hz(), TONE_DURATION, TONE_GAIN)
}

/// A single tone as a rodio source.
pub struct ToneSource {
    osc: Oscillator,
}

impl ToneSource {
    pub fn new(spec: ToneSpec, sample_rate: u32) -> Self {
        Self {
            osc: Oscillator::new(spec, sample_rate),
        }
    }
}

impl Iterator for ToneSource {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        self.osc.next()
    }
}

impl rodio::Source for ToneSource {
    fn current_frame_len(&self) -> Option<usize> {
        Some(self.osc.remaining_samples() as usize)
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        self.osc.sample_rate()
    }

    fn total_duration(&self) -> Option<Duration> {
        Some(self.osc.spec().duration)
    }
}

struct Output {
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

impl Output {
    fn open() -> Result<Self> {
        let (stream, handle) = OutputStream::try_default()?;
        Ok(Self {
            _stream: stream,
            handle,
        })
    }
}

/// Tone playback over the default output device.
///
/// The device is opened on the first tone request and reused for the rest of
/// the session. If it cannot be opened, every request is a silent no-op.
pub struct ToneEngine {
    volume: f32,
    output: OnceCell<Option<Output>>,
}

impl ToneEngine {
    pub fn new(volume: f32) -> Self {
        Self {
            volume: volume.clamp(0.0, 1.0),
            output: OnceCell::new(),
        }
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    fn output(&self) -> Option<&Output> {
        self.output
            .get_or_init(|| match Output::open() {
                Ok(output) => {
                    debug!("audio output opened");
                    Some(output)
                }
                Err(err) => {
                    warn!(%err, "tones disabled");
                    None
                }
            })
            .as_ref()
    }
}

impl TonePlayer for ToneEngine {
    fn play_tone(&mut self, color: TileColor) {
        if self.volume <= 0.0 {
            return;
        }
        let Some(output) = self.output() else {
            return;
        };
        let sink = match Sink::try_new(&output.handle) {
            Ok(sink) => sink,
            Err(err) => {
                warn!(%err, %color, "could not start tone");
                return;
            }
        };
        sink.set_volume(self.volume);
        sink.append(ToneSource::new(tone_spec(color), DEFAULT_SAMPLE_RATE));
        sink.detach();
    }
}
