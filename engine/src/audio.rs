use std::f32::consts::TAU;
use std::time::Duration;

pub const DEFAULT_SAMPLE_RATE: u32 = 48_000;

/// A fixed-pitch, fixed-length note played at constant gain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneSpec {
    pub frequency_hz: f32,
    pub duration: Duration,
    pub gain: f32,
}

impl ToneSpec {
    pub fn sine(frequency_hz: f32, duration: Duration, gain: f32) -> Self {
        Self {
            frequency_hz: frequency_hz.max(0.0),
            duration,
            gain: gain.clamp(0.0, 1.0),
        }
    }
}

/// Mono sine generator for one `ToneSpec`; ends after the tone's duration.
#[derive(Debug, Clone)]
pub struct Oscillator {
    spec: ToneSpec,
    sample_rate: u32,
    phase: f32,
    emitted: u64,
    total: u64,
}

impl Oscillator {
    pub fn new(spec: ToneSpec, sample_rate: u32) -> Self {
        let sample_rate = sample_rate.max(1);
        let total = (spec.duration.as_secs_f64() * sample_rate as f64).round() as u64;
        Self {
            spec,
            sample_rate,
            phase: 0.0,
            emitted: 0,
            total,
        }
    }

    pub fn spec(&self) -> ToneSpec {
        self.spec
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn remaining_samples(&self) -> u64 {
        self.total - self.emitted
    }
}

impl Iterator for Oscillator {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.emitted >= self.total {
            return None;
        }
        let sample = self.phase.sin() * self.spec.gain;
        self.phase = (self.phase + TAU * self.spec.frequency_hz / self.sample_rate as f32) % TAU;
        self.emitted += 1;
        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.remaining_samples() as usize;
        (left, Some(left))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oscillator_emits_exactly_duration_worth_of_samples() {
        let spec = ToneSpec::sine(440.0, Duration::from_millis(500), 0.5);
        let osc = Oscillator::new(spec, 48_000);
        assert_eq!(osc.remaining_samples(), 24_000);
        assert_eq!(osc.count(), 24_000);
    }

    #[test]
    fn sine_peak_never_exceeds_gain() {
        let spec = ToneSpec::sine(261.6, Duration::from_millis(50), 0.5);
        let peak = Oscillator::new(spec, 48_000).fold(0.0f32, |m, s| m.max(s.abs()));
        assert!(peak <= 0.5 + 1e-6, "peak {peak}");
        assert!(peak > 0.49, "peak {peak}");
    }

    #[test]
    fn sine_completes_expected_cycles() {
        // 100 Hz for 100 ms => 10 full cycles => 20 sign changes (give or take an edge).
        let spec = ToneSpec::sine(100.0, Duration::from_millis(100), 1.0);
        let samples: Vec<f32> = Oscillator::new(spec, 8_000).collect();
        let crossings = samples
            .windows(2)
            .filter(|w| (w[0] >= 0.0) != (w[1] >= 0.0))
            .count();
        assert!((19..=21).contains(&crossings), "crossings {crossings}");
    }
}
