use macroquad::audio::{load_sound_from_bytes, play_sound, PlaySoundParams, Sound};

use crate::config::Tuning;
use crate::proximity::DetectionEvent;

const SAMPLE_RATE: u32 = 44100;
const TONE_ATTACK: f32 = 0.005;
const TONE_RELEASE: f32 = 0.08;
const TONE_PEAK: f32 = 0.9;

/// Anything that can turn a pitch/gain request into sound.
pub trait ToneSink {
    /// False until the backend has finished its setup.
    fn is_ready(&self) -> bool;
    /// Fire and forget; overlapping requests must not block.
    fn play_tone(&mut self, pitch: f32, gain: f32, duration: f32);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AudioStatus {
    /// Waiting for the start gesture / backend setup.
    Pending,
    Ready,
    /// Disabled at startup; stays silent for the whole session.
    Unavailable,
    /// Setup was attempted and failed; stays silent.
    Failed,
}

impl AudioStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Ready => "on",
            Self::Unavailable => "unavailable",
            Self::Failed => "failed",
        }
    }
}

/// Maps detection events to tone requests and throttles them.
pub struct AudioBridge {
    sink: Option<Box<dyn ToneSink>>,
    pub status: AudioStatus,
    /// Master volume in [0, 1], driven by the UI slider.
    pub volume: f32,
    last_sound_at: Option<f64>,
    pub dispatched: u64,
    pub throttled: u64,
}

impl AudioBridge {
    pub fn new(volume: f32) -> Self {
        Self {
            sink: None,
            status: AudioStatus::Pending,
            volume: volume.clamp(0.0, 1.0),
            last_sound_at: None,
            dispatched: 0,
            throttled: 0,
        }
    }

    pub fn attach(&mut self, sink: Box<dyn ToneSink>) {
        self.sink = Some(sink);
        self.status = AudioStatus::Ready;
    }

    pub fn mark_unavailable(&mut self) {
        self.sink = None;
        self.status = AudioStatus::Unavailable;
    }

    pub fn mark_failed(&mut self) {
        self.sink = None;
        self.status = AudioStatus::Failed;
    }

    pub fn is_ready(&self) -> bool {
        self.sink.as_ref().is_some_and(|s| s.is_ready())
    }

    /// Try to sound one detection. Returns whether a tone was dispatched.
    pub fn request(&mut self, event: &DetectionEvent, now: f64, tuning: &Tuning) -> bool {
        let volume = self.volume;
        let Some(sink) = self.sink.as_mut().filter(|s| s.is_ready()) else {
            return false;
        };

        if let Some(last) = self.last_sound_at {
            if now - last < tuning.min_time_between_sounds {
                self.throttled += 1;
                return false;
            }
        }

        let pitch = frequency_for(event.value, tuning);
        let gain = gain_for(event.distance, tuning, volume);
        sink.play_tone(pitch, gain, tuning.tone_duration);
        self.last_sound_at = Some(now);
        self.dispatched += 1;
        true
    }

    /// Sound a tick's worth of detections; the throttle keeps at most one.
    pub fn dispatch(&mut self, events: &[DetectionEvent], now: f64, tuning: &Tuning) -> usize {
        let mut played = 0;
        for event in events {
            if self.request(event, now, tuning) {
                played += 1;
            }
        }
        played
    }
}

/// Linear map of the star value range onto the tone range.
pub fn frequency_for(value: u32, tuning: &Tuning) -> f32 {
    let span = (tuning.value_max - tuning.value_min).max(1) as f32;
    let t = (value.clamp(tuning.value_min, tuning.value_max) - tuning.value_min) as f32 / span;
    tuning.tone_freq_min + t * (tuning.tone_freq_max - tuning.tone_freq_min)
}

/// Louder the closer the star; silent at the detection edge.
pub fn gain_for(distance: f32, tuning: &Tuning, volume: f32) -> f32 {
    let r = tuning.detection_radius;
    let closeness = 1.0 - distance.clamp(0.0, r) / r;
    tuning.tone_gain * volume.clamp(0.0, 1.0) * closeness
}

/// Render a mono 16-bit PCM WAV of a sine tone with a short attack/release.
pub fn tone_wav(freq: f32, dur_s: f32) -> Vec<u8> {
    let sr = SAMPLE_RATE;
    let total = (dur_s * sr as f32) as usize;
    let attack = ((TONE_ATTACK * sr as f32) as usize).max(1);
    let release = ((TONE_RELEASE * sr as f32) as usize).clamp(1, total.max(1));

    let mut samples = Vec::<i16>::with_capacity(total);
    for i in 0..total {
        let t = i as f32 / sr as f32;
        let sine = (std::f32::consts::TAU * freq * t).sin();
        let envelope = if i < attack {
            i as f32 / attack as f32
        } else if i >= total - release {
            (total - i) as f32 / release as f32
        } else {
            1.0
        };
        let s = (sine * TONE_PEAK * envelope).clamp(-1.0, 1.0);
        samples.push((s * i16::MAX as f32) as i16);
    }

    let num_channels = 1u16;
    let bits_per_sample = 16u16;
    let byte_rate = sr * num_channels as u32 * bits_per_sample as u32 / 8;
    let block_align = num_channels * bits_per_sample / 8;
    let data_len = (samples.len() * 2) as u32;

    let mut out = Vec::<u8>::with_capacity(44 + data_len as usize);
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM
    out.extend_from_slice(&num_channels.to_le_bytes());
    out.extend_from_slice(&sr.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&block_align.to_le_bytes());
    out.extend_from_slice(&bits_per_sample.to_le_bytes());
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    for s in samples {
        out.extend_from_slice(&s.to_le_bytes());
    }
    out
}

/// Pre-rendered tone per star value, played through macroquad's mixer.
pub struct ToneBank {
    tones: Vec<(f32, Sound)>,
}

impl ToneBank {
    /// Render and upload every pitch the bridge can ask for.
    pub async fn load(tuning: &Tuning) -> Result<Self, String> {
        let mut tones = Vec::new();
        for value in tuning.value_min..=tuning.value_max {
            let freq = frequency_for(value, tuning);
            let bytes = tone_wav(freq, tuning.tone_duration);
            let sound = load_sound_from_bytes(&bytes)
                .await
                .map_err(|e| format!("Tone load error ({freq:.1} Hz): {e:?}"))?;
            tones.push((freq, sound));
        }
        if tones.is_empty() {
            return Err("Tone bank is empty".to_string());
        }
        Ok(Self { tones })
    }

    fn nearest(&self, pitch: f32) -> Option<&Sound> {
        self.tones
            .iter()
            .min_by(|a, b| (a.0 - pitch).abs().total_cmp(&(b.0 - pitch).abs()))
            .map(|(_, s)| s)
    }
}

impl ToneSink for ToneBank {
    fn is_ready(&self) -> bool {
        !self.tones.is_empty()
    }

    // Duration is fixed when the bank is rendered.
    fn play_tone(&mut self, pitch: f32, gain: f32, _duration: f32) {
        if let Some(sound) = self.nearest(pitch) {
            play_sound(
                sound,
                PlaySoundParams {
                    looped: false,
                    volume: gain.clamp(0.0, 1.0),
                },
            );
        }
    }
}
