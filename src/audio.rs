//! Tone feedback
//!
//! Three procedurally generated tones, no sound files. Playback is best effort:
//! callers drop any `AudioError`.

/// Oscillator shape for a tone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
}

/// Tone categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Actor left the ground
    Jump,
    /// Shield hat collected
    PowerUp,
    /// Run ended
    GameOver,
}

impl Tone {
    /// Suggested pitch in Hz
    pub fn frequency(&self) -> f32 {
        match self {
            Tone::Jump => 400.0,
            Tone::PowerUp => 800.0,
            Tone::GameOver => 150.0,
        }
    }

    /// Suggested length in seconds
    pub fn duration(&self) -> f32 {
        match self {
            Tone::Jump => 0.1,
            Tone::PowerUp => 0.2,
            Tone::GameOver => 0.5,
        }
    }

    pub fn waveform(&self) -> Waveform {
        match self {
            Tone::Jump => Waveform::Square,
            Tone::PowerUp => Waveform::Sine,
            Tone::GameOver => Waveform::Sawtooth,
        }
    }
}

/// Why a tone didn't play
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioError {
    /// No audio context on this platform
    Unavailable,
    /// Node graph construction failed
    Synthesis(&'static str),
}

impl std::fmt::Display for AudioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AudioError::Unavailable => write!(f, "audio unavailable"),
            AudioError::Synthesis(stage) => write!(f, "tone synthesis failed at {}", stage),
        }
    }
}

impl std::error::Error for AudioError {}

/// Anything that can play a tone
pub trait ToneSink {
    fn play(&mut self, tone: Tone) -> Result<(), AudioError>;
}

/// Discards every tone (native builds, headless runs)
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAudio;

impl ToneSink for SilentAudio {
    fn play(&mut self, tone: Tone) -> Result<(), AudioError> {
        log::trace!("(silent) {:?} {} Hz", tone, tone.frequency());
        Ok(())
    }
}

impl<T: ToneSink + ?Sized> ToneSink for &mut T {
    fn play(&mut self, tone: Tone) -> Result<(), AudioError> {
        (**self).play(tone)
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{AudioError, Tone, ToneSink, Waveform};
    use crate::settings::Settings;

    /// Web Audio tone player
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        settings: Settings,
    }

    impl AudioManager {
        pub fn new(settings: Settings) -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self { ctx, settings }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        pub fn settings_mut(&mut self) -> &mut Settings {
            &mut self.settings
        }

        /// Create an oscillator routed through a gain node
        fn create_osc(
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Result<(OscillatorNode, GainNode), AudioError> {
            let osc = ctx
                .create_oscillator()
                .map_err(|_| AudioError::Synthesis("oscillator"))?;
            let gain = ctx.create_gain().map_err(|_| AudioError::Synthesis("gain"))?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain)
                .map_err(|_| AudioError::Synthesis("connect"))?;
            gain.connect_with_audio_node(&ctx.destination())
                .map_err(|_| AudioError::Synthesis("destination"))?;

            Ok((osc, gain))
        }
    }

    impl ToneSink for AudioManager {
        fn play(&mut self, tone: Tone) -> Result<(), AudioError> {
            let vol = self.settings.effective_volume();
            if vol <= 0.0 {
                return Ok(());
            }
            let ctx = self.ctx.as_ref().ok_or(AudioError::Unavailable)?;

            // Browsers start suspended until a user gesture
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            let osc_type = match tone.waveform() {
                Waveform::Sine => OscillatorType::Sine,
                Waveform::Square => OscillatorType::Square,
                Waveform::Sawtooth => OscillatorType::Sawtooth,
            };
            let (osc, gain) = Self::create_osc(ctx, tone.frequency(), osc_type)?;
            let t = ctx.current_time();
            let end = t + tone.duration() as f64;

            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain().exponential_ramp_to_value_at_time(0.01, end).ok();
            if tone == Tone::GameOver {
                // Falling pitch
                osc.frequency()
                    .exponential_ramp_to_value_at_time(tone.frequency() * 0.5, end)
                    .ok();
            }

            osc.start().map_err(|_| AudioError::Synthesis("start"))?;
            osc.stop_with_when(end).map_err(|_| AudioError::Synthesis("stop"))?;
            Ok(())
        }
    }
}
