/// placeholder drum waveforms.
/// nothing here tries to sound good, it just has to be deterministic and non-silent.
use std::f64::consts::TAU;

const FULL_SCALE: f64 = 32767.0;
const KICK_FREQ: f64 = 60.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrumVoice {
	Kick,
	Snare,
	HiHat,
}

impl DrumVoice {
	pub const ALL: [DrumVoice; 3] = [DrumVoice::Kick, DrumVoice::Snare, DrumVoice::HiHat];

	/// sample name written to the soundfont
	pub fn name(self) -> &'static str {
		match self {
			DrumVoice::Kick => "Kick",
			DrumVoice::Snare => "Snare",
			DrumVoice::HiHat => "HiHat",
		}
	}

	/// General MIDI percussion key
	pub fn midi_note(self) -> u8 {
		match self {
			DrumVoice::Kick => 36,
			DrumVoice::Snare => 38,
			DrumVoice::HiHat => 42, // closed hi-hat
		}
	}

	/// in seconds
	pub fn default_duration(self) -> f64 {
		match self {
			DrumVoice::Kick => 0.5,
			DrumVoice::Snare => 0.3,
			DrumVoice::HiHat => 0.1,
		}
	}

	/// render `duration` seconds of this voice at `sample_rate`.
	pub fn render(self, duration: f64, sample_rate: u32) -> Vec<i16> {
		let n = (duration.max(0.0) * sample_rate as f64).round() as usize;
		let rate = sample_rate as f64;
		(0..n)
			.map(|i| {
				// 1 at the start, 0 at the end
				let remaining = 1.0 - i as f64 / n as f64;
				let value = match self {
					DrumVoice::Kick => {
						let t = i as f64 / rate;
						f64::sin(TAU * KICK_FREQ * t) * remaining.powi(2) * 0.8
					}
					DrumVoice::Snare => {
						let sign = if (i % 3) % 2 == 0 { 1.0 } else { -1.0 };
						remaining.powf(1.5) * 0.5 * sign
					}
					DrumVoice::HiHat => {
						let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
						remaining.powi(3) * 0.3 * sign
					}
				};
				// `as` saturates
				(value * FULL_SCALE) as i16
			})
			.collect()
	}

	pub fn render_default(self, sample_rate: u32) -> Vec<i16> {
		self.render(self.default_duration(), sample_rate)
	}
}
