/// SOUNDFONT DOCUMENT MODEL.
/*
SOUNDFONT TERMINOLOGY:
 a PRESET is what a player selects, e.g. "Roland TR-909".
 an INSTRUMENT is an internal group of samples which presets refer to.
 a ZONE is an interval of keys that maps onto one sample.
	 a preset zone refers to an instrument
	 an instrument zone refers to a sample
 a SAMPLE is a block of mono 16-bit audio plus how it should be played.

here every preset has exactly one zone, and every instrument zone is
exactly (key range, sample). modulators are never written.
*/

/// generator operator ids (soundfont § 8.1.2).
/// only the ones this crate writes or reads back.
pub mod generator {
	pub const INSTRUMENT: u16 = 41;
	pub const KEY_RANGE: u16 = 43;
	pub const VEL_RANGE: u16 = 44;
	pub const SAMPLE_ID: u16 = 53;
}

/// `sfSampleType` for a mono sample.
pub const MONO_SAMPLE: u16 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Version {
	pub major: u16,
	pub minor: u16,
}

impl Default for Version {
	/// 2.01, the version every sf2 reader understands.
	fn default() -> Self {
		Version { major: 2, minor: 1 }
	}
}

/// The INFO list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Info {
	pub version: Version,
	/// INAM
	pub name: String,
	/// IENG
	pub engineer: String,
	/// ISFT
	pub software: String,
	/// ICMT
	pub comment: String,
	/// isng
	pub sound_engine: Option<String>,
	/// ICRD
	pub creation_date: Option<String>,
	/// ICOP
	pub copyright: Option<String>,
}

impl Info {
	pub fn new(
		name: impl Into<String>,
		engineer: impl Into<String>,
		software: impl Into<String>,
		comment: impl Into<String>,
	) -> Self {
		Info {
			name: name.into(),
			engineer: engineer.into(),
			software: software.into(),
			comment: comment.into(),
			..Default::default()
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Sample {
	/// at most 20 bytes are written; longer names are truncated.
	pub name: String,
	pub data: Vec<i16>,
	pub sample_rate: u32,
	/// loop points are frame indices into `data`. both zero = no loop.
	pub loop_start: u32,
	pub loop_end: u32,
	/// MIDI key at which the sample plays back unpitched.
	pub original_pitch: u8,
	/// in cents
	pub pitch_correction: i8,
	pub sample_link: u16,
	pub sample_type: u16,
}

impl Sample {
	/// an unlooped mono sample.
	pub fn mono(
		name: impl Into<String>,
		data: Vec<i16>,
		sample_rate: u32,
		original_pitch: u8,
	) -> Self {
		Sample {
			name: name.into(),
			data,
			sample_rate,
			loop_start: 0,
			loop_end: 0,
			original_pitch,
			pitch_correction: 0,
			sample_link: 0,
			sample_type: MONO_SAMPLE,
		}
	}

	pub fn frame_count(&self) -> usize {
		self.data.len()
	}

	pub fn has_loop(&self) -> bool {
		self.loop_start != 0 || self.loop_end != 0
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Zone {
	/// inclusive (low, high) MIDI keys
	pub key_range: (u8, u8),
	/// index into the document's samples
	pub sample: usize,
}

impl Zone {
	/// a zone covering a single key.
	pub fn single_key(key: u8, sample: usize) -> Self {
		Zone {
			key_range: (key, key),
			sample,
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Instrument {
	pub name: String,
	pub zones: Vec<Zone>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Preset {
	pub name: String,
	pub preset: u16,
	pub bank: u16,
	/// index into the document's instruments
	pub instrument: usize,
}

/// A whole sf2 file, before encoding.
/// Indices handed out by the `add_*` functions are what zones and presets refer to.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SoundFontDocument {
	info: Info,
	samples: Vec<Sample>,
	instruments: Vec<Instrument>,
	presets: Vec<Preset>,
}

impl SoundFontDocument {
	pub fn new(info: Info) -> Self {
		SoundFontDocument {
			info,
			..Default::default()
		}
	}

	/// one preset → one instrument → one single-key zone per `(sample, key)`.
	/// preset and instrument are both named after `info.name`.
	pub fn drum_kit(info: Info, kit: Vec<(Sample, u8)>) -> Self {
		let name = info.name.clone();
		let mut doc = Self::new(info);
		let mut zones = Vec::with_capacity(kit.len());
		for (sample, key) in kit {
			zones.push(Zone::single_key(key, doc.add_sample(sample)));
		}
		let instrument = doc.add_instrument(Instrument {
			name: name.clone(),
			zones,
		});
		doc.add_preset(Preset {
			name,
			preset: 0,
			bank: 0,
			instrument,
		});
		doc
	}

	pub fn add_sample(&mut self, sample: Sample) -> usize {
		self.samples.push(sample);
		self.samples.len() - 1
	}

	pub fn add_instrument(&mut self, instrument: Instrument) -> usize {
		self.instruments.push(instrument);
		self.instruments.len() - 1
	}

	pub fn add_preset(&mut self, preset: Preset) -> usize {
		self.presets.push(preset);
		self.presets.len() - 1
	}

	pub fn info(&self) -> &Info {
		&self.info
	}

	pub fn samples(&self) -> &[Sample] {
		&self.samples
	}

	pub fn instruments(&self) -> &[Instrument] {
		&self.instruments
	}

	pub fn presets(&self) -> &[Preset] {
		&self.presets
	}

	/// (first frame, last frame) of each sample in the concatenated sample pool.
	pub fn sample_spans(&self) -> Vec<(u64, u64)> {
		let mut spans = Vec::with_capacity(self.samples.len());
		let mut start = 0u64;
		for sample in self.samples.iter() {
			let frames = sample.frame_count() as u64;
			spans.push((start, (start + frames).saturating_sub(1)));
			start += frames;
		}
		spans
	}
}
