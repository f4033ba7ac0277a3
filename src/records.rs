//! Fixed-width pdta records.
//!
//! Every record type knows its on-disk width and how to append itself little-endian.
//! Each sub-chunk list ends with a terminal record built by `terminal()`.

use crate::soundfont::generator;

/// width of every name field in phdr, inst and shdr.
pub const NAME_LEN: usize = 20;

pub trait Record {
	const SIZE: usize;
	fn encode(&self, out: &mut Vec<u8>);
}

/// concatenate records into a sub-chunk payload.
pub fn encode_all<R: Record>(records: &[R]) -> Vec<u8> {
	let mut out = Vec::with_capacity(records.len() * R::SIZE);
	for record in records {
		let before = out.len();
		record.encode(&mut out);
		debug_assert_eq!(out.len() - before, R::SIZE);
	}
	out
}

/// zero-padded, truncated to `NAME_LEN` bytes.
pub fn fixed_name(name: &str) -> [u8; NAME_LEN] {
	let mut field = [0; NAME_LEN];
	let bytes = name.as_bytes();
	let len = bytes.len().min(NAME_LEN);
	field[..len].copy_from_slice(&bytes[..len]);
	field
}

fn put_u16(out: &mut Vec<u8>, n: u16) {
	out.extend_from_slice(&n.to_le_bytes());
}

fn put_u32(out: &mut Vec<u8>, n: u32) {
	out.extend_from_slice(&n.to_le_bytes());
}

/// sfPresetHeader
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PresetHeader {
	pub name: [u8; NAME_LEN],
	pub preset: u16,
	pub bank: u16,
	pub bag_index: u16,
	pub library: u32,
	pub genre: u32,
	pub morphology: u32,
}

impl PresetHeader {
	pub fn terminal(bag_index: u16) -> Self {
		PresetHeader {
			name: fixed_name("EOP"),
			preset: 0,
			bank: 0,
			bag_index,
			library: 0,
			genre: 0,
			morphology: 0,
		}
	}
}

impl Record for PresetHeader {
	const SIZE: usize = 38;
	fn encode(&self, out: &mut Vec<u8>) {
		out.extend_from_slice(&self.name);
		put_u16(out, self.preset);
		put_u16(out, self.bank);
		put_u16(out, self.bag_index);
		put_u32(out, self.library);
		put_u32(out, self.genre);
		put_u32(out, self.morphology);
	}
}

/// sfPresetBag / sfInstBag
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bag {
	pub gen_index: u16,
	pub mod_index: u16,
}

impl Bag {
	pub fn terminal(gen_index: u16, mod_index: u16) -> Self {
		Bag {
			gen_index,
			mod_index,
		}
	}
}

impl Record for Bag {
	const SIZE: usize = 4;
	fn encode(&self, out: &mut Vec<u8>) {
		put_u16(out, self.gen_index);
		put_u16(out, self.mod_index);
	}
}

/// sfModList / sfInstModList. only ever written as the all-zero terminal record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modulator {
	pub src_oper: u16,
	pub dest_oper: u16,
	pub amount: i16,
	pub amt_src_oper: u16,
	pub trans_oper: u16,
}

impl Modulator {
	pub fn terminal() -> Self {
		Modulator::default()
	}
}

impl Record for Modulator {
	const SIZE: usize = 10;
	fn encode(&self, out: &mut Vec<u8>) {
		put_u16(out, self.src_oper);
		put_u16(out, self.dest_oper);
		out.extend_from_slice(&self.amount.to_le_bytes());
		put_u16(out, self.amt_src_oper);
		put_u16(out, self.trans_oper);
	}
}

/// sfGenList / sfInstGenList. `amount` is the raw genAmountType union.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Generator {
	pub oper: u16,
	pub amount: u16,
}

impl Generator {
	/// LS byte = lowest key, MS byte = highest key.
	pub fn key_range(low: u8, high: u8) -> Self {
		Generator {
			oper: generator::KEY_RANGE,
			amount: u16::from_le_bytes([low, high]),
		}
	}

	pub fn sample_id(sample: u16) -> Self {
		Generator {
			oper: generator::SAMPLE_ID,
			amount: sample,
		}
	}

	pub fn instrument(instrument: u16) -> Self {
		Generator {
			oper: generator::INSTRUMENT,
			amount: instrument,
		}
	}

	pub fn terminal() -> Self {
		Generator::default()
	}
}

impl Record for Generator {
	const SIZE: usize = 4;
	fn encode(&self, out: &mut Vec<u8>) {
		put_u16(out, self.oper);
		put_u16(out, self.amount);
	}
}

/// sfInst
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstrumentHeader {
	pub name: [u8; NAME_LEN],
	pub bag_index: u16,
}

impl InstrumentHeader {
	pub fn terminal(bag_index: u16) -> Self {
		InstrumentHeader {
			name: fixed_name("EOI"),
			bag_index,
		}
	}
}

impl Record for InstrumentHeader {
	const SIZE: usize = 22;
	fn encode(&self, out: &mut Vec<u8>) {
		out.extend_from_slice(&self.name);
		put_u16(out, self.bag_index);
	}
}

/// sfSample
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SampleHeader {
	pub name: [u8; NAME_LEN],
	pub start: u32,
	pub end: u32,
	pub start_loop: u32,
	pub end_loop: u32,
	pub sample_rate: u32,
	pub original_pitch: u8,
	pub pitch_correction: i8,
	pub sample_link: u16,
	pub sample_type: u16,
}

impl SampleHeader {
	pub fn terminal() -> Self {
		SampleHeader {
			name: fixed_name("EOS"),
			start: 0,
			end: 0,
			start_loop: 0,
			end_loop: 0,
			sample_rate: 0,
			original_pitch: 0,
			pitch_correction: 0,
			sample_link: 0,
			sample_type: 0,
		}
	}
}

impl Record for SampleHeader {
	const SIZE: usize = 46;
	fn encode(&self, out: &mut Vec<u8>) {
		out.extend_from_slice(&self.name);
		put_u32(out, self.start);
		put_u32(out, self.end);
		put_u32(out, self.start_loop);
		put_u32(out, self.end_loop);
		put_u32(out, self.sample_rate);
		out.push(self.original_pitch);
		out.extend_from_slice(&self.pitch_correction.to_le_bytes());
		put_u16(out, self.sample_link);
		put_u16(out, self.sample_type);
	}
}
