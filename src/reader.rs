/// SOUNDFONT PARSER.
/// reads back .sf2 files, trusting declared chunk sizes to skip around.
/// used to check what the writer produced, so it is strict about the things
/// the writer promises: matching sizes, record widths, terminal records, valid references.
/*
 presets have zones which point at instruments,
 instruments have zones which point at samples.
 a zone without a reference is a "global" zone: a template for the other zones
 of the same preset/instrument.
*/
use crate::error::OpenError;
use crate::riff::{self, FourCC};
use crate::soundfont::generator;
use std::fs::File;
use std::io::{Cursor, Read, Seek, SeekFrom};
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoneReference {
	None,
	SampleID(u16),   // for instrument zones
	Instrument(u16), // for preset zones
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Zone {
	pub key_range: (u8, u8),
	pub vel_range: (u8, u8),
	pub reference: ZoneReference,
}

// Instrument and Preset implement this (and nothing else does)
trait SFObject {
	fn add_zone(&mut self, zone: Zone);
}

#[derive(Debug, Default)]
pub struct Instrument {
	pub name: String,
	pub zones: Vec<Zone>,
}

impl SFObject for Instrument {
	fn add_zone(&mut self, zone: Zone) {
		self.zones.push(zone);
	}
}

#[derive(Debug, Default)]
pub struct Preset {
	pub name: String,
	pub preset: u16,
	pub bank: u16,
	pub zones: Vec<Zone>,
}

impl SFObject for Preset {
	fn add_zone(&mut self, zone: Zone) {
		self.zones.push(zone);
	}
}

#[derive(Debug, PartialEq, Eq)]
pub struct Sample {
	pub name: String,
	/// first frame in the sample pool
	pub start: u32,
	/// last frame in the sample pool
	pub end: u32,
	/// loop points relative to `start`. both zero = no loop.
	pub startloop: u32,
	pub endloop: u32,
	pub sample_rate: u32,
	pub root_key: u8,
	pub pitch_correction: i8,
	pub sample_type: u16,
}

impl Sample {
	pub fn frame_count(&self) -> usize {
		(self.end - self.start) as usize + 1
	}
}

/// INFO list contents.
#[derive(Debug, Default)]
pub struct InfoStrings {
	pub version: (u16, u16),
	pub name: String,
	pub engineer: Option<String>,
	pub software: Option<String>,
	pub comment: Option<String>,
	pub sound_engine: Option<String>,
	pub creation_date: Option<String>,
	pub copyright: Option<String>,
}

/// basic usage:
/// ```no_run
/// let sf = sfgen::reader::SoundFont::open("sf2/roland_tr909.sf2").unwrap();
/// for i in 0..sf.preset_count() {
///     println!("{}: {}", i, sf.preset_name(i).unwrap())
/// }
/// ```
#[derive(Debug)]
pub struct SoundFont {
	pub info: InfoStrings,
	pub presets: Vec<Preset>,
	pub instruments: Vec<Instrument>,
	pub samples: Vec<Sample>,
	/// the whole smpl chunk
	pool: Vec<i16>,
}

fn read_fourcc<R: Read>(f: &mut R) -> Result<FourCC, OpenError> {
	let mut bytes = [0; 4];
	f.read_exact(&mut bytes)?;
	FourCC::new(bytes[0], bytes[1], bytes[2], bytes[3]).ok_or(OpenError::NotASoundFont)
}

fn read_u8<R: Read>(f: &mut R) -> std::io::Result<u8> {
	let mut bytes = [0; 1];
	f.read_exact(&mut bytes)?;
	Ok(bytes[0])
}

fn read_u16<R: Read>(f: &mut R) -> std::io::Result<u16> {
	let mut bytes = [0; 2];
	f.read_exact(&mut bytes)?;
	Ok(u16::from_le_bytes(bytes))
}

fn read_u32<R: Read>(f: &mut R) -> std::io::Result<u32> {
	let mut bytes = [0; 4];
	f.read_exact(&mut bytes)?;
	Ok(u32::from_le_bytes(bytes))
}

fn read_i8<R: Read>(f: &mut R) -> std::io::Result<i8> {
	Ok(read_u8(f)? as i8)
}

fn bad_sound_font(s: &str) -> OpenError {
	OpenError::BadSoundFont(s.to_string())
}

fn read_utf8_fixed_len<R: Read>(file: &mut R, len: usize) -> Result<String, OpenError> {
	let mut name_vec = vec![0; len];
	file.read_exact(&mut name_vec)?;
	// anything after the first NUL is padding
	if let Some(nul) = name_vec.iter().position(|&b| b == 0) {
		name_vec.truncate(nul);
	}
	Ok(String::from_utf8_lossy(&name_vec).to_string())
}

fn check_list_end(name: &str, end: u64, file_len: u64) -> Result<(), OpenError> {
	if end > file_len {
		return Err(OpenError::BadSoundFont(format!(
			"{} list ends at byte {}, past the end of the file ({} bytes)",
			name, end, file_len
		)));
	}
	Ok(())
}

/// end of a chunk with this payload, including the pad byte.
fn chunk_end(offset: u64, size: u32) -> u64 {
	offset + size as u64 + (size as u64 & 1)
}

impl Zone {
	fn new() -> Self {
		Self {
			key_range: (0, 127),
			vel_range: (0, 127),
			reference: ZoneReference::None,
		}
	}

	fn is_global(&self) -> bool {
		// global zones have no instrument or sample ID.
		matches!(self.reference, ZoneReference::None)
	}
}

fn read_gen_zone<R: Read>(file: &mut R, zone: &mut Zone, gen_count: u16) -> Result<(), OpenError> {
	for _gen_ndx in 0..gen_count {
		let gen_type = read_u16(file)?;
		let amount_u16 = read_u16(file)?;
		// "LS byte indicates the lowest and the MS byte the highest valid key."
		// some files out there have it backwards, so sort them.
		let lo = amount_u16 as u8;
		let hi = (amount_u16 >> 8) as u8;
		let amount_range = (u8::min(lo, hi), u8::max(lo, hi));

		match gen_type {
			generator::KEY_RANGE => zone.key_range = amount_range,
			generator::VEL_RANGE => zone.vel_range = amount_range,
			generator::SAMPLE_ID => zone.reference = ZoneReference::SampleID(amount_u16),
			generator::INSTRUMENT => zone.reference = ZoneReference::Instrument(amount_u16),
			_ => {}
		}
	}
	Ok(())
}

struct GenIndex {
	obj: u16,
	gen: u16,
}

// read pbag or ibag.
// bag_indices includes the terminal record's index.
fn read_bag_chunk<R: Read>(
	file: &mut R,
	chunk: &Chunk,
	bag_indices: &[u16],
) -> Result<Vec<GenIndex>, OpenError> {
	let bag_count = bag_indices.last().copied().unwrap_or(0) as u32 + 1;
	if chunk.size != bag_count * 4 {
		return Err(OpenError::BadSoundFont(format!(
			"{} has {} bytes, but the headers need {} bags (with the terminal one)",
			chunk.id, chunk.size, bag_count
		)));
	}
	let mut gen_indices = vec![];
	for obj_ndx in 0..bag_indices.len() - 1 {
		let start_ndx = bag_indices[obj_ndx];
		let end_ndx = bag_indices[obj_ndx + 1];
		if end_ndx < start_ndx {
			return Err(OpenError::BadSoundFont(format!(
				"{} bag indices go backwards ({} then {})",
				chunk.id, start_ndx, end_ndx
			)));
		}
		for _i in start_ndx..end_ndx {
			let gen_ndx = read_u16(file)?;
			let _mod_ndx = read_u16(file)?;
			gen_indices.push(GenIndex {
				obj: obj_ndx as u16,
				gen: gen_ndx,
			});
		}
	}

	{
		// terminal zone
		let obj_ndx = bag_indices.len();
		let gen_ndx = read_u16(file)?;
		let _mod_ndx = read_u16(file)?;
		gen_indices.push(GenIndex {
			obj: obj_ndx as u16,
			gen: gen_ndx,
		});
	}

	Ok(gen_indices)
}

// read pgen or igen chunk
fn read_gen_zones<R: Read, Item: SFObject>(
	file: &mut R,
	chunk: &Chunk,
	items: &mut [Item],
	gen_indices: &[GenIndex],
) -> Result<(), OpenError> {
	let gen_count = gen_indices.last().map(|g| g.gen).unwrap_or(0) as u32 + 1;
	if chunk.size != gen_count * 4 {
		return Err(OpenError::BadSoundFont(format!(
			"{} has {} bytes, but the bags need {} generators (with the terminal one)",
			chunk.id, chunk.size, gen_count
		)));
	}
	let mut prev_inst_ndx = u16::MAX;
	let mut global_zone: Option<Zone> = None;
	for zone_ndx in 0..gen_indices.len() - 1 {
		let inst_ndx = gen_indices[zone_ndx].obj;
		let start_gen = gen_indices[zone_ndx].gen;
		let end_gen = gen_indices[zone_ndx + 1].gen;
		if end_gen < start_gen {
			return Err(OpenError::BadSoundFont(format!(
				"{} generator indices go backwards ({} then {})",
				chunk.id, start_gen, end_gen
			)));
		}
		let mut zone = Zone::new();
		if inst_ndx == prev_inst_ndx {
			if let Some(z) = &global_zone {
				zone = z.clone();
			}
		} else {
			global_zone = None;
		}
		prev_inst_ndx = inst_ndx;

		read_gen_zone(file, &mut zone, end_gen - start_gen)?;

		if zone.is_global() {
			// this is a global zone. everyone should copy it.
			global_zone = Some(zone.clone());
		} else {
			items[inst_ndx as usize].add_zone(zone);
		}
	}
	Ok(())
}

struct Chunk {
	id: FourCC,
	offset: u64,
	size: u32,
}

impl SoundFont {
	/// Read a whole soundfont file into memory.
	pub fn open(path: impl AsRef<Path>) -> Result<Self, OpenError> {
		Self::read(File::open(path)?)
	}

	/// Parse an in-memory soundfont.
	pub fn parse(bytes: &[u8]) -> Result<Self, OpenError> {
		Self::read(Cursor::new(bytes))
	}

	pub fn read<R: Read + Seek>(mut file: R) -> Result<Self, OpenError> {
		let file_len = file.seek(SeekFrom::End(0))?;
		file.seek(SeekFrom::Start(0))?;

		let riff = read_fourcc(&mut file)?;
		if riff != riff::RIFF {
			// definitely not a soundfont
			return Err(OpenError::NotASoundFont);
		}

		let sfbk_size = read_u32(&mut file)?;

		let sfbk = read_fourcc(&mut file)?;
		if sfbk != riff::SFBK {
			// could be a WAV file, for example.
			return Err(OpenError::NotASoundFont);
		}

		// at this point, the file *should* be a soundfont.
		if chunk_end(8, sfbk_size) != file_len {
			return Err(OpenError::BadSoundFont(format!(
				"RIFF chunk says {} bytes, but the file has {} after the header",
				sfbk_size,
				file_len - 8
			)));
		}

		let list = read_fourcc(&mut file)?;
		let info_size = read_u32(&mut file)?;
		let info_end = chunk_end(file.stream_position()?, info_size);
		let info = read_fourcc(&mut file)?;
		if list != riff::LIST || info != riff::INFO {
			return Err(bad_sound_font("no INFO chunk"));
		}
		check_list_end("INFO", info_end, file_len)?;

		let info = read_info(&mut file, info_end)?;
		file.seek(SeekFrom::Start(info_end))?;

		let list = read_fourcc(&mut file)?;
		let sdta_size = read_u32(&mut file)?;
		let sdta_end = chunk_end(file.stream_position()?, sdta_size);
		let sdta = read_fourcc(&mut file)?;

		if list != riff::LIST || sdta != riff::SDTA {
			return Err(bad_sound_font("no sdta chunk"));
		}
		check_list_end("sdta", sdta_end, file_len)?;

		let smpl = read_fourcc(&mut file)?;
		let smpl_size = read_u32(&mut file)?;

		if smpl != riff::SMPL {
			return Err(bad_sound_font("no smpl chunk"));
		}
		if smpl_size % 2 != 0 || chunk_end(file.stream_position()?, smpl_size) > sdta_end {
			return Err(OpenError::BadSoundFont(format!("bad smpl size: {}", smpl_size)));
		}
		let mut data8 = vec![0u8; smpl_size as usize];
		file.read_exact(&mut data8)?;
		let pool: Vec<i16> = data8
			.chunks_exact(2)
			.map(|b| i16::from_le_bytes([b[0], b[1]]))
			.collect();

		file.seek(SeekFrom::Start(sdta_end))?;

		let list = read_fourcc(&mut file)?;
		let pdta_size = read_u32(&mut file)?;
		let pdta_end = chunk_end(file.stream_position()?, pdta_size);
		let pdta = read_fourcc(&mut file)?;
		if list != riff::LIST || pdta != riff::PDTA {
			return Err(bad_sound_font("no pdta chunk"));
		}
		if pdta_end != file_len {
			return Err(bad_sound_font("pdta chunk doesn't end at the end of the file"));
		}

		let mut inst = None;
		let mut ibag = None;
		let mut igen = None;
		let mut imod = None;
		let mut shdr = None;
		let mut phdr = None;
		let mut pbag = None;
		let mut pmod = None;
		let mut pgen = None;

		// read pdta data
		while file.stream_position()? < pdta_end {
			let chunk_type = read_fourcc(&mut file)?;
			let chunk_size = read_u32(&mut file)?;
			let offset = file.stream_position()?;
			let end = chunk_end(offset, chunk_size);
			if end > pdta_end {
				return Err(OpenError::BadSoundFont(format!(
					"{} chunk runs past the end of pdta",
					chunk_type
				)));
			}

			let chunk = Some(Chunk {
				id: chunk_type,
				offset,
				size: chunk_size,
			});

			match chunk_type {
				riff::INST => inst = chunk,
				riff::IBAG => ibag = chunk,
				riff::IGEN => igen = chunk,
				riff::IMOD => imod = chunk,
				riff::SHDR => shdr = chunk,
				riff::PHDR => phdr = chunk,
				riff::PBAG => pbag = chunk,
				riff::PMOD => pmod = chunk,
				riff::PGEN => pgen = chunk,
				_ => {}
			}

			file.seek(SeekFrom::Start(end))?;
		}

		let inst = inst.ok_or_else(|| bad_sound_font("no inst chunk."))?;
		let ibag = ibag.ok_or_else(|| bad_sound_font("no ibag chunk."))?;
		let igen = igen.ok_or_else(|| bad_sound_font("no igen chunk."))?;
		let imod = imod.ok_or_else(|| bad_sound_font("no imod chunk."))?;
		let shdr = shdr.ok_or_else(|| bad_sound_font("no shdr chunk."))?;
		let phdr = phdr.ok_or_else(|| bad_sound_font("no phdr chunk."))?;
		let pbag = pbag.ok_or_else(|| bad_sound_font("no pbag chunk."))?;
		let pmod = pmod.ok_or_else(|| bad_sound_font("no pmod chunk."))?;
		let pgen = pgen.ok_or_else(|| bad_sound_font("no pgen chunk."))?;

		// modulators are never interpreted, but there must be at least the terminal one.
		for chunk in [&pmod, &imod] {
			if chunk.size < 10 || chunk.size % 10 != 0 {
				return Err(OpenError::BadSoundFont(format!(
					"bad {} size ({}) -- should be a non-zero multiple of 10",
					chunk.id, chunk.size
				)));
			}
		}

		let mut instruments: Vec<Instrument> = vec![];
		let mut instrument_bag_indices: Vec<u16> = vec![];

		// --- read inst chunk ---
		{
			file.seek(SeekFrom::Start(inst.offset))?;
			let inst_count = inst.size / 22;
			if inst_count < 1 || inst.size % 22 != 0 {
				return Err(OpenError::BadSoundFont(format!(
					"bad INST chunk size ({} should be a non-zero multiple of 22)",
					inst.size
				)));
			}
			for i in 0..inst_count {
				let name = read_utf8_fixed_len(&mut file, 20)?;
				if i == inst_count - 1 && name != "EOI" {
					return Err(bad_sound_font("no terminal instrument."));
				}

				let bag_ndx = read_u16(&mut file)?;

				instruments.push(Instrument {
					name,
					..Default::default()
				});
				instrument_bag_indices.push(bag_ndx);
			}
		}

		// --- read ibag chunk ---
		file.seek(SeekFrom::Start(ibag.offset))?;
		let instrument_gen_indices = read_bag_chunk(&mut file, &ibag, &instrument_bag_indices)?;

		// --- read igen chunk ---
		file.seek(SeekFrom::Start(igen.offset))?;
		read_gen_zones(&mut file, &igen, &mut instruments, &instrument_gen_indices)?;

		// --- read phdr chunk ---
		let mut presets = vec![];
		let mut preset_bag_indices = vec![];
		file.seek(SeekFrom::Start(phdr.offset))?;
		if phdr.size < 38 || phdr.size % 38 != 0 {
			return Err(OpenError::BadSoundFont(format!(
				"Bad PHDR size: {}",
				phdr.size
			)));
		}
		let preset_count = phdr.size / 38;
		for i in 0..preset_count {
			let name = read_utf8_fixed_len(&mut file, 20)?;
			if i == preset_count - 1 && name != "EOP" {
				return Err(bad_sound_font("no terminal preset."));
			}
			let preset = read_u16(&mut file)?;
			let bank = read_u16(&mut file)?;
			let bag_ndx = read_u16(&mut file)?;
			let _library = read_u32(&mut file)?;
			let _genre = read_u32(&mut file)?;
			let _morphology = read_u32(&mut file)?;
			presets.push(Preset {
				name,
				preset,
				bank,
				..Default::default()
			});
			preset_bag_indices.push(bag_ndx);
		}

		// --- read pbag chunk ---
		file.seek(SeekFrom::Start(pbag.offset))?;
		let preset_gen_indices = read_bag_chunk(&mut file, &pbag, &preset_bag_indices)?;

		// --- read pgen chunk ---
		file.seek(SeekFrom::Start(pgen.offset))?;
		read_gen_zones(&mut file, &pgen, &mut presets, &preset_gen_indices)?;

		// --- read shdr chunk ---
		file.seek(SeekFrom::Start(shdr.offset))?;
		let samples_count = shdr.size / 46;
		if shdr.size % 46 != 0 || samples_count < 1 {
			return Err(OpenError::BadSoundFont(format!(
				"bad SHDR size ({}) -- should be a multiple of 46",
				shdr.size
			)));
		}
		let mut samples = Vec::with_capacity(samples_count as usize);
		for i in 0..samples_count {
			// a sample
			let sample_name = read_utf8_fixed_len(&mut file, 20)?;
			if i == samples_count - 1 {
				if sample_name == "EOS" {
					break;
				} else {
					return Err(bad_sound_font("no terminal sample."));
				}
			}

			let start = read_u32(&mut file)?;
			let end = read_u32(&mut file)?;
			if end < start || end as usize >= pool.len() {
				return Err(OpenError::BadSoundFont(format!(
					"sample {:?} spans frames {}..={}, but the pool has {} frames",
					sample_name,
					start,
					end,
					pool.len()
				)));
			}
			let mut startloop = read_u32(&mut file)?;
			let mut endloop = read_u32(&mut file)?;
			let sample_rate = read_u32(&mut file)?;
			let original_pitch = read_u8(&mut file)?;
			let pitch_correction = read_i8(&mut file)?;
			let _sample_link = read_u16(&mut file)?;
			let sample_type = read_u16(&mut file)?;

			if startloop != 0 || endloop != 0 {
				startloop = startloop.saturating_sub(start);
				endloop = endloop.saturating_sub(start);
			}

			samples.push(Sample {
				name: sample_name,
				start,
				end,
				startloop,
				endloop,
				sample_rate,
				root_key: original_pitch,
				pitch_correction,
				sample_type,
			});
		}

		instruments.pop(); // remove EOI
		presets.pop(); // remove EOP

		// check instrument & sample indices
		for p in presets.iter() {
			for zone in p.zones.iter() {
				if let ZoneReference::Instrument(inst) = zone.reference {
					if inst as usize >= instruments.len() {
						return Err(OpenError::BadSoundFont(format!(
							"preset zone references instrument {}, but there are only {} instruments.",
							inst,
							instruments.len()
						)));
					}
				}
			}
		}
		for i in instruments.iter() {
			for zone in i.zones.iter() {
				if let ZoneReference::SampleID(sample) = zone.reference {
					if sample as usize >= samples.len() {
						return Err(OpenError::BadSoundFont(format!(
							"instrument zone references sample {}, but there are only {} samples.",
							sample,
							samples.len()
						)));
					}
				}
			}
		}

		Ok(SoundFont {
			info,
			instruments,
			samples,
			presets,
			pool,
		})
	}

	/// get the number of presets in this soundfont.
	pub fn preset_count(&self) -> usize {
		self.presets.len()
	}

	/// get the name of the given preset.
	pub fn preset_name(&self, idx: usize) -> Option<&str> {
		self.presets.get(idx).map(|p| p.name.as_str())
	}

	/// PCM frames of the given sample.
	pub fn sample_data(&self, idx: usize) -> Option<&[i16]> {
		let sample = self.samples.get(idx)?;
		self.pool.get(sample.start as usize..=sample.end as usize)
	}

	/// every (key range, sample index) reachable from the given preset.
	pub fn key_map(&self, preset_idx: usize) -> Vec<((u8, u8), u16)> {
		let mut map = vec![];
		if let Some(preset) = self.presets.get(preset_idx) {
			for pzone in preset.zones.iter() {
				if let ZoneReference::Instrument(i) = pzone.reference {
					for izone in self.instruments[i as usize].zones.iter() {
						if let ZoneReference::SampleID(s) = izone.reference {
							map.push((izone.key_range, s));
						}
					}
				}
			}
		}
		map
	}
}

fn read_info<R: Read + Seek>(file: &mut R, info_end: u64) -> Result<InfoStrings, OpenError> {
	let mut info = InfoStrings::default();
	let mut name = None;
	let mut version = None;

	while file.stream_position()? < info_end {
		let chunk_type = read_fourcc(file)?;
		let chunk_size = read_u32(file)?;
		let end = chunk_end(file.stream_position()?, chunk_size);
		if end > info_end {
			return Err(OpenError::BadSoundFont(format!(
				"{} runs past the end of INFO",
				chunk_type
			)));
		}

		if chunk_type == riff::IFIL {
			if chunk_size != 4 {
				return Err(bad_sound_font("bad ifil"));
			}
			version = Some((read_u16(file)?, read_u16(file)?));
		} else if chunk_size > 65536 {
			return Err(OpenError::BadSoundFont(format!("{} is too long", chunk_type)));
		} else {
			let mut data = vec![0; chunk_size as usize];
			file.read_exact(&mut data)?;
			// strip the null terminator
			while data.last() == Some(&0) {
				data.pop();
			}
			let text = String::from_utf8_lossy(&data).to_string();
			match chunk_type {
				riff::INAM => name = Some(text),
				riff::IENG => info.engineer = Some(text),
				riff::ISFT => info.software = Some(text),
				riff::ICMT => info.comment = Some(text),
				riff::ISNG => info.sound_engine = Some(text),
				riff::ICRD => info.creation_date = Some(text),
				riff::ICOP => info.copyright = Some(text),
				_ => {}
			}
		}

		file.seek(SeekFrom::Start(end))?;
	}

	info.version = version.ok_or_else(|| bad_sound_font("no ifil"))?;
	info.name = name.ok_or_else(|| bad_sound_font("no INAM"))?;
	Ok(info)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::soundfont::{Info, Sample as DocSample, SoundFontDocument};
	use crate::writer::build;
	use crate::records::{
		encode_all, fixed_name, Bag, Generator, InstrumentHeader, Modulator, PresetHeader,
		SampleHeader,
	};

	fn kit_bytes() -> Vec<u8> {
		let mut info = Info::new("Test Kit", "eng", "soft", "a comment");
		info.creation_date = Some("2026-10-19".to_string());
		let doc = SoundFontDocument::drum_kit(
			info,
			vec![
				(DocSample::mono("Kick", vec![1, 2, 3], 44100, 36), 36),
				(DocSample::mono("Snare", vec![4, 5], 22050, 38), 38),
			],
		);
		build(&doc).unwrap()
	}

	#[test]
	fn reads_back_what_was_written() {
		let sf = SoundFont::parse(&kit_bytes()).unwrap();
		assert_eq!(sf.info.name, "Test Kit");
		assert_eq!(sf.info.version, (2, 1));
		assert_eq!(sf.info.engineer.as_deref(), Some("eng"));
		assert_eq!(sf.info.comment.as_deref(), Some("a comment"));
		assert_eq!(sf.info.creation_date.as_deref(), Some("2026-10-19"));
		assert_eq!(sf.preset_count(), 1);
		assert_eq!(sf.preset_name(0), Some("Test Kit"));
		assert_eq!(sf.instruments.len(), 1);
		assert_eq!(sf.samples.len(), 2);
		assert_eq!(sf.samples[1].start, 3);
		assert_eq!(sf.samples[1].end, 4);
		assert_eq!(sf.samples[1].sample_rate, 22050);
		assert_eq!(sf.samples[1].root_key, 38);
		assert_eq!(sf.sample_data(0), Some(&[1i16, 2, 3][..]));
		assert_eq!(sf.sample_data(1), Some(&[4i16, 5][..]));
		assert_eq!(sf.key_map(0), vec![((36, 36), 0), ((38, 38), 1)]);
	}

	#[test]
	fn rejects_other_riff_files() {
		let mut wav = b"RIFF".to_vec();
		wav.extend_from_slice(&4u32.to_le_bytes());
		wav.extend_from_slice(b"WAVE");
		assert!(matches!(SoundFont::parse(&wav), Err(OpenError::NotASoundFont)));
		assert!(matches!(SoundFont::parse(b"MThd"), Err(OpenError::NotASoundFont)));
	}

	#[test]
	fn rejects_wrong_riff_size() {
		let mut bytes = kit_bytes();
		bytes[4] = bytes[4].wrapping_add(2);
		assert!(matches!(SoundFont::parse(&bytes), Err(OpenError::BadSoundFont(_))));
	}

	#[test]
	fn rejects_truncated_file() {
		let bytes = kit_bytes();
		assert!(SoundFont::parse(&bytes[..bytes.len() - 46]).is_err());
	}

	/// one preset, one instrument with a global zone and two sample zones.
	/// the second zone's key range is stored high byte first.
	fn global_zone_bytes() -> Vec<u8> {
		let gen = |oper: u16, a: u8, b: u8| Generator {
			oper,
			amount: u16::from_le_bytes([a, b]),
		};
		let bag = |gen_index: u16| Bag {
			gen_index,
			mod_index: 0,
		};

		let mut info = vec![];
		riff::write_chunk(&mut info, riff::IFIL, &[2, 0, 1, 0]);
		riff::write_chunk(&mut info, riff::INAM, b"Hand Built\0");

		let mut sdta = vec![];
		riff::write_chunk(&mut sdta, riff::SMPL, &[1, 0, 2, 0, 3, 0, 4, 0]);

		let sample = |name: &str, start: u32| SampleHeader {
			name: fixed_name(name),
			start,
			end: start + 1,
			start_loop: 0,
			end_loop: 0,
			sample_rate: 8000,
			original_pitch: 60,
			pitch_correction: 0,
			sample_link: 0,
			sample_type: 1,
		};
		let igen = [
			// global
			gen(generator::KEY_RANGE, 30, 60),
			gen(generator::VEL_RANGE, 10, 100),
			gen(generator::KEY_RANGE, 40, 41),
			Generator::sample_id(0),
			gen(generator::KEY_RANGE, 60, 55),
			Generator::sample_id(1),
			Generator::terminal(),
		];
		let mut pdta = vec![];
		let phdr = [
			PresetHeader {
				name: fixed_name("Kit"),
				preset: 0,
				bank: 0,
				bag_index: 0,
				library: 0,
				genre: 0,
				morphology: 0,
			},
			PresetHeader::terminal(1),
		];
		riff::write_chunk(&mut pdta, riff::PHDR, &encode_all(&phdr));
		riff::write_chunk(&mut pdta, riff::PBAG, &encode_all(&[bag(0), bag(1)]));
		riff::write_chunk(&mut pdta, riff::PMOD, &encode_all(&[Modulator::terminal()]));
		let pgen = [Generator::instrument(0), Generator::terminal()];
		riff::write_chunk(&mut pdta, riff::PGEN, &encode_all(&pgen));
		let inst = [
			InstrumentHeader {
				name: fixed_name("Kit"),
				bag_index: 0,
			},
			InstrumentHeader::terminal(3),
		];
		riff::write_chunk(&mut pdta, riff::INST, &encode_all(&inst));
		let ibag = [bag(0), bag(2), bag(4), bag(6)];
		riff::write_chunk(&mut pdta, riff::IBAG, &encode_all(&ibag));
		riff::write_chunk(&mut pdta, riff::IMOD, &encode_all(&[Modulator::terminal()]));
		riff::write_chunk(&mut pdta, riff::IGEN, &encode_all(&igen));
		let shdr = [sample("a", 0), sample("b", 2), SampleHeader::terminal()];
		riff::write_chunk(&mut pdta, riff::SHDR, &encode_all(&shdr));

		let mut lists = vec![];
		riff::write_list(&mut lists, riff::LIST, riff::INFO, &info);
		riff::write_list(&mut lists, riff::LIST, riff::SDTA, &sdta);
		riff::write_list(&mut lists, riff::LIST, riff::PDTA, &pdta);
		let mut out = vec![];
		riff::write_list(&mut out, riff::RIFF, riff::SFBK, &lists);
		out
	}

	#[test]
	fn zones_inherit_the_global_zone() {
		let sf = SoundFont::parse(&global_zone_bytes()).unwrap();
		assert_eq!(sf.info.name, "Hand Built");
		assert_eq!(
			sf.instruments[0].zones,
			vec![
				Zone {
					key_range: (40, 41),
					vel_range: (10, 100),
					reference: ZoneReference::SampleID(0),
				},
				Zone {
					key_range: (55, 60),
					vel_range: (10, 100),
					reference: ZoneReference::SampleID(1),
				},
			]
		);
		assert_eq!(sf.key_map(0), vec![((40, 41), 0), ((55, 60), 1)]);
		assert_eq!(sf.sample_data(1), Some(&[3i16, 4][..]));
	}

	#[test]
	fn rejects_list_past_end_of_file() {
		let mut bytes = kit_bytes();
		let info_size = u32::from_le_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]) as usize;
		let sdta = 20 + info_size;
		assert_eq!(&bytes[sdta + 8..sdta + 12], b"sdta");
		bytes[sdta + 4..sdta + 8].copy_from_slice(&0xffff_ff00u32.to_le_bytes());
		bytes[sdta + 16..sdta + 20].copy_from_slice(&0xffff_fe00u32.to_le_bytes());
		match SoundFont::parse(&bytes) {
			Err(OpenError::BadSoundFont(msg)) => assert!(msg.contains("sdta")),
			other => panic!("unexpected {:?}", other),
		}
	}

	#[test]
	fn rejects_missing_terminal_sample() {
		let mut bytes = kit_bytes();
		// last shdr record is the last 46 bytes of the file
		let eos = bytes.len() - 46;
		bytes[eos..eos + 3].copy_from_slice(b"XYZ");
		match SoundFont::parse(&bytes) {
			Err(OpenError::BadSoundFont(msg)) => assert!(msg.contains("terminal sample")),
			other => panic!("unexpected {:?}", other),
		}
	}
}
