/// SOUNDFONT WRITER.
/// turns a `SoundFontDocument` into the bytes of an .sf2 file.
/// everything that could make the output invalid is checked up front by `validate`,
/// so encoding itself can't fail.
use crate::error::BuildError;
use crate::records::{
	encode_all, fixed_name, Bag, Generator, InstrumentHeader, Modulator, PresetHeader, SampleHeader,
	NAME_LEN,
};
use crate::riff::{self, FourCC};
use crate::soundfont::{Info, SoundFontDocument};

/// INFO strings other than ICMT (including the terminator).
const MAX_INFO_LEN: usize = 256;
const MAX_COMMENT_LEN: usize = 65536;
const MAX_KEY: u8 = 127;
/// `original_pitch` value for "unpitched"
const UNPITCHED: u8 = 255;
/// RAM sfSampleType values: mono, right, left, linked. ROM samples can't be written.
const SAMPLE_TYPES: [u16; 4] = [1, 2, 4, 8];
const MAX_INDEX: usize = u16::MAX as usize;

/// Encode `doc` as an .sf2 file.
pub fn build(doc: &SoundFontDocument) -> Result<Vec<u8>, BuildError> {
	validate(doc)?;

	let info = info_payload(doc.info());
	let sdta = sdta_payload(doc);
	let pdta = pdta_payload(doc);

	let mut lists = Vec::with_capacity(info.len() + sdta.len() + pdta.len() + 3 * 12);
	riff::write_list(&mut lists, riff::LIST, riff::INFO, &info);
	riff::write_list(&mut lists, riff::LIST, riff::SDTA, &sdta);
	riff::write_list(&mut lists, riff::LIST, riff::PDTA, &pdta);

	let mut out = Vec::with_capacity(lists.len() + 12);
	riff::write_list(&mut out, riff::RIFF, riff::SFBK, &lists);
	log::debug!(
		"built \"{}\": INFO {} bytes, sdta {} bytes, pdta {} bytes, {} total",
		doc.info().name,
		info.len(),
		sdta.len(),
		pdta.len(),
		out.len()
	);
	Ok(out)
}

/// Check every precondition `build` relies on.
pub fn validate(doc: &SoundFontDocument) -> Result<(), BuildError> {
	validate_info(doc.info())?;

	let samples = doc.samples();
	let instruments = doc.instruments();
	let presets = doc.presets();

	// terminal records take the index one past the last real one
	check_count("samples", samples.len())?;
	check_count("instruments", instruments.len())?;
	check_count("presets", presets.len())?;
	let zone_count: usize = instruments.iter().map(|i| i.zones.len()).sum();
	check_count("instrument zones", zone_count)?;
	// two generators per zone
	check_count("instrument generators", 2 * zone_count)?;

	let mut total_frames = 0u64;
	for (i, sample) in samples.iter().enumerate() {
		let entity = || format!("sample {} ({:?})", i, sample.name);
		check_name(&entity(), &sample.name)?;
		let frames = sample.frame_count();
		if frames == 0 {
			return Err(BuildError::precondition(entity(), "data", "no PCM frames"));
		}
		if sample.sample_rate == 0 {
			return Err(BuildError::precondition(entity(), "sample_rate", "must be positive"));
		}
		if sample.loop_start > sample.loop_end {
			return Err(BuildError::precondition(
				entity(),
				"loop_start",
				format!("{} is after loop_end {}", sample.loop_start, sample.loop_end),
			));
		}
		if sample.loop_end as usize > frames {
			return Err(BuildError::precondition(
				entity(),
				"loop_end",
				format!("{} is past the last frame ({} frames)", sample.loop_end, frames),
			));
		}
		if sample.original_pitch > MAX_KEY && sample.original_pitch != UNPITCHED {
			return Err(BuildError::precondition(
				entity(),
				"original_pitch",
				format!("{} is neither a MIDI key nor {}", sample.original_pitch, UNPITCHED),
			));
		}
		if !SAMPLE_TYPES.contains(&sample.sample_type) {
			return Err(BuildError::precondition(
				entity(),
				"sample_type",
				format!("{:#x} is not a RAM sample type", sample.sample_type),
			));
		}
		if sample.sample_link as usize >= samples.len() {
			return Err(BuildError::precondition(
				entity(),
				"sample_link",
				format!(
					"references sample {}, but there are only {} samples",
					sample.sample_link,
					samples.len()
				),
			));
		}
		total_frames += frames as u64;
	}
	if total_frames > u32::MAX as u64 {
		return Err(BuildError::TooMany {
			what: "sample frames",
			count: total_frames as usize,
			max: u32::MAX as usize,
		});
	}

	for (i, instrument) in instruments.iter().enumerate() {
		let entity = format!("instrument {} ({:?})", i, instrument.name);
		check_name(&entity, &instrument.name)?;
		for (z, zone) in instrument.zones.iter().enumerate() {
			let (low, high) = zone.key_range;
			if low > high || high > MAX_KEY {
				return Err(BuildError::precondition(
					format!("{} zone {}", entity, z),
					"key_range",
					format!("{}..={} is not a MIDI key range", low, high),
				));
			}
			if zone.sample >= samples.len() {
				return Err(BuildError::precondition(
					format!("{} zone {}", entity, z),
					"sample",
					format!(
						"references sample {}, but there are only {} samples",
						zone.sample,
						samples.len()
					),
				));
			}
		}
	}

	for (i, preset) in presets.iter().enumerate() {
		let entity = format!("preset {} ({:?})", i, preset.name);
		check_name(&entity, &preset.name)?;
		if preset.instrument >= instruments.len() {
			return Err(BuildError::precondition(
				entity,
				"instrument",
				format!(
					"references instrument {}, but there are only {} instruments",
					preset.instrument,
					instruments.len()
				),
			));
		}
	}
	Ok(())
}

fn check_count(what: &'static str, count: usize) -> Result<(), BuildError> {
	if count >= MAX_INDEX {
		Err(BuildError::TooMany {
			what,
			count,
			max: MAX_INDEX - 1,
		})
	} else {
		Ok(())
	}
}

fn check_text(entity: &str, field: &'static str, text: &str) -> Result<(), BuildError> {
	if !text.is_ascii() {
		return Err(BuildError::precondition(entity, field, "must be ASCII"));
	}
	if text.contains('\0') {
		return Err(BuildError::precondition(entity, field, "contains a NUL byte"));
	}
	Ok(())
}

fn check_name(entity: &str, name: &str) -> Result<(), BuildError> {
	check_text(entity, "name", name)?;
	if name.is_empty() {
		return Err(BuildError::precondition(entity, "name", "is empty"));
	}
	if name.len() > NAME_LEN {
		log::debug!(
			"{}: name will be truncated to {:?}",
			entity,
			&name[..NAME_LEN]
		);
	}
	Ok(())
}

fn validate_info(info: &Info) -> Result<(), BuildError> {
	if info.name.is_empty() {
		return Err(BuildError::precondition("INFO", "INAM", "is empty"));
	}
	for (field, _, text, max) in info_strings(info) {
		check_text("INFO", field, text)?;
		// + 1 for the terminator
		if text.len() + 1 > max {
			return Err(BuildError::precondition(
				"INFO",
				field,
				format!("{} bytes long, at most {} allowed", text.len(), max - 1),
			));
		}
	}
	Ok(())
}

/// text INFO records in the order they're written, with their maximum length.
fn info_strings(info: &Info) -> Vec<(&'static str, FourCC, &str, usize)> {
	let mut strings = vec![
		("INAM", riff::INAM, info.name.as_str(), MAX_INFO_LEN),
		("IENG", riff::IENG, info.engineer.as_str(), MAX_INFO_LEN),
		("ISFT", riff::ISFT, info.software.as_str(), MAX_INFO_LEN),
		("ICMT", riff::ICMT, info.comment.as_str(), MAX_COMMENT_LEN),
	];
	let optional = [
		("isng", riff::ISNG, &info.sound_engine),
		("ICRD", riff::ICRD, &info.creation_date),
		("ICOP", riff::ICOP, &info.copyright),
	];
	for (field, id, text) in optional {
		if let Some(text) = text {
			strings.push((field, id, text.as_str(), MAX_INFO_LEN));
		}
	}
	strings
}

fn info_payload(info: &Info) -> Vec<u8> {
	let mut out = vec![];
	let mut version = Vec::with_capacity(4);
	version.extend_from_slice(&info.version.major.to_le_bytes());
	version.extend_from_slice(&info.version.minor.to_le_bytes());
	riff::write_chunk(&mut out, riff::IFIL, &version);

	for (_, id, text, _) in info_strings(info) {
		let mut data = Vec::with_capacity(text.len() + 1);
		data.extend_from_slice(text.as_bytes());
		data.push(0);
		riff::write_chunk(&mut out, id, &data);
	}
	out
}

fn sdta_payload(doc: &SoundFontDocument) -> Vec<u8> {
	let frames: usize = doc.samples().iter().map(|s| s.frame_count()).sum();
	let mut smpl = Vec::with_capacity(2 * frames);
	for sample in doc.samples() {
		for s in sample.data.iter() {
			smpl.extend_from_slice(&s.to_le_bytes());
		}
	}
	let mut out = vec![];
	riff::write_chunk(&mut out, riff::SMPL, &smpl);
	out
}

fn pdta_payload(doc: &SoundFontDocument) -> Vec<u8> {
	// --- presets ---
	let mut phdr = Vec::with_capacity(doc.presets().len() + 1);
	let mut pbag = Vec::with_capacity(doc.presets().len() + 1);
	let mut pgen = Vec::with_capacity(doc.presets().len() + 1);
	for preset in doc.presets() {
		phdr.push(PresetHeader {
			name: fixed_name(&preset.name),
			preset: preset.preset,
			bank: preset.bank,
			bag_index: pbag.len() as u16,
			library: 0,
			genre: 0,
			morphology: 0,
		});
		pbag.push(Bag {
			gen_index: pgen.len() as u16,
			mod_index: 0,
		});
		pgen.push(Generator::instrument(preset.instrument as u16));
	}
	phdr.push(PresetHeader::terminal(pbag.len() as u16));
	pbag.push(Bag::terminal(pgen.len() as u16, 0));
	pgen.push(Generator::terminal());

	// --- instruments ---
	let mut inst = Vec::with_capacity(doc.instruments().len() + 1);
	let mut ibag = vec![];
	let mut igen = vec![];
	for instrument in doc.instruments() {
		inst.push(InstrumentHeader {
			name: fixed_name(&instrument.name),
			bag_index: ibag.len() as u16,
		});
		for zone in instrument.zones.iter() {
			ibag.push(Bag {
				gen_index: igen.len() as u16,
				mod_index: 0,
			});
			// keyRange must come first in a zone
			igen.push(Generator::key_range(zone.key_range.0, zone.key_range.1));
			// and sampleID last
			igen.push(Generator::sample_id(zone.sample as u16));
		}
	}
	inst.push(InstrumentHeader::terminal(ibag.len() as u16));
	ibag.push(Bag::terminal(igen.len() as u16, 0));
	igen.push(Generator::terminal());

	// --- samples ---
	let mut shdr = Vec::with_capacity(doc.samples().len() + 1);
	for (sample, (start, end)) in doc.samples().iter().zip(doc.sample_spans()) {
		let (start_loop, end_loop) = if sample.has_loop() {
			(
				start as u32 + sample.loop_start,
				start as u32 + sample.loop_end,
			)
		} else {
			(0, 0)
		};
		shdr.push(SampleHeader {
			name: fixed_name(&sample.name),
			start: start as u32,
			end: end as u32,
			start_loop,
			end_loop,
			sample_rate: sample.sample_rate,
			original_pitch: sample.original_pitch,
			pitch_correction: sample.pitch_correction,
			sample_link: sample.sample_link,
			sample_type: sample.sample_type,
		});
	}
	shdr.push(SampleHeader::terminal());

	let pmod = [Modulator::terminal()];
	let imod = [Modulator::terminal()];

	let mut out = vec![];
	riff::write_chunk(&mut out, riff::PHDR, &encode_all(&phdr));
	riff::write_chunk(&mut out, riff::PBAG, &encode_all(&pbag));
	riff::write_chunk(&mut out, riff::PMOD, &encode_all(&pmod));
	riff::write_chunk(&mut out, riff::PGEN, &encode_all(&pgen));
	riff::write_chunk(&mut out, riff::INST, &encode_all(&inst));
	riff::write_chunk(&mut out, riff::IBAG, &encode_all(&ibag));
	riff::write_chunk(&mut out, riff::IMOD, &encode_all(&imod));
	riff::write_chunk(&mut out, riff::IGEN, &encode_all(&igen));
	riff::write_chunk(&mut out, riff::SHDR, &encode_all(&shdr));
	out
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::soundfont::{Instrument, Preset, Sample, Zone};

	fn info() -> Info {
		Info::new("Test Kit", "Engineer", "Software", "Comment")
	}

	fn kit(frames: &[usize]) -> SoundFontDocument {
		let samples = frames
			.iter()
			.enumerate()
			.map(|(i, &n)| {
				let key = 36 + i as u8;
				(Sample::mono(format!("S{}", i), vec![i as i16; n], 44100, key), key)
			})
			.collect();
		SoundFontDocument::drum_kit(info(), samples)
	}

	fn with_sample(info: Info, sample: Sample) -> SoundFontDocument {
		SoundFontDocument::drum_kit(info, vec![(sample, 60)])
	}

	/// (id, payload) of every chunk directly inside `data`
	fn chunks(mut data: &[u8]) -> Vec<([u8; 4], &[u8])> {
		let mut chunks = vec![];
		while !data.is_empty() {
			let id = [data[0], data[1], data[2], data[3]];
			let size = u32::from_le_bytes([data[4], data[5], data[6], data[7]]) as usize;
			chunks.push((id, &data[8..8 + size]));
			data = &data[riff::padded_len(size)..];
		}
		chunks
	}

	fn pdta_chunk<'a>(bytes: &'a [u8], id: &[u8; 4]) -> &'a [u8] {
		let riff = chunks(bytes);
		let lists = chunks(&riff[0].1[4..]);
		let pdta = chunks(&lists[2].1[4..]);
		pdta.into_iter().find(|(i, _)| i == id).map(|(_, p)| p).unwrap()
	}

	#[test]
	fn drum_scenario_record_counts() {
		let bytes = build(&kit(&[22050, 13230, 4410])).unwrap();
		let riff = chunks(&bytes);
		let lists = chunks(&riff[0].1[4..]);
		let sdta = chunks(&lists[1].1[4..]);
		assert_eq!(&sdta[0].0, b"smpl");
		assert_eq!(sdta[0].1.len(), 2 * (22050 + 13230 + 4410));

		assert_eq!(pdta_chunk(&bytes, b"shdr").len(), 4 * 46);
		// 2 per zone + terminal
		assert_eq!(pdta_chunk(&bytes, b"igen").len(), 7 * 4);
		assert_eq!(pdta_chunk(&bytes, b"ibag").len(), 4 * 4);
		assert_eq!(pdta_chunk(&bytes, b"inst").len(), 2 * 22);
		assert_eq!(pdta_chunk(&bytes, b"phdr").len(), 2 * 38);
		assert_eq!(pdta_chunk(&bytes, b"pbag").len(), 2 * 4);
		assert_eq!(pdta_chunk(&bytes, b"pgen").len(), 2 * 4);
		assert_eq!(pdta_chunk(&bytes, b"pmod"), &[0u8; 10]);
		assert_eq!(pdta_chunk(&bytes, b"imod"), &[0u8; 10]);
	}

	#[test]
	fn pdta_sub_chunk_order() {
		let bytes = build(&kit(&[4, 4])).unwrap();
		let riff = chunks(&bytes);
		let lists = chunks(&riff[0].1[4..]);
		let ids: Vec<[u8; 4]> = chunks(&lists[2].1[4..]).iter().map(|c| c.0).collect();
		let expected: Vec<[u8; 4]> = [
			b"phdr", b"pbag", b"pmod", b"pgen", b"inst", b"ibag", b"imod", b"igen", b"shdr",
		]
		.iter()
		.map(|id| **id)
		.collect();
		assert_eq!(ids, expected);
	}

	#[test]
	fn terminals_point_past_last_real_record() {
		let bytes = build(&kit(&[3, 5, 7])).unwrap();
		let inst = pdta_chunk(&bytes, b"inst");
		assert_eq!(&inst[22..25], b"EOI");
		assert_eq!(&inst[42..44], &3u16.to_le_bytes());
		let ibag = pdta_chunk(&bytes, b"ibag");
		assert_eq!(&ibag[12..14], &6u16.to_le_bytes());
		let phdr = pdta_chunk(&bytes, b"phdr");
		assert_eq!(&phdr[38..41], b"EOP");
		assert_eq!(&phdr[38 + 24..38 + 26], &1u16.to_le_bytes());
		let pbag = pdta_chunk(&bytes, b"pbag");
		assert_eq!(&pbag[4..6], &1u16.to_le_bytes());
		let shdr = pdta_chunk(&bytes, b"shdr");
		assert_eq!(&shdr[3 * 46..3 * 46 + 3], b"EOS");
		assert!(shdr[3 * 46 + 20..].iter().all(|&b| b == 0));
	}

	#[test]
	fn key_range_precedes_sample_id_in_every_zone() {
		let bytes = build(&kit(&[3, 5, 7])).unwrap();
		let igen = pdta_chunk(&bytes, b"igen");
		for zone in 0..3 {
			let rec = &igen[zone * 8..zone * 8 + 8];
			assert_eq!(&rec[0..2], &43u16.to_le_bytes());
			assert_eq!(rec[2], 36 + zone as u8);
			assert_eq!(rec[3], 36 + zone as u8);
			assert_eq!(&rec[4..6], &53u16.to_le_bytes());
			assert_eq!(&rec[6..8], &(zone as u16).to_le_bytes());
		}
	}

	#[test]
	fn sample_offsets_are_frame_indices() {
		let bytes = build(&kit(&[10, 20, 30])).unwrap();
		let shdr = pdta_chunk(&bytes, b"shdr");
		let field = |rec: usize, off: usize| {
			let b = &shdr[rec * 46 + off..rec * 46 + off + 4];
			u32::from_le_bytes([b[0], b[1], b[2], b[3]])
		};
		assert_eq!((field(0, 20), field(0, 24)), (0, 9));
		assert_eq!((field(1, 20), field(1, 24)), (10, 29));
		assert_eq!((field(2, 20), field(2, 24)), (30, 59));
	}

	#[test]
	fn info_records_in_order_with_odd_lengths_padded() {
		let mut info = info();
		// "Kit" + NUL = 4, "Engineer" + NUL = 9 (odd)
		info.name = "Kit".to_string();
		let doc = with_sample(info, Sample::mono("a", vec![0; 2], 8000, 60));
		let bytes = build(&doc).unwrap();
		let riff = chunks(&bytes);
		let lists = chunks(&riff[0].1[4..]);
		assert_eq!(&lists[0].1[..4], b"INFO");
		let info = chunks(&lists[0].1[4..]);
		let ids: Vec<[u8; 4]> = info.iter().map(|c| c.0).collect();
		assert_eq!(ids, vec![*b"ifil", *b"INAM", *b"IENG", *b"ISFT", *b"ICMT"]);
		assert_eq!(info[0].1, &[2u8, 0, 1, 0]);
		assert_eq!(info[1].1, b"Kit\0");
		assert_eq!(info[2].1, b"Engineer\0");
		assert!(lists[0].1.len() % 2 == 0);
	}

	#[test]
	fn optional_info_records_follow_comment() {
		let mut info = info();
		info.sound_engine = Some("EMU8000".to_string());
		info.creation_date = Some("2026-10-19".to_string());
		let doc = with_sample(info, Sample::mono("a", vec![0; 2], 8000, 60));
		let bytes = build(&doc).unwrap();
		let riff = chunks(&bytes);
		let lists = chunks(&riff[0].1[4..]);
		let ids: Vec<[u8; 4]> = chunks(&lists[0].1[4..]).iter().map(|c| c.0).collect();
		assert_eq!(&ids[4], b"ICMT");
		assert_eq!(&ids[5], b"isng");
		assert_eq!(&ids[6], b"ICRD");
		assert_eq!(ids.len(), 7);
	}

	#[test]
	fn riff_size_matches_length() {
		let bytes = build(&kit(&[5, 7])).unwrap();
		let size = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]) as usize;
		assert_eq!(size + 8, bytes.len());
		assert_eq!(&bytes[8..12], b"sfbk");
		assert_eq!(bytes.len() % 2, 0);
	}

	#[test]
	fn identical_documents_build_identically() {
		assert_eq!(build(&kit(&[100, 50])).unwrap(), build(&kit(&[100, 50])).unwrap());
	}

	#[test]
	fn looped_sample_loop_points_are_absolute() {
		let mut doc = SoundFontDocument::new(info());
		doc.add_sample(Sample::mono("a", vec![0; 10], 8000, 60));
		let mut looped = Sample::mono("b", vec![0; 10], 8000, 60);
		looped.loop_start = 2;
		looped.loop_end = 8;
		doc.add_sample(looped);
		let bytes = build(&doc).unwrap();
		let shdr = pdta_chunk(&bytes, b"shdr");
		assert_eq!(&shdr[28..36], &[0u8; 8]);
		assert_eq!(&shdr[46 + 28..46 + 32], &12u32.to_le_bytes());
		assert_eq!(&shdr[46 + 32..46 + 36], &18u32.to_le_bytes());
	}

	#[test]
	fn rejects_dangling_sample_reference() {
		let mut doc = SoundFontDocument::new(info());
		doc.add_sample(Sample::mono("a", vec![0; 10], 8000, 60));
		doc.add_instrument(Instrument {
			name: "inst".to_string(),
			zones: vec![Zone::single_key(36, 1)],
		});
		match build(&doc) {
			Err(BuildError::Precondition { field, .. }) => assert_eq!(field, "sample"),
			other => panic!("unexpected {:?}", other),
		}
	}

	#[test]
	fn rejects_dangling_instrument_reference() {
		let mut doc = SoundFontDocument::new(info());
		doc.add_preset(Preset {
			name: "p".to_string(),
			preset: 0,
			bank: 0,
			instrument: 0,
		});
		match build(&doc) {
			Err(BuildError::Precondition { field, .. }) => assert_eq!(field, "instrument"),
			other => panic!("unexpected {:?}", other),
		}
	}

	#[test]
	fn rejects_empty_sample() {
		let doc = with_sample(info(), Sample::mono("a", vec![], 8000, 60));
		match build(&doc) {
			Err(BuildError::Precondition { entity, field, .. }) => {
				assert_eq!(field, "data");
				assert!(entity.contains("sample 0"));
			}
			other => panic!("unexpected {:?}", other),
		}
	}

	#[test]
	fn rejects_bad_key_range() {
		let mut doc = SoundFontDocument::new(info());
		doc.add_sample(Sample::mono("a", vec![0; 10], 8000, 60));
		doc.add_instrument(Instrument {
			name: "inst".to_string(),
			zones: vec![Zone {
				key_range: (60, 40),
				sample: 0,
			}],
		});
		assert!(matches!(
			build(&doc),
			Err(BuildError::Precondition { field: "key_range", .. })
		));
	}

	#[test]
	fn rejects_non_ascii_names_and_info() {
		let doc = with_sample(info(), Sample::mono("Käse", vec![0; 2], 8000, 60));
		assert!(matches!(
			build(&doc),
			Err(BuildError::Precondition { field: "name", .. })
		));

		let mut bad = info();
		bad.comment = "naïve".to_string();
		let doc = SoundFontDocument::new(bad);
		assert!(matches!(
			build(&doc),
			Err(BuildError::Precondition { field: "ICMT", .. })
		));
	}

	#[test]
	fn rejects_missing_name_and_long_info() {
		let doc = SoundFontDocument::new(Info::default());
		assert!(matches!(
			build(&doc),
			Err(BuildError::Precondition { field: "INAM", .. })
		));

		let mut long = info();
		long.engineer = "x".repeat(256);
		assert!(matches!(
			build(&SoundFontDocument::new(long)),
			Err(BuildError::Precondition { field: "IENG", .. })
		));
	}

	#[test]
	fn rejects_bad_sample_header_fields() {
		let field_of = |sample: Sample| match build(&with_sample(info(), sample)) {
			Err(BuildError::Precondition { field, .. }) => field,
			other => panic!("unexpected {:?}", other),
		};

		let mut sample = Sample::mono("a", vec![0; 4], 8000, 60);
		sample.original_pitch = 200;
		assert_eq!(field_of(sample), "original_pitch");

		let mut sample = Sample::mono("a", vec![0; 4], 8000, 60);
		sample.sample_type = 3;
		assert_eq!(field_of(sample), "sample_type");

		let mut sample = Sample::mono("a", vec![0; 4], 8000, 60);
		sample.sample_type = 0x8001;
		assert_eq!(field_of(sample), "sample_type");

		let mut sample = Sample::mono("a", vec![0; 4], 8000, 60);
		sample.sample_type = 4;
		sample.sample_link = 99;
		assert_eq!(field_of(sample), "sample_link");
	}

	#[test]
	fn accepts_unpitched_and_linked_stereo_samples() {
		let mut doc = SoundFontDocument::new(info());
		let mut left = Sample::mono("L", vec![1; 4], 8000, 255);
		left.sample_type = 4;
		left.sample_link = 1;
		let mut right = Sample::mono("R", vec![2; 4], 8000, 255);
		right.sample_type = 2;
		right.sample_link = 0;
		doc.add_sample(left);
		doc.add_sample(right);
		let bytes = build(&doc).unwrap();
		let shdr = pdta_chunk(&bytes, b"shdr");
		assert_eq!(shdr[40], 255);
		assert_eq!(&shdr[42..46], &[1u8, 0, 4, 0]);
		assert_eq!(&shdr[46 + 42..46 + 46], &[0u8, 0, 2, 0]);
	}

	#[test]
	fn key_range_bytes_are_low_then_high() {
		let mut doc = SoundFontDocument::new(info());
		doc.add_sample(Sample::mono("a", vec![0; 4], 8000, 60));
		doc.add_instrument(Instrument {
			name: "inst".to_string(),
			zones: vec![Zone {
				key_range: (40, 50),
				sample: 0,
			}],
		});
		let bytes = build(&doc).unwrap();
		let igen = pdta_chunk(&bytes, b"igen");
		assert_eq!(&igen[..4], &[43u8, 0, 40, 50]);
	}

	#[test]
	fn rejects_loop_past_end() {
		let mut sample = Sample::mono("a", vec![0; 10], 8000, 60);
		sample.loop_end = 11;
		let doc = SoundFontDocument::drum_kit(info(), vec![(sample, 60)]);
		assert!(matches!(
			build(&doc),
			Err(BuildError::Precondition { field: "loop_end", .. })
		));
	}

	#[test]
	fn long_names_are_truncated_not_rejected() {
		let doc = SoundFontDocument::drum_kit(
			Info::new("A Very Long Drum Machine Name", "", "", ""),
			vec![(Sample::mono("a", vec![0; 2], 8000, 60), 60)],
		);
		let bytes = build(&doc).unwrap();
		let inst = pdta_chunk(&bytes, b"inst");
		assert_eq!(&inst[..20], b"A Very Long Drum Mac");
	}
}
