/// Writes one placeholder soundfont per catalog entry.
use crate::catalog::{Catalog, DrumMachine};
use crate::error::GenerateError;
use crate::reader::SoundFont;
use crate::soundfont::{Info, Sample, SoundFontDocument};
use crate::synth::DrumVoice;
use crate::writer;
use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};

/// A file that was written successfully.
#[derive(Debug)]
pub struct Report {
	pub path: PathBuf,
	pub bytes: u64,
}

/// kick, snare and hi-hat on their General MIDI keys.
pub fn drum_document(
	catalog: &Catalog,
	machine: &DrumMachine,
	creation_date: Option<String>,
) -> SoundFontDocument {
	let mut info = Info::new(
		machine.name.as_str(),
		catalog.engineer.as_str(),
		catalog.software.as_str(),
		machine.comment.as_str(),
	);
	info.creation_date = creation_date;
	info.sound_engine = catalog.sound_engine.clone();

	let kit = DrumVoice::ALL
		.iter()
		.map(|&voice| {
			let data = voice.render_default(catalog.sample_rate);
			let sample = Sample::mono(voice.name(), data, catalog.sample_rate, voice.midi_note());
			(sample, voice.midi_note())
		})
		.collect();
	SoundFontDocument::drum_kit(info, kit)
}

/// build and verify the file for one machine, without touching the disk.
pub fn encode_machine(
	catalog: &Catalog,
	machine: &DrumMachine,
	creation_date: Option<String>,
) -> Result<Vec<u8>, GenerateError> {
	let doc = drum_document(catalog, machine, creation_date);
	let bytes = writer::build(&doc)?;
	verify(&doc, &bytes)?;
	Ok(bytes)
}

/// parse `bytes` back and compare the parts a player cares about.
fn verify(doc: &SoundFontDocument, bytes: &[u8]) -> Result<(), GenerateError> {
	let sf = SoundFont::parse(bytes)?;
	check("INAM", &doc.info().name, &sf.info.name)?;
	check("sample count", &doc.samples().len(), &sf.samples.len())?;
	check("preset count", &doc.presets().len(), &sf.presets.len())?;
	for (i, (start, end)) in doc.sample_spans().into_iter().enumerate() {
		let sample = &sf.samples[i];
		check("sample span", &(start, end), &(sample.start as u64, sample.end as u64))?;
	}
	for (i, preset) in doc.presets().iter().enumerate() {
		let expected: Vec<((u8, u8), u16)> = doc.instruments()[preset.instrument]
			.zones
			.iter()
			.map(|zone| (zone.key_range, zone.sample as u16))
			.collect();
		check("key map", &expected, &sf.key_map(i))?;
	}
	Ok(())
}

fn check<T: PartialEq + std::fmt::Debug + ?Sized>(
	field: &'static str,
	expected: &T,
	found: &T,
) -> Result<(), GenerateError> {
	if expected == found {
		Ok(())
	} else {
		Err(GenerateError::Mismatch {
			field,
			expected: format!("{:?}", expected),
			found: format!("{:?}", found),
		})
	}
}

/// write `bytes` to `path` via a temporary file in the same directory.
/// if anything fails, `path` is left as it was.
pub fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), GenerateError> {
	let dir = match path.parent() {
		Some(dir) if !dir.as_os_str().is_empty() => dir,
		_ => Path::new("."),
	};
	let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| GenerateError::io(dir, e))?;
	tmp.write_all(bytes)
		.map_err(|e| GenerateError::io(tmp.path(), e))?;
	tmp.as_file()
		.sync_all()
		.map_err(|e| GenerateError::io(tmp.path(), e))?;
	// the temporary file is deleted if this fails
	tmp.persist(path)
		.map_err(|e| GenerateError::io(path, e.error))?;
	Ok(())
}

/// Generate one file.
pub fn generate(
	out_dir: &Path,
	catalog: &Catalog,
	machine: &DrumMachine,
	creation_date: Option<String>,
) -> Result<Report, GenerateError> {
	let bytes = encode_machine(catalog, machine, creation_date)?;
	let path = out_dir.join(&machine.file);
	write_atomically(&path, &bytes)?;
	let written = std::fs::metadata(&path)
		.map_err(|e| GenerateError::io(&path, e))?
		.len();
	log::info!("wrote {} ({} bytes)", path.display(), written);
	Ok(Report {
		path,
		bytes: written,
	})
}

/// Generate every file in the catalog.
/// Fails as a whole only if the output directory can't be created; otherwise
/// each entry succeeds or fails on its own, in catalog order.
pub fn generate_all(
	out_dir: &Path,
	catalog: &Catalog,
) -> Result<Vec<(String, Result<Report, GenerateError>)>, GenerateError> {
	std::fs::create_dir_all(out_dir).map_err(|e| GenerateError::io(out_dir, e))?;

	let creation_date = if catalog.stamp_date {
		Some(chrono::Local::now().format("%Y-%m-%d").to_string())
	} else {
		None
	};

	let mut results = Vec::with_capacity(catalog.machines.len());
	let mut claimed = HashSet::new();
	for machine in catalog.machines.iter() {
		let result = if claimed.insert(machine.file.as_str()) {
			generate(out_dir, catalog, machine, creation_date.clone())
		} else {
			Err(GenerateError::DuplicateFile(machine.file.clone()))
		};
		if let Err(e) = &result {
			log::warn!("{}: {}", machine.file, e);
		}
		results.push((machine.file.clone(), result));
	}
	Ok(results)
}
