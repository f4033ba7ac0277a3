/// The drum machines to generate placeholder soundfonts for.
///
/// The built-in table can be replaced by a Rhai script. The script's value must be an
/// array of object maps, and its top-level constants override the shared settings:
///
/// ```text
/// const SF_ENGINEER = "White Room Audio";
/// const SF_SOUND_ENGINE = "EMU8000";
/// const SF_SAMPLE_RATE = 48000;
/// const SF_STAMP_DATE = false;
///
/// [
///     #{ file: "roland_tr909.sf2", name: "Roland TR-909", planned: 26 },
///     #{ file: "linn_drum.sf2", name: "LinnDrum", comment: "Placeholder LinnDrum kit." },
/// ]
/// ```
use crate::error::ConfigError;
use std::collections::HashSet;
use std::path::Path;

pub const DEFAULT_ENGINEER: &str = "White Room Audio";
pub const DEFAULT_SOFTWARE: &str = "White Room Sam Sampler";
pub const DEFAULT_SOUND_ENGINE: &str = "EMU8000";
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrumMachine {
	/// output file name, relative to the output directory
	pub file: String,
	/// INAM, and the preset/instrument name
	pub name: String,
	/// ICMT
	pub comment: String,
}

impl DrumMachine {
	/// an entry whose comment says how many real samples are still to come.
	pub fn placeholder(file: &str, name: &str, planned: u32) -> Self {
		DrumMachine {
			file: file.to_string(),
			name: name.to_string(),
			comment: format!(
				"Test SoundFont for {}. Test file - {} samples planned. \
				 Minimal kick/snare/hi-hat included.",
				name, planned
			),
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Catalog {
	pub engineer: String,
	pub software: String,
	/// isng. an empty `SF_SOUND_ENGINE` leaves the record out.
	pub sound_engine: Option<String>,
	pub sample_rate: u32,
	/// write today's date as ICRD. off makes repeated runs byte-identical.
	pub stamp_date: bool,
	pub machines: Vec<DrumMachine>,
}

impl Default for Catalog {
	fn default() -> Self {
		Catalog {
			engineer: DEFAULT_ENGINEER.to_string(),
			software: DEFAULT_SOFTWARE.to_string(),
			sound_engine: Some(DEFAULT_SOUND_ENGINE.to_string()),
			sample_rate: DEFAULT_SAMPLE_RATE,
			stamp_date: true,
			machines: vec![
				DrumMachine::placeholder("roland_tr909.sf2", "Roland TR-909", 26),
				DrumMachine::placeholder("roland_tr606.sf2", "Roland TR-606", 49),
				DrumMachine::placeholder("roland_tr707.sf2", "Roland TR-707", 66),
				DrumMachine::placeholder("roland_tr505.sf2", "Roland TR-505", 14),
				DrumMachine::placeholder("roland_tr626.sf2", "Roland TR-626", 34),
				DrumMachine::placeholder("roland_cr78.sf2", "Roland CR-78", 78),
				DrumMachine::placeholder("waldorf_blofeld.sf2", "Waldorf Blofeld", 108),
			],
		}
	}
}

impl Catalog {
	/// Load a catalog from a Rhai script file.
	pub fn from_script(path: &Path) -> Result<Self, ConfigError> {
		let engine = rhai::Engine::new();
		let ast = engine
			.compile_file(path.to_path_buf())
			.map_err(|e| ConfigError::Script {
				path: path.display().to_string(),
				message: e.to_string(),
			})?;
		Self::from_ast(&engine, &ast, &path.display().to_string())
	}

	/// Load a catalog from Rhai source text.
	pub fn from_script_source(source: &str) -> Result<Self, ConfigError> {
		let engine = rhai::Engine::new();
		let ast = engine.compile(source).map_err(|e| ConfigError::Script {
			path: "<script>".to_string(),
			message: e.to_string(),
		})?;
		Self::from_ast(&engine, &ast, "<script>")
	}

	fn from_ast(engine: &rhai::Engine, ast: &rhai::AST, origin: &str) -> Result<Self, ConfigError> {
		let mut catalog = Catalog {
			machines: vec![],
			..Default::default()
		};

		for (name, _, value) in ast.iter_literal_variables(true, true) {
			match name {
				"SF_ENGINEER" => catalog.engineer = setting_string(name, value)?,
				"SF_SOFTWARE" => catalog.software = setting_string(name, value)?,
				"SF_SOUND_ENGINE" => {
					let engine = setting_string(name, value)?;
					catalog.sound_engine = Some(engine).filter(|e| !e.is_empty());
				}
				"SF_SAMPLE_RATE" => {
					let type_name = value.type_name();
					catalog.sample_rate = value
						.as_int()
						.ok()
						.and_then(|i| u32::try_from(i).ok())
						.filter(|&rate| rate > 0)
						.ok_or(ConfigError::BadSetting {
							name: name.to_string(),
							expected: "a positive integer",
							found: type_name,
						})?;
				}
				"SF_STAMP_DATE" => {
					catalog.stamp_date = value.as_bool().map_err(|found| ConfigError::BadSetting {
						name: name.to_string(),
						expected: "a bool",
						found,
					})?;
				}
				_ => {}
			}
		}

		let result: rhai::Dynamic = engine.eval_ast(ast).map_err(|e| ConfigError::Script {
			path: origin.to_string(),
			message: e.to_string(),
		})?;
		let type_name = result.type_name();
		let entries = result
			.try_cast::<rhai::Array>()
			.ok_or(ConfigError::NotAnArray(type_name))?;

		let mut files = HashSet::new();
		for (index, entry) in entries.into_iter().enumerate() {
			let machine = machine_from_map(index, entry)?;
			if !files.insert(machine.file.clone()) {
				return Err(ConfigError::BadEntry {
					index,
					reason: format!("{:?} is already used by an earlier entry", machine.file),
				});
			}
			catalog.machines.push(machine);
		}
		log::debug!(
			"{}: {} drum machines, {} Hz",
			origin,
			catalog.machines.len(),
			catalog.sample_rate
		);
		Ok(catalog)
	}
}

fn setting_string(name: &str, value: rhai::Dynamic) -> Result<String, ConfigError> {
	value.into_string().map_err(|found| ConfigError::BadSetting {
		name: name.to_string(),
		expected: "a string",
		found,
	})
}

fn machine_from_map(index: usize, entry: rhai::Dynamic) -> Result<DrumMachine, ConfigError> {
	let bad = |reason: String| ConfigError::BadEntry { index, reason };
	let type_name = entry.type_name();
	let map = entry
		.try_cast::<rhai::Map>()
		.ok_or_else(|| bad(format!("should be an object map, not {}", type_name)))?;

	let text = |key: &str| -> Result<Option<String>, ConfigError> {
		match map.get(key) {
			None => Ok(None),
			Some(value) => value
				.clone()
				.into_string()
				.map(Some)
				.map_err(|found| bad(format!("{} should be a string, not {}", key, found))),
		}
	};

	let file = text("file")?.ok_or_else(|| bad("missing file".to_string()))?;
	let name = text("name")?.ok_or_else(|| bad("missing name".to_string()))?;
	if Path::new(&file).file_name().and_then(|f| f.to_str()) != Some(file.as_str()) {
		return Err(bad(format!("{:?} is not a plain file name", file)));
	}

	let comment = match text("comment")? {
		Some(comment) => comment,
		None => {
			let planned = match map.get("planned") {
				None => 0,
				Some(value) => value
					.as_int()
					.ok()
					.and_then(|i| u32::try_from(i).ok())
					.ok_or_else(|| bad("planned should be a non-negative integer".to_string()))?,
			};
			return Ok(DrumMachine::placeholder(&file, &name, planned));
		}
	};
	Ok(DrumMachine {
		file,
		name,
		comment,
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn built_in_table() {
		let catalog = Catalog::default();
		assert_eq!(catalog.machines.len(), 7);
		assert_eq!(catalog.machines[0].file, "roland_tr909.sf2");
		assert_eq!(catalog.machines[0].name, "Roland TR-909");
		assert_eq!(
			catalog.machines[0].comment,
			"Test SoundFont for Roland TR-909. Test file - 26 samples planned. \
			 Minimal kick/snare/hi-hat included."
		);
		assert_eq!(catalog.sound_engine.as_deref(), Some("EMU8000"));
		assert_eq!(catalog.machines[6].name, "Waldorf Blofeld");
		assert_eq!(catalog.sample_rate, 44100);
	}

	#[test]
	fn script_replaces_table_and_settings() {
		let catalog = Catalog::from_script_source(
			r#"
			const SF_ENGINEER = "Someone";
			const SF_SOUND_ENGINE = "";
			const SF_SAMPLE_RATE = 22050;
			const SF_STAMP_DATE = false;
			[
				#{ file: "a.sf2", name: "Machine A", planned: 3 },
				#{ file: "b.sf2", name: "Machine B", comment: "custom" },
			]
			"#,
		)
		.unwrap();
		assert_eq!(catalog.engineer, "Someone");
		assert_eq!(catalog.software, DEFAULT_SOFTWARE);
		assert_eq!(catalog.sound_engine, None);
		assert_eq!(catalog.sample_rate, 22050);
		assert!(!catalog.stamp_date);
		assert_eq!(
			catalog.machines,
			vec![
				DrumMachine::placeholder("a.sf2", "Machine A", 3),
				DrumMachine {
					file: "b.sf2".to_string(),
					name: "Machine B".to_string(),
					comment: "custom".to_string(),
				},
			]
		);
	}

	#[test]
	fn script_must_return_an_array() {
		assert!(matches!(
			Catalog::from_script_source("42"),
			Err(ConfigError::NotAnArray(_))
		));
	}

	#[test]
	fn script_entries_are_checked() {
		assert!(matches!(
			Catalog::from_script_source(r#"[ #{ name: "no file" } ]"#),
			Err(ConfigError::BadEntry { index: 0, .. })
		));
		assert!(matches!(
			Catalog::from_script_source(
				r#"[ #{ file: "x.sf2", name: "ok" }, #{ file: "../up.sf2", name: "bad" } ]"#
			),
			Err(ConfigError::BadEntry { index: 1, .. })
		));
		assert!(matches!(
			Catalog::from_script_source(r#"[ 5 ]"#),
			Err(ConfigError::BadEntry { index: 0, .. })
		));
	}

	#[test]
	fn file_names_must_be_unique() {
		let result = Catalog::from_script_source(
			r#"[
				#{ file: "a.sf2", name: "First" },
				#{ file: "b.sf2", name: "Other" },
				#{ file: "a.sf2", name: "Second" },
			]"#,
		);
		match result {
			Err(ConfigError::BadEntry { index, reason }) => {
				assert_eq!(index, 2);
				assert!(reason.contains("a.sf2"));
			}
			other => panic!("unexpected {:?}", other),
		}
	}

	#[test]
	fn bad_settings_are_reported() {
		assert!(matches!(
			Catalog::from_script_source(r#"const SF_SAMPLE_RATE = "fast"; []"#),
			Err(ConfigError::BadSetting { .. })
		));
		assert!(matches!(
			Catalog::from_script_source(r#"const SF_SOUND_ENGINE = 8000; []"#),
			Err(ConfigError::BadSetting { .. })
		));
	}

	#[test]
	fn syntax_errors_are_reported() {
		assert!(matches!(
			Catalog::from_script_source("[ #{ file: "),
			Err(ConfigError::Script { .. })
		));
	}
}
