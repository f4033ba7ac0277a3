use std::path::PathBuf;

/// A document that can't be encoded. Nothing is emitted when one of these is returned.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
	#[error("{entity}: bad {field}: {reason}")]
	Precondition {
		/// e.g. `sample 2 ("Snare")`
		entity: String,
		field: &'static str,
		reason: String,
	},
	#[error("too many {what} ({count}, the format allows at most {max})")]
	TooMany {
		what: &'static str,
		count: usize,
		max: usize,
	},
}

impl BuildError {
	pub(crate) fn precondition(
		entity: impl Into<String>,
		field: &'static str,
		reason: impl Into<String>,
	) -> Self {
		BuildError::Precondition {
			entity: entity.into(),
			field,
			reason: reason.into(),
		}
	}
}

/// Errors from reading a soundfont.
#[derive(Debug, thiserror::Error)]
pub enum OpenError {
	#[error("IO error: {0}")]
	IO(#[from] std::io::Error),
	#[error("not a sound font")]
	NotASoundFont,
	#[error("bad sound font file: {0}")]
	BadSoundFont(String),
}

/// Errors from loading a catalog script.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("{path}: {message}")]
	Script { path: String, message: String },
	#[error("catalog script should evaluate to an array, not {0}")]
	NotAnArray(&'static str),
	#[error("catalog entry {index}: {reason}")]
	BadEntry { index: usize, reason: String },
	#[error("{name} should be {expected}, not {found}")]
	BadSetting {
		name: String,
		expected: &'static str,
		found: &'static str,
	},
}

/// Failure to produce one output file.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
	#[error("{}: {source}", path.display())]
	Io {
		path: PathBuf,
		source: std::io::Error,
	},
	#[error(transparent)]
	Build(#[from] BuildError),
	#[error("encoded file doesn't read back: {0}")]
	Verify(#[from] OpenError),
	#[error("{0} is already written by an earlier entry in this batch")]
	DuplicateFile(String),
	#[error("encoded file reads back wrong {field}: expected {expected}, got {found}")]
	Mismatch {
		field: &'static str,
		expected: String,
		found: String,
	},
}

impl GenerateError {
	pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
		GenerateError::Io {
			path: path.into(),
			source,
		}
	}

	/// the precondition that failed, if that's what went wrong.
	pub fn build_error(&self) -> Option<&BuildError> {
		match self {
			GenerateError::Build(e) => Some(e),
			_ => None,
		}
	}
}
