//! Placeholder SoundFont 2 files for drum machines.
//!
//! `writer::build` turns a `SoundFontDocument` into a byte-exact .sf2 file,
//! `reader::SoundFont` reads one back, and `batch` ties them to the drum
//! machine `catalog` and the placeholder waveforms in `synth`.

pub mod batch;
pub mod catalog;
pub mod error;
pub mod reader;
pub mod records;
pub mod riff;
pub mod soundfont;
pub mod synth;
pub mod writer;

pub use catalog::{Catalog, DrumMachine};
pub use error::{BuildError, ConfigError, GenerateError, OpenError};
pub use soundfont::{Info, Instrument, Preset, Sample, SoundFontDocument, Zone};
pub use writer::build;
