extern crate sfgen;

use clap::Parser;
use sfgen::batch;
use sfgen::catalog::Catalog;
use std::path::PathBuf;
use std::process::ExitCode;

/// Write placeholder SoundFont files (kick/snare/hi-hat) for a set of drum machines.
#[derive(Parser)]
#[command(name = "sfgen", version)]
struct Args {
	/// directory to write the .sf2 files into
	#[arg(default_value = "sf2")]
	output_dir: PathBuf,
	/// Rhai script replacing the built-in list of drum machines
	#[arg(short, long)]
	config: Option<PathBuf>,
}

fn main() -> ExitCode {
	env_logger::init();
	let args = Args::parse();

	let catalog = match &args.config {
		None => Catalog::default(),
		Some(path) => match Catalog::from_script(path) {
			Ok(c) => c,
			Err(e) => {
				eprintln!("Config error: {}", e);
				return ExitCode::FAILURE;
			}
		},
	};

	println!(
		"Creating {} placeholder SoundFont files in {}...",
		catalog.machines.len(),
		args.output_dir.display()
	);

	let results = match batch::generate_all(&args.output_dir, &catalog) {
		Ok(r) => r,
		Err(e) => {
			eprintln!("Couldn't create output directory: {}", e);
			return ExitCode::FAILURE;
		}
	};

	let mut failed = 0;
	for (file, result) in results.iter() {
		match result {
			Ok(report) => println!("Created {} ({} bytes)", report.path.display(), report.bytes),
			Err(e) => {
				eprintln!("Failed to create {}: {}", file, e);
				failed += 1;
			}
		}
	}

	println!();
	println!("These are minimal test files until real samples are recorded.");
	println!("GM mapping:");
	for voice in sfgen::synth::DrumVoice::ALL {
		println!("  note {} = {}", voice.midi_note(), voice.name());
	}

	if failed > 0 {
		eprintln!("{} of {} files failed.", failed, results.len());
		ExitCode::FAILURE
	} else {
		ExitCode::SUCCESS
	}
}
