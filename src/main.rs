use std::env;
use std::fs;
use std::process;

use log::{LevelFilter, Log, Metadata, Record};
use songtext::{export, export_text, Songbook};

const USAGE: &str = "Usage: songtext [options] <songbook.yaml> [output]

Options:
  --no-chords         leave chord lines and chord sequences out
  --no-translation    leave translations out
  --only-with-chords  export only songs with at least one chord line
  --text              write plain text instead of XML
  --verbose           log progress to stderr";

/// Writes log records to stderr.
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn usage_error(message: &str) -> ! {
    eprintln!("{}", message);
    eprintln!("{}", USAGE);
    process::exit(1);
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    let mut no_chords = false;
    let mut no_translation = false;
    let mut only_with_chords = false;
    let mut text = false;
    let mut verbose = false;
    let mut paths: Vec<&String> = Vec::new();

    // Parse flags
    for arg in &args {
        match arg.as_str() {
            "--no-chords" => no_chords = true,
            "--no-translation" => no_translation = true,
            "--only-with-chords" => only_with_chords = true,
            "--text" => text = true,
            "--verbose" => verbose = true,
            "-h" | "--help" => {
                println!("{}", USAGE);
                return;
            }
            flag if flag.starts_with("--") => usage_error(&format!("Unknown option '{}'", flag)),
            _ => paths.push(arg),
        }
    }

    let (input_path, output_path) = match paths.as_slice() {
        [input] => (*input, None),
        [input, output] => (*input, Some(*output)),
        _ => usage_error("Expected a songbook file and an optional output file"),
    };

    if verbose && log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Debug);
    }

    // Read songbook
    let source = match fs::read_to_string(input_path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", input_path, e);
            process::exit(1);
        }
    };

    let mut songbook = match Songbook::from_yaml(&source) {
        Ok(songbook) => songbook,
        Err(e) => {
            eprintln!("Error in '{}': {}", input_path, e);
            process::exit(1);
        }
    };

    // Command line flags override the songbook's settings
    if no_chords {
        songbook.export.show_chords = false;
    }
    if no_translation {
        songbook.export.show_translation = false;
    }
    if only_with_chords {
        songbook.export.only_songs_with_chords = true;
    }
    log::debug!("{} songs, {:?}", songbook.songs.len(), songbook.export);

    // Export
    let result = if text {
        export_text(&songbook.export, &songbook.songs).map(String::into_bytes)
    } else {
        export(&songbook.export, &songbook.songs)
    };

    let output = match result {
        Ok(output) => output,
        Err(e) => {
            eprintln!("Export error: {}", e);
            process::exit(1);
        }
    };

    // Output
    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(path, &output) {
                eprintln!("Error writing to '{}': {}", path, e);
                process::exit(1);
            }
            eprintln!("Wrote songbook to {}", path);
        }
        None => {
            println!("{}", String::from_utf8_lossy(&output));
        }
    }
}
