use std::error::Error;
use std::fs;
use std::io::{self, Read, Write};

use log::{debug, error, info, initialize_logger, o, warn};

use tablo_metadata::config::RecodeConfig;
use tablo_metadata::recording::Recording;

/// Reads a recording document, decodes it and writes it back out in the
/// service's canonical form.
fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();

    let config = RecodeConfig::from_env()?;
    let logger = initialize_logger(config.log_level);

    let source = match &config.input {
        Some(path) => path.display().to_string(),
        None => "stdin".to_owned(),
    };
    let logger = logger.new(o!("source" => source));

    info!(logger, "Reading recording..."; "policy" => format!("{:?}", config.policy));
    let text = read_input(&config)?;

    debug!(logger, "Decoding recording..."; "bytes" => text.len());
    let recording = Recording::decode(&text).map_err(|e| {
        error!(logger, "failed to decode"; "error" => format!("{:?}", e));
        e
    })?;

    for (slot, details) in recording.slots() {
        debug!(logger, "Found listing"; "slot" => slot.key(), "type" => &details.kind, "object_id" => details.object_id);
    }

    debug!(logger, "Encoding recording...");
    let encoded = recording.prepare(config.policy).map_err(|e| {
        error!(logger, "failed to encode"; "error" => format!("{:?}", e));
        e
    })?;

    for (slot, e) in encoded.skipped() {
        warn!(logger, "Skipped listing"; "slot" => slot.key(), "error" => format!("{}", e));
    }

    let output = if config.pretty {
        encoded.to_string_pretty()?
    } else {
        encoded.to_string()?
    };

    let stdout = io::stdout();
    writeln!(stdout.lock(), "{}", output)?;

    info!(logger, "Wrote recording"; "listings" => encoded.slots().count(), "skipped" => encoded.skipped().len());

    Ok(())
}

fn read_input(config: &RecodeConfig) -> io::Result<String> {
    match &config.input {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}
