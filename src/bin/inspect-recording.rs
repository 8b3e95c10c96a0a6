use std::error::Error;
use std::fs;
use std::path::PathBuf;

use log::{debug, info, initialize_logger, o, Level};
use structopt::StructOpt;

use tablo_metadata::config::{get_variable, LOG_LEVEL};
use tablo_metadata::recording::Recording;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "inspect-recording",
    about = "Print the listings found in recording documents"
)]
struct Opt {
    /// The recording documents to inspect
    #[structopt(parse(from_os_str), required = true)]
    paths: Vec<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();

    let opt = Opt::from_args();

    let level = get_variable(LOG_LEVEL)
        .and_then(|name| log::parse_level(&name))
        .unwrap_or(Level::Info);
    let logger = initialize_logger(level);

    info!(logger, "Inspecting {} documents...", opt.paths.len());

    for path in &opt.paths {
        let logger = logger.new(o!("path" => path.display().to_string()));

        debug!(logger, "Reading document...");
        let text = fs::read_to_string(path)?;
        let recording = Recording::decode(&text)?;

        println!("{}:", path.display());

        if recording.is_empty() {
            println!("  (no listings)");
            continue;
        }

        for (slot, details) in recording.slots() {
            println!(
                "  {:<15} {:<15} id={:<8} title={:?} air_date={}",
                slot.key(),
                details.kind,
                details
                    .object_id
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| "-".to_owned()),
                details.title.as_deref().unwrap_or(""),
                details
                    .air_date
                    .map(|date| date.to_string())
                    .unwrap_or_else(|| "-".to_owned()),
            );
        }
    }

    Ok(())
}
