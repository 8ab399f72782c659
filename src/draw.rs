//! Draws from a weighted collection described by a settings file
use clap::Parser;
use env_logger::fmt::Formatter;
use log::Record;
use serde::Deserialize;
use std::io::Write;
use std::{fs, thread};
use weighted_rs::{
    LinearSelector, Selector, SelectorResult, Strategy, Tally, WeightedSelector,
};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg()]
    config_file: String,
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,
}

#[derive(Debug, Deserialize)]
struct DrawSettings {
    strategy: Strategy,
    draws: u64,
    entries: Vec<EntrySettings>,
    /// Items removed after the entries are inserted, before drawing
    #[serde(default)]
    remove: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
struct EntrySettings {
    item: String,
    weight: u32,
}

fn run_draws<S: Selector<String>>(
    selector: SelectorResult<S>,
    settings: &DrawSettings,
) -> SelectorResult<Tally<String>> {
    let mut selector = selector?;
    for item in settings.remove.iter() {
        if !selector.remove(item) {
            log::warn!("Nothing to remove for {}", item);
        }
    }
    let remaining: Vec<(String, u32)> = settings
        .entries
        .iter()
        .filter(|entry| !settings.remove.contains(&entry.item))
        .map(|entry| (entry.item.clone(), entry.weight))
        .collect();
    log::info!(
        "{} entries, total probability {}",
        selector.len(),
        selector.total_probability()
    );

    let mut tally = Tally::new(&remaining);
    tally.draw_from(&selector, settings.draws, &mut rand::thread_rng())?;
    Ok(tally)
}

fn main() {
    let args = Args::parse();
    env_logger::Builder::new()
        .format(|buf: &mut Formatter, record: &Record| {
            let thread_id = thread::current().id();
            let timestamp = buf.timestamp_millis();
            writeln!(
                buf,
                "[{}] [Thread: {:?}] [{}] - {}",
                timestamp,
                thread_id,
                record.level(),
                record.args()
            )
        })
        .filter_level(args.verbose.log_level_filter())
        .init();

    let settings: DrawSettings = match fs::read_to_string(&args.config_file)
        .map_err(|err| err.to_string())
        .and_then(|config| serde_json::from_str(&config).map_err(|err| err.to_string()))
    {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("Failed to load config file {}: {}", args.config_file, err);
            std::process::exit(1);
        }
    };

    let entries = settings
        .entries
        .iter()
        .map(|entry| (entry.item.clone(), entry.weight));
    let result = match settings.strategy {
        Strategy::Tree => run_draws(WeightedSelector::try_from_iter(entries), &settings),
        Strategy::Linear => run_draws(LinearSelector::try_from_iter(entries), &settings),
    };

    match result {
        Ok(tally) => print!("{}", tally),
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    }
}
