//! Draws repeatedly from a small weighted collection and compares the result to the weights
use clap::Parser;
use std::time::Instant;
use weighted_rs::{
    LinearSelector, Selector, SelectorResult, Strategy, Tally, WeightedSelector,
};

fn parse_entry(s: &str) -> Result<(String, u32), String> {
    let (name, weight) = s
        .rsplit_once(':')
        .ok_or_else(|| format!("Expected NAME:WEIGHT, got '{}'", s))?;
    let weight = weight
        .parse::<u32>()
        .map_err(|err| format!("Invalid weight in '{}': {}", s, err))?;
    Ok((name.to_string(), weight))
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Entries as NAME:WEIGHT
    #[arg(
        short,
        long,
        value_delimiter = ',',
        value_parser = parse_entry,
        default_values = ["A:50", "B:25", "C:10"]
    )]
    entries: Vec<(String, u32)>,
    #[arg(short, long, default_value_t = 100000)]
    draws: u64,
    #[arg(short, long, value_enum, default_value_t = Strategy::Tree)]
    strategy: Strategy,
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,
}

fn run_demo<S: Selector<String>>(
    selector: SelectorResult<S>,
    entries: &[(String, u32)],
    draws: u64,
) -> SelectorResult<Tally<String>> {
    let selector = selector?;
    let mut tally = Tally::new(entries);
    let start = Instant::now();
    tally.draw_from(&selector, draws, &mut rand::thread_rng())?;
    log::info!("{} draws in {:.2?}", draws, start.elapsed());
    Ok(tally)
}

fn main() {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let result = match args.strategy {
        Strategy::Tree => run_demo(
            WeightedSelector::try_from_iter(args.entries.clone()),
            &args.entries,
            args.draws,
        ),
        Strategy::Linear => run_demo(
            LinearSelector::try_from_iter(args.entries.clone()),
            &args.entries,
            args.draws,
        ),
    };

    match result {
        Ok(tally) => {
            println!("===\nStrategy: {:?}, Draws: {}", args.strategy, args.draws);
            println!("---");
            print!("{}", tally);
            println!("---");
            println!("Largest deviation: {:.3}%", tally.max_deviation());
        }
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    }
}
