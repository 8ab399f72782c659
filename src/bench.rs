//! Benchmarks weighted_rs by filling each selector with unit weights and timing fills and draws
use clap::Parser;
use serde::Serialize;
use std::time::Instant;
use weighted_rs::{LinearSelector, Selector, SelectorResult, Strategy, WeightedSelector};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Strategy to benchmark; both when omitted
    #[arg(short, long, value_enum)]
    strategy: Option<Strategy>,
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,
    #[arg(short('n'), long, default_value_t = 10000)]
    elements: usize,
    /// Draws per episode; twice the element count when omitted
    #[arg(short, long)]
    draws: Option<usize>,
    #[arg(short, long, default_value_t = 10)]
    episodes: usize,
    /// Write a JSON report
    #[arg(short, long)]
    report: bool,
    #[arg(long, default_value = None)]
    reports_folder: Option<String>,
}

#[derive(Debug, Serialize)]
struct EpisodeResult {
    strategy: Strategy,
    elements: usize,
    draws: usize,
    fill_seconds: f64,
    select_seconds: f64,
}

fn run_benchmark<S: Selector<usize> + Default>(
    strategy: Strategy,
    elements: usize,
    draws: usize,
) -> SelectorResult<EpisodeResult> {
    let mut selector = S::default();
    let start = Instant::now();
    for i in 0..elements {
        selector.insert(i, 1)?;
    }
    let fill_seconds = start.elapsed().as_secs_f64();

    let mut rng = rand::thread_rng();
    let mut checksum = 0usize;
    let start = Instant::now();
    for _ in 0..draws {
        checksum = checksum.wrapping_add(*selector.select_with(&mut rng)?);
    }
    let select_seconds = start.elapsed().as_secs_f64();
    std::hint::black_box(checksum);

    println!(
        "{:?}: {} inserts in {:.4} seconds, {} draws in {:.4} seconds ({:.2} draws per second)",
        strategy,
        elements,
        fill_seconds,
        draws,
        select_seconds,
        draws as f64 / select_seconds
    );
    Ok(EpisodeResult {
        strategy,
        elements,
        draws,
        fill_seconds,
        select_seconds,
    })
}

fn write_report(reports_folder: Option<String>, results: &[EpisodeResult]) {
    let reports_folder = reports_folder.unwrap_or_else(|| {
        format!(
            "reports/{}",
            chrono::Local::now().format("%Y-%m-%d_%H-%M-%S")
        )
    });
    if let Err(err) = std::fs::create_dir_all(&reports_folder) {
        eprintln!(
            "Failed to create reports folder {}: {}",
            reports_folder, err
        );
        std::process::exit(1);
    }
    let filename = format!("{}/bench.json", reports_folder);
    let written = serde_json::to_string_pretty(results)
        .map_err(|err| err.to_string())
        .and_then(|serialized| std::fs::write(&filename, serialized).map_err(|err| err.to_string()));
    match written {
        Ok(()) => println!("Report written to {}", filename),
        Err(err) => {
            eprintln!("Failed to write report {}: {}", filename, err);
            std::process::exit(1);
        }
    }
}

fn main() {
    let args = Args::parse();
    let draws = args.draws.unwrap_or(args.elements * 2);
    println!(
        "===\nElements: {}, Draws: {}, Episodes: {}",
        args.elements, draws, args.episodes
    );
    println!("---");
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let strategies = match args.strategy {
        Some(strategy) => vec![strategy],
        None => vec![Strategy::Tree, Strategy::Linear],
    };

    let mut results = vec![];
    for strategy in strategies.iter() {
        for episode in 0..args.episodes {
            log::debug!("Starting {:?} episode {}", strategy, episode);
            let result = match strategy {
                Strategy::Tree => {
                    run_benchmark::<WeightedSelector<usize>>(*strategy, args.elements, draws)
                }
                Strategy::Linear => {
                    run_benchmark::<LinearSelector<usize>>(*strategy, args.elements, draws)
                }
            };
            match result {
                Ok(result) => results.push(result),
                Err(err) => {
                    eprintln!("{:?} episode {} failed: {}", strategy, episode, err);
                    std::process::exit(1);
                }
            }
        }
    }

    println!("---");
    for strategy in strategies.iter() {
        let episodes: Vec<&EpisodeResult> = results
            .iter()
            .filter(|result| result.strategy == *strategy)
            .collect();
        let select_total: f64 = episodes.iter().map(|result| result.select_seconds).sum();
        let fill_total: f64 = episodes.iter().map(|result| result.fill_seconds).sum();
        println!(
            "{:?}: average fill {:.4} seconds, average draws per second {:.2}",
            strategy,
            fill_total / episodes.len() as f64,
            (episodes.len() * draws) as f64 / select_total
        );
    }

    if args.report {
        write_report(args.reports_folder, &results);
    }
}
