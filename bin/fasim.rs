use std::{io::IsTerminal, path::PathBuf, process::ExitCode};

use automata_sim::prelude::*;

use tracing::{debug, error, info, trace};
use tracing_subscriber::{filter, prelude::*};

use clap::{value_parser, Arg, ArgMatches, Command};

fn kind_arg() -> Arg {
    Arg::new("kind")
        .short('k')
        .long("kind")
        .value_parser(["dfa", "nfa"])
        .default_value("dfa")
        .help("how the configurations are interpreted")
}

fn cli() -> clap::Command {
    Command::new("fasim")
    .about("Finite automata simulation")
    .subcommand_required(true)
    .arg(
        Arg::new("verbosity")
        .short('v')
        .long("verbosity")
        .num_args(0..=1)
        .require_equals(true)
        .value_parser(["info", "debug", "trace"])
        .default_missing_value("info")
    )
    .subcommand(
        Command::new("run")
        .about("builds an automaton for every configuration in a directory and tests each word of a word list against it")
        .arg(kind_arg())
        .arg(
            Arg::new("configs")
            .short('c')
            .long("configs")
            .required(true)
            .value_parser(value_parser!(PathBuf))
            .help("directory containing the configuration files")
        )
        .arg(
            Arg::new("words")
            .short('w')
            .long("words")
            .required(true)
            .value_parser(value_parser!(PathBuf))
            .help("file with one word per line")
        )
    )
    .subcommand(
        Command::new("check")
        .about("builds a single configuration and reports whether it is well-formed")
        .arg(kind_arg())
        .arg(
            Arg::new("file")
            .required(true)
            .value_parser(value_parser!(PathBuf))
        )
    )
}

fn setup_logging(matches: &ArgMatches) {
    let level = match matches
        .try_get_one::<String>("verbosity")
        .ok()
        .flatten()
        .map(|m| m.as_str())
    {
        Some("trace") => filter::LevelFilter::TRACE,
        Some("debug") => filter::LevelFilter::DEBUG,
        Some("info") => filter::LevelFilter::INFO,
        _ => filter::LevelFilter::INFO,
    };

    let stderr_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(stderr_log.with_filter(level))
        .init();

    trace!("setup {level} logging");
}

fn kind(matches: &ArgMatches) -> Kind {
    matches
        .get_one::<String>("kind")
        .and_then(|kind| kind.parse().ok())
        .unwrap_or_default()
}

fn summarize<S: FiniteSemantics>(automaton: &Automaton<S>) {
    println!(
        "{} with {} states, {} transitions over {}",
        automaton.kind(),
        automaton.size(),
        automaton.transition_count(),
        automaton.alphabet()
    );
    for skipped in automaton.skipped() {
        println!("warning: {skipped}");
    }
}

fn check(file: PathBuf, kind: Kind) -> Result<(), ConfigError> {
    debug!("checking {} as {kind}", file.display());
    match kind {
        Kind::Dfa => summarize(&DFA::from_path(&file)?),
        Kind::Nfa => summarize(&NFA::from_path(&file)?),
    }
    Ok(())
}

fn run(config: BatchConfig) -> Result<bool, ConfigError> {
    let batch = Batch::new(config)?;
    let start = std::time::Instant::now();
    let report = batch.run();
    info!(
        "processed {} configurations in {}µs",
        report.files.len(),
        start.elapsed().as_micros()
    );

    let stdout = std::io::stdout();
    let colored = stdout.is_terminal();
    if let Err(err) = report.write_to(stdout.lock(), colored) {
        error!("could not write report: {err}");
        return Ok(false);
    }
    let clean = report.failures().next().is_none();
    Ok(clean)
}

pub fn main() -> ExitCode {
    let matches = cli().get_matches();

    setup_logging(&matches);

    let outcome = match matches.subcommand() {
        Some(("run", sub_matches)) => {
            let config = BatchConfig {
                kind: kind(sub_matches),
                config_dir: sub_matches
                    .get_one::<PathBuf>("configs")
                    .cloned()
                    .unwrap_or_default(),
                words: sub_matches
                    .get_one::<PathBuf>("words")
                    .cloned()
                    .unwrap_or_default(),
            };
            run(config)
        }
        Some(("check", sub_matches)) => {
            let file = sub_matches
                .get_one::<PathBuf>("file")
                .cloned()
                .unwrap_or_default();
            check(file, kind(sub_matches)).map(|()| true)
        }
        _ => unreachable!(),
    };

    match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("Configuration error: {err}");
            if let Some(line) = err.line() {
                eprintln!("Issue at: {line}");
            }
            ExitCode::FAILURE
        }
    }
}
