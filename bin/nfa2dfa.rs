use std::{path::PathBuf, process::ExitCode};

use powerset::prelude::*;

use thiserror::Error;
use tracing::{debug, info, trace};
use tracing_subscriber::{filter, prelude::*};

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

fn cli() -> clap::Command {
    Command::new("nfa2dfa")
    .about("Reads a finite automaton from a file and converts it into an equivalent deterministic one")
    .arg(
        Arg::new("path")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("file containing the description of the automaton")
    )
    .arg(
        Arg::new("verbosity")
        .short('v')
        .long("verbosity")
        .num_args(0..=1)
        .require_equals(true)
        .value_parser(["info", "debug", "trace"])
        .default_missing_value("info")
    )
    .arg(
        Arg::new("table")
        .short('t')
        .long("table")
        .action(ArgAction::SetTrue)
        .help("additionally print the transition tables")
    )
    .arg(
        Arg::new("quiet")
        .short('q')
        .long("quiet")
        .action(ArgAction::SetTrue)
        .help("only print the converted automaton")
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
        _ => filter::LevelFilter::WARN,
    };

    let stderr_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(stderr_log.with_filter(level))
        .init();

    trace!("setup {level} logging");
}

#[derive(Debug, Error)]
enum Failure {
    #[error("could not read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to process {}: {source}", .path.display())]
    Parse { path: PathBuf, source: ParseError },
    #[error("failed to convert the automaton: {0}")]
    Convert(#[from] ConversionError),
}

fn show(title: &str, aut: &Automaton, table: bool) {
    println!("{title}:");
    print!("{aut}");
    if table {
        println!("{}", aut.transition_table());
    }
}

fn process(matches: &ArgMatches) -> Result<(), Failure> {
    let Some(path) = matches.get_one::<PathBuf>("path") else {
        unreachable!("clap enforces the presence of the path argument");
    };
    let table = matches.get_flag("table");
    let quiet = matches.get_flag("quiet");

    debug!("reading automaton from {}", path.display());
    let input = std::fs::read_to_string(path).map_err(|source| Failure::Read {
        path: path.clone(),
        source,
    })?;
    let nfa = parse_automaton(&input).map_err(|source| Failure::Parse {
        path: path.clone(),
        source,
    })?;
    if !quiet {
        show("Input FA", &nfa, table);
    }

    let start = std::time::Instant::now();
    let dfa = nfa.determinize()?;
    info!(
        "conversion of {} states into {} states took {}µs",
        nfa.size(),
        dfa.size(),
        start.elapsed().as_micros()
    );

    if quiet {
        print!("{dfa}");
    } else {
        show("Output FA", &dfa, table);
    }
    Ok(())
}

/// Malformed input is reported through a failing exit status, just like an unreadable file.
fn exit_status(outcome: &Result<(), Failure>) -> u8 {
    match outcome {
        Ok(()) => 0,
        Err(_) => 1,
    }
}

pub fn main() -> ExitCode {
    let matches = cli().get_matches();

    setup_logging(&matches);

    let outcome = process(&matches);
    if let Err(failure) = &outcome {
        eprintln!("nfa2dfa: {failure}");
    }
    ExitCode::from(exit_status(&outcome))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn run(path: &std::path::Path) -> Result<(), Failure> {
        let matches = cli()
            .try_get_matches_from([
                std::ffi::OsStr::new("nfa2dfa"),
                std::ffi::OsStr::new("--quiet"),
                path.as_os_str(),
            ])
            .unwrap();
        process(&matches)
    }

    fn file_with(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn valid_input_succeeds() {
        let file = file_with("1 2 0 1 1\n0 a 0\n0 a 1\n");
        let outcome = run(file.path());
        assert!(outcome.is_ok());
        assert_eq!(exit_status(&outcome), 0);
    }

    #[test]
    fn malformed_input_fails() {
        let file = file_with("2 2 0 0 0 c 1");
        let outcome = run(file.path());
        assert!(matches!(
            outcome,
            Err(Failure::Parse {
                source: ParseError::InvalidSymbol(_),
                ..
            })
        ));
        assert_eq!(exit_status(&outcome), 1);

        let file = file_with(&format!("1 {} 0 0", usize::MAX / 2));
        let outcome = run(file.path());
        assert!(matches!(
            outcome,
            Err(Failure::Parse {
                source: ParseError::ResourceExhausted(_),
                ..
            })
        ));
        assert_eq!(exit_status(&outcome), 1);
    }

    #[test]
    fn missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = run(&dir.path().join("missing.txt"));
        assert!(matches!(outcome, Err(Failure::Read { .. })));
        assert_eq!(exit_status(&outcome), 1);
    }

    #[test]
    fn usage_errors_are_reported_by_clap() {
        let error = cli().try_get_matches_from(["nfa2dfa"]).unwrap_err();
        assert_eq!(error.exit_code(), 2);
        assert!(cli()
            .try_get_matches_from(["nfa2dfa", "--verbosity=loud", "file"])
            .is_err());
    }
}
