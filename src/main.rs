//! `sort` command line front end
//!
//! Parses flags into a [`SortConfig`] and hands it to the library.

use clap::{Arg, ArgAction, Command};
use std::process;

use line_sort::{
    config::{CheckDirection, SortConfig, SortConfigBuilder},
    error::SortResult,
    logging, sort,
};

fn main() {
    let result = run();
    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("sort: {}", e);
            process::exit(e.exit_code());
        }
    }
}

fn run() -> SortResult<i32> {
    let matches = build_cli().get_matches();

    let config = parse_config_from_matches(&matches)?;

    if let Err(e) = logging::init_tracing(config.debug) {
        eprintln!("sort: logging disabled: {e}");
    }

    sort(&config)
}

fn build_cli() -> Command {
    Command::new("sort")
        .version(env!("CARGO_PKG_VERSION"))
        .override_usage("sort [OPTION]... [FILE]...")
        .about("Sort lines of text files")
        .long_about("Sort lines of text files by the whole line or one column, as text, integers, month names or human-readable sizes.\n\nWith no FILE, or when FILE is -, read standard input.")
        .disable_help_flag(true) // We use -h for human-numeric-sort
        .disable_version_flag(true)

        // Input files
        .arg(Arg::new("files")
            .help("Input files to sort (use '-' or omit for stdin)")
            .num_args(0..)
            .value_name("FILE"))

        // Key selection
        .arg(Arg::new("key")
            .short('k')
            .long("key")
            .help("Sort by whitespace-separated column N (1-based); 0 or less means the whole line")
            .value_name("N")
            .allow_negative_numbers(true)
            .value_parser(clap::value_parser!(i64)))

        // Comparison modes
        .arg(Arg::new("numeric-sort")
            .short('n')
            .long("numeric-sort")
            .help("Compare according to integer value")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("human-numeric-sort")
            .short('h')
            .long("human-numeric-sort")
            .help("Compare human readable numbers (e.g., 2K 1G)")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("month-sort")
            .short('M')
            .long("month-sort")
            .help("Compare by month abbreviation (Jan < ... < Dec)")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("ignore-blanks")
            .short('b')
            .long("ignore-blanks")
            .help("Ignore leading and trailing blanks in the key")
            .action(ArgAction::SetTrue))

        // Sort modifiers
        .arg(Arg::new("reverse")
            .short('r')
            .long("reverse")
            .help("Reverse the result of comparisons")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("unique")
            .short('u')
            .long("unique")
            .help("Suppress lines that appear more than once")
            .action(ArgAction::SetTrue))

        // Check mode
        .arg(Arg::new("check")
            .short('c')
            .long("check")
            .help("Check for sorted input; fail on the first disorder")
            .action(ArgAction::SetTrue))
        .arg(Arg::new("check-direction")
            .long("check-direction")
            .help("Order enforced by --check: 'follow' honours -r, 'ascending' ignores it")
            .value_name("DIR")
            .value_parser(["follow", "ascending"])
            .default_value("follow"))

        // Output
        .arg(Arg::new("output")
            .short('o')
            .long("output")
            .help("Write result to FILE instead of standard output")
            .value_name("FILE"))

        .arg(Arg::new("debug")
            .long("debug")
            .help("Log key pipeline and progress details to stderr")
            .action(ArgAction::SetTrue))

        // Add explicit help and version options since we disabled the automatic ones
        .arg(Arg::new("help")
            .long("help")
            .help("Display this help and exit")
            .action(ArgAction::Help))
        .arg(Arg::new("version")
            .long("version")
            .help("Output version information and exit")
            .action(ArgAction::Version))
}

/// Parse configuration from command line matches
fn parse_config_from_matches(matches: &clap::ArgMatches) -> SortResult<SortConfig> {
    let mut builder = SortConfigBuilder::new();

    if let Some(&key) = matches.get_one::<i64>("key") {
        builder = builder.key(key);
    }

    // Apply boolean flags
    if matches.get_flag("numeric-sort") {
        builder = builder.numeric();
    }
    if matches.get_flag("human-numeric-sort") {
        builder = builder.numeric_suffix();
    }
    if matches.get_flag("month-sort") {
        builder = builder.by_month();
    }
    if matches.get_flag("ignore-blanks") {
        builder = builder.ignore_blanks();
    }
    if matches.get_flag("reverse") {
        builder = builder.reverse();
    }
    if matches.get_flag("unique") {
        builder = builder.unique();
    }
    if matches.get_flag("check") {
        builder = builder.check();
    }
    if matches.get_flag("debug") {
        builder = builder.debug();
    }

    if let Some(direction) = matches.get_one::<String>("check-direction") {
        builder = builder.check_direction(direction.parse::<CheckDirection>()?);
    }

    if let Some(output) = matches.get_one::<String>("output") {
        builder = builder.output_file(output.clone());
    }

    for file in matches.get_many::<String>("files").unwrap_or_default() {
        builder = builder.input_file(file.clone());
    }

    builder.build()
}
