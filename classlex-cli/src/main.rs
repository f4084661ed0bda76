//! Command-line interface for classlex
//! Scans class strings from the shell, mostly for debugging editor integrations.
//!
//! Usage:
//!   classlex scan `<text>` [--cursor `<n>`] [--hover] [--lazy] [--format json|text]
//!   classlex check `<file>`                 - Report problems, exit status 1 if any
//!   classlex tokens `<text>`                - Print semantic spans
//!   classlex list-options                 - Print the default configuration
//!
//! Set `CLASSLEX_LOG` (e.g. `CLASSLEX_LOG=debug`) to see scanner logs on stderr.

mod render;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use classlex::{ScanOptions, Scanner};
use classlex_analysis::{collect_diagnostics, collect_semantic_tokens, LineIndex};
use classlex_config::{ClasslexConfig, Loader};
use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();

    let matches = Command::new("classlex")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect utility class strings the way editor features see them")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("scan")
                .about("Scan a class string and resolve a cursor")
                .arg(text_arg())
                .arg(
                    Arg::new("cursor")
                        .long("cursor")
                        .help("Byte offset of the cursor")
                        .value_parser(value_parser!(usize)),
                )
                .arg(
                    Arg::new("hover")
                        .long("hover")
                        .help("Resolve the cursor like a pointer hover")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("lazy")
                        .long("lazy")
                        .help("Stop scanning once the cursor is resolved")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("brackets")
                        .long("brackets")
                        .help("Recognize groups such as `hover:(a b)`")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("important")
                        .long("important")
                        .help("Recognize a trailing important marker")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("separator")
                        .long("separator")
                        .short('s')
                        .help("Variant separator"),
                )
                .arg(config_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format")
                        .value_parser(["text", "json"])
                        .default_value("text"),
                ),
        )
        .subcommand(
            Command::new("check")
                .about("Report problems in a file of class strings")
                .arg(
                    Arg::new("path")
                        .help("File to check")
                        .required(true)
                        .index(1),
                )
                .arg(config_arg()),
        )
        .subcommand(
            Command::new("tokens")
                .about("Print the semantic spans of a class string")
                .arg(text_arg())
                .arg(config_arg()),
        )
        .subcommand(Command::new("list-options").about("Print the default configuration"))
        .get_matches();

    match matches.subcommand() {
        Some(("scan", args)) => handle_scan_command(args),
        Some(("check", args)) => handle_check_command(args),
        Some(("tokens", args)) => handle_tokens_command(args),
        Some(("list-options", _)) => print!("{}", classlex_config::default_toml()),
        _ => unreachable!("clap requires a subcommand"),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("CLASSLEX_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn text_arg() -> Arg {
    Arg::new("text")
        .help("Class string to scan")
        .required(true)
        .index(1)
}

fn config_arg() -> Arg {
    Arg::new("config")
        .long("config")
        .short('c')
        .help("Configuration file layered over the defaults")
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}

fn load_config(args: &ArgMatches) -> ClasslexConfig {
    let mut loader = Loader::new();
    if let Some(path) = args.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    loader
        .build()
        .unwrap_or_else(|e| fail(format!("could not load configuration: {}", e)))
}

fn scan_options(config: &ClasslexConfig) -> ScanOptions {
    config.scan_options().unwrap_or_else(|e| fail(e))
}

fn scanner(options: ScanOptions) -> Scanner {
    Scanner::new(options).unwrap_or_else(|e| fail(e))
}

/// Handle the scan command
fn handle_scan_command(args: &ArgMatches) {
    let mut options = scan_options(&load_config(args));
    if args.get_flag("brackets") {
        options = options.brackets(true);
    }
    if args.get_flag("important") {
        options = options.important(true);
    }
    if let Some(separator) = args.get_one::<String>("separator") {
        options = options.separator(separator.clone());
    }
    options = options
        .hover(args.get_flag("hover"))
        .greedy(!args.get_flag("lazy"));

    let text = args
        .get_one::<String>("text")
        .expect("text is a required argument");
    let cursor = args.get_one::<usize>("cursor").copied();
    let result = scanner(options).scan_all(text, cursor);

    let format = args
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("text");
    let output = match format {
        "json" => serde_json::to_string_pretty(&result)
            .unwrap_or_else(|e| fail(format!("could not serialize scan: {}", e))),
        _ => render::scan_text(&result),
    };
    println!("{}", output);
}

/// Handle the check command
fn handle_check_command(args: &ArgMatches) {
    let config = load_config(args);
    let scanner = scanner(scan_options(&config));
    let path = args
        .get_one::<String>("path")
        .expect("path is a required argument");
    let text = std::fs::read_to_string(path)
        .unwrap_or_else(|e| fail(format!("could not read {}: {}", path, e)));

    let diagnostics = collect_diagnostics(&scanner, &text, 0..text.len(), &config.diagnostics);
    let index = LineIndex::new(&text);
    for diagnostic in &diagnostics {
        println!("{}", render::diagnostic_line(diagnostic, &index));
    }
    if !diagnostics.is_empty() {
        std::process::exit(1);
    }
}

/// Handle the tokens command
fn handle_tokens_command(args: &ArgMatches) {
    let scanner = scanner(scan_options(&load_config(args)));
    let text = args
        .get_one::<String>("text")
        .expect("text is a required argument");
    for token in collect_semantic_tokens(&scanner, text, 0..text.len()) {
        println!("{}", render::semantic_line(&token, text));
    }
}
