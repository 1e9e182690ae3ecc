// Command-line interface for slipmark
//
// The slipmark program works on stored document trees (the JSON encoding an
// editor persists). It converts them to the export formats and replays key
// scripts through the autoformat engine, which is how shortcuts are tried out
// and debugged without an editing surface.
//
// Usage:
//  slipmark convert <input.json> [--to <format>] [-o <file>]   - Convert a stored document
//  slipmark replay [<input.json>] --keys <script> [--to <fmt>] - Type keys, print the result
//  slipmark --list-formats                                     - List available formats
//
// Extra Parameters:
//
// Format-specific parameters can be passed using --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix and passes the parameters to the format.
// Example:
//  slipmark convert doc.json --to html --extra-fragment

mod replay;

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use slipmark_config::{Loader, SlipmarkConfig};
use slipmark_core::model::Document;
use slipmark_core::FormatRegistry;
use std::collections::HashMap;
use std::fs;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        if let Some(key) = arg.strip_prefix("--extra-") {
            let has_value = args.get(i + 1).is_some_and(|next| !next.starts_with('-'));
            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn build_cli() -> Command {
    Command::new("slipmark")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Markdown autoformatting and document tree conversion")
        .long_about(
            "slipmark works with the document trees of a rich-text editor.\n\n\
            Commands:\n  \
            - convert: Export a stored document (JSON) to markdown, HTML or a tree view\n  \
            - replay:  Type a key script through the autoformat engine\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass format-specific options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            slipmark convert doc.json --to markdown            # Markdown to stdout\n  \
            slipmark convert doc.json -o doc.html              # Format from the extension\n  \
            slipmark replay --keys '# Title{enter}**bold**'    # Try shortcuts on an empty doc",
        )
        .arg_required_else_help(true)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a slipmark.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log autoformat decisions (repeat for more detail)")
                .action(ArgAction::Count)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert a stored document to another format")
                .long_about(
                    "Convert a stored document tree to an export format.\n\n\
                    Supported formats:\n  \
                    - markdown: Markdown text (.md)\n  \
                    - html:     HTML markup (.html)\n  \
                    - json:     The tree itself, pretty printed (.json)\n  \
                    - treeviz:  Visual tree dump (.tree)\n\n\
                    The target format comes from --to, then from the output file\n\
                    extension, then from the configured default.",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("replay")
                .about("Type a key script into a document and print the result")
                .long_about(
                    "Replay keystrokes through the autoformat engine.\n\n\
                    Plain characters type themselves, a space is the space key and a\n\
                    newline is Enter. Braces name special keys: {enter}, {backspace}\n\
                    (or {bs}), {space}, {shift+X}. {{ and }} type literal braces.\n\n\
                    Without an input file the keys are typed into an empty document.",
                )
                .arg(
                    Arg::new("input")
                        .help("Stored document to start from")
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("keys")
                        .long("keys")
                        .short('k')
                        .help("Key script to type")
                        .required(true),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Output format (defaults to the configured default)")
                        .value_hint(ValueHint::Other),
                ),
        )
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    // Parse extra-* arguments before clap processing
    let (cleaned_args, extra_params) = parse_extra_args(&args);

    let matches = build_cli()
        .try_get_matches_from(&cleaned_args)
        .unwrap_or_else(|e| e.exit());

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    let config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    init_logging(matches.get_count("verbose"), &config);

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            handle_convert_command(sub_matches, &extra_params, &config);
        }
        Some(("replay", sub_matches)) => {
            let input = sub_matches.get_one::<String>("input").map(|s| s.as_str());
            let keys = sub_matches
                .get_one::<String>("keys")
                .expect("keys is required");
            let to = sub_matches
                .get_one::<String>("to")
                .map(|s| s.as_str())
                .unwrap_or(&config.convert.default_format);
            let doc = replay::run(input.map(read_document), keys, &config).unwrap_or_else(|e| {
                eprintln!("Replay error: {e}");
                std::process::exit(1);
            });
            print!("{}", serialize(&doc, to, &extra_params, &config));
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Handle the convert command
fn handle_convert_command(
    matches: &ArgMatches,
    extra_params: &HashMap<String, String>,
    config: &SlipmarkConfig,
) {
    let registry = FormatRegistry::default();
    let input = matches
        .get_one::<String>("input")
        .expect("input is required");
    let output = matches.get_one::<String>("output").map(|s| s.as_str());

    let from = match matches.get_one::<String>("from") {
        Some(from) => from.clone(),
        None => registry
            .detect_format_from_filename(input)
            .unwrap_or_else(|| "json".to_string()),
    };
    let to = match matches.get_one::<String>("to") {
        Some(to) => to.clone(),
        None => output
            .and_then(|path| registry.detect_format_from_filename(path))
            .unwrap_or_else(|| config.convert.default_format.clone()),
    };
    debug!(%from, %to, "converting {input}");

    let source = read_source(input);
    let doc = registry.parse(&source, &from).unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    });

    let result = serialize(&doc, &to, extra_params, config);
    match output {
        Some(path) => fs::write(path, result).unwrap_or_else(|e| {
            eprintln!("Error writing file '{path}': {e}");
            std::process::exit(1);
        }),
        None => print!("{result}"),
    }
}

/// Serialize with the configured format options, overridden by --extra-*.
fn serialize(
    doc: &Document,
    to: &str,
    extra_params: &HashMap<String, String>,
    config: &SlipmarkConfig,
) -> String {
    let registry = FormatRegistry::default();
    if let Err(e) = registry.get(to) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let mut format_options = config.convert.format_options(to);
    for (key, value) in extra_params {
        format_options.insert(key.clone(), value.clone());
    }
    registry
        .serialize_with_options(doc, to, &format_options)
        .unwrap_or_else(|e| {
            eprintln!("Serialization error: {e}");
            std::process::exit(1);
        })
}

fn read_source(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    })
}

fn read_document(path: &str) -> Document {
    let registry = FormatRegistry::default();
    registry.parse(&read_source(path), "json").unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    })
}

fn handle_list_formats_command() {
    let registry = FormatRegistry::default();
    println!("Available formats:\n");
    for name in registry.list_formats() {
        if let Ok(format) = registry.get(&name) {
            let mut modes = Vec::new();
            if format.supports_parsing() {
                modes.push("parse");
            }
            if format.supports_serialization() {
                modes.push("serialize");
            }
            println!(
                "  {:<10} {} [{}] (.{})",
                name,
                format.description(),
                modes.join(", "),
                format.file_extensions().join(", .")
            );
        }
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> SlipmarkConfig {
    let loader = Loader::new().with_optional_file("slipmark.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

/// Logs go to stderr so they never mix with converted output.
fn init_logging(verbosity: u8, config: &SlipmarkConfig) {
    let level = match verbosity {
        0 => config.logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    let filter = if verbosity > 0 {
        EnvFilter::new(level)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
