use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the command tree in src/main.rs
// Build scripts can't access src/ modules, so the shape is repeated here.
const FORMATS: &[&str] = &["html", "json", "markdown", "treeviz"];

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("slipmark")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Markdown autoformatting and document tree conversion")
        .arg_required_else_help(true)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats")
                .action(ArgAction::SetTrue),
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
                .about("Convert a document tree to another format")
                .arg(
                    Arg::new("input")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(Arg::new("from").long("from").value_parser(["json"]))
                .arg(
                    Arg::new("to")
                        .long("to")
                        .value_parser(clap::builder::PossibleValuesParser::new(FORMATS)),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("replay")
                .about("Type a key script into a document and print the result")
                .arg(
                    Arg::new("input")
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(Arg::new("keys").long("keys").short('k').required(true))
                .arg(
                    Arg::new("to")
                        .long("to")
                        .value_parser(clap::builder::PossibleValuesParser::new(FORMATS)),
                ),
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "slipmark", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "slipmark", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "slipmark", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
