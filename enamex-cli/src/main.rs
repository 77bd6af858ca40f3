//! Command-line interface for enamex
//! Converts tagged-token corpora (legacy TSV or four-column CoNLL) into ENAMEX markup.
//!
//! Usage:
//!   enamex legacy `<input>` `<output>` [--format `<format>`] [--config `<file>`]
//!   enamex conll `<input>` `<output>` [--format `<format>`] [--config `<file>`]
//!   enamex --list-formats                                 - List all output formats

use std::path::{Path, PathBuf};
use std::process;

use clap::error::ErrorKind;
use clap::{value_parser, Arg, ArgAction, Command};
use enamex_config::{EnamexConfig, Loader};
use enamex_parser::enamex::error::ConvertError;
use enamex_parser::enamex::formats::{FormatError, FormatRegistry};
use enamex_parser::enamex::layout::Layout;
use enamex_parser::enamex::pipeline::{convert_file, write_output};
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("enamex")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert tagged-token corpora into ENAMEX named-entity markup")
        .arg_required_else_help(true)
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format (see --list-formats)")
                .default_value("enamex")
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the built-in defaults")
                .value_parser(value_parser!(PathBuf))
                .global(true),
        )
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available output formats")
                .action(ArgAction::SetTrue),
        )
        .subcommand(layout_command(
            Layout::Legacy,
            "Convert a tab-separated corpus (token, class, optional sense)",
        ))
        .subcommand(layout_command(
            Layout::Conll,
            "Convert a four-column CoNLL corpus with -DOCSTART- document markers",
        ))
}

fn layout_command(layout: Layout, about: &'static str) -> Command {
    Command::new(layout.name())
        .about(about)
        .arg(
            Arg::new("input")
                .help("Input corpus")
                .required(true)
                .index(1)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("output")
                .help("Output file (overwritten)")
                .required(true)
                .index(2)
                .value_parser(value_parser!(PathBuf)),
        )
}

fn main() {
    init_tracing();

    let matches = cli().get_matches();

    let config = load_config(matches.get_one::<PathBuf>("config")).unwrap_or_else(|e| {
        eprintln!("Configuration error: {e}");
        process::exit(1);
    });

    if matches.get_flag("list-formats") {
        handle_list_formats_command(&config);
        return;
    }

    let Some((name, sub_matches)) = matches.subcommand() else {
        cli()
            .error(
                ErrorKind::MissingSubcommand,
                "a layout subcommand (legacy or conll) is required",
            )
            .exit();
    };
    let layout = name.parse::<Layout>().unwrap_or_else(|e| {
        eprintln!("{e}");
        process::exit(1);
    });
    let format = sub_matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("enamex");
    let (Some(input), Some(output)) = (
        sub_matches.get_one::<PathBuf>("input"),
        sub_matches.get_one::<PathBuf>("output"),
    ) else {
        cli()
            .error(ErrorKind::MissingRequiredArgument, "input and output are required")
            .exit();
    };

    if let Err(e) = handle_convert_command(&config, layout, input, output, format) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the default `warn` level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<EnamexConfig, enamex_config::ConfigError> {
    let loader = Loader::new();
    match path {
        Some(path) => loader.with_file(path).build(),
        None => loader.build(),
    }
}

/// Handle a conversion. The input is converted completely before the output file
/// is touched.
fn handle_convert_command(
    config: &EnamexConfig,
    layout: Layout,
    input: &Path,
    output: &Path,
    format: &str,
) -> Result<(), ConvertError> {
    let registry = FormatRegistry::with_defaults(config.markup_options(layout));
    if !registry.has(format) {
        return Err(FormatError::FormatNotFound(format.to_string()).into());
    }

    tracing::debug!(%layout, format, input = %input.display(), "converting");
    let corpus = convert_file(input, &config.profile(layout))?;
    let rendered = registry.serialize(&corpus, format)?;
    write_output(output, &rendered)
}

/// Handle the list-formats command
fn handle_list_formats_command(config: &EnamexConfig) {
    let registry = FormatRegistry::with_defaults(config.markup_options(Layout::Legacy));
    println!("Available output formats:\n");

    for name in registry.list_formats() {
        let description = registry.get(&name).map(|f| f.description()).unwrap_or("");
        println!("  {name}");
        println!("    {description}");
        println!();
    }
}
