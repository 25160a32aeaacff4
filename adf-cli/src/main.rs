// Command-line interface for adf
//
// This binary renders ADF documents (the rich text trees returned by the issue tracker's REST API)
// as readable text, and turns typed text back into ADF so it can be posted.
//
// All the work is done by the adf-babel crate; this binary only deals with files, stdin/stdout,
// configuration and logging. Output goes to stdout, logs and errors to stderr, so the commands can
// be piped.
//
// Usage:
//  adf render [FILES...]                   - ADF JSON (files or stdin) to text
//  adf ticket [FILES...]                   - Issue JSON (single issue or search result) to a report
//  adf text-to-adf [FILE] [--pretty]       - Text (file or stdin) to ADF JSON
//  adf convert <input> --to <format> [--from <format>] [--output <file>]
//  adf <input> --to <format>               - Same as convert
//  adf --list-formats                      - List available formats
//
// Extra Parameters:
//
// Format-specific parameters can be passed using --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix and passes the parameters to the format.
// Example:
//  adf convert notes.md --to treeviz --extra-full
//  adf ticket issue.json --extra-show-comments false

use adf_babel::formats::json::{parse_adf_json, serialize_adf_json};
use adf_babel::{
    decode, encode_with_diagnostics, render_tickets, FormatRegistry, SerializedDocument,
    TicketOptions,
};
use adf_config::{AdfConfig, Loader};
use clap::{Arg, ArgAction, Command, ValueHint};
use std::collections::HashMap;
use std::fs;
use std::io::Read;
use tracing_subscriber::EnvFilter;

const SUBCOMMANDS: &[&str] = &["render", "ticket", "text-to-adf", "convert", "help"];

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

fn files_arg() -> Arg {
    Arg::new("files")
        .help("Input files (reads stdin when none are given)")
        .num_args(0..)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn build_cli() -> Command {
    Command::new("adf")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render ADF documents as text and turn text into ADF")
        .long_about(
            "adf converts between the Atlassian Document Format (ADF) used by the issue\n\
            tracker and a markdown-like text dialect.\n\n\
            Commands:\n  \
            - render:      ADF JSON to text\n  \
            - ticket:      Issue JSON to a readable report\n  \
            - text-to-adf: Text to ADF JSON\n  \
            - convert:     Registry driven conversion between any two formats\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass format-specific options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Logging:\n  \
            Warnings about unsupported ADF constructs are written to stderr.\n  \
            Set RUST_LOG (e.g. RUST_LOG=debug) or logging.level in adf.toml.\n\n\
            Examples:\n  \
            adf render description.json\n  \
            curl ... | adf ticket\n  \
            adf text-to-adf notes.txt --pretty\n  \
            adf notes.md --to treeviz",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
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
                .help("Path to an adf.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("render")
                .about("Render ADF JSON as text")
                .arg(files_arg()),
        )
        .subcommand(
            Command::new("ticket")
                .about("Render issue JSON as a ticket report")
                .long_about(
                    "Render one issue, or every issue of a search result, as a report with\n\
                    the summary, people, status, description, comments and attachments.\n\n\
                    Comments and attachments are listed newest first. Use\n\
                    --extra-show-comments false or --extra-show-attachments false\n\
                    (or the [ticket] section of adf.toml) to hide them.",
                )
                .arg(files_arg()),
        )
        .subcommand(
            Command::new("text-to-adf")
                .about("Convert text to ADF JSON")
                .long_about(
                    "Convert the text dialect to ADF JSON.\n\n\
                    Recognised constructs:\n  \
                    ℹ️ / ✅ / 🙌 / ⚠️ / ⛔ Title   panel with a bold title\n  \
                    * item                       bullet, nested in 2-space steps\n  \
                    ```lang ... ```              code block\n  \
                    anything else                paragraph",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file (reads stdin when omitted)")
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("pretty")
                        .long("pretty")
                        .help("Pretty-print the JSON output")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between document formats (default command)")
                .long_about(
                    "Convert documents between formats.\n\n\
                    Supported formats:\n  \
                    - markdown:  text dialect (.md, .markdown, .txt)\n  \
                    - adf-json:  ADF JSON (.json)\n  \
                    - plaintext: text without formatting (output only)\n  \
                    - treeviz:   outline of the ADF tree (output only)\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Output goes to stdout by default, or use -o to specify a file.",
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
                        .help("Target format (required)")
                        .required(true)
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
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            // `adf notes.md --to json` is shorthand for `adf convert notes.md --to json`
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && !SUBCOMMANDS.contains(&cleaned_args[1].as_str())
            {
                let mut new_args = vec![cleaned_args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);

                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    apply_config_overrides(&mut config, &mut extra_params);
    init_logging(&config);

    match matches.subcommand() {
        Some(("render", sub_matches)) => {
            let files = collect_files(sub_matches.get_many::<String>("files"));
            handle_render_command(&files);
        }
        Some(("ticket", sub_matches)) => {
            let files = collect_files(sub_matches.get_many::<String>("files"));
            handle_ticket_command(&files, &config);
        }
        Some(("text-to-adf", sub_matches)) => {
            let input = sub_matches.get_one::<String>("input").map(|s| s.as_str());
            let pretty = sub_matches.get_flag("pretty") || config.convert.pretty_json;
            handle_text_to_adf_command(input, pretty);
        }
        Some(("convert", sub_matches)) => {
            let Some(input) = sub_matches.get_one::<String>("input") else {
                fail("an input file is required");
            };
            let Some(to) = sub_matches.get_one::<String>("to") else {
                fail("--to is required");
            };

            let from = match sub_matches.get_one::<String>("from") {
                Some(f) => f.to_string(),
                None => {
                    let registry = FormatRegistry::default();
                    match registry.detect_format_from_filename(input) {
                        Some(detected) => detected,
                        None => {
                            eprintln!("Error: Could not detect format from filename '{input}'");
                            eprintln!("Please specify --from explicitly");
                            std::process::exit(1);
                        }
                    }
                }
            };

            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(input, &from, to, output, &extra_params, &config);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn fail(message: &str) -> ! {
    eprintln!("Error: {message}");
    std::process::exit(1);
}

fn collect_files<'a>(values: Option<impl Iterator<Item = &'a String>>) -> Vec<String> {
    values
        .map(|files| files.cloned().collect())
        .unwrap_or_default()
}

/// Contents of each named file, or of stdin when no file is given.
fn read_sources(files: &[String]) -> Vec<(String, String)> {
    if files.is_empty() {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .unwrap_or_else(|e| {
                eprintln!("Error reading stdin: {e}");
                std::process::exit(1);
            });
        return vec![("<stdin>".to_string(), source)];
    }

    files
        .iter()
        .map(|path| {
            let source = fs::read_to_string(path).unwrap_or_else(|e| {
                eprintln!("Error reading file '{path}': {e}");
                std::process::exit(1);
            });
            (path.clone(), source)
        })
        .collect()
}

/// Prints `text`, adding a newline unless it already ends with one.
fn puts(text: &str) {
    if text.ends_with('\n') {
        print!("{text}");
    } else {
        println!("{text}");
    }
}

fn handle_render_command(files: &[String]) {
    for (name, source) in read_sources(files) {
        let doc = parse_adf_json(&source).unwrap_or_else(|e| {
            eprintln!("Error in '{name}': {e}");
            std::process::exit(1);
        });
        let encoded = encode_with_diagnostics(&doc);
        if !encoded.diagnostics.is_empty() {
            tracing::info!(
                source = %name,
                count = encoded.diagnostics.len(),
                "rendered with unsupported constructs skipped"
            );
        }
        puts(&encoded.text);
    }
}

fn handle_ticket_command(files: &[String], config: &AdfConfig) {
    let options = TicketOptions::from(&config.ticket);
    for (name, source) in read_sources(files) {
        let payload: serde_json::Value = serde_json::from_str(&source).unwrap_or_else(|e| {
            eprintln!("Error in '{name}': invalid JSON: {e}");
            std::process::exit(1);
        });
        let report = render_tickets(&payload, &options).unwrap_or_else(|e| {
            eprintln!("Error in '{name}': {e}");
            std::process::exit(1);
        });
        print!("{report}");
    }
}

fn handle_text_to_adf_command(input: Option<&str>, pretty: bool) {
    let files: Vec<String> = input.map(|path| vec![path.to_string()]).unwrap_or_default();
    for (_, source) in read_sources(&files) {
        let doc = decode(&source);
        let json = serialize_adf_json(&doc, pretty).unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            std::process::exit(1);
        });
        println!("{json}");
    }
}

fn handle_convert_command(
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
    extra_params: &HashMap<String, String>,
    config: &AdfConfig,
) {
    let registry = FormatRegistry::default();

    if let Err(e) = registry.get(from) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    if let Err(e) = registry.get(to) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let source = fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    });

    let doc = registry.parse(&source, from).unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    });

    let mut format_options = HashMap::new();
    if to == "adf-json" && config.convert.pretty_json {
        format_options.insert("pretty".to_string(), "true".to_string());
    }
    for (key, value) in extra_params {
        format_options.insert(key.clone(), value.clone());
    }

    let result = registry
        .serialize_with_options(&doc, to, &format_options)
        .unwrap_or_else(|e| {
            eprintln!("Serialization error: {e}");
            std::process::exit(1);
        });

    match (output, result) {
        (Some(path), data) => {
            fs::write(path, data.into_bytes()).unwrap_or_else(|e| {
                eprintln!("Error writing file '{path}': {e}");
                std::process::exit(1);
            });
        }
        (None, SerializedDocument::Text(text)) => puts(&text),
        (None, SerializedDocument::Binary(_)) => {
            eprintln!("Binary formats require an output file. Use -o <path>.");
            std::process::exit(1);
        }
    }
}

fn handle_list_formats_command() {
    println!("Available formats:\n");
    let registry = FormatRegistry::default();
    for format_name in registry.list_formats() {
        let Ok(format) = registry.get(&format_name) else {
            continue;
        };
        let direction = match (format.supports_parsing(), format.supports_serialization()) {
            (true, true) => "in/out",
            (true, false) => "in",
            (false, true) => "out",
            (false, false) => "-",
        };
        println!("  {format_name:<10} {direction:<7} {}", format.description());
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> AdfConfig {
    let loader = Loader::new().with_optional_file("adf.toml");
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

/// Logs go to stderr so stdout stays clean for piping. `RUST_LOG` wins over the config.
fn init_logging(config: &AdfConfig) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(&config.logging.level))
                .unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

fn apply_config_overrides(config: &mut AdfConfig, extra_params: &mut HashMap<String, String>) {
    if let Some(raw) = extra_params.remove("show-comments") {
        config.ticket.show_comments = parse_bool_arg("show-comments", &raw);
    }
    if let Some(raw) = extra_params.remove("show-attachments") {
        config.ticket.show_attachments = parse_bool_arg("show-attachments", &raw);
    }
    if let Some(raw) = extra_params.remove("log-level") {
        config.logging.level = raw;
    }
}

fn parse_bool_arg(flag: &str, raw: &str) -> bool {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => true,
        "false" | "0" | "no" | "n" => false,
        other => {
            eprintln!("Invalid boolean value '{other}' for --extra-{flag}");
            std::process::exit(1);
        }
    }
}
