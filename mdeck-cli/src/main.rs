// Command-line interface for mdeck
//
// mdeck turns a line-oriented markdown file into a self-contained HTML slide deck.
//
// Usage:
//  mdeck <input> [-o <output>]                 - Generate the deck once (default)
//  mdeck build <input> [-o <output>]           - Same as above (explicit)
//  mdeck watch <input> [--host H] [--port P]   - Regenerate on change and serve the reload endpoint
//  mdeck inspect <input>                       - Print the parsed slide model as JSON
//  mdeck generate-css                          - Print the embedded stylesheet
//  mdeck --list-formats                        - List registered formats
//
// The output defaults to the input path with an .html extension.
//
// Extra Parameters:
//
// Settings can be overridden per run using --extra-<parameter-name> <value>.
// Known keys update the loaded configuration (title, css, alert-phrase, ...);
// anything else is handed to the HTML serializer as an option.
// Example:
//  mdeck talk.md --extra-title "Launch review" --extra-ranked-max 8

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use mdeck_cli::{reload_url, run_watch, Regenerator, ServeConfig};
use mdeck_config::{Loader, MdeckConfig};
use mdeck_core::formats::get_default_css;
use mdeck_core::publish::publish_file;
use mdeck_core::{DeckError, DeckRules, FormatRegistry};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LOG_FILTER: &str = "mdeck=info,mdeck_cli=info,mdeck_core=warn,tower_http=warn";
const SUBCOMMANDS: &[&str] = &["build", "watch", "inspect", "generate-css", "help"];

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key_opt = if let Some(key) = arg.strip_prefix("--extra-") {
            Some(key)
        } else {
            arg.strip_prefix("--extras-")
        };

        if let Some(key) = key_opt {
            let has_value = i + 1 < args.len() && !args[i + 1].starts_with('-');

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

fn input_arg() -> Arg {
    Arg::new("input")
        .help("Markdown deck source")
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn output_arg() -> Arg {
    Arg::new("output")
        .long("output")
        .short('o')
        .help("Output HTML file (defaults to the input with an .html extension)")
        .value_hint(ValueHint::FilePath)
}

fn build_cli() -> Command {
    Command::new("mdeck")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Turn a markdown file into a self-contained HTML slide deck")
        .long_about(
            "mdeck converts a line-oriented markdown file into one HTML file with\n\
            the styles and navigation embedded.\n\n\
            Source vocabulary:\n  \
            # Title / ## Section      start a slide\n  \
            ### Subtitle              subtitle on the current slide\n  \
            - item                    list item (name — 1,234 items become a ranked grid)\n  \
            key: 42                   stat card\n  \
            ![alt](src)               image\n  \
            ```lang ... ```           code block (```terminal for shell sessions)\n  \
            ---                       slide break\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to override configuration for one run.\n  \
            Known names: title, css, alert-phrase, terminal-language,\n  \
            terminal-prompt, ranked-max.\n\n\
            Examples:\n  \
            mdeck talk.md                       # Writes talk.html\n  \
            mdeck talk.md -o out/index.html     # Explicit output\n  \
            mdeck watch talk.md --port 8080     # Live reload while editing\n  \
            mdeck inspect talk.md               # Show what the parser saw",
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
                .help("Path to an mdeck.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("build")
                .about("Generate the HTML deck once (default command)")
                .arg(input_arg())
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("watch")
                .about("Regenerate on every change and serve the live-reload endpoint")
                .long_about(
                    "Builds the deck, then rebuilds it whenever the source changes.\n\n\
                    A small HTTP server answers GET /__reload with the time of the last\n\
                    successful build; the generated page polls it and reloads itself.\n\
                    GET / serves the deck. Stop with Ctrl-C.",
                )
                .arg(input_arg())
                .arg(output_arg())
                .arg(
                    Arg::new("host")
                        .long("host")
                        .help("Address to bind the reload server to")
                        .value_hint(ValueHint::Hostname),
                )
                .arg(
                    Arg::new("port")
                        .long("port")
                        .short('p')
                        .help("Port for the reload server")
                        .value_parser(clap::value_parser!(u16)),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Print the parsed slide model as JSON")
                .arg(input_arg()),
        )
        .subcommand(
            Command::new("generate-css")
                .about("Output the CSS embedded in every deck")
                .long_about(
                    "Outputs the stylesheet embedded in generated decks.\n\n\
                    Use it as a starting point for your own styling, then point\n\
                    render.custom_css (or --extra-css) at the edited file; it is\n\
                    appended after the embedded styles.\n\n\
                    Examples:\n  \
                    mdeck generate-css > theme.css",
                ),
        )
}

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let (cleaned_args, mut extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            // A bare path means `build`
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && !SUBCOMMANDS.contains(&cleaned_args[1].as_str())
            {
                let mut new_args = vec![cleaned_args[0].clone(), "build".to_string()];
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

    let mut config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    apply_config_overrides(&mut config, &mut extra_params);

    if matches.get_flag("list-formats") {
        handle_list_formats_command(&config);
        return;
    }

    match matches.subcommand() {
        Some(("build", sub_matches)) => {
            let (input, output) = input_and_output(sub_matches);
            handle_build_command(&input, &output, &extra_params, &config);
        }
        Some(("watch", sub_matches)) => {
            let (input, output) = input_and_output(sub_matches);
            if let Some(host) = sub_matches.get_one::<String>("host") {
                config.watch.host = host.clone();
            }
            if let Some(port) = sub_matches.get_one::<u16>("port") {
                config.watch.port = *port;
            }
            if let Err(err) = handle_watch_command(input, output, &extra_params, &config) {
                eprintln!("Error: {err:#}");
                std::process::exit(1);
            }
        }
        Some(("inspect", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            handle_inspect_command(input, &config);
        }
        Some(("generate-css", _)) => {
            print!("{}", get_default_css());
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Logs go to stderr so stdout stays clean for `inspect` and `generate-css`.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn input_and_output(matches: &ArgMatches) -> (PathBuf, PathBuf) {
    let input = PathBuf::from(
        matches
            .get_one::<String>("input")
            .expect("input is required"),
    );
    let output = resolve_output(&input, matches.get_one::<String>("output").map(Path::new));
    if output == input {
        eprintln!(
            "Error: output '{}' would overwrite the input; pass -o <file>",
            output.display()
        );
        std::process::exit(1);
    }
    (input, output)
}

/// The explicit output, or the input with its extension replaced by `.html`.
fn resolve_output(input: &Path, output: Option<&Path>) -> PathBuf {
    match output {
        Some(path) => path.to_path_buf(),
        None => input.with_extension("html"),
    }
}

/// Handle the build command
fn handle_build_command(
    input: &Path,
    output: &Path,
    extra_params: &HashMap<String, String>,
    config: &MdeckConfig,
) {
    let registry = FormatRegistry::with_rules(DeckRules::from(&config.rules));
    let options = html_params_or_exit(config, extra_params);

    match publish_file(input, output, &registry, &options) {
        Ok(report) => {
            println!(
                "Generated {} slides -> {}",
                report.slides,
                report.output.display()
            );
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Handle the watch command
fn handle_watch_command(
    input: PathBuf,
    output: PathBuf,
    extra_params: &HashMap<String, String>,
    config: &MdeckConfig,
) -> anyhow::Result<()> {
    use anyhow::Context;

    let mut options = html_params_from_config(config, extra_params)?;
    options.insert(
        "reload-url".to_string(),
        reload_url(&config.watch.host, config.watch.port),
    );

    let registry = FormatRegistry::with_rules(DeckRules::from(&config.rules));
    let regenerator = Regenerator::new(input, output, registry).with_options(options);
    let serve = ServeConfig {
        host: config.watch.host.clone(),
        port: config.watch.port,
        debounce_ms: config.watch.debounce_ms,
    };

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    runtime
        .block_on(run_watch(regenerator, serve))
        .context("watch mode failed")?;
    Ok(())
}

/// Handle the inspect command
fn handle_inspect_command(input: &str, config: &MdeckConfig) {
    let source = fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    });

    let registry = FormatRegistry::with_rules(DeckRules::from(&config.rules));
    let json = registry
        .parse(&source, "markdown")
        .and_then(|deck| registry.serialize(&deck, "json"))
        .unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            std::process::exit(1);
        });

    println!("{json}");
}

/// Handle the list-formats command
fn handle_list_formats_command(config: &MdeckConfig) {
    let registry = FormatRegistry::with_rules(DeckRules::from(&config.rules));
    println!("Available formats:\n");
    for name in registry.list_formats() {
        let description = registry.get(&name).map(|f| f.description()).unwrap_or("");
        println!("  {name:<10} {description}");
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> MdeckConfig {
    let loader = Loader::new().with_optional_file("mdeck.toml");
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

fn apply_config_overrides(config: &mut MdeckConfig, extra_params: &mut HashMap<String, String>) {
    if let Some(title) = take_override(extra_params, &["title"]) {
        config.render.title = Some(title);
    }
    if let Some(path) = take_override(extra_params, &["css", "css-path"]) {
        config.render.custom_css = Some(PathBuf::from(path));
    }
    if let Some(phrase) = take_override(extra_params, &["alert-phrase"]) {
        config.rules.alert_phrase = phrase;
    }
    if let Some(language) = take_override(extra_params, &["terminal-language"]) {
        config.rules.terminal_language = language;
    }
    if let Some(prompt) = take_override(extra_params, &["terminal-prompt"]) {
        config.rules.terminal_prompt = prompt;
    }
    if let Some(raw) = take_override(extra_params, &["ranked-max", "ranked-list-max-items"]) {
        config.rules.ranked_list_max_items = raw.parse().unwrap_or_else(|_| {
            eprintln!("Invalid number '{raw}' for --extra-ranked-max");
            std::process::exit(1);
        });
    }
}

/// HTML serializer options from the configuration, plus any unclaimed extras.
fn html_params_from_config(
    config: &MdeckConfig,
    overrides: &HashMap<String, String>,
) -> Result<HashMap<String, String>, DeckError> {
    let mut params = HashMap::new();

    if let Some(title) = &config.render.title {
        params.insert("title".to_string(), title.clone());
    }
    if let Some(path) = &config.render.custom_css {
        let css = fs::read_to_string(path).map_err(|source| DeckError::Read {
            path: path.clone(),
            source,
        })?;
        params.insert("custom-css".to_string(), css);
    }

    for (key, value) in overrides {
        params.insert(key.clone(), value.clone());
    }

    Ok(params)
}

fn html_params_or_exit(
    config: &MdeckConfig,
    overrides: &HashMap<String, String>,
) -> HashMap<String, String> {
    html_params_from_config(config, overrides).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    })
}

fn take_override(map: &mut HashMap<String, String>, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(value) = map.remove(*key) {
            return Some(value);
        }
    }
    None
}
