use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the command tree in src/main.rs
// We need to duplicate this here since build scripts can't access src/ modules
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
        .help("Output HTML file")
        .value_hint(ValueHint::FilePath)
}

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("mdeck")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Turn a markdown file into a self-contained HTML slide deck")
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
                .about("Generate the HTML deck once")
                .arg(input_arg())
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("watch")
                .about("Regenerate on every change and serve the live-reload endpoint")
                .arg(input_arg())
                .arg(output_arg())
                .arg(
                    Arg::new("host")
                        .long("host")
                        .value_hint(ValueHint::Hostname),
                )
                .arg(Arg::new("port").long("port").short('p')),
        )
        .subcommand(
            Command::new("inspect")
                .about("Print the parsed slide model as JSON")
                .arg(input_arg()),
        )
        .subcommand(Command::new("generate-css").about("Output the embedded CSS"));

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "mdeck", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "mdeck", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "mdeck", &outdir)?;

    Ok(())
}
