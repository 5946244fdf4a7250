//! Command-line interface for camxes-postproc
//! Reads a camxes parse tree (JSON) and prints its postprocessed form.
//!
//! Usage:
//!   camxes-postproc `[path]` [-m `<mode>`] [-f `<format>`]    - Postprocess one tree (stdin if no path)
//!   camxes-postproc --loop [-m `<mode>`]                    - Postprocess one tree per stdin line
//!   camxes-postproc --list-options                        - List the mode letters

use camxes_postproc::postproc::config::{Loader, LOCAL_CONFIG_FILE};
use camxes_postproc::postproc::options::MODE_LETTERS;
use camxes_postproc::postproc::pipeline::Postprocessor;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::io::{self, BufRead, Read, Write};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = Command::new("camxes-postproc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Trim, flatten and pretty print camxes parse trees")
        .arg(
            Arg::new("path")
                .help("Path to a JSON parse tree ('-' or nothing reads stdin)")
                .index(1),
        )
        .arg(
            Arg::new("mode")
                .long("mode")
                .short('m')
                .help("Mode letters (e.g. 'CTN') or a legacy numeric code; 'L' loops over stdin"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .help("Output format: auto, json or text"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML configuration file layered over the defaults"),
        )
        .arg(
            Arg::new("max-depth")
                .long("max-depth")
                .help("Deepest tree nesting accepted")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("loop")
                .long("loop")
                .help("Read one parse tree per stdin line until end of input")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-options")
                .long("list-options")
                .help("List the mode letters and exit")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    if matches.get_flag("list-options") {
        handle_list_options_command();
        return;
    }

    let (processor, looping) = build_postprocessor(&matches).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    if looping || matches.get_flag("loop") {
        handle_loop_command(&processor);
    } else {
        let path = matches.get_one::<String>("path").map(String::as_str);
        handle_single_command(&processor, path);
    }
}

/// Layer defaults, `./camxes-postproc.toml`, the `--config` file and
/// command-line flags.
///
/// The loop letter `L` may come from any layer. It is stripped from the
/// resolved mode before the mode reaches the decoder.
fn build_postprocessor(matches: &ArgMatches) -> Result<(Postprocessor, bool), String> {
    let mut loader = Loader::new().with_optional_file(LOCAL_CONFIG_FILE);
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if let Some(mode) = matches.get_one::<String>("mode") {
        loader = loader
            .set_override("postprocess.mode", mode.as_str())
            .map_err(|e| e.to_string())?;
    }
    if let Some(format) = matches.get_one::<String>("format") {
        loader = loader
            .set_override("render.format", format.as_str())
            .map_err(|e| e.to_string())?;
    }
    if let Some(max_depth) = matches.get_one::<usize>("max-depth") {
        let max_depth = i64::try_from(*max_depth).map_err(|e| e.to_string())?;
        loader = loader
            .set_override("postprocess.max_depth", max_depth)
            .map_err(|e| e.to_string())?;
    }
    let mut config = loader.build().map_err(|e| e.to_string())?;
    let looping = config.postprocess.mode.contains('L');
    config.postprocess.mode.retain(|c| c != 'L');
    let processor = config.postprocessor().map_err(|e| e.to_string())?;
    Ok((processor, looping))
}

/// Postprocess a single tree read from a file or stdin
fn handle_single_command(processor: &Postprocessor, path: Option<&str>) {
    let source = match path {
        Some(path) if path != "-" => std::fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("Error reading file: {}", e);
            std::process::exit(1);
        }),
        _ => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source).unwrap_or_else(|e| {
                eprintln!("Error reading stdin: {}", e);
                std::process::exit(1);
            });
            source
        }
    };

    let output = processor.process(source).unwrap_or_else(|e| {
        eprintln!("Postprocessing error: {}", e);
        std::process::exit(1);
    });

    println!("{}", output);
}

/// Postprocess one tree per stdin line; a bad line is reported and skipped
fn handle_loop_command(processor: &Postprocessor) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("Error reading stdin: {}", e);
                std::process::exit(1);
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match processor.process(line) {
            Ok(output) => {
                if writeln!(out, "{}", output).is_err() {
                    return;
                }
            }
            Err(e) => eprintln!("Postprocessing error: {}", e),
        }
    }
}

/// Handle the list-options command
fn handle_list_options_command() {
    println!("Available mode letters:\n");
    for (letter, description) in MODE_LETTERS {
        println!("  {}  {}", letter, description);
    }
    println!();
    println!("Legacy numeric modes 0-31 are accepted as well.");
}
