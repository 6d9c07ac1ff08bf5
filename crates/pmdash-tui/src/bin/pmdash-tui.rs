use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use pmdash_tui::loader::{load_config, load_program_data};
use pmdash_tui::logging::init_logging;
use pmdash_tui::shell::{parse_command, DashboardShell, PanelSnapshot};

const USAGE: &str = "usage: pmdash-tui [--config PATH] [--data PATH]";

#[derive(Debug, Default)]
struct CliArgs {
    config: Option<PathBuf>,
    data: Option<PathBuf>,
}

fn parse_args<I: Iterator<Item = String>>(mut args: I) -> Result<CliArgs, String> {
    let mut parsed = CliArgs::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let value = args.next().ok_or("--config requires a path")?;
                parsed.config = Some(PathBuf::from(value));
            }
            "--data" => {
                let value = args.next().ok_or("--data requires a path")?;
                parsed.data = Some(PathBuf::from(value));
            }
            "-h" | "--help" => return Err(USAGE.to_owned()),
            other => return Err(format!("unknown argument {other:?}\n{USAGE}")),
        }
    }
    Ok(parsed)
}

fn main() -> ExitCode {
    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::from(2);
        }
    };

    let config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error loading config: {err}");
            return ExitCode::FAILURE;
        }
    };
    init_logging(&config.logging);

    let data = match args.data.as_deref() {
        Some(path) => match load_program_data(path) {
            Ok(data) => data,
            Err(err) => {
                eprintln!("Error loading program data: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => Default::default(),
    };

    let mut shell = DashboardShell::new(&config, data);
    match run(&mut shell, io::stdin().lock(), io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run<R: BufRead, W: Write>(shell: &mut DashboardShell, input: R, mut out: W) -> io::Result<()> {
    let mut applied = 0usize;
    for line in input.lines() {
        let line = line?;
        match parse_command(&line) {
            Ok(Some(event)) => {
                let snapshot = shell.apply(event);
                write_snapshot(&mut out, &snapshot)?;
                applied += 1;
            }
            Ok(None) => {}
            Err(message) => tracing::warn!(line = %line, "skipping command: {message}"),
        }
    }
    if applied == 0 {
        let snapshot = shell.snapshot();
        write_snapshot(&mut out, &snapshot)?;
    }
    out.flush()
}

fn write_snapshot<W: Write>(out: &mut W, snapshot: &PanelSnapshot) -> io::Result<()> {
    serde_json::to_writer(&mut *out, snapshot).map_err(io::Error::from)?;
    writeln!(out)
}
