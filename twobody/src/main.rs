use twobody::{run, Mode, RunConfig};
use twobody::{bench_euler, bench_euler_curve};

use clap::error::ErrorKind;
use clap::Parser;
use anyhow::{Context, Result};

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

/// Exit status for a bad command line
const USAGE_EXIT: u8 = 1;

/// Two-body gravity integrator. With OUTPUT, writes `t,x1,y1,x2,y2` lines to that
/// file; without it, opens a window and renders the bodies live.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Output file for batch mode
    output: Option<PathBuf>,

    /// YAML run config, either a path or a file name under `scenarios/`
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Run the step timing and step-size study instead of a simulation
    #[arg(long)]
    bench: bool,
}

fn load_config(args: &Args) -> Result<RunConfig> {
    match &args.config {
        Some(name) => RunConfig::load(name)
            .with_context(|| format!("failed to load config {}", name.display())),
        None => Ok(RunConfig::default()),
    }
}

/// Parse `argv`. Help and version exit the process; any other error prints
/// usage to stderr and yields the exit status to return.
fn parse_args<I, T>(argv: I) -> std::result::Result<Args, u8>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Args::try_parse_from(argv) {
        Ok(args) => Ok(args),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            Err(USAGE_EXIT)
        }
    }
}

fn main() -> Result<ExitCode> {
    let args = match parse_args(std::env::args_os()) {
        Ok(args) => args,
        Err(code) => return Ok(ExitCode::from(code)),
    };

    if args.bench {
        bench_euler()?;
        bench_euler_curve()?;
        return Ok(ExitCode::SUCCESS);
    }

    let cfg = load_config(&args)?;
    run(Mode::from_output(args.output), cfg)?;

    Ok(ExitCode::SUCCESS)
}
