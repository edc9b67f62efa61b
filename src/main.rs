use clap::{crate_description, crate_name, crate_version, Arg, ArgAction, ArgMatches, Command};
use fs_fixture::errors::{FileOperation, FixtureError, IoError};
use std::{ffi::OsString, path::PathBuf, process::ExitCode};

const USAGE: &str = "Usage: capture-fs-fixture [-t] [path]";

// The CLI layer should only parse inputs and forward them to library code.
fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<OsString> = std::env::args_os().collect();

    if let Some(arg) = args.iter().skip(1).find(|arg| !is_supported_argument(arg)) {
        log::debug!("unsupported argument: {}", arg.to_string_lossy());
        println!("{}", USAGE);
        return ExitCode::from(1);
    }

    let matches = Command::new(crate_name!())
        .about(crate_description!())
        .version(crate_version!())
        .disable_help_flag(true)
        .disable_version_flag(true)
        .args_override_self(true)
        .arg(
            Arg::new("temp")
                .short('t')
                .help("Emit a fixture backed by a temporary directory")
                .action(ArgAction::SetTrue),
        )
        .arg(Arg::new("path").help("Directory to capture, defaults to the current directory"))
        .try_get_matches_from(args);

    let matches = match matches {
        Ok(matches) => matches,
        Err(error) => {
            log::debug!("invalid arguments: {}", error);
            println!("{}", USAGE);
            return ExitCode::from(1);
        }
    };

    match handle_capture(&matches) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("{:?}", miette::Report::new(error));
            ExitCode::FAILURE
        }
    }
}

fn handle_capture(args: &ArgMatches) -> Result<String, FixtureError> {
    let use_temp = args.get_flag("temp");

    let cwd = std::env::current_dir()
        .map_err(|error| IoError::new(FileOperation::Read, PathBuf::from("."), error))?;

    let root = match args.get_one::<String>("path") {
        Some(path) => cwd.join(path),
        None => cwd,
    };
    let root = PathBuf::from(michi::normalize(&root.to_string_lossy()));

    log::debug!("capturing: {}", root.display());

    fs_fixture::capture::capture(&root, use_temp)
}

/// Only `-t` may start with a dash. Clap alone would also take `-`, `--` and `-tt`.
fn is_supported_argument(arg: &OsString) -> bool {
    let arg = arg.to_string_lossy();

    arg == "-t" || !arg.starts_with('-')
}
