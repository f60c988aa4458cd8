//! Main CLI application

use crate::cli::logging;
use crate::config::{
    find_config_file, parse_config_file, register_build_file, validate_config, BuildFile,
};
use crate::envarg::{parse_override, ArgSources};
use crate::error::{ConfigError, MoltError};
use crate::orchestrator::Orchestrator;
use crate::ui::{Console, Verbosity};
use clap::error::ErrorKind;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Build the clap command, titled from the build file when one is loaded
fn build_command(file: Option<&BuildFile>) -> Command {
    let name = file
        .and_then(|f| f.name.clone())
        .unwrap_or_else(|| "molt".to_string());
    let about = file
        .and_then(|f| f.usage.clone())
        .unwrap_or_else(|| "Declare build targets and run them in dependency order".to_string());

    Command::new(name)
        .version(env!("CARGO_PKG_VERSION"))
        .about(about)
        .arg(
            Arg::new("targets")
                .value_name("TARGET")
                .help("Targets to run, in order")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("arg")
                .long("arg")
                .value_name("NAME=VALUE")
                .help("Override an environment argument")
                .value_parser(parse_override)
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("dotenv")
                .long("dotenv")
                .value_name("PATH")
                .help("Load environment variables from a dotenv file")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .value_name("FILE")
                .help("Path to molt.yml build file")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only print command output and errors")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("silent")
                .short('s')
                .long("silent")
                .help("Print no output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Print verbose output")
                .action(ArgAction::SetTrue),
        )
}

/// Get verbosity level from matches
fn get_verbosity(matches: &ArgMatches) -> Verbosity {
    if matches.get_flag("silent") {
        Verbosity::Silent
    } else if matches.get_flag("quiet") {
        Verbosity::Quiet
    } else if matches.get_flag("verbose") {
        Verbosity::Verbose
    } else {
        Verbosity::Normal
    }
}

/// Merge dotenv files into the process environment; missing files warn
fn load_dotenv_files(matches: &ArgMatches) {
    for path in matches.get_many::<PathBuf>("dotenv").into_iter().flatten() {
        match dotenvy::from_path(path) {
            Ok(()) => debug!(path = %path.display(), "Loaded dotenv file"),
            Err(e) => warn!("Dotenv {} not loaded: {}", path.display(), e),
        }
    }
}

/// Load and validate the build file, returning it with its directory.
///
/// Without `--file`, a missing build file leaves only the built-in targets.
fn load_build_file(matches: &ArgMatches) -> Result<(BuildFile, PathBuf), MoltError> {
    let (file, path) = match matches.get_one::<PathBuf>("file") {
        Some(path) => (parse_config_file(path)?, path.clone()),
        None => match find_config_file() {
            Ok(path) => (parse_config_file(&path)?, path),
            Err(ConfigError::NotFound(searched)) => {
                warn!("No build file found (searched: {})", searched);
                return Ok((BuildFile::default(), PathBuf::from(".")));
            }
            Err(e) => return Err(e.into()),
        },
    };
    validate_config(&file)?;
    debug!(path = %path.display(), targets = file.targets.len(), "Loaded build file");

    let base_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => Path::new(".").to_path_buf(),
    };
    Ok((file, base_dir))
}

/// Run the CLI application with process arguments
pub fn run() -> Result<(), MoltError> {
    run_from(std::env::args_os())
}

/// Run the CLI application with explicit arguments
pub fn run_from<I, T>(args: I) -> Result<(), MoltError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = match build_command(None).try_get_matches_from(args) {
        Ok(matches) => matches,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            kind => {
                let _ = e.print();
                return Err(MoltError::Usage(kind.to_string()));
            }
        },
    };

    let verbosity = get_verbosity(&matches);
    logging::init(verbosity);
    load_dotenv_files(&matches);

    let overrides = matches
        .get_many::<(String, String)>("arg")
        .into_iter()
        .flatten()
        .cloned();
    let mut molt = Orchestrator::new(ArgSources::new().with_overrides(overrides));

    let (file, base_dir) = load_build_file(&matches)?;
    register_build_file(&mut molt, &file, &base_dir, verbosity)?;

    let targets: Vec<String> = matches
        .get_many::<String>("targets")
        .into_iter()
        .flatten()
        .cloned()
        .collect();

    if targets.is_empty() {
        build_command(Some(&file))
            .after_help(molt.render_list())
            .print_help()?;
        println!();
        return Ok(());
    }

    let mut console = Console::new(verbosity).with_environment(molt.env_args());
    let report = molt.run(&targets, &mut console)?;
    console.print_summary(&report);
    report.into_result()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(args: &[&str]) -> Result<ArgMatches, clap::Error> {
        build_command(None).try_get_matches_from(args)
    }

    #[test]
    fn test_get_verbosity_normal() {
        assert_eq!(get_verbosity(&matches(&["molt"]).unwrap()), Verbosity::Normal);
    }

    #[test]
    fn test_get_verbosity_precedence() {
        assert_eq!(get_verbosity(&matches(&["molt", "-v"]).unwrap()), Verbosity::Verbose);
        assert_eq!(get_verbosity(&matches(&["molt", "-q", "-v"]).unwrap()), Verbosity::Quiet);
        assert_eq!(get_verbosity(&matches(&["molt", "-s", "-q"]).unwrap()), Verbosity::Silent);
    }

    #[test]
    fn test_targets_and_overrides() {
        let m = matches(&["molt", "build", "--arg", "ENV=prod", "test", "--arg", "X=a=b"]).unwrap();

        let targets: Vec<&String> = m.get_many::<String>("targets").unwrap().collect();
        assert_eq!(targets, ["build", "test"]);

        let overrides: Vec<&(String, String)> =
            m.get_many::<(String, String)>("arg").unwrap().collect();
        assert_eq!(overrides[0], &("ENV".to_string(), "prod".to_string()));
        assert_eq!(overrides[1], &("X".to_string(), "a=b".to_string()));
    }

    #[test]
    fn test_override_without_equals_is_rejected() {
        let err = matches(&["molt", "--arg", "ENV"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn test_command_titled_from_build_file() {
        let file = BuildFile {
            name: Some("shop".to_string()),
            usage: Some("Builds the shop".to_string()),
            ..BuildFile::default()
        };
        let cmd = build_command(Some(&file));
        assert_eq!(cmd.get_name(), "shop");
        assert_eq!(cmd.get_about().map(|s| s.to_string()), Some("Builds the shop".to_string()));
    }
}
