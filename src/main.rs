use anyhow::Context;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use env_logger::Env;
use javaenv::config::{Mode, ResolverConfig, JAVA_HOME_VAR};
use javaenv::error::LaunchError;
use javaenv::registry::LocalMachine;
use javaenv::{run, Invocation};
use log::debug;
use std::env;
use std::path::PathBuf;
use std::process;

/// Find a Java installation and run a command with JAVA_HOME set
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Read resolver settings from a TOML file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Kind of installation to look for
    #[arg(value_enum)]
    mode: Mode,

    /// Command line to run, e.g. a startup script and its arguments
    #[arg(
        required = true,
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    command: Vec<String>,
}

fn handle_args(args: &Args) -> anyhow::Result<i32> {
    let config = match &args.config {
        Some(path) => ResolverConfig::load(path)?,
        None => ResolverConfig::default(),
    };
    let invocation = Invocation::new(args.mode, &args.command);
    let working_dir = env::current_dir().context("Unable to read working directory")?;
    let preset = env::var_os(JAVA_HOME_VAR);
    let code = run(&invocation, &config, LocalMachine, &working_dir, preset)?;
    Ok(code)
}

/// text for a rejected command line, and the status to exit with
fn usage_error(e: &clap::Error) -> (String, i32) {
    let mut text = e.render().to_string();
    if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        return (text, 0);
    }
    // invalid values render without a usage line
    if !text.contains("Usage:") {
        if !text.ends_with('\n') {
            text.push('\n');
        }
        text.push_str(&format!("\n{}\n", Args::command().render_usage()));
    }
    (text, LaunchError::EXIT_CODE)
}

/// message to print, if any, and the status to exit with
fn outcome(result: anyhow::Result<i32>) -> (Option<String>, i32) {
    match result {
        Ok(code) => (None, code),
        Err(e) => {
            debug!("{e:#?}");
            (Some(format!("{e:#}")), LaunchError::EXIT_CODE)
        }
    }
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("off")).init();
    let (message, code) = match Args::try_parse() {
        Ok(args) => outcome(handle_args(&args)),
        Err(e) => {
            let (text, code) = usage_error(&e);
            (Some(text), code)
        }
    };
    if let Some(message) = message {
        print!("{message}");
        if !message.ends_with('\n') {
            println!();
        }
    }
    process::exit(code);
}

#[test]
fn test_args_parse() {
    let args = Args::try_parse_from(["javaenv", "jdk", "startup.bat", "-debug"]).unwrap();
    assert_eq!(args.mode, Mode::Jdk);
    assert_eq!(args.command, vec!["startup.bat", "-debug"]);
    assert!(args.config.is_none());

    let args = Args::try_parse_from(["javaenv", "--config", "j.toml", "jre", "echo hello"]).unwrap();
    assert_eq!(args.mode, Mode::Jre);
    assert_eq!(args.config, Some(PathBuf::from("j.toml")));
    assert_eq!(args.command, vec!["echo hello"]);
}

#[test]
fn test_usage_errors_print_usage_and_exit_1() {
    for argv in [
        vec!["javaenv"],
        vec!["javaenv", "jdk"],
        vec!["javaenv", "JDK", "startup.bat"],
        vec!["javaenv", "java", "startup.bat"],
        vec!["javaenv", "", "startup.bat"],
    ] {
        let err = Args::try_parse_from(argv.clone()).unwrap_err();
        let (text, code) = usage_error(&err);
        assert_eq!(code, 1, "{argv:?}");
        assert!(text.contains("Usage:"), "{argv:?}: {text}");
        assert_eq!(text.matches("Usage:").count(), 1, "{argv:?}: {text}");
    }
}

#[test]
fn test_help_exits_0() {
    let err = Args::try_parse_from(["javaenv", "--help"]).unwrap_err();
    let (text, code) = usage_error(&err);
    assert_eq!(code, 0);
    assert!(text.contains("Usage:"));
}

#[test]
fn test_outcome_child_status() {
    assert_eq!(outcome(Ok(0)), (None, 0));
    assert_eq!(outcome(Ok(42)), (None, 42));
}

#[test]
fn test_outcome_resolution_error() {
    let err = LaunchError::KeyNotFound {
        path: "SOFTWARE\\JavaSoft\\Java Runtime Environment".into(),
    };
    let (message, code) = outcome(Err(err.into()));
    assert_eq!(code, 1);
    assert!(message.unwrap().contains("SOFTWARE\\JavaSoft\\Java Runtime Environment"));
}

#[test]
fn test_outcome_config_error() {
    let args = Args::try_parse_from(["javaenv", "--config", "/nonexistent/javaenv.toml", "jdk", "echo hi"])
        .unwrap();
    let (message, code) = outcome(handle_args(&args));
    assert_eq!(code, 1);
    assert!(message.unwrap().contains("Unable to read config file"));
}
