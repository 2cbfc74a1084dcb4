//! shminify: command-line front end.
//!
//! Reads shell scripts from files or stdin and writes the minified text to
//! stdout, a single output file, or back in place.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use log::info;
use serde::Serialize;
use shminify::MinifyError;
use shminify::config::Config;
use shminify::pipeline::Pipeline;

#[derive(Parser, Debug)]
#[command(name = "shminify", version, about = "Minify shell scripts")]
struct Cli {
    /// Scripts to minify; reads stdin when none are given
    files: Vec<PathBuf>,

    /// Write the result to this file instead of stdout (single input only)
    #[arg(short, long, conflicts_with = "in_place")]
    output: Option<PathBuf>,

    /// Rewrite each input file with its minified text
    #[arg(short, long)]
    in_place: bool,

    /// Print one JSON report per input instead of raw text
    #[arg(long)]
    json: bool,

    /// Keep a leading `#!` line
    #[arg(long)]
    keep_shebang: bool,

    /// Configuration file to merge over the defaults
    #[arg(long, value_name = "PATH")]
    config: Option<String>,

    /// More log output (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Less log output (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    quiet: u8,
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Minify(#[from] MinifyError),

    #[error("{0}")]
    Usage(&'static str),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct Report<'a> {
    path: Option<&'a Path>,
    input_bytes: usize,
    output_bytes: usize,
    minified: &'a str,
}

/// One script to process: where it came from and what it contains.
#[derive(Debug)]
struct Input {
    path: Option<PathBuf>,
    text: String,
}

fn read_inputs(files: &[PathBuf]) -> Result<Vec<Input>, MinifyError> {
    if files.is_empty() {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|source| MinifyError::Io {
                path: PathBuf::from("<stdin>"),
                source,
            })?;
        return Ok(vec![Input { path: None, text }]);
    }

    files
        .iter()
        .map(|path| {
            let text = std::fs::read_to_string(path).map_err(|source| MinifyError::Io {
                path: path.clone(),
                source,
            })?;
            Ok(Input {
                path: Some(path.clone()),
                text,
            })
        })
        .collect()
}

fn write_file(path: &Path, text: &str) -> Result<(), MinifyError> {
    std::fs::write(path, text).map_err(|source| MinifyError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn check_usage(cli: &Cli) -> Result<(), CliError> {
    if cli.in_place && cli.files.is_empty() {
        return Err(CliError::Usage("--in-place needs at least one file"));
    }
    if cli.output.is_some() && cli.files.len() > 1 {
        return Err(CliError::Usage("--output takes a single input file"));
    }
    Ok(())
}

/// Minify one input, write any file target, and print to `out` whatever
/// belongs on stdout: the raw text, a JSON report line, or nothing.
fn process(
    cli: &Cli,
    config: &Config,
    pipeline: &Pipeline,
    input: &Input,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let mut minified = pipeline.run(&input.text)?;
    if config.settings.trailing_newline && !minified.is_empty() {
        minified.push('\n');
    }

    let label = input
        .path
        .as_deref()
        .map_or_else(|| "<stdin>".to_string(), |p| p.display().to_string());
    info!("{label}: {} -> {} bytes", input.text.len(), minified.len());

    if cli.in_place
        && let Some(path) = &input.path
    {
        write_file(path, &minified)?;
    } else if let Some(path) = &cli.output {
        write_file(path, &minified)?;
    }

    let text = if cli.json {
        let report = Report {
            path: input.path.as_deref(),
            input_bytes: input.text.len(),
            output_bytes: minified.len(),
            minified: &minified,
        };
        let mut line = serde_json::to_string(&report)?;
        line.push('\n');
        line
    } else if cli.in_place || cli.output.is_some() {
        return Ok(());
    } else {
        minified
    };

    out.write_all(text.as_bytes())
        .map_err(|source| MinifyError::Io {
            path: PathBuf::from("<stdout>"),
            source,
        })?;
    Ok(())
}

fn run(cli: &Cli, config: &Config) -> Result<(), CliError> {
    check_usage(cli)?;

    let pipeline = Pipeline::from_config(config);
    let mut stdout = std::io::stdout().lock();
    for input in read_inputs(&cli.files)? {
        process(cli, config, &pipeline, &input, &mut stdout)?;
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => match Config::load_from(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("shminify: {e}");
                std::process::exit(1);
            }
        },
        None => Config::load(),
    };
    if cli.keep_shebang {
        config.settings.keep_shebang = true;
    }

    let verbosity = i8::try_from(i16::from(cli.verbose) - i16::from(cli.quiet)).unwrap_or(0);
    shminify::logging::init(&config.logging, verbosity);

    if let Err(e) = run(&cli, &config) {
        eprintln!("shminify: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("shminify").chain(args.iter().copied())).unwrap()
    }

    fn stdin_input(text: &str) -> Input {
        Input {
            path: None,
            text: text.to_string(),
        }
    }

    /// Run `process` on one input and return what it printed.
    fn printed(cli: &Cli, config: &Config, input: &Input) -> String {
        let pipeline = Pipeline::from_config(config);
        let mut out = Vec::new();
        process(cli, config, &pipeline, input, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("shminify-{name}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    // ── Usage ──

    #[test]
    fn in_place_without_files_is_rejected() {
        let err = check_usage(&cli(&["-i"])).unwrap_err();
        assert!(matches!(err, CliError::Usage(_)));
        assert_eq!(err.to_string(), "--in-place needs at least one file");
    }

    #[test]
    fn output_with_several_files_is_rejected() {
        let err = check_usage(&cli(&["-o", "out.sh", "a.sh", "b.sh"])).unwrap_err();
        assert_eq!(err.to_string(), "--output takes a single input file");
    }

    #[test]
    fn output_with_one_file_is_accepted() {
        assert!(check_usage(&cli(&["-o", "out.sh", "a.sh"])).is_ok());
    }

    #[test]
    fn output_conflicts_with_in_place() {
        let parsed = Cli::try_parse_from(["shminify", "-i", "-o", "out.sh", "a.sh"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn verbosity_flags_count() {
        let parsed = cli(&["-vv", "-q"]);
        assert_eq!(parsed.verbose, 2);
        assert_eq!(parsed.quiet, 1);
    }

    // ── Stdout ──

    #[test]
    fn prints_minified_text() {
        let config = Config::default_config();
        let out = printed(&cli(&[]), &config, &stdin_input("echo a | cat\n"));
        assert_eq!(out, "echo a|cat");
    }

    #[test]
    fn trailing_newline_appended() {
        let mut config = Config::default_config();
        config.settings.trailing_newline = true;
        let out = printed(&cli(&[]), &config, &stdin_input("echo a | cat\n"));
        assert_eq!(out, "echo a|cat\n");
    }

    #[test]
    fn trailing_newline_skipped_for_empty_output() {
        let mut config = Config::default_config();
        config.settings.trailing_newline = true;
        let out = printed(&cli(&[]), &config, &stdin_input("# only a comment\n"));
        assert_eq!(out, "");
    }

    #[test]
    fn unbalanced_input_is_an_error() {
        let config = Config::default_config();
        let pipeline = Pipeline::from_config(&config);
        let mut out = Vec::new();
        let err = process(
            &cli(&[]),
            &config,
            &pipeline,
            &stdin_input("echo 'abc"),
            &mut out,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CliError::Minify(MinifyError::UnbalancedDelimiter { .. })
        ));
        assert!(out.is_empty());
    }

    // ── JSON ──

    #[test]
    fn json_report_for_stdin() {
        let config = Config::default_config();
        let out = printed(&cli(&["--json"]), &config, &stdin_input("echo  a\n"));
        assert!(out.ends_with('\n'));
        let report: serde_json::Value = serde_json::from_str(out.trim_end()).unwrap();
        assert_eq!(report["path"], serde_json::Value::Null);
        assert_eq!(report["input_bytes"], 8);
        assert_eq!(report["output_bytes"], 6);
        assert_eq!(report["minified"], "echo a");
    }

    #[test]
    fn json_report_counts_trailing_newline() {
        let mut config = Config::default_config();
        config.settings.trailing_newline = true;
        let input = Input {
            path: Some(PathBuf::from("script.sh")),
            text: "ls\n".to_string(),
        };
        let out = printed(&cli(&["--json"]), &config, &input);
        let report: serde_json::Value = serde_json::from_str(out.trim_end()).unwrap();
        assert_eq!(report["path"], "script.sh");
        assert_eq!(report["output_bytes"], 3);
        assert_eq!(report["minified"], "ls\n");
    }

    // ── File targets ──

    #[test]
    fn output_file_receives_text() {
        let dir = scratch_dir("output");
        let target = dir.join("out.sh");
        let target_arg = target.to_str().unwrap();
        let config = Config::default_config();

        let out = printed(
            &cli(&["-o", target_arg, "in.sh"]),
            &config,
            &stdin_input("if true\nthen\n  echo x\nfi\n"),
        );
        assert_eq!(out, "");
        assert_eq!(
            std::fs::read_to_string(&target).unwrap(),
            "if true;then echo x;fi"
        );

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn in_place_rewrites_input() {
        let dir = scratch_dir("in-place");
        let script = dir.join("script.sh");
        std::fs::write(&script, "echo hi # greet\necho bye\n").unwrap();
        let script_arg = script.to_str().unwrap();
        let config = Config::default_config();

        let args = cli(&["-i", script_arg]);
        let inputs = read_inputs(&args.files).unwrap();
        assert_eq!(inputs.len(), 1);
        let out = printed(&args, &config, &inputs[0]);
        assert_eq!(out, "");
        assert_eq!(
            std::fs::read_to_string(&script).unwrap(),
            "echo hi;echo bye"
        );

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn in_place_with_json_still_reports() {
        let dir = scratch_dir("in-place-json");
        let script = dir.join("script.sh");
        std::fs::write(&script, "ls   -la\n").unwrap();
        let script_arg = script.to_str().unwrap();
        let config = Config::default_config();

        let args = cli(&["-i", "--json", script_arg]);
        let inputs = read_inputs(&args.files).unwrap();
        let out = printed(&args, &config, &inputs[0]);
        let report: serde_json::Value = serde_json::from_str(out.trim_end()).unwrap();
        assert_eq!(report["minified"], "ls -la");
        assert_eq!(std::fs::read_to_string(&script).unwrap(), "ls -la");

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_input_file_is_an_io_error() {
        let err = read_inputs(&[PathBuf::from("/nonexistent/shminify/in.sh")]).unwrap_err();
        assert!(matches!(err, MinifyError::Io { .. }));
    }
}
