use clap::{Parser, ValueEnum};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use slog::{error, info, warn, Logger};
use swhid_cid::{logging, verify_block_file, Codec, ConvertError, Converter, ErrorMode};

#[derive(Parser)]
#[command(name = "swhid2cid")]
#[command(about = "Convert Software Heritage identifiers (SWHID) to base16 CIDs")]
struct Cli {
    /// Keep converting after a failing token and report every failure
    #[arg(short, long)]
    keep_going: bool,

    /// Read tokens as CIDs and print the SWHIDs they may denote
    #[arg(short, long)]
    decode: bool,

    /// Check that FILE holds the block named by each decoded CID
    #[arg(long, value_name = "FILE", requires = "decode")]
    block: Option<PathBuf>,

    /// Codec for bare hashes given without a SWHID prefix
    #[arg(long, value_enum, default_value_t = DefaultCodec::Raw)]
    default_codec: DefaultCodec,

    /// Log every conversion to standard error
    #[arg(short, long)]
    verbose: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// SWHIDs or hex hashes (CIDs with --decode)
    tokens: Vec<String>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DefaultCodec {
    Raw,
    GitRaw,
}

impl From<DefaultCodec> for Codec {
    fn from(codec: DefaultCodec) -> Self {
        match codec {
            DefaultCodec::Raw => Codec::Raw,
            DefaultCodec::GitRaw => Codec::GitRaw,
        }
    }
}

fn print_usage(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "usage: swhid2cid [list of swhids or hashes]...")?;
    writeln!(out, "Alternatively, copy the hash from the SWHID and paste f01781114 in front")
}

fn report(logger: &Logger, token: &str, err: &ConvertError) {
    if err.is_foreign() {
        warn!(logger, "not a SWHID CID"; "token" => token, "reason" => %err);
    } else {
        error!(logger, "conversion failed"; "token" => token, "error" => %err);
    }
}

fn encode(cli: &Cli, converter: &Converter, logger: &Logger, out: &mut dyn Write) -> io::Result<bool> {
    let batch = converter.convert_all(&cli.tokens);
    for (token, result) in &batch.outcomes {
        match result {
            Ok(conversion) => match cli.format {
                Format::Text => writeln!(out, "{}", conversion.base16())?,
                Format::Json => writeln!(out, "{}", serde_json::to_string(conversion)?)?,
            },
            Err(err) => report(logger, token, err),
        }
    }
    summarize(logger, batch.failures(), batch.skipped);
    Ok(batch.is_success())
}

fn decode(cli: &Cli, converter: &Converter, logger: &Logger, out: &mut dyn Write) -> io::Result<bool> {
    let batch = converter.resolve_all(&cli.tokens);
    let mut ok = batch.is_success();
    let mut skipped = batch.skipped;

    for (index, (token, result)) in batch.outcomes.iter().enumerate() {
        let target = match result {
            Ok(target) => target,
            Err(err) => {
                report(logger, token, err);
                continue;
            }
        };

        if let Some(path) = &cli.block {
            if let Err(err) = verify_block_file(target.cid(), path) {
                report(logger, token, &err);
                ok = false;
                if converter.error_mode == ErrorMode::FailFast {
                    skipped += batch.outcomes.len() - index - 1;
                    break;
                }
                continue;
            }
            info!(logger, "block verified"; "token" => token.as_str(), "file" => %path.display());
        }

        let candidates: Vec<String> = target.candidates().iter().map(|s| s.to_string()).collect();
        match cli.format {
            Format::Text => writeln!(out, "{}", candidates.join(" "))?,
            Format::Json => {
                let record = serde_json::json!({
                    "input": token,
                    "codec": target.codec(),
                    "hash": target.hash_hex(),
                    "candidates": candidates,
                });
                writeln!(out, "{}", record)?
            }
        }
    }
    summarize(logger, batch.failures(), skipped);
    Ok(ok)
}

fn summarize(logger: &Logger, failures: usize, skipped: usize) {
    if skipped > 0 {
        warn!(logger, "stopped at first failure"; "skipped" => skipped);
    } else if failures > 1 {
        error!(logger, "some tokens failed"; "failures" => failures);
    }
}

fn run(cli: &Cli, logger: &Logger, out: &mut dyn Write) -> io::Result<bool> {
    if cli.tokens.is_empty() {
        print_usage(out)?;
        return Ok(true);
    }

    let error_mode = if cli.keep_going {
        ErrorMode::CollectAndReport
    } else {
        ErrorMode::FailFast
    };
    let converter = Converter::new()
        .with_default_codec(cli.default_codec.into())
        .with_error_mode(error_mode)
        .with_logger(logger.clone());

    if cli.decode {
        decode(cli, &converter, logger, out)
    } else {
        encode(cli, &converter, logger, out)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let logger = logging::create_logger(cli.verbose);

    let result = {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        run(&cli, &logger, &mut out).and_then(|ok| out.flush().map(|_| ok))
    };
    if let Err(err) = &result {
        error!(logger, "failed to write output"; "error" => %err);
    }

    // Dropping the root logger flushes the async drain.
    drop(logger);
    match result {
        Ok(true) => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slog::{o, Drain, Level, OwnedKVList, Record};
    use std::fs;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    const HASH: &str = "94a9ed024d3859793618152ea559a168bbcbb5e2";

    fn run_args(args: &[&str]) -> (bool, String) {
        let cli = Cli::parse_from(std::iter::once("swhid2cid").chain(args.iter().copied()));
        let mut out = Vec::new();
        let ok = run(&cli, &logging::discard(), &mut out).unwrap();
        (ok, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_no_tokens_prints_usage() {
        let (ok, out) = run_args(&[]);
        assert!(ok);
        assert!(out.starts_with("usage: swhid2cid"));
    }

    #[test]
    fn test_one_line_per_token_in_order() {
        let swhid = format!("swh:1:rev:{}", HASH);
        let (ok, out) = run_args(&[&swhid, HASH]);

        assert!(ok);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines, vec![
            format!("f01781114{}", HASH),
            format!("f01551114{}", HASH),
        ]);
    }

    #[test]
    fn test_unknown_type_fails_without_output() {
        let bad = format!("swh:1:xyz:{}", HASH);
        let (ok, out) = run_args(&[&bad, HASH]);

        assert!(!ok);
        assert!(out.is_empty());
    }

    #[test]
    fn test_keep_going_prints_later_tokens() {
        let bad = format!("swh:1:xyz:{}", HASH);
        let (ok, out) = run_args(&["--keep-going", &bad, HASH]);

        assert!(!ok);
        assert_eq!(out.lines().count(), 1);
    }

    #[test]
    fn test_snapshot_still_outputs() {
        let snp = format!("swh:1:snp:{}", HASH);
        let (ok, out) = run_args(&[&snp]);

        assert!(ok);
        assert_eq!(out.trim(), format!("f01f0031114{}", HASH));
    }

    #[test]
    fn test_json_format() {
        let swhid = format!("swh:1:dir:{}", HASH);
        let (_, out) = run_args(&["--format", "json", &swhid]);
        let value: serde_json::Value = serde_json::from_str(out.trim()).unwrap();

        assert_eq!(value["codec"], "git-raw");
        assert_eq!(value["object_type"], "dir");
    }

    #[test]
    fn test_decode_lists_candidates() {
        let cid = format!("f01781114{}", HASH);
        let (ok, out) = run_args(&["--decode", &cid]);

        assert!(ok);
        assert_eq!(
            out.trim(),
            format!("swh:1:cnt:{h} swh:1:dir:{h} swh:1:rev:{h} swh:1:rel:{h}", h = HASH)
        );
    }

    #[test]
    fn test_decode_with_block() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("block");
        fs::write(&path, b"blob 0\0").unwrap();

        let good = "f01781114e69de29bb2d1d6434b8b29ae775ad8c2e48c5391";
        let (ok, out) = run_args(&["--decode", "--block", path.to_str().unwrap(), good]);
        assert!(ok);
        assert_eq!(out.lines().count(), 1);

        let bad = format!("f01781114{}", HASH);
        let (ok, out) = run_args(&["--decode", "--block", path.to_str().unwrap(), &bad]);
        assert!(!ok);
        assert!(out.is_empty());
    }

    #[derive(Clone, Default)]
    struct Warnings(Arc<Mutex<Vec<String>>>);

    impl Drain for Warnings {
        type Ok = ();
        type Err = slog::Never;

        fn log(&self, record: &Record, _: &OwnedKVList) -> Result<(), slog::Never> {
            if record.level() == Level::Warning {
                self.0.lock().unwrap().push(record.msg().to_string());
            }
            Ok(())
        }
    }

    #[test]
    fn test_block_mismatch_stops_and_counts_rest() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("block");
        fs::write(&path, b"blob 0\0").unwrap();

        let bad = format!("f01781114{}", HASH);
        let good = "f01781114e69de29bb2d1d6434b8b29ae775ad8c2e48c5391";
        let cli = Cli::parse_from(["swhid2cid", "--decode", "--block", path.to_str().unwrap(), bad.as_str(), good]);

        let warnings = Warnings::default();
        let logger = slog::Logger::root(warnings.clone(), o!());
        let mut out = Vec::new();
        let ok = run(&cli, &logger, &mut out).unwrap();

        assert!(!ok);
        assert!(out.is_empty());
        assert_eq!(*warnings.0.lock().unwrap(), vec!["stopped at first failure".to_string()]);
    }
}
