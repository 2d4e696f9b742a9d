//! Lenjo CLI - Command line token stream inspector
//!
//! Reads a (relaxed) JSON file and prints its token sequence.
//! Project defaults come from an optional lenjo.json next to the input.

use clap::Parser;
use std::path::{Path, PathBuf};
use std::process;
use tracing::Level;

mod config;
mod logging;
mod platform;

use crate::config::LogConfig;
use crate::logging::LogFormat;
use crate::platform::{print_error_with_source, print_tokens};
use lenjo_api::{init_config, tokenize, RunConfig};
use lenjo_config::ReaderConfig;

/// lenjo.json 结构
#[derive(Debug, Default, serde::Deserialize)]
struct ProjectJson {
    /// 默认输入文件路径（可被命令行参数覆盖）
    entry: Option<String>,
    /// 字符流配置
    reader: Option<ReaderConfig>,
    /// 输出配置
    output: Option<OutputConfig>,
    /// 日志配置
    log: Option<LogSettings>,
}

/// 输出配置
#[derive(Debug, Default, serde::Deserialize)]
struct OutputConfig {
    /// 是否以 JSON 形式输出 token 流
    dump_tokens: Option<bool>,
    /// 是否回显源文本
    show_source: Option<bool>,
}

/// 日志配置
#[derive(Debug, Default, serde::Deserialize)]
struct LogSettings {
    /// 日志级别: "silent", "error", "warn", "info", "debug", "trace"
    level: Option<String>,
    /// 日志格式: "pretty", "compact", "json"
    format: Option<String>,
    /// 日志文件路径（追加写入）
    file: Option<String>,
}

#[derive(Parser)]
#[command(
    name = "lenjo",
    about = "Lenjo relaxed JSON tokenizer - token stream inspector",
    version = "0.1.0"
)]
struct Cli {
    /// Input file (overrides the project config entry)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Project configuration file path
    #[arg(long, value_name = "CONFIG", default_value = "lenjo.json")]
    config: PathBuf,

    /// Dump the token stream as JSON
    #[arg(long)]
    dump_tokens: bool,

    /// Echo the numbered source text before the tokens
    #[arg(long)]
    show_source: bool,

    /// Log level: silent, error, warn, info, debug, trace
    #[arg(long)]
    log_level: Option<String>,

    /// Log format: pretty, compact, json
    #[arg(long)]
    log_format: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    // Read optional project config
    let project = match read_project_json(&cli.config) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    // Initialize logging before any tokenization work
    init_logging(&cli, &project);

    // Resolve input file: CLI argument wins over project entry
    let entry_path = match resolve_entry_path(&cli, &project) {
        Some(p) => p,
        None => {
            eprintln!(
                "Error: no input file\n\n用法: lenjo <FILE>，或在 '{}' 中指定 'entry' 字段",
                cli.config.display()
            );
            process::exit(1);
        }
    };

    // Read source file
    let source = match std::fs::read_to_string(&entry_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!(
                "Error: Cannot read input file '{}': {}",
                entry_path.display(),
                e
            );
            process::exit(1);
        }
    };

    // Build run configuration and install the global singleton
    let run_config = build_run_config(&cli, &project);
    init_config(run_config.clone());

    // Show source
    if run_config.show_source {
        println!("[Source]");
        for (i, line) in source.lines().enumerate() {
            println!("{:3} | {}", i + 1, line);
        }
        println!("[Tokens]");
    }

    // Tokenize
    match tokenize(&source, &run_config) {
        Ok(output) => {
            if run_config.dump_tokens {
                dump_tokens_to_stdout(&entry_path, &output.tokens);
            } else {
                print_tokens(&output.tokens);
            }
        }
        Err(e) => {
            print_error_with_source(&e, &source);
            process::exit(1);
        }
    }
}

/// Read and parse the optional project config file
///
/// A missing file is not an error; a malformed one is.
fn read_project_json(path: &Path) -> Result<ProjectJson, String> {
    if !path.exists() {
        return Ok(ProjectJson::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("无法读取 '{}': {}", path.display(), e))?;

    serde_json::from_str(&content).map_err(|e| format!("解析 '{}' 失败: {}", path.display(), e))
}

/// Resolve the input path: CLI argument, else project entry relative to the config
fn resolve_entry_path(cli: &Cli, project: &ProjectJson) -> Option<PathBuf> {
    if let Some(file) = &cli.file {
        return Some(file.clone());
    }

    let entry = project.entry.as_ref()?;
    if entry.is_empty() {
        return None;
    }

    let base_dir = cli.config.parent().unwrap_or(Path::new("."));
    Some(base_dir.join(entry))
}

/// Build run configuration, CLI flags overriding project settings
fn build_run_config(cli: &Cli, project: &ProjectJson) -> RunConfig {
    let output = project.output.as_ref();

    let dump_tokens = cli.dump_tokens || output.and_then(|o| o.dump_tokens).unwrap_or(false);
    let show_source = cli.show_source || output.and_then(|o| o.show_source).unwrap_or(false);
    let reader = project.reader.clone().unwrap_or_default();

    RunConfig {
        show_source,
        dump_tokens,
        reader,
    }
}

/// Initialize the tracing subscriber from CLI flags and project settings
fn init_logging(cli: &Cli, project: &ProjectJson) {
    let log = project.log.as_ref();

    let level = cli
        .log_level
        .as_deref()
        .or_else(|| log.and_then(|l| l.level.as_deref()))
        .and_then(parse_log_level)
        .unwrap_or(Level::WARN);

    let format = cli
        .log_format
        .as_deref()
        .or_else(|| log.and_then(|l| l.format.as_deref()))
        .and_then(parse_log_format)
        .unwrap_or(LogFormat::Compact);

    let log_config = LogConfig {
        global: level,
        stream: None,
        reader: None,
    };

    let file = log.and_then(|l| l.file.as_deref());
    logging::init_with_file(&log_config, format, file);
}

/// Parse log level string
fn parse_log_level(s: &str) -> Option<Level> {
    match s.to_lowercase().as_str() {
        "silent" => Some(Level::ERROR), // silent = only errors
        "error" => Some(Level::ERROR),
        "warn" => Some(Level::WARN),
        "info" => Some(Level::INFO),
        "debug" => Some(Level::DEBUG),
        "trace" => Some(Level::TRACE),
        _ => None,
    }
}

/// Parse log format string
fn parse_log_format(s: &str) -> Option<LogFormat> {
    match s.to_lowercase().as_str() {
        "pretty" => Some(LogFormat::Pretty),
        "compact" => Some(LogFormat::Compact),
        "json" => Some(LogFormat::Json),
        _ => None,
    }
}

/// 将 token 流输出到 stdout（JSON 格式）
fn dump_tokens_to_stdout(entry: &Path, tokens: &[lenjo_api::Token<lenjo_api::JsonTokenKind>]) {
    let output = serde_json::json!({
        "entry": entry.display().to_string(),
        "token_count": tokens.len(),
        "tokens": tokens,
    });
    println!("{}", serde_json::to_string_pretty(&output).unwrap());
}
