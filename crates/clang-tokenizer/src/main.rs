use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{Parser, ValueEnum};
use lsp_types::SemanticTokens;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use clang_tokenizer::{
    Token, TokenRecord, TokenizeError, Tokenizer, TokenizerSettings,
    config::LogLevel,
    semantic_tokens::{get_legend, semantic_tokens},
    tokens::{dump_line, dump_tokens},
};

#[derive(Parser, Debug)]
#[command(name = "clang-tokenizer", version, about)]
struct Args {
    /// C++ source file to tokenize.
    file: PathBuf,

    /// Directory relative paths in compiler arguments are resolved against.
    #[arg(long)]
    working_directory: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Print the fixed-width cursor dump instead of the token list.
    #[arg(long)]
    dump: bool,

    /// Configuration file; defaults to the nearest `clang-tokenizer.toml`.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, short)]
    verbose: bool,

    #[arg(long)]
    log_file: Option<String>,

    /// Extra compiler arguments, after `--`.
    #[arg(last = true)]
    compiler_args: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Lsp,
}

fn default_log_path() -> PathBuf {
    let dir = dirs_or_tmp();
    dir.join("clang-tokenizer.log")
}

fn dirs_or_tmp() -> PathBuf {
    if let Some(cache) = std::env::var_os("HOME") {
        let dir = PathBuf::from(cache).join(".clang-tokenizer");
        if std::fs::create_dir_all(&dir).is_ok() {
            return dir;
        }
    }
    std::env::temp_dir()
}

fn init_logging(
    args: &Args,
    level: LogLevel,
) -> PathBuf {
    let level = if args.verbose {
        LogLevel::Debug.max(level)
    } else {
        level
    };
    let directive = format!("clang_tokenizer={}", level.as_directive());

    let log_path = args.log_file.as_ref().map(PathBuf::from).unwrap_or_else(default_log_path);

    let file_appender = tracing_appender::rolling::never(
        log_path.parent().unwrap_or(Path::new(".")),
        log_path.file_name().unwrap_or(std::ffi::OsStr::new("clang-tokenizer.log")),
    );

    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_target(false)
        .with_filter(EnvFilter::new(&directive));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_filter(EnvFilter::new(&directive));

    tracing_subscriber::registry().with(file_layer).with(stderr_layer).init();

    log_path
}

fn main() -> ExitCode {
    let args = Args::parse();

    let working_directory = args
        .working_directory
        .clone()
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    let settings = TokenizerSettings::load(args.config.as_deref(), &working_directory);
    let level = settings.as_ref().map(|s| s.logging.level).unwrap_or_default();
    let log_path = init_logging(&args, level);

    info!("Starting clang-tokenizer v{}", env!("CARGO_PKG_VERSION"));
    info!("Log file: {}", log_path.display());

    match settings.and_then(|settings| run(&args, &settings, &working_directory)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        },
    }
}

fn run(
    args: &Args,
    settings: &TokenizerSettings,
    working_directory: &Path,
) -> Result<(), TokenizeError> {
    let tokenizer = Tokenizer::new(&settings.compiler)?;
    let tu = tokenizer.parse(&args.file, &args.compiler_args, working_directory)?;
    let tokens = tu.tokens();

    info!("{} tokens in {}", tokens.len(), tu.spelling());
    dump_tokens(&tokens);

    if args.dump {
        for token in &tokens {
            println!("{}", dump_line(token));
        }
        return Ok(());
    }

    match args.format {
        OutputFormat::Table => print_table(&tokens),
        OutputFormat::Json => {
            let records: Vec<TokenRecord> = tokens.iter().map(Token::to_record).collect();
            println!("{}", serde_json::to_string_pretty(&records).map_err(TokenizeError::Encode)?);
        },
        OutputFormat::Lsp => {
            let encoded = SemanticTokens {
                result_id: None,
                data: semantic_tokens(&tokens),
            };
            let payload = serde_json::json!({
                "legend": get_legend(),
                "tokens": encoded,
            });
            println!("{}", serde_json::to_string_pretty(&payload).map_err(TokenizeError::Encode)?);
        },
    }

    Ok(())
}

fn print_table(tokens: &[Token<'_>]) {
    for token in tokens {
        let category = token.category();
        println!(
            "{:>5}:{:<4} {:<28} {:>2}  {}",
            token.line(),
            token.column(),
            category.name(),
            category.id(),
            token.name()
        );
    }
}
