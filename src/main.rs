mod report;

use excerpta::{
    FilterState, Language, Options, QueryParams, RecordStore, SessionConfig, paginate, search_verbose_with,
};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "EXCERPTA_LOG";

fn main() {
    init_logging();

    let cli = match parse_args() {
        Ok(cli) => cli,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    if let Err(err) = run(&cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).with_target(false).try_init();
}

fn run(cli: &CliConfig) -> excerpta::Result<()> {
    let store = RecordStore::load_dir(&cli.data)?;
    let config = match &cli.config {
        Some(path) => SessionConfig::load(path)?,
        None => SessionConfig::default(),
    };

    let mut state = FilterState::from_params(&QueryParams::parse(&cli.params));
    state.retain_known(&store);

    let result = search_verbose_with(&store, &state, cli.language, &Options::from(&config));
    let page = paginate(&result.records, cli.page, config.page_size);
    let report = report::Report { store: &store, state: &state, language: cli.language, result: &result, page: &page };
    report::print_search(&report, cli.color);
    Ok(())
}

struct CliConfig {
    data: PathBuf,
    language: Language,
    params: String,
    page: usize,
    config: Option<PathBuf>,
    color: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut data: Option<PathBuf> = None;
    let mut language = Language::default();
    let mut params = String::new();
    let mut page = 1;
    let mut config: Option<PathBuf> = None;
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag.to_string(), Some(value.to_string())),
            _ => (arg.clone(), None),
        };
        let mut value = |name: &str| match inline.clone() {
            Some(v) => Ok(v),
            None => args.next().ok_or_else(|| format!("error: {name} expects a value")),
        };

        match flag.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("excerpta {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--data" | "-d" => data = Some(PathBuf::from(value("--data")?)),
            "--lang" | "-l" => language = parse_language(&value("--lang")?)?,
            "--params" | "-p" => params = value("--params")?,
            "--page" => page = parse_page(&value("--page")?)?,
            "--config" | "-c" => config = Some(PathBuf::from(value("--config")?)),
            _ => return Err(format!("error: unknown option '{arg}'\n\n{}", help_text())),
        }
    }

    let data = data.ok_or_else(|| format!("error: --data is required\n\n{}", help_text()))?;
    Ok(CliConfig { data, language, params, page, config, color })
}

fn parse_language(value: &str) -> Result<Language, String> {
    match value {
        "zh" | "en" => Ok(Language::from_locale(value)),
        _ => Err(format!("error: invalid --lang '{value}' (expected zh or en)")),
    }
}

fn parse_page(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(format!("error: invalid --page '{value}' (expected a number >= 1)")),
    }
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "excerpta {version}

Faceted browser for tagged excerpt corpora.

Usage:
  excerpta --data <dir> [OPTIONS]

Options:
  -d, --data <dir>           Dataset directory (sentences.json plus one metadata
                             file per axis).
  -l, --lang <zh|en>         Active corpus language. Default: zh
  -p, --params <query>       Filter state as a URL query string, e.g.
                             'q=moon&themes=love,war&themesAll=true'.
  --page <n>                 Result page to show (clamped). Default: 1
  -c, --config <file>        Session config JSON.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Environment:
  {log_env}                Log filter (e.g. debug, excerpta=trace). Default: warn

Exit codes:
  0  Success.
  1  Dataset or config could not be loaded.
  2  Invalid arguments.
",
        version = env!("CARGO_PKG_VERSION"),
        log_env = LOG_ENV,
    )
}
