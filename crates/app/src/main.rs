use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{
    Clock, ConfigError, FileQuestionSource, MissedQuestionExporter, QuizConfig, QuizLoopService,
};
use tracing::info;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidNumber { flag: &'static str, raw: String },
    Config(ConfigError),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidNumber { flag, raw } => write!(f, "invalid {flag} value: {raw}"),
            ArgsError::Config(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ArgsError {}

impl From<ConfigError> for ArgsError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn require_number<T: std::str::FromStr>(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<T, ArgsError> {
    let raw = require_value(args, flag)?;
    raw.trim()
        .parse()
        .map_err(|_| ArgsError::InvalidNumber { flag, raw })
}

struct DesktopApp {
    config: QuizConfig,
    quiz_loop: Arc<QuizLoopService>,
    exporter: Arc<MissedQuestionExporter>,
}

impl UiApp for DesktopApp {
    fn config(&self) -> QuizConfig {
        self.config.clone()
    }

    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    fn exporter(&self) -> Arc<MissedQuestionExporter> {
        Arc::clone(&self.exporter)
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui    [options]   # launch the quiz window (default)");
    eprintln!("  cargo run -p app -- check [options]   # load the questions and report");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --source-url <url>       CSV export URL of the question sheet");
    eprintln!("  --csv <path>             read questions from a local CSV file instead");
    eprintln!("  --max-questions <n>      questions per round (default 10)");
    eprintln!("  --reveal-delay-ms <ms>   how long an answer stays revealed (default 1000)");
    eprintln!("  --export-dir <dir>       where the mistakes PDF is written (default .)");
    eprintln!("  --seed <n>               fixed shuffle seed");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_SOURCE_URL, QUIZ_MAX_QUESTIONS, QUIZ_REVEAL_DELAY_MS,");
    eprintln!("  QUIZ_EXPORT_DIR, QUIZ_SEED");
    eprintln!("  RUST_LOG (default: info)");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Check,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "check" => Some(Self::Check),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct Args {
    config: QuizConfig,
    csv: Option<PathBuf>,
}

enum Parsed {
    Run(Args),
    Help,
}

impl Args {
    /// Flags override whatever `load_env` reads from the environment.
    ///
    /// `--help` wins before the environment is read, so a bad `QUIZ_*`
    /// variable never hides the usage text.
    fn parse(
        load_env: impl FnOnce() -> Result<QuizConfig, ConfigError>,
        args: Vec<String>,
    ) -> Result<Parsed, ArgsError> {
        if args.iter().any(|arg| arg == "--help" || arg == "-h") {
            return Ok(Parsed::Help);
        }

        let mut config = load_env()?;
        let mut csv = None;
        let args = &mut args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--source-url" => {
                    let value = require_value(args, "--source-url")?;
                    config = config.with_source_url(&value)?;
                }
                "--csv" => {
                    csv = Some(PathBuf::from(require_value(args, "--csv")?));
                }
                "--max-questions" => {
                    config = config.with_max_questions(require_number(args, "--max-questions")?)?;
                }
                "--reveal-delay-ms" => {
                    let millis: u64 = require_number(args, "--reveal-delay-ms")?;
                    config = config.with_reveal_delay(Duration::from_millis(millis));
                }
                "--export-dir" => {
                    config = config.with_export_dir(require_value(args, "--export-dir")?);
                }
                "--seed" => {
                    config = config.with_seed(Some(require_number(args, "--seed")?));
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Parsed::Run(Self { config, csv }))
    }

    fn quiz_loop(&self, clock: Clock) -> QuizLoopService {
        match &self.csv {
            Some(path) => QuizLoopService::with_source(
                clock,
                &self.config,
                Arc::new(FileQuestionSource::new(path.clone())),
            ),
            None => QuizLoopService::from_config(clock, &self.config),
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // No subcommand means the UI.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some(first) if first.starts_with('-') => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with('-') {
        argv.remove(0);
    }

    let parsed = Args::parse(QuizConfig::from_env, argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    let Parsed::Run(args) = parsed else {
        print_usage();
        return Ok(());
    };

    init_tracing();
    let clock = Clock::system();
    let quiz_loop = Arc::new(args.quiz_loop(clock));

    match cmd {
        Command::Ui => {
            info!(
                source = %quiz_loop.source_description(),
                max_questions = args.config.max_questions,
                "launching quiz window"
            );
            let exporter = Arc::new(MissedQuestionExporter::new(args.config.export_dir.clone()));
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
                config: args.config,
                quiz_loop,
                exporter,
            });
            let context = build_app_context(&app);

            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Quiz")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Check => {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;
            let session = runtime.block_on(quiz_loop.load_session())?;
            println!(
                "{}: {} questions selected for a round",
                quiz_loop.source_description(),
                session.total_questions()
            );
            Ok(())
        }
    }
}

fn main() {
    if let Err(err) = run() {
        // Binary glue: report once and exit.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
