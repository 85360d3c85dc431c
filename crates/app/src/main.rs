use std::fmt;
use std::sync::Arc;

use api::{Api, ApiError, HttpConfig};
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use lingua_core::model::LessonId;
use services::{
    Clock, FlashcardLoopService, LessonService, ProgressService, ReviewLoopService,
    SentenceChallengeService, WordChallengeService,
};
use ui::{App, Page, UiApp, build_app_context};

const ENV_PAGE: &str = "LEARN_PAGE";

#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidPage { raw: String },
    InvalidApiUrl { raw: String },
    InvalidLesson { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidPage { raw } => write!(f, "invalid --page value: {raw}"),
            ArgsError::InvalidApiUrl { raw } => write!(f, "invalid --api-url value: {raw}"),
            ArgsError::InvalidLesson { raw } => write!(f, "invalid --lesson value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

/// Why the app stopped before or instead of launching.
#[derive(Debug)]
enum Failure {
    Usage(ArgsError),
    Runtime(Box<dyn std::error::Error>),
}

impl Failure {
    /// 2 for bad arguments, 1 for everything else.
    fn exit_code(&self) -> i32 {
        match self {
            Failure::Usage(_) => 2,
            Failure::Runtime(_) => 1,
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Usage(err) => fmt::Display::fmt(err, f),
            Failure::Runtime(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl From<ArgsError> for Failure {
    fn from(err: ArgsError) -> Self {
        Failure::Usage(err)
    }
}

impl From<ApiError> for Failure {
    fn from(err: ApiError) -> Self {
        Failure::Runtime(Box::new(err))
    }
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--api-url <url>] [--page <page>] [--lesson <id>]");
    eprintln!();
    eprintln!("Pages:");
    for page in Page::ALL {
        eprintln!("  {:<12} {}", page.slug(), page.title());
    }
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --api-url {}", HttpConfig::DEFAULT_BASE_URL);
    eprintln!("  --page {}", Page::default().slug());
    eprintln!("  --lesson {}", LessonId::default());
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  {}, {ENV_PAGE}, RUST_LOG", HttpConfig::ENV_BASE_URL);
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    config: HttpConfig,
    page: Page,
    lesson: LessonId,
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Launch(Args),
    Help,
}

fn parse_page(raw: String) -> Result<Page, ArgsError> {
    raw.parse().map_err(|_| ArgsError::InvalidPage { raw })
}

fn parse_lesson(raw: String) -> Result<LessonId, ArgsError> {
    raw.parse().map_err(|_| ArgsError::InvalidLesson { raw })
}

fn parse_api_url(raw: String) -> Result<HttpConfig, ArgsError> {
    let trimmed = raw.trim();
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ArgsError::InvalidApiUrl { raw });
    }
    Ok(HttpConfig::new(trimmed.trim_end_matches('/')))
}

impl Args {
    /// Flags win over the environment, which wins over defaults.
    fn parse(
        args: impl IntoIterator<Item = String>,
        config: HttpConfig,
        env_page: Option<String>,
    ) -> Result<Command, ArgsError> {
        let mut config = config;
        let mut page = match env_page.filter(|value| !value.trim().is_empty()) {
            Some(raw) => parse_page(raw)?,
            None => Page::default(),
        };

        let mut lesson = LessonId::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--api-url" => config = parse_api_url(require_value(&mut args, "--api-url")?)?,
                "--page" => page = parse_page(require_value(&mut args, "--page")?)?,
                "--lesson" => lesson = parse_lesson(require_value(&mut args, "--lesson")?)?,
                "--help" | "-h" => return Ok(Command::Help),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Command::Launch(Self {
            config,
            page,
            lesson,
        }))
    }
}

struct DesktopApp {
    page: Page,
    lesson: LessonId,
    review_loop: Arc<ReviewLoopService>,
    flashcard_loop: Arc<FlashcardLoopService>,
    word_challenges: Arc<WordChallengeService>,
    sentence_challenges: Arc<SentenceChallengeService>,
    lessons: Arc<LessonService>,
    progress: Arc<ProgressService>,
}

impl DesktopApp {
    fn new(page: Page, lesson: LessonId, api: Api) -> Self {
        Self {
            page,
            lesson,
            review_loop: Arc::new(ReviewLoopService::review(api.content, api.answers)),
            flashcard_loop: Arc::new(FlashcardLoopService::flashcards(api.flashcards)),
            word_challenges: Arc::new(WordChallengeService::new(Arc::clone(&api.challenges))),
            sentence_challenges: Arc::new(SentenceChallengeService::new(api.challenges)),
            lessons: Arc::new(LessonService::new(api.lessons)),
            progress: Arc::new(ProgressService::new(api.progress)),
        }
    }
}

impl UiApp for DesktopApp {
    fn start_page(&self) -> Page {
        self.page
    }

    fn clock(&self) -> Clock {
        Clock::System
    }

    fn lesson_id(&self) -> LessonId {
        self.lesson
    }

    fn review_loop(&self) -> Arc<ReviewLoopService> {
        Arc::clone(&self.review_loop)
    }

    fn flashcard_loop(&self) -> Arc<FlashcardLoopService> {
        Arc::clone(&self.flashcard_loop)
    }

    fn word_challenges(&self) -> Arc<WordChallengeService> {
        Arc::clone(&self.word_challenges)
    }

    fn sentence_challenges(&self) -> Arc<SentenceChallengeService> {
        Arc::clone(&self.sentence_challenges)
    }

    fn lessons(&self) -> Arc<LessonService> {
        Arc::clone(&self.lessons)
    }

    fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }
}

fn run() -> Result<(), Failure> {
    let command = Args::parse(
        std::env::args().skip(1),
        HttpConfig::from_env(),
        std::env::var(ENV_PAGE).ok(),
    )
    .inspect_err(|_| print_usage())?;

    let args = match command {
        Command::Help => {
            print_usage();
            return Ok(());
        }
        Command::Launch(args) => args,
    };

    log::info!(
        "opening {} against {}",
        args.page.slug(),
        args.config.base_url
    );
    let api = Api::http(args.config)?;
    let app: Arc<dyn UiApp> = Arc::new(DesktopApp::new(args.page, args.lesson, api));
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title(format!("Lingua · {}", args.page.title()))
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(err.exit_code());
    }
}
