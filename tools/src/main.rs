use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use quiz::{
    count_label, generate_questions, load_shared, retry_url, share_intent_url, share_text,
    share_url, switch_language_url, AnswerOutcome, CountCache, Dataset, Language, LaunchMode,
    QuizConfig, Session, ShareAffordance, Tick, TimeoutKind,
};
use quizshare_tools::{
    format_decode_pretty, format_inspect, inspect_token, load_dataset, render_question,
    render_results, DecodeOutput, MessageStore,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Parser)]
#[command(
    name = "quizshare",
    version,
    about = "Play quizshare quizzes and inspect share links"
)]
struct Cli {
    #[command(flatten)]
    options: Options,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct Options {
    /// Character dataset JSON.
    #[arg(long, global = true, env = "QUIZSHARE_DATA", default_value = "data/characters.json")]
    data: PathBuf,
    /// Directory holding `<lang>.json` message tables.
    #[arg(long, global = true, env = "QUIZSHARE_I18N", default_value = "data/i18n")]
    i18n: PathBuf,
    /// Display language (`ja` or `en`). Defaults to the link's language.
    #[arg(long, global = true, env = "QUIZSHARE_LANG")]
    lang: Option<Language>,
    /// Canonical page URL used for share and retry links.
    #[arg(long, global = true, env = "QUIZSHARE_PAGE_URL", default_value = quiz::DEFAULT_PAGE_URL)]
    page_url: Url,
    /// File caching the character count.
    #[arg(long, global = true, env = "QUIZSHARE_CACHE", default_value = ".quizshare-count")]
    cache: PathBuf,
    /// Log filter, e.g. `warn` or `quiz=debug`.
    #[arg(long, global = true, env = "QUIZSHARE_LOG", default_value = "warn")]
    log: String,
}

#[derive(Subcommand)]
enum Command {
    /// Play a quiz in the terminal.
    Play {
        /// Seed for a reproducible quiz.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show a shared result from a link or bare token.
    View {
        /// Share link or token.
        link: String,
    },
    /// Decode a token into structured output.
    Decode {
        /// Share link or token.
        link: String,
        /// Output format.
        #[arg(long, value_enum, default_value_t = DecodeFormat::Json)]
        format: DecodeFormat,
    },
    /// Show the bit layout of a token.
    Inspect {
        /// Share link or token.
        link: String,
    },
    /// Print the link after switching its language.
    Relang {
        /// Page link, with or without a share token.
        link: Url,
        /// Target language.
        #[arg(long)]
        to: Language,
    },
    /// Refresh and print the cached character count.
    Count,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DecodeFormat {
    Json,
    Pretty,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.options.log)?;

    let config = QuizConfig {
        page_url: cli.options.page_url.to_string(),
        ..QuizConfig::default()
    };

    match cli.command {
        Command::Play { seed } => play(&cli.options, &config, seed),
        Command::View { link } => view(&cli.options, &config, &link),
        Command::Decode { link, format } => {
            let token = token_from_arg(&link, &config)?;
            let decoded = wire::decode_token(&token, &config.limits)
                .with_context(|| format!("decode token {token}"))?;
            match format {
                DecodeFormat::Json => {
                    let output = DecodeOutput {
                        token: &token,
                        decoded: &decoded,
                        wrong: decoded.wrong_count(),
                    };
                    let json = serde_json::to_string_pretty(&output).context("serialize json")?;
                    println!("{json}");
                }
                DecodeFormat::Pretty => print!("{}", format_decode_pretty(&decoded)),
            }
            Ok(())
        }
        Command::Inspect { link } => {
            let token = token_from_arg(&link, &config)?;
            let report = inspect_token(&token, &config.limits)
                .with_context(|| format!("inspect token {token}"))?;
            print!("{}", format_inspect(&report));
            Ok(())
        }
        Command::Relang { link, to } => {
            println!("{}", switch_language_url(&link, to, &config.limits));
            Ok(())
        }
        Command::Count => {
            let language = cli.options.lang.unwrap_or_default();
            let mut store = MessageStore::new(&cli.options.i18n);
            let cache = CountCache::new(&cli.options.cache);
            let messages = store.get(language)?;
            println!("{}", count_label(messages, cache.load()));
            let dataset = load_dataset(&cli.options.data)?;
            let count = cache
                .refresh(&dataset, config.count_exclusions)
                .with_context(|| format!("write count cache {}", cache.path().display()))?;
            println!("{}", count_label(messages, count));
            Ok(())
        }
    }
}

fn init_logging(filter: &str) -> Result<()> {
    let filter = EnvFilter::try_new(filter).with_context(|| format!("invalid log filter {filter}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
    Ok(())
}

/// Accepts a share link or a bare token.
fn token_from_arg(arg: &str, config: &QuizConfig) -> Result<String> {
    match Url::parse(arg) {
        Ok(url) => match LaunchMode::from_url(&url, &config.limits) {
            LaunchMode::Shared { token, .. } => Ok(token),
            LaunchMode::Play { .. } => bail!("link has no share token: {arg}"),
        },
        Err(_) => Ok(arg.to_string()),
    }
}

fn play(options: &Options, config: &QuizConfig, seed: Option<u64>) -> Result<()> {
    let dataset = load_dataset(&options.data)?;
    let mut store = MessageStore::new(&options.i18n);
    let mut language = options.lang.unwrap_or_default();
    let cache = CountCache::new(&options.cache);
    println!("{}", count_label(store.get(language)?, cache.load()));
    if let Err(err) = cache.refresh(&dataset, config.count_exclusions) {
        tracing::warn!(%err, "count cache not written");
    }

    let mut rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
    let questions = generate_questions(&dataset, store.get(language)?, language, config, &mut rng);
    let mut session = Session::new(config, language);
    session
        .start(questions, Instant::now())
        .context("start quiz")?;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        let elapsed = match session.tick(Instant::now()) {
            Tick::Running(elapsed) => elapsed,
            Tick::TimedOut => {
                println!("{}", store.get(language)?.t("timeout_total", &[]));
                return Ok(());
            }
            Tick::Stopped => break,
        };
        let Some(question) = session.current_question().cloned() else {
            break;
        };
        println!(
            "{}",
            store.get(language)?.t(
                "timer_value",
                &[("sec", format!("{:.2}", elapsed.as_secs_f64()).as_str())]
            )
        );
        print!(
            "{}",
            render_question(session.cursor(), session.questions().len(), &question)
        );
        print!("> ");
        io::stdout().flush().context("flush stdout")?;

        let Some(line) = lines.next() else {
            session.reset();
            return Ok(());
        };
        let line = line.context("read answer")?;
        let input = line.trim();

        if let Some(code) = input.strip_prefix(':') {
            if code == "q" {
                session.reset();
                return Ok(());
            }
            match code.parse::<Language>() {
                Ok(next) => {
                    language = next;
                    let messages = store.get(language)?;
                    session.set_language(&dataset, messages, language)?;
                }
                Err(err) => eprintln!("{err}"),
            }
            continue;
        }

        let choice = input
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| question.choices.get(i))
            .cloned();
        let Some(choice) = choice else {
            eprintln!("enter 1-{}", question.choices.len());
            continue;
        };
        match session.answer(&dataset, &choice, Instant::now())? {
            AnswerOutcome::Next { .. } | AnswerOutcome::Completed { .. } => {}
            AnswerOutcome::TimedOut(kind) => {
                let key = match kind {
                    TimeoutKind::Question => "timeout_question",
                    TimeoutKind::Total => "timeout_total",
                };
                println!("{}", store.get(language)?.t(key, &[]));
                return Ok(());
            }
        }
    }

    let Some(summary) = session.summary() else {
        return Ok(());
    };
    let messages = store.get(language)?;
    print!("{}", render_results(messages, session.results(), summary));
    let page = &options.page_url;
    if let ShareAffordance::Share { token } = &summary.share {
        let link = share_url(page, token);
        let text = share_text(messages, summary, &link);
        let intent = share_intent_url(&config.share_intent_url, &text)?;
        println!("{link}");
        println!("{intent}");
    }
    println!("{}", retry_url(page, language));
    Ok(())
}

fn view(options: &Options, config: &QuizConfig, link: &str) -> Result<()> {
    let token = token_from_arg(link, config)?;
    let language = match options.lang {
        Some(language) => language,
        None => quiz::token_language(&token, &config.limits).unwrap_or_default(),
    };
    let dataset: Dataset = load_dataset(&options.data)?;
    let mut store = MessageStore::new(&options.i18n);
    let messages = store.get(language)?;
    let mut session = Session::new(config, language);
    if let Err(err) = load_shared(&mut session, &dataset, messages, &token, &config.limits) {
        println!("{}", messages.t("shared_restore_failed", &[]));
        println!("{}", retry_url(&options.page_url, language));
        return Err(err).context("restore shared result");
    }
    let Some(summary) = session.summary() else {
        bail!("shared result not shown");
    };
    print!("{}", render_results(messages, session.results(), summary));
    println!("{}", messages.t("play_yourself", &[]));
    println!("{}", retry_url(&options.page_url, language));
    Ok(())
}
