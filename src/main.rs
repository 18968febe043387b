// SPDX-License-Identifier: MPL-2.0
use portfolio_site::app::{self, paths, AppState};
use portfolio_site::config;
use portfolio_site::error::{Error, Result};
use portfolio_site::i18n::{resolve_locale, Locale, Navigation, QueryParams, SELECTOR_PARAM};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
portfolio - bilingual personal homepage

USAGE:
  portfolio [--config-dir DIR] [--bind ADDR]
  portfolio [--config-dir DIR] render <home|anime|sitemap> [--lang LANG]
  portfolio [--config-dir DIR] preview

SUBCOMMANDS:
  render   Print one page to stdout
  preview  Read navigation URLs from stdin and report the effective locale

FLAGS:
  -h, --help  Print this help
";

enum Command {
    Serve { bind: Option<String> },
    Render { page: String, lang: Option<String> },
    Preview,
}

fn parse_args() -> std::result::Result<Option<Command>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    paths::init_cli_override(args.opt_value_from_str("--config-dir")?);

    let command = match args.subcommand()?.as_deref() {
        Some("render") => Command::Render {
            lang: args.opt_value_from_str("--lang")?,
            page: args.free_from_str()?,
        },
        Some("preview") => Command::Preview,
        Some(other) => {
            return Err(pico_args::Error::ArgumentParsingFailed {
                cause: format!("unknown subcommand '{other}'"),
            })
        }
        None => Command::Serve {
            bind: args.opt_value_from_str("--bind")?,
        },
    };

    let rest = args.finish();
    if !rest.is_empty() {
        tracing::warn!(?rest, "ignoring unused arguments");
    }
    Ok(Some(command))
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let command = match parse_args() {
        Ok(Some(command)) => command,
        Ok(None) => {
            print!("{HELP}");
            return;
        }
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            std::process::exit(2);
        }
    };

    if let Err(err) = run(command).await {
        tracing::error!(error = %err, "portfolio exited with an error");
        std::process::exit(1);
    }
}

async fn run(command: Command) -> Result<()> {
    let (mut settings, warning) = config::load();
    if let Some(warning) = warning {
        tracing::warn!("{warning}");
    }
    settings.apply_env_overrides();

    let state = Arc::new(AppState::new(&settings)?);

    match command {
        Command::Serve { bind } => {
            let addr = bind.unwrap_or_else(|| settings.site.bind_addr().to_string());
            app::serve(state, &addr).await
        }
        Command::Render { page, lang } => {
            let query = lang
                .map(|tag| QueryParams::new().with(SELECTOR_PARAM, &tag))
                .unwrap_or_default();
            let locale = resolve_locale(&state.locales, async move { query }).await;
            let output = match page.as_str() {
                "home" => state.render_home(locale),
                "anime" => state.render_anime(locale).await,
                "sitemap" => state.render_sitemap()?,
                other => return Err(Error::Config(format!("unknown page '{other}'"))),
            };
            println!("{output}");
            Ok(())
        }
        Command::Preview => preview(state).await,
    }
}

async fn preview(state: Arc<AppState>) -> Result<()> {
    let navigation = Navigation::new("/");
    let live = navigation.subscribe(Arc::new(state.locales.clone()));
    print_locale(&state, live.current());

    let printer = Arc::clone(&state);
    let watcher = live.on_change(move |locale| print_locale(&printer, locale));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let url = line.trim();
        if !url.is_empty() {
            navigation.navigate_to(url);
        }
    }

    drop(navigation);
    watcher
        .await
        .map_err(|err| Error::Io(format!("preview task failed: {err}")))
}

fn print_locale(state: &AppState, locale: Locale) {
    let title = state.dictionaries.load(locale).text("home.metadata.title");
    println!("{locale}\t{title}");
}
