//! captured-pieces: 局面文字列から取られた駒を表示する

mod report;
mod svg;

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use captured_core::{CapturedPiecesView, DrawSurface, GameSession, SceneSurface, Variant, ViewConfig};

use report::Report;
use svg::SvgSurface;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
    Svg,
}

#[derive(Parser, Debug)]
#[command(name = "captured-pieces")]
#[command(about = "Show the pieces each side has captured in a position")]
struct Args {
    /// Variant name (standard, crazyhouse, shogi, minishogi)
    #[arg(short, long, default_value = "standard")]
    variant: String,

    /// FEN / SFEN of the position (default: the variant's starting position)
    #[arg(short, long)]
    position: Option<String>,

    /// Space separated moves applied to the position without legality checks
    #[arg(short, long, default_value = "")]
    moves: String,

    /// View configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Theme name (overrides the configuration)
    #[arg(short, long)]
    theme: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// List the built-in variants and exit
    #[arg(long)]
    list_variants: bool,

    /// Default log level (RUST_LOG overrides)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    if args.list_variants {
        for variant in Variant::all() {
            println!("{}", report::describe_variant(variant));
        }
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => ViewConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => ViewConfig::default(),
    };
    let theme_name = args.theme.as_deref().unwrap_or(&config.theme.current);
    let theme = config.theme_registry().resolve(theme_name);

    let session = GameSession::replay(&args.variant, args.position.as_deref(), args.moves.split_whitespace())
        .with_context(|| format!("building {} position", args.variant))?;
    let session = Rc::new(RefCell::new(session));
    log::info!("theme {theme_name}, format {:?}", args.format);

    match args.format {
        Format::Svg => {
            let view = show(&session, SvgSurface::new(theme, config.layout.origin()), &config);
            print!("{}", view.surface().render());
        }
        Format::Text | Format::Json => {
            let view = show(&session, SceneSurface::new(), &config);
            let report = Report::new(&args.variant, theme_name, &view);
            if args.format == Format::Json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", report.to_text());
            }
        }
    }
    Ok(())
}

fn show<S: DrawSurface>(
    session: &Rc<RefCell<GameSession>>,
    surface: S,
    config: &ViewConfig,
) -> CapturedPiecesView<S> {
    let mut view = CapturedPiecesView::new(surface, config.layout);
    view.set_game(Some(session));
    view
}

fn init_logging(level: &str) {
    use std::io::Write;

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, level));
    builder
        .format(|buf, record| writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args()))
        .write_style(env_logger::WriteStyle::Never)
        .target(env_logger::Target::Stderr)
        .init();
}
