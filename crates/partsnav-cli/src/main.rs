mod app;
mod catalog;
mod images;
mod logging;
mod ui;

use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use partsnav_core::{Navigator, Theme, ThemeChoice, Viewport, build_theme};
use tracing::info;

use crate::catalog::SqliteCatalog;
use crate::images::FsImageLoader;

const DB_FILE: &str = "catalog.db";

#[derive(Debug, Parser)]
#[command(name = "partsnav", about = "Terminal parts catalog browser")]
struct Cli {
    /// Directory holding catalog.db and the diagram images
    #[arg(long, env = "PARTSNAV_DATA", default_value = "./data")]
    data: PathBuf,

    /// Color theme
    #[arg(long, value_enum, default_value_t = CliTheme::Auto)]
    theme: CliTheme,

    /// Disable ANSI color
    #[arg(long, default_value_t = false)]
    no_color: bool,

    /// Append logs to this file (filter with PARTSNAV_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
enum CliTheme {
    Auto,
    Default,
    HighContrast,
}

impl From<CliTheme> for ThemeChoice {
    fn from(theme: CliTheme) -> Self {
        match theme {
            CliTheme::Auto => ThemeChoice::Auto,
            CliTheme::Default => ThemeChoice::Default,
            CliTheme::HighContrast => ThemeChoice::HighContrast,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Some(path) = &cli.log_file {
        logging::init(path)?;
    }

    let data_dir = resolve_data_dir(&cli.data)?;
    let catalog = SqliteCatalog::open(&data_dir.join(DB_FILE))?;
    info!(data_dir = %data_dir.display(), fts = catalog.has_fts(), "catalog ready");

    let force_tui = std::env::var("PARTSNAV_FORCE_TUI").ok().as_deref() == Some("1");
    let tty = io::stdin().is_terminal() && io::stdout().is_terminal();

    if !tty && !force_tui {
        let theme = build_theme(cli.theme.into(), true);
        let viewport = Viewport::new(usize::from(preview_width_from_env()), 24);
        let mut navigator = navigator(catalog, data_dir, theme, viewport);
        let frame = navigator.render();
        return ui::render::print_frame(&frame, io::stdout().lock()).map_err(Into::into);
    }

    let theme = build_theme(cli.theme.into(), cli.no_color);
    let viewport = terminal_viewport();
    let navigator = navigator(catalog, data_dir, theme, viewport);
    let mut app = app::App::new(navigator, io::stdin().is_terminal());
    app.run()
}

fn navigator(
    catalog: SqliteCatalog,
    data_dir: PathBuf,
    theme: Theme,
    viewport: Viewport,
) -> Navigator {
    Navigator::new(
        Box::new(catalog),
        Box::new(FsImageLoader),
        data_dir,
        theme,
        viewport,
    )
}

fn resolve_data_dir(path: &Path) -> Result<PathBuf> {
    let dir = std::path::absolute(path)
        .with_context(|| format!("resolve data directory {}", path.display()))?;
    if !dir.join(DB_FILE).is_file() {
        bail!("{DB_FILE} not found in {}", dir.display());
    }
    Ok(dir)
}

fn terminal_viewport() -> Viewport {
    crossterm::terminal::size()
        .map(|(w, h)| Viewport::new(usize::from(w), usize::from(h)))
        .unwrap_or_default()
        .or_fallback()
}

fn preview_width_from_env() -> u16 {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|v| v.parse::<u16>().ok())
        .unwrap_or(80)
}
