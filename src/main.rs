//! OmniSet - Main entry point
//!
//! Parses the command line, loads settings and the catalog, then either runs
//! the interactive picker or one of the scripted subcommands.

use anyhow::{Context, Result};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs;
use std::io::stdout;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use omniset::app::App;
use omniset::catalog::{self, Catalog};
use omniset::cli::{select_for_generate, Cli, Commands, ThemeAction};
use omniset::config::{Overrides, Settings};
use omniset::context::AppContext;
use omniset::output::OutputGenerator;
use omniset::selection::SelectionStore;
use omniset::theme::{ThemeMode, ThemeStore};
use omniset::ui::category_icon;
use omniset::url_sync::MemoryLocation;
use omniset::view::{self, ViewState};
use omniset::OmniSetError;

/// Initialize the tracing subscriber. `RUST_LOG` overrides `-v`.
fn init_tracing(verbose: u8) {
    let default_level = if verbose > 0 { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_tracing(cli.verbose);
    info!("OmniSet starting up");

    let settings = Settings::resolve(
        cli.settings.as_deref(),
        Overrides {
            base_url: cli.base_url.clone(),
            catalog: cli.catalog.clone(),
            theme_file: cli.theme_file.clone(),
        },
    )?;
    debug!("Resolved settings: {:?}", settings);

    // The theme command never needs the catalog
    if let Some(Commands::Theme { action }) = &cli.command {
        return run_theme_command(&settings, action.as_ref());
    }

    let catalog = load_catalog_or_exit(&settings);
    let output = OutputGenerator::new(settings.base_url.clone());

    match cli.command {
        Some(Commands::Pick { url }) => run_picker(&settings, catalog, output, url.as_deref()),
        None => run_picker(&settings, catalog, output, None),
        Some(Commands::List { search, presets }) => {
            run_list(catalog, search.as_deref(), presets);
            Ok(())
        }
        Some(Commands::Generate {
            modules,
            preset,
            url,
            format,
            output: out_path,
        }) => {
            let mut ctx = build_context(catalog, output, url.as_deref())?;
            select_for_generate(&mut ctx, preset.as_deref(), &modules)?;

            let text = format.render(&ctx);
            match out_path {
                Some(path) => {
                    fs::write(&path, &text)
                        .with_context(|| format!("Failed to write {:?}", path))?;
                    println!("Wrote {}", path.display());
                }
                None => print!("{}", text),
            }
            Ok(())
        }
        Some(Commands::Theme { .. }) => Ok(()),
    }
}

/// Load the catalog; on failure report once and exit.
fn load_catalog_or_exit(settings: &Settings) -> Catalog {
    let loaded = settings
        .catalog_source()
        .and_then(|source| Ok(catalog::load(&source)?));
    match loaded {
        Ok(catalog) => {
            info!(
                "Loaded {} modules in {} categories",
                catalog.module_count(),
                catalog.categories().len()
            );
            catalog
        }
        Err(e) => {
            error!("Failed to load catalog from {}: {:#}", settings.catalog, e);
            eprintln!("Failed to load modules. Please check the catalog source and try again.");
            eprintln!("  {}: {:#}", settings.catalog, e);
            std::process::exit(1);
        }
    }
}

fn build_context(
    catalog: Catalog,
    output: OutputGenerator,
    url: Option<&str>,
) -> Result<AppContext> {
    match url {
        Some(url) => {
            let location = MemoryLocation::parse(url)
                .with_context(|| format!("Invalid share link '{}'", url))?;
            Ok(AppContext::new(catalog, Box::new(location), output))
        }
        None => Ok(AppContext::in_memory(catalog, output)?),
    }
}

fn startup_theme(settings: &Settings) -> ThemeMode {
    let colorfgbg = std::env::var("COLORFGBG").ok();
    match settings.theme_store() {
        Some(store) => store.startup_mode(colorfgbg.as_deref()),
        None => ThemeMode::resolve(None, colorfgbg.as_deref()),
    }
}

/// Run the interactive picker
fn run_picker(
    settings: &Settings,
    catalog: Catalog,
    output: OutputGenerator,
    url: Option<&str>,
) -> Result<()> {
    let ctx = build_context(catalog, output, url)?;
    let mut app = App::new(ctx, startup_theme(settings)).with_theme_store(settings.theme_store());

    debug!("Initializing terminal for TUI mode");
    enable_raw_mode().context("Failed to enable raw mode")?;
    crossterm::execute!(stdout(), crossterm::terminal::EnterAlternateScreen)
        .context("Failed to enter alternate screen")?;

    let result = Terminal::new(CrosstermBackend::new(stdout()))
        .map_err(|e| OmniSetError::terminal(format!("Failed to create terminal: {}", e)))
        .and_then(|mut terminal| app.run(&mut terminal));

    // Always restore the terminal, even if the app failed
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(stdout(), crossterm::terminal::LeaveAlternateScreen);

    result?;

    let ctx = app.into_context();
    if ctx.store().count() > 0 {
        println!("{}", ctx.install_command());
        println!("Share link: {}", ctx.share_url());
    }
    println!("Location: {}", ctx.location());
    Ok(())
}

fn run_list(catalog: Catalog, search: Option<&str>, presets_only: bool) {
    if presets_only {
        for preset in catalog.presets() {
            println!(
                "{:<12} {} - {} [{}]",
                preset.id,
                preset.name,
                preset.description,
                preset.modules.join(", ")
            );
        }
        return;
    }

    let store = SelectionStore::new(std::sync::Arc::new(catalog));
    let state = ViewState {
        filter: search.unwrap_or_default().to_string(),
        ..Default::default()
    };
    let view = view::render(&store, &state);

    if view.categories.is_empty() {
        println!("No modules match '{}'", state.filter.trim());
        return;
    }
    for category in &view.categories {
        println!(
            "{} {} ({})",
            category_icon(&category.id),
            category.name,
            category.module_count
        );
        for module in &category.modules {
            println!(
                "  {:<16} {:>7}  {}",
                module.id, module.size_label, module.description
            );
        }
    }
}

fn run_theme_command(settings: &Settings, action: Option<&ThemeAction>) -> Result<()> {
    let current = startup_theme(settings);
    let store = || -> Result<ThemeStore> {
        settings
            .theme_store()
            .context("No config directory found; pass --theme-file")
    };

    let save = |store: ThemeStore, mode: ThemeMode| -> Result<()> {
        store
            .save(mode)
            .with_context(|| format!("Failed to write theme to {}", store.path().display()))?;
        println!("{}", mode);
        Ok(())
    };

    match action {
        None | Some(ThemeAction::Show) => {
            println!("{}", current);
            Ok(())
        }
        Some(ThemeAction::Toggle) => save(store()?, current.toggled()),
        Some(ThemeAction::Set { mode }) => save(store()?, (*mode).into()),
    }
}
