use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::context::AppContext;
use crate::output::OutputKind;

/// OmniSet - pick software modules and get an install command for them
#[derive(Parser, Debug)]
#[command(name = "omniset")]
#[command(about = "Pick software modules and generate an install command, config file and share link")]
#[command(version)]
pub struct Cli {
    /// Catalog file path or http(s) URL
    #[arg(long, global = true, env = "OMNISET_CATALOG")]
    pub catalog: Option<String>,

    /// Base URL used in generated commands and share links
    #[arg(long, global = true, env = "OMNISET_BASE_URL")]
    pub base_url: Option<String>,

    /// JSON settings file
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    /// Theme flag file (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub theme_file: Option<PathBuf>,

    /// Increase log verbosity (RUST_LOG overrides)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the interactive module picker
    Pick {
        /// Share link to restore a selection from
        #[arg(short, long)]
        url: Option<String>,
    },
    /// List categories, modules and presets
    List {
        /// Only show modules matching this search query
        #[arg(short, long)]
        search: Option<String>,
        /// Show presets only
        #[arg(long)]
        presets: bool,
    },
    /// Print an install command, config document or share link
    Generate {
        /// Modules to toggle, comma-separated (requirements are added)
        #[arg(short, long, value_delimiter = ',')]
        modules: Vec<String>,
        /// Preset to start from
        #[arg(short, long)]
        preset: Option<String>,
        /// Share link to start from
        #[arg(short, long)]
        url: Option<String>,
        /// Artifact to print
        #[arg(short, long, value_enum, default_value_t = Format::Command)]
        format: Format,
        /// Write the artifact to a file instead of stdout
        /// (`-o` alone writes omniset-config.yaml)
        #[arg(
            short,
            long,
            num_args = 0..=1,
            default_missing_value = crate::output::CONFIG_FILE_NAME
        )]
        output: Option<PathBuf>,
    },
    /// Show or change the stored theme
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ThemeAction {
    /// Print the theme the picker will start with
    Show,
    /// Switch between dark and light
    Toggle,
    /// Store a specific theme
    Set {
        #[arg(value_enum)]
        mode: ThemeArg,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Command,
    Config,
    Share,
    All,
}

impl Format {
    /// The single artifact this format names; `None` for [`Format::All`].
    pub fn kind(self) -> Option<OutputKind> {
        match self {
            Self::Command => Some(OutputKind::Command),
            Self::Config => Some(OutputKind::Config),
            Self::Share => Some(OutputKind::Share),
            Self::All => None,
        }
    }

    /// Render the artifact(s) for the context's selection, newline-terminated.
    pub fn render(self, ctx: &AppContext) -> String {
        let selection = ctx.store().selection();
        let render = |kind: OutputKind| ctx.output().render(kind, selection);
        match self.kind() {
            // The config document already ends with a newline
            Some(OutputKind::Config) => render(OutputKind::Config),
            Some(kind) => format!("{}\n", render(kind)),
            None => format!(
                "# Install command\n{}\n\n# Share link\n{}\n\n{}",
                render(OutputKind::Command),
                render(OutputKind::Share),
                render(OutputKind::Config)
            ),
        }
    }
}

/// Build the `generate` selection: start from the preset, then add each
/// module with its requirements. Modules are only ever added.
pub fn select_for_generate(
    ctx: &mut AppContext,
    preset: Option<&str>,
    modules: &[String],
) -> Result<()> {
    if let Some(preset) = preset {
        if !ctx.apply_preset(preset) {
            bail!("Unknown preset '{}'", preset);
        }
    }
    for id in modules.iter().map(|m| m.trim()).filter(|m| !m.is_empty()) {
        if !ctx.catalog().contains(id) {
            bail!("Unknown module '{}'", id);
        }
        ctx.select(id);
    }
    if ctx.store().count() == 0 {
        bail!("No modules selected; pass --modules, --preset or --url");
    }
    Ok(())
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeArg {
    Dark,
    Light,
}

impl From<ThemeArg> for crate::theme::ThemeMode {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Dark => Self::Dark,
            ThemeArg::Light => Self::Light,
        }
    }
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }
}
