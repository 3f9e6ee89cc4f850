//! theme-forge - CSS theme generator
//!
//! Derives a full set of CSS custom properties from a handful of controls,
//! exports them as a stylesheet and round-trips the controls through share
//! links and a saved state file.

mod clipboard;
mod codec;
mod color;
mod compiler;
mod config;
mod export;
mod params;
mod presets;
mod randomize;
mod state;
mod tokens;

use anyhow::{bail, Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use clipboard::CopyKind;
use config::Config;
use params::{Mode, ThemeParameters};
use state::ThemeSession;
use std::path::{Path, PathBuf};

#[derive(ClapParser)]
#[command(name = "theme-forge")]
#[command(about = "Generate CSS custom property themes from a few controls", long_about = None)]
struct Cli {
    /// Custom data directory (default: ~/.theme-forge)
    /// Can also be set via THEME_FORGE_DIR environment variable
    #[arg(long, value_name = "DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Share-link query string to restore (e.g. "h=190&sa=78&md=d")
    #[arg(short, long, value_name = "QUERY", global = true)]
    query: Option<String>,

    /// Start from a named preset (neon, cyber, aurora, sunset, royal)
    #[arg(short, long, global = true)]
    preset: Option<String>,

    /// Base hue in degrees
    #[arg(long, global = true, allow_negative_numbers = true)]
    hue: Option<f64>,

    /// Saturation percent (0-100)
    #[arg(long, global = true)]
    saturation: Option<f64>,

    /// Glow intensity (0-1)
    #[arg(long, global = true)]
    glow: Option<f64>,

    /// Accent hue offset in degrees
    #[arg(long, global = true, allow_negative_numbers = true)]
    accent_offset: Option<i32>,

    /// Grain overlay on/off
    #[arg(long, global = true)]
    grain: Option<bool>,

    /// Motion on/off
    #[arg(long, global = true)]
    motion: Option<bool>,

    /// Corner radius in pixels
    #[arg(long, global = true)]
    radius: Option<f64>,

    /// Contrast factor (typically 0.8-1.15)
    #[arg(long, global = true)]
    contrast: Option<f64>,

    /// Light or dark mode
    #[arg(long, value_enum, global = true)]
    mode: Option<ModeArg>,

    /// Don't write the saved state file
    #[arg(long, global = true)]
    no_save: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum ModeArg {
    Dark,
    Light,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Dark => Mode::Dark,
            ModeArg::Light => Mode::Light,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
enum OutputFormat {
    /// `--name: value;` lines
    #[default]
    Vars,
    /// JSON object of custom properties
    Json,
    /// Full stylesheet
    Css,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the compiled custom properties
    Compile {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Vars)]
        format: OutputFormat,

        /// Print only this property (e.g. "--primary" or "primary")
        #[arg(short, long, value_name = "NAME", allow_hyphen_values = true)]
        token: Option<String>,
    },
    /// Write the stylesheet to a file or the clipboard
    Export {
        /// Output file (default: export.filename from config.toml)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Copy to the clipboard instead of writing a file
        #[arg(long)]
        copy: bool,

        /// Leave out the usage example rules
        #[arg(long)]
        no_usage: bool,
    },
    /// Print a share link for the current theme
    Share {
        /// Also copy the link to the clipboard
        #[arg(long)]
        copy: bool,
    },
    /// Pick random parameters
    Randomize {
        /// Seed for a reproducible result
        #[arg(long)]
        seed: Option<u64>,
    },
    /// List the built-in presets
    Presets,
    /// Show control labels, lightness ladder and root element attributes
    Inspect,
    /// Write config.toml with the current theme as defaults
    InitConfig,
}

/// Apply preset and individual flags on top of the session's parameters
fn apply_overrides(cli: &Cli, base: ThemeParameters) -> Result<ThemeParameters> {
    let mut params = match &cli.preset {
        Some(name) => match presets::preset(name) {
            Some(preset) => preset,
            None => bail!(
                "Unknown preset '{}' (available: {})",
                name,
                presets::preset_names().collect::<Vec<_>>().join(", ")
            ),
        },
        None => base,
    };

    if let Some(hue) = cli.hue {
        params.hue = hue;
    }
    if let Some(saturation) = cli.saturation {
        params.saturation = saturation;
    }
    if let Some(glow) = cli.glow {
        params.glow_intensity = glow;
    }
    if let Some(offset) = cli.accent_offset {
        params.accent_offset = offset;
    }
    if let Some(grain) = cli.grain {
        params.grain = grain;
    }
    if let Some(motion) = cli.motion {
        params.motion = motion;
    }
    if let Some(radius) = cli.radius {
        params.corner_radius = radius;
    }
    if let Some(contrast) = cli.contrast {
        params.contrast = contrast;
    }
    if let Some(mode) = cli.mode {
        params.mode = mode.into();
    }

    Ok(params.sanitized())
}

/// Log to `debug.log` in the data directory; stdout carries the CSS.
fn init_logging(dir: &Path) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let log_file = std::fs::create_dir_all(dir).and_then(|_| {
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(Config::log_path(dir))
    });

    match log_file {
        Ok(file) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false) // No color codes in log file
            .init(),
        Err(_) => tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new("warn"))
            .with_writer(std::io::stderr)
            .init(),
    }
}

fn print_vars(session: &ThemeSession, format: OutputFormat, config: &Config) -> Result<()> {
    let vars = session.compile();
    match format {
        OutputFormat::Vars => println!("{}", vars.to_declarations("")),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&vars).context("Failed to serialize properties")?
        ),
        OutputFormat::Css => print!("{}", export::to_css(&vars, config.export.include_usage)),
    }
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let data_dir = Config::base_dir(cli.data_dir.as_deref())?;
    init_logging(&data_dir);

    let config = Config::load(&data_dir)?;
    let mut session = ThemeSession::open(&config, &data_dir, cli.query.as_deref(), !cli.no_save);
    let params = apply_overrides(&cli, *session.params())?;

    let command = cli.command.unwrap_or(Commands::Compile {
        format: OutputFormat::Vars,
        token: None,
    });

    if let Commands::Presets = command {
        for (name, preset) in presets::PRESETS {
            println!("{:<8} ?{}", name, codec::encode(&preset).to_query_string());
        }
        return Ok(());
    }

    let params = match command {
        Commands::Randomize { seed } => {
            use rand::SeedableRng;
            match seed {
                Some(seed) => randomize::randomize(&mut rand::rngs::StdRng::seed_from_u64(seed)),
                None => randomize::randomize(&mut rand::thread_rng()),
            }
        }
        _ => params,
    };

    // Saving is best effort: the theme still renders if the file can't be written
    if let Err(e) = session.set(params) {
        tracing::warn!("Failed to save theme state: {:#}", e);
        eprintln!("Warning: could not save theme state: {:#}", e);
    }

    match command {
        Commands::Compile {
            token: Some(name), ..
        } => {
            let token = tokens::Token::from_css_name(&name)
                .with_context(|| format!("Unknown property '{}'", name))?;
            let vars = session.compile();
            println!("{}", vars.get(token).unwrap_or_default());
        }
        Commands::Compile { format, .. } => print_vars(&session, format, &config)?,
        Commands::Export {
            output,
            copy,
            no_usage,
        } => {
            let include_usage = config.export.include_usage && !no_usage;
            let css = export::to_css(&session.compile(), include_usage);
            if copy {
                eprintln!("{}", clipboard::copy_with_feedback(&css, CopyKind::Stylesheet));
            } else {
                let path = output.unwrap_or_else(|| PathBuf::from(&config.export.filename));
                let written = export::write_css(&path, &css)?;
                eprintln!("Wrote {}", written.display());
            }
        }
        Commands::Share { copy } => {
            let link = session.share_link();
            println!("{}", link);
            if copy {
                eprintln!("{}", clipboard::copy_with_feedback(&link, CopyKind::ShareLink));
            }
        }
        Commands::Randomize { .. } => {
            println!("{}", session.share_link());
            print_vars(&session, OutputFormat::Vars, &config)?;
        }
        Commands::Inspect => {
            let labels = session.params().labels();
            println!("hue            {}", labels.hue);
            println!("saturation     {}", labels.saturation);
            println!("glow           {}", labels.glow);
            println!("accent offset  {}", labels.accent_offset);
            println!("radius         {}", labels.radius);
            println!("contrast       {}", labels.contrast);
            let palette = session.palette();
            println!("accent hue     {}", palette.accent_hue());
            let ladder = palette.ladder;
            println!(
                "lightness      bg {} / surface {} / elevated {} / text {} / muted {}",
                color::round_to(ladder.background, 2),
                color::round_to(ladder.surface, 2),
                color::round_to(ladder.elevated, 2),
                color::round_to(ladder.text, 2),
                color::round_to(ladder.muted, 2),
            );
            for (name, value) in session.attributes().pairs() {
                println!("{}=\"{}\"", name, value);
            }
        }
        Commands::InitConfig => {
            let updated = Config {
                defaults: *session.params(),
                ..config
            };
            updated.save(&data_dir)?;
            eprintln!("Wrote {}", Config::config_path(&data_dir).display());
        }
        Commands::Presets => unreachable!("handled above"),
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}
