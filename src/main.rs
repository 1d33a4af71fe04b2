//! Gallerist application entry point
//!
//! Loads a media collection and shows it in a terminal gallery with filter
//! tabs, lazily revealed pages and a full-view overlay.
//!
//! # Usage
//!
//! ```bash
//! # Browse a collection
//! gallerist --data media.json
//!
//! # Start on the "new" filter with an item open (deep link)
//! gallerist --data media.json --filter new --item photos/a.jpg
//!
//! # Print the filtered collection and exit
//! gallerist --data media.json --filter discussed --list
//! ```
//!
//! # Configuration
//!
//! Configuration is stored in the user's config directory
//! (`~/.config/gallerist/config.toml` on Linux) and created with defaults on
//! first run. Set `RUST_LOG` for diagnostics.

use colored::Colorize;
use env_logger::{Builder, Target};
use gallerist::{
    Gallery, GalleryError, GalleryEvent, GalleryOptions,
    cli::Cli,
    config::GalleryConfig,
    location::InMemoryLocation,
    media::{DataSource, JsonFileSource},
    prefs::{FilePreferences, MemoryPreferences, PreferenceStore},
    render::Renderer,
    ui::{GalleryApp, TerminalRenderer},
};
use log::LevelFilter;
use std::path::PathBuf;

type Result<T> = std::result::Result<T, GalleryError>;

fn init_logger() {
    if std::env::var("RUST_LOG").is_ok() {
        env_logger::init();
        return;
    }
    Builder::new()
        .target(Target::Stderr)
        .filter_level(LevelFilter::Warn)
        .init();
}

fn main() {
    init_logger();
    let cli = Cli::parse_args();

    if let Err(e) = run(&cli) {
        eprintln!("{} {e}", "Error:".red().bold());
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => GalleryConfig::load_from(path)?,
        None => GalleryConfig::load()?,
    };

    let data = data_path(cli, &config)?;
    let prefs = open_preferences(cli);
    let location = InMemoryLocation::starting_at(cli.location_token());

    let mut renderer = TerminalRenderer::new();
    if let Some(root) = data.parent().filter(|p| !p.as_os_str().is_empty()) {
        renderer = renderer.with_media_root(root);
    }

    let mut gallery = Gallery::new(renderer, prefs, location, GalleryOptions::from(&config));

    let loaded = JsonFileSource::new(&data).fetch();
    if cli.list {
        gallery.handle(GalleryEvent::Loaded(Ok(loaded?)));
    } else {
        gallery.handle(GalleryEvent::Loaded(loaded));
    }

    if let Some(mode) = &cli.filter {
        gallery.handle(GalleryEvent::FilterSelected(mode.clone()));
    }

    if cli.list {
        print_projection(&gallery, cli.quiet);
        return Ok(());
    }

    GalleryApp::new(gallery).run()?;
    Ok(())
}

/// Collection file from `--data`, falling back to the configured path
fn data_path(cli: &Cli, config: &GalleryConfig) -> Result<PathBuf> {
    cli.data
        .clone()
        .or_else(|| config.data_path.clone())
        .ok_or_else(|| {
            GalleryError::InvalidInput(
                "No collection given; pass --data or set data_path in the config".to_string(),
            )
        })
}

/// Open the preference file, falling back to memory when it is unavailable
fn open_preferences(cli: &Cli) -> Box<dyn PreferenceStore> {
    if let Some(path) = &cli.prefs {
        return Box::new(FilePreferences::open(path));
    }
    match FilePreferences::open_default() {
        Ok(prefs) => Box::new(prefs),
        Err(e) => {
            log::warn!("Preferences will not persist: {e}");
            Box::new(MemoryPreferences::new())
        }
    }
}

fn print_projection<R: Renderer>(gallery: &Gallery<R, Box<dyn PreferenceStore>, InMemoryLocation>, quiet: bool) {
    let projection = gallery.projection();

    if !quiet {
        println!(
            "{} - {} of {} items",
            gallery.active_filter().label().bold(),
            projection.len(),
            projection.master_len()
        );
    }

    let open = gallery.viewer().current_index();
    for (position, item) in projection.iter().enumerate() {
        if quiet {
            println!("{}", item.url);
            continue;
        }

        let marker = if open == Some(position) { "▶" } else { " " };
        println!(
            "{marker} {:>4}  {}  {}  {}  {}",
            position + 1,
            format!("♥ {:<6}", item.likes).magenta(),
            format!("✎ {:<5}", item.comments).green(),
            item.created_at.format("%Y-%m-%d").to_string().dimmed(),
            item.url
        );
    }
}
