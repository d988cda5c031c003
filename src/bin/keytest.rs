// Keytest Terminal Keyboard Tester
// Shows which keys of a keyboard layout are pressed, or logs raw key events

#[path = "../tui/mod.rs"]
mod tui;

use std::fs::File;
use std::path::PathBuf;
use std::rc::Rc;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::LevelFilter;

use keytest_core::settings::default_settings_content;
use keytest_core::{merge_layout_file, Engine, LayoutCatalog, ModeKind, Settings, DEFAULT_LAYOUT};

/// Keyboard layout visualizer and key event logger
#[derive(Parser, Debug)]
#[command(name = "keytest")]
#[command(version)]
#[command(about = "Keyboard layout visualizer and key event logger", long_about = None)]
struct Args {
    /// Settings file (default: ~/.config/keytest/settings.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Layout shown at startup
    #[arg(short, long, value_name = "NAME")]
    layout: Option<String>,

    /// Start in "visual" or "log" mode
    #[arg(short, long, value_name = "MODE", value_parser = parse_mode)]
    mode: Option<ModeKind>,

    /// Extra layout file (can be used multiple times)
    #[arg(long = "layout-file", value_name = "FILE")]
    layout_files: Vec<PathBuf>,

    /// List available layouts and exit
    #[arg(long)]
    list_layouts: bool,

    /// Build every layout, report problems and exit
    #[arg(long)]
    check_layouts: bool,

    /// Print a default settings file and exit
    #[arg(long)]
    print_config: bool,

    /// Write log output to this file
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Commands that print and exit without taking over the terminal
    fn is_one_shot(&self) -> bool {
        self.list_layouts || self.check_layouts || self.print_config
    }
}

fn parse_mode(value: &str) -> Result<ModeKind, String> {
    ModeKind::from_str(&value.to_lowercase())
        .map_err(|_| format!("unknown mode '{}' (expected 'visual' or 'log')", value))
}

/// Log to a file if asked; otherwise to stderr, unless the TUI owns the terminal
fn init_logging(args: &Args) -> Result<()> {
    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).parse_default_env();

    match &args.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        None if args.is_one_shot() => {
            builder.target(env_logger::Target::Stderr);
        }
        None => return Ok(()),
    }

    builder.format_timestamp_millis().init();
    Ok(())
}

/// Settings file plus command-line overrides
fn load_settings(args: &Args) -> Result<Settings> {
    let mut settings = match &args.config {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => Settings::load_default().context("Failed to load default settings")?,
    };
    match settings.source_path() {
        Some(path) => log::debug!("Settings loaded from {}", path.display()),
        None => log::debug!("No settings file, using defaults"),
    }
    apply_overrides(args, &mut settings);
    Ok(settings)
}

fn apply_overrides(args: &Args, settings: &mut Settings) {
    if let Some(layout) = &args.layout {
        settings.set_layout(layout.clone());
    }
    if let Some(mode) = args.mode {
        settings.set_mode(mode);
    }
    for path in &args.layout_files {
        settings.add_layout_file(path.clone());
    }
}

/// Built-in layouts plus every configured layout file
fn build_catalog(settings: &Settings) -> Result<LayoutCatalog> {
    let mut catalog = LayoutCatalog::builtin();
    for path in settings.layout_files() {
        merge_layout_file(&mut catalog, path)
            .with_context(|| format!("Failed to load layouts from {}", path.display()))?;
    }
    Ok(catalog)
}

/// Startup layout, checked against the catalog
fn startup_layout(settings: &Settings, catalog: &LayoutCatalog) -> Result<String> {
    let name = settings.layout().unwrap_or(DEFAULT_LAYOUT);
    if !catalog.contains(name) {
        bail!("Unknown layout '{}' (see --list-layouts)", name);
    }
    Ok(name.to_string())
}

fn list_layouts(catalog: &LayoutCatalog, selected: Option<&str>) {
    println!("{} layout(s):", catalog.len());
    for layout in catalog.iter() {
        let marker = if Some(layout.name()) == selected { "*" } else { " " };
        println!("{} {} ({} keys)", marker, layout.name(), layout.key_count());
    }
}

fn check_layouts(catalog: &LayoutCatalog) -> Result<()> {
    let mut problems = 0;
    for layout in catalog.iter() {
        let engine = Engine::new(layout);
        if engine.resolve("space", " ").is_empty() {
            println!("  {}: no key answers to 'space'", layout.name());
            problems += 1;
        }
    }
    if problems > 0 {
        bail!("{} layout(s) have problems", problems);
    }
    println!("All {} layouts are valid", catalog.len());
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    if args.print_config {
        print!("{}", default_settings_content());
        return Ok(());
    }

    let settings = load_settings(&args)?;
    let catalog = build_catalog(&settings)?;

    if args.list_layouts {
        list_layouts(&catalog, Some(settings.layout().unwrap_or(DEFAULT_LAYOUT)));
        return Ok(());
    }
    if args.check_layouts {
        return check_layouts(&catalog);
    }

    let layout = startup_layout(&settings, &catalog)?;
    log::info!("Starting in {} mode with layout {}", settings.mode(), layout);

    let app = tui::App::new(Rc::new(catalog), &settings, &layout, settings.mode())?;
    tui::run(app).context("Terminal UI failed")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parsing() {
        let args = Args::parse_from(["keytest"]);

        assert_eq!(args.config, None);
        assert_eq!(args.layout, None);
        assert_eq!(args.mode, None);
        assert!(args.layout_files.is_empty());
        assert!(!args.verbose);
        assert!(!args.is_one_shot());
    }

    #[test]
    fn test_args_with_options() {
        let args = Args::parse_from([
            "keytest",
            "--config",
            "/tmp/settings.toml",
            "--layout",
            "Dvorak_US_Full",
            "--mode",
            "Log",
            "--layout-file",
            "/tmp/a.toml",
            "--layout-file",
            "/tmp/b.toml",
            "--verbose",
        ]);

        assert_eq!(args.config, Some(PathBuf::from("/tmp/settings.toml")));
        assert_eq!(args.layout.as_deref(), Some("Dvorak_US_Full"));
        assert_eq!(args.mode, Some(ModeKind::Log));
        assert_eq!(args.layout_files.len(), 2);
        assert_eq!(args.layout_files[1], PathBuf::from("/tmp/b.toml"));
        assert!(args.verbose);
    }

    #[test]
    fn test_args_rejects_unknown_mode() {
        assert!(Args::try_parse_from(["keytest", "--mode", "graph"]).is_err());
    }

    #[test]
    fn test_args_one_shot_commands() {
        assert!(Args::parse_from(["keytest", "--list-layouts"]).is_one_shot());
        assert!(Args::parse_from(["keytest", "--check-layouts"]).is_one_shot());
        assert!(Args::parse_from(["keytest", "--print-config"]).is_one_shot());
    }

    #[test]
    fn test_cli_overrides_settings() {
        let args = Args::parse_from([
            "keytest",
            "--layout",
            "Colemak_US_Full",
            "--mode",
            "log",
            "--layout-file",
            "extra.toml",
        ]);
        let mut settings = Settings::new();
        apply_overrides(&args, &mut settings);

        assert_eq!(settings.layout_files(), [PathBuf::from("extra.toml")]);
        let catalog = LayoutCatalog::builtin();
        assert_eq!(startup_layout(&settings, &catalog).unwrap(), "Colemak_US_Full");
        assert_eq!(settings.mode(), ModeKind::Log);
    }

    #[test]
    fn test_startup_layout_defaults_and_rejects_unknown() {
        let catalog = LayoutCatalog::builtin();
        assert_eq!(startup_layout(&Settings::new(), &catalog).unwrap(), DEFAULT_LAYOUT);

        let mut settings = Settings::new();
        settings.set_layout("Nope");
        let err = startup_layout(&settings, &catalog).unwrap_err();
        assert!(err.to_string().contains("Unknown layout 'Nope'"));
    }

    #[test]
    fn test_builtin_layouts_pass_check() {
        assert!(check_layouts(&LayoutCatalog::builtin()).is_ok());
    }
}
