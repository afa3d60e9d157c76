use clap::Parser;
use keynav::core::action_bar::{ActionBar, default_action_bar};
use keynav::core::config::{CliOverrides, KeynavConfig, load_config, resolve};
use keynav::core::keymap::Keymap;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "keynav", about = "Keyboard-driven action bar with spatial focus navigation")]
struct Args {
    /// Theme class, e.g. theme-dark ("" for Refined White)
    #[arg(long)]
    theme: Option<String>,

    /// Font class, e.g. font-use-geist-mono
    #[arg(long)]
    font: Option<String>,

    /// Start with the debug grid shown
    #[arg(long)]
    grid: bool,

    /// off, error, warn, info, debug or trace
    #[arg(long)]
    log_level: Option<String>,

    /// Print the action bar's element tree and focus order, then exit
    #[arg(long)]
    print_order: bool,
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let file_config = match load_config() {
        Ok(config) => Some(config),
        Err(e) => {
            eprintln!("keynav: {e}, using defaults");
            None
        }
    };
    let cli = CliOverrides {
        theme: args.theme,
        font: args.font,
        grid: args.grid,
        log_level: args.log_level,
    };
    let config = resolve(&file_config.unwrap_or_else(KeynavConfig::default), &cli);

    // Initialize file logger - writes to keynav.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create("keynav.log") {
        let _ = WriteLogger::init(config.log_level, log_config, log_file);
    }

    log::info!(
        "keynav starting up (theme '{}', font '{}', {} extra items)",
        config.theme,
        config.font,
        config.items.len()
    );

    if args.print_order {
        let keymap = Keymap::new();
        let bar = ActionBar::mount(default_action_bar(config.items), &keymap);
        print!("{}", bar.document().outline());
        return Ok(());
    }

    keynav::tui::run(config)
}
