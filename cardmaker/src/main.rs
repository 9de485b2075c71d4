//! Monster card maker - terminal editor and headless exporter

use std::io;
use std::path::PathBuf;

use cardmaker::config::RuntimeConfig;
use cardmaker::dictionary::Language;
use cardmaker::embed::{self, EmbedOptions, Mount};
use cardmaker::export::{self, ExportOptions, DEFAULT_PIXEL_RATIO};
use cardmaker::logging;
use cardmaker::storage::FileStore;
use cardmaker::store::MonsterStore;
use clap::{Parser, Subcommand};
use tui_dispatch_debug::DebugCliArgs;

/// Build monster stat cards in the terminal and export them as PNG
#[derive(Parser, Debug)]
#[command(name = "cardmaker")]
#[command(about = "Monster card maker with live preview and PNG export")]
struct Args {
    /// Interface language
    #[arg(long, value_enum, default_value = "en")]
    lang: Language,

    /// Directory holding the saved monster (defaults to the user data dir)
    #[arg(long)]
    save_dir: Option<PathBuf>,

    /// Directory with card artwork (top/middle/bottom/linebreak.png) and fonts/
    #[arg(long, env = "CARDMAKER_ASSETS")]
    assets: Option<PathBuf>,

    /// Where exported PNGs are written
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Device pixels per card pixel in exported images
    #[arg(long, default_value_t = DEFAULT_PIXEL_RATIO)]
    pixel_ratio: f32,

    /// Log file (defaults to cardmaker.log in the save dir)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Draw inline below the prompt using this many rows instead of full screen
    #[arg(long, value_name = "ROWS", value_parser = clap::value_parser!(u16).range(8..))]
    inline: Option<u16>,

    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the saved monster as JSON
    Show,
    /// Render the saved monster to a PNG file
    Export,
    /// Copy the saved monster card to the clipboard
    Copy,
    /// Clear the saved monster
    Reset,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        lang,
        save_dir,
        assets,
        out_dir,
        pixel_ratio,
        log_file,
        inline,
        command,
        debug,
    } = Args::parse();

    let export = ExportOptions {
        out_dir,
        assets_dir: assets,
        pixel_ratio,
        ..ExportOptions::default()
    };

    let Some(command) = command else {
        return embed::init(EmbedOptions {
            language: lang,
            mount: inline.map_or(Mount::FullScreen, |height| Mount::Inline { height }),
            storage_dir: save_dir,
            export,
            log_file,
            debug: Some(debug),
        })
        .await;
    };

    let mut config = RuntimeConfig {
        export,
        ..RuntimeConfig::default()
    };
    if let Some(dir) = save_dir {
        config.save_dir = dir;
    }
    let log_path = log_file.unwrap_or_else(|| config.log_path());
    if let Err(err) = logging::init(&log_path) {
        eprintln!("Warning: logging disabled ({}): {}", log_path.display(), err);
    }

    run_command(command, lang, &config)
}

fn run_command(command: Command, language: Language, config: &RuntimeConfig) -> io::Result<()> {
    let mut store = MonsterStore::open(FileStore::new(&config.save_dir));
    match command {
        Command::Show => {
            let json = serde_json::to_string_pretty(store.record()).map_err(io::Error::other)?;
            println!("{json}");
        }
        Command::Export => {
            let card = export::prepare_card(store.record(), language, &config.export)
                .map_err(io::Error::other)?;
            let dict = language.dictionary();
            match export::export_as_image(Some(&card), &config.export) {
                Ok(Some(path)) => println!("{} {}", dict.exported, path.display()),
                Ok(None) => println!("{}", dict.nothing_to_export),
                Err(err) => {
                    tracing::error!(error = %err, "export failed");
                    return Err(io::Error::other(err));
                }
            }
        }
        Command::Copy => {
            let card = export::prepare_card(store.record(), language, &config.export)
                .map_err(io::Error::other)?;
            let dict = language.dictionary();
            match export::copy_as_image(Some(&card), &config.export) {
                Ok(Some(())) => println!("{}", dict.copied),
                Ok(None) => eprintln!("{}", dict.clipboard_unavailable),
                Err(err) => {
                    tracing::error!(error = %err, "copy failed");
                    return Err(io::Error::other(err));
                }
            }
        }
        Command::Reset => {
            store.reset();
            println!("{}", language.dictionary().reset_done);
        }
    }
    Ok(())
}
