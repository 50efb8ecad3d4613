use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use tracing::{info, warn};

use encore::config::{self, Settings};
use encore::library::DirectoryIndex;
use encore::playback::Player;
use encore::{RodioEngine, logging};

mod input;
mod settings;

use input::Input;

/// Library root: config, then first CLI argument, then the current directory.
fn resolve_root(settings: &Settings) -> PathBuf {
    settings
        .library
        .root
        .clone()
        .or_else(|| env::args_os().nth(1).map(PathBuf::from))
        .or_else(|| env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("Music"))
}

/// Log track changes, including auto-advance, as they are published.
fn spawn_now_playing_log(player: &Player) {
    let updates = player.subscribe();
    thread::spawn(move || {
        let mut last: Option<String> = None;
        for state in updates {
            let current = state.now_playing.as_ref().map(|t| t.id.clone());
            if current != last {
                if let Some(track) = &state.now_playing {
                    info!(track = %track.display(), "track changed");
                }
                last = current;
            }
        }
    });
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, problem) = settings::load_settings();
    logging::init(&settings.log);
    if let Some(msg) = problem {
        warn!("{msg}");
    }
    if let Some(path) = config::resolve_config_path() {
        info!(path = %path.display(), "config path");
    }

    let root = resolve_root(&settings);
    info!(root = %root.display(), "indexing library");
    let index = Arc::new(DirectoryIndex::new(root, settings.library.clone()));
    let player = Player::spawn(index, &settings, RodioEngine::new);
    spawn_now_playing_log(&player);

    match player.load_library().wait() {
        Ok(outcome) => info!(?outcome, "library ready"),
        Err(e) => warn!(error = %e, "library unavailable"),
    }
    if settings.playback.shuffle {
        player.toggle_shuffle()?;
    }

    let mut stdout = io::stdout();
    input::print_help(&mut stdout)?;
    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<Input>() {
            Ok(Input::Quit) => break,
            Ok(cmd) => {
                if let Err(e) = input::apply(&player, cmd, &mut stdout) {
                    warn!(error = %e, "command failed");
                }
            }
            Err(msg) => writeln!(stdout, "{msg}")?,
        }
        stdout.flush()?;
    }

    player.shutdown();
    Ok(())
}
