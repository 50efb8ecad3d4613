//! Line commands for the headless driver.

use std::io::Write;
use std::str::FromStr;

use encore::playback::{Player, PlayerState, Screen};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    Help,
    List,
    Recent,
    Status,
    /// 1-based position in the current queue.
    Play(usize),
    TogglePause,
    Next,
    Prev,
    Shuffle,
    Seek(f32),
    Go(Screen),
    Reload,
    Quit,
}

impl FromStr for Input {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let cmd = parts.next().unwrap_or("").to_ascii_lowercase();
        let arg = parts.next();

        match (cmd.as_str(), arg) {
            ("help" | "?", None) => Ok(Input::Help),
            ("ls" | "list", None) => Ok(Input::List),
            ("recent", None) => Ok(Input::Recent),
            ("status" | "st", None) => Ok(Input::Status),
            ("play", Some(n)) => match n.parse::<usize>() {
                Ok(n) if n >= 1 => Ok(Input::Play(n)),
                _ => Err(format!("not a queue position: {n}")),
            },
            ("p" | "pause", None) => Ok(Input::TogglePause),
            ("n" | "next", None) => Ok(Input::Next),
            ("b" | "prev", None) => Ok(Input::Prev),
            ("s" | "shuffle", None) => Ok(Input::Shuffle),
            ("seek", Some(f)) => f
                .parse::<f32>()
                .map(Input::Seek)
                .map_err(|_| format!("not a fraction: {f}")),
            ("go", Some(screen)) => screen.parse().map(Input::Go),
            ("reload", None) => Ok(Input::Reload),
            ("q" | "quit", None) => Ok(Input::Quit),
            _ => Err(format!("unknown command: {s} (try `help`)")),
        }
    }
}

pub fn print_help(out: &mut impl Write) -> std::io::Result<()> {
    writeln!(
        out,
        "commands: ls, recent, status, play N, p, n, b, s, seek F, go SCREEN, reload, q"
    )
}

fn print_status(state: &PlayerState, out: &mut impl Write) -> std::io::Result<()> {
    let track = state
        .now_playing
        .as_ref()
        .map_or_else(|| "-".to_string(), |t| t.display());
    writeln!(
        out,
        "[{}] {:?} {} {:>3.0}%{}",
        state.current_screen,
        state.phase,
        track,
        state.progress * 100.0,
        if state.shuffle { " (shuffle)" } else { "" }
    )
}

pub fn apply(
    player: &Player,
    input: Input,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    match input {
        Input::Help => print_help(out)?,
        Input::List => {
            let state = player.snapshot();
            let current = state.queue_position();
            for (i, t) in state.queue.iter().enumerate() {
                let marker = if Some(i) == current { '>' } else { ' ' };
                writeln!(out, "{marker}{:>4}  {}", i + 1, t.display())?;
            }
        }
        Input::Recent => {
            for t in &player.snapshot().recently_played {
                writeln!(out, "  {}", t.display())?;
            }
        }
        Input::Status => print_status(&player.snapshot(), out)?,
        Input::Play(n) => {
            let track = player.snapshot().queue.get(n - 1).cloned();
            match track {
                Some(track) => player.play_song(track)?,
                None => writeln!(out, "queue has no position {n}")?,
            }
        }
        Input::TogglePause => player.toggle_play_pause()?,
        Input::Next => player.play_next_song()?,
        Input::Prev => player.play_previous_song()?,
        Input::Shuffle => player.toggle_shuffle()?,
        Input::Seek(f) => player.seek_to(f)?,
        Input::Go(screen) => player.navigate_to(screen)?,
        Input::Reload => {
            let outcome = player.load_library().wait()?;
            writeln!(out, "{outcome:?}")?;
        }
        Input::Quit => {}
    }

    if !matches!(input, Input::Help | Input::Status | Input::Quit) {
        print_status(&player.snapshot(), out)?;
    }
    Ok(())
}
