//! Line-oriented playlist console.
//!
//! Reads commands from any [`BufRead`], prints feedback and the re-rendered
//! playlist to any [`Write`]. The playlist is borrowed from the caller for the
//! lifetime of the session.

use std::{
    io::{BufRead, Write},
    path::PathBuf,
};

use anyhow::bail;
use log::debug;

use crate::{feedback::Feedback, import, playlist::Playlist};

const HELP: &str = "\
commands:
  add <path> | <title> | <artist>   queue a music file
  delete <title>                    remove the first track with this title
  next                              move to the next track
  prev                              move to the previous track
  now                               show the current track
  list                              show the playlist
  len                               show the number of tracks
  help                              show this help
  quit                              leave the shell";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add {
        path: PathBuf,
        title: String,
        artist: String,
    },
    Delete {
        title: String,
    },
    Next,
    Prev,
    Now,
    List,
    Len,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> anyhow::Result<Option<Command>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_lowercase().as_str() {
            "add" => {
                let parts: Vec<&str> = rest.split('|').map(str::trim).collect();
                let [path, title, artist] = parts.as_slice() else {
                    bail!("usage: add <path> | <title> | <artist>");
                };
                Command::Add {
                    path: PathBuf::from(*path),
                    title: title.to_string(),
                    artist: artist.to_string(),
                }
            }
            "delete" | "rm" => {
                if rest.is_empty() {
                    bail!("usage: delete <title>");
                }
                Command::Delete {
                    title: rest.to_string(),
                }
            }
            "next" => Command::Next,
            "prev" => Command::Prev,
            "now" => Command::Now,
            "list" | "ls" => Command::List,
            "len" => Command::Len,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => bail!("unknown command '{other}', type 'help'"),
        };
        Ok(Some(command))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Shell<'p> {
    playlist: &'p mut Playlist,
}

impl<'p> Shell<'p> {
    pub fn new(playlist: &'p mut Playlist) -> Self {
        Self { playlist }
    }

    /// Runs until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> anyhow::Result<()> {
        write!(out, "> ")?;
        out.flush()?;
        for line in input.lines() {
            if self.execute(&line?, out)? == Flow::Quit {
                return Ok(());
            }
            write!(out, "> ")?;
            out.flush()?;
        }
        writeln!(out)?;
        Ok(())
    }

    /// Executes one input line. Only output errors are returned; command
    /// failures are printed as feedback.
    pub fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> anyhow::Result<Flow> {
        let command = match Command::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(Flow::Continue),
            Err(err) => {
                writeln!(out, "{}", Feedback::error(err.to_string()))?;
                return Ok(Flow::Continue);
            }
        };
        debug!("shell command {command:?}");

        match command {
            Command::Add {
                path,
                title,
                artist,
            } => {
                let feedback = match import::read_track(&path, &title, &artist) {
                    Ok(upload) => upload.add_to(self.playlist),
                    Err(import::error::ImportError::MissingFields) => {
                        Feedback::missing_upload_fields()
                    }
                    Err(err) => Feedback::error(err.to_string()),
                };
                self.report(&feedback, out)?;
            }
            Command::Delete { title } => {
                let result = self.playlist.delete(&title);
                let feedback = Feedback::deleted(&title, &result);
                self.report(&feedback, out)?;
            }
            Command::Next => {
                let feedback = Feedback::navigated(&self.playlist.advance());
                self.report(&feedback, out)?;
            }
            Command::Prev => {
                let feedback = Feedback::navigated(&self.playlist.retreat());
                self.report(&feedback, out)?;
            }
            Command::Now => {
                let current = self.playlist.peek_current();
                writeln!(out, "{}", Feedback::now_playing(current))?;
                if let Some(track) = current {
                    writeln!(
                        out,
                        "  {} bytes, digest {}",
                        track.payload().len(),
                        track.digest().short()
                    )?;
                }
            }
            Command::List => self.print_playlist(out)?,
            Command::Len => writeln!(out, "Total songs: {}", self.playlist.len())?,
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// prints the feedback and, after a successful change, the playlist
    fn report<W: Write>(&self, feedback: &Feedback, out: &mut W) -> anyhow::Result<()> {
        writeln!(out, "{feedback}")?;
        if feedback.is_success() {
            self.print_playlist(out)?;
        }
        Ok(())
    }

    fn print_playlist<W: Write>(&self, out: &mut W) -> anyhow::Result<()> {
        if self.playlist.is_empty() {
            writeln!(out, "Playlist is empty. Upload some songs!")?;
            return Ok(());
        }
        for line in self.playlist.render() {
            writeln!(out, "{line}")?;
        }
        writeln!(out, "Total songs: {}", self.playlist.len())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn run_script(playlist: &mut Playlist, script: &str) -> anyhow::Result<String> {
        let mut out = Vec::new();
        Shell::new(playlist).run(script.as_bytes(), &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn test_parse_add() -> anyhow::Result<()> {
        let command = Command::parse("add ./a b.mp3 | Song Title | The Band")?;

        assert_eq!(
            command,
            Some(Command::Add {
                path: PathBuf::from("./a b.mp3"),
                title: "Song Title".to_string(),
                artist: "The Band".to_string(),
            })
        );
        Ok(())
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(Command::parse("add only-a-path.mp3").is_err());
        assert!(Command::parse("delete").is_err());
        assert!(Command::parse("shuffle").is_err());
    }

    #[test]
    fn test_parse_blank_and_aliases() -> anyhow::Result<()> {
        assert_eq!(Command::parse("   ")?, None);
        assert_eq!(Command::parse("LS")?, Some(Command::List));
        assert_eq!(
            Command::parse("rm  Two Words ")?,
            Some(Command::Delete {
                title: "Two Words".to_string()
            })
        );
        Ok(())
    }

    #[test]
    fn test_session_adds_navigates_and_deletes() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let a = dir.path().join("a.mp3");
        let b = dir.path().join("b.mp3");
        fs::write(&a, b"aaa")?;
        fs::write(&b, b"bbb")?;

        let script = format!(
            "add {} | A | X\nadd {} | B | Y\nnext\nnext\ndelete B\nlen\nquit\nlen\n",
            a.to_string_lossy(),
            b.to_string_lossy()
        );
        let mut playlist = Playlist::new();
        let output = run_script(&mut playlist, &script)?;

        assert!(output.contains("[ok] Added: A by X"));
        assert!(output.contains("[ok] Now playing: B by Y"));
        assert!(output.contains("▶ 2. B by Y"));
        assert!(output.contains("[warning] End of playlist."));
        assert!(output.contains("[ok] Deleted: B"));
        assert!(output.contains("Total songs: 1"));
        // after adding A, after deleting B and for `len`; nothing runs after quit
        assert_eq!(output.matches("Total songs: 1").count(), 3);

        assert_eq!(playlist.len(), 1);
        assert_eq!(playlist.peek_current().map(|t| t.title()), Some("A"));
        Ok(())
    }

    #[test]
    fn test_session_reports_failures() -> anyhow::Result<()> {
        let mut playlist = Playlist::new();

        let output = run_script(
            &mut playlist,
            "delete Ghost\nprev\nnow\nlist\nadd /nope.mp3 | A | X\nbogus\n",
        )?;

        assert!(output.contains("[error] Cannot delete 'Ghost'. Playlist is empty."));
        assert!(output.contains("[warning] Playlist is empty."));
        assert!(output.contains("[warning] Playlist is empty or no song is selected."));
        assert!(output.contains("Playlist is empty. Upload some songs!"));
        assert!(output.contains("[error] filesystem error at /nope.mp3"));
        assert!(output.contains("[error] unknown command 'bogus'"));
        assert!(playlist.is_empty());
        Ok(())
    }

    #[test]
    fn test_now_shows_digest() -> anyhow::Result<()> {
        let mut playlist = Playlist::new();
        playlist.add("A", "X", b"payload".to_vec());
        let digest = playlist.peek_current().map(|t| t.digest().short());

        let output = run_script(&mut playlist, "now\n")?;

        assert!(output.contains("[ok] Now playing: A by X"));
        assert!(output.contains(&format!("7 bytes, digest {}", digest.unwrap_or_default())));
        Ok(())
    }
}
