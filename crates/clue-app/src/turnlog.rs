use clue_core::engine::{TurnEntry, TurnRecord, TurnSink};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Append-only CSV journal of processed turns, one file per game id.
/// Columns after the suggestion triple follow roster order: `PASS`,
/// `SHOW`, the revealed card's name, or empty.
pub struct CsvTurnLog {
    writer: BufWriter<File>,
    path: PathBuf,
}

impl CsvTurnLog {
    /// Creates the game directory and writes the header row.
    pub fn create(path: &Path, player_names: &[String]) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        writeln!(
            writer,
            "guessing_player,person,room,weapon,{}",
            player_names.join(",")
        )?;
        writer.flush()?;
        Ok(Self {
            writer,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TurnSink for CsvTurnLog {
    fn append_turn_record(&mut self, record: &TurnRecord) -> io::Result<()> {
        let suggestion = &record.suggestion;
        write!(
            self.writer,
            "{},{},{},{}",
            record.suggesting_player, suggestion.suspect, suggestion.room, suggestion.weapon
        )?;
        for (_, entry) in &record.entries {
            match entry {
                TurnEntry::Pass => write!(self.writer, ",PASS")?,
                TurnEntry::Showed => write!(self.writer, ",SHOW")?,
                TurnEntry::Revealed(card) => write!(self.writer, ",{card}")?,
                TurnEntry::Quiet => write!(self.writer, ",")?,
            }
        }
        writeln!(self.writer)?;
        self.writer.flush()
    }
}
