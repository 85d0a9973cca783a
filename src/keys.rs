//! Input source adapter: keyboard and pointer input both become `Command`s.

use crate::flower::{Flower, Variant};

/// A player intent, independent of the input device it came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Press(Flower),
    Replay,
    Submit,
    Undo,
    ClearAll,
}

impl Command {
    /// Map a `KeyboardEvent.key` value. Flower keys outside the variant's alphabet map to nothing.
    pub fn from_key(key: &str, variant: Variant) -> Option<Command> {
        let key = key.to_ascii_lowercase();
        match key.as_str() {
            "r" => Some(Command::Replay),
            "enter" => Some(Command::Submit),
            "backspace" => Some(Command::Undo),
            "delete" => Some(Command::ClearAll),
            _ => {
                let mut chars = key.chars();
                let c = chars.next()?;
                if chars.next().is_some() {
                    return None;
                }
                variant
                    .flowers()
                    .iter()
                    .find(|f| f.key() == c)
                    .map(|f| Command::Press(*f))
            }
        }
    }

    /// Delete would otherwise navigate or edit in some browsers.
    pub fn suppresses_default(self) -> bool {
        matches!(self, Command::ClearAll)
    }
}
