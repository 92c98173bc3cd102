//! Abstract input tokens and the per-tick set of them.
//!
//! The host maps raw keys to `Command`s; the core never sees a key code.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    Left,
    Right,
    Up,
    Down,
    Attack,
    Heal,
    DashLeft,
    DashRight,
}

impl Command {
    pub const ALL: [Command; 8] = [
        Command::Left,
        Command::Right,
        Command::Up,
        Command::Down,
        Command::Attack,
        Command::Heal,
        Command::DashLeft,
        Command::DashRight,
    ];

    fn bit(self) -> u8 {
        1 << (self as u8)
    }

    /// Parse a textual token. Unknown tokens yield `None`.
    pub fn from_token(token: &str) -> Option<Command> {
        match token.trim().to_ascii_lowercase().as_str() {
            "left" => Some(Command::Left),
            "right" => Some(Command::Right),
            "up" | "jump" => Some(Command::Up),
            "down" | "block" => Some(Command::Down),
            "attack" => Some(Command::Attack),
            "heal" => Some(Command::Heal),
            "dash_left" => Some(Command::DashLeft),
            "dash_right" => Some(Command::DashRight),
            _ => None,
        }
    }
}

/// The commands held on one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommandSet {
    bits: u8,
}

impl CommandSet {
    pub fn new() -> Self {
        CommandSet::default()
    }

    pub fn with(mut self, command: Command) -> Self {
        self.insert(command);
        self
    }

    pub fn insert(&mut self, command: Command) {
        self.bits |= command.bit();
    }

    pub fn remove(&mut self, command: Command) {
        self.bits &= !command.bit();
    }

    pub fn contains(&self, command: Command) -> bool {
        self.bits & command.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Command> {
        let set = *self;
        Command::ALL.into_iter().filter(move |c| set.contains(*c))
    }

    /// Build a set from textual tokens, skipping anything unrecognised.
    pub fn from_tokens<'a, I>(tokens: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut set = CommandSet::new();
        for token in tokens {
            match Command::from_token(token) {
                Some(command) => set.insert(command),
                None => tracing::trace!(token, "ignoring unknown command token"),
            }
        }
        set
    }

    /// Every possible combination of commands, for exhaustive checks.
    pub fn all_combinations() -> impl Iterator<Item = CommandSet> {
        (0..=u8::MAX).map(|bits| CommandSet { bits })
    }
}

impl FromIterator<Command> for CommandSet {
    fn from_iter<T: IntoIterator<Item = Command>>(iter: T) -> Self {
        let mut set = CommandSet::new();
        for command in iter {
            set.insert(command);
        }
        set
    }
}
