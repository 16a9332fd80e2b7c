use serde::{Deserialize, Serialize};

/// Number of seats at the table. Every per-player vector is this long.
pub const PLAYER_COUNT: usize = 4;

/// Roster used when no override is configured
pub const DEFAULT_PLAYERS: [&str; PLAYER_COUNT] = ["HT", "SJ1", "LY", "ZKL"];

/// Placeholder shown instead of item text in summaries
pub const MASK: &str = "*****";

pub type PlayerName = String;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Players take turns entering their lists
    #[default]
    Input,
    /// All lists are locked, waiting for someone to shuffle
    ShuffleConfirm,
    /// Pool is shuffled, players draw
    Draw,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::ShuffleConfirm => "shuffle_confirm",
            Self::Draw => "draw",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two parallel item categories every player contributes to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    #[default]
    DontDo,
    Punishment,
}

impl ItemKind {
    pub const ALL: [ItemKind; 2] = [ItemKind::DontDo, ItemKind::Punishment];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DontDo => "dont_do",
            Self::Punishment => "punishment",
        }
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One value per item kind
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PerKind<T> {
    #[serde(default)]
    pub dont_do: T,
    #[serde(default)]
    pub punishment: T,
}

impl<T> PerKind<T> {
    pub fn get(&self, kind: ItemKind) -> &T {
        match kind {
            ItemKind::DontDo => &self.dont_do,
            ItemKind::Punishment => &self.punishment,
        }
    }

    pub fn get_mut(&mut self, kind: ItemKind) -> &mut T {
        match kind {
            ItemKind::DontDo => &mut self.dont_do,
            ItemKind::Punishment => &mut self.punishment,
        }
    }

    /// Build both halves from a per-kind constructor
    pub fn from_fn(mut f: impl FnMut(ItemKind) -> T) -> Self {
        Self {
            dont_do: f(ItemKind::DontDo),
            punishment: f(ItemKind::Punishment),
        }
    }
}

/// The pair a player drew in the current epoch
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Assignment {
    pub dont_do: String,
    pub punishment: String,
}

/// Fixed set of seat names, in turn order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    names: [PlayerName; PLAYER_COUNT],
}

impl Roster {
    pub fn new(names: [PlayerName; PLAYER_COUNT]) -> Self {
        Self { names }
    }

    /// Build a roster from arbitrary input, rejecting wrong sizes, blanks and duplicates
    pub fn parse(raw: &str) -> Result<Self, String> {
        let names: Vec<String> = raw
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let count = names.len();
        let names: [PlayerName; PLAYER_COUNT] = names
            .try_into()
            .map_err(|_| format!("expected {} player names, got {}", PLAYER_COUNT, count))?;
        for (i, name) in names.iter().enumerate() {
            if names[..i].contains(name) {
                return Err(format!("duplicate player name '{}'", name));
            }
        }
        Ok(Self::new(names))
    }

    pub fn name(&self, index: usize) -> &str {
        &self.names[index.min(PLAYER_COUNT - 1)]
    }

    pub fn names(&self) -> &[PlayerName] {
        &self.names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::new(DEFAULT_PLAYERS.map(String::from))
    }
}
