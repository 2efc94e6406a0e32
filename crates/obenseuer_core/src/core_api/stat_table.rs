//! Player stats accepted by the in-game `player_stats` console command.
//!
//! The set is fixed by the game; ids are the exact tokens the console expects
//! (including the game's own `alchohol_need` spelling).

use std::fmt;

use serde::Serialize;

pub const DEFAULT_STAT: &str = "health";
pub const DEFAULT_STAT_VALUE: i64 = 100;

/// Quick-pick values offered next to the stat value input.
pub const STAT_VALUE_PRESETS: [i64; 5] = [0, 25, 50, 75, 100];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatGroup {
    Vital,
    Need,
}

impl StatGroup {
    pub const ALL: [StatGroup; 2] = [StatGroup::Vital, StatGroup::Need];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Vital => "Vital Stats",
            Self::Need => "Need Stats",
        }
    }
}

impl fmt::Display for StatGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlayerStat {
    pub id: &'static str,
    pub label: &'static str,
    pub group: StatGroup,
}

#[rustfmt::skip]
const PLAYER_STATS: &[PlayerStat] = &[
    PlayerStat { id: "health",        label: "Health",        group: StatGroup::Vital },
    PlayerStat { id: "hunger",        label: "Hunger",        group: StatGroup::Vital },
    PlayerStat { id: "thirst",        label: "Thirst",        group: StatGroup::Vital },
    PlayerStat { id: "tiredness",     label: "Tiredness",     group: StatGroup::Vital },
    PlayerStat { id: "hygiene",       label: "Hygiene",       group: StatGroup::Vital },

    PlayerStat { id: "bladder",       label: "Bladder",       group: StatGroup::Need },
    PlayerStat { id: "depression",    label: "Depression",    group: StatGroup::Need },
    PlayerStat { id: "alchohol_need", label: "Alcohol Need",  group: StatGroup::Need },
    PlayerStat { id: "mushroom_need", label: "Mushroom Need", group: StatGroup::Need },
    PlayerStat { id: "smoking_need",  label: "Smoking Need",  group: StatGroup::Need },
];

pub fn all() -> &'static [PlayerStat] {
    PLAYER_STATS
}

pub fn in_group(group: StatGroup) -> impl Iterator<Item = &'static PlayerStat> {
    PLAYER_STATS.iter().filter(move |stat| stat.group == group)
}

pub fn lookup(id: &str) -> Option<&'static PlayerStat> {
    PLAYER_STATS.iter().find(|stat| stat.id == id)
}
