use std::fmt;

use super::error::{CoreError, CoreErrorCode};
use super::stat_table;
use super::types::ItemId;

pub const GOD_MODE_COMMAND: &str = "god_mode";
pub const NOCLIP_COMMAND: &str = "noclip";

/// Produces `add_item <id> <amount>`. Amount is not range checked.
pub fn format_item_command(id: ItemId, amount: i64) -> String {
    format!("add_item {id} {amount}")
}

/// Produces `player_stats <stat> set <value>`. Neither argument is checked.
pub fn format_stat_command(stat_name: &str, value: i64) -> String {
    format!("player_stats {stat_name} set {value}")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    AddItem { id: ItemId, amount: i64 },
    PlayerStat { stat: String, value: i64 },
    GodMode,
    Noclip,
}

impl ConsoleCommand {
    pub fn add_item(id: ItemId, amount: i64) -> Self {
        Self::AddItem { id, amount }
    }

    pub fn player_stat(stat: &str, value: i64) -> Result<Self, CoreError> {
        let Some(known) = stat_table::lookup(stat) else {
            return Err(CoreError::new(
                CoreErrorCode::UnknownStat,
                format!("unknown player stat '{stat}'"),
            ));
        };
        Ok(Self::PlayerStat {
            stat: known.id.to_string(),
            value,
        })
    }
}

impl fmt::Display for ConsoleCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddItem { id, amount } => f.write_str(&format_item_command(*id, *amount)),
            Self::PlayerStat { stat, value } => f.write_str(&format_stat_command(stat, *value)),
            Self::GodMode => f.write_str(GOD_MODE_COMMAND),
            Self::Noclip => f.write_str(NOCLIP_COMMAND),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_fixed_grammar() {
        assert_eq!(format_item_command(42, 10), "add_item 42 10");
        assert_eq!(format_stat_command("health", 100), "player_stats health set 100");
        assert_eq!(ConsoleCommand::GodMode.to_string(), "god_mode");
        assert_eq!(ConsoleCommand::Noclip.to_string(), "noclip");
    }

    #[test]
    fn formatter_does_not_clamp() {
        assert_eq!(format_item_command(1, 0), "add_item 1 0");
        assert_eq!(format_stat_command("hunger", -5), "player_stats hunger set -5");
    }

    #[test]
    fn player_stat_rejects_unknown_names() {
        let cmd = ConsoleCommand::player_stat("thirst", 25).expect("thirst is a known stat");
        assert_eq!(cmd.to_string(), "player_stats thirst set 25");

        let err = ConsoleCommand::player_stat("mana", 1).expect_err("mana is not a stat");
        assert_eq!(err.code, CoreErrorCode::UnknownStat);
    }
}
