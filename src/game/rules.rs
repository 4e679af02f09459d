//! Tunable rule constants
//!
//! Defaults are the published rules. A `RuleSet` is serde-loadable so the
//! CLI can read one from a JSON file.

use crate::{DealError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Hard cap on participants per match
pub const MAX_PARTICIPANTS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    /// Card plays per turn
    pub actions_per_turn: u8,
    /// Maximum hand size at the end of a turn
    pub hand_limit: usize,
    /// Cards dealt to each participant when the match starts
    pub opening_hand: usize,
    /// Cards drawn at the start of a turn
    pub draw_per_turn: usize,
    /// Cards drawn at the start of a turn when the hand is empty
    pub empty_hand_draw: usize,
    /// Cards drawn by a draw-two action
    pub draw_two_count: usize,
    /// Complete sets needed to win
    pub sets_to_win: usize,
    /// Amount every opponent pays for collect-from-all
    pub collect_from_all_amount: u32,
    /// Amount the target pays for collect-from-one
    pub collect_from_one_amount: u32,
    pub min_players: usize,
    pub max_players: usize,
}

impl Default for RuleSet {
    fn default() -> Self {
        RuleSet {
            actions_per_turn: 3,
            hand_limit: 7,
            opening_hand: 5,
            draw_per_turn: 2,
            empty_hand_draw: 5,
            draw_two_count: 2,
            sets_to_win: 3,
            collect_from_all_amount: 2,
            collect_from_one_amount: 5,
            min_players: 2,
            max_players: MAX_PARTICIPANTS,
        }
    }
}

impl RuleSet {
    /// Reject rule sets the engine cannot honour
    pub fn validate(&self) -> Result<()> {
        if self.min_players < 2 || self.max_players > MAX_PARTICIPANTS || self.min_players > self.max_players {
            return Err(DealError::InvalidPlayerCount {
                found: self.max_players,
                min: self.min_players,
                max: MAX_PARTICIPANTS,
            });
        }
        if self.actions_per_turn == 0 || self.sets_to_win == 0 {
            return Err(DealError::CardMisuse(
                "rules need at least one action per turn and one set to win".to_string(),
            ));
        }
        Ok(())
    }

    /// Load a rule set from a JSON file; missing fields take their defaults
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let rules: RuleSet = serde_json::from_str(&json)?;
        rules.validate()?;
        Ok(rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let rules = RuleSet::default();
        assert!(rules.validate().is_ok());
        assert_eq!(rules.actions_per_turn, 3);
        assert_eq!(rules.hand_limit, 7);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let rules: RuleSet = serde_json::from_str(r#"{"hand_limit": 9}"#).unwrap();
        assert_eq!(rules.hand_limit, 9);
        assert_eq!(rules.sets_to_win, 3);
    }

    #[test]
    fn test_too_many_players_rejected() {
        let rules = RuleSet {
            max_players: 6,
            ..RuleSet::default()
        };
        assert!(rules.validate().is_err());
    }
}
