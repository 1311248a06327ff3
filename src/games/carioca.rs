use super::Validate;
use anyhow::{anyhow, Result};
use std::collections::HashSet;

// A single contract round. Descriptions name the melds a player has to lay
// down before going out in that round.
#[derive(Clone, Copy, Debug, serde::Serialize)]
pub struct Round {
    pub id: u32,
    pub name: &'static str,
    pub description: &'static str,
}

pub const ROUNDS: [Round; 7] = [
    Round { id: 1, name: "Round 1", description: "Two sets" },
    Round { id: 2, name: "Round 2", description: "One set and one run" },
    Round { id: 3, name: "Round 3", description: "Two runs" },
    Round { id: 4, name: "Round 4", description: "Three sets" },
    Round { id: 5, name: "Round 5", description: "Two sets and one run" },
    Round { id: 6, name: "Round 6", description: "One set and two runs" },
    Round { id: 7, name: "Round 7", description: "Three runs" },
];

#[derive(Clone, Debug, serde::Serialize)]
pub struct Player {
    pub id: u32,
    pub name: String,
    // One slot per entry in ROUNDS, kept at that length for the player's
    // lifetime. Total is recomputed from here on every write.
    pub scores: Vec<i32>,
    pub total: i32,
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct State {
    pub players: Vec<Player>,
    pub round: usize,
}

impl State {
    pub fn new() -> Self {
        State {
            players: Vec::new(),
            round: 0,
        }
    }

    pub fn current_round(&self) -> Round {
        ROUNDS[self.round]
    }

    pub fn is_final_round(&self) -> bool {
        self.round == ROUNDS.len() - 1
    }
}

impl Validate for State {
    fn validate(&self) -> Result<()> {
        if self.round >= ROUNDS.len() {
            return Err(anyhow!("Round pointer ({}) outside the bound [0, {}]", self.round, ROUNDS.len() - 1));
        }

        let mut seen: HashSet<u32> = HashSet::new();
        for player in &self.players {
            if player.scores.len() != ROUNDS.len() {
                return Err(anyhow!("Player {} has {} score slots, expected {}", player.id, player.scores.len(), ROUNDS.len()));
            }
            if player.total != player.scores.iter().sum::<i32>() {
                return Err(anyhow!("Player {} total ({}) drifted from its scores", player.id, player.total));
            }
            if !seen.insert(player.id) {
                return Err(anyhow!("Duplicate player id {}", player.id));
            }
        }

        Ok(())
    }
}

// Add a player with a fresh id and zeroed scores. Blank names (after
// trimming) are ignored.
pub fn add_player(state: &mut State, name: &str) {
    let name = name.trim();
    if name.is_empty() {
        return;
    }

    let new_id = state.players.iter().map(|p| p.id).max().map_or(1, |id| id + 1);
    state.players.push(Player {
        id: new_id,
        name: name.to_string(),
        scores: vec![0; ROUNDS.len()],
        total: 0,
    });

    log::debug!("Added player {} ({})", new_id, name);
}

// Unknown ids are ignored. Remaining players keep their ids.
pub fn remove_player(state: &mut State, id: u32) {
    state.players.retain(|p| p.id != id);
}

// Replace one score slot and recompute the player's total. Unknown player
// ids are ignored. The round index is assumed valid; callers only pass
// indices they enumerated from ROUNDS.
pub fn set_score(state: &mut State, player_id: u32, round_idx: usize, value: i32) {
    if let Some(player) = state.players.iter_mut().find(|p| p.id == player_id) {
        player.scores[round_idx] = value;
        player.total = player.scores.iter().sum();
        log::debug!("Score update: {}", serde_json::to_string(player).unwrap());
    }
}

pub fn next_round(state: &mut State) {
    if state.round < ROUNDS.len() - 1 {
        state.round += 1;
    }
}

pub fn previous_round(state: &mut State) {
    if state.round > 0 {
        state.round -= 1;
    }
}

// Drop all players and rewind the round pointer. The confirmation step lives
// in the TUI, not here.
pub fn reset(state: &mut State) {
    state.players.clear();
    state.round = 0;
}

// Ids of the players tied at the minimum total. Lowest total wins in
// Carioca. With no players there is no minimum and the answer is empty.
pub fn leaders(state: &State) -> Vec<u32> {
    match state.players.iter().map(|p| p.total).min() {
        Some(min_total) => state.players
            .iter()
            .filter(|p| p.total == min_total)
            .map(|p| p.id)
            .collect(),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id_of(state: &State, name: &str) -> u32 {
        state.players.iter().find(|p| p.name == name).unwrap().id
    }

    #[test]
    fn test_add_player_blank_names_ignored() {
        let mut state = State::new();
        add_player(&mut state, "");
        add_player(&mut state, "   ");
        assert!(state.players.is_empty());
    }

    #[test]
    fn test_add_player_trims_and_zero_fills() {
        let mut state = State::new();
        add_player(&mut state, "  Ana ");
        assert_eq!(state.players[0].name, "Ana");
        assert_eq!(state.players[0].scores, vec![0; ROUNDS.len()]);
        assert_eq!(state.players[0].total, 0);
        assert!(state.validate().is_ok());
    }

    #[test]
    fn test_duplicate_names_get_distinct_sequential_ids() {
        let mut state = State::new();
        add_player(&mut state, "Ana");
        add_player(&mut state, "Ana");
        assert_eq!(state.players.len(), 2);
        assert_eq!(state.players[0].id, 1);
        assert_eq!(state.players[1].id, 2);
    }

    #[test]
    fn test_ids_never_reused_after_removal() {
        let mut state = State::new();
        add_player(&mut state, "Ana");
        add_player(&mut state, "Leo");
        remove_player(&mut state, 1);
        add_player(&mut state, "Mia");
        // Max surviving id is 2, so the next id is 3
        assert_eq!(id_of(&state, "Mia"), 3);
    }

    #[test]
    fn test_remove_player_missing_id_is_noop() {
        let mut state = State::new();
        add_player(&mut state, "Ana");
        add_player(&mut state, "Leo");
        remove_player(&mut state, 99);
        assert_eq!(state.players.len(), 2);

        remove_player(&mut state, 1);
        assert_eq!(state.players.len(), 1);
        assert_eq!(state.players[0].id, 2);
    }

    #[test]
    fn test_set_score_recomputes_total() {
        let mut state = State::new();
        add_player(&mut state, "Ana");
        set_score(&mut state, 1, 0, 25);
        set_score(&mut state, 1, 3, -5);
        set_score(&mut state, 1, 0, 10);
        assert_eq!(state.players[0].scores[0], 10);
        assert_eq!(state.players[0].total, 5);
        assert_eq!(state.players[0].total, state.players[0].scores.iter().sum::<i32>());
        assert!(state.validate().is_ok());
    }

    #[test]
    fn test_set_score_unknown_player_is_noop() {
        let mut state = State::new();
        add_player(&mut state, "Ana");
        set_score(&mut state, 42, 0, 25);
        assert_eq!(state.players[0].total, 0);
    }

    #[test]
    fn test_leaders_empty_without_players() {
        let state = State::new();
        assert!(leaders(&state).is_empty());
    }

    #[test]
    fn test_leaders_ties_at_minimum() {
        let mut state = State::new();
        add_player(&mut state, "A");
        add_player(&mut state, "B");
        add_player(&mut state, "C");
        set_score(&mut state, 1, 0, 10);
        set_score(&mut state, 2, 0, 10);
        set_score(&mut state, 3, 0, 15);
        assert_eq!(leaders(&state), vec![1, 2]);
    }

    #[test]
    fn test_round_pointer_clamps_both_ways() {
        let mut state = State::new();
        for _ in 0..(ROUNDS.len() + 5) {
            next_round(&mut state);
        }
        assert_eq!(state.round, ROUNDS.len() - 1);
        assert!(state.is_final_round());

        for _ in 0..(ROUNDS.len() + 5) {
            previous_round(&mut state);
        }
        assert_eq!(state.round, 0);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut state = State::new();
        add_player(&mut state, "Ana");
        set_score(&mut state, 1, 2, 30);
        next_round(&mut state);
        next_round(&mut state);
        reset(&mut state);
        assert!(state.players.is_empty());
        assert_eq!(state.round, 0);
        assert!(state.validate().is_ok());
    }

    #[test]
    fn test_full_session_walkthrough() {
        let mut state = State::new();

        add_player(&mut state, "Ana");
        let ana = id_of(&state, "Ana");
        assert_eq!(state.players[0].scores, vec![0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(state.players[0].total, 0);

        set_score(&mut state, ana, 0, 25);
        assert_eq!(state.players[0].scores, vec![25, 0, 0, 0, 0, 0, 0]);
        assert_eq!(state.players[0].total, 25);

        add_player(&mut state, "Leo");
        let leo = id_of(&state, "Leo");
        set_score(&mut state, leo, 0, 10);
        assert_eq!(state.players[1].total, 10);

        assert_eq!(leaders(&state), vec![leo]);
        assert!(state.validate().is_ok());
    }
}
