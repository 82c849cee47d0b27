//! High-score and difficulty persistence
//!
//! The store has a limited number of write cycles in its life, so values
//! are written back only when they actually improve or change. Corrupt
//! cells found at load are replaced with a safe default and rewritten
//! once; a load failure is never propagated.

use crate::config::{
    ADDR_DIFFICULTY, ADDR_SCORE_DODGE, ADDR_SCORE_RUNNER, ADDR_SCORE_SNAKE, DIFFICULTY_DEFAULT,
    DIFFICULTY_MAX, DIFFICULTY_MIN, SCORE_MAX_PLAUSIBLE,
};
use crate::games::GameKind;
use crate::traits::NvStore;

fn score_addr(kind: GameKind) -> u16 {
    match kind {
        GameKind::Runner => ADDR_SCORE_RUNNER,
        GameKind::Dodge => ADDR_SCORE_DODGE,
        GameKind::Snake => ADDR_SCORE_SNAKE,
    }
}

fn read_u16<S: NvStore>(store: &mut S, addr: u16) -> Option<u16> {
    let mut buf = [0u8; 2];
    store.read(addr, &mut buf).ok()?;
    Some(u16::from_le_bytes(buf))
}

/// The three persisted best scores, loaded once at boot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HighScores {
    runner: u16,
    dodge: u16,
    snake: u16,
}

impl HighScores {
    /// Load all three, range-checking each. Implausible values reset to 0
    /// and the cell is rewritten so the corruption does not survive.
    pub fn load<S: NvStore>(store: &mut S) -> Self {
        let mut scores = Self::default();
        for kind in GameKind::ALL {
            let addr = score_addr(kind);
            let value = match read_u16(store, addr) {
                Some(v) if v <= SCORE_MAX_PLAUSIBLE => v,
                Some(_) => {
                    let _ = store.write(addr, &0u16.to_le_bytes());
                    0
                }
                None => 0,
            };
            *scores.slot(kind) = value;
        }
        scores
    }

    fn slot(&mut self, kind: GameKind) -> &mut u16 {
        match kind {
            GameKind::Runner => &mut self.runner,
            GameKind::Dodge => &mut self.dodge,
            GameKind::Snake => &mut self.snake,
        }
    }

    pub fn get(&self, kind: GameKind) -> u16 {
        match kind {
            GameKind::Runner => self.runner,
            GameKind::Dodge => self.dodge,
            GameKind::Snake => self.snake,
        }
    }

    /// Persist a completed run's score if it beats the stored best.
    /// Non-improving scores perform no write at all.
    pub fn record<S: NvStore>(&mut self, kind: GameKind, score: u16, store: &mut S) {
        if score <= self.get(kind) {
            return;
        }
        *self.slot(kind) = score;
        let _ = store.write(score_addr(kind), &score.to_le_bytes());
    }
}

/// Load the equation difficulty, substituting the default for anything
/// outside 1..=5 and rewriting the cell in that case.
pub fn load_difficulty<S: NvStore>(store: &mut S) -> u8 {
    let mut buf = [0u8; 1];
    match store.read(ADDR_DIFFICULTY, &mut buf) {
        Ok(()) if (DIFFICULTY_MIN..=DIFFICULTY_MAX).contains(&buf[0]) => buf[0],
        Ok(()) => {
            let _ = store.write(ADDR_DIFFICULTY, &[DIFFICULTY_DEFAULT]);
            DIFFICULTY_DEFAULT
        }
        Err(_) => DIFFICULTY_DEFAULT,
    }
}

pub fn save_difficulty<S: NvStore>(store: &mut S, value: u8) {
    let _ = store.write(ADDR_DIFFICULTY, &[value]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeStore;

    #[test]
    fn test_load_defaults_on_blank_store() {
        // A blank EEPROM reads 0xFF everywhere
        let mut store = FakeStore::filled(0xFF);
        let scores = HighScores::load(&mut store);
        for kind in GameKind::ALL {
            assert_eq!(scores.get(kind), 0);
        }
        // Each corrupt cell was rewritten once
        assert_eq!(store.writes, 3);
        assert_eq!(load_difficulty(&mut store), DIFFICULTY_DEFAULT);
    }

    #[test]
    fn test_load_keeps_plausible_values() {
        let mut store = FakeStore::default();
        store.put_u16(ADDR_SCORE_SNAKE, 123);
        let scores = HighScores::load(&mut store);
        assert_eq!(scores.get(GameKind::Snake), 123);
        assert_eq!(store.writes, 0);
    }

    #[test]
    fn test_record_improvement_writes_once() {
        let mut store = FakeStore::default();
        let mut scores = HighScores::load(&mut store);
        store.writes = 0;

        scores.record(GameKind::Dodge, 10, &mut store);
        assert_eq!(scores.get(GameKind::Dodge), 10);
        assert_eq!(store.writes, 1);
        assert_eq!(store.get_u16(ADDR_SCORE_DODGE), 10);
    }

    #[test]
    fn test_record_is_idempotent_for_non_improving_scores() {
        let mut store = FakeStore::default();
        let mut scores = HighScores::load(&mut store);
        scores.record(GameKind::Runner, 50, &mut store);
        let writes_after_first = store.writes;

        // Same score twice in a row: no second write, value unchanged
        scores.record(GameKind::Runner, 50, &mut store);
        scores.record(GameKind::Runner, 49, &mut store);
        assert_eq!(store.writes, writes_after_first);
        assert_eq!(store.get_u16(ADDR_SCORE_RUNNER), 50);
    }

    #[test]
    fn test_difficulty_roundtrip() {
        let mut store = FakeStore::default();
        save_difficulty(&mut store, 5);
        assert_eq!(load_difficulty(&mut store), 5);
    }

    #[test]
    fn test_difficulty_out_of_range_resets() {
        let mut store = FakeStore::default();
        store.put_u8(ADDR_DIFFICULTY, 9);
        assert_eq!(load_difficulty(&mut store), DIFFICULTY_DEFAULT);
        assert_eq!(store.get_u8(ADDR_DIFFICULTY), DIFFICULTY_DEFAULT);
    }
}
