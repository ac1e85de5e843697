//! Best completed holes
//!
//! Persisted to LocalStorage, keeps the 10 lowest shot counts.

use serde::{Deserialize, Serialize};

/// Maximum number of rounds to keep
pub const MAX_ENTRIES: usize = 10;

/// A completed hole
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    /// Shots taken, out-of-bounds strokes included
    pub shots: u32,
    /// Course seed the hole was played on
    pub seed: u64,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// Leaderboard, fewest shots first
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Scorecard {
    pub entries: Vec<ScoreEntry>,
}

impl Scorecard {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "mini_golf_scorecard";

    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Whether a round with this many shots makes the card
    pub fn qualifies(&self, shots: u32) -> bool {
        if shots == 0 {
            return false;
        }
        if self.entries.len() < MAX_ENTRIES {
            return true;
        }
        self.entries.last().map(|e| shots < e.shots).unwrap_or(true)
    }

    /// Record a completed hole. Returns the rank (1-indexed) or None if it
    /// did not qualify. Ties rank behind earlier rounds.
    pub fn add(&mut self, shots: u32, seed: u64, timestamp: f64) -> Option<usize> {
        if !self.qualifies(shots) {
            return None;
        }

        let entry = ScoreEntry {
            shots,
            seed,
            timestamp,
        };

        let pos = self.entries.iter().position(|e| shots < e.shots);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_ENTRIES);
        Some(rank)
    }

    /// Fewest shots recorded
    pub fn best(&self) -> Option<u32> {
        self.entries.first().map(|e| e.shots)
    }

    /// Load the scorecard from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(card) = serde_json::from_str::<Scorecard>(&json) {
                    log::info!("Loaded {} scorecard entries", card.entries.len());
                    return card;
                }
            }
        }

        log::info!("No scorecard found, starting fresh");
        Self::new()
    }

    /// Save the scorecard to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Scorecard saved ({} entries)", self.entries.len());
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_fewest_first() {
        let mut card = Scorecard::new();
        assert_eq!(card.add(5, 42, 0.0), Some(1));
        assert_eq!(card.add(3, 42, 1.0), Some(1));
        assert_eq!(card.add(4, 42, 2.0), Some(2));
        let shots: Vec<u32> = card.entries.iter().map(|e| e.shots).collect();
        assert_eq!(shots, vec![3, 4, 5]);
        assert_eq!(card.best(), Some(3));
    }

    #[test]
    fn test_tie_ranks_behind() {
        let mut card = Scorecard::new();
        card.add(3, 1, 0.0);
        assert_eq!(card.add(3, 2, 1.0), Some(2));
        assert_eq!(card.entries[0].seed, 1);
    }

    #[test]
    fn test_full_card_needs_better_score() {
        let mut card = Scorecard::new();
        for i in 0..MAX_ENTRIES as u32 {
            card.add(2 + i, 42, i as f64);
        }
        assert!(!card.qualifies(11));
        assert_eq!(card.add(12, 42, 99.0), None);
        assert_eq!(card.add(1, 42, 100.0), Some(1));
        assert_eq!(card.entries.len(), MAX_ENTRIES);
        assert_eq!(card.entries.last().map(|e| e.shots), Some(10));
    }

    #[test]
    fn test_zero_shots_never_qualify() {
        assert!(!Scorecard::new().qualifies(0));
    }
}
