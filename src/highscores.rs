//! High score persistence
//!
//! A single best score lives under the LocalStorage key `HighScore`, stored
//! as an integer string. Comparison is numeric: the stored value is parsed
//! before comparing, and anything non-numeric is treated as no high score
//! yet. (Comparing the raw string against a number goes lexicographic for
//! multi-digit values.)

/// Best score across runs on this browser
#[derive(Debug, Clone, Default)]
pub struct HighScore {
    best: Option<u64>,
}

impl HighScore {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "HighScore";

    /// Empty record, no best yet
    pub fn new() -> Self {
        Self { best: None }
    }

    /// The stored best, if any
    pub fn best(&self) -> Option<u64> {
        self.best
    }

    /// True when `score` numerically beats the stored best.
    ///
    /// Strict: matching the best, or a zero score with nothing stored,
    /// does not qualify.
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.best.unwrap_or(0)
    }

    /// Record a finished run; returns true when it became the new best
    pub fn record(&mut self, score: u64) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best = Some(score);
        self.save();
        true
    }

    /// Parse a stored value, treating malformed input as absent
    fn parse_stored(raw: &str) -> Option<u64> {
        raw.trim().parse().ok()
    }

    /// Load the best score from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(raw)) = storage.get_item(Self::STORAGE_KEY) {
                if let Some(best) = Self::parse_stored(&raw) {
                    log::info!("Loaded high score: {}", best);
                    return Self { best: Some(best) };
                }
                log::warn!("Stored high score {:?} is not a number, ignoring", raw);
            }
        }

        log::info!("No high score found, starting fresh");
        Self::new()
    }

    /// Save the best score to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let (Some(storage), Some(best)) = (storage, self.best) {
            let _ = storage.set_item(Self::STORAGE_KEY, &best.to_string());
            log::info!("High score saved: {}", best);
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn save(&self) {
        // No-op for native
    }
}
