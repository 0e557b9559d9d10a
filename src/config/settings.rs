#[derive(Debug, Clone)]
pub struct RatingSettings {
    pub base_rating: f64,
    pub spread: f64,
    pub scaling: f64,
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self {
            base_rating: 1500.0,
            spread: 500.0, // lower spread -> steeper expected score gradient
            scaling: 100.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub state_path: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            state_path: std::env::var("STATE_PATH").unwrap_or_else(|_| "scores.json".to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub rating: RatingSettings,
    pub storage: StorageSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            rating: RatingSettings::default(),
            storage: StorageSettings::default(),
        }
    }

    pub fn with_state_path(mut self, path: impl Into<String>) -> Self {
        self.storage.state_path = path.into();
        self
    }
}
