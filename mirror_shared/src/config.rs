//! Configuration system.
//!
//! Loads client configuration from JSON strings/files (file IO left to app).

use serde::{Deserialize, Serialize};

/// Root client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Authority address, e.g. `127.0.0.1:40100`.
    pub server_addr: String,
    /// Player name sent with the join request.
    #[serde(default = "default_player_name")]
    pub player_name: String,
    /// Angular smoothing constant `k`; per-frame blend is `min(1, k * dt)`.
    #[serde(default = "default_turn_rate")]
    pub turn_rate: f32,
    /// Frame delta clamp in seconds. Keeps a resume-from-background
    /// frame from teleporting every animation to its end.
    #[serde(default = "default_max_frame_dt")]
    pub max_frame_dt: f32,
}

fn default_player_name() -> String {
    "Player".to_string()
}

fn default_turn_rate() -> f32 {
    10.0
}

fn default_max_frame_dt() -> f32 {
    0.25
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_addr: "127.0.0.1:40100".to_string(),
            player_name: default_player_name(),
            turn_rate: default_turn_rate(),
            max_frame_dt: default_max_frame_dt(),
        }
    }
}

impl ClientConfig {
    /// Parses config from JSON.
    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }
}
