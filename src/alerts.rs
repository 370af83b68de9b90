use llio::{Llio, VibePattern};

#[derive(Clone)]
pub struct AlertConfig {
    pub vibration: bool,
}

impl AlertConfig {
    pub fn default() -> Self {
        Self { vibration: true }
    }
}

/// Zero-crossing buzz for a hold counter.
pub fn short_pulse(config: &AlertConfig, llio: &Llio) {
    if config.vibration {
        if let Err(e) = llio.vibe(VibePattern::Short) {
            log::error!("vibe failed: {:?}", e);
        }
    }
}
