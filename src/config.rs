use serde::{Deserialize, Serialize};

/// Timings used for cosmetic transitions, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationDurations {
    pub short: u32,
    pub medium: u32,
    pub long: u32,
}

impl Default for AnimationDurations {
    fn default() -> Self {
        Self {
            short: 300,
            medium: 500,
            long: 1000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Scroll offset in pixels past which the header turns sticky.
    pub scroll: f64,
    /// Visible ratio at which an element counts as entered.
    pub intersection: f64,
    /// Pixels trimmed off the bottom of the viewport before intersecting.
    pub intersection_bottom_margin: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            scroll: 100.0,
            intersection: 0.1,
            intersection_bottom_margin: 50,
        }
    }
}

/// Static configuration of the page interaction manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    pub contact_number: String,
    pub messaging_base_url: String,
    pub durations: AnimationDurations,
    pub thresholds: Thresholds,
    /// Header height assumed when the page has no `.header`.
    pub fallback_header_height: f64,
    /// How long a notification stays on screen before sliding out.
    pub notification_ms: u32,
    /// Delay before `page-loaded` lands on the body.
    pub page_loaded_delay_ms: u32,
    /// `EnvFilter` directive for the console logger.
    pub log_directive: String,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            contact_number: "1234567890".to_string(),
            messaging_base_url: "https://wa.me".to_string(),
            durations: AnimationDurations::default(),
            thresholds: Thresholds::default(),
            fallback_header_height: 80.0,
            notification_ms: 3000,
            page_loaded_delay_ms: 100,
            log_directive: "info".to_string(),
        }
    }
}

impl InteractionConfig {
    /// The loading overlay covers the page for twice the long duration.
    pub fn loading_overlay_ms(&self) -> u32 {
        self.durations.long * 2
    }

    pub fn root_margin(&self) -> String {
        format!("0px 0px -{}px 0px", self.thresholds.intersection_bottom_margin)
    }
}

/// Static configuration of the gallery controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Filter token that matches every item.
    pub all_token: String,
    pub show_delay_ms: u32,
    pub hide_delay_ms: u32,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            all_token: "all".to_string(),
            show_delay_ms: 50,
            hide_delay_ms: 300,
        }
    }
}
