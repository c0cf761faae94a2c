//! Severity-to-visual mapping.

use serde::{Deserialize, Serialize};

use crate::api::{FacilityType, OutbreakZone, Severity};

/// Color tokens per severity level, overridable from configuration.
///
/// Tokens are opaque strings handed to the rendering layer; the engine
/// never interprets them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityPalette {
    #[serde(default = "default_low_color")]
    pub low: String,
    #[serde(default = "default_medium_color")]
    pub medium: String,
    #[serde(default = "default_high_color")]
    pub high: String,
    /// Token for zones whose case count dropped to 0
    #[serde(default = "default_resolved_color")]
    pub resolved: String,
}

fn default_low_color() -> String {
    "#10b981".to_string() // Emerald
}

fn default_medium_color() -> String {
    "#f59e0b".to_string() // Amber
}

fn default_high_color() -> String {
    "#ef4444".to_string() // Red
}

fn default_resolved_color() -> String {
    "#6b7280".to_string() // Gray
}

impl Default for SeverityPalette {
    fn default() -> Self {
        Self {
            low: default_low_color(),
            medium: default_medium_color(),
            high: default_high_color(),
            resolved: default_resolved_color(),
        }
    }
}

impl SeverityPalette {
    /// Color token for a severity level.
    pub fn color(&self, severity: Severity) -> &str {
        match severity {
            Severity::Low => &self.low,
            Severity::Medium => &self.medium,
            Severity::High => &self.high,
        }
    }

    /// Color token for a zone. Resolved zones get the neutral token
    /// regardless of their recorded severity.
    pub fn zone_color(&self, zone: &OutbreakZone) -> &str {
        if zone.is_resolved() {
            &self.resolved
        } else {
            self.color(zone.severity)
        }
    }
}

/// Numeric sort weight for a severity level. Must agree with the `Ord`
/// ordering on [`Severity`]: higher weight means more severe.
pub fn severity_weight(severity: Severity) -> u8 {
    match severity {
        Severity::Low => 0,
        Severity::Medium => 1,
        Severity::High => 2,
    }
}

/// Marker color token for a facility ownership category.
pub fn facility_marker_color(kind: FacilityType) -> &'static str {
    match kind {
        FacilityType::Government => "#3b82f6", // Blue
        FacilityType::Private => "#10b981",    // Emerald
    }
}
