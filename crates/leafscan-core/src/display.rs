use leafscan_types::Color;

pub const HEALTHY_COLOR: Color = Color::Green;
pub const DISEASE_COLOR: Color = Color::Red;

pub const GOOD_CONFIDENCE_COLOR: Color = Color::Green;
pub const WARNING_CONFIDENCE_COLOR: Color = Color::Amber;
pub const POOR_CONFIDENCE_COLOR: Color = Color::Red;

pub const RELIABILITY_WARNING: &str =
    "Low confidence prediction. Consider retaking the image with better lighting.";

pub fn health_color(is_healthy: bool) -> Color {
    if is_healthy {
        HEALTHY_COLOR
    } else {
        DISEASE_COLOR
    }
}

/// Tiers are inclusive on their lower bound: 0.8 is good, 0.6 is warning
pub fn confidence_color(confidence: f64) -> Color {
    if confidence >= 0.8 {
        GOOD_CONFIDENCE_COLOR
    } else if confidence >= 0.6 {
        WARNING_CONFIDENCE_COLOR
    } else {
        POOR_CONFIDENCE_COLOR
    }
}

pub fn health_badge(is_healthy: bool) -> &'static str {
    if is_healthy {
        "✓ Healthy"
    } else {
        "✗ Disease Detected"
    }
}
