use crate::types::RequestState;

/// Display palette shared by the health badge and the confidence bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Green,
    Amber,
    Red,
}

impl Color {
    pub fn hex(self) -> &'static str {
        match self {
            Color::Green => "#10b981",
            Color::Amber => "#f59e0b",
            Color::Red => "#ef4444",
        }
    }

    /// 24-bit ANSI foreground escape for terminals
    pub fn ansi(self) -> &'static str {
        match self {
            Color::Green => "\x1b[38;2;16;185;129m",
            Color::Amber => "\x1b[38;2;245;158;11m",
            Color::Red => "\x1b[38;2;239;68;68m",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PreviewStatus {
    Empty,
    Decoding,
    Ready { mime: String, encoded_len: usize },
}

/// Everything the UI needs to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct SessionView {
    pub request: RequestState,
    pub file_name: Option<String>,
    pub preview: PreviewStatus,
    pub predict_enabled: bool,
    pub predict_label: &'static str,
    pub error: Option<String>,
    pub result: Option<ResultView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub heading: String,
    pub health_badge: &'static str,
    pub health_color: Color,
    pub disease: String,
    pub percentage: String,
    /// Fill ratio of the confidence bar, clamped to 0.0..=1.0
    pub bar_fill: f64,
    pub confidence_color: Color,
    pub reliability_warning: Option<&'static str>,
    pub full_class: String,
    pub alternatives: Vec<AlternativeView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlternativeView {
    pub class_name: String,
    pub percentage: String,
}
