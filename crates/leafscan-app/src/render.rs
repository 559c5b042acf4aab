use leafscan_types::{
    ClassLabel, Color, HealthReport, Plant, PreviewStatus, RequestState, ResultView, SessionView,
};

const BAR_WIDTH: usize = 24;
const RESET: &str = "\x1b[0m";

pub struct Painter {
    color: bool,
}

impl Painter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            format!("{}{}{}", color.ansi(), text, RESET)
        } else {
            text.to_string()
        }
    }

    pub fn banner(&self) -> String {
        let supported: Vec<String> = Plant::SUPPORTED
            .iter()
            .map(|p| format!("{} {}", p.icon().unwrap_or_default(), p.name()))
            .collect();

        block(vec![
            "🌿 Plant Disease Predictor".to_string(),
            "Upload leaf images to detect diseases".to_string(),
            format!("Supports: {}", supported.join(" • ")),
        ])
    }

    pub fn session(&self, view: &SessionView) -> String {
        let mut lines = match (&view.file_name, &view.preview) {
            (None, _) => vec![
                "No image selected. Pepper, Potato, or Tomato leaf images".to_string(),
                "PNG, JPG, JPEG (Max 10MB)".to_string(),
            ],
            (Some(name), PreviewStatus::Ready { mime, encoded_len }) => {
                vec![format!("Image: {name} [{mime}, preview {encoded_len} chars]")]
            }
            (Some(name), _) => vec![format!("Image: {name} [preparing preview...]")],
        };

        let button = if view.predict_enabled {
            format!("[{}]", view.predict_label)
        } else {
            format!("({})", view.predict_label)
        };
        lines.push(format!("{button}  [🔄 Reset]"));

        if let Some(error) = &view.error {
            lines.push(self.paint(&format!("⚠️ {error}"), Color::Red));
        }

        let mut out = block(lines);
        if let Some(result) = &view.result {
            out.push_str(&self.result(result));
        } else if view.request == RequestState::Loading {
            out.push_str("Analyzing...\n");
        }
        out
    }

    pub fn result(&self, result: &ResultView) -> String {
        let filled = ((result.bar_fill * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
        let bar = format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled));

        let mut lines = vec![
            "── Prediction Results ──".to_string(),
            format!(
                "{}  {}",
                result.heading,
                self.paint(result.health_badge, result.health_color)
            ),
            format!("Disease: {}", result.disease),
            format!(
                "Confidence {} {}",
                self.paint(&bar, result.confidence_color),
                result.percentage
            ),
        ];

        if let Some(warning) = result.reliability_warning {
            lines.push(self.paint(&format!("⚠️ {warning}"), Color::Amber));
        }

        lines.push(format!("Full Classification: {}", result.full_class));

        if !result.alternatives.is_empty() {
            lines.push("Top predictions:".to_string());
            lines.extend(
                result
                    .alternatives
                    .iter()
                    .map(|alt| format!("  {:<45} {}", alt.class_name, alt.percentage)),
            );
        }

        block(lines)
    }

    pub fn health(&self, report: &HealthReport) -> String {
        let model = if report.model_loaded {
            self.paint("loaded", Color::Green)
        } else {
            self.paint("not loaded", Color::Red)
        };
        let shape = report.input_shape.as_deref().unwrap_or("?");
        format!(
            "Server: {} | Model: {} ({} classes, input {})\n",
            report.server, model, report.classes, shape
        )
    }

    /// Classes grouped by plant, in the order the service lists them
    pub fn classes(&self, labels: &[ClassLabel]) -> String {
        let mut groups: Vec<(Plant, Vec<&ClassLabel>)> = Vec::new();
        for label in labels {
            let plant = label.category();
            match groups.iter_mut().find(|(p, _)| *p == plant) {
                Some((_, members)) => members.push(label),
                None => groups.push((plant, vec![label])),
            }
        }

        let mut lines = vec![format!("{} classes", labels.len())];
        for (plant, members) in groups {
            lines.push(match plant.icon() {
                Some(icon) => format!("{} {}", icon, plant.name()),
                None => plant.name().to_string(),
            });
            for label in members {
                let color = if label.is_healthy {
                    Color::Green
                } else {
                    Color::Red
                };
                lines.push(format!("  {}", self.paint(&label.disease, color)));
            }
        }
        block(lines)
    }
}

/// One line per entry, each newline-terminated
fn block(lines: Vec<String>) -> String {
    lines.into_iter().map(|line| line + "\n").collect()
}
