use leafscan_config::ui::UiConfig;
use leafscan_types::{AlternativeView, PredictionResult, PreviewStatus, ResultView, SessionView};

use crate::display::{RELIABILITY_WARNING, confidence_color, health_badge, health_color};
use crate::session::UploadSession;

pub const PREDICT_LABEL: &str = "🔍 Predict Disease";
pub const LOADING_LABEL: &str = "Analyzing...";

/// Pure projection of the session onto what the UI draws
pub fn project(session: &UploadSession, ui: &UiConfig) -> SessionView {
    let preview = match (session.selected(), session.preview()) {
        (_, Some(uri)) => PreviewStatus::Ready {
            mime: uri.mime().unwrap_or("application/octet-stream").to_string(),
            encoded_len: uri.payload_len(),
        },
        (Some(_), None) => PreviewStatus::Decoding,
        (None, None) => PreviewStatus::Empty,
    };

    SessionView {
        request: session.request(),
        file_name: session.selected().map(|f| f.name.clone()),
        preview,
        predict_enabled: session.can_predict(),
        predict_label: if session.is_loading() {
            LOADING_LABEL
        } else {
            PREDICT_LABEL
        },
        error: session.error_message(),
        result: session
            .result()
            .map(|r| project_result(r, ui.top_predictions)),
    }
}

pub fn project_result(result: &PredictionResult, top_predictions: usize) -> ResultView {
    let plant = result.category();
    let heading = match plant.icon() {
        Some(icon) => format!("{} {}", icon, result.plant),
        None => result.plant.clone(),
    };

    let alternatives = result
        .top_predictions
        .iter()
        .take(top_predictions)
        .map(|p| AlternativeView {
            class_name: p.class_name.clone(),
            percentage: p.percentage.clone(),
        })
        .collect();

    ResultView {
        heading,
        health_badge: health_badge(result.is_healthy),
        health_color: health_color(result.is_healthy),
        disease: result.disease.clone(),
        percentage: result.percentage.clone(),
        bar_fill: result.confidence.clamp(0.0, 1.0),
        confidence_color: confidence_color(result.confidence),
        reliability_warning: (!result.reliable).then_some(RELIABILITY_WARNING),
        full_class: result.class_name.clone(),
        alternatives,
    }
}

#[cfg(test)]
mod tests {
    use leafscan_types::{Color, PreviewDataUri, RequestState, SelectedFile, TopPrediction};

    use super::*;

    fn result(confidence: f64, reliable: bool) -> PredictionResult {
        PredictionResult {
            plant: "Tomato".to_string(),
            disease: "Early Blight".to_string(),
            class_name: "Tomato_Early_blight".to_string(),
            confidence,
            percentage: format!("{:.0}%", confidence * 100.0),
            is_healthy: false,
            reliable,
            top_predictions: vec![
                TopPrediction {
                    class_name: "Tomato_Early_blight".to_string(),
                    confidence,
                    percentage: "92.00%".to_string(),
                },
                TopPrediction {
                    class_name: "Tomato_Late_blight".to_string(),
                    confidence: 0.05,
                    percentage: "5.00%".to_string(),
                },
            ],
            confidence_threshold: Some(0.7),
        }
    }

    #[test]
    fn test_reliable_result() {
        let view = project_result(&result(0.92, true), 5);

        assert_eq!(view.heading, "🍅 Tomato");
        assert_eq!(view.health_badge, "✗ Disease Detected");
        assert_eq!(view.health_color, Color::Red);
        assert_eq!(view.confidence_color, Color::Green);
        assert_eq!(view.percentage, "92%");
        assert_eq!(view.full_class, "Tomato_Early_blight");
        assert!(view.reliability_warning.is_none());
        assert_eq!(view.alternatives.len(), 2);
    }

    #[test]
    fn test_unreliable_banner_is_independent_of_tier() {
        let view = project_result(&result(0.85, false), 5);
        assert_eq!(view.confidence_color, Color::Green);
        assert_eq!(view.reliability_warning, Some(RELIABILITY_WARNING));
    }

    #[test]
    fn test_alternatives_are_capped() {
        assert_eq!(project_result(&result(0.9, true), 1).alternatives.len(), 1);
        assert!(project_result(&result(0.9, true), 0).alternatives.is_empty());
    }

    #[test]
    fn test_unknown_plant_has_no_icon() {
        let mut r = result(0.5, false);
        r.plant = "Corn".to_string();
        let view = project_result(&r, 5);
        assert_eq!(view.heading, "Corn");
        assert_eq!(view.confidence_color, Color::Red);
    }

    #[test]
    fn test_project_idle() {
        let view = project(&UploadSession::new(), &UiConfig::default());

        assert_eq!(view.request, RequestState::Idle);
        assert_eq!(view.preview, PreviewStatus::Empty);
        assert!(!view.predict_enabled);
        assert_eq!(view.predict_label, PREDICT_LABEL);
        assert!(view.error.is_none());
        assert!(view.result.is_none());
    }

    #[test]
    fn test_project_loading() {
        let mut session = UploadSession::new();
        let job = session
            .select_file(SelectedFile::new("leaf.jpg", "image/jpeg", vec![1, 2, 3]))
            .unwrap();

        let view = project(&session, &UiConfig::default());
        assert_eq!(view.preview, PreviewStatus::Decoding);
        assert!(view.predict_enabled);

        session.complete_preview(
            job.ticket,
            PreviewDataUri::new("data:image/jpeg;base64,AQID".to_string()),
        );
        session.begin_predict().unwrap();

        let view = project(&session, &UiConfig::default());
        assert_eq!(view.file_name.as_deref(), Some("leaf.jpg"));
        assert_eq!(
            view.preview,
            PreviewStatus::Ready {
                mime: "image/jpeg".to_string(),
                encoded_len: 4
            }
        );
        assert!(!view.predict_enabled);
        assert_eq!(view.predict_label, LOADING_LABEL);
    }
}
