/// Plants the prediction service is trained on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plant {
    Pepper,
    Potato,
    Tomato,
    Other(String),
}

impl Plant {
    pub const SUPPORTED: [Plant; 3] = [Plant::Pepper, Plant::Potato, Plant::Tomato];

    /// Map a service plant label (`"Tomato"`, `"Pepper  bell"`) onto a category
    pub fn from_label(label: &str) -> Self {
        let lower = label.trim().to_lowercase();
        if lower.starts_with("pepper") {
            Plant::Pepper
        } else if lower.starts_with("potato") {
            Plant::Potato
        } else if lower.starts_with("tomato") {
            Plant::Tomato
        } else {
            Plant::Other(label.trim().to_string())
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Plant::Pepper => "Pepper",
            Plant::Potato => "Potato",
            Plant::Tomato => "Tomato",
            Plant::Other(name) => name,
        }
    }

    pub fn icon(&self) -> Option<&'static str> {
        match self {
            Plant::Pepper => Some("🌶️"),
            Plant::Potato => Some("🥔"),
            Plant::Tomato => Some("🍅"),
            Plant::Other(_) => None,
        }
    }
}

/// A class identifier such as `Potato___Early_blight` split into its parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassLabel {
    pub class_name: String,
    pub plant: String,
    pub disease: String,
    pub is_healthy: bool,
}

impl ClassLabel {
    /// Separators are tried in order: `___`, the first `__`, the first `_`.
    /// Remaining underscores in either half become spaces.
    pub fn parse(class_name: &str) -> Self {
        let parts: Vec<&str> = if class_name.contains("___") {
            class_name.split("___").collect()
        } else if class_name.contains("__") {
            class_name.splitn(2, "__").collect()
        } else {
            class_name.splitn(2, '_').collect()
        };

        let plant = parts
            .first()
            .map(|p| p.replace('_', " "))
            .unwrap_or_else(|| "Unknown".to_string());
        let disease = parts
            .get(1)
            .map(|d| d.replace('_', " "))
            .unwrap_or_else(|| "Unknown".to_string());
        let is_healthy = disease.to_lowercase().contains("healthy");

        Self {
            class_name: class_name.to_string(),
            plant,
            disease,
            is_healthy,
        }
    }

    pub fn category(&self) -> Plant {
        Plant::from_label(&self.plant)
    }
}
