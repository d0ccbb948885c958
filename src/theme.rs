use serde::{Deserialize, Serialize};

const PLOTLY_PALETTE: [&str; 5] = ["#64B5F6", "#E57373", "#AED581", "#FFB74D", "#90A4AE"];

const MODERN_PALETTE: [&str; 10] = [
    "#4e79a7", "#f28e2c", "#e15759", "#76b7b2", "#59a14f", "#edc949", "#af7aa1", "#ff9da7",
    "#9c755f", "#bab0ab",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub text_color: String,
    pub background: String,
    pub ideogram_stroke: String,
    pub ribbon_stroke: String,
    /// Entity colors, cycled when an input supplies none.
    pub palette: Vec<String>,
}

impl Theme {
    pub fn plotly() -> Self {
        Self {
            font_family: "\"Open Sans\", verdana, arial, sans-serif".to_string(),
            font_size: 12.0,
            text_color: "#444444".to_string(),
            background: "#FFFFFF".to_string(),
            ideogram_stroke: "rgb(150,150,150)".to_string(),
            ribbon_stroke: "rgb(175,175,175)".to_string(),
            palette: PLOTLY_PALETTE.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 13.0,
            text_color: "#1C2430".to_string(),
            background: "#FFFFFF".to_string(),
            ideogram_stroke: "#7A8AA6".to_string(),
            ribbon_stroke: "#C7D2E5".to_string(),
            palette: MODERN_PALETTE.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "modern" => Some(Self::modern()),
            "plotly" | "default" | "base" => Some(Self::plotly()),
            _ => None,
        }
    }

    /// One color per entity, cycling the palette.
    pub fn entity_colors(&self, count: usize) -> Vec<String> {
        if self.palette.is_empty() {
            return vec![self.ideogram_stroke.clone(); count];
        }
        self.palette.iter().cycle().take(count).cloned().collect()
    }
}
