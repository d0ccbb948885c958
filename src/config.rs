use crate::theme::Theme;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChordConfig {
    /// Gap between neighbouring ideograms, as a fraction of the full circle.
    pub gap_fraction: f64,
    pub neck_radius: f64,
    pub self_neck_radius: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub ideogram_resolution: f64,
    pub ribbon_resolution: f64,
    pub annotation_radius: f64,
    pub ideogram_stroke_width: f32,
    pub ribbon_stroke_width: f32,
}

impl Default for ChordConfig {
    fn default() -> Self {
        Self {
            gap_fraction: 0.005,
            neck_radius: 0.2,
            self_neck_radius: 0.9,
            inner_radius: 1.0,
            outer_radius: 1.1,
            ideogram_resolution: 50.0,
            ribbon_resolution: 40.0,
            annotation_radius: 0.9,
            ideogram_stroke_width: 0.45,
            ribbon_stroke_width: 0.5,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub chord: ChordConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
    pub background: String,
    pub show_labels: bool,
    /// Distance of entity labels from the center, in unit-circle radii.
    pub label_radius: f32,
    pub margin: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 600.0,
            background: "#FFFFFF".to_string(),
            show_labels: true,
            label_radius: 1.16,
            margin: 25.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        let theme = Theme::plotly();
        let render = RenderConfig {
            background: theme.background.clone(),
            ..Default::default()
        };
        Self {
            theme,
            layout: LayoutConfig::default(),
            render,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<NumberOrString>,
    text_color: Option<String>,
    background: Option<String>,
    ideogram_stroke: Option<String>,
    ribbon_stroke: Option<String>,
    palette: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f32),
    String(String),
}

impl NumberOrString {
    fn as_f32(&self) -> Option<f32> {
        match self {
            NumberOrString::Number(val) => Some(*val),
            NumberOrString::String(val) => val.trim().trim_end_matches("px").parse::<f32>().ok(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChordConfigFile {
    gap_fraction: Option<f64>,
    neck_radius: Option<f64>,
    self_neck_radius: Option<f64>,
    inner_radius: Option<f64>,
    outer_radius: Option<f64>,
    ideogram_resolution: Option<f64>,
    ribbon_resolution: Option<f64>,
    annotation_radius: Option<f64>,
    ideogram_stroke_width: Option<f32>,
    ribbon_stroke_width: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenderConfigFile {
    width: Option<f32>,
    height: Option<f32>,
    show_labels: Option<bool>,
    label_radius: Option<f32>,
    margin: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    chord: Option<ChordConfigFile>,
    render: Option<RenderConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let parsed: ConfigFile = serde_json::from_str(&contents)
        .with_context(|| format!("invalid config file {}", path.display()))?;
    apply_config_file(config, parsed)
}

/// Overlays an inline `config` object (from an input document) on `config`.
pub fn merge_init_config(config: Config, init: serde_json::Value) -> anyhow::Result<Config> {
    let parsed: ConfigFile =
        serde_json::from_value(init).context("invalid inline config object")?;
    apply_config_file(config, parsed)
}

fn apply_config_file(mut config: Config, parsed: ConfigFile) -> anyhow::Result<Config> {
    if let Some(theme_name) = parsed.theme.as_deref() {
        config.theme = Theme::by_name(theme_name)
            .ok_or_else(|| anyhow::anyhow!("unknown theme '{theme_name}'"))?;
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.font_size.as_ref().and_then(NumberOrString::as_f32) {
            config.theme.font_size = v;
        }
        if let Some(v) = vars.text_color {
            config.theme.text_color = v;
        }
        if let Some(v) = vars.background {
            config.theme.background = v;
        }
        if let Some(v) = vars.ideogram_stroke {
            config.theme.ideogram_stroke = v;
        }
        if let Some(v) = vars.ribbon_stroke {
            config.theme.ribbon_stroke = v;
        }
        if let Some(v) = vars.palette {
            config.theme.palette = v;
        }
    }

    if let Some(chord) = parsed.chord {
        let target = &mut config.layout.chord;
        if let Some(v) = chord.gap_fraction {
            target.gap_fraction = v;
        }
        if let Some(v) = chord.neck_radius {
            target.neck_radius = v;
        }
        if let Some(v) = chord.self_neck_radius {
            target.self_neck_radius = v;
        }
        if let Some(v) = chord.inner_radius {
            target.inner_radius = v;
        }
        if let Some(v) = chord.outer_radius {
            target.outer_radius = v;
        }
        if let Some(v) = chord.ideogram_resolution {
            target.ideogram_resolution = v;
        }
        if let Some(v) = chord.ribbon_resolution {
            target.ribbon_resolution = v;
        }
        if let Some(v) = chord.annotation_radius {
            target.annotation_radius = v;
        }
        if let Some(v) = chord.ideogram_stroke_width {
            target.ideogram_stroke_width = v;
        }
        if let Some(v) = chord.ribbon_stroke_width {
            target.ribbon_stroke_width = v;
        }
    }

    if let Some(render) = parsed.render {
        if let Some(v) = render.width {
            config.render.width = v;
        }
        if let Some(v) = render.height {
            config.render.height = v;
        }
        if let Some(v) = render.show_labels {
            config.render.show_labels = v;
        }
        if let Some(v) = render.label_radius {
            config.render.label_radius = v;
        }
        if let Some(v) = render.margin {
            config.render.margin = v;
        }
    }

    config.render.background = config.theme.background.clone();

    Ok(config)
}
