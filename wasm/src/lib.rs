use chordwheel::{RenderOptions, render_with_options};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChordRenderOptions {
    theme: Option<String>,
    font_family: Option<String>,
    font_size: Option<f32>,
    width: Option<f32>,
    height: Option<f32>,
    gap_fraction: Option<f64>,
    neck_radius: Option<f64>,
    show_labels: Option<bool>,
}

fn build_render_options(options: ChordRenderOptions) -> RenderOptions {
    let mut render_options = if options.theme.as_deref() == Some("modern") {
        RenderOptions::modern()
    } else {
        RenderOptions::plotly()
    };

    if let Some(font_family) = options.font_family {
        render_options.theme.font_family = font_family;
    }
    if let Some(font_size) = options.font_size {
        render_options.theme.font_size = font_size;
    }
    if let Some(width) = options.width {
        render_options.render.width = width;
    }
    if let Some(height) = options.height {
        render_options.render.height = height;
    }
    if let Some(gap) = options.gap_fraction {
        render_options.layout.chord.gap_fraction = gap;
    }
    if let Some(neck) = options.neck_radius {
        render_options.layout.chord.neck_radius = neck;
    }
    if let Some(show) = options.show_labels {
        render_options.render.show_labels = show;
    }

    render_options
}

#[wasm_bindgen]
pub fn render_chord_svg(document: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<ChordRenderOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        ChordRenderOptions::default()
    };

    let render_options = build_render_options(options);
    render_with_options(document, render_options)
        .map_err(|error| JsValue::from_str(&format!("{error:#}")))
}
