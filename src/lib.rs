#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod parser;
pub mod render;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{ChordConfig, Config, LayoutConfig, RenderConfig, load_config};
pub use ir::{ChordData, WeightMatrix};
pub use layout::{ChordError, ChordLayout, build, compute_chord_layout};
pub use parser::parse_input;
pub use render::render_svg;
pub use theme::Theme;

/// Everything needed to go from a chord document to SVG in one call.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

impl RenderOptions {
    pub fn plotly() -> Self {
        let config = Config::default();
        Self {
            theme: config.theme,
            layout: config.layout,
            render: config.render,
        }
    }

    pub fn modern() -> Self {
        let mut options = Self::plotly();
        options.theme = Theme::modern();
        options.render.background = options.theme.background.clone();
        options
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::plotly()
    }
}

/// Parses `input`, applies its inline config, lays it out and renders SVG.
pub fn render_with_options(input: &str, options: RenderOptions) -> anyhow::Result<String> {
    let parsed = parse_input(input)?;
    let mut config = Config {
        theme: options.theme,
        layout: options.layout,
        render: options.render,
    };
    if let Some(init) = parsed.init_config {
        config = config::merge_init_config(config, init)?;
    }
    let colors = parsed
        .colors
        .unwrap_or_else(|| config.theme.entity_colors(parsed.data.len()));
    let layout = compute_chord_layout(&parsed.data, &colors, &config.theme, &config.layout)?;
    Ok(render::render_svg_with_title(
        &layout,
        &config.theme,
        &config.render,
        parsed.title.as_deref(),
    ))
}
