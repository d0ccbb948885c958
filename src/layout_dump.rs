use crate::ir::ChordData;
use crate::layout::{Annotation, ChordLayout, RibbonEnd, Shape};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDump {
    pub entities: Vec<EntityDump>,
    pub ribbons: Vec<RibbonDump>,
    pub shapes: Vec<Shape>,
    pub annotations: Vec<Annotation>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityDump {
    pub label: String,
    pub color: String,
    pub total: f64,
    pub start: f64,
    pub end: f64,
    pub weights: Vec<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RibbonDump {
    pub source: String,
    pub target: String,
    pub source_end: [f64; 2],
    pub target_end: [f64; 2],
    pub source_weight: f64,
    pub target_weight: f64,
}

fn end_pair(end: RibbonEnd) -> [f64; 2] {
    [end.start, end.end]
}

impl LayoutDump {
    pub fn from_layout(layout: &ChordLayout, data: &ChordData) -> Self {
        let entities = layout
            .ideograms
            .iter()
            .map(|ideogram| EntityDump {
                label: ideogram.label.clone(),
                color: ideogram.color.clone(),
                total: ideogram.total,
                start: ideogram.end.start,
                end: ideogram.end.end,
                weights: data.matrix.row(ideogram.index).to_vec(),
            })
            .collect();

        let ribbons = layout
            .ribbons
            .iter()
            .map(|ribbon| RibbonDump {
                source: data.labels[ribbon.source].clone(),
                target: data.labels[ribbon.target].clone(),
                source_end: end_pair(ribbon.source_end),
                target_end: end_pair(ribbon.target_end),
                source_weight: ribbon.source_weight,
                target_weight: ribbon.target_weight,
            })
            .collect();

        LayoutDump {
            entities,
            ribbons,
            shapes: layout.shapes.clone(),
            annotations: layout.annotations.clone(),
        }
    }
}

pub fn write_layout_dump<W: Write>(
    writer: W,
    layout: &ChordLayout,
    data: &ChordData,
) -> anyhow::Result<()> {
    let dump = LayoutDump::from_layout(layout, data);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
