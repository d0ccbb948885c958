use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `angle` radians on the circle of the given radius.
    pub fn polar(radius: f64, angle: f64) -> Self {
        Self {
            x: radius * angle.cos(),
            y: radius * angle.sin(),
        }
    }
}

/// Angular extent of one entity's arc on the rim.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IdeogramEnd {
    pub start: f64,
    pub end: f64,
}

impl IdeogramEnd {
    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    pub fn midpoint(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

/// A partner-specific sub-interval of an ideogram. `start` may exceed `end`
/// once a ribbon end has been reversed for path construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RibbonEnd {
    pub start: f64,
    pub end: f64,
}

impl RibbonEnd {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn reversed(self) -> Self {
        Self {
            start: self.end,
            end: self.start,
        }
    }

    pub fn midpoint(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        (self.end - self.start).abs()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapeKind {
    Ideogram,
    Ribbon,
    SelfRelation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapeLayer {
    Below,
}

impl ShapeLayer {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeLayer::Below => "below",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    pub kind: ShapeKind,
    /// SVG path data in unit-circle coordinates, y axis pointing up.
    pub path: String,
    pub stroke_color: String,
    pub fill_color: String,
    pub stroke_width: f32,
    pub layer: ShapeLayer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AnnotationKind {
    Ideogram,
    RibbonEnd,
    SelfRelation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    pub kind: AnnotationKind,
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeogramLayout {
    pub index: usize,
    pub label: String,
    pub color: String,
    pub total: f64,
    pub end: IdeogramEnd,
}

/// One drawn connection, with the ribbon ends it was built from (before the
/// second end is reversed).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RibbonLayout {
    pub source: usize,
    pub target: usize,
    pub source_end: RibbonEnd,
    pub target_end: RibbonEnd,
    pub source_weight: f64,
    pub target_weight: f64,
}

impl RibbonLayout {
    pub fn is_self_relation(&self) -> bool {
        self.source == self.target
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordLayout {
    pub ideograms: Vec<IdeogramLayout>,
    pub ribbons: Vec<RibbonLayout>,
    pub shapes: Vec<Shape>,
    pub annotations: Vec<Annotation>,
}

impl ChordLayout {
    pub fn shapes_of(&self, kind: ShapeKind) -> impl Iterator<Item = &Shape> {
        self.shapes.iter().filter(move |shape| shape.kind == kind)
    }

    pub fn annotations_of(&self, kind: AnnotationKind) -> impl Iterator<Item = &Annotation> {
        self.annotations
            .iter()
            .filter(move |annotation| annotation.kind == kind)
    }
}
