//! SVG generation from a drawing document

use crate::document::DrawingDocument;
use crate::entities::{Entity, EntityKind};
use crate::types::{BoundsTracker, Transform2, Vector2};
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use tracing::debug;

/// Layer metadata returned alongside the rendered SVG
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerInfo {
    /// Layer name
    pub name: String,
    /// Resolved hex color ("#RRGGBB")
    pub color: String,
    /// Layer visibility
    pub visible: bool,
    /// Line type name
    pub line_type: String,
}

/// A rendered drawing: the SVG markup plus its layer list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedDrawing {
    /// Complete SVG document
    pub svg: String,
    /// Layers in table order; always contains at least layer "0"
    pub layers: Vec<LayerInfo>,
}

/// Renders a [`DrawingDocument`] to SVG
///
/// Drawing coordinates are Y-up; SVG is Y-down. The renderer emits all
/// geometry in raw drawing coordinates inside a global
/// `scale(1 -1)` group and negates the viewBox Y range to match.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgRenderer;

impl SvgRenderer {
    /// Create a renderer
    pub fn new() -> Self {
        SvgRenderer
    }

    /// Render the document
    pub fn render(&self, document: &DrawingDocument) -> RenderedDrawing {
        let mut pass = RenderPass {
            document,
            body: String::new(),
            bounds: BoundsTracker::new(),
        };

        let mut visited: Vec<String> = Vec::new();
        pass.render_entities(&document.entities, Transform2::IDENTITY, &mut visited);

        let bounds = pass.bounds.finish();
        let width = bounds.width();
        let height = bounds.height();
        // 5% padding per side; degenerate extents get a fixed margin so
        // the viewBox never collapses.
        let pad_x = if width > 0.0 { width * 0.05 } else { 1.0 };
        let pad_y = if height > 0.0 { height * 0.05 } else { 1.0 };

        let vb_x = bounds.min.x - pad_x;
        let vb_y = -bounds.max.y - pad_y;
        let vb_w = width + 2.0 * pad_x;
        let vb_h = height + 2.0 * pad_y;
        let stroke_width = vb_w.max(vb_h) / 1000.0;

        let svg = format!(
            concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}" width="{}" height="{}">"#,
                r#"<g transform="scale(1 -1)" fill="none" stroke-width="{}">"#,
                "{}",
                "</g></svg>"
            ),
            vb_x, vb_y, vb_w, vb_h, vb_w, vb_h, stroke_width, pass.body
        );

        debug!(
            entities = document.entities.len(),
            layers = document.layers.len(),
            "rendered drawing"
        );

        RenderedDrawing {
            svg,
            layers: layer_list(document),
        }
    }
}

/// Build the layer list in table order
fn layer_list(document: &DrawingDocument) -> Vec<LayerInfo> {
    document
        .layers
        .iter()
        .map(|layer| LayerInfo {
            name: layer.name.clone(),
            color: layer.hex_color().to_string(),
            visible: layer.visible,
            line_type: layer.line_type.clone(),
        })
        .collect()
}

struct RenderPass<'a> {
    document: &'a DrawingDocument,
    body: String,
    bounds: BoundsTracker,
}

impl RenderPass<'_> {
    fn render_entities(
        &mut self,
        entities: &[Entity],
        transform: Transform2,
        visited: &mut Vec<String>,
    ) {
        for entity in entities {
            self.render_entity(entity, transform, visited);
        }
    }

    fn render_entity(&mut self, entity: &Entity, transform: Transform2, visited: &mut Vec<String>) {
        let stroke = entity
            .color
            .resolve(self.document.layer_color(&entity.layer));
        let layer = escape_xml(&entity.layer);

        match &entity.kind {
            EntityKind::Line(line) => {
                self.track(transform, [line.start, line.end]);
                let _ = write!(
                    self.body,
                    r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" data-layer="{}"/>"#,
                    line.start.x, line.start.y, line.end.x, line.end.y, stroke, layer
                );
            }
            EntityKind::Circle(circle) => {
                self.track_radius(transform, circle.center, circle.radius);
                let _ = write!(
                    self.body,
                    r#"<circle cx="{}" cy="{}" r="{}" stroke="{}" data-layer="{}"/>"#,
                    circle.center.x, circle.center.y, circle.radius, stroke, layer
                );
            }
            EntityKind::Arc(arc) => {
                self.track_radius(transform, arc.center, arc.radius);
                let start = arc.start_point();
                let end = arc.end_point();
                let large_arc = if arc.is_large_arc() { 1 } else { 0 };
                // Sweep flag 0: counter-clockwise in drawing space,
                // which the global Y flip shows correctly.
                let _ = write!(
                    self.body,
                    r#"<path d="M {} {} A {} {} 0 {} 0 {} {}" stroke="{}" data-layer="{}"/>"#,
                    start.x, start.y, arc.radius, arc.radius, large_arc, end.x, end.y, stroke, layer
                );
            }
            EntityKind::Ellipse(ellipse) => {
                let r = ellipse.major_length();
                self.track_radius(transform, ellipse.center, r);
                let _ = write!(
                    self.body,
                    r#"<ellipse cx="{}" cy="{}" rx="{}" ry="{}" transform="rotate({} {} {})" stroke="{}" data-layer="{}"/>"#,
                    ellipse.center.x,
                    ellipse.center.y,
                    r,
                    ellipse.minor_length(),
                    ellipse.rotation_degrees(),
                    ellipse.center.x,
                    ellipse.center.y,
                    stroke,
                    layer
                );
            }
            EntityKind::Polyline(polyline) => {
                self.track(transform, polyline.vertices.iter().copied());
                let tag = if polyline.is_closed() {
                    "polygon"
                } else {
                    "polyline"
                };
                let _ = write!(
                    self.body,
                    r#"<{} points="{}" stroke="{}" data-layer="{}"/>"#,
                    tag,
                    points_attr(&polyline.vertices),
                    stroke,
                    layer
                );
            }
            EntityKind::Spline(spline) => {
                // Control-point polyline approximation.
                self.track(transform, spline.control_points.iter().copied());
                let tag = if spline.is_closed() {
                    "polygon"
                } else {
                    "polyline"
                };
                let _ = write!(
                    self.body,
                    r#"<{} points="{}" stroke="{}" data-layer="{}"/>"#,
                    tag,
                    points_attr(&spline.control_points),
                    stroke,
                    layer
                );
            }
            EntityKind::Text(text) => {
                self.track(transform, [text.position]);
                self.write_text(
                    text.position,
                    text.rotation,
                    text.height,
                    &text.value,
                    stroke,
                    &layer,
                );
            }
            EntityKind::Attribute(attrib) => {
                self.track(transform, [attrib.position]);
                self.write_text(
                    attrib.position,
                    attrib.rotation,
                    attrib.height,
                    &attrib.value,
                    stroke,
                    &layer,
                );
            }
            EntityKind::Point(point) => {
                self.track(transform, [point.location]);
                let _ = write!(
                    self.body,
                    r#"<circle cx="{}" cy="{}" r="0.5" fill="{}" data-layer="{}"/>"#,
                    point.location.x, point.location.y, stroke, layer
                );
            }
            EntityKind::SolidFace(face) => {
                if face.is_degenerate() {
                    return;
                }
                self.track(transform, face.corners.iter().copied());
                let _ = write!(
                    self.body,
                    r#"<polygon points="{}" fill="{}" fill-opacity="0.4" stroke="{}" data-layer="{}"/>"#,
                    points_attr(&face.corners),
                    stroke,
                    stroke,
                    layer
                );
            }
            EntityKind::Leader(leader) => {
                self.track(transform, leader.vertices.iter().copied());
                let _ = write!(
                    self.body,
                    r#"<polyline points="{}" stroke="{}" data-layer="{}"/>"#,
                    points_attr(&leader.vertices),
                    stroke,
                    layer
                );
            }
            EntityKind::Insert(insert) => {
                self.render_insert(insert, &layer, transform, visited);
            }
        }
    }

    fn render_insert(
        &mut self,
        insert: &crate::entities::Insert,
        layer: &str,
        transform: Transform2,
        visited: &mut Vec<String>,
    ) {
        let block = match self.document.blocks.get(&insert.block_name) {
            Some(b) => b.clone(),
            None => {
                debug!(block = %insert.block_name, "insert references unknown block");
                return;
            }
        };
        // A block whose expansion reaches itself again would recurse
        // forever; that branch renders as empty.
        let key = insert.block_name.to_uppercase();
        if visited.contains(&key) {
            debug!(block = %insert.block_name, "cyclic block reference ignored");
            return;
        }

        let mut local = insert.transform();
        let mut group = format!(
            "translate({} {}) rotate({}) scale({} {})",
            insert.position.x, insert.position.y, insert.rotation, insert.scale_x, insert.scale_y
        );
        if block.base_point != Vector2::ZERO {
            // Block geometry is relative to its base point.
            let _ = write!(
                group,
                " translate({} {})",
                -block.base_point.x, -block.base_point.y
            );
            local = local.compose(&Transform2::translation(-block.base_point));
        }
        let composed = transform.compose(&local);

        let _ = write!(
            self.body,
            r#"<g transform="{}" data-layer="{}">"#,
            group, layer
        );

        visited.push(key);
        self.render_entities(&block.entities, composed, visited);
        visited.pop();

        let _ = write!(self.body, "</g>");
    }

    fn write_text(
        &mut self,
        position: Vector2,
        rotation: f64,
        height: f64,
        value: &str,
        stroke: &str,
        layer: &str,
    ) {
        // Undo the global Y flip locally so glyphs stay upright; the
        // rotation is negated for the same reason.
        let _ = write!(
            self.body,
            r#"<text transform="translate({} {}) scale(1 -1) rotate({})" font-size="{}" fill="{}" data-layer="{}">{}</text>"#,
            position.x,
            position.y,
            -rotation,
            height,
            stroke,
            layer,
            escape_xml(value)
        );
    }

    /// Feed transformed coordinates into the bounds tracker
    fn track<I: IntoIterator<Item = Vector2>>(&mut self, transform: Transform2, points: I) {
        for p in points {
            self.bounds.record(transform.apply(p));
        }
    }

    /// Track the box around a center and radius. All four corners go
    /// through the transform: the circle is inscribed in the square, so
    /// the box of the four transformed corners still contains it under
    /// rotation.
    fn track_radius(&mut self, transform: Transform2, center: Vector2, radius: f64) {
        let r = radius.abs();
        self.track(
            transform,
            [
                Vector2::new(center.x - r, center.y - r),
                Vector2::new(center.x + r, center.y - r),
                Vector2::new(center.x + r, center.y + r),
                Vector2::new(center.x - r, center.y + r),
            ],
        );
    }
}

/// Format a vertex list as an SVG points attribute
fn points_attr(points: &[Vector2]) -> String {
    let mut out = String::new();
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{},{}", p.x, p.y);
    }
    out
}

/// Escape text for XML content and attribute values
fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Arc, Circle, Line, Text};
    use crate::tables::Layer;
    use crate::types::Color;

    fn doc_with(entities: Vec<Entity>) -> DrawingDocument {
        let mut doc = DrawingDocument::new();
        for e in entities {
            doc.add_entity(e);
        }
        doc
    }

    #[test]
    fn test_empty_document_uses_fallback_bounds() {
        let rendered = SvgRenderer::new().render(&DrawingDocument::new());
        assert!(rendered.svg.starts_with("<svg"));
        // 5% of the 1000-unit fallback box per side.
        assert!(rendered.svg.contains(r#"viewBox="-50 -1050 1100 1100""#));
        assert_eq!(rendered.layers.len(), 1);
        assert_eq!(rendered.layers[0].name, "0");
    }

    #[test]
    fn test_line_fragment() {
        let doc = doc_with(vec![Entity::new(EntityKind::Line(Line::from_coords(
            0.0, 0.0, 10.0, 10.0,
        )))]);
        let rendered = SvgRenderer::new().render(&doc);
        assert!(rendered
            .svg
            .contains(r#"<line x1="0" y1="0" x2="10" y2="10""#));
        assert!(rendered.svg.contains(r#"data-layer="0""#));
    }

    #[test]
    fn test_entity_color_beats_layer_color() {
        let mut doc = DrawingDocument::new();
        doc.layers.insert(Layer::with_color("Walls", Color::BLUE));
        let mut e = Entity::on_layer(
            EntityKind::Circle(Circle::from_coords(0.0, 0.0, 1.0)),
            "Walls",
        );
        e.color = Color::RED;
        doc.add_entity(e);

        let rendered = SvgRenderer::new().render(&doc);
        assert!(rendered.svg.contains(r##"stroke="#FF0000""##));
    }

    #[test]
    fn test_bylayer_color_resolves_through_layer() {
        let mut doc = DrawingDocument::new();
        doc.layers.insert(Layer::with_color("Walls", Color::BLUE));
        doc.add_entity(Entity::on_layer(
            EntityKind::Circle(Circle::from_coords(0.0, 0.0, 1.0)),
            "Walls",
        ));

        let rendered = SvgRenderer::new().render(&doc);
        assert!(rendered.svg.contains(r##"stroke="#0000FF""##));
    }

    #[test]
    fn test_arc_large_flag() {
        use std::f64::consts::PI;
        let half = doc_with(vec![Entity::new(EntityKind::Arc(Arc::from_coords(
            0.0, 0.0, 5.0, 0.0, PI,
        )))]);
        let svg = SvgRenderer::new().render(&half).svg;
        assert!(svg.contains("A 5 5 0 0 0"));

        let three_q = doc_with(vec![Entity::new(EntityKind::Arc(Arc::from_coords(
            0.0,
            0.0,
            5.0,
            0.0,
            1.5 * PI,
        )))]);
        let svg = SvgRenderer::new().render(&three_q).svg;
        assert!(svg.contains("A 5 5 0 1 0"));
    }

    #[test]
    fn test_text_upright_under_flip() {
        let mut text = Text::new(Vector2::new(3.0, 4.0), "A<B");
        text.rotation = 30.0;
        let doc = doc_with(vec![Entity::new(EntityKind::Text(text))]);
        let svg = SvgRenderer::new().render(&doc).svg;
        assert!(svg.contains(r#"translate(3 4) scale(1 -1) rotate(-30)"#));
        assert!(svg.contains("A&lt;B"));
    }

    #[test]
    fn test_global_flip_group() {
        let svg = SvgRenderer::new().render(&DrawingDocument::new()).svg;
        assert!(svg.contains(r#"<g transform="scale(1 -1)""#));
    }
}
