//! Per-entity group-code parsing for the TABLES, BLOCKS, and ENTITIES
//! sections

use crate::document::DrawingDocument;
use crate::entities::{
    Arc, Attribute, Circle, Ellipse, Entity, EntityKind, Insert, Leader, Line, Point, Polyline,
    PolylineFlags, SolidFace, Spline, SplineFlags, Text,
};
use crate::error::{PreviewError, Result};
use crate::io::dxf::pair::{CodePair, PairReader};
use crate::notification::NotificationType;
use crate::tables::{Block, Layer};
use crate::types::{Color, Vector2};
use std::io::Read;

/// Entity kinds this extractor understands; everything else is counted
/// and skipped.
const RECOGNIZED: &[&str] = &[
    "LINE",
    "CIRCLE",
    "ARC",
    "ELLIPSE",
    "LWPOLYLINE",
    "POLYLINE",
    "SPLINE",
    "TEXT",
    "MTEXT",
    "POINT",
    "INSERT",
    "SOLID",
    "TRACE",
    "3DFACE",
    "HATCH",
    "LEADER",
    "ATTRIB",
    "DIMENSION",
];

/// Reads section bodies from a pair stream into a document
pub struct EntityReader<'a, R: Read> {
    reader: &'a mut PairReader<R>,
}

/// Layer and color fields shared by every entity
#[derive(Debug, Clone, Default)]
struct CommonFields {
    layer: Option<String>,
    color: Color,
    /// Set when a present numeric field failed to parse
    malformed: bool,
}

impl CommonFields {
    /// Consume the codes every entity shares. Returns `true` when the
    /// pair was handled.
    fn absorb(&mut self, pair: &CodePair) -> bool {
        match pair.code {
            8 => {
                self.layer = Some(pair.value.clone());
                true
            }
            62 => {
                match pair.as_i16() {
                    Some(index) => self.color = Color::from_index(index),
                    None => self.malformed = true,
                }
                true
            }
            _ => false,
        }
    }

    fn into_entity(self, kind: EntityKind) -> Entity {
        Entity {
            layer: self.layer.unwrap_or_else(|| "0".to_string()),
            color: self.color,
            kind,
        }
    }
}

impl<'a, R: Read> EntityReader<'a, R> {
    pub fn new(reader: &'a mut PairReader<R>) -> Self {
        Self { reader }
    }

    /// Read a pair, treating end-of-input as broken section framing.
    fn expect_pair(&mut self, context: &str) -> Result<CodePair> {
        self.reader.read_pair()?.ok_or_else(|| {
            PreviewError::ParseCorrupted(format!("unexpected end of input in {}", context))
        })
    }

    /// Consume pairs until the next code-0 pair, which is pushed back.
    fn skip_entity_body(&mut self) -> Result<()> {
        while let Some(pair) = self.reader.read_pair()? {
            if pair.code == 0 {
                self.reader.push_back(pair);
                break;
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // TABLES section
    // ------------------------------------------------------------------

    /// Read the TABLES section; only the LAYER table is extracted.
    pub fn read_tables(&mut self, document: &mut DrawingDocument) -> Result<()> {
        loop {
            let pair = self.expect_pair("TABLES section")?;
            if pair.code == 0 {
                match pair.value.as_str() {
                    "ENDSEC" => break,
                    "LAYER" => {
                        if let Some(layer) = self.read_layer_entry()? {
                            document.layers.insert(layer);
                        }
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }

    fn read_layer_entry(&mut self) -> Result<Option<Layer>> {
        let mut name: Option<String> = None;
        let mut color = Color::Index(crate::types::DEFAULT_ACI);
        let mut line_type = "Continuous".to_string();
        let mut visible = true;

        while let Some(pair) = self.reader.read_pair()? {
            if pair.code == 0 {
                self.reader.push_back(pair);
                break;
            }

            match pair.code {
                2 => name = Some(pair.value.clone()),
                62 => {
                    if let Some(index) = pair.as_i16() {
                        if index < 0 {
                            visible = false;
                        }
                        color = Color::from_index(index);
                    }
                }
                6 => line_type = pair.value.clone(),
                70 => {
                    // Bit 1: frozen
                    if let Some(flags) = pair.as_i16() {
                        if flags & 1 != 0 {
                            visible = false;
                        }
                    }
                }
                _ => {}
            }
        }

        Ok(name.map(|name| Layer {
            name,
            color,
            line_type,
            visible,
        }))
    }

    // ------------------------------------------------------------------
    // BLOCKS section
    // ------------------------------------------------------------------

    /// Read the BLOCKS section into the document's block table.
    pub fn read_blocks(&mut self, document: &mut DrawingDocument) -> Result<()> {
        loop {
            let pair = self.expect_pair("BLOCKS section")?;
            if pair.code == 0 {
                match pair.value.as_str() {
                    "ENDSEC" => break,
                    "BLOCK" => {
                        if let Some(block) = self.read_block(document)? {
                            document.blocks.insert(block);
                        }
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }

    fn read_block(&mut self, document: &mut DrawingDocument) -> Result<Option<Block>> {
        let mut name: Option<String> = None;
        let mut base_x = 0.0;
        let mut base_y = 0.0;

        // Block header runs until the first code 0.
        while let Some(pair) = self.reader.read_pair()? {
            if pair.code == 0 {
                self.reader.push_back(pair);
                break;
            }
            match pair.code {
                2 => name = Some(pair.value.clone()),
                10 => base_x = pair.as_double().unwrap_or(0.0),
                20 => base_y = pair.as_double().unwrap_or(0.0),
                _ => {}
            }
        }

        let mut block = match name {
            Some(name) => Block {
                name,
                base_point: Vector2::new(base_x, base_y),
                entities: Vec::new(),
            },
            None => {
                document.notifications.notify(
                    NotificationType::Warning,
                    "BLOCK without a name skipped",
                );
                // Consume the body so framing stays intact.
                loop {
                    let pair = self.expect_pair("BLOCK body")?;
                    if pair.code == 0 && pair.value == "ENDBLK" {
                        self.skip_entity_body()?;
                        return Ok(None);
                    }
                }
            }
        };

        // Nested entities until ENDBLK.
        loop {
            let pair = self.expect_pair("BLOCK body")?;
            if pair.code == 0 {
                if pair.value == "ENDBLK" {
                    self.skip_entity_body()?;
                    break;
                }
                let kind = pair.value.clone();
                if let Some(entity) = self.dispatch_entity(&kind, document)? {
                    block.entities.push(entity);
                }
            }
        }

        Ok(Some(block))
    }

    // ------------------------------------------------------------------
    // ENTITIES section
    // ------------------------------------------------------------------

    /// Read the ENTITIES section into the document's entity list.
    pub fn read_entities(&mut self, document: &mut DrawingDocument) -> Result<()> {
        loop {
            let pair = self.expect_pair("ENTITIES section")?;
            if pair.code == 0 {
                if pair.value == "ENDSEC" {
                    break;
                }
                let kind = pair.value.clone();
                if let Some(entity) = self.dispatch_entity(&kind, document)? {
                    document.add_entity(entity);
                }
            }
        }
        Ok(())
    }

    /// Parse one entity body by kind. Unrecognized kinds are skipped
    /// and counted; malformed recognized entities produce a warning and
    /// `None`.
    fn dispatch_entity(
        &mut self,
        kind: &str,
        document: &mut DrawingDocument,
    ) -> Result<Option<Entity>> {
        if !RECOGNIZED.contains(&kind) {
            document.record_skip(kind);
            self.skip_entity_body()?;
            return Ok(None);
        }

        let entity = match kind {
            "LINE" => self.read_line()?,
            "CIRCLE" => self.read_circle()?,
            "ARC" => self.read_arc()?,
            "ELLIPSE" => self.read_ellipse()?,
            "LWPOLYLINE" => self.read_lwpolyline()?,
            "POLYLINE" => self.read_polyline()?,
            "SPLINE" => self.read_spline()?,
            "TEXT" | "MTEXT" => self.read_text()?,
            "POINT" => self.read_point()?,
            "INSERT" => self.read_insert()?,
            "SOLID" | "TRACE" => self.read_solid(true)?,
            "3DFACE" => self.read_solid(false)?,
            "HATCH" => self.read_hatch()?,
            "LEADER" => self.read_leader()?,
            "ATTRIB" => self.read_attrib()?,
            "DIMENSION" => self.read_dimension()?,
            _ => unreachable!("kind checked against RECOGNIZED"),
        };

        if entity.is_none() {
            document.notifications.notify(
                NotificationType::Warning,
                format!("{} entity with missing or malformed fields skipped", kind),
            );
        }
        Ok(entity)
    }

    fn read_line(&mut self) -> Result<Option<Entity>> {
        let mut common = CommonFields::default();
        // Repeated 10/20 pairs accumulate here; some producers emit the
        // endpoints as a vertex array instead of 10/20 + 11/21.
        let mut xs: Vec<f64> = Vec::new();
        let mut ys: Vec<f64> = Vec::new();
        let mut end_x: Option<f64> = None;
        let mut end_y: Option<f64> = None;

        while let Some(pair) = self.reader.read_pair()? {
            if pair.code == 0 {
                self.reader.push_back(pair);
                break;
            }
            if common.absorb(&pair) {
                continue;
            }
            match pair.code {
                10 => match pair.as_double() {
                    Some(v) => xs.push(v),
                    None => common.malformed = true,
                },
                20 => match pair.as_double() {
                    Some(v) => ys.push(v),
                    None => common.malformed = true,
                },
                11 => end_x = pair.as_double(),
                21 => end_y = pair.as_double(),
                _ => {}
            }
        }

        if common.malformed {
            return Ok(None);
        }

        let start = match (xs.first(), ys.first()) {
            (Some(&x), Some(&y)) => Vector2::new(x, y),
            _ => return Ok(None),
        };
        let end = match (end_x, end_y) {
            (Some(x), Some(y)) => Vector2::new(x, y),
            // Fall back to the second vertex-array point.
            _ => match (xs.get(1), ys.get(1)) {
                (Some(&x), Some(&y)) => Vector2::new(x, y),
                _ => return Ok(None),
            },
        };

        Ok(Some(
            common.into_entity(EntityKind::Line(Line::new(start, end))),
        ))
    }

    fn read_circle(&mut self) -> Result<Option<Entity>> {
        let mut common = CommonFields::default();
        let mut x = None;
        let mut y = None;
        let mut radius = None;

        while let Some(pair) = self.reader.read_pair()? {
            if pair.code == 0 {
                self.reader.push_back(pair);
                break;
            }
            if common.absorb(&pair) {
                continue;
            }
            match pair.code {
                10 => x = pair.as_double(),
                20 => y = pair.as_double(),
                40 => match pair.as_double() {
                    Some(v) => radius = Some(v),
                    None => common.malformed = true,
                },
                _ => {}
            }
        }

        match (x, y, radius, common.malformed) {
            (Some(x), Some(y), Some(radius), false) if radius > 0.0 => Ok(Some(
                common.into_entity(EntityKind::Circle(Circle::from_coords(x, y, radius))),
            )),
            _ => Ok(None),
        }
    }

    fn read_arc(&mut self) -> Result<Option<Entity>> {
        let mut common = CommonFields::default();
        let mut x = None;
        let mut y = None;
        let mut radius = None;
        let mut start_angle = 0.0;
        let mut end_angle = 360.0;

        while let Some(pair) = self.reader.read_pair()? {
            if pair.code == 0 {
                self.reader.push_back(pair);
                break;
            }
            if common.absorb(&pair) {
                continue;
            }
            match pair.code {
                10 => x = pair.as_double(),
                20 => y = pair.as_double(),
                40 => match pair.as_double() {
                    Some(v) => radius = Some(v),
                    None => common.malformed = true,
                },
                // Angles arrive in degrees, stored in radians.
                50 => match pair.as_double() {
                    Some(v) => start_angle = v.to_radians(),
                    None => common.malformed = true,
                },
                51 => match pair.as_double() {
                    Some(v) => end_angle = v.to_radians(),
                    None => common.malformed = true,
                },
                _ => {}
            }
        }

        match (x, y, radius, common.malformed) {
            (Some(x), Some(y), Some(radius), false) if radius > 0.0 => {
                Ok(Some(common.into_entity(EntityKind::Arc(Arc::from_coords(
                    x,
                    y,
                    radius,
                    start_angle,
                    end_angle,
                )))))
            }
            _ => Ok(None),
        }
    }

    fn read_ellipse(&mut self) -> Result<Option<Entity>> {
        let mut common = CommonFields::default();
        let mut cx = None;
        let mut cy = None;
        let mut mx = None;
        let mut my = None;
        let mut ratio = 1.0;

        while let Some(pair) = self.reader.read_pair()? {
            if pair.code == 0 {
                self.reader.push_back(pair);
                break;
            }
            if common.absorb(&pair) {
                continue;
            }
            match pair.code {
                10 => cx = pair.as_double(),
                20 => cy = pair.as_double(),
                11 => mx = pair.as_double(),
                21 => my = pair.as_double(),
                40 => match pair.as_double() {
                    Some(v) => ratio = v,
                    None => common.malformed = true,
                },
                _ => {}
            }
        }

        match (cx, cy, mx, my, common.malformed) {
            (Some(cx), Some(cy), Some(mx), Some(my), false) => Ok(Some(common.into_entity(
                EntityKind::Ellipse(Ellipse::new(
                    Vector2::new(cx, cy),
                    Vector2::new(mx, my),
                    ratio,
                )),
            ))),
            _ => Ok(None),
        }
    }

    fn read_lwpolyline(&mut self) -> Result<Option<Entity>> {
        let mut common = CommonFields::default();
        let mut polyline = Polyline::new();
        let mut pending_x: Option<f64> = None;

        while let Some(pair) = self.reader.read_pair()? {
            if pair.code == 0 {
                self.reader.push_back(pair);
                break;
            }
            if common.absorb(&pair) {
                continue;
            }
            match pair.code {
                10 => pending_x = pair.as_double(),
                20 => {
                    if let (Some(x), Some(y)) = (pending_x.take(), pair.as_double()) {
                        polyline.add_point(Vector2::new(x, y));
                    }
                }
                70 => {
                    if let Some(flags) = pair.as_i32() {
                        polyline.flags = PolylineFlags::from_bits_truncate(flags as u32);
                    }
                }
                _ => {}
            }
        }

        if common.malformed || polyline.vertex_count() < 2 {
            return Ok(None);
        }
        Ok(Some(common.into_entity(EntityKind::Polyline(polyline))))
    }

    /// Legacy POLYLINE: header entity followed by VERTEX entities and a
    /// SEQEND terminator.
    fn read_polyline(&mut self) -> Result<Option<Entity>> {
        let mut common = CommonFields::default();
        let mut polyline = Polyline::new();

        // Header body.
        while let Some(pair) = self.reader.read_pair()? {
            if pair.code == 0 {
                self.reader.push_back(pair);
                break;
            }
            if common.absorb(&pair) {
                continue;
            }
            if pair.code == 70 {
                if let Some(flags) = pair.as_i32() {
                    polyline.flags = PolylineFlags::from_bits_truncate(flags as u32);
                }
            }
        }

        // VERTEX chain.
        loop {
            let pair = self.expect_pair("POLYLINE vertex chain")?;
            if pair.code != 0 {
                continue;
            }
            match pair.value.as_str() {
                "VERTEX" => {
                    let mut x = None;
                    let mut y = None;
                    while let Some(vp) = self.reader.read_pair()? {
                        if vp.code == 0 {
                            self.reader.push_back(vp);
                            break;
                        }
                        match vp.code {
                            10 => x = vp.as_double(),
                            20 => y = vp.as_double(),
                            _ => {}
                        }
                    }
                    if let (Some(x), Some(y)) = (x, y) {
                        polyline.add_point(Vector2::new(x, y));
                    }
                }
                "SEQEND" => {
                    self.skip_entity_body()?;
                    break;
                }
                _ => {
                    // Malformed chain; hand the entity back to the caller.
                    self.reader.push_back(pair);
                    break;
                }
            }
        }

        if common.malformed || polyline.vertex_count() < 2 {
            return Ok(None);
        }
        Ok(Some(common.into_entity(EntityKind::Polyline(polyline))))
    }

    fn read_spline(&mut self) -> Result<Option<Entity>> {
        let mut common = CommonFields::default();
        let mut spline = Spline::new();
        let mut pending_x: Option<f64> = None;

        while let Some(pair) = self.reader.read_pair()? {
            if pair.code == 0 {
                self.reader.push_back(pair);
                break;
            }
            if common.absorb(&pair) {
                continue;
            }
            match pair.code {
                10 => pending_x = pair.as_double(),
                20 => {
                    if let (Some(x), Some(y)) = (pending_x.take(), pair.as_double()) {
                        spline.add_control_point(Vector2::new(x, y));
                    }
                }
                70 => {
                    if let Some(flags) = pair.as_i32() {
                        spline.flags = SplineFlags::from_bits_truncate(flags as u32);
                    }
                }
                71 => {
                    if let Some(degree) = pair.as_i32() {
                        spline.degree = degree.max(1) as u32;
                    }
                }
                _ => {}
            }
        }

        if common.malformed || spline.control_points.len() < 2 {
            return Ok(None);
        }
        Ok(Some(common.into_entity(EntityKind::Spline(spline))))
    }

    /// TEXT and MTEXT. The anchor falls back from 10/20 to 11/21 and
    /// the height defaults to 2.5 drawing units.
    fn read_text(&mut self) -> Result<Option<Entity>> {
        let mut common = CommonFields::default();
        let mut x = None;
        let mut y = None;
        let mut alt_x = None;
        let mut alt_y = None;
        let mut height: Option<f64> = None;
        let mut rotation = 0.0;
        let mut value = String::new();

        while let Some(pair) = self.reader.read_pair()? {
            if pair.code == 0 {
                self.reader.push_back(pair);
                break;
            }
            if common.absorb(&pair) {
                continue;
            }
            match pair.code {
                10 => x = pair.as_double(),
                20 => y = pair.as_double(),
                11 => alt_x = pair.as_double(),
                21 => alt_y = pair.as_double(),
                40 => height = pair.as_double(),
                50 => rotation = pair.as_double().unwrap_or(0.0),
                // MTEXT splits long content over code 3 chunks followed
                // by a final code 1.
                3 => value.push_str(&pair.value),
                1 => value.push_str(&pair.value),
                _ => {}
            }
        }

        if common.malformed {
            return Ok(None);
        }

        let position = match (x, y) {
            (Some(x), Some(y)) => Vector2::new(x, y),
            _ => match (alt_x, alt_y) {
                (Some(x), Some(y)) => Vector2::new(x, y),
                _ => return Ok(None),
            },
        };

        let mut text = Text::new(position, value);
        if let Some(h) = height {
            if h > 0.0 {
                text.height = h;
            }
        }
        text.rotation = rotation;

        Ok(Some(common.into_entity(EntityKind::Text(text))))
    }

    fn read_point(&mut self) -> Result<Option<Entity>> {
        let mut common = CommonFields::default();
        let mut x = None;
        let mut y = None;

        while let Some(pair) = self.reader.read_pair()? {
            if pair.code == 0 {
                self.reader.push_back(pair);
                break;
            }
            if common.absorb(&pair) {
                continue;
            }
            match pair.code {
                10 => x = pair.as_double(),
                20 => y = pair.as_double(),
                _ => {}
            }
        }

        match (x, y, common.malformed) {
            (Some(x), Some(y), false) => Ok(Some(
                common.into_entity(EntityKind::Point(Point::from_coords(x, y))),
            )),
            _ => Ok(None),
        }
    }

    fn read_insert(&mut self) -> Result<Option<Entity>> {
        let mut common = CommonFields::default();
        let mut name: Option<String> = None;
        let mut x = 0.0;
        let mut y = 0.0;
        let mut scale_x = 1.0;
        let mut scale_y = 1.0;
        let mut rotation = 0.0;

        while let Some(pair) = self.reader.read_pair()? {
            if pair.code == 0 {
                self.reader.push_back(pair);
                break;
            }
            if common.absorb(&pair) {
                continue;
            }
            match pair.code {
                2 => name = Some(pair.value.clone()),
                10 => x = pair.as_double().unwrap_or(0.0),
                20 => y = pair.as_double().unwrap_or(0.0),
                41 => scale_x = pair.as_double().unwrap_or(1.0),
                42 => scale_y = pair.as_double().unwrap_or(1.0),
                50 => rotation = pair.as_double().unwrap_or(0.0),
                _ => {}
            }
        }

        let name = match name {
            Some(n) if !n.is_empty() => n,
            _ => return Ok(None),
        };

        let mut insert = Insert::new(name, Vector2::new(x, y));
        insert.scale_x = scale_x;
        insert.scale_y = scale_y;
        insert.rotation = rotation;

        Ok(Some(common.into_entity(EntityKind::Insert(insert))))
    }

    /// SOLID/TRACE and 3DFACE. SOLID stores its last two corners
    /// swapped relative to outline order; `swap_corners` normalizes
    /// that.
    fn read_solid(&mut self, swap_corners: bool) -> Result<Option<Entity>> {
        let mut common = CommonFields::default();
        let mut corners: [Option<Vector2>; 4] = [None; 4];
        let mut pending: [Option<f64>; 4] = [None; 4];

        while let Some(pair) = self.reader.read_pair()? {
            if pair.code == 0 {
                self.reader.push_back(pair);
                break;
            }
            if common.absorb(&pair) {
                continue;
            }
            match pair.code {
                10..=13 => pending[(pair.code - 10) as usize] = pair.as_double(),
                20..=23 => {
                    let i = (pair.code - 20) as usize;
                    if let (Some(x), Some(y)) = (pending[i], pair.as_double()) {
                        corners[i] = Some(Vector2::new(x, y));
                    }
                }
                _ => {}
            }
        }

        if common.malformed {
            return Ok(None);
        }

        let mut points: Vec<Vector2> = Vec::new();
        match corners {
            [Some(a), Some(b), Some(c), Some(d)] => {
                if swap_corners && c != d {
                    points.extend([a, b, d, c]);
                } else {
                    points.extend([a, b, c, d]);
                }
            }
            [Some(a), Some(b), Some(c), None] => points.extend([a, b, c]),
            _ => return Ok(None),
        }

        // A duplicated final corner means a triangle.
        if points.len() == 4 && points[2] == points[3] {
            points.pop();
        }

        Ok(Some(
            common.into_entity(EntityKind::SolidFace(SolidFace::new(points))),
        ))
    }

    /// HATCH: only the boundary polyline vertices are kept, rendered as
    /// a translucent face. Seed-point data (after code 98) is ignored.
    fn read_hatch(&mut self) -> Result<Option<Entity>> {
        let mut common = CommonFields::default();
        let mut points: Vec<Vector2> = Vec::new();
        let mut pending_x: Option<f64> = None;
        let mut in_seed_data = false;

        while let Some(pair) = self.reader.read_pair()? {
            if pair.code == 0 {
                self.reader.push_back(pair);
                break;
            }
            if common.absorb(&pair) {
                continue;
            }
            match pair.code {
                98 => in_seed_data = true,
                10 if !in_seed_data => pending_x = pair.as_double(),
                20 if !in_seed_data => {
                    if let (Some(x), Some(y)) = (pending_x.take(), pair.as_double()) {
                        points.push(Vector2::new(x, y));
                    }
                }
                _ => {}
            }
        }

        if common.malformed || points.len() < 3 {
            return Ok(None);
        }
        Ok(Some(
            common.into_entity(EntityKind::SolidFace(SolidFace::new(points))),
        ))
    }

    fn read_leader(&mut self) -> Result<Option<Entity>> {
        let mut common = CommonFields::default();
        let mut leader = Leader::default();
        let mut pending_x: Option<f64> = None;

        while let Some(pair) = self.reader.read_pair()? {
            if pair.code == 0 {
                self.reader.push_back(pair);
                break;
            }
            if common.absorb(&pair) {
                continue;
            }
            match pair.code {
                10 => pending_x = pair.as_double(),
                20 => {
                    if let (Some(x), Some(y)) = (pending_x.take(), pair.as_double()) {
                        leader.add_point(Vector2::new(x, y));
                    }
                }
                _ => {}
            }
        }

        if common.malformed || leader.vertices.len() < 2 {
            return Ok(None);
        }
        Ok(Some(common.into_entity(EntityKind::Leader(leader))))
    }

    fn read_attrib(&mut self) -> Result<Option<Entity>> {
        let mut common = CommonFields::default();
        let mut tag = String::new();
        let mut value = String::new();
        let mut x = None;
        let mut y = None;
        let mut alt_x = None;
        let mut alt_y = None;
        let mut height: Option<f64> = None;
        let mut rotation = 0.0;

        while let Some(pair) = self.reader.read_pair()? {
            if pair.code == 0 {
                self.reader.push_back(pair);
                break;
            }
            if common.absorb(&pair) {
                continue;
            }
            match pair.code {
                2 => tag = pair.value.clone(),
                1 => value = pair.value.clone(),
                10 => x = pair.as_double(),
                20 => y = pair.as_double(),
                11 => alt_x = pair.as_double(),
                21 => alt_y = pair.as_double(),
                40 => height = pair.as_double(),
                50 => rotation = pair.as_double().unwrap_or(0.0),
                _ => {}
            }
        }

        if common.malformed {
            return Ok(None);
        }

        let position = match (x, y) {
            (Some(x), Some(y)) => Vector2::new(x, y),
            _ => match (alt_x, alt_y) {
                (Some(x), Some(y)) => Vector2::new(x, y),
                _ => return Ok(None),
            },
        };

        let mut attrib = Attribute::new(tag, value, position);
        if let Some(h) = height {
            if h > 0.0 {
                attrib.height = h;
            }
        }
        attrib.rotation = rotation;

        Ok(Some(common.into_entity(EntityKind::Attribute(attrib))))
    }

    /// DIMENSION flattened to a polyline through its definition points
    /// (codes 13/23, 10/20, 14/24). Full dimension geometry is not
    /// reconstructed.
    fn read_dimension(&mut self) -> Result<Option<Entity>> {
        let mut common = CommonFields::default();
        let mut def: Option<Vector2> = None;
        let mut ext1: Option<Vector2> = None;
        let mut ext2: Option<Vector2> = None;
        let mut pending: [Option<f64>; 3] = [None; 3];

        while let Some(pair) = self.reader.read_pair()? {
            if pair.code == 0 {
                self.reader.push_back(pair);
                break;
            }
            if common.absorb(&pair) {
                continue;
            }
            match pair.code {
                10 => pending[0] = pair.as_double(),
                20 => {
                    if let (Some(x), Some(y)) = (pending[0], pair.as_double()) {
                        def = Some(Vector2::new(x, y));
                    }
                }
                13 => pending[1] = pair.as_double(),
                23 => {
                    if let (Some(x), Some(y)) = (pending[1], pair.as_double()) {
                        ext1 = Some(Vector2::new(x, y));
                    }
                }
                14 => pending[2] = pair.as_double(),
                24 => {
                    if let (Some(x), Some(y)) = (pending[2], pair.as_double()) {
                        ext2 = Some(Vector2::new(x, y));
                    }
                }
                _ => {}
            }
        }

        if common.malformed {
            return Ok(None);
        }

        let vertices: Vec<Vector2> = [ext1, def, ext2].into_iter().flatten().collect();
        if vertices.len() < 2 {
            return Ok(None);
        }
        Ok(Some(
            common.into_entity(EntityKind::Leader(Leader::new(vertices))),
        ))
    }
}
