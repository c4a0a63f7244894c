//! Card label text: `parley` layout, drawn as `vello_cpu` glyph runs.

use std::{
    borrow::Cow,
    path::Path,
    sync::{Arc, OnceLock},
};

use kurbo::Point;

use crate::{
    color::Rgb8,
    foundation::error::{RecorderError, RecorderResult},
};

/// Families tried, in order, when the label face comes from the system.
const SYSTEM_FAMILIES: [&str; 4] = ["Arial", "Helvetica", "Liberation Sans", "DejaVu Sans"];

/// Where the label face comes from.
#[derive(Clone, Debug, Default)]
pub enum FontSource {
    /// First installed sans-serif face, looked up once per process.
    #[default]
    System,
    /// A TrueType/OpenType file already in memory.
    Bytes(Arc<Vec<u8>>),
}

impl FontSource {
    pub fn from_path(path: &Path) -> RecorderResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            RecorderError::validation(format!("read font {}: {e}", path.display()))
        })?;
        Ok(Self::Bytes(Arc::new(bytes)))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct LabelBrush;

struct LabelFace {
    family: String,
    font: vello_cpu::peniko::FontData,
}

/// Shapes short labels with one registered face.
pub struct TextEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<LabelBrush>,
    face: Option<LabelFace>,
}

impl std::fmt::Debug for TextEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextEngine")
            .field("family", &self.face.as_ref().map(|face| face.family.as_str()))
            .finish_non_exhaustive()
    }
}

impl TextEngine {
    pub fn new(source: &FontSource) -> RecorderResult<Self> {
        let mut engine = Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            face: None,
        };
        match source {
            FontSource::Bytes(bytes) => engine.register(bytes.as_ref().clone(), 0)?,
            FontSource::System => match system_label_font() {
                Some((bytes, index)) => engine.register(bytes.as_ref().clone(), index)?,
                None => tracing::warn!("no system sans-serif face found; card labels stay blank"),
            },
        }
        Ok(engine)
    }

    /// Family name of the registered face, if any.
    pub fn family(&self) -> Option<&str> {
        self.face.as_ref().map(|face| face.family.as_str())
    }

    fn register(&mut self, bytes: Vec<u8>, index: u32) -> RecorderResult<()> {
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
        let (family_id, _) = families
            .first()
            .ok_or_else(|| RecorderError::validation("label font bytes contain no usable face"))?;
        let family = self
            .font_ctx
            .collection
            .family_name(*family_id)
            .ok_or_else(|| RecorderError::validation("registered label font has no family name"))?
            .to_string();
        tracing::debug!(%family, index, "label face registered");
        self.face = Some(LabelFace {
            family,
            font: vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), index),
        });
        Ok(())
    }

    /// Fills `text` centred on `anchor.x` with its baseline on `anchor.y`.
    /// Draws nothing when no face is registered.
    pub(crate) fn fill_label(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        text: &str,
        anchor: Point,
        size_px: f32,
        color: Rgb8,
    ) {
        let Some(face) = &self.face else {
            return;
        };

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(face.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        let mut layout: parley::Layout<LabelBrush> = builder.build(text);
        layout.break_all_lines(None);

        let left = anchor.x - f64::from(layout.width()) / 2.0;
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r, color.g, color.b, 255,
        ));
        for line in layout.lines() {
            let top = anchor.y - f64::from(line.metrics().baseline);
            ctx.set_transform(vello_cpu::kurbo::Affine::translate((left, top)));
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&face.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    }
}

fn system_label_font() -> Option<(Arc<Vec<u8>>, u32)> {
    static FACE: OnceLock<Option<(Arc<Vec<u8>>, u32)>> = OnceLock::new();
    FACE.get_or_init(|| {
        use usvg::fontdb::{Database, Family, Query};

        let mut db = Database::new();
        db.load_system_fonts();
        let mut families: Vec<Family<'_>> =
            SYSTEM_FAMILIES.iter().map(|name| Family::Name(name)).collect();
        families.push(Family::SansSerif);
        let id = db.query(&Query {
            families: &families,
            ..Query::default()
        })?;
        db.with_face_data(id, |data, index| (Arc::new(data.to_vec()), index))
    })
    .clone()
}
