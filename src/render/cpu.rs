use crate::{
    color::Rgb8,
    foundation::{
        core::{Canvas, Point, Rect, Rgba8Premul},
        error::{RecorderError, RecorderResult},
    },
    render::{
        composite::{over, over_in_place, unpremultiply},
        draw::{DrawOp, TOLERANCE},
        text::TextEngine,
    },
};

/// Readback of a surface. `data` is row-major RGBA8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Straight-alpha copy for PNG encoding.
    pub fn to_straight(&self) -> Self {
        if !self.premultiplied {
            return self.clone();
        }
        let mut data = Vec::with_capacity(self.data.len());
        for px in self.data.chunks_exact(4) {
            data.extend_from_slice(&unpremultiply([px[0], px[1], px[2], px[3]]));
        }
        Self {
            width: self.width,
            height: self.height,
            data,
            premultiplied: false,
        }
    }
}

/// A CPU raster target. Draw batches are rasterized with `vello_cpu` into a
/// scratch pixmap and composited source-over onto the retained contents, so
/// marks accumulate across calls the way a canvas does.
pub struct CpuSurface {
    canvas: Canvas,
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
}

impl std::fmt::Debug for CpuSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl CpuSurface {
    pub fn new(canvas: Canvas) -> RecorderResult<Self> {
        if canvas.is_empty() {
            return Err(RecorderError::validation(format!(
                "surface must be non-empty, got {}x{}",
                canvas.width, canvas.height
            )));
        }
        let (width, height) = canvas.to_u16()?;
        Ok(Self {
            canvas,
            width,
            height,
            pixmap: vello_cpu::Pixmap::new(width, height),
        })
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn clear_to_transparent(&mut self) {
        self.pixmap.data_as_u8_slice_mut().fill(0);
    }

    pub fn is_transparent(&self) -> bool {
        self.pixmap.data_as_u8_slice().iter().all(|&b| b == 0)
    }

    pub fn data(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    /// Overwrites every row with the colour `row_color(y)` returns.
    pub fn fill_rows(&mut self, mut row_color: impl FnMut(u32) -> Rgba8Premul) {
        let stride = self.canvas.width as usize * 4;
        for (y, row) in self
            .pixmap
            .data_as_u8_slice_mut()
            .chunks_exact_mut(stride)
            .enumerate()
        {
            let px = row_color(y as u32).to_array();
            for dst in row.chunks_exact_mut(4) {
                dst.copy_from_slice(&px);
            }
        }
    }

    /// Blends `shade(p)` over every pixel whose centre `p` lies in `bounds`.
    /// Pixels for which it returns `None` are left alone.
    pub fn shade(&mut self, bounds: Rect, mut shade: impl FnMut(Point) -> Option<Rgba8Premul>) {
        let (w, h) = (self.canvas.width, self.canvas.height);
        let x0 = (bounds.x0.floor().max(0.0) as u32).min(w);
        let x1 = (bounds.x1.ceil().max(0.0) as u32).min(w);
        let y0 = (bounds.y0.floor().max(0.0) as u32).min(h);
        let y1 = (bounds.y1.ceil().max(0.0) as u32).min(h);
        let data = self.pixmap.data_as_u8_slice_mut();
        for y in y0..y1 {
            for x in x0..x1 {
                let Some(src) = shade(Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5)) else {
                    continue;
                };
                let i = ((y * w + x) as usize) * 4;
                let dst = &mut data[i..i + 4];
                let out = over([dst[0], dst[1], dst[2], dst[3]], src.to_array(), 1.0);
                dst.copy_from_slice(&out);
            }
        }
    }

    /// Draws shapes only; a `Text` op here is an error.
    pub fn draw(&mut self, ops: &[DrawOp]) -> RecorderResult<()> {
        self.render_ops(ops, None)
    }

    pub fn draw_with_text(&mut self, ops: &[DrawOp], text: &mut TextEngine) -> RecorderResult<()> {
        self.render_ops(ops, Some(text))
    }

    fn render_ops(&mut self, ops: &[DrawOp], mut text: Option<&mut TextEngine>) -> RecorderResult<()> {
        if ops.is_empty() {
            return Ok(());
        }
        let mut scratch = vello_cpu::Pixmap::new(self.width, self.height);
        let mut ctx = vello_cpu::RenderContext::new(self.width, self.height);
        for op in ops {
            draw_op(&mut ctx, op, text.as_deref_mut())?;
        }
        ctx.flush();
        ctx.render_to_pixmap(&mut scratch);
        over_in_place(
            self.pixmap.data_as_u8_slice_mut(),
            scratch.data_as_u8_slice(),
            1.0,
        )
    }

    pub fn composite(&mut self, src: &CpuSurface, opacity: f32) -> RecorderResult<()> {
        if src.canvas != self.canvas {
            return Err(RecorderError::render(
                "composite source/target surface size mismatch",
            ));
        }
        over_in_place(self.pixmap.data_as_u8_slice_mut(), src.data(), opacity)
    }

    pub fn readback(&self) -> FrameRGBA {
        FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }
}

fn paint(color: Rgb8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(color.r, color.g, color.b, 255)
}

fn draw_op(
    ctx: &mut vello_cpu::RenderContext,
    op: &DrawOp,
    text: Option<&mut TextEngine>,
) -> RecorderResult<()> {
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

    match op {
        DrawOp::FillRect { rect, color } => {
            ctx.set_paint(paint(*color));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                rect.x0, rect.y0, rect.x1, rect.y1,
            ));
        }
        DrawOp::FillPath { path, color } => {
            ctx.set_paint(paint(*color));
            ctx.fill_path(&bezpath_to_cpu(path));
        }
        DrawOp::StrokePath {
            path,
            width,
            cap,
            color,
        } => {
            // Expand to an outline with kurbo and fill it; caps and joins are
            // resolved here rather than by the rasterizer.
            let style = kurbo::Stroke::new(*width).with_caps(*cap);
            let outline = kurbo::stroke(
                path.iter(),
                &style,
                &kurbo::StrokeOpts::default(),
                TOLERANCE,
            );
            ctx.set_paint(paint(*color));
            ctx.fill_path(&bezpath_to_cpu(&outline));
        }
        DrawOp::Text {
            text: label,
            anchor,
            size_px,
            color,
        } => {
            let engine = text.ok_or_else(|| {
                RecorderError::render(format!("no text engine to draw label {label:?}"))
            })?;
            engine.fill_label(ctx, label, *anchor, *size_px, *color);
        }
    }
    Ok(())
}

fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}
