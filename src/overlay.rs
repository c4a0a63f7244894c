//! Light-ray overlay. It is sized to the meter container and kept empty.

use crate::{
    foundation::{core::Canvas, error::RecorderResult},
    render::{CpuSurface, FrameRGBA},
};

#[derive(Debug)]
pub struct RayOverlay {
    canvas: Canvas,
    // None while the container has zero area.
    surface: Option<CpuSurface>,
}

impl RayOverlay {
    pub fn new(canvas: Canvas) -> RecorderResult<Self> {
        let surface = if canvas.is_empty() {
            None
        } else {
            Some(CpuSurface::new(canvas)?)
        };
        Ok(Self { canvas, surface })
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Matches the overlay to a new container size. Contents are discarded.
    pub fn resize(&mut self, canvas: Canvas) -> RecorderResult<()> {
        if canvas != self.canvas {
            *self = Self::new(canvas)?;
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        if let Some(s) = self.surface.as_mut() {
            s.clear_to_transparent();
        }
    }

    pub fn is_clear(&self) -> bool {
        self.surface.as_ref().is_none_or(CpuSurface::is_transparent)
    }

    /// Leaves a stray mark so tests can see a handler wipe it.
    #[cfg(test)]
    pub(crate) fn smudge(&mut self) {
        if let Some(s) = self.surface.as_mut() {
            s.fill_rows(|_| crate::color::named::YELLOW.opaque());
        }
    }

    pub fn surface(&self) -> Option<&CpuSurface> {
        self.surface.as_ref()
    }

    pub fn readback(&self) -> FrameRGBA {
        match &self.surface {
            Some(s) => s.readback(),
            None => FrameRGBA {
                width: self.canvas.width,
                height: self.canvas.height,
                data: Vec::new(),
                premultiplied: true,
            },
        }
    }
}
