//! The recorder widget: input state, event handlers and derived visuals.

use serde::{Deserialize, Serialize};

use crate::{
    card::{BurnMark, Card, CardGeometry},
    foundation::{
        core::Canvas,
        error::{RecorderError, RecorderResult},
    },
    overlay::RayOverlay,
    page::{Page, WidgetEvent},
    render::{FontSource, FrameRGBA},
    scene,
    sky::{SkyGradient, sky_gradient},
    sun::{SunAppearance, SunPosition, Sunshine, sun_position},
    time::TimeOfDay,
};

/// Input state. Everything on screen is derived from this plus the card's
/// trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetState {
    pub time: TimeOfDay,
    pub sunshine: Sunshine,
    pub container: Canvas,
}

impl WidgetState {
    pub fn sky(&self) -> SkyGradient {
        sky_gradient(self.time)
    }

    pub fn sun(&self) -> SunPosition {
        sun_position(self.time)
    }

    pub fn appearance(&self) -> SunAppearance {
        self.sunshine.appearance()
    }
}

/// Snapshot of every derived visual property.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WidgetView {
    pub time: TimeOfDay,
    pub sunshine: Sunshine,
    pub button_label: String,
    pub sky: SkyGradient,
    pub sky_css: String,
    pub sun: SunPosition,
    pub appearance: SunAppearance,
    pub box_shadow: String,
    pub last_burn_x: Option<f64>,
    pub pixels_per_hour: f64,
    pub container: Canvas,
}

#[derive(Debug)]
pub struct RecorderWidget {
    state: WidgetState,
    card: Card,
    overlay: RayOverlay,
}

impl RecorderWidget {
    /// Mounts the widget on `page`.
    ///
    /// Every required element is checked first; if any is missing nothing is
    /// built and the error lists all of them.
    pub fn initialize(page: &Page) -> RecorderResult<Self> {
        Self::initialize_with_font(page, &FontSource::System)
    }

    /// Like [`RecorderWidget::initialize`], with the card labels set in `font`.
    #[tracing::instrument(level = "debug", skip(page, font))]
    pub fn initialize_with_font(page: &Page, font: &FontSource) -> RecorderResult<Self> {
        let missing = page.missing_elements();
        if !missing.is_empty() {
            let err = RecorderError::MissingElements(missing);
            tracing::error!(error = %err, "widget initialization failed");
            return Err(err);
        }

        let mut widget = Self {
            state: WidgetState {
                time: page.slider,
                sunshine: Sunshine::default(),
                container: page.container,
            },
            card: Card::with_font(CardGeometry::default(), font)?,
            overlay: RayOverlay::new(page.container)?,
        };

        widget.card.draw_base()?;
        widget.apply_sunshine();
        widget.update_sun_position()?;
        tracing::debug!(time = widget.state.time.value(), "widget initialized");
        Ok(widget)
    }

    pub fn state(&self) -> WidgetState {
        self.state
    }

    pub fn last_burn_x(&self) -> Option<f64> {
        self.card.trace().last_burn_x()
    }

    pub fn apply(&mut self, event: &WidgetEvent) -> RecorderResult<()> {
        match *event {
            WidgetEvent::SliderInput { value } => self.slider_input(value).map(|_| ()),
            WidgetEvent::ToggleSunshine => {
                self.toggle_sunshine();
                Ok(())
            }
            WidgetEvent::ResetCard => self.reset_card(),
            WidgetEvent::Resize { width, height } => self.resize(width, height),
        }
    }

    /// Slider moved: recompute sky and sun, then burn if shining.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn slider_input(&mut self, value: i64) -> RecorderResult<Option<BurnMark>> {
        self.state.time = TimeOfDay::new(value);
        self.update_sun_position()
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub fn toggle_sunshine(&mut self) {
        self.state.sunshine = self.state.sunshine.toggled();
        self.apply_sunshine();
        if !self.state.sunshine.is_shining() {
            self.card.break_trace();
        }
        tracing::debug!(sunshine = ?self.state.sunshine, "sunshine toggled");
    }

    /// Wipes the card back to its blank face. Time and sunshine are kept.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn reset_card(&mut self) -> RecorderResult<()> {
        self.card.draw_base()?;
        self.overlay.clear();
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub fn resize(&mut self, width: u32, height: u32) -> RecorderResult<()> {
        let container = Canvas::new(width, height);
        self.overlay.resize(container)?;
        self.state.container = container;
        self.card.draw_base()?;
        self.update_sun_position()?;
        Ok(())
    }

    pub fn view(&self) -> WidgetView {
        let sky = self.state.sky();
        let appearance = self.state.appearance();
        WidgetView {
            time: self.state.time,
            sunshine: self.state.sunshine,
            button_label: self.state.sunshine.button_label().to_owned(),
            sky,
            sky_css: sky.to_css(),
            sun: self.state.sun(),
            box_shadow: appearance.box_shadow_css(),
            appearance,
            last_burn_x: self.last_burn_x(),
            pixels_per_hour: self.card.pixels_per_hour(),
            container: self.state.container,
        }
    }

    pub fn card_frame(&self) -> FrameRGBA {
        self.card.readback()
    }

    pub fn overlay(&self) -> &RayOverlay {
        &self.overlay
    }

    /// The meter container as it currently looks.
    pub fn render_scene(&self) -> RecorderResult<FrameRGBA> {
        scene::render_scene(
            self.state.container,
            self.state.sky(),
            self.state.sun(),
            &self.state.appearance(),
            self.overlay.surface(),
        )
    }

    fn apply_sunshine(&mut self) {
        self.overlay.clear();
    }

    fn update_sun_position(&mut self) -> RecorderResult<Option<BurnMark>> {
        let mark = if self.state.sunshine.is_shining() {
            let x = self.card.geometry().focus_x(self.state.time);
            Some(self.card.burn(x)?)
        } else {
            self.card.break_trace();
            None
        };
        self.overlay.clear();
        tracing::debug!(
            time = self.state.time.value(),
            sky = %self.state.sky().to_css(),
            ?mark,
            "sun position updated"
        );
        Ok(mark)
    }
}
