//! A page plus a script of input events, replayable from JSON.

use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::{
    foundation::error::{RecorderError, RecorderResult},
    page::{Page, WidgetEvent},
    render::FontSource,
    widget::RecorderWidget,
};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub page: Page,
    #[serde(default)]
    pub events: Vec<WidgetEvent>,
}

impl Session {
    pub fn new(page: Page) -> Self {
        Self {
            page,
            events: Vec::new(),
        }
    }

    pub fn push(mut self, event: WidgetEvent) -> Self {
        self.events.push(event);
        self
    }

    pub fn from_json_str(s: &str) -> RecorderResult<Self> {
        serde_json::from_str(s).map_err(|e| RecorderError::serde(e.to_string()))
    }

    pub fn from_reader(r: impl Read) -> RecorderResult<Self> {
        serde_json::from_reader(r).map_err(|e| RecorderError::serde(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> RecorderResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| RecorderError::serde(e.to_string()))
    }

    /// Mounts a widget on the page and feeds it every event in order.
    #[tracing::instrument(level = "debug", skip(self), fields(events = self.events.len()))]
    pub fn replay(&self) -> RecorderResult<RecorderWidget> {
        self.replay_with_font(&FontSource::System)
    }

    pub fn replay_with_font(&self, font: &FontSource) -> RecorderResult<RecorderWidget> {
        let mut widget = RecorderWidget::initialize_with_font(&self.page, font)?;
        for event in &self.events {
            widget.apply(event)?;
        }
        Ok(widget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_json() {
        let s = Session::from_json_str(r#"{"events":[{"type":"toggle_sunshine"}]}"#).unwrap();
        assert_eq!(s.page, Page::default());
        assert_eq!(s.events, vec![WidgetEvent::ToggleSunshine]);
    }

    #[test]
    fn bad_json_is_a_serde_error() {
        let err = Session::from_json_str(r#"{"events":[{"type":"explode"}]}"#).unwrap_err();
        assert!(matches!(err, RecorderError::Serde(_)));
    }

    #[test]
    fn replay_with_unusable_font_fails_before_any_event() {
        let s = Session::default().push(WidgetEvent::ToggleSunshine);
        let font = FontSource::Bytes(std::sync::Arc::new(b"not a font".to_vec()));
        let err = s.replay_with_font(&font).unwrap_err();
        assert!(matches!(err, RecorderError::Validation(_)));
    }

    #[test]
    fn json_round_trip_preserves_script() {
        let s = Session::new(Page::default().with_slider(12))
            .push(WidgetEvent::SliderInput { value: 13 })
            .push(WidgetEvent::ResetCard);
        let back = Session::from_json_str(&s.to_json_pretty().unwrap()).unwrap();
        assert_eq!(back, s);
    }
}
