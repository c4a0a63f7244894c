//! The page a widget mounts into, and the input events it receives.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{foundation::core::Canvas, time::TimeOfDay};

/// Visual elements the widget needs before it can start.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementKind {
    RecordingCard,
    TimeSlider,
    ToggleSunshine,
    ResetCard,
    MeterContainer,
    LightRayCanvas,
    Sun,
}

impl ElementKind {
    pub const REQUIRED: [ElementKind; 7] = [
        ElementKind::RecordingCard,
        ElementKind::TimeSlider,
        ElementKind::ToggleSunshine,
        ElementKind::ResetCard,
        ElementKind::MeterContainer,
        ElementKind::LightRayCanvas,
        ElementKind::Sun,
    ];

    /// Element id as written in page markup.
    pub fn id(self) -> &'static str {
        match self {
            Self::RecordingCard => "recording-card",
            Self::TimeSlider => "time-slider",
            Self::ToggleSunshine => "toggle-sunshine",
            Self::ResetCard => "reset-card",
            Self::MeterContainer => "meter-container",
            Self::LightRayCanvas => "light-ray-canvas",
            Self::Sun => "sun",
        }
    }
}

fn all_elements() -> BTreeSet<ElementKind> {
    ElementKind::REQUIRED.into_iter().collect()
}

fn default_container() -> Canvas {
    Canvas::new(400, 200)
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Elements present on the page. Defaults to all of them.
    #[serde(default = "all_elements")]
    pub elements: BTreeSet<ElementKind>,
    /// Initial slider value.
    #[serde(default)]
    pub slider: TimeOfDay,
    /// Meter container client size in pixels.
    #[serde(default = "default_container")]
    pub container: Canvas,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            elements: all_elements(),
            slider: TimeOfDay::default(),
            container: default_container(),
        }
    }
}

impl Page {
    pub fn with_slider(mut self, value: i64) -> Self {
        self.slider = TimeOfDay::new(value);
        self
    }

    pub fn with_container(mut self, width: u32, height: u32) -> Self {
        self.container = Canvas::new(width, height);
        self
    }

    pub fn without(mut self, kind: ElementKind) -> Self {
        self.elements.remove(&kind);
        self
    }

    /// Every required element the page lacks, in a stable order.
    pub fn missing_elements(&self) -> Vec<ElementKind> {
        ElementKind::REQUIRED
            .into_iter()
            .filter(|k| !self.elements.contains(k))
            .collect()
    }
}

/// One input delivered to the widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WidgetEvent {
    /// The time slider moved.
    SliderInput { value: i64 },
    /// The sunshine button was clicked.
    ToggleSunshine,
    /// The reset button was clicked.
    ResetCard,
    /// The meter container changed size.
    Resize { width: u32, height: u32 },
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn element_ids_match_serde_names() {
        for kind in ElementKind::REQUIRED {
            assert_eq!(serde_json::to_value(kind).unwrap(), json!(kind.id()));
        }
    }

    #[test]
    fn empty_page_json_uses_defaults() {
        let page: Page = serde_json::from_value(json!({})).unwrap();
        assert_eq!(page, Page::default());
        assert!(page.missing_elements().is_empty());
        assert_eq!(page.slider, TimeOfDay::NOON);
    }

    #[test]
    fn reports_all_missing_elements() {
        let page: Page = serde_json::from_value(json!({
            "elements": ["recording-card", "time-slider", "meter-container"],
        }))
        .unwrap();
        assert_eq!(
            page.missing_elements(),
            vec![
                ElementKind::ToggleSunshine,
                ElementKind::ResetCard,
                ElementKind::LightRayCanvas,
                ElementKind::Sun,
            ]
        );
    }

    #[test]
    fn events_are_tagged() {
        let events: Vec<WidgetEvent> = serde_json::from_value(json!([
            {"type": "slider_input", "value": 30},
            {"type": "toggle_sunshine"},
            {"type": "reset_card"},
            {"type": "resize", "width": 320, "height": 160},
        ]))
        .unwrap();
        assert_eq!(
            events,
            vec![
                WidgetEvent::SliderInput { value: 30 },
                WidgetEvent::ToggleSunshine,
                WidgetEvent::ResetCard,
                WidgetEvent::Resize {
                    width: 320,
                    height: 160
                },
            ]
        );
    }
}
