#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BarTone {
    #[default]
    Low,
    Mid,
    High,
}

impl BarTone {
    pub fn for_percentage(percentage: u8) -> Self {
        if percentage < 30 {
            BarTone::Low
        } else if percentage < 70 {
            BarTone::Mid
        } else {
            BarTone::High
        }
    }
}

/// What the overlay currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Panel {
    Progress {
        text: String,
        percentage: u8,
        details: Option<String>,
        tone: BarTone,
    },
    /// Sanitised HTML of a successful verdict.
    Success { html: String },
    Failure { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OverlayView {
    pub panel: Option<Panel>,
    pub dirty: bool,
}

impl OverlayView {
    pub fn is_visible(&self) -> bool {
        self.panel.is_some()
    }
}
