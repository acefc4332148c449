use crate::view_model::{OverlayView, Panel};

/// The single overlay of one page surface.
///
/// Opening a new overlay always tears down the previous one; `generation`
/// changes on every teardown or timer reschedule so stale hide timers can be
/// recognised.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OverlayState {
    panel: Option<Panel>,
    generation: u64,
    dirty: bool,
}

impl OverlayState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> OverlayView {
        OverlayView {
            panel: self.panel.clone(),
            dirty: self.dirty,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns whether the state changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn panel_mut(&mut self) -> Option<&mut Panel> {
        self.panel.as_mut()
    }

    /// Replaces whatever is shown and returns the new generation.
    pub(crate) fn open(&mut self, panel: Panel) -> u64 {
        self.panel = Some(panel);
        self.bump()
    }

    pub(crate) fn close(&mut self) {
        if self.panel.take().is_some() {
            self.bump();
        }
    }

    pub(crate) fn bump(&mut self) -> u64 {
        self.generation += 1;
        self.dirty = true;
        self.generation
    }
}
