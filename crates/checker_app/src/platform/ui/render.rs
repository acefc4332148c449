use checker_core::{BarTone, OverlayView, Panel};

use super::constants::*;

/// Renders the overlay as terminal lines. A hidden overlay renders nothing.
pub fn render(view: &OverlayView) -> Vec<String> {
    let Some(panel) = &view.panel else {
        return Vec::new();
    };

    match panel {
        Panel::Progress {
            text,
            percentage,
            details,
            tone,
        } => {
            let mut lines = vec![
                text.clone(),
                format!("[{}] {}", progress_bar(*percentage), tone_label(*tone)),
            ];
            if let Some(details) = details {
                lines.push(details.clone());
            }
            lines
        }
        Panel::Success { html } => {
            let mut lines = vec![SUCCESS_ICON.to_string()];
            lines.extend(html.lines().map(str::to_string));
            lines
        }
        Panel::Failure { message } => vec![format!("{FAILURE_ICON} {message}")],
    }
}

fn progress_bar(percentage: u8) -> String {
    let filled = usize::from(percentage.min(100)) * BAR_WIDTH / 100;
    let mut bar = String::with_capacity(BAR_WIDTH * 3);
    bar.extend(std::iter::repeat(BAR_FILLED).take(filled));
    bar.extend(std::iter::repeat(BAR_EMPTY).take(BAR_WIDTH - filled));
    bar
}

fn tone_label(tone: BarTone) -> &'static str {
    match tone {
        BarTone::Low => "starting",
        BarTone::Mid => "working",
        BarTone::High => "almost done",
    }
}
