use std::time::Duration;

/// Overlay stays up this long while an analysis is pending or progressing.
pub const PENDING_HIDE_AFTER: Duration = Duration::from_secs(60);
/// Overlay stays up this long after showing a result.
pub const RESULT_HIDE_AFTER: Duration = Duration::from_secs(20);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send `Msg::HideElapsed { generation }` after `after`. Timers carrying an
    /// older generation are ignored by `update`.
    ScheduleHide { generation: u64, after: Duration },
}
