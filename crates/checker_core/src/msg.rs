#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Notification received from the background relay.
    Notification(crate::Notification),
    /// User clicked the close button.
    CloseClicked,
    /// A scheduled hide timer fired.
    HideElapsed { generation: u64 },
}
