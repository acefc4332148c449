/// Width of the progress bar in terminal cells.
pub const BAR_WIDTH: usize = 30;
pub const BAR_FILLED: char = '█';
pub const BAR_EMPTY: char = '░';
pub const SUCCESS_ICON: &str = "✅";
pub const FAILURE_ICON: &str = "❌";
