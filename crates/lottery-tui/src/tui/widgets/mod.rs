// TUI widget modules, one per screen zone or overlay.

pub mod celebration;
pub mod draft_board;
pub mod entry;
pub mod final_order;
pub mod quit_confirm;
pub mod spotlight;
pub mod status_bar;
pub mod teams;
