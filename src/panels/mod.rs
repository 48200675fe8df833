mod entry;
mod tasks;
mod util;

pub use entry::{render_submit_button, EntryPanel};
pub use tasks::{ListAction, TasksPanel};
pub use util::PanelId;
