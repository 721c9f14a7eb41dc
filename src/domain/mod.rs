pub mod command;
pub mod enums;
pub mod store;
pub mod task;
pub mod timer;
pub mod views;

pub use command::{is_command_input, matching_commands, parse_command, CommandToken};
pub use enums::{Priority, TimerMode, UiMode, View};
pub use store::TaskListStore;
pub use task::{Task, TaskPatch};
pub use timer::{FocusTimerEngine, TimerState};
pub use views::{
    focus_label, partition, partition_ids, pending_count, priority_badge, top_focus, FOCUS_SLOTS,
};
