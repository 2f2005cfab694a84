pub mod editor;
pub mod traces;
pub mod view;

pub use editor::{EditMode, NameEditor, RenameCommit, MAX_NAME_LEN};
pub use traces::{trace_rows, TracePaths, TraceRow};
pub use view::{menu_item_element_id, MenuItemTrace, DEFAULT_CONTAINER_CLASS};
