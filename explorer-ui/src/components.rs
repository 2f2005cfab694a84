pub mod explorer;
pub mod menu_item;

pub use explorer::TraceExplorer;
pub use menu_item::MenuItemTrace;
