//! Reusable widgets the tabs are assembled from.

pub mod logs_dialog;
pub mod notice;
pub mod scrollbar_helper;
pub mod table_panel;
pub mod text_input;
pub mod text_panel;
pub mod wizard_view;

pub use notice::{Notice, NoticeLevel};
pub use table_panel::TablePanel;
pub use text_input::{InputEvent, TextInput};
pub use text_panel::TextPanel;
