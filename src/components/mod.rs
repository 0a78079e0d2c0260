//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod file_picker;
pub mod help_dialog;
pub mod layout;
pub mod quit_dialog;
pub mod report;

pub use file_picker::{FilePicker, PickerContext};
pub use help_dialog::HelpDialog;
pub use layout::{calculate_page_layout, centered_popup};
pub use quit_dialog::QuitDialog;
pub use report::ReportView;
