pub mod draft_input;
pub mod filter_panel;
pub mod pagination_controls;
pub mod table;
