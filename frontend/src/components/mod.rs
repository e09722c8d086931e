pub mod error_boundary;
pub mod suspend_boundary;
pub mod listing_panel;
pub mod filter_sidebar;
