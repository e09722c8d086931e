mod get_item_badges;
pub use get_item_badges::get_item_badges;

pub mod recompute_item_badges;
pub use recompute_item_badges::{BadgeRecomputeReport, recompute_item_badges};
