//! Tag selection and update decisions built on the domain version rules

pub mod tag_selector;
pub mod update_check;

pub use tag_selector::{filter_tags, latest_of, select_latest, sort_tags, FilteredTags};
pub use update_check::needs_update;
