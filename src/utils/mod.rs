pub mod format;

pub use format::{group_thousands, title_case};
