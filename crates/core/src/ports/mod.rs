mod catalog;
mod ids;
mod pagination;
mod sorting;

pub use catalog::*;
pub use ids::*;
pub use pagination::*;
pub use sorting::*;
