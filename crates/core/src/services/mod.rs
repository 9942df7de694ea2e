mod cursor;
mod global_id;
mod ordering;
mod paginator;
mod search;

pub use cursor::{CursorCodec, CURSOR_VERSION};
pub use global_id::GlobalIdCodec;
pub use ordering::order;
pub use paginator::{PaginationConfig, Paginator, DEFAULT_MAX_PAGE_SIZE};
pub use search::rank_products;
