pub mod table;
pub mod page;
pub mod errors;
pub mod format;
pub mod session;

pub use table::{Align, Table};
pub use page::Page;
pub use errors::extract_clean_error;
pub use session::{Session, SessionStore};
