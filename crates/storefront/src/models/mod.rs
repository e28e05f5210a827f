//! Storefront models: session-held visitor state and the view data every
//! page renders with.

pub mod layout;
pub mod pagination;
pub mod session;

pub use layout::{Layout, PageContext};
pub use pagination::{PageLink, Pagination, listing_href};
pub use session::{Flash, FlashKind};
