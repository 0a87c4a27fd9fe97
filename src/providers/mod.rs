//! Feed and listing implementations over `NftGoClient`

pub mod listings;
pub mod trades;

pub use listings::{CollectionSearchSource, DropsSource, WhaleMintCollSource};
pub use trades::{BlockTradesFeed, WhaleTradesFeed};
