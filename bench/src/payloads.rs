//! Extension and payload types used by the benchmarks.

use hub_macros::Extension;

#[derive(Extension, Clone, Debug, Default)]
pub struct Session {
    pub user: String,
    pub token: u64,
}

#[derive(Extension, Clone, Debug, Default)]
pub struct PageChange {
    pub from: String,
    pub to: String,
}
