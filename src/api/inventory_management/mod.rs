pub(crate) mod accessible;
pub(crate) mod create;
pub(crate) mod edit;
pub(crate) mod get_inventory;
pub(crate) mod latest;
pub(crate) mod list;
pub(crate) mod list_items;
pub(crate) mod models;
pub(crate) mod owned;
pub(crate) mod popular;
pub(crate) mod tag_cloud;
