pub(crate) mod bulk_update;
pub(crate) mod list_users;
