pub(crate) mod admin_management;
pub(crate) mod category_management;
pub(crate) mod inventory_management;
pub(crate) mod item_management;
pub(crate) mod tag_management;
pub(crate) mod user_management;
