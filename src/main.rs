mod access_control;
mod api;
mod cors;
mod db;
mod error;
mod moderation;
mod schema;
mod settings;

#[macro_use]
extern crate rocket;
#[macro_use]
extern crate diesel;
extern crate dotenv;
#[macro_use]
extern crate diesel_migrations;

use api::user_management::sessions::UserSession;
use cors::CORS;
use db::DbConn;
use rocket::fairing::AdHoc;
use settings::Settings;

#[get("/")]
fn index() -> &'static str {
    "API is running"
}

#[options("/<_..>")]
fn all_options() {}

#[launch]
async fn rocket() -> _ {
    dotenv::dotenv().ok();

    let settings = Settings::new();
    let cors = CORS::new(settings.client_url.clone());

    rocket::build()
        .attach(cors)
        .attach(DbConn::fairing())
        .attach(AdHoc::on_ignite("Database migrations", db::run_db_migrations))
        .manage(UserSession::new())
        .manage(settings)
        .mount("/", routes![index, all_options])
        .mount(
            "/auth",
            routes![
                crate::api::user_management::login::login_google,
                crate::api::user_management::login::login_facebook,
                crate::api::user_management::login::check_login,
                crate::api::user_management::login::check_login_unauthorised,
                crate::api::user_management::logout::logout,
            ],
        )
        .mount(
            "/api/admin",
            routes![
                crate::api::admin_management::list_users::list_users,
                crate::api::admin_management::bulk_update::bulk_update,
            ],
        )
        .mount(
            "/api/user",
            routes![
                crate::api::inventory_management::owned::owned_inventories,
                crate::api::inventory_management::accessible::accessible_inventories,
            ],
        )
        .mount(
            "/api/inventories",
            routes![
                crate::api::inventory_management::list::list_inventories,
                crate::api::inventory_management::latest::latest_inventories,
                crate::api::inventory_management::popular::popular_inventories,
                crate::api::inventory_management::tag_cloud::tag_cloud,
                crate::api::inventory_management::get_inventory::get_inventory,
                crate::api::inventory_management::create::create_inventory,
                crate::api::inventory_management::edit::edit_inventory,
                crate::api::inventory_management::list_items::list_inventory_items,
            ],
        )
        .mount(
            "/api/items",
            routes![
                crate::api::item_management::list::list_items,
                crate::api::item_management::get_item::get_item,
                crate::api::item_management::create::create_item,
                crate::api::item_management::edit::edit_item,
                crate::api::item_management::delete::delete_item,
            ],
        )
        .mount(
            "/api/tags",
            routes![crate::api::tag_management::list::list_tags],
        )
        .mount(
            "/api/categories",
            routes![crate::api::category_management::list::list_categories],
        )
}
