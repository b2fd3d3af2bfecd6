use serde::Serialize;
use std::fmt::Debug;

#[derive(Queryable, Serialize, Debug)]
pub struct Category {
    pub id: i32,
    pub name: String,
}
