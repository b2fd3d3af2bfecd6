table! {
    access_permissions (id) {
        id -> Int4,
        user_id -> Int4,
        inventory_id -> Int4,
        created_at -> Timestamp,
    }
}

table! {
    accounts (id) {
        id -> Int4,
        user_id -> Int4,
        provider -> Varchar,
        provider_account_id -> Varchar,
    }
}

table! {
    categories (id) {
        id -> Int4,
        name -> Varchar,
    }
}

table! {
    inventories (id) {
        id -> Int4,
        title -> Varchar,
        description -> Text,
        category_id -> Int4,
        creator_id -> Int4,
        created_at -> Timestamp,
    }
}

table! {
    inventory_tags (id) {
        id -> Int4,
        inventory_id -> Int4,
        tag_id -> Int4,
    }
}

table! {
    items (id) {
        id -> Int4,
        inventory_id -> Int4,
        name -> Varchar,
        custom_id -> Nullable<Varchar>,
        string1_val -> Nullable<Varchar>,
        string2_val -> Nullable<Varchar>,
        string3_val -> Nullable<Varchar>,
        multiline1_val -> Nullable<Text>,
        multiline2_val -> Nullable<Text>,
        multiline3_val -> Nullable<Text>,
        int1_val -> Nullable<Int4>,
        int2_val -> Nullable<Int4>,
        int3_val -> Nullable<Int4>,
        bool1_val -> Nullable<Bool>,
        bool2_val -> Nullable<Bool>,
        bool3_val -> Nullable<Bool>,
        doc1_val -> Nullable<Varchar>,
        doc2_val -> Nullable<Varchar>,
        doc3_val -> Nullable<Varchar>,
    }
}

table! {
    tags (id) {
        id -> Int4,
        name -> Varchar,
    }
}

table! {
    users (id) {
        id -> Int4,
        name -> Varchar,
        email -> Varchar,
        is_admin -> Bool,
        is_blocked -> Bool,
    }
}

joinable!(accounts -> users (user_id));
joinable!(inventories -> categories (category_id));
joinable!(inventories -> users (creator_id));
joinable!(inventory_tags -> inventories (inventory_id));
joinable!(inventory_tags -> tags (tag_id));
joinable!(items -> inventories (inventory_id));
joinable!(access_permissions -> inventories (inventory_id));
joinable!(access_permissions -> users (user_id));

allow_tables_to_appear_in_same_query!(
    access_permissions,
    accounts,
    categories,
    inventories,
    inventory_tags,
    items,
    tags,
    users,
);
