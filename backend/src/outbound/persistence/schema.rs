//! Diesel table definitions matching `migrations/`.

diesel::table! {
    /// Product categories.
    categories (id) {
        id -> Int8,
        title -> Nullable<Text>,
        image_url -> Nullable<Text>,
        /// Default ordering key for listings.
        sort -> Nullable<Int8>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Catalog products. `category_id` carries no foreign key.
    products (id) {
        id -> Int8,
        category_id -> Nullable<Int8>,
        title -> Nullable<Text>,
        image_url -> Nullable<Text>,
        price -> Nullable<Int8>,
        description -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(categories, products);
