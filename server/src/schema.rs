diesel::table! {
    recipes (id) {
        id -> Uuid,
        user_id -> Uuid,
        url -> Varchar,
        title -> Varchar,
        notes -> Text,
        images -> Array<Nullable<Text>>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    sessions (id) {
        id -> Uuid,
        user_id -> Uuid,
        #[max_length = 255]
        token_hash -> Varchar,
        expires_at -> Timestamptz,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    users (id) {
        id -> Uuid,
        #[max_length = 255]
        name -> Varchar,
        #[max_length = 255]
        email -> Nullable<Varchar>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    users_google (google_id) {
        #[max_length = 255]
        google_id -> Varchar,
        user_id -> Uuid,
    }
}

diesel::table! {
    users_local (email) {
        #[max_length = 255]
        email -> Varchar,
        #[max_length = 255]
        password_hash -> Varchar,
        user_id -> Uuid,
    }
}

diesel::joinable!(recipes -> users (user_id));
diesel::joinable!(sessions -> users (user_id));
diesel::joinable!(users_google -> users (user_id));
diesel::joinable!(users_local -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(recipes, sessions, users, users_google, users_local);
