// Database schema for the anime review application
diesel::table! {
    users (username) {
        username -> Text,
        password -> Text,            // bcrypt hash
        first_name -> Text,
        last_name -> Text,
        email -> Text,
        liked_genres -> Text,        // ", "-joined genre ids
        liked_va -> Nullable<Text>,  // ", "-joined voice actor names
        bookmarks -> Nullable<Text>, // ", "-joined anime ids
    }
}

diesel::table! {
    reviews (id) {
        id -> Integer,
        anime_id -> Integer,         // upstream id, not validated locally
        rating -> Integer,           // 1..=10
        comment -> Nullable<Text>,
        username -> Text,
    }
}

diesel::table! {
    sessions (token) {
        token -> Text,
        username -> Text,
        created_at -> Timestamp,
    }
}

diesel::joinable!(reviews -> users (username));
diesel::joinable!(sessions -> users (username));

diesel::allow_tables_to_appear_in_same_query!(users, reviews, sessions,);
