// Mirrors migrations/*_create_scores/up.sql.

diesel::table! {
    scores (id) {
        id -> Integer,
        name -> Text,
        difficulty -> Text,
        moves -> Integer,
        score -> Double,
        date_played -> Timestamp,
    }
}
