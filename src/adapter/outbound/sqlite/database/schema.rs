//! Diesel schema definitions for the SQLite database.

diesel::table! {
    fixtures (id) {
        id -> Text,
        day -> Text,
        kickoff -> Text,
        home_team -> Text,
        away_team -> Text,
        league -> Text,
        predicted -> Text,
        confidence -> Double,
        finished -> Integer,
        actual -> Nullable<Text>,
        correct -> Nullable<Integer>,
    }
}

diesel::table! {
    sync_records (id) {
        id -> Text,
        target_date -> Text,
        started_at -> Text,
        finished_at -> Nullable<Text>,
        considered -> Integer,
        accepted -> Integer,
        requests -> Text,
        status -> Text,
    }
}

diesel::table! {
    leagues (id) {
        id -> Text,
        name -> Text,
        detected -> Integer,
        selected -> Nullable<Integer>,
        blacklisted -> Integer,
    }
}
