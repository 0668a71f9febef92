mod matches;

pub use matches::parse_match_listing;
