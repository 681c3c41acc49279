pub mod catalog;
pub mod help;
pub mod lyrics;
pub mod profile;
pub mod root;
pub mod search;
