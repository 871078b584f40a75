pub mod config;
pub mod logging;

pub mod cleaner;
pub mod markup;
pub mod post_db;
pub mod processor;
pub mod rules;
pub mod target;
