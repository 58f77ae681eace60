pub mod entry;
pub mod help;
pub mod main;
pub mod record_details;
pub mod records;
