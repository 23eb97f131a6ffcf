pub mod dataset;
pub mod db;
pub mod question;
pub mod session;
pub mod settings;
pub mod timer;
