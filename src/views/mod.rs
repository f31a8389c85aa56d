pub mod app;
pub mod dashboard;
pub mod data_table;
pub mod layout;
pub mod login;
pub mod pages;

pub use app::render_app;
