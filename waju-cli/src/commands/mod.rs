//! CLI command implementations.

pub mod check;
pub mod config;
pub mod extract;
pub mod purge;

pub use check::check_config;
pub use config::show_config;
pub use extract::extract_files;
pub use purge::purge_stylesheet;
