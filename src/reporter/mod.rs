//! Reporter module for output formatting

pub mod console;
pub mod csv_log;
pub mod html;

pub use console::ConsoleReporter;
pub use csv_log::append_rows;
pub use html::HtmlReporter;
