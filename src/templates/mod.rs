pub mod components;
pub mod layouts;
pub mod pages;

// Re-exports for convenience
pub use components::{address_form, card, html_error_response};
pub use layouts::desktop::desktop_layout;
