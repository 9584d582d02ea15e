pub mod api;
pub mod config;
pub mod content;
pub mod core;
pub mod markup;
pub mod seo;
