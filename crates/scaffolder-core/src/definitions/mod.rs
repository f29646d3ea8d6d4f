//! Built-in template definitions

pub mod vue_website;

pub use vue_website::VueWebsite;
