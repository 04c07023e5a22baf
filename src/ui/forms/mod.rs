//! Form rendering module
//!
//! - `field_renderer`: Field rendering utilities
//! - `tax_form`: The lead submission form

mod field_renderer;
mod tax_form;

pub use tax_form::draw_tax_form;
