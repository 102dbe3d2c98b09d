pub mod color;
pub mod fonts;
pub mod store;
