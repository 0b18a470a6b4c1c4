mod format;
mod json;
mod xml;

pub use format::save_atlas_image;
pub use json::{render_json, write_json};
pub use xml::{render_xml, write_xml};
