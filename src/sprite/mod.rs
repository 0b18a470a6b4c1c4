mod loader;
mod sprite;
mod trimmer;

pub use loader::load_sprites;
pub use sprite::{PackedSprite, SourceSprite};
pub use trimmer::{crop_to_bounds, opaque_bounds};
