pub mod atlas;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod packing;
pub mod sprite;

pub use atlas::{Atlas, AtlasBuilder};
pub use cli::{CliArgs, Command, CommonArgs, PackMode};
pub use error::TexpackError;
pub use packing::{CanvasSize, RectangleRecord, TrimInfo, pack_blf, pack_next_fit};
pub use sprite::{PackedSprite, SourceSprite};
