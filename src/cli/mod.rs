mod args;

pub use args::{CliArgs, Command, CommonArgs, CompressionLevel, DescriptorFormat};
pub use crate::packing::PackMode;
