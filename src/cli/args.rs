use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::packing::{MAX_BORDER, PackMode};

#[derive(Parser, Debug)]
#[command(name = "texpack")]
#[command(version, about = "Texture atlas packer", long_about = None)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Output a Sparrow/Starling TextureAtlas XML descriptor
    Xml(CommonArgs),
    /// Output a JSON descriptor
    Json(CommonArgs),
}

impl Command {
    pub fn args(&self) -> &CommonArgs {
        match self {
            Command::Xml(args) | Command::Json(args) => args,
        }
    }

    pub fn format(&self) -> DescriptorFormat {
        match self {
            Command::Xml(_) => DescriptorFormat::Xml,
            Command::Json(_) => DescriptorFormat::Json,
        }
    }
}

/// Descriptor file written next to the atlas image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorFormat {
    Xml,
    Json,
}

impl DescriptorFormat {
    /// Descriptor path used when neither CLI nor config names one
    pub fn default_path(self) -> PathBuf {
        match self {
            DescriptorFormat::Xml => PathBuf::from("out.xml"),
            DescriptorFormat::Json => PathBuf::from("out.json"),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Input image files, directories or wildcards [default: ./*.png]
    pub input: Vec<PathBuf>,

    /// Load settings from a .texpack config file
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output atlas PNG [default: out.png]
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output descriptor file [default: out.xml or out.json]
    #[arg(short = 'x', long, value_name = "FILE")]
    pub descriptor: Option<PathBuf>,

    /// Placement algorithm [default: blf]
    #[arg(short, long, value_enum)]
    pub mode: Option<PackMode>,

    /// Gap in pixels kept around every image [default: 2]
    #[arg(
        short,
        long,
        value_name = "NUM",
        value_parser = clap::value_parser!(u32).range(..=i64::from(MAX_BORDER))
    )]
    pub border: Option<u32>,

    /// Trim transparent margins from each image before packing
    #[arg(short, long)]
    pub trim: bool,

    /// Pack images in input order instead of tallest first
    #[arg(long, alias = "sortoff")]
    pub sort_off: bool,

    /// Output RGB instead of RGBA (opaque atlas)
    #[arg(long)]
    pub opaque: bool,

    /// Compress PNG output (0-6 or 'max'). Default level is 2 if flag is present without value.
    #[arg(long, value_name = "LEVEL", default_missing_value = "2", num_args = 0..=1)]
    pub compress: Option<CompressionLevel>,

    /// Log every placement and canvas growth
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// PNG compression level (0-6 or max)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionLevel {
    /// Optimization level 0-6
    Level(u8),
    /// Maximum compression
    Max,
}

impl std::str::FromStr for CompressionLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("max") {
            Ok(CompressionLevel::Max)
        } else {
            s.parse::<u8>()
                .map_err(|_e| format!("invalid compression level: {}", s))
                .and_then(|n| {
                    if n <= 6 {
                        Ok(CompressionLevel::Level(n))
                    } else {
                        Err(format!("compression level must be 0-6 or 'max', got {}", n))
                    }
                })
        }
    }
}

impl Default for CompressionLevel {
    fn default() -> Self {
        CompressionLevel::Level(2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_xml_defaults() {
        let cli = CliArgs::try_parse_from(["texpack", "xml", "a.png", "b.png"]).unwrap();

        assert_eq!(cli.command.format(), DescriptorFormat::Xml);
        let args = cli.command.args();
        assert_eq!(args.input, vec![PathBuf::from("a.png"), PathBuf::from("b.png")]);
        assert_eq!(args.mode, None);
        assert_eq!(args.border, None);
        assert!(!args.trim);
        assert!(!args.sort_off);
        assert_eq!(args.compress, None);
    }

    #[test]
    fn test_parse_short_flags() {
        let cli = CliArgs::try_parse_from([
            "texpack", "json", "-m", "next-fit", "-b", "0", "-t", "-o", "atlas.png", "-x",
            "atlas.json", "--sortoff", "sprites",
        ])
        .unwrap();

        assert_eq!(cli.command.format(), DescriptorFormat::Json);
        let args = cli.command.args();
        assert_eq!(args.mode, Some(PackMode::NextFit));
        assert_eq!(args.border, Some(0));
        assert!(args.trim);
        assert!(args.sort_off);
        assert_eq!(args.output, Some(PathBuf::from("atlas.png")));
        assert_eq!(args.descriptor, Some(PathBuf::from("atlas.json")));
    }

    #[test]
    fn test_border_is_bounded() {
        let max = MAX_BORDER.to_string();
        let cli = CliArgs::try_parse_from(["texpack", "xml", "-b", &max, "a.png"]).unwrap();
        assert_eq!(cli.command.args().border, Some(MAX_BORDER));

        let over = (MAX_BORDER + 1).to_string();
        assert!(CliArgs::try_parse_from(["texpack", "xml", "-b", &over, "a.png"]).is_err());
        assert!(CliArgs::try_parse_from(["texpack", "xml", "-b", "3000000000", "a.png"]).is_err());
    }

    #[test]
    fn test_mode_accepts_legacy_name() {
        let cli = CliArgs::try_parse_from(["texpack", "xml", "-m", "nextfit"]).unwrap();
        assert_eq!(cli.command.args().mode, Some(PackMode::NextFit));
    }

    #[test]
    fn test_compress_without_value_uses_default_level() {
        let cli = CliArgs::try_parse_from(["texpack", "xml", "--compress"]).unwrap();
        assert_eq!(cli.command.args().compress, Some(CompressionLevel::Level(2)));
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(CliArgs::try_parse_from(["texpack", "xml", "-v", "-q"]).is_err());
    }

    #[test]
    fn test_compression_level_from_str() {
        assert_eq!("max".parse::<CompressionLevel>(), Ok(CompressionLevel::Max));
        assert_eq!("4".parse::<CompressionLevel>(), Ok(CompressionLevel::Level(4)));
        assert!("7".parse::<CompressionLevel>().is_err());
        assert!("fast".parse::<CompressionLevel>().is_err());
    }
}
