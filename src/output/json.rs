use std::fs;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::atlas::Atlas;
use crate::error::TexpackError;
use crate::sprite::PackedSprite;

#[derive(Serialize)]
struct JsonOutput {
    meta: Meta,
    image: String,
    size: Size,
    sprites: Vec<JsonSprite>,
}

#[derive(Serialize)]
struct Meta {
    app: &'static str,
    version: &'static str,
    format: &'static str,
}

#[derive(Serialize)]
struct Size {
    w: u32,
    h: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonSprite {
    name: String,
    frame: Frame,
    trimmed: bool,
    sprite_source_size: Frame,
    source_size: Size,
}

#[derive(Serialize)]
struct Frame {
    x: u32,
    y: u32,
    w: u32,
    h: u32,
}

/// Write JSON metadata file
pub fn write_json(atlas: &Atlas, path: &Path, image_name: &str) -> Result<()> {
    let content = render_json(atlas, image_name)?;

    fs::write(path, content).map_err(|e| TexpackError::OutputWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

/// Render the JSON descriptor
pub fn render_json(atlas: &Atlas, image_name: &str) -> Result<String> {
    let output = JsonOutput {
        meta: Meta {
            app: "texpack",
            version: env!("CARGO_PKG_VERSION"),
            format: "rgba8888",
        },
        image: image_name.to_string(),
        size: Size {
            w: atlas.width,
            h: atlas.height,
        },
        sprites: atlas.sprites.iter().map(sprite_to_json).collect(),
    };

    Ok(serde_json::to_string_pretty(&output)?)
}

fn sprite_to_json(sprite: &PackedSprite) -> JsonSprite {
    let trim = &sprite.trim_info;

    JsonSprite {
        name: sprite.name.clone(),
        frame: Frame {
            x: sprite.x,
            y: sprite.y,
            w: sprite.width,
            h: sprite.height,
        },
        trimmed: trim.trimmed,
        sprite_source_size: Frame {
            x: trim.offset_x,
            y: trim.offset_y,
            w: sprite.width,
            h: sprite.height,
        },
        source_size: Size {
            w: trim.frame_width,
            h: trim.frame_height,
        },
    }
}
