use std::fs;
use std::path::Path;

use anyhow::Result;

use crate::atlas::Atlas;
use crate::error::TexpackError;
use crate::sprite::PackedSprite;

/// Write a Sparrow/Starling `TextureAtlas` XML descriptor
pub fn write_xml(atlas: &Atlas, path: &Path, image_name: &str) -> Result<()> {
    let content = render_xml(atlas, image_name);

    fs::write(path, content).map_err(|e| TexpackError::OutputWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

/// Render the XML descriptor; one `SubTexture` per sprite in atlas order
pub fn render_xml(atlas: &Atlas, image_name: &str) -> String {
    let mut s = String::new();
    s.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    s.push_str(&format!(
        "<TextureAtlas imagePath=\"{}\">\n",
        xml_escape(image_name)
    ));
    for sprite in &atlas.sprites {
        s.push_str(&sub_texture(sprite));
    }
    s.push_str("</TextureAtlas>\n");
    s
}

fn sub_texture(sprite: &PackedSprite) -> String {
    let mut s = format!(
        "    <SubTexture name=\"{}\" x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"",
        xml_escape(&sprite.name),
        sprite.x,
        sprite.y,
        sprite.width,
        sprite.height
    );

    let trim = &sprite.trim_info;
    if trim.trimmed {
        // Sparrow frames are positioned relative to the trimmed region
        s.push_str(&format!(
            " frameX=\"{}\" frameY=\"{}\" frameWidth=\"{}\" frameHeight=\"{}\"",
            -i64::from(trim.offset_x),
            -i64::from(trim.offset_y),
            trim.frame_width,
            trim.frame_height
        ));
    }

    s.push_str("/>\n");
    s
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
