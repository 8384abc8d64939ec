//! PNG and JSON export of generated terrain.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use image::{ImageBuffer, Rgb, RgbImage};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, TerrainError};
use crate::terrain::{HeightField, TerrainCategory, TerrainGrid};
use crate::tiles::{TerrainTile, TileLayer, TileMap};

/// Display color for a category.
pub fn category_color(category: TerrainCategory) -> [u8; 3] {
    match category {
        TerrainCategory::DeepWater => [20, 50, 120],
        TerrainCategory::ShallowWater => [50, 110, 180],
        TerrainCategory::Sand => [220, 205, 140],
        TerrainCategory::Grass => [90, 160, 70],
        TerrainCategory::Hills => [120, 130, 70],
        TerrainCategory::Rock => [125, 115, 105],
        TerrainCategory::Mountain => [240, 240, 245],
    }
}

pub fn terrain_image(grid: &TerrainGrid) -> RgbImage {
    let mut img: RgbImage = ImageBuffer::new(grid.width as u32, grid.height as u32);
    for (x, y, &category) in grid.iter() {
        img.put_pixel(x as u32, y as u32, Rgb(category_color(category)));
    }
    img
}

/// Export a terrain grid as a PNG, one pixel per cell.
pub fn export_terrain_png(grid: &TerrainGrid, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    terrain_image(grid).save(path)?;
    info!(path = %path.display(), "exported terrain image");
    Ok(())
}

/// Export a [0, 1] field using the Spectral palette.
pub fn export_field_png(field: &HeightField, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut img: RgbImage = ImageBuffer::new(field.width as u32, field.height as u32);
    for (x, y, &value) in field.iter() {
        img.put_pixel(x as u32, y as u32, Rgb(spectral_colormap(value)));
    }
    img.save(path)?;
    info!(path = %path.display(), "exported field image");
    Ok(())
}

/// Stops of the matplotlib "Spectral" palette, low to high.
const SPECTRAL_STOPS: [[f64; 3]; 11] = [
    [0.37, 0.31, 0.64],
    [0.20, 0.53, 0.74],
    [0.40, 0.76, 0.65],
    [0.67, 0.87, 0.64],
    [0.90, 0.96, 0.60],
    [1.00, 1.00, 0.75],
    [1.00, 0.88, 0.55],
    [0.99, 0.68, 0.38],
    [0.96, 0.43, 0.26],
    [0.84, 0.24, 0.31],
    [0.62, 0.00, 0.26],
];

fn spectral_colormap(t: f64) -> [u8; 3] {
    let last = SPECTRAL_STOPS.len() - 1;
    let pos = t.clamp(0.0, 1.0) * last as f64;
    let lower = (pos as usize).min(last - 1);
    let frac = pos - lower as f64;

    let (from, to) = (SPECTRAL_STOPS[lower], SPECTRAL_STOPS[lower + 1]);
    std::array::from_fn(|i| ((from[i] + (to[i] - from[i]) * frac) * 255.0).round() as u8)
}

/// On-disk shape of a tile layer. Missing tiles are simply not listed.
#[derive(Serialize, Deserialize)]
struct TileLayerRecord {
    width: usize,
    height: usize,
    tiles: Vec<TerrainTile>,
}

pub fn write_tiles_json<W: Write>(layer: &TileLayer, writer: W) -> Result<()> {
    let record = TileLayerRecord {
        width: layer.width(),
        height: layer.height(),
        tiles: layer.tiles().cloned().collect(),
    };
    serde_json::to_writer_pretty(writer, &record)?;
    Ok(())
}

/// Rebuild a layer from JSON. Tiles positioned outside the declared size
/// are rejected.
pub fn read_tiles_json<R: Read>(reader: R) -> Result<TileLayer> {
    let record: TileLayerRecord = serde_json::from_reader(reader)?;
    let mut layer = TileLayer::empty(record.width, record.height);
    for tile in record.tiles {
        if let Err(tile) = layer.insert(tile) {
            let (x, y) = tile.position;
            warn!(x, y, "tile outside map bounds");
            return Err(TerrainError::TileOutOfBounds {
                x,
                y,
                width: record.width,
                height: record.height,
            });
        }
    }
    Ok(layer)
}

pub fn save_tiles_json(layer: &TileLayer, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_tiles_json(layer, &mut writer)?;
    writer.flush()?;
    info!(path = %path.display(), "exported tile layer");
    Ok(())
}

pub fn load_tiles_json(path: impl AsRef<Path>) -> Result<TileLayer> {
    read_tiles_json(BufReader::new(File::open(path)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::create_terrain_transitions;

    #[test]
    fn test_terrain_image_colors() {
        let mut grid = TerrainGrid::new_with(2, 2, TerrainCategory::Grass);
        grid.set(1, 0, TerrainCategory::DeepWater);
        let img = terrain_image(&grid);
        assert_eq!(img.dimensions(), (2, 2));
        assert_eq!(img.get_pixel(1, 0).0, category_color(TerrainCategory::DeepWater));
        assert_eq!(img.get_pixel(0, 1).0, category_color(TerrainCategory::Grass));
    }

    #[test]
    fn test_spectral_endpoints() {
        assert_eq!(spectral_colormap(0.0), [94, 79, 163]);
        assert_eq!(spectral_colormap(1.0), [158, 0, 66]);
    }

    #[test]
    fn test_tiles_json_shape() {
        let mut grid = TerrainGrid::new_with(2, 1, TerrainCategory::Sand);
        grid.set(1, 0, TerrainCategory::Rock);
        let mut layer = TileLayer::from_grid(&grid);
        create_terrain_transitions(&mut layer);

        let mut buffer = Vec::new();
        write_tiles_json(&layer, &mut buffer).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["width"], 2);
        assert_eq!(value["tiles"][1]["tile_type"], "rock");
        assert_eq!(value["tiles"][1]["position"], serde_json::json!([1, 0]));

        let restored = read_tiles_json(buffer.as_slice()).unwrap();
        assert_eq!(restored, layer);
    }

    #[test]
    fn test_tiles_json_rejects_out_of_bounds() {
        let json = r#"{ "width": 1, "height": 1, "tiles": [
            { "tile_type": "grass", "position": [3, 0] }
        ] }"#;
        assert!(matches!(
            read_tiles_json(json.as_bytes()),
            Err(TerrainError::TileOutOfBounds { x: 3, y: 0, .. })
        ));
    }

    #[test]
    fn test_loaded_layer_with_gaps() {
        let json = r#"{ "width": 2, "height": 2, "tiles": [
            { "tile_type": "grass", "position": [0, 0] },
            { "tile_type": "grass", "position": [1, 1] }
        ] }"#;
        let mut layer = read_tiles_json(json.as_bytes()).unwrap();
        assert_eq!(create_terrain_transitions(&mut layer), 2);
        assert_eq!(layer.get_tile(0, 0).unwrap().transition_bitmask, 0b0000_1000);
        assert_eq!(layer.get_tile(1, 1).unwrap().transition_bitmask, 0b1000_0000);
    }

    #[test]
    fn test_save_and_load_tiles_file() {
        let mut grid = TerrainGrid::new_with(3, 2, TerrainCategory::Hills);
        grid.set(0, 1, TerrainCategory::ShallowWater);
        let mut layer = TileLayer::from_grid(&grid);
        create_terrain_transitions(&mut layer);

        let path = std::env::temp_dir().join(format!("terrain_tiles_{}.json", std::process::id()));
        save_tiles_json(&layer, &path).unwrap();
        let loaded = load_tiles_json(&path);
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded.unwrap(), layer);

        assert!(matches!(load_tiles_json(&path), Err(TerrainError::Io(_))));
    }
}
