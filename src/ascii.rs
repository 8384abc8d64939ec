//! ASCII rendering of terrain grids for terminals and debug dumps.

use crate::terrain::{TerrainCategory, TerrainGrid};

/// Get ASCII character for a terrain category
pub fn category_char(category: TerrainCategory) -> char {
    match category {
        TerrainCategory::DeepWater => '~',
        TerrainCategory::ShallowWater => '-',
        TerrainCategory::Sand => '.',
        TerrainCategory::Grass => ',',
        TerrainCategory::Hills => 'n',
        TerrainCategory::Rock => '#',
        TerrainCategory::Mountain => '^',
    }
}

/// One line per row, each terminated by a newline.
pub fn render_ascii(grid: &TerrainGrid) -> String {
    let mut out = String::with_capacity((grid.width + 1) * grid.height);
    for row in grid.rows() {
        out.extend(row.iter().map(|&category| category_char(category)));
        out.push('\n');
    }
    out
}

pub fn legend() -> String {
    TerrainCategory::ALL
        .iter()
        .map(|&category| format!("{} = {}", category_char(category), category.name()))
        .collect::<Vec<_>>()
        .join("  ")
}
