use crate::noise_field::normalize_field;
use crate::terrain::HeightField;

/// How far below the blended value the outermost cells are pushed.
const EDGE_DEPRESSION: f64 = 0.2;

/// Pull land toward the map center with a radial falloff, then renormalize.
///
/// Each cell's distance from the center is normalized to 1 at the farthest
/// corner, the falloff is `distance²`, and the blend is
/// `old * (1 - falloff) - falloff * 0.2`. No randomness is involved.
pub fn apply_continent_mask(field: &mut HeightField) {
    let center_x = (field.width / 2) as f64;
    let center_y = (field.height / 2) as f64;
    let max_distance = center_x.hypot(center_y);

    for (x, y, value) in field.iter_mut() {
        let distance = if max_distance > 0.0 {
            (x as f64 - center_x).hypot(y as f64 - center_y) / max_distance
        } else {
            0.0
        };
        let edge_falloff = distance * distance;
        *value = *value * (1.0 - edge_falloff) - edge_falloff * EDGE_DEPRESSION;
    }

    normalize_field(field);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_input_peaks_at_center() {
        let mut field = HeightField::new_with(11, 11, 1.0);
        apply_continent_mask(&mut field);

        assert_eq!(*field.get(5, 5), 1.0);
        assert_eq!(*field.get(0, 0), 0.0);
        assert_eq!(*field.get(10, 10), 0.0);
        assert!(*field.get(5, 2) > *field.get(5, 0));
        assert!(field.values().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn test_mask_is_deterministic() {
        let base = HeightField::from_fn(9, 7, |x, y| ((x * 7 + y * 3) % 5) as f64 / 4.0);
        let mut a = base.clone();
        let mut b = base;
        apply_continent_mask(&mut a);
        apply_continent_mask(&mut b);
        assert_eq!(a, b);
    }

    #[test]
    fn test_single_cell_map() {
        let mut field = HeightField::new_with(1, 1, 0.3);
        apply_continent_mask(&mut field);
        assert_eq!(*field.get(0, 0), 0.5);
    }
}
