use std::path::Path;

use fxhash::FxHashMap;

use super::columns::{parse_columns_as_ints, ColumnSet};
use super::error::PixelMapError;

const PIXEL_COLUMN: usize = 0;
const VALUE_COLUMN: usize = 1;
const MAP_COLUMNS: usize = 2;

/// ValidRange is the inclusive span of pixels that should be logged.
///
/// The bounds are the first and last pixel of the map file in file order, not the numeric
/// extremes. An unsorted map file can therefore produce a range with `start > stop`, which
/// contains no pixels at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidRange {
    pub start: i64,
    pub stop: i64,
}

impl ValidRange {
    pub fn new(start: i64, stop: i64) -> Self {
        Self { start, stop }
    }

    pub fn contains(&self, pixel: i64) -> bool {
        self.start <= pixel && pixel <= self.stop
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.stop
    }

    /// Number of pixel numbers covered by the range. Saturates at `usize::MAX`.
    pub fn len(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        let span = self.stop as i128 - self.start as i128 + 1;
        usize::try_from(span).unwrap_or(usize::MAX)
    }

    /// Number of in-range pixels that a frame of `num_pixels` pixels cannot supply.
    ///
    /// Frame pixels are numbered from 1, so a frame only reaches pixel `num_pixels`. This is
    /// the number of fields a logged row comes up short by.
    pub fn missing_pixels(&self, num_pixels: usize) -> usize {
        if self.is_empty() {
            return 0;
        }
        let last_available = i64::try_from(num_pixels).unwrap_or(i64::MAX);
        if last_available >= self.stop {
            0
        } else if last_available < self.start {
            self.len()
        } else {
            let short_by = self.stop as i128 - last_available as i128;
            usize::try_from(short_by).unwrap_or(usize::MAX)
        }
    }
}

/// PixelMap maps hardware pixel numbers to their calibrated value (typically wavelength in nm).
///
/// Duplicate pixels in the source collapse to the last value given.
#[derive(Debug, Clone, Default)]
pub struct PixelMap {
    map: FxHashMap<i64, i64>,
}

impl PixelMap {
    /// Build the map and the valid range from a two column (pixel, value) ColumnSet
    pub fn from_columns(columns: &ColumnSet<i64>) -> Result<(Self, ValidRange), PixelMapError> {
        if columns.is_empty() {
            return Err(PixelMapError::NoDataRows(columns.origin().to_path_buf()));
        }
        if columns.num_columns() != MAP_COLUMNS {
            return Err(PixelMapError::ShapeMismatch {
                path: columns.origin().to_path_buf(),
                found: columns.num_columns(),
            });
        }

        let pixels = &columns.columns()[PIXEL_COLUMN];
        let values = &columns.columns()[VALUE_COLUMN];

        let mut pm = PixelMap::default();
        for (pixel, value) in pixels.iter().zip(values.iter()) {
            if let Some(previous) = pm.map.insert(*pixel, *value) {
                log::debug!("Pixel {pixel} appears more than once in map; {previous} replaced by {value}");
            }
        }

        // The ColumnSet is non-empty here, so both ends exist
        let range = ValidRange::new(pixels[0], pixels[pixels.len() - 1]);
        if range.is_empty() {
            log::warn!(
                "Map file starts at pixel {} but ends at pixel {}; no pixels will be logged. Is the map sorted by pixel?",
                range.start,
                range.stop
            );
        }

        Ok((pm, range))
    }

    /// Read a map file from disk
    pub fn new(path: &Path) -> Result<(Self, ValidRange), PixelMapError> {
        let columns = parse_columns_as_ints(path)?;
        Self::from_columns(&columns)
    }

    /// Get the value mapped to a pixel.
    ///
    /// Returns None if the pixel is not in the map
    pub fn get(&self, pixel: i64) -> Option<i64> {
        self.map.get(&pixel).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Mapped values for the pixels inside the range, sorted by pixel number
    pub fn values_in_range(&self, range: &ValidRange) -> Vec<i64> {
        let mut pixels: Vec<i64> = self
            .map
            .keys()
            .copied()
            .filter(|pixel| range.contains(*pixel))
            .collect();
        pixels.sort_unstable();
        pixels.iter().map(|pixel| self.map[pixel]).collect()
    }
}

/// Build the pixel map and valid range from a parsed integer ColumnSet
pub fn build_mapping(columns: &ColumnSet<i64>) -> Result<(PixelMap, ValidRange), PixelMapError> {
    PixelMap::from_columns(columns)
}

//Unit tests
#[cfg(test)]
mod tests {
    use super::*;

    fn columns_from(contents: &str) -> ColumnSet<i64> {
        ColumnSet::from_reader(contents.as_bytes(), Path::new("map.txt"))
            .unwrap()
            .to_ints()
            .unwrap()
    }

    #[test]
    fn test_map_and_range() {
        let (map, range) = build_mapping(&columns_from("227\t280\n364\t1017\n")).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(227), Some(280));
        assert_eq!(map.get(364), Some(1017));
        assert_eq!(map.get(300), None);
        assert_eq!(range, ValidRange::new(227, 364));
        assert!(range.contains(280));
        assert!(range.contains(227));
        assert!(range.contains(364));
        assert!(!range.contains(10));
        assert!(!range.contains(9999));
    }

    #[test]
    fn test_range_uses_file_order() {
        let (_, range) = build_mapping(&columns_from("300\t700\n100\t300\n200\t500\n")).unwrap();
        assert_eq!(range, ValidRange::new(300, 200));
        assert!(range.is_empty());
        assert_eq!(range.len(), 0);
        assert!(!range.contains(250));
    }

    #[test]
    fn test_duplicate_pixel_last_wins() {
        let (map, _) = build_mapping(&columns_from("1\t10\n2\t20\n2\t25\n3\t30\n")).unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(map.get(2), Some(25));
    }

    #[test]
    fn test_wrong_column_count() {
        let err = build_mapping(&columns_from("1\t10\t100\n")).unwrap_err();
        assert!(matches!(err, PixelMapError::ShapeMismatch { found: 3, .. }));
        assert!(err.to_string().contains("map.txt"));
    }

    #[test]
    fn test_empty_columns() {
        let err = build_mapping(&columns_from("# nothing here\n")).unwrap_err();
        assert!(matches!(err, PixelMapError::NoDataRows(_)));
        assert!(err.to_string().contains("map.txt"));
    }

    #[test]
    fn test_values_in_range_sorted_by_pixel() {
        // Range is 1..=5; pixel 9 sits outside it
        let (map, range) =
            build_mapping(&columns_from("1\t100\n4\t400\n9\t900\n3\t300\n5\t500\n")).unwrap();
        assert_eq!(range, ValidRange::new(1, 5));
        assert_eq!(map.values_in_range(&range), vec![100, 300, 400, 500]);
    }

    #[test]
    fn test_missing_pixels() {
        let range = ValidRange::new(227, 364);
        assert_eq!(range.len(), 138);
        assert_eq!(range.missing_pixels(400), 0);
        assert_eq!(range.missing_pixels(364), 0);
        assert_eq!(range.missing_pixels(300), 64);
        assert_eq!(range.missing_pixels(100), 138);
        assert_eq!(ValidRange::new(5, 1).missing_pixels(0), 0);
    }

    #[test]
    fn test_extreme_bounds_do_not_overflow() {
        let range = ValidRange::new(i64::MIN, i64::MAX);
        assert_eq!(range.len(), usize::MAX);
        assert!(range.contains(0));
        assert_eq!(range.missing_pixels(0), i64::MAX as usize);
        assert_eq!(range.missing_pixels(usize::MAX), 0);

        let wide = ValidRange::new(-5, i64::MAX);
        assert_eq!(
            wide.missing_pixels(10),
            usize::try_from(i64::MAX as i128 - 10).unwrap()
        );
    }
}
