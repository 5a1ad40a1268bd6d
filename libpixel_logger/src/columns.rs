// Mapping files are tab-separated text. Lines starting with '#' are comments and empty
// lines are skipped; everything else is a data row. All data rows must carry the same
// number of fields, and the rows are handed back transposed, one Vec per column.
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use super::error::ColumnParseError;

const COMMENT_MARKER: char = '#';
const FIELD_DELIMITER: char = '\t';

/// ColumnSet is a column-major view of a delimited text file.
///
/// Every column has the same length, column order matches field order in the source rows,
/// and row order within each column matches file order. The source path and the file line
/// of every data row are kept so that later conversions can point back at the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSet<T> {
    columns: Vec<Vec<T>>,
    origin: PathBuf,
    lines: Vec<usize>,
}

impl<T> Default for ColumnSet<T> {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            origin: PathBuf::new(),
            lines: Vec::new(),
        }
    }
}

impl<T> ColumnSet<T> {
    /// Number of columns (fields per data row)
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Number of data rows
    pub fn num_rows(&self) -> usize {
        self.lines.len()
    }

    /// True if the source had no data rows
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Get a column by index. Returns None if the index is out of bounds
    pub fn column(&self, index: usize) -> Option<&[T]> {
        self.columns.get(index).map(|col| col.as_slice())
    }

    pub fn columns(&self) -> &[Vec<T>] {
        &self.columns
    }

    pub fn into_columns(self) -> Vec<Vec<T>> {
        self.columns
    }

    /// The file the columns were read from
    pub fn origin(&self) -> &Path {
        &self.origin
    }

    /// 1-based file line of each data row
    pub fn lines(&self) -> &[usize] {
        &self.lines
    }

    /// Iterate back over the data in row order.
    ///
    /// Each item is the list of fields for one data row.
    pub fn rows(&self) -> impl Iterator<Item = Vec<&T>> + '_ {
        (0..self.num_rows()).map(move |row| self.columns.iter().map(|col| &col[row]).collect())
    }
}

impl ColumnSet<String> {
    /// Read a ColumnSet from any buffered reader.
    ///
    /// `origin` names the source in errors. Rows are collected once and the columns are then
    /// built by projecting each field index across the rows.
    pub fn from_reader<R: BufRead>(reader: R, origin: &Path) -> Result<Self, ColumnParseError> {
        let mut rows: Vec<Vec<String>> = Vec::new();
        let mut lines: Vec<usize> = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| ColumnParseError::IOError {
                path: origin.to_path_buf(),
                source: e,
            })?;
            if line.starts_with(COMMENT_MARKER) || line.is_empty() {
                continue;
            }

            let fields: Vec<String> = line.split(FIELD_DELIMITER).map(String::from).collect();
            if let Some(first) = rows.first() {
                if first.len() != fields.len() {
                    return Err(ColumnParseError::ShapeMismatch {
                        path: origin.to_path_buf(),
                        line: idx + 1,
                        expected: first.len(),
                        found: fields.len(),
                    });
                }
            }
            rows.push(fields);
            lines.push(idx + 1);
        }

        let n_columns = rows.first().map_or(0, |row| row.len());
        let mut columns: Vec<Vec<String>> = vec![Vec::with_capacity(rows.len()); n_columns];
        for row in rows {
            for (col, field) in columns.iter_mut().zip(row) {
                col.push(field);
            }
        }

        Ok(Self {
            columns,
            origin: origin.to_path_buf(),
            lines,
        })
    }

    /// Coerce every field into an integer (base 10).
    ///
    /// Whitespace around a field is ignored. The first field that fails to parse is reported
    /// with its file line and column index.
    pub fn to_ints(&self) -> Result<ColumnSet<i64>, ColumnParseError> {
        let mut columns = Vec::with_capacity(self.num_columns());
        for (col_idx, col) in self.columns.iter().enumerate() {
            let parsed = col
                .iter()
                .zip(self.lines.iter())
                .map(|(field, line)| {
                    field
                        .trim()
                        .parse::<i64>()
                        .map_err(|e| ColumnParseError::FormatError {
                            path: self.origin.clone(),
                            line: *line,
                            column: col_idx,
                            value: field.clone(),
                            source: e,
                        })
                })
                .collect::<Result<Vec<i64>, ColumnParseError>>()?;
            columns.push(parsed);
        }
        Ok(ColumnSet {
            columns,
            origin: self.origin.clone(),
            lines: self.lines.clone(),
        })
    }
}

/// Read the columns of a tab-separated file as strings.
///
/// Comment lines (starting with `#`) and blank lines are skipped. A file with no data rows
/// produces an empty ColumnSet.
pub fn parse_columns(path: &Path) -> Result<ColumnSet<String>, ColumnParseError> {
    let file = File::open(path).map_err(|e| ColumnParseError::IOError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let columns = ColumnSet::from_reader(BufReader::new(file), path)?;
    log::debug!(
        "Parsed {} columns x {} rows from {}",
        columns.num_columns(),
        columns.num_rows(),
        path.to_string_lossy()
    );
    Ok(columns)
}

/// Read the columns of a tab-separated file as integers.
///
/// See [`parse_columns`] for the line rules.
pub fn parse_columns_as_ints(path: &Path) -> Result<ColumnSet<i64>, ColumnParseError> {
    parse_columns(path)?.to_ints()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse_str(contents: &str) -> Result<ColumnSet<String>, ColumnParseError> {
        ColumnSet::from_reader(contents.as_bytes(), Path::new("map.txt"))
    }

    #[test]
    fn test_transpose_three_columns() {
        let columns = parse_str("1\ta\tx\n2\tb\ty\n3\tc\tz\n").unwrap();
        assert_eq!(columns.num_columns(), 3);
        assert_eq!(columns.num_rows(), 3);
        assert_eq!(columns.column(0).unwrap(), ["1", "2", "3"]);
        assert_eq!(columns.column(1).unwrap(), ["a", "b", "c"]);
        assert_eq!(columns.column(2).unwrap(), ["x", "y", "z"]);
        assert!(columns.column(3).is_none());
    }

    #[test]
    fn test_rows_reconstruct_source() {
        let data_rows = ["227\t280", "300\t650", "364\t1017"];
        let contents = format!("# header\n\n{}\n# trailer\n", data_rows.join("\n"));
        let columns = parse_str(&contents).unwrap();
        let rebuilt: Vec<String> = columns
            .rows()
            .map(|row| {
                row.iter()
                    .map(|field| field.as_str())
                    .collect::<Vec<&str>>()
                    .join("\t")
            })
            .collect();
        assert_eq!(rebuilt, data_rows);
    }

    #[test]
    fn test_comments_and_blanks_only() {
        let columns = parse_str("# pixel\twavelength\n\n#\n\n").unwrap();
        assert!(columns.is_empty());
        assert_eq!(columns.num_rows(), 0);
        assert_eq!(columns.num_columns(), 0);
    }

    #[test]
    fn test_crlf_and_missing_final_newline() {
        let columns = parse_str("# map\r\n1\t10\r\n2\t20").unwrap();
        assert_eq!(columns.column(0).unwrap(), ["1", "2"]);
        assert_eq!(columns.column(1).unwrap(), ["10", "20"]);
    }

    #[test]
    fn test_short_row_is_shape_mismatch() {
        let err = parse_str("# map\n1\t10\n2\n3\t30\n").unwrap_err();
        match err {
            ColumnParseError::ShapeMismatch {
                path,
                line,
                expected,
                found,
            } => {
                assert_eq!(path, Path::new("map.txt"));
                assert_eq!(line, 3);
                assert_eq!(expected, 2);
                assert_eq!(found, 1);
            }
            e => panic!("unexpected error: {e}"),
        }
    }

    #[test]
    fn test_long_row_is_shape_mismatch() {
        assert!(matches!(
            parse_str("1\t10\n2\t20\t99\n"),
            Err(ColumnParseError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_ints() {
        let columns = parse_str("227\t280\n364\t1017\n-4\t0\n")
            .unwrap()
            .to_ints()
            .unwrap();
        assert_eq!(columns.column(0).unwrap(), [227, 364, -4]);
        assert_eq!(columns.column(1).unwrap(), [280, 1017, 0]);
    }

    #[test]
    fn test_ints_ignore_padding() {
        let columns = parse_str("227\t280 \n 364\t1017\n")
            .unwrap()
            .to_ints()
            .unwrap();
        assert_eq!(columns.column(0).unwrap(), [227, 364]);
        assert_eq!(columns.column(1).unwrap(), [280, 1017]);
    }

    #[test]
    fn test_ints_format_error_names_field() {
        // Comment and blank line push the bad row down to line 5 of the file
        let err = parse_str("# map\n227\t280\n\n# more\n364\t10x7 \n")
            .unwrap()
            .to_ints()
            .unwrap_err();
        match err {
            ColumnParseError::FormatError {
                path,
                line,
                column,
                value,
                ..
            } => {
                assert_eq!(path, Path::new("map.txt"));
                assert_eq!(line, 5);
                assert_eq!(column, 1);
                assert_eq!(value, "10x7 ");
            }
            e => panic!("unexpected error: {e}"),
        }
    }

    #[test]
    fn test_data_row_lines() {
        let columns = parse_str("# map\n\n1\t10\n# gap\n2\t20\n").unwrap();
        assert_eq!(columns.lines(), [3, 5]);
        assert_eq!(columns.origin(), Path::new("map.txt"));
    }

    #[test]
    fn test_parse_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "# Pixel\tWavelength\n\n227\t280\n364\t1017\n").unwrap();
        let columns = parse_columns_as_ints(file.path()).unwrap();
        assert_eq!(
            columns.into_columns(),
            vec![vec![227, 364], vec![280, 1017]]
        );
    }

    #[test]
    fn test_parse_file_with_padded_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "227\t280 \n364\t1017\n").unwrap();
        let columns = parse_columns_as_ints(file.path()).unwrap();
        assert_eq!(
            columns.into_columns(),
            vec![vec![227, 364], vec![280, 1017]]
        );
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no_such_map.txt");
        let err = parse_columns(&missing).unwrap_err();
        assert!(matches!(err, ColumnParseError::IOError { .. }));
        assert!(err.to_string().contains("no_such_map.txt"));
    }

    #[test]
    fn test_file_errors_name_the_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "227\t280\n364\tabc\n").unwrap();
        let err = parse_columns_as_ints(file.path()).unwrap_err();
        let message = err.to_string();
        let file_name = file.path().file_name().unwrap().to_string_lossy();
        assert!(message.contains(file_name.as_ref()));
        assert!(message.contains("line 2"));
    }
}
