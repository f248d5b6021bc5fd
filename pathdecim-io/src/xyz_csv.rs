//! XYZ/CSV point list support
//!
//! Plain text polylines, one control point per line:
//! - 3 columns (`x y z`) or 4 columns (`x y z w`, `w` being the NURBS weight)
//! - delimiter auto-detected from the first data line (comma, space, tab, semicolon)
//! - an optional header line of column names
//! - `#` starts a comment line
//! - a blank line ends the current spline and starts the next one

use crate::error::IoError;
use pathdecim_core::{ControlPoint, HomogeneousPoint, Result, Spline};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Supported delimiters for XYZ/CSV files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Space,
    Tab,
    Semicolon,
}

impl Delimiter {
    pub fn as_char(&self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Space => ' ',
            Delimiter::Tab => '\t',
            Delimiter::Semicolon => ';',
        }
    }

    /// Detect delimiter from a line of text
    pub fn detect_from_line(line: &str) -> Option<Self> {
        let line = line.trim();
        let counts = [
            (line.matches(' ').count(), Delimiter::Space),
            (line.matches('\t').count(), Delimiter::Tab),
            (line.matches(';').count(), Delimiter::Semicolon),
            (line.matches(',').count(), Delimiter::Comma),
        ];

        // max_by_key keeps the last of equal counts, so explicit separators win ties
        counts
            .iter()
            .filter(|(count, _)| *count > 0)
            .max_by_key(|(count, _)| *count)
            .map(|(_, delimiter)| *delimiter)
    }

    fn split<'a>(&self, line: &'a str) -> Vec<&'a str> {
        match self {
            Delimiter::Space | Delimiter::Tab => line.split_whitespace().collect(),
            _ => line.split(self.as_char()).map(str::trim).collect(),
        }
    }
}

/// XYZ/CSV reader
pub struct XyzCsvReader;

impl XyzCsvReader {
    /// Read every spline in a point list file
    pub fn read_splines<P: AsRef<Path>>(path: P) -> Result<Vec<Spline>> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(IoError::FileNotFound {
                path: path.display().to_string(),
            }
            .into());
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse_splines(&content)
    }

    /// Parse point list text into poly splines
    pub fn parse_splines(content: &str) -> Result<Vec<Spline>> {
        let mut splines = Vec::new();
        let mut current: Vec<HomogeneousPoint> = Vec::new();
        let mut delimiter = None;
        let mut seen_data = false;

        for (i, raw) in content.lines().enumerate() {
            let line_no = i + 1;
            let line = raw.trim();

            if line.starts_with('#') {
                continue;
            }
            if line.is_empty() {
                if !current.is_empty() {
                    splines.push(Spline::Poly {
                        points: std::mem::take(&mut current),
                    });
                }
                continue;
            }

            let delim = match delimiter {
                Some(d) => d,
                None => {
                    let d = Delimiter::detect_from_line(line).ok_or_else(|| IoError::ParseError {
                        line: line_no,
                        message: format!("cannot detect delimiter in '{}'", line),
                    })?;
                    delimiter = Some(d);
                    d
                }
            };

            if !seen_data && Self::is_header_line(line, delim) {
                log::debug!("skipping header line {}: {}", line_no, line);
                seen_data = true;
                continue;
            }
            seen_data = true;

            current.push(Self::parse_line(line, delim, line_no)?);
        }

        if !current.is_empty() {
            splines.push(Spline::Poly { points: current });
        }
        Ok(splines)
    }

    /// A header has no numeric column at all
    fn is_header_line(line: &str, delimiter: Delimiter) -> bool {
        delimiter
            .split(line)
            .iter()
            .all(|part| part.parse::<f32>().is_err())
    }

    fn parse_line(line: &str, delimiter: Delimiter, line_no: usize) -> Result<HomogeneousPoint> {
        let parts = delimiter.split(line);
        if parts.len() != 3 && parts.len() != 4 {
            return Err(IoError::ParseError {
                line: line_no,
                message: format!("expected 3 or 4 columns, found {}", parts.len()),
            }
            .into());
        }

        let mut values = [0.0f32, 0.0, 0.0, 1.0];
        for (slot, part) in values.iter_mut().zip(parts.iter()) {
            *slot = part.parse::<f32>().map_err(|e| IoError::ParseError {
                line: line_no,
                message: format!("'{}': {}", part, e),
            })?;
        }

        Ok(HomogeneousPoint::with_weight(values[0], values[1], values[2], values[3]))
    }
}

/// Options for writing XYZ/CSV files
#[derive(Debug, Clone)]
pub struct XyzCsvWriteOptions {
    pub delimiter: Delimiter,
    pub include_header: bool,
}

impl XyzCsvWriteOptions {
    /// Space separated, no header
    pub fn xyz() -> Self {
        Self {
            delimiter: Delimiter::Space,
            include_header: false,
        }
    }

    /// Comma separated with a header line
    pub fn csv_with_header() -> Self {
        Self {
            delimiter: Delimiter::Comma,
            include_header: true,
        }
    }
}

impl Default for XyzCsvWriteOptions {
    fn default() -> Self {
        Self::xyz()
    }
}

/// XYZ/CSV writer
pub struct XyzCsvWriter;

impl XyzCsvWriter {
    /// Write splines to a point list file
    pub fn write_splines<P: AsRef<Path>>(
        splines: &[Spline],
        path: P,
        options: &XyzCsvWriteOptions,
    ) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(Self::format_splines(splines, options).as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Render splines as point list text.
    ///
    /// Weights are written only when some point has a weight other than 1.
    /// Bezier handles cannot be represented and are dropped. Empty splines
    /// have no representation either and are skipped.
    pub fn format_splines(splines: &[Spline], options: &XyzCsvWriteOptions) -> String {
        let with_weight = splines.iter().any(|s| match s {
            Spline::Poly { points } | Spline::Nurbs { points } => {
                points.iter().any(|p| p.weight() != 1.0)
            }
            Spline::Bezier { .. } => false,
        });
        if splines.iter().any(|s| s.kind().has_handles()) {
            log::warn!("Bezier handles are not stored in point lists and will be lost");
        }

        let sep = options.delimiter.as_char().to_string();
        let mut out = String::new();
        if options.include_header {
            let names: &[&str] = if with_weight { &["x", "y", "z", "w"] } else { &["x", "y", "z"] };
            out.push_str(&names.join(&sep));
            out.push('\n');
        }

        for (i, spline) in splines.iter().filter(|s| !s.is_empty()).enumerate() {
            if i > 0 {
                out.push('\n');
            }
            for row in Self::rows(spline, with_weight) {
                let cols: Vec<String> = row.iter().map(|v| v.to_string()).collect();
                out.push_str(&cols.join(&sep));
                out.push('\n');
            }
        }
        out
    }

    fn rows(spline: &Spline, with_weight: bool) -> Vec<Vec<f32>> {
        match spline {
            Spline::Poly { points } | Spline::Nurbs { points } => points
                .iter()
                .map(|p| {
                    let mut row = vec![p.co.x, p.co.y, p.co.z];
                    if with_weight {
                        row.push(p.co.w);
                    }
                    row
                })
                .collect(),
            Spline::Bezier { points } => points
                .iter()
                .map(|p| {
                    let pos = p.position();
                    let mut row = vec![pos.x, pos.y, pos.z];
                    if with_weight {
                        row.push(1.0);
                    }
                    row
                })
                .collect(),
        }
    }
}
