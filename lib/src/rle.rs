//! Reading and writing patterns in
//! [RLE](https://conwaylife.com/wiki/Run_Length_Encoded) format.
//!
//! ```text
//! #N Glider
//! x = 3, y = 3, rule = B3/S23
//! bob$2bo$3o!
//! ```
//!
//! * Lines starting with `#` are comments;
//! * The line starting with `x` gives the width and height;
//! * Other lines contain runs: an optional count followed by a tag,
//!   `o` for living cells, `b` for dead cells, `$` for the end of a row
//!   and `!` for the end of the pattern.

use crate::{cells::State, error::Error};
use log::{debug, warn};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximal length of a line written by [`Pattern::to_rle`].
const LINE_WIDTH: usize = 70;

/// A rectangular two-state pattern.
///
/// Cells are stored row by row, in the same way as in a
/// [`World`](crate::World).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawPattern"))]
pub struct Pattern {
    width: usize,
    height: usize,
    cells: Vec<u8>,
    rule: Option<String>,
}

/// A pattern as it comes from a deserializer, before its size is checked.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawPattern {
    width: usize,
    height: usize,
    cells: Vec<u8>,
    rule: Option<String>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawPattern> for Pattern {
    type Error = Error;

    fn try_from(raw: RawPattern) -> Result<Self, Self::Error> {
        if raw.width.checked_mul(raw.height) != Some(raw.cells.len()) {
            return Err(Error::InvalidPatternSize {
                width: raw.width,
                height: raw.height,
                cells: raw.cells.len(),
            });
        }
        let pattern = Pattern::new(raw.width, raw.height, raw.cells);
        Ok(Pattern {
            rule: raw.rule,
            ..pattern
        })
    }
}

impl Pattern {
    /// Creates a pattern from its cells.
    ///
    /// `cells` is resized to `width * height`, and every nonzero value
    /// becomes `1`.
    ///
    /// # Panics
    ///
    /// Panics if `width * height` overflows `usize`.
    pub fn new(width: usize, height: usize, mut cells: Vec<u8>) -> Self {
        let size = width
            .checked_mul(height)
            .unwrap_or_else(|| panic!("a {}x{} pattern is too large", width, height));
        cells.resize(size, 0);
        for cell in cells.iter_mut() {
            *cell = u8::from(State::from_u8(*cell));
        }
        Pattern {
            width,
            height,
            cells,
            rule: None,
        }
    }

    /// Attaches a rule string.
    pub fn with_rule<S: Into<String>>(mut self, rule: S) -> Self {
        self.rule = Some(rule.into());
        self
    }

    /// Width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height.
    pub fn height(&self) -> usize {
        self.height
    }

    /// All cells, row by row.
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// The rule string in the header, if any.
    ///
    /// It is only informative; loading a pattern never changes the rule
    /// of a world.
    pub fn rule(&self) -> Option<&str> {
        self.rule.as_deref()
    }

    /// Number of living cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0).count()
    }

    /// Coordinates of all living cells, row by row.
    pub fn alive_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &c)| c != 0)
            .map(move |(i, _)| (i % width, i / width))
    }

    /// Writes the pattern in RLE format.
    ///
    /// Trailing dead cells of a row and trailing empty rows are omitted.
    pub fn to_rle(&self) -> String {
        let mut rle = format!("x = {}, y = {}", self.width, self.height);
        if let Some(rule) = &self.rule {
            rle.push_str(", rule = ");
            rle.push_str(rule);
        }
        rle.push('\n');

        fn push_token(rle: &mut String, line: &mut String, count: usize, tag: char) {
            let token = if count == 1 {
                tag.to_string()
            } else {
                format!("{}{}", count, tag)
            };
            if line.len() + token.len() > LINE_WIDTH {
                rle.push_str(line);
                rle.push('\n');
                line.clear();
            }
            line.push_str(&token);
        }

        let mut line = String::new();
        let mut pending_rows = 0;
        for row in self.cells.chunks(self.width.max(1)) {
            let len = row.iter().rposition(|&c| c != 0).map_or(0, |i| i + 1);
            if len > 0 && pending_rows > 0 {
                push_token(&mut rle, &mut line, pending_rows, '$');
                pending_rows = 0;
            }
            let mut x = 0;
            while x < len {
                let state = row[x];
                let run = row[x..len].iter().take_while(|&&c| c == state).count();
                push_token(&mut rle, &mut line, run, if state == 0 { 'b' } else { 'o' });
                x += run;
            }
            pending_rows += 1;
        }
        push_token(&mut rle, &mut line, 1, '!');
        rle.push_str(&line);
        rle.push('\n');
        rle
    }
}

/// Parses an RLE string with the strict [`RleDecoder`].
impl FromStr for Pattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RleDecoder::new().decode(s)
    }
}

/// A decoder for RLE patterns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RleDecoder {
    /// What to do when a run count is followed by something other than
    /// `o`, `b`, `$` or `!`, including the end of the line.
    ///
    /// A strict decoder returns [`Error::MalformedPattern`];
    /// a lenient one stops there and returns the cells read so far.
    /// Unknown characters without a run count in front of them are
    /// skipped in both modes.
    pub lenient: bool,
}

/// The pattern being decoded.
struct Builder {
    width: usize,
    height: usize,
    rule: Option<String>,
    /// Finished rows.
    cells: Vec<u8>,
    /// Number of finished rows, including those past the height.
    rows: usize,
    /// The current row.
    row: Vec<u8>,
    /// Number of cells written to the current row,
    /// including those past the width.
    cursor: usize,
}

impl Builder {
    fn new() -> Self {
        Builder {
            width: 0,
            height: 0,
            rule: None,
            cells: Vec::new(),
            rows: 0,
            row: Vec::new(),
            cursor: 0,
        }
    }

    fn push_cells(&mut self, count: usize, state: State) {
        let room = self.width.saturating_sub(self.row.len());
        if count > room {
            debug!(
                "Dropping {} cells past the width {} on row {}",
                count - room,
                self.width,
                self.rows
            );
        }
        let len = self.row.len() + count.min(room);
        self.row.resize(len, state.into());
        self.cursor = self.cursor.saturating_add(count);
    }

    fn end_row(&mut self) {
        if self.rows < self.height {
            self.row.resize(self.width, 0);
            self.cells.extend_from_slice(&self.row);
        } else {
            debug!("Dropping row {} past the height {}", self.rows, self.height);
        }
        self.row.clear();
        self.cursor = 0;
        self.rows += 1;
    }

    fn end_rows(&mut self, count: usize) {
        self.end_row();
        let blank = (count - 1).min(self.height.saturating_sub(self.rows));
        self.cells.resize(self.cells.len() + blank * self.width, 0);
        self.rows = self.rows.saturating_add(count - 1);
    }

    fn finish(mut self) -> Pattern {
        if self.cursor > 0 {
            self.end_row();
        }
        self.cells.resize(self.width * self.height, 0);
        Pattern {
            width: self.width,
            height: self.height,
            cells: self.cells,
            rule: self.rule,
        }
    }
}

/// Reads the value of a `key = value` field in the header.
fn header_field<'a>(line: &str, field: Option<&'a str>) -> Result<&'a str, Error> {
    field
        .and_then(|f| f.split_once('='))
        .map(|(_, value)| value.trim())
        .ok_or_else(|| Error::MalformedHeader(line.to_string()))
}

impl RleDecoder {
    /// A strict decoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether the decoder is lenient.
    pub fn lenient(mut self, lenient: bool) -> Self {
        self.lenient = lenient;
        self
    }

    /// Parses the header line `x = <width>, y = <height>[, rule = <rule>]`.
    fn read_header(builder: &mut Builder, line: &str) -> Result<(), Error> {
        let mut fields = line.split(',');
        let size = |value: &str| {
            value
                .parse::<usize>()
                .map_err(|_| Error::MalformedHeader(line.to_string()))
        };
        builder.width = size(header_field(line, fields.next())?)?;
        builder.height = size(header_field(line, fields.next())?)?;
        if builder.width.checked_mul(builder.height).is_none() {
            return Err(Error::MalformedHeader(line.to_string()));
        }
        for field in fields {
            if let Some((key, value)) = field.split_once('=') {
                if key.trim() == "rule" {
                    builder.rule = Some(value.trim().to_string());
                }
            }
        }
        Ok(())
    }

    /// Decodes an RLE string.
    ///
    /// Cells beyond the width or height in the header are dropped,
    /// and missing cells are dead, so the result always has
    /// exactly `width * height` cells. Without a header the pattern is empty.
    pub fn decode(&self, text: &str) -> Result<Pattern, Error> {
        let mut builder = Builder::new();

        'lines: for (line_index, line) in text.lines().enumerate() {
            let line = line.trim_end();
            if line.starts_with('#') {
                continue;
            }
            if line.starts_with('x') {
                Self::read_header(&mut builder, line)?;
                continue;
            }

            let mut run: Option<usize> = None;
            let mut chars = line.char_indices();
            loop {
                let (column, c) = match chars.next() {
                    Some(next) => next,
                    None if run.is_some() => (line.len(), '\n'),
                    None => break,
                };
                if let Some(digit) = c.to_digit(10) {
                    let count = run.unwrap_or(0);
                    run = Some(count.saturating_mul(10).saturating_add(digit as usize));
                    continue;
                }
                if c.is_whitespace() && c != '\n' && run.is_none() {
                    continue;
                }
                let count = match run.take() {
                    Some(count) => count,
                    None if !matches!(c, 'o' | 'b' | '$' | '!') => {
                        debug!("Skipping {:?} at line {}", c, line_index + 1);
                        continue;
                    }
                    None => 1,
                };
                match c {
                    'o' => builder.push_cells(count, State::Alive),
                    'b' => builder.push_cells(count, State::Dead),
                    '$' => builder.end_rows(count.max(1)),
                    '!' => break 'lines,
                    _ => {
                        let found = if c == '\n' {
                            String::from("end of line")
                        } else {
                            c.to_string()
                        };
                        let error = Error::MalformedPattern {
                            line: line_index + 1,
                            column: column + 1,
                            found,
                        };
                        if self.lenient {
                            warn!("{}; keeping the cells read so far", error);
                            break 'lines;
                        }
                        return Err(error);
                    }
                }
            }
        }

        Ok(builder.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glider() -> Result<(), Error> {
        let pattern: Pattern = "x = 3, y = 3\nbob$2bo$3o!".parse()?;
        assert_eq!(pattern.width(), 3);
        assert_eq!(pattern.height(), 3);
        assert_eq!(pattern.cells(), &[0, 1, 0, 0, 0, 1, 1, 1, 1]);
        assert_eq!(pattern.rule(), None);
        Ok(())
    }

    #[test]
    fn default_run_count() -> Result<(), Error> {
        let pattern: Pattern = "x = 3, y = 1\nob!".parse()?;
        assert_eq!(pattern.cells(), &[1, 0, 0]);
        Ok(())
    }

    #[test]
    fn run_counts() -> Result<(), Error> {
        let pattern: Pattern = "x = 5, y = 1, rule = B3/S23\n2bo2b!".parse()?;
        assert_eq!(pattern.cells(), &[0, 0, 1, 0, 0]);
        assert_eq!(pattern.rule(), Some("B3/S23"));
        Ok(())
    }

    #[test]
    fn padding() -> Result<(), Error> {
        let pattern: Pattern = "x = 3, y = 3, rule = B3/S23\no$bo$o!".parse()?;
        assert_eq!(pattern.cells(), &[1, 0, 0, 0, 1, 0, 1, 0, 0]);
        Ok(())
    }

    #[test]
    fn blank_rows() -> Result<(), Error> {
        let pattern: Pattern = "x = 2, y = 4\no3$bo!".parse()?;
        assert_eq!(pattern.cells(), &[1, 0, 0, 0, 0, 0, 0, 1]);
        Ok(())
    }

    #[test]
    fn comments_and_crlf() -> Result<(), Error> {
        let pattern: Pattern = "#C comment\r\nx = 2, y = 2, rule = B3/S23\r\no$\r\no!\r\n".parse()?;
        assert_eq!(pattern.cells(), &[1, 0, 1, 0]);
        Ok(())
    }

    #[test]
    fn stops_at_terminator() -> Result<(), Error> {
        let pattern: Pattern = "x = 3, y = 2\n3o!$3o\n3o".parse()?;
        assert_eq!(pattern.cells(), &[1, 1, 1, 0, 0, 0]);
        Ok(())
    }

    #[test]
    fn clips_to_header() -> Result<(), Error> {
        let pattern: Pattern = "x = 2, y = 1\n4o$2o!".parse()?;
        assert_eq!(pattern.cells(), &[1, 1]);
        Ok(())
    }

    #[test]
    fn missing_header() -> Result<(), Error> {
        let pattern: Pattern = "bob$2bo$3o!".parse()?;
        assert_eq!(pattern.width(), 0);
        assert_eq!(pattern.height(), 0);
        assert!(pattern.cells().is_empty());
        Ok(())
    }

    #[test]
    fn malformed_header() {
        assert!(matches!(
            "x = three, y = 3\no!".parse::<Pattern>(),
            Err(Error::MalformedHeader(_))
        ));
        assert!(matches!(
            "x = 3\no!".parse::<Pattern>(),
            Err(Error::MalformedHeader(_))
        ));
    }

    #[test]
    fn oversized_header() {
        assert!(matches!(
            "x = 4294967296, y = 4294967296\n!".parse::<Pattern>(),
            Err(Error::MalformedHeader(_))
        ));
        assert!(matches!(
            format!("x = {}, y = 2\no!", usize::MAX).parse::<Pattern>(),
            Err(Error::MalformedHeader(_))
        ));
    }

    #[test]
    fn skips_unknown_characters() -> Result<(), Error> {
        let pattern: Pattern = "x = 3, y = 2\nozo$.3o!".parse()?;
        assert_eq!(pattern.cells(), &[1, 1, 0, 1, 1, 1]);
        Ok(())
    }

    #[test]
    fn unknown_tag() {
        assert_eq!(
            "x = 3, y = 1\no2x!".parse::<Pattern>(),
            Err(Error::MalformedPattern {
                line: 2,
                column: 3,
                found: String::from("x"),
            })
        );
        assert_eq!(
            "x = 3, y = 2\no2\n$o!".parse::<Pattern>(),
            Err(Error::MalformedPattern {
                line: 2,
                column: 3,
                found: String::from("end of line"),
            })
        );
    }

    #[test]
    fn lenient() -> Result<(), Error> {
        let decoder = RleDecoder::new().lenient(true);
        let pattern = decoder.decode("x = 3, y = 2\no2x$3o!")?;
        assert_eq!(pattern.cells(), &[1, 0, 0, 0, 0, 0]);
        Ok(())
    }

    #[test]
    fn whitespace_between_runs() -> Result<(), Error> {
        let pattern: Pattern = "x = 3, y = 1\n b o 2b !".parse()?;
        assert_eq!(pattern.cells(), &[0, 1, 0]);
        Ok(())
    }

    #[test]
    fn write() -> Result<(), Error> {
        let pattern: Pattern = "x = 3, y = 3, rule = B3/S23\nbob$2bo$3o!".parse()?;
        assert_eq!(pattern.to_rle(), "x = 3, y = 3, rule = B3/S23\nbo$2bo$3o!\n");

        let sparse = Pattern::new(4, 5, vec![0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 0, 0]);
        assert_eq!(sparse.to_rle(), "x = 4, y = 5\n3bo3$2o!\n");
        assert_eq!(sparse.to_rle().parse::<Pattern>()?.cells(), sparse.cells());
        Ok(())
    }

    #[test]
    #[cfg(feature = "serde")]
    fn deserialize_checks_size() -> Result<(), serde_json::Error> {
        let pattern: Pattern =
            serde_json::from_str(r#"{"width":2,"height":1,"cells":[0,7],"rule":null}"#)?;
        assert_eq!(pattern.cells(), &[0, 1]);

        let zero_width = r#"{"width":0,"height":1,"cells":[1],"rule":null}"#;
        assert!(serde_json::from_str::<Pattern>(zero_width).is_err());
        let too_many = r#"{"width":2,"height":1,"cells":[0,0,1,1,1,1],"rule":null}"#;
        assert!(serde_json::from_str::<Pattern>(too_many).is_err());

        let glider: Pattern = "x = 3, y = 3, rule = B3/S23\nbob$2bo$3o!".parse().unwrap();
        let json = serde_json::to_string(&glider)?;
        assert_eq!(serde_json::from_str::<Pattern>(&json)?, glider);
        Ok(())
    }
}
