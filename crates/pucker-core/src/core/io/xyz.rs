use crate::core::io::traits::CoordinateFile;
use nalgebra::Point3;
use std::io::{self, BufRead, Write};
use thiserror::Error;
use tracing::debug;

/// Upper bound on the atom capacity reserved from the declared count before any atom
/// line has been read.
const MAX_PREALLOCATED_ATOMS: usize = 4096;

#[derive(Debug, Clone, PartialEq)]
pub struct XyzAtom {
    pub element: String,
    pub position: Point3<f64>,
}

/// A single XYZ frame: the comment line and the atoms in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XyzStructure {
    pub comment: String,
    pub atoms: Vec<XyzAtom>,
}

impl XyzStructure {
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn position(&self, index: usize) -> Option<Point3<f64>> {
        self.atoms.get(index).map(|atom| atom.position)
    }
}

#[derive(Debug, Error)]
pub enum XyzError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: XyzParseErrorKind },
    #[error("File is empty")]
    EmptyFile,
}

#[derive(Debug, Error, PartialEq)]
pub enum XyzParseErrorKind {
    #[error("Invalid atom count '{value}'")]
    InvalidAtomCount { value: String },
    #[error("Missing comment line after atom count")]
    MissingComment,
    #[error("Atom line needs an element symbol and three coordinates")]
    TooFewFields,
    #[error("Invalid {axis} coordinate '{value}'")]
    InvalidFloat { axis: char, value: String },
    #[error("Non-finite {axis} coordinate '{value}'")]
    NonFinite { axis: char, value: String },
    #[error("Expected {expected} atom lines, found {found}")]
    UnexpectedEof { expected: usize, found: usize },
}

fn parse_error(line: usize, kind: XyzParseErrorKind) -> XyzError {
    XyzError::Parse { line, kind }
}

fn parse_atom_line(line: &str, line_num: usize) -> Result<XyzAtom, XyzError> {
    let mut fields = line.split_whitespace();
    let (Some(element), Some(x), Some(y), Some(z)) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return Err(parse_error(line_num, XyzParseErrorKind::TooFewFields));
    };

    let parse_axis = |axis: char, value: &str| -> Result<f64, XyzError> {
        let parsed: f64 = value.parse().map_err(|_| {
            parse_error(
                line_num,
                XyzParseErrorKind::InvalidFloat {
                    axis,
                    value: value.to_string(),
                },
            )
        })?;
        if !parsed.is_finite() {
            return Err(parse_error(
                line_num,
                XyzParseErrorKind::NonFinite {
                    axis,
                    value: value.to_string(),
                },
            ));
        }
        Ok(parsed)
    };

    Ok(XyzAtom {
        element: element.to_string(),
        position: Point3::new(parse_axis('x', x)?, parse_axis('y', y)?, parse_axis('z', z)?),
    })
}

/// Reader and writer for the plain XYZ format:
///
/// ```text
/// <atom count>
/// <comment>
/// <element> <x> <y> <z> [ignored columns...]
/// ```
///
/// Only the first frame is read; anything after the declared atom count is ignored.
pub struct XyzFile;

impl CoordinateFile for XyzFile {
    type Structure = XyzStructure;
    type Error = XyzError;

    fn read_from(reader: &mut impl BufRead) -> Result<Self::Structure, Self::Error> {
        let mut lines = reader.lines().enumerate().map(|(i, l)| (i + 1, l));

        let (count_line_num, count_line) = loop {
            match lines.next() {
                Some((num, line)) => {
                    let line = line?;
                    if !line.trim().is_empty() {
                        break (num, line);
                    }
                }
                None => return Err(XyzError::EmptyFile),
            }
        };
        let count_str = count_line.trim();
        let expected: usize = count_str.parse().map_err(|_| {
            parse_error(
                count_line_num,
                XyzParseErrorKind::InvalidAtomCount {
                    value: count_str.to_string(),
                },
            )
        })?;

        let comment = match lines.next() {
            Some((_, line)) => line?.trim().to_string(),
            None => {
                return Err(parse_error(
                    count_line_num + 1,
                    XyzParseErrorKind::MissingComment,
                ));
            }
        };

        let mut atoms = Vec::with_capacity(expected.min(MAX_PREALLOCATED_ATOMS));
        let mut last_line = count_line_num + 1;
        while atoms.len() < expected {
            let Some((line_num, line)) = lines.next() else {
                return Err(parse_error(
                    last_line + 1,
                    XyzParseErrorKind::UnexpectedEof {
                        expected,
                        found: atoms.len(),
                    },
                ));
            };
            let line = line?;
            last_line = line_num;
            atoms.push(parse_atom_line(&line, line_num)?);
        }

        let trailing = lines
            .filter_map(|(_, line)| line.ok())
            .filter(|line| !line.trim().is_empty())
            .count();
        if trailing > 0 {
            debug!(
                "Ignoring {} line(s) after the first XYZ frame ({} atoms).",
                trailing, expected
            );
        }

        Ok(XyzStructure { comment, atoms })
    }

    fn write_to(structure: &Self::Structure, writer: &mut impl Write) -> Result<(), Self::Error> {
        writeln!(writer, "{}", structure.atoms.len())?;
        writeln!(writer, "{}", structure.comment)?;
        for atom in &structure.atoms {
            writeln!(
                writer,
                "{:<2} {:>14.8} {:>14.8} {:>14.8}",
                atom.element, atom.position.x, atom.position.y, atom.position.z
            )?;
        }
        Ok(())
    }
}
