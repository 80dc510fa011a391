use crate::core::io::traits::SceneFile;
use crate::core::models::description::{HelixRecord, SceneDescription};
use nalgebra::{Point3, Vector3};
use std::io::{self, BufRead, Write};
use thiserror::Error;

/// Comment lines found at the top of a scene file, without the leading `#`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneMetadata {
    pub header_lines: Vec<String>,
}

impl SceneMetadata {
    pub fn with_header(lines: impl IntoIterator<Item = String>) -> Self {
        Self {
            header_lines: lines.into_iter().collect(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: SceneParseErrorKind,
    },
}

#[derive(Debug, Error, PartialEq)]
pub enum SceneParseErrorKind {
    #[error("'{record}' record expects {expected} fields, found {found}")]
    MissingFields {
        record: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("Invalid number '{value}' in '{record}' record")]
    InvalidNumber { record: &'static str, value: String },
    #[error("Path entries are 1-based; index 0 is not allowed")]
    ZeroIndex,
}

/// The line-oriented scene format:
///
/// ```text
/// # comment
/// v x y z
/// e index
/// h bases px py pz dx dy dz
/// ```
///
/// `v` adds a vertex, `e` appends a 1-based vertex index to the scaffold path and `h` adds a
/// pre-built helix by base count, centre and axis direction. Blank lines and unknown records are
/// ignored.
pub struct SceneFormat;

fn require_fields(
    record: &'static str,
    fields: &[&str],
    expected: usize,
    line: usize,
) -> Result<(), SceneError> {
    if fields.len() < expected {
        return Err(SceneError::Parse {
            line,
            kind: SceneParseErrorKind::MissingFields {
                record,
                expected,
                found: fields.len(),
            },
        });
    }
    Ok(())
}

fn parse_fields<T: std::str::FromStr>(
    record: &'static str,
    fields: &[&str],
    expected: usize,
    line: usize,
) -> Result<Vec<T>, SceneError> {
    require_fields(record, fields, expected, line)?;
    fields[..expected]
        .iter()
        .map(|value| {
            value.parse::<T>().map_err(|_| SceneError::Parse {
                line,
                kind: SceneParseErrorKind::InvalidNumber {
                    record,
                    value: (*value).to_string(),
                },
            })
        })
        .collect()
}

impl SceneFile for SceneFormat {
    type Metadata = SceneMetadata;
    type Error = SceneError;

    fn read_from(
        reader: &mut impl BufRead,
    ) -> Result<(SceneDescription, Self::Metadata), Self::Error> {
        let mut scene = SceneDescription::default();
        let mut metadata = SceneMetadata::default();

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;
            let trimmed = line.trim();

            if let Some(comment) = trimmed.strip_prefix('#') {
                metadata.header_lines.push(comment.trim().to_string());
                continue;
            }

            let mut tokens = trimmed.split_whitespace();
            let Some(record) = tokens.next() else {
                continue;
            };
            let fields: Vec<&str> = tokens.collect();

            match record {
                "v" => {
                    let xyz: Vec<f64> = parse_fields("v", &fields, 3, line_num)?;
                    scene.vertices.push(Point3::new(xyz[0], xyz[1], xyz[2]));
                }
                "e" => {
                    let index: Vec<usize> = parse_fields("e", &fields, 1, line_num)?;
                    if index[0] == 0 {
                        return Err(SceneError::Parse {
                            line: line_num,
                            kind: SceneParseErrorKind::ZeroIndex,
                        });
                    }
                    scene.path.push(index[0] - 1);
                }
                "h" => {
                    require_fields("h", &fields, 7, line_num)?;
                    let bases: Vec<u32> = parse_fields("h", &fields[..1], 1, line_num)?;
                    let values: Vec<f64> = parse_fields("h", &fields[1..], 6, line_num)?;
                    scene.helices.push(HelixRecord {
                        bases: bases[0],
                        position: Point3::new(values[0], values[1], values[2]),
                        direction: Vector3::new(values[3], values[4], values[5]),
                    });
                }
                _ => {}
            }
        }

        Ok((scene, metadata))
    }

    fn write_to(
        scene: &SceneDescription,
        metadata: &Self::Metadata,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        for line in &metadata.header_lines {
            writeln!(writer, "# {}", line)?;
        }
        Self::write_scene_to(scene, writer)
    }

    fn write_scene_to(scene: &SceneDescription, writer: &mut impl Write) -> Result<(), Self::Error> {
        for vertex in &scene.vertices {
            writeln!(writer, "v {} {} {}", vertex.x, vertex.y, vertex.z)?;
        }
        for &index in &scene.path {
            writeln!(writer, "e {}", index + 1)?;
        }
        for helix in &scene.helices {
            writeln!(
                writer,
                "h {} {} {} {} {} {} {}",
                helix.bases,
                helix.position.x,
                helix.position.y,
                helix.position.z,
                helix.direction.x,
                helix.direction.y,
                helix.direction.z
            )?;
        }
        Ok(())
    }
}
