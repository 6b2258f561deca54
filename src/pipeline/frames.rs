//! Reading recorded score frames.
//!
//! One frame per line, values separated by commas and/or whitespace. Blank
//! lines and lines starting with `#` are skipped.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Read all frames from a file.
pub fn read_frames(path: &Path) -> Result<Vec<Vec<f32>>> {
    let file = File::open(path).map_err(|e| Error::FramesRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut frames = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| Error::FramesRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        if let Some(frame) = parse_frame_line(&line).map_err(|reason| Error::FrameParse {
            path: path.to_path_buf(),
            line: index + 1,
            reason,
        })? {
            frames.push(frame);
        }
    }

    Ok(frames)
}

/// Parse one line; `Ok(None)` for blank and comment lines.
pub fn parse_frame_line(line: &str) -> std::result::Result<Option<Vec<f32>>, String> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    trimmed
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|field| !field.is_empty())
        .map(|field| {
            field
                .parse::<f32>()
                .map_err(|_| format!("'{field}' is not a valid number"))
        })
        .collect::<std::result::Result<Vec<_>, _>>()
        .map(Some)
}
