//! Reading and writing point lists, and the reconstruction pipeline behind the `triview` tool.
//!
//! Point lists are plain text with one point per line, wrapped in an outer pair of brackets:
//!
//! ```text
//! [[0.1, 0.2, 0.3];
//! [0.4, 0.5, 0.6];
//! [0.7, 0.8, 0.9]];
//! ```
//!
//! The reader is lenient about the brackets, semicolons and blank lines, but every remaining line
//! must hold exactly three comma separated finite numbers.

use std::{
    fmt::Write as _,
    fs,
    io,
    path::{Path, PathBuf},
};
use thiserror::Error;
use triview_core::{
    nalgebra::{Point3, Vector3},
    Correspondences, Model, Settings,
};
use triview_pose::{Fusion, PoseEstimator};

#[derive(Debug, Error)]
pub enum PointsError {
    #[error("line {line}: expected three comma separated finite numbers, found `{content}`")]
    Parse { line: usize, content: String },
    #[error(transparent)]
    Io(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read points from {}", path.display())]
    Points {
        path: PathBuf,
        #[source]
        source: PointsError,
    },
    #[error("failed to read settings from {}", path.display())]
    Settings {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("expected a positive multiple of three azimuth files, got {0}")]
    InputCount(usize),
    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("reconstruction failed")]
    Reconstruction(#[from] triview_core::Error),
}

/// Parses a point list.
pub fn parse_points(text: &str) -> Result<Vec<Vector3<f64>>, PointsError> {
    let mut points = Vec::new();
    for (ix, raw) in text.lines().enumerate() {
        let content: String = raw
            .chars()
            .filter(|c| !matches!(c, '[' | ']' | ';'))
            .collect();
        if content.trim().is_empty() {
            continue;
        }
        let error = || PointsError::Parse {
            line: ix + 1,
            content: raw.trim().to_owned(),
        };
        let coordinates = content
            .split(',')
            .map(|n| n.trim().parse::<f64>().ok().filter(|n| n.is_finite()))
            .collect::<Option<Vec<f64>>>()
            .ok_or_else(error)?;
        match coordinates.as_slice() {
            &[x, y, z] => points.push(Vector3::new(x, y, z)),
            _ => return Err(error()),
        }
    }
    Ok(points)
}

pub fn read_points(path: &Path) -> Result<Vec<Vector3<f64>>, PointsError> {
    parse_points(&fs::read_to_string(path)?)
}

/// Formats a point list with 17 fractional digits, enough to read back every `f64` unchanged.
pub fn format_points(points: &[Point3<f64>]) -> String {
    if points.is_empty() {
        return "[];\n".to_owned();
    }
    let last = points.len() - 1;
    let mut text = String::new();
    for (ix, p) in points.iter().enumerate() {
        // Writing to a `String` cannot fail.
        let _ = writeln!(
            text,
            "{}[{:.17}, {:.17}, {:.17}]{};",
            if ix == 0 { "[" } else { "" },
            p.x,
            p.y,
            p.z,
            if ix == last { "]" } else { "" },
        );
    }
    text
}

pub fn write_points(path: &Path, points: &[Point3<f64>]) -> Result<(), Error> {
    fs::write(path, format_points(points)).map_err(|source| Error::Write {
        path: path.to_owned(),
        source,
    })
}

/// Loads the settings, falling back to the defaults if no path is given.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, Error> {
    let path = match path {
        Some(path) => path,
        None => {
            log::info!("used default settings");
            return Ok(Settings::default());
        }
    };
    let text = fs::read_to_string(path).map_err(|e| Error::Settings {
        path: path.to_owned(),
        source: serde_json::Error::io(e),
    })?;
    let settings = serde_json::from_str(&text).map_err(|source| Error::Settings {
        path: path.to_owned(),
        source,
    })?;
    log::info!("loaded settings from {}", path.display());
    Ok(settings)
}

/// Estimates one model per azimuth triple and fuses them in order.
pub fn reconstruct(
    triples: &[[Vec<Vector3<f64>>; 3]],
    settings: &Settings,
    iterations: usize,
) -> Result<Model, Error> {
    let estimator = PoseEstimator::from_settings(settings);
    let models = triples
        .iter()
        .enumerate()
        .map(|(ix, [first, second, third])| -> Result<Model, Error> {
            let correspondences = Correspondences::new(first, second, third)?;
            log::info!(
                "estimating triple {} with {} correspondences",
                ix,
                correspondences.len()
            );
            Ok(estimator.estimate(&correspondences, iterations)?.model)
        })
        .collect::<Result<Vec<Model>, Error>>()?;
    Ok(Fusion::from_settings(settings).fuse_chain(&models)?)
}

/// Reads every azimuth file, grouping them in consecutive triples.
pub fn read_triples(paths: &[PathBuf]) -> Result<Vec<[Vec<Vector3<f64>>; 3]>, Error> {
    if paths.is_empty() || paths.len() % 3 != 0 {
        return Err(Error::InputCount(paths.len()));
    }
    let read = |path: &PathBuf| {
        read_points(path).map_err(|source| Error::Points {
            path: path.clone(),
            source,
        })
    };
    paths
        .chunks(3)
        .map(|chunk| -> Result<_, Error> {
            Ok([read(&chunk[0])?, read(&chunk[1])?, read(&chunk[2])?])
        })
        .collect()
}
