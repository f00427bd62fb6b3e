//! Discharge note persistence

use std::path::{Path, PathBuf};

use discharge_core::{DischargeError, DischargeNote};

/// Name of the directory, next to the input's parent, that receives notes
pub const SOLUTION_DIR: &str = "solution";

/// Where the finished note goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// `<input_dir>/../solution/<input_stem>_discharge_note.json`
    SolutionDir,
    /// Standard output
    Stdout,
}

/// What [`write_note`] did with the note
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Written {
    File(PathBuf),
    Stdout,
}

/// Parent of a path, treating a bare name as living in `.`
fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        Some(_) => PathBuf::from("."),
        None if path.as_os_str().is_empty() => PathBuf::from("."),
        None => path.to_path_buf(),
    }
}

/// Directory that receives the note for `input`
pub fn solution_dir(input: &Path) -> PathBuf {
    parent_dir(&parent_dir(input)).join(SOLUTION_DIR)
}

/// Full output path for the note generated from `input`
pub fn solution_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    solution_dir(input).join(format!("{stem}_discharge_note.json"))
}

/// Persist `note` for the consultation at `input`
pub fn write_note(
    input: &Path,
    note: &DischargeNote,
    destination: Destination,
) -> Result<Written, DischargeError> {
    let json = note.to_json()?;

    match destination {
        Destination::Stdout => {
            println!("{json}");
            Ok(Written::Stdout)
        }
        Destination::SolutionDir => {
            let dir = solution_dir(input);
            std::fs::create_dir_all(&dir).map_err(|source| DischargeError::Io {
                path: dir.clone(),
                source,
            })?;

            let path = solution_path(input);
            std::fs::write(&path, json).map_err(|source| DischargeError::Io {
                path: path.clone(),
                source,
            })?;

            tracing::info!(path = %path.display(), "Discharge note written");
            Ok(Written::File(path))
        }
    }
}
