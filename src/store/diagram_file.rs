// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-jThinker-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of jThinker and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fs;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use log::debug;
use thiserror::Error;

use crate::format::xml::{export_diagram, parse_diagram, XmlFormatError};
use crate::model::Diagram;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WriteDurability {
    /// Fast, best-effort persistence.
    ///
    /// - Writes a temp file and renames atomically into place.
    /// - Does not perform per-file fsync/sync.
    #[default]
    BestEffort,

    /// Slower, best-effort durability.
    ///
    /// Also flushes the file contents and, on unix, the parent directory entry. Exact guarantees
    /// are platform/filesystem-dependent.
    Durable,
}

/// Why a diagram file could not be opened.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read diagram file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("diagram file {path:?} is not well-formed XML: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: XmlFormatError,
    },
    #[error("diagram file {path:?} is not a supported diagram document: {source}")]
    UnsupportedSchema {
        path: PathBuf,
        #[source]
        source: XmlFormatError,
    },
}

impl LoadError {
    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. }
            | Self::Malformed { path, .. }
            | Self::UnsupportedSchema { path, .. } => path,
        }
    }

    fn from_format(path: &Path, source: XmlFormatError) -> Self {
        let path = path.to_path_buf();
        match source {
            XmlFormatError::Malformed { .. } | XmlFormatError::Truncated { .. } => {
                Self::Malformed { path, source }
            }
            XmlFormatError::MissingRoot | XmlFormatError::Schema { .. } => {
                Self::UnsupportedSchema { path, source }
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("io error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("refusing to write through symlink at {path:?}")]
    SymlinkRefused { path: PathBuf },
}

pub fn load_diagram(path: impl AsRef<Path>) -> Result<Diagram, LoadError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let diagram = parse_diagram(&source).map_err(|err| LoadError::from_format(path, err))?;
    debug!(
        path = path.display().to_string(),
        nodes = diagram.nodes().len(),
        links = diagram.links().len();
        "Loaded diagram"
    );
    Ok(diagram)
}

pub fn save_diagram(
    path: impl AsRef<Path>,
    diagram: &Diagram,
    durability: WriteDurability,
) -> Result<(), SaveError> {
    let path = path.as_ref();
    let xml = export_diagram(diagram);
    write_atomic(path, xml.as_bytes(), durability)?;
    debug!(path = path.display().to_string(), durability:?; "Saved diagram");
    Ok(())
}

fn write_atomic(path: &Path, contents: &[u8], durability: WriteDurability) -> Result<(), SaveError> {
    match fs::symlink_metadata(path) {
        Ok(md) if md.file_type().is_symlink() => {
            return Err(SaveError::SymlinkRefused {
                path: path.to_path_buf(),
            });
        }
        Ok(_) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(source) => {
            return Err(SaveError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    }

    let Some(file_name) = path.file_name() else {
        return Err(SaveError::Io {
            path: path.to_path_buf(),
            source: io::Error::other("path has no file name"),
        });
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let tmp_path = parent.join(format!(
        ".jthinker.tmp.{}.{}",
        file_name.to_string_lossy(),
        nanos
    ));

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)
        .map_err(|source| SaveError::Io {
            path: tmp_path.clone(),
            source,
        })?;

    let written = file.write_all(contents).and_then(|()| {
        if durability == WriteDurability::Durable {
            file.sync_all()
        } else {
            Ok(())
        }
    });
    drop(file);
    if let Err(source) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(SaveError::Io {
            path: tmp_path,
            source,
        });
    }

    if let Err(source) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(SaveError::Io {
            path: path.to_path_buf(),
            source,
        });
    }

    if durability == WriteDurability::Durable {
        #[cfg(unix)]
        {
            let dir = fs::File::open(parent).map_err(|source| SaveError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
            dir.sync_all().map_err(|source| SaveError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests;
