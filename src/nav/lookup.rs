//! Filesystem lookup seam used by the navigation engine.

use std::fs;
use std::io;
use std::path::Path;

pub trait Lookup {
    /// Entry names (not paths) of a directory, in whatever order the
    /// underlying listing yields them.
    fn list(&self, dir: &Path) -> io::Result<Vec<String>>;

    fn is_dir(&self, path: &Path) -> bool;

    /// Removes a file, or a directory tree recursively.
    fn remove(&self, path: &Path) -> io::Result<()>;
}

/// Direct `std::fs` implementation.
pub struct StdFs;

impl Lookup for StdFs {
    fn list(&self, dir: &Path) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(dir)? {
            names.push(entry?.file_name().to_string_lossy().into_owned());
        }
        Ok(names)
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn remove(&self, path: &Path) -> io::Result<()> {
        if path.is_dir() {
            fs::remove_dir_all(path)
        } else {
            fs::remove_file(path)
        }
    }
}
