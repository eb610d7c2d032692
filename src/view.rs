//! Terminal stand-in for the directory view.
//!
//! Receives refresh notifications from the navigation engine over a
//! channel and renders the listing itself; it never reaches into engine
//! state.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::thread;

use crossterm::style::Stylize;

pub fn spawn(refresh: flume::Receiver<PathBuf>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        while let Ok(path) = refresh.recv() {
            render(&path);
        }
    })
}

fn render(path: &Path) {
    println!();
    println!("{}", path.display().to_string().bold());

    let mut entries = match list(path) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("[view] cannot read {}: {}", path.display(), e);
            return;
        }
    };
    entries.sort_by_key(|(name, _)| name.to_lowercase());

    if entries.is_empty() {
        println!("  (empty)");
    }
    for (name, is_dir) in entries {
        if is_dir {
            println!("  {}/", name.as_str().blue().bold());
        } else {
            println!("  {}", name);
        }
    }
}

fn list(path: &Path) -> io::Result<Vec<(String, bool)>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(path)? {
        let entry = entry?;
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        entries.push((entry.file_name().to_string_lossy().into_owned(), is_dir));
    }
    Ok(entries)
}
