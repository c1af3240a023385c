//! Directory listing backed by `std::fs`

use crate::interfaces::FileSystem;
use std::io;
use std::path::Path;

pub struct DiskFileSystem;

impl FileSystem for DiskFileSystem {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn children(&self, path: &Path) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(path)? {
            names.push(entry?.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }
}
