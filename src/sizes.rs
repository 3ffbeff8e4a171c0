use std::path::Path;

use anyhow::Result;

use crate::errors::BenchError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSize {
    pub name: String,
    pub bytes: u64,
}

/// List the regular files directly inside `dir` with their sizes, sorted by name.
///
/// Symlinks are followed, so a link to a regular file is listed with the
/// target's size. Directories, dangling links and entries whose metadata
/// cannot be read are skipped.
pub fn list_file_sizes(dir: &Path) -> Result<Vec<FileSize>> {
    if !dir.is_dir() {
        return Err(BenchError::NotADirectory {
            path: dir.to_path_buf(),
        }
        .into());
    }

    let mut files = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };

        let metadata = match entry.path().metadata() {
            Ok(m) => m,
            Err(_) => continue,
        };

        if !metadata.is_file() {
            continue;
        }

        files.push(FileSize {
            name: entry.file_name().to_string_lossy().into_owned(),
            bytes: metadata.len(),
        });
    }

    files.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(files)
}

pub fn format_file_size(file: &FileSize) -> String {
    format!("{}: {} bytes", file.name, file.bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn lists_regular_files_sorted() {
        let tmp = assert_fs::TempDir::new().unwrap();
        fs::write(tmp.path().join("b.txt"), "hello").unwrap();
        fs::write(tmp.path().join("a.bin"), [0u8; 12]).unwrap();
        fs::write(tmp.path().join("empty"), "").unwrap();

        let files = list_file_sizes(tmp.path()).unwrap();
        assert_eq!(
            files,
            vec![
                FileSize { name: "a.bin".into(), bytes: 12 },
                FileSize { name: "b.txt".into(), bytes: 5 },
                FileSize { name: "empty".into(), bytes: 0 },
            ]
        );
    }

    #[test]
    fn skips_subdirectories() {
        let tmp = assert_fs::TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("nested")).unwrap();
        fs::write(tmp.path().join("nested").join("inner.txt"), "x").unwrap();
        fs::write(tmp.path().join("top.txt"), "xyz").unwrap();

        let files = list_file_sizes(tmp.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "top.txt");
    }

    #[cfg(unix)]
    #[test]
    fn follows_symlinks_to_files_only() {
        let tmp = assert_fs::TempDir::new().unwrap();
        let target = tmp.path().join("real.txt");
        fs::write(&target, "data").unwrap();
        std::os::unix::fs::symlink(&target, tmp.path().join("link.txt")).unwrap();

        let nested = tmp.path().join("nested");
        fs::create_dir(&nested).unwrap();
        std::os::unix::fs::symlink(&nested, tmp.path().join("dir-link")).unwrap();
        std::os::unix::fs::symlink(tmp.path().join("gone"), tmp.path().join("dangling")).unwrap();

        let files = list_file_sizes(tmp.path()).unwrap();
        assert_eq!(
            files,
            vec![
                FileSize { name: "link.txt".into(), bytes: 4 },
                FileSize { name: "real.txt".into(), bytes: 4 },
            ]
        );
    }

    #[test]
    fn empty_directory_is_ok() {
        let tmp = assert_fs::TempDir::new().unwrap();
        assert!(list_file_sizes(tmp.path()).unwrap().is_empty());
    }

    #[test]
    fn file_path_is_not_a_directory() {
        let tmp = assert_fs::TempDir::new().unwrap();
        let file = tmp.path().join("plain.txt");
        fs::write(&file, "x").unwrap();

        let err = list_file_sizes(&file).unwrap_err();
        assert!(err.to_string().contains("is not a directory"));
    }

    #[test]
    fn format_line() {
        let file = FileSize {
            name: "test.txt".into(),
            bytes: 1024,
        };
        assert_eq!(format_file_size(&file), "test.txt: 1024 bytes");
    }
}
