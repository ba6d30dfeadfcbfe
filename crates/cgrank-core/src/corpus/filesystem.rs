//! Shard discovery for artefact input directories.
//!
//! An artefact directory holds one or more shard subdirectories, each with a
//! `callgraph.csv` and a `uris.csv` fragment. Sibling shards are merged
//! before analysis, so readers here return concatenated text.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::errors::CgrankResult;

pub const CALLGRAPH_FILE: &str = "callgraph.csv";
pub const URIS_FILE: &str = "uris.csv";

/// Enumerate the artefact input directories under the corpus root, sorted by
/// path for a stable dispatch order.
pub fn discover_artefact_dirs(input_root: &Path) -> CgrankResult<Vec<PathBuf>> {
    // Surface a missing/unreadable root as a run-level error instead of an
    // empty discovery.
    std::fs::read_dir(input_root)?;

    let mut dirs: Vec<PathBuf> = WalkDir::new(input_root)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_dir())
        .map(|entry| entry.into_path())
        .collect();
    dirs.sort();
    Ok(dirs)
}

/// Enumerate one named shard file (`callgraph.csv` or `uris.csv`) across all
/// shard subdirectories of an artefact, sorted by path.
pub fn shard_files(artefact_dir: &Path, file_name: &str) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(artefact_dir)
        .min_depth(2)
        .max_depth(2)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.file_name() == file_name)
        .map(|entry| entry.into_path())
        .collect();
    files.sort();
    files
}

/// Read and concatenate shard fragments, newline-joined.
pub fn read_concatenated(paths: &[PathBuf]) -> CgrankResult<String> {
    let mut chunks = Vec::with_capacity(paths.len());
    for path in paths {
        chunks.push(std::fs::read_to_string(path)?);
    }
    Ok(chunks.join("\n"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn write_file(path: &Path, content: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn test_discover_artefact_dirs_sorted() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir(root.path().join("g_b_1.0")).unwrap();
        std::fs::create_dir(root.path().join("g_a_1.0")).unwrap();
        write_file(&root.path().join("stray.txt"), "not a directory");

        let dirs = discover_artefact_dirs(root.path()).unwrap();
        let names: Vec<_> = dirs
            .iter()
            .map(|d| d.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["g_a_1.0", "g_b_1.0"]);
    }

    #[test]
    fn test_discover_missing_root_is_an_error() {
        let root = tempfile::tempdir().unwrap();
        let missing = root.path().join("does-not-exist");
        assert!(discover_artefact_dirs(&missing).is_err());
    }

    #[test]
    fn test_shard_files_only_direct_shards() {
        let root = tempfile::tempdir().unwrap();
        let artefact = root.path().join("g_a_1.0");
        write_file(&artefact.join("shard-1").join(CALLGRAPH_FILE), "source,target\n1,2");
        write_file(&artefact.join("shard-0").join(CALLGRAPH_FILE), "source,target\n2,3");
        write_file(&artefact.join("shard-0").join(URIS_FILE), "");
        // Too deep and too shallow entries are not shards.
        write_file(&artefact.join(CALLGRAPH_FILE), "ignored");
        write_file(&artefact.join("shard-0").join("nested").join(CALLGRAPH_FILE), "ignored");

        let files = shard_files(&artefact, CALLGRAPH_FILE);
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("shard-0/callgraph.csv"));
        assert!(files[1].ends_with("shard-1/callgraph.csv"));
    }

    #[test]
    fn test_read_concatenated_joins_with_newline() {
        let root = tempfile::tempdir().unwrap();
        let a = root.path().join("a.csv");
        let b = root.path().join("b.csv");
        write_file(&a, "1,2");
        write_file(&b, "3,4");
        let merged = read_concatenated(&[a, b]).unwrap();
        assert_eq!(merged, "1,2\n3,4");
    }
}
