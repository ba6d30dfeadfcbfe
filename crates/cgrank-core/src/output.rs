//! Persistence of ranked metric records.
//!
//! One plain-text file per metric: `methodId,score` lines joined by
//! newlines, no header, no trailing newline. Content lands in a `.tmp`
//! sibling first and is renamed into place, so a file under its final name
//! is always complete.

use std::path::Path;

use crate::errors::CgrankResult;
use crate::models::Ranking;

pub const DEGREE_FILE: &str = "degree.bin";
pub const EIGENVECTOR_FILE: &str = "eigenvector.bin";
pub const DEPENDENT_PERCENTAGE_FILE: &str = "dependent-percentage.bin";

pub fn write_ranking(path: &Path, ranking: &Ranking) -> CgrankResult<()> {
    let content = ranking
        .iter()
        .map(|(id, score)| format!("{id},{score}"))
        .collect::<Vec<_>>()
        .join("\n");

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let staging = path.with_file_name(format!("{file_name}.tmp"));

    std::fs::write(&staging, content)?;
    std::fs::rename(&staging, path)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MethodId;

    fn ranking(pairs: &[(MethodId, f64)]) -> Ranking {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_record_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEGREE_FILE);
        write_ranking(&path, &ranking(&[(3, 1.0), (1, 0.5), (2, 0.0)])).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "3,1\n1,0.5\n2,0");
    }

    #[test]
    fn test_empty_ranking_writes_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(EIGENVECTOR_FILE);
        write_ranking(&path, &Ranking::new()).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_no_staging_file_survives() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEPENDENT_PERCENTAGE_FILE);
        write_ranking(&path, &ranking(&[(1, 0.25)])).unwrap();
        assert!(path.exists());
        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_overwrite_replaces_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEGREE_FILE);
        write_ranking(&path, &ranking(&[(1, 1.0), (2, 0.0)])).unwrap();
        write_ranking(&path, &ranking(&[(9, 1.0)])).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "9,1");
    }
}
