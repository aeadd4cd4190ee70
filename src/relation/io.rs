//! File I/O for incidence relations

use super::Relation;
use anyhow::{Context, Result};
use std::path::Path;

/// Load a relation from a text file
/// Format: each line is one candidate row, with '1' where the row contains an item and '0' elsewhere
pub fn load_relation_from_file<P: AsRef<Path>>(path: P) -> Result<Relation> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read relation file: {}", path.as_ref().display()))?;

    parse_relation_from_string(&content)
        .with_context(|| format!("Failed to parse relation from file: {}", path.as_ref().display()))
}

/// Parse a relation from its text representation.
///
/// Blank lines are skipped, as are lines starting with `#`.
pub fn parse_relation_from_string(content: &str) -> Result<Relation> {
    let lines: Vec<&str> = content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect();

    if lines.is_empty() {
        anyhow::bail!("Relation file is empty or contains no valid rows");
    }

    let mut rows = Vec::with_capacity(lines.len());
    for (row_idx, line) in lines.iter().enumerate() {
        let mut row = Vec::with_capacity(line.len());
        for (col_idx, ch) in line.chars().enumerate() {
            match ch {
                '0' => row.push(false),
                '1' => row.push(true),
                _ => anyhow::bail!(
                    "Invalid character '{}' at position ({}, {}). Only '0' and '1' are allowed",
                    ch,
                    row_idx,
                    col_idx
                ),
            }
        }
        rows.push(row);
    }

    Ok(Relation::from_rows(rows)?)
}

/// Save a relation to a text file
pub fn save_relation_to_file<P: AsRef<Path>>(relation: &Relation, path: P) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, relation.to_string())
        .with_context(|| format!("Failed to write relation to file: {}", path.as_ref().display()))?;

    Ok(())
}

/// Create example relation files
pub fn create_example_relations<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    // Knuth's seven-item example, unique cover {0, 3, 4}
    let knuth_content = "0010110\n1001001\n0110010\n1001000\n0100001\n0001101\n";
    std::fs::write(dir.join("knuth.txt"), knuth_content)
        .context("Failed to write knuth.txt")?;

    let single_row_content = "11111\n";
    std::fs::write(dir.join("single_row.txt"), single_row_content)
        .context("Failed to write single_row.txt")?;

    // Item 2 appears in no row
    let uncoverable_content = "1100\n0001\n1001\n";
    std::fs::write(dir.join("uncoverable.txt"), uncoverable_content)
        .context("Failed to write uncoverable.txt")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_relation_from_string() {
        let content = "# comment\n010\n\n101\n";
        let relation = parse_relation_from_string(content).unwrap();

        assert_eq!(relation.width(), 3);
        assert_eq!(relation.row_count(), 2);
        assert!(relation.get(0, 1));
        assert!(relation.get(1, 0));
        assert!(relation.get(1, 2));
        assert_eq!(relation.set_count(), 3);
    }

    #[test]
    fn test_round_trip() {
        let original_content = "010\n101\n010\n";
        let relation = parse_relation_from_string(original_content).unwrap();
        assert_eq!(relation.to_string(), original_content);
    }

    #[test]
    fn test_file_operations() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("nested/relation.txt");

        let original = Relation::from_bits(&[[1, 0, 1], [0, 1, 0]]).unwrap();
        save_relation_to_file(&original, &file_path).unwrap();
        let loaded = load_relation_from_file(&file_path).unwrap();

        assert_eq!(original, loaded);
    }

    #[test]
    fn test_invalid_input() {
        assert!(parse_relation_from_string("010\n1X1\n").is_err());
        assert!(parse_relation_from_string("010\n11\n").is_err());
        assert!(parse_relation_from_string("").is_err());
        assert!(parse_relation_from_string("# only a comment\n").is_err());
    }

    #[test]
    fn test_create_example_relations() {
        let temp_dir = tempdir().unwrap();
        create_example_relations(temp_dir.path()).unwrap();

        assert!(temp_dir.path().join("knuth.txt").exists());
        assert!(temp_dir.path().join("single_row.txt").exists());
        assert!(temp_dir.path().join("uncoverable.txt").exists());

        let knuth = load_relation_from_file(temp_dir.path().join("knuth.txt")).unwrap();
        assert_eq!(knuth.width(), 7);
        assert_eq!(knuth.row_count(), 6);

        let uncoverable = load_relation_from_file(temp_dir.path().join("uncoverable.txt")).unwrap();
        assert_eq!(uncoverable.uncoverable_items(), vec![2]);
    }
}
