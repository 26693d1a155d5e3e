use crate::{DocId, DocumentStatus};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A document as read from a corpus file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputDoc {
    pub id: DocId,
    pub text: String,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(default)]
    pub ratings: Vec<i32>,
}

/// Read documents from a `.json`/`.jsonl` file or every such file under a
/// directory, in sorted path order.
pub fn load_corpus<P: AsRef<Path>>(path: P) -> Result<Vec<InputDoc>> {
    let path = path.as_ref();
    let mut files: Vec<PathBuf> = Vec::new();
    if path.is_dir() {
        for entry in WalkDir::new(path).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && matches!(extension(p), Some("json" | "jsonl")) {
                files.push(p.to_path_buf());
            }
        }
    } else {
        files.push(path.to_path_buf());
    }

    let mut docs = Vec::new();
    for file in files {
        let before = docs.len();
        if extension(&file) == Some("jsonl") {
            read_jsonl(&file, &mut docs)?;
        } else {
            read_json(&file, &mut docs)?;
        }
        tracing::debug!(file = %file.display(), count = docs.len() - before, "read corpus file");
    }
    Ok(docs)
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|s| s.to_str())
}

fn read_jsonl(file: &Path, docs: &mut Vec<InputDoc>) -> Result<()> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    for (lineno, line) in BufReader::new(f).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let doc: InputDoc = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}: invalid document", file.display(), lineno + 1))?;
        docs.push(doc);
    }
    Ok(())
}

fn read_json(file: &Path, docs: &mut Vec<InputDoc>) -> Result<()> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let json: serde_json::Value = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("{}: invalid JSON", file.display()))?;
    match json {
        serde_json::Value::Array(arr) => {
            for v in arr {
                docs.push(serde_json::from_value(v).with_context(|| format!("{}: invalid document", file.display()))?);
            }
        }
        other => docs.push(serde_json::from_value(other).with_context(|| format!("{}: invalid document", file.display()))?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn reads_json_and_jsonl_from_directory() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("a.json"),
            r#"[{"id": 0, "text": "белый кот", "ratings": [8, -3]}, {"id": 3, "text": "скворец", "status": "banned"}]"#,
        )
        .unwrap();
        fs::write(dir.path().join("b.jsonl"), "{\"id\": 1, \"text\": \"пёс\"}\n\n{\"id\": 2, \"text\": \"хвост\"}\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let docs = load_corpus(dir.path()).unwrap();
        let ids: Vec<DocId> = docs.iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![0, 3, 1, 2]);
        assert_eq!(docs[0].ratings, vec![8, -3]);
        assert_eq!(docs[1].status, DocumentStatus::Banned);
        assert_eq!(docs[2].status, DocumentStatus::Actual);
        assert!(docs[2].ratings.is_empty());
    }

    #[test]
    fn negative_id_is_rejected() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("docs.json");
        fs::write(&file, r#"[{"id": 2, "text": "кот"}, {"id": -4, "text": "пёс"}]"#).unwrap();
        let err = load_corpus(&file).unwrap_err();
        assert!(format!("{err:#}").contains("docs.json: invalid document"));
    }

    #[test]
    fn reports_bad_line() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("bad.jsonl");
        fs::write(&file, "{\"id\": 1, \"text\": \"ok\"}\n{\"id\": -1}\n").unwrap();
        let err = load_corpus(&file).unwrap_err();
        assert!(format!("{err:#}").contains("bad.jsonl:2"));
    }
}
