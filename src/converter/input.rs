//! Input discovery
//!
//! An input that does not start with an XML declaration is a meta-file:
//! a list of result files, one per line.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use log::info;

use crate::tandem::TandemError;

/// Identifier of a result file: its name up to the first `.`
pub fn file_id(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match name.split_once('.') {
        Some((stem, _)) => stem.to_string(),
        None => name,
    }
}

/// True when the first line of the file lacks an XML declaration
pub fn is_meta_file(path: &Path) -> Result<bool, TandemError> {
    let file = File::open(path).map_err(|source| TandemError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;
    let mut first_line = String::new();
    BufReader::new(file).read_line(&mut first_line)?;
    Ok(!first_line.contains("<?xml"))
}

/// Expand meta-files into the result files they list
///
/// Relative entries are resolved against the meta-file's directory.
/// Blank lines and lines starting with `#` are ignored.
pub fn expand_inputs<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<PathBuf>, TandemError> {
    let mut files = Vec::new();
    for path in paths {
        let path = path.as_ref();
        if !is_meta_file(path)? {
            files.push(path.to_path_buf());
            continue;
        }

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        let reader = BufReader::new(File::open(path)?);
        let before = files.len();
        for line in reader.lines() {
            let line = line?;
            let entry = line.trim();
            if entry.is_empty() || entry.starts_with('#') {
                continue;
            }
            let entry = Path::new(entry);
            files.push(if entry.is_absolute() {
                entry.to_path_buf()
            } else {
                base.join(entry)
            });
        }
        info!(
            "Meta-file {} lists {} result files",
            path.display(),
            files.len() - before
        );
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_file_id() {
        assert_eq!(file_id(Path::new("/data/run01.2024.t.xml")), "run01");
        assert_eq!(file_id(Path::new("run02")), "run02");
    }

    #[test]
    fn test_expand_meta_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = dir.path().join("a.t.xml");
        std::fs::write(&result, "<?xml version=\"1.0\"?>\n<bioml/>\n").unwrap();

        let meta = dir.path().join("inputs.txt");
        let mut f = File::create(&meta).unwrap();
        writeln!(f, "# results").unwrap();
        writeln!(f, "a.t.xml").unwrap();
        writeln!(f).unwrap();
        writeln!(f, "/abs/b.t.xml").unwrap();

        let files = expand_inputs(&[meta, result.clone()]).unwrap();
        assert_eq!(
            files,
            vec![result.clone(), PathBuf::from("/abs/b.t.xml"), result]
        );
    }
}
