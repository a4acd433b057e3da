//! Usage filter: keep only symbols the source tree actually mentions.
//!
//! A symbol counts as used when any scanned file contains it as a plain
//! substring, so `glBegin` is also "used" by a file that only calls
//! `glBeginQuery`.

use rayon::prelude::*;
use std::fs;
use std::path::PathBuf;

/// Contents of every scanned file, read once.
#[derive(Debug, Default)]
pub struct SourceCorpus {
    files: Vec<(PathBuf, String)>,
}

impl SourceCorpus {
    /// Reads `paths` in parallel. Unreadable files are logged and skipped;
    /// non-UTF-8 bytes are replaced.
    pub fn load(paths: &[PathBuf]) -> Self {
        let mut files: Vec<(PathBuf, String)> = paths
            .par_iter()
            .filter_map(|path| match fs::read(path) {
                Ok(bytes) => {
                    let text = match String::from_utf8(bytes) {
                        Ok(s) => s,
                        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
                    };
                    Some((path.clone(), text))
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "unreadable source file, skipped");
                    None
                }
            })
            .collect();
        files.sort_by(|a, b| a.0.cmp(&b.0));

        tracing::debug!(files = files.len(), "loaded source corpus");
        Self { files }
    }

    /// Builds a corpus from in-memory text.
    pub fn from_texts<I, P, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = (P, S)>,
        P: Into<PathBuf>,
        S: Into<String>,
    {
        Self {
            files: texts
                .into_iter()
                .map(|(p, s)| (p.into(), s.into()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// True if any file contains `word`.
    pub fn mentions(&self, word: &str) -> bool {
        self.files.iter().any(|(_, text)| text.contains(word))
    }
}

/// Keeps the items whose key the corpus mentions, preserving order.
///
/// Symbols are checked in parallel; each check walks the whole corpus.
pub fn filter_used<T, F>(items: Vec<T>, corpus: &SourceCorpus, key: F) -> Vec<T>
where
    T: Send,
    F: Fn(&T) -> &str + Sync,
{
    items
        .into_par_iter()
        .filter(|item| corpus.mentions(key(item)))
        .collect()
}
