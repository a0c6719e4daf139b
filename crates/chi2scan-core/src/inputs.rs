use std::path::{Path, PathBuf};

use globset::{Glob, GlobMatcher};
use walkdir::WalkDir;

const PDF_SUFFIX: &str = ".pdf";

/// Resolve a user-supplied input into the ordered list of PDFs to scan.
///
/// - an existing file whose name ends in `.pdf` → just that file
/// - an existing directory → its direct `*.pdf` children
/// - anything else → expanded as a glob pattern
///
/// Results are sorted by path bytes. An input that matches nothing yields
/// an empty list; this never fails.
pub fn collect_input_pdfs(input: &str) -> Vec<PathBuf> {
    let path = Path::new(input);
    if path.is_file() && input.ends_with(PDF_SUFFIX) {
        return vec![path.to_path_buf()];
    }
    if path.is_dir() {
        return list_pdf_dir(path);
    }
    expand_glob(input)
}

fn list_pdf_dir(dir: &Path) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(dir = %dir.display(), error = %e, "failed to list input directory");
            return Vec::new();
        }
    };

    let mut pdfs: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .filter(|entry| is_pdf_name(&entry.file_name().to_string_lossy()))
        .map(|entry| entry.path())
        .collect();
    sort_paths(&mut pdfs);
    pdfs
}

/// Names a `*.pdf` wildcard would match: hidden entries are left out.
fn is_pdf_name(name: &str) -> bool {
    !name.starts_with('.') && name.ends_with(PDF_SUFFIX)
}

fn has_wildcard(part: &str) -> bool {
    part.contains(['*', '?', '['])
}

/// One wildcard path component, matched against a single file name.
struct ComponentMatcher {
    matcher: GlobMatcher,
    matches_hidden: bool,
}

impl ComponentMatcher {
    fn new(part: &str) -> Result<Self, globset::Error> {
        Ok(Self {
            matcher: Glob::new(part)?.compile_matcher(),
            matches_hidden: part.starts_with('.'),
        })
    }

    fn is_match(&self, name: &str) -> bool {
        if name.starts_with('.') && !self.matches_hidden {
            return false;
        }
        self.matcher.is_match(name)
    }
}

/// Expand a glob pattern into the sorted list of existing paths it matches.
///
/// The leading wildcard-free components form the directory that gets
/// walked; every remaining component must match the entry at the same
/// depth, so `data/*/*.pdf` never recurses deeper than two levels. A
/// pattern without wildcards matches itself if that path exists.
pub fn expand_glob(pattern: &str) -> Vec<PathBuf> {
    let mut base = PathBuf::new();
    let mut wildcard_parts: Vec<String> = Vec::new();
    for component in Path::new(pattern).components() {
        let part = component.as_os_str().to_string_lossy();
        if wildcard_parts.is_empty() && !has_wildcard(&part) {
            base.push(component);
        } else {
            wildcard_parts.push(part.into_owned());
        }
    }

    if wildcard_parts.is_empty() {
        let path = PathBuf::from(pattern);
        return if path.exists() { vec![path] } else { Vec::new() };
    }

    let matchers = match wildcard_parts
        .iter()
        .map(|part| ComponentMatcher::new(part))
        .collect::<Result<Vec<_>, _>>()
    {
        Ok(matchers) => matchers,
        Err(e) => {
            tracing::warn!(pattern, error = %e, "invalid glob pattern");
            return Vec::new();
        }
    };

    let relative = base.as_os_str().is_empty();
    let root = if relative { PathBuf::from(".") } else { base };
    let depth = matchers.len();

    let mut paths: Vec<PathBuf> = WalkDir::new(&root)
        .min_depth(1)
        .max_depth(depth)
        .follow_links(true)
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || matchers[entry.depth() - 1].is_match(&entry.file_name().to_string_lossy())
        })
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::debug!(error = %e, "skipping unreadable path during glob expansion");
                None
            }
        })
        .filter(|entry| entry.depth() == depth)
        .map(|entry| {
            if relative {
                entry
                    .path()
                    .strip_prefix(".")
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|_| entry.path().to_path_buf())
            } else {
                entry.into_path()
            }
        })
        .collect();

    sort_paths(&mut paths);
    paths
}

fn sort_paths(paths: &mut [PathBuf]) {
    paths.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"%PDF-1.4\n").unwrap();
    }

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn single_pdf_file_is_returned_as_is() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = dir.path().join("plot.pdf");
        touch(&pdf);

        let input = pdf.to_str().unwrap();
        assert_eq!(collect_input_pdfs(input), vec![pdf.clone()]);
    }

    #[test]
    fn directory_lists_only_direct_pdf_children_sorted() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("b.pdf"));
        touch(&dir.path().join("a.pdf"));
        touch(&dir.path().join("notes.txt"));
        touch(&dir.path().join(".hidden.pdf"));
        touch(&dir.path().join("nested").join("c.pdf"));

        let found = collect_input_pdfs(dir.path().to_str().unwrap());
        assert_eq!(names(&found), vec!["a.pdf", "b.pdf"]);
        assert!(found.iter().all(|p| p.parent() == Some(dir.path())));
    }

    #[test]
    fn directory_without_pdfs_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("readme.md"));
        assert!(collect_input_pdfs(dir.path().to_str().unwrap()).is_empty());
    }

    #[test]
    fn glob_pattern_matches_sorted() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("run2_fit.pdf"));
        touch(&dir.path().join("run1_fit.pdf"));
        touch(&dir.path().join("run1_raw.pdf"));

        let pattern = format!("{}/run*_fit.pdf", dir.path().display());
        assert_eq!(
            names(&collect_input_pdfs(&pattern)),
            vec!["run1_fit.pdf", "run2_fit.pdf"]
        );
    }

    #[test]
    fn glob_pattern_spans_directories_without_recursing() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("x").join("a.pdf"));
        touch(&dir.path().join("y").join("b.pdf"));
        touch(&dir.path().join("y").join("deeper").join("c.pdf"));
        touch(&dir.path().join("top.pdf"));

        let pattern = format!("{}/*/*.pdf", dir.path().display());
        let found = collect_input_pdfs(&pattern);
        assert_eq!(
            found,
            vec![
                dir.path().join("x").join("a.pdf"),
                dir.path().join("y").join("b.pdf"),
            ]
        );
    }

    #[test]
    fn glob_question_mark_and_class() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("p1.pdf"));
        touch(&dir.path().join("p2.pdf"));
        touch(&dir.path().join("p10.pdf"));

        let pattern = format!("{}/p?.pdf", dir.path().display());
        assert_eq!(names(&collect_input_pdfs(&pattern)), vec!["p1.pdf", "p2.pdf"]);

        let pattern = format!("{}/p[2].pdf", dir.path().display());
        assert_eq!(names(&collect_input_pdfs(&pattern)), vec!["p2.pdf"]);
    }

    #[test]
    fn glob_skips_hidden_unless_pattern_is_hidden() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join(".draft.pdf"));
        touch(&dir.path().join("final.pdf"));

        let pattern = format!("{}/*.pdf", dir.path().display());
        assert_eq!(names(&collect_input_pdfs(&pattern)), vec!["final.pdf"]);

        let pattern = format!("{}/.*.pdf", dir.path().display());
        assert_eq!(names(&collect_input_pdfs(&pattern)), vec![".draft.pdf"]);
    }

    #[test]
    fn literal_non_pdf_file_falls_through_to_pattern() {
        let dir = tempfile::tempdir().unwrap();
        let txt = dir.path().join("plot.txt");
        touch(&txt);
        assert_eq!(collect_input_pdfs(txt.to_str().unwrap()), vec![txt.clone()]);
    }

    #[test]
    fn unmatched_input_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.pdf");
        assert!(collect_input_pdfs(missing.to_str().unwrap()).is_empty());

        let pattern = format!("{}/*.pdf", dir.path().display());
        assert!(collect_input_pdfs(&pattern).is_empty());
    }

    #[test]
    fn invalid_pattern_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("a.pdf"));
        let pattern = format!("{}/[a.pdf", dir.path().display());
        assert!(collect_input_pdfs(&pattern).is_empty());
    }

    #[test]
    fn is_pdf_name_rules() {
        assert!(is_pdf_name("fit.pdf"));
        assert!(!is_pdf_name("fit.PDF"));
        assert!(!is_pdf_name(".fit.pdf"));
        assert!(!is_pdf_name("fit.pdf.bak"));
    }
}
