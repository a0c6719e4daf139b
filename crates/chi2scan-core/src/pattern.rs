use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::backend::{BackendError, PdfBackend};

/// `χ2/n = <number>` or `chi^2/n = <number>`, case-insensitive, with any
/// whitespace between the label tokens. Group 1 is the number.
static CHI2_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:χ\s*2\s*/\s*n|chi\s*\^?2\s*/\s*n)\s*=\s*([0-9]*\.?[0-9]+)").unwrap()
});

/// Extract every reduced chi-squared value from `text`, in document order.
///
/// Values are returned exactly as written (`0.50` stays `0.50`), so the
/// reports never reformat a number.
pub fn extract_chi2_values(text: &str) -> Vec<String> {
    CHI2_PATTERN
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Extract text from `path` via `backend` and pull out its chi-squared values.
pub fn extract_from_pdf(
    path: &Path,
    backend: &dyn PdfBackend,
) -> Result<Vec<String>, BackendError> {
    let text = backend.extract_text(path)?;
    Ok(extract_chi2_values(&text))
}
