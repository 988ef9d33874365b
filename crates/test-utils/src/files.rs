//! Temporary files holding grid descriptions.

use std::io::Write;

use tempfile::NamedTempFile;

/// Write `text` to a fresh temporary file.
///
/// The file is removed when the returned handle is dropped, so keep it alive
/// for as long as the path is used.
pub fn write_griddes(text: &str) -> std::io::Result<NamedTempFile> {
    let mut file = tempfile::Builder::new()
        .prefix("griddes-")
        .suffix(".txt")
        .tempfile()?;
    file.write_all(text.as_bytes())?;
    file.flush()?;
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_griddes_roundtrip() {
        let file = write_griddes("gridtype = lonlat\n").unwrap();
        let text = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(text, "gridtype = lonlat\n");
        assert!(file.path().to_string_lossy().ends_with(".txt"));
    }
}
