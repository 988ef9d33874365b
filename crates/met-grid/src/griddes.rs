//! Parser for CDO-style grid description text.
//!
//! ```text
//! # regular 1° grid over central Europe
//! gridtype  = lonlat
//! xsize     = 21
//! ysize     = 11
//! xfirst    = 0
//! xinc      = 1
//! yfirst    = 45
//! yinc      = 1
//! xunits    = "degrees_east"
//! ```
//!
//! Long `xvals`/`yvals` lists may wrap onto following lines that hold only
//! numbers.

use tracing::warn;

use crate::descriptor::{DescriptorValue, RawDescriptor};
use crate::error::{GridError, Result};

/// Parse grid description text into a raw descriptor mapping.
pub fn parse_griddes(text: &str) -> Result<RawDescriptor> {
    let mut raw = RawDescriptor::new();
    let mut last_key: Option<String> = None;

    for (lineno, line) in text.lines().enumerate() {
        let line = strip_comment(line).trim();
        if line.is_empty() {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            if let Some(numbers) = parse_numbers(line) {
                let key = last_key.as_ref().ok_or_else(|| {
                    GridError::parse_error(format!("line {}: values without a key", lineno + 1))
                })?;
                extend_list(&mut raw, key, numbers, lineno)?;
            } else {
                warn!(line = lineno + 1, content = line, "skipping unrecognised grid description line");
            }
            continue;
        };

        let key = key.trim().to_lowercase();
        if key.is_empty() {
            return Err(GridError::parse_error(format!("line {}: empty key", lineno + 1)));
        }

        raw.insert(key.clone(), parse_value(value.trim()));
        last_key = Some(key);
    }

    if raw.is_empty() {
        return Err(GridError::parse_error("no `key = value` entries found"));
    }
    Ok(raw)
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn parse_numbers(text: &str) -> Option<Vec<f64>> {
    text.split_whitespace()
        .map(|token| token.parse::<f64>().ok())
        .collect()
}

fn parse_value(value: &str) -> DescriptorValue {
    match parse_numbers(value) {
        Some(numbers) if numbers.len() == 1 => DescriptorValue::Number(numbers[0]),
        Some(numbers) if !numbers.is_empty() => DescriptorValue::List(numbers),
        _ => DescriptorValue::Text(unquote(value).to_string()),
    }
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value.strip_prefix(quote).and_then(|v| v.strip_suffix(quote)) {
            return inner;
        }
    }
    value
}

fn extend_list(raw: &mut RawDescriptor, key: &str, numbers: Vec<f64>, lineno: usize) -> Result<()> {
    let merged = match raw.remove(key) {
        Some(DescriptorValue::Number(n)) => std::iter::once(n).chain(numbers).collect(),
        Some(DescriptorValue::List(mut list)) => {
            list.extend(numbers);
            list
        }
        _ => {
            return Err(GridError::parse_error(format!(
                "line {}: numeric continuation of non-numeric key `{}`",
                lineno + 1,
                key
            )))
        }
    };
    raw.insert(key.to_string(), DescriptorValue::List(merged));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::GridDescriptor;

    #[test]
    fn test_parse_regular() {
        let text = r#"
# comment line
gridtype  = lonlat
xsize     = 2
ysize     = 3   # trailing comment
xfirst    = 10
xinc      = 0.5
yfirst    = 50
yinc      = 1
xunits    = "degrees_east"
"#;
        let raw = parse_griddes(text).unwrap();
        assert_eq!(raw["gridtype"], DescriptorValue::Text("lonlat".into()));
        assert_eq!(raw["xinc"], DescriptorValue::Number(0.5));
        assert_eq!(raw["xunits"], DescriptorValue::Text("degrees_east".into()));

        let d = GridDescriptor::from_raw(&raw).unwrap();
        assert_eq!(d.shape(), vec![3, 2]);
    }

    #[test]
    fn test_continuation_lines() {
        let text = "gridtype = unstructured\n\
                    gridsize = 5\n\
                    xvals = 1 2 3\n\
                    4 5\n\
                    yvals = 6\n\
                    7 8 9 10\n";
        let raw = parse_griddes(text).unwrap();
        assert_eq!(raw["xvals"], DescriptorValue::List(vec![1.0, 2.0, 3.0, 4.0, 5.0]));
        assert_eq!(raw["yvals"], DescriptorValue::List(vec![6.0, 7.0, 8.0, 9.0, 10.0]));
        assert!(GridDescriptor::from_raw(&raw).is_ok());
    }

    #[test]
    fn test_keys_lowercased() {
        let raw = parse_griddes("GridType = curvilinear\n").unwrap();
        assert!(raw.contains_key("gridtype"));
    }

    #[test]
    fn test_unrecognised_lines_skipped() {
        let raw = parse_griddes("gridtype = lonlat\nnot a pair\n").unwrap();
        assert_eq!(raw.len(), 1);
    }

    #[test]
    fn test_errors() {
        assert!(matches!(parse_griddes("# nothing\n\n"), Err(GridError::ParseError(_))));
        assert!(matches!(parse_griddes("= 5\n"), Err(GridError::ParseError(_))));
        assert!(matches!(parse_griddes("1 2 3\n"), Err(GridError::ParseError(_))));
        assert!(matches!(
            parse_griddes("gridtype = lonlat\n1 2\n"),
            Err(GridError::ParseError(_))
        ));
    }
}
