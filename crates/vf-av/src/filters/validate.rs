//! Parameter checks shared by the filter catalog.

use std::path::Path;

use vf_core::Error;

/// Characters that separate options, filters, chains, and labels in an
/// ffmpeg filter graph.
const GRAPH_SEPARATORS: &[char] = &[':', ',', ';', '[', ']', '\''];

/// An odd integer within `[min, max]`.
pub(crate) fn odd_in_range(op: &str, param: &str, value: u32, min: u32, max: u32) -> vf_core::Result<()> {
    if value < min || value > max {
        return Err(Error::invalid(op, param, format!("{value} is outside [{min}, {max}]")));
    }
    if value % 2 == 0 {
        return Err(Error::invalid(op, param, format!("{value} must be odd")));
    }
    Ok(())
}

/// A finite float within `[min, max]`.
pub(crate) fn in_range(op: &str, param: &str, value: f64, min: f64, max: f64) -> vf_core::Result<()> {
    if !value.is_finite() || value < min || value > max {
        return Err(Error::invalid(op, param, format!("{value} is outside [{min}, {max}]")));
    }
    Ok(())
}

/// A single ffmpeg expression such as `iw/2` or `PI/4`.
pub(crate) fn expression(op: &str, param: &str, value: &str) -> vf_core::Result<()> {
    if value.trim().is_empty() {
        return Err(Error::invalid(op, param, "expression is empty"));
    }
    if let Some(c) = value.chars().find(|c| GRAPH_SEPARATORS.contains(c)) {
        return Err(Error::invalid(
            op,
            param,
            format!("'{c}' is not allowed in an expression"),
        ));
    }
    Ok(())
}

/// A bare word such as a color name or `#ff0000`.
pub(crate) fn token(op: &str, param: &str, value: &str) -> vf_core::Result<()> {
    let ok = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '#' || c == '_');
    if !ok {
        return Err(Error::invalid(op, param, format!("'{value}' is not a plain token")));
    }
    Ok(())
}

/// A non-empty, UTF-8 path. Arguments reach ffmpeg as strings, so any
/// other path would name a different file.
pub(crate) fn path(op: &str, param: &str, value: &Path) -> vf_core::Result<()> {
    if value.as_os_str().is_empty() {
        return Err(Error::invalid(op, param, "path is empty"));
    }
    if value.to_str().is_none() {
        return Err(Error::invalid(
            op,
            param,
            format!("{} is not valid UTF-8", value.display()),
        ));
    }
    Ok(())
}
