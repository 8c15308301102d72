use std::fmt::{Display, Write};

use crate::geometry::Domain;

/// Formats an image as a grid of right-aligned values, one row per line.
pub fn format_image<T: Display>(values: &[T], domain: &Domain) -> String {
    let cells: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    let cell_width = cells.iter().map(String::len).max().unwrap_or(1);

    let mut out = String::new();
    for row in cells.chunks(domain.width().max(1) as usize) {
        let line: Vec<String> = row
            .iter()
            .map(|cell| format!("{cell:>cell_width$}"))
            .collect();
        let _ = writeln!(out, "{}", line.join(" "));
    }
    out
}

/// Formats a binary image with `1` for set pixels and `0` elsewhere.
pub fn format_mask(mask: &[bool], domain: &Domain) -> String {
    let values: Vec<u8> = mask.iter().map(|&m| m as u8).collect();
    format_image(&values, domain)
}
