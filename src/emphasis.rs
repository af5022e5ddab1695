//! Inline emphasis for preview and result text.
//!
//! The only markup understood is `_`: every underscore flips between plain and emphasized
//! text. There is no escaping and no nesting. A span left open at the end of the input is
//! closed anyway, so the output always ends outside emphasis.

pub const DELIMITER: char = '_';

/// Strings written around an emphasized run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmphasisMarkers<'a> {
    pub open: &'a str,
    pub close: &'a str,
}

pub const HTML_MARKERS: EmphasisMarkers<'static> = EmphasisMarkers {
    open: "<em>",
    close: "</em>",
};

/// ANSI italic on/off, for terminals.
pub const ANSI_MARKERS: EmphasisMarkers<'static> = EmphasisMarkers {
    open: "\x1b[3m",
    close: "\x1b[23m",
};

impl Default for EmphasisMarkers<'static> {
    fn default() -> Self {
        HTML_MARKERS
    }
}

/// Render `text` with `<em>` spans.
pub fn parse_emphasis(text: &str) -> String {
    parse_emphasis_with(text, HTML_MARKERS)
}

pub fn parse_emphasis_with(text: &str, markers: EmphasisMarkers<'_>) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    let mut open = false;

    for (i, segment) in text.split(DELIMITER).enumerate() {
        if i > 0 {
            out.push_str(if open { markers.close } else { markers.open });
            open = !open;
        }
        out.push_str(segment);
    }

    if open {
        out.push_str(markers.close);
    }
    out
}

/// Number of emphasized spans `parse_emphasis` would emit for `text`.
pub fn span_count(text: &str) -> usize {
    let delimiters = text.matches(DELIMITER).count();
    delimiters.div_ceil(2)
}
