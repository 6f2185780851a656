//! Utility functions for string handling
//!
//! UTF-8 safe truncation for diagnostics and previews, plus the docstring
//! normalization applied to every extracted docstring.

/// Safely truncate a string at a UTF-8 char boundary.
///
/// # Examples
/// ```
/// use aegis_code::utils::truncate_to_char_boundary;
///
/// assert_eq!(truncate_to_char_boundary("hello world", 5), "hello");
///
/// let s = "abc੨def"; // '੨' spans bytes 3-5
/// assert_eq!(truncate_to_char_boundary(s, 4), "abc");
/// assert_eq!(truncate_to_char_boundary(s, 6), "abc੨");
/// ```
pub fn truncate_to_char_boundary(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Safely truncate a string and append an ellipsis.
pub fn truncate_with_ellipsis(s: &str, max_bytes: usize) -> String {
    if s.len() <= max_bytes {
        s.to_string()
    } else {
        format!("{}...", truncate_to_char_boundary(s, max_bytes))
    }
}

/// Expand tab characters to spaces using tab stops every `tab_size` columns.
pub fn expand_tabs(line: &str, tab_size: usize) -> String {
    let mut out = String::with_capacity(line.len());
    let mut column = 0;
    for ch in line.chars() {
        match ch {
            '\t' => {
                let pad = tab_size - (column % tab_size);
                out.extend(std::iter::repeat(' ').take(pad));
                column += pad;
            }
            '\n' | '\r' => {
                out.push(ch);
                column = 0;
            }
            _ => {
                out.push(ch);
                column += 1;
            }
        }
    }
    out
}

/// Normalize docstring indentation.
///
/// Tabs are expanded, the first line loses its leading whitespace, the
/// smallest indentation of the remaining non-blank lines is removed from
/// each of them, and leading and trailing blank lines are dropped.
///
/// ```
/// use aegis_code::utils::clean_docstring;
///
/// let raw = "Summary.\n\n    Details here.\n        Indented.\n    ";
/// assert_eq!(clean_docstring(raw), "Summary.\n\nDetails here.\n    Indented.");
/// ```
pub fn clean_docstring(doc: &str) -> String {
    let normalized = doc.replace("\r\n", "\n").replace('\r', "\n");
    let expanded = expand_tabs(&normalized, 8);
    let mut lines: Vec<String> = expanded.split('\n').map(str::to_string).collect();

    let margin = lines
        .iter()
        .skip(1)
        .filter_map(|line| {
            let content = line.trim_start();
            (!content.is_empty()).then(|| line.chars().count() - content.chars().count())
        })
        .min();

    if let Some(first) = lines.first_mut() {
        *first = first.trim_start().to_string();
    }
    if let Some(margin) = margin {
        for line in lines.iter_mut().skip(1) {
            *line = line.chars().skip(margin).collect();
        }
    }

    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    let leading_blank = lines.iter().take_while(|line| line.is_empty()).count();
    lines.drain(..leading_blank);

    lines.join("\n")
}
