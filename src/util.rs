use std::borrow::Cow;

/// escape text for use inside an element or a double-quoted attribute value
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(|c: char| matches!(c, '&' | '<' | '>' | '"' | '\'')) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// substitution is either verbatim or escaped, depending on the caller's choice
pub fn substitute(text: &str, escape: bool) -> Cow<'_, str> {
    if escape {
        escape_html(text)
    } else {
        Cow::Borrowed(text)
    }
}
