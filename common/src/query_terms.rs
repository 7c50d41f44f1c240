//! Building query strings for drill-down links.

const RESERVED_CHARS: [char; 17] = [
    '+', '-', '&', '|', '!', '(', ')', '{', '}', '[', ']', '^', '"', '~', '*', '?', ':',
];

/// Escapes a term so the query parser reads it literally.
pub fn escape_query_term(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if c == '\\' || RESERVED_CHARS.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// `field:value` matching `value` as a single term; whitespace is escaped too.
pub fn field_term_query(field: &str, value: &str) -> String {
    let mut term = String::with_capacity(value.len());
    for c in escape_query_term(value).chars() {
        if c.is_whitespace() {
            term.push('\\');
        }
        term.push(c);
    }
    format!("{}:{}", field, term)
}
