/// A single `KEY=value` pair from a tag's attribute list, quotes removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub key: String,
    pub value: String,
}

/// Split the attribute list of a tag (the part after the first `:`).
///
/// Commas inside quotes do not separate attributes. A chunk without `=`
/// continues the previous value, which reassembles unquoted codec lists
/// such as `CODECS=avc1.4d401f,mp4a.40.2`. Chunks that precede any pair
/// are dropped.
pub fn parse_attributes(list: &str) -> Vec<Attribute> {
    let mut attrs: Vec<Attribute> = Vec::new();

    for chunk in split_unquoted(list) {
        match chunk.split_once('=') {
            Some((key, value)) => attrs.push(Attribute {
                key: key.trim().to_uppercase(),
                value: value.trim().trim_matches('"').to_string(),
            }),
            None => {
                let continuation = chunk.trim().trim_matches('"');
                if continuation.is_empty() {
                    continue;
                }
                if let Some(last) = attrs.last_mut() {
                    last.value.push(',');
                    last.value.push_str(continuation);
                }
            }
        }
    }

    attrs
}

/// Return the attribute list of a tag line, if it has one.
pub fn attribute_list<'a>(line: &'a str, tag: &str) -> Option<&'a str> {
    line.trim().strip_prefix(tag)?.strip_prefix(':')
}

fn split_unquoted(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;

    for (i, c) in s.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                parts.push(s[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }

    if start < s.len() {
        parts.push(s[start..].trim());
    }

    parts
}
