//! Minimal Python source scanning.
//!
//! Enough to pull literal lists, call arguments and string constants out of
//! migration files. Nothing is evaluated; anything that is not a plain literal
//! is ignored by the callers.

/// The text between the bracket at `open` and its matching close bracket.
///
/// String literals and comments are skipped. Returns `None` when `open` is not
/// an opening bracket or the block is never closed.
pub(crate) fn bracket_body(source: &str, open: usize) -> Option<&str> {
    let bytes = source.as_bytes();
    if !matches!(bytes.get(open), Some(b'(' | b'[' | b'{')) {
        return None;
    }

    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        match bytes[i] {
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(&source[open + 1..i]);
                }
            }
            b'\'' | b'"' => {
                i = skip_string(bytes, i)?;
                continue;
            }
            b'#' => {
                i = skip_comment(bytes, i);
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Split a bracket body on top-level commas. Empty items are dropped.
pub(crate) fn split_top_level(body: &str) -> Vec<&str> {
    let bytes = body.as_bytes();
    let mut items = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => depth = depth.saturating_sub(1),
            b'\'' | b'"' => {
                i = skip_string(bytes, i).unwrap_or(bytes.len());
                continue;
            }
            b'#' => {
                i = skip_comment(bytes, i);
                continue;
            }
            b',' if depth == 0 => {
                items.push(&body[start..i]);
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    items.push(&body[start..]);

    items
        .into_iter()
        .map(strip_comments)
        .filter(|item| !item.is_empty())
        .collect()
}

/// The value of a single string literal expression such as `'users'`
pub(crate) fn string_literal(expr: &str) -> Option<String> {
    let expr = expr.trim();
    let literal = expr.trim_start_matches(|c: char| matches!(c, 'r' | 'R' | 'u' | 'U'));
    let bytes = literal.as_bytes();
    let quote = *bytes.first()?;
    if quote != b'\'' && quote != b'"' {
        return None;
    }
    if skip_string(bytes, 0)? != bytes.len() {
        return None;
    }

    let width = if bytes.len() >= 6 && bytes.starts_with(&[quote; 3]) {
        3
    } else {
        1
    };
    Some(literal[width..literal.len() - width].to_string())
}

/// A call expression `callee(args)` split into its callee and arguments
pub(crate) struct Call<'a> {
    pub(crate) callee: &'a str,
    pub(crate) args: Vec<&'a str>,
}

impl<'a> Call<'a> {
    /// Parse `expr` as a call whose callee is a dotted name
    pub(crate) fn parse(expr: &'a str) -> Option<Self> {
        let expr = expr.trim();
        let open = expr.find('(')?;
        let callee = expr[..open].trim_end();
        if callee.is_empty() || !callee.split('.').all(is_identifier) {
            return None;
        }
        let body = bracket_body(expr, open)?;
        Some(Self {
            callee,
            args: split_top_level(body),
        })
    }

    /// Last segment of the callee, e.g. `AddField` for `migrations.AddField`
    pub(crate) fn name(&self) -> &'a str {
        self.callee.rsplit('.').next().unwrap_or(self.callee)
    }

    /// First positional argument that is a string literal
    pub(crate) fn first_string_arg(&self) -> Option<String> {
        self.args
            .iter()
            .find(|arg| keyword(arg).is_none())
            .and_then(|arg| string_literal(arg))
    }

    /// First keyword argument among `names` whose value is a string literal
    pub(crate) fn string_kwarg(&self, names: &[&str]) -> Option<String> {
        self.args
            .iter()
            .filter_map(|arg| keyword(arg))
            .filter(|(key, _)| names.contains(key))
            .find_map(|(_, value)| string_literal(value))
    }
}

/// Split `key=value` into its parts; `None` for positional arguments
pub(crate) fn keyword(arg: &str) -> Option<(&str, &str)> {
    let eq = arg.find('=')?;
    let key = arg[..eq].trim();
    let value = &arg[eq + 1..];
    if !is_identifier(key) || value.starts_with('=') {
        return None;
    }
    Some((key, value.trim()))
}

fn is_identifier(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '_')
}

/// Index just past the string literal starting at `start`, or `None` if unterminated
fn skip_string(bytes: &[u8], start: usize) -> Option<usize> {
    let quote = bytes[start];
    let fence = [quote; 3];
    let triple = bytes.get(start..start + 3) == Some(&fence[..]);
    let mut i = if triple { start + 3 } else { start + 1 };

    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => {
                if !triple {
                    return Some(i + 1);
                }
                if bytes.get(i..i + 3) == Some(&fence[..]) {
                    return Some(i + 3);
                }
                i += 1;
            }
            b'\n' if !triple => return None,
            _ => i += 1,
        }
    }
    None
}

/// Index of the newline ending the comment at `start`
fn skip_comment(bytes: &[u8], start: usize) -> usize {
    bytes[start..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(bytes.len(), |offset| start + offset)
}

/// Drop full-line comments from an item and trim it
fn strip_comments(item: &str) -> &str {
    let mut item = item.trim();
    while item.starts_with('#') {
        item = item.find('\n').map_or("", |nl| item[nl + 1..].trim());
    }
    item
}

#[cfg(test)]
#[path = "python_test.rs"]
mod tests;
