//  EDITOR.rs
//    by Milkdrinkers
//
//  Created:
//    18 Feb 2025, 09:30:21
//  Last edited:
//    22 Aug 2025, 16:55:47
//  Auto updated?
//    Yes
//
//  Description:
//!   Line-based editing of YAML text: header manipulation and carrying
//!   comments from a file's previous contents over into a fresh dump.
//!
//!   The YAML parser drops comments, so preservation works on the raw
//!   lines instead: every comment block is remembered under the dotted
//!   path of the key that follows it, and re-attached wherever that key
//!   ends up in the new dump. Comments of keys that were removed
//!   disappear with the key; comments after the last key are kept as a
//!   footer.
//

use std::collections::HashMap;


/***** HELPERS *****/
/// Parses a line as a `key:` line, returning its indentation and key name.
///
/// Comment lines, blank lines and sequence entries are not key lines.
fn key_of(line: &str) -> Option<(usize, &str)> {
    let trimmed: &str = line.trim_start();
    if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('-') {
        return None;
    }
    let colon: usize = trimmed.find(':')?;
    let name: &str = trimmed[..colon].trim().trim_matches('"').trim_matches('\'');
    if name.is_empty() {
        return None;
    }
    Some((line.len() - trimmed.len(), name))
}

/// Returns whether the value on this `key:` line introduces a block scalar
/// (`|` or `>`, possibly with chomping/indentation indicators).
fn opens_block_scalar(line: &str) -> bool {
    let trimmed: &str = line.trim_start();
    match trimmed.find(':') {
        Some(colon) => {
            let value: &str = trimmed[colon + 1..].trim_start();
            value.starts_with('|') || value.starts_with('>')
        },
        None => false,
    }
}

/// Returns whether a line still belongs to a block scalar opened by a key at
/// the given indentation.
#[inline]
fn in_block_scalar(line: &str, block_indent: usize) -> bool {
    let trimmed: &str = line.trim_start();
    trimmed.is_empty() || line.len() - trimmed.len() > block_indent
}

/// Updates the key stack for a key at the given indentation, returning the
/// dotted path of the key.
fn push_key(stack: &mut Vec<(usize, String)>, indent: usize, name: &str) -> String {
    while stack.last().is_some_and(|(i, _)| *i >= indent) {
        stack.pop();
    }
    stack.push((indent, name.into()));
    stack.iter().map(|(_, name)| name.as_str()).collect::<Vec<&str>>().join(".")
}

/// Collects the comment blocks of the given YAML text, keyed by the dotted path
/// of the key each block precedes. Trailing comments live under the empty key.
fn extract_comments(raw: &str) -> HashMap<String, Vec<String>> {
    let mut comments: HashMap<String, Vec<String>> = HashMap::new();
    let mut pending: Vec<String> = Vec::new();
    let mut stack: Vec<(usize, String)> = Vec::new();
    let mut block_indent: Option<usize> = None;
    for line in raw.lines() {
        // Lines inside a block scalar are string content, not comments or keys
        if let Some(indent) = block_indent {
            if in_block_scalar(line, indent) {
                continue;
            }
            block_indent = None;
        }

        let trimmed: &str = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            pending.push(line.into());
            continue;
        }
        match key_of(line) {
            Some((indent, name)) => {
                let path: String = push_key(&mut stack, indent, name);
                if !pending.is_empty() {
                    comments.entry(path).or_default().append(&mut pending);
                }
                if opens_block_scalar(line) {
                    block_indent = Some(indent);
                }
            },
            // Sequence entries and continuations never own a comment block
            None => pending.clear(),
        }
    }
    if pending.iter().any(|line| line.trim_start().starts_with('#')) {
        comments.insert(String::new(), pending);
    }
    comments
}

/// Ensures a header line carries the comment marker.
#[inline]
fn as_comment(line: &str) -> String { if line.starts_with('#') { line.into() } else { format!("#{line}") } }

/// Joins lines back into file text with a trailing newline.
fn join(lines: Vec<String>) -> String {
    let mut raw: String = lines.join("\n");
    raw.push('\n');
    raw
}





/***** LIBRARY *****/
/// Re-attaches the comments of `old` to the matching keys of `new`.
pub fn merge_comments(old: &str, new: &str) -> String {
    let mut comments: HashMap<String, Vec<String>> = extract_comments(old);
    if comments.is_empty() {
        return new.into();
    }

    let mut lines: Vec<String> = Vec::new();
    let mut stack: Vec<(usize, String)> = Vec::new();
    let mut block_indent: Option<usize> = None;
    for line in new.lines() {
        // Block scalar content passes through untouched
        if let Some(indent) = block_indent {
            if in_block_scalar(line, indent) {
                lines.push(line.into());
                continue;
            }
            block_indent = None;
        }

        if let Some((indent, name)) = key_of(line) {
            let path: String = push_key(&mut stack, indent, name);
            if let Some(mut block) = comments.remove(&path) {
                lines.append(&mut block);
            }
            if opens_block_scalar(line) {
                block_indent = Some(indent);
            }
        }
        lines.push(line.into());
    }
    if let Some(mut footer) = comments.remove("") {
        lines.append(&mut footer);
    }
    join(lines)
}

/// Returns the leading comment lines of the given text.
pub fn header_lines(raw: &str) -> Vec<String> {
    raw.lines().take_while(|line| line.starts_with('#')).map(String::from).collect()
}

/// Replaces the leading comment lines of the text with the given header.
///
/// Header lines that miss the comment marker get one prefixed.
pub fn set_header(raw: &str, header: &[String]) -> String {
    let mut lines: Vec<String> = header.iter().map(|line| as_comment(line)).collect();
    lines.extend(raw.lines().skip_while(|line| line.starts_with('#')).map(String::from));
    join(lines)
}

/// Prepends the given header lines, keeping any existing header below them.
pub fn add_header(raw: &str, header: &[String]) -> String {
    let mut lines: Vec<String> = header.iter().map(|line| as_comment(line)).collect();
    lines.extend(raw.lines().map(String::from));
    join(lines)
}





/***** TESTS *****/
