//! Replacement template expansion
//!
//! Supports `$1`, `$12`, `$<name>`, `$&`, `` $` ``, `$'` and `$$`, with the
//! same resolution rules browsers apply to `String.prototype.replace`.

use super::engine::Spans;

/// Substitute every match in `text` using `template`.
///
/// `matches` must be ascending and non-overlapping, as produced by a scan.
pub fn replace_matches(
    text: &str,
    matches: &[Spans],
    template: &str,
    names: &[Option<String>],
) -> String {
    let mut result = String::with_capacity(text.len());
    let mut last_end = 0;

    for spans in matches {
        result.push_str(&text[last_end..spans.start()]);
        result.push_str(&expand_template(template, text, spans, names));
        last_end = spans.end();
    }
    result.push_str(&text[last_end..]);

    result
}

/// Expand a replacement template for a single match
pub fn expand_template(
    template: &str,
    text: &str,
    spans: &Spans,
    names: &[Option<String>],
) -> String {
    let group_count = spans.group_count().saturating_sub(1);
    let has_named = names.iter().any(Option::is_some);
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(dollar) = rest.find('$') {
        result.push_str(&rest[..dollar]);
        let after = &rest[dollar + 1..];

        let consumed = match after.as_bytes().first() {
            Some(b'$') => {
                result.push('$');
                1
            }
            Some(b'&') => {
                result.push_str(&text[spans.start()..spans.end()]);
                1
            }
            Some(b'`') => {
                result.push_str(&text[..spans.start()]);
                1
            }
            Some(b'\'') => {
                result.push_str(&text[spans.end()..]);
                1
            }
            Some(d) if d.is_ascii_digit() => match group_reference(after, group_count) {
                Some((group, len)) => {
                    push_group(&mut result, text, spans, group);
                    len
                }
                None => {
                    result.push('$');
                    0
                }
            },
            Some(b'<') if has_named => match after.find('>') {
                Some(close) => {
                    let name = &after[1..close];
                    if let Some(group) = names.iter().position(|n| n.as_deref() == Some(name)) {
                        push_group(&mut result, text, spans, group);
                    }
                    close + 1
                }
                None => {
                    result.push('$');
                    0
                }
            },
            _ => {
                result.push('$');
                0
            }
        };

        rest = &after[consumed..];
    }
    result.push_str(rest);

    result
}

/// Resolve `$n` / `$nn`: the two-digit form wins when that group exists
fn group_reference(after: &str, group_count: usize) -> Option<(usize, usize)> {
    let digits: Vec<usize> = after
        .bytes()
        .take(2)
        .take_while(u8::is_ascii_digit)
        .map(|b| usize::from(b - b'0'))
        .collect();

    if let [tens, ones] = digits[..] {
        let two = tens * 10 + ones;
        if (1..=group_count).contains(&two) {
            return Some((two, 2));
        }
    }

    let one = *digits.first()?;
    (1..=group_count).contains(&one).then_some((one, 1))
}

fn push_group(result: &mut String, text: &str, spans: &Spans, group: usize) {
    if let Some((start, end)) = spans.group(group) {
        result.push_str(&text[start..end]);
    }
}
