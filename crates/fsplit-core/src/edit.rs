//! Span removal on source text.
//!
//! Removals that occupy whole lines take the lines with them, and the blank
//! lines that end up adjacent at a seam collapse into one. Text outside the
//! removed regions is never rewritten.

use crate::Span;

/// Remove every span from `source` and return the edited text.
pub fn remove_spans(source: &str, spans: &[Span]) -> String {
    let widened: Vec<Span> = spans
        .iter()
        .filter(|span| !span.is_empty())
        .map(|span| widen(source, *span))
        .collect();
    let regions = merge(widened);

    let mut out = source.to_string();
    for region in regions.iter().rev() {
        out.replace_range(region.start..region.end, "");
        collapse_seam(&mut out, region.start);
    }
    out
}

/// Trim trailing whitespace and end the text with exactly one newline.
pub fn finish(source: &str) -> String {
    let mut out = source.trim_end().to_string();
    out.push('\n');
    out
}

fn is_blank(text: &str) -> bool {
    text.chars().all(|c| matches!(c, ' ' | '\t' | '\r'))
}

/// Grow a span to whole lines when nothing else shares them, otherwise only
/// over the horizontal whitespace that would be left dangling.
fn widen(source: &str, span: Span) -> Span {
    let line_start = source[..span.start].rfind('\n').map_or(0, |i| i + 1);
    let line_end = source[span.end..]
        .find('\n')
        .map_or(source.len(), |i| span.end + i);

    let lead_blank = is_blank(&source[line_start..span.start]);
    let trail_blank = is_blank(&source[span.end..line_end]);

    match (lead_blank, trail_blank) {
        (true, true) => Span::new(line_start, (line_end + 1).min(source.len())),
        (false, true) => {
            let start = source[..span.start].trim_end_matches([' ', '\t']).len();
            Span::new(start, line_end)
        }
        (true, false) => {
            let rest = &source[span.end..line_end];
            let end = span.end + (rest.len() - rest.trim_start_matches([' ', '\t']).len());
            Span::new(span.start, end)
        }
        (false, false) => span,
    }
}

fn merge(mut spans: Vec<Span>) -> Vec<Span> {
    spans.sort();
    let mut merged: Vec<Span> = Vec::with_capacity(spans.len());
    for span in spans {
        match merged.last_mut() {
            Some(last) if span.start <= last.end => last.end = last.end.max(span.end),
            _ => merged.push(span),
        }
    }
    merged
}

fn collapse_seam(out: &mut String, pos: usize) {
    if pos == 0 {
        while out.starts_with('\n') {
            out.remove(0);
        }
        return;
    }
    let before = &out[..pos];
    let opens_group = before.ends_with("(\n") || before.ends_with("{\n");
    while (out[..pos].ends_with("\n\n") || opens_group) && out[pos..].starts_with('\n') {
        out.remove(pos);
    }
    // blank line stranded before a closing paren
    if out[..pos].ends_with("\n\n") && out[pos..].trim_start_matches([' ', '\t']).starts_with(')')
    {
        out.remove(pos - 1);
    }
}
