//! Spintax expansion for reply and caption templates.
//!
//! A group is `{alt1|alt2|...}` with no braces inside it. Each group in the
//! template is replaced by one of its alternatives, chosen independently.
//! Anything that does not form a group stays literal: `{}`, unmatched braces,
//! and nested constructs such as `{a{b|c}d}`, where the inner group is left
//! alone because a matched outer pair encloses it.

use std::sync::OnceLock;

use rand::Rng;
use regex::Regex;

pub const DEFAULT_REPLY_TEMPLATE: &str = "{Hi|Hello|Hey} there! {Thanks|Thank you} for {contacting|messaging|reaching out to} us. We will {get back to you|respond} shortly.";

/// Chooses which alternative of a group to keep.
pub trait RandomSource {
    /// Returns an index in `0..len`; `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl<R: Rng> RandomSource for RngSource<R> {
    fn pick(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }
}

fn group_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\{([^{}]+)\}").expect("spintax regex should compile"))
}

pub fn expand(template: &str) -> String {
    expand_with(template, &mut RngSource(rand::thread_rng()))
}

pub fn expand_with<S: RandomSource + ?Sized>(template: &str, source: &mut S) -> String {
    let mut output = String::with_capacity(template.len());
    let mut cursor = 0;
    for (start, end, body) in groups(template) {
        let alternatives: Vec<&str> = body.split('|').collect();
        let index = source.pick(alternatives.len()).min(alternatives.len() - 1);
        output.push_str(&template[cursor..start]);
        output.push_str(alternatives[index]);
        cursor = end;
    }
    output.push_str(&template[cursor..]);
    output
}

/// Number of combinations `expand` can pick from. Saturates at `usize::MAX`.
pub fn variant_count(template: &str) -> usize {
    groups(template)
        .into_iter()
        .map(|(_, _, body)| body.split('|').count())
        .fold(1usize, usize::saturating_mul)
}

// (start, end, interior) of every expandable group, in order.
fn groups(template: &str) -> Vec<(usize, usize, &str)> {
    let depths = matched_brace_depths(template);
    group_regex()
        .captures_iter(template)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let body = caps.get(1)?;
            if depths[whole.start()] > 0 {
                None
            } else {
                Some((whole.start(), whole.end(), body.as_str()))
            }
        })
        .collect()
}

// Number of matched brace pairs open before each byte. Unmatched braces
// never count.
fn matched_brace_depths(template: &str) -> Vec<usize> {
    let bytes = template.as_bytes();
    let mut matched = vec![false; bytes.len()];
    let mut open = Vec::new();
    for (index, byte) in bytes.iter().enumerate() {
        match byte {
            b'{' => open.push(index),
            b'}' => {
                if let Some(start) = open.pop() {
                    matched[start] = true;
                    matched[index] = true;
                }
            }
            _ => {}
        }
    }

    let mut depth = 0usize;
    let mut depths = vec![0; bytes.len()];
    for (index, byte) in bytes.iter().enumerate() {
        depths[index] = depth;
        if matched[index] {
            match byte {
                b'{' => depth += 1,
                b'}' => depth -= 1,
                _ => {}
            }
        }
    }
    depths
}
