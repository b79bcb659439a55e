//! Tokenizer for separator-delimited `key=value` messages.
//!
//! A message is split on every occurrence of the separator into
//! [`Segment`]s. Each segment may carry one [`Pair`]: the key is the run of
//! non-whitespace text directly before the first `=`, and the value is
//! everything after that `=` up to the end of the segment.
//!
//! Concatenating every segment's text, each followed by the separator when
//! `terminated` is set, reproduces the input exactly.
//!
//! A value that itself contains the separator is split at that separator.
//! No escaping convention exists.

/// One separator-delimited span of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    /// Text between the previous separator (or start) and the next separator (or end).
    pub text: &'a str,
    /// Whether a separator followed this span in the input.
    pub terminated: bool,
}

/// A `key=value` pair located inside a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pair<'a> {
    /// Text before the key (log prefix, leading spaces).
    pub lead: &'a str,
    /// The key, bounded by whitespace or segment start on the left and `=` on the right.
    pub key: &'a str,
    /// Everything after the `=`.
    pub value: &'a str,
}

impl<'a> Segment<'a> {
    /// Locate the `key=value` pair in this segment, if any.
    pub fn pair(&self) -> Option<Pair<'a>> {
        let eq = self.text.find('=')?;
        let head = &self.text[..eq];
        let key_start = head
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);

        let key = &head[key_start..];
        if key.is_empty() {
            return None;
        }

        Some(Pair {
            lead: &head[..key_start],
            key,
            value: &self.text[eq + 1..],
        })
    }
}

/// Iterator over the segments of a message.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    rest: Option<&'a str>,
    separator: char,
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest?;
        match rest.find(self.separator) {
            Some(idx) => {
                self.rest = Some(&rest[idx + self.separator.len_utf8()..]);
                Some(Segment {
                    text: &rest[..idx],
                    terminated: true,
                })
            }
            None => {
                self.rest = None;
                if rest.is_empty() {
                    None
                } else {
                    Some(Segment {
                        text: rest,
                        terminated: false,
                    })
                }
            }
        }
    }
}

/// Split `message` into separator-delimited segments.
pub fn segments(message: &str, separator: char) -> Segments<'_> {
    Segments {
        rest: Some(message),
        separator,
    }
}
