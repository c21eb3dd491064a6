//! Exact byte-pattern search.
//!
//! Resource tables carry no length fields, so structural boundaries inside
//! the trailer are found by searching for known byte sequences (such as the
//! `FF FF` marker that follows every resource ID).

/// A Knuth-Morris-Pratt matcher for a single byte pattern.
///
/// The failure table is computed once, so a matcher can be reused for many
/// searches over the same or different buffers. Each search is linear in the
/// length of the searched region.
#[derive(Debug, Clone)]
pub struct ByteMatcher<'p> {
    pattern: &'p [u8],
    failure: Vec<usize>,
}

impl<'p> ByteMatcher<'p> {
    #[must_use]
    pub fn new(pattern: &'p [u8]) -> Self {
        let mut failure = vec![0; pattern.len()];
        let mut matched = 0;
        for i in 1..pattern.len() {
            while matched > 0 && pattern[i] != pattern[matched] {
                matched = failure[matched - 1];
            }
            if pattern[i] == pattern[matched] {
                matched += 1;
            }
            failure[i] = matched;
        }
        ByteMatcher { pattern, failure }
    }

    #[must_use]
    pub fn pattern(&self) -> &[u8] {
        self.pattern
    }

    /// Returns the index of the first occurrence of the pattern that begins
    /// at or after `start`.
    ///
    /// Returns `None` if the buffer is empty, `start` is past its end, or the
    /// pattern does not occur.
    #[must_use]
    pub fn find_in(&self, haystack: &[u8], start: usize) -> Option<usize> {
        if haystack.is_empty() || start > haystack.len() {
            return None;
        }
        if self.pattern.is_empty() {
            return Some(start);
        }

        let mut matched = 0;
        for (i, &byte) in haystack.iter().enumerate().skip(start) {
            while matched > 0 && byte != self.pattern[matched] {
                matched = self.failure[matched - 1];
            }
            if byte == self.pattern[matched] {
                matched += 1;
            }
            if matched == self.pattern.len() {
                return Some(i + 1 - matched);
            }
        }
        None
    }
}

/// Finds the first occurrence of `pattern` in `haystack` at or after `start`.
#[must_use]
pub fn find(haystack: &[u8], pattern: &[u8], start: usize) -> Option<usize> {
    ByteMatcher::new(pattern).find_in(haystack, start)
}
