/*
 * attributes.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! USFM attribute lists: `|key="value" key2="value2"`.

/// A parsed attribute list.
///
/// A bare value with no `key=` (the lemma in `\w gracious|grace\w*`) carries
/// no alignment data and parses to an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes<'a> {
    pairs: Vec<(&'a str, &'a str)>,
}

impl<'a> Attributes<'a> {
    /// Parse the text that follows the `|` separator.
    ///
    /// Malformed trailing input is ignored; attributes only carry alignment
    /// metadata, never running text.
    pub fn parse(raw: &'a str) -> Self {
        let raw = raw.trim();
        let raw = raw.strip_prefix('|').unwrap_or(raw).trim();
        if !raw.contains('=') {
            return Attributes::default();
        }

        let mut pairs = Vec::new();
        let mut rest = raw;
        loop {
            rest = rest.trim_start();
            let Some(eq) = rest.find('=') else { break };
            let key = rest[..eq].trim();
            let after = rest[eq + 1..].trim_start();
            let Some(quoted) = after.strip_prefix('"') else { break };
            let Some(close) = quoted.find('"') else { break };
            pairs.push((key, &quoted[..close]));
            rest = &quoted[close + 1..];
        }
        Attributes { pairs }
    }

    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    }

    /// Numeric attribute, falling back to `default` when absent or invalid.
    pub fn get_u32(&self, key: &str, default: u32) -> u32 {
        self.get(key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }
}
