//! Jar-style manifest attributes
//!
//! A manifest is an ordered list of `Key: Value` lines. Lines longer than
//! [`LINE_WIDTH`] bytes are wrapped; each continuation line starts with a
//! single space.

use std::fmt::Write;

/// Archive path of the manifest
pub const MANIFEST_PATH: &str = "META-INF/MANIFEST.MF";

const LINE_WIDTH: usize = 72;

/// Ordered manifest attributes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    entries: Vec<(String, String)>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute, replacing an existing value in place
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Attribute value; key comparison is ASCII case-insensitive like jar manifests
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse manifest text; lines without a `:` separator are skipped
    pub fn parse(text: &str) -> Self {
        let mut logical: Vec<String> = Vec::new();
        for line in text.lines() {
            let line = line.trim_end_matches('\r');
            if let Some(rest) = line.strip_prefix(' ') {
                if let Some(last) = logical.last_mut() {
                    last.push_str(rest);
                }
            } else if !line.is_empty() {
                logical.push(line.to_string());
            }
        }

        let mut manifest = Self::new();
        for line in logical {
            if let Some((key, value)) = line.split_once(':') {
                manifest.insert(key.trim(), value.trim_start());
            }
        }
        manifest
    }

    /// Render manifest text with wrapped lines and a trailing blank line
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.entries {
            let line = format!("{key}: {value}");
            let mut rest = line.as_str();
            let mut width = LINE_WIDTH;
            while rest.len() > width {
                let mut split = width;
                while !rest.is_char_boundary(split) {
                    split -= 1;
                }
                let (head, tail) = rest.split_at(split);
                let _ = write!(out, "{head}\r\n ");
                rest = tail;
                width = LINE_WIDTH - 1;
            }
            let _ = write!(out, "{rest}\r\n");
        }
        out.push_str("\r\n");
        out
    }
}
