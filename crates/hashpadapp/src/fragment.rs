//! # Fragment Format
//!
//! A hashpad address carries everything after the `#`:
//!
//! ```text
//! #<data>[;<docid>]
//!  │       └── optional document identity (16 lowercase alphanumerics)
//!  └── codec token (base64url of raw-deflate payload), may be empty
//! ```
//!
//! Only the **first** `;` separates the two parts. Data tokens never contain `;`
//! (it is outside the base64url alphabet), so anything after the first separator
//! belongs to the identity verbatim, and [`Fragment::parse`] followed by
//! [`Fragment::build`] reproduces any well-formed raw string exactly.
//!
//! A trailing separator with nothing after it (`AwA;`, `;`) is not well-formed:
//! it parses to an empty identity and builds back without the separator.
//!
//! Legacy addresses have no identity suffix at all; they parse with an empty
//! `docid` and are still perfectly valid documents.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Separates the data token from the document identity.
pub const ID_SEPARATOR: char = ';';

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    pub data: String,
    pub docid: String,
}

impl Fragment {
    pub fn new(data: impl Into<String>, docid: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            docid: docid.into(),
        }
    }

    /// Split a raw fragment (without the leading `#`) at the first separator.
    pub fn parse(raw: &str) -> Self {
        match raw.split_once(ID_SEPARATOR) {
            Some((data, docid)) => Self::new(data, docid),
            None => Self::new(raw, ""),
        }
    }

    /// Join the parts back into the raw fragment string.
    pub fn build(&self) -> String {
        if self.docid.is_empty() {
            self.data.clone()
        } else {
            format!("{}{}{}", self.data, ID_SEPARATOR, self.docid)
        }
    }

    /// Render as an address fragment, including the leading `#`.
    pub fn to_address(&self) -> String {
        format!("#{}", self.build())
    }

    pub fn has_docid(&self) -> bool {
        !self.docid.is_empty()
    }

    /// True when neither part carries anything.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty() && self.docid.is_empty()
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.build())
    }
}

/// Extract the raw fragment from whatever the user handed us.
///
/// Accepts a full URL (`https://host/path#frag`), an address fragment (`#frag`)
/// or a bare fragment (`frag`). Everything up to and including the first `#` is
/// dropped. Surrounding whitespace is ignored.
pub fn fragment_from_address(address: &str) -> &str {
    let trimmed = address.trim();
    match trimmed.split_once('#') {
        Some((_, fragment)) => fragment,
        None => trimmed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_docid() {
        let frag = Fragment::parse("abc123;d0c1d45678901234");
        assert_eq!(frag.data, "abc123");
        assert_eq!(frag.docid, "d0c1d45678901234");
    }

    #[test]
    fn test_parse_without_docid() {
        let frag = Fragment::parse("abc123");
        assert_eq!(frag.data, "abc123");
        assert_eq!(frag.docid, "");
        assert!(!frag.has_docid());
    }

    #[test]
    fn test_parse_splits_on_first_separator_only() {
        let frag = Fragment::parse("abc;def;ghi");
        assert_eq!(frag.data, "abc");
        assert_eq!(frag.docid, "def;ghi");
        assert_eq!(frag.build(), "abc;def;ghi");
    }

    #[test]
    fn test_empty_data_round_trips() {
        let frag = Fragment::parse(";0123456789abcdef");
        assert_eq!(frag.data, "");
        assert_eq!(frag.docid, "0123456789abcdef");
        assert_eq!(frag.build(), ";0123456789abcdef");
    }

    #[test]
    fn test_build_omits_separator_without_docid() {
        assert_eq!(Fragment::new("xyz", "").build(), "xyz");
        assert_eq!(Fragment::new("", "").build(), "");
        assert!(Fragment::new("", "").is_empty());
    }

    #[test]
    fn test_round_trip_samples() {
        for raw in [
            "",
            "a",
            "AwA",
            ";0123456789abcdef",
            "data-with_url-safe_chars;idid0000idid0000",
        ] {
            let frag = Fragment::parse(raw);
            assert_eq!(frag.build(), raw, "raw={raw:?}");
        }
    }

    #[test]
    fn test_trailing_separator_is_normalized_away() {
        for (raw, built) in [("AwA;", "AwA"), (";", ""), ("trailing;", "trailing")] {
            let frag = Fragment::parse(raw);
            assert!(!frag.has_docid(), "raw={raw:?}");
            assert_eq!(frag.build(), built, "raw={raw:?}");
        }
    }

    #[test]
    fn test_to_address_and_display() {
        let frag = Fragment::new("AwA", "0123456789abcdef");
        assert_eq!(frag.to_address(), "#AwA;0123456789abcdef");
        assert_eq!(frag.to_string(), "AwA;0123456789abcdef");
    }

    #[test]
    fn test_fragment_from_address() {
        assert_eq!(fragment_from_address("https://x.test/p#AwA;id"), "AwA;id");
        assert_eq!(fragment_from_address("#AwA"), "AwA");
        assert_eq!(fragment_from_address("AwA"), "AwA");
        assert_eq!(fragment_from_address("  #AwA\n"), "AwA");
        assert_eq!(fragment_from_address("https://x.test/#"), "");
        assert_eq!(fragment_from_address("#a#b"), "a#b");
    }
}
