use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Deserializer, Serialize};

/// Characters left alone by `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Keyword filter, either as comma separated text or as a list of tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Keywords {
    Text(String),
    List(Vec<String>),
}

impl Keywords {
    /// Splits the keywords into trimmed tokens.
    pub fn into_tokens(self) -> Vec<String> {
        match self {
            Self::Text(text) => text
                .split(',')
                .map(|token| token.trim().to_owned())
                .collect(),
            Self::List(list) => list
                .into_iter()
                .map(|token| token.trim().to_owned())
                .collect(),
        }
    }
}

impl From<&str> for Keywords {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Keywords {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for Keywords {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl From<Vec<&str>> for Keywords {
    fn from(value: Vec<&str>) -> Self {
        value.as_slice().into()
    }
}

impl From<&[&str]> for Keywords {
    fn from(value: &[&str]) -> Self {
        Self::List(value.iter().map(|token| (*token).to_owned()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Keywords {
    fn from(value: [&str; N]) -> Self {
        value.as_slice().into()
    }
}

/// Escapes every token and joins them with literal commas.
pub(crate) fn encode_tokens(tokens: &[String]) -> String {
    let encoded: Vec<String> = tokens
        .iter()
        .map(|token| utf8_percent_encode(token, COMPONENT).to_string())
        .collect();

    tracing::trace!(?tokens, ?encoded, "encoded keywords");

    encoded.join(",")
}

pub(crate) fn deserialize_tokens<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Keywords::deserialize(deserializer).map(Keywords::into_tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode<K: Into<Keywords>>(keywords: K) -> String {
        encode_tokens(&keywords.into().into_tokens())
    }

    #[test]
    fn trims_and_joins_tokens() {
        assert_eq!(encode(["  cat ", "dog"]), "cat,dog");
        assert_eq!(encode(" cat , dog "), "cat,dog");
    }

    #[test]
    fn escapes_each_token_like_encode_uri_component() {
        assert_eq!(encode(["new york", "café"]), "new%20york,caf%C3%A9");
        assert_eq!(encode(["a&b=c/d"]), "a%26b%3Dc%2Fd");
        assert_eq!(encode(["it's-(ok)_!~*."]), "it's-(ok)_!~*.");
    }

    #[test]
    fn empty_input_encodes_to_empty_string() {
        assert_eq!(encode(Vec::<String>::new()), "");
        assert_eq!(encode(""), "");
        assert_eq!(encode("   "), "");
    }

    #[test]
    fn deserializes_text_or_list() {
        let text: Keywords = serde_json::from_str("\"cat,dog\"").unwrap();
        assert_eq!(text, Keywords::Text("cat,dog".to_owned()));

        let list: Keywords = serde_json::from_str("[\"cat\", \"dog\"]").unwrap();
        assert_eq!(list.into_tokens(), vec!["cat", "dog"]);

        assert!(serde_json::from_str::<Keywords>("42").is_err());
    }
}
