//! URL Query Parsing
//!
//! Reads parameters out of `location.search`.

use percent_encoding::percent_decode_str;

fn decode(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

/// First value of `name` in a `?a=1&b=2` style query string
pub fn query_param(search: &str, name: &str) -> Option<String> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => (decode(key), decode(value)),
            None => (decode(pair), String::new()),
        })
        .find(|(key, _)| key == name)
        .map(|(_, value)| value)
}
