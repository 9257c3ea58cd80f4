//! Escaping helpers shared by bags, options and fields.

use std::sync::LazyLock;

use regex::Regex;

static STRICT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9_\-]+").expect("STRICT_RE: invalid regex pattern"));

static LOOSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^a-zA-Z0-9_\-\[\]]+").expect("LOOSE_RE: invalid regex pattern")
});

/// Escapes HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Reduces a string to an identifier: ASCII, lower case, `[a-z0-9_-]`.
///
/// Runs of other characters become a single underscore and leading or
/// trailing underscores are trimmed.
///
/// ```
/// use oxide_formkit::escape::strip_strict;
///
/// assert_eq!(strip_strict("yada yada"), "yada_yada");
/// assert_eq!(strip_strict("do[ku]"), "do_ku");
/// assert_eq!(strip_strict("Źródło"), "zrodlo");
/// ```
pub fn strip_strict(s: &str) -> String {
    let ascii = transliterate(s).to_lowercase();
    STRICT_RE
        .replace_all(&ascii, "_")
        .trim_matches('_')
        .to_string()
}

/// Cleans a form field name, keeping case and the bracket syntax of list
/// style names such as `tags[]` or `address[city]`.
pub fn strip_loose(s: &str) -> String {
    let ascii = transliterate(s);
    LOOSE_RE
        .replace_all(&ascii, "_")
        .trim_matches('_')
        .to_string()
}

/// Transliterates accented latin characters to ASCII and drops anything
/// else outside the ASCII range.
pub fn transliterate(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        if ch.is_ascii() {
            out.push(ch);
            continue;
        }
        let lower = ch.to_lowercase().next().unwrap_or(ch);
        let Some(folded) = fold(lower) else {
            continue;
        };
        if ch == lower {
            out.push_str(folded);
        } else {
            let mut chars = folded.chars();
            if let Some(first) = chars.next() {
                out.push(first.to_ascii_uppercase());
                out.push_str(chars.as_str());
            }
        }
    }
    out
}

fn fold(ch: char) -> Option<&'static str> {
    let folded = match ch {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => "a",
        'æ' => "ae",
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => "c",
        'ď' | 'đ' | 'ð' => "d",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => "e",
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => "g",
        'ĥ' | 'ħ' => "h",
        'ì' | 'í' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => "i",
        'ĵ' => "j",
        'ķ' => "k",
        'ĺ' | 'ļ' | 'ľ' | 'ŀ' | 'ł' => "l",
        'ñ' | 'ń' | 'ņ' | 'ň' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ŏ' | 'ő' => "o",
        'œ' => "oe",
        'ŕ' | 'ŗ' | 'ř' => "r",
        'ś' | 'ŝ' | 'ş' | 'š' => "s",
        'ß' => "ss",
        'ţ' | 'ť' | 'ŧ' => "t",
        'þ' => "th",
        'ù' | 'ú' | 'û' | 'ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => "u",
        'ŵ' => "w",
        'ý' | 'ÿ' | 'ŷ' => "y",
        'ź' | 'ż' | 'ž' => "z",
        _ => return None,
    };
    Some(folded)
}
