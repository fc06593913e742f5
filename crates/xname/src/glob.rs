//! Shell-style glob patterns compiled to anchored regular expressions.
//!
//! | glob | matches |
//! |------|---------|
//! | `*` | any run of characters except `/` |
//! | `?` | one character except `/` |
//! | `**` | any run, including `/` |
//! | `**/` | zero or more leading directories |
//! | `[abc]`, `[a-z]`, `[!abc]` | one character from (or not from) a class |

use regex::Regex;
use xname_core::ConfigError;

/// A single compiled glob.
#[derive(Debug, Clone)]
pub struct GlobMatcher {
    pattern: String,
    regex: Regex,
}

impl GlobMatcher {
    /// Compile a glob. Malformed character classes are rejected here, never at match time.
    pub fn new(pattern: &str) -> Result<Self, ConfigError> {
        let source = translate(pattern)?;
        let regex = Regex::new(&source).map_err(|e| invalid(pattern, e.to_string()))?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    /// The glob text this matcher was compiled from.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Whether the whole of `text` matches. Case-sensitive.
    pub fn matches(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// Several globs, matching when any member matches.
#[derive(Debug, Clone, Default)]
pub struct GlobMatcherGroup {
    matchers: Vec<GlobMatcher>,
}

impl GlobMatcherGroup {
    pub fn new<I, S>(patterns: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let matchers = patterns
            .into_iter()
            .map(|p| GlobMatcher::new(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { matchers })
    }

    /// Parse a `;`-separated list such as `Views/**;Controls/*.axaml`.
    pub fn parse(patterns: &str) -> Result<Self, ConfigError> {
        Self::new(patterns.split(';').map(str::trim).filter(|p| !p.is_empty()))
    }

    /// An empty group matches nothing.
    pub fn matches(&self, text: &str) -> bool {
        self.matchers.iter().any(|m| m.matches(text))
    }

    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.matchers.iter().map(GlobMatcher::pattern)
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

fn invalid(pattern: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidGlob {
        pattern: pattern.to_string(),
        reason: reason.into(),
    }
}

fn translate(pattern: &str) -> Result<String, ConfigError> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::from("^");
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '*' if chars.get(i + 1) == Some(&'*') => {
                i += 1;
                if chars.get(i + 1) == Some(&'/') {
                    i += 1;
                    out.push_str("(?:.*/)?");
                } else {
                    out.push_str(".*");
                }
            }
            '*' => out.push_str("[^/]*"),
            '?' => out.push_str("[^/]"),
            '[' => {
                let (class, next) = translate_class(pattern, &chars, i + 1)?;
                out.push_str(&class);
                i = next;
            }
            c => out.push_str(&escape_char(c)),
        }
        i += 1;
    }

    out.push('$');
    Ok(out)
}

/// Translate a class whose body starts at `start`. Returns the regex class and
/// the index of the closing `]`.
fn translate_class(pattern: &str, chars: &[char], start: usize) -> Result<(String, usize), ConfigError> {
    let mut i = start;
    let negated = matches!(chars.get(i), Some('!') | Some('^'));
    if negated {
        i += 1;
    }

    // A `]` in first position is a member, not the terminator.
    let body_start = i;
    if chars.get(i) == Some(&']') {
        i += 1;
    }
    while i < chars.len() && chars[i] != ']' {
        i += 1;
    }
    if i >= chars.len() {
        return Err(invalid(pattern, "unterminated character class"));
    }

    let members = &chars[body_start..i];
    if members.is_empty() {
        return Err(invalid(pattern, "empty character class"));
    }

    let mut class = String::from(if negated { "[^/" } else { "[" });
    let mut j = 0;
    while j < members.len() {
        let low = members[j];
        if members.get(j + 1) == Some(&'-') && j + 2 < members.len() {
            let high = members[j + 2];
            if low > high {
                return Err(invalid(pattern, format!("invalid range {}-{}", low, high)));
            }
            class.push_str(&escape_char(low));
            class.push('-');
            class.push_str(&escape_char(high));
            j += 3;
        } else {
            class.push_str(&escape_char(low));
            j += 1;
        }
    }
    class.push(']');

    Ok((class, i))
}

fn escape_char(c: char) -> String {
    regex::escape(c.encode_utf8(&mut [0; 4]))
}
