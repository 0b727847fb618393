use sha2::Digest;
use sha2::Sha256;

const KEY_PREFIX: &str = "gql-plan";

/// Derives plan cache keys from a schema's identity and a query's text.
pub trait QueryPlanCacheKeyManager: Send + Sync {
    fn create_key(&self, schema_name: &str, query_text: &str) -> String;
}

/// Keys take the form `gql-plan:{schema}:{sha256 of the normalized query}`.
///
/// Normalization drops insignificant whitespace, commas and comments so that
/// queries differing only in formatting share a key. String and block string
/// contents are kept verbatim.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultQueryPlanCacheKeyManager;
impl DefaultQueryPlanCacheKeyManager {
    pub fn new() -> Self {
        Self
    }
}
impl QueryPlanCacheKeyManager for DefaultQueryPlanCacheKeyManager {
    fn create_key(&self, schema_name: &str, query_text: &str) -> String {
        let digest = Sha256::digest(normalize_query_text(query_text).as_bytes());
        format!("{KEY_PREFIX}:{schema_name}:{}", hex::encode(digest))
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_ignored(c: char) -> bool {
    c.is_whitespace() || c == ',' || c == '\u{feff}'
}

/// Collapse the query to its significant characters, keeping a single space
/// only where two adjacent tokens would otherwise run together.
pub(crate) fn normalize_query_text(query_text: &str) -> String {
    let mut normalized = String::with_capacity(query_text.len());
    let mut chars = query_text.chars().peekable();
    let mut pending_separator = false;

    while let Some(c) = chars.next() {
        if is_ignored(c) {
            pending_separator = true;
            continue;
        }
        if c == '#' {
            for next in chars.by_ref() {
                if next == '\n' || next == '\r' {
                    break;
                }
            }
            pending_separator = true;
            continue;
        }

        if pending_separator
            && normalized.chars().next_back().is_some_and(is_name_char)
            && is_name_char(c) {
            normalized.push(' ');
        }
        pending_separator = false;

        if c != '"' {
            normalized.push(c);
            continue;
        }

        // Strings and block strings are copied through untouched.
        normalized.push(c);
        let is_block = {
            let mut lookahead = chars.clone();
            lookahead.next() == Some('"') && lookahead.next() == Some('"')
        };
        if is_block {
            normalized.push_str("\"\"");
            chars.next();
            chars.next();
            let mut quotes = 0;
            let mut escaped = false;
            for next in chars.by_ref() {
                normalized.push(next);
                match next {
                    '"' if !escaped => {
                        quotes += 1;
                        if quotes == 3 {
                            break;
                        }
                    },
                    '\\' => {
                        quotes = 0;
                        escaped = true;
                        continue;
                    },
                    _ => quotes = 0,
                }
                escaped = false;
            }
        } else {
            let mut escaped = false;
            for next in chars.by_ref() {
                normalized.push(next);
                match next {
                    '\\' if !escaped => escaped = true,
                    '"' if !escaped => break,
                    '\n' => break,
                    _ => escaped = false,
                }
            }
        }
    }
    normalized
}
