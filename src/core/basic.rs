//! Basic tokenizer - Regex-based splitting
//!
//! A heuristic splitter, not a language-aware lexer: it knows nothing about
//! string literals or comments of any particular language. Whitespace runs
//! separate tokens and are discarded; matched punctuation and operators are
//! kept as standalone tokens.

use once_cell::sync::Lazy;
use regex::Regex;

// Whitespace runs, or a captured delimiter: bracket/punctuation characters,
// multi-character operators, then single-character operators. Alternation
// order matters: multi-character operators must win over their single-character
// prefixes.
static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"\s+|([(){}\[\].,;:"'`~]|->|==|!=|<=|>=|&&|\|\||\+=|-=|\*=|/=|%=|\^=|//|<<|>>|\*\*|[-+*/%<>=&|!^])"#,
    )
    .expect("token pattern must compile")
});

/// Split raw text into non-empty, non-whitespace token strings
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut last = 0;

    for caps in TOKEN_PATTERN.captures_iter(text) {
        let m = caps.get(0).expect("group 0 always participates");

        let fragment = text[last..m.start()].trim();
        if !fragment.is_empty() {
            tokens.push(fragment.to_string());
        }

        // Group 1 is present for delimiters; whitespace runs only separate.
        if let Some(delim) = caps.get(1) {
            tokens.push(delim.as_str().to_string());
        }

        last = m.end();
    }

    let tail = text[last..].trim();
    if !tail.is_empty() {
        tokens.push(tail.to_string());
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \n\t  ").is_empty());
    }

    #[test]
    fn test_tokenize_simple_statement() {
        let tokens = tokenize("if (a==b) { return -1; }");
        assert_eq!(
            tokens,
            vec!["if", "(", "a", "==", "b", ")", "{", "return", "-", "1", ";", "}"]
        );
    }

    #[test]
    fn test_tokenize_keeps_multichar_operators() {
        assert_eq!(tokenize("a->b"), vec!["a", "->", "b"]);
        assert_eq!(tokenize("x <= y"), vec!["x", "<=", "y"]);
        assert_eq!(tokenize("a && b || c"), vec!["a", "&&", "b", "||", "c"]);
        assert_eq!(tokenize("n += 1"), vec!["n", "+=", "1"]);
        assert_eq!(tokenize("a ** b"), vec!["a", "**", "b"]);
        assert_eq!(tokenize("v <<= 2"), vec!["v", "<<", "=", "2"]);
        assert_eq!(tokenize("m ^= k"), vec!["m", "^=", "k"]);
    }

    #[test]
    fn test_tokenize_splits_punctuation() {
        assert_eq!(
            tokenize("greet(name, count);"),
            vec!["greet", "(", "name", ",", "count", ")", ";"]
        );
        assert_eq!(tokenize("a.b[0]"), vec!["a", ".", "b", "[", "0", "]"]);
    }

    #[test]
    fn test_tokenize_no_language_awareness() {
        // Quotes are plain delimiters; string contents are split like code.
        assert_eq!(
            tokenize(r#"print("hello world")"#),
            vec!["print", "(", "\"", "hello", "world", "\"", ")"]
        );
        // Line comments are an operator plus ordinary words.
        assert_eq!(tokenize("// a note"), vec!["//", "a", "note"]);
    }

    #[test]
    fn test_tokenize_no_empty_or_whitespace_tokens() {
        let messy = "  foo ( )  \t ==\n\n bar;;  \r\n  ->  ";
        for token in tokenize(messy) {
            assert!(!token.is_empty());
            assert!(!token.chars().all(char::is_whitespace), "got {:?}", token);
        }
    }

    #[test]
    fn test_tokenize_space_joined_is_stable() {
        // Joining with single spaces and re-tokenizing must reproduce the
        // token sequence (whitespace-collapsed round trip).
        let text = "fn main() { let x = a*b - c/d; call(x, \"s\"); }";
        let tokens = tokenize(text);
        let rejoined = tokens.join(" ");
        assert_eq!(tokenize(&rejoined), tokens);
    }

    #[test]
    fn test_tokenize_leading_and_trailing_delimiters() {
        assert_eq!(tokenize(";x;"), vec![";", "x", ";"]);
        assert_eq!(tokenize("(y"), vec!["(", "y"]);
    }
}
