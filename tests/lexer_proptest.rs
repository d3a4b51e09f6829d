//! Property-based tests for the SRQL lexer
//!
//! These tests ensure that the lexer never panics, that every token it
//! produces points back at its own text, and that positions only move forward.

use proptest::prelude::*;
use srql::lexer::{tokenize, TokenKind, KEYWORDS};

/// Sample query snapshot tests
#[cfg(test)]
mod sample_query_tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .expect("source to lex")
            .into_iter()
            .map(|token| token.kind)
            .collect()
    }

    #[test]
    fn test_show_query_tokenization() {
        let tokens = tokenize("SHOW devices WHERE ip = '10.0.0.1'").unwrap();
        let simple: Vec<String> = tokens.iter().map(ToString::to_string).collect();
        insta::assert_debug_snapshot!(simple, @r###"
        [
            "1:1 SHOW `SHOW`",
            "1:6 devices `devices`",
            "1:14 WHERE `WHERE`",
            "1:20 identifier `ip`",
            "1:23 '=' `=`",
            "1:25 string `'10.0.0.1'`",
            "1:35 end of input",
        ]
        "###);
    }

    #[test]
    fn test_stream_query_tokenization() {
        assert_eq!(
            kinds("STREAM * FROM TUMBLE(flows, ts, 30s) EMIT PERIODIC 10s"),
            vec![
                TokenKind::Stream,
                TokenKind::Star,
                TokenKind::From,
                TokenKind::Tumble,
                TokenKind::LParen,
                TokenKind::Flows,
                TokenKind::Comma,
                TokenKind::Identifier,
                TokenKind::Comma,
                TokenKind::Integer,
                TokenKind::SecondsUnit,
                TokenKind::RParen,
                TokenKind::Emit,
                TokenKind::Periodic,
                TokenKind::Integer,
                TokenKind::SecondsUnit,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_literal_shapes() {
        assert_eq!(
            kinds("1 -2 3.5 true 'x' \"y\" '2024-01-01 00:00:00' 10.1.2.3 fe80::1 00:1a:2b:3c:4d:5e"),
            vec![
                TokenKind::Integer,
                TokenKind::Integer,
                TokenKind::Float,
                TokenKind::Boolean,
                TokenKind::String,
                TokenKind::String,
                TokenKind::Timestamp,
                TokenKind::IpAddress,
                TokenKind::IpAddress,
                TokenKind::MacAddress,
                TokenKind::Eof,
            ]
        );
    }
}

#[cfg(test)]
mod proptest_tests {
    use super::*;

    /// Words drawn from the keyword table, in random case
    fn keyword_strategy() -> impl Strategy<Value = String> {
        (prop::sample::select(KEYWORDS.to_vec()), any::<bool>()).prop_map(|(kind, upper)| {
            let text = kind.keyword_text().unwrap_or("show");
            if upper {
                text.to_uppercase()
            } else {
                text.to_lowercase()
            }
        })
    }

    /// Fragments that lex cleanly on their own
    fn fragment_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            keyword_strategy(),
            "[a-z_][a-z0-9_]{0,10}",
            "-?[0-9]{1,6}",
            "[0-9]{1,4}\\.[0-9]{1,4}",
            "'[a-zA-Z0-9 ]{0,10}'",
            prop::sample::select(vec!["=", "!=", ">", ">=", "<", "<=", ",", ".", "(", ")", "*"])
                .prop_map(String::from),
        ]
    }

    fn query_like_strategy() -> impl Strategy<Value = String> {
        prop::collection::vec(fragment_strategy(), 0..20).prop_map(|parts| parts.join(" "))
    }

    proptest! {
        #[test]
        fn test_tokenize_never_panics(input in "\\PC{0,64}") {
            let _ = tokenize(&input);
        }

        #[test]
        fn test_tokens_point_at_their_text(input in query_like_strategy()) {
            let tokens = tokenize(&input).unwrap();
            for token in &tokens {
                let start = token.position.offset;
                prop_assert_eq!(&input[start..start + token.lexeme.len()], token.lexeme);
            }
            prop_assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
        }

        #[test]
        fn test_positions_strictly_increase(input in query_like_strategy()) {
            let tokens = tokenize(&input).unwrap();
            for pair in tokens.windows(2) {
                if pair[1].kind != TokenKind::Eof {
                    prop_assert!(pair[0].position.offset < pair[1].position.offset);
                }
            }
        }

        #[test]
        fn test_keywords_lex_in_any_case(word in keyword_strategy()) {
            let tokens = tokenize(&word).unwrap();
            prop_assert_eq!(tokens.len(), 2);
            prop_assert!(tokens[0].kind.is_keyword());
        }

        #[test]
        fn test_parse_never_panics(input in query_like_strategy()) {
            let _ = srql::parse(&input);
        }
    }
}
