use super::*;
use crate::ast::{
    ComparisonOperator, Duration, DurationOrField, EmitPolicy, Entity, Field, JoinType,
    LogicalOperator, SortDirection, SourceName, StatementKind, TimeSpec, TimeUnit, Value,
    WindowKind,
};
use crate::diagnostics::DiagnosticKind;
use crate::lexer::{tokenize, TokenKind, ENTITY_KINDS, STATEMENT_KINDS};
use crate::testing::{assert_query, parse_err, parse_ok};

#[test]
fn test_show_with_where_and_limit() {
    let query = parse_ok("SHOW devices WHERE ip = '10.0.0.1' LIMIT 10");
    assert_query(&query)
        .kind(StatementKind::Show)
        .canonical("SHOW devices WHERE ip = '10.0.0.1' LIMIT 10")
        .show()
        .entity(Entity::Devices)
        .no_time_spec()
        .where_clause(|c| {
            c.len(1).expression(0, |e| {
                e.comparison("ip", ComparisonOperator::Eq, Value::string("10.0.0.1"));
            });
        })
        .limit(10)
        .latest(false);
}

#[test]
fn test_count_with_between() {
    let query = parse_ok("COUNT flows WHERE bytes BETWEEN 100 AND 5000");
    assert_query(&query)
        .count()
        .entity(Entity::Flows)
        .where_clause(|c| {
            c.len(1).expression(0, |e| {
                e.between("bytes", Value::Integer(100), Value::Integer(5000));
            });
        });
}

#[test]
fn test_find_last_days() {
    let query = parse_ok("FIND devices FROM LAST 7 DAYS");
    assert_query(&query).find().entity(Entity::Devices).time_spec(TimeSpec::Last {
        amount: 7,
        unit: TimeUnit::Days,
    });
}

#[test]
fn test_time_specs() {
    assert_query(&parse_ok("SHOW logs FROM TODAY"))
        .show()
        .time_spec(TimeSpec::Today);
    assert_query(&parse_ok("COUNT traps FROM YESTERDAY"))
        .count()
        .time_spec(TimeSpec::Yesterday);
    assert_query(&parse_ok(
        "SHOW events FROM BETWEEN '2024-01-01 00:00:00' AND '2024-01-02T00:00:00Z'",
    ))
    .show()
    .time_spec(TimeSpec::Between(
        Value::Timestamp("2024-01-01 00:00:00".to_string()),
        Value::Timestamp("2024-01-02T00:00:00Z".to_string()),
    ));
}

#[test]
fn test_find_order_by_limit_latest() {
    let query = parse_ok("FIND devices ORDER BY devices.last_seen DESC, hostname LIMIT 5 LATEST");
    assert_query(&query)
        .canonical("FIND devices ORDER BY devices.last_seen DESC, hostname ASC LIMIT 5 LATEST")
        .find()
        .no_where()
        .order_by(&[
            ("devices.last_seen", SortDirection::Desc),
            ("hostname", SortDirection::Asc),
        ])
        .limit(5)
        .latest(true);
}

#[test]
fn test_keywords_are_case_insensitive_identifiers_are_not() {
    let query = parse_ok("show DEVICES where HostName = 'Web01'");
    assert_query(&query)
        .show()
        .entity(Entity::Devices)
        .where_clause(|c| {
            c.expression(0, |e| {
                e.comparison("HostName", ComparisonOperator::Eq, Value::string("Web01"));
            });
        });
}

#[test]
fn test_and_or_chain_stays_flat() {
    let query = parse_ok("SHOW devices WHERE a = 1 AND b = 2 OR c = 3");
    assert_query(&query).show().where_clause(|c| {
        c.len(3)
            .operators(&[LogicalOperator::And, LogicalOperator::Or])
            .expression(2, |e| {
                e.comparison("c", ComparisonOperator::Eq, Value::Integer(3));
            });
    });
}

#[test]
fn test_parenthesized_group() {
    let query = parse_ok("SHOW devices WHERE (a = 1 OR b = 2) AND hostname CONTAINS 'web'");
    assert_query(&query).show().where_clause(|c| {
        c.len(2)
            .operators(&[LogicalOperator::And])
            .expression(0, |e| {
                e.group(|inner| {
                    inner.len(2).operators(&[LogicalOperator::Or]);
                });
            })
            .expression(1, |e| {
                e.contains("hostname", "web");
            });
    });
}

#[test]
fn test_in_and_is_null() {
    let query = parse_ok(
        "FIND logs WHERE severity IN ('error', 'critical') AND logs.trace_id IS NOT NULL",
    );
    assert_query(&query).find().where_clause(|c| {
        c.expression(0, |e| {
            e.in_values(
                "severity",
                &[Value::string("error"), Value::string("critical")],
            );
        })
        .expression(1, |e| {
            e.is_null("logs.trace_id", true);
        });
    });

    let query = parse_ok("FIND services WHERE services.name IS NULL");
    assert_query(&query).find().where_clause(|c| {
        c.expression(0, |e| {
            e.is_null("services.name", false);
        });
    });
}

#[test]
fn test_qualified_field_with_attribute() {
    let query = parse_ok("SHOW devices WHERE devices.metadata.os != 'linux'");
    assert_query(&query).show().where_clause(|c| {
        c.expression(0, |e| {
            e.comparison(
                "devices.metadata.os",
                ComparisonOperator::Neq,
                Value::string("linux"),
            );
        });
    });
}

#[test]
fn test_function_call_on_left_side() {
    let query = parse_ok("SHOW events WHERE date(timestamp) = TODAY");
    assert_query(&query).show().where_clause(|c| {
        c.expression(0, |e| {
            e.comparison("date(timestamp)", ComparisonOperator::Eq, Value::Today);
        });
    });
}

#[test]
fn test_address_literals() {
    let query = parse_ok("SHOW interfaces WHERE ip = 192.168.1.1 AND mac = aa:bb:cc:dd:ee:ff");
    assert_query(&query).show().where_clause(|c| {
        c.expression(0, |e| {
            e.comparison(
                "ip",
                ComparisonOperator::Eq,
                Value::IpAddress("192.168.1.1".to_string()),
            );
        })
        .expression(1, |e| {
            e.comparison(
                "mac",
                ComparisonOperator::Eq,
                Value::MacAddress("aa:bb:cc:dd:ee:ff".to_string()),
            );
        });
    });
}

#[test]
fn test_quoted_addresses_stay_strings() {
    let query = parse_ok("SHOW interfaces WHERE mac = 'aa:bb:cc:dd:ee:ff' OR ip = \"10.0.0.1\"");
    assert_query(&query).show().where_clause(|c| {
        c.expression(0, |e| {
            e.comparison(
                "mac",
                ComparisonOperator::Eq,
                Value::string("aa:bb:cc:dd:ee:ff"),
            );
        })
        .expression(1, |e| {
            e.comparison("ip", ComparisonOperator::Eq, Value::string("10.0.0.1"));
        });
    });
}

#[test]
fn test_timestamp_value_in_comparison() {
    let query = parse_ok("FIND events WHERE timestamp > '2023-12-25 14:30:00'");
    assert_query(&query).find().where_clause(|c| {
        c.expression(0, |e| {
            e.comparison(
                "timestamp",
                ComparisonOperator::Gt,
                Value::Timestamp("2023-12-25 14:30:00".to_string()),
            );
        });
    });
}

#[test]
fn test_show_aggregate_with_time_clause() {
    let query = parse_ok("SHOW count(*) FROM devices FROM LAST 1 DAYS");
    assert_query(&query)
        .canonical("SHOW count(*) FROM devices FROM LAST 1 DAYS")
        .show()
        .aggregate("count(*)", Entity::Devices)
        .time_spec(TimeSpec::Last {
            amount: 1,
            unit: TimeUnit::Days,
        });
}

#[test]
fn test_stream_tumble_periodic() {
    let query =
        parse_ok("STREAM id, COUNT(*) AS c FROM TUMBLE(flows, ts, 30s) GROUP BY id EMIT PERIODIC 10s");
    assert_query(&query)
        .kind(StatementKind::Stream)
        .stream()
        .select(&["id", "COUNT(*) AS c"])
        .source(|s| {
            s.alias(None).window(WindowKind::Tumble, |w| {
                assert_eq!(w.source, SourceName::Entity(Entity::Flows));
                assert_eq!(w.time_field, Field::new("ts"));
                assert_eq!(w.size, DurationOrField::Duration(Duration::seconds(30)));
                assert_eq!(w.advance, None);
            });
        })
        .join_count(0)
        .group_by(&["id"])
        .emit(EmitPolicy::Periodic {
            interval: Duration::seconds(10),
        });
}

#[test]
fn test_stream_hop_having_emit_after_close() {
    let query = parse_ok(
        "STREAM src_ip, sum(bytes) AS total FROM HOP(flows, timestamp, 5m, 1m) \
         GROUP BY src_ip HAVING total > 1000 EMIT AFTER WINDOW CLOSE WITH DELAY 30s",
    );
    assert_query(&query)
        .stream()
        .select(&["src_ip", "sum(bytes) AS total"])
        .source(|s| {
            s.text("HOP(flows, timestamp, 5m, 1m)");
        })
        .having(|c| {
            c.expression(0, |e| {
                e.comparison("total", ComparisonOperator::Gt, Value::Integer(1000));
            });
        })
        .emit(EmitPolicy::AfterWindowClose {
            delay: Some(Duration::seconds(30)),
        });
}

#[test]
fn test_stream_joins() {
    let query = parse_ok(
        "STREAM * FROM flows AS f LEFT JOIN devices AS dev ON devices.is_available = true \
         JOIN TABLE(pollers) ON pollers.id = 'edge-1'",
    );
    assert_query(&query)
        .stream()
        .select_all()
        .source(|s| {
            s.entity(Entity::Flows).alias(Some("f"));
        })
        .join_count(2)
        .join(0, |j| {
            j.join_type(Some(JoinType::Left))
                .source(|s| {
                    s.entity(Entity::Devices).alias(Some("dev"));
                })
                .on(|c| {
                    c.text("devices.is_available = true");
                });
        })
        .join(1, |j| {
            j.join_type(None).source(|s| {
                s.table(SourceName::Entity(Entity::Pollers)).alias(None);
            });
        })
        .no_emit();
}

#[test]
fn test_stream_without_select_list() {
    let query = parse_ok("STREAM FROM TABLE(devices) WHERE devices.is_available = true");
    assert_query(&query)
        .stream()
        .no_select()
        .source(|s| {
            s.table(SourceName::Entity(Entity::Devices));
        })
        .where_clause(|c| {
            c.expression(0, |e| {
                e.comparison(
                    "devices.is_available",
                    ComparisonOperator::Eq,
                    Value::Boolean(true),
                );
            });
        });
}

#[test]
fn test_stream_from_named_source() {
    let query = parse_ok("STREAM host FROM syslog_raw EMIT AFTER WINDOW CLOSE");
    assert_query(&query)
        .stream()
        .source(|s| {
            s.named("syslog_raw");
        })
        .emit(EmitPolicy::AfterWindowClose { delay: None });
}

#[test]
fn test_parse_tokens_with_and_without_eof() {
    let source = "COUNT devices FROM TODAY";
    let tokens = tokenize(source).unwrap();
    assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
    let with_eof = parse_tokens(tokens.clone()).unwrap();

    let mut without_eof = tokens;
    without_eof.pop();
    assert_eq!(parse_tokens(without_eof).unwrap(), with_eof);
    assert_eq!(with_eof, parse(source).unwrap());
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_missing_entity_is_end_of_input() {
    let diagnostic = parse_err("SHOW");
    assert_eq!(diagnostic.kind, DiagnosticKind::UnexpectedEndOfInput);
    assert_eq!(diagnostic.expected, ENTITY_KINDS.to_vec());
    assert_eq!(diagnostic.position.column, 5);
    assert_eq!(diagnostic.found, None);
}

#[test]
fn test_invalid_character_position() {
    let diagnostic = parse_err("SHOW devices WHERE a = #");
    assert_eq!(diagnostic.kind, DiagnosticKind::InvalidCharacter);
    assert_eq!(diagnostic.position.line, 1);
    assert_eq!(diagnostic.position.column, 24);
    assert_eq!(diagnostic.found.as_deref(), Some("#"));
}

#[test]
fn test_unknown_statement_suggests_keyword() {
    let diagnostic = parse_err("shoe devices");
    assert_eq!(diagnostic.kind, DiagnosticKind::UnexpectedToken);
    assert_eq!(diagnostic.expected, STATEMENT_KINDS.to_vec());
    assert_eq!(diagnostic.suggestion.as_deref(), Some("did you mean `SHOW`?"));
}

#[test]
fn test_trailing_token_lists_skipped_clauses() {
    let diagnostic = parse_err("SHOW devices foo");
    assert_eq!(diagnostic.kind, DiagnosticKind::UnexpectedToken);
    assert_eq!(diagnostic.found.as_deref(), Some("foo"));
    assert_eq!(
        diagnostic.expected,
        vec![
            TokenKind::From,
            TokenKind::Where,
            TokenKind::Order,
            TokenKind::Limit,
            TokenKind::Latest,
            TokenKind::Eof,
        ]
    );

    let diagnostic = parse_err("SHOW devices LIMIT 10 foo");
    assert_eq!(diagnostic.expected, vec![TokenKind::Latest, TokenKind::Eof]);
    assert_eq!(diagnostic.position.column, 23);
}

#[test]
fn test_empty_where_expects_expression_start() {
    let diagnostic = parse_err("SHOW devices WHERE");
    assert_eq!(diagnostic.kind, DiagnosticKind::UnexpectedEndOfInput);
    assert_eq!(diagnostic.expected[0], TokenKind::LParen);
    assert!(diagnostic.expected.contains(&TokenKind::Identifier));
    assert!(diagnostic.expected.contains(&TokenKind::Devices));
}

#[test]
fn test_missing_operator() {
    let diagnostic = parse_err("SHOW devices WHERE ip 5");
    assert_eq!(diagnostic.kind, DiagnosticKind::UnexpectedToken);
    assert!(diagnostic.expected.contains(&TokenKind::Eq));
    assert!(diagnostic.expected.contains(&TokenKind::Between));
    assert!(diagnostic.expected.contains(&TokenKind::Is));
}

#[test]
fn test_stream_requires_from() {
    let diagnostic = parse_err("STREAM id");
    assert_eq!(diagnostic.kind, DiagnosticKind::UnexpectedEndOfInput);
    assert_eq!(
        diagnostic.expected,
        vec![TokenKind::As, TokenKind::Comma, TokenKind::From]
    );
}

#[test]
fn test_emit_needs_policy() {
    let diagnostic = parse_err("STREAM FROM flows EMIT NOW");
    assert_eq!(
        diagnostic.expected,
        vec![TokenKind::After, TokenKind::Periodic]
    );
    assert_eq!(diagnostic.suggestion, None);
}

#[test]
fn test_window_size_needs_unit() {
    let diagnostic = parse_err("STREAM FROM TUMBLE(flows, ts, 30)");
    assert_eq!(diagnostic.kind, DiagnosticKind::UnexpectedToken);
    assert_eq!(diagnostic.found.as_deref(), Some(")"));
    assert_eq!(
        diagnostic.expected,
        vec![
            TokenKind::SecondsUnit,
            TokenKind::MinutesUnit,
            TokenKind::HoursUnit,
            TokenKind::DaysUnit,
        ]
    );
}

#[test]
fn test_bare_entity_is_not_a_field() {
    let diagnostic = parse_err("SHOW devices WHERE devices = 1");
    assert_eq!(diagnostic.expected, vec![TokenKind::Dot]);
}

#[test]
fn test_negative_limit_is_invalid_number() {
    let diagnostic = parse_err("SHOW devices LIMIT -1");
    assert_eq!(diagnostic.kind, DiagnosticKind::InvalidNumber);
    assert!(diagnostic.message.contains("must not be negative"));
    assert_eq!(diagnostic.position.column, 20);
}

#[test]
fn test_integer_overflow_is_invalid_number() {
    let diagnostic = parse_err("SHOW flows WHERE bytes > 99999999999999999999");
    assert_eq!(diagnostic.kind, DiagnosticKind::InvalidNumber);
    assert_eq!(diagnostic.found.as_deref(), Some("99999999999999999999"));
}

#[test]
fn test_unterminated_string_surfaces_through_parse() {
    let diagnostic = parse_err("SHOW devices WHERE name = 'abc");
    assert_eq!(diagnostic.kind, DiagnosticKind::UnterminatedString);
    assert_eq!(diagnostic.position.column, 27);
}

fn nested_groups(depth: usize) -> String {
    format!(
        "FIND devices WHERE {}a = 1{}",
        "(".repeat(depth),
        ")".repeat(depth)
    )
}

#[test]
fn test_groups_nest_up_to_the_limit() {
    let query = parse_ok(&nested_groups(MAX_NESTING));
    assert_eq!(query.to_string(), nested_groups(MAX_NESTING));
}

#[test]
fn test_groups_past_the_limit() {
    let diagnostic = parse_err(&nested_groups(MAX_NESTING + 1));
    assert_eq!(diagnostic.kind, DiagnosticKind::NestingTooDeep);
    assert_eq!(diagnostic.found.as_deref(), Some("("));
    assert_eq!(diagnostic.position.column, 20 + MAX_NESTING);
    assert_eq!(diagnostic.message, "nesting deeper than 64 levels");
}

#[test]
fn test_very_deep_groups_are_a_diagnostic() {
    let diagnostic = parse_err(&nested_groups(20_000));
    assert_eq!(diagnostic.kind, DiagnosticKind::NestingTooDeep);
    assert_eq!(diagnostic.position.column, 20 + MAX_NESTING);
}

#[test]
fn test_function_calls_count_toward_nesting() {
    let calls = |depth: usize| {
        format!(
            "STREAM {}x{} FROM flows",
            "f(".repeat(depth),
            ")".repeat(depth)
        )
    };
    let query = parse_ok(&calls(MAX_NESTING));
    assert_eq!(query.to_string(), calls(MAX_NESTING));

    let diagnostic = parse_err(&calls(5_000));
    assert_eq!(diagnostic.kind, DiagnosticKind::NestingTooDeep);
    assert_eq!(diagnostic.position.column, 8 + 2 * MAX_NESTING + 1);
}

#[test]
fn test_groups_and_calls_share_the_limit() {
    let source = format!(
        "FIND devices WHERE {}f(x) = 1{}",
        "(".repeat(MAX_NESTING),
        ")".repeat(MAX_NESTING)
    );
    let diagnostic = parse_err(&source);
    assert_eq!(diagnostic.kind, DiagnosticKind::NestingTooDeep);
    assert_eq!(diagnostic.position.column, 21 + MAX_NESTING);
}
