//! Integration tests for SHOW, FIND and COUNT statements
//!
//! Each query is checked twice: structurally through the fluent assertions and
//! textually through its canonical form.

use rstest::rstest;
use srql::ast::{
    ComparisonOperator, Entity, LogicalOperator, SortDirection, StatementKind, TimeSpec, TimeUnit,
    Value,
};
use srql::testing::{assert_query, parse_ok};

#[rstest]
#[case("SHOW devices", "SHOW devices")]
#[case("show devices limit 10", "SHOW devices LIMIT 10")]
#[case("Find Logs From Today", "FIND logs FROM TODAY")]
#[case("count traps from yesterday", "COUNT traps FROM YESTERDAY")]
#[case(
    "SHOW flows WHERE bytes >= 1024 ORDER BY bytes DESC LIMIT 20",
    "SHOW flows WHERE bytes >= 1024 ORDER BY bytes DESC LIMIT 20"
)]
#[case(
    "FIND devices WHERE hostname LIKE 'web%' ORDER BY devices.ip",
    "FIND devices WHERE hostname LIKE 'web%' ORDER BY devices.ip ASC"
)]
#[case(
    "SHOW services WHERE status <> 'up' LATEST",
    "SHOW services WHERE status != 'up' LATEST"
)]
#[case("COUNT flows WHERE port == 443", "COUNT flows WHERE port = 443")]
#[case(
    "SHOW cpu_metrics FROM LAST 15 MINUTES WHERE value > 90.5",
    "SHOW cpu_metrics FROM LAST 15 MINUTES WHERE value > 90.5"
)]
#[case(
    "SHOW events WHERE msg = \"it's down\"",
    "SHOW events WHERE msg = \"it's down\""
)]
fn test_canonical_form(#[case] input: &str, #[case] canonical: &str) {
    assert_query(&parse_ok(input)).canonical(canonical);
}

#[rstest]
fn test_every_entity_is_showable(
    #[values(
        Entity::Devices,
        Entity::Flows,
        Entity::SweepResults,
        Entity::DeviceUpdates,
        Entity::SnmpMetrics,
        Entity::OtelTraceSummaries
    )]
    entity: Entity,
    #[values("SHOW", "FIND", "COUNT")] statement: &str,
) {
    let query = parse_ok(&format!("{} {}", statement, entity));
    assert_eq!(query.entity(), Some(entity));
    assert_eq!(query.kind().to_string(), statement);
}

#[test]
fn test_all_entities_parse_in_upper_case() {
    for entity in Entity::ALL {
        let source = format!("FIND {}", entity.as_str().to_uppercase());
        assert_query(&parse_ok(&source)).find().entity(entity);
    }
}

#[rstest]
#[case("LAST 5 MINUTES", 5, TimeUnit::Minutes)]
#[case("LAST 2 HOURS", 2, TimeUnit::Hours)]
#[case("last 7 days", 7, TimeUnit::Days)]
#[case("LAST 4 WEEKS", 4, TimeUnit::Weeks)]
#[case("LAST 1 MONTHS", 1, TimeUnit::Months)]
fn test_last_time_units(#[case] clause: &str, #[case] amount: u64, #[case] unit: TimeUnit) {
    let query = parse_ok(&format!("COUNT logs FROM {}", clause));
    assert_query(&query)
        .count()
        .time_spec(TimeSpec::Last { amount, unit });
}

#[rstest]
#[case("=", ComparisonOperator::Eq)]
#[case("!=", ComparisonOperator::Neq)]
#[case(">", ComparisonOperator::Gt)]
#[case(">=", ComparisonOperator::Gte)]
#[case("<", ComparisonOperator::Lt)]
#[case("<=", ComparisonOperator::Lte)]
#[case("LIKE", ComparisonOperator::Like)]
fn test_comparison_operators(#[case] operator: &str, #[case] expected: ComparisonOperator) {
    let query = parse_ok(&format!("SHOW flows WHERE port {} 22", operator));
    assert_query(&query).show().where_clause(|c| {
        c.expression(0, |e| {
            e.comparison("port", expected, Value::Integer(22));
        });
    });
}

#[test]
fn test_upper_case_query_keeps_identifier_case() {
    let query = parse_ok(
        "SHOW SWEEP_RESULTS WHERE SWEEP_RESULTS.Available = TRUE AND PollerId IN ('p1', 'P2')",
    );
    assert_query(&query)
        .show()
        .entity(Entity::SweepResults)
        .where_clause(|c| {
            c.operators(&[LogicalOperator::And])
                .expression(0, |e| {
                    e.comparison(
                        "sweep_results.Available",
                        ComparisonOperator::Eq,
                        Value::Boolean(true),
                    );
                })
                .expression(1, |e| {
                    e.in_values("PollerId", &[Value::string("p1"), Value::string("P2")]);
                });
        });
}

#[test]
fn test_date_function_against_yesterday() {
    let query = parse_ok("FIND logs WHERE date(timestamp) = YESTERDAY ORDER BY timestamp DESC");
    assert_query(&query)
        .find()
        .where_clause(|c| {
            c.expression(0, |e| {
                e.comparison("date(timestamp)", ComparisonOperator::Eq, Value::Yesterday);
            });
        })
        .order_by(&[("timestamp", SortDirection::Desc)]);
}

#[test]
fn test_floats_and_negative_numbers() {
    let query = parse_ok("SHOW disk_metrics WHERE usage > 0.75 AND delta < -3");
    assert_query(&query).show().where_clause(|c| {
        c.expression(0, |e| {
            e.comparison("usage", ComparisonOperator::Gt, Value::Float(0.75));
        })
        .expression(1, |e| {
            e.comparison("delta", ComparisonOperator::Lt, Value::Integer(-3));
        });
    });
}

#[test]
fn test_contains_accepts_timestamp_shaped_text() {
    let query = parse_ok("FIND logs WHERE message CONTAINS '2024-03-01 10:00:00'");
    assert_query(&query).find().where_clause(|c| {
        c.expression(0, |e| {
            e.contains("message", "2024-03-01 10:00:00");
        });
    });
}

#[test]
fn test_nested_groups() {
    let query = parse_ok(
        "SHOW devices WHERE ((os = 'linux' OR os = 'bsd') AND is_available = true) OR hostname IS NULL",
    );
    assert_query(&query)
        .kind(StatementKind::Show)
        .show()
        .where_clause(|c| {
            c.len(2)
                .operators(&[LogicalOperator::Or])
                .expression(0, |e| {
                    e.group(|outer| {
                        outer.len(2).expression(0, |inner| {
                            inner.group(|g| {
                                g.text("os = 'linux' OR os = 'bsd'");
                            });
                        });
                    });
                })
                .expression(1, |e| {
                    e.is_null("hostname", false);
                });
        });
}

#[test]
fn test_multi_line_query() {
    let query = parse_ok("SHOW devices\n  WHERE ip = '10.0.0.1'\n  LIMIT 5\n");
    assert_query(&query).show().limit(5).no_time_spec();
}

#[test]
fn test_aggregate_target_variants() {
    assert_query(&parse_ok("SHOW avg(latency) FROM icmp_results"))
        .show()
        .aggregate("avg(latency)", Entity::IcmpResults)
        .no_time_spec();
    assert_query(&parse_ok("SHOW max(value, 10) FROM snmp_metrics FROM TODAY LIMIT 1"))
        .show()
        .aggregate("max(value, 10)", Entity::SnmpMetrics)
        .time_spec(TimeSpec::Today)
        .limit(1);
    assert_query(&parse_ok("SHOW now() FROM pollers"))
        .canonical("SHOW now() FROM pollers");
}
