//! Token definitions for SRQL
//!
//! Every token kind the lexer can produce is declared here with the logos
//! derive macro, so the keyword table and the literal patterns are compiled
//! into the lexer's state machine. Keywords match case-insensitively and
//! always win over identifiers. Format literals (timestamps, addresses) win
//! over the plain string and number rules through longest match or explicit
//! priorities.
use crate::ast::{Entity, Position};
use logos::Logos;
use serde::{Deserialize, Serialize};
use std::fmt;

/// All possible token kinds in an SRQL query
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[logos(skip r"[ \t\r\n\f]+")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    // Statements
    #[token("show", ignore(ascii_case))]
    Show,
    #[token("find", ignore(ascii_case))]
    Find,
    #[token("count", ignore(ascii_case))]
    Count,
    #[token("stream", ignore(ascii_case))]
    Stream,

    // Entities
    #[token("devices", ignore(ascii_case))]
    Devices,
    #[token("flows", ignore(ascii_case))]
    Flows,
    #[token("traps", ignore(ascii_case))]
    Traps,
    #[token("connections", ignore(ascii_case))]
    Connections,
    #[token("logs", ignore(ascii_case))]
    Logs,
    #[token("services", ignore(ascii_case))]
    Services,
    #[token("interfaces", ignore(ascii_case))]
    Interfaces,
    #[token("sweep_results", ignore(ascii_case))]
    SweepResults,
    #[token("device_updates", ignore(ascii_case))]
    DeviceUpdates,
    #[token("icmp_results", ignore(ascii_case))]
    IcmpResults,
    #[token("snmp_results", ignore(ascii_case))]
    SnmpResults,
    #[token("events", ignore(ascii_case))]
    Events,
    #[token("pollers", ignore(ascii_case))]
    Pollers,
    #[token("cpu_metrics", ignore(ascii_case))]
    CpuMetrics,
    #[token("disk_metrics", ignore(ascii_case))]
    DiskMetrics,
    #[token("memory_metrics", ignore(ascii_case))]
    MemoryMetrics,
    #[token("process_metrics", ignore(ascii_case))]
    ProcessMetrics,
    #[token("snmp_metrics", ignore(ascii_case))]
    SnmpMetrics,
    #[token("otel_traces", ignore(ascii_case))]
    OtelTraces,
    #[token("otel_metrics", ignore(ascii_case))]
    OtelMetrics,
    #[token("otel_trace_summaries", ignore(ascii_case))]
    OtelTraceSummaries,

    // Clauses
    #[token("where", ignore(ascii_case))]
    Where,
    #[token("order", ignore(ascii_case))]
    Order,
    #[token("by", ignore(ascii_case))]
    By,
    #[token("limit", ignore(ascii_case))]
    Limit,
    #[token("group", ignore(ascii_case))]
    Group,
    #[token("having", ignore(ascii_case))]
    Having,
    #[token("emit", ignore(ascii_case))]
    Emit,
    #[token("after", ignore(ascii_case))]
    After,
    #[token("window", ignore(ascii_case))]
    Window,
    #[token("close", ignore(ascii_case))]
    Close,
    #[token("with", ignore(ascii_case))]
    With,
    #[token("delay", ignore(ascii_case))]
    Delay,
    #[token("periodic", ignore(ascii_case))]
    Periodic,
    #[token("from", ignore(ascii_case))]
    From,
    #[token("as", ignore(ascii_case))]
    As,
    #[token("join", ignore(ascii_case))]
    Join,
    #[token("on", ignore(ascii_case))]
    On,
    #[token("left", ignore(ascii_case))]
    Left,
    #[token("right", ignore(ascii_case))]
    Right,
    #[token("inner", ignore(ascii_case))]
    Inner,
    #[token("tumble", ignore(ascii_case))]
    Tumble,
    #[token("hop", ignore(ascii_case))]
    Hop,
    #[token("table", ignore(ascii_case))]
    Table,
    #[token("latest", ignore(ascii_case))]
    Latest,
    #[token("in", ignore(ascii_case))]
    In,
    #[token("between", ignore(ascii_case))]
    Between,
    #[token("contains", ignore(ascii_case))]
    Contains,
    #[token("is", ignore(ascii_case))]
    Is,
    #[token("not", ignore(ascii_case))]
    Not,
    #[token("null", ignore(ascii_case))]
    Null,
    #[token("and", ignore(ascii_case))]
    And,
    #[token("or", ignore(ascii_case))]
    Or,
    #[token("asc", ignore(ascii_case))]
    Asc,
    #[token("desc", ignore(ascii_case))]
    Desc,
    #[token("today", ignore(ascii_case))]
    Today,
    #[token("yesterday", ignore(ascii_case))]
    Yesterday,
    #[token("last", ignore(ascii_case))]
    Last,

    // Coarse time units, only used by `LAST n <unit>`
    #[token("minutes", ignore(ascii_case))]
    Minutes,
    #[token("hours", ignore(ascii_case))]
    Hours,
    #[token("days", ignore(ascii_case))]
    Days,
    #[token("weeks", ignore(ascii_case))]
    Weeks,
    #[token("months", ignore(ascii_case))]
    Months,

    // Duration units. A case-insensitive single letter only weighs as much as
    // an identifier start, so these need an explicit priority.
    #[token("s", priority = 3, ignore(ascii_case))]
    SecondsUnit,
    #[token("m", priority = 3, ignore(ascii_case))]
    MinutesUnit,
    #[token("h", priority = 3, ignore(ascii_case))]
    HoursUnit,
    #[token("d", priority = 3, ignore(ascii_case))]
    DaysUnit,

    // Operators
    #[token("=")]
    #[token("==")]
    Eq,
    #[token("!=")]
    #[token("<>")]
    Neq,
    #[token(">")]
    Gt,
    #[token(">=")]
    Gte,
    #[token("<")]
    Lt,
    #[token("<=")]
    Lte,
    #[token("like", ignore(ascii_case))]
    Like,

    // Punctuation
    #[token(".")]
    Dot,
    #[token(",")]
    Comma,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("*")]
    Star,

    // Literals
    #[token("true", ignore(ascii_case))]
    #[token("false", ignore(ascii_case))]
    Boolean,
    #[regex(r"-?[0-9]+\.[0-9]+")]
    Float,
    #[regex(r"-?[0-9]+")]
    Integer,
    #[regex(r"'[^']*'")]
    #[regex(r#""[^"]*""#)]
    String,
    #[regex(
        r"'[0-9]{4}-[0-9]{2}-[0-9]{2}[ T][0-9]{2}:[0-9]{2}:[0-9]{2}(\.[0-9]+)?Z?'",
        priority = 10
    )]
    #[regex(
        r#""[0-9]{4}-[0-9]{2}-[0-9]{2}[ T][0-9]{2}:[0-9]{2}:[0-9]{2}(\.[0-9]+)?Z?""#,
        priority = 10
    )]
    Timestamp,
    #[regex(r"[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}")]
    #[regex(r"[0-9A-Fa-f]{0,4}(:[0-9A-Fa-f]{0,4}){2,7}", priority = 15)]
    IpAddress,
    #[regex(r"[0-9A-Fa-f]{2}([:-][0-9A-Fa-f]{2}){5}", priority = 20)]
    MacAddress,
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Identifier,

    // Never produced by logos; appended by the lexer at end of input
    Eof,
}

/// Statement keywords, in dispatch order
pub const STATEMENT_KINDS: [TokenKind; 4] = [
    TokenKind::Show,
    TokenKind::Find,
    TokenKind::Count,
    TokenKind::Stream,
];

pub const ENTITY_KINDS: [TokenKind; 21] = [
    TokenKind::Devices,
    TokenKind::Flows,
    TokenKind::Traps,
    TokenKind::Connections,
    TokenKind::Logs,
    TokenKind::Services,
    TokenKind::Interfaces,
    TokenKind::SweepResults,
    TokenKind::DeviceUpdates,
    TokenKind::IcmpResults,
    TokenKind::SnmpResults,
    TokenKind::Events,
    TokenKind::Pollers,
    TokenKind::CpuMetrics,
    TokenKind::DiskMetrics,
    TokenKind::MemoryMetrics,
    TokenKind::ProcessMetrics,
    TokenKind::SnmpMetrics,
    TokenKind::OtelTraces,
    TokenKind::OtelMetrics,
    TokenKind::OtelTraceSummaries,
];

/// Tokens that can start a literal value
pub const VALUE_KINDS: [TokenKind; 9] = [
    TokenKind::String,
    TokenKind::Integer,
    TokenKind::Float,
    TokenKind::Boolean,
    TokenKind::Today,
    TokenKind::Yesterday,
    TokenKind::Timestamp,
    TokenKind::IpAddress,
    TokenKind::MacAddress,
];

pub const COMPARISON_KINDS: [TokenKind; 7] = [
    TokenKind::Eq,
    TokenKind::Neq,
    TokenKind::Gt,
    TokenKind::Gte,
    TokenKind::Lt,
    TokenKind::Lte,
    TokenKind::Like,
];

pub const DURATION_UNIT_KINDS: [TokenKind; 4] = [
    TokenKind::SecondsUnit,
    TokenKind::MinutesUnit,
    TokenKind::HoursUnit,
    TokenKind::DaysUnit,
];

pub const TIME_UNIT_KINDS: [TokenKind; 5] = [
    TokenKind::Minutes,
    TokenKind::Hours,
    TokenKind::Days,
    TokenKind::Weeks,
    TokenKind::Months,
];

/// Keywords that double as function names when directly followed by `(`
pub const CALLABLE_KEYWORDS: [TokenKind; 3] = [TokenKind::Count, TokenKind::Left, TokenKind::Right];

/// Every reserved word, used for typo suggestions and the keyword table tests
pub const KEYWORDS: &[TokenKind] = &[
    TokenKind::Show,
    TokenKind::Find,
    TokenKind::Count,
    TokenKind::Stream,
    TokenKind::Devices,
    TokenKind::Flows,
    TokenKind::Traps,
    TokenKind::Connections,
    TokenKind::Logs,
    TokenKind::Services,
    TokenKind::Interfaces,
    TokenKind::SweepResults,
    TokenKind::DeviceUpdates,
    TokenKind::IcmpResults,
    TokenKind::SnmpResults,
    TokenKind::Events,
    TokenKind::Pollers,
    TokenKind::CpuMetrics,
    TokenKind::DiskMetrics,
    TokenKind::MemoryMetrics,
    TokenKind::ProcessMetrics,
    TokenKind::SnmpMetrics,
    TokenKind::OtelTraces,
    TokenKind::OtelMetrics,
    TokenKind::OtelTraceSummaries,
    TokenKind::Where,
    TokenKind::Order,
    TokenKind::By,
    TokenKind::Limit,
    TokenKind::Group,
    TokenKind::Having,
    TokenKind::Emit,
    TokenKind::After,
    TokenKind::Window,
    TokenKind::Close,
    TokenKind::With,
    TokenKind::Delay,
    TokenKind::Periodic,
    TokenKind::From,
    TokenKind::As,
    TokenKind::Join,
    TokenKind::On,
    TokenKind::Left,
    TokenKind::Right,
    TokenKind::Inner,
    TokenKind::Tumble,
    TokenKind::Hop,
    TokenKind::Table,
    TokenKind::Latest,
    TokenKind::In,
    TokenKind::Between,
    TokenKind::Contains,
    TokenKind::Is,
    TokenKind::Not,
    TokenKind::Null,
    TokenKind::And,
    TokenKind::Or,
    TokenKind::Asc,
    TokenKind::Desc,
    TokenKind::Today,
    TokenKind::Yesterday,
    TokenKind::Last,
    TokenKind::Minutes,
    TokenKind::Hours,
    TokenKind::Days,
    TokenKind::Weeks,
    TokenKind::Months,
    TokenKind::SecondsUnit,
    TokenKind::MinutesUnit,
    TokenKind::HoursUnit,
    TokenKind::DaysUnit,
    TokenKind::Like,
];

impl TokenKind {
    /// The entity spelled by this keyword, if it is an entity keyword
    pub fn entity(self) -> Option<Entity> {
        let entity = match self {
            TokenKind::Devices => Entity::Devices,
            TokenKind::Flows => Entity::Flows,
            TokenKind::Traps => Entity::Traps,
            TokenKind::Connections => Entity::Connections,
            TokenKind::Logs => Entity::Logs,
            TokenKind::Services => Entity::Services,
            TokenKind::Interfaces => Entity::Interfaces,
            TokenKind::SweepResults => Entity::SweepResults,
            TokenKind::DeviceUpdates => Entity::DeviceUpdates,
            TokenKind::IcmpResults => Entity::IcmpResults,
            TokenKind::SnmpResults => Entity::SnmpResults,
            TokenKind::Events => Entity::Events,
            TokenKind::Pollers => Entity::Pollers,
            TokenKind::CpuMetrics => Entity::CpuMetrics,
            TokenKind::DiskMetrics => Entity::DiskMetrics,
            TokenKind::MemoryMetrics => Entity::MemoryMetrics,
            TokenKind::ProcessMetrics => Entity::ProcessMetrics,
            TokenKind::SnmpMetrics => Entity::SnmpMetrics,
            TokenKind::OtelTraces => Entity::OtelTraces,
            TokenKind::OtelMetrics => Entity::OtelMetrics,
            TokenKind::OtelTraceSummaries => Entity::OtelTraceSummaries,
            _ => return None,
        };
        Some(entity)
    }

    /// Canonical spelling of a reserved word, `None` for literals and punctuation
    pub fn keyword_text(self) -> Option<&'static str> {
        if let Some(entity) = self.entity() {
            return Some(entity.as_str());
        }
        let text = match self {
            TokenKind::Show => "SHOW",
            TokenKind::Find => "FIND",
            TokenKind::Count => "COUNT",
            TokenKind::Stream => "STREAM",
            TokenKind::Where => "WHERE",
            TokenKind::Order => "ORDER",
            TokenKind::By => "BY",
            TokenKind::Limit => "LIMIT",
            TokenKind::Group => "GROUP",
            TokenKind::Having => "HAVING",
            TokenKind::Emit => "EMIT",
            TokenKind::After => "AFTER",
            TokenKind::Window => "WINDOW",
            TokenKind::Close => "CLOSE",
            TokenKind::With => "WITH",
            TokenKind::Delay => "DELAY",
            TokenKind::Periodic => "PERIODIC",
            TokenKind::From => "FROM",
            TokenKind::As => "AS",
            TokenKind::Join => "JOIN",
            TokenKind::On => "ON",
            TokenKind::Left => "LEFT",
            TokenKind::Right => "RIGHT",
            TokenKind::Inner => "INNER",
            TokenKind::Tumble => "TUMBLE",
            TokenKind::Hop => "HOP",
            TokenKind::Table => "TABLE",
            TokenKind::Latest => "LATEST",
            TokenKind::In => "IN",
            TokenKind::Between => "BETWEEN",
            TokenKind::Contains => "CONTAINS",
            TokenKind::Is => "IS",
            TokenKind::Not => "NOT",
            TokenKind::Null => "NULL",
            TokenKind::And => "AND",
            TokenKind::Or => "OR",
            TokenKind::Asc => "ASC",
            TokenKind::Desc => "DESC",
            TokenKind::Today => "TODAY",
            TokenKind::Yesterday => "YESTERDAY",
            TokenKind::Last => "LAST",
            TokenKind::Minutes => "MINUTES",
            TokenKind::Hours => "HOURS",
            TokenKind::Days => "DAYS",
            TokenKind::Weeks => "WEEKS",
            TokenKind::Months => "MONTHS",
            TokenKind::SecondsUnit => "s",
            TokenKind::MinutesUnit => "m",
            TokenKind::HoursUnit => "h",
            TokenKind::DaysUnit => "d",
            TokenKind::Like => "LIKE",
            _ => return None,
        };
        Some(text)
    }

    pub fn is_keyword(self) -> bool {
        self.keyword_text().is_some()
    }

    pub fn is_entity(self) -> bool {
        self.entity().is_some()
    }

    pub fn is_value_start(self) -> bool {
        VALUE_KINDS.contains(&self)
    }

    pub fn is_callable(self) -> bool {
        self == TokenKind::Identifier || CALLABLE_KEYWORDS.contains(&self)
    }

    /// Human-readable name used in diagnostics
    pub fn describe(self) -> &'static str {
        if let Some(text) = self.keyword_text() {
            return text;
        }
        match self {
            TokenKind::Eq => "'='",
            TokenKind::Neq => "'!='",
            TokenKind::Gt => "'>'",
            TokenKind::Gte => "'>='",
            TokenKind::Lt => "'<'",
            TokenKind::Lte => "'<='",
            TokenKind::Dot => "'.'",
            TokenKind::Comma => "','",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::Star => "'*'",
            TokenKind::Boolean => "boolean",
            TokenKind::Float => "float",
            TokenKind::Integer => "integer",
            TokenKind::String => "string",
            TokenKind::Timestamp => "timestamp",
            TokenKind::IpAddress => "IP address",
            TokenKind::MacAddress => "MAC address",
            TokenKind::Identifier => "identifier",
            TokenKind::Eof => "end of input",
            _ => "token",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A classified slice of the query source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub lexeme: &'a str,
    pub position: Position,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, lexeme: &'a str, position: Position) -> Self {
        Self {
            kind,
            lexeme,
            position,
        }
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_eof() {
            write!(f, "{} {}", self.position, self.kind)
        } else {
            write!(f, "{} {} `{}`", self.position, self.kind, self.lexeme)
        }
    }
}
