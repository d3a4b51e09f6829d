//! Queryable record types
//!
//! Every entity is also a reserved keyword. [`Entity::token_kind`] and
//! [`TokenKind::entity`] are the two halves of that mapping and are checked
//! against each other in the lexer tests.

use crate::lexer::TokenKind;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Entity {
    Devices,
    Flows,
    Traps,
    Connections,
    Logs,
    Services,
    Interfaces,
    SweepResults,
    DeviceUpdates,
    IcmpResults,
    SnmpResults,
    Events,
    Pollers,
    CpuMetrics,
    DiskMetrics,
    MemoryMetrics,
    ProcessMetrics,
    SnmpMetrics,
    OtelTraces,
    OtelMetrics,
    OtelTraceSummaries,
}

impl Entity {
    pub const ALL: [Entity; 21] = [
        Entity::Devices,
        Entity::Flows,
        Entity::Traps,
        Entity::Connections,
        Entity::Logs,
        Entity::Services,
        Entity::Interfaces,
        Entity::SweepResults,
        Entity::DeviceUpdates,
        Entity::IcmpResults,
        Entity::SnmpResults,
        Entity::Events,
        Entity::Pollers,
        Entity::CpuMetrics,
        Entity::DiskMetrics,
        Entity::MemoryMetrics,
        Entity::ProcessMetrics,
        Entity::SnmpMetrics,
        Entity::OtelTraces,
        Entity::OtelMetrics,
        Entity::OtelTraceSummaries,
    ];

    /// Canonical (lower-case) spelling of the entity keyword
    pub fn as_str(self) -> &'static str {
        match self {
            Entity::Devices => "devices",
            Entity::Flows => "flows",
            Entity::Traps => "traps",
            Entity::Connections => "connections",
            Entity::Logs => "logs",
            Entity::Services => "services",
            Entity::Interfaces => "interfaces",
            Entity::SweepResults => "sweep_results",
            Entity::DeviceUpdates => "device_updates",
            Entity::IcmpResults => "icmp_results",
            Entity::SnmpResults => "snmp_results",
            Entity::Events => "events",
            Entity::Pollers => "pollers",
            Entity::CpuMetrics => "cpu_metrics",
            Entity::DiskMetrics => "disk_metrics",
            Entity::MemoryMetrics => "memory_metrics",
            Entity::ProcessMetrics => "process_metrics",
            Entity::SnmpMetrics => "snmp_metrics",
            Entity::OtelTraces => "otel_traces",
            Entity::OtelMetrics => "otel_metrics",
            Entity::OtelTraceSummaries => "otel_trace_summaries",
        }
    }

    /// The keyword token that spells this entity
    pub fn token_kind(self) -> TokenKind {
        match self {
            Entity::Devices => TokenKind::Devices,
            Entity::Flows => TokenKind::Flows,
            Entity::Traps => TokenKind::Traps,
            Entity::Connections => TokenKind::Connections,
            Entity::Logs => TokenKind::Logs,
            Entity::Services => TokenKind::Services,
            Entity::Interfaces => TokenKind::Interfaces,
            Entity::SweepResults => TokenKind::SweepResults,
            Entity::DeviceUpdates => TokenKind::DeviceUpdates,
            Entity::IcmpResults => TokenKind::IcmpResults,
            Entity::SnmpResults => TokenKind::SnmpResults,
            Entity::Events => TokenKind::Events,
            Entity::Pollers => TokenKind::Pollers,
            Entity::CpuMetrics => TokenKind::CpuMetrics,
            Entity::DiskMetrics => TokenKind::DiskMetrics,
            Entity::MemoryMetrics => TokenKind::MemoryMetrics,
            Entity::ProcessMetrics => TokenKind::ProcessMetrics,
            Entity::SnmpMetrics => TokenKind::SnmpMetrics,
            Entity::OtelTraces => TokenKind::OtelTraces,
            Entity::OtelMetrics => TokenKind::OtelMetrics,
            Entity::OtelTraceSummaries => TokenKind::OtelTraceSummaries,
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
