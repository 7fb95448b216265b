use std::net::IpAddr;

use crate::common::{decide, Decision, Provider, RecordKind, Resolver};
use crate::Config;

use super::PassSummary;

/// Bring every managed record of the zone in line with the current public
/// addresses. Errors are logged and counted, never returned.
pub fn reconcile<P, R>(config: &Config, provider: &P, resolver: &R, dry_run: bool) -> PassSummary
where
    P: Provider,
    R: Resolver,
{
    let mut summary = PassSummary::default();
    let force = config.main.force_update;

    let mut resolved: Vec<(RecordKind, IpAddr)> = Vec::with_capacity(RecordKind::ALL.len());
    for (kind, source) in config.configured_kinds() {
        match resolver.resolve(kind, source) {
            Ok(addr) => {
                tracing::info!(kind = kind.as_str(), address = %addr, "Resolved public address");
                resolved.push((kind, addr));
            }
            Err(err) => {
                tracing::error!(kind = kind.as_str(), "Failed to resolve public address: {err}");
                summary.unresolved += 1;
            }
        }
    }

    let records = match provider.list_records() {
        Ok(records) => records,
        Err(err) => {
            tracing::error!("Failed to list DNS records: {err}");
            Vec::new()
        }
    };

    for record in records.iter() {
        let Some(kind) = record.record_kind() else {
            continue;
        };
        if !record.has_name(&config.main.domain) || config.discovery(kind).is_none() {
            continue;
        }
        let Some(addr) = resolved
            .iter()
            .find_map(|(k, addr)| (*k == kind).then_some(addr))
        else {
            summary.skipped += 1;
            continue;
        };

        let decision = decide(&record.content, addr, force);
        if !decision.needs_write() {
            tracing::info!(
                kind = kind.as_str(),
                name = record.name.as_str(),
                content = record.content.as_str(),
                "Record matches, no update required"
            );
            summary.unchanged += 1;
            continue;
        }

        if decision == Decision::ForcedUpdate {
            tracing::info!(
                kind = kind.as_str(),
                name = record.name.as_str(),
                content = record.content.as_str(),
                "Record matches, updating anyway because force_update is set"
            );
        }

        let content = addr.to_string();
        if dry_run {
            tracing::info!(
                kind = kind.as_str(),
                name = record.name.as_str(),
                record_id = record.id.as_str(),
                from = record.content.as_str(),
                to = content.as_str(),
                "Dry run, not updating record"
            );
            summary.updated += 1;
            continue;
        }

        tracing::info!(
            kind = kind.as_str(),
            name = record.name.as_str(),
            record_id = record.id.as_str(),
            from = record.content.as_str(),
            to = content.as_str(),
            "Updating record"
        );
        match provider.update_record(record, &content) {
            Ok(()) => summary.updated += 1,
            Err(err) => {
                tracing::error!(
                    kind = kind.as_str(),
                    record_id = record.id.as_str(),
                    "Failed to update {kind} record: {err}"
                );
                summary.failed += 1;
            }
        }
    }

    summary
}
