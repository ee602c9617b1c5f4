//! Club dashboard aggregation
//!
//! Pure reductions over snapshots the caller fetched in bulk.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::entities::{
    Activity, CaseType, Comanda, ComandaStatus, Invoice, Member, StockItem,
};
use crate::progression::{PatchRules, ProspectStats};

/// Everything the dashboard reads
#[derive(Debug, Clone, Copy)]
pub struct DashboardSnapshot<'a> {
    pub members: &'a [Member],
    pub activities: &'a [Activity],
    pub comandas: &'a [Comanda],
    pub stock: &'a [StockItem],
    pub invoices: &'a [Invoice],
}

/// Active members per case type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MemberCounts {
    pub prospect: u32,
    pub half: u32,
    pub diretoria: u32,
    pub full: u32,
    pub total: u32,
}

impl MemberCounts {
    fn add(&mut self, case_type: CaseType) {
        match case_type {
            CaseType::Prospect => self.prospect += 1,
            CaseType::Half => self.half += 1,
            CaseType::Diretoria => self.diretoria += 1,
            CaseType::Full => self.full += 1,
        }
        self.total += 1;
    }
}

/// Prospect who already qualifies for the Half patch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EligibleProspect {
    pub member_id: Uuid,
    pub name: String,
    pub total_points: i64,
    pub months_as_prospect: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub members: MemberCounts,
    pub pending_activities: usize,
    pub open_comandas: usize,
    pub open_comandas_total: Decimal,
    pub revenue_days: u32,
    /// Total of tabs paid within the last `revenue_days` days
    pub revenue: Decimal,
    pub low_stock_items: usize,
    pub outstanding_dues: Decimal,
    pub half_patch_eligible: Vec<EligibleProspect>,
}

impl DashboardSummary {
    pub fn compute(
        snapshot: &DashboardSnapshot<'_>,
        now: DateTime<Utc>,
        rules: &PatchRules,
        revenue_days: u32,
    ) -> Self {
        let mut members = MemberCounts::default();
        for member in snapshot.members.iter().filter(|m| m.active) {
            members.add(member.case_type);
        }

        let mut by_member: HashMap<Uuid, Vec<Activity>> = HashMap::new();
        for activity in snapshot.activities {
            by_member
                .entry(activity.prospect_id)
                .or_default()
                .push(activity.clone());
        }

        let mut half_patch_eligible: Vec<EligibleProspect> = snapshot
            .members
            .iter()
            .filter(|m| m.active && m.is_prospect())
            .filter_map(|member| {
                let activities = by_member.get(&member.id).map_or(&[][..], Vec::as_slice);
                let stats = ProspectStats::compute(member, activities, now, rules);
                stats.half_patch.eligible.then(|| EligibleProspect {
                    member_id: member.id,
                    name: member.display_name().to_string(),
                    total_points: stats.total_points,
                    months_as_prospect: stats.months_as_prospect,
                })
            })
            .collect();
        half_patch_eligible.sort_by(|a, b| a.name.cmp(&b.name));

        let open: Vec<&Comanda> = snapshot.comandas.iter().filter(|c| c.is_open()).collect();
        let window_start = now - Duration::days(i64::from(revenue_days));
        let revenue = snapshot
            .comandas
            .iter()
            .filter(|c| c.status == ComandaStatus::Paid)
            .filter(|c| c.closed_at.is_some_and(|at| at >= window_start && at <= now))
            .map(Comanda::total)
            .sum();

        Self {
            members,
            pending_activities: snapshot.activities.iter().filter(|a| a.is_pending()).count(),
            open_comandas: open.len(),
            open_comandas_total: open.iter().map(|c| c.total()).sum(),
            revenue_days,
            revenue,
            low_stock_items: snapshot.stock.iter().filter(|i| i.is_low()).count(),
            outstanding_dues: snapshot.invoices.iter().map(Invoice::outstanding).sum(),
            half_patch_eligible,
        }
    }
}
