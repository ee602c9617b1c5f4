//! In-memory repositories
//!
//! One shared store implements every repository port. Each write takes a
//! single lock, so the multi-row operations (stock level plus movement log,
//! tab item plus stock, invoice plus shares) are as atomic here as they are
//! inside a database transaction. Ordering matches the PostgreSQL queries.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use uuid::Uuid;

use club_core::traits::{
    ActivityRepository, ComandaRepository, InvoiceRepository, MemberQuery, MemberRepository,
    RepoResult, StockRepository,
};
use club_core::{
    ensure_monthly_slot, Activity, ActivityStatus, Comanda, ComandaItem, ComandaStatus,
    DomainError, DuesShare, Invoice, Member, StockItem, StockMovement,
};

use crate::services::ServiceContextBuilder;

#[derive(Default)]
struct State {
    members: HashMap<Uuid, Member>,
    activities: HashMap<Uuid, Activity>,
    stock: HashMap<Uuid, StockItem>,
    movements: Vec<StockMovement>,
    comandas: HashMap<Uuid, Comanda>,
    invoices: HashMap<Uuid, Invoice>,
}

impl State {
    fn apply_movement(&mut self, movement: &StockMovement) -> RepoResult<StockItem> {
        let item = self
            .stock
            .get_mut(&movement.item_id)
            .ok_or(DomainError::StockItemNotFound(movement.item_id))?;
        item.apply(movement)?;
        let updated = item.clone();
        self.movements.push(movement.clone());
        Ok(updated)
    }

    fn history_of(&self, member_id: Uuid) -> Vec<Activity> {
        self.activities
            .values()
            .filter(|a| a.prospect_id == member_id)
            .cloned()
            .collect()
    }

    fn open_comanda_mut(&mut self, id: Uuid) -> RepoResult<&mut Comanda> {
        let comanda = self
            .comandas
            .get_mut(&id)
            .ok_or(DomainError::ComandaNotFound(id))?;
        comanda.ensure_open()?;
        Ok(comanda)
    }
}

/// Shared in-memory store implementing all repository traits
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<State>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context builder with every repository wired to this store
    pub fn builder(&self) -> ServiceContextBuilder {
        ServiceContextBuilder::new()
            .member_repo(Arc::new(self.clone()))
            .activity_repo(Arc::new(self.clone()))
            .stock_repo(Arc::new(self.clone()))
            .comanda_repo(Arc::new(self.clone()))
            .invoice_repo(Arc::new(self.clone()))
    }

    /// Store an activity as-is, without the monthly-slot check
    ///
    /// Stands in for rows imported before the limit was enforced.
    pub fn import_activity(&self, activity: Activity) {
        self.state.write().activities.insert(activity.id, activity);
    }

    /// Number of logged stock movements across all items
    pub fn movement_count(&self) -> usize {
        self.state.read().movements.len()
    }
}

#[async_trait]
impl MemberRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Member>> {
        Ok(self.state.read().members.get(&id).cloned())
    }

    async fn list(&self, query: &MemberQuery) -> RepoResult<Vec<Member>> {
        let state = self.state.read();
        let mut members: Vec<Member> = state
            .members
            .values()
            .filter(|m| query.case_type.is_none_or(|c| m.case_type == c))
            .filter(|m| !query.active_only || m.active)
            .cloned()
            .collect();
        members.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

        let offset = usize::try_from(query.offset.max(0)).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.limit.clamp(1, 500)).unwrap_or(500);
        Ok(members.into_iter().skip(offset).take(limit).collect())
    }

    async fn find_active(&self) -> RepoResult<Vec<Member>> {
        let mut members: Vec<Member> = self
            .state
            .read()
            .members
            .values()
            .filter(|m| m.active)
            .cloned()
            .collect();
        members.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(members)
    }

    async fn create(&self, member: &Member) -> RepoResult<()> {
        self.state.write().members.insert(member.id, member.clone());
        Ok(())
    }

    async fn update(&self, member: &Member) -> RepoResult<()> {
        let mut state = self.state.write();
        let slot = state
            .members
            .get_mut(&member.id)
            .ok_or(DomainError::MemberNotFound(member.id))?;
        *slot = member.clone();
        Ok(())
    }
}

fn sorted_by_date(mut activities: Vec<Activity>) -> Vec<Activity> {
    activities.sort_by(|a, b| {
        a.activity_date
            .cmp(&b.activity_date)
            .then(a.created_at.cmp(&b.created_at))
    });
    activities
}

#[async_trait]
impl ActivityRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Activity>> {
        Ok(self.state.read().activities.get(&id).cloned())
    }

    async fn find_by_member(&self, member_id: Uuid) -> RepoResult<Vec<Activity>> {
        let activities = self
            .state
            .read()
            .activities
            .values()
            .filter(|a| a.prospect_id == member_id)
            .cloned()
            .collect();
        Ok(sorted_by_date(activities))
    }

    async fn find_pending(&self) -> RepoResult<Vec<Activity>> {
        let mut pending: Vec<Activity> = self
            .state
            .read()
            .activities
            .values()
            .filter(|a| a.status == ActivityStatus::Pending)
            .cloned()
            .collect();
        pending.sort_by_key(|a| a.created_at);
        Ok(pending)
    }

    async fn find_all(&self) -> RepoResult<Vec<Activity>> {
        let activities = self.state.read().activities.values().cloned().collect();
        Ok(sorted_by_date(activities))
    }

    async fn create(&self, activity: &Activity) -> RepoResult<()> {
        let mut state = self.state.write();
        if !state.members.contains_key(&activity.prospect_id) {
            return Err(DomainError::MemberNotFound(activity.prospect_id));
        }
        let history = state.history_of(activity.prospect_id);
        ensure_monthly_slot(&history, activity, |a| a.status != ActivityStatus::Rejected)?;

        state.activities.insert(activity.id, activity.clone());
        Ok(())
    }

    async fn record_review(&self, activity: &Activity) -> RepoResult<()> {
        let mut state = self.state.write();
        let stored = state
            .activities
            .get(&activity.id)
            .ok_or(DomainError::ActivityNotFound(activity.id))?;
        if !stored.is_pending() {
            return Err(DomainError::ActivityAlreadyReviewed(stored.status.as_str()));
        }
        if activity.is_validated() {
            let history = state.history_of(activity.prospect_id);
            ensure_monthly_slot(&history, activity, Activity::is_validated)?;
        }

        state.activities.insert(activity.id, activity.clone());
        Ok(())
    }

    async fn delete_pending(&self, id: Uuid) -> RepoResult<()> {
        let mut state = self.state.write();
        let stored = state
            .activities
            .get(&id)
            .ok_or(DomainError::ActivityNotFound(id))?;
        if !stored.is_pending() {
            return Err(DomainError::ActivityAlreadyReviewed(stored.status.as_str()));
        }

        state.activities.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl StockRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<StockItem>> {
        Ok(self.state.read().stock.get(&id).cloned())
    }

    async fn list(&self) -> RepoResult<Vec<StockItem>> {
        let mut items: Vec<StockItem> = self.state.read().stock.values().cloned().collect();
        items.sort_by(|a, b| a.category.cmp(&b.category).then(a.name.cmp(&b.name)));
        Ok(items)
    }

    async fn find_low(&self) -> RepoResult<Vec<StockItem>> {
        let mut items: Vec<StockItem> = self
            .state
            .read()
            .stock
            .values()
            .filter(|i| i.is_low())
            .cloned()
            .collect();
        items.sort_by(|a, b| a.quantity.cmp(&b.quantity).then(a.name.cmp(&b.name)));
        Ok(items)
    }

    async fn create(&self, item: &StockItem) -> RepoResult<()> {
        self.state.write().stock.insert(item.id, item.clone());
        Ok(())
    }

    async fn update(&self, item: &StockItem) -> RepoResult<()> {
        let mut state = self.state.write();
        let slot = state
            .stock
            .get_mut(&item.id)
            .ok_or(DomainError::StockItemNotFound(item.id))?;
        // The level only ever changes through movements
        let quantity = slot.quantity;
        *slot = item.clone();
        slot.quantity = quantity;
        Ok(())
    }

    async fn record_movement(&self, movement: &StockMovement) -> RepoResult<StockItem> {
        self.state.write().apply_movement(movement)
    }

    async fn find_movements(&self, item_id: Uuid, limit: i64) -> RepoResult<Vec<StockMovement>> {
        let limit = usize::try_from(limit.clamp(1, 500)).unwrap_or(500);
        let state = self.state.read();
        let mut movements: Vec<StockMovement> = state
            .movements
            .iter()
            .filter(|m| m.item_id == item_id)
            .cloned()
            .collect();
        movements.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        movements.truncate(limit);
        Ok(movements)
    }
}

#[async_trait]
impl ComandaRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Comanda>> {
        Ok(self.state.read().comandas.get(&id).cloned())
    }

    async fn list(&self, status: Option<ComandaStatus>) -> RepoResult<Vec<Comanda>> {
        let mut comandas: Vec<Comanda> = self
            .state
            .read()
            .comandas
            .values()
            .filter(|c| status.is_none_or(|s| c.status == s))
            .cloned()
            .collect();
        comandas.sort_by(|a, b| b.opened_at.cmp(&a.opened_at));
        Ok(comandas)
    }

    async fn find_paid_since(&self, since: DateTime<Utc>) -> RepoResult<Vec<Comanda>> {
        let mut comandas: Vec<Comanda> = self
            .state
            .read()
            .comandas
            .values()
            .filter(|c| c.status == ComandaStatus::Paid)
            .filter(|c| c.closed_at.is_some_and(|at| at >= since))
            .cloned()
            .collect();
        comandas.sort_by(|a, b| b.closed_at.cmp(&a.closed_at));
        Ok(comandas)
    }

    async fn create(&self, comanda: &Comanda) -> RepoResult<()> {
        let mut state = self.state.write();
        if let Some(member_id) = comanda.member_id {
            if !state.members.contains_key(&member_id) {
                return Err(DomainError::MemberNotFound(member_id));
            }
        }
        state.comandas.insert(comanda.id, comanda.clone());
        Ok(())
    }

    async fn add_item(
        &self,
        item: &ComandaItem,
        stock_exit: Option<&StockMovement>,
    ) -> RepoResult<()> {
        let mut state = self.state.write();
        state.open_comanda_mut(item.comanda_id)?;
        if let Some(movement) = stock_exit {
            state.apply_movement(movement)?;
        }
        state.open_comanda_mut(item.comanda_id)?.items.push(item.clone());
        Ok(())
    }

    async fn remove_item(
        &self,
        comanda_id: Uuid,
        item_id: Uuid,
        restock: Option<&StockMovement>,
    ) -> RepoResult<()> {
        let mut state = self.state.write();
        let comanda = state.open_comanda_mut(comanda_id)?;
        let position = comanda
            .items
            .iter()
            .position(|i| i.id == item_id)
            .ok_or(DomainError::ComandaItemNotFound(item_id))?;

        if let Some(movement) = restock {
            state.apply_movement(movement)?;
        }
        state.open_comanda_mut(comanda_id)?.items.remove(position);
        Ok(())
    }

    async fn close(&self, comanda: &Comanda, restock: &[StockMovement]) -> RepoResult<()> {
        let mut state = self.state.write();
        state.open_comanda_mut(comanda.id)?;

        // Validate every restock first so a failure leaves nothing applied
        for movement in restock {
            let item = state
                .stock
                .get(&movement.item_id)
                .ok_or(DomainError::StockItemNotFound(movement.item_id))?;
            item.quantity_after(movement.kind, movement.quantity)?;
        }
        for movement in restock {
            state.apply_movement(movement)?;
        }

        let stored = state.open_comanda_mut(comanda.id)?;
        stored.status = comanda.status;
        stored.payment_method = comanda.payment_method;
        stored.closed_at = comanda.closed_at;
        Ok(())
    }
}

#[async_trait]
impl InvoiceRepository for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Invoice>> {
        Ok(self.state.read().invoices.get(&id).cloned())
    }

    async fn list(&self) -> RepoResult<Vec<Invoice>> {
        let mut invoices: Vec<Invoice> = self.state.read().invoices.values().cloned().collect();
        invoices.sort_by(|a, b| {
            b.due_date
                .cmp(&a.due_date)
                .then(b.created_at.cmp(&a.created_at))
        });
        Ok(invoices)
    }

    async fn find_shares_by_member(&self, member_id: Uuid) -> RepoResult<Vec<DuesShare>> {
        let state = self.state.read();
        let mut invoices: Vec<&Invoice> = state.invoices.values().collect();
        invoices.sort_by(|a, b| b.due_date.cmp(&a.due_date));
        Ok(invoices
            .into_iter()
            .filter_map(|i| i.share_for(member_id).cloned())
            .collect())
    }

    async fn create(&self, invoice: &Invoice) -> RepoResult<()> {
        let mut state = self.state.write();
        if let Some(share) = invoice
            .shares
            .iter()
            .find(|s| !state.members.contains_key(&s.member_id))
        {
            return Err(DomainError::MemberNotFound(share.member_id));
        }
        state.invoices.insert(invoice.id, invoice.clone());
        Ok(())
    }

    async fn update_share(&self, share: &DuesShare) -> RepoResult<()> {
        let mut state = self.state.write();
        let slot = state
            .invoices
            .get_mut(&share.invoice_id)
            .and_then(|i| i.share_for_mut(share.member_id))
            .ok_or(DomainError::DuesShareNotFound {
                invoice_id: share.invoice_id,
                member_id: share.member_id,
            })?;
        *slot = share.clone();
        Ok(())
    }
}
