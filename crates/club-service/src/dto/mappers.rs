//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use club_core::{
    Activity, ActivityKind, Comanda, ComandaItem, DuesShare, Invoice, Member, StockItem,
    StockMovement,
};

use super::responses::{
    ActivityKindResponse, ActivityResponse, ComandaItemResponse, ComandaResponse,
    DuesShareResponse, InvoiceResponse, MemberResponse, StockItemResponse, StockMovementResponse,
};

// ============================================================================
// Member Mappers
// ============================================================================

impl From<&Member> for MemberResponse {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id,
            name: member.name.clone(),
            nickname: member.nickname.clone(),
            email: member.email.clone(),
            phone: member.phone.clone(),
            case_type: member.case_type,
            half_date: member.half_date,
            active: member.active,
            joined_at: member.join_date(),
            created_at: member.created_at,
            updated_at: member.updated_at,
        }
    }
}

impl From<Member> for MemberResponse {
    fn from(member: Member) -> Self {
        Self::from(&member)
    }
}

// ============================================================================
// Activity Mappers
// ============================================================================

impl From<&Activity> for ActivityResponse {
    fn from(activity: &Activity) -> Self {
        Self {
            id: activity.id,
            member_id: activity.prospect_id,
            activity_type: activity.kind,
            activity_date: activity.activity_date,
            description: activity.description.clone(),
            status: activity.status,
            points: activity.points,
            reviewed_by: activity.reviewed_by.clone(),
            reviewed_at: activity.reviewed_at,
            created_at: activity.created_at,
        }
    }
}

impl From<Activity> for ActivityResponse {
    fn from(activity: Activity) -> Self {
        Self::from(&activity)
    }
}

impl From<ActivityKind> for ActivityKindResponse {
    fn from(kind: ActivityKind) -> Self {
        Self {
            activity_type: kind,
            points: kind.points(),
            once_per_month: kind.once_per_month(),
        }
    }
}

// ============================================================================
// Stock Mappers
// ============================================================================

impl From<&StockItem> for StockItemResponse {
    fn from(item: &StockItem) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            category: item.category.clone(),
            unit: item.unit.clone(),
            quantity: item.quantity,
            min_quantity: item.min_quantity,
            unit_price: item.unit_price,
            low: item.is_low(),
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

impl From<StockItem> for StockItemResponse {
    fn from(item: StockItem) -> Self {
        Self::from(&item)
    }
}

impl From<StockMovement> for StockMovementResponse {
    fn from(movement: StockMovement) -> Self {
        Self {
            id: movement.id,
            item_id: movement.item_id,
            kind: movement.kind,
            quantity: movement.quantity,
            note: movement.note,
            created_at: movement.created_at,
        }
    }
}

// ============================================================================
// Comanda Mappers
// ============================================================================

impl From<&ComandaItem> for ComandaItemResponse {
    fn from(item: &ComandaItem) -> Self {
        Self {
            id: item.id,
            stock_item_id: item.stock_item_id,
            description: item.description.clone(),
            quantity: item.quantity,
            unit_price: item.unit_price,
            subtotal: item.subtotal(),
        }
    }
}

impl From<&Comanda> for ComandaResponse {
    fn from(comanda: &Comanda) -> Self {
        Self {
            id: comanda.id,
            customer_name: comanda.customer_name.clone(),
            member_id: comanda.member_id,
            status: comanda.status,
            payment_method: comanda.payment_method,
            items: comanda.items.iter().map(ComandaItemResponse::from).collect(),
            total: comanda.total(),
            opened_at: comanda.opened_at,
            closed_at: comanda.closed_at,
        }
    }
}

impl From<Comanda> for ComandaResponse {
    fn from(comanda: Comanda) -> Self {
        Self::from(&comanda)
    }
}

// ============================================================================
// Dues Mappers
// ============================================================================

impl From<&DuesShare> for DuesShareResponse {
    fn from(share: &DuesShare) -> Self {
        Self {
            invoice_id: share.invoice_id,
            member_id: share.member_id,
            amount: share.amount,
            paid: share.is_paid(),
            paid_at: share.paid_at,
        }
    }
}

impl From<DuesShare> for DuesShareResponse {
    fn from(share: DuesShare) -> Self {
        Self::from(&share)
    }
}

impl From<&Invoice> for InvoiceResponse {
    fn from(invoice: &Invoice) -> Self {
        Self {
            id: invoice.id,
            description: invoice.description.clone(),
            total_amount: invoice.total_amount,
            due_date: invoice.due_date,
            outstanding: invoice.outstanding(),
            shares: invoice.shares.iter().map(DuesShareResponse::from).collect(),
            created_at: invoice.created_at,
        }
    }
}

impl From<Invoice> for InvoiceResponse {
    fn from(invoice: Invoice) -> Self {
        Self::from(&invoice)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use super::*;

    #[test]
    fn test_comanda_response_total() {
        let mut comanda = Comanda::open("Mesa 3".to_string(), None);
        comanda.items.push(
            ComandaItem::new(comanda.id, None, "Cerveja".to_string(), 3, Decimal::new(850, 2))
                .unwrap(),
        );
        comanda.items.push(
            ComandaItem::new(comanda.id, None, "Porção".to_string(), 1, Decimal::new(3200, 2))
                .unwrap(),
        );

        let response = ComandaResponse::from(&comanda);
        assert_eq!(response.items.len(), 2);
        assert_eq!(response.items[0].subtotal, Decimal::new(2550, 2));
        assert_eq!(response.total, Decimal::new(5750, 2));
    }

    #[test]
    fn test_invoice_response_outstanding() {
        let members = [Uuid::new_v4(), Uuid::new_v4()];
        let mut invoice = Invoice::split_among(
            "Mensalidade".to_string(),
            Decimal::new(10000, 2),
            chrono::NaiveDate::from_ymd_opt(2024, 4, 10).unwrap(),
            &members,
        )
        .unwrap();
        invoice
            .share_for_mut(members[0])
            .unwrap()
            .mark_paid(chrono::Utc::now())
            .unwrap();

        let response = InvoiceResponse::from(&invoice);
        assert_eq!(response.outstanding, Decimal::new(5000, 2));
        assert!(response.shares[0].paid);
        assert!(!response.shares[1].paid);
    }

    #[test]
    fn test_activity_kind_catalogue_entry() {
        let entry = ActivityKindResponse::from(ActivityKind::MeetingAttendance);
        assert_eq!(entry.points, 10);
        assert!(entry.once_per_month);
    }
}
