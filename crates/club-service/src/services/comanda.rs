//! Comanda service
//!
//! Bar tabs. Drinks taken from stock leave the inventory when they are added
//! to a tab and go back when they are removed or the tab is cancelled.

use club_core::{Comanda, ComandaItem, ComandaStatus, DomainError, MovementKind, StockMovement};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::dto::{AddComandaItemRequest, ComandaResponse, OpenComandaRequest, PayComandaRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::member::find_member;
use super::stock::find_item;

fn restock(item: &ComandaItem, comanda_id: Uuid) -> Option<StockMovement> {
    item.stock_item_id.map(|stock_item_id| {
        StockMovement::new(
            stock_item_id,
            MovementKind::Entry,
            item.quantity,
            Some(format!("returned from comanda {comanda_id}")),
        )
    })
}

/// Comanda service
pub struct ComandaService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ComandaService<'a> {
    /// Create a new ComandaService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Open an empty tab
    #[instrument(skip(self, request))]
    pub async fn open_comanda(&self, request: OpenComandaRequest) -> ServiceResult<ComandaResponse> {
        let customer_name = request.customer_name.trim().to_string();
        if customer_name.is_empty() {
            return Err(ServiceError::validation("customer_name must not be blank"));
        }
        if let Some(member_id) = request.member_id {
            find_member(self.ctx, member_id).await?;
        }

        let mut comanda = Comanda::open(customer_name, request.member_id);
        comanda.opened_at = self.ctx.now();
        self.ctx.comanda_repo().create(&comanda).await?;

        info!(comanda_id = %comanda.id, "Comanda opened");

        Ok(ComandaResponse::from(comanda))
    }

    /// Tabs, newest first, optionally filtered by status
    #[instrument(skip(self))]
    pub async fn list_comandas(
        &self,
        status: Option<ComandaStatus>,
    ) -> ServiceResult<Vec<ComandaResponse>> {
        let comandas = self.ctx.comanda_repo().list(status).await?;
        Ok(comandas.iter().map(ComandaResponse::from).collect())
    }

    /// One tab with its items and total
    #[instrument(skip(self))]
    pub async fn get_comanda(&self, comanda_id: Uuid) -> ServiceResult<ComandaResponse> {
        self.find_comanda(comanda_id).await.map(ComandaResponse::from)
    }

    /// Add a line to an open tab
    #[instrument(skip(self, request))]
    pub async fn add_item(
        &self,
        comanda_id: Uuid,
        request: AddComandaItemRequest,
    ) -> ServiceResult<ComandaResponse> {
        let comanda = self.find_comanda(comanda_id).await?;
        comanda.ensure_open()?;

        let description = request
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        let (item, stock_exit) = match request.stock_item_id {
            Some(stock_item_id) => {
                let stock = find_item(self.ctx, stock_item_id).await?;
                stock.quantity_after(MovementKind::Exit, request.quantity)?;

                let item = ComandaItem::new(
                    comanda_id,
                    Some(stock_item_id),
                    description.unwrap_or_else(|| stock.name.clone()),
                    request.quantity,
                    request.unit_price.unwrap_or(stock.unit_price),
                )?;
                let exit = StockMovement::new(
                    stock_item_id,
                    MovementKind::Exit,
                    request.quantity,
                    Some(format!("comanda {comanda_id}")),
                );
                (item, Some(exit))
            }
            None => {
                let (Some(description), Some(unit_price)) = (description, request.unit_price)
                else {
                    return Err(ServiceError::validation(
                        "free-text items need a description and a unit_price",
                    ));
                };
                let item =
                    ComandaItem::new(comanda_id, None, description, request.quantity, unit_price)?;
                (item, None)
            }
        };

        let now = self.ctx.now();
        let item = ComandaItem {
            created_at: now,
            ..item
        };
        let stock_exit = stock_exit.map(|m| StockMovement {
            created_at: now,
            ..m
        });

        self.ctx
            .comanda_repo()
            .add_item(&item, stock_exit.as_ref())
            .await?;

        info!(
            comanda_id = %comanda_id,
            item_id = %item.id,
            quantity = item.quantity,
            "Comanda item added"
        );

        self.get_comanda(comanda_id).await
    }

    /// Remove a line from an open tab, returning stock-linked drinks to stock
    #[instrument(skip(self))]
    pub async fn remove_item(&self, comanda_id: Uuid, item_id: Uuid) -> ServiceResult<ComandaResponse> {
        let comanda = self.find_comanda(comanda_id).await?;
        comanda.ensure_open()?;

        let item = comanda
            .item(item_id)
            .ok_or(DomainError::ComandaItemNotFound(item_id))?;
        let movement = restock(item, comanda_id).map(|m| StockMovement {
            created_at: self.ctx.now(),
            ..m
        });

        self.ctx
            .comanda_repo()
            .remove_item(comanda_id, item_id, movement.as_ref())
            .await?;

        info!(comanda_id = %comanda_id, item_id = %item_id, "Comanda item removed");

        self.get_comanda(comanda_id).await
    }

    /// Settle the tab
    #[instrument(skip(self, request))]
    pub async fn pay_comanda(
        &self,
        comanda_id: Uuid,
        request: PayComandaRequest,
    ) -> ServiceResult<ComandaResponse> {
        let mut comanda = self.find_comanda(comanda_id).await?;
        comanda.pay(request.payment_method, self.ctx.now())?;

        self.ctx.comanda_repo().close(&comanda, &[]).await?;

        info!(
            comanda_id = %comanda_id,
            total = %comanda.total(),
            method = request.payment_method.as_str(),
            "Comanda paid"
        );

        Ok(ComandaResponse::from(comanda))
    }

    /// Void the tab and return its stock-linked drinks to stock
    #[instrument(skip(self))]
    pub async fn cancel_comanda(&self, comanda_id: Uuid) -> ServiceResult<ComandaResponse> {
        let mut comanda = self.find_comanda(comanda_id).await?;
        let now = self.ctx.now();
        comanda.cancel(now)?;

        let movements: Vec<StockMovement> = comanda
            .items
            .iter()
            .filter_map(|item| restock(item, comanda_id))
            .map(|m| StockMovement {
                created_at: now,
                ..m
            })
            .collect();

        self.ctx.comanda_repo().close(&comanda, &movements).await?;

        info!(
            comanda_id = %comanda_id,
            restocked = movements.len(),
            "Comanda cancelled"
        );

        Ok(ComandaResponse::from(comanda))
    }

    async fn find_comanda(&self, comanda_id: Uuid) -> ServiceResult<Comanda> {
        self.ctx
            .comanda_repo()
            .find_by_id(comanda_id)
            .await?
            .ok_or_else(|| DomainError::ComandaNotFound(comanda_id).into())
    }
}
