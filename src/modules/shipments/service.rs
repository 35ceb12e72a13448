use std::sync::Arc;

use chrono::NaiveDateTime;

use super::entities::{enums::ShipmentStatus, shipment, shipment_tracking};
use super::repository::ShipmentRepository;
use crate::modules::orders::dtos::{to_shipment_dto, ShipmentDto};
use crate::modules::orders::repository::OrderRepository;
use crate::shared::audit;
use crate::shared::error::{AppError, AppResult};

/// Location stamped on the tracking event synthesized when a shipment is
/// first created.
pub const INITIAL_TRACKING_LOCATION: &str = "IN STORE";

/// Builds the PENDING shipment and its single "IN STORE" tracking event for
/// a freshly paid order. The order workflow persists both inside its payment
/// transaction; the tracking's `shipment_id` is fixed up there once the
/// shipment row exists.
pub fn initialize_shipment(
    order_id: i32,
    at: NaiveDateTime,
) -> (shipment::Model, shipment_tracking::Model) {
    let shipment = shipment::Model {
        id: 0,
        order_id,
        status: ShipmentStatus::Pending,
        created_at: at,
        created_by: audit::SYSTEM_ACTOR.to_string(),
        updated_at: at,
        updated_by: audit::SYSTEM_ACTOR.to_string(),
        deleted: false,
    };

    let tracking = shipment_tracking::Model {
        id: 0,
        shipment_id: 0,
        location: INITIAL_TRACKING_LOCATION.to_string(),
        status: ShipmentStatus::Pending,
        created_at: at,
        created_by: audit::SYSTEM_ACTOR.to_string(),
        updated_at: at,
        updated_by: audit::SYSTEM_ACTOR.to_string(),
        deleted: false,
    };

    (shipment, tracking)
}

/// Shipment reads and cancellation. Shipments are addressed through the
/// owning order, so every call resolves the order scoped to the user first.
pub struct ShipmentService {
    shipments: Arc<dyn ShipmentRepository>,
    orders: Arc<dyn OrderRepository>,
}

impl ShipmentService {
    pub fn new(shipments: Arc<dyn ShipmentRepository>, orders: Arc<dyn OrderRepository>) -> Self {
        Self { shipments, orders }
    }

    pub async fn get_shipment(&self, user_id: i32, order_id: i32) -> AppResult<ShipmentDto> {
        let shipment = self.resolve(user_id, order_id).await?;
        let trackings = self.shipments.find_trackings(shipment.id).await?;
        Ok(to_shipment_dto(shipment, trackings))
    }

    /// Marks the shipment CANCELLED. No tracking event is appended for
    /// cancellation; the trail only records forward movement.
    pub async fn cancel_shipment(
        &self,
        actor: &str,
        user_id: i32,
        order_id: i32,
    ) -> AppResult<ShipmentDto> {
        let mut shipment = self.resolve(user_id, order_id).await?;

        if shipment.status == ShipmentStatus::Delivered {
            return Err(AppError::Conflict(
                "Delivered shipments cannot be cancelled".to_string(),
            ));
        }

        let stamp = audit::stamp(actor);
        shipment.status = ShipmentStatus::Cancelled;
        shipment.updated_at = stamp.at;
        shipment.updated_by = stamp.by;
        let cancelled = self.shipments.update(shipment).await?;

        tracing::info!(shipment = cancelled.id, order = order_id, "shipment cancelled");
        let trackings = self.shipments.find_trackings(cancelled.id).await?;
        Ok(to_shipment_dto(cancelled, trackings))
    }

    async fn resolve(&self, user_id: i32, order_id: i32) -> AppResult<shipment::Model> {
        self.orders
            .find_by_id_and_user(order_id, user_id)
            .await?
            .ok_or(AppError::NotFound)?;
        self.shipments
            .find_by_order(order_id)
            .await?
            .ok_or(AppError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::cart::service::AddItemRequest;
    use crate::modules::orders::service::tests::{harness, seed_product, Harness};
    use crate::modules::payments::infra::persistence::InMemoryPaymentRepository;
    use crate::modules::payments::service::{CreatePaymentRequest, PaymentService};
    use crate::modules::shipments::infra::persistence::InMemoryShipmentRepository;
    use rust_decimal_macros::dec;

    fn service(h: &Harness) -> ShipmentService {
        ShipmentService::new(
            Arc::new(InMemoryShipmentRepository::new(h.store.clone())),
            h.order_repo.clone(),
        )
    }

    async fn paid_order(h: &Harness, user_id: i32) -> i32 {
        let product_id = seed_product(&h.store, dec!(9.00), 10);
        h.carts
            .add_to_cart(
                "u1",
                user_id,
                vec![AddItemRequest {
                    product_id,
                    quantity: 1,
                }],
            )
            .await
            .unwrap();
        let order_id = h.orders.create_order("u1", user_id).await.unwrap().id;
        let payments = PaymentService::new(
            Arc::new(InMemoryPaymentRepository::new(h.store.clone())),
            h.order_repo.clone(),
            h.orders.clone(),
        );
        payments
            .create_payment(
                "u1",
                user_id,
                order_id,
                CreatePaymentRequest {
                    payment_mode: "UPI".to_string(),
                    price: dec!(9.00),
                },
            )
            .await
            .unwrap();
        order_id
    }

    #[test]
    fn initialized_shipment_starts_pending_in_store() {
        let at = chrono::Utc::now().naive_utc();
        let (shipment, tracking) = initialize_shipment(7, at);
        assert_eq!(shipment.order_id, 7);
        assert_eq!(shipment.status, ShipmentStatus::Pending);
        assert_eq!(tracking.location, INITIAL_TRACKING_LOCATION);
        assert_eq!(tracking.status, ShipmentStatus::Pending);
        assert_eq!(tracking.created_by, audit::SYSTEM_ACTOR);
    }

    #[tokio::test]
    async fn unpaid_order_has_no_shipment() {
        let h = harness();
        let svc = service(&h);
        let product_id = seed_product(&h.store, dec!(9.00), 10);
        h.carts
            .add_to_cart(
                "u1",
                1,
                vec![AddItemRequest {
                    product_id,
                    quantity: 1,
                }],
            )
            .await
            .unwrap();
        let order_id = h.orders.create_order("u1", 1).await.unwrap().id;

        assert!(matches!(
            svc.get_shipment(1, order_id).await,
            Err(AppError::NotFound)
        ));
    }

    #[tokio::test]
    async fn cancel_sets_status_without_adding_a_tracking_event() {
        let h = harness();
        let svc = service(&h);
        let order_id = paid_order(&h, 1).await;

        let before = svc.get_shipment(1, order_id).await.unwrap();
        assert_eq!(before.status, ShipmentStatus::Pending);
        assert_eq!(before.trackings.len(), 1);

        let cancelled = svc.cancel_shipment("u1", 1, order_id).await.unwrap();
        assert_eq!(cancelled.status, ShipmentStatus::Cancelled);
        assert_eq!(cancelled.trackings.len(), 1);
    }

    #[tokio::test]
    async fn delivered_shipment_cannot_be_cancelled() {
        let h = harness();
        let svc = service(&h);
        let order_id = paid_order(&h, 1).await;

        {
            let mut shipments = h.store.shipments.lock().unwrap();
            let shipment = shipments
                .values_mut()
                .find(|s| s.order_id == order_id)
                .unwrap();
            shipment.status = ShipmentStatus::Delivered;
        }

        let err = svc.cancel_shipment("u1", 1, order_id).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn shipment_is_scoped_to_the_ordering_user() {
        let h = harness();
        let svc = service(&h);
        let order_id = paid_order(&h, 1).await;

        assert!(matches!(
            svc.get_shipment(2, order_id).await,
            Err(AppError::NotFound)
        ));
    }
}
