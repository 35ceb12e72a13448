use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Deserialize;

use super::repository::PaymentRepository;
use crate::modules::orders::dtos::OrderDto;
use crate::modules::orders::entities::enums::OrderStatus;
use crate::modules::orders::repository::OrderRepository;
use crate::modules::orders::service::OrderService;
use crate::shared::error::{AppError, AppResult};

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePaymentRequest {
    pub payment_mode: String,
    pub price: Decimal,
}

/// Payment workflow: validates that the order is payable, then hands off to
/// the order workflow which records payment, shipment and cart deletion in
/// one transaction.
pub struct PaymentService {
    payments: Arc<dyn PaymentRepository>,
    orders: Arc<dyn OrderRepository>,
    order_service: Arc<OrderService>,
}

impl PaymentService {
    pub fn new(
        payments: Arc<dyn PaymentRepository>,
        orders: Arc<dyn OrderRepository>,
        order_service: Arc<OrderService>,
    ) -> Self {
        Self {
            payments,
            orders,
            order_service,
        }
    }

    pub async fn create_payment(
        &self,
        actor: &str,
        user_id: i32,
        order_id: i32,
        request: CreatePaymentRequest,
    ) -> AppResult<OrderDto> {
        if request.payment_mode.trim().is_empty() {
            return Err(AppError::BadRequest(
                "payment_mode must not be empty".to_string(),
            ));
        }

        let order = self
            .orders
            .find_by_id_and_user(order_id, user_id)
            .await?
            .ok_or(AppError::NotFound)?;

        if order.status != OrderStatus::Pending {
            return Err(AppError::Conflict(
                "Order is not awaiting payment".to_string(),
            ));
        }
        if self.payments.find_by_order(order.id).await?.is_some() {
            return Err(AppError::Conflict(
                "Order has already been paid".to_string(),
            ));
        }

        self.order_service
            .notify_payment(actor, order, request.payment_mode, request.price)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::cart::service::AddItemRequest;
    use crate::modules::orders::service::tests::{harness, seed_product, Harness};
    use crate::modules::payments::infra::persistence::InMemoryPaymentRepository;
    use crate::modules::shipments::entities::enums::ShipmentStatus;
    use crate::modules::shipments::service::INITIAL_TRACKING_LOCATION;
    use crate::shared::error::AppError;
    use rust_decimal_macros::dec;

    fn service(h: &Harness) -> PaymentService {
        PaymentService::new(
            Arc::new(InMemoryPaymentRepository::new(h.store.clone())),
            h.order_repo.clone(),
            h.orders.clone(),
        )
    }

    async fn checkout(h: &Harness, user_id: i32) -> i32 {
        let product_id = seed_product(&h.store, dec!(25.00), 10);
        h.carts
            .add_to_cart(
                "u1",
                user_id,
                vec![AddItemRequest {
                    product_id,
                    quantity: 2,
                }],
            )
            .await
            .unwrap();
        h.orders.create_order("u1", user_id).await.unwrap().id
    }

    #[tokio::test]
    async fn payment_marks_order_paid_and_initializes_shipment() {
        let h = harness();
        let svc = service(&h);
        let order_id = checkout(&h, 1).await;

        let order = svc
            .create_payment(
                "u1",
                1,
                order_id,
                CreatePaymentRequest {
                    payment_mode: "UPI".to_string(),
                    price: dec!(50.00),
                },
            )
            .await
            .unwrap();

        assert_eq!(order.status, OrderStatus::Paid);

        let payment = order.payment.expect("payment recorded");
        assert_eq!(payment.payment_mode, "UPI");
        assert_eq!(payment.price, dec!(50.00));

        let shipment = order.shipment.expect("shipment created");
        assert_eq!(shipment.status, ShipmentStatus::Pending);
        assert_eq!(shipment.trackings.len(), 1);
        assert_eq!(shipment.trackings[0].location, INITIAL_TRACKING_LOCATION);
        assert_eq!(shipment.trackings[0].status, ShipmentStatus::Pending);
    }

    #[tokio::test]
    async fn payment_chain_after_quantity_update() {
        let h = harness();
        let svc = service(&h);
        let product_id = seed_product(&h.store, dec!(7.00), 5);

        for quantity in [3, 4] {
            h.carts
                .add_to_cart(
                    "u1",
                    1,
                    vec![AddItemRequest {
                        product_id,
                        quantity,
                    }],
                )
                .await
                .unwrap();
        }
        let cart = h.carts.get_cart(1).await.unwrap();
        assert_eq!(cart.total_price, dec!(28.00));

        let order_id = h.orders.create_order("u1", 1).await.unwrap().id;
        let order = svc
            .create_payment(
                "u1",
                1,
                order_id,
                CreatePaymentRequest {
                    payment_mode: "UPI".to_string(),
                    price: dec!(28.00),
                },
            )
            .await
            .unwrap();

        assert_eq!(order.status, OrderStatus::Paid);
        assert!(order.payment.is_some());
        let shipment = order.shipment.expect("shipment created");
        assert_eq!(shipment.trackings.len(), 1);
        assert_eq!(shipment.trackings[0].location, INITIAL_TRACKING_LOCATION);

        let stock = h
            .store
            .products
            .lock()
            .unwrap()
            .get(&product_id)
            .unwrap()
            .available_stock;
        assert_eq!(stock, 1);
        assert!(matches!(h.carts.get_cart(1).await, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn payment_deletes_the_cart() {
        let h = harness();
        let svc = service(&h);
        let order_id = checkout(&h, 1).await;
        assert!(h.carts.get_cart(1).await.is_ok());

        svc.create_payment(
            "u1",
            1,
            order_id,
            CreatePaymentRequest {
                payment_mode: "CARD".to_string(),
                price: dec!(50.00),
            },
        )
        .await
        .unwrap();

        assert!(matches!(h.carts.get_cart(1).await, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn second_payment_for_same_order_conflicts() {
        let h = harness();
        let svc = service(&h);
        let order_id = checkout(&h, 1).await;

        let request = CreatePaymentRequest {
            payment_mode: "UPI".to_string(),
            price: dec!(50.00),
        };
        svc.create_payment("u1", 1, order_id, request.clone())
            .await
            .unwrap();

        let err = svc
            .create_payment("u1", 1, order_id, request)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn cancelled_order_cannot_be_paid() {
        let h = harness();
        let svc = service(&h);
        let order_id = checkout(&h, 1).await;
        h.orders.cancel_order("u1", 1, order_id).await.unwrap();

        let err = svc
            .create_payment(
                "u1",
                1,
                order_id,
                CreatePaymentRequest {
                    payment_mode: "UPI".to_string(),
                    price: dec!(50.00),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn paying_someone_elses_order_is_not_found() {
        let h = harness();
        let svc = service(&h);
        let order_id = checkout(&h, 1).await;

        let err = svc
            .create_payment(
                "u2",
                2,
                order_id,
                CreatePaymentRequest {
                    payment_mode: "UPI".to_string(),
                    price: dec!(50.00),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }
}
