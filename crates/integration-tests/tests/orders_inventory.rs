//! Order management and inventory batch operations.

use neszi_client::ApiError;
use neszi_client::types::InventoryItem;
use neszi_core::{OrderId, OrderStatus, ProductId};
use neszi_integration_tests::TestContext;

#[tokio::test]
async fn list_orders_returns_typed_orders() {
    let ctx = TestContext::start().await;
    ctx.authenticate();

    let orders = ctx.client.list_orders().await.expect("list succeeds");

    assert_eq!(orders.len(), 1);
    let order = orders.first().expect("seeded order");
    assert_eq!(order.id, OrderId::new(12));
    assert_eq!(order.user_name, "Jane Buyer");
    assert_eq!(order.delivery_address.city, "Nairobi");
    assert_eq!(order.payment_method, "M-Pesa");
    assert_eq!(order.mpesa_receipt_number.as_deref(), Some("QWE123"));
    assert_eq!(order.total_cost_cents.display(), "45.00");
    assert_eq!(order.status, OrderStatus::Pending);
    // 2 widgets + 1 gadget.
    assert_eq!(order.total_items(), 3);
}

#[tokio::test]
async fn update_order_status_persists_on_the_backend() {
    let ctx = TestContext::start().await;
    ctx.authenticate();

    ctx.client
        .update_order_status(OrderId::new(12), OrderStatus::OutForDelivery)
        .await
        .expect("update succeeds");

    assert_eq!(
        ctx.backend.order_status(12),
        Some(OrderStatus::OutForDelivery)
    );

    let orders = ctx.client.list_orders().await.expect("list succeeds");
    let order = orders.first().expect("order present");
    assert_eq!(order.status, OrderStatus::OutForDelivery);
}

#[tokio::test]
async fn updating_a_missing_order_is_a_request_failure() {
    let ctx = TestContext::start().await;
    ctx.authenticate();

    let result = ctx
        .client
        .update_order_status(OrderId::new(404), OrderStatus::Shipped)
        .await;

    match result {
        Err(ApiError::RequestFailed(message)) => assert_eq!(message, "order not found"),
        other => panic!("expected RequestFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn add_inventory_increments_stock() {
    let ctx = TestContext::start().await;
    ctx.authenticate();

    let items = vec![
        InventoryItem::new("333333", "333333-1700000000000-0").expect("valid item"),
        InventoryItem::new("333333", "333333-1700000000000-1").expect("valid item"),
    ];
    ctx.client
        .add_inventory(ProductId::new(1), &items)
        .await
        .expect("add succeeds");

    // Seeded stock of 3 plus the two new units.
    assert_eq!(ctx.backend.stock_quantity(1), Some(5));
}

#[tokio::test]
async fn add_inventory_to_missing_product_is_a_request_failure() {
    let ctx = TestContext::start().await;
    ctx.authenticate();

    let items = vec![InventoryItem::new("444444", "444444-1700000000000-0").expect("valid item")];
    let result = ctx.client.add_inventory(ProductId::new(999), &items).await;

    match result {
        Err(ApiError::RequestFailed(message)) => assert_eq!(message, "product not found"),
        other => panic!("expected RequestFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn add_inventory_rejects_an_empty_batch_locally() {
    let ctx = TestContext::start().await;
    ctx.authenticate();
    let before = ctx.backend.hits();

    let result = ctx.client.add_inventory(ProductId::new(1), &[]).await;

    match result {
        Err(ApiError::RequestFailed(message)) => {
            assert_eq!(message, "no inventory items to add");
        }
        other => panic!("expected RequestFailed, got {other:?}"),
    }
    // Rejected before any request was made.
    assert_eq!(ctx.backend.hits(), before);
}
