mod common;

use common::{MockApi, RecordingPrinter, order_json};
use dine_client::pages::{AutoConfirm, OrderBoard};
use dine_client::receipt::{PrintStation, ReceiptConfig};
use rust_decimal::Decimal;
use shared::error::ErrorCode;
use shared::models::{
    CategoryRef, Dish, OrderStatus, OrderType, OrderTypeChange, PaymentMethod,
};
use shared::order::{AddProductsDraft, BillKind, Confirmation, PaymentSelection, StatusAction};

fn money(value: &serde_json::Value) -> Decimal {
    value.as_str().unwrap().parse().unwrap()
}

fn station(printer: &RecordingPrinter) -> PrintStation<RecordingPrinter> {
    PrintStation::new(printer.clone(), ReceiptConfig::default())
}

async fn setup(orders: Vec<serde_json::Value>) -> (MockApi, dine_client::DineClient) {
    let api = MockApi::default();
    api.with(|s| s.orders = orders);
    let client = common::client(&api).await;
    client.login("admin", "secret").await.unwrap();
    (api, client)
}

#[tokio::test]
async fn test_approve_prints_kitchen_ticket_then_patches() {
    let (api, client) = setup(vec![order_json(5, "pending", "30.00")]).await;
    let printer = RecordingPrinter::default();
    let station = station(&printer);
    let mut board = OrderBoard::new(&client, &station);
    board.load(1).await.unwrap();

    let outcome = board
        .change_status(5, StatusAction::Approved, None, None, &AutoConfirm(true))
        .await
        .unwrap();

    assert_eq!(outcome.order.status, OrderStatus::Approved);
    assert_eq!(outcome.printed, Some(BillKind::Kitchen));
    let previews = printer.previews();
    assert_eq!(previews.len(), 1);
    assert!(previews[0].contains("KITCHEN"));
    let patches = api.hits("PATCH", "orders/5/");
    assert_eq!(patches[0].body, serde_json::json!({"status": "approved"}));
    assert_eq!(board.find(5).unwrap().status, OrderStatus::Approved);
}

#[tokio::test]
async fn test_delivered_without_payment_is_rejected() {
    let (api, client) = setup(vec![order_json(5, "approved", "30.00")]).await;
    let printer = RecordingPrinter::default();
    let station = station(&printer);
    let mut board = OrderBoard::new(&client, &station);
    board.load(1).await.unwrap();

    let err = board
        .change_status(5, StatusAction::Delivered, None, None, &AutoConfirm(true))
        .await
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::PaymentMethodRequired);
    assert!(api.hits("PATCH", "orders/5/").is_empty());
    assert!(printer.previews().is_empty());
    assert_eq!(board.find(5).unwrap().status, OrderStatus::Approved);
}

#[tokio::test]
async fn test_delivered_sends_payment_fields() {
    let (api, client) = setup(vec![order_json(5, "approved", "30.00")]).await;
    let printer = RecordingPrinter::default();
    let station = station(&printer);
    let mut board = OrderBoard::new(&client, &station);
    board.load(1).await.unwrap();

    let payment = PaymentSelection::new(PaymentMethod::CashBank, Decimal::new(3000, 2));
    board
        .change_status(5, StatusAction::Delivered, Some(&payment), None, &AutoConfirm(true))
        .await
        .unwrap();

    let body = &api.hits("PATCH", "orders/5/")[0].body;
    assert_eq!(body["status"], "delivered");
    assert_eq!(body["payment_method"], "cash-bank");
    assert_eq!(money(&body["cash_amount"]), Decimal::new(15, 0));
    assert_eq!(money(&body["bank_amount"]), Decimal::new(15, 0));
    let previews = printer.previews();
    assert!(previews[0].contains("INVOICE"));
    assert!(previews[0].contains("Cash + Bank"));
}

#[tokio::test]
async fn test_failed_patch_reverts_status() {
    let (api, client) = setup(vec![order_json(5, "pending", "30.00")]).await;
    let printer = RecordingPrinter::default();
    let station = station(&printer);
    let mut board = OrderBoard::new(&client, &station);
    board.load(1).await.unwrap();
    api.with(|s| s.fail_order_updates = true);

    let err = board
        .change_status(5, StatusAction::Cancelled, None, None, &AutoConfirm(true))
        .await
        .unwrap_err();

    assert!(matches!(err, dine_client::ClientError::Internal(_)));
    assert_eq!(board.find(5).unwrap().status, OrderStatus::Pending);
}

#[tokio::test]
async fn test_print_failure_aborts_before_patch() {
    let (api, client) = setup(vec![order_json(5, "pending", "30.00")]).await;
    let printer = RecordingPrinter::default();
    printer.set_failing(true);
    let station = station(&printer);
    let mut board = OrderBoard::new(&client, &station);
    board.load(1).await.unwrap();

    let err = board
        .change_status(5, StatusAction::Approved, None, None, &AutoConfirm(true))
        .await
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::PrintFailed);
    assert!(api.hits("PATCH", "orders/5/").is_empty());
    assert_eq!(board.find(5).unwrap().status, OrderStatus::Pending);
}

#[tokio::test]
async fn test_deliver_without_bill_needs_confirmation() {
    let (api, client) = setup(vec![order_json(5, "approved", "30.00")]).await;
    let printer = RecordingPrinter::default();
    let station = station(&printer);
    let mut board = OrderBoard::new(&client, &station);
    board.load(1).await.unwrap();

    let seen = std::cell::Cell::new(None);
    let decline = |c: &Confirmation| {
        seen.set(Some(c.title));
        false
    };
    let err = board
        .change_status(5, StatusAction::DeliverWithoutBill, None, None, &decline)
        .await
        .unwrap_err();
    assert!(err.is_cancelled());
    assert_eq!(seen.get(), Some("Continue without Bill?"));
    assert!(api.hits("PATCH", "orders/5/").is_empty());

    // Accepted: update first, kitchen ticket after
    printer.set_failing(true);
    let outcome = board
        .change_status(5, StatusAction::DeliverWithoutBill, None, None, &AutoConfirm(true))
        .await
        .unwrap();
    assert_eq!(outcome.order.status, OrderStatus::Delivered);
    assert!(outcome.print_error.is_some());
    assert_eq!(outcome.printed, None);
    assert_eq!(api.hits("PATCH", "orders/5/").len(), 1);
}

#[tokio::test]
async fn test_terminal_orders_are_locked() {
    let (api, client) = setup(vec![order_json(5, "cancelled", "30.00")]).await;
    let printer = RecordingPrinter::default();
    let station = station(&printer);
    let mut board = OrderBoard::new(&client, &station);
    board.load(1).await.unwrap();

    let err = board
        .change_status(5, StatusAction::Pending, None, None, &AutoConfirm(true))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::OrderLocked);
    assert!(api.hits("PATCH", "orders/5/").is_empty());
}

#[tokio::test]
async fn test_add_products_to_approved_order_reprints_new_items() {
    let (api, client) = setup(vec![order_json(5, "approved", "30.00")]).await;
    let printer = RecordingPrinter::default();
    let station = station(&printer);
    let mut board = OrderBoard::new(&client, &station);
    board.load(1).await.unwrap();

    let hummus = Dish {
        id: 2,
        name: "Hummus".into(),
        description: String::new(),
        price: Decimal::new(900, 2),
        image: None,
        category: CategoryRef::Id(1),
    };
    let mut draft = AddProductsDraft::new();
    draft.add(&hummus, 1).unwrap();
    draft.add(&hummus, 1).unwrap();

    let outcome = board.add_products(5, &draft).await.unwrap();
    assert_eq!(outcome.printed, Some(BillKind::Kitchen));

    let body = &api.hits("PUT", "orders/5/")[0].body;
    assert_eq!(money(&body["total_amount"]), Decimal::new(48, 0));
    assert_eq!(body["items"][0]["quantity"], 2);
    assert_eq!(money(&body["items"][0]["total_amount"]), Decimal::new(18, 0));

    let previews = printer.previews();
    assert!(previews[0].contains("NEWLY ADDED"));
    assert!(previews[0].contains("Hummus"));
    assert!(!previews[0].contains("Mandi"));
}

#[tokio::test]
async fn test_pagination_boundaries() {
    let orders = (1..=23).map(|i| order_json(i, "pending", "10.00")).collect();
    let (_api, client) = setup(orders).await;
    let printer = RecordingPrinter::default();
    let station = station(&printer);
    let mut board = OrderBoard::new(&client, &station);

    board.load(1).await.unwrap();
    assert!(!board.pager().has_previous());
    assert!(board.pager().has_next());
    assert_eq!(board.pager().total_pages(), 3);

    board.next_page().await.unwrap();
    board.next_page().await.unwrap();
    assert_eq!(board.orders().len(), 3);
    assert!(!board.pager().has_next());

    // Already on the last page
    board.next_page().await.unwrap();
    assert_eq!(board.pager().page, 3);

    board.previous_page().await.unwrap();
    assert_eq!(board.pager().page, 2);
}

#[tokio::test]
async fn test_update_payment_puts_split_for_order_total() {
    let (api, client) = setup(vec![order_json(5, "delivered", "30.00")]).await;
    let printer = RecordingPrinter::default();
    let station = station(&printer);
    let mut board = OrderBoard::new(&client, &station);
    board.load(1).await.unwrap();

    // a stale total is re-split over the order's amount
    let payment = PaymentSelection::new(PaymentMethod::CashBank, Decimal::new(1000, 2));
    let order = board.update_payment(5, &payment).await.unwrap();

    let body = &api.hits("PUT", "orders/5/")[0].body;
    assert_eq!(body["payment_method"], "cash-bank");
    assert_eq!(money(&body["cash_amount"]) + money(&body["bank_amount"]), Decimal::new(30, 0));
    assert!(body.get("credit_user_id").is_none());
    assert_eq!(order.payment_method, Some(PaymentMethod::CashBank));
}

fn delivery_change() -> OrderTypeChange {
    OrderTypeChange {
        order_type: OrderType::Delivery,
        address: Some("12 Beach Road".into()),
        customer_name: Some("Rahim".into()),
        customer_phone_number: Some("9876543210".into()),
        delivery_driver_id: Some(3),
        delivery_charge: Some(Decimal::new(40, 0)),
    }
}

#[tokio::test]
async fn test_delivery_change_needs_address_and_driver() {
    let (api, client) = setup(vec![order_json(5, "approved", "30.00")]).await;
    let printer = RecordingPrinter::default();
    let station = station(&printer);
    let mut board = OrderBoard::new(&client, &station);
    board.load(1).await.unwrap();

    let no_address = OrderTypeChange {
        address: Some("  ".into()),
        ..delivery_change()
    };
    let err = board.change_type(5, &no_address).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::DeliveryAddressRequired);

    let no_driver = OrderTypeChange {
        delivery_driver_id: None,
        ..delivery_change()
    };
    let err = board.change_type(5, &no_driver).await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::DeliveryDriverRequired);

    assert!(api.hits("PUT", "orders/5/change-type/").is_empty());
    assert_eq!(board.find(5).unwrap().order_type, OrderType::Dining);
}

#[tokio::test]
async fn test_delivery_change_is_sent() {
    let (api, client) = setup(vec![order_json(5, "approved", "30.00")]).await;
    let printer = RecordingPrinter::default();
    let station = station(&printer);
    let mut board = OrderBoard::new(&client, &station);
    board.load(1).await.unwrap();

    let order = board.change_type(5, &delivery_change()).await.unwrap();

    let body = &api.hits("PUT", "orders/5/change-type/")[0].body;
    assert_eq!(body["order_type"], "delivery");
    assert_eq!(body["address"], "12 Beach Road");
    assert_eq!(body["delivery_driver_id"], 3);
    assert_eq!(order.order_type, OrderType::Delivery);
    assert_eq!(board.find(5).unwrap().order_type, OrderType::Delivery);
}

#[tokio::test]
async fn test_type_change_on_delivered_order_is_locked() {
    let (api, client) = setup(vec![order_json(5, "delivered", "30.00")]).await;
    let printer = RecordingPrinter::default();
    let station = station(&printer);
    let mut board = OrderBoard::new(&client, &station);
    board.load(1).await.unwrap();

    let err = board.change_type(5, &delivery_change()).await.unwrap_err();

    assert_eq!(err.code(), ErrorCode::OrderLocked);
    assert!(api.hits("PUT", "orders/5/change-type/").is_empty());
}

#[tokio::test]
async fn test_declined_delete_sends_nothing() {
    let (api, client) = setup(vec![order_json(5, "pending", "30.00")]).await;
    let printer = RecordingPrinter::default();
    let station = station(&printer);
    let mut board = OrderBoard::new(&client, &station);
    board.load(1).await.unwrap();

    let deleted = board.delete(5, &AutoConfirm(false)).await.unwrap();

    assert!(!deleted);
    assert!(api.hits("DELETE", "orders/5/").is_empty());
    assert!(board.find(5).is_some());
}

#[tokio::test]
async fn test_confirmed_delete_removes_and_reloads() {
    let (api, client) = setup(vec![
        order_json(5, "pending", "30.00"),
        order_json(6, "pending", "12.00"),
    ])
    .await;
    let printer = RecordingPrinter::default();
    let station = station(&printer);
    let mut board = OrderBoard::new(&client, &station);
    board.load(1).await.unwrap();

    let deleted = board.delete(5, &AutoConfirm(true)).await.unwrap();

    assert!(deleted);
    assert_eq!(api.hits("DELETE", "orders/5/").len(), 1);
    assert!(board.find(5).is_none());
    assert!(board.find(6).is_some());
    // initial load plus the reload after delete
    assert_eq!(api.hits("GET", "orders/").len(), 2);
}

#[tokio::test]
async fn test_unloaded_board_skips_list_reload() {
    let (api, client) = setup(vec![order_json(5, "pending", "30.00")]).await;
    let printer = RecordingPrinter::default();
    let station = station(&printer);
    let mut board = OrderBoard::new(&client, &station);

    board
        .change_status(5, StatusAction::Cancelled, None, None, &AutoConfirm(true))
        .await
        .unwrap();

    assert_eq!(api.hits("GET", "orders/5/").len(), 1);
    assert_eq!(api.hits("PATCH", "orders/5/").len(), 1);
    assert!(api.hits("GET", "orders/").is_empty());
    assert!(board.orders().is_empty());
}
