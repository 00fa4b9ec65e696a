mod common;

use chrono::NaiveDate;
use common::{MockApi, dish_json, menu_json, mess_json};
use rust_decimal::Decimal;
use shared::error::ErrorCode;
use shared::membership::{Enrollment, ReceivedPayment};
use shared::models::{
    DayOfWeek, MealType, MenuItemCreate, MenuType, MessUpdate, PaymentMethod,
};

const DAYS: [&str; 7] = [
    "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday",
];

async fn setup(menus: Vec<serde_json::Value>) -> (MockApi, dine_client::DineClient) {
    let api = MockApi::default();
    api.with(|s| {
        s.menus = menus;
        s.messes = vec![mess_json(30, "Anil", "9000000001")];
        s.dishes = vec![dish_json(11, "Chapati", "2.00")];
    });
    let client = common::client(&api).await;
    client.login("admin", "secret").await.unwrap();
    (api, client)
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
}

#[tokio::test]
async fn test_custom_menu_takes_first_free_weekday() {
    let (api, client) = setup(vec![
        menu_json(1, "monday", "9000000001", "0.00"),
        menu_json(2, "monday", "admin", "50.00"),
    ])
    .await;

    let menu = client.add_custom_menu(2, " 9000000001 ").await.unwrap();

    assert_eq!(menu.day_of_week, Some(DayOfWeek::Tuesday));
    assert_eq!(menu.name, "Tuesday");
    let body = &api.hits("POST", "menus/")[0].body;
    assert_eq!(body["created_by"], "9000000001");
    assert_eq!(body["is_custom"], true);
    assert_eq!(body["mess_type"], 2);
}

#[tokio::test]
async fn test_custom_menu_limit_sends_nothing() {
    let full = DAYS
        .iter()
        .enumerate()
        .map(|(i, day)| menu_json(i as i64 + 1, day, "9000000001", "0.00"))
        .collect();
    let (api, client) = setup(full).await;

    let err = client.add_custom_menu(2, "9000000001").await.unwrap_err();

    assert_eq!(err.code(), ErrorCode::CustomMenuLimit);
    assert!(api.hits("POST", "menus/").is_empty());

    let err = client.add_custom_menu(2, "  ").await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::RequiredField);
}

#[tokio::test]
async fn test_menu_item_added() {
    let (api, client) = setup(vec![menu_json(4, "friday", "admin", "0.00")]).await;

    let item = client
        .create_menu_item(&MenuItemCreate {
            meal_type: MealType::Lunch,
            menu: 4,
            dish_id: 11,
        })
        .await
        .unwrap();

    assert_eq!(item.dish.name, "Chapati");
    assert_eq!(item.meal_type, MealType::Lunch);
    assert_eq!(
        api.hits("POST", "menu-items/")[0].body,
        serde_json::json!({"meal_type": "lunch", "menu": 4, "dish_id": 11})
    );
}

#[tokio::test]
async fn test_enroll_posts_membership() {
    let standard = vec![
        menu_json(1, "monday", "admin", "50.00"),
        menu_json(2, "tuesday", "admin", "60.00"),
    ];
    let (api, client) = setup(standard).await;
    let menus = client
        .member_menus(2, MenuType::OwnMenu, "9000000002")
        .await
        .unwrap();

    let enrollment = Enrollment {
        mess_type: Some(2),
        weeks: 2,
        payment_method: PaymentMethod::CashBank,
        paid_amount: Decimal::new(100, 0),
        cash_amount: Decimal::new(60, 0),
        bank_amount: Decimal::new(40, 0),
        ..Enrollment::new("Bina", "9000000002", date(6))
    };
    let mess = client.enroll(&enrollment, &menus).await.unwrap();

    let body = &api.hits("POST", "messes/")[0].body;
    assert_eq!(body["payment_method"], "cash_and_bank");
    assert_eq!(body["end_date"], "2024-05-19");
    assert_eq!(body["menus"], serde_json::json!([1, 2]));
    assert_eq!(mess.total_amount, Decimal::new(220, 0));
    assert_eq!(mess.pending_amount, Decimal::new(120, 0));
    assert_eq!(mess.payment_method, Some(PaymentMethod::CashBank));
}

#[tokio::test]
async fn test_enroll_without_menus_sends_nothing() {
    let (api, client) = setup(Vec::new()).await;

    let enrollment = Enrollment {
        mess_type: Some(2),
        ..Enrollment::new("Bina", "9000000002", date(6))
    };
    let err = client.enroll(&enrollment, &[]).await.unwrap_err();

    assert_eq!(err.code(), ErrorCode::MenuRequired);
    assert!(api.hits("POST", "messes/").is_empty());
}

#[tokio::test]
async fn test_mess_update_patches_edited_fields() {
    let (api, client) = setup(Vec::new()).await;

    let backwards = MessUpdate {
        start_date: Some(date(20)),
        end_date: Some(date(10)),
        ..Default::default()
    };
    assert!(client.update_mess(30, &backwards).await.is_err());
    assert!(api.hits("PATCH", "messes/30/").is_empty());

    let update = MessUpdate {
        paid_amount: Some(Decimal::new(700, 0)),
        pending_amount: Some(Decimal::ZERO),
        ..Default::default()
    };
    let mess = client.update_mess(30, &update).await.unwrap();

    let body = &api.hits("PATCH", "messes/30/")[0].body;
    assert_eq!(body.as_object().unwrap().len(), 2);
    assert_eq!(mess.pending_amount, Decimal::ZERO);
    assert_eq!(mess.customer_name, "Anil");
}

#[tokio::test]
async fn test_received_payment_zeroes_unused_side() {
    let (api, client) = setup(Vec::new()).await;

    let payment = ReceivedPayment {
        received_amount: Decimal::new(200, 0),
        cash_amount: Decimal::new(200, 0),
        bank_amount: Decimal::new(50, 0),
        payment_method: PaymentMethod::Cash,
    };
    let transaction = client.receive_payment(30, &payment).await.unwrap();

    let body = &api.hits("POST", "transactions/")[0].body;
    assert_eq!(body["mess"], 30);
    assert_eq!(body["status"], "completed");
    assert_eq!(transaction.bank_amount, Decimal::ZERO);
    assert_eq!(transaction.cash_amount, Decimal::new(200, 0));
}
