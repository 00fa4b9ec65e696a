//! In-process mock of the restaurant API

#![allow(dead_code)]

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, patch, post, put};
use axum::{Json, Router};
use dine_client::{ClientConfig, DineClient, SessionHandle};
use dine_printer::{PrintError, PrintResult, Printer, Ticket};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const PAGE_SIZE: usize = 10;

/// Request seen by the mock
#[derive(Debug, Clone)]
pub struct Hit {
    pub method: &'static str,
    pub path: String,
    pub body: Value,
}

#[derive(Debug, Default)]
pub struct MockState {
    pub orders: Vec<Value>,
    pub bills: Vec<Value>,
    pub notifications: Vec<Value>,
    pub dishes: Vec<Value>,
    pub credit_users: Vec<Value>,
    pub menus: Vec<Value>,
    pub messes: Vec<Value>,
    pub hits: Vec<Hit>,
    /// PATCH/PUT on orders answer 500
    pub fail_order_updates: bool,
    /// DELETE on bills answers 500
    pub fail_bill_delete: bool,
    /// Every authenticated call answers the token-expired 401
    pub token_expired: bool,
}

#[derive(Clone, Default)]
pub struct MockApi(pub Arc<Mutex<MockState>>);

impl MockApi {
    pub fn with<R>(&self, f: impl FnOnce(&mut MockState) -> R) -> R {
        f(&mut self.0.lock().unwrap())
    }

    pub fn hits(&self, method: &str, path: &str) -> Vec<Hit> {
        self.with(|s| {
            s.hits
                .iter()
                .filter(|h| h.method == method && h.path == path)
                .cloned()
                .collect()
        })
    }

    fn record(&self, method: &'static str, path: String, body: Value) {
        self.with(|s| s.hits.push(Hit { method, path, body }));
    }
}

pub fn order_json(id: i64, status: &str, total: &str) -> Value {
    json!({
        "id": id,
        "created_at": "2024-05-01T18:20:00Z",
        "total_amount": total,
        "status": status,
        "order_type": "dining",
        "items": [{"dish": 1, "quantity": 2, "dish_name": "Mandi", "price": "15.00"}]
    })
}

pub fn bill_json(id: i64, day: u32) -> Value {
    json!({
        "id": id,
        "order": id * 10,
        "total_amount": "25.00",
        "paid": true,
        "billed_at": format!("2024-05-{day:02}T12:00:00Z"),
    })
}

pub fn credit_user_json(id: i64, username: &str, total_due: &str) -> Value {
    json!({"id": id, "username": username, "is_active": true, "total_due": total_due})
}

/// Menu owned by `created_by`; custom when that is not the restaurant
pub fn menu_json(id: i64, day: &str, created_by: &str, sub_total: &str) -> Value {
    json!({
        "id": id, "name": day, "day_of_week": day, "sub_total": sub_total,
        "is_custom": created_by != "admin", "mess_type": 2, "created_by": created_by,
        "menu_items": []
    })
}

pub fn mess_json(id: i64, name: &str, mobile: &str) -> Value {
    json!({
        "id": id, "customer_name": name, "mobile_number": mobile,
        "start_date": "2024-05-01", "end_date": "2024-05-14", "mess_type": 2,
        "payment_method": "cash", "total_amount": "700.00",
        "paid_amount": "500.00", "pending_amount": "200.00"
    })
}

pub fn dish_json(id: i64, name: &str, price: &str) -> Value {
    json!({"id": id, "name": name, "price": price, "category": 1})
}

fn jwt(exp: i64) -> String {
    use base64::Engine;
    let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .encode(format!(r#"{{"user_id":1,"exp":{exp}}}"#));
    format!("eyJhbGciOiJIUzI1NiJ9.{payload}.sig")
}

fn expired_response() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "detail": "Given token not valid for any token type",
            "code": "token_not_valid",
            "messages": [{"token_class": "AccessToken", "token_type": "access",
                          "message": "Token is invalid or expired"}]
        })),
    )
        .into_response()
}

fn page_of(items: &[Value], page: usize, base: &str) -> Value {
    let start = (page.max(1) - 1) * PAGE_SIZE;
    let results: Vec<Value> = items.iter().skip(start).take(PAGE_SIZE).cloned().collect();
    let next = (start + PAGE_SIZE < items.len()).then(|| format!("{base}?page={}", page + 1));
    let previous = (page > 1).then(|| format!("{base}?page={}", page - 1));
    json!({"count": items.len(), "next": next, "previous": previous, "results": results})
}

fn page_param(q: &HashMap<String, String>) -> usize {
    q.get("page").and_then(|p| p.parse().ok()).unwrap_or(1)
}

fn login_for(username: &str, role: &str) -> Value {
    json!({
        "access": jwt(chrono::Utc::now().timestamp() + 3600),
        "refresh": "refresh-token",
        "user": {"username": username, "email": null, "role": role}
    })
}

async fn login(State(api): State<MockApi>, Json(body): Json<Value>) -> Response {
    api.record("POST", "login/".into(), body.clone());
    match (body["username"].as_str(), body["password"].as_str()) {
        (Some("admin"), Some("secret")) => Json(login_for("admin", "admin")).into_response(),
        (Some("rashid"), Some("secret")) => Json(login_for("rashid", "driver")).into_response(),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "No active account found with the given credentials"})),
        )
            .into_response(),
    }
}

async fn login_passcode(State(api): State<MockApi>, Json(body): Json<Value>) -> Response {
    api.record("POST", "login-passcode/".into(), body.clone());
    if body["passcode"] == "123456" {
        Json(login_for("counter", "staff")).into_response()
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({"detail": "Invalid passcode"}))).into_response()
    }
}

async fn logout(State(api): State<MockApi>, Json(body): Json<Value>) -> Response {
    api.record("POST", "logout/".into(), body);
    StatusCode::RESET_CONTENT.into_response()
}

async fn list_orders(
    State(api): State<MockApi>,
    Query(q): Query<HashMap<String, String>>,
) -> Response {
    api.record("GET", "orders/".into(), Value::Null);
    if api.with(|s| s.token_expired) {
        return expired_response();
    }
    let orders = api.with(|s| s.orders.clone());
    Json(page_of(&orders, page_param(&q), "/api/orders/")).into_response()
}

async fn get_order(State(api): State<MockApi>, Path(id): Path<i64>) -> Response {
    api.record("GET", format!("orders/{id}/"), Value::Null);
    match api.with(|s| s.orders.iter().find(|o| o["id"] == id).cloned()) {
        Some(order) => Json(order).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({"detail": "Not found."}))).into_response(),
    }
}

fn update_order(api: &MockApi, method: &'static str, id: i64, body: Value) -> Response {
    api.record(method, format!("orders/{id}/"), body.clone());
    apply_order_update(api, id, body)
}

fn apply_order_update(api: &MockApi, id: i64, body: Value) -> Response {
    if api.with(|s| s.fail_order_updates) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
    }
    let updated = api.with(|s| {
        let order = s.orders.iter_mut().find(|o| o["id"] == id)?;
        if let (Some(order), Some(fields)) = (order.as_object_mut(), body.as_object()) {
            for (k, v) in fields {
                if k == "items" {
                    let items = order.entry("items").or_insert(json!([]));
                    if let (Some(items), Some(new)) = (items.as_array_mut(), v.as_array()) {
                        for item in new {
                            items.push(json!({
                                "dish": item["dish"], "quantity": item["quantity"],
                                "is_newly_added": true
                            }));
                        }
                    }
                } else {
                    order.insert(k.clone(), v.clone());
                }
            }
        }
        Some(order.clone())
    });
    match updated {
        Some(order) => Json(order).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn patch_order(
    State(api): State<MockApi>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    update_order(&api, "PATCH", id, body)
}

async fn put_order(
    State(api): State<MockApi>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    update_order(&api, "PUT", id, body)
}

async fn change_order_type(
    State(api): State<MockApi>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    api.record("PUT", format!("orders/{id}/change-type/"), body.clone());
    apply_order_update(&api, id, body)
}

async fn delete_order(State(api): State<MockApi>, Path(id): Path<i64>) -> Response {
    api.record("DELETE", format!("orders/{id}/"), Value::Null);
    api.with(|s| s.orders.retain(|o| o["id"] != id));
    StatusCode::NO_CONTENT.into_response()
}

async fn list_bills(
    State(api): State<MockApi>,
    Query(q): Query<HashMap<String, String>>,
) -> Response {
    api.record("GET", "bills/".into(), Value::Null);
    let bills = api.with(|s| s.bills.clone());
    Json(page_of(&bills, page_param(&q), "/api/bills/")).into_response()
}

async fn delete_bill(State(api): State<MockApi>, Path(id): Path<i64>) -> Response {
    api.record("DELETE", format!("bills/{id}/"), Value::Null);
    if api.with(|s| s.fail_bill_delete) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
    }
    api.with(|s| s.bills.retain(|b| b["id"] != id));
    StatusCode::NO_CONTENT.into_response()
}

async fn list_notifications(State(api): State<MockApi>) -> Response {
    api.record("GET", "notifications/".into(), Value::Null);
    Json(api.with(|s| Value::Array(s.notifications.clone()))).into_response()
}

async fn unread_notifications(State(api): State<MockApi>) -> Response {
    api.record("GET", "notifications/unread/".into(), Value::Null);
    if api.with(|s| s.token_expired) {
        return expired_response();
    }
    let unread: Vec<Value> = api.with(|s| {
        s.notifications
            .iter()
            .filter(|n| n["is_read"] == false)
            .cloned()
            .collect()
    });
    Json(Value::Array(unread)).into_response()
}

async fn mark_read(State(api): State<MockApi>, Path(id): Path<i64>) -> Response {
    api.record("POST", format!("notifications/{id}/mark_as_read/"), Value::Null);
    api.with(|s| {
        if let Some(n) = s.notifications.iter_mut().find(|n| n["id"] == id) {
            n["is_read"] = json!(true);
        }
    });
    Json(json!({"status": "notification marked as read"})).into_response()
}

async fn dashboard_data(
    State(api): State<MockApi>,
    Query(q): Query<HashMap<String, String>>,
) -> Response {
    api.record("GET", "orders/dashboard_data/".into(), json!(q));
    Json(json!({
        "total_income": "1200.00",
        "total_orders": 40,
        "avg_order_value": "30.00",
        "popular_time_slots": [{"hour": "13", "order_count": 12}],
        "total_income_trend": "0.00"
    }))
    .into_response()
}

async fn sales_trends(
    State(api): State<MockApi>,
    Query(q): Query<HashMap<String, String>>,
) -> Response {
    api.record("GET", "orders/sales_trends/".into(), json!(q));
    Json(json!({"total_income_trend": "12.50", "total_orders_trend": "-3.00"})).into_response()
}

/// Merge `body` into the record with `id`, answering 404 when absent
fn merge_into(records: &mut [Value], id: i64, body: &Value) -> Response {
    let Some(record) = records.iter_mut().find(|r| r["id"] == id) else {
        return (StatusCode::NOT_FOUND, Json(json!({"detail": "Not found."}))).into_response();
    };
    if let (Some(record), Some(fields)) = (record.as_object_mut(), body.as_object()) {
        for (k, v) in fields {
            record.insert(k.clone(), v.clone());
        }
    }
    Json(record.clone()).into_response()
}

/// Echo a created record back with a fresh id
fn created(mut body: Value, id: i64) -> Value {
    body["id"] = json!(id);
    body
}

async fn get_credit_user(State(api): State<MockApi>, Path(id): Path<i64>) -> Response {
    api.record("GET", format!("credit-users/{id}/"), Value::Null);
    match api.with(|s| s.credit_users.iter().find(|u| u["id"] == id).cloned()) {
        Some(user) => Json(user).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({"detail": "Not found."}))).into_response(),
    }
}

async fn create_credit_user(State(api): State<MockApi>, Json(body): Json<Value>) -> Response {
    api.record("POST", "credit-users/".into(), body.clone());
    let user = api.with(|s| {
        let mut user = created(body, 100 + s.credit_users.len() as i64);
        user["total_due"] = json!("0.00");
        s.credit_users.push(user.clone());
        user
    });
    (StatusCode::CREATED, Json(user)).into_response()
}

async fn update_credit_user(
    State(api): State<MockApi>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    api.record("PUT", format!("credit-users/{id}/"), body.clone());
    api.with(|s| merge_into(&mut s.credit_users, id, &body))
}

async fn make_payment(
    State(api): State<MockApi>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    api.record("POST", format!("credit-users/{id}/make_payment/"), body.clone());
    let amount: rust_decimal::Decimal = body["payment_amount"]
        .as_str()
        .and_then(|a| a.parse().ok())
        .unwrap_or_default();
    api.with(|s| {
        if let Some(user) = s.credit_users.iter_mut().find(|u| u["id"] == id) {
            let due: rust_decimal::Decimal =
                user["total_due"].as_str().and_then(|d| d.parse().ok()).unwrap_or_default();
            user["total_due"] = json!((due - amount).to_string());
        }
    });
    Json(json!({"status": "payment successful"})).into_response()
}

async fn create_coupon(State(api): State<MockApi>, Json(body): Json<Value>) -> Response {
    api.record("POST", "coupons/".into(), body.clone());
    let mut coupon = created(body, 300);
    coupon["usage_count"] = json!(0);
    (StatusCode::CREATED, Json(coupon)).into_response()
}

async fn delete_coupon(State(api): State<MockApi>, Path(id): Path<i64>) -> Response {
    api.record("DELETE", format!("coupons/{id}/"), Value::Null);
    StatusCode::NO_CONTENT.into_response()
}

async fn list_menus(
    State(api): State<MockApi>,
    Query(q): Query<HashMap<String, String>>,
) -> Response {
    api.record("GET", "menus/".into(), json!(q));
    let menus: Vec<Value> = api.with(|s| {
        s.menus
            .iter()
            .filter(|m| {
                q.get("created_by").is_none_or(|c| m["created_by"] == c.as_str())
                    && q.get("is_custom").is_none_or(|c| m["is_custom"].to_string() == *c)
            })
            .cloned()
            .collect()
    });
    Json(Value::Array(menus)).into_response()
}

async fn create_menu(State(api): State<MockApi>, Json(body): Json<Value>) -> Response {
    api.record("POST", "menus/".into(), body.clone());
    let menu = api.with(|s| {
        let mut menu = created(body, 500 + s.menus.len() as i64);
        menu["sub_total"] = json!("0.00");
        menu["menu_items"] = json!([]);
        s.menus.push(menu.clone());
        menu
    });
    (StatusCode::CREATED, Json(menu)).into_response()
}

async fn create_menu_item(State(api): State<MockApi>, Json(body): Json<Value>) -> Response {
    api.record("POST", "menu-items/".into(), body.clone());
    let dish = api.with(|s| s.dishes.iter().find(|d| d["id"] == body["dish_id"]).cloned());
    let Some(dish) = dish else {
        return (StatusCode::BAD_REQUEST, Json(json!({"dish_id": ["Invalid pk."]}))).into_response();
    };
    let item = json!({"id": 900, "menu": body["menu"], "dish": dish, "meal_type": body["meal_type"]});
    (StatusCode::CREATED, Json(item)).into_response()
}

async fn create_mess(State(api): State<MockApi>, Json(body): Json<Value>) -> Response {
    api.record("POST", "messes/".into(), body.clone());
    let mess = api.with(|s| {
        let mess = created(body, 700 + s.messes.len() as i64);
        s.messes.push(mess.clone());
        mess
    });
    (StatusCode::CREATED, Json(mess)).into_response()
}

async fn patch_mess(
    State(api): State<MockApi>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    api.record("PATCH", format!("messes/{id}/"), body.clone());
    api.with(|s| merge_into(&mut s.messes, id, &body))
}

async fn create_transaction(State(api): State<MockApi>, Json(body): Json<Value>) -> Response {
    api.record("POST", "transactions/".into(), body.clone());
    (StatusCode::CREATED, Json(created(body, 40))).into_response()
}

async fn search_dishes(
    State(api): State<MockApi>,
    Query(q): Query<HashMap<String, String>>,
) -> Response {
    api.record("GET", "search-dishes/".into(), json!(q));
    let term = q.get("search").cloned().unwrap_or_default().to_lowercase();
    let found: Vec<Value> = api.with(|s| {
        s.dishes
            .iter()
            .filter(|d| {
                d["name"]
                    .as_str()
                    .is_some_and(|n| n.to_lowercase().contains(&term))
            })
            .cloned()
            .collect()
    });
    Json(Value::Array(found)).into_response()
}

pub fn router(api: MockApi) -> Router {
    Router::new()
        .route("/api/login/", post(login))
        .route("/api/login-passcode/", post(login_passcode))
        .route("/api/logout/", post(logout))
        .route("/api/orders/", get(list_orders))
        .route("/api/orders/dashboard_data/", get(dashboard_data))
        .route("/api/orders/sales_trends/", get(sales_trends))
        .route(
            "/api/orders/{id}/",
            get(get_order)
                .patch(patch_order)
                .put(put_order)
                .delete(delete_order),
        )
        .route("/api/orders/{id}/change-type/", put(change_order_type))
        .route("/api/bills/", get(list_bills))
        .route("/api/bills/{id}/", delete(delete_bill))
        .route("/api/notifications/", get(list_notifications))
        .route("/api/notifications/unread/", get(unread_notifications))
        .route("/api/notifications/{id}/mark_as_read/", post(mark_read))
        .route("/api/search-dishes/", get(search_dishes))
        .route("/api/credit-users/", post(create_credit_user))
        .route(
            "/api/credit-users/{id}/",
            get(get_credit_user).put(update_credit_user),
        )
        .route("/api/credit-users/{id}/make_payment/", post(make_payment))
        .route("/api/coupons/", post(create_coupon))
        .route("/api/coupons/{id}/", delete(delete_coupon))
        .route("/api/menus/", get(list_menus).post(create_menu))
        .route("/api/menu-items/", post(create_menu_item))
        .route("/api/messes/", post(create_mess))
        .route("/api/messes/{id}/", patch(patch_mess))
        .route("/api/transactions/", post(create_transaction))
        .with_state(api)
}

/// Start the mock on an ephemeral port and return its API base URL
pub async fn spawn(api: MockApi) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router(api)).await.unwrap();
    });
    format!("http://{addr}/api")
}

pub async fn client(api: &MockApi) -> DineClient {
    let base = spawn(api.clone()).await;
    DineClient::new(&ClientConfig::new(base), SessionHandle::default()).unwrap()
}

/// Printer that keeps tickets in memory
#[derive(Clone, Default)]
pub struct RecordingPrinter {
    pub tickets: Arc<Mutex<Vec<Ticket>>>,
    pub fail: Arc<Mutex<bool>>,
}

impl RecordingPrinter {
    pub fn previews(&self) -> Vec<String> {
        self.tickets
            .lock()
            .unwrap()
            .iter()
            .map(|t| t.preview.clone())
            .collect()
    }

    pub fn set_failing(&self, fail: bool) {
        *self.fail.lock().unwrap() = fail;
    }
}

impl Printer for RecordingPrinter {
    async fn print(&self, ticket: &Ticket) -> PrintResult<()> {
        if *self.fail.lock().unwrap() {
            return Err(PrintError::Connection("paper out".into()));
        }
        self.tickets.lock().unwrap().push(ticket.clone());
        Ok(())
    }

    async fn is_online(&self) -> bool {
        !*self.fail.lock().unwrap()
    }
}
