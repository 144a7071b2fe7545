//! Test harness for the Neszi back-office client.
//!
//! Provides an in-process mock of the admin REST API (axum, ephemeral
//! port) plus recording implementations of the client's environment
//! ports, so the tests can observe redirects, notifications, busy-gauge
//! edges, and backend hit counts.
//!
//! The mock speaks the same wire contract as the real backend: bearer
//! auth on every route except `/login`, `{"error": "..."}` bodies for
//! logical failures, `{"message": "..."}` acknowledgements for
//! mutations.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Path, Request, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use chrono::{TimeZone, Utc};
use secrecy::SecretString;
use serde_json::{Value, json};
use tokio::net::TcpListener;

use neszi_client::types::{DeliveryAddress, InventoryItem, Order, OrderItem, Product};
use neszi_client::{
    ApiClient, BusyIndicator, MemorySessionStore, Navigator, Notifier, SessionStore, Severity,
};
use neszi_core::{OrderId, OrderStatus, Price, ProductId};

/// Token `/login` hands out and every other route accepts.
pub const VALID_TOKEN: &str = "test-session-token";

/// Token the backend answers with 403 (expired session).
pub const EXPIRED_TOKEN: &str = "expired-session-token";

/// Password `/login` accepts.
pub const VALID_PASSWORD: &str = "correct horse";

// =============================================================================
// Mock backend
// =============================================================================

/// A multipart product upload as it arrived at the backend.
#[derive(Debug, Clone, Default)]
pub struct CapturedUpload {
    /// The request's Content-Type header, boundary included.
    pub content_type: String,
    /// Text fields by name.
    pub fields: BTreeMap<String, String>,
    /// Raw bytes of the `image` part.
    pub image_bytes: Vec<u8>,
    /// File name of the `image` part.
    pub image_file_name: String,
}

/// Shared state behind the mock admin API.
#[derive(Clone)]
pub struct BackendState {
    inner: Arc<BackendInner>,
}

struct BackendInner {
    hits: AtomicUsize,
    next_product_id: AtomicI64,
    products: Mutex<BTreeMap<i64, Product>>,
    orders: Mutex<BTreeMap<i64, Order>>,
    captured_upload: Mutex<Option<CapturedUpload>>,
}

impl BackendState {
    fn new() -> Self {
        let mut products = BTreeMap::new();
        products.insert(
            1,
            Product {
                id: ProductId::new(1),
                name: "Widget".to_string(),
                description: "A sturdy widget".to_string(),
                price_cents: Price::from_cents(500),
                stock_quantity: 3,
                image: Some("https://cdn.example/widget.jpg".to_string()),
                brand: Some("Acme".to_string()),
                is_featured: Some(false),
                keywords: None,
            },
        );

        let mut orders = BTreeMap::new();
        orders.insert(
            12,
            Order {
                id: OrderId::new(12),
                user_name: "Jane Buyer".to_string(),
                delivery_address: DeliveryAddress {
                    street: "Moi Ave".to_string(),
                    city: "Nairobi".to_string(),
                },
                items: vec![
                    OrderItem {
                        name: "Widget".to_string(),
                        quantity: 2,
                    },
                    OrderItem {
                        name: "Gadget".to_string(),
                        quantity: 1,
                    },
                ],
                payment_method: "M-Pesa".to_string(),
                mpesa_receipt_number: Some("QWE123".to_string()),
                order_time: Utc
                    .with_ymd_and_hms(2025, 6, 1, 10, 30, 0)
                    .single()
                    .expect("valid timestamp"),
                total_cost_cents: Price::from_cents(4500),
                status: OrderStatus::Pending,
            },
        );

        Self {
            inner: Arc::new(BackendInner {
                hits: AtomicUsize::new(0),
                next_product_id: AtomicI64::new(2),
                products: Mutex::new(products),
                orders: Mutex::new(orders),
                captured_upload: Mutex::new(None),
            }),
        }
    }

    /// Number of HTTP requests that reached the backend.
    pub fn hits(&self) -> usize {
        self.inner.hits.load(Ordering::SeqCst)
    }

    /// The last multipart product upload, if any.
    pub fn captured_upload(&self) -> Option<CapturedUpload> {
        self.inner
            .captured_upload
            .lock()
            .expect("lock poisoned")
            .clone()
    }

    /// Current stock count for a product, if it exists.
    pub fn stock_quantity(&self, id: i64) -> Option<i64> {
        self.inner
            .products
            .lock()
            .expect("lock poisoned")
            .get(&id)
            .map(|p| p.stock_quantity)
    }

    /// Current status of an order, if it exists.
    pub fn order_status(&self, id: i64) -> Option<OrderStatus> {
        self.inner
            .orders
            .lock()
            .expect("lock poisoned")
            .get(&id)
            .map(|o| o.status)
    }
}

type ApiResult = Result<Json<Value>, (StatusCode, Json<Value>)>;

fn error_body(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({"error": message})))
}

/// Bearer-token gate shared by every route except `/login`.
fn authorize(headers: &HeaderMap) -> Result<(), (StatusCode, Json<Value>)> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    match token {
        Some(VALID_TOKEN) => Ok(()),
        Some(EXPIRED_TOKEN) => Err(error_body(StatusCode::FORBIDDEN, "session expired")),
        _ => Err(error_body(StatusCode::UNAUTHORIZED, "missing or invalid token")),
    }
}

async fn count_hits(State(state): State<BackendState>, req: Request, next: Next) -> Response {
    state.inner.hits.fetch_add(1, Ordering::SeqCst);
    next.run(req).await
}

async fn login(Json(body): Json<Value>) -> ApiResult {
    let email = body.get("email").and_then(Value::as_str).unwrap_or_default();
    let password = body
        .get("password")
        .and_then(Value::as_str)
        .unwrap_or_default();

    if email.is_empty() || password != VALID_PASSWORD {
        return Err(error_body(StatusCode::UNAUTHORIZED, "invalid credentials"));
    }
    Ok(Json(json!({"token": VALID_TOKEN})))
}

async fn list_products(State(state): State<BackendState>, headers: HeaderMap) -> ApiResult {
    authorize(&headers)?;
    let products: Vec<Product> = state
        .inner
        .products
        .lock()
        .expect("lock poisoned")
        .values()
        .cloned()
        .collect();
    Ok(Json(serde_json::to_value(products).expect("serializable")))
}

async fn create_product(
    State(state): State<BackendState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> ApiResult {
    authorize(&headers)?;

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let mut captured = CapturedUpload {
        content_type,
        ..CapturedUpload::default()
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| error_body(StatusCode::BAD_REQUEST, &e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "image" {
            captured.image_file_name = field.file_name().unwrap_or_default().to_string();
            captured.image_bytes = field
                .bytes()
                .await
                .map_err(|e| error_body(StatusCode::BAD_REQUEST, &e.to_string()))?
                .to_vec();
        } else {
            let text = field
                .text()
                .await
                .map_err(|e| error_body(StatusCode::BAD_REQUEST, &e.to_string()))?;
            captured.fields.insert(name, text);
        }
    }

    let name = captured.fields.get("name").cloned().unwrap_or_default();
    if name.is_empty() {
        return Err(error_body(StatusCode::UNPROCESSABLE_ENTITY, "name required"));
    }

    let price_cents: i64 = captured
        .fields
        .get("price_cents")
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| error_body(StatusCode::UNPROCESSABLE_ENTITY, "price_cents required"))?;

    let inventory: Vec<InventoryItem> = captured
        .fields
        .get("inventory_items")
        .map(|raw| serde_json::from_str(raw))
        .transpose()
        .map_err(|_| error_body(StatusCode::UNPROCESSABLE_ENTITY, "invalid inventory_items"))?
        .unwrap_or_default();

    let id = state.inner.next_product_id.fetch_add(1, Ordering::SeqCst);
    let product = Product {
        id: ProductId::new(id),
        name,
        description: captured.fields.get("description").cloned().unwrap_or_default(),
        price_cents: Price::from_cents(price_cents),
        stock_quantity: i64::try_from(inventory.len()).unwrap_or(0),
        image: Some(format!("https://cdn.example/{}", captured.image_file_name)),
        brand: captured.fields.get("brand").cloned(),
        is_featured: captured
            .fields
            .get("is_featured")
            .map(|v| v == "true"),
        keywords: None,
    };

    state
        .inner
        .products
        .lock()
        .expect("lock poisoned")
        .insert(id, product);
    *state.inner.captured_upload.lock().expect("lock poisoned") = Some(captured);

    Ok(Json(json!({"message": "Product added successfully", "id": id})))
}

async fn update_product(
    State(state): State<BackendState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> ApiResult {
    authorize(&headers)?;

    let name = body.get("name").and_then(Value::as_str).unwrap_or_default();
    if name.is_empty() {
        return Err(error_body(StatusCode::UNPROCESSABLE_ENTITY, "name required"));
    }

    let mut products = state.inner.products.lock().expect("lock poisoned");
    let product = products
        .get_mut(&id)
        .ok_or_else(|| error_body(StatusCode::NOT_FOUND, "product not found"))?;

    product.name = name.to_string();
    if let Some(description) = body.get("description").and_then(Value::as_str) {
        product.description = description.to_string();
    }
    if let Some(price) = body.get("price_cents").and_then(Value::as_i64) {
        product.price_cents = Price::from_cents(price);
    }
    if let Some(stock) = body.get("stock_quantity").and_then(Value::as_i64) {
        product.stock_quantity = stock;
    }

    Ok(Json(json!({"message": "Product updated"})))
}

async fn delete_product(
    State(state): State<BackendState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> ApiResult {
    authorize(&headers)?;

    state
        .inner
        .products
        .lock()
        .expect("lock poisoned")
        .remove(&id)
        .ok_or_else(|| error_body(StatusCode::NOT_FOUND, "product not found"))?;

    Ok(Json(json!({"message": "Product deleted"})))
}

async fn add_inventory(
    State(state): State<BackendState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> ApiResult {
    authorize(&headers)?;

    let product_id = body
        .get("product_id")
        .and_then(Value::as_i64)
        .ok_or_else(|| error_body(StatusCode::UNPROCESSABLE_ENTITY, "product_id required"))?;
    let items: Vec<InventoryItem> = body
        .get("inventory_items")
        .cloned()
        .map(serde_json::from_value)
        .transpose()
        .map_err(|_| error_body(StatusCode::UNPROCESSABLE_ENTITY, "invalid inventory_items"))?
        .unwrap_or_default();

    if items.is_empty() {
        return Err(error_body(
            StatusCode::UNPROCESSABLE_ENTITY,
            "no inventory items",
        ));
    }

    let mut products = state.inner.products.lock().expect("lock poisoned");
    let product = products
        .get_mut(&product_id)
        .ok_or_else(|| error_body(StatusCode::NOT_FOUND, "product not found"))?;
    product.stock_quantity += i64::try_from(items.len()).unwrap_or(0);

    Ok(Json(json!({
        "message": format!("{} inventory items added", items.len())
    })))
}

async fn list_orders(State(state): State<BackendState>, headers: HeaderMap) -> ApiResult {
    authorize(&headers)?;
    let orders: Vec<Order> = state
        .inner
        .orders
        .lock()
        .expect("lock poisoned")
        .values()
        .cloned()
        .collect();
    Ok(Json(serde_json::to_value(orders).expect("serializable")))
}

async fn update_order_status(
    State(state): State<BackendState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> ApiResult {
    authorize(&headers)?;

    let status: OrderStatus = body
        .get("status")
        .cloned()
        .map(serde_json::from_value)
        .transpose()
        .map_err(|_| error_body(StatusCode::UNPROCESSABLE_ENTITY, "invalid status"))?
        .ok_or_else(|| error_body(StatusCode::UNPROCESSABLE_ENTITY, "status required"))?;

    let mut orders = state.inner.orders.lock().expect("lock poisoned");
    let order = orders
        .get_mut(&id)
        .ok_or_else(|| error_body(StatusCode::NOT_FOUND, "order not found"))?;
    order.status = status;

    Ok(Json(json!({
        "message": format!("Order #{id} status updated")
    })))
}

/// Sleep, then answer. Lets tests hold a request in flight.
async fn slow(
    State(_state): State<BackendState>,
    Path(ms): Path<u64>,
    headers: HeaderMap,
) -> ApiResult {
    authorize(&headers)?;
    tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
    Ok(Json(json!({"ok": true})))
}

/// Non-JSON error body, for the status-reason fallback path.
async fn maintenance(headers: HeaderMap) -> Result<Json<Value>, (StatusCode, String)> {
    if let Err((status, _)) = authorize(&headers) {
        return Err((status, "nope".to_string()));
    }
    Err((
        StatusCode::SERVICE_UNAVAILABLE,
        "down for maintenance".to_string(),
    ))
}

fn app(state: BackendState) -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{id}",
            put(update_product).delete(delete_product),
        )
        .route("/inventory/batch", post(add_inventory))
        .route("/orders", get(list_orders))
        .route("/orders/{id}/status", put(update_order_status))
        .route("/slow/{ms}", get(slow))
        .route("/maintenance", get(maintenance))
        .layer(middleware::from_fn_with_state(state.clone(), count_hits))
        .with_state(state)
}

// =============================================================================
// Recording ports
// =============================================================================

/// Navigator that counts redirect-to-login calls.
#[derive(Default)]
pub struct RecordingNavigator {
    redirects: AtomicUsize,
}

impl RecordingNavigator {
    pub fn redirects(&self) -> usize {
        self.redirects.load(Ordering::SeqCst)
    }
}

impl Navigator for RecordingNavigator {
    fn redirect_to_login(&self) {
        self.redirects.fetch_add(1, Ordering::SeqCst);
    }
}

/// Notifier that records every notification.
#[derive(Default)]
pub struct RecordingNotifier {
    notes: Mutex<Vec<(Severity, String)>>,
}

impl RecordingNotifier {
    pub fn notes(&self) -> Vec<(Severity, String)> {
        self.notes.lock().expect("lock poisoned").clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.notes().into_iter().map(|(_, msg)| msg).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        self.notes
            .lock()
            .expect("lock poisoned")
            .push((severity, message.to_string()));
    }
}

/// Busy-indicator probe recording edge transitions and visibility.
#[derive(Default)]
pub struct RecordingBusyProbe {
    shows: AtomicUsize,
    hides: AtomicUsize,
    visible: AtomicBool,
}

impl RecordingBusyProbe {
    pub fn shows(&self) -> usize {
        self.shows.load(Ordering::SeqCst)
    }

    pub fn hides(&self) -> usize {
        self.hides.load(Ordering::SeqCst)
    }

    pub fn visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }
}

impl BusyIndicator for RecordingBusyProbe {
    fn show(&self) {
        self.shows.fetch_add(1, Ordering::SeqCst);
        self.visible.store(true, Ordering::SeqCst);
    }

    fn hide(&self) {
        self.hides.fetch_add(1, Ordering::SeqCst);
        self.visible.store(false, Ordering::SeqCst);
    }
}

// =============================================================================
// Test context
// =============================================================================

/// Everything a test needs: a running mock backend, a wired client, and
/// handles on the session store and recording ports.
pub struct TestContext {
    pub client: ApiClient,
    pub backend: BackendState,
    pub session: Arc<MemorySessionStore>,
    pub navigator: Arc<RecordingNavigator>,
    pub notifier: Arc<RecordingNotifier>,
    pub busy: Arc<RecordingBusyProbe>,
}

impl TestContext {
    /// Spawn the mock backend on an ephemeral port and build a client
    /// against it. The session starts empty.
    pub async fn start() -> Self {
        let backend = BackendState::new();
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");

        let router = app(backend.clone());
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("mock backend");
        });

        let base_url = url::Url::parse(&format!("http://{addr}")).expect("valid base url");

        let session = Arc::new(MemorySessionStore::new());
        let navigator = Arc::new(RecordingNavigator::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let busy = Arc::new(RecordingBusyProbe::default());

        let client = ApiClient::builder(base_url)
            .shared_session_store(session.clone() as Arc<dyn SessionStore>)
            .navigator(SharedNavigator(navigator.clone()))
            .notifier(SharedNotifier(notifier.clone()))
            .busy_indicator(SharedBusy(busy.clone()))
            .build();

        Self {
            client,
            backend,
            session,
            navigator,
            notifier,
            busy,
        }
    }

    /// Put a valid session token in the store.
    pub fn authenticate(&self) {
        self.session.set(SecretString::from(VALID_TOKEN));
    }

    /// Put the expired token in the store (backend answers 403).
    pub fn authenticate_expired(&self) {
        self.session.set(SecretString::from(EXPIRED_TOKEN));
    }

    /// Whether the session store currently holds a token.
    pub fn has_token(&self) -> bool {
        self.session.get().is_some()
    }
}

/// Port adapter over a shared [`RecordingNavigator`]; builder setters
/// take ownership, these wrappers let the test keep its own handle.
pub struct SharedNavigator(pub Arc<RecordingNavigator>);

impl Navigator for SharedNavigator {
    fn redirect_to_login(&self) {
        self.0.redirect_to_login();
    }
}

/// Port adapter over a shared [`RecordingNotifier`].
pub struct SharedNotifier(pub Arc<RecordingNotifier>);

impl Notifier for SharedNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        self.0.notify(severity, message);
    }
}

/// Port adapter over a shared [`RecordingBusyProbe`].
pub struct SharedBusy(pub Arc<RecordingBusyProbe>);

impl BusyIndicator for SharedBusy {
    fn show(&self) {
        self.0.show();
    }

    fn hide(&self) {
        self.0.hide();
    }
}
