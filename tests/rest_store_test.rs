//! Wire-level tests for the PostgREST-backed store: query shapes, credential
//! headers, single-object semantics, and verbatim error passthrough.

use serde_json::{json, Value};
use uuid::Uuid;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sepatu_wash_api::models::{TicketPayload, TicketStatus};
use sepatu_wash_api::store::{RestStore, StoreError, TicketStore};

const TABLE_PATH: &str = "/rest/v1/wash_items";

fn ticket_json(id: Uuid, customer_name: &str, status: &str) -> Value {
    json!({
        "id": id.to_string(),
        "customer_name": customer_name,
        "brand": null,
        "size": null,
        "service_type": null,
        "status": status,
        "drop_off_date": null,
        "pick_up_date": null,
        "notes": null,
        "created_at": "2025-01-15T08:30:00+00:00",
    })
}

fn store_for(server: &MockServer) -> RestStore {
    RestStore::new(&server.uri(), "test-key").unwrap()
}

#[tokio::test]
async fn list_sends_credentials_order_and_status_filter() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path(TABLE_PATH))
        .and(query_param("select", "*"))
        .and(query_param("order", "created_at.desc"))
        .and(query_param("status", "eq.Proses"))
        .and(header("apikey", "test-key"))
        .and(header("Authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            ticket_json(id, "Rani", "Proses"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let store = store_for(&server);
    let tickets = store.list(Some(TicketStatus::Proses)).await.unwrap();

    assert_eq!(tickets.len(), 1);
    assert_eq!(tickets[0].id, id);
    assert_eq!(tickets[0].customer_name, "Rani");
    assert_eq!(tickets[0].status, TicketStatus::Proses);
}

#[tokio::test]
async fn get_with_zero_rows_maps_to_row_not_found() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path(TABLE_PATH))
        .and(query_param("id", format!("eq.{id}")))
        .respond_with(ResponseTemplate::new(406).set_body_json(json!({
            "code": "PGRST116",
            "message": "JSON object requested, multiple (or no) rows returned",
        })))
        .mount(&server)
        .await;

    let store = store_for(&server);
    let err = store.get(id).await.unwrap_err();
    assert!(matches!(err, StoreError::RowNotFound));
}

#[tokio::test]
async fn update_with_zero_rows_maps_to_row_not_found() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();

    Mock::given(method("PATCH"))
        .and(path(TABLE_PATH))
        .and(query_param("id", format!("eq.{id}")))
        .respond_with(ResponseTemplate::new(406).set_body_json(json!({
            "code": "PGRST116",
            "message": "JSON object requested, multiple (or no) rows returned",
        })))
        .mount(&server)
        .await;

    let store = store_for(&server);
    let payload = TicketPayload {
        status: Some(TicketStatus::Selesai),
        ..Default::default()
    };
    let err = store.update(id, payload).await.unwrap_err();
    assert!(matches!(err, StoreError::RowNotFound));
}

#[tokio::test]
async fn backend_error_messages_pass_through_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(TABLE_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": "42P01",
            "message": "relation \"public.wash_items\" does not exist",
        })))
        .mount(&server)
        .await;

    let store = store_for(&server);
    let err = store.list(None).await.unwrap_err();
    match err {
        StoreError::Backend(message) => {
            assert_eq!(message, "relation \"public.wash_items\" does not exist");
        }
        other => panic!("expected a backend fault, got {other:?}"),
    }
}

#[tokio::test]
async fn insert_requests_the_stored_representation() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path(TABLE_PATH))
        .and(header("Prefer", "return=representation"))
        .and(header("Accept", "application/vnd.pgrst.object+json"))
        .and(body_json(json!({"customer_name": "Rani"})))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(ticket_json(id, "Rani", "Menunggu")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let store = store_for(&server);
    let payload = TicketPayload {
        customer_name: Some("Rani".to_string()),
        ..Default::default()
    };
    let ticket = store.insert(payload).await.unwrap();

    assert_eq!(ticket.id, id);
    assert_eq!(ticket.status, TicketStatus::Menunggu);
}

#[tokio::test]
async fn delete_succeeds_when_no_rows_match() {
    let server = MockServer::start().await;
    let id = Uuid::new_v4();

    Mock::given(method("DELETE"))
        .and(path(TABLE_PATH))
        .and(query_param("id", format!("eq.{id}")))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let store = store_for(&server);
    assert!(store.delete(id).await.is_ok());
}
