use super::*;
use crate::test_support::CountingFactory;
use secrecy::SecretString;
use serde_json::json;

mod credential;

const TOKEN: &str = "test-token-7f3a9c";

fn with_token(factory: CountingFactory) -> Dispatcher {
    Dispatcher::new(
        Catalog::hostex().expect("catalog"),
        HostexSession::new(Some(SecretString::from(TOKEN.to_string())), Box::new(factory)),
    )
}

fn without_token(factory: CountingFactory) -> Dispatcher {
    Dispatcher::new(
        Catalog::hostex().expect("catalog"),
        HostexSession::new(None, Box::new(factory)),
    )
}

fn args(value: Value) -> Option<JsonObject> {
    value.as_object().cloned()
}

/// Smallest argument set that satisfies each tool's schema.
fn minimal_args(tool: &str) -> Value {
    match tool {
        "hostex_create_reservation" => json!({
            "property_id": "1",
            "custom_channel_id": 3,
            "check_in_date": "2025-06-01",
            "check_out_date": "2025-06-04",
            "guest_name": "Ada Lovelace",
            "currency": "USD",
            "rate_amount": 45000,
            "commission_amount": 0,
            "received_amount": 45000,
            "income_method_id": 2,
        }),
        "hostex_cancel_reservation" | "hostex_create_review" => {
            json!({ "reservation_code": "0-ABC123-xyz" })
        }
        "hostex_update_lock_code" => json!({ "stay_code": "S1", "lock_code": "4321" }),
        "hostex_get_custom_fields" => json!({ "stay_code": "S1" }),
        "hostex_update_custom_fields" => json!({ "stay_code": "S1", "custom_fields": {} }),
        "hostex_list_availabilities" => json!({
            "property_ids": "1,2",
            "start_date": "2025-06-01",
            "end_date": "2025-06-30",
        }),
        "hostex_update_availabilities" => json!({ "property_ids": [1], "available": true }),
        "hostex_get_conversation" | "hostex_send_message" => json!({ "conversation_id": "C1" }),
        "hostex_create_webhook" => json!({ "url": "https://example.com/hook" }),
        "hostex_delete_webhook" => json!({ "webhook_id": 5 }),
        "hostex_get_listing_calendar" => json!({
            "start_date": "2025-06-01",
            "end_date": "2025-06-30",
            "listings": [],
        }),
        "hostex_update_listing_prices" => json!({
            "channel_type": "airbnb",
            "listing_id": "L1",
            "prices": [],
        }),
        _ => json!({}),
    }
}

fn backend_method(tool: &str) -> &str {
    tool.strip_prefix("hostex_").unwrap_or(tool)
}
