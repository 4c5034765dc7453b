use crate::{HostexApi, HostexError, HostexResult};
use async_trait::async_trait;
use hostex_protocol::{
    CancelReservationArgs, CreateReservationArgs, CreateReviewArgs, CreateWebhookArgs,
    DeleteWebhookArgs, GetConversationArgs, GetCustomFieldsArgs, GetListingCalendarArgs,
    ListAvailabilitiesArgs, ListConversationsArgs, ListPropertiesArgs, ListReservationsArgs,
    ListReviewsArgs, ListRoomTypesArgs, SendMessageArgs, UpdateAvailabilitiesArgs,
    UpdateCustomFieldsArgs, UpdateListingPricesArgs, UpdateLockCodeArgs, HOSTEX_OK_CODE,
};
use reqwest::{Method, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.hostex.io/v3";
pub const ACCESS_TOKEN_HEADER: &str = "Hostex-Access-Token";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_ERROR_BODY_CHARS: usize = 300;

#[derive(Debug, Clone)]
pub struct HostexClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for HostexClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Hostex v3 REST client. Building one performs no network I/O.
#[derive(Debug)]
pub struct HostexClient {
    http: reqwest::Client,
    base_url: String,
    access_token: SecretString,
}

impl HostexClient {
    pub fn new(access_token: SecretString, config: &HostexClientConfig) -> HostexResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("hostex-mcp/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(HostexError::Transport)?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            access_token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<Q: Serialize + ?Sized>(&self, path: &str, query: &Q) -> HostexResult<Value> {
        self.send(self.http.get(self.url(path)).query(query)).await
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> HostexResult<Value> {
        self.send(self.http.request(method, self.url(path)).json(body))
            .await
    }

    async fn delete(&self, path: &str) -> HostexResult<Value> {
        self.send(self.http.delete(self.url(path))).await
    }

    async fn send(&self, request: RequestBuilder) -> HostexResult<Value> {
        let response = request
            .header(ACCESS_TOKEN_HEADER, self.access_token.expose_secret())
            .send()
            .await
            .map_err(HostexError::Transport)?;
        let status = response.status();
        log::debug!("Hostex responded {status} for {}", response.url().path());
        let text = response.text().await.map_err(HostexError::Transport)?;
        decode_response(status.as_u16(), &text)
    }
}

fn segment(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

fn without_nulls(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .collect::<Map<String, Value>>(),
        ),
        other => other,
    }
}

/// Turns a raw HTTP answer into the response body, or an error when either the status or the
/// Hostex `error_code` reports one.
pub(crate) fn decode_response(status: u16, text: &str) -> HostexResult<Value> {
    let success = (200..300).contains(&status);
    let body: Value = match serde_json::from_str(text) {
        Ok(body) => body,
        Err(err) if success => {
            return Err(HostexError::Decode(format!("invalid JSON body: {err}")));
        }
        Err(_) => {
            let mut message: String = text.trim().chars().take(MAX_ERROR_BODY_CHARS).collect();
            if message.is_empty() {
                message = format!("HTTP {status}");
            }
            return Err(HostexError::Api {
                status,
                code: None,
                message,
                request_id: None,
            });
        }
    };

    let code = body.get("error_code").and_then(Value::as_i64);
    if success && !matches!(code, Some(code) if code != HOSTEX_OK_CODE) {
        return Ok(body);
    }

    let message = body
        .get("error_msg")
        .and_then(Value::as_str)
        .filter(|msg| !msg.trim().is_empty())
        .map(ToString::to_string)
        .unwrap_or_else(|| format!("HTTP {status}"));
    let request_id = body
        .get("request_id")
        .and_then(Value::as_str)
        .map(ToString::to_string);
    Err(HostexError::Api {
        status,
        code,
        message,
        request_id,
    })
}

#[async_trait]
impl HostexApi for HostexClient {
    async fn list_properties(&self, args: ListPropertiesArgs) -> HostexResult<Value> {
        self.get("/properties", &args).await
    }

    async fn list_room_types(&self, args: ListRoomTypesArgs) -> HostexResult<Value> {
        self.get("/room_types", &args).await
    }

    async fn list_reservations(&self, args: ListReservationsArgs) -> HostexResult<Value> {
        self.get("/reservations", &args).await
    }

    async fn create_reservation(&self, args: CreateReservationArgs) -> HostexResult<Value> {
        self.send_json(Method::POST, "/reservations", &args).await
    }

    async fn cancel_reservation(&self, args: CancelReservationArgs) -> HostexResult<Value> {
        self.delete(&format!("/reservations/{}", segment(&args.reservation_code)))
            .await
    }

    async fn update_lock_code(&self, args: UpdateLockCodeArgs) -> HostexResult<Value> {
        let path = format!(
            "/reservations/{}/check_in_details",
            segment(&args.stay_code)
        );
        self.send_json(Method::PATCH, &path, &json!({ "lock_code": args.lock_code }))
            .await
    }

    async fn get_custom_fields(&self, args: GetCustomFieldsArgs) -> HostexResult<Value> {
        let path = format!("/reservations/{}/custom_fields", segment(&args.stay_code));
        self.send(self.http.get(self.url(&path))).await
    }

    async fn update_custom_fields(&self, args: UpdateCustomFieldsArgs) -> HostexResult<Value> {
        let path = format!("/reservations/{}/custom_fields", segment(&args.stay_code));
        let body = json!({ "custom_fields": args.custom_fields });
        self.send_json(Method::PATCH, &path, &body).await
    }

    async fn list_availabilities(&self, args: ListAvailabilitiesArgs) -> HostexResult<Value> {
        self.get("/availabilities", &args).await
    }

    async fn update_availabilities(&self, args: UpdateAvailabilitiesArgs) -> HostexResult<Value> {
        if !args.has_date_selection() {
            return Err(HostexError::Rejected(
                "update_availabilities requires either `dates` or both `start_date` and `end_date`"
                    .to_string(),
            ));
        }
        self.send_json(Method::POST, "/availabilities", &args).await
    }

    async fn list_conversations(&self, args: ListConversationsArgs) -> HostexResult<Value> {
        self.get("/conversations", &args).await
    }

    async fn get_conversation(&self, args: GetConversationArgs) -> HostexResult<Value> {
        let path = format!("/conversations/{}", segment(&args.conversation_id));
        self.send(self.http.get(self.url(&path))).await
    }

    async fn send_message(&self, args: SendMessageArgs) -> HostexResult<Value> {
        let path = format!("/conversations/{}", segment(&args.conversation_id));
        let body = without_nulls(json!({
            "message": args.message,
            "jpeg_base64": args.jpeg_base64,
        }));
        self.send_json(Method::POST, &path, &body).await
    }

    async fn list_reviews(&self, args: ListReviewsArgs) -> HostexResult<Value> {
        self.get("/reviews", &args).await
    }

    async fn create_review(&self, args: CreateReviewArgs) -> HostexResult<Value> {
        let path = format!("/reviews/{}", segment(&args.reservation_code));
        let body = without_nulls(json!({
            "host_review_score": args.host_review_score,
            "host_review_content": args.host_review_content,
            "host_reply_content": args.host_reply_content,
        }));
        self.send_json(Method::POST, &path, &body).await
    }

    async fn list_webhooks(&self) -> HostexResult<Value> {
        self.send(self.http.get(self.url("/webhooks"))).await
    }

    async fn create_webhook(&self, args: CreateWebhookArgs) -> HostexResult<Value> {
        self.send_json(Method::POST, "/webhooks", &args).await
    }

    async fn delete_webhook(&self, args: DeleteWebhookArgs) -> HostexResult<Value> {
        self.delete(&format!("/webhooks/{}", args.webhook_id)).await
    }

    async fn get_listing_calendar(&self, args: GetListingCalendarArgs) -> HostexResult<Value> {
        self.send_json(Method::POST, "/listings/calendar", &args)
            .await
    }

    async fn update_listing_prices(&self, args: UpdateListingPricesArgs) -> HostexResult<Value> {
        self.send_json(Method::POST, "/listings/prices", &args).await
    }

    async fn list_custom_channels(&self) -> HostexResult<Value> {
        self.send(self.http.get(self.url("/custom_channels"))).await
    }

    async fn list_income_methods(&self) -> HostexResult<Value> {
        self.send(self.http.get(self.url("/income_methods"))).await
    }
}
