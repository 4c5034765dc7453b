use super::validate::validate_arguments;
use futures::future::{BoxFuture, FutureExt};
use hostex_client::{HostexApi, HostexResult};
use hostex_protocol::{
    CancelReservationArgs, CreateReservationArgs, CreateReviewArgs, CreateWebhookArgs,
    DeleteWebhookArgs, FieldViolation, GetConversationArgs, GetCustomFieldsArgs,
    GetListingCalendarArgs, ListAvailabilitiesArgs, ListConversationsArgs, ListPropertiesArgs,
    ListReservationsArgs, ListReviewsArgs, ListRoomTypesArgs, NoArgs, SendMessageArgs,
    UpdateAvailabilitiesArgs, UpdateCustomFieldsArgs, UpdateListingPricesArgs,
    UpdateLockCodeArgs,
};
use indexmap::IndexMap;
use rmcp::model::{JsonObject, Tool};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::Arc;

pub(crate) type BackendFuture = BoxFuture<'static, HostexResult<Value>>;

/// A validated call, waiting for a backend handle.
pub(crate) type PreparedCall = Box<dyn FnOnce(Arc<dyn HostexApi>) -> BackendFuture + Send>;

type Prepare = Box<dyn Fn(JsonObject) -> Result<PreparedCall, Vec<FieldViolation>> + Send + Sync>;

/// Which part of a successful backend body a tool hands back to the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Payload {
    /// The `data` member (`null` when the backend sent none).
    Data,
    /// The whole body. Used by mutations whose answer carries no `data`.
    Body,
}

impl Payload {
    pub(crate) fn select(self, body: Value) -> Value {
        match self {
            Self::Body => body,
            Self::Data => match body {
                Value::Object(mut map) => map.remove("data").unwrap_or(Value::Null),
                _ => Value::Null,
            },
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("tool '{name}' is registered twice")]
    DuplicateTool { name: &'static str },
    #[error("tool '{name}' has an unusable input schema: {reason}")]
    InvalidSchema { name: &'static str, reason: String },
}

pub(crate) struct ToolDescriptor {
    pub(crate) name: &'static str,
    pub(crate) description: &'static str,
    pub(crate) payload: Payload,
    pub(crate) input_schema: Arc<JsonObject>,
    prepare: Prepare,
}

impl ToolDescriptor {
    pub(crate) fn new<A, F>(
        name: &'static str,
        description: &'static str,
        payload: Payload,
        handler: F,
    ) -> Self
    where
        A: DeserializeOwned + JsonSchema + Send + 'static,
        F: Fn(Arc<dyn HostexApi>, A) -> BackendFuture + Send + Sync + 'static,
    {
        let input_schema = Arc::new(schema_for::<A>());
        let schema = input_schema.clone();
        let handler = Arc::new(handler);
        let prepare = move |mut raw: JsonObject| -> Result<PreparedCall, Vec<FieldViolation>> {
            let violations = validate_arguments(&schema, &mut raw);
            if !violations.is_empty() {
                return Err(violations);
            }
            let args: A = serde_json::from_value(Value::Object(raw)).map_err(|err| {
                vec![FieldViolation {
                    field: "arguments".to_string(),
                    expected: "arguments matching the input schema".to_string(),
                    reason: err.to_string(),
                }]
            })?;
            let handler = handler.clone();
            let call: PreparedCall = Box::new(move |api: Arc<dyn HostexApi>| handler(api, args));
            Ok(call)
        };

        Self {
            name,
            description,
            payload,
            input_schema,
            prepare: Box::new(prepare),
        }
    }

    /// Validates and decodes raw arguments. Nothing reaches the backend unless this succeeds.
    pub(crate) fn prepare(
        &self,
        arguments: JsonObject,
    ) -> Result<PreparedCall, Vec<FieldViolation>> {
        (self.prepare)(arguments)
    }

    pub(crate) fn to_mcp_tool(&self) -> Tool {
        Tool::new(self.name, self.description, self.input_schema.clone())
    }

    fn check_schema(&self) -> Result<(), CatalogError> {
        let invalid = |reason: String| CatalogError::InvalidSchema {
            name: self.name,
            reason,
        };
        if self.input_schema.get("type") != Some(&json!("object")) {
            return Err(invalid("root type must be \"object\"".to_string()));
        }
        let properties = self.input_schema.get("properties").and_then(Value::as_object);
        let required = self
            .input_schema
            .get("required")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        for key in required.iter().filter_map(Value::as_str) {
            if !properties.is_some_and(|props| props.contains_key(key)) {
                return Err(invalid(format!("required field '{key}' is not declared")));
            }
        }
        Ok(())
    }
}

/// Ordered, immutable tool registry. Listing order is registration order.
pub(crate) struct Catalog {
    tools: IndexMap<&'static str, ToolDescriptor>,
}

impl Catalog {
    pub(crate) fn from_descriptors(
        descriptors: impl IntoIterator<Item = ToolDescriptor>,
    ) -> Result<Self, CatalogError> {
        let mut tools = IndexMap::new();
        for descriptor in descriptors {
            descriptor.check_schema()?;
            let name = descriptor.name;
            if tools.insert(name, descriptor).is_some() {
                return Err(CatalogError::DuplicateTool { name });
            }
        }
        Ok(Self { tools })
    }

    pub(crate) fn hostex() -> Result<Self, CatalogError> {
        Self::from_descriptors(hostex_tools())
    }

    pub(crate) fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.get(name)
    }

    pub(crate) fn len(&self) -> usize {
        self.tools.len()
    }

    #[cfg(test)]
    pub(crate) fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.tools.keys().copied()
    }

    pub(crate) fn mcp_tools(&self) -> Vec<Tool> {
        self.tools.values().map(ToolDescriptor::to_mcp_tool).collect()
    }

    pub(crate) fn instructions(&self) -> String {
        let mut out = String::from(
            "Hostex property management tools. Every call needs HOSTEX_ACCESS_TOKEN to be set \
             for the server process.\n",
        );
        for tool in self.tools.values() {
            out.push_str(&format!("- {}: {}\n", tool.name, tool.description));
        }
        out
    }
}

/// JSON Schema for an argument struct, trimmed to what MCP clients expect as `inputSchema`.
pub(crate) fn schema_for<A: JsonSchema>() -> JsonObject {
    let schema = schemars::schema_for!(A);
    let mut value = match serde_json::to_value(&schema) {
        Ok(value) => value,
        Err(err) => {
            log::error!("Failed to render input schema: {err}");
            json!({ "type": "object" })
        }
    };
    if let Some(root) = value.as_object_mut() {
        root.remove("$schema");
    }
    sanitize_schema(&mut value);
    match value {
        Value::Object(map) => map,
        _ => JsonObject::new(),
    }
}

fn sanitize_schema(schema: &mut Value) {
    let Value::Object(map) = schema else {
        return;
    };
    map.remove("title");

    // Numeric width annotations such as `int64` or `double` are not standard formats.
    let keep_format = map
        .get("format")
        .and_then(Value::as_str)
        .map(|format| matches!(format, "date-time" | "date" | "time" | "email" | "uri" | "uuid"));
    if keep_format == Some(false) {
        map.remove("format");
    }

    for key in ["properties", "$defs", "definitions"] {
        if let Some(Value::Object(children)) = map.get_mut(key) {
            for child in children.values_mut() {
                sanitize_schema(child);
            }
        }
    }
    for key in ["anyOf", "oneOf", "allOf"] {
        if let Some(Value::Array(branches)) = map.get_mut(key) {
            for branch in branches {
                sanitize_schema(branch);
            }
        }
    }
    for key in ["items", "additionalProperties"] {
        if let Some(child) = map.get_mut(key) {
            sanitize_schema(child);
        }
    }
}

fn hostex_tools() -> Vec<ToolDescriptor> {
    use Payload::{Body, Data};

    vec![
        ToolDescriptor::new(
            "hostex_list_properties",
            "List properties from your Hostex account. Returns property details including ID, \
             title, address, channels, and location coordinates.",
            Data,
            |api, args: ListPropertiesArgs| async move { api.list_properties(args).await }.boxed(),
        ),
        ToolDescriptor::new(
            "hostex_list_room_types",
            "List room types from your Hostex account",
            Data,
            |api, args: ListRoomTypesArgs| async move { api.list_room_types(args).await }.boxed(),
        ),
        ToolDescriptor::new(
            "hostex_list_reservations",
            "List and search reservations with filters like status, dates, property ID, etc.",
            Data,
            |api, args: ListReservationsArgs| {
                async move { api.list_reservations(args).await }.boxed()
            },
        ),
        ToolDescriptor::new(
            "hostex_create_reservation",
            "Create a direct booking reservation in Hostex",
            Data,
            |api, args: CreateReservationArgs| {
                async move { api.create_reservation(args).await }.boxed()
            },
        ),
        ToolDescriptor::new(
            "hostex_cancel_reservation",
            "Cancel a direct booking reservation (channel bookings not supported)",
            Body,
            |api, args: CancelReservationArgs| {
                async move { api.cancel_reservation(args).await }.boxed()
            },
        ),
        ToolDescriptor::new(
            "hostex_update_lock_code",
            "Update the lock code for a stay",
            Body,
            |api, args: UpdateLockCodeArgs| async move { api.update_lock_code(args).await }.boxed(),
        ),
        ToolDescriptor::new(
            "hostex_get_custom_fields",
            "Get custom fields for a stay",
            Data,
            |api, args: GetCustomFieldsArgs| {
                async move { api.get_custom_fields(args).await }.boxed()
            },
        ),
        ToolDescriptor::new(
            "hostex_update_custom_fields",
            "Update custom fields for a stay. Custom fields can be used in automated messages \
             using {{cf.field_name}} syntax.",
            Body,
            |api, args: UpdateCustomFieldsArgs| {
                async move { api.update_custom_fields(args).await }.boxed()
            },
        ),
        ToolDescriptor::new(
            "hostex_list_availabilities",
            "Query property availability for date ranges",
            Data,
            |api, args: ListAvailabilitiesArgs| {
                async move { api.list_availabilities(args).await }.boxed()
            },
        ),
        ToolDescriptor::new(
            "hostex_update_availabilities",
            "Update property availability status for specific dates or date ranges",
            Body,
            |api, args: UpdateAvailabilitiesArgs| {
                async move { api.update_availabilities(args).await }.boxed()
            },
        ),
        ToolDescriptor::new(
            "hostex_list_conversations",
            "List guest conversations and inquiries",
            Data,
            |api, args: ListConversationsArgs| {
                async move { api.list_conversations(args).await }.boxed()
            },
        ),
        ToolDescriptor::new(
            "hostex_get_conversation",
            "Get conversation details including all messages",
            Data,
            |api, args: GetConversationArgs| {
                async move { api.get_conversation(args).await }.boxed()
            },
        ),
        ToolDescriptor::new(
            "hostex_send_message",
            "Send a text or image message to a guest",
            Body,
            |api, args: SendMessageArgs| async move { api.send_message(args).await }.boxed(),
        ),
        ToolDescriptor::new(
            "hostex_list_reviews",
            "Query reviews with filters",
            Data,
            |api, args: ListReviewsArgs| async move { api.list_reviews(args).await }.boxed(),
        ),
        ToolDescriptor::new(
            "hostex_create_review",
            "Create a review or reply for a reservation",
            Body,
            |api, args: CreateReviewArgs| async move { api.create_review(args).await }.boxed(),
        ),
        ToolDescriptor::new(
            "hostex_list_webhooks",
            "List configured webhooks",
            Data,
            |api, _: NoArgs| async move { api.list_webhooks().await }.boxed(),
        ),
        ToolDescriptor::new(
            "hostex_create_webhook",
            "Create a new webhook",
            Data,
            |api, args: CreateWebhookArgs| async move { api.create_webhook(args).await }.boxed(),
        ),
        ToolDescriptor::new(
            "hostex_delete_webhook",
            "Delete a webhook (only manageable ones)",
            Body,
            |api, args: DeleteWebhookArgs| async move { api.delete_webhook(args).await }.boxed(),
        ),
        ToolDescriptor::new(
            "hostex_get_listing_calendar",
            "Get calendar information for multiple listings",
            Data,
            |api, args: GetListingCalendarArgs| {
                async move { api.get_listing_calendar(args).await }.boxed()
            },
        ),
        ToolDescriptor::new(
            "hostex_update_listing_prices",
            "Update listing prices for channel listings",
            Body,
            |api, args: UpdateListingPricesArgs| {
                async move { api.update_listing_prices(args).await }.boxed()
            },
        ),
        ToolDescriptor::new(
            "hostex_list_custom_channels",
            "Get custom channels from Custom Options Page",
            Data,
            |api, _: NoArgs| async move { api.list_custom_channels().await }.boxed(),
        ),
        ToolDescriptor::new(
            "hostex_list_income_methods",
            "Get income methods from Custom Options Page",
            Data,
            |api, _: NoArgs| async move { api.list_income_methods().await }.boxed(),
        ),
    ]
}
