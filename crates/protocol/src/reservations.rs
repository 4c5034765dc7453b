//! Reservation, lock code, and custom field arguments.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    WaitAccept,
    WaitPay,
    Accepted,
    Cancelled,
    Denied,
    Timeout,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ListReservationsArgs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservation_code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ReservationStatus>,

    #[schemars(description = "YYYY-MM-DD format")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_check_in_date: Option<String>,

    #[schemars(description = "YYYY-MM-DD format")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_check_in_date: Option<String>,

    #[schemars(description = "YYYY-MM-DD format")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_check_out_date: Option<String>,

    #[schemars(description = "YYYY-MM-DD format")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_check_out_date: Option<String>,

    #[schemars(description = "Sort field (default: booked_at)")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

/// Direct booking payload. Amounts are integer minor units (cents) and are sent as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CreateReservationArgs {
    #[schemars(description = "Property ID")]
    pub property_id: String,

    #[schemars(description = "Custom channel ID")]
    pub custom_channel_id: i64,

    #[schemars(description = "Check-in date (YYYY-MM-DD)")]
    pub check_in_date: String,

    #[schemars(description = "Check-out date (YYYY-MM-DD)")]
    pub check_out_date: String,

    #[schemars(description = "Primary guest name")]
    pub guest_name: String,

    #[schemars(description = "Currency code (e.g., USD)")]
    pub currency: String,

    #[schemars(description = "Total rate amount in cents")]
    pub rate_amount: i64,

    #[schemars(description = "Commission amount in cents")]
    pub commission_amount: i64,

    #[schemars(description = "Amount received in cents")]
    pub received_amount: i64,

    #[schemars(description = "Income method ID")]
    pub income_method_id: i64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_guests: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CancelReservationArgs {
    #[schemars(description = "Reservation code to cancel")]
    pub reservation_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct UpdateLockCodeArgs {
    #[schemars(description = "Stay code")]
    pub stay_code: String,

    #[schemars(description = "New lock code")]
    pub lock_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GetCustomFieldsArgs {
    #[schemars(description = "Stay code")]
    pub stay_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct UpdateCustomFieldsArgs {
    #[schemars(description = "Stay code")]
    pub stay_code: String,

    /// Opaque values, forwarded untouched. Usable in automated messages as `{{cf.field_name}}`.
    #[schemars(description = "Custom fields as key-value pairs")]
    pub custom_fields: BTreeMap<String, Value>,
}
