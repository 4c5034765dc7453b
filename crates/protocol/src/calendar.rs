//! Availability and channel listing calendar arguments.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ListAvailabilitiesArgs {
    #[schemars(description = "Comma-separated property IDs (max 100)")]
    pub property_ids: String,

    #[schemars(description = "Start date (YYYY-MM-DD)")]
    pub start_date: String,

    #[schemars(description = "End date (YYYY-MM-DD)")]
    pub end_date: String,
}

/// Either a `start_date`/`end_date` range or an explicit `dates` list is expected. Both forms
/// are optional in the schema; [`Self::has_date_selection`] is checked before sending, so a
/// call with neither `dates` nor a complete range is rejected without reaching the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct UpdateAvailabilitiesArgs {
    #[schemars(description = "Array of property IDs to update")]
    pub property_ids: Vec<i64>,

    #[schemars(description = "Start date (YYYY-MM-DD)")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,

    #[schemars(description = "End date (YYYY-MM-DD)")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,

    #[schemars(description = "Specific dates array (alternative to date range)")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dates: Option<Vec<String>>,

    #[schemars(description = "Availability status")]
    pub available: bool,
}

impl UpdateAvailabilitiesArgs {
    pub fn has_date_selection(&self) -> bool {
        let has_range = self.start_date.is_some() && self.end_date.is_some();
        let has_dates = self.dates.as_ref().is_some_and(|dates| !dates.is_empty());
        has_range || has_dates
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ListingRef {
    pub channel_type: String,
    pub listing_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GetListingCalendarArgs {
    #[schemars(description = "Calendar start date (YYYY-MM-DD)")]
    pub start_date: String,

    #[schemars(description = "Calendar end date (YYYY-MM-DD)")]
    pub end_date: String,

    pub listings: Vec<ListingRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ListingPrice {
    pub date: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct UpdateListingPricesArgs {
    #[schemars(description = "Channel type (e.g., airbnb)")]
    pub channel_type: String,

    #[schemars(description = "Channel listing ID")]
    pub listing_id: String,

    pub prices: Vec<ListingPrice>,
}
