//! Argument validation against a tool's generated JSON Schema.
//!
//! Covers the subset of JSON Schema the argument structs produce: `type` (single or union),
//! `enum`/`const`, `properties`/`required`/`additionalProperties`, `items`, `anyOf`/`oneOf`/`allOf`
//! and local `$ref`s into `$defs`. Every violation is collected; validation never stops at the
//! first one.
//!
//! Integers must fit in `i64`. Integral floats such as `10.0` are accepted where an integer is
//! expected and rewritten in place, so the decoded arguments see a plain integer.

use hostex_protocol::FieldViolation;
use rmcp::model::JsonObject;
use serde_json::Value;

const MAX_REF_DEPTH: usize = 16;

pub(crate) fn validate_arguments(
    schema: &JsonObject,
    arguments: &mut JsonObject,
) -> Vec<FieldViolation> {
    let root = Value::Object(schema.clone());
    let mut validator = Validator {
        root: schema,
        violations: Vec::new(),
    };
    validator.check_object_members(&root, arguments, "", 0);
    validator.violations
}

struct Validator<'a> {
    root: &'a JsonObject,
    violations: Vec<FieldViolation>,
}

impl<'a> Validator<'a> {
    fn resolve<'s>(&self, schema: &'s Value, depth: usize) -> Option<&'s Value>
    where
        'a: 's,
    {
        let Some(reference) = schema.get("$ref").and_then(Value::as_str) else {
            return Some(schema);
        };
        if depth >= MAX_REF_DEPTH {
            return None;
        }
        let name = reference
            .strip_prefix("#/$defs/")
            .or_else(|| reference.strip_prefix("#/definitions/"))?;
        let target = self
            .root
            .get("$defs")
            .or_else(|| self.root.get("definitions"))
            .and_then(|defs| defs.get(name))?;
        self.resolve(target, depth + 1)
    }

    fn push(&mut self, path: &str, expected: String, reason: impl Into<String>) {
        self.violations.push(FieldViolation {
            field: if path.is_empty() {
                "arguments".to_string()
            } else {
                path.to_string()
            },
            expected,
            reason: reason.into(),
        });
    }

    fn check(&mut self, schema: &Value, value: &mut Value, path: &str, depth: usize) {
        let Some(schema) = self.resolve(schema, depth) else {
            self.push(path, "resolvable schema".to_string(), "unresolved $ref");
            return;
        };
        let map = match schema {
            Value::Bool(true) => return,
            Value::Bool(false) => {
                self.push(path, "nothing".to_string(), "no value is accepted here");
                return;
            }
            Value::Object(map) => map,
            _ => return,
        };

        for key in ["anyOf", "oneOf"] {
            if let Some(branches) = map.get(key).and_then(Value::as_array) {
                let matched = branches.iter().find_map(|branch| {
                    let mut branch_check = Validator {
                        root: self.root,
                        violations: Vec::new(),
                    };
                    let mut candidate = value.clone();
                    branch_check.check(branch, &mut candidate, path, depth + 1);
                    branch_check.violations.is_empty().then_some(candidate)
                });
                match matched {
                    Some(normalized) => *value = normalized,
                    None => {
                        let expected = self.describe(schema, depth);
                        self.push(path, expected, format!("got {}", describe_value(value)));
                        return;
                    }
                }
            }
        }
        if let Some(parts) = map.get("allOf").and_then(Value::as_array) {
            for part in parts {
                self.check(part, value, path, depth + 1);
            }
        }

        if let Some(types) = map.get("type") {
            if !type_matches(types, value) {
                let expected = self.describe(schema, depth);
                self.push(path, expected, format!("got {}", describe_value(value)));
                return;
            }
        }

        if let Some(allowed) = map.get("enum").and_then(Value::as_array) {
            if !allowed.contains(value) {
                let expected = self.describe(schema, depth);
                self.push(path, expected, format!("got {value}"));
                return;
            }
        }
        if let Some(constant) = map.get("const") {
            if *constant != *value {
                self.push(path, format!("{constant}"), format!("got {value}"));
                return;
            }
        }

        match value {
            Value::Object(members) => self.check_object_members(schema, members, path, depth),
            Value::Array(items) => {
                if let Some(item_schema) = map.get("items") {
                    for (idx, item) in items.iter_mut().enumerate() {
                        self.check(item_schema, item, &format!("{path}[{idx}]"), depth + 1);
                    }
                }
            }
            _ => {}
        }
    }

    fn check_object_members(
        &mut self,
        schema: &Value,
        members: &mut serde_json::Map<String, Value>,
        path: &str,
        depth: usize,
    ) {
        let join = |key: &str| {
            if path.is_empty() {
                key.to_string()
            } else {
                format!("{path}.{key}")
            }
        };
        let properties = schema.get("properties").and_then(Value::as_object);

        if let Some(required) = schema.get("required").and_then(Value::as_array) {
            for key in required.iter().filter_map(Value::as_str) {
                if !members.contains_key(key) {
                    let expected = properties
                        .and_then(|props| props.get(key))
                        .map(|prop| self.describe(prop, depth))
                        .unwrap_or_else(|| "value".to_string());
                    self.push(&join(key), expected, "missing required field");
                }
            }
        }

        let additional = schema.get("additionalProperties");
        for (key, member) in members.iter_mut() {
            match properties.and_then(|props| props.get(key)) {
                Some(prop) => self.check(prop, member, &join(key), depth + 1),
                None => match additional {
                    Some(Value::Bool(false)) => {
                        self.push(&join(key), "no such field".to_string(), "unknown field");
                    }
                    Some(extra @ Value::Object(_)) => {
                        self.check(extra, member, &join(key), depth + 1);
                    }
                    _ => {}
                },
            }
        }
    }

    fn describe(&self, schema: &Value, depth: usize) -> String {
        let Some(schema) = self.resolve(schema, depth) else {
            return "value".to_string();
        };
        if let Some(allowed) = schema.get("enum").and_then(Value::as_array) {
            let values: Vec<String> = allowed
                .iter()
                .map(|v| v.as_str().map(ToString::to_string).unwrap_or_else(|| v.to_string()))
                .collect();
            return format!("one of: {}", values.join(", "));
        }
        for key in ["anyOf", "oneOf"] {
            if let Some(branches) = schema.get(key).and_then(Value::as_array) {
                if depth < MAX_REF_DEPTH {
                    let parts: Vec<String> = branches
                        .iter()
                        .map(|branch| self.describe(branch, depth + 1))
                        .collect();
                    return parts.join(" or ");
                }
            }
        }
        match schema.get("type") {
            Some(Value::String(t)) => describe_type(t, schema, self, depth),
            Some(Value::Array(types)) => types
                .iter()
                .filter_map(Value::as_str)
                .map(|t| describe_type(t, schema, self, depth))
                .collect::<Vec<_>>()
                .join(" or "),
            _ => "value".to_string(),
        }
    }
}

fn describe_type(name: &str, schema: &Value, validator: &Validator<'_>, depth: usize) -> String {
    match (name, schema.get("items")) {
        ("array", Some(items)) if depth < MAX_REF_DEPTH => {
            format!("array of {}", validator.describe(items, depth + 1))
        }
        _ => name.to_string(),
    }
}

fn type_matches(types: &Value, value: &mut Value) -> bool {
    let names: Vec<&str> = match types {
        Value::String(name) => vec![name.as_str()],
        Value::Array(names) => names.iter().filter_map(Value::as_str).collect(),
        _ => return true,
    };
    if names.iter().any(|name| single_type_matches(name, &*value)) {
        return true;
    }
    names.contains(&"integer") && integral_float_to_integer(value)
}

fn single_type_matches(name: &str, value: &Value) -> bool {
    match name {
        "string" => value.is_string(),
        "integer" => value.is_i64(),
        "number" => value.is_number(),
        "boolean" => value.is_boolean(),
        "object" => value.is_object(),
        "array" => value.is_array(),
        "null" => value.is_null(),
        _ => true,
    }
}

fn integral_float_to_integer(value: &mut Value) -> bool {
    let Some(float) = value.as_f64().filter(|_| value.is_f64()) else {
        return false;
    };
    // `i64::MAX as f64` rounds up to 2^63, which is already out of range.
    if float.fract() != 0.0 || float < i64::MIN as f64 || float >= i64::MAX as f64 {
        return false;
    }
    *value = Value::from(float as i64);
    true
}

fn describe_value(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(n) if !n.is_i64() => "integer out of range",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::catalog::schema_for;
    use hostex_protocol::{
        CreateReservationArgs, DeleteWebhookArgs, GetListingCalendarArgs, ListPropertiesArgs,
        ListReservationsArgs, UpdateAvailabilitiesArgs, UpdateCustomFieldsArgs,
    };
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn violations<A: schemars::JsonSchema>(arguments: Value) -> Vec<FieldViolation> {
        normalized::<A>(arguments).1
    }

    fn normalized<A: schemars::JsonSchema>(arguments: Value) -> (Value, Vec<FieldViolation>) {
        let schema = schema_for::<A>();
        let mut arguments = arguments.as_object().cloned().expect("object arguments");
        let found = validate_arguments(&schema, &mut arguments);
        (Value::Object(arguments), found)
    }

    fn fields(violations: &[FieldViolation]) -> Vec<&str> {
        violations.iter().map(|v| v.field.as_str()).collect()
    }

    fn reservation() -> Value {
        json!({
            "property_id": "1",
            "custom_channel_id": 3,
            "check_in_date": "2025-06-01",
            "check_out_date": "2025-06-04",
            "guest_name": "Ada",
            "currency": "USD",
            "rate_amount": 45000,
            "commission_amount": 0,
            "received_amount": 45000,
            "income_method_id": 2,
        })
    }

    #[test]
    fn complete_arguments_pass() {
        assert!(violations::<CreateReservationArgs>(reservation()).is_empty());
    }

    #[test]
    fn missing_required_field_is_named() {
        let mut args = reservation();
        args.as_object_mut().unwrap().remove("guest_name");
        let found = violations::<CreateReservationArgs>(args);
        assert_eq!(fields(&found), vec!["guest_name"]);
        assert_eq!(found[0].expected, "string");
        assert_eq!(found[0].reason, "missing required field");
    }

    #[test]
    fn every_violation_is_reported() {
        let mut args = reservation();
        let map = args.as_object_mut().unwrap();
        map.remove("currency");
        map.insert("rate_amount".to_string(), json!("450.00"));
        map.insert("custom_channel_id".to_string(), json!(1.5));
        let found = violations::<CreateReservationArgs>(args);
        let mut names = fields(&found);
        names.sort();
        assert_eq!(names, vec!["currency", "custom_channel_id", "rate_amount"]);
    }

    #[test]
    fn enum_values_outside_the_set_are_rejected() {
        let found = violations::<ListReservationsArgs>(json!({ "status": "checked_in" }));
        assert_eq!(fields(&found), vec!["status"]);
        assert!(found[0].expected.contains("wait_accept"));
        assert!(found[0].expected.contains("timeout"));

        assert!(violations::<ListReservationsArgs>(json!({ "status": "accepted" })).is_empty());
    }

    #[test]
    fn optional_fields_accept_absence_and_null() {
        assert!(violations::<ListReservationsArgs>(json!({})).is_empty());
        assert!(violations::<ListReservationsArgs>(json!({ "property_id": null })).is_empty());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        assert!(violations::<ListReservationsArgs>(json!({ "page": 2 })).is_empty());
    }

    #[test]
    fn nested_array_items_report_their_path() {
        let found = violations::<GetListingCalendarArgs>(json!({
            "start_date": "2025-06-01",
            "end_date": "2025-06-30",
            "listings": [
                { "channel_type": "airbnb", "listing_id": "L1" },
                { "channel_type": "booking" }
            ],
        }));
        assert_eq!(fields(&found), vec!["listings[1].listing_id"]);
    }

    #[test]
    fn array_element_types_are_checked() {
        let found = violations::<UpdateAvailabilitiesArgs>(json!({
            "property_ids": [1, "2"],
            "available": true,
        }));
        assert_eq!(fields(&found), vec!["property_ids[1]"]);
    }

    #[test]
    fn date_selection_is_not_enforced_locally() {
        let found = violations::<UpdateAvailabilitiesArgs>(json!({
            "property_ids": [1],
            "available": false,
        }));
        assert!(found.is_empty());
    }

    #[test]
    fn custom_fields_accept_arbitrary_values() {
        let found = violations::<UpdateCustomFieldsArgs>(json!({
            "stay_code": "S1",
            "custom_fields": { "door": "blue", "floor": 3, "extras": ["towels"], "vip": null },
        }));
        assert!(found.is_empty());

        let found = violations::<UpdateCustomFieldsArgs>(json!({
            "stay_code": "S1",
            "custom_fields": "door=blue",
        }));
        assert_eq!(fields(&found), vec!["custom_fields"]);
    }

    #[test]
    fn integers_beyond_i64_name_their_field() {
        let found = violations::<DeleteWebhookArgs>(json!({ "webhook_id": u64::MAX }));
        assert_eq!(fields(&found), vec!["webhook_id"]);
        assert_eq!(found[0].expected, "integer");
        assert_eq!(found[0].reason, "got integer out of range");
    }

    #[test]
    fn integral_floats_become_integers() {
        let (args, found) = normalized::<ListPropertiesArgs>(json!({ "limit": 10.0, "id": 3 }));
        assert!(found.is_empty());
        assert_eq!(args, json!({ "limit": 10, "id": 3 }));
        assert!(args["limit"].is_i64());

        let (args, found) = normalized::<UpdateAvailabilitiesArgs>(json!({
            "property_ids": [1.0, 2],
            "available": true,
        }));
        assert!(found.is_empty());
        assert_eq!(args["property_ids"], json!([1, 2]));

        let found = violations::<ListPropertiesArgs>(json!({ "limit": 10.5 }));
        assert_eq!(fields(&found), vec!["limit"]);
    }
}
