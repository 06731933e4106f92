//! Brand campaign endpoints.

use serde_json::Value;
use wavy_core::{Campaign, Credential, NewCampaign};

use crate::client::{decode, ApiClient};
use crate::error::ClientError;
use crate::token::auth_headers;

/// Header telling the backend whether to pick soft-matching flags itself.
pub const AUTOMATIC_SOFTMATCHING_HEADER: &str = "automatic-softmatching";

impl ApiClient {
    /// Lists the brand's campaigns.
    ///
    /// The backend answers with `{ "campaigns": [...] }`, `{ "campaign": {...} }`
    /// style bodies where `campaigns` is a single object, or a bare campaign
    /// object. All shapes are flattened into a list; see
    /// [`normalize_campaigns`].
    ///
    /// # Errors
    ///
    /// - [`ClientError::Unauthorized`] on HTTP 401.
    /// - [`ClientError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::Deserialize`] if the body is not JSON.
    pub async fn list_campaigns(&self, token: &Credential) -> Result<Vec<Campaign>, ClientError> {
        let body: Value = self
            .get_json(&self.paths().campaigns, Some(token), "campaigns")
            .await?;
        Ok(normalize_campaigns(body))
    }

    /// Creates a campaign.
    ///
    /// Returns the created campaign when the backend echoes one back, either
    /// under a `campaign` field or as the whole body.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Unauthorized`] on HTTP 401.
    /// - [`ClientError::UnexpectedStatus`] on any other non-2xx status, with
    ///   the response text in `body`.
    /// - [`ClientError::Http`] on network failure.
    pub async fn create_campaign(
        &self,
        token: &Credential,
        campaign: &NewCampaign,
    ) -> Result<Option<Campaign>, ClientError> {
        let url = self.endpoint(&self.paths().campaigns)?;
        let request = self
            .client
            .post(url.clone())
            .headers(auth_headers(Some(token)))
            .header(AUTOMATIC_SOFTMATCHING_HEADER, campaign.soft_matching_header())
            .json(&campaign.to_body());
        let response = self.send(request, &url).await?;
        let text = response.text().await?;

        if text.trim().is_empty() {
            return Ok(None);
        }
        let body: Value = match decode(&text, "created campaign") {
            Ok(body) => body,
            Err(e) => {
                tracing::debug!(error = %e, "create campaign response is not JSON; ignoring body");
                return Ok(None);
            }
        };
        Ok(created_campaign(body))
    }
}

/// Flattens the campaign list response into a list.
///
/// - `campaigns` holding an array yields its entries.
/// - `campaigns` holding an object yields that one campaign.
/// - No `campaigns` field but a top-level object with a `name` yields the
///   body itself.
/// - Anything else yields an empty list.
///
/// Entries that are not campaign objects are skipped.
#[must_use]
pub fn normalize_campaigns(body: Value) -> Vec<Campaign> {
    let Value::Object(mut map) = body else {
        tracing::warn!("campaign response is not an object; showing no campaigns");
        return Vec::new();
    };

    match map.remove("campaigns") {
        Some(Value::Array(entries)) => entries.into_iter().filter_map(parse_campaign).collect(),
        Some(single @ Value::Object(_)) => parse_campaign(single).into_iter().collect(),
        Some(Value::Null) | None if map.contains_key("name") => {
            parse_campaign(Value::Object(map)).into_iter().collect()
        }
        Some(Value::Null) | None => Vec::new(),
        Some(other) => {
            tracing::warn!(kind = json_kind(&other), "unexpected campaigns field; showing no campaigns");
            Vec::new()
        }
    }
}

fn created_campaign(body: Value) -> Option<Campaign> {
    match body {
        Value::Object(mut map) => match map.remove("campaign") {
            Some(inner @ Value::Object(_)) => parse_campaign(inner),
            _ => parse_campaign(Value::Object(map)),
        },
        _ => None,
    }
}

fn parse_campaign(value: Value) -> Option<Campaign> {
    if !value.is_object() {
        tracing::warn!(kind = json_kind(&value), "skipping campaign entry that is not an object");
        return None;
    }
    match serde_json::from_value(value) {
        Ok(campaign) => Some(campaign),
        Err(e) => {
            tracing::warn!(error = %e, "skipping malformed campaign entry");
            None
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn names(campaigns: &[Campaign]) -> Vec<&str> {
        campaigns.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn array_field_yields_entries_in_order() {
        let body = json!({ "campaigns": [
            { "id": 1, "name": "Spring" },
            { "id": 2, "name": "Summer" },
        ]});
        assert_eq!(names(&normalize_campaigns(body)), vec!["Spring", "Summer"]);
    }

    #[test]
    fn object_field_yields_single_campaign() {
        let body = json!({ "campaigns": { "id": "c-9", "name": "Launch" } });
        let list = normalize_campaigns(body);
        assert_eq!(names(&list), vec!["Launch"]);
        assert_eq!(list[0].id_string().as_deref(), Some("c-9"));
    }

    #[test]
    fn bare_campaign_object_is_accepted() {
        let body = json!({ "id": 4, "name": "Solo", "description": "one-off" });
        assert_eq!(names(&normalize_campaigns(body)), vec!["Solo"]);
    }

    #[test]
    fn unrecognised_shapes_yield_empty_list() {
        assert!(normalize_campaigns(json!({})).is_empty());
        assert!(normalize_campaigns(json!({ "campaigns": null })).is_empty());
        assert!(normalize_campaigns(json!({ "campaigns": "nope" })).is_empty());
        assert!(normalize_campaigns(json!([{ "name": "top-level array" }])).is_empty());
        assert!(normalize_campaigns(json!("text")).is_empty());
    }

    #[test]
    fn non_object_entries_are_skipped() {
        let body = json!({ "campaigns": [ { "name": "Kept" }, 7, "junk", null ] });
        assert_eq!(names(&normalize_campaigns(body)), vec!["Kept"]);
    }

    #[test]
    fn created_campaign_prefers_nested_field() {
        let body = json!({ "ok": true, "campaign": { "id": 3, "name": "Nested" } });
        assert_eq!(created_campaign(body).map(|c| c.name), Some("Nested".to_owned()));

        let flat = json!({ "id": 5, "name": "Flat" });
        assert_eq!(created_campaign(flat).map(|c| c.name), Some("Flat".to_owned()));

        assert!(created_campaign(json!([1, 2])).is_none());
    }
}
