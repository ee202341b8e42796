//! Address domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use waypoint_core::AddressId;

/// A postal address row.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Address {
    /// Unique address ID.
    pub id: AddressId,
    /// Street line, e.g. "350 Fifth Avenue".
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    /// Defaults to "USA" when omitted at creation.
    pub country: String,
    /// Current owner, if one has been assigned.
    pub owner: Option<String>,
    /// Analytics counter, bumped by the view-count operations.
    pub view_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating an address.
#[derive(Debug, Clone, Deserialize)]
pub struct NewAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    /// Falls back to "USA" when absent.
    #[serde(default)]
    pub country: Option<String>,
}

/// Partial update for an address.
///
/// Each field means "provided vs absent": only present fields are written,
/// so a field never gets cleared because a caller left it out.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddressPatch {
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

impl AddressPatch {
    /// True when no field was provided at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.street.is_none()
            && self.city.is_none()
            && self.state.is_none()
            && self.zip_code.is_none()
            && self.country.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_address_country_defaults_to_absent() {
        let payload: NewAddress = serde_json::from_str(
            r#"{"street":"1 Main St","city":"Springfield","state":"IL","zip_code":"62701"}"#,
        )
        .expect("deserialize");
        assert_eq!(payload.country, None);
    }

    #[test]
    fn test_patch_distinguishes_absent_from_provided() {
        let patch: AddressPatch = serde_json::from_str(r#"{"city":"Boston"}"#).expect("deserialize");
        assert_eq!(patch.city.as_deref(), Some("Boston"));
        assert_eq!(patch.street, None);
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_empty_patch() {
        let patch: AddressPatch = serde_json::from_str("{}").expect("deserialize");
        assert!(patch.is_empty());
    }
}
