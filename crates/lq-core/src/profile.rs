//! User profiles and the partial-update patch applied to them.
//!
//! A profile is created lazily the first time a user id is referenced, by a
//! read or a write. There is no other notion of account.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Error, Result};

/// Banner selected on a freshly created profile.
pub const DEFAULT_BANNER: &str = "default-white";

/// The merged state of a user's profile, including the owned-banner set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
  pub id:              String,
  pub xp:              i64,
  pub selected_banner: String,
  /// Owned banner ids in acquisition order, without duplicates.
  pub owned_banners:   Vec<String>,
}

/// A partial update to a [`UserProfile`]. Every field is independent and
/// `None` means "leave unchanged".
///
/// Fields are applied in declaration order: absolute `xp`, then `xp_delta`
/// on top of it, then `selected_banner`, then `add_banner`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfilePatch {
  pub xp:              Option<i64>,
  pub xp_delta:        Option<i64>,
  /// Selected regardless of whether the banner is owned.
  pub selected_banner: Option<String>,
  /// Added to the owned set; re-adding is a no-op.
  pub add_banner:      Option<String>,
}

impl ProfilePatch {
  /// Parse a raw request body. An empty body is an empty patch.
  pub fn from_json_slice(body: &[u8]) -> Result<Self> {
    if body.iter().all(u8::is_ascii_whitespace) {
      return Ok(Self::default());
    }
    let value: Value = serde_json::from_slice(body)
      .map_err(|e| Error::InvalidInput(format!("body is not valid JSON: {e}")))?;
    Self::from_json(&value)
  }

  /// Validate a loosely-typed JSON object into a patch.
  ///
  /// `null` counts as absent. Integer fields also accept strings holding a
  /// decimal integer. Empty banner strings count as absent. Unknown keys are
  /// ignored.
  pub fn from_json(value: &Value) -> Result<Self> {
    let Value::Object(map) = value else {
      return Err(Error::InvalidInput(
        "profile patch must be a JSON object".to_owned(),
      ));
    };

    Ok(Self {
      xp:              int_field(map, "xp")?,
      xp_delta:        int_field(map, "xp_delta")?,
      selected_banner: banner_field(map, "selected_banner")?,
      add_banner:      banner_field(map, "add_banner")?,
    })
  }
}

fn int_field(map: &Map<String, Value>, key: &str) -> Result<Option<i64>> {
  let parsed = match map.get(key) {
    None | Some(Value::Null) => return Ok(None),
    Some(Value::Number(n)) => n.as_i64(),
    Some(Value::String(s)) => s.trim().parse().ok(),
    Some(_) => None,
  };
  parsed
    .map(Some)
    .ok_or_else(|| Error::InvalidInput(format!("`{key}` must be an integer")))
}

fn banner_field(map: &Map<String, Value>, key: &str) -> Result<Option<String>> {
  match map.get(key) {
    None | Some(Value::Null) => Ok(None),
    Some(Value::String(s)) if s.is_empty() => Ok(None),
    Some(Value::String(s)) => Ok(Some(s.clone())),
    Some(_) => Err(Error::InvalidInput(format!("`{key}` must be a string"))),
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn empty_body_is_empty_patch() {
    let bodies: [&[u8]; 3] = [b"", b"  \n", b"{}"];
    for body in bodies {
      assert_eq!(ProfilePatch::from_json_slice(body).unwrap(), ProfilePatch::default());
    }
  }

  #[test]
  fn all_fields_parse() {
    let patch = ProfilePatch::from_json(&json!({
      "xp": 100,
      "xp_delta": -3,
      "selected_banner": "gold",
      "add_banner": "banner-lvl-2",
      "ignored": true,
    }))
    .unwrap();

    assert_eq!(patch, ProfilePatch {
      xp:              Some(100),
      xp_delta:        Some(-3),
      selected_banner: Some("gold".into()),
      add_banner:      Some("banner-lvl-2".into()),
    });
  }

  #[test]
  fn integer_strings_are_coerced() {
    let patch = ProfilePatch::from_json(&json!({ "xp_delta": " 15 " })).unwrap();
    assert_eq!(patch.xp_delta, Some(15));
  }

  #[test]
  fn nulls_and_empty_banners_are_absent() {
    let patch = ProfilePatch::from_json(&json!({
      "xp": null,
      "selected_banner": "",
      "add_banner": null,
    }))
    .unwrap();
    assert_eq!(patch, ProfilePatch::default());
  }

  #[test]
  fn malformed_delta_is_invalid_input() {
    for bad in [json!("ten"), json!(2.5), json!([1]), json!(true)] {
      let err = ProfilePatch::from_json(&json!({ "xp_delta": bad })).unwrap_err();
      assert!(matches!(err, Error::InvalidInput(ref m) if m.contains("xp_delta")));
    }
  }

  #[test]
  fn non_string_banner_is_invalid_input() {
    let err = ProfilePatch::from_json(&json!({ "add_banner": 7 })).unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
  }

  #[test]
  fn non_object_body_is_invalid_input() {
    assert!(ProfilePatch::from_json_slice(b"[1, 2]").is_err());
    assert!(ProfilePatch::from_json_slice(b"{not json").is_err());
  }
}
