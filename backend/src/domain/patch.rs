//! Tri-state field updates for sparse merges.
//!
//! JSON partial updates distinguish a field that is absent (keep the stored
//! value), explicitly `null` (clear it), and present with a value (replace
//! it). `Option<T>` collapses the first two, so nullable columns use this
//! explicit type instead.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Update instruction for a single nullable field.
///
/// # Examples
/// ```
/// use backend::domain::FieldPatch;
///
/// #[derive(serde::Deserialize)]
/// struct Patch {
///     #[serde(default)]
///     location: FieldPatch<String>,
/// }
///
/// let absent: Patch = serde_json::from_str("{}").unwrap();
/// assert_eq!(absent.location, FieldPatch::Keep);
///
/// let cleared: Patch = serde_json::from_str(r#"{"location":null}"#).unwrap();
/// assert_eq!(cleared.location, FieldPatch::Clear);
///
/// let set: Patch = serde_json::from_str(r#"{"location":"Penang"}"#).unwrap();
/// assert_eq!(set.location, FieldPatch::Set("Penang".to_owned()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldPatch<T> {
    /// Field absent from the input; the stored value is retained.
    #[default]
    Keep,
    /// Field explicitly set to `null`; the stored value is cleared.
    Clear,
    /// Field present with a replacement value.
    Set(T),
}

impl<T> FieldPatch<T> {
    /// True when the field was absent from the input.
    pub const fn is_keep(&self) -> bool {
        matches!(self, Self::Keep)
    }

    /// Borrow the replacement value, if one was supplied.
    pub const fn set_value(&self) -> Option<&T> {
        match self {
            Self::Set(value) => Some(value),
            Self::Keep | Self::Clear => None,
        }
    }

    /// Convert into the nested-option shape used by changesets:
    /// `None` keeps, `Some(None)` clears, `Some(Some(v))` replaces.
    pub fn into_nested_option(self) -> Option<Option<T>> {
        match self {
            Self::Keep => None,
            Self::Clear => Some(None),
            Self::Set(value) => Some(Some(value)),
        }
    }

    /// Resolve the patch against the currently stored value.
    pub fn resolve(self, current: Option<T>) -> Option<T> {
        match self {
            Self::Keep => current,
            Self::Clear => None,
            Self::Set(value) => Some(value),
        }
    }
}

impl<'de, T> Deserialize<'de> for FieldPatch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Absence never reaches this impl; containers mark the field
        // `#[serde(default)]` so missing keys become `Keep`.
        Option::<T>::deserialize(deserializer).map(|value| match value {
            Some(inner) => Self::Set(inner),
            None => Self::Clear,
        })
    }
}

impl<T> Serialize for FieldPatch<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Set(value) => serializer.serialize_some(value),
            Self::Keep | Self::Clear => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use super::*;

    #[test]
    fn resolve_honours_each_instruction() {
        let current = Some("kept".to_owned());
        assert_eq!(
            FieldPatch::Keep.resolve(current.clone()),
            Some("kept".to_owned())
        );
        assert_eq!(FieldPatch::<String>::Clear.resolve(current.clone()), None);
        assert_eq!(
            FieldPatch::Set("new".to_owned()).resolve(current),
            Some("new".to_owned())
        );
    }

    #[test]
    fn nested_option_shape_matches_changeset_contract() {
        assert_eq!(FieldPatch::<u8>::Keep.into_nested_option(), None);
        assert_eq!(FieldPatch::<u8>::Clear.into_nested_option(), Some(None));
        assert_eq!(FieldPatch::Set(7_u8).into_nested_option(), Some(Some(7)));
    }

    #[test]
    fn default_is_keep() {
        assert!(FieldPatch::<String>::default().is_keep());
    }
}
