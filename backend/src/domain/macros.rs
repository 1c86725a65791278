//! Helper macros for domain identifier newtypes.

macro_rules! define_entity_id {
    (
        $(#[$outer:meta])*
        $name:ident
    ) => {
        $(#[$outer])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            serde::Serialize,
            serde::Deserialize,
            utoipa::ToSchema,
        )]
        #[serde(transparent)]
        #[schema(value_type = String, format = "uuid")]
        pub struct $name(uuid::Uuid);

        impl $name {
            /// Generate a fresh random identifier.
            pub fn random() -> Self {
                Self(uuid::Uuid::new_v4())
            }

            /// Wrap an existing UUID.
            pub const fn from_uuid(id: uuid::Uuid) -> Self {
                Self(id)
            }

            /// Access the underlying UUID.
            pub const fn as_uuid(&self) -> &uuid::Uuid {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                uuid::Uuid::parse_str(s).map(Self)
            }
        }

        impl From<$name> for uuid::Uuid {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

pub(crate) use define_entity_id;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    define_entity_id! {
        /// Identifier used only by these tests.
        ExampleId
    }

    #[test]
    fn random_ids_are_distinct() {
        assert_ne!(ExampleId::random(), ExampleId::random());
    }

    #[test]
    fn display_round_trips_through_from_str() {
        let id = ExampleId::random();
        let parsed: ExampleId = id.to_string().parse().expect("valid uuid text");
        assert_eq!(parsed, id);
    }

    #[test]
    fn serialises_as_plain_string() {
        let id = ExampleId::random();
        let value = serde_json::to_value(id).expect("serialise");
        assert_eq!(value, serde_json::Value::String(id.to_string()));
    }
}
