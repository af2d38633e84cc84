use crate::error::{DispatchError, LookupDomain};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Known decorating ingredients.
///
/// `Decoration::wrap` accepts any label; this enum is the recognized set used
/// when labels arrive as strings and must be checked.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Ingredient {
    Carmel,
    Milk,
    Sugar,
}

impl Ingredient {
    pub const ALL: [Ingredient; 3] = [Ingredient::Carmel, Ingredient::Milk, Ingredient::Sugar];

    pub fn as_str(&self) -> &'static str {
        match self {
            Ingredient::Carmel => "carmel",
            Ingredient::Milk => "milk",
            Ingredient::Sugar => "sugar",
        }
    }
}

impl TryFrom<&str> for Ingredient {
    type Error = DispatchError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "carmel" => Ok(Ingredient::Carmel),
            "milk" => Ok(Ingredient::Milk),
            "sugar" => Ok(Ingredient::Sugar),
            other => Err(DispatchError::unknown(LookupDomain::Ingredient, other)),
        }
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Ingredient {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Ingredient {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ingredient::try_from(value.as_str()).map_err(serde::de::Error::custom)
    }
}

/// Parse every label, failing on the first one outside the recognized set.
pub fn parse_ingredients<'a, I>(labels: I) -> Result<Vec<Ingredient>, DispatchError>
where
    I: IntoIterator<Item = &'a str>,
{
    labels.into_iter().map(Ingredient::try_from).collect()
}
