use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use serde::de::{self, SeqAccess, Visitor};

/// Cross-origin settings for the study pages calling the gateway
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorsConfig {
    /// Allowed origins
    #[serde(default)]
    pub origins: Allowed,
    /// Allowed HTTP methods
    #[serde(default)]
    pub methods: Allowed,
    /// Allowed request headers
    #[serde(default)]
    pub headers: Allowed,
    /// Allow credentials (cookies, auth headers)
    #[serde(default)]
    pub credentials: bool,
    /// Preflight cache lifetime in seconds
    #[serde(default)]
    pub max_age: Option<u64>,
}

impl CorsConfig {
    /// Preflight cache lifetime as a `Duration`
    pub fn max_age_duration(&self) -> Option<Duration> {
        self.max_age.map(Duration::from_secs)
    }
}

/// Either the wildcard `"*"` or an explicit list of values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Allowed {
    /// Any value is accepted
    #[default]
    Any,
    /// Only the listed values are accepted
    Only(Vec<String>),
}

impl<'de> Deserialize<'de> for Allowed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct AllowedVisitor;

        impl<'de> Visitor<'de> for AllowedVisitor {
            type Value = Allowed;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("\"*\", a string, or an array of strings")
            }

            fn visit_str<E>(self, value: &str) -> Result<Allowed, E>
            where
                E: de::Error,
            {
                Ok(if value == "*" {
                    Allowed::Any
                } else {
                    Allowed::Only(vec![value.to_owned()])
                })
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Allowed, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut values = Vec::new();
                while let Some(value) = seq.next_element::<String>()? {
                    // A wildcard anywhere in the list widens it to everything
                    if value == "*" {
                        return Ok(Allowed::Any);
                    }
                    values.push(value);
                }
                Ok(Allowed::Only(values))
            }
        }

        deserializer.deserialize_any(AllowedVisitor)
    }
}
