//! Serialize [`Duration`] fields as fractional hours.
//!
//! Logs and summaries are read by people and by rendering code that thinks
//! in hours, so the wire format uses plain numbers such as `10.5`.

use std::time::Duration;

use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

use crate::rules::{as_hours, hours};

pub(crate) fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_f64(as_hours(*duration))
}

pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    hours(value).ok_or_else(|| D::Error::custom(format!("invalid hour value {value}")))
}

pub(crate) mod option {
    use super::{Deserialize, Deserializer, Duration, Serializer, as_hours, hours};
    use serde::de::Error as _;

    #[expect(
        clippy::ref_option,
        reason = "serde's `with` attribute passes the field by reference"
    )]
    pub(crate) fn serialize<S>(duration: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match duration {
            Some(value) => serializer.serialize_some(&as_hours(*value)),
            None => serializer.serialize_none(),
        }
    }

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<f64>::deserialize(deserializer)?
            .map(|value| {
                hours(value).ok_or_else(|| D::Error::custom(format!("invalid hour value {value}")))
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        #[serde(with = "crate::serde_hours")]
        span: Duration,
        #[serde(with = "crate::serde_hours::option", default)]
        extra: Option<Duration>,
    }

    #[test]
    fn durations_are_written_as_hours() {
        let sample = Sample {
            span: Duration::from_secs(5_400),
            extra: None,
        };
        let json = serde_json::to_string(&sample).expect("serialise");
        assert_eq!(json, r#"{"span":1.5,"extra":null}"#);
        let back: Sample = serde_json::from_str(&json).expect("deserialise");
        assert_eq!(back, sample);
    }

    #[test]
    fn negative_hours_are_rejected() {
        let result: Result<Sample, _> = serde_json::from_str(r#"{"span":-1.0}"#);
        assert!(result.is_err());
    }
}
