//! [`Config`]-related definitions.

use std::time::Duration;

use common::{Coordinates, PaymentMethod};
use serde::Deserialize;
use smart_default::SmartDefault;

/// Client configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Config {
    /// Base URL of the REST API, without a trailing slash.
    #[default("http://localhost:8900".to_owned())]
    pub base_url: String,

    /// Point the distance to an estate is measured from.
    #[default(prishtina())]
    pub reference_point: Coordinates,

    /// Delay after which a shown banner clears itself.
    #[default(Duration::from_secs(5))]
    #[serde(with = "humantime_serde")]
    pub banner_delay: Duration,

    /// [`PaymentMethod`] of reservations not choosing one explicitly.
    #[default(PaymentMethod::Cash)]
    pub payment_method: PaymentMethod,
}

/// Returns [`Coordinates`] of Prishtina city center.
fn prishtina() -> Coordinates {
    Coordinates::new(42.662_913_8, 21.165_502_8)
        .unwrap_or_else(|_| unreachable!("valid coordinates"))
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::PaymentMethod;

    use super::Config;

    #[test]
    fn defaults() {
        let config = Config::default();

        assert_eq!(config.base_url, "http://localhost:8900");
        assert_eq!(config.reference_point.latitude(), 42.662_913_8);
        assert_eq!(config.banner_delay, Duration::from_secs(5));
        assert_eq!(config.payment_method, PaymentMethod::Cash);
    }

    #[test]
    fn deserializes_partially() {
        let config: Config = serde_json::from_str(
            r#"{
                "banner_delay": "2s",
                "reference_point": {"latitude": 48.8566, "longitude": 2.3522}
            }"#,
        )
        .unwrap();

        assert_eq!(config.banner_delay, Duration::from_secs(2));
        assert_eq!(config.reference_point.longitude(), 2.3522);
        assert_eq!(config.base_url, "http://localhost:8900");
    }
}
