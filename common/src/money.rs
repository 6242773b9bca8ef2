//! [`Money`]-related definitions.

use std::{fmt, str::FromStr};

use rust_decimal::{prelude::ToPrimitive as _, Decimal};

use crate::define_kind;

/// Amount of money in some [`Currency`].
///
/// Its string form is `{amount}{currency}`, like `450EUR` or `99.90USD`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Money {
    /// Amount of this [`Money`].
    pub amount: Decimal,

    /// [`Currency`] of this amount.
    pub currency: Currency,
}

impl Money {
    /// Creates a new [`Money`] amount in [`Currency::Eur`].
    #[must_use]
    pub fn eur(amount: impl Into<Decimal>) -> Self {
        Self {
            amount: amount.into(),
            currency: Currency::Eur,
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { amount, currency } = self;
        match amount.is_integer().then(|| amount.to_i128()).flatten() {
            Some(whole) => write!(f, "{whole}{currency}"),
            None => write!(f, "{amount}{currency}"),
        }
    }
}

impl FromStr for Money {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() < 4 || !s.is_char_boundary(s.len() - 3) {
            return Err("too short");
        }

        let (amount, currency) = s.split_at(s.len() - 3);
        let amount = Decimal::from_str(amount).map_err(|_| "invalid amount")?;
        let currency =
            Currency::from_str(currency).map_err(|_| "invalid currency")?;

        Ok(Self { amount, currency })
    }
}

define_kind! {
    #[doc = "Currency of a [`Money`] amount."]
    enum Currency {
        #[doc = "US Dollar."]
        Usd = 1,

        #[doc = "Euro."]
        Eur = 2,
    }
}

#[cfg(feature = "serde")]
mod serde {
    //! Module providing integration with [`serde`] crate.

    use std::borrow::Cow;

    use serde::{de::Error, Deserialize, Deserializer, Serialize, Serializer};

    use super::Money;

    impl Serialize for Money {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.collect_str(self)
        }
    }

    impl<'de> Deserialize<'de> for Money {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            Cow::<'de, str>::deserialize(deserializer)?
                .parse()
                .map_err(Error::custom)
        }
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::{Currency, Money};

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn from_str() {
        assert_eq!(
            Money::from_str("450EUR").unwrap(),
            Money::eur(decimal("450")),
        );
        assert_eq!(
            Money::from_str("99.90USD").unwrap(),
            Money {
                amount: decimal("99.90"),
                currency: Currency::Usd,
            },
        );
        assert_eq!(
            Money::from_str("12eur").unwrap().currency,
            Currency::Eur,
        );

        assert!(Money::from_str("450").is_err());
        assert!(Money::from_str("450€").is_err());
        assert!(Money::from_str("450EU").is_err());
        assert!(Money::from_str("450Euros").is_err());
        assert!(Money::from_str("abcEUR").is_err());
    }

    #[test]
    fn to_string() {
        assert_eq!(Money::eur(decimal("450.00")).to_string(), "450EUR");
        assert_eq!(Money::eur(decimal("450")).to_string(), "450EUR");
        assert_eq!(
            Money {
                amount: decimal("99.90"),
                currency: Currency::Usd,
            }
            .to_string(),
            "99.90USD",
        );
    }
}
