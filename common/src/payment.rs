//! Payment-related definitions.

use crate::define_kind;

define_kind! {
    #[doc = "Method of paying for a reservation."]
    enum PaymentMethod {
        #[doc = "Cash paid on arrival."]
        Cash = 1,

        #[doc = "Bank card."]
        Card = 2,
    }
}

#[cfg(test)]
mod spec {
    use super::PaymentMethod;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Cash".parse(), Ok(PaymentMethod::Cash));
        assert_eq!("CARD".parse(), Ok(PaymentMethod::Card));
        assert!("Cheque".parse::<PaymentMethod>().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_as_string() {
        let json = serde_json::to_string(&PaymentMethod::Cash).unwrap();
        assert_eq!(json, r#""CASH""#);

        let method: PaymentMethod = serde_json::from_str(r#""Card""#).unwrap();
        assert_eq!(method, PaymentMethod::Card);
    }
}
