//! Station and line code types.

use std::fmt;

macro_rules! entity_code {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(String);

        impl $name {
            pub fn new(code: impl Into<String>) -> Self {
                Self(code.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Case-insensitive comparison, the way the API treats codes.
            pub fn matches(&self, other: &str) -> bool {
                self.0.eq_ignore_ascii_case(other)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(code: &str) -> Self {
                Self::new(code)
            }
        }

        impl From<String> for $name {
            fn from(code: String) -> Self {
                Self(code)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

entity_code!(
    /// A station identifier, two characters in practice (`NY`, `PJ`, `17`).
    ///
    /// Codes are not validated: the API occasionally reports codes that are
    /// missing from the station table, and those still need to round-trip.
    ///
    /// # Examples
    ///
    /// ```
    /// use raildata::domain::StationCode;
    ///
    /// let ny = StationCode::new("NY");
    /// assert_eq!(ny.as_str(), "NY");
    /// assert!(ny.matches("ny"));
    /// ```
    StationCode
);

entity_code!(
    /// A line identifier such as `NE` (Northeast Corridor) or `RV`.
    LineCode
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_debug() {
        let code = StationCode::new("PJ");
        assert_eq!(code.to_string(), "PJ");
        assert_eq!(format!("{code:?}"), "StationCode(PJ)");
        assert_eq!(format!("{:?}", LineCode::from("NE")), "LineCode(NE)");
    }

    #[test]
    fn matches_ignores_case() {
        let code = LineCode::new("Rv");
        assert!(code.matches("RV"));
        assert!(code.matches("rv"));
        assert!(!code.matches("RA"));
    }

    #[test]
    fn equality_is_exact() {
        assert_eq!(StationCode::new("NY"), StationCode::from("NY".to_string()));
        assert_ne!(StationCode::new("NY"), StationCode::new("ny"));
    }
}
