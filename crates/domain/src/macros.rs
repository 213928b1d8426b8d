//! Macro for implementing Display and FromStr for wire-name enums
//!
//! Protocol enums (sign types, wire formats, transport profiles) travel as
//! fixed strings. This macro generates both directions from a single mapping.
//! Parsing is ASCII case-insensitive; printing always uses the canonical
//! spelling.
//!
//! # Example
//!
//! ```rust
//! use paybridge_domain::impl_wire_name_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Channel {
//!     Card,
//!     Wallet,
//! }
//!
//! impl_wire_name_conversions!(Channel {
//!     Card => "CARD",
//!     Wallet => "WALLET",
//! });
//!
//! assert_eq!(Channel::Card.to_string(), "CARD");
//! assert_eq!("wallet".parse::<Channel>().unwrap(), Channel::Wallet);
//! ```

/// Implements Display and FromStr for enums with a fixed wire spelling
#[macro_export]
macro_rules! impl_wire_name_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Canonical wire spelling.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl ::std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                $(if s.eq_ignore_ascii_case($str) {
                    return Ok(Self::$variant);
                })+
                Err(format!("Invalid {}: {}", stringify!($enum_name), s))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum TestKind {
        Plain,
        Hashed,
    }

    impl_wire_name_conversions!(TestKind {
        Plain => "PLAIN",
        Hashed => "HMAC-SHA256",
    });

    #[test]
    fn test_display_uses_canonical_spelling() {
        assert_eq!(TestKind::Plain.to_string(), "PLAIN");
        assert_eq!(TestKind::Hashed.to_string(), "HMAC-SHA256");
    }

    #[test]
    fn test_fromstr_is_case_insensitive() {
        assert_eq!(TestKind::from_str("plain").unwrap(), TestKind::Plain);
        assert_eq!(TestKind::from_str("hmac-sha256").unwrap(), TestKind::Hashed);
    }

    #[test]
    fn test_fromstr_invalid() {
        let result = TestKind::from_str("sha512");
        assert!(result.unwrap_err().contains("Invalid TestKind: sha512"));
        assert!(TestKind::from_str("").is_err());
    }
}
