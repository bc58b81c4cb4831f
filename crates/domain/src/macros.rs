//! Macro for implementing Display and FromStr for status enums
//!
//! Status-like enums (event types, lifecycle phases) need a stable string
//! form for log fields and a forgiving parser for configuration and tests.
//! This macro provides both from a single variant table.
//!
//! # Example
//!
//! ```rust
//! use negsync_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Health {
//!     Healthy,
//!     Degraded,
//! }
//!
//! impl_domain_status_conversions!(Health {
//!     Healthy => "Healthy",
//!     Degraded => "Degraded",
//! });
//!
//! assert_eq!(Health::Degraded.to_string(), "Degraded");
//! assert_eq!("healthy".parse::<Health>().unwrap(), Health::Healthy);
//! ```

/// Implements Display and FromStr traits for status enums
///
/// This macro generates:
/// - Display trait: writes the mapped string verbatim
/// - FromStr trait: matches the mapped strings ignoring ASCII case
///
/// # Arguments
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $str` - Mapping of enum variants to their string
///   representations
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $(
                    if s.eq_ignore_ascii_case($str) {
                        return Ok(Self::$variant);
                    }
                )+
                Err(format!("Invalid {}: {}", stringify!($enum_name), s))
            }
        }
    };
}
