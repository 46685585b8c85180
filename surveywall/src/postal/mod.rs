//! Postal-code resolution: explicit value, cached value, or geolocation.

mod resolver;

pub use resolver::{
    PostalCodeResolver, DEFAULT_COUNTRY, POSTAL_CODE_CACHE_KEY, POSTAL_CODE_MAX_AGE,
};
