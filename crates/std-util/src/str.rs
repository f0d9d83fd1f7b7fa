//! Case conversions for identifiers. Underscores and case changes both
//! start a new word, so `OrderLine_customerId` splits into
//! `order`, `line`, `customer`, `id`.

use heck::{ToLowerCamelCase, ToShoutySnakeCase, ToSnakeCase, ToUpperCamelCase};

pub fn snake_case(name: &str) -> String {
    name.to_snake_case()
}

pub fn upper_snake_case(name: &str) -> String {
    name.to_shouty_snake_case()
}

pub fn upper_camel_case(name: &str) -> String {
    name.to_upper_camel_case()
}

pub fn camel_case(name: &str) -> String {
    name.to_lower_camel_case()
}
