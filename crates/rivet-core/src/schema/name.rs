use std_util::str;

/// A name split into its words, so it can be rendered in any case style.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Name {
    pub parts: Vec<String>,
}

impl Name {
    pub fn new(src: &str) -> Self {
        let snake = str::snake_case(src);
        let parts = snake
            .split('_')
            .filter(|part| !part.is_empty())
            .map(String::from)
            .collect();
        Self { parts }
    }

    pub fn upper_camel_case(&self) -> String {
        str::upper_camel_case(&self.snake_case())
    }

    pub fn snake_case(&self) -> String {
        self.parts.join("_")
    }

    pub fn upper_snake_case(&self) -> String {
        str::upper_snake_case(&self.snake_case())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_case_styles() {
        let name = Name::new("OrderLine_customerId");
        assert_eq!(name.snake_case(), "order_line_customer_id");
        assert_eq!(name.upper_snake_case(), "ORDER_LINE_CUSTOMER_ID");
        assert_eq!(name.upper_camel_case(), "OrderLineCustomerId");
    }
}
