use std::fmt;

use serde::{Deserialize, Serialize};

/// Number kind served by the upstream provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Prime,
    Fibonacci,
    Even,
    Random,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Prime,
        Category::Fibonacci,
        Category::Even,
        Category::Random,
    ];

    /// Map a short request code (`p`, `f`, `e`, `r`) to its category.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "p" => Some(Category::Prime),
            "f" => Some(Category::Fibonacci),
            "e" => Some(Category::Even),
            "r" => Some(Category::Random),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Prime => "prime",
            Category::Fibonacci => "fibonacci",
            Category::Even => "even",
            Category::Random => "random",
        }
    }

    /// Path segment of the upstream endpoint serving this category.
    pub fn upstream_path(&self) -> &'static str {
        match self {
            Category::Prime => "primes",
            Category::Fibonacci => "fibo",
            Category::Even => "even",
            Category::Random => "rand",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(Category::from_code("p"), Some(Category::Prime));
        assert_eq!(Category::from_code("f"), Some(Category::Fibonacci));
        assert_eq!(Category::from_code("e"), Some(Category::Even));
        assert_eq!(Category::from_code("r"), Some(Category::Random));

        assert_eq!(Category::from_code("x"), None);
        assert_eq!(Category::from_code(""), None);
        assert_eq!(Category::from_code("P"), None); // codes are case-sensitive
        assert_eq!(Category::from_code("prime"), None);
    }

    #[test]
    fn test_every_category_has_a_code() {
        let mapped: Vec<Category> = ["p", "f", "e", "r"]
            .iter()
            .filter_map(|code| Category::from_code(code))
            .collect();
        assert_eq!(mapped, Category::ALL);
    }

    #[test]
    fn test_serialized_name() {
        let json = serde_json::to_string(&Category::Fibonacci).unwrap();
        assert_eq!(json, "\"fibonacci\"");
    }
}
