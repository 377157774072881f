//! Parsing of ingredient lines into an optional leading quantity and the
//! free-text remainder.
//!
//! Both the scaler and the price lookup go through [`IngredientLine::parse`]
//! so that the two never disagree about what counts as a quantity.

use crate::error::SourcingError;

/// An ingredient line split into quantity and remainder.
///
/// `"2 cups flour"` parses to quantity `2.0` and remainder `"cups flour"`.
/// Lines without a leading number keep the full text as the remainder.
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientLine<'a> {
    pub quantity: Option<f64>,
    pub remainder: &'a str,
}

impl<'a> IngredientLine<'a> {
    /// Parse a line, treating anything without a usable leading number as free text
    pub fn parse(line: &'a str) -> Self {
        match split_quantity(line) {
            Some((token, remainder)) => match parse_number(token) {
                Some(quantity) => IngredientLine {
                    quantity: Some(quantity),
                    remainder,
                },
                None => Self::free_text(line),
            },
            None => Self::free_text(line),
        }
    }

    /// Like [`parse`](Self::parse) but rejects a numeric-looking token that is not a number
    pub fn parse_strict(line: &'a str) -> Result<Self, SourcingError> {
        match split_quantity(line) {
            Some((token, remainder)) => {
                let quantity = parse_number(token)
                    .ok_or_else(|| SourcingError::MalformedIngredientLine(line.to_string()))?;
                Ok(IngredientLine {
                    quantity: Some(quantity),
                    remainder,
                })
            }
            None => Ok(Self::free_text(line)),
        }
    }

    fn free_text(line: &'a str) -> Self {
        IngredientLine {
            quantity: None,
            remainder: line,
        }
    }

    /// Render with a new quantity at two decimals; free-text lines are returned as is
    pub fn with_quantity(&self, quantity: f64) -> String {
        match self.quantity {
            Some(_) => format!("{:.2} {}", quantity, self.remainder),
            None => self.remainder.to_string(),
        }
    }
}

/// Ingredient name used for price lookups: the line minus any quantity prefix
pub fn ingredient_name(line: &str) -> &str {
    IngredientLine::parse(line).remainder.trim()
}

/// Names to price for a recipe's ingredient lines, skipping lines that leave no name
pub fn ingredient_names<S: AsRef<str>>(lines: &[S]) -> Vec<&str> {
    lines
        .iter()
        .map(|line| ingredient_name(line.as_ref()))
        .filter(|name| !name.is_empty())
        .collect()
}

/// Split off a leading run of digits, '.' and '/' followed by whitespace and
/// a non-empty remainder.
fn split_quantity(line: &str) -> Option<(&str, &str)> {
    let token_len = line
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '/'))
        .unwrap_or(line.len());
    if token_len == 0 {
        return None;
    }

    let (token, rest) = line.split_at(token_len);
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }

    let remainder = rest.trim_start();
    if remainder.is_empty() {
        return None;
    }
    Some((token, remainder))
}

/// Decimal ("1", "1.5", ".5") or simple fraction ("1/4")
fn parse_number(token: &str) -> Option<f64> {
    let value = match token.split_once('/') {
        Some((numerator, denominator)) => {
            let numerator = parse_decimal(numerator)?;
            let denominator = parse_decimal(denominator)?;
            if denominator == 0.0 {
                return None;
            }
            numerator / denominator
        }
        None => parse_decimal(token)?,
    };
    value.is_finite().then_some(value)
}

fn parse_decimal(token: &str) -> Option<f64> {
    if token.is_empty() || token.contains('/') || !token.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    token.parse::<f64>().ok()
}
