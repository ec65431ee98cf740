//! Directive vocabulary recognized inside fixture payloads.
//!
//! A directive is a property of `response.data` whose key is the chain's
//! prefix followed by the directive name, e.g. `$delay` with the default `$`.
//!
//! # Stock Directives
//!
//! - `delay` - Advisory latency in ms (fixed or `{min, max}` range)
//! - `status` - Override status code and/or text
//! - `timeout` - Simulate a connection timeout
//! - `switch` / `case` / `default` - Pick a payload by request parameter
//! - `arrayPath` - Locate the array the `array*` directives work on
//! - `arrayFilter` / `arraySort` / `arrayWhenEmpty` / `arrayItem` - Collection logic
//! - `data` - Replace the payload and re-run the chain (always evaluated last)

use serde_json::Value;
use std::fmt;

/// Default prefix for directive keys
pub const DEFAULT_PREFIX: &str = "$";

/// A reserved directive name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Directive {
    Delay,
    Status,
    Timeout,
    Switch,
    Case,
    Default,
    Data,
    ArrayFilter,
    ArrayPath,
    ArraySort,
    ArrayWhenEmpty,
    ArrayItem,
    /// A directive contributed by a user-registered filter
    Custom(String),
}

impl Directive {
    pub fn name(&self) -> &str {
        match self {
            Directive::Delay => "delay",
            Directive::Status => "status",
            Directive::Timeout => "timeout",
            Directive::Switch => "switch",
            Directive::Case => "case",
            Directive::Default => "default",
            Directive::Data => "data",
            Directive::ArrayFilter => "arrayFilter",
            Directive::ArrayPath => "arrayPath",
            Directive::ArraySort => "arraySort",
            Directive::ArrayWhenEmpty => "arrayWhenEmpty",
            Directive::ArrayItem => "arrayItem",
            Directive::Custom(name) => name,
        }
    }

    /// Resolve a name to a stock directive; unknown names become `Custom`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "delay" => Directive::Delay,
            "status" => Directive::Status,
            "timeout" => Directive::Timeout,
            "switch" => Directive::Switch,
            "case" => Directive::Case,
            "default" => Directive::Default,
            "data" => Directive::Data,
            "arrayFilter" => Directive::ArrayFilter,
            "arrayPath" => Directive::ArrayPath,
            "arraySort" => Directive::ArraySort,
            "arrayWhenEmpty" => Directive::ArrayWhenEmpty,
            "arrayItem" => Directive::ArrayItem,
            other => Directive::Custom(other.to_string()),
        }
    }

    /// The full property key under the given prefix.
    pub fn key(&self, prefix: &str) -> String {
        format!("{prefix}{}", self.name())
    }

    /// Exact-key lookup of this directive in a payload.
    ///
    /// Only objects carry directives; arrays and scalars never match.
    pub fn lookup<'a>(&self, prefix: &str, data: &'a Value) -> Option<&'a Value> {
        data.as_object()?.get(&self.key(prefix))
    }
}

impl From<&str> for Directive {
    fn from(name: &str) -> Self {
        Directive::from_name(name)
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// JSON truthiness: `false`, `0`, `""` and `null` are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Coerce a scalar to the string form used for key matching and comparisons.
///
/// Integral floats render without a fraction, so `1.0` keys as `"1"`.
pub fn scalar_key(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.is_f64() => Some(number_key(n)),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Largest magnitude at which every integer is exactly representable as f64.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

fn number_key(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER => (f as i64).to_string(),
        _ => n.to_string(),
    }
}
