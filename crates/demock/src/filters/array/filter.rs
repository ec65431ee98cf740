//! `$arrayFilter` - keep the elements matching request parameters.

use super::target_array;
use crate::directive::{scalar_key, Directive};
use crate::error::{DemockError, Result};
use crate::filter::{FilterContext, Flow, ResponseFilter};
use crate::model::Response;
use serde_json::Value;
use std::cmp::Ordering;
use tracing::debug;

/// How a parameter is compared against an element property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    /// `=` - string equality
    Equals,
    /// `<=` - property is at most the parameter
    AtMost,
    /// `>=` - property is at least the parameter
    AtLeast,
    /// `]` - the array-valued property contains the parameter
    Contains,
}

impl Comparator {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "=" => Some(Comparator::Equals),
            "<=" => Some(Comparator::AtMost),
            ">=" => Some(Comparator::AtLeast),
            "]" => Some(Comparator::Contains),
            _ => None,
        }
    }

    /// Does `property <op> param` hold?
    pub fn holds(&self, property: &Value, param: &Value) -> bool {
        match self {
            Comparator::Equals => match (scalar_key(property), scalar_key(param)) {
                (Some(property), Some(param)) => property == param,
                _ => false,
            },
            Comparator::AtMost => {
                matches!(compare(property, param), Some(Ordering::Less | Ordering::Equal))
            }
            Comparator::AtLeast => matches!(
                compare(property, param),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            Comparator::Contains => match (property.as_array(), scalar_key(param)) {
                (Some(items), Some(param)) => items
                    .iter()
                    .any(|item| scalar_key(item).as_deref() == Some(param.as_str())),
                _ => false,
            },
        }
    }
}

/// Numeric when both sides read as numbers, otherwise by string.
fn compare(left: &Value, right: &Value) -> Option<Ordering> {
    let left = scalar_key(left)?;
    let right = scalar_key(right)?;
    match (left.trim().parse::<f64>(), right.trim().parse::<f64>()) {
        (Ok(l), Ok(r)) => l.partial_cmp(&r),
        _ => Some(left.cmp(&right)),
    }
}

/// One parsed `param: "<token> [property]"` entry.
#[derive(Debug, Clone, PartialEq)]
struct Criterion {
    param: String,
    property: String,
    comparator: Comparator,
}

impl Criterion {
    fn parse(param: &str, spec: &Value) -> Result<Self> {
        let invalid = || DemockError::InvalidComparator {
            param: param.to_string(),
            spec: spec.to_string(),
        };

        let text = spec.as_str().ok_or_else(invalid)?;
        let mut parts = text.split_whitespace();
        let comparator = parts
            .next()
            .and_then(Comparator::from_token)
            .ok_or_else(invalid)?;
        let property = parts.next().unwrap_or(param).to_string();
        if parts.next().is_some() {
            return Err(invalid());
        }

        Ok(Self {
            param: param.to_string(),
            property,
            comparator,
        })
    }
}

fn parse_criteria(arg: &Value) -> Result<Vec<Criterion>> {
    let specs = arg
        .as_object()
        .ok_or_else(|| DemockError::InvalidArrayFilter(arg.to_string()))?;
    specs
        .iter()
        .map(|(param, spec)| Criterion::parse(param, spec))
        .collect()
}

/// Filters the target array by the comparators in `$arrayFilter`.
///
/// Only parameters present in the request take part. A malformed comparator
/// is an error even when there is no array to filter.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayFilter;

impl ResponseFilter for ArrayFilter {
    fn directive(&self) -> Option<Directive> {
        Some(Directive::ArrayFilter)
    }

    fn filter_response(
        &self,
        ctx: &FilterContext<'_>,
        response: &mut Response,
        arg: &Value,
    ) -> Result<Flow> {
        let criteria = parse_criteria(arg)?;
        let active: Vec<(&Criterion, &Value)> = criteria
            .iter()
            .filter_map(|c| ctx.request.param(&c.param).map(|value| (c, value)))
            .collect();
        if active.is_empty() {
            return Ok(Flow::Continue);
        }

        let Some(items) = response.data.as_mut().and_then(|data| target_array(ctx, data)) else {
            return Ok(Flow::Continue);
        };

        let before = items.len();
        items.retain(|item| {
            active.iter().all(|(criterion, param)| {
                item.get(&criterion.property)
                    .map(|property| criterion.comparator.holds(property, param))
                    .unwrap_or(false)
            })
        });
        debug!(before, after = items.len(), "Applied $arrayFilter");
        Ok(Flow::Continue)
    }
}
