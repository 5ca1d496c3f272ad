use crate::{CronError, Result};
use std::{collections::BTreeSet, fmt::Display};

pub(crate) type FieldValueType = u16;

/// One of the five schedule dimensions, with its own valid value range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldKind {
    /// Minute of the hour, `0-59`.
    Minute,
    /// Hour of the day, `0-23`.
    Hour,
    /// Day of the month, `1-31`.
    DayOfMonth,
    /// Month of the year, `1-12`.
    Month,
    /// Day of the week, `0-6`, `0` is Sunday.
    DayOfWeek,
}

impl FieldKind {
    /// Positional order of the mandatory fields in a schedule expression.
    pub(crate) const ALL: [Self; 5] = [
        Self::Minute,
        Self::Hour,
        Self::DayOfMonth,
        Self::Month,
        Self::DayOfWeek,
    ];

    pub(crate) fn min_max(&self) -> (FieldValueType, FieldValueType) {
        match self {
            Self::Minute => (0, 59),
            Self::Hour => (0, 23),
            Self::DayOfMonth => (1, 31),
            Self::Month => (1, 12),
            Self::DayOfWeek => (0, 6),
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        match self {
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::DayOfMonth => "day-of-month",
            Self::Month => "month",
            Self::DayOfWeek => "day-of-week",
        }
    }
}

impl Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Parsed constraint of a single field.
///
/// Either the field is unconstrained (`*`), or it carries the fully expanded,
/// ascending, de-duplicated set of concrete values. Sub-token classification is
/// resolved here once; no raw string ever reaches the calculator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) enum FieldSpec {
    Unconstrained,
    Set(Vec<FieldValueType>),
}

/// A schedule field: its kind plus the parsed constraint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct Field {
    kind: FieldKind,
    spec: FieldSpec,
}

/// Lexical shape of a single comma-list element.
enum SubToken {
    Value(FieldValueType),
    Step(FieldValueType),
    Range(FieldValueType, FieldValueType),
    Invalid,
}

fn classify(token: &str) -> SubToken {
    if let Ok(value) = token.parse::<FieldValueType>() {
        return SubToken::Value(value);
    }

    if let Some((base, step)) = token.split_once('/') {
        let base_is_valid = base == "*" || base.parse::<FieldValueType>().is_ok();
        if let Ok(step) = step.parse::<FieldValueType>() {
            if base_is_valid && step > 0 {
                return SubToken::Step(step);
            }
        }
        return SubToken::Invalid;
    }

    if let Some((start, end)) = token.split_once('-') {
        if let (Ok(start), Ok(end)) = (start.parse::<FieldValueType>(), end.parse::<FieldValueType>()) {
            if start <= end {
                return SubToken::Range(start, end);
            }
        }
        return SubToken::Invalid;
    }

    SubToken::Invalid
}

impl Field {
    /// Parses a single field column into its expanded value set.
    ///
    /// With `strict` set, any out-of-range value or unacceptable token shape
    /// fails with [`CronError::Syntax`]; otherwise such sub-tokens are dropped
    /// and whatever remains forms the set.
    pub(crate) fn parse(kind: FieldKind, input: &str, strict: bool) -> Result<Self> {
        if input == "*" {
            return Ok(Self {
                kind,
                spec: FieldSpec::Unconstrained,
            });
        }

        let (min, max) = kind.min_max();
        let mut values = BTreeSet::new();

        for token in input.split(',') {
            match classify(token) {
                SubToken::Value(value) => {
                    if value < min || value > max {
                        if strict {
                            return Err(CronError::Syntax(format!(
                                "{kind} value {token} is out of range {min}-{max}"
                            )));
                        }
                    } else {
                        values.insert(value);
                    }
                }
                // Every value of the field's range evenly divisible by the step;
                // the base of `base/step` only has to be well-formed.
                SubToken::Step(step) => values.extend((min..=max).filter(|value| value % step == 0)),
                SubToken::Range(start, end) => {
                    if start < min || end > max {
                        if strict {
                            return Err(CronError::Syntax(format!(
                                "{kind} range {token} is out of range {min}-{max}"
                            )));
                        }
                    } else {
                        values.extend(start..=end);
                    }
                }
                SubToken::Invalid => {
                    if strict {
                        return Err(CronError::Syntax(format!("unrecognized {kind} token: {token}")));
                    }
                }
            }
        }

        Ok(Self {
            kind,
            spec: FieldSpec::Set(values.into_iter().collect()),
        })
    }

    /// Field placeholder for a column absent from an unvalidated expression.
    pub(crate) fn unconstrained(kind: FieldKind) -> Self {
        Self {
            kind,
            spec: FieldSpec::Unconstrained,
        }
    }

    /// A field constrains the result only if it carries at least one value.
    pub(crate) fn is_configured(&self) -> bool {
        match &self.spec {
            FieldSpec::Unconstrained => false,
            FieldSpec::Set(values) => !values.is_empty(),
        }
    }

    /// Detached copy of the expanded value set for one calculation call.
    ///
    /// `None` means the field imposes no constraint.
    pub(crate) fn working_set(&self) -> Option<Vec<FieldValueType>> {
        match &self.spec {
            FieldSpec::Set(values) if !values.is_empty() => Some(values.clone()),
            _ => None,
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.spec {
            FieldSpec::Set(values) if !values.is_empty() => {
                let values = values.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(",");
                write!(f, "{values}")
            }
            _ => write!(f, "*"),
        }
    }
}
