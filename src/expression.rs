use crate::{
    calendar::Candidate,
    field::{Field, FieldKind, FieldValueType},
    CronError, Result,
};
use chrono::{DateTime, TimeZone};
use std::{fmt::Display, str::FromStr};

/// Represents a parsed cron schedule expression with its methods.
///
/// For the schedule format and usage examples, please refer to the
/// [crate documentation](crate).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String"))]
#[cfg_attr(feature = "serde", serde(into = "String"))]
pub struct CronExpression {
    minute: Field,
    hour: Field,
    dom: Field,
    month: Field,
    dow: Field,
    timezone: Option<String>,
}

impl CronExpression {
    /// Parses and validates provided `expression` and constructs a [`CronExpression`].
    ///
    /// Alternative ways to construct a [`CronExpression`] are the `try_from` and
    /// `from_str` methods.
    ///
    /// Returns [`CronError`] in a case a mandatory field is absent or a field
    /// has format errors.
    pub fn new(expression: impl Into<String>) -> Result<Self> {
        Self::parse(expression, true)
    }

    /// Parses provided `expression`, optionally skipping validation.
    ///
    /// With `validate` set this behaves like [`new()`](CronExpression::new):
    /// the required-field check runs first (the first absent field fails with
    /// [`CronError::MissingField`]), then every field is checked for range and
    /// token shape ([`CronError::Syntax`]). With `validate` unset both checks
    /// are skipped: missing trailing fields read as unconstrained and malformed
    /// sub-tokens are dropped, so construction always succeeds. What such an
    /// expression later computes is the caller's responsibility.
    pub fn parse(expression: impl Into<String>, validate: bool) -> Result<Self> {
        let expression = expression.into();
        let elements: Vec<&str> = expression.split_whitespace().collect();

        if validate && elements.len() < FieldKind::ALL.len() {
            let missing = FieldKind::ALL[elements.len()];
            return Err(CronError::MissingField(missing.name().to_string()));
        }

        let field = |position: usize, kind: FieldKind| -> Result<Field> {
            match elements.get(position) {
                Some(token) => Field::parse(kind, token, validate),
                None => Ok(Field::unconstrained(kind)),
            }
        };

        Ok(Self {
            minute: field(0, FieldKind::Minute)?,
            hour: field(1, FieldKind::Hour)?,
            dom: field(2, FieldKind::DayOfMonth)?,
            month: field(3, FieldKind::Month)?,
            dow: field(4, FieldKind::DayOfWeek)?,
            timezone: elements.get(FieldKind::ALL.len()).map(|tz| (*tz).to_string()),
        })
    }

    /// Returns `true` if the field carries an explicit, non-empty constraint.
    pub fn is_field_configured(&self, kind: FieldKind) -> bool {
        self.field(kind).is_configured()
    }

    /// Returns `true` if a non-empty timezone token is present.
    pub fn is_timezone_configured(&self) -> bool {
        self.timezone.as_deref().is_some_and(|tz| !tz.is_empty())
    }

    /// The timezone token of the expression, if any.
    ///
    /// The token is carried through uninterpreted: resolving it to an actual
    /// calendar offset is the caller's business.
    pub fn timezone(&self) -> Option<&str> {
        self.timezone.as_deref()
    }

    fn field(&self, kind: FieldKind) -> &Field {
        match kind {
            FieldKind::Minute => &self.minute,
            FieldKind::Hour => &self.hour,
            FieldKind::DayOfMonth => &self.dom,
            FieldKind::Month => &self.month,
            FieldKind::DayOfWeek => &self.dow,
        }
    }

    /// Returns `true` if `at` satisfies every configured field of the expression.
    ///
    /// Seconds and sub-seconds of `at` are ignored.
    pub fn matches<Tz: TimeZone>(&self, at: &DateTime<Tz>) -> bool {
        WorkingCopy::new(self).satisfies(&Candidate::from_datetime(at))
    }

    /// Computes the next occurrence strictly after `basis`, minute granularity.
    ///
    /// The calculation runs over a detached working copy of the expanded field
    /// sets; the expression itself is never touched. Seconds of `basis` are
    /// ignored. The result is always at least one minute ahead of `basis`.
    ///
    /// Two deliberate deviations from traditional cron, inherited from the
    /// schedule semantics this crate implements:
    /// - day-of-month and day-of-week progress independently when both are
    ///   configured, instead of the classic intersection rule;
    /// - a configured day that doesn't exist in the resolved month (e.g. `31`
    ///   in April) rolls forward into the following month.
    pub fn next_occurrence<Tz: TimeZone>(&self, basis: &DateTime<Tz>) -> DateTime<Tz> {
        let working = WorkingCopy::new(self);
        let basis_candidate = Candidate::from_datetime(basis);
        let mut candidate = basis_candidate;
        let timezone = basis.timezone();

        // Stage 1: minute. An unconstrained minute is the one stage that always
        // ticks the candidate forward, keeping the result strictly after the basis.
        match &working.minute {
            Some(set) => match set.iter().copied().find(|v| *v > candidate.minute) {
                Some(value) => candidate.minute = value,
                None => {
                    candidate.minute = set[0];
                    candidate.bump_hour();
                }
            },
            None => candidate.bump_minute(),
        }
        if working.is_returnable(&candidate, &basis_candidate) {
            return candidate.into_datetime(&timezone);
        }

        // Stage 2: hour.
        if let Some(set) = &working.hour {
            match set.iter().copied().find(|v| *v > candidate.hour) {
                Some(value) => candidate.hour = value,
                None => {
                    candidate.hour = set[0];
                    candidate.bump_day();
                }
            }
            working.reset_after_hour_change(&mut candidate);

            if working.is_returnable(&candidate, &basis_candidate) {
                return candidate.into_datetime(&timezone);
            }
        }

        // Stage 3: day of month. Greater-or-equal: an earlier stage may already
        // have carried the day forward onto a configured value.
        if let Some(set) = &working.dom {
            match set.iter().copied().find(|v| *v >= candidate.day) {
                Some(value) if value == candidate.day => {}
                Some(value) => {
                    candidate.day = value;
                    working.reset_after_day_change(&mut candidate);
                }
                None => {
                    candidate.day = set[0];
                    candidate.bump_month();
                    working.reset_after_day_change(&mut candidate);
                }
            }
            if working.is_returnable(&candidate, &basis_candidate) {
                return candidate.into_datetime(&timezone);
            }
        }

        // Stage 4: day of week. Walks to the next date whose weekday is the
        // least configured weekday after the candidate's, wrapping into the
        // following week when none remains in the current one.
        if let Some(set) = &working.dow {
            let weekday = candidate.weekday();
            let days_ahead = match set.iter().copied().find(|v| *v > weekday) {
                Some(value) => value - weekday,
                None => 7 - weekday + set[0],
            };
            candidate.advance_days(days_ahead);
            working.reset_after_day_change(&mut candidate);

            if working.is_returnable(&candidate, &basis_candidate) {
                return candidate.into_datetime(&timezone);
            }
        }

        // Stage 5: month. Greater-or-equal for the same reason as day of month.
        if let Some(set) = &working.month {
            match set.iter().copied().find(|v| *v >= candidate.month) {
                Some(value) if value == candidate.month => {}
                Some(value) => {
                    candidate.month = value;
                    working.reset_after_month_change(&mut candidate);
                }
                None => {
                    candidate.month = set[0];
                    candidate.year += 1;
                    working.reset_after_month_change(&mut candidate);
                }
            }
        }

        candidate.into_datetime(&timezone)
    }

    /// Returns an endless iterator of occurrences strictly after `basis`,
    /// each result feeding back as the basis of the next one.
    #[inline]
    pub fn iter<Tz: TimeZone>(&self, basis: &DateTime<Tz>) -> impl Iterator<Item = DateTime<Tz>> {
        OccurrenceIterator {
            expression: self.clone(),
            current: basis.clone(),
        }
    }

    /// Plans the next `count` occurrences after `basis`, in order, each entry
    /// tagged with the caller-supplied `label`.
    pub fn schedule<Tz: TimeZone>(
        &self,
        basis: &DateTime<Tz>,
        count: usize,
        label: impl Into<String>,
    ) -> Vec<ScheduleEntry<Tz>> {
        let label = label.into();
        self.iter(basis)
            .take(count)
            .map(|at| ScheduleEntry {
                label: label.clone(),
                at,
            })
            .collect()
    }
}

/// One planned occurrence produced by [`CronExpression::schedule`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScheduleEntry<Tz: TimeZone> {
    /// Caller-supplied annotation, attached verbatim to every entry.
    pub label: String,
    /// Time of the occurrence.
    pub at: DateTime<Tz>,
}

/// Contains iterator state.
#[derive(Debug, Clone)]
struct OccurrenceIterator<Tz: TimeZone> {
    expression: CronExpression,
    current: DateTime<Tz>,
}

impl<Tz: TimeZone> Iterator for OccurrenceIterator<Tz> {
    type Item = DateTime<Tz>;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.expression.next_occurrence(&self.current);
        self.current = next.clone();
        Some(next)
    }
}

/// Per-call scratch state of the calculator: cloned expanded sets, detached
/// from the canonical expression so repeated calculations never touch it.
struct WorkingCopy {
    minute: Option<Vec<FieldValueType>>,
    hour: Option<Vec<FieldValueType>>,
    dom: Option<Vec<FieldValueType>>,
    month: Option<Vec<FieldValueType>>,
    dow: Option<Vec<FieldValueType>>,
}

impl WorkingCopy {
    fn new(expression: &CronExpression) -> Self {
        Self {
            minute: expression.minute.working_set(),
            hour: expression.hour.working_set(),
            dom: expression.dom.working_set(),
            month: expression.month.working_set(),
            dow: expression.dow.working_set(),
        }
    }

    /// Every configured field matches the candidate.
    fn satisfies(&self, candidate: &Candidate) -> bool {
        let matches = |set: &Option<Vec<FieldValueType>>, value: FieldValueType| {
            set.as_ref().map_or(true, |set| set.contains(&value))
        };

        matches(&self.minute, candidate.minute)
            && matches(&self.hour, candidate.hour)
            && matches(&self.dom, candidate.day)
            && matches(&self.month, candidate.month)
            && matches(&self.dow, candidate.weekday())
    }

    /// The candidate is a valid answer: strictly after the basis and matching
    /// every configured field.
    fn is_returnable(&self, candidate: &Candidate, basis: &Candidate) -> bool {
        candidate > basis && self.satisfies(candidate)
    }

    // Cross-stage reset rules: after a stage changes its unit, all finer
    // unconfigured units drop to their minimum. Configured finer units were
    // already positioned by their own stage and stay put.

    fn reset_after_hour_change(&self, candidate: &mut Candidate) {
        if self.minute.is_none() {
            candidate.minute = 0;
        }
    }

    fn reset_after_day_change(&self, candidate: &mut Candidate) {
        if self.hour.is_none() {
            candidate.hour = 0;
        }
        self.reset_after_hour_change(candidate);
    }

    fn reset_after_month_change(&self, candidate: &mut Candidate) {
        if self.dom.is_none() {
            candidate.day = 1;
        }
        self.reset_after_day_change(candidate);
    }
}

impl From<CronExpression> for String {
    fn from(value: CronExpression) -> Self {
        value.to_string()
    }
}

impl From<&CronExpression> for String {
    fn from(value: &CronExpression) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for CronExpression {
    type Error = CronError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<&String> for CronExpression {
    type Error = CronError;

    fn try_from(value: &String) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<&str> for CronExpression {
    type Error = CronError;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl FromStr for CronExpression {
    type Err = CronError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl Display for CronExpression {
    /// Canonical form: expanded value sets as comma lists, `*` for
    /// unconstrained fields. Parsing the rendered string yields an equal
    /// expression.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.minute, self.hour, self.dom, self.month, self.dow
        )?;

        if let Some(tz) = &self.timezone {
            write!(f, " {tz}")?;
        }

        Ok(())
    }
}
