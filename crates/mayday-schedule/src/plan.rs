//! Line-oriented parser for the "Scheduling Plan:" block.
//!
//! Each line is classified by content, in a fixed priority order:
//!
//! 1. `Day: N` sets the current day to `anchor + (N - 1)`.
//! 2. `Time: HH:MM - HH:MM` emits an event for the current task and day.
//! 3. `Name: anything` (not a topic line) sets the current task.
//! 4. Anything else is ignored.
//!
//! Day and time markers share the `key: value` shape with task headers, so
//! they must be matched first or `Day: 2` would become a task named "Day".
//!
//! Scan state lives in a [`ParseContext`] folded through [`step`], and
//! [`PlanLines`] drives that fold lazily, yielding events as soon as their
//! `Time:` line resolves.

use std::collections::VecDeque;
use std::iter::Enumerate;
use std::str::Lines;

use chrono::NaiveDate;

use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::resolve::{parse_clock, resolve_day, resolve_instant};
use crate::types::ScheduledEvent;

const DAY_PREFIX: &str = "Day: ";
const TIME_PREFIX: &str = "Time: ";
const TIME_SEPARATOR: &str = " - ";
const HEADER_SEPARATOR: &str = ": ";

/// Substrings that mark a topic line rather than a task header.
const TOPIC_TAGS: [&str; 2] = ["Topic:", "Topic/Activity:"];

/// How a single plan line is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Payload after `Day: `.
    Day(&'a str),
    /// Payload after `Time: `.
    Time(&'a str),
    /// Task name, the text before the first `": "`.
    TaskHeader(&'a str),
    Ignored,
}

/// Classify a trimmed line. Order matters, see the module docs.
pub fn classify_line(line: &str) -> LineKind<'_> {
    if let Some(payload) = line.strip_prefix(DAY_PREFIX) {
        return LineKind::Day(payload);
    }
    if let Some(payload) = line.strip_prefix(TIME_PREFIX) {
        return LineKind::Time(payload);
    }
    if TOPIC_TAGS.iter().any(|tag| line.contains(tag)) {
        return LineKind::Ignored;
    }
    match line.split_once(HEADER_SEPARATOR) {
        Some((name, _)) => LineKind::TaskHeader(name.trim()),
        None => LineKind::Ignored,
    }
}

/// Mutable scan state for one parse. Never shared between parses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseContext {
    pub current_task: Option<String>,
    pub current_day: Option<NaiveDate>,
}

/// Something the parser produced for a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanItem {
    Event(ScheduledEvent),
    Diagnostic(Diagnostic),
}

/// Advance the scan by one line.
///
/// `line_no` is 1-based and only used for diagnostics. Returns the updated
/// context and whatever the line produced, in order.
pub fn step(
    mut context: ParseContext,
    line_no: usize,
    line: &str,
    anchor: NaiveDate,
) -> (ParseContext, Vec<PlanItem>) {
    let line = line.trim();
    let mut items = Vec::new();

    match classify_line(line) {
        LineKind::Day(payload) => match leading_integer(payload) {
            Some(index) => match resolve_day(anchor, index) {
                Some(day) => {
                    if index <= 0 {
                        items.push(diagnostic(
                            DiagnosticKind::NonPositiveDayIndex,
                            line_no,
                            format!("day index {index} resolves to {day}, before the anchor date"),
                        ));
                    }
                    context.current_day = Some(day);
                }
                None => items.push(diagnostic(
                    DiagnosticKind::MalformedDayMarker,
                    line_no,
                    format!("day index {index} is out of range: {line}"),
                )),
            },
            None => items.push(diagnostic(
                DiagnosticKind::MalformedDayMarker,
                line_no,
                format!("invalid day format: {line}"),
            )),
        },
        LineKind::Time(payload) => {
            let Some((start, end)) = parse_time_range(payload) else {
                items.push(diagnostic(
                    DiagnosticKind::MalformedTimeMarker,
                    line_no,
                    format!("invalid time format: {line}"),
                ));
                return (context, items);
            };

            match (&context.current_task, context.current_day) {
                (Some(task), Some(day)) => {
                    let event = ScheduledEvent::new(
                        task.clone(),
                        resolve_instant(day, start),
                        resolve_instant(day, end),
                    );
                    let reversed = event.end <= event.start;
                    items.push(PlanItem::Event(event));
                    if reversed {
                        items.push(diagnostic(
                            DiagnosticKind::NonIncreasingInterval,
                            line_no,
                            format!("end is not after start for \"{task}\": {line}"),
                        ));
                    }
                }
                (task, day) => {
                    let missing = match (task.is_none(), day.is_none()) {
                        (true, true) => "task and day",
                        (true, false) => "task",
                        _ => "day",
                    };
                    items.push(diagnostic(
                        DiagnosticKind::OrphanTimeMarker,
                        line_no,
                        format!("time with no active {missing}: {line}"),
                    ));
                }
            }
        }
        LineKind::TaskHeader(name) => {
            if !name.is_empty() {
                context.current_task = Some(name.to_string());
            }
        }
        LineKind::Ignored => {}
    }

    (context, items)
}

fn diagnostic(kind: DiagnosticKind, line_no: usize, message: String) -> PlanItem {
    PlanItem::Diagnostic(Diagnostic::at_line(kind, line_no, message))
}

/// Leading integer of the first token, so `2`, `2,` and `2 (Tuesday)` all
/// read as 2.
fn leading_integer(payload: &str) -> Option<i64> {
    let token = payload.split_whitespace().next()?;
    let digits_from = usize::from(token.starts_with(['-', '+']));
    let digits_len = token[digits_from..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits_len == 0 {
        return None;
    }
    token[..digits_from + digits_len].parse().ok()
}

fn parse_time_range(payload: &str) -> Option<(chrono::NaiveTime, chrono::NaiveTime)> {
    let (start, end) = payload.split_once(TIME_SEPARATOR)?;
    Some((parse_clock(start)?, parse_clock(end)?))
}

/// Lazy scan over a plan body.
///
/// Yields events and diagnostics in encounter order; lines are only read as
/// the consumer pulls.
pub struct PlanLines<'a> {
    lines: Enumerate<Lines<'a>>,
    anchor: NaiveDate,
    context: ParseContext,
    pending: VecDeque<PlanItem>,
}

impl<'a> PlanLines<'a> {
    pub fn new(plan: &'a str, anchor: NaiveDate) -> Self {
        Self {
            lines: plan.lines().enumerate(),
            anchor,
            context: ParseContext::default(),
            pending: VecDeque::new(),
        }
    }

    /// Context as of the last line read.
    pub fn context(&self) -> &ParseContext {
        &self.context
    }
}

impl Iterator for PlanLines<'_> {
    type Item = PlanItem;

    fn next(&mut self) -> Option<PlanItem> {
        loop {
            if let Some(item) = self.pending.pop_front() {
                return Some(item);
            }
            let (index, line) = self.lines.next()?;
            let context = std::mem::take(&mut self.context);
            let (context, items) = step(context, index + 1, line, self.anchor);
            self.context = context;
            self.pending.extend(items);
        }
    }
}
