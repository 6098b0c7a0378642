use std::fmt;
use liquid_core::{Runtime, ValueView, Value, Result as LiquidResult};
use liquid_core::parser::{FilterArguments, ParseFilter, ParameterReflection};
use liquid_core::FilterReflection;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Output format: "March 7, 2021"
const FULL_DATE_FORMAT: &str = "%B %-d, %Y";

/// Parse the date representations that show up in front matter and page data.
///
/// Dates carrying an offset keep the calendar day of that offset.
pub fn parse_date(date_str: &str) -> Option<NaiveDate> {
    let date_str = date_str.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Some(dt.date_naive());
    }

    // Liquid's own rendering of a date value
    if let Ok(dt) = DateTime::parse_from_str(date_str, "%Y-%m-%d %H:%M:%S %z") {
        return Some(dt.date_naive());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }

    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").ok()
}

/// Format a date string as a full, human-readable date
pub fn full_date(date_str: &str) -> Option<String> {
    parse_date(date_str).map(|date| date.format(FULL_DATE_FORMAT).to_string())
}

/// FullDate filter implementation
#[derive(Debug, Clone)]
pub struct FullDateFilter;

impl fmt::Display for FullDateFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "full_date")
    }
}

impl liquid_core::Filter for FullDateFilter {
    fn evaluate(&self, input: &dyn ValueView, _runtime: &dyn Runtime) -> LiquidResult<Value> {
        let date_str = input.to_kstr().to_string();

        match full_date(&date_str) {
            Some(formatted) => Ok(Value::scalar(formatted)),
            // If can't parse, return the original string
            None => Ok(Value::scalar(date_str)),
        }
    }
}

/// Parse filter factory for full_date
#[derive(Debug, Clone)]
pub struct FullDateFilterParser;

impl FilterReflection for FullDateFilterParser {
    fn name(&self) -> &str {
        "full_date"
    }

    fn description(&self) -> &str {
        "Formats a date as a full date, e.g. March 7, 2021"
    }

    fn positional_parameters(&self) -> &'static [ParameterReflection] {
        &[]
    }

    fn keyword_parameters(&self) -> &'static [ParameterReflection] {
        &[]
    }
}

impl ParseFilter for FullDateFilterParser {
    fn parse(&self, _args: FilterArguments) -> LiquidResult<Box<dyn liquid_core::Filter>> {
        Ok(Box::new(FullDateFilter))
    }

    fn reflection(&self) -> &dyn FilterReflection {
        self
    }
}
