//! Date/time macro processor backed by the system clock.
//!
//! Expands `{{date}}`, `{{time}}`, `{{datetime}}` and `{{date:FMT}}`
//! (chrono format string) against local time. Anything else passes through
//! untouched, so the expression engine stays free of assumptions about
//! this grammar.

use std::sync::LazyLock;

use chrono::{DateTime, Local};
use regex::Regex;

use crate::traits::MacroProcessor;

static DATE_FMT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{\{date:([^}]+)\}\}").unwrap());

/// Expands ambient date/time tokens against the local clock.
pub struct SystemClock;

impl SystemClock {
    fn expand(text: &str, now: DateTime<Local>) -> String {
        let mut result = text.replace("{{date}}", &now.format("%Y-%m-%d").to_string());
        result = result.replace("{{time}}", &now.format("%H:%M").to_string());
        result = result.replace("{{datetime}}", &now.format("%Y-%m-%d %H:%M").to_string());
        DATE_FMT
            .replace_all(&result, |caps: &regex::Captures<'_>| {
                now.format(&caps[1]).to_string()
            })
            .into_owned()
    }
}

impl MacroProcessor for SystemClock {
    fn process(&self, text: &str) -> String {
        if !text.contains("{{") {
            return text.to_string();
        }
        Self::expand(text, Local::now())
    }
}
