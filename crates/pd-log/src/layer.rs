//! `tracing` integration.
//!
//! A [`LogPipeline`] is also a [`Layer`], so ordinary `tracing` events can be
//! routed through the same formatter and sink. Event fields other than the
//! message are appended as `key=value;` tokens, which puts them in reach of
//! the redaction engine. The message is closed with `;` first, so a field
//! never shares a segment with message text.

use std::fmt::Write as _;

use tracing::field::{Field, Visit};
use tracing::{Dispatch, Event, Metadata, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{Layer, Registry};

use crate::pipeline::LogPipeline;
use crate::record::{Level, LogRecord};
use pd_redact::DEFAULT_SEPARATOR;

/// Collects the message and remaining fields of an event.
#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
    fields: Vec<(&'static str, String)>,
}

impl MessageVisitor {
    fn into_message(self) -> String {
        let mut out = self.message.unwrap_or_default();
        if self.fields.is_empty() {
            return out;
        }

        out.truncate(out.trim_end().len());
        if !out.is_empty() && !out.ends_with(DEFAULT_SEPARATOR) {
            out.push(DEFAULT_SEPARATOR);
        }
        for (name, value) in self.fields {
            if !out.is_empty() {
                out.push(' ');
            }
            let _ = write!(out, "{}={}{}", name, value, DEFAULT_SEPARATOR);
        }
        out
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.fields.push((field.name(), value.to_string()));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        if field.name() == "message" {
            self.message = Some(s);
        } else {
            self.fields.push((field.name(), s));
        }
    }
}

impl<S> Layer<S> for LogPipeline
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn enabled(&self, metadata: &Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        self.enabled(Level::from(*metadata.level()))
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let record = LogRecord::new(
            self.name(),
            Level::from(*event.metadata().level()),
            visitor.into_message(),
        );
        // A failing sink cannot be reported from inside the subscriber.
        let _ = self.log(&record);
    }
}

impl LogPipeline {
    /// Wrap the pipeline in a standalone dispatcher.
    ///
    /// Use it with [`tracing::dispatcher::with_default`] to scope events to
    /// this pipeline without touching the global subscriber.
    pub fn into_dispatch(self) -> Dispatch {
        Dispatch::new(Registry::default().with(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;

    #[test]
    fn test_tracing_events_are_redacted() {
        let sink = MemorySink::new();
        let dispatch = LogPipeline::user_data(sink.clone()).into_dispatch();

        tracing::dispatcher::with_default(&dispatch, || {
            tracing::info!(email = "bob@dylan.com", ip = "1.2.3.4", "login");
        });

        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("[HOLBERTON] user_data INFO "));
        assert!(lines[0].ends_with(": login; email=***; ip=1.2.3.4;"));
    }

    #[test]
    fn test_tracing_threshold() {
        let sink = MemorySink::new();
        let dispatch = LogPipeline::user_data(sink.clone()).into_dispatch();

        tracing::dispatcher::with_default(&dispatch, || {
            tracing::debug!("dropped");
            tracing::warn!("kept name=Bob;");
        });

        let lines = sink.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains(" WARNING "));
        assert!(lines[0].ends_with(": kept name=***;"));
    }

    #[test]
    fn test_field_after_pair_like_message_is_redacted() {
        let sink = MemorySink::new();
        let dispatch = LogPipeline::user_data(sink.clone()).into_dispatch();

        tracing::dispatcher::with_default(&dispatch, || {
            tracing::info!(email = "bob@dylan.com", "retry=3");
        });

        let out = sink.contents();
        assert!(out.trim_end().ends_with(": retry=3; email=***;"), "{}", out);
        assert!(!out.contains("bob@dylan.com"));
    }

    #[test]
    fn test_message_visitor_keeps_existing_separator() {
        let visitor = MessageVisitor {
            message: Some("name=Bob;  ".to_string()),
            fields: vec![("ssn", "1".to_string())],
        };
        assert_eq!(visitor.into_message(), "name=Bob; ssn=1;");
    }

    #[test]
    fn test_message_visitor_message_only() {
        let visitor = MessageVisitor {
            message: Some("plain text".to_string()),
            fields: Vec::new(),
        };
        assert_eq!(visitor.into_message(), "plain text");
    }

    #[test]
    fn test_message_visitor_without_message() {
        let visitor = MessageVisitor {
            message: None,
            fields: vec![("ssn", "1".to_string()), ("rows", "3".to_string())],
        };
        assert_eq!(visitor.into_message(), "ssn=1; rows=3;");
    }
}
