use crate::boilerplate::{
    COMMANDS_MARKER, FLASK_ROUTES_MARKER, HANDLERS_MARKER, SET_WEBHOOK_MARKER, TOKEN_LINE,
    WEBHOOK_URL_LINE,
};
use super::generator::quote_double;
use itertools::Itertools;
use std::fmt;
use tracing::debug;

/// The literal landmarks of the four-slot insertion contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    /// Async method definitions go immediately before it.
    Commands,
    /// Opens the registration region.
    Handlers,
    /// Closes the registration region and opens the route region.
    FlaskRoutes,
    /// Closes the route region.
    SetWebhook,
}

impl Anchor {
    pub const ALL: [Anchor; 4] = [
        Anchor::Commands,
        Anchor::Handlers,
        Anchor::FlaskRoutes,
        Anchor::SetWebhook,
    ];

    pub fn marker(self) -> &'static str {
        match self {
            Anchor::Commands => COMMANDS_MARKER,
            Anchor::Handlers => HANDLERS_MARKER,
            Anchor::FlaskRoutes => FLASK_ROUTES_MARKER,
            Anchor::SetWebhook => SET_WEBHOOK_MARKER,
        }
    }

    /// Byte offset of the marker in `text`, searching from `from`.
    fn locate(self, text: &str, from: usize) -> Option<usize> {
        text.get(from..)?
            .find(self.marker())
            .map(|offset| offset + from)
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker().trim())
    }
}

/// Generated text waiting to be spliced.
#[derive(Debug, Clone, Default)]
pub struct Fragments {
    pub methods: Vec<String>,
    pub registrations: Vec<String>,
    pub routes: Vec<String>,
}

/// What one assembly pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssemblyReport {
    /// Anchors a step needed but could not find, in step order.
    pub missing_anchors: Vec<Anchor>,
    pub token_substituted: bool,
    pub webhook_url_substituted: bool,
    pub methods_inserted: usize,
    pub registrations_inserted: usize,
    /// Registrations already present in the region or repeated in the batch.
    pub registrations_skipped: usize,
    pub routes_inserted: usize,
}

impl AssemblyReport {
    fn missing(&mut self, anchor: Anchor) {
        if !self.missing_anchors.contains(&anchor) {
            self.missing_anchors.push(anchor);
        }
    }
}

/// Splices generated fragments into a boilerplate.
///
/// Steps run left to right: assignment substitution, methods, registrations, routes. Each
/// step re-locates its anchors in the text produced by the previous one, and a missing
/// anchor turns that step into a no-op. Fragments whose exact text is already present are
/// not inserted again, so assembling an already-assembled text changes nothing.
#[derive(Debug, Clone, Default)]
pub struct TemplateAssembler {
    fragments: Fragments,
    token: Option<String>,
    webhook_url: Option<String>,
}

impl TemplateAssembler {
    pub fn new(fragments: Fragments) -> Self {
        Self {
            fragments,
            token: None,
            webhook_url: None,
        }
    }

    /// Replaces the environment lookup of the bot token with this literal.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    /// Replaces the environment lookup of the webhook URL with this literal.
    pub fn with_webhook_url(mut self, url: Option<String>) -> Self {
        self.webhook_url = url;
        self
    }

    pub fn assemble(&self, boilerplate: &str) -> (String, AssemblyReport) {
        let mut text = boilerplate.to_string();
        let mut report = AssemblyReport::default();

        if let Some(token) = &self.token {
            report.token_substituted =
                substitute(&mut text, TOKEN_LINE, &format!("TOKEN = {}", quote_double(token)));
        }
        if let Some(url) = &self.webhook_url {
            report.webhook_url_substituted = substitute(
                &mut text,
                WEBHOOK_URL_LINE,
                &format!("WEBHOOK_URL = {}", quote_double(url)),
            );
        }

        self.splice_methods(&mut text, &mut report);
        self.splice_registrations(&mut text, &mut report);
        self.splice_routes(&mut text, &mut report);

        for anchor in &report.missing_anchors {
            debug!(anchor = %anchor, "anchor not found, step skipped");
        }
        (text, report)
    }

    fn splice_methods(&self, text: &mut String, report: &mut AssemblyReport) {
        let Some(at) = Anchor::Commands.locate(text, 0) else {
            report.missing(Anchor::Commands);
            return;
        };
        let fresh: Vec<&String> = self
            .fragments
            .methods
            .iter()
            .filter(|def| !text.contains(def.as_str()))
            .collect();
        if fresh.is_empty() {
            return;
        }
        report.methods_inserted = fresh.len();
        text.insert_str(at, &format!("{}\n\n", fresh.iter().join("\n")));
    }

    fn splice_registrations(&self, text: &mut String, report: &mut AssemblyReport) {
        let Some(start) = Anchor::Handlers.locate(text, 0) else {
            report.missing(Anchor::Handlers);
            return;
        };
        let Some(end) = Anchor::FlaskRoutes.locate(text, start) else {
            report.missing(Anchor::FlaskRoutes);
            return;
        };

        let region = &text[start..end];
        // Append right after the last registration line, keeping the spacing before the
        // next marker intact.
        let at = start + region.trim_end().len();
        let fresh: Vec<&String> = self
            .fragments
            .registrations
            .iter()
            .filter(|line| !region.contains(line.as_str()))
            .unique()
            .collect();
        report.registrations_skipped = self.fragments.registrations.len() - fresh.len();
        if fresh.is_empty() {
            return;
        }
        report.registrations_inserted = fresh.len();
        let block: String = fresh.iter().map(|line| format!("\n{}", line)).collect();
        text.insert_str(at, &block);
    }

    fn splice_routes(&self, text: &mut String, report: &mut AssemblyReport) {
        let Some(start) = Anchor::FlaskRoutes.locate(text, 0) else {
            report.missing(Anchor::FlaskRoutes);
            return;
        };
        let Some(at) = Anchor::SetWebhook.locate(text, start) else {
            report.missing(Anchor::SetWebhook);
            return;
        };
        let fresh: Vec<&String> = self
            .fragments
            .routes
            .iter()
            .filter(|route| !text.contains(route.as_str()))
            .collect();
        if fresh.is_empty() {
            return;
        }
        report.routes_inserted = fresh.len();
        text.insert_str(at, &format!("{}\n", fresh.iter().join("\n")));
    }
}

/// Replaces the first occurrence of `line`. Returns whether it was found.
fn substitute(text: &mut String, line: &str, replacement: &str) -> bool {
    match text.find(line) {
        Some(at) => {
            text.replace_range(at..at + line.len(), replacement);
            true
        }
        None => false,
    }
}
