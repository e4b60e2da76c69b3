//! Placeholder substitution for path templates.

use crate::job::Job;
use chrono::{DateTime, Local, Utc};
use renderforge_common::{Error, Result};
use std::collections::HashMap;

/// Format of the `{timestamp}` placeholder: fixed width, sortable, local time.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H%M%S";

/// Variable substitution context for path templates.
///
/// Supports variable substitution in strings using the `{varname}` syntax.
/// Placeholders without a variable are left exactly as written, because a
/// later stage (the worker that runs the task) resolves its own tokens such
/// as `{clientStoragePath}` or `{deviceType}`.
///
/// # Example
///
/// ```
/// use renderforge_compiler::TemplateContext;
///
/// let ctx = TemplateContext::new().with_var("jobname", "shot_010");
///
/// assert_eq!(ctx.substitute("/renders/{jobname}/######"), "/renders/shot_010/######");
/// assert_eq!(ctx.substitute("{renderSubPath}/{jobname}"), "{renderSubPath}/shot_010");
/// ```
#[derive(Debug, Clone)]
pub struct TemplateContext {
    vars: HashMap<String, String>,
}

impl TemplateContext {
    /// Create a new empty template context.
    pub fn new() -> Self {
        Self {
            vars: HashMap::new(),
        }
    }

    /// Context holding the tokens the job compiler resolves for `job`.
    ///
    /// This adds the following variables:
    /// - `{timestamp}` - job creation time, see [`TIMESTAMP_FORMAT`]
    pub fn for_job(job: &Job) -> Self {
        Self::new().with_var("timestamp", &format_timestamp_local(job.created))
    }

    /// Add a custom variable.
    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_string(), value.to_string());
        self
    }

    /// Substitute variables in a string.
    ///
    /// The template is scanned once, left to right, so substituted values
    /// are never themselves expanded.
    pub fn substitute(&self, template: &str) -> String {
        let mut result = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(p) = next_placeholder(rest) {
            result.push_str(&rest[..p.start]);
            match self.vars.get(p.name) {
                Some(value) => result.push_str(value),
                None => result.push_str(&rest[p.start..p.end]),
            }
            rest = &rest[p.end..];
        }
        result.push_str(rest);
        result
    }
}

impl Default for TemplateContext {
    fn default() -> Self {
        Self::new()
    }
}

struct Placeholder<'a> {
    start: usize,
    end: usize,
    name: &'a str,
}

/// Find the first `{name}` in `s` with a non-empty name.
fn next_placeholder(s: &str) -> Option<Placeholder<'_>> {
    let mut from = 0;
    while let Some(open) = s[from..].find('{').map(|i| from + i) {
        let close = open + 1 + s[open + 1..].find('}')?;
        if close > open + 1 {
            return Some(Placeholder {
                start: open,
                end: close + 1,
                name: &s[open + 1..close],
            });
        }
        from = open + 1;
    }
    None
}

/// Names of all `{name}` placeholders in `template`, in order of appearance.
pub fn placeholders(template: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = template;
    while let Some(p) = next_placeholder(rest) {
        names.push(p.name);
        rest = &rest[p.end..];
    }
    names
}

/// Format a timestamp in local time using [`TIMESTAMP_FORMAT`].
pub fn format_timestamp_local(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format(TIMESTAMP_FORMAT).to_string()
}

/// Resolve the job's render output path template and store the result back
/// into the job settings.
///
/// # Errors
///
/// Returns [`Error::UnresolvedRenderOutputPath`] if the job has no template
/// or the template is empty.
pub fn resolve_render_output_path(job: &mut Job) -> Result<String> {
    let template = match job.settings.render_output_path.as_deref() {
        Some(t) if !t.is_empty() => t,
        _ => return Err(Error::UnresolvedRenderOutputPath),
    };

    let resolved = TemplateContext::for_job(job).substitute(template);
    job.settings.render_output_path = Some(resolved.clone());
    Ok(resolved)
}
