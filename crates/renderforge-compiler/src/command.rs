//! Builder for renderer invocations carried by tasks.
//!
//! A [`Command`] is only a description: the worker that picks up the task
//! expands the host placeholders (`{blender}`, `{clientStoragePath}`, ...)
//! and runs it. Nothing here spawns a process.

use crate::template;
use serde::{Deserialize, Serialize};

/// A renderer invocation.
///
/// The worker assembles the final command line as
/// `exe exe_args args_before blendfile args`.
///
/// # Example
///
/// ```
/// use renderforge_compiler::Command;
///
/// let cmd = Command::new("blender-render")
///     .exe("{blender}")
///     .exe_args("{blenderArgs}")
///     .blendfile("{clientStoragePath}/{jobSubPath}/shotA/scene.blend")
///     .arg("-noaudio")
///     .args(["--render-frame", "1..10"]);
///
/// assert_eq!(cmd.args, ["-noaudio", "--render-frame", "1..10"]);
/// assert_eq!(cmd.placeholders(), ["blender", "blenderArgs", "clientStoragePath", "jobSubPath"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    /// Command type the worker dispatches on, e.g. `blender-render`.
    pub name: String,
    /// Executable reference.
    pub exe: String,
    /// Extra executable arguments, passed through as one host token.
    pub exe_args: String,
    /// Arguments placed before the blend file.
    pub args_before: Vec<String>,
    /// Blend file to open.
    pub blendfile: String,
    /// Arguments placed after the blend file.
    pub args: Vec<String>,
}

impl Command {
    /// Create an empty command of the given type.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the executable.
    pub fn exe(mut self, exe: impl Into<String>) -> Self {
        self.exe = exe.into();
        self
    }

    /// Set the extra executable arguments.
    pub fn exe_args(mut self, exe_args: impl Into<String>) -> Self {
        self.exe_args = exe_args.into();
        self
    }

    /// Append a single argument before the blend file.
    pub fn arg_before(mut self, s: impl Into<String>) -> Self {
        self.args_before.push(s.into());
        self
    }

    /// Set the blend file.
    pub fn blendfile(mut self, path: impl Into<String>) -> Self {
        self.blendfile = path.into();
        self
    }

    /// Append a single argument.
    pub fn arg(mut self, s: impl Into<String>) -> Self {
        self.args.push(s.into());
        self
    }

    /// Append multiple arguments.
    pub fn args(mut self, iter: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(iter.into_iter().map(Into::into));
        self
    }

    /// The full command line, placeholders unexpanded. Empty parts are
    /// skipped.
    pub fn command_line(&self) -> Vec<&str> {
        [self.exe.as_str(), self.exe_args.as_str()]
            .into_iter()
            .chain(self.args_before.iter().map(String::as_str))
            .chain(std::iter::once(self.blendfile.as_str()))
            .chain(self.args.iter().map(String::as_str))
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Distinct placeholder names the worker must resolve, in order of first
    /// appearance on the command line.
    pub fn placeholders(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for part in self.command_line() {
            for name in template::placeholders(part) {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }
}
