//! Authoring render tasks from frame chunks.

use crate::command::Command;
use crate::frames::FrameChunk;
use crate::job::Task;
use crate::settings::JobSettings;
use renderforge_common::paths;
use renderforge_common::{Error, Result, TaskId};

/// Script run by the renderer at start-up to fix compositor output paths and
/// select compute devices. Staged next to the job files.
pub const DEFAULT_STARTUP_SCRIPT: &str = "startup_script.py";

/// Forces compositing and the compositor node tree on, whatever the blend
/// file says.
const ENABLE_COMPOSITING_EXPR: &str =
    "import bpy; bcs = bpy.context.scene; bcs.render.use_compositing = True; bcs.use_nodes = True";

/// Static parts of every authored task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorOptions {
    /// Worker capability tag put on each task.
    pub worker_type: String,
    /// Command type put on each command.
    pub command_name: String,
    /// File name of the start-up script in the staged job directory.
    pub startup_script: String,
}

impl Default for AuthorOptions {
    fn default() -> Self {
        Self {
            worker_type: "blender".to_string(),
            command_name: "blender-render".to_string(),
            startup_script: DEFAULT_STARTUP_SCRIPT.to_string(),
        }
    }
}

/// The blend file's parent directory name and file name.
///
/// Workers stage job files into a layout that mirrors only these two
/// segments, so `C:\jobs\shotA\scene.blend` becomes `("shotA", "scene.blend")`.
/// Two jobs whose blend files share a parent directory name stage to the same
/// place unless `{jobSubPath}` tells them apart.
pub fn staged_blendfile_parts(blendfile: &str) -> Result<(&str, &str)> {
    match paths::segments(blendfile).as_slice() {
        [.., parent, file] => Ok((*parent, *file)),
        _ => Err(Error::invalid_settings(format!(
            "blendfile {blendfile:?} has no parent directory to stage it from"
        ))),
    }
}

/// Author one render task per chunk, in chunk order.
///
/// `render_dir` is the directory of the resolved output path; workers write
/// into their own storage, so it is only logged.
pub fn author_render_tasks(
    settings: &JobSettings,
    render_dir: &str,
    render_output: &str,
    chunks: &[FrameChunk],
    options: &AuthorOptions,
) -> Result<Vec<Task>> {
    tracing::debug!(
        "Authoring {} render tasks (render dir {:?}, output {:?})",
        chunks.len(),
        render_dir,
        render_output
    );

    let (staged_dir, blendfile_name) = staged_blendfile_parts(&settings.blendfile)?;
    let format = settings.format.cli_name();

    let startup_script = paths::join([
        "{clientStoragePath}",
        "{jobSubPath}",
        options.startup_script.as_str(),
    ]);
    let blendfile = paths::join(["{clientStoragePath}", "{jobSubPath}", staged_dir, blendfile_name]);
    let output = paths::join([
        "{clientStoragePath}",
        "{renderSubPath}",
        staged_dir,
        paths::basename(render_output),
    ]);

    let tasks = chunks
        .iter()
        .map(|chunk| {
            let command = Command::new(options.command_name.as_str())
                .exe("{blender}")
                .exe_args("{blenderArgs}")
                .arg_before("-P")
                .arg_before(startup_script.as_str())
                .blendfile(blendfile.as_str())
                .arg("-noaudio")
                .args(["--render-output", output.as_str()])
                .args(["--render-format", format])
                .args(["--render-frame".to_string(), chunk.to_render_range()])
                .args(["--python-expr", ENABLE_COMPOSITING_EXPR])
                // The renderer ignores everything after `--`; the start-up
                // script reads these.
                .arg("--")
                .arg("--custom-script")
                .args(["--device-type", "{deviceType}"]);

            Task {
                id: TaskId::for_render_chunk(chunk),
                worker_type: options.worker_type.clone(),
                command,
            }
        })
        .collect();

    Ok(tasks)
}
