use anyhow::Result;
use std::{fs, path::Path, process::Command};

pub fn resolve_editor(editor: &Option<String>) -> String {
    editor
        .clone()
        .or_else(|| std::env::var("VISUAL").ok())
        .or_else(|| std::env::var("EDITOR").ok())
        .unwrap_or_else(|| "vim".into())
}

/// Opens `editor_cmd` on a scratch file and returns what was written there.
pub fn create_editor_buffer(editor_cmd: &str) -> Result<String> {
    let file = tempfile::Builder::new()
        .prefix("moodlog")
        .suffix(".txt")
        .tempfile()?;

    let path = file.path().to_path_buf();
    open_file_in_editor(editor_cmd, &path)?;
    Ok(fs::read_to_string(&path)?)
}

fn open_file_in_editor(editor_cmd: &str, path: &Path) -> Result<()> {
    let status = Command::new(editor_cmd).arg(path).status()?;
    if !status.success() {
        anyhow::bail!("Editor exited with status {}", status);
    }
    Ok(())
}
