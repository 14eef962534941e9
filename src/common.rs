use handlebars::{handlebars_helper, no_escape, Handlebars};
use tracing::info;

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

pub fn create_path_if_not_exists(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            info!("Creating path: {:?}", parent);
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

pub fn write_string_to_file(path: &Path, content: &str) -> std::io::Result<()> {
    create_path_if_not_exists(path)?;
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

/// `<prefix>-<timestamp>.<ext>`, e.g. `rbiam-trace-1564315687.dot`
pub fn artifact_name(prefix: &str, timestamp: i64, ext: &str) -> String {
    format!("{}-{}.{}", prefix, timestamp, ext)
}

/// Quotes a string as a DOT identifier.
pub fn dot_quote(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for ch in s.chars() {
        match ch {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            _ => quoted.push(ch),
        }
    }
    quoted.push('"');
    quoted
}

pub fn get_handlebars() -> Handlebars<'static> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(no_escape);
    handlebars.set_strict_mode(true);

    handlebars_helper!(dotq: |s: String| dot_quote(&s));
    handlebars.register_helper("dot_quote", Box::new(dotq));

    handlebars
}
