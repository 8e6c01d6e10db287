use serde::Serialize;
use std::path::{Path, PathBuf};

/// Base name of a params file (`demos/koch/params.json` -> `params`).
pub fn extract_base_name(path: &str) -> &str {
    Path::new(path)
        .file_stem() // Get the base name component of the path
        .and_then(|name| name.to_str())
        .unwrap_or("params")
}

/**
 * Builds (and creates, if needed) the output directory:
 * `out/<project>/<sub_directory>[/<datetime>]`.
 */
pub fn build_output_path_with_date_time(
    project: &str,
    sub_directory: &str,
    datetime: &Option<String>,
) -> std::io::Result<PathBuf> {
    let mut dirs = vec!["out", project, sub_directory];
    if let Some(inner_datetime_str) = datetime {
        dirs.push(inner_datetime_str);
    }

    let directory_path: PathBuf = dirs.iter().collect();
    std::fs::create_dir_all(&directory_path)?;
    Ok(directory_path)
}

pub fn date_time_string() -> String {
    use chrono::{Datelike, Local, Timelike};
    let local_time = Local::now();
    format!(
        "{:04}{:02}{:02}_{:02}{:02}{:02}",
        local_time.year(),
        local_time.month(),
        local_time.day(),
        local_time.hour(),
        local_time.minute(),
        local_time.second()
    )
}

pub fn maybe_date_time_string(enable: bool) -> Option<String> {
    if enable {
        Some(date_time_string())
    } else {
        None
    }
}

/// Writes `value` as pretty-printed JSON.
pub fn serialize_to_json<T: Serialize>(
    path: PathBuf,
    value: &T,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = std::fs::File::create(&path)?;
    serde_json::to_writer_pretty(std::io::BufWriter::new(file), value)?;
    Ok(())
}

/**
 * Store a path and prefix together, making it easily to quickly generate
 * a collection of files with the same prefix, but separate suffixes.
 */
#[derive(Clone, Debug)]
pub struct FilePrefix {
    pub directory_path: PathBuf,
    pub file_base: String,
}

impl FilePrefix {
    pub fn with_suffix(&self, suffix: &str) -> PathBuf {
        self.directory_path.join(self.file_base.clone() + suffix)
    }

    pub fn create_file_with_suffix(
        &self,
        suffix: &str,
    ) -> std::io::Result<std::io::BufWriter<std::fs::File>> {
        let file = std::fs::File::create(self.with_suffix(suffix))?;
        Ok(std::io::BufWriter::new(file))
    }
}
