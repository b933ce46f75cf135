//! Line sources: memory-mapped files and stdin

use crate::config::SortConfig;
use crate::error::{SortContext, SortError, SortResult};
use memmap2::Mmap;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tracing::debug;

/// Memory-mapped file split into owned lines
pub struct MappedFile {
    lines: Vec<String>,
}

impl MappedFile {
    /// Map `path` and split it into lines.
    ///
    /// Empty files and non-regular files (pipes, character devices) cannot be
    /// mapped and are read conventionally instead.
    pub fn new(path: &Path) -> SortResult<Self> {
        let name = path.display().to_string();
        let file = File::open(path).with_file_context(&name)?;
        let metadata = file.metadata().with_file_context(&name)?;

        if metadata.is_dir() {
            return Err(SortError::is_directory(&name));
        }

        let lines = if !metadata.is_file() {
            let mut buffer = Vec::new();
            (&file).read_to_end(&mut buffer).with_file_context(&name)?;
            split_lines(&buffer)?
        } else if metadata.len() == 0 {
            Vec::new()
        } else {
            // SAFETY: the map is read once to copy lines out and dropped before
            // returning; the file is not modified by this process meanwhile.
            let mmap = unsafe { Mmap::map(&file) }.with_file_context(&name)?;
            split_lines(&mmap)?
        };

        debug!(file = %name, lines = lines.len(), "read input file");
        Ok(Self { lines })
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

/// Split raw input into lines.
///
/// Lines end at `\n`; a `\r` before it is dropped. A final line without a
/// terminator still counts, but a trailing newline does not open an empty one.
pub fn split_lines(data: &[u8]) -> SortResult<Vec<String>> {
    let mut lines = Vec::new();
    let mut start = 0;

    for (i, &byte) in data.iter().enumerate() {
        if byte == b'\n' {
            lines.push(decode_line(&data[start..i])?);
            start = i + 1;
        }
    }

    // Handle last line if it doesn't end with newline
    if start < data.len() {
        lines.push(decode_line(&data[start..])?);
    }

    Ok(lines)
}

fn decode_line(bytes: &[u8]) -> SortResult<String> {
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    Ok(String::from_utf8(bytes.to_vec())?)
}

/// Read all of stdin as lines
pub fn read_stdin_lines() -> SortResult<Vec<String>> {
    let mut buffer = Vec::new();
    io::stdin()
        .lock()
        .read_to_end(&mut buffer)
        .with_context(|| "reading standard input".to_string())?;
    let lines = split_lines(&buffer)?;
    debug!(lines = lines.len(), "read standard input");
    Ok(lines)
}

/// Read every input named by the configuration, in operand order.
///
/// No operands, or a lone `-`, means stdin; `-` among other files reads stdin
/// at that position.
pub fn read_input(config: &SortConfig) -> SortResult<Vec<String>> {
    if config.reading_from_stdin() {
        return read_stdin_lines();
    }

    let mut lines = Vec::new();
    for file in &config.input_files {
        if file == "-" {
            lines.extend(read_stdin_lines()?);
        } else {
            lines.extend(MappedFile::new(Path::new(file))?.into_lines());
        }
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_split_lines() {
        let lines = split_lines(b"b\na\r\n\nc").expect("valid input");
        assert_eq!(lines, vec!["b", "a", "", "c"]);
    }

    #[test]
    fn test_split_lines_trailing_newline() {
        assert_eq!(split_lines(b"x\n").expect("valid input"), vec!["x"]);
        assert!(split_lines(b"").expect("valid input").is_empty());
        assert_eq!(split_lines(b"\n").expect("valid input"), vec![""]);
    }

    #[test]
    fn test_split_lines_rejects_invalid_utf8() {
        let result = split_lines(b"ok\n\xff\xfe\n");
        assert!(matches!(result, Err(SortError::Utf8Error(_))));
    }

    #[test]
    fn test_mapped_file() -> SortResult<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("input.txt");
        fs::write(&path, "zebra\napple\n")?;

        let mapped = MappedFile::new(&path)?;
        assert_eq!(mapped.into_lines(), vec!["zebra", "apple"]);
        Ok(())
    }

    #[test]
    fn test_empty_file() -> SortResult<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("empty.txt");
        fs::write(&path, "")?;

        assert!(MappedFile::new(&path)?.into_lines().is_empty());
        Ok(())
    }

    #[test]
    fn test_missing_and_directory_inputs() -> SortResult<()> {
        let temp_dir = TempDir::new()?;

        let missing = MappedFile::new(&temp_dir.path().join("missing.txt"));
        assert!(matches!(missing, Err(SortError::FileNotFound { .. })));

        let dir = MappedFile::new(temp_dir.path());
        assert!(matches!(dir, Err(SortError::IsDirectory { .. })));
        Ok(())
    }

    #[test]
    fn test_read_input_concatenates_files() -> SortResult<()> {
        let temp_dir = TempDir::new()?;
        let first = temp_dir.path().join("a.txt");
        let second = temp_dir.path().join("b.txt");
        fs::write(&first, "1\n2")?;
        fs::write(&second, "3\n")?;

        let config = SortConfig::new().with_input_files(vec![
            first.to_string_lossy().to_string(),
            second.to_string_lossy().to_string(),
        ]);
        assert_eq!(read_input(&config)?, vec!["1", "2", "3"]);
        Ok(())
    }
}
