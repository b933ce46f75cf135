//! Line sink: stdout or the `-o` file

use crate::config::SortConfig;
use crate::error::{SortContext, SortResult};
use std::fs::File;
use std::io::{self, BufWriter, Write};

/// Write each line followed by `\n`, then flush
pub fn write_lines<W: Write>(output: &mut W, lines: &[String]) -> io::Result<()> {
    for line in lines {
        output.write_all(line.as_bytes())?;
        output.write_all(b"\n")?;
    }
    output.flush()
}

/// Write sorted output to the configured destination
pub fn write_output(config: &SortConfig, lines: &[String]) -> SortResult<()> {
    match &config.output_file {
        Some(output_file) => {
            let file = File::create(output_file).with_file_context(output_file)?;
            write_lines(&mut BufWriter::new(file), lines).with_file_context(output_file)
        }
        None => {
            let stdout = io::stdout();
            write_lines(&mut BufWriter::new(stdout.lock()), lines)
                .with_context(|| "writing standard output".to_string())
        }
    }
}
