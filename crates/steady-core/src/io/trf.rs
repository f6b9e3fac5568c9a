use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::consts::TRANSFORM_FILE_EXTENSION;
use crate::error::{Result, StabilizeError};
use crate::pipeline::config::{Algorithm, DetectOptions};
use crate::stream::TransformStream;
use crate::transform::Transform;

/// Configuration recorded in the comment block of a transform file.
#[derive(Clone, Debug, PartialEq)]
pub struct StreamHeader {
    pub accuracy: u32,
    pub shakiness: u32,
    pub step_size: usize,
    pub algorithm: Algorithm,
    pub min_contrast: f64,
    /// Path the transforms were written to, when known.
    pub result: Option<PathBuf>,
}

impl From<&DetectOptions> for StreamHeader {
    fn from(options: &DetectOptions) -> Self {
        Self {
            accuracy: options.accuracy,
            shakiness: options.shakiness,
            step_size: options.step_size,
            algorithm: options.algorithm,
            min_contrast: options.min_contrast,
            result: options.result.clone(),
        }
    }
}

impl Default for StreamHeader {
    fn default() -> Self {
        Self::from(&DetectOptions::default())
    }
}

/// One record line: `<frame> <x> <y> <alpha> <zoom> <extra>`.
pub fn format_record(frame: usize, t: &Transform) -> String {
    format!(
        "{} {:6.4} {:6.4} {:8.5} {:6.4} {}",
        frame, t.dx, t.dy, t.alpha, t.zoom, t.extra
    )
}

/// Write the header block followed by one record per frame.
pub fn write_transforms<W: Write>(
    writer: &mut W,
    header: &StreamHeader,
    stream: &TransformStream,
) -> Result<()> {
    writeln!(writer, "#      accuracy = {}", header.accuracy)?;
    writeln!(writer, "#     shakiness = {}", header.shakiness)?;
    writeln!(writer, "#      stepsize = {}", header.step_size)?;
    writeln!(writer, "#          algo = {}", header.algorithm.code())?;
    writeln!(writer, "#   mincontrast = {:.6}", header.min_contrast)?;
    if let Some(ref result) = header.result {
        writeln!(writer, "#        result = {}", result.display())?;
    }
    writeln!(writer, "# Transforms")?;
    writeln!(writer, "#C FrameNr x y alpha zoom extra")?;
    for (frame, t) in stream.iter() {
        writeln!(writer, "{}", format_record(frame, t))?;
    }
    Ok(())
}

fn parse_error(line: usize, reason: impl Into<String>) -> StabilizeError {
    StabilizeError::TransformParse {
        line,
        reason: reason.into(),
    }
}

fn parse_field<T: std::str::FromStr>(token: &str, name: &str, line: usize) -> Result<T> {
    token
        .parse()
        .map_err(|_| parse_error(line, format!("invalid {name} '{token}'")))
}

/// Parse one record line into its frame index and transform.
pub fn parse_record(text: &str, line: usize) -> Result<(usize, Transform)> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() != 6 {
        return Err(parse_error(
            line,
            format!("expected 6 columns, found {}", tokens.len()),
        ));
    }
    let frame = parse_field(tokens[0], "frame number", line)?;
    let transform = Transform {
        dx: parse_field(tokens[1], "x", line)?,
        dy: parse_field(tokens[2], "y", line)?,
        alpha: parse_field(tokens[3], "alpha", line)?,
        zoom: parse_field(tokens[4], "zoom", line)?,
        extra: parse_field(tokens[5], "extra", line)?,
    };
    Ok((frame, transform))
}

/// Apply a `# key = value` comment to the header. Other comments are ignored.
fn parse_header_comment(comment: &str, header: &mut StreamHeader, line: usize) -> Result<()> {
    let Some((key, value)) = comment.split_once('=') else {
        return Ok(());
    };
    let value = value.trim();
    match key.trim() {
        "accuracy" => header.accuracy = parse_field(value, "accuracy", line)?,
        "shakiness" => header.shakiness = parse_field(value, "shakiness", line)?,
        "stepsize" => header.step_size = parse_field(value, "stepsize", line)?,
        "algo" => {
            let code: u32 = parse_field(value, "algo", line)?;
            header.algorithm =
                Algorithm::from_code(code).map_err(|e| parse_error(line, e.to_string()))?;
        }
        "mincontrast" => header.min_contrast = parse_field(value, "mincontrast", line)?,
        "result" if !value.is_empty() => header.result = Some(PathBuf::from(value)),
        _ => {}
    }
    Ok(())
}

/// Read a transform file. Header values missing from the file keep their defaults.
///
/// Records must be numbered consecutively from 0.
pub fn read_transforms<R: BufRead>(reader: R) -> Result<(StreamHeader, TransformStream)> {
    let mut header = StreamHeader::default();
    let mut stream = TransformStream::new();

    for (i, line) in reader.lines().enumerate() {
        let line_no = i + 1;
        let line = line?;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        if let Some(comment) = text.strip_prefix('#') {
            parse_header_comment(comment, &mut header, line_no)?;
            continue;
        }
        let (frame, transform) = parse_record(text, line_no)?;
        if frame != stream.len() {
            return Err(parse_error(
                line_no,
                format!("expected frame {}, found {frame}", stream.len()),
            ));
        }
        stream.push(transform);
    }

    Ok((header, stream))
}

/// Write a transform file to `path`.
pub fn save_transforms(path: &Path, header: &StreamHeader, stream: &TransformStream) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_transforms(&mut writer, header, stream)?;
    writer.flush()?;
    Ok(())
}

pub fn load_transforms(path: &Path) -> Result<(StreamHeader, TransformStream)> {
    read_transforms(BufReader::new(File::open(path)?))
}

/// `<input file name>.trf`, next to the input.
pub fn default_result_path(input: &Path) -> PathBuf {
    let mut name = input
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "transforms".into());
    name.push(".");
    name.push(TRANSFORM_FILE_EXTENSION);
    input.with_file_name(name)
}
