//! Inspect command implementation.

use crate::error::CliResult;
use crate::utils::describe_symbols;
use alzw_codec::{StreamHeader, VERSION};
use serde::{Deserialize, Serialize};

/// JSON serializable view of a stream header.
#[derive(Debug, Serialize, Deserialize)]
struct HeaderJson {
    version: u8,
    policy: String,
    min_width: u8,
    max_width: u8,
    alphabet_size: usize,
    alphabet: String,
    eof_code: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    reset_code: Option<u32>,
    first_code: u32,
    capacity: u32,
    header_bytes: usize,
    payload_bytes: usize,
}

impl HeaderJson {
    fn from_header(header: &StreamHeader, stream_len: usize) -> CliResult<Self> {
        let layout = header.layout()?;
        let header_bytes = header.encoded_len();
        Ok(Self {
            version: VERSION,
            policy: header.config.policy.to_string(),
            min_width: header.config.min_width,
            max_width: header.config.max_width,
            alphabet_size: header.alphabet.len(),
            alphabet: describe_symbols(header.alphabet.symbols()),
            eof_code: layout.eof_code(),
            reset_code: layout.reset_code(),
            first_code: layout.first_code(),
            capacity: layout.capacity(),
            header_bytes,
            payload_bytes: stream_len.saturating_sub(header_bytes),
        })
    }
}

/// Describe the header of a compressed stream.
///
/// The rendered report is returned so the caller writes it only on success.
pub fn cmd_inspect(input: &[u8], json: bool) -> CliResult<Vec<u8>> {
    let header = StreamHeader::parse(input)?;
    let info = HeaderJson::from_header(&header, input.len())?;

    if json {
        let mut out = serde_json::to_vec_pretty(&info)?;
        out.push(b'\n');
        return Ok(out);
    }

    let mut lines = vec![
        "Stream Information".to_string(),
        "==================".to_string(),
        format!("Format version: {}", info.version),
        format!("Policy: {}", info.policy),
        format!("Code width: {}-{} bits", info.min_width, info.max_width),
        format!("Alphabet: {} symbols \"{}\"", info.alphabet_size, info.alphabet),
        String::new(),
        "Code space:".to_string(),
        format!("  EOF: {}", info.eof_code),
    ];
    if let Some(reset) = info.reset_code {
        lines.push(format!("  RESET: {reset}"));
    }
    lines.push(format!("  Learned: {}-{}", info.first_code, info.capacity - 1));
    lines.push(String::new());
    lines.push("Size:".to_string());
    lines.push(format!("  Header: {} bytes", info.header_bytes));
    lines.push(format!("  Codewords: {} bytes", info.payload_bytes));

    let mut out = lines.join("\n");
    out.push('\n');
    Ok(out.into_bytes())
}
