use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use guestlink_frame::HEADER_SIZE;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

pub fn print_frame(framed: &[u8], format: OutputFormat) {
    let payload = &framed[HEADER_SIZE..];
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "payload_size": payload.len(),
                    "wire_size": framed.len(),
                    "payload": payload_preview(payload),
                    "hex": hex_string(framed),
                })
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["PAYLOAD SIZE", "WIRE SIZE", "PAYLOAD", "HEX"])
                .add_row(vec![
                    payload.len().to_string(),
                    framed.len().to_string(),
                    payload_preview(payload),
                    hex_string(framed),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "size={} wire_size={} payload={} hex={}",
                payload.len(),
                framed.len(),
                payload_preview(payload),
                hex_string(framed)
            );
        }
        OutputFormat::Raw => {
            print_raw(framed);
        }
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

fn payload_preview(payload: &[u8]) -> String {
    match std::str::from_utf8(payload) {
        Ok(text) => text.to_string(),
        Err(_) => format!("<binary {} bytes>", payload.len()),
    }
}

fn hex_string(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len() * 3);
    for (i, byte) in data.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&format!("{byte:02x}"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_formatting() {
        assert_eq!(hex_string(&[0x00, 0x0A, 0xFF]), "00 0a ff");
        assert_eq!(hex_string(&[]), "");
    }

    #[test]
    fn binary_payloads_get_placeholder_preview() {
        assert_eq!(payload_preview(b"*IDN?"), "*IDN?");
        assert_eq!(payload_preview(&[0xFF, 0xFE]), "<binary 2 bytes>");
    }
}
