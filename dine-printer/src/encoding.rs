//! Code page handling for thermal printers
//!
//! Receipts are laid out in display columns (one column per `char`) and then
//! encoded for the printer's code table. ASCII bytes pass through untouched so
//! ESC/POS commands survive the conversion.

use std::str::FromStr;
use tracing::instrument;

/// Printer code table number for WPC1256 on Epson-compatible printers
const WPC1256_TABLE: u8 = 50;

/// Target character encoding of the printer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// Non-ASCII characters are replaced with `?`
    #[default]
    Ascii,
    /// Arabic code page
    Windows1256,
}

impl Encoding {
    /// Encode mixed command/text bytes for the printer
    #[instrument(skip(bytes), fields(len = bytes.len()))]
    pub fn encode(&self, bytes: &[u8]) -> Vec<u8> {
        let mut result = Vec::with_capacity(bytes.len());
        let mut buffer = Vec::new();
        let mut i = 0;

        self.select_table(&mut result);

        while i < bytes.len() {
            let b = bytes[i];

            // INIT (ESC @) resets the code table
            if b == 0x1B && i + 1 < bytes.len() && bytes[i + 1] == 0x40 {
                self.flush(&mut buffer, &mut result);
                result.extend_from_slice(&[0x1B, 0x40]);
                self.select_table(&mut result);
                i += 2;
                continue;
            }

            if b < 128 {
                self.flush(&mut buffer, &mut result);
                result.push(b);
            } else {
                buffer.push(b);
            }
            i += 1;
        }

        self.flush(&mut buffer, &mut result);
        result
    }

    fn select_table(&self, out: &mut Vec<u8>) {
        if let Encoding::Windows1256 = self {
            // ESC t n
            out.extend_from_slice(&[0x1B, 0x74, WPC1256_TABLE]);
        }
    }

    fn flush(&self, buffer: &mut Vec<u8>, out: &mut Vec<u8>) {
        if buffer.is_empty() {
            return;
        }
        let s = String::from_utf8_lossy(buffer);
        match self {
            Encoding::Ascii => out.extend(s.chars().map(|_| b'?')),
            Encoding::Windows1256 => {
                for c in s.chars() {
                    let mut tmp = [0u8; 4];
                    let (bytes, _, had_errors) =
                        encoding_rs::WINDOWS_1256.encode(c.encode_utf8(&mut tmp));
                    if had_errors {
                        out.push(b'?');
                    } else {
                        out.extend_from_slice(&bytes);
                    }
                }
            }
        }
        buffer.clear();
    }
}

impl FromStr for Encoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ascii" => Ok(Self::Ascii),
            "windows-1256" | "windows1256" | "cp1256" | "arabic" => Ok(Self::Windows1256),
            other => Err(format!("unknown printer encoding: {other}")),
        }
    }
}

/// Number of printed columns a string occupies
pub fn display_width(s: &str) -> usize {
    s.chars().count()
}

/// Truncate a string to fit within a column width
pub fn truncate_width(s: &str, max_width: usize) -> String {
    s.chars().take(max_width).collect()
}

/// Pad a string to a column width
///
/// If the string is longer than the width, it will be truncated.
pub fn pad_width(s: &str, width: usize, align_right: bool) -> String {
    let current = display_width(s);
    if current >= width {
        return truncate_width(s, width);
    }
    let spaces = " ".repeat(width - current);
    if align_right {
        format!("{spaces}{s}")
    } else {
        format!("{s}{spaces}")
    }
}
