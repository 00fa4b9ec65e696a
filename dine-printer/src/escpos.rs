//! ESC/POS command builder
//!
//! Provides a fluent API for building ESC/POS print data. A plain-text
//! rendition of every line is kept alongside the command stream so the same
//! receipt can be previewed on screen.

use crate::encoding::{Encoding, display_width, pad_width};

/// Finished print job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    /// Encoded ESC/POS bytes
    pub data: Vec<u8>,
    /// Plain-text rendition without commands
    pub preview: String,
}

/// ESC/POS command builder
pub struct EscPosBuilder {
    buf: Vec<u8>,
    preview: String,
    width: usize,
    encoding: Encoding,
    centered: bool,
}

impl EscPosBuilder {
    /// Create a new builder with the specified paper width in characters
    ///
    /// Common widths:
    /// - 58mm paper: 32 characters
    /// - 80mm paper: 48 characters
    pub fn new(width: usize) -> Self {
        let mut buf = Vec::with_capacity(2048);
        // Initialize printer (ESC @)
        buf.extend_from_slice(&[0x1B, 0x40]);
        Self {
            buf,
            preview: String::new(),
            width,
            encoding: Encoding::default(),
            centered: false,
        }
    }

    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Get the configured paper width
    pub fn width(&self) -> usize {
        self.width
    }

    // === Text Output ===

    /// Write raw text
    pub fn text(&mut self, s: &str) -> &mut Self {
        self.buf.extend_from_slice(s.as_bytes());
        self.preview.push_str(s);
        self
    }

    /// Write text followed by newline
    pub fn line(&mut self, s: &str) -> &mut Self {
        self.buf.extend_from_slice(s.as_bytes());
        self.buf.push(b'\n');
        if self.centered {
            let pad = self.width.saturating_sub(display_width(s)) / 2;
            self.preview.push_str(&" ".repeat(pad));
        }
        self.preview.push_str(s);
        self.preview.push('\n');
        self
    }

    /// Write empty line
    pub fn newline(&mut self) -> &mut Self {
        self.buf.push(b'\n');
        self.preview.push('\n');
        self
    }

    /// Print and feed n lines
    pub fn feed(&mut self, lines: u8) -> &mut Self {
        // ESC d n
        self.buf.extend_from_slice(&[0x1B, 0x64, lines]);
        for _ in 0..lines {
            self.preview.push('\n');
        }
        self
    }

    // === Alignment ===

    pub fn center(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x61, 0x01]);
        self.centered = true;
        self
    }

    pub fn left(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x61, 0x00]);
        self.centered = false;
        self
    }

    // === Text Style ===

    pub fn bold(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x45, 0x01]);
        self
    }

    pub fn bold_off(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1B, 0x45, 0x00]);
        self
    }

    /// Double width and height
    pub fn double_size(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1D, 0x21, 0x11]);
        self
    }

    /// Double height only
    pub fn double_height(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1D, 0x21, 0x01]);
        self
    }

    pub fn reset_size(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1D, 0x21, 0x00]);
        self
    }

    // === Separators ===

    pub fn sep_double(&mut self) -> &mut Self {
        self.line(&"=".repeat(self.width))
    }

    pub fn sep_single(&mut self) -> &mut Self {
        self.line(&"-".repeat(self.width))
    }

    // === Layout Helpers ===

    /// Print left and right text on the same line
    pub fn line_lr(&mut self, left: &str, right: &str) -> &mut Self {
        let lw = display_width(left);
        let rw = display_width(right);

        if lw + rw >= self.width {
            self.line(&format!("{left} {right}"))
        } else {
            let spaces = self.width - lw - rw;
            self.line(&format!("{left}{}{right}", " ".repeat(spaces)))
        }
    }

    /// Item row: name, quantity and amount columns
    ///
    /// Long names wrap onto following lines under the name column.
    pub fn item_row(&mut self, name: &str, qty: &str, amount: &str) -> &mut Self {
        let qty_w = 5;
        let amount_w = 10;
        let name_w = self.width.saturating_sub(qty_w + amount_w).max(1);

        let chars: Vec<char> = name.chars().collect();
        let mut chunks = chars.chunks(name_w);
        let first: String = chunks.next().map(|c| c.iter().collect()).unwrap_or_default();
        let row = format!(
            "{}{}{}",
            pad_width(&first, name_w, false),
            pad_width(qty, qty_w, true),
            pad_width(amount, amount_w, true)
        );
        self.line(&row);
        for rest in chunks {
            let rest: String = rest.iter().collect();
            self.line(&rest);
        }
        self
    }

    // === Paper Control ===

    /// Full cut after feeding n lines (GS V 66 n)
    pub fn cut_feed(&mut self, lines: u8) -> &mut Self {
        self.buf.extend_from_slice(&[0x1D, 0x56, 0x42, lines]);
        self
    }

    /// Cut paper (full cut)
    pub fn cut(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&[0x1D, 0x56, 0x00]);
        self
    }

    /// Open cash drawer (pin 2)
    pub fn open_drawer(&mut self) -> &mut Self {
        // ESC p m t1 t2
        self.buf.extend_from_slice(&[0x1B, 0x70, 0x00, 25, 250]);
        self
    }

    // === Build ===

    /// Encode for the printer and keep the preview
    pub fn build(self) -> Ticket {
        Ticket {
            data: self.encoding.encode(&self.buf),
            preview: self.preview,
        }
    }

    /// Command stream without code page conversion
    pub fn build_raw(self) -> Vec<u8> {
        self.buf
    }

    pub fn preview(&self) -> &str {
        &self.preview
    }
}

impl Default for EscPosBuilder {
    fn default() -> Self {
        Self::new(48)
    }
}
