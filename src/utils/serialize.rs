use crate::utils::error::{ExportError, Result};
use serde::{Deserialize, Serialize};
use serde_json::ser::{Formatter, Serializer};
use std::io;
use std::str::FromStr;

/// How a loadout document is laid out on disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonLayout {
    /// Two-space indentation, `serde_json` pretty printing.
    #[default]
    Pretty,
    /// Byte-compatible with files written by the legacy exporter, so an existing
    /// output directory keeps deduplicating: `", "` before every line break and
    /// non-ASCII escaped as `\uXXXX`.
    Compat,
}

impl FromStr for JsonLayout {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(JsonLayout::Pretty),
            "compat" => Ok(JsonLayout::Compat),
            other => Err(ExportError::InvalidConfigValueError {
                field: "layout".to_string(),
                value: other.to_string(),
                reason: "Valid layouts: pretty, compat".to_string(),
            }),
        }
    }
}

pub fn to_json_string<T: Serialize>(value: &T, layout: JsonLayout) -> Result<String> {
    match layout {
        JsonLayout::Pretty => Ok(serde_json::to_string_pretty(value)?),
        JsonLayout::Compat => {
            let mut out = Vec::with_capacity(1024);
            let mut serializer = Serializer::with_formatter(&mut out, CompatFormatter::new());
            value.serialize(&mut serializer)?;
            // the formatter only emits ASCII
            String::from_utf8(out).map_err(|e| ExportError::ConfigError {
                message: format!("compat layout produced invalid UTF-8: {}", e),
            })
        }
    }
}

/// Pretty printer with the legacy separators.
struct CompatFormatter {
    current_indent: usize,
    has_value: bool,
}

impl CompatFormatter {
    const INDENT: &'static [u8] = b"  ";

    fn new() -> Self {
        Self {
            current_indent: 0,
            has_value: false,
        }
    }

    fn indent<W: ?Sized + io::Write>(&self, writer: &mut W) -> io::Result<()> {
        for _ in 0..self.current_indent {
            writer.write_all(Self::INDENT)?;
        }
        Ok(())
    }

    fn open<W: ?Sized + io::Write>(&mut self, writer: &mut W, bracket: &[u8]) -> io::Result<()> {
        self.current_indent += 1;
        self.has_value = false;
        writer.write_all(bracket)
    }

    fn close<W: ?Sized + io::Write>(&mut self, writer: &mut W, bracket: &[u8]) -> io::Result<()> {
        self.current_indent -= 1;
        if self.has_value {
            writer.write_all(b"\n")?;
            self.indent(writer)?;
        }
        writer.write_all(bracket)
    }

    fn item<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        let separator: &[u8] = if first { b"\n" } else { b", \n" };
        writer.write_all(separator)?;
        self.indent(writer)
    }
}

impl Formatter for CompatFormatter {
    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.open(writer, b"[")
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.close(writer, b"]")
    }

    fn begin_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.item(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, _writer: &mut W) -> io::Result<()> {
        self.has_value = true;
        Ok(())
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.open(writer, b"{")
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.close(writer, b"}")
    }

    fn begin_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.item(writer, first)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, _writer: &mut W) -> io::Result<()> {
        self.has_value = true;
        Ok(())
    }

    fn write_string_fragment<W: ?Sized + io::Write>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()> {
        let mut units = [0u16; 2];
        for c in fragment.chars() {
            // printable ASCII passes through; DEL and beyond are escaped
            if c.is_ascii() && c != '\u{7f}' {
                writer.write_all(&[c as u8])?;
            } else {
                for unit in c.encode_utf16(&mut units) {
                    writer.write_all(format!("\\u{:04x}", unit).as_bytes())?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pretty_layout() {
        let value = json!({"a": [1, null], "b": {}});
        assert_eq!(
            to_json_string(&value, JsonLayout::Pretty).unwrap(),
            "{\n  \"a\": [\n    1,\n    null\n  ],\n  \"b\": {}\n}"
        );
    }

    #[test]
    fn test_compat_layout_separators() {
        let value = json!({"a": [1, null], "b": {}, "c": []});
        assert_eq!(
            to_json_string(&value, JsonLayout::Compat).unwrap(),
            "{\n  \"a\": [\n    1, \n    null\n  ], \n  \"b\": {}, \n  \"c\": []\n}"
        );
    }

    #[test]
    fn test_compat_layout_escapes_non_ascii() {
        let value = json!({"name": "Caf\u{e9} \u{1F680}"});
        assert_eq!(
            to_json_string(&value, JsonLayout::Compat).unwrap(),
            "{\n  \"name\": \"Caf\\u00e9 \\ud83d\\ude80\"\n}"
        );
    }

    #[test]
    fn test_layout_from_str() {
        assert_eq!("compat".parse::<JsonLayout>().unwrap(), JsonLayout::Compat);
        assert_eq!("Pretty".parse::<JsonLayout>().unwrap(), JsonLayout::Pretty);
        assert!("yaml".parse::<JsonLayout>().is_err());
    }
}
