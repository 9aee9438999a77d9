// Licensed under the Apache-2.0 license

//! SystemRDL emission.
//!
//! Walks blocks, then each block's registers, then each register's fields
//! (sorted by LSB), writing directly to the output as it descends. No
//! document tree is kept.
//!
//! ```text
//! addrmap UART {
//!     name = "UART";
//!     desc = "UART Block";
//!
//!     // Register CTRL
//!     reg {
//!         name = "CTRL";
//!         desc = "CTRL Register";
//!         regwidth = 32;
//!
//!         field {
//!             name = "EN";
//!             desc = "EN field";
//!             sw = rw;
//!             hw = r;
//!         } EN[0:0] = 1'b0;
//!
//!     } CTRL @ 0x0;
//!
//! };
//! ```
//!
//! Progress is reported through an [`EmitObserver`] supplied by the caller,
//! so the emitter itself never prints.

use crate::access::{map_access, OnWrite, SwAccess};
use crate::error::SheetResult;
use crate::index::SpecIndex;
use crate::schema::{Block, Field, Register, RegisterSpec};
use crate::util::{escape_string, msb, reset_binary, sanitize_name};
use log::{info, warn};
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

const INDENT: &str = "    ";

/// A field as it is about to be written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldLayout {
    pub name: String,
    pub description: String,
    pub lsb: u32,
    pub msb: u32,
    pub width: u32,
    pub sw: SwAccess,
    pub onwrite: Option<OnWrite>,
    /// Reset value as binary digits, at least `width` long.
    pub reset_bits: String,
    /// Access code as written in the sheet.
    pub access: String,
}

impl FieldLayout {
    pub fn new(field: &Field) -> Self {
        let name = sanitize_name(&field.name);
        let description = field
            .description
            .clone()
            .unwrap_or_else(|| format!("{name} field"));
        let (sw, onwrite) = map_access(&field.access);
        Self {
            description,
            lsb: field.lsb,
            msb: msb(field.lsb, field.width),
            width: field.width,
            sw,
            onwrite,
            reset_bits: reset_binary(field.reset, field.width),
            access: field.access.clone(),
            name,
        }
    }
}

impl fmt::Display for FieldLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}:{}] = {}'b{} ({})",
            self.name, self.msb, self.lsb, self.width, self.reset_bits, self.access
        )
    }
}

/// Receives progress notifications while a document is emitted.
///
/// All methods default to doing nothing.
pub trait EmitObserver {
    fn block(&mut self, _name: &str, _block: &Block) {}
    fn missing_registers(&mut self, _block: &str) {}
    fn register(&mut self, _name: &str, _register: &Register) {}
    fn missing_fields(&mut self, _register: &str) {}
    fn field(&mut self, _field: &FieldLayout) {}
}

/// Ignores all progress.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullObserver;

impl EmitObserver for NullObserver {}

/// Reports progress through the `log` crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogObserver;

impl EmitObserver for LogObserver {
    fn block(&mut self, name: &str, block: &Block) {
        info!("Processing block {name} @ {}", block.base_address);
    }

    fn missing_registers(&mut self, block: &str) {
        warn!("No registers found for block {block}");
    }

    fn register(&mut self, name: &str, register: &Register) {
        info!("  Processing register {name} @ {}", register.offset);
    }

    fn missing_fields(&mut self, register: &str) {
        warn!("No fields found for register {register}");
    }

    fn field(&mut self, field: &FieldLayout) {
        info!("    - Field {field}");
    }
}

/// Counts of what was written.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EmitStats {
    pub blocks: usize,
    pub registers: usize,
    pub fields: usize,
}

/// Writes a [`RegisterSpec`] as SystemRDL to `out`.
pub fn emit_rdl<W: Write + ?Sized>(
    spec: &RegisterSpec,
    out: &mut W,
    observer: &mut dyn EmitObserver,
) -> io::Result<EmitStats> {
    let mut emitter = Emitter {
        index: SpecIndex::new(spec),
        out,
        observer,
        stats: EmitStats::default(),
    };
    for block in &spec.blocks {
        emitter.block(block)?;
    }
    Ok(emitter.stats)
}

/// Renders a [`RegisterSpec`] as a SystemRDL string.
pub fn generate_rdl(spec: &RegisterSpec, observer: &mut dyn EmitObserver) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = emit_rdl(spec, &mut buf, observer);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Writes a [`RegisterSpec`] as SystemRDL to a new file at `path`.
///
/// The file is closed when this returns. If emission fails partway, the
/// partial output is left in place.
pub fn generate_rdl_file(
    spec: &RegisterSpec,
    path: &Path,
    observer: &mut dyn EmitObserver,
) -> SheetResult<EmitStats> {
    let mut out = BufWriter::new(File::create(path)?);
    let stats = emit_rdl(spec, &mut out, observer)?;
    out.flush()?;
    Ok(stats)
}

struct Emitter<'a, 'o, W: Write + ?Sized> {
    index: SpecIndex<'a>,
    out: &'o mut W,
    observer: &'o mut dyn EmitObserver,
    stats: EmitStats,
}

impl<W: Write + ?Sized> Emitter<'_, '_, W> {
    fn block(&mut self, block: &Block) -> io::Result<()> {
        let name = sanitize_name(&block.name);
        let desc = block
            .description
            .clone()
            .unwrap_or_else(|| format!("{name} Block"));
        self.observer.block(&name, block);
        self.stats.blocks += 1;

        writeln!(self.out, "addrmap {name} {{")?;
        writeln!(self.out, "{INDENT}name = \"{name}\";")?;
        writeln!(self.out, "{INDENT}desc = \"{}\";", escape_string(&desc))?;
        writeln!(self.out)?;

        let registers = self.index.registers(&block.name).to_vec();
        if registers.is_empty() {
            self.observer.missing_registers(&name);
            writeln!(self.out, "{INDENT}// No registers found for this block")?;
            writeln!(self.out)?;
        }
        for register in registers {
            self.register(register)?;
        }

        writeln!(self.out, "}};")?;
        writeln!(self.out)?;
        Ok(())
    }

    fn register(&mut self, register: &Register) -> io::Result<()> {
        let name = sanitize_name(&register.name);
        let desc = register
            .description
            .clone()
            .unwrap_or_else(|| format!("{name} Register"));
        self.observer.register(&name, register);
        self.stats.registers += 1;

        let i2 = INDENT.repeat(2);
        writeln!(self.out, "{INDENT}// Register {name}")?;
        writeln!(self.out, "{INDENT}reg {{")?;
        writeln!(self.out, "{i2}name = \"{name}\";")?;
        writeln!(self.out, "{i2}desc = \"{}\";", escape_string(&desc))?;
        writeln!(self.out, "{i2}regwidth = {};", register.width)?;
        writeln!(self.out)?;

        let fields = self.index.fields_sorted(&register.name);
        if fields.is_empty() {
            self.observer.missing_fields(&name);
            writeln!(self.out, "{i2}// No fields found for this register")?;
            writeln!(self.out)?;
        }
        for field in fields {
            self.field(&FieldLayout::new(field))?;
        }

        writeln!(self.out, "{INDENT}}} {name} @ {};", register.offset)?;
        writeln!(self.out)?;
        Ok(())
    }

    fn field(&mut self, field: &FieldLayout) -> io::Result<()> {
        self.observer.field(field);
        self.stats.fields += 1;

        let i2 = INDENT.repeat(2);
        let i3 = INDENT.repeat(3);
        writeln!(self.out, "{i2}field {{")?;
        writeln!(self.out, "{i3}name = \"{}\";", field.name)?;
        writeln!(self.out, "{i3}desc = \"{}\";", escape_string(&field.description))?;
        writeln!(self.out, "{i3}sw = {};", field.sw)?;
        writeln!(self.out, "{i3}hw = r;")?;
        if let Some(onwrite) = field.onwrite {
            writeln!(self.out, "{i3}onwrite = {onwrite};")?;
        }
        writeln!(
            self.out,
            "{i2}}} {}[{}:{}] = {}'b{};",
            field.name, field.msb, field.lsb, field.width, field.reset_bits
        )?;
        writeln!(self.out)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(name: &str) -> Block {
        Block {
            name: name.into(),
            base_address: "0x1000".into(),
            description: None,
        }
    }

    fn register(block: &str, name: &str, offset: &str) -> Register {
        Register {
            block: block.into(),
            name: name.into(),
            offset: offset.into(),
            description: None,
            width: 32,
        }
    }

    fn field(register: &str, name: &str, lsb: u32, width: u32, access: &str, reset: u64) -> Field {
        Field {
            register: register.into(),
            name: name.into(),
            lsb,
            width,
            access: access.into(),
            reset,
            description: None,
        }
    }

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl EmitObserver for Recorder {
        fn block(&mut self, name: &str, _block: &Block) {
            self.events.push(format!("block {name}"));
        }
        fn missing_registers(&mut self, block: &str) {
            self.events.push(format!("no registers {block}"));
        }
        fn register(&mut self, name: &str, _register: &Register) {
            self.events.push(format!("register {name}"));
        }
        fn missing_fields(&mut self, register: &str) {
            self.events.push(format!("no fields {register}"));
        }
        fn field(&mut self, field: &FieldLayout) {
            self.events.push(format!("field {field}"));
        }
    }

    #[test]
    fn test_field_layout() {
        let layout = FieldLayout::new(&field("R", "irq-pending", 4, 3, "w1c", 5));
        assert_eq!(layout.name, "irq_pending");
        assert_eq!(layout.description, "irq_pending field");
        assert_eq!(layout.msb, 6);
        assert_eq!(layout.sw, SwAccess::WriteOnly);
        assert_eq!(layout.onwrite, Some(OnWrite::ClearOnWrite));
        assert_eq!(layout.reset_bits, "101");
        assert_eq!(layout.to_string(), "irq_pending[6:4] = 3'b101 (w1c)");
    }

    #[test]
    fn test_full_document() {
        let spec = RegisterSpec {
            blocks: vec![block("UART")],
            registers: vec![register("UART", "CTRL", "0x0")],
            fields: vec![field("CTRL", "EN", 0, 1, "rw", 0)],
        };
        let expected = r#"addrmap UART {
    name = "UART";
    desc = "UART Block";

    // Register CTRL
    reg {
        name = "CTRL";
        desc = "CTRL Register";
        regwidth = 32;

        field {
            name = "EN";
            desc = "EN field";
            sw = rw;
            hw = r;
        } EN[0:0] = 1'b0;

    } CTRL @ 0x0;

};

"#;
        assert_eq!(generate_rdl(&spec, &mut NullObserver), expected);
    }

    #[test]
    fn test_w1c_field() {
        let spec = RegisterSpec {
            blocks: vec![block("B")],
            registers: vec![register("B", "INT", "0x8")],
            fields: vec![field("INT", "pend", 4, 3, "W1C", 5)],
        };
        let rdl = generate_rdl(&spec, &mut NullObserver);
        assert!(rdl.contains(
            "            sw = w;\n            hw = r;\n            onwrite = woclr;\n        } pend[6:4] = 3'b101;\n"
        ));
    }

    #[test]
    fn test_empty_block_and_register() {
        let spec = RegisterSpec {
            blocks: vec![block("EMPTY"), block("B")],
            registers: vec![register("B", "R", "0x4")],
            fields: vec![],
        };
        let mut recorder = Recorder::default();
        let rdl = generate_rdl(&spec, &mut recorder);
        assert!(rdl.starts_with(
            "addrmap EMPTY {\n    name = \"EMPTY\";\n    desc = \"EMPTY Block\";\n\n    // No registers found for this block\n\n};\n\n"
        ));
        assert!(rdl.contains(
            "        regwidth = 32;\n\n        // No fields found for this register\n\n    } R @ 0x4;\n"
        ));
        assert!(!rdl.contains("field {"));
        assert_eq!(
            recorder.events,
            ["block EMPTY", "no registers EMPTY", "block B", "register R", "no fields R"]
        );
    }

    #[test]
    fn test_order_and_stats() {
        let spec = RegisterSpec {
            blocks: vec![block("A"), block("B")],
            registers: vec![
                register("B", "b0", "0x0"),
                register("A", "a0", "0x0"),
                register("A", "a1", "0x4"),
            ],
            fields: vec![
                field("a0", "hi", 16, 16, "ro", 0),
                field("a0", "lo", 0, 8, "rw", 0xff),
                field("a0", "mid", 8, 8, "wo", 1),
            ],
        };
        let mut buf = Vec::new();
        let mut recorder = Recorder::default();
        let stats = emit_rdl(&spec, &mut buf, &mut recorder).unwrap();
        assert_eq!(
            stats,
            EmitStats {
                blocks: 2,
                registers: 3,
                fields: 3
            }
        );
        assert_eq!(
            recorder.events,
            [
                "block A",
                "register a0",
                "field lo[7:0] = 8'b11111111 (rw)",
                "field mid[15:8] = 8'b00000001 (wo)",
                "field hi[31:16] = 16'b0000000000000000 (ro)",
                "register a1",
                "no fields a1",
                "block B",
                "register b0",
                "no fields b0",
            ]
        );
        let rdl = String::from_utf8(buf).unwrap();
        let a1 = rdl.find("} a1 @ 0x4;").unwrap();
        let b0 = rdl.find("} b0 @ 0x0;").unwrap();
        assert!(a1 < b0);
    }

    #[test]
    fn test_descriptions_are_escaped() {
        let mut b = block("B");
        b.description = Some(r#"The "main" block"#.into());
        let spec = RegisterSpec {
            blocks: vec![b],
            registers: vec![],
            fields: vec![],
        };
        let rdl = generate_rdl(&spec, &mut NullObserver);
        assert!(rdl.contains(r#"desc = "The \"main\" block";"#));
    }

    #[test]
    fn test_regwidth_and_sanitized_names() {
        let mut reg = register("my block", "data reg", "0x10");
        reg.width = 8;
        let spec = RegisterSpec {
            blocks: vec![block("my block")],
            registers: vec![reg],
            fields: vec![field("data reg", "byte-0", 0, 8, "rw", 0)],
        };
        let rdl = generate_rdl(&spec, &mut NullObserver);
        assert!(rdl.starts_with("addrmap my_block {\n"));
        assert!(rdl.contains("        regwidth = 8;\n"));
        assert!(rdl.contains("    } data_reg @ 0x10;\n"));
        assert!(rdl.contains("        } byte_0[7:0] = 8'b00000000;\n"));
    }
}
