//! Assembly-style text output for a [`Module`].

use core::fmt::Write as _;

use crate::layout::DXIL_DATA_LAYOUT;
use crate::module::{Function, Instruction, InstructionKind, Module, Value};
use crate::types::{Type, TypeId};

pub const DXIL_TRIPLE: &str = "dxil-ms-dx";

/// Hooks that let a caller add text while a module prints.
///
/// Mirrors the assembly annotation writers of LLVM-style printers: every hook
/// defaults to writing nothing.
pub trait AnnotationWriter {
    /// Called before a function's `define`/`declare` line.
    fn function_comment(&self, _module: &Module, _function: &Function, _out: &mut String) {}

    /// Called after an instruction's text, before its line break.
    fn info_comment(&self, _module: &Module, _instruction: &Instruction, _out: &mut String) {}
}

/// An [`AnnotationWriter`] that adds nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoAnnotations;

impl AnnotationWriter for NoAnnotations {}

impl Module {
    /// Appends the module's text to `out`.
    pub fn print(&self, out: &mut String, writer: &dyn AnnotationWriter) {
        Printer {
            module: self,
            writer,
            out,
        }
        .module();
    }

    /// Returns the module's text without annotations.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        self.print(&mut out, &NoAnnotations);
        out
    }
}

struct Printer<'a> {
    module: &'a Module,
    writer: &'a dyn AnnotationWriter,
    out: &'a mut String,
}

impl Printer<'_> {
    fn module(&mut self) {
        let m = self.module;
        let _ = writeln!(self.out, "; ModuleID = '{}'", m.name);
        if let Some(undecoded) = &m.undecoded {
            let _ = writeln!(
                self.out,
                "; {} bytes of undecoded bitcode{}",
                undecoded.len,
                if undecoded.wrapped { " (wrapped)" } else { "" }
            );
        }
        let _ = writeln!(self.out, "target datalayout = \"{DXIL_DATA_LAYOUT}\"");
        let _ = writeln!(self.out, "target triple = \"{DXIL_TRIPLE}\"");

        let structs: Vec<TypeId> = m.types.named_structs().collect();
        if !structs.is_empty() {
            self.out.push('\n');
            for id in structs {
                self.struct_definition(id);
            }
        }

        if !m.globals.is_empty() {
            self.out.push('\n');
            for g in &m.globals {
                let _ = writeln!(
                    self.out,
                    "@{} = external {} {}",
                    g.name,
                    if g.constant { "constant" } else { "global" },
                    m.types.display(g.value_type)
                );
            }
        }

        for f in m.functions.iter().filter(|f| !f.is_declaration()) {
            self.out.push('\n');
            self.function(f);
        }
        let declarations: Vec<&Function> =
            m.functions.iter().filter(|f| f.is_declaration()).collect();
        if !declarations.is_empty() {
            self.out.push('\n');
            for f in declarations {
                self.function(f);
            }
        }

        self.metadata();
    }

    fn struct_definition(&mut self, id: TypeId) {
        let types = &self.module.types;
        let fields = types.struct_fields(id);
        let _ = write!(self.out, "{} = type {{", types.display(id));
        for (i, field) in fields.iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            let _ = write!(self.out, "{sep}{}", types.display(*field));
        }
        self.out.push_str(if fields.is_empty() { "}\n" } else { " }\n" });
    }

    fn function(&mut self, f: &Function) {
        let types = &self.module.types;
        self.writer.function_comment(self.module, f, self.out);
        let (ret, params) = match types.get(f.ty) {
            Type::Function { ret, params } => (*ret, params.as_slice()),
            _ => {
                let _ = writeln!(self.out, "; @{} has non-function type", f.name);
                return;
            }
        };

        let keyword = if f.is_declaration() { "declare" } else { "define" };
        let _ = write!(self.out, "{keyword} {} @{}(", types.display(ret), f.name);
        for (i, param) in params.iter().enumerate() {
            if i != 0 {
                self.out.push_str(", ");
            }
            let _ = write!(self.out, "{}", types.display(*param));
            if !f.is_declaration() {
                let _ = write!(self.out, " %{i}");
            }
        }
        if f.is_declaration() {
            self.out.push_str(")\n");
            return;
        }
        self.out.push_str(") {\n");

        for (i, block) in f.blocks.iter().enumerate() {
            if i != 0 {
                self.out.push('\n');
            }
            let _ = writeln!(self.out, "{}:", block.label);
            for inst in &block.instructions {
                self.out.push_str("  ");
                self.instruction(inst);
                self.writer.info_comment(self.module, inst, self.out);
                self.out.push('\n');
            }
        }
        self.out.push_str("}\n");
    }

    fn instruction(&mut self, inst: &Instruction) {
        if let Some(result) = &inst.result {
            let _ = write!(self.out, "%{result} = ");
        }
        match &inst.kind {
            InstructionKind::Call { callee, args } => {
                let m = self.module;
                match m.function(*callee) {
                    Some(f) => {
                        let ret = match m.types.get(f.ty) {
                            Type::Function { ret, .. } => m.types.display(*ret).to_string(),
                            _ => "void".to_owned(),
                        };
                        let _ = write!(self.out, "call {ret} @{}(", f.name);
                    }
                    None => {
                        let _ = write!(self.out, "call void @<invalid function #{}>(", callee.0);
                    }
                }
                for (i, arg) in args.iter().enumerate() {
                    if i != 0 {
                        self.out.push_str(", ");
                    }
                    self.typed_value(arg);
                }
                self.out.push(')');
            }
            InstructionKind::Ret(None) => self.out.push_str("ret void"),
            InstructionKind::Ret(Some(value)) => {
                self.out.push_str("ret ");
                self.typed_value(value);
            }
            InstructionKind::Opaque(text) => self.out.push_str(text),
        }
    }

    fn typed_value(&mut self, value: &Value) {
        let m = self.module;
        match m.value_type(value) {
            Some(ty) => {
                let _ = write!(self.out, "{} ", m.types.display(ty));
            }
            None => self.out.push_str("<badref> "),
        }
        self.value(value);
    }

    fn value(&mut self, value: &Value) {
        let m = self.module;
        match value {
            Value::ConstantInt { ty, value } => {
                let bits = match m.types.get(*ty) {
                    Type::Integer { bits } => *bits,
                    _ => 64,
                };
                if bits == 1 {
                    self.out.push_str(if *value & 1 != 0 { "true" } else { "false" });
                } else {
                    let _ = write!(self.out, "{}", sign_extend(*value, bits));
                }
            }
            Value::ConstantFloat { value, .. } => self.out.push_str(&format_float(*value)),
            Value::Undef(_) => self.out.push_str("undef"),
            Value::Local { name, .. } => {
                let _ = write!(self.out, "%{name}");
            }
            Value::Global(id) => match m.global(*id) {
                Some(g) => {
                    let _ = write!(self.out, "@{}", g.name);
                }
                None => self.out.push_str("@<invalid global>"),
            },
            Value::Function(id) => match m.function(*id) {
                Some(f) => {
                    let _ = write!(self.out, "@{}", f.name);
                }
                None => self.out.push_str("@<invalid function>"),
            },
        }
    }

    fn metadata(&mut self) {
        let named = &self.module.named_metadata;
        if named.is_empty() {
            return;
        }
        self.out.push('\n');
        let mut next = 0usize;
        for md in named {
            let _ = write!(self.out, "!{} = !{{", md.name);
            for i in 0..md.operands.len() {
                let sep = if i == 0 { "" } else { ", " };
                let _ = write!(self.out, "{sep}!{}", next + i);
            }
            self.out.push_str("}\n");
            next += md.operands.len();
        }
        self.out.push('\n');
        let nodes = named.iter().flat_map(|md| md.operands.iter());
        for (i, node) in nodes.enumerate() {
            let _ = writeln!(self.out, "!{i} = {node}");
        }
    }
}

fn sign_extend(value: u64, bits: u32) -> i64 {
    if bits == 0 || bits >= 64 {
        return value as i64;
    }
    let shift = 64 - bits;
    ((value << shift) as i64) >> shift
}

/// Formats a float the way LLVM assembly does, e.g. `1.000000e+00`.
fn format_float(value: f64) -> String {
    if !value.is_finite() {
        return format!("0x{:016X}", value.to_bits());
    }
    let formatted = format!("{value:.6e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => formatted,
    }
}
