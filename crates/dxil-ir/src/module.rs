//! The in-memory module: globals, functions, instructions and named metadata.

use crate::dxil::DxilModule;
use crate::types::{Type, TypeId, TypeTable};

/// Named metadata whose presence marks a module as DXIL.
pub const DXIL_VERSION_METADATA: &str = "dx.version";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FunctionId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GlobalId(pub u32);

/// An instruction operand. Every operand knows its own type.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// An integer constant, zero-extended to 64 bits.
    ConstantInt { ty: TypeId, value: u64 },
    ConstantFloat { ty: TypeId, value: f64 },
    Undef(TypeId),
    /// A function-local SSA value, printed as `%name`.
    Local { ty: TypeId, name: String },
    Global(GlobalId),
    Function(FunctionId),
}

impl Value {
    /// The constant integer value, if this operand is one.
    pub fn as_constant_int(&self) -> Option<u64> {
        match self {
            Value::ConstantInt { value, .. } => Some(*value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InstructionKind {
    Call { callee: FunctionId, args: Vec<Value> },
    Ret(Option<Value>),
    /// Any other instruction, kept as its assembly text after the `=`.
    Opaque(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    /// Name of the SSA value defined by this instruction, if any.
    pub result: Option<String>,
    pub kind: InstructionKind,
}

impl Instruction {
    pub fn call(result: Option<&str>, callee: FunctionId, args: Vec<Value>) -> Self {
        Self {
            result: result.map(str::to_owned),
            kind: InstructionKind::Call { callee, args },
        }
    }

    pub fn ret(value: Option<Value>) -> Self {
        Self {
            result: None,
            kind: InstructionKind::Ret(value),
        }
    }

    pub fn opaque(result: Option<&str>, text: impl Into<String>) -> Self {
        Self {
            result: result.map(str::to_owned),
            kind: InstructionKind::Opaque(text.into()),
        }
    }

    /// Callee and arguments, if this is a call.
    pub fn as_call(&self) -> Option<(FunctionId, &[Value])> {
        match &self.kind {
            InstructionKind::Call { callee, args } => Some((*callee, args)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BasicBlock {
    pub label: String,
    pub instructions: Vec<Instruction>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: String,
    /// A [`crate::Type::Function`].
    pub ty: TypeId,
    /// Empty for declarations.
    pub blocks: Vec<BasicBlock>,
}

impl Function {
    pub fn is_declaration(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn instructions(&self) -> impl Iterator<Item = &Instruction> {
        self.blocks.iter().flat_map(|block| block.instructions.iter())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GlobalVariable {
    pub name: String,
    /// Type of the value stored in the global; the symbol itself is a pointer to it.
    pub value_type: TypeId,
    /// Pointer-to-`value_type`, the type of the global symbol.
    pub symbol_type: TypeId,
    pub constant: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedMetadata {
    pub name: String,
    /// Body text of each operand node, e.g. `!{i32 1, i32 0}`.
    pub operands: Vec<String>,
}

/// Undecoded bitcode carried by modules produced by [`crate::BitcodeLoader`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndecodedBitcode {
    pub len: usize,
    /// Whether the bitcode sat inside a `0x0B17C0DE` wrapper header.
    pub wrapped: bool,
}

/// A module and everything the disassembler asks of it.
#[derive(Debug, Clone, Default)]
pub struct Module {
    pub name: String,
    pub types: TypeTable,
    pub globals: Vec<GlobalVariable>,
    pub functions: Vec<Function>,
    pub named_metadata: Vec<NamedMetadata>,
    pub undecoded: Option<UndecodedBitcode>,
    dxil: DxilModule,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn add_global(
        &mut self,
        name: impl Into<String>,
        value_type: TypeId,
        constant: bool,
    ) -> GlobalId {
        let symbol_type = self.types.pointer(value_type);
        let id = GlobalId(self.globals.len() as u32);
        self.globals.push(GlobalVariable {
            name: name.into(),
            value_type,
            symbol_type,
            constant,
        });
        id
    }

    /// Declares a function. Returns the existing one if the name is taken.
    pub fn declare_function(&mut self, name: impl Into<String>, ty: TypeId) -> FunctionId {
        let name = name.into();
        if let Some(id) = self.function_by_name(&name) {
            return id;
        }
        let id = FunctionId(self.functions.len() as u32);
        self.functions.push(Function {
            name,
            ty,
            blocks: Vec::new(),
        });
        id
    }

    /// Appends a block to a function, turning a declaration into a definition.
    pub fn push_block(&mut self, function: FunctionId, block: BasicBlock) {
        if let Some(f) = self.functions.get_mut(function.0 as usize) {
            f.blocks.push(block);
        }
    }

    pub fn add_named_metadata(&mut self, name: impl Into<String>, operands: Vec<String>) {
        self.named_metadata.push(NamedMetadata {
            name: name.into(),
            operands,
        });
    }

    pub fn function(&self, id: FunctionId) -> Option<&Function> {
        self.functions.get(id.0 as usize)
    }

    pub fn function_by_name(&self, name: &str) -> Option<FunctionId> {
        self.functions
            .iter()
            .position(|f| f.name == name)
            .map(|index| FunctionId(index as u32))
    }

    pub fn global(&self, id: GlobalId) -> Option<&GlobalVariable> {
        self.globals.get(id.0 as usize)
    }

    pub fn global_by_name(&self, name: &str) -> Option<GlobalId> {
        self.globals
            .iter()
            .position(|g| g.name == name)
            .map(|index| GlobalId(index as u32))
    }

    pub fn get_named_metadata(&self, name: &str) -> Option<&NamedMetadata> {
        self.named_metadata.iter().find(|md| md.name == name)
    }

    /// Whether the module carries `dx.version` and therefore a DXIL view.
    pub fn is_dxil(&self) -> bool {
        self.get_named_metadata(DXIL_VERSION_METADATA).is_some()
    }

    /// The DXIL view: signatures, resources and the annotation store.
    pub fn dxil(&self) -> &DxilModule {
        &self.dxil
    }

    pub fn dxil_mut(&mut self) -> &mut DxilModule {
        &mut self.dxil
    }

    /// Type of an operand.
    pub fn value_type(&self, value: &Value) -> Option<TypeId> {
        match value {
            Value::ConstantInt { ty, .. }
            | Value::ConstantFloat { ty, .. }
            | Value::Undef(ty)
            | Value::Local { ty, .. } => Some(*ty),
            Value::Global(id) => self.global(*id).map(|g| g.symbol_type),
            Value::Function(id) => {
                let f = self.function(*id)?;
                self.types.find(&Type::Pointer {
                    pointee: f.ty,
                    address_space: 0,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declare_function_is_idempotent_by_name() {
        let mut m = Module::new("m");
        let void = m.types.void();
        let ty = m.types.function(void, vec![]);
        let a = m.declare_function("main", ty);
        let b = m.declare_function("main", ty);
        assert_eq!(a, b);
        assert_eq!(m.functions.len(), 1);
        assert!(m.function(a).unwrap().is_declaration());
    }

    #[test]
    fn dxil_view_is_gated_on_version_metadata() {
        let mut m = Module::new("m");
        assert!(!m.is_dxil());
        m.add_named_metadata(DXIL_VERSION_METADATA, vec!["!{i32 1, i32 0}".into()]);
        assert!(m.is_dxil());
    }

    #[test]
    fn call_operands_are_reachable() {
        let mut m = Module::new("m");
        let i32_ty = m.types.int(32);
        let fty = m.types.function(i32_ty, vec![i32_ty]);
        let callee = m.declare_function("dx.op.threadId.i32", fty);
        let inst = Instruction::call(
            Some("1"),
            callee,
            vec![Value::ConstantInt {
                ty: i32_ty,
                value: 93,
            }],
        );
        let (target, args) = inst.as_call().unwrap();
        assert_eq!(target, callee);
        assert_eq!(args[0].as_constant_int(), Some(93));
        assert_eq!(Instruction::ret(None).as_call(), None);
    }
}
