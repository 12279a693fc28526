use dxil_ir::{AnnotationWriter, Instruction, Module};

use crate::opcodes;

const DXIL_OP_PREFIX: &str = "dx.op.";

/// Appends `; Name(args)` to every call of a `dx.op.*` intrinsic.
///
/// The opcode is the first argument, which must be an integer constant; calls
/// where it is anything else are left alone.
#[derive(Debug, Default, Clone, Copy)]
pub struct OpcodeAnnotator;

impl AnnotationWriter for OpcodeAnnotator {
    fn info_comment(&self, module: &Module, instruction: &Instruction, out: &mut String) {
        let Some((callee, args)) = instruction.as_call() else {
            return;
        };
        let is_dxil_op = module
            .function(callee)
            .is_some_and(|f| f.name.starts_with(DXIL_OP_PREFIX));
        if !is_dxil_op {
            return;
        }
        let Some(opcode) = args.first().and_then(|arg| arg.as_constant_int()) else {
            return;
        };

        match opcodes::lookup(opcode) {
            Some((name, signature)) => {
                out.push_str("  ; ");
                out.push_str(name);
                out.push_str(signature);
            }
            None => out.push_str(&format!("  ; invalid DXIL opcode #{opcode}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dxil_ir::{BasicBlock, Value};
    use pretty_assertions::assert_eq;

    fn annotate(callee_name: &str, args: impl FnOnce(&mut Module) -> Vec<Value>) -> String {
        let mut m = Module::new("m");
        let void = m.types.void();
        let ty = m.types.function(void, vec![]);
        let callee = m.declare_function(callee_name, ty);
        let args = args(&mut m);
        let inst = Instruction::call(None, callee, args);
        let mut out = String::new();
        OpcodeAnnotator.info_comment(&m, &inst, &mut out);
        out
    }

    fn opcode(m: &mut Module, value: u64) -> Value {
        Value::ConstantInt {
            ty: m.types.int(32),
            value,
        }
    }

    #[test]
    fn names_known_opcodes() {
        let out = annotate("dx.op.storeOutput.f32", |m| vec![opcode(m, 5)]);
        assert_eq!(out, "  ; StoreOutput(outputtSigId,rowIndex,colIndex,value)");
    }

    #[test]
    fn flags_out_of_range_opcodes() {
        let out = annotate("dx.op.bogus", |m| vec![opcode(m, 149)]);
        assert_eq!(out, "  ; invalid DXIL opcode #149");
    }

    #[test]
    fn skips_non_constant_opcode() {
        let out = annotate("dx.op.loadInput.f32", |m| {
            let ty = m.types.int(32);
            vec![Value::Local {
                ty,
                name: "op".into(),
            }]
        });
        assert_eq!(out, "");
    }

    #[test]
    fn skips_other_calls_and_empty_argument_lists() {
        assert_eq!(annotate("llvm.foo", |m| vec![opcode(m, 5)]), "");
        assert_eq!(annotate("dx.op.storeOutput.f32", |_| Vec::new()), "");
    }

    #[test]
    fn annotates_printed_module() {
        let mut m = Module::new("m");
        let void = m.types.void();
        let i32_ty = m.types.int(32);
        let main_ty = m.types.function(void, vec![]);
        let main = m.declare_function("main", main_ty);
        let op_ty = m.types.function(void, vec![i32_ty]);
        let op = m.declare_function("dx.op.discard", op_ty);
        m.push_block(
            main,
            BasicBlock {
                label: "entry".into(),
                instructions: vec![
                    Instruction::call(
                        None,
                        op,
                        vec![Value::ConstantInt {
                            ty: i32_ty,
                            value: 82,
                        }],
                    ),
                    Instruction::ret(None),
                ],
            },
        );
        let mut out = String::new();
        m.print(&mut out, &OpcodeAnnotator);
        let annotated: Vec<&str> = out.lines().filter(|l| l.contains("  ; ")).collect();
        assert_eq!(annotated.len(), 1, "{out}");
        assert!(annotated[0].ends_with(&format!(
            "  ; {}{}",
            opcodes::OPCODE_TABLE[82].0,
            opcodes::OPCODE_TABLE[82].1
        )));
    }
}
