/// Component type of a resource element or an annotated field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompType {
    #[default]
    Invalid,
    I1,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F16,
    F32,
    F64,
    SNormF16,
    UNormF16,
    SNormF32,
    UNormF32,
    SNormF64,
    UNormF64,
}

impl CompType {
    pub fn from_raw(raw: u32) -> Option<Self> {
        use CompType::*;
        Some(match raw {
            0 => Invalid,
            1 => I1,
            2 => I16,
            3 => U16,
            4 => I32,
            5 => U32,
            6 => I64,
            7 => U64,
            8 => F16,
            9 => F32,
            10 => F64,
            11 => SNormF16,
            12 => UNormF16,
            13 => SNormF32,
            14 => UNormF32,
            15 => SNormF64,
            16 => UNormF64,
            _ => return None,
        })
    }

    /// Short IR-style name, used in the resource binding format column.
    pub fn name(self) -> &'static str {
        use CompType::*;
        match self {
            Invalid => "invalid",
            I1 => "i1",
            I16 => "i16",
            U16 => "u16",
            I32 => "i32",
            U32 => "u32",
            I64 => "i64",
            U64 => "u64",
            F16 => "f16",
            F32 => "f32",
            F64 => "f64",
            SNormF16 => "snorm_f16",
            UNormF16 => "unorm_f16",
            SNormF32 => "snorm_f32",
            UNormF32 => "unorm_f32",
            SNormF64 => "snorm_f64",
            UNormF64 => "unorm_f64",
        }
    }

    /// HLSL keyword, used when reconstructing struct layouts.
    pub fn hlsl_name(self) -> &'static str {
        use CompType::*;
        match self {
            Invalid => "unknown",
            I1 => "bool",
            I16 => "min16i",
            U16 => "min16ui",
            I32 => "int",
            U32 => "uint",
            I64 => "int64_t",
            U64 => "uint64_t",
            F16 => "min16float",
            F32 => "float",
            F64 => "double",
            SNormF16 => "snorm_min16f",
            UNormF16 => "unorm_min16f",
            SNormF32 => "snorm_float",
            UNormF32 => "unorm_float",
            SNormF64 => "snorm_double",
            UNormF64 => "unorm_double",
        }
    }
}
