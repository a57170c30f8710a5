//! Node operators.

use std::fmt;

macro_rules! ops {
    ($($variant:ident => $name:literal,)*) => {
        /// Operator tag of an AST node.
        #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
        pub enum Op {
            #[default]
            Xxx,
            $($variant,)*
        }

        impl Op {
            /// Upper-case operator name used in dumps.
            pub const fn name(self) -> &'static str {
                match self {
                    Op::Xxx => "XXX",
                    $(Op::$variant => $name,)*
                }
            }
        }
    };
}

ops! {
    Addr => "ADDR",
    Add => "ADD",
    AndAnd => "ANDAND",
    AndNot => "ANDNOT",
    And => "AND",
    Array => "ARRAY",
    AsOp => "ASOP",
    As => "AS",
    As2 => "AS2",
    Bad => "BAD",
    Block => "BLOCK",
    Break => "BREAK",
    CallInter => "CALLINTER",
    CallMeth => "CALLMETH",
    Call => "CALL",
    Cap => "CAP",
    Case => "CASE",
    Closed => "CLOSED",
    Close => "CLOSE",
    Cmp => "CMP",
    CompMap => "COMPMAP",
    CompOs => "COMPOS",
    CompSlice => "COMPSLICE",
    Com => "COM",
    Continue => "CONTINUE",
    Conv => "CONV",
    ConvNop => "CONVNOP",
    DclArg => "DCLARG",
    DclField => "DCLFIELD",
    DclFunc => "DCLFUNC",
    Dcl => "DCL",
    Dec => "DEC",
    Defer => "DEFER",
    Div => "DIV",
    DotInter => "DOTINTER",
    DotMeth => "DOTMETH",
    DotPtr => "DOTPTR",
    DotType => "DOTTYPE",
    Dot => "DOT",
    Empty => "EMPTY",
    End => "END",
    Eq => "EQ",
    Extend => "EXTEND",
    Fall => "FALL",
    For => "FOR",
    Func => "FUNC",
    Ge => "GE",
    Goto => "GOTO",
    Gt => "GT",
    If => "IF",
    Inc => "INC",
    Index => "INDEX",
    IndReg => "INDREG",
    Ind => "IND",
    Key => "KEY",
    Label => "LABEL",
    Len => "LEN",
    Le => "LE",
    Literal => "LITERAL",
    Lsh => "LSH",
    Lt => "LT",
    Make => "MAKE",
    Minus => "MINUS",
    Mod => "MOD",
    Mul => "MUL",
    Name => "NAME",
    New => "NEW",
    Ne => "NE",
    NoName => "NONAME",
    Not => "NOT",
    OrOr => "OROR",
    Or => "OR",
    PanicN => "PANICN",
    Panic => "PANIC",
    Pack => "PACK",
    Param => "PARAM",
    Plus => "PLUS",
    PrintN => "PRINTN",
    Print => "PRINT",
    Proc => "PROC",
    Ptr => "PTR",
    Range => "RANGE",
    Recv => "RECV",
    Register => "REGISTER",
    Return => "RETURN",
    Rsh => "RSH",
    Select => "SELECT",
    Send => "SEND",
    Slice => "SLICE",
    Sub => "SUB",
    Switch => "SWITCH",
    TChan => "TCHAN",
    TMap => "TMAP",
    TStruct => "TSTRUCT",
    TInter => "TINTER",
    TFunc => "TFUNC",
    TArray => "TARRAY",
    TypeOf => "TYPEOF",
    TypeSw => "TYPESW",
    Type => "TYPE",
    XCase => "XCASE",
    XFall => "XFALL",
    Xor => "XOR",
}

impl Op {
    /// The comparison with the opposite truth value: `!(a op b)`.
    pub const fn negate(self) -> Option<Op> {
        match self {
            Op::Eq => Some(Op::Ne),
            Op::Ne => Some(Op::Eq),
            Op::Lt => Some(Op::Ge),
            Op::Gt => Some(Op::Le),
            Op::Le => Some(Op::Gt),
            Op::Ge => Some(Op::Lt),
            _ => None,
        }
    }

    /// The comparison with swapped operands: `a op b` is `b rev(op) a`.
    pub const fn reverse(self) -> Option<Op> {
        match self {
            Op::Eq => Some(Op::Eq),
            Op::Ne => Some(Op::Ne),
            Op::Lt => Some(Op::Gt),
            Op::Gt => Some(Op::Lt),
            Op::Le => Some(Op::Ge),
            Op::Ge => Some(Op::Le),
            _ => None,
        }
    }

    /// Call operators; these get the infinite Sethi-Ullman number.
    pub const fn is_call(self) -> bool {
        matches!(self, Op::Call | Op::CallMeth | Op::CallInter)
    }

    /// Leaves whose line number never moves the current line.
    pub const fn keeps_line(self) -> bool {
        matches!(self, Op::Name | Op::Type | Op::Pack | Op::Literal)
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
