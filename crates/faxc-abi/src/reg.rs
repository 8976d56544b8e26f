//! General-purpose registers, named the way the emitter's Intel-syntax
//! output spells them, plus their 1-byte and 4-byte aliases (`faxc-emit`
//! needs the 1-byte alias for `Bool` loads/stores and `setcc` targets).

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Register {
    Rax,
    Rbx,
    Rcx,
    Rdx,
    Rsi,
    Rdi,
    Rbp,
    Rsp,
    R8,
    R9,
    R10,
    R11,
}

impl Register {
    /// The 64-bit (`qword`) name, used for `Int`/`String`/`Func` operands.
    pub const fn qword(self) -> &'static str {
        match self {
            Register::Rax => "rax",
            Register::Rbx => "rbx",
            Register::Rcx => "rcx",
            Register::Rdx => "rdx",
            Register::Rsi => "rsi",
            Register::Rdi => "rdi",
            Register::Rbp => "rbp",
            Register::Rsp => "rsp",
            Register::R8 => "r8",
            Register::R9 => "r9",
            Register::R10 => "r10",
            Register::R11 => "r11",
        }
    }

    /// The 32-bit (`dword`) name.
    pub const fn dword(self) -> &'static str {
        match self {
            Register::Rax => "eax",
            Register::Rbx => "ebx",
            Register::Rcx => "ecx",
            Register::Rdx => "edx",
            Register::Rsi => "esi",
            Register::Rdi => "edi",
            Register::Rbp => "ebp",
            Register::Rsp => "esp",
            Register::R8 => "r8d",
            Register::R9 => "r9d",
            Register::R10 => "r10d",
            Register::R11 => "r11d",
        }
    }

    /// The 1-byte (`byte`) name, used for `Bool` loads/stores and the
    /// destination of `setcc` instructions.
    pub const fn byte(self) -> &'static str {
        match self {
            Register::Rax => "al",
            Register::Rbx => "bl",
            Register::Rcx => "cl",
            Register::Rdx => "dl",
            Register::Rsi => "sil",
            Register::Rdi => "dil",
            Register::Rbp => "bpl",
            Register::Rsp => "spl",
            Register::R8 => "r8b",
            Register::R9 => "r9b",
            Register::R10 => "r10b",
            Register::R11 => "r11b",
        }
    }

    /// Selects the name at `size` bytes: 1 for `Bool`, 8 for everything
    /// else this language stores in a register (`Int`, `String`, `Func`
    /// pointers, array element addresses).
    pub const fn sized(self, size: i64) -> &'static str {
        match size {
            1 => self.byte(),
            4 => self.dword(),
            _ => self.qword(),
        }
    }
}

impl std::fmt::Display for Register {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.qword())
    }
}
