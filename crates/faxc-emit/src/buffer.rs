//! A minimal Intel-syntax text sink (§4.6): the emitter writes through
//! this instead of formatting instruction strings ad hoc, so every
//! caller gets consistent indentation and section framing.

#[derive(Debug, Default)]
pub struct AsmBuffer {
    text: String,
}

impl AsmBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(&mut self, line: &str) {
        self.text.push_str(line);
        self.text.push('\n');
    }

    pub fn blank(&mut self) {
        self.text.push('\n');
    }

    pub fn directive(&mut self, directive: &str) {
        self.raw(directive);
    }

    pub fn label(&mut self, name: &str) {
        self.raw(&format!("{name}:"));
    }

    pub fn global(&mut self, name: &str) {
        self.raw(&format!(".globl {name}"));
    }

    pub fn instr0(&mut self, mnemonic: &str) {
        self.raw(&format!("    {mnemonic}"));
    }

    pub fn instr1(&mut self, mnemonic: &str, op: impl std::fmt::Display) {
        self.raw(&format!("    {mnemonic} {op}"));
    }

    pub fn instr2(&mut self, mnemonic: &str, dst: impl std::fmt::Display, src: impl std::fmt::Display) {
        self.raw(&format!("    {mnemonic} {dst}, {src}"));
    }

    pub fn into_string(self) -> String {
        self.text
    }
}
