//! Instruction buffer for one IR function.
//!
//! Allocas go to a separate buffer so they always end up at the top of the entry block, however deep in the body the
//! declaration that needed them was.

use std::fmt::Write;

/// Text of one function body under construction.
#[derive(Debug)]
pub struct FunctionBuilder {
    allocas: String,
    body: String,
    next_temp: usize,
    next_label: usize,
    current_label: String,
    terminated: bool,
}

impl Default for FunctionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FunctionBuilder {
    pub fn new() -> Self {
        Self {
            allocas: String::new(),
            body: String::new(),
            next_temp: 0,
            next_label: 0,
            current_label: "entry".to_string(),
            terminated: false,
        }
    }

    /// A fresh SSA temporary, e.g. `%t3`.
    pub fn temp(&mut self) -> String {
        let name = format!("%t{}", self.next_temp);
        self.next_temp += 1;
        name
    }

    /// A fresh block label built from `hint`, e.g. `while.cond.2`.
    pub fn label(&mut self, hint: &str) -> String {
        let name = format!("{hint}.{}", self.next_label);
        self.next_label += 1;
        name
    }

    /// Label of the block instructions are currently appended to.
    pub fn current_label(&self) -> &str {
        &self.current_label
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Reserve a stack slot in the entry block.
    pub fn alloca(&mut self, ptr: &str, ty: &str) {
        let _ = writeln!(self.allocas, "  {ptr} = alloca {ty}");
    }

    /// Append an instruction to the current block.
    ///
    /// Code after a terminator has no predecessor; it is placed in a fresh unreachable block so the output stays
    /// well-formed.
    pub fn emit(&mut self, instruction: impl AsRef<str>) {
        if self.terminated {
            let dead = self.label("dead");
            self.start_block(&dead);
        }
        let _ = writeln!(self.body, "  {}", instruction.as_ref());
    }

    /// Append a terminator (`br`, `ret`, `unreachable`) and close the current block.
    pub fn terminate(&mut self, instruction: impl AsRef<str>) {
        self.emit(instruction);
        self.terminated = true;
    }

    /// Jump to `label` unless the current block already ended.
    pub fn branch(&mut self, label: &str) {
        if !self.terminated {
            self.terminate(format!("br label %{label}"));
        }
    }

    /// Start block `label`, falling through into it from an open block.
    pub fn start_block(&mut self, label: &str) {
        self.branch(label);
        let _ = writeln!(self.body, "{label}:");
        self.current_label = label.to_string();
        self.terminated = false;
    }

    /// The finished body: the entry label, every alloca, then the instructions.
    pub fn finish(self) -> String {
        let mut out = String::with_capacity(self.allocas.len() + self.body.len() + 8);
        out.push_str("entry:\n");
        out.push_str(&self.allocas);
        out.push_str(&self.body);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocas_are_hoisted_to_entry() {
        let mut b = FunctionBuilder::new();
        b.emit("store i32 1, ptr %x");
        b.alloca("%x", "i32");
        b.terminate("ret void");
        let text = b.finish();
        assert_eq!(text, "entry:\n  %x = alloca i32\n  store i32 1, ptr %x\n  ret void\n");
    }

    #[test]
    fn test_start_block_falls_through() {
        let mut b = FunctionBuilder::new();
        let next = b.label("next");
        b.start_block(&next);
        assert_eq!(b.current_label(), "next.0");
        assert!(b.finish().contains("  br label %next.0\nnext.0:\n"));
    }

    #[test]
    fn test_code_after_terminator_goes_to_dead_block() {
        let mut b = FunctionBuilder::new();
        b.terminate("ret void");
        b.emit("%t0 = add i32 1, 2");
        assert!(b.current_label().starts_with("dead."));
        let text = b.finish();
        assert!(text.contains("  ret void\ndead.0:\n  %t0 = add i32 1, 2\n"), "{text}");
    }

    #[test]
    fn test_branch_is_skipped_after_terminator() {
        let mut b = FunctionBuilder::new();
        b.terminate("ret void");
        b.branch("exit.0");
        assert_eq!(b.finish().matches("br ").count(), 0);
    }

    #[test]
    fn test_names_are_unique() {
        let mut b = FunctionBuilder::new();
        assert_eq!(b.temp(), "%t0");
        assert_eq!(b.temp(), "%t1");
        assert_eq!(b.label("then"), "then.0");
        assert_eq!(b.label("then"), "then.1");
    }
}
