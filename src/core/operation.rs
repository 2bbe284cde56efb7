//! Native operations exposed by `quilt_rs`

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Commit,
    Install,
    Push,
}

impl Operation {
    pub const ALL: [Operation; 3] = [Operation::Commit, Operation::Install, Operation::Push];

    /// C symbol the backing library exports for this operation.
    #[inline]
    pub fn symbol(self) -> &'static str {
        match self {
            Operation::Commit => "quilt_commit",
            Operation::Install => "quilt_install",
            Operation::Push => "quilt_push",
        }
    }

    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            Operation::Commit => "commit",
            Operation::Install => "install",
            Operation::Push => "push",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
