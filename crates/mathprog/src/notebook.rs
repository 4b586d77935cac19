//! Model assembly from notebook-style cells.
//!
//! Editing hosts present a model as a sequence of cells. Cells whose
//! trimmed text starts with the directive marker are host commands, not
//! model source, and are excluded from assembly.

/// Leading character that marks a cell as a host directive.
pub const DIRECTIVE_MARKER: char = '%';

/// The directive a host issues to solve the assembled model.
pub const SOLVE_DIRECTIVE: &str = "%solve";

/// What kind of content a cell holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Code,
    Markup,
}

/// One editing unit of a notebook buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub kind: CellKind,
    pub text: String,
}

impl Cell {
    pub fn code(text: impl Into<String>) -> Self {
        Self {
            kind: CellKind::Code,
            text: text.into(),
        }
    }

    pub fn markup(text: impl Into<String>) -> Self {
        Self {
            kind: CellKind::Markup,
            text: text.into(),
        }
    }

    /// True for code cells whose trimmed text starts with the directive
    /// marker.
    pub fn is_directive(&self) -> bool {
        self.kind == CellKind::Code
            && self.text.trim().starts_with(DIRECTIVE_MARKER)
    }

    /// True for cells holding the solve directive.
    pub fn is_solve_directive(&self) -> bool {
        self.kind == CellKind::Code
            && self.text.trim().starts_with(SOLVE_DIRECTIVE)
    }

    /// True for cells that contribute model source to assembly.
    pub fn is_model_source(&self) -> bool {
        self.kind == CellKind::Code && !self.is_directive()
    }
}

/// Concatenate the model source cells into one buffer for execution.
///
/// Contributing cells are joined with a blank-line separator; the result is
/// trimmed of leading and trailing newlines and carries exactly one
/// trailing newline. An empty selection yields `"\n"`.
pub fn assemble_model(cells: &[Cell]) -> String {
    let mut source = String::new();
    for cell in cells.iter().filter(|c| c.is_model_source()) {
        source.push_str(&cell.text);
        source.push_str("\n\n");
    }
    format!("{}\n", source.trim_matches('\n'))
}
