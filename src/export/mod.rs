mod assembler;
mod selection;

pub use assembler::{assemble_export, ExportReport, ExportSection, FileSource};
pub use selection::{select_files, Selection};
