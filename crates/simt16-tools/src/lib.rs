pub mod analyze;
pub mod model;

// Re-export commonly used types/functions for the binaries
pub use analyze::{analyze_dump, layout_image, render_dump, render_layout, DumpReport, LayoutReport};
pub use model::{load_program, load_values, parse_program, parse_values, render_program, ProgramFormat};
