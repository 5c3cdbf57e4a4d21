/// WordprocessingML parsing for header parts.
///
/// This module turns header part XML into typed fragments:
/// - `HeaderPart`: one `/word/header*.xml` part; slices body paragraphs
///   and tables
/// - `Paragraph` / `Run`: a `<w:p>` and its `<w:r>` runs with explicit
///   formatting
/// - `Table` / `Row` / `Cell`: `<w:tbl>` structure, cells recursing into
///   paragraphs
///
/// Fragments hold raw XML bytes and parse lazily; nothing here applies
/// style inheritance, because the validator compares explicit formatting
/// only.
pub mod enums;
mod frag;
pub mod header;
pub mod paragraph;
pub mod table;

pub use enums::{Alignment, HeaderType};
pub use header::{HeaderPart, HeaderRef};
pub use paragraph::{Paragraph, Run};
pub use table::{Cell, Row, Table};
