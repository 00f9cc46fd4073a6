//! In-memory record model for datamap save files.
//!
//! A [`SaveFile`] owns an ordered arena of [`ClassRecord`]s, each holding an
//! ordered list of [`FieldRecord`]s. Cross-class references (base classes and
//! embedded classes) are modelled as [`ClassRef`], which is either unset, a
//! dangling name, or an index into the arena.
//!
//! Records are built once from a validated document and never mutated
//! afterwards. Name lookups are computed on demand:
//!
//! ```ignore
//! let save = load_save_file(Path::new("hl2.json"))?;
//! let classes = save.class_index();
//! if let Some(player) = classes.get("CBasePlayer") {
//!     let fields = player.field_index();
//! }
//! ```

mod field_type;
mod records;
mod save_file;

pub use field_type::*;
pub use records::*;
pub use save_file::*;
