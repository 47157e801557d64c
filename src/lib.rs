//! Read-only access to Apple II RDOS volume images.
//!
//! ```no_run
//! use std::fs::File;
//! use rdos::{classify, decode, read_content, ImageStore, RawRecord, RecordSlot, StoreOptions};
//!
//! let image = std::fs::read("disk.dsk")?;
//! let mut store = ImageStore::with_options(File::open("disk.dsk")?, StoreOptions::rdos_13_sector())?;
//!
//! // The catalog occupies track 1, sectors 0-10; stop at the terminator.
//! for chunk in image[0x1000..0x1b00].chunks_exact(32) {
//!     let raw = RawRecord::new(chunk)?;
//!     match raw.slot() {
//!         RecordSlot::EndOfDirectory => break,
//!         RecordSlot::Deleted        => continue,
//!         RecordSlot::InUse          => {}
//!     }
//!     let entry = decode(raw);
//!     let (kind, hint) = classify(&entry);
//!     let data = read_content(&entry, &mut store)?;
//!     println!("{} {:?} {} ({} bytes)", entry.filename, kind, hint, data.len());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod entry;
pub mod filetype;
pub mod store;
pub mod content;

pub use error::{RdosError, Result};
pub use entry::{decode, DirectoryEntry, RawRecord, RecordSlot};
pub use filetype::{classify, ContentKind, FilterHint};
pub use store::{BlockStore, Geometry, ImageStore, StoreOptions};
pub use content::read_content;
