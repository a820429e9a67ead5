pub mod assembler;
pub mod distributor;
pub mod formatting;
pub mod selection;
pub mod serializer;

pub use assembler::{Assembler, LayoutMode};
pub use distributor::{allocate, distribute, DistributionResult, DEFAULT_TARGET_COUNT};
pub use selection::{Selection, SelectionError, MAX_SELECTION};
pub use serializer::{DocumentSerializer, JsonSerializer, OutputFormat, PlainTextSerializer};
