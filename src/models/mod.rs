pub mod dataset;
pub mod document;
pub mod loaders;
pub mod pattern;

pub use dataset::{Dataset, DatasetCatalog, DatasetInfo, PatternLookup};
pub use document::{Block, DocumentModel, Paragraph};
pub use loaders::{load_catalog, load_dataset, parse_catalog, parse_dataset};
pub use pattern::{PatternRecord, QuestionItem, RawQuestionItem, SectionKind};
