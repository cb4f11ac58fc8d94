pub mod enrichment;
pub mod question;
pub mod sheet;
pub mod text_unit;
pub mod upload;
pub mod vocabulary;

pub use enrichment::EnrichmentFields;
pub use question::{
    ClassifiedQuestion, DescriptiveQuestion, ObjectiveQuestion, OptionSlot, QuestionMeta,
    QuestionSets, SubjectiveQuestion, WorkbookStage,
};
pub use sheet::{Cell, SheetKind, SheetTable};
pub use text_unit::TextUnit;
pub use upload::UploadedDocument;
pub use vocabulary::CognitiveSkill;
