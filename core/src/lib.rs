//! Frame/context state, term definitions, and RDF value types shared by the
//! context-processing engine and the expansion-to-quad walker.

mod context;
mod id;
mod loader;
mod processing_mode;
mod quad;
mod term;
mod term_definition;

pub use context::{Context, MAX_IMPORT_DEPTH};
pub use id::{has_absolute_scheme, is_well_formed_iri, BlankIdGenerator, Id};
pub use loader::{ContextLoader, LoadError, NoopLoader};
pub use processing_mode::{ProcessingMode, RdfDirectionMode};
pub use quad::{
	GraphName, Literal, LiteralKind, Object, OwnedQuad, OwnedTerm, QuadSink, Subject, VecSink,
	I18N_NS, RDF_DIRECTION, RDF_FIRST, RDF_JSON, RDF_LANGUAGE, RDF_NIL, RDF_REST, RDF_TYPE,
	RDF_VALUE, XSD_BOOLEAN, XSD_DOUBLE, XSD_INTEGER, XSD_STRING,
};
pub use term::Term;
pub use term_definition::{DirectionOverride, LanguageOverride, Override, TermDefinition, TypeCoercion};
