/*! Text transformers.

Normalization steps used to compute soft-duplicate keys (and optionally to rewrite fields).

Each step implements [Transform] and is wrapped in a [Guarded] that implements the failure policy.
Steps are chained in a [Normalizer], see [build_normalizers].
!*/

mod alphanumeric;
mod encoding;
mod guard;
mod html;
mod pipeline;
mod transform;
mod url_decode;
mod whitespace;

pub use alphanumeric::RemoveNonAlphanumeric;
pub use encoding::{EncodingCheck, TextEncoding};
pub use guard::Guarded;
pub use html::StripHtmlTags;
pub use pipeline::{build_normalizers, FieldTarget, NormalizationOptions, Normalizer, StepToggles};
pub use transform::{FailureKind, Transform, TransformError};
pub use url_decode::DecodeUrl;
pub use whitespace::CollapseWhitespace;
