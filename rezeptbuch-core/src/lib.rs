pub mod codec;
pub mod error;
pub mod slug;
pub mod sort;
pub mod taxonomy;
pub mod validate;

pub use codec::{decode_list, encode_list};
pub use error::{CodecError, UnknownSortPolicy, ValidationError};
pub use slug::{recipe_id, slugify, FALLBACK_SLUG, MAX_SLUG_LEN};
pub use sort::{SortPolicy, Sortable};
pub use taxonomy::{Category, Taxonomy, UNRANKED};
pub use validate::{RecipeFields, RecipeInput};
