mod address;
mod codec;
mod key;
mod model;
mod params;
mod scope;

pub use address::NavigableAddress;
pub use codec::{decode, decode_params, encode, encode_params};
pub use key::{FilterKey, ReservedKey};
pub use model::{DEFAULT_PAGE, FacetSelections, FilterModel};
pub use params::QueryParams;
pub use scope::ListingScope;
