//! Text encoding/decoding for X12 envelopes.
//!
//! Encoding runs in three layers: segment lines are chunked into transaction
//! sets, the sets are wrapped in a GS/GE functional group, and the group is
//! wrapped in an ISA/IEA interchange. Decoding reverses all three and checks
//! every trailer against its header.

pub mod chunk;
pub mod group;
pub mod interchange;
pub mod primitives;

pub use chunk::chunk_transaction_sets;
pub use group::{decode_functional_group, encode_functional_group, wrap_in_functional_group};
pub use interchange::{
    decode_interchange, encode_interchange, encode_interchange_with_options, wrap_in_interchange,
    wrap_segments,
};
pub use primitives::{EncodeOptions, Layout, SegmentReader, SegmentWriter};
