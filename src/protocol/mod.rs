//! Wire protocol decoding
//!
//! Leaves of the decoder: frame splitting, record field parsing, item-id
//! classification, and the scalar notations (scores, serving, odds). All of
//! it is pure string work; the state machine lives in [`crate::state`].

mod fields;
mod framing;
mod item_id;
mod scalars;

pub use fields::Record;
pub use framing::{is_noise_topic, split_payload, SubMessage};
pub use item_id::{event_id_of, ItemId};
pub use scalars::{
    fractional_to_decimal, parse_point_score, parse_serving, parse_set_scores,
    serialize_set_scores, split_teams,
};
