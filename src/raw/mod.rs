mod arena;
mod node;
mod node_id;
mod raw_tree_map;

pub(crate) use node::Side;
pub(crate) use raw_tree_map::RawTreeMap;
