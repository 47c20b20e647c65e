pub mod greedy;
pub mod overlap;

pub use greedy::{assemble_to_length, greedy_scs, AssemblyState, GreedyAssembler, ReadSet};
pub use overlap::{overlap, overlap_graph, OverlapEdge, OverlapGraph};
