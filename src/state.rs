pub mod node_info;
