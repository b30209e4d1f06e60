mod pdb;

pub use pdb::parse_pdb;
